use lsstdoc::convert::Pandoc;

use super::*;

#[traced_test]
#[tokio::test]
async fn test_dmtn_131() {
  let licenses = FixedLicenses { license_id: Some("CC-BY-4.0".into()), ..Default::default() };
  let parser =
    MetadataParser::new(FakePandoc::default(), FixedHistory(None), licenses.clone())
      .with_ci(github_actions());

  let extraction = parser.extract(DMTN_131).await;
  let metadata = &extraction.metadata;

  assert!(extraction.defaults.is_empty(), "unexpected defaults: {:?}", extraction.defaults);
  assert_eq!(metadata.title(), "When clouds might be good for LSST");
  assert_eq!(metadata.authors(), [
    Person::new("William O'Mullane"),
    Person::new("Tim Jenness"),
    Person::new("Leanne Guy"),
  ]);
  assert_eq!(metadata.date_modified(), Some(utc(2020, 1, 1, 20)));
  assert_eq!(metadata.identifier(), Some("DMTN-131"));

  let abstract_text = metadata.abstract_text().unwrap();
  assert!(abstract_text.plain.starts_with("We outline a proposal to use {\\em cloud} services"));
  assert!(abstract_text.html.starts_with("<p>We outline"));

  assert_eq!(metadata.version(), Some("main"));
  assert_eq!(metadata.repository_url(), Some("https://github.com/lsst-dm/dmtn-131"));
  assert_eq!(metadata.ci_url(), Some("https://github.com/lsst-dm/dmtn-131/actions/runs/1234"));
  assert_eq!(metadata.license_id(), Some("CC-BY-4.0"));
  assert!(metadata.full_text().unwrap().contains("\\section{Introduction}"));
  assert_eq!(licenses.requests.lock().unwrap().as_slice(), ["lsst-dm/dmtn-131"]);
}

#[traced_test]
#[tokio::test]
async fn test_missing_doc_ref() {
  let source = DMTN_131.replace(r"\setDocRef{DMTN-131}", "");
  let extraction = mocked_parser().extract(&source).await;

  assert_eq!(extraction.metadata.identifier(), None);
  assert_eq!(
    extraction.default_for(Field::Identifier),
    Some(&Fallback::MissingCommand { command: "setDocRef".into() })
  );
  assert_eq!(extraction.defaults.len(), 1);

  assert_eq!(extraction.metadata.title(), "When clouds might be good for LSST");
  assert_eq!(extraction.metadata.authors().len(), 3);
  assert_eq!(extraction.metadata.date_modified(), Some(utc(2020, 1, 1, 20)));
  assert!(extraction.metadata.abstract_text().is_some());
  assert!(logs_contain("lsstdoc has no identifier"));
}

#[traced_test]
#[tokio::test]
async fn test_empty_document() {
  let licenses = FixedLicenses::default();
  let parser = MetadataParser::new(
    FakePandoc::default(),
    FixedHistory(Some(utc(2023, 3, 1, 8))),
    licenses.clone(),
  );

  let extraction = parser.extract("").await;
  let metadata = &extraction.metadata;

  assert_eq!(metadata.title(), "");
  assert!(metadata.authors().is_empty());
  assert_eq!(metadata.date_modified(), Some(utc(2023, 3, 1, 8)));
  assert_eq!(metadata.identifier(), None);
  assert_eq!(metadata.abstract_text(), None);
  assert_eq!(metadata.repository_url(), None);
  assert_eq!(metadata.license_id(), None);

  let fields: Vec<Field> = extraction.defaults.iter().map(|applied| applied.field).collect();
  assert_eq!(fields, Field::ALL);
  assert!(licenses.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_author_list_opening_with_comment() {
  let extraction = mocked_parser().extract(DMTN_131).await;
  let names: Vec<&str> =
    extraction.metadata.authors().iter().map(|person| person.name.as_str()).collect();

  assert_eq!(names, ["William O'Mullane", "Tim Jenness", "Leanne Guy"]);
  assert!(names.iter().all(|name| !name.is_empty()));
  assert_eq!(extraction.default_for(Field::Authors), None);
}

#[tokio::test]
async fn test_commented_out_calls_do_not_win() {
  let source = [
    r"\date{2020-01-01}",
    r"\setDocRef{DMTN-131}",
    r"% old: \setDocRef{DMTN-000}",
    r"% \date{2019-05-05}",
  ]
  .join("\n");
  let extraction = mocked_parser().extract(&source).await;

  assert_eq!(extraction.metadata.identifier(), Some("DMTN-131"));
  assert_eq!(extraction.metadata.date_modified(), Some(utc(2020, 1, 1, 20)));
  assert_eq!(extraction.default_for(Field::Date), None);
  assert_eq!(extraction.default_for(Field::Identifier), None);
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
  let parser = mocked_parser().with_ci(github_actions());
  let first = parser.extract(DMTN_131).await;
  let second = parser.extract(DMTN_131).await;
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first.metadata).unwrap(),
    serde_json::to_string(&second.metadata).unwrap()
  );
}

#[tokio::test]
async fn test_placeholders_are_overridden() {
  let source = [
    r"\title{Document Title}",
    r"\author{A. Placeholder}",
    r"\setDocRef{DMTN-000}",
    r"\date{\today}",
    DMTN_131,
  ]
  .join("\n");
  let extraction = mocked_parser().extract(&source).await;

  assert!(extraction.defaults.is_empty());
  assert_eq!(extraction.metadata.title(), "When clouds might be good for LSST");
  assert_eq!(extraction.metadata.authors()[0], Person::new("William O'Mullane"));
  assert_eq!(extraction.metadata.identifier(), Some("DMTN-131"));
  assert_eq!(extraction.metadata.date_modified(), Some(utc(2020, 1, 1, 20)));
}

#[traced_test]
#[tokio::test]
async fn test_today_distinguished_from_malformed_date() {
  let parser = mocked_parser();

  let today = parser.extract(&DMTN_131.replace("2020-01-01", r"\today")).await;
  assert_eq!(today.default_for(Field::Date), Some(&Fallback::Today));
  assert_eq!(today.metadata.date_modified(), Some(utc(2023, 3, 1, 8)));

  let malformed = parser.extract(&DMTN_131.replace("2020-01-01", "2020/01/01")).await;
  assert_eq!(
    malformed.default_for(Field::Date),
    Some(&Fallback::InvalidDate { raw: "2020/01/01".into() })
  );
  assert_eq!(malformed.metadata.date_modified(), Some(utc(2023, 3, 1, 8)));
}

#[traced_test]
#[tokio::test]
async fn test_failing_collaborators_never_fail_extraction() {
  let parser = MetadataParser::new(NoPandoc, NoRepository, FixedLicenses::default())
    .with_ci(github_actions());
  let source = DMTN_131.replace("2020-01-01", r"\today");

  let extraction = parser.extract(&source).await;
  let metadata = &extraction.metadata;

  assert_eq!(metadata.title(), "When clouds might be good for LSST");
  assert_eq!(metadata.authors()[1], Person::new("Tim Jenness"));
  assert_eq!(metadata.date_modified(), None);
  assert_eq!(metadata.identifier(), Some("DMTN-131"));
  assert!(metadata.abstract_text().unwrap().plain.contains(r"\LSST{} data"));
  assert_eq!(metadata.full_text(), None);
  assert_eq!(metadata.license_id(), None);

  assert!(matches!(
    extraction.default_for(Field::Title),
    Some(Fallback::ConversionFailed { .. })
  ));
  assert_eq!(extraction.default_for(Field::Date), Some(&Fallback::Today));
  assert!(logs_contain("fatal: not a git repository"));
  assert!(logs_contain("Could not render the full document text"));
}

#[test]
fn test_occurrences_of_every_field() {
  for field in Field::ALL {
    assert_eq!(field.occurrences(DMTN_131).count(), 1, "{field} should occur once");
  }
  let title = Field::Title.resolve(DMTN_131).unwrap();
  assert_eq!(title.get("short_title"), Some("Clouds and LSST"));
}

#[test]
fn test_converter_call_count() {
  let converter = FakePandoc::default();
  let resolved = lsstdoc::extract::authors(DMTN_131, &converter);
  assert!(resolved.is_found());
  assert_eq!(converter.calls.load(Ordering::SeqCst), 3);
}

#[ignore = "Requires a local pandoc installation."]
#[test]
fn test_pandoc_renders_accents() -> TestResult<()> {
  let pandoc = Pandoc::default();
  let source = "\\title{Test}\n\\author{St\\'{e}phane}\n";
  let resolved = lsstdoc::extract::authors(source, &pandoc);
  assert_eq!(resolved.into_value(), [Person::new("Stéphane")]);

  let title = lsstdoc::extract::title(r"\title{When clouds might be good for \LSST}", &pandoc);
  assert_eq!(title.into_value(), "When clouds might be good for LSST");
  Ok(())
}
