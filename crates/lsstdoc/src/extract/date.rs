//! Modification date extraction.
//!
//! An explicit `\date{YYYY-MM-DD}` is read as noon in the project's civil
//! timezone (US Pacific), then normalized to UTC. `\date{\today}`, a missing
//! `\date` and an unparseable date all fall back to the last commit touching
//! the document's content files.

use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::Los_Angeles;

use super::*;
use crate::vcs::CONTENT_EXTENSIONS;

/// Parses a strict `YYYY-MM-DD` date into noon Pacific time, as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
  lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
  }

  if !ISO_DATE.is_match(raw) {
    return None;
  }
  noon_pacific(NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?)
}

/// 12:00 on `date` in `America/Los_Angeles`, converted to UTC.
///
/// Daylight saving transitions happen at 02:00 local time, so noon always
/// exists and is never ambiguous.
pub fn noon_pacific(date: NaiveDate) -> Option<DateTime<Utc>> {
  let noon = date.and_hms_opt(12, 0, 0)?;
  Los_Angeles.from_local_datetime(&noon).single().map(|time| time.with_timezone(&Utc))
}

/// The document's modification date.
///
/// The returned reason tells the fallback paths apart:
/// [`Fallback::MissingCommand`], [`Fallback::Today`] or
/// [`Fallback::InvalidDate`]. In all three the value is the version-control
/// timestamp, or `None` when that lookup fails.
pub fn date_modified(
  source: &str,
  version_control: &dyn VersionControl,
) -> Resolved<Option<DateTime<Utc>>> {
  let source = strip_comments(source);
  let reason = match Field::Date.resolve_value(&source).map(str::trim) {
    None => Field::Date.missing_reason(),
    Some(r"\today") => {
      debug!("\\date is \\today, dating the document from version control");
      Fallback::Today
    },
    Some(raw) => match parse_date(raw) {
      Some(date) => return Resolved::Found(Some(date)),
      None => {
        let reason = Fallback::InvalidDate { raw: raw.to_string() };
        warn!("{reason}, dating the document from version control");
        reason
      },
    },
  };

  let fallback = match version_control.last_modified(CONTENT_EXTENSIONS) {
    Ok(time) => time,
    Err(e) => {
      warn!("Could not read the last modification time: {e}");
      None
    },
  };
  Resolved::defaulted(fallback, reason)
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;

  /// Version control returning a fixed answer and counting queries.
  struct FixedHistory {
    answer:  Option<DateTime<Utc>>,
    queries: AtomicUsize,
  }

  impl FixedHistory {
    fn new(answer: Option<DateTime<Utc>>) -> Self { Self { answer, queries: AtomicUsize::new(0) } }
  }

  impl VersionControl for FixedHistory {
    fn last_modified(&self, extensions: &[&str]) -> Result<Option<DateTime<Utc>>> {
      assert_eq!(extensions, ["tex", "bib", "pdf", "jpg", "png", "csv"]);
      self.queries.fetch_add(1, Ordering::SeqCst);
      Ok(self.answer)
    }
  }

  /// Version control that is not available.
  struct NoRepository;

  impl VersionControl for NoRepository {
    fn last_modified(&self, _: &[&str]) -> Result<Option<DateTime<Utc>>> {
      Err(LsstDocError::VersionControl("not a git repository".into()))
    }
  }

  fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
  }

  #[test]
  fn test_winter_date_is_noon_pst() {
    assert_eq!(parse_date("2020-01-01"), Some(utc(2020, 1, 1, 20)));
  }

  #[test]
  fn test_summer_date_is_noon_pdt() {
    assert_eq!(parse_date("2019-07-15"), Some(utc(2019, 7, 15, 19)));
  }

  #[test]
  fn test_dst_transition_days() {
    assert_eq!(parse_date("2021-03-14"), Some(utc(2021, 3, 14, 19)));
    assert_eq!(parse_date("2021-11-07"), Some(utc(2021, 11, 7, 20)));
  }

  #[test]
  fn test_strict_format() {
    assert_eq!(parse_date("2020-1-1"), None);
    assert_eq!(parse_date("2020-02-30"), None);
    assert_eq!(parse_date("2020-01-01T00:00"), None);
    assert_eq!(parse_date("January 1, 2020"), None);
  }

  #[test]
  fn test_explicit_date_skips_version_control() {
    let history = FixedHistory::new(Some(utc(2023, 5, 5, 5)));
    let resolved = date_modified("\\date{ 2020-01-01 }", &history);
    assert_eq!(resolved, Resolved::Found(Some(utc(2020, 1, 1, 20))));
    assert_eq!(history.queries.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn test_today_uses_version_control() {
    let history = FixedHistory::new(Some(utc(2023, 5, 5, 5)));
    let resolved = date_modified(r"\date{\today}", &history);
    assert_eq!(resolved, Resolved::defaulted(Some(utc(2023, 5, 5, 5)), Fallback::Today));
    assert_eq!(history.queries.load(Ordering::SeqCst), 1);
  }

  #[traced_test]
  #[test]
  fn test_missing_date_uses_version_control() {
    let history = FixedHistory::new(Some(utc(2022, 2, 2, 2)));
    let resolved = date_modified(r"\title{No date}", &history);
    assert_eq!(resolved, Resolved::defaulted(Some(utc(2022, 2, 2, 2)), Fallback::missing("date")));
    assert!(logs_contain("lsstdoc has no date"));
  }

  #[traced_test]
  #[test]
  fn test_invalid_date_uses_version_control() {
    let history = FixedHistory::new(None);
    let resolved = date_modified(r"\date{Spring 2020}", &history);
    assert_eq!(
      resolved,
      Resolved::defaulted(None, Fallback::InvalidDate { raw: "Spring 2020".into() })
    );
    assert_eq!(history.queries.load(Ordering::SeqCst), 1);
    assert!(logs_contain("could not parse date"));
  }

  #[traced_test]
  #[test]
  fn test_version_control_failure_is_no_date() {
    let resolved = date_modified(r"\date{\today}", &NoRepository);
    assert_eq!(resolved, Resolved::defaulted(None, Fallback::Today));
    assert!(logs_contain("not a git repository"));
  }

  #[test]
  fn test_commented_out_date_ignored() {
    let history = FixedHistory::new(None);
    let source = "\\date{2020-01-01}\n\\setDocRef{DMTN-131}\n% \\date{2019-05-05}\n";
    assert_eq!(date_modified(source, &history), Resolved::Found(Some(utc(2020, 1, 1, 20))));

    let source = "% \\date{2020-01-01}\n\\title{Undated}";
    let resolved = date_modified(source, &history);
    assert_eq!(resolved.reason(), Some(&Fallback::missing("date")));
    assert_eq!(history.queries.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn test_last_date_wins() {
    let resolved = date_modified(r"\date{\today} \date{2020-01-01}", &NoRepository);
    assert_eq!(resolved.into_value(), Some(utc(2020, 1, 1, 20)));
  }
}
