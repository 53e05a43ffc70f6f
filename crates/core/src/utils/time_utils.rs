use chrono::{Local, NaiveDate};

/// The report date for a run started now, in the machine's local timezone.
///
/// Reports are keyed by this date, so two runs on the same local day write
/// the same file.
pub fn report_date_today() -> NaiveDate {
    Local::now().date_naive()
}
