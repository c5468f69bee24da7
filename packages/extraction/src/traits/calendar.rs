//! Public holiday lookup.

use chrono::NaiveDate;

/// Answers whether a date is a public holiday.
pub trait HolidayCalendar: Send + Sync {
    /// Name of the holiday on `date`, if any.
    fn holiday_name(&self, date: NaiveDate) -> Option<String>;

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}
