//! Public holiday calendars.

use chrono::{Datelike, Duration, NaiveDate};

use crate::traits::calendar::HolidayCalendar;

/// Czech public holidays (fixed dates plus the two moveable Easter days).
const FIXED_HOLIDAYS: [(u32, u32, &str); 11] = [
    (1, 1, "Den obnovy samostatného českého státu"),
    (5, 1, "Svátek práce"),
    (5, 8, "Den vítězství"),
    (7, 5, "Den slovanských věrozvěstů Cyrila a Metoděje"),
    (7, 6, "Den upálení mistra Jana Husa"),
    (9, 28, "Den české státnosti"),
    (10, 28, "Den vzniku samostatného československého státu"),
    (11, 17, "Den boje za svobodu a demokracii"),
    (12, 24, "Štědrý den"),
    (12, 25, "1. svátek vánoční"),
    (12, 26, "2. svátek vánoční"),
];

/// Calendar of Czech public holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct CzechHolidays;

impl CzechHolidays {
    pub fn new() -> Self {
        Self
    }
}

impl HolidayCalendar for CzechHolidays {
    fn holiday_name(&self, date: NaiveDate) -> Option<String> {
        if let Some((_, _, name)) = FIXED_HOLIDAYS
            .iter()
            .find(|(month, day, _)| date.month() == *month && date.day() == *day)
        {
            return Some((*name).to_string());
        }

        let easter = easter_sunday(date.year())?;
        if date == easter - Duration::days(2) {
            Some("Velký pátek".to_string())
        } else if date == easter + Duration::days(1) {
            Some("Velikonoční pondělí".to_string())
        } else {
            None
        }
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
