use std::fmt::Display;

use chrono::{Datelike, NaiveDate};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Date {
    date: NaiveDate,
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        Some(Self {
            date: NaiveDate::from_ymd_opt(year, month, day)?,
        })
    }

    pub fn today() -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Date;

    #[test]
    fn iso_display() {
        assert_eq!(Date::new(2024, 3, 7).unwrap().to_string(), "2024-03-07");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(Date::new(2023, 2, 29).is_none());
        assert!(Date::new(2024, 2, 29).is_some());
    }
}
