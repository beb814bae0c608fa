use chrono::{Datelike, Months, NaiveDate};

/// Every calendar day of one month, first to last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthWindow {
    /// Window for the month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // The first of a month that already holds `date` always exists.
        let first = date.with_day(1).unwrap_or(date);
        Self::from_first_day(first)
    }

    /// Window for an explicit month. `None` when `month` is outside 1..=12 or
    /// the year is out of chrono's range.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::from_first_day)
    }

    fn from_first_day(first: NaiveDate) -> Self {
        let days = first
            .iter_days()
            .take_while(|day| day.month() == first.month())
            .collect();
        Self {
            year: first.year(),
            month: first.month(),
            days,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Days of the window on or before `today`, in order.
    pub fn days_through(&self, today: NaiveDate) -> &[NaiveDate] {
        let passed = self.days.partition_point(|day| *day <= today);
        &self.days[..passed]
    }

    /// Window `months` months away; negative steps go back in time.
    pub fn shifted(&self, months: i32) -> Option<Self> {
        let first = self.first_day();
        let step = Months::new(months.unsigned_abs());
        let target = if months >= 0 {
            first.checked_add_months(step)
        } else {
            first.checked_sub_months(step)
        }?;
        Some(Self::from_first_day(target))
    }
}
