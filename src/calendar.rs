use crate::holidays::HolidayTable;
use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Années acceptées par le classifieur et le générateur.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1970..=2100;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Paire (ou singleton en bordure) de jours de repos éligibles consécutifs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendPeriod {
    pub days: Vec<u32>,
}

impl WeekendPeriod {
    pub fn contains(&self, day: u32) -> bool {
        self.days.contains(&day)
    }
}

/// Classification d'un mois : jours éligibles au repos et week-ends groupés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub rest_eligible: Vec<u32>,
    pub weekend_periods: Vec<WeekendPeriod>,
}

impl MonthCalendar {
    pub fn is_rest_eligible(&self, day: u32) -> bool {
        self.rest_eligible.binary_search(&day).is_ok()
    }

    /// Index de la période contenant `day`.
    pub fn period_of(&self, day: u32) -> Option<usize> {
        self.weekend_periods.iter().position(|p| p.contains(day))
    }

    pub fn days(&self) -> RangeInclusive<u32> {
        1..=self.days_in_month
    }
}

pub fn check_month(year: i32, month: u32) -> Result<(), SchedError> {
    if !(1..=12).contains(&month) {
        return Err(SchedError::InvalidMonth(month));
    }
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(SchedError::UnsupportedYear(year));
    }
    Ok(())
}

/// Nombre de jours du mois (calendrier grégorien).
pub fn days_in_month(year: i32, month: u32) -> Result<u32, SchedError> {
    check_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(SchedError::InvalidMonth(month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(SchedError::UnsupportedYear(year))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Classe chaque jour du mois. Avec `holidays`, les jours fériés sont aussi
/// éligibles au repos.
pub fn classify(
    year: i32,
    month: u32,
    holidays: Option<&HolidayTable>,
) -> Result<MonthCalendar, SchedError> {
    let days = days_in_month(year, month)?;
    let mut rest_eligible = Vec::new();
    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(SchedError::InvalidMonth(month))?;
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let holiday = holidays.is_some_and(|table| table.contains(date));
        if weekend || holiday {
            rest_eligible.push(day);
        }
    }
    let weekend_periods = group_periods(&rest_eligible);
    Ok(MonthCalendar {
        year,
        month,
        days_in_month: days,
        rest_eligible,
        weekend_periods,
    })
}

/// Découpe chaque suite de jours réellement adjacents en paires ; un jour
/// restant en fin de suite forme un singleton.
fn group_periods(days: &[u32]) -> Vec<WeekendPeriod> {
    let mut runs: Vec<Vec<u32>> = Vec::new();
    for &day in days {
        match runs.last_mut() {
            Some(run) if run.last().is_some_and(|last| last + 1 == day) => run.push(day),
            _ => runs.push(vec![day]),
        }
    }
    runs.iter()
        .flat_map(|run| run.chunks(2))
        .map(|chunk| WeekendPeriod {
            days: chunk.to_vec(),
        })
        .collect()
}
