use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Jour férié : date et libellé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Table de jours fériés, triée par date. Donnée statique en lecture seule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable {
    holidays: Vec<Holiday>,
}

impl HolidayTable {
    pub fn new(mut holidays: Vec<Holiday>) -> Self {
        holidays.sort_by_key(|h| h.date);
        holidays.dedup_by_key(|h| h.date);
        Self { holidays }
    }

    /// Jours fériés nationaux indonésiens 2024–2026 (calendrier officiel).
    pub fn indonesia() -> Self {
        let holidays = INDONESIA
            .iter()
            .filter_map(|(y, m, d, name)| {
                NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| Holiday {
                    date,
                    name: (*name).to_string(),
                })
            })
            .collect();
        Self::new(holidays)
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.iter()
    }

    pub fn find(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays
            .binary_search_by_key(&date, |h| h.date)
            .ok()
            .map(|idx| &self.holidays[idx])
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.find(date).is_some()
    }

    /// Jours fériés d'un mois donné.
    pub fn in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Holiday> {
        self.holidays
            .iter()
            .filter(move |h| h.date.year() == year && h.date.month() == month)
    }
}

const INDONESIA: &[(i32, u32, u32, &str)] = &[
    (2024, 1, 1, "Tahun Baru Masehi"),
    (2024, 2, 8, "Tahun Baru Imlek"),
    (2024, 2, 9, "Cuti Bersama Imlek"),
    (2024, 3, 11, "Isra Miraj"),
    (2024, 3, 12, "Cuti Bersama"),
    (2024, 3, 28, "Hari Suci Nyepi"),
    (2024, 3, 29, "Wafat Isa Almasih"),
    (2024, 4, 8, "Cuti Bersama Idul Fitri"),
    (2024, 4, 9, "Cuti Bersama Idul Fitri"),
    (2024, 4, 10, "Hari Raya Idul Fitri"),
    (2024, 4, 11, "Hari Raya Idul Fitri"),
    (2024, 4, 12, "Cuti Bersama Idul Fitri"),
    (2024, 4, 15, "Cuti Bersama Idul Fitri"),
    (2024, 5, 1, "Hari Buruh"),
    (2024, 5, 9, "Kenaikan Isa Almasih"),
    (2024, 5, 10, "Cuti Bersama"),
    (2024, 5, 23, "Hari Raya Waisak"),
    (2024, 5, 24, "Cuti Bersama"),
    (2024, 6, 1, "Hari Lahir Pancasila"),
    (2024, 6, 17, "Hari Raya Idul Adha"),
    (2024, 6, 18, "Cuti Bersama"),
    (2024, 7, 7, "Tahun Baru Islam"),
    (2024, 8, 17, "Hari Kemerdekaan RI"),
    (2024, 9, 16, "Maulid Nabi Muhammad"),
    (2024, 12, 25, "Hari Natal"),
    (2024, 12, 26, "Cuti Bersama Natal"),
    (2025, 1, 1, "Tahun Baru Masehi"),
    (2025, 1, 27, "Isra Miraj"),
    (2025, 1, 29, "Tahun Baru Imlek"),
    (2025, 3, 28, "Cuti Bersama Idul Fitri"),
    (2025, 3, 29, "Hari Suci Nyepi"),
    (2025, 3, 31, "Hari Raya Idul Fitri"),
    (2025, 4, 1, "Hari Raya Idul Fitri"),
    (2025, 4, 2, "Cuti Bersama Idul Fitri"),
    (2025, 4, 3, "Cuti Bersama Idul Fitri"),
    (2025, 4, 4, "Cuti Bersama Idul Fitri"),
    (2025, 4, 18, "Wafat Isa Almasih"),
    (2025, 5, 1, "Hari Buruh"),
    (2025, 5, 12, "Hari Raya Waisak"),
    (2025, 5, 29, "Kenaikan Isa Almasih"),
    (2025, 6, 1, "Hari Lahir Pancasila"),
    (2025, 6, 6, "Hari Raya Idul Adha"),
    (2025, 6, 7, "Cuti Bersama Idul Adha"),
    (2025, 6, 27, "Tahun Baru Islam"),
    (2025, 8, 17, "Hari Kemerdekaan RI"),
    (2025, 9, 5, "Maulid Nabi Muhammad"),
    (2025, 12, 25, "Hari Natal"),
    (2025, 12, 26, "Cuti Bersama Natal"),
    (2026, 1, 1, "Tahun Baru Masehi"),
    (2026, 1, 17, "Isra Miraj"),
    (2026, 2, 17, "Tahun Baru Imlek"),
    (2026, 3, 18, "Hari Suci Nyepi"),
    (2026, 3, 20, "Hari Raya Idul Fitri"),
    (2026, 3, 21, "Hari Raya Idul Fitri"),
    (2026, 4, 3, "Wafat Isa Almasih"),
    (2026, 5, 1, "Hari Buruh"),
    (2026, 5, 14, "Kenaikan Isa Almasih"),
    (2026, 5, 27, "Hari Raya Idul Adha"),
    (2026, 6, 1, "Hari Lahir Pancasila"),
    (2026, 6, 2, "Hari Raya Waisak"),
    (2026, 6, 17, "Tahun Baru Islam"),
    (2026, 8, 17, "Hari Kemerdekaan RI"),
    (2026, 8, 26, "Maulid Nabi Muhammad"),
    (2026, 12, 25, "Hari Natal"),
];

