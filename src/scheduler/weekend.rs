use crate::calendar::MonthCalendar;
use std::collections::BTreeSet;

/// Combinaisons de deux périodes de week-end candidates pour l'employé de
/// rang `index`, triées par charge (employés déjà en repos sur ces périodes)
/// puis par distance round-robin depuis la période `2 * index mod P`.
pub(super) fn candidates(load: &[usize], index: usize) -> Vec<Vec<usize>> {
    let periods = load.len();
    match periods {
        0 => vec![Vec::new()],
        1 => vec![vec![0]],
        p => {
            let preferred = (2 * index) % p;
            let distance = |i: usize| (i + p - preferred) % p;
            let mut pairs: Vec<(usize, usize)> = (0..p)
                .flat_map(|i| (i + 1..p).map(move |j| (i, j)))
                .collect();
            pairs.sort_by_key(|&(i, j)| (load[i] + load[j], distance(i), distance(j)));
            pairs.into_iter().map(|(i, j)| vec![i, j]).collect()
        }
    }
}

/// Jours de repos réservés par les périodes choisies.
pub(super) fn reserved_days(calendar: &MonthCalendar, chosen: &[usize]) -> BTreeSet<u32> {
    chosen
        .iter()
        .filter_map(|idx| calendar.weekend_periods.get(*idx))
        .flat_map(|period| period.days.iter().copied())
        .collect()
}
