use crate::model::{Employee, EmployeeId, MonthSchedule, ShiftAssignment};
use serde::Serialize;

/// Écart maximal supposé par employé et par métrique (constante de normalisation).
const MAX_DEVIATION_PER_METRIC: f64 = 10.0;

/// Compteurs d'un employé sur un mois.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftStatistics {
    pub employee: EmployeeId,
    pub name: String,
    pub total_days: usize,
    pub rest: usize,
    pub worked: usize,
    pub morning: usize,
    pub afternoon: usize,
    pub night: usize,
}

impl ShiftStatistics {
    fn metrics(&self) -> [f64; 4] {
        [
            self.rest as f64,
            self.morning as f64,
            self.afternoon as f64,
            self.night as f64,
        ]
    }
}

pub fn calculate_statistics(schedule: &MonthSchedule, employees: &[Employee]) -> Vec<ShiftStatistics> {
    employees
        .iter()
        .map(|employee| {
            let days = schedule.for_employee(&employee.id);
            let count = |shift| days.map_or(0, |d| d.count(shift));
            let total_days = days.map_or(0, |d| d.len());
            let rest = count(ShiftAssignment::Rest);
            ShiftStatistics {
                employee: employee.id.clone(),
                name: employee.name.clone(),
                total_days,
                rest,
                worked: total_days - rest,
                morning: count(ShiftAssignment::Morning),
                afternoon: count(ShiftAssignment::Afternoon),
                night: count(ShiftAssignment::Night),
            }
        })
        .collect()
}

/// Score d'équité dans [0, 1] : 1 - somme des écarts à la moyenne (repos et
/// chaque poste) / (employés × 4 × 10). 0 pour une équipe vide.
pub fn fairness_from_statistics(statistics: &[ShiftStatistics]) -> f64 {
    if statistics.is_empty() {
        return 0.0;
    }
    let n = statistics.len() as f64;
    let mut means = [0.0f64; 4];
    for stat in statistics {
        for (mean, value) in means.iter_mut().zip(stat.metrics()) {
            *mean += value / n;
        }
    }
    let deviation: f64 = statistics
        .iter()
        .flat_map(|stat| stat.metrics().into_iter().zip(means))
        .map(|(value, mean)| (value - mean).abs())
        .sum();
    let max_deviation = n * means.len() as f64 * MAX_DEVIATION_PER_METRIC;
    (1.0 - deviation / max_deviation).clamp(0.0, 1.0)
}

pub fn fairness_score(schedule: &MonthSchedule, employees: &[Employee]) -> f64 {
    fairness_from_statistics(&calculate_statistics(schedule, employees))
}
