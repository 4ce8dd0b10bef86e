use super::util::assign_shifts;
use crate::model::{Employee, MonthSchedule, ShiftAssignment};
use tracing::debug;

/// Plan retenu pour un employé avant assemblage du mois.
#[derive(Debug, Clone)]
pub(super) struct EmployeePlan {
    pub rest: Vec<bool>,
    pub phase: usize,
    pub periods: Vec<usize>,
}

impl EmployeePlan {
    pub fn shifts(&self) -> Vec<ShiftAssignment> {
        assign_shifts(&self.rest, self.phase)
    }
}

/// Nombre d'employés par (jour éligible, poste).
#[derive(Debug, Clone)]
pub(super) struct CoverageTable<'a> {
    days: &'a [u32],
    counts: Vec<[usize; 3]>,
}

impl<'a> CoverageTable<'a> {
    pub fn new(days: &'a [u32]) -> Self {
        Self {
            days,
            counts: vec![[0; 3]; days.len()],
        }
    }

    fn slots<'s>(
        &'s self,
        shifts: &'s [ShiftAssignment],
    ) -> impl Iterator<Item = (usize, usize)> + 's {
        self.days.iter().enumerate().filter_map(move |(slot, day)| {
            shifts
                .get(*day as usize - 1)
                .and_then(|s| s.work_index())
                .map(|w| (slot, w))
        })
    }

    /// `shifts` est indexé par jour - 1.
    pub fn add(&mut self, shifts: &[ShiftAssignment]) {
        let hits: Vec<(usize, usize)> = self.slots(shifts).collect();
        for (slot, w) in hits {
            self.counts[slot][w] += 1;
        }
    }

    /// (créneaux déjà tenus que `shifts` doublerait, créneaux vides qu'il couvrirait)
    pub fn score(&self, shifts: &[ShiftAssignment]) -> (usize, usize) {
        self.slots(shifts)
            .fold((0, 0), |(dup, gain), (slot, w)| match self.counts[slot][w] {
                0 => (dup, gain + 1),
                _ => (dup + 1, gain),
            })
    }

    pub fn uncovered(&self) -> impl Iterator<Item = (u32, ShiftAssignment)> + '_ {
        self.days.iter().zip(&self.counts).flat_map(|(day, counts)| {
            ShiftAssignment::WORK
                .into_iter()
                .zip(counts.iter())
                .filter(|(_, n)| **n == 0)
                .map(move |(shift, _)| (*day, shift))
        })
    }

    fn from_plans(days: &'a [u32], plans: &[EmployeePlan], phases: &[usize]) -> Self {
        let mut table = Self::new(days);
        for (plan, phase) in plans.iter().zip(phases) {
            table.add(&assign_shifts(&plan.rest, *phase));
        }
        table
    }

    fn from_schedule(days: &'a [u32], schedule: &MonthSchedule, employees: &[Employee]) -> Self {
        let mut table = Self::new(days);
        for employee in employees {
            let shifts: Vec<ShiftAssignment> = (1..=schedule.days_in_month)
                .map(|d| schedule.shift(&employee.id, d))
                .collect();
            table.add(&shifts);
        }
        table
    }
}

/// Re-phase les rotations (descente coordonnée bornée) tant que le nombre de
/// créneaux non couverts diminue strictement.
pub(super) fn rebalance(plans: &mut [EmployeePlan], days: &[u32], passes: u32) {
    let mut phases: Vec<usize> = plans.iter().map(|p| p.phase).collect();
    let mut best = CoverageTable::from_plans(days, plans, &phases)
        .uncovered()
        .count();
    for pass in 0..passes {
        if best == 0 {
            break;
        }
        let mut changed = false;
        for k in 0..plans.len() {
            for phase in 0..ShiftAssignment::WORK.len() {
                if phase == phases[k] {
                    continue;
                }
                let previous = std::mem::replace(&mut phases[k], phase);
                let count = CoverageTable::from_plans(days, plans, &phases)
                    .uncovered()
                    .count();
                if count < best {
                    best = count;
                    changed = true;
                } else {
                    phases[k] = previous;
                }
            }
        }
        debug!(pass, uncovered = best, "rotation rebalance");
        if !changed {
            break;
        }
    }
    for (plan, phase) in plans.iter_mut().zip(phases) {
        plan.phase = phase;
    }
}

/// Passe de réparation globale : un créneau vide est pris par le premier
/// employé (ordre de l'équipe) en repos ce jour-là et au-delà de `rest_days`.
/// Renvoie les créneaux restés vides.
pub(super) fn repair(
    schedule: &mut MonthSchedule,
    employees: &[Employee],
    days: &[u32],
    rest_days: u32,
) -> Vec<(u32, ShiftAssignment)> {
    let table = CoverageTable::from_schedule(days, schedule, employees);
    let missing: Vec<(u32, ShiftAssignment)> = table.uncovered().collect();
    let mut uncovered = Vec::new();
    for (day, shift) in missing {
        let donor = employees.iter().find(|e| {
            schedule.for_employee(&e.id).is_some_and(|s| {
                s.get(day) == ShiftAssignment::Rest && s.rest_count() > rest_days as usize
            })
        });
        match donor.and_then(|e| schedule.schedules.get_mut(&e.id)) {
            Some(days_of) => days_of.set(day, shift),
            None => uncovered.push((day, shift)),
        }
    }
    uncovered
}
