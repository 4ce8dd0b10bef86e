use super::coverage::{self, CoverageTable, EmployeePlan};
use super::layout::{self, PlanRequest};
use super::types::{Diagnostic, GeneratorConfig, Generation, Relaxation, SchedError};
use super::{util, weekend};
use crate::calendar::MonthCalendar;
use crate::model::{DaySchedule, Employee, MonthSchedule};
use crate::stats;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::{debug, warn};

/// (charge des périodes, créneaux doublés, -créneaux gagnés) : le plus petit gagne.
type Score = (usize, usize, Reverse<usize>);

pub(super) fn generate(
    employees: &[Employee],
    calendar: &MonthCalendar,
    config: &GeneratorConfig,
) -> Result<Generation, SchedError> {
    config.validate()?;
    let mut seen = HashSet::new();
    if let Some(dup) = employees.iter().find(|e| !seen.insert(&e.id)) {
        return Err(SchedError::DuplicateEmployee(dup.id.as_str().to_string()));
    }

    let mut schedule = MonthSchedule::empty(calendar.year, calendar.month, calendar.days_in_month);
    schedule.config = config.clone();
    if employees.is_empty() {
        warn!(year = calendar.year, month = calendar.month, "empty roster");
        return Ok(Generation {
            schedule,
            diagnostics: vec![Diagnostic::EmptyRoster],
        });
    }

    let mut load = vec![0usize; calendar.weekend_periods.len()];
    let mut table = CoverageTable::new(&calendar.rest_eligible);
    let mut plans = Vec::with_capacity(employees.len());
    let mut diagnostics = Vec::new();

    for (index, employee) in employees.iter().enumerate() {
        let (plan, relaxation) = plan_employee(index, calendar, config, &load, &table);
        for period in &plan.periods {
            load[*period] += 1;
        }
        table.add(&plan.shifts());
        debug!(
            employee = employee.id.as_str(),
            periods = ?plan.periods,
            phase = plan.phase,
            "employee planned"
        );
        if let Some(relaxation) = relaxation {
            warn!(employee = employee.id.as_str(), %relaxation, "constraint relaxed");
            diagnostics.push(Diagnostic::ConstraintTension {
                employee: employee.id.clone(),
                relaxation,
            });
        }
        plans.push(plan);
    }

    coverage::rebalance(&mut plans, &calendar.rest_eligible, config.rebalance_passes);

    for (employee, plan) in employees.iter().zip(&plans) {
        schedule
            .schedules
            .insert(employee.id.clone(), DaySchedule::from_assignments(plan.shifts()));
    }

    let uncovered = coverage::repair(
        &mut schedule,
        employees,
        &calendar.rest_eligible,
        config.rest_days,
    );
    for (day, shift) in uncovered {
        warn!(day, shift = shift.label(), "weekend slot left uncovered");
        diagnostics.push(Diagnostic::UncoveredSlot { day, shift });
    }

    schedule.fairness = stats::fairness_score(&schedule, employees);
    Ok(Generation {
        schedule,
        diagnostics,
    })
}

/// Choisit périodes de week-end, placement des repos et phase de rotation de
/// l'employé de rang `index`, au premier niveau de relâchement qui aboutit.
fn plan_employee(
    index: usize,
    calendar: &MonthCalendar,
    config: &GeneratorConfig,
    load: &[usize],
    table: &CoverageTable<'_>,
) -> (EmployeePlan, Option<Relaxation>) {
    let candidates = weekend::candidates(load, index);
    let work_variants = crate::model::ShiftAssignment::WORK.len();

    for rules in layout::ladder(config, calendar.days_in_month) {
        let mut best: Option<(Score, EmployeePlan)> = None;
        for periods in &candidates {
            let reserved = weekend::reserved_days(calendar, periods);
            let period_load: usize = periods.iter().map(|p| load[*p]).sum();
            for shift in 0..work_variants {
                let request = PlanRequest {
                    days: calendar.days_in_month,
                    rest_days: config.rest_days,
                    reserved: &reserved,
                    rest_eligible: &calendar.rest_eligible,
                    offset: ((index + shift) % work_variants) as u32,
                };
                let Some(rest) = layout::plan(&request, &rules) else {
                    continue;
                };
                for turn in 0..work_variants {
                    let phase = (index + turn) % work_variants;
                    let (dup, gain) = table.score(&util::assign_shifts(&rest, phase));
                    let score = (period_load, dup, Reverse(gain));
                    if best.as_ref().map_or(true, |(s, _)| score < *s) {
                        best = Some((
                            score,
                            EmployeePlan {
                                rest: rest.clone(),
                                phase,
                                periods: periods.clone(),
                            },
                        ));
                    }
                }
            }
        }
        if let Some((_, plan)) = best {
            return (plan, rules.relaxation);
        }
    }

    // Repos en tête de mois : n'arrive pas tant que rest_days <= jours du mois.
    let rest = (1..=calendar.days_in_month)
        .map(|d| d <= config.rest_days)
        .collect();
    let plan = EmployeePlan {
        rest,
        phase: index % work_variants,
        periods: Vec::new(),
    };
    (plan, Some(Relaxation::WeekendRest))
}
