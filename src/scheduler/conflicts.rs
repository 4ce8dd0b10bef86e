use super::types::GeneratorConfig;
use super::util::{self, Run};
use crate::calendar::MonthCalendar;
use crate::model::{DaySchedule, Employee, EmployeeId, MonthSchedule, ShiftAssignment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingDays,
    RestCount { expected: u32, actual: u32 },
    WeekendRest { periods: usize },
    WorkBlockLength { start: u32, len: u32 },
    RestBlockLength { start: u32, len: u32 },
    MixedBlock { start: u32 },
    RotationBreak { start: u32 },
    Uncovered { day: u32, shift: ShiftAssignment },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// `None` pour les violations de couverture (niveau équipe).
    pub employee: Option<EmployeeId>,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            ViolationKind::MissingDays => "missing-days",
            ViolationKind::RestCount { .. } => "rest-count",
            ViolationKind::WeekendRest { .. } => "weekend-rest",
            ViolationKind::WorkBlockLength { .. } => "work-block",
            ViolationKind::RestBlockLength { .. } => "rest-block",
            ViolationKind::MixedBlock { .. } => "mixed-block",
            ViolationKind::RotationBreak { .. } => "rotation",
            ViolationKind::Uncovered { .. } => "coverage",
        }
    }
}

/// Vérifie un planning terminé contre les règles du roulement.
pub(super) fn detect_violations(
    schedule: &MonthSchedule,
    employees: &[Employee],
    calendar: &MonthCalendar,
    config: &GeneratorConfig,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let empty = DaySchedule::new();

    for employee in employees {
        let days = schedule.for_employee(&employee.id).unwrap_or(&empty);
        let mut push = |kind| {
            out.push(Violation {
                employee: Some(employee.id.clone()),
                kind,
            })
        };

        if !days.is_complete(calendar.days_in_month) {
            push(ViolationKind::MissingDays);
        }

        let actual = calendar
            .days()
            .filter(|d| days.get(*d) == ShiftAssignment::Rest)
            .count() as u32;
        if actual != config.rest_days {
            push(ViolationKind::RestCount {
                expected: config.rest_days,
                actual,
            });
        }

        let periods = calendar
            .weekend_periods
            .iter()
            .filter(|p| p.days.iter().any(|d| days.get(*d) == ShiftAssignment::Rest))
            .count();
        if periods < calendar.weekend_periods.len().min(2) {
            push(ViolationKind::WeekendRest { periods });
        }

        let runs = util::schedule_runs(days, calendar.days_in_month);
        let last = runs.len().saturating_sub(1);
        let mut previous_shift: Option<ShiftAssignment> = None;
        for (idx, run) in runs.iter().enumerate() {
            let bounds = if run.rest {
                config.rest_block
            } else {
                config.work_block
            };
            let edge = idx == 0 || idx == last;
            if run.len > bounds.max || (run.len < bounds.min && !edge) {
                push(if run.rest {
                    ViolationKind::RestBlockLength {
                        start: run.start,
                        len: run.len,
                    }
                } else {
                    ViolationKind::WorkBlockLength {
                        start: run.start,
                        len: run.len,
                    }
                });
            }
            if run.rest {
                continue;
            }
            let shift = days.get(run.start);
            if !single_shift(days, run) {
                push(ViolationKind::MixedBlock { start: run.start });
            }
            if let Some(prev) = previous_shift {
                if prev.next_work() != Some(shift) {
                    push(ViolationKind::RotationBreak { start: run.start });
                }
            }
            previous_shift = Some(shift);
        }
    }

    for &day in &calendar.rest_eligible {
        for shift in ShiftAssignment::WORK {
            let covered = employees
                .iter()
                .any(|e| schedule.shift(&e.id, day) == shift);
            if !covered {
                out.push(Violation {
                    employee: None,
                    kind: ViolationKind::Uncovered { day, shift },
                });
            }
        }
    }

    out
}

fn single_shift(days: &DaySchedule, run: &Run) -> bool {
    let first = days.get(run.start);
    run.days().all(|d| days.get(d) == first)
}
