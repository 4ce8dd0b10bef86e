use crate::model::{DaySchedule, ShiftAssignment};

/// Suite maximale de jours consécutifs de même nature (travail ou repos).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: u32,
    pub len: u32,
    pub rest: bool,
}

impl Run {
    pub fn end(&self) -> u32 {
        self.start + self.len - 1
    }
    pub fn days(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end()
    }
}

/// Découpe une suite de drapeaux « repos » (jour 1 en tête) en runs.
pub fn runs<I: IntoIterator<Item = bool>>(rest_flags: I) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for (day, rest) in (1u32..).zip(rest_flags) {
        match out.last_mut() {
            Some(run) if run.rest == rest => run.len += 1,
            _ => out.push(Run {
                start: day,
                len: 1,
                rest,
            }),
        }
    }
    out
}

/// Runs d'un planning employé sur `days` jours.
pub fn schedule_runs(schedule: &DaySchedule, days: u32) -> Vec<Run> {
    runs((1..=days).map(|d| schedule.get(d) == ShiftAssignment::Rest))
}

/// Poste `(phase + index du bloc) mod 3` pour chaque jour travaillé.
pub(super) fn assign_shifts(rest_flags: &[bool], phase: usize) -> Vec<ShiftAssignment> {
    let mut out = Vec::with_capacity(rest_flags.len());
    let mut block = 0usize;
    for run in runs(rest_flags.iter().copied()) {
        let shift = if run.rest {
            ShiftAssignment::Rest
        } else {
            block += 1;
            ShiftAssignment::work(phase + block - 1)
        };
        out.extend(std::iter::repeat(shift).take(run.len as usize));
    }
    out
}
