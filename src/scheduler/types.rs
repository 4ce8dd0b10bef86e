use crate::model::{EmployeeId, MonthSchedule, ShiftAssignment};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bornes inclusives de longueur d'un bloc (travail ou repos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBounds {
    pub min: u32,
    pub max: u32,
}

impl BlockBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
    pub fn contains(&self, len: u32) -> bool {
        self.min <= len && len <= self.max
    }
}

/// Options de génération
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Nombre exact de jours de repos par employé et par mois.
    pub rest_days: u32,
    pub work_block: BlockBounds,
    pub rest_block: BlockBounds,
    /// Les jours fériés comptent comme jours de week-end.
    pub include_holidays: bool,
    /// Passes maximales de re-phasage des rotations.
    pub rebalance_passes: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rest_days: 10,
            work_block: BlockBounds::new(4, 6),
            rest_block: BlockBounds::new(2, 3),
            include_holidays: false,
            rebalance_passes: 8,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.rest_days == 0 || self.rest_days > 28 {
            return Err(SchedError::InvalidConfig(format!(
                "rest_days must be in 1..=28, got {}",
                self.rest_days
            )));
        }
        for (name, bounds) in [("work_block", self.work_block), ("rest_block", self.rest_block)] {
            if bounds.min == 0 || bounds.min > bounds.max {
                return Err(SchedError::InvalidConfig(format!(
                    "{name} needs 1 <= min <= max, got {}..={}",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}

/// Contrainte relâchée pour obtenir le nombre exact de jours de repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relaxation {
    SingleRestDay,
    WorkBlockLength,
    RestBlockLength,
    WeekendRest,
}

impl fmt::Display for Relaxation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relaxation::SingleRestDay => "isolated single rest day",
            Relaxation::WorkBlockLength => "work block length",
            Relaxation::RestBlockLength => "rest block length",
            Relaxation::WeekendRest => "weekend rest periods",
        };
        f.write_str(s)
    }
}

/// Avertissement non bloquant produit par la génération.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    EmptyRoster,
    UncoveredSlot { day: u32, shift: ShiftAssignment },
    ConstraintTension { employee: EmployeeId, relaxation: Relaxation },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyRoster => f.write_str("empty roster: no schedule generated"),
            Diagnostic::UncoveredSlot { day, shift } => {
                write!(f, "day {day}: no employee on {}", shift.label())
            }
            Diagnostic::ConstraintTension {
                employee,
                relaxation,
            } => write!(f, "employee {employee}: relaxed {relaxation}"),
        }
    }
}

/// Résultat d'une génération : planning au mieux + diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub schedule: MonthSchedule,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    pub fn uncovered_slots(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UncoveredSlot { .. }))
            .count()
    }

    pub fn tensions(&self) -> impl Iterator<Item = (&EmployeeId, Relaxation)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::ConstraintTension {
                employee,
                relaxation,
            } => Some((employee, *relaxation)),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {0} (expected 1..=12)")]
    InvalidMonth(u32),
    #[error("unsupported year: {0}")]
    UnsupportedYear(i32),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(String),
    #[error("no schedule for {year}-{month:02}")]
    UnknownSchedule { year: i32, month: u32 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
