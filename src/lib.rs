#![forbid(unsafe_code)]
//! Roulement : génération de plannings mensuels de roulement (sans BD).
//!
//! - Trois postes (matin, après-midi, nuit) + repos, un poste par bloc de travail.
//! - Nombre exact de jours de repos, dont deux week-ends par employé.
//! - Couverture minimale de chaque poste les jours de week-end (et fériés).
//! - Stockage fichiers (JSON/CSV) ; la présentation reste hors de la lib.

pub mod calendar;
pub mod config;
pub mod holidays;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod stats;
pub mod storage;

pub use calendar::{classify, days_in_month, MonthCalendar, WeekendPeriod};
pub use config::{export_config_json, load_config_from_file};
pub use holidays::{Holiday, HolidayTable};
pub use model::{DaySchedule, Employee, EmployeeId, MonthSchedule, Roster, ShiftAssignment};
pub use scheduler::{
    detect_violations, generate, BlockBounds, Diagnostic, GeneratorConfig, Generation, Relaxation,
    SchedError, Scheduler, Violation, ViolationKind,
};
pub use stats::{calculate_statistics, fairness_score, ShiftStatistics};
pub use storage::{JsonStorage, Storage};
