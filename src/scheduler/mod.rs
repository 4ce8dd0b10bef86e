mod assignment;
mod conflicts;
mod coverage;
mod layout;
mod types;
mod util;
mod weekend;

pub use conflicts::{Violation, ViolationKind};
pub use types::{BlockBounds, Diagnostic, GeneratorConfig, Generation, Relaxation, SchedError};
pub use util::{runs, schedule_runs, Run};

use crate::calendar::{self, MonthCalendar};
use crate::holidays::{Holiday, HolidayTable};
use crate::model::{Employee, MonthSchedule, Roster};

/// Génère le planning d'un mois pour `employees`, dans l'ordre fourni (le rang
/// de chacun décale week-ends et rotation).
pub fn generate(
    employees: &[Employee],
    year: i32,
    month: u32,
    config: &GeneratorConfig,
    holidays: Option<&HolidayTable>,
) -> Result<Generation, SchedError> {
    let holidays = holidays.filter(|_| config.include_holidays);
    let calendar = calendar::classify(year, month, holidays)?;
    let mut generation = assignment::generate(employees, &calendar, config)?;
    generation.schedule.holidays = applied_holidays(holidays, year, month);
    Ok(generation)
}

fn applied_holidays(holidays: Option<&HolidayTable>, year: i32, month: u32) -> Vec<Holiday> {
    holidays.map_or_else(Vec::new, |table| table.in_month(year, month).cloned().collect())
}

/// Vérifie un planning terminé ; renvoie toutes les violations trouvées.
pub fn detect_violations(
    schedule: &MonthSchedule,
    employees: &[Employee],
    calendar: &MonthCalendar,
    config: &GeneratorConfig,
) -> Vec<Violation> {
    conflicts::detect_violations(schedule, employees, calendar, config)
}

/// Scheduler : encapsule un Roster (équipe + plannings) et la table de fériés
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    holidays: HolidayTable,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
            holidays: HolidayTable::default(),
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::new()
        }
    }

    pub fn with_holidays(mut self, holidays: HolidayTable) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    /// Ajoute des employés en fin d'équipe ; refuse un identifiant déjà présent.
    pub fn add_employees(&mut self, employees: Vec<Employee>) -> Result<(), SchedError> {
        for employee in &employees {
            let clash = self.roster.find_employee_by_id(&employee.id).is_some()
                || employees.iter().filter(|e| e.id == employee.id).count() > 1;
            if clash {
                return Err(SchedError::DuplicateEmployee(employee.id.as_str().to_string()));
            }
        }
        self.roster.employees.extend(employees);
        Ok(())
    }

    pub fn classify(
        &self,
        year: i32,
        month: u32,
        config: &GeneratorConfig,
    ) -> Result<MonthCalendar, SchedError> {
        let holidays = Some(&self.holidays).filter(|_| config.include_holidays);
        calendar::classify(year, month, holidays)
    }

    /// Génère (ou régénère) le mois et remplace le planning stocké.
    pub fn generate_month(
        &mut self,
        year: i32,
        month: u32,
        config: &GeneratorConfig,
    ) -> Result<Generation, SchedError> {
        let holidays = Some(&self.holidays).filter(|_| config.include_holidays);
        let calendar = calendar::classify(year, month, holidays)?;
        let mut generation = assignment::generate(&self.roster.employees, &calendar, config)?;
        generation.schedule.holidays = applied_holidays(holidays, year, month);
        self.roster.upsert_schedule(generation.schedule.clone());
        Ok(generation)
    }

    /// Vérifie le planning stocké du mois. Sans `config`, reprend la
    /// configuration et les fériés enregistrés à la génération.
    pub fn detect_violations(
        &self,
        year: i32,
        month: u32,
        config: Option<&GeneratorConfig>,
    ) -> Result<Vec<Violation>, SchedError> {
        let schedule = self
            .roster
            .find_schedule(year, month)
            .ok_or(SchedError::UnknownSchedule { year, month })?;
        let (calendar, config) = match config {
            Some(config) => (self.classify(year, month, config)?, config),
            None => {
                let holidays = HolidayTable::new(schedule.holidays.clone());
                (
                    calendar::classify(year, month, Some(&holidays))?,
                    &schedule.config,
                )
            }
        };
        Ok(conflicts::detect_violations(
            schedule,
            &self.roster.employees,
            &calendar,
            config,
        ))
    }
}
