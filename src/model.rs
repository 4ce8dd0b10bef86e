use crate::holidays::Holiday;
use crate::scheduler::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre de l'équipe. Jamais modifié par le générateur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl Employee {
    pub fn new<N: Into<String>, R: Into<String>>(name: N, role: R) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn with_id<I: AsRef<str>, N: Into<String>, R: Into<String>>(id: I, name: N, role: R) -> Self {
        Self {
            id: EmployeeId::new(id),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Affectation d'une journée : trois postes de travail ou repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftAssignment {
    Morning,
    Afternoon,
    Night,
    Rest,
}

impl ShiftAssignment {
    /// Les postes de travail, dans l'ordre de rotation.
    pub const WORK: [ShiftAssignment; 3] = [
        ShiftAssignment::Morning,
        ShiftAssignment::Afternoon,
        ShiftAssignment::Night,
    ];

    /// Poste de rang `index` dans la rotation (modulo 3).
    pub fn work(index: usize) -> Self {
        Self::WORK[index % Self::WORK.len()]
    }

    pub fn is_work(self) -> bool {
        !matches!(self, ShiftAssignment::Rest)
    }

    /// Rang dans la rotation, `None` pour le repos.
    pub fn work_index(self) -> Option<usize> {
        Self::WORK.iter().position(|s| *s == self)
    }

    /// Poste suivant dans la rotation cyclique.
    pub fn next_work(self) -> Option<Self> {
        self.work_index().map(|i| Self::work(i + 1))
    }

    pub fn code(self) -> &'static str {
        match self {
            ShiftAssignment::Morning => "M",
            ShiftAssignment::Afternoon => "A",
            ShiftAssignment::Night => "N",
            ShiftAssignment::Rest => "OFF",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShiftAssignment::Morning => "Morning",
            ShiftAssignment::Afternoon => "Afternoon",
            ShiftAssignment::Night => "Night",
            ShiftAssignment::Rest => "Rest",
        }
    }
}

impl fmt::Display for ShiftAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Planning d'un employé sur un mois : jour (1..=N) -> affectation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySchedule {
    days: BTreeMap<u32, ShiftAssignment>,
}

impl DaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construit un planning à partir d'une suite ordonnée commençant au jour 1.
    pub fn from_assignments<I: IntoIterator<Item = ShiftAssignment>>(assignments: I) -> Self {
        let days = (1u32..).zip(assignments).collect();
        Self { days }
    }

    /// Affectation du jour ; une entrée absente vaut repos.
    pub fn get(&self, day: u32) -> ShiftAssignment {
        self.days.get(&day).copied().unwrap_or(ShiftAssignment::Rest)
    }

    pub fn set(&mut self, day: u32, shift: ShiftAssignment) {
        self.days.insert(day, shift);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, ShiftAssignment)> + '_ {
        self.days.iter().map(|(d, s)| (*d, *s))
    }

    pub fn count(&self, shift: ShiftAssignment) -> usize {
        self.days.values().filter(|s| **s == shift).count()
    }

    pub fn rest_count(&self) -> usize {
        self.count(ShiftAssignment::Rest)
    }

    /// Vrai si chaque jour 1..=days_in_month a une entrée, et aucun autre.
    pub fn is_complete(&self, days_in_month: u32) -> bool {
        self.days.len() == days_in_month as usize
            && self.days.keys().copied().eq(1..=days_in_month)
    }
}

/// Planning d'un mois, identifié par (month, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    #[serde(default)]
    pub schedules: BTreeMap<EmployeeId, DaySchedule>,
    #[serde(default)]
    pub fairness: f64,
    /// Configuration de la génération, reprise par la vérification.
    #[serde(default)]
    pub config: GeneratorConfig,
    /// Fériés du mois comptés comme week-end à la génération.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<Holiday>,
}

impl MonthSchedule {
    pub fn empty(year: i32, month: u32, days_in_month: u32) -> Self {
        Self {
            year,
            month,
            days_in_month,
            schedules: BTreeMap::new(),
            fairness: 0.0,
            config: GeneratorConfig::default(),
            holidays: Vec::new(),
        }
    }

    pub fn for_employee(&self, id: &EmployeeId) -> Option<&DaySchedule> {
        self.schedules.get(id)
    }

    /// Affectation d'un employé pour un jour ; repos si inconnu.
    pub fn shift(&self, id: &EmployeeId, day: u32) -> ShiftAssignment {
        self.schedules
            .get(id)
            .map_or(ShiftAssignment::Rest, |s| s.get(day))
    }

    pub fn is_for(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

/// Équipe et plannings générés, persistés ensemble.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub schedules: Vec<MonthSchedule>,
}

impl Roster {
    pub fn find_employee_by_id<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_employee_by_name<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.name == name)
    }
    pub fn find_schedule(&self, year: i32, month: u32) -> Option<&MonthSchedule> {
        self.schedules.iter().find(|s| s.is_for(year, month))
    }

    /// Ajoute ou remplace le planning du même (month, year).
    pub fn upsert_schedule(&mut self, schedule: MonthSchedule) {
        match self
            .schedules
            .iter_mut()
            .find(|s| s.is_for(schedule.year, schedule.month))
        {
            Some(existing) => *existing = schedule,
            None => {
                self.schedules.push(schedule);
                self.schedules.sort_by_key(|s| (s.year, s.month));
            }
        }
    }
}
