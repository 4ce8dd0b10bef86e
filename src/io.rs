use crate::calendar::month_name;
use crate::holidays::{Holiday, HolidayTable};
use crate::model::{Employee, EmployeeId, MonthSchedule, Roster, ShiftAssignment};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de l'équipe depuis CSV: header `id,name[,role]`. Un id vide est
/// remplacé par un identifiant aléatoire. L'ordre des lignes est l'ordre de
/// l'équipe.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row {} (empty name)", line + 1);
        }
        let role = rec.get(2).map(str::trim).unwrap_or("");
        let id = if id.is_empty() {
            EmployeeId::random()
        } else {
            EmployeeId::new(id)
        };
        out.push(Employee {
            id,
            name: name.to_string(),
            role: role.to_string(),
        });
    }
    Ok(out)
}

/// Import d'une table de fériés: header `date,name` (date `YYYY-MM-DD`).
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<HolidayTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw = rec.get(0).context("missing date")?.trim();
        let name = rec.get(1).unwrap_or("").trim().to_string();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid holiday date: {raw}"))?;
        out.push(Holiday { date, name });
    }
    Ok(HolidayTable::new(out))
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &MonthSchedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'un mois: header `No,Name,1..N`, une ligne par employé ; un
/// jour absent est exporté en repos.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &MonthSchedule,
    employees: &[Employee],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(schedule_header(schedule))?;
    for (idx, employee) in employees.iter().enumerate() {
        let mut row = vec![(idx + 1).to_string(), employee.name.clone()];
        row.extend(
            (1..=schedule.days_in_month)
                .map(|d| schedule.shift(&employee.id, d).code().to_string()),
        );
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

fn schedule_header(schedule: &MonthSchedule) -> Vec<String> {
    let mut header = vec!["No".to_string(), "Name".to_string()];
    header.extend((1..=schedule.days_in_month).map(|d| d.to_string()));
    header
}

/// Grille texte compacte d'un mois (une ligne par employé).
pub fn render_grid(schedule: &MonthSchedule, employees: &[Employee]) -> String {
    let width = employees.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = format!(
        "{} {} (fairness {:.0}%)\n",
        month_name(schedule.month),
        schedule.year,
        schedule.fairness * 100.0
    );
    for employee in employees {
        let cells: Vec<&str> = (1..=schedule.days_in_month)
            .map(|d| match schedule.shift(&employee.id, d) {
                ShiftAssignment::Rest => ".",
                shift => shift.code(),
            })
            .collect();
        out.push_str(&format!("{:<width$} {}\n", employee.name, cells.concat()));
    }
    out
}
