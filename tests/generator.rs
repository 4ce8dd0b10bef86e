#![forbid(unsafe_code)]
use roulement::scheduler::schedule_runs;
use roulement::{
    classify, detect_violations, generate, DaySchedule, Diagnostic, Employee, GeneratorConfig,
    HolidayTable, MonthSchedule, Relaxation, SchedError, Scheduler, ShiftAssignment,
    ViolationKind,
};

fn team(n: usize) -> Vec<Employee> {
    (1..=n)
        .map(|i| Employee::with_id(format!("e{i}"), format!("Employee {i}"), "operator"))
        .collect()
}

fn rule_violations(
    employees: &[Employee],
    year: i32,
    month: u32,
    config: &GeneratorConfig,
) -> Vec<ViolationKind> {
    let generation = generate(employees, year, month, config, None).unwrap();
    let calendar = classify(year, month, None).unwrap();
    detect_violations(&generation.schedule, employees, &calendar, config)
        .into_iter()
        .map(|v| v.kind)
        .filter(|k| !matches!(k, ViolationKind::Uncovered { .. }))
        .collect()
}

#[test]
fn december_2025_six_employees_is_fully_covered() {
    let employees = team(6);
    let config = GeneratorConfig::default();
    let generation = generate(&employees, 2025, 12, &config, None).unwrap();

    assert!(generation.is_clean(), "{:?}", generation.diagnostics);
    assert_eq!(generation.schedule.schedules.len(), 6);
    for employee in &employees {
        let days = generation.schedule.for_employee(&employee.id).unwrap();
        assert!(days.is_complete(31));
        assert_eq!(days.rest_count(), 10);
    }

    let calendar = classify(2025, 12, None).unwrap();
    let violations = detect_violations(&generation.schedule, &employees, &calendar, &config);
    assert!(violations.is_empty(), "{violations:?}");
    assert!((0.0..=1.0).contains(&generation.schedule.fairness));
}

#[test]
fn february_2026_keeps_exact_rest_with_split_weekends() {
    let employees = team(6);
    let config = GeneratorConfig::default();
    let generation = generate(&employees, 2026, 2, &config, None).unwrap();

    for employee in &employees {
        let days = generation.schedule.for_employee(&employee.id).unwrap();
        assert!(days.is_complete(28));
        assert_eq!(days.rest_count(), 10);
    }
    assert!(generation.uncovered_slots() <= 1);
    assert!(rule_violations(&employees, 2026, 2, &config).is_empty());
}

#[test]
fn single_employee_reports_uncovered_slots() {
    let employees = team(1);
    let generation = generate(&employees, 2025, 12, &GeneratorConfig::default(), None).unwrap();

    let days = generation.schedule.for_employee(&employees[0].id).unwrap();
    assert_eq!(days.rest_count(), 10);
    assert_eq!(generation.uncovered_slots(), 20);
}

#[test]
fn small_teams_leave_a_predictable_gap() {
    for (n, expected) in [(2, 16), (3, 12), (4, 8), (5, 4)] {
        let generation = generate(&team(n), 2025, 12, &GeneratorConfig::default(), None).unwrap();
        assert_eq!(generation.uncovered_slots(), expected, "team of {n}");
    }
}

#[test]
fn larger_teams_cover_every_weekend_slot() {
    for n in 7..=12 {
        let generation = generate(&team(n), 2025, 12, &GeneratorConfig::default(), None).unwrap();
        assert_eq!(generation.uncovered_slots(), 0, "team of {n}");
        assert_eq!(generation.tensions().count(), 0, "team of {n}");
    }
}

#[test]
fn empty_roster_is_a_warning() {
    let generation = generate(&[], 2025, 12, &GeneratorConfig::default(), None).unwrap();
    assert_eq!(generation.diagnostics, vec![Diagnostic::EmptyRoster]);
    assert!(generation.schedule.schedules.is_empty());
    assert_eq!(generation.schedule.fairness, 0.0);
}

#[test]
fn blocks_keep_one_shift_and_rotate() {
    let employees = team(6);
    let generation = generate(&employees, 2025, 12, &GeneratorConfig::default(), None).unwrap();

    for employee in &employees {
        let days = generation.schedule.for_employee(&employee.id).unwrap();
        let mut previous: Option<ShiftAssignment> = None;
        for run in schedule_runs(days, 31).iter().filter(|r| !r.rest) {
            let shift = days.get(run.start);
            assert!(run.days().all(|d| days.get(d) == shift));
            if let Some(prev) = previous {
                assert_eq!(prev.next_work(), Some(shift), "{} day {}", employee.id, run.start);
            }
            previous = Some(shift);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let employees = team(6);
    let config = GeneratorConfig::default();
    let a = generate(&employees, 2026, 3, &config, None).unwrap();
    let b = generate(&employees, 2026, 3, &config, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rules_hold_across_many_months() {
    let config = GeneratorConfig::default();
    for n in [3, 6, 9] {
        let employees = team(n);
        for year in 2024..=2026 {
            for month in 1..=12 {
                let generation = generate(&employees, year, month, &config, None).unwrap();
                assert_eq!(generation.tensions().count(), 0, "{year}-{month} n={n}");
                let violations = rule_violations(&employees, year, month, &config);
                assert!(violations.is_empty(), "{year}-{month} n={n}: {violations:?}");
            }
        }
    }
}

#[test]
fn holidays_extend_rest_eligible_days() {
    let employees = team(6);
    let config = GeneratorConfig {
        include_holidays: true,
        ..GeneratorConfig::default()
    };
    let table = HolidayTable::indonesia();
    let generation = generate(&employees, 2025, 12, &config, Some(&table)).unwrap();
    for employee in &employees {
        let days = generation.schedule.for_employee(&employee.id).unwrap();
        assert_eq!(days.rest_count(), 10);
    }
    assert_eq!(generation.tensions().count(), 0);
    assert!(generation.uncovered_slots() <= 1);
}

#[test]
fn too_few_rest_days_relax_work_blocks() {
    let employees = team(6);
    let config = GeneratorConfig {
        rest_days: 4,
        ..GeneratorConfig::default()
    };
    let generation = generate(&employees, 2025, 12, &config, None).unwrap();

    for employee in &employees {
        let days = generation.schedule.for_employee(&employee.id).unwrap();
        assert_eq!(days.rest_count(), 4);
    }
    let tensions: Vec<_> = generation.tensions().collect();
    assert_eq!(tensions.len(), 6);
    assert!(tensions
        .iter()
        .all(|(_, relaxation)| *relaxation == Relaxation::WorkBlockLength));
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut employees = team(2);
    employees.push(Employee::with_id("e1", "Clone", ""));
    let err = generate(&employees, 2025, 12, &GeneratorConfig::default(), None).unwrap_err();
    assert!(matches!(err, SchedError::DuplicateEmployee(id) if id == "e1"));

    let mut scheduler = Scheduler::new();
    scheduler.add_employees(team(2)).unwrap();
    assert!(scheduler.add_employees(vec![Employee::with_id("e2", "Again", "")]).is_err());
    assert_eq!(scheduler.roster().employees.len(), 2);
}

#[test]
fn invalid_inputs_are_errors() {
    let config = GeneratorConfig::default();
    assert!(matches!(
        generate(&team(3), 2025, 13, &config, None),
        Err(SchedError::InvalidMonth(13))
    ));
    let bad = GeneratorConfig {
        rest_days: 0,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        generate(&team(3), 2025, 12, &bad, None),
        Err(SchedError::InvalidConfig(_))
    ));
}

#[test]
fn regenerating_replaces_stored_month() {
    let config = GeneratorConfig::default();
    let mut scheduler = Scheduler::new();
    scheduler.add_employees(team(6)).unwrap();

    assert!(matches!(
        scheduler.detect_violations(2025, 12, None),
        Err(SchedError::UnknownSchedule { year: 2025, month: 12 })
    ));

    let first = scheduler.generate_month(2025, 12, &config).unwrap();
    let second = scheduler.generate_month(2025, 12, &config).unwrap();
    assert_eq!(first.schedule, second.schedule);
    assert_eq!(scheduler.roster().schedules.len(), 1);

    scheduler.generate_month(2025, 11, &config).unwrap();
    let months: Vec<_> = scheduler
        .roster()
        .schedules
        .iter()
        .map(|s| (s.year, s.month))
        .collect();
    assert_eq!(months, vec![(2025, 11), (2025, 12)]);
    assert!(scheduler.detect_violations(2025, 12, Some(&config)).unwrap().is_empty());
}

#[test]
fn violations_flag_a_broken_schedule() {
    let employees = team(6);
    let config = GeneratorConfig::default();
    let mut generation = generate(&employees, 2025, 12, &config, None).unwrap();
    let calendar = classify(2025, 12, None).unwrap();

    // Un repos en plus casse le compte exact.
    let days = generation.schedule.schedules.get_mut(&employees[0].id).unwrap();
    let worked = (1..=31).find(|d| days.get(*d).is_work()).unwrap();
    days.set(worked, ShiftAssignment::Rest);

    let violations = detect_violations(&generation.schedule, &employees, &calendar, &config);
    assert!(violations.iter().any(|v| v.employee.as_ref() == Some(&employees[0].id)
        && v.kind
            == ViolationKind::RestCount {
                expected: 10,
                actual: 11
            }));
}

/// `M`/`A`/`N` pour les postes, `R` pour le repos ; jour 1 en tête.
fn days_from(pattern: &str) -> DaySchedule {
    DaySchedule::from_assignments(pattern.chars().map(|c| match c {
        'M' => ShiftAssignment::Morning,
        'A' => ShiftAssignment::Afternoon,
        'N' => ShiftAssignment::Night,
        _ => ShiftAssignment::Rest,
    }))
}

#[test]
fn checker_reports_each_block_rule() {
    let employees = team(2);
    let config = GeneratorConfig::default();
    let calendar = classify(2025, 12, None).unwrap();
    let mut schedule = MonthSchedule::empty(2025, 12, 31);
    // Bloc de 2 en ouverture et repos isolé le 31 : tolérés en bordure de mois.
    schedule.schedules.insert(
        employees[0].id.clone(),
        days_from("MMRRAAAARRNNNRMMAARRNNNNRRMMMMR"),
    );
    // Jour 31 absent ; seul le week-end du 27-28 est en repos.
    schedule.schedules.insert(
        employees[1].id.clone(),
        days_from("RRAAAAARRNNNNNRRMMMMMRRAAAARRR"),
    );

    let violations = detect_violations(&schedule, &employees, &calendar, &config);
    let of = |idx: usize| -> Vec<ViolationKind> {
        violations
            .iter()
            .filter(|v| v.employee.as_ref() == Some(&employees[idx].id))
            .map(|v| v.kind.clone())
            .collect()
    };

    assert_eq!(
        of(0),
        vec![
            ViolationKind::WorkBlockLength { start: 11, len: 3 },
            ViolationKind::RestBlockLength { start: 14, len: 1 },
            ViolationKind::MixedBlock { start: 15 },
            ViolationKind::RotationBreak { start: 21 },
        ]
    );

    let second = of(1);
    assert!(second.contains(&ViolationKind::MissingDays));
    assert!(second.contains(&ViolationKind::WeekendRest { periods: 1 }));
}

#[test]
fn stored_month_is_checked_with_its_own_settings() {
    let config = GeneratorConfig {
        rest_days: 9,
        ..GeneratorConfig::default()
    };
    let mut scheduler = Scheduler::new();
    scheduler.add_employees(team(6)).unwrap();
    scheduler.generate_month(2025, 12, &config).unwrap();

    assert_eq!(scheduler.roster().find_schedule(2025, 12).unwrap().config, config);
    assert!(scheduler.detect_violations(2025, 12, None).unwrap().is_empty());

    let defaults = GeneratorConfig::default();
    let violations = scheduler.detect_violations(2025, 12, Some(&defaults)).unwrap();
    assert!(violations.iter().any(|v| v.kind
        == ViolationKind::RestCount {
            expected: 10,
            actual: 9
        }));
}

#[test]
fn stored_month_keeps_applied_holidays() {
    let config = GeneratorConfig {
        include_holidays: true,
        ..GeneratorConfig::default()
    };
    let mut scheduler = Scheduler::new().with_holidays(HolidayTable::indonesia());
    scheduler.add_employees(team(6)).unwrap();
    scheduler.generate_month(2025, 12, &config).unwrap();

    let stored = scheduler.roster().find_schedule(2025, 12).unwrap();
    let days: Vec<_> = stored.holidays.iter().map(|h| h.date.to_string()).collect();
    assert_eq!(days, ["2025-12-25", "2025-12-26"]);

    // Sans table de fériés, la vérification reprend ceux du mois stocké.
    let mut bare = Scheduler::with_roster(scheduler.roster().clone());
    assert!(bare.detect_violations(2025, 12, None).unwrap().is_empty());
    bare.generate_month(2025, 11, &GeneratorConfig::default()).unwrap();
    assert!(bare.roster().find_schedule(2025, 11).unwrap().holidays.is_empty());
}
