#![forbid(unsafe_code)]
use anyhow::{anyhow, Result};
use roulement::{
    calculate_statistics, io,
    load_config_from_file,
    model::Employee,
    storage::{JsonStorage, Storage},
    GeneratorConfig, HolidayTable, Scheduler,
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings de roulement (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster (équipe + plannings)
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct Month {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
}

#[derive(Args, Debug, Clone)]
struct Rules {
    /// Configuration JSON du générateur
    #[arg(long)]
    config: Option<String>,
    /// Jours fériés indonésiens intégrés comptés comme week-end
    #[arg(long)]
    holidays: bool,
    /// Table de fériés CSV `date,name` (implique --holidays)
    #[arg(long)]
    holidays_csv: Option<String>,
    /// Remplace `rest_days` de la configuration
    #[arg(long)]
    rest_days: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer l'équipe depuis un CSV `id,name[,role]`
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un employé en fin d'équipe
    AddEmployee {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long)]
        id: Option<String>,
    },

    /// Générer (ou régénérer) le planning d'un mois
    Generate {
        #[command(flatten)]
        month: Month,
        #[command(flatten)]
        rules: Rules,
    },

    /// Afficher la grille d'un mois
    Show {
        #[command(flatten)]
        month: Month,
    },

    /// Statistiques et score d'équité d'un mois
    Stats {
        #[command(flatten)]
        month: Month,
    },

    /// Vérifier les règles sur un planning stocké (sans option : configuration
    /// et fériés enregistrés par `generate`)
    Check {
        #[command(flatten)]
        month: Month,
        #[command(flatten)]
        rules: Rules,
        /// Export CSV des violations (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Exporter un mois en CSV et/ou JSON
    Export {
        #[command(flatten)]
        month: Month,
        #[arg(long)]
        csv: Option<String>,
        #[arg(long)]
        json: Option<String>,
    },
}

impl Rules {
    fn is_set(&self) -> bool {
        self.config.is_some()
            || self.holidays
            || self.holidays_csv.is_some()
            || self.rest_days.is_some()
    }
}

fn resolve(rules: &Rules) -> Result<(GeneratorConfig, HolidayTable)> {
    let mut config = match &rules.config {
        Some(path) => load_config_from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(rest_days) = rules.rest_days {
        config.rest_days = rest_days;
    }
    let holidays = match &rules.holidays_csv {
        Some(path) => io::import_holidays_csv(path)?,
        None if rules.holidays => HolidayTable::indonesia(),
        None => HolidayTable::default(),
    };
    if rules.holidays || rules.holidays_csv.is_some() {
        config.include_holidays = true;
    }
    config.validate()?;
    Ok((config, holidays))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut scheduler = Scheduler::with_roster(storage.load()?);

    let code = match cli.cmd {
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            let count = employees.len();
            scheduler.add_employees(employees)?;
            storage.save(scheduler.roster())?;
            println!("Imported {count} employee(s)");
            0
        }
        Commands::AddEmployee { name, role, id } => {
            let employee = match id {
                Some(id) => Employee::with_id(id, name, role),
                None => Employee::new(name, role),
            };
            let id = employee.id.clone();
            scheduler.add_employees(vec![employee])?;
            storage.save(scheduler.roster())?;
            println!("Added {id}");
            0
        }
        Commands::Generate { month, rules } => {
            let (config, holidays) = resolve(&rules)?;
            scheduler = scheduler.with_holidays(holidays);
            let generation = scheduler.generate_month(month.year, month.month, &config)?;
            storage.save(scheduler.roster())?;
            println!(
                "Generated {}-{:02} for {} employee(s), fairness {:.2}",
                month.year,
                month.month,
                generation.schedule.schedules.len(),
                generation.schedule.fairness
            );
            if generation.is_clean() {
                0
            } else {
                for diagnostic in &generation.diagnostics {
                    eprintln!("warning: {diagnostic}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Show { month } => {
            let schedule = find(&scheduler, &month)?;
            print!("{}", io::render_grid(schedule, &scheduler.roster().employees));
            0
        }
        Commands::Stats { month } => {
            let schedule = find(&scheduler, &month)?;
            let stats = calculate_statistics(schedule, &scheduler.roster().employees);
            println!("name | days | rest | worked | morning | afternoon | night");
            for s in &stats {
                println!(
                    "{} | {} | {} | {} | {} | {} | {}",
                    s.name, s.total_days, s.rest, s.worked, s.morning, s.afternoon, s.night
                );
            }
            println!("fairness: {:.2}", schedule.fairness);
            0
        }
        Commands::Check {
            month,
            rules,
            report,
        } => {
            let violations = if rules.is_set() {
                let (config, holidays) = resolve(&rules)?;
                scheduler = scheduler.with_holidays(holidays);
                scheduler.detect_violations(month.year, month.month, Some(&config))?
            } else {
                scheduler.detect_violations(month.year, month.month, None)?
            };
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["employee_id", "kind", "detail"])?;
                    for v in &violations {
                        let employee = v.employee.as_ref().map(|e| e.as_str()).unwrap_or("");
                        let detail = format!("{:?}", v.kind);
                        w.write_record([employee, v.kind_label(), detail.as_str()])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
        Commands::Export { month, csv, json } => {
            let schedule = find(&scheduler, &month)?;
            if let Some(path) = csv {
                io::export_schedule_csv(path, schedule, &scheduler.roster().employees)?;
            }
            if let Some(path) = json {
                io::export_schedule_json(path, schedule)?;
            }
            0
        }
    };

    std::process::exit(code);
}

fn find<'a>(scheduler: &'a Scheduler, month: &Month) -> Result<&'a roulement::MonthSchedule> {
    scheduler
        .roster()
        .find_schedule(month.year, month.month)
        .ok_or_else(|| anyhow!("no schedule for {}-{:02}, run `generate` first", month.year, month.month))
}
