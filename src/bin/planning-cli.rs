#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use planning::{
    config::PlanningConfig,
    export::{DocumentExporter, ExportError, XlsxExporter},
    io,
    label::Locale,
    model::AbsencePeriod,
    render::{render_counter, render_day},
    scheduler::Planner,
    storage::{self, JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Planificateur d'horaires de travail en équipe
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration
    #[arg(long, global = true, default_value = "planning.json")]
    config: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer une configuration par défaut (7 jours à partir d'aujourd'hui)
    Init {
        /// Écrase une configuration existante
        #[arg(long)]
        force: bool,
    },

    /// Ajouter un membre
    AddMember { name: String },

    /// Ajouter une plage horaire
    AddSlot { label: String },

    /// Déclarer une période d'absence (bornes incluses)
    AddAbsence {
        #[arg(long)]
        member: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD, par défaut égale à `start`
        #[arg(long)]
        end: Option<String>,
    },

    /// Importer des membres depuis un CSV (header `name`)
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des plages depuis un CSV (header `label`)
    ImportSlots {
        #[arg(long)]
        csv: String,
    },

    /// Importer des absences depuis un CSV (header `member,start[,end]`)
    ImportAbsences {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning, l'afficher et l'exporter
    Generate {
        /// Langue d'affichage (fr, en), par défaut celle de la configuration
        #[arg(long)]
        locale: Option<Locale>,
        /// Fichier Excel de sortie (exige --password)
        #[arg(long)]
        xlsx: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        csv: Option<String>,
        #[arg(long)]
        json: Option<String>,
        #[arg(long)]
        counter_csv: Option<String>,
        /// N'affiche pas les tableaux
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.config);

    let code = match cli.cmd {
        Commands::Init { force } => {
            if storage.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    storage.path().display()
                );
            }
            storage.save(&PlanningConfig::sample_from_today())?;
            println!("Configuration written to {}", storage.path().display());
            0
        }
        Commands::AddMember { name } => {
            let mut config = load(&storage)?;
            config.add_member(&name)?;
            storage.save(&config)?;
            0
        }
        Commands::AddSlot { label } => {
            let mut config = load(&storage)?;
            config.add_slot(&label)?;
            storage.save(&config)?;
            0
        }
        Commands::AddAbsence { member, start, end } => {
            let mut config = load(&storage)?;
            let start = io::parse_date(&start)?;
            let end = match end {
                Some(raw) => io::parse_date(&raw)?,
                None => start,
            };
            config.add_absence(&member, AbsencePeriod::new(start, end)?)?;
            storage.save(&config)?;
            0
        }
        Commands::ImportMembers { csv } => {
            let mut config = load(&storage)?;
            for name in io::import_members_csv(csv)? {
                config.add_member(&name)?;
            }
            storage.save(&config)?;
            0
        }
        Commands::ImportSlots { csv } => {
            let mut config = load(&storage)?;
            for label in io::import_slots_csv(csv)? {
                config.add_slot(&label)?;
            }
            storage.save(&config)?;
            0
        }
        Commands::ImportAbsences { csv } => {
            let mut config = load(&storage)?;
            for (member, period) in io::import_absences_csv(csv)? {
                config.add_absence(&member, period)?;
            }
            storage.save(&config)?;
            0
        }
        Commands::Generate {
            locale,
            xlsx,
            password,
            csv,
            json,
            counter_csv,
            quiet,
        } => {
            let config = load(&storage)?;
            let locale = locale.unwrap_or(config.locale);
            let planning = Planner::with_labeler(locale).generate(&config.to_request())?;

            // les journées sans membre disponible sont signalées à leur place
            let mut diagnostics = planning.diagnostics.iter().peekable();
            for day in &planning.days {
                while let Some(diag) = diagnostics.next_if(|d| d.date() < day.date) {
                    eprintln!("Error: {diag}");
                }
                if !quiet {
                    println!("{}", render_day(day, locale));
                }
            }
            for diag in diagnostics {
                eprintln!("Error: {diag}");
            }
            println!("{}", render_counter(&planning.counter, locale));

            if let Some(path) = csv {
                io::export_planning_csv(path, &planning, locale)?;
            }
            if let Some(path) = json {
                io::export_planning_json(path, &planning)?;
            }
            if let Some(path) = counter_csv {
                io::export_counter_csv(path, &planning.counter)?;
            }

            let mut export_withheld = false;
            if let Some(path) = xlsx {
                match XlsxExporter::new(locale).export(&planning, password.as_deref()) {
                    Ok(bytes) => {
                        storage::write_atomic(&path, &bytes)?;
                        println!("Planning exported to {path}");
                    }
                    Err(ExportError::MissingExportCredential) => {
                        eprintln!("Warning: enter a password (--password) to protect the Excel file; nothing written");
                        export_withheld = true;
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            // Code 2 = WARNING/INCOMPLETE
            if planning.is_complete() && !export_withheld {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}

fn load(storage: &JsonStorage) -> Result<PlanningConfig> {
    if !storage.exists() {
        bail!(
            "{} not found (run `planning-cli init` first)",
            storage.path().display()
        );
    }
    storage.load()
}
