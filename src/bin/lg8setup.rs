//! Command-line front end: create and inspect `.lg8` logs, update `Ctestwin.ini`.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lg8setup::{
    contest::{self, ContestMeta, ManualContest},
    lg8::{
        HeaderVariant,
        inspect::inspect_file,
        writer::{BlankLog, write_blank},
    },
    settings::{IniSettings, parse_roster, roster_plan, startup_plan, update_ini},
    types::{Band, ContestKind, Mode},
};

#[derive(Parser)]
#[command(name = "lg8setup")]
#[command(about = "Prepare CTESTWIN logs and settings", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty .lg8 log
    Create(CreateArgs),
    /// Show mode, band and contest kind stored in a .lg8 log
    Inspect {
        /// Log file to inspect
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Merge a settings profile into Ctestwin.ini
    WriteIni {
        /// INI file to update
        #[arg(long, value_name = "FILE", default_value = "Ctestwin.ini")]
        ini: PathBuf,

        /// JSON settings profile
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Exchange number to set on every band
        #[arg(long, value_name = "NUMBER")]
        urcnum_all: Option<String>,

        /// Operator roster, one name per line
        #[arg(long, value_name = "FILE")]
        operators: Option<PathBuf>,
    },
    /// Update only the [CLUB] operator roster in Ctestwin.ini
    Roster {
        /// INI file to update
        #[arg(long, value_name = "FILE", default_value = "Ctestwin.ini")]
        ini: PathBuf,

        /// Operator roster, one name per line
        #[arg(value_name = "FILE")]
        operators: PathBuf,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Mode label, e.g. SSB
    #[arg(long, default_value = "SSB")]
    mode: Mode,

    /// Band label, e.g. 7MHz
    #[arg(long, default_value = "7MHz")]
    band: Band,

    /// Contest preset name
    #[arg(long, default_value = "Field Day")]
    contest: String,

    /// Contest key for the "Other" preset
    #[arg(long)]
    key: Option<String>,

    /// Contest kind for the "Other" preset
    #[arg(long)]
    kind: Option<ContestKind>,

    /// Contest kind read from the contest description
    #[arg(long)]
    meta_kind: Option<ContestKind>,

    /// Contest key read from the contest description
    #[arg(long)]
    meta_key: Option<String>,

    /// Contest name read from the contest description
    #[arg(long)]
    meta_name: Option<String>,

    /// User-defined multiplier description to reference from the log
    #[arg(long, value_name = "FILE")]
    md: Option<String>,

    /// Year used in the file name (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Operator roster, one name per line
    #[arg(long, value_name = "FILE")]
    operators: Option<PathBuf>,

    /// Write the 2-byte header used by older builds
    #[arg(long)]
    legacy_header: bool,

    /// Replace an existing log
    #[arg(short, long)]
    force: bool,

    /// Also point this INI at the new log and its band/mode
    #[arg(long, value_name = "FILE")]
    ini: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_roster(path: Option<&PathBuf>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    Ok(parse_roster(&text))
}

fn create(args: CreateArgs) -> Result<()> {
    let preset = contest::preset(&args.contest)
        .with_context(|| format!("Unknown contest preset {:?}", args.contest))?;
    let meta = ContestMeta {
        kind: args.meta_kind,
        key: args.meta_key,
        name: args.meta_name,
    };
    let manual = ManualContest {
        key: args.key,
        kind: args.kind,
    };
    let resolved = contest::resolve_contest(preset, &meta, &manual)?;

    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
    let path = args
        .out_dir
        .join(contest::log_file_name(year, &resolved.key, args.band));

    let blank = BlankLog {
        club_operators: read_roster(args.operators.as_ref())?,
        user_multi_path: args.md.clone(),
        header: if args.legacy_header {
            HeaderVariant::Legacy
        } else {
            HeaderVariant::Extended
        },
        ..BlankLog::new(args.mode, args.band, resolved.kind)
    };
    write_blank(&path, &blank, args.force)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    println!("Created {}", path.display());

    if let Some(ini) = args.ini {
        let plan = startup_plan(&path.display().to_string(), args.band, args.mode);
        update_ini(&ini, &plan).with_context(|| format!("Failed to update {}", ini.display()))?;
        println!("Updated {}", ini.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Create(args) => create(args)?,
        Commands::Inspect { input } => {
            let found = inspect_file(&input)
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
            info!(path = %input.display(), offset = found.trailer_offset, "inspected log");
            println!("{found}");
        }
        Commands::WriteIni {
            ini,
            profile,
            urcnum_all,
            operators,
        } => {
            let mut settings = match profile {
                Some(path) => IniSettings::from_json_file(&path)
                    .with_context(|| format!("Failed to load profile {}", path.display()))?,
                None => IniSettings::default(),
            };
            if let Some(value) = urcnum_all {
                settings.fill_urcnum(&value);
            }
            if operators.is_some() {
                settings.club_operators = read_roster(operators.as_ref())?;
            }
            let report = update_ini(&ini, &settings.upsert_plan())
                .with_context(|| format!("Failed to update {}", ini.display()))?;
            println!("Updated {} ({} keys written)", ini.display(), report.keys_set);
        }
        Commands::Roster { ini, operators } => {
            let names = read_roster(Some(&operators))?;
            update_ini(&ini, &roster_plan(&names))
                .with_context(|| format!("Failed to update {}", ini.display()))?;
            println!("Updated [CLUB] roster in {} ({} names)", ini.display(), names.len());
        }
    }

    Ok(())
}
