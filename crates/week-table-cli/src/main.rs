use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::de::DeserializeOwned;
use week_table::config::{parse_datetime, parse_timezone};
use week_table::{
    fill, filled_builder, in_term_only, tabulate, week_schedule, ScheduleConfig, Tabulation,
    Term, TermCalendar, Timeslot, VecSource, WeekStartDay,
};

#[derive(Parser)]
#[command(
    name = "week-table",
    version,
    about = "Fill timeslot gaps and tabulate weekly broadcast schedules"
)]
struct Cli {
    /// IANA timezone schedules are laid out in
    #[arg(long, global = true, env = "WEEK_TABLE_TZ", default_value = "Europe/London")]
    tz: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the gaps in a timeslot list and print the filled list as JSON
    Fill {
        /// Timeslots JSON file (or - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Range start (RFC 3339, or YYYY-MM-DD for local midnight)
        #[arg(long)]
        from: String,

        /// Range end (RFC 3339, or YYYY-MM-DD for local midnight)
        #[arg(long)]
        to: String,
    },
    /// Tabulate the week containing a date and print the table as JSON
    Week {
        /// Timeslots JSON file (or - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Any instant in the wanted week (RFC 3339, or YYYY-MM-DD)
        #[arg(long)]
        at: String,

        /// Day the week starts on (monday or sunday)
        #[arg(long, default_value_t = WeekStartDay::Monday)]
        week_start: WeekStartDay,

        /// Terms JSON file; weeks outside every term are reported, not tabulated
        #[arg(long)]
        terms: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = ScheduleConfig {
        timezone: parse_timezone(&cli.tz)?,
        ..ScheduleConfig::default()
    };

    match cli.command {
        Commands::Fill { input, from, to } => run_fill(&config, &input, &from, &to),
        Commands::Week {
            input,
            at,
            week_start,
            terms,
        } => {
            let config = ScheduleConfig {
                week_start,
                ..config
            };
            run_week(&config, &input, &at, terms.as_deref())
        }
    }
}

fn run_fill(config: &ScheduleConfig, input: &Path, from: &str, to: &str) -> Result<()> {
    let zone = config.local_zone();
    let start = parse_datetime(from, &zone)?;
    let end = parse_datetime(to, &zone)?;

    let source = VecSource::new(read_timeslots(input)?)?;
    let filled = fill(source.slots().to_vec(), start, end)?;
    info!(
        "filled {} timeslots into {} entries",
        source.slots().len(),
        filled.len()
    );

    println!("{}", serde_json::to_string_pretty(&filled)?);
    Ok(())
}

fn run_week(
    config: &ScheduleConfig,
    input: &Path,
    at: &str,
    terms: Option<&Path>,
) -> Result<()> {
    let zone = config.local_zone();
    let at = parse_datetime(at, &zone)?;
    let source = VecSource::new(read_timeslots(input)?)?;

    let schedule = match terms {
        Some(path) => {
            let calendar = TermCalendar::new(read_json::<Vec<Term>>(path)?);
            week_schedule(at, config, in_term_only(calendar, filled_builder(source)))
        }
        None => week_schedule(at, config, filled_builder(source)),
    };
    info!(
        "tabulating week starting {} in {}",
        zone.to_naive_local(schedule.start()),
        config.timezone
    );

    match tabulate(&zone, &schedule)? {
        Tabulation::Table(table) => {
            println!("{}", serde_json::to_string_pretty(&table)?);
            Ok(())
        }
        Tabulation::Unavailable(message) => bail!("schedule unavailable: {message}"),
    }
}

fn read_timeslots(path: &Path) -> Result<Vec<Timeslot>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}
