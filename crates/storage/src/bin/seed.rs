use std::fmt;

use chrono::{Duration, Local, NaiveDate};
use drill_core::model::{DayKey, DrillSettings, DrillSettingsDraft, Variant};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    days: u32,
    goal: u32,
    variant: Option<Variant>,
    until: Option<NaiveDate>,
    skip_every: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDays { raw: String },
    InvalidGoal { raw: String },
    InvalidVariant { raw: String },
    InvalidDbUrl { raw: String },
    InvalidUntil { raw: String },
    InvalidSkip { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidGoal { raw } => write!(f, "invalid --goal value: {raw}"),
            ArgsError::InvalidVariant { raw } => write!(f, "invalid --variant value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUntil { raw } => {
                write!(f, "invalid --until value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidSkip { raw } => write!(f, "invalid --skip-every value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("DRILL_DB_URL").unwrap_or_else(|_| "sqlite:drill.sqlite3".into());
        let mut days = 14_u32;
        let mut goal = std::env::var("DRILL_DAILY_GOAL")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|goal| (1..=drill_core::model::MAX_DAILY_GOAL).contains(goal))
            .unwrap_or(drill_core::model::DEFAULT_DAILY_GOAL);
        let mut variant = None;
        let mut until = None;
        let mut skip_every = 0_u32;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--days" => {
                    let value = require_value(&mut args, "--days")?;
                    days = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDays { raw: value.clone() })?;
                }
                "--goal" => {
                    let value = require_value(&mut args, "--goal")?;
                    goal = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGoal { raw: value.clone() })?;
                }
                "--variant" => {
                    let value = require_value(&mut args, "--variant")?;
                    variant = Some(
                        value
                            .parse::<Variant>()
                            .map_err(|_| ArgsError::InvalidVariant { raw: value.clone() })?,
                    );
                }
                "--until" => {
                    let value = require_value(&mut args, "--until")?;
                    let parsed = DayKey::parse(&value)
                        .map_err(|_| ArgsError::InvalidUntil { raw: value.clone() })?;
                    until = Some(parsed.date());
                }
                "--skip-every" => {
                    let value = require_value(&mut args, "--skip-every")?;
                    skip_every = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSkip { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            days,
            goal,
            variant,
            until,
            skip_every,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:drill.sqlite3)");
    eprintln!("  --days <n>                Days of history to write, ending yesterday (default: 14)");
    eprintln!("  --goal <n>                Daily goal to save and to fill each day with (default: 10)");
    eprintln!("  --variant <name>          standard | classic");
    eprintln!("  --until <YYYY-MM-DD>      Treat this date as today");
    eprintln!("  --skip-every <n>          Leave every n-th day short of the goal (0 = never)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_DB_URL, DRILL_DAILY_GOAL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    let current = storage.settings.get_settings().await?.unwrap_or_default();
    let mut draft = DrillSettingsDraft::from_settings(&current);
    draft.daily_goal = Some(args.goal);
    if let Some(variant) = args.variant {
        draft.variant = Some(variant);
    }
    let settings: DrillSettings = draft.validate()?;
    storage.settings.save_settings(&settings).await?;

    let today = args.until.unwrap_or_else(|| Local::now().date_naive());
    for offset in 1..=args.days {
        let date = today - Duration::days(i64::from(offset));
        let short = args.skip_every > 0 && offset % args.skip_every == 0;
        let count = if short {
            settings.daily_goal() / 2
        } else {
            settings.daily_goal()
        };
        storage
            .progress
            .set_day_count(DayKey::new(date), count)
            .await?;
    }

    eprintln!(
        "seeded {} day(s) before {} with goal {} ({})",
        args.days,
        DayKey::new(today),
        settings.daily_goal(),
        settings.variant()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
