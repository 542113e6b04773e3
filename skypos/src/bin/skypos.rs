use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use skypos::ingest::ListedTarget;
use skypos::sexagesimal::format_position;
use skypos::{
    angular_distance, compare_base_position, corners, offset_of, offset_of_date, parse_position,
    parse_target_list, position_angle, position_at, CoordinateSystem, Offset, ParsedTarget,
    Position, SortKey, Target,
};
use skypos_core::angle::SexagesimalFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skypos")]
#[command(about = "Convert, compare and offset sky positions")]
#[command(version)]
struct Cli {
    /// Digits of precision for sexagesimal output
    #[arg(long, global = true, default_value = "5")]
    precision: u8,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a position and show it in its own system and in J2000
    Parse {
        /// Position, e.g. "10.68 41.27", "00h42m44.3s +41d16m09s B1950", "120 -3 gal"
        #[arg(allow_hyphen_values = true)]
        position: String,
    },
    /// Convert a position to another coordinate system
    Convert {
        #[arg(allow_hyphen_values = true)]
        position: String,
        /// Target system, e.g. EQ_B1950, ecl, gal, sgal
        #[arg(long, default_value = "EQ_J2000")]
        to: String,
    },
    /// Great-circle distance between two positions, in degrees
    Distance {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// Offset of the second position from the first, in arcseconds
    Offset {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
        /// Apply proper motion up to this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Position reached by an offset in arcseconds
    PositionAt {
        #[arg(allow_hyphen_values = true)]
        position: String,
        /// East offset in arcseconds
        #[arg(allow_hyphen_values = true)]
        east: f64,
        /// North offset in arcseconds
        #[arg(allow_hyphen_values = true)]
        north: f64,
    },
    /// Corners of a box around a position
    Corners {
        #[arg(allow_hyphen_values = true)]
        position: String,
        /// Half-width of the box in arcseconds
        #[arg(long, default_value = "60.0")]
        radius: f64,
    },
    /// Position angle of the second position seen from the first, in degrees
    Pa {
        #[arg(allow_hyphen_values = true)]
        from: String,
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// Read a fixed-target list and print it sorted
    Targets {
        file: PathBuf,
        /// Sort key: ra or dec
        #[arg(long, default_value = "ra")]
        sort: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fmt = SexagesimalFormat::new(cli.precision);

    match cli.command {
        Commands::Parse { position } => match parse_position(&position)? {
            ParsedTarget::Name(name) => println!("name: {name} (not resolved)"),
            ParsedTarget::Position(p) => {
                println!("{}", describe(p.original(), &fmt));
                println!("{}", describe(p.position(), &fmt));
            }
        },
        Commands::Convert { position, to } => {
            let to: CoordinateSystem = to.parse()?;
            let converted = read_position(&position)?.convert_to(to)?;
            println!("{}", describe(&converted, &fmt));
        }
        Commands::Distance { from, to } => {
            let d = angular_distance(&read_position(&from)?, &read_position(&to)?)?;
            println!("{d:.6}");
        }
        Commands::Offset { from, to, date } => {
            let (from, to) = (read_position(&from)?, read_position(&to)?);
            let offset = match date {
                Some(date) => offset_of_date(&from, &to, &parse_date(&date)?),
                None => offset_of(&from, &to),
            };
            println!("{:.4} {:.4}", offset.delta_lon(), offset.delta_lat());
        }
        Commands::PositionAt {
            position,
            east,
            north,
        } => {
            let anchor = read_position(&position)?;
            let there = position_at(&anchor, &Offset::new(east, north, anchor));
            println!("{}", describe(there.position(), &fmt));
        }
        Commands::Corners { position, radius } => {
            if !(radius.is_finite() && radius > 0.0) {
                bail!("radius must be a positive number of arcseconds");
            }
            let box_ = corners(&read_position(&position)?, radius);
            let labels = ["upper left", "upper right", "lower left", "lower right"];
            for (label, corner) in labels.iter().zip(box_.as_array()) {
                println!("{label:>11}: {}", describe(corner.position(), &fmt));
            }
        }
        Commands::Pa { from, to } => {
            let (from, to) = (read_j2000(&from)?, read_j2000(&to)?);
            let pa = position_angle(
                from.lon().degrees(),
                from.lat().degrees(),
                to.lon().degrees(),
                to.lat().degrees(),
            );
            println!("{pa:.6}");
        }
        Commands::Targets { file, sort } => {
            let key: SortKey = sort.parse()?;
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            print_targets(parse_target_list(&text)?, key, &fmt);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// The position as the user typed it, before conversion to J2000.
fn read_position(text: &str) -> anyhow::Result<Position> {
    match parse_position(text)? {
        ParsedTarget::Position(p) => Ok(*p.original()),
        ParsedTarget::Name(name) => Err(anyhow!(
            "'{name}' looks like an object name; name resolution is not available"
        )),
    }
}

fn read_j2000(text: &str) -> anyhow::Result<Position> {
    Ok(read_position(text)?.to_j2000()?.into())
}

fn parse_date(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{text}', expected YYYY-MM-DD"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date '{text}'"))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn describe(position: &Position, fmt: &SexagesimalFormat) -> String {
    let (lon, lat) = format_position(position, fmt);
    format!("{lon} {lat} {}", position.system())
}

fn print_targets(listed: Vec<ListedTarget>, key: SortKey, fmt: &SexagesimalFormat) {
    let (resolved, unresolved): (Vec<_>, Vec<_>) =
        listed.into_iter().partition(|t| t.position.is_some());

    let mut rows: Vec<(String, Target)> = resolved
        .iter()
        .filter_map(|t| t.to_target().map(|target| (t.name.clone(), target)))
        .collect();
    rows.sort_by(|a, b| compare_base_position(&a.1, &b.1, key));

    for (name, target) in &rows {
        if let Some(position) = target.base_position() {
            println!("{name:<20} {}", describe(position, fmt));
        }
    }
    for t in unresolved {
        println!("{:<20} (line {}, resolve with {:?})", t.name, t.line, t.resolver);
    }
}
