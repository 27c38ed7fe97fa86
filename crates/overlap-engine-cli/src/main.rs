use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use overlap_engine::{
    convert_local, find_overlap_for, to_local_display, validate, LocalAvailability, MemberEntry,
    OverlapResult,
};

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Find a meeting window shared by team members in different time zones"
)]
struct Cli {
    /// Log how each local time was resolved (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Intersect every member's availability window
    Solve {
        /// JSON file holding the member array (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Inline member as ZONE,START,END (repeatable)
        #[arg(short, long = "member", value_name = "ZONE,START,END", conflicts_with = "file")]
        members: Vec<String>,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,

        /// Print the window in every member's local time instead of JSON
        #[arg(long, conflicts_with = "pretty")]
        report: bool,
    },
    /// Resolve one local wall-clock reading to UTC
    Convert {
        /// Local timestamp without offset, e.g. 2024-03-10T02:30
        local: String,
        /// IANA time zone, e.g. America/New_York
        zone: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::new("overlap_engine=debug"))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Solve {
            file,
            members,
            pretty,
            report,
        } => {
            let entries = if members.is_empty() {
                read_entries(file)?
            } else {
                members.iter().map(String::as_str).map(parse_member_arg).collect()
            };
            let validated = validate(&entries)?;
            let result = find_overlap_for(&validated)?;

            if report {
                print!("{}", render_report(&result, &validated));
            } else if pretty {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Command::Convert { local, zone } => {
            let converted = convert_local(&local, &zone)?;
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }
    }

    Ok(())
}

fn read_entries(file: Option<PathBuf>) -> Result<Vec<MemberEntry>> {
    let input = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };
    serde_json::from_str(&input).context("request must be a JSON array of members")
}

/// Split `ZONE,START,END`. Missing pieces stay `None` so validation reports
/// them like any other absent field.
fn parse_member_arg(arg: &str) -> MemberEntry {
    let mut parts = arg.splitn(3, ',').map(|p| p.trim().to_string());
    MemberEntry {
        timezone: parts.next(),
        start_local: parts.next(),
        end_local: parts.next(),
    }
}

fn render_report(result: &OverlapResult, members: &[LocalAvailability]) -> String {
    let Some(overlap) = result.overlap() else {
        return "No overlapping time slot was found for all team members.\n".to_string();
    };

    let mut out = format!(
        "Meeting window: {} to {}\n",
        to_local_display(overlap.start(), Tz::UTC),
        to_local_display(overlap.end(), Tz::UTC)
    );
    for (i, member) in members.iter().enumerate() {
        let tz = member.timezone();
        out.push_str(&format!(
            "  Person {} ({}): {} to {}\n",
            i + 1,
            tz.name(),
            to_local_display(overlap.start(), tz),
            to_local_display(overlap.end(), tz)
        ));
    }
    out
}
