mod aggregate;
mod dates;
mod duration;
mod error;
mod report;
mod scanner;
mod types;

use aggregate::{Aggregate, ErrorPolicy};
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use dates::{Clock, SystemClock};
use error::Result;
use scanner::FileOrder;
use std::path::PathBuf;

/// Sum the connection times recorded in dated log files
/// (`YYYY-MM-DD#HH-MM-SS.txt`) from a start date onwards.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start date in the format YYYY-MM-DD (defaults to this week's Monday)
    start_date: Option<String>,

    /// Directory containing the log files
    #[arg(long, short = 'C', default_value = ".")]
    dir: PathBuf,

    /// Skip unreadable files and malformed connection times instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Process files in name order rather than directory listing order
    #[arg(long)]
    sorted: bool,

    /// Print a per-file breakdown table before the total
    #[arg(long, short = 'b')]
    breakdown: bool,

    /// Only print the start date and the total
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Args {
    fn policy(&self) -> ErrorPolicy {
        if self.lenient {
            ErrorPolicy::Lenient
        } else {
            ErrorPolicy::Strict
        }
    }

    fn order(&self) -> FileOrder {
        if self.sorted {
            FileOrder::ByName
        } else {
            FileOrder::Listing
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(&args, &SystemClock) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(args: &Args, clock: &impl Clock) -> Result<()> {
    let start = dates::resolve_start_date(args.start_date.as_deref(), clock)?;
    report::print_start(start);

    let quiet = args.quiet;
    let aggregate = sum_connection_times(&args.dir, start, args.policy(), args.order(), |f| {
        if !quiet {
            report::print_finding(f);
        }
    })?;

    report::print_summary(start, &aggregate, args.breakdown);
    Ok(())
}

fn sum_connection_times<F>(
    dir: &std::path::Path,
    start: NaiveDate,
    policy: ErrorPolicy,
    order: FileOrder,
    on_found: F,
) -> Result<Aggregate>
where
    F: FnMut(&types::Finding),
{
    let files = scanner::select_log_files(dir, start, order)?;
    log::debug!("{} log file(s) selected from {}", files.len(), dir.display());
    aggregate::accumulate(&files, policy, on_found)
}
