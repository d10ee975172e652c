use babylog_core::view::{
    daily_totals, filter_date_range, format_duration, format_time_of_day, hour_bounds, hour_ticks,
};
use babylog_core::*;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "babylog")]
#[command(about = "Infant care log timeline builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the timeline and write timeline.csv and aliases.json (default)
    Process {
        /// Raw CSV export to read
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory for the output files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print per-day totals for a window of dates
    Summary {
        /// Raw CSV export to read
        #[arg(long)]
        input: Option<PathBuf>,

        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// First date to exclude (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        babylog_core::logging::init_with_level("debug");
    } else {
        babylog_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    tracing::debug!("Using data directory {:?}", config.data.data_dir);

    match cli.command {
        Some(Commands::Process { input, output_dir }) => cmd_process(&config, input, output_dir),
        Some(Commands::Summary { input, from, to }) => cmd_summary(&config, input, from, to),
        None => cmd_process(&config, None, None),
    }
}

fn load_timeline(config: &Config, input: Option<PathBuf>) -> Result<Timeline> {
    let input = input.unwrap_or_else(|| config.data.input_path());
    if !input.exists() {
        return Err(Error::Config(format!(
            "Input file {} does not exist",
            input.display()
        )));
    }

    let records = load_raw_records(&input)?;
    build_timeline(&records, config)
}

fn cmd_process(config: &Config, input: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let timeline = load_timeline(config, input)?;

    let output_dir = output_dir.unwrap_or_else(|| config.data.output_dir());
    let csv_path = output_dir.join("timeline.csv");
    let aliases_path = output_dir.join("aliases.json");

    write_timeline_csv(&csv_path, &timeline.events)?;
    write_aliases_json(&aliases_path, &timeline.aliases)?;

    println!(
        "✓ Wrote {} events ({} synthesized)",
        timeline.events.len(),
        timeline.synthesized
    );
    print_path("Timeline", &csv_path);
    print_path("Aliases", &aliases_path);

    Ok(())
}

fn cmd_summary(
    config: &Config,
    input: Option<PathBuf>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let timeline = load_timeline(config, input)?;
    let events = filter_date_range(&timeline.events, from, to);

    if events.is_empty() {
        println!("No events in the selected window.");
        return Ok(());
    }

    for (date, kinds) in daily_totals(&events) {
        let parts: Vec<String> = kinds
            .iter()
            .map(|(kind, seconds)| format!("{} {}", kind, format_duration(*seconds)))
            .collect();
        println!("{}  {}", date, parts.join(", "));
    }

    let kinds: BTreeSet<EventKind> = events.iter().map(|e| e.kind).collect();
    let legend: Vec<String> = kinds
        .iter()
        .map(|kind| format!("{}={}", kind, kind.color()))
        .collect();
    println!();
    println!("Legend: {}", legend.join(", "));

    let bounds = hour_bounds(&events);
    let ticks = hour_ticks(bounds);
    if let (Some(first), Some(last)) = (ticks.first(), ticks.last()) {
        println!();
        println!(
            "Active hours: {} - {}",
            format_time_of_day(*first),
            format_time_of_day(*last)
        );
    }

    Ok(())
}

fn print_path(label: &str, path: &Path) {
    println!("  {}: {}", label, path.display());
}
