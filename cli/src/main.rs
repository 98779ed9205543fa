use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use handle_feed_core::{Filter, SortOption, available_filters, filter_records, sort_records};
use handle_feed_parser::config::DEFAULT_CONFIG_FILE;
use handle_feed_parser::output::{OutputFormat, format_catalog, format_filters, format_report};
use handle_feed_parser::{FeedConfig, load_catalog, parse_feed_with_report, read_feed};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "handle-feed")]
#[command(about = "Offline parsing of username listing feeds")]
struct Cli {
    /// Log pipeline decisions at debug level (overrides RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a feed into a catalog of priced, categorized records.
    Parse(ParseArgs),
    /// List the filters that apply to a feed, with record counts.
    Filters(FiltersArgs),
    /// Validate one or more catalog JSON files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Feed file to read (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Record ordering: alphabetical-asc, alphabetical-desc, price-asc, price-desc.
    #[arg(long)]
    sort: Option<SortOption>,
    /// Filter label, e.g. "All", "Hot" or "3 letter".
    #[arg(long)]
    filter: Option<Filter>,
    /// Output format.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Output the parse report next to the catalog.
    #[arg(long)]
    with_report: bool,
    /// Viewer config file (default: ./.handle-feed.yml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct FiltersArgs {
    /// Feed file to read (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Catalog JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Filters(args) => run_filters(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = resolve_config(args.config.as_deref())?;
    let sort = args.sort.unwrap_or(config.sort);
    let filter = args.filter.unwrap_or(config.filter);
    let format = args.format.unwrap_or(config.format);
    let with_report = args.with_report || config.with_report;

    let feed_text = read_input(args.input.as_deref())?;
    let mut run = parse_feed_with_report(&feed_text);
    tracing::debug!(
        records = run.records.len(),
        filter = %filter,
        sort = %sort,
        "feed parsed"
    );

    let visible = filter_records(&run.records, filter);
    run.records = sort_records(&visible, sort);

    let report = run.report.clone();
    let catalog = run.into_catalog(chrono::Utc::now().to_rfc3339());

    if !with_report {
        println!("{}", format_catalog(&catalog, format)?);
        return Ok(());
    }

    #[derive(serde::Serialize)]
    struct ParseOutput<'a> {
        catalog: &'a handle_feed_core::Catalog,
        report: &'a handle_feed_parser::report::ParseReport,
    }

    let output = ParseOutput {
        catalog: &catalog,
        report: &report,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&output)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{yaml}");
        }
        OutputFormat::Markdown | OutputFormat::Table => {
            print!("{}", format_catalog(&catalog, format)?);
            println!();
            print!("{}", format_report(&report, format)?);
        }
    }

    Ok(())
}

fn run_filters(args: FiltersArgs) -> Result<(), String> {
    let feed_text = read_input(args.input.as_deref())?;
    let run = parse_feed_with_report(&feed_text);
    let filters = available_filters(&run.records);
    print!("{}", format_filters(&filters, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut records = 0usize;
    for path in &args.inputs {
        let catalog = load_catalog(path)
            .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
        if let Some(err) = handle_feed_core::validate_catalog(&catalog).first() {
            return Err(format!("'{}' is invalid: {err}", path.display()));
        }
        records += catalog.record_count();
    }

    println!(
        "Validated {} catalog file(s) with {records} record(s).",
        args.inputs.len()
    );
    Ok(())
}

fn resolve_config(explicit: Option<&Path>) -> Result<FeedConfig, String> {
    if let Some(path) = explicit {
        return FeedConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        return FeedConfig::load(fallback)
            .map_err(|e| format!("Failed to load config '{DEFAULT_CONFIG_FILE}': {e}"));
    }

    Ok(FeedConfig::default())
}

fn read_input(input: Option<&Path>) -> Result<String, String> {
    match input {
        Some(path) => read_feed(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        None => {
            let mut feed_text = String::new();
            std::io::stdin()
                .read_to_string(&mut feed_text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(feed_text)
        }
    }
}
