use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use optgroup_core::{ArgParser, OptionTable, ParseOutcome, ParserConfig, render_help};
use tracing::debug;

/// Output format for option tables.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TableFormat {
    Json,
    Yaml,
    Table,
    Grammar,
}

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "optgroup")]
#[command(about = "Check option grammars and parse arguments against them")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a grammar and print its option table.
    Check(CheckArgs),
    /// Print the help text generated from a grammar.
    Help(HelpArgs),
    /// Parse arguments against a grammar and print the captured values.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Grammar file.
    #[arg(long)]
    grammar: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: TableFormat,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Grammar file.
    #[arg(long)]
    grammar: PathBuf,
    /// Parser configuration (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Grammar file.
    #[arg(long)]
    grammar: PathBuf,
    /// Parser configuration (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: ReportFormat,
    /// Arguments to parse, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Help(args) => run_help(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        "optgroup=debug,optgroup_core=debug"
    } else {
        "optgroup=warn,optgroup_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: &Path) -> Result<OptionTable, String> {
    OptionTable::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig, String> {
    match path {
        Some(path) => ParserConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(ParserConfig::default()),
    }
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let table = load_table(&args.grammar)?;
    debug!(options = table.len(), "Grammar loaded");

    let raw = match args.format {
        TableFormat::Json => serde_json::to_string_pretty(&table)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        TableFormat::Yaml => {
            serde_yaml::to_string(&table).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
        TableFormat::Table => table_to_text(&table),
        TableFormat::Grammar => table.to_grammar(),
    };
    print!("{raw}");
    if !raw.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let table = load_table(&args.grammar)?;
    let config = load_config(args.config.as_deref())?;
    print!("{}", render_help(&table, &config));
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let table = load_table(&args.grammar)?;
    let config = load_config(args.config.as_deref())?;
    let mut parser = ArgParser::with_config(table, config);

    match parser.parse(args.args).map_err(|e| e.to_string())? {
        ParseOutcome::HelpRequested => {
            print!("{}", parser.help());
        }
        ParseOutcome::Parsed => {
            let report = parser.report();
            let raw = match args.format {
                ReportFormat::Json => serde_json::to_string_pretty(&report)
                    .map_err(|e| format!("JSON serialization failed: {e}"))?,
                ReportFormat::Yaml => serde_yaml::to_string(&report)
                    .map_err(|e| format!("YAML serialization failed: {e}"))?,
            };
            println!("{}", raw.trim_end());
        }
    }
    Ok(())
}

fn table_to_text(table: &OptionTable) -> String {
    let mut out = String::new();
    out.push_str("| Option | Required | Group | Repeatable | Value |\n");
    out.push_str("|--------|----------|-------|------------|-------|\n");
    for (_, spec) in table.iter() {
        let group = if spec.group.is_numbered() {
            spec.group.to_string()
        } else {
            "-".to_string()
        };
        let value = spec
            .param
            .as_ref()
            .map(|p| format!("<{}>", p.declared))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            spec.spellings.join(", "),
            if spec.optional { "no" } else { "yes" },
            group,
            if spec.unique { "no" } else { "yes" },
            value,
        ));
    }
    out
}
