use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use keyref_core::{IndexConfig, KeyCombination};
use keyref_parser::IndexParser;
use keyref_parser::KeyTokenizer;
use keyref_parser::output::{OutputFormat, format_commands, format_stats};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
    Count,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
            CliOutputFormat::Count => Self::Count,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum KeysFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "keyref")]
#[command(about = "Extract keybindings from the editor help index")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an index document into command records.
    Parse(ParseArgs),
    /// Decode key notation, one string per line.
    Keys(KeysArgs),
    /// Print the effective configuration as YAML.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Index file to read (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// YAML configuration overriding the built-in tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Print parse counters to stderr after the records.
    #[arg(long)]
    with_stats: bool,
}

#[derive(Debug, Args)]
struct KeysArgs {
    /// File with one notation string per line (default: stdin).
    #[arg(long)]
    input: Option<PathBuf>,
    /// YAML configuration overriding the built-in vocabulary.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: KeysFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// YAML configuration to load and validate.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Keys(args) => run_keys(args),
        Command::Config(args) => run_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;

    let mut parser = IndexParser::new(&config).map_err(|err| err.to_string())?;
    let commands = parser.parse(&text).map_err(|err| err.to_string())?;
    let format = args.format.into();

    println!("{}", format_commands(&commands, format)?);
    if args.with_stats {
        eprintln!("{}", format_stats(parser.stats(), format)?);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DecodedLine<'a> {
    input: &'a str,
    keys: Vec<KeyCombination>,
}

fn run_keys(args: KeysArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;
    let tokenizer = KeyTokenizer::from_config(&config.keys).map_err(|err| err.to_string())?;

    let mut decoded = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let keys = tokenizer
            .tokenize(line)
            .map_err(|err| format!("Failed to decode '{line}': {err}"))?;
        decoded.push(DecodedLine { input: line, keys });
    }
    debug!(lines = decoded.len(), "Decoded key notation");

    match args.format {
        KeysFormat::Json => {
            let json = serde_json::to_string_pretty(&decoded)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        KeysFormat::Text => {
            for line in &decoded {
                let keys: Vec<String> = line.keys.iter().map(ToString::to_string).collect();
                println!("{}\t{}", line.input, keys.join(" "));
            }
        }
    }
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let yaml = config.to_yaml().map_err(|err| err.to_string())?;
    print!("{yaml}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<IndexConfig, String> {
    match path {
        Some(path) => IndexConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => IndexConfig::default()
            .validated()
            .map_err(|err| err.to_string()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("Failed to read stdin: {err}"))?;
            Ok(text)
        }
    }
}
