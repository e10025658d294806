#![forbid(unsafe_code)]

mod cmd;
mod output;
mod render;
mod tokenize;

use std::env;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kanjideck: prerequisite-ordered kanji study decks",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format [default: pretty on a terminal, text otherwise].
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build a study deck from Japanese text",
        long_about = "Tokenize SOURCE, decompose every word into kanji and radicals through the \
                      catalog, and print one card per item with prerequisites first.",
        after_help = "EXAMPLES:\n    # Riffled deck from a text, catalog from .kanjideck/config.toml\n    kd build chapter1.txt\n\n    # Whole tiers in order, written as JSON\n    kd build chapter1.txt --order layered --format json -o deck.json\n\n    # Word list where 形態素+解析 marks a compound\n    kd build words.txt --input words --catalog data/catalog.json"
    )]
    Build(cmd::build::BuildArgs),

    #[command(
        about = "Show what words are built from",
        long_about = "Print the dependency tree of each WORD with the number of items that must \
                      be learned before it.",
        after_help = "EXAMPLES:\n    # Prerequisites of a word\n    kd explain 人形\n\n    # A kanji rather than a word\n    kd explain 形 --kind kanji --format json"
    )]
    Explain(cmd::explain::ExplainArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash completions for the current session\n    source <(kd completions bash)"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KANJIDECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "kanjideck=debug,kd=debug,info"
        } else {
            "kanjideck=info,kd=info,warn"
        })
    });

    let format = env::var("KANJIDECK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;
    debug!(root = %project_root.display(), ?output, "starting");

    match cli.command {
        Commands::Build(ref args) => cmd::build::run_build(args, output, &project_root),
        Commands::Explain(ref args) => cmd::explain::run_explain(args, output, &project_root),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    match run(cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = render_error(output, &CliError::from(&err));
            ExitCode::FAILURE
        }
    }
}
