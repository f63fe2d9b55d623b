//! Command-line interface for dtdbind
//! Reads a DTD grammar and prints (or writes) typed XML bindings for its elements.
//!
//! Usage:
//!   dtdbind --input `<dtd>` [--output `<file>`] [--package `<name>`] [--target `<target>`]
//!   dtdbind --list-targets                       - List the available output targets
//!
//! Generated code is the only thing written to stdout. Progress and diagnostics go to stderr
//! through `tracing`, so the output can be piped straight into a file.

use clap::{Arg, ArgAction, ArgMatches, Command};
use dtdbind_codegen::{generate, CodegenError, EmitterRegistry};
use dtdbind_config::{ConfigError, DtdbindConfig, Loader};
use dtdbind_parser::{DtdParser, ParseError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn build_cli() -> Command {
    Command::new("dtdbind")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate typed XML bindings from a DTD grammar")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Path to the DTD file to parse")
                .required_unless_present("list-targets"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Path of the generated file (default: stdout)"),
        )
        .arg(
            Arg::new("package")
                .long("package")
                .short('p')
                .help("Package or module name for the generated code (default: main)"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Output target, see --list-targets (default: rust)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("list-targets")
                .long("list-targets")
                .help("List available output targets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more detail to stderr (repeatable)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(&matches);

    if matches.get_flag("list-targets") {
        handle_list_targets_command();
        return ExitCode::SUCCESS;
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, raised by `-v` and lowered by `-q`.
fn init_tracing(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        "warn"
    } else {
        match matches.get_count("verbose") {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<DtdbindConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(package) = matches.get_one::<String>("package") {
        loader = loader.set_override("output.package", package.as_str())?;
    }
    if let Some(target) = matches.get_one::<String>("target") {
        loader = loader.set_override("output.target", target.as_str())?;
    }
    loader.build()
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let options = load_config(matches)?.generate_options();
    debug!(?options, "Resolved options");

    // Reject unknown targets before doing any work
    EmitterRegistry::default().get(&options.target)?;

    let Some(input) = matches.get_one::<String>("input") else {
        return Ok(());
    };

    info!("Parsing DTD file: {}", input);
    let result = DtdParser::new().parse_file(input)?;

    if result.is_empty() {
        warn!("No elements found in DTD file");
        return Ok(());
    }

    info!("Found {} elements in DTD file", result.len());
    for name in &result.order {
        info!("  - {}", name);
    }

    let code = generate(&result, &options)?;

    match matches.get_one::<String>("output") {
        Some(output) => {
            write_output(Path::new(output), &code)?;
            info!("Generated {} code written to: {}", options.target, output);
        }
        None => print!("{}", code),
    }

    Ok(())
}

/// Write `content` to `path`, creating missing parent directories.
fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    let write_error = |source: io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

/// Handle the list-targets command
fn handle_list_targets_command() {
    let registry = EmitterRegistry::default();
    println!("Available targets:\n");

    for name in registry.list() {
        if let Ok(emitter) = registry.get(&name) {
            println!("  {} (.{})", name, emitter.file_extension());
            println!("    {}", emitter.description());
            println!();
        }
    }
}
