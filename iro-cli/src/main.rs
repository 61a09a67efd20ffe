//! Command-line interface for iro
//! This binary compiles stored iro grammar models (JSON or YAML) into editor grammars.
//!
//! Usage:
//!   iro compile `<path>` [--target `<target>`] [--output `<file>`]  - Compile a grammar
//!   iro targets                                                   - List available targets
//!
//! Every command accepts `--config <file>` to layer a configuration file over the defaults.

use clap::{value_parser, Arg, ArgMatches, Command};
use iro_config::{IroConfig, Loader};
use iro_grammar::GrammarLoader;
use iro_targets::{LogSink, TargetRegistry, TextmateTarget};
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("iro")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile iro grammars into editor syntax highlighting grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a grammar model")
                .arg(
                    Arg::new("path")
                        .help("Path to the grammar model (.json, .yaml or .yml)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Compile target (default from configuration: compile.target)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the result to this file instead of stdout"),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .value_parser(value_parser!(u32))
                        .help("Spaces per nesting level in the generated file"),
                ),
        )
        .subcommand(Command::new("targets").about("List available compile targets"))
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });
    init_logging(&config);

    match matches.subcommand() {
        Some(("compile", sub)) => handle_compile_command(sub, &config),
        Some(("targets", _)) => handle_targets_command(&config),
        _ => unreachable!("a subcommand is required"),
    }
}

fn load_config(matches: &ArgMatches) -> Result<IroConfig, iro_config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(("compile", sub)) = matches.subcommand() {
        if let Some(indent) = sub.get_one::<u32>("indent") {
            loader = loader.set_override("textmate.indent_width", *indent as i64)?;
        }
    }
    loader.build()
}

fn init_logging(config: &IroConfig) {
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    if let Err(e) = env_logger::try_init_from_env(env) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn registry(config: &IroConfig) -> TargetRegistry {
    let mut registry = TargetRegistry::new();
    registry.register(TextmateTarget::with_options(config.textmate.to_options()));
    registry
}

/// Handle the compile command
fn handle_compile_command(matches: &ArgMatches, config: &IroConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let target = matches
        .get_one::<String>("target")
        .unwrap_or(&config.compile.target);

    let grammar = GrammarLoader::from_path(path)
        .and_then(|loader| loader.load())
        .unwrap_or_else(|e| {
            eprintln!("Failed to load grammar '{}': {}", path, e);
            process::exit(1);
        });
    log::info!("loaded grammar '{}' from {}", grammar.name, path);

    // The sink has already reported the failure.
    let result = registry(config)
        .compile(&grammar, target, &mut LogSink)
        .unwrap_or_else(|_| process::exit(1));

    match matches.get_one::<String>("output") {
        Some(output) => {
            if let Err(e) = fs::write(output, &result.generated) {
                eprintln!("Failed to write '{}': {}", output, e);
                process::exit(1);
            }
            log::info!("wrote {} grammar to {}", result.target, output);
        }
        None => print!("{}", result.generated),
    }
}

/// Handle the targets command
fn handle_targets_command(config: &IroConfig) {
    let registry = registry(config);
    println!("Available compile targets:\n");

    for name in registry.list_targets() {
        if let Ok(target) = registry.get(&name) {
            println!("  {} (.{})", target.name(), target.file_extension());
            println!("    {}", target.description());
            println!();
        }
    }
}
