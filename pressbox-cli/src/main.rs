//! Command-line interface for pressbox
//! Renders stored article bodies and reports on them.
//!
//! Usage:
//!   pressbox html `<path>`                          - Serialize a document tree to HTML
//!   pressbox text `<path>` [--max-length `<n>`]       - Plain text, optionally truncated
//!   pressbox excerpt `<path>` [--max-length `<n>`]    - Smart excerpt
//!   pressbox analyze `<path>` [--format json|yaml]  - Structural analysis
//!   pressbox read-time `<path>` [--range]           - Reading-time estimate
//!   pressbox seo `<path>`                           - Meta description, keywords, reading time
//!
//! Every command accepts `--config <file>` to layer a TOML file over the built-in defaults.

mod commands;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use commands::{CommandOptions, RECORD_FORMATS};
use pressbox_config::{Loader, PressboxConfig};
use std::path::Path;

const CONTENT_TYPES: &[&str] = &["general", "news", "sports", "technical"];

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("pressbox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and analyze rich-text article bodies")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(with_input(
            Command::new("html").about("Serialize a document tree to an HTML fragment"),
        ))
        .subcommand(with_input(
            Command::new("text")
                .about("Extract plain text")
                .arg(max_length_arg()),
        ))
        .subcommand(with_input(
            Command::new("excerpt")
                .about("Build a smart excerpt from the article's prose")
                .arg(max_length_arg()),
        ))
        .subcommand(with_input(
            Command::new("analyze")
                .about("Count structural elements and classify complexity")
                .arg(format_arg()),
        ))
        .subcommand(with_input(
            Command::new("read-time")
                .about("Estimate reading time")
                .arg(format_arg())
                .arg(
                    Arg::new("content-type")
                        .long("content-type")
                        .short('t')
                        .value_parser(CONTENT_TYPES.to_vec())
                        .help("Reading-rate policy"),
                )
                .arg(
                    Arg::new("wpm")
                        .long("wpm")
                        .value_parser(clap::value_parser!(u32))
                        .help("Words per minute before the content-type multiplier"),
                )
                .arg(
                    Arg::new("no-media")
                        .long("no-media")
                        .action(ArgAction::SetTrue)
                        .help("Ignore images, video, tables and other media"),
                )
                .arg(
                    Arg::new("range")
                        .long("range")
                        .action(ArgAction::SetTrue)
                        .help("Report fast, average and slow estimates"),
                ),
        ))
        .subcommand(with_input(
            Command::new("seo")
                .about("Generate a meta description and keywords")
                .arg(format_arg())
                .arg(max_length_arg()),
        ))
}

fn with_input(command: Command) -> Command {
    command.arg(
        Arg::new("path")
            .help("Path to the article (.json record or tree, or .html)")
            .required(true)
            .index(1),
    )
}

fn max_length_arg() -> Arg {
    Arg::new("max-length")
        .long("max-length")
        .short('m')
        .value_parser(clap::value_parser!(usize))
        .help("Maximum length in characters")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .value_parser(RECORD_FORMATS.to_vec())
        .default_value("json")
        .help("Output format")
}

fn run(matches: &ArgMatches) -> Result<()> {
    let (command, sub_matches) = matches
        .subcommand()
        .context("a subcommand is required")?;

    let config_path = sub_matches
        .get_one::<String>("config")
        .or_else(|| matches.get_one::<String>("config"));
    let config = load_config(config_path, sub_matches)?;
    let path = sub_matches
        .get_one::<String>("path")
        .context("path is required")?;
    let input = commands::load_input(Path::new(path))?;

    let options = CommandOptions {
        max_length: flag_value::<usize>(sub_matches, "max-length"),
        format: flag_value::<String>(sub_matches, "format").unwrap_or_else(|| "json".to_string()),
        range: has_flag(sub_matches, "range"),
    };

    let output = commands::execute(command, &input, &config, &options)?;
    println!("{output}");
    Ok(())
}

/// Defaults, then the `--config` file, then read-time flags.
fn load_config(path: Option<&String>, sub_matches: &ArgMatches) -> Result<PressboxConfig> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(content_type) = flag_value::<String>(sub_matches, "content-type") {
        loader = loader.set_override("read_time.content_type", content_type)?;
    }
    if let Some(wpm) = flag_value::<u32>(sub_matches, "wpm") {
        loader = loader.set_override("read_time.words_per_minute", i64::from(wpm))?;
    }
    if has_flag(sub_matches, "no-media") {
        loader = loader.set_override("read_time.include_media", false)?;
    }
    loader.build().context("Failed to load configuration")
}

/// The value of an argument the subcommand may not define at all
fn flag_value<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}

fn has_flag(matches: &ArgMatches, id: &str) -> bool {
    matches.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}
