// Command-line interface for mdpdf
//
// mdpdf is a pandoc JSON filter. pandoc runs it with the target format as the only argument,
// feeds the document AST on stdin and reads the rewritten AST from stdout:
//
//  pandoc doc.md --filter mdpdf -o doc.pdf
//
// The rewriting itself lives in the mdpdf-filters crate; this binary only wires config,
// logging and I/O around it. stdout carries the document, so all diagnostics go to stderr.
//
// Usage:
//  mdpdf [FORMAT]                         - Filter stdin to stdout (what pandoc calls)
//  mdpdf [FORMAT] -i doc.json -o out.json - Filter files, handy when debugging a document
//  mdpdf --list-elements                  - List known element kinds and their arity
//
// Extra Parameters:
//
// Config values can be overridden with --extra-<name> [value], see EXTRA_OVERRIDES.
// Example:
//  pandoc doc.md --filter mdpdf ... is equivalent to
//  pandoc -t json doc.md | mdpdf latex --extra-papersize letter | pandoc -f json -o doc.pdf

use clap::{Arg, ArgAction, Command, ValueHint};
use mdpdf_config::{Loader, MdpdfConfig};
use mdpdf_filters::transforms::{CodeListing, TypesetMeta};
use mdpdf_filters::{ElementKind, Pipeline};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive (e.g. `debug`).
const LOG_ENV: &str = "MDPDF_LOG";

/// `--extra-<name>` options and the config keys they override.
const EXTRA_OVERRIDES: &[(&str, &str)] = &[
    ("papersize", "meta.papersize"),
    ("geometry", "meta.geometry"),
    ("fontsize", "meta.fontsize"),
    ("cjk-mainfont", "meta.cjk_mainfont"),
    ("listings", "listings.enabled"),
    ("listing-environment", "listings.environment"),
    ("meta", "filter.inject_meta"),
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// `--extra-<key> <value>` sets a value; `--extra-<key>` alone means "true".
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        let Some(key) = arg.strip_prefix("--extra-") else {
            cleaned_args.push(arg.clone());
            continue;
        };

        let value = match iter.peek() {
            Some(next) if !next.starts_with('-') => iter.next().cloned(),
            _ => None,
        };
        extra_params.insert(key.to_string(), value.unwrap_or_else(|| "true".to_string()));
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mdpdf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pandoc JSON filter preparing markdown documents for PDF output")
        .long_about(
            "mdpdf reads a pandoc JSON document, folds code blocks that follow a paragraph\n\
            into it as LaTeX listings, replaces the metadata with page, font and preamble\n\
            options, and writes the document back out.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override a config value for one run.\n  \
            Known names: papersize, geometry, fontsize, cjk-mainfont, listings,\n  \
            listing-environment, meta.\n\n\
            Logging:\n  \
            Diagnostics go to stderr. Set MDPDF_LOG (e.g. MDPDF_LOG=debug) to change\n  \
            the level.\n\n\
            Examples:\n  \
            pandoc doc.md --filter mdpdf -o doc.pdf\n  \
            mdpdf latex -i doc.json -o filtered.json\n  \
            mdpdf latex --extra-listings false < doc.json",
        )
        .arg(
            Arg::new("format")
                .help("Target output format, as passed by pandoc")
                .index(1)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdpdf.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("PATH")
                .help("Read the document from a file instead of stdin")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Write the document to a file instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-elements")
                .long("list-elements")
                .help("List known pandoc element kinds and their arity")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    init_logging(matches.get_flag("quiet"));

    if matches.get_flag("list-elements") {
        handle_list_elements_command();
        return;
    }

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let config = load_cli_config(config_path, &extra_params).unwrap_or_else(|err| {
        error!("Failed to load configuration: {err}");
        std::process::exit(1);
    });

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("");
    let input = matches.get_one::<String>("input").map(String::as_str);
    let output = matches.get_one::<String>("output").map(String::as_str);

    handle_filter_command(format, input, output, &config);
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Handle the default command: filter one document
fn handle_filter_command(
    format: &str,
    input: Option<&str>,
    output: Option<&str>,
    config: &MdpdfConfig,
) {
    let source = read_source(input).unwrap_or_else(|err| {
        error!("Error reading input: {err}");
        std::process::exit(1);
    });

    let mut pipeline = pipeline_from_config(config);
    info!(format, actions = ?pipeline.action_names(), "filtering document");

    let filtered = pipeline.run(&source, format).unwrap_or_else(|err| {
        error!("{err}");
        std::process::exit(1);
    });

    if let Err(err) = write_output(output, &filtered) {
        error!("Error writing output: {err}");
        std::process::exit(1);
    }
}

/// Handle the list-elements command
fn handle_list_elements_command() {
    println!("Element kinds (tag, arity):\n");
    for kind in ElementKind::all() {
        println!("  {:<16} {}", kind.tag(), kind.arity());
    }
}

fn read_source(input: Option<&str>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(output: Option<&str>, document: &str) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, document),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()
        }
    }
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &HashMap<String, String>,
) -> Result<MdpdfConfig, config::ConfigError> {
    let mut loader = Loader::new().with_project_dir(".");
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }

    for (name, value) in extra_params {
        match config_key_for_extra(name) {
            Some(key) => loader = loader.set_override(key, value.as_str())?,
            None => warn!(option = %name, "ignoring unknown --extra option"),
        }
    }

    loader.build()
}

fn config_key_for_extra(name: &str) -> Option<&'static str> {
    EXTRA_OVERRIDES
        .iter()
        .find(|(extra, _)| *extra == name)
        .map(|(_, key)| *key)
}

fn pipeline_from_config(config: &MdpdfConfig) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if config.listings.enabled {
        pipeline = pipeline.with_action(CodeListing::from(&config.listings));
    }
    if config.filter.inject_meta {
        pipeline = pipeline.with_meta(TypesetMeta::from(&config.meta));
    }
    pipeline
}
