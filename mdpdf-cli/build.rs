use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs; build scripts can't reach src/ modules.
fn build_cli() -> Command {
    Command::new("mdpdf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pandoc JSON filter preparing markdown documents for PDF output")
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

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "mdpdf", &outdir)?;
    generate_to(Zsh, &mut cmd, "mdpdf", &outdir)?;
    generate_to(Fish, &mut cmd, "mdpdf", &outdir)?;

    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
