//! vcxproj-rs - translate Visual Studio solutions and projects into CMake
//!
//! # Usage
//!
//! ```bash
//! # Print CMake declarations for every C++ project of a solution
//! vcxproj-rs All.sln
//!
//! # Several inputs, written to a file, macros left as-is
//! vcxproj-rs -M -o targets.cmake core/core.vcxproj app/app.vcxproj
//!
//! # Read arguments (one per line) from a response file
//! vcxproj-rs @inputs.txt
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;

use vcxproj_rs::logging;
use vcxproj_rs::{Config, Program};

#[derive(Parser, Debug)]
#[command(name = "vcxproj-rs", version, about = "Translate .sln/.vcxproj files into CMake target declarations")]
struct Cli {
    /// Destination where generated CMake will be stored ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Expand VS macros in properties (default)
    // Never read: expansion is on unless -M is given.  The field exists so
    // that -m is accepted and rejected alongside -M.
    #[arg(short = 'm', long, conflicts_with = "no_expand_macros")]
    expand_macros: bool,

    /// Do not expand VS macros in properties
    #[arg(short = 'M', long)]
    no_expand_macros: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// .sln or .vcxproj file(s) to process
    input: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config { expand_macros: !self.no_expand_macros }
    }
}

/// Replace every `@file` argument by the lines of `file`, one argument per
/// line.  Response files may reference further response files.
fn expand_response_files(args: impl IntoIterator<Item = OsString>) -> io::Result<Vec<OsString>> {
    let mut expanded = Vec::new();
    for arg in args {
        match arg.to_str().and_then(|s| s.strip_prefix('@')) {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| io::Error::new(e.kind(), format!("{path}: {e}")))?;
                let nested = content.lines().map(OsString::from);
                expanded.extend(expand_response_files(nested)?);
            }
            None => expanded.push(arg),
        }
    }
    Ok(expanded)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let program = Program::new(&cli.input, cli.config());

    if cli.output == Path::new("-") {
        let stdout = io::stdout();
        program.run(&mut stdout.lock())?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("cannot create {}", cli.output.display()))?;
        program.run(&mut BufWriter::new(file))?;
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    let argv0 = args.next().unwrap_or_else(|| "vcxproj-rs".into());
    let args = match expand_response_files(args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let cli = Cli::parse_from(std::iter::once(argv0).chain(args));
    logging::init_with_level(logging::level_for_verbosity(cli.verbose));

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
