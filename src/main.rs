// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! numerus - Roman-numeral tagged templates
//!
//! This is the main entry point for the numerus CLI/REPL.
//!
//! ## Features
//!
//! - Render a template given on the command line, from a file or from stdin
//! - Convert single numbers to numerals and back
//! - Interactive REPL with highlighting and history

mod config;
mod repl;

use clap::Parser;
use config::{Config, Overrides};
use numerus_core::{RenderOptions, Substitution, SubstitutionPolicy, VERSION};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "numerus",
    about = "Render Roman-numeral tagged templates",
    version = VERSION,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Template to render, e.g. 'I have ${2} cats.' or 'roman`${1994}`'
    template: Option<String>,

    /// Print the Roman numeral for a number
    #[arg(short = 'n', long = "number", conflicts_with_all = ["template", "parse", "file"])]
    number: Option<String>,

    /// Print the value of a Roman numeral
    #[arg(short = 'p', long = "parse", conflicts_with_all = ["template", "file"])]
    parse: Option<String>,

    /// Render every line of a file
    #[arg(short = 'f', long = "file", conflicts_with = "template")]
    file: Option<PathBuf>,

    /// Start interactive REPL
    #[arg(short = 'i', long = "interactive", alias = "repl")]
    interactive: bool,

    /// What to do with a value that is not a number: fail-closed or sentinel
    #[arg(long, env = "NUMERUS_POLICY")]
    policy: Option<SubstitutionPolicy>,

    /// Marker spliced in for bad values under the sentinel policy
    #[arg(long, env = "NUMERUS_SENTINEL")]
    sentinel: Option<String>,

    /// Largest value that will be converted
    #[arg(long, env = "NUMERUS_MAX_VALUE")]
    max_value: Option<u64>,

    /// Config file (defaults to ./numerus.toml, then the user config dir)
    #[arg(short = 'c', long, env = "NUMERUS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "numerus=debug,numerus_core=debug"
    } else {
        "numerus=warn,numerus_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(Overrides {
        policy: cli.policy,
        sentinel: cli.sentinel.clone(),
        max_value: cli.max_value,
    });
    tracing::debug!(?config, "effective configuration");

    let options = &config.render;

    let code = if let Some(number) = &cli.number {
        run_number(number, options)
    } else if let Some(numeral) = &cli.parse {
        run_parse(numeral)
    } else if let Some(path) = &cli.file {
        run_file(path, options)
    } else if let Some(template) = &cli.template {
        run_template(template, options)
    } else if cli.interactive || atty::is(atty::Stream::Stdin) {
        run_repl(&config)
    } else {
        // Read from stdin
        let mut text = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut text)?;
        print_lines(&text, options)
    };

    Ok(code)
}

/// Start the interactive REPL
fn run_repl(config: &Config) -> ExitCode {
    match repl::Repl::new(config) {
        Ok(mut repl) => {
            if let Err(e) = repl.run() {
                eprintln!("{}: {:?}", "REPL Error".red().bold(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to initialize REPL: {:?}",
                "Error".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn run_number(number: &str, options: &RenderOptions) -> ExitCode {
    match options.convert(&Substitution::from(number)) {
        Ok(numeral) => {
            println!("{}", numeral);
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn run_parse(numeral: &str) -> ExitCode {
    match numerus_core::from_roman(numeral) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn run_template(template: &str, options: &RenderOptions) -> ExitCode {
    match numerus_core::render(template, options) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

/// Render a file, one template per line.
fn run_file(path: &Path, options: &RenderOptions) -> ExitCode {
    match std::fs::read_to_string(path) {
        Ok(text) => print_lines(&text, options),
        Err(e) => {
            eprintln!(
                "{}: cannot read '{}': {}",
                "Error".red().bold(),
                path.display().cyan(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn print_lines(text: &str, options: &RenderOptions) -> ExitCode {
    let mut failed = false;
    for result in numerus_core::render_lines(text, options) {
        match result {
            Ok(line) => println!("{}", line),
            Err(e) => {
                failed = true;
                eprintln!("{}: {}", "Error".red().bold(), e);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report(e: numerus_core::Error) -> ExitCode {
    eprintln!("{}: {}", "Error".red().bold(), e);
    ExitCode::FAILURE
}
