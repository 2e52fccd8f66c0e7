// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive REPL (Read-Eval-Print Loop) for numerus templates.

use crate::config::Config;
use numerus_core::{RenderOptions, Substitution, SubstitutionPolicy, Tag};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;

/// REPL configuration constants
const HISTORY_FILE: &str = ".numerus_history";

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Load,
    Policy,
    Roman,
    Parse,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        let rest = input.strip_prefix('.')?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let cmd = parts.next()?.to_lowercase();
        let arg = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            "policy" => Some((ReplCommand::Policy, arg)),
            "roman" | "r" => Some((ReplCommand::Roman, arg)),
            "parse" | "p" => Some((ReplCommand::Parse, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".load <file>", "Render every line of a file"),
            (".policy [name]", "Show or set the policy (fail-closed, sentinel)"),
            (".roman <n>", "Convert a number to a Roman numeral"),
            (".parse <numeral>", "Convert a Roman numeral to a number"),
        ]
    }
}

/// Helper struct for rustyline that provides completion, hints, and validation
#[derive(Default)]
struct NumerusHelper {
    /// Commands and tag names for completion
    words: Vec<String>,
}

impl NumerusHelper {
    fn new() -> Self {
        let words = ReplCommand::all_commands()
            .iter()
            .map(|&(cmd, _)| cmd.split_whitespace().next().unwrap_or(cmd))
            .chain(Tag::all_names().iter().copied())
            .map(String::from)
            .collect();

        Self { words }
    }
}

/// Start of the word under the cursor
fn word_start(line: &str) -> usize {
    line.rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
        .map(|i| i + 1)
        .unwrap_or(0)
}

impl Completer for NumerusHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(&line[..pos]);
        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for NumerusHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let word = &line[word_start(line)..];
        if word.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| w[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for NumerusHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim_start().starts_with('.') {
            return Cow::Owned(line.magenta().to_string());
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut depth = 0usize;
        let mut expr = String::new();

        while let Some(c) = chars.next() {
            if depth > 0 {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                if depth == 0 {
                    result.push_str(&expr.yellow().to_string());
                    result.push_str(&"}".cyan().to_string());
                    expr.clear();
                } else {
                    expr.push(c);
                }
                continue;
            }

            match c {
                '$' if chars.peek() == Some(&'{') => {
                    chars.next();
                    depth = 1;
                    result.push_str(&"${".cyan().to_string());
                }
                '`' => result.push_str(&"`".green().to_string()),
                '\\' => {
                    result.push(c);
                    if let Some(next) = chars.next() {
                        result.push(next);
                    }
                }
                _ => result.push(c),
            }
        }

        // Unclosed placeholder
        result.push_str(&expr);

        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for NumerusHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();

        if input.trim_start().starts_with('.') || is_complete(input) {
            return Ok(ValidationResult::Valid(None));
        }

        Ok(ValidationResult::Incomplete)
    }
}

/// Check that every backtick literal and `${` placeholder is closed
fn is_complete(input: &str) -> bool {
    let mut in_literal = false;
    let mut depth = 0usize;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if depth > 0 {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            continue;
        }

        match c {
            '\\' => {
                chars.next();
            }
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                depth = 1;
            }
            '`' => in_literal = !in_literal,
            _ => {}
        }
    }

    !in_literal && depth == 0
}

impl Helper for NumerusHelper {}

/// The result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

/// The interactive REPL for numerus templates
pub struct Repl {
    options: RenderOptions,
    editor: Editor<NumerusHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: &Config) -> rustyline::Result<Self> {
        let editor_config = rustyline::Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(config.history_size)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(NumerusHelper::new()));

        // Determine history file path
        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numerus")
            .join(HISTORY_FILE);

        // Create parent directory if it doesn't exist
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Load history
        let _ = editor.load_history(&history_path);

        Ok(Self {
            options: config.render.clone(),
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "numerus>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    // Check for REPL commands
                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    if trimmed.starts_with('.') {
                        eprintln!(
                            "{}: unknown command '{}', try {}",
                            "Error".red().bold(),
                            trimmed.cyan(),
                            ".help".cyan()
                        );
                        continue;
                    }

                    // Keep surrounding whitespace, it is part of the template
                    self.render_and_print(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        // Save history
        let _ = self.editor.save_history(&self.history_path);

        println!();
        println!("{}", "Vale!".bright_cyan());
        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!(
            "  {} {} {}",
            "numerus".white().bold(),
            "v".dimmed(),
            numerus_core::VERSION.bright_yellow()
        );
        println!(
            "  {}",
            "Roman-numeral tagged templates, e.g. I have ${2} cats.".dimmed()
        );
        println!();
        println!(
            "  {} {} {} {}",
            "Policy:".dimmed(),
            self.options.policy.cyan(),
            "| Type".dimmed(),
            ".help".cyan()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
            ReplCommand::Version => {
                println!(
                    "{} {}",
                    "numerus".bright_cyan().bold(),
                    numerus_core::VERSION.yellow()
                );
            }
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(path),
                None => missing_argument(".load", "a file path"),
            },
            ReplCommand::Policy => match arg {
                None => println!("{}", self.options.policy.cyan()),
                Some(name) => match name.parse::<SubstitutionPolicy>() {
                    Ok(policy) => {
                        self.options.policy = policy;
                        println!("{} {}", "Policy set to".dimmed(), policy.cyan());
                    }
                    Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
                },
            },
            ReplCommand::Roman => match arg {
                Some(n) => match self.options.convert(&Substitution::from(n)) {
                    Ok(numeral) => println!("{}", numeral.bright_white().bold()),
                    Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
                },
                None => missing_argument(".roman", "a number"),
            },
            ReplCommand::Parse => match arg {
                Some(numeral) => match numerus_core::from_roman(numeral) {
                    Ok(value) => println!("{}", value.yellow()),
                    Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
                },
                None => missing_argument(".parse", "a numeral"),
            },
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:18} {}", cmd.cyan(), desc.dimmed());
        }

        println!();
        println!("{}", "Templates:".white().bold());
        println!();
        println!("  {:18} {}", "I have ${2} cats.".yellow(), "Roman numerals".dimmed());
        println!("  {:18} {}", "roman`${1994}`".yellow(), "Tagged literal".dimmed());
        println!("  {:18} {}", "`${1994}`".yellow(), "Untagged, verbatim".dimmed());
        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!("  {:18} {}", "Ctrl+C".yellow(), "Cancel current input".dimmed());
        println!("  {:18} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:18} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!("  {:18} {}", "↑/↓".yellow(), "Navigate history".dimmed());
        println!();
    }

    fn render_and_print(&self, source: &str) {
        match numerus_core::render(source, &self.options) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
        }
    }

    fn load_file(&self, path: &str) {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!(
                    "{}: cannot read '{}': {}",
                    "Error".red().bold(),
                    path.cyan(),
                    e
                );
                return;
            }
        };

        for result in numerus_core::render_lines(&text, &self.options) {
            match result {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
            }
        }
    }
}

fn missing_argument(cmd: &str, what: &str) {
    eprintln!(
        "{}: {} {}",
        "Error".red().bold(),
        cmd.cyan(),
        format!("requires {}", what).dimmed()
    );
}
