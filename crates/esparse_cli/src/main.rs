//! esparse: parse ECMAScript files and print their ESTree JSON.
//!
//! Usage:
//!   esparse [options] <file...>
//!
//! Each file is parsed on the rayon pool with its own arena. Successful
//! parses print the ESTree JSON to stdout; the first syntax error of a file
//! is rendered to stderr with the offending source line.

mod report;
mod tracing_config;

use bumpalo::Bump;
use clap::{Parser as ClapParser, ValueEnum};
use esparse_ast::SourceType;
use esparse_parser::{parse, ParseOptions};
use rayon::prelude::*;
use report::SyntaxReport;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "esparse", about = "esparse - An ECMAScript parser producing ESTree JSON", version)]
struct Cli {
    /// JavaScript files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// JSON file with parser options, e.g. {"sourceType": "module", "next": true}.
    /// Flags given on the command line override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Goal symbol to parse with.
    #[arg(long = "source-type", value_enum)]
    source_type: Option<SourceTypeArg>,

    /// Shorthand for --source-type module.
    #[arg(short = 'm', long, conflicts_with = "source_type")]
    module: bool,

    /// Parse everything as strict mode code.
    #[arg(long)]
    strict: bool,

    /// Enable the Annex B web compatibility grammar.
    #[arg(long)]
    webcompat: bool,

    /// Enable staged syntax (optional chaining, numeric separators, static blocks, ...).
    #[arg(long)]
    next: bool,

    /// Report redeclared bindings.
    #[arg(long)]
    lexical: bool,

    /// Emit start/end offsets on nodes.
    #[arg(long)]
    ranges: bool,

    /// Emit line/column locations on nodes.
    #[arg(long)]
    loc: bool,

    /// Emit raw source text on literals.
    #[arg(long)]
    raw: bool,

    /// Allow return at the top level.
    #[arg(long = "global-return")]
    global_return: bool,

    /// Emit the directive field on prologue statements.
    #[arg(long)]
    directives: bool,

    /// Only check syntax; print nothing for files that parse.
    #[arg(short = 'c', long)]
    check: bool,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceTypeArg {
    Script,
    Module,
    Commonjs,
}

impl From<SourceTypeArg> for SourceType {
    fn from(arg: SourceTypeArg) -> Self {
        match arg {
            SourceTypeArg::Script => SourceType::Script,
            SourceTypeArg::Module => SourceType::Module,
            SourceTypeArg::Commonjs => SourceType::CommonJs,
        }
    }
}

/// Errors that stop a file before it reaches the parser.
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not valid UTF-8")]
    Utf8 { path: String },
    #[error("invalid config '{path}': {message}")]
    Config { path: String, message: String },
}

/// What happened to one input file.
enum Outcome {
    Parsed { path: String, json: Option<String> },
    Syntax(Box<SyntaxReport>),
    Input(InputError),
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    tracing_config::init_tracing();
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();

    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(err) => {
            print_error(&err.to_string());
            return 1;
        }
    };
    tracing::debug!(?options, files = cli.files.len(), "resolved options");

    let outcomes: Vec<Outcome> = cli
        .files
        .par_iter()
        .map(|path| parse_file(path, &options, cli))
        .collect();

    let mut syntax_errors = 0usize;
    let mut input_errors = 0usize;
    for outcome in outcomes {
        match outcome {
            Outcome::Parsed { path, json } => match json {
                Some(json) => println!("{}", json),
                None => tracing::info!(%path, "ok"),
            },
            Outcome::Syntax(report) => {
                syntax_errors += 1;
                eprintln!("{:?}", miette::Report::new(*report));
            }
            Outcome::Input(err) => {
                input_errors += 1;
                print_error(&err.to_string());
            }
        }
    }

    let use_color = std::io::stderr().is_terminal();
    let elapsed = start.elapsed();
    if syntax_errors > 0 {
        let plural = if syntax_errors == 1 { "" } else { "s" };
        if use_color {
            eprintln!("\n{}Found {} syntax error{}.{}", RED, syntax_errors, plural, RESET);
        } else {
            eprintln!("\nFound {} syntax error{}.", syntax_errors, plural);
        }
        return 2;
    }
    if input_errors > 0 {
        return 1;
    }

    if cli.check {
        let plural = if cli.files.len() == 1 { "" } else { "s" };
        if use_color {
            eprintln!("{}Parsed {} file{} in {:.2}s.{}", GREEN, cli.files.len(), plural, elapsed.as_secs_f64(), RESET);
        } else {
            eprintln!("Parsed {} file{} in {:.2}s.", cli.files.len(), plural, elapsed.as_secs_f64());
        }
    }
    0
}

/// Start from the config file (if any) and let command line flags override it.
fn resolve_options(cli: &Cli) -> Result<ParseOptions, InputError> {
    let mut options = match cli.config {
        Some(ref path) => load_config(path)?,
        None => ParseOptions::default(),
    };

    if let Some(source_type) = cli.source_type {
        options.source_type = source_type.into();
    }
    if cli.module { options.source_type = SourceType::Module; }
    if cli.strict { options.strict = true; }
    if cli.webcompat { options.webcompat = true; }
    if cli.next { options.next = true; }
    if cli.lexical { options.lexical = true; }
    if cli.ranges { options.ranges = true; }
    if cli.loc { options.loc = true; }
    if cli.raw { options.raw = true; }
    if cli.global_return { options.global_return = true; }
    if cli.directives { options.directives = true; }

    Ok(options)
}

fn load_config(path: &Path) -> Result<ParseOptions, InputError> {
    let display = path.display().to_string();
    let text = read_source(path)?;
    serde_json::from_str(&text).map_err(|e| InputError::Config {
        path: display,
        message: e.to_string(),
    })
}

fn read_source(path: &Path) -> Result<String, InputError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: display.clone(),
        source,
    })?;
    simdutf8::basic::from_utf8(&bytes)
        .map(str::to_owned)
        .map_err(|_| InputError::Utf8 { path: display })
}

fn parse_file(path: &Path, options: &ParseOptions, cli: &Cli) -> Outcome {
    let display = path.display().to_string();
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => return Outcome::Input(err),
    };

    let arena = Bump::new();
    let program = match parse(&arena, &source, options) {
        Ok(program) => program,
        Err(error) => {
            let path_for_log = display.as_str();
            tracing::debug!(path = %path_for_log, kind = %error.kind, "syntax error");
            return Outcome::Syntax(Box::new(SyntaxReport::new(&display, source.clone(), error)));
        }
    };

    if cli.check {
        return Outcome::Parsed { path: display, json: None };
    }

    let json = if cli.compact {
        serde_json::to_string(&program)
    } else {
        serde_json::to_string_pretty(&program)
    };
    match json {
        Ok(json) => Outcome::Parsed { path: display, json: Some(json) },
        Err(e) => Outcome::Input(InputError::Config {
            path: display,
            message: format!("cannot serialize AST: {}", e),
        }),
    }
}

fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}
