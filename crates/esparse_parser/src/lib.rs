//! esparse_parser: recursive descent parser for ECMAScript.
//!
//! Drives the scanner one token at a time and builds an arena-allocated
//! ESTree AST. The first early error aborts the parse; the error carries the
//! diagnostic code, message and location.
//!
//! ```
//! use bumpalo::Bump;
//! use esparse_parser::{parse, ParseOptions};
//!
//! let arena = Bump::new();
//! let program = parse(&arena, "let x = 1;", &ParseOptions::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

mod classes;
mod context;
mod expressions;
mod functions;
mod modules;
mod options;
mod parser;
mod patterns;
mod precedence;
mod statements;
mod utilities;

pub use options::ParseOptions;
pub use parser::Parser;

use bumpalo::Bump;
use esparse_ast::Program;
use esparse_diagnostics::ParseResult;

/// Parse `source` into a [`Program`] allocated in `arena`.
pub fn parse<'a>(arena: &'a Bump, source: &'a str, options: &ParseOptions) -> ParseResult<Program<'a>> {
    tracing::debug!(len = source.len(), source_type = ?options.source_type, "parse");
    let result = Parser::new(arena, source, options).parse_program();
    match &result {
        Ok(program) => tracing::debug!(statements = program.body.len(), "parsed"),
        Err(error) => tracing::debug!(code = error.code, "parse failed"),
    }
    result
}
