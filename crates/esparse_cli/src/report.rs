//! Rendering of parse failures as `miette` reports.

use esparse_diagnostics::ParseError;
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use std::fmt;

/// A [`ParseError`] bundled with the file it came from.
#[derive(Debug, thiserror::Error)]
#[error("{}", .error.message)]
pub struct SyntaxReport {
    error: ParseError,
    source_code: NamedSource<String>,
}

impl SyntaxReport {
    pub fn new(path: &str, source: String, error: ParseError) -> Self {
        Self {
            error,
            source_code: NamedSource::new(path, source),
        }
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }
}

impl Diagnostic for SyntaxReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("{}({})", self.error.kind, self.error.code)))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.error.span;
        let len = span.end.saturating_sub(span.start) as usize;
        let label = LabeledSpan::new_with_span(
            Some(format!("line {}, column {}", self.error.line, self.error.column)),
            SourceSpan::new((span.start as usize).into(), len),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use esparse_diagnostics::ErrorKind;
    use esparse_parser::{parse, ParseOptions};

    fn report_for(source: &str) -> SyntaxReport {
        let arena = Bump::new();
        let error = match parse(&arena, source, &ParseOptions::default()) {
            Ok(_) => panic!("expected {:?} to fail", source),
            Err(error) => error,
        };
        SyntaxReport::new("input.js", source.to_string(), error)
    }

    #[test]
    fn test_report_code_names_kind_and_number() {
        let report = report_for("let x = ;");
        assert_eq!(report.error().kind, ErrorKind::UnexpectedToken);
        let code = report.code().map(|c| c.to_string()).unwrap_or_default();
        assert!(code.starts_with("UnexpectedTokenError("), "code: {}", code);
    }

    #[test]
    fn test_report_label_points_at_offending_token() {
        let report = report_for("a\n  )");
        let labels: Vec<LabeledSpan> = report.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].label(), Some("line 2, column 2"));
    }
}
