//! esparse_tests: conformance corpus runner.
//!
//! A suite is a list of `(source, options)` cases, each expected to parse or
//! to be rejected (optionally with a specific [`ErrorKind`]). Results are
//! grouped by category so a summary table shows where regressions are.

use bumpalo::Bump;
use esparse_diagnostics::ErrorKind;
use esparse_parser::{parse, ParseOptions};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// What a case expects from the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Pass,
    /// Rejected; `Some(kind)` also pins the error kind.
    Fail(Option<ErrorKind>),
}

/// Outcome of one conformance case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub category: String,
    pub source: String,
    pub passed: bool,
    /// Why the case failed.
    pub detail: Option<String>,
}

/// Per-category pass counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub passed: usize,
    pub total: usize,
}

impl CategoryTotals {
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Run a single case. A parser panic counts as a failed case.
pub fn run_case(name: &str, category: &str, source: &str, options: &ParseOptions, expect: Expectation) -> CaseResult {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let arena = Bump::new();
        parse(&arena, source, options).map(|_| ())
    }));

    let detail = match (outcome, expect) {
        (Err(panic), _) => Some(format!("parser panicked: {}", panic_message(&*panic))),
        (Ok(Ok(())), Expectation::Pass) => None,
        (Ok(Err(error)), Expectation::Pass) => Some(format!("unexpected {}: {}", error.kind, error)),
        (Ok(Ok(())), Expectation::Fail(_)) => Some("expected a syntax error, got a tree".to_string()),
        (Ok(Err(error)), Expectation::Fail(Some(kind))) if error.kind != kind => {
            Some(format!("expected {}, got {}: {}", kind, error.kind, error))
        }
        (Ok(Err(_)), Expectation::Fail(_)) => None,
    };

    CaseResult {
        name: name.to_string(),
        category: category.to_string(),
        source: source.to_string(),
        passed: detail.is_none(),
        detail,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// Collects case results and renders the summary table.
#[derive(Debug, Default)]
pub struct ConformanceSuite {
    results: Vec<CaseResult>,
}

impl ConformanceSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass(&mut self, name: &str, category: &str, source: &str, options: ParseOptions) {
        self.results.push(run_case(name, category, source, &options, Expectation::Pass));
    }

    pub fn fail(&mut self, name: &str, category: &str, source: &str, options: ParseOptions) {
        self.results.push(run_case(name, category, source, &options, Expectation::Fail(None)));
    }

    pub fn fail_with(&mut self, name: &str, category: &str, source: &str, options: ParseOptions, kind: ErrorKind) {
        self.results.push(run_case(name, category, source, &options, Expectation::Fail(Some(kind))));
    }

    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn totals(&self) -> CategoryTotals {
        CategoryTotals {
            passed: self.results.iter().filter(|r| r.passed).count(),
            total: self.results.len(),
        }
    }

    pub fn by_category(&self) -> BTreeMap<&str, CategoryTotals> {
        let mut categories: BTreeMap<&str, CategoryTotals> = BTreeMap::new();
        for result in &self.results {
            let entry = categories.entry(result.category.as_str()).or_default();
            entry.total += 1;
            if result.passed {
                entry.passed += 1;
            }
        }
        categories
    }

    /// Render the totals, the per-category table and up to `max_failures` failures.
    pub fn summary(&self, max_failures: usize) -> String {
        let totals = self.totals();
        let mut out = String::new();
        let _ = writeln!(out, "=== Conformance Summary ===");
        let _ = writeln!(out, "Total: {}  Passed: {}  Failed: {}", totals.total, totals.passed, totals.total - totals.passed);
        let _ = writeln!(out, "Pass rate: {:.2}%", totals.pass_rate());

        let _ = writeln!(out, "\n--- Results by Category ---");
        for (category, counts) in self.by_category() {
            let _ = writeln!(out, "  {:<14} {:>4}/{:<4} ({:.2}%)", category, counts.passed, counts.total, counts.pass_rate());
        }

        let failures: Vec<&CaseResult> = self.failures().collect();
        if !failures.is_empty() {
            let _ = writeln!(out, "\n--- Failed Cases ---");
            for failure in failures.iter().take(max_failures) {
                let _ = writeln!(
                    out,
                    "  [{}] {} {:?}: {}",
                    failure.category,
                    failure.name,
                    failure.source,
                    failure.detail.as_deref().unwrap_or("unknown")
                );
            }
            if failures.len() > max_failures {
                let _ = writeln!(out, "  ... and {} more", failures.len() - max_failures);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectations_are_checked() {
        let options = ParseOptions::default();
        assert!(run_case("ok", "c", "a + b;", &options, Expectation::Pass).passed);
        assert!(!run_case("ok", "c", "a +;", &options, Expectation::Pass).passed);
        assert!(run_case("bad", "c", "a +;", &options, Expectation::Fail(None)).passed);
        assert!(!run_case("bad", "c", "a + b;", &options, Expectation::Fail(None)).passed);
    }

    #[test]
    fn test_error_kind_is_pinned() {
        let options = ParseOptions::default();
        let wrong = run_case("k", "c", "a +;", &options, Expectation::Fail(Some(ErrorKind::StrictMode)));
        assert!(!wrong.passed);
        assert!(wrong.detail.unwrap_or_default().starts_with("expected StrictModeError"));
        let right = run_case("k", "c", "a +;", &options, Expectation::Fail(Some(ErrorKind::UnexpectedToken)));
        assert!(right.passed);
    }

    #[test]
    fn test_summary_groups_categories() {
        let mut suite = ConformanceSuite::new();
        suite.pass("one", "alpha", "1;", ParseOptions::default());
        suite.pass("two", "alpha", "(;", ParseOptions::default());
        suite.fail("three", "beta", "(;", ParseOptions::default());

        let categories = suite.by_category();
        assert_eq!(categories["alpha"], CategoryTotals { passed: 1, total: 2 });
        assert_eq!(categories["beta"], CategoryTotals { passed: 1, total: 1 });
        assert_eq!(suite.failures().count(), 1);

        let summary = suite.summary(10);
        assert!(summary.contains("Total: 3  Passed: 2  Failed: 1"));
        assert!(summary.contains("[alpha] two"));
    }
}
