//! Parser options.

use esparse_ast::SourceType;
use serde::Deserialize;

/// Options recognized by [`crate::parse`].
///
/// Deserializes from the camelCase JSON object used by ESTree tooling, e.g.
/// `{"sourceType": "module", "next": true, "loc": true}`. Missing fields take
/// their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Goal symbol: script, module or CommonJS.
    pub source_type: SourceType,
    /// Parse the whole source as strict mode code (impliedStrict).
    #[serde(alias = "impliedStrict")]
    pub strict: bool,
    /// Enable the Annex B web compatibility grammar.
    pub webcompat: bool,
    /// Enable staged syntax: optional chaining, numeric separators, class
    /// static blocks, private methods and `import.meta`.
    pub next: bool,
    /// Report redeclarations between `var`, `let`, `const`, `class` and
    /// `function` bindings.
    pub lexical: bool,
    /// Emit `start`/`end` offsets on every node.
    pub ranges: bool,
    /// Emit `loc` on every node.
    pub loc: bool,
    /// Emit `raw` on literals.
    pub raw: bool,
    /// Allow `return` at the top level.
    pub global_return: bool,
    /// Emit `directive` on directive prologue statements.
    pub directives: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module() -> Self {
        Self::default().with_source_type(SourceType::Module)
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_webcompat(mut self, webcompat: bool) -> Self {
        self.webcompat = webcompat;
        self
    }

    pub fn with_next(mut self, next: bool) -> Self {
        self.next = next;
        self
    }

    pub fn with_lexical(mut self, lexical: bool) -> Self {
        self.lexical = lexical;
        self
    }

    pub fn with_ranges(mut self, ranges: bool) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_loc(mut self, loc: bool) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_global_return(mut self, global_return: bool) -> Self {
        self.global_return = global_return;
        self
    }

    pub fn with_directives(mut self, directives: bool) -> Self {
        self.directives = directives;
        self
    }

    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }

    /// Resolve implied options: modules are strict, CommonJS allows a
    /// top-level `return`.
    pub fn normalized(mut self) -> Self {
        match self.source_type {
            SourceType::Module => self.strict = true,
            SourceType::CommonJs => self.global_return = true,
            SourceType::Script => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"sourceType": "module", "next": true, "globalReturn": true}"#).unwrap();
        assert_eq!(options.source_type, SourceType::Module);
        assert!(options.next);
        assert!(options.global_return);
        assert!(!options.loc);
    }

    #[test]
    fn test_implied_strict_alias() {
        let options: ParseOptions = serde_json::from_str(r#"{"impliedStrict": true}"#).unwrap();
        assert!(options.strict);
    }

    #[test]
    fn test_normalization() {
        let module = ParseOptions::module().normalized();
        assert!(module.strict);
        let commonjs = ParseOptions::new().with_source_type(SourceType::CommonJs).normalized();
        assert!(commonjs.global_return);
        assert!(!commonjs.strict);
    }
}
