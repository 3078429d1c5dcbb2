//! ECMAScript conformance corpus.
//!
//! Whole-program snippets grouped by category. The suite prints a summary
//! table and fails if any case does not meet its expectation.

use esparse_diagnostics::ErrorKind;
use esparse_parser::ParseOptions;
use esparse_tests::ConformanceSuite;

fn script() -> ParseOptions {
    ParseOptions::default()
}

fn strict() -> ParseOptions {
    ParseOptions::default().with_strict(true)
}

fn module() -> ParseOptions {
    ParseOptions::module().with_next(true)
}

fn next() -> ParseOptions {
    ParseOptions::default().with_next(true)
}

fn webcompat() -> ParseOptions {
    ParseOptions::default().with_webcompat(true)
}

fn lexical() -> ParseOptions {
    ParseOptions::default().with_lexical(true)
}

fn finish(suite: ConformanceSuite) {
    println!("{}", suite.summary(20));
    let failures: Vec<_> = suite.failures().map(|f| f.name.clone()).collect();
    assert!(failures.is_empty(), "failing conformance cases: {:?}", failures);
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_program_conformance() {
    let mut suite = ConformanceSuite::new();

    // ========================================================================
    // Category: expressions
    // ========================================================================
    suite.pass(
        "arithmetic_and_logic",
        "expressions",
        "var total = (a + b * c) / d - e % f ** 2;\nvar ok = a && b || !c;\nvar fallback = value ?? (a || b);",
        script(),
    );
    suite.pass(
        "calls_and_members",
        "expressions",
        "console.log(a.b[c](...args), new Date().getTime(), typeof x === 'undefined');",
        script(),
    );
    suite.pass(
        "object_literal",
        "expressions",
        "var o = { a, b: 1, [key]: 2, get c() { return 3; }, set c(v) {}, m() {}, *g() {}, async h() {}, ...rest };",
        script(),
    );
    suite.pass(
        "templates_and_regex",
        "expressions",
        "var s = `sum: ${a + b} of ${`nested ${c}`}`;\nvar r = /[a-z]+\\d*/gi.exec(s);\nvar q = a / b / c;",
        script(),
    );
    suite.pass(
        "arrows",
        "expressions",
        "var add = (a, b) => a + b;\nvar id = x => x;\nvar make = () => ({ value: 1 });\nvar run = async (f, ...args) => await f(...args);",
        script(),
    );
    suite.pass(
        "optional_chaining",
        "expressions",
        "var v = obj?.a?.[key]?.(arg) ?? def;",
        next(),
    );
    suite.fail("unary_exponent", "expressions", "var v = -x ** 2;", script());
    suite.fail("mixed_nullish", "expressions", "var v = a ?? b || c;", script());
    suite.fail("optional_chain_disabled", "expressions", "var v = a?.b;", script());

    // ========================================================================
    // Category: destructuring
    // ========================================================================
    suite.pass("array_rest_assignment", "destructuring", "[a, ...b] = [1, 2, 3];", script());
    suite.pass(
        "nested_defaults",
        "destructuring",
        "const { a = 1, b: { c, d: [e, , f = 2] } = {}, ...g } = source;",
        script(),
    );
    suite.pass("parenthesized_assignment_target", "destructuring", "[(x)] = [];", script());
    suite.pass("swap", "destructuring", "[a, b] = [b, a];", script());
    suite.fail_with(
        "rest_not_last",
        "destructuring",
        "[...a, b] = v;",
        script(),
        ErrorKind::InvalidDestructuringTarget,
    );
    suite.fail("parenthesized_binding", "destructuring", "let [(x)] = [];", script());
    suite.fail("literal_target", "destructuring", "({ a: 1 } = b);", script());

    // ========================================================================
    // Category: statements
    // ========================================================================
    suite.pass(
        "control_flow",
        "statements",
        "outer: for (let i = 0; i < 10; i++) {\n  for (const j of list) {\n    if (j === i) continue outer;\n    else if (j > i) break outer;\n  }\n}\nwhile (x--) { do { y++; } while (y < x) }",
        script(),
    );
    suite.pass(
        "switch_and_try",
        "statements",
        "switch (kind) {\n  case 'a':\n  case 'b': handle(); break;\n  default: fallback();\n}\ntry { risky(); } catch ({ message }) { log(message); } finally { done(); }",
        script(),
    );
    suite.pass("asi", "statements", "var a = 1\nvar b = a\n++b\nfoo()\nreturnValue", script());
    suite.fail_with("labelled_lexical", "statements", "label: let x;", script(), ErrorKind::IllegalContext);
    suite.fail_with("break_outside_loop", "statements", "break;", script(), ErrorKind::IllegalContext);
    suite.fail("throw_newline", "statements", "throw\nerror;", script());
    suite.fail("missing_semicolon", "statements", "var a = 1 var b = 2", script());

    // ========================================================================
    // Category: functions
    // ========================================================================
    suite.pass(
        "generators_and_async",
        "functions",
        "function* range(n) { for (let i = 0; i < n; i++) yield i; }\nasync function main() { for await (const chunk of stream) { await write(chunk); } }",
        script(),
    );
    suite.pass(
        "parameters",
        "functions",
        "function f(a, [b, c] = [], { d, ...e } = {}, ...rest) { return new.target; }",
        script(),
    );
    suite.fail("yield_in_generator_params", "functions", "function* g(a = yield) {}", script());
    suite.fail("strict_after_complex_params", "functions", "function f(a = 1) { 'use strict'; }", script());
    suite.fail("top_level_return", "functions", "return 1;", script());

    // ========================================================================
    // Category: classes
    // ========================================================================
    suite.pass(
        "class_members",
        "classes",
        "class Point extends Base {\n  #x = 0;\n  static origin = new Point();\n  constructor(x) { super(); this.#x = x; }\n  get x() { return this.#x; }\n  static is(o) { return #x in o; }\n}",
        script(),
    );
    suite.pass(
        "private_methods_and_static_blocks",
        "classes",
        "class Counter {\n  #count = 0;\n  #inc() { this.#count++; }\n  static { Counter.instances = []; }\n}",
        next(),
    );
    suite.fail("duplicate_constructor", "classes", "class A { constructor() {} constructor() {} }", script());
    suite.fail("undeclared_private", "classes", "class A { m() { return this.#missing; } }", script());
    suite.fail("static_prototype", "classes", "class A { static prototype() {} }", script());

    // ========================================================================
    // Category: modules
    // ========================================================================
    suite.pass(
        "imports_and_exports",
        "modules",
        "import def, { a, b as c } from './m.js';\nimport * as ns from 'ns';\nexport const value = await load();\nexport default class {}\nexport { a as alias, c };\nexport * as all from './all.js';",
        module(),
    );
    suite.pass("import_meta", "modules", "const here = import.meta.url;", module());
    suite.fail("duplicate_export", "modules", "export var a; export var a;", module());
    suite.fail("import_in_script", "modules", "import a from 'm';", script());
    suite.fail("module_is_strict", "modules", "with (a) {}", module());

    // ========================================================================
    // Category: strict
    // ========================================================================
    suite.pass("sloppy_with_and_octal", "strict", "with (o) { x = 010; }", script());
    suite.fail_with("strict_with", "strict", "with (o) {}", strict(), ErrorKind::StrictMode);
    suite.fail_with("directive_with", "strict", "'use strict';\nwith (o) {}", script(), ErrorKind::StrictMode);
    suite.fail("strict_reserved_word", "strict", "'use strict'; var implements;", script());
    suite.fail("strict_let_statement", "strict", "if (x) let;", strict());
    suite.pass("sloppy_let_statement", "strict", "if (x) let;", script());

    // ========================================================================
    // Category: annex_b
    // ========================================================================
    suite.pass("if_function", "annex_b", "if (x) function f() {}", webcompat());
    suite.pass("labelled_function", "annex_b", "a: function f() {}", webcompat());
    suite.pass("html_comments", "annex_b", "<!-- hidden\nx = 1;\n--> also hidden", webcompat());
    suite.pass("for_in_initializer", "annex_b", "for (var i = 0 in o);", webcompat());
    suite.pass("webcompat_let_statement", "annex_b", "if (x) let;", webcompat());
    suite.fail("if_function_without_webcompat", "annex_b", "if (x) function f() {}", script());

    // ========================================================================
    // Category: numbers
    // ========================================================================
    suite.pass("numeric_separators", "numbers", "1_0_0_0; 0x1_F; 0b1_0;", next());
    suite.pass("bigint", "numbers", "10n; 0x1Fn;", script());
    for (name, source) in [
        ("trailing_separator", "1_0_0_0_;"),
        ("separator_after_zero", "0_x1;"),
        ("double_separator", "0x1__1;"),
        ("separator_after_exponent", "1e_1;"),
    ] {
        suite.fail_with(name, "numbers", source, next(), ErrorKind::Lex);
    }

    // ========================================================================
    // Category: lexical
    // ========================================================================
    suite.fail_with("let_let", "lexical", "let x; let x;", lexical(), ErrorKind::DuplicateBinding);
    suite.fail_with("var_in_block_then_let", "lexical", "{ var x; } let x;", lexical(), ErrorKind::DuplicateBinding);
    suite.pass("let_after_block_var", "lexical", "{ var x; } { let x; }", lexical());
    suite.pass("let_let_unchecked", "lexical", "let x; let x;", script());

    finish(suite);
}
