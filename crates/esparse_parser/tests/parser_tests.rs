//! Parser integration tests.
//!
//! Each test feeds a source snippet through `parse` and checks that it is
//! accepted or rejected under the given options.

use bumpalo::Bump;
use esparse_ast::SourceType;
use esparse_diagnostics::{ErrorKind, ParseError};
use esparse_parser::{parse, ParseOptions};

/// Helper: parse and return the number of top-level statements.
fn try_parse(source: &str, options: ParseOptions) -> Result<usize, ParseError> {
    let arena = Bump::new();
    parse(&arena, source, &options).map(|program| program.body.len())
}

fn pass_with(source: &str, options: ParseOptions) -> usize {
    match try_parse(source, options) {
        Ok(count) => count,
        Err(err) => panic!("expected {:?} to parse, got: {}", source, err),
    }
}

fn fail_with(source: &str, options: ParseOptions) -> ParseError {
    match try_parse(source, options) {
        Ok(_) => panic!("expected {:?} to be rejected", source),
        Err(err) => err,
    }
}

fn pass(source: &str) -> usize {
    pass_with(source, ParseOptions::default())
}

fn fail(source: &str) -> ParseError {
    fail_with(source, ParseOptions::default())
}

fn module() -> ParseOptions {
    ParseOptions::module()
}

fn next() -> ParseOptions {
    ParseOptions::default().with_next(true)
}

fn lexical() -> ParseOptions {
    ParseOptions::default().with_lexical(true)
}

fn webcompat() -> ParseOptions {
    ParseOptions::default().with_webcompat(true)
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_variable_declarations() {
    assert_eq!(pass("var a = 1, b;"), 1);
    assert_eq!(pass("let x = 'hello'; const y = true;"), 2);
    pass("let [a, , b] = c;");
    pass("const { a, b: { c }, ...d } = e;");
    pass("var [x = 1, [y] = [2], ...z] = w;");
}

#[test]
fn test_let_as_identifier_in_sloppy_mode() {
    pass("let = 1;");
    pass("var let = 1;");
    pass("let;");
    fail_with("let = 1;", ParseOptions::default().with_strict(true));
}

#[test]
fn test_variable_declaration_errors() {
    fail("const a;");
    fail("var [a];");
    fail("let { a };");
    fail("let let = 1;");
    fail("const [let] = x;");
    fail("var a = 1,;");
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_declarations() {
    pass("function f(a, b = 1, ...c) {}");
    pass("function* g() { yield; yield 1; yield* g(); }");
    pass("async function f() { await x; }");
    pass("async function* f() { for await (const x of xs) yield x; }");
    pass("(function () { return new.target; })");
    pass("function f([a, b], { c }) { return a + b + c; }");
}

#[test]
fn test_parameter_errors() {
    fail("function f(...a,) {}");
    fail("function f(...a = 1) {}");
    fail("function f(...a, b) {}");
    fail("function* g(a = yield) {}");
    fail("async function f(a = await 1) {}");
    fail("function* g() { function* h(x = yield) {} }");
}

#[test]
fn test_duplicate_parameters() {
    pass("function f(a, a) {}");
    pass("(function (a, a) { return a; });");
    fail("'use strict'; function f(a, a) {}");
    fail("function f(a, [a]) {}");
    assert_eq!(fail("function f(a, a) { 'use strict'; }").kind, ErrorKind::StrictMode);
    assert_eq!(fail("(function (b, b) { 'use strict'; });").kind, ErrorKind::StrictMode);
}

#[test]
fn test_use_strict_retroactive_checks() {
    fail("function eval() { 'use strict'; }");
    fail("function f(arguments) { 'use strict'; }");
    fail("function f(a = 1) { 'use strict'; }");
    fail("function f({ a }) { 'use strict'; }");
    pass("function f(a) { 'use strict'; }");
    pass("function f(eval) {} function g() { 'use strict'; }");
}

#[test]
fn test_use_strict_body_rejects_parameter_names() {
    for source in [
        "function f(eval) { 'use strict'; }",
        "function f(public) { 'use strict'; }",
        "function f(a, implements) { 'use strict'; }",
        "(function arguments() { 'use strict'; });",
        "(eval) => { 'use strict'; };",
        "({ m(arguments) { 'use strict'; } });",
        "class A { m(eval) {} }",
    ] {
        assert_eq!(fail(source).kind, ErrorKind::StrictMode, "{}", source);
    }
    pass("function f(public) {}");
    pass("(eval) => { return 'use strict'; };");
}

#[test]
fn test_return_placement() {
    fail("return;");
    pass_with("return 1;", ParseOptions::default().with_global_return(true));
    pass_with("return;", ParseOptions::default().with_source_type(SourceType::CommonJs));
    pass("function f() { return\n1 }");
}

#[test]
fn test_yield_and_await_as_identifiers() {
    pass("var yield = 1;");
    pass("var await = 1;");
    pass("function f() { var yield, await; }");
    fail("'use strict'; var yield;");
    fail("function* g() { var yield; }");
    fail("async function f() { var await; }");
    fail_with("var await;", module());
}

// ============================================================================
// Arrow Functions
// ============================================================================

#[test]
fn test_arrow_functions() {
    pass("(a, b) => a + b;");
    pass("() => {};");
    pass("x => y => z;");
    pass("(a = 1, ...b) => 0;");
    pass("([a], { b }) => a;");
    pass("async (a) => await a;");
    pass("async x => x;");
    pass("async () => {};");
    pass("(a, b,) => a;");
}

#[test]
fn test_async_as_identifier() {
    pass("async(a, b);");
    pass("var async = 1; async;");
    pass("async\n(x);");
}

#[test]
fn test_arrow_errors() {
    fail("(a, b)\n=> a;");
    fail("(a + b) => 1;");
    fail("([a.b]) => 1;");
    fail("(a, a) => 1;");
    fail("async (await) => 1;");
    fail("async (x = await 1) => x;");
    fail("(...a,) => 1;");
    fail("() => {} ();");
    fail("a\n=> a;");
}

#[test]
fn test_parenthesized_targets_in_arrow_parameters() {
    // Defaults and bodies may assign to parenthesized targets.
    pass("(x = [(a)] = []) => 0;");
    pass("(x = (a) = 1) => 0;");
    pass("(f = function() { [(x)] = []; }) => 0;");
    pass("(a, b = () => { (c) = 1 }) => 0;");
    pass("async (x = [(a)] = []) => 0;");
    pass("(a = ((a) = 1)) => a;");
    pass("[(a)] = []; (b) => b;");

    // A parenthesized name the arrow itself binds is not a parameter.
    for source in ["((a) = 1) => 0;", "([(a)] = []) => 0;", "({ b: (c) } = {}) => 0;", "async ([(a)] = []) => 0;"] {
        assert_eq!(fail(source).kind, ErrorKind::InvalidDestructuringTarget, "{}", source);
    }
    fail("((a)) => 1;");
    fail("([(a)]) => 1;");
}

#[test]
fn test_parenthesized_expressions() {
    pass("(a);");
    pass("(a, b);");
    pass("((a)) = 1;");
    fail("();");
    fail("(a,);");
    fail("(...a);");
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_members() {
    pass(
        "class A extends B {
            constructor() { super(); }
            static m() {}
            get x() { return 1; }
            set x(v) {}
            *gen() {}
            async am() {}
            async *agen() {}
            [k]() {}
            'quoted'() {}
            42() {}
            static async *[Symbol.iterator]() {}
        }",
    );
    pass("var C = class {};");
    pass("var C = class Named extends (a, b) {};");
}

#[test]
fn test_class_fields() {
    pass("class A { x = 1; static y; 'z' = 2; [k] = 3; }");
    pass("class A { #p = 2; m() { return this.#p; } }");
    pass("class A { static #p; static has(o) { return #p in o; } }");
    pass("class A { x = () => this; y = new.target; }");
    pass("class A { get; set; static; async; }");
}

#[test]
fn test_class_staged_members() {
    pass_with("class A { #m() {} }", next());
    pass_with("class A { get #x() {} set #x(v) {} }", next());
    pass_with("class A { static { this.x = 1; } }", next());
    fail("class A { #m() {} }");
    fail("class A { static { } }");
}

#[test]
fn test_class_errors() {
    fail("class A { constructor() {} constructor() {} }");
    fail("class A { get constructor() {} }");
    fail("class A { *constructor() {} }");
    fail("class A { async constructor() {} }");
    fail("class A { static prototype() {} }");
    fail("class A { static prototype = 1 }");
    fail("class A { constructor = 1 }");
    fail("class A { #constructor; }");
    fail("class A { m() { this.#x; } }");
    fail("class A { #x; #x; }");
    fail("class A { constructor() { super(); } }");
    fail("class A { x = arguments; }");
    fail("class A { #x; m() { delete this.#x; } }");
    fail("class A extends B { m() { super(); } }");
    fail("class { }");
    fail("class A { x y }");
}

#[test]
fn test_private_names_resolve_in_outer_class() {
    pass("class A { #x; m() { class B { n() { return this.#x; } } } }");
    pass_with("class A { #x; static { class B { [this.#x] = 1 } } }", next());
    fail("class A { m() { class B { #x; } return this.#x; } }");
}

#[test]
fn test_class_body_is_strict() {
    fail("class A { m() { with (a) {} } }");
    fail("class A { m(eval) {} }");
    fail("class A { m() { 010; } }");
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_operators() {
    pass("a + b * c - d / e % f;");
    pass("a << 1 >> 2 >>> 3;");
    pass("a < b <= c > d >= e instanceof f in g;");
    pass("a == b != c === d !== e;");
    pass("a & b | c ^ d;");
    pass("a && b || c;");
    pass("a ?? b;");
    pass("(a || b) ?? c;");
    pass("a ?? (b && c);");
    pass("a ** b ** c;");
    pass("(-a) ** b;");
    pass("a ** -b;");
    pass("a ? b : c ? d : e;");
    pass("a, b, c;");
    pass("typeof x; void 0; delete a.b; !a; ~a; +a; -a;");
    pass("a++; b--; ++a; --b;");
}

#[test]
fn test_operator_errors() {
    fail("-a ** b;");
    fail("typeof a ** b;");
    fail("a ?? b || c;");
    fail("a || b ?? c;");
    fail("a && b ?? c;");
    fail("a +;");
    fail("a ? b;");
}

#[test]
fn test_assignment() {
    pass("a = b = c;");
    pass("a += 1; a -= 1; a **= 2; a >>>= 1;");
    pass("a ||= b; a &&= b; a ??= b;");
    pass("a.b = 1; a[b] = 2; (a) = 3;");
    fail("1 = 2;");
    fail("a + 1 = 2;");
    fail("(a, b) = 1;");
    fail("a() = 1;");
    fail("++a++;");
    fail("1++;");
    fail("({ a } += 1);");
    fail("[a] *= 1;");
}

#[test]
fn test_member_and_call_expressions() {
    pass("a.b.c;");
    pass("a[b][c];");
    pass("a.if.class.new;");
    pass("a(b)(c);");
    pass("a(...b, c, ...d);");
    pass("new a.b.c();");
    pass("new new X()();");
    pass("new X;");
    pass("import('x');");
    fail("a(...);");
    fail("import();");
    fail("import(a, b);");
}

#[test]
fn test_new_target_and_super() {
    pass("function f() { new.target; }");
    pass("({ m() { super.x; } });");
    pass("({ m() { super[x](); } });");
    fail("new.target;");
    fail("new.foo;");
    fail("super.x;");
    fail("({ m() { super(); } });");
    fail("function f() { super.x; }");
}

#[test]
fn test_object_literals() {
    pass("({ get a() {}, set a(v) {}, [b]: 1, c, d() {}, async *e() {}, 'f': 2, 3: 4 });");
    pass("({ get: 1, set: 2, async: 3, await: 4 });");
    pass("({ ...a, b });");
    pass("({ if: 1, class: 2 });");
    fail("({ a = 1 });");
    fail("({ get a(b) {} });");
    fail("({ set a() {} });");
    fail("({ set a(...b) {} });");
    fail("({ if });");
}

#[test]
fn test_duplicate_proto() {
    pass("({ __proto__: 1, ['__proto__']: 2, __proto__() {} });");
    fail("({ __proto__: 1, __proto__: 2 });");
    fail("({ __proto__: 1, '__proto__': 2 });");
    pass("({ __proto__: a, __proto__: b } = x);");
}

#[test]
fn test_template_literals() {
    pass("`plain`;");
    pass("`a${b}c${d}e`;");
    pass("tag`x${y}z`;");
    pass("tag`\\unicode and \\u{110000}`;");
    fail("`\\unicode`;");
    fail("`\\01`;");
    fail("`unterminated");
    fail("`${a`;");
}

#[test]
fn test_regular_expressions() {
    pass("/re/gi.test(s);");
    pass("x = /=/;");
    pass("/a/dgimsuy;");
    pass("a = b / c / d;");
    pass("if (/x/.test(y)) {}");
    fail("/a/gg;");
    fail("/a/uv;");
    fail("/a/x;");
    fail("/unterminated");
}

#[test]
fn test_numeric_literals() {
    pass("0; 1.5; .5; 1e10; 1E-5; 0x1F; 0o17; 0b101; 10n; 0x1Fn;");
    fail("1.5n;");
    fail("3in x;");
    fail("0b12;");
    fail("0x;");
}

// ============================================================================
// Staged Syntax
// ============================================================================

#[test]
fn test_optional_chaining() {
    pass_with("a?.b; a?.[b]; a?.(b); a?.b.c(d)?.[e];", next());
    pass_with("a?.5:1;", next());
    fail("a?.b;");
    fail_with("a?.b = 1;", next());
    fail_with("a?.b++;", next());
    fail_with("new a?.b();", next());
    fail_with("a?.b`t`;", next());
    fail_with("[a?.b] = c;", next());
}

#[test]
fn test_numeric_separators() {
    pass_with("1_000_000; 0x1_F; 0b1_0; 0o1_7; 1_0.0_1e1_0;", next());
    fail("1_000;");
    fail_with("1_0_0_0_;", next());
    fail_with("0_x1;", next());
    fail_with("0x1__1;", next());
    fail_with("1e_1;", next());
    fail_with("0x_1;", next());
    fail_with("1._0;", next());
}

#[test]
fn test_import_meta() {
    pass_with("import.meta.url;", module().with_next(true));
    fail_with("import.meta;", module());
    fail_with("import.meta;", next());
    fail_with("import.foo;", module().with_next(true));
}

// ============================================================================
// Destructuring
// ============================================================================

#[test]
fn test_assignment_patterns() {
    pass("[a, ...b] = c;");
    pass("[a.b, c[d]] = e;");
    pass("[(x)] = [];");
    pass("({ a: (b) } = c);");
    pass("({ a: (b.c) } = d);");
    pass("[...[a]] = b;");
    pass("[a] = [b] = c;");
    pass("({ a = 1, b: { c } = {} } = d);");
    pass("[, , a] = b;");
}

#[test]
fn test_binding_patterns_are_stricter() {
    fail("let [(x)] = [];");
    fail("let { a: (b) } = c;");
    fail("let [a.b] = c;");
    fail("let { ...{ a } } = b;");
}

#[test]
fn test_rest_errors() {
    let err = fail("[...a, b] = v;");
    assert_eq!(err.kind, ErrorKind::InvalidDestructuringTarget);
    fail("[...a,] = b;");
    fail("[...a = 1] = b;");
    fail("({ ...{ a } } = b);");
    fail("({ ...a, b } = c);");
}

#[test]
fn test_invalid_patterns() {
    fail("({ a: 1 } = b);");
    fail("[1] = a;");
    fail("[a + b] = c;");
    fail("({ a() {} } = b);");
    fail("({ get a() {} } = b);");
    fail("[(a = 1)] = b;");
    fail("[([a])] = b;");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_control_flow() {
    pass("if (a) b; else c;");
    pass("if (a) { b } else if (c) { d }");
    pass("while (a) b();");
    pass("do a(); while (b)");
    pass("do a(); while (b) c();");
    pass("for (;;) break;");
    pass("for (let i = 0; i < n; i++) {}");
    pass("for (const x of xs) {}");
    pass("for (var k in o) {}");
    pass("for (x of y);");
    pass("for ([a, b] of c);");
    pass("for ({ a } in b);");
    pass("for (a.b in c);");
    pass("for (let in x);");
    pass("for (var i = 0, j = 1; ; ) {}");
    pass("async function f() { for await (const x of xs) {} }");
    pass("switch (x) { case 1: a(); break; case 2: default: b(); }");
    pass("try {} catch (e) {} finally {}");
    pass("try {} catch {}");
    pass("try {} catch ({ message }) {}");
    pass("try {} finally {}");
    pass("throw new Error('x');");
    pass("with (o) {}");
    pass("debugger;");
    pass(";;;");
}

#[test]
fn test_for_head_errors() {
    fail("for (let x = 1 of y);");
    fail("for (let a, b of c);");
    fail("for (const a of b, c);");
    fail("for (async of x);");
    fail("for (let.x of y);");
    fail("for (a + b of c);");
    fail("for (var [a] = 1 in b);");
    fail("async function f() { for await (x in y); }");
    fail("async function f() { for await (;;); }");
    fail("for await (x of y);");
    fail("for (const x;;);");
}

#[test]
fn test_for_of_async_arrow_head() {
    pass("for (async of => {};;) {}");
    pass("for ((async) of x);");
}

#[test]
fn test_labels() {
    pass("outer: for (;;) { inner: for (;;) { continue outer; } }");
    pass("a: { break a; }");
    pass("a: b: while (x) continue a;");
    pass("a: ;");
    pass("a: { } a: { }");
    fail("a: { continue a; }");
    fail("a: a: ;");
    fail("break b;");
    fail("while (x) continue b;");
    fail("a: { function f() { break a; } }");
}

#[test]
fn test_break_and_continue_placement() {
    fail("break;");
    fail("continue;");
    fail("switch (x) { case 1: continue; }");
    pass("switch (x) { case 1: break; }");
    pass("for (;;) { switch (x) { case 1: continue; } }");
}

#[test]
fn test_statement_errors() {
    fail("switch (x) { default: default: }");
    fail("try {}");
    fail("throw\nx;");
    fail("if (x) const y = 1;");
    fail("while (x) let [a] = b;");
    fail("while (x) function f() {}");
    fail("if (x) class A {}");
    fail("do function f() {} while (0)");
    fail("if (a) async function f() {}");
    fail("if (a) function* g() {}");
    fail("a: let x;");
}

#[test]
fn test_labelled_lexical_declaration_is_illegal_context() {
    let err = fail("label: let x;");
    assert_eq!(err.kind, ErrorKind::IllegalContext);
}

#[test]
fn test_let_in_single_statement_position() {
    pass_with("if (x) let;", webcompat());
    pass("if (x) let;");
    fail_with("if (x) let;", ParseOptions::default().with_strict(true));
    pass("if (x) let\ny = 1;");
}

// ============================================================================
// Automatic Semicolon Insertion
// ============================================================================

#[test]
fn test_asi() {
    assert_eq!(pass("a\nb"), 2);
    assert_eq!(pass("a\n++b"), 2);
    assert_eq!(pass("var a = 1\nvar b = 2"), 2);
    assert_eq!(pass("{ a } b"), 2);
    assert_eq!(pass("a\u{2028}b"), 2);
    fail("a b");
    fail("var a = 1 var b = 2");
    fail("for (a\nb\n) {}");
}

#[test]
fn test_asi_restricted_productions() {
    fail("x\n=> 1;");
    assert_eq!(pass("function f() { return\nx }"), 1);
    assert_eq!(pass("a: for (;;) { continue\na; }"), 1);
    assert_eq!(pass("a\n++\nb"), 2);
}

// ============================================================================
// Strict Mode
// ============================================================================

#[test]
fn test_strict_mode_restrictions() {
    fail("'use strict'; with (a) {}");
    fail("'use strict'; 010;");
    fail("'use strict'; '\\01';");
    fail("'\\01'; 'use strict';");
    fail("'use strict'; eval = 1;");
    fail("'use strict'; arguments++;");
    fail("'use strict'; delete x;");
    fail("'use strict'; var implements;");
    fail("'use strict'; function f() { var static; }");
    fail("'use strict'; if (a) function f() {}");
    fail("function f() { 'use strict'; with (a) {} }");
}

#[test]
fn test_sloppy_mode_legacy_forms() {
    pass("010; 08; 09.5;");
    pass("'\\01';");
    pass("with (a) {}");
    pass("eval = 1; arguments = 2;");
    pass("delete x;");
    pass("var implements, package, static;");
}

#[test]
fn test_implied_strict() {
    let strict = ParseOptions::default().with_strict(true);
    fail_with("with (a) {}", strict);
    fail_with("010;", strict);
    fail_with("with (a) {}", module());
    fail_with("var x = 010;", module());
}

#[test]
fn test_directive_prologue_only_at_start() {
    pass("a; 'use strict'; with (b) {}");
    pass("('use strict'); with (b) {}");
    fail("'a'; 'use strict'; with (b) {}");
}

// ============================================================================
// Annex B
// ============================================================================

#[test]
fn test_annex_b_functions() {
    pass_with("if (x) function f() {}", webcompat());
    pass_with("if (x) function f() {} else function g() {}", webcompat());
    pass_with("a: function f() {}", webcompat());
    fail("if (x) function f() {}");
    fail("a: function f() {}");
    fail_with("while (x) a: function f() {}", webcompat());
    fail_with("a: function* g() {}", webcompat());
}

#[test]
fn test_annex_b_for_in_initializer() {
    pass_with("for (var i = 0 in o);", webcompat());
    fail("for (var i = 0 in o);");
    fail_with("for (let i = 0 in o);", webcompat());
    fail_with("for (var [i] = 0 in o);", webcompat());
}

#[test]
fn test_html_comments() {
    pass_with("<!-- comment\nx", webcompat());
    pass_with("x\n--> comment", webcompat());
    fail_with("<!-- comment", webcompat().with_source_type(SourceType::Module));
}

#[test]
fn test_annex_b_block_function_duplicates() {
    let options = webcompat().with_lexical(true);
    pass_with("{ function f() {} function f() {} }", options);
    fail_with("{ function f() {} function f() {} }", lexical());
    fail_with("{ function f() {} function* f() {} }", options);
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_imports() {
    pass_with("import 'm';", module());
    pass_with("import a from 'm';", module());
    pass_with("import * as ns from 'm';", module());
    pass_with("import { a, b as c, default as d } from 'm';", module());
    pass_with("import a, * as b from 'm';", module());
    pass_with("import a, { b } from 'm';", module());
    pass_with("import { 'string name' as x } from 'm';", module());
    pass_with("import {} from 'm';", module());
}

#[test]
fn test_import_errors() {
    fail("import a from 'm';");
    fail_with("{ import a from 'm'; }", module());
    fail_with("function f() { import a from 'm'; }", module());
    fail_with("import { default } from 'm';", module());
    fail_with("import { 'x' } from 'm';", module());
    fail_with("import a, b from 'm';", module());
    fail_with("import * from 'm';", module());
    fail_with("import a from m;", module());
    fail_with("import { a as if } from 'm';", module());
}

#[test]
fn test_exports() {
    pass_with("export var a = 1; export let b; export const c = 2;", module());
    pass_with("export function f() {} export async function g() {} export class C {}", module());
    pass_with("export default function () {}", module());
    pass_with("export default async function () {}", module());
    pass_with("export default class {}", module());
    pass_with("export default 1 + 2;", module());
    pass_with("export default (a, b) => a;", module());
    pass_with("export * from 'm';", module());
    pass_with("export * as ns from 'm';", module());
    pass_with("export * as 'string name' from 'm';", module());
    pass_with("export { 'a' as b, c as 'd e' } from 'm';", module());
    pass_with("export { default } from 'm';", module());
    pass_with("var a, b; export { a, b as c };", module());
    pass_with("export { x }; var x;", module().with_lexical(true));
}

#[test]
fn test_export_errors() {
    fail("export var a;");
    fail_with("export { 'a' };", module());
    fail_with("export { if };", module());
    fail_with("export { default };", module());
    fail_with("export var a; export var a;", module());
    fail_with("export default 1; export default 2;", module());
    fail_with("export function f() {} export { f };", module());
    fail_with("var a; export { a as b, a as b };", module());
    fail_with("export * as a from 'm'; export * as a from 'n';", module());
    fail_with("export async f() {}", module());
    fail_with("export let;", module());
}

#[test]
fn test_undeclared_exports_need_lexical() {
    pass_with("export { x };", module());
    fail_with("export { x };", module().with_lexical(true));
    fail_with("{ var y; let x; } export { x };", module().with_lexical(true));
    pass_with("export { x } from 'm';", module().with_lexical(true));
}

#[test]
fn test_module_code_is_strict() {
    fail_with("with (a) {}", module());
    fail_with("var yield;", module());
    fail_with("await = 1;", module());
    pass_with("await x;", module());
    pass_with("export const data = await fetch();", module());
}

#[test]
fn test_await_outside_async() {
    fail("await x;");
    fail("function f() { await x; }");
    pass("await;");
    pass("function f() { await; }");
}

// ============================================================================
// Redeclarations
// ============================================================================

#[test]
fn test_redeclaration_checks_need_lexical() {
    pass("let a; let a;");
    fail_with("let a; let a;", lexical());
}

#[test]
fn test_redeclaration_matrix() {
    fail_with("let x; var x;", lexical());
    fail_with("var x; let x;", lexical());
    fail_with("const x = 1; let x;", lexical());
    fail_with("let x; const x = 1;", lexical());
    fail_with("{ var x; } let x;", lexical());
    fail_with("let x; { var x; }", lexical());
    pass_with("{ var x; } { let x; }", lexical());
    pass_with("{ let x; } var x;", lexical());
    pass_with("var x; var x;", lexical());
    pass_with("let x; { let x; }", lexical());
    pass_with("function f() { var x; } let x;", lexical());
    fail_with("class A {} var A;", lexical());
}

#[test]
fn test_function_scope_redeclarations() {
    fail_with("function f(a) { let a; }", lexical());
    pass_with("function f(a) { var a; }", lexical());
    pass_with("function f(a) { function a() {} }", lexical());
    pass_with("function f() {} var f;", lexical());
    pass_with("function f() {} function f() {}", lexical());
    fail_with("function f() {} var f;", module().with_lexical(true));
    fail_with("let f; function f() {}", lexical());
}

#[test]
fn test_catch_and_loop_scopes() {
    pass_with("try {} catch (e) { var e; }", lexical());
    fail_with("try {} catch (e) { let e; }", lexical());
    fail_with("try {} catch ([e]) { var e; }", lexical());
    fail_with("try {} catch (e) { for (var e of x); }", lexical());
    pass_with("for (let i;;) { let i; }", lexical());
    fail_with("for (let i of x) { var i; }", lexical());
}

#[test]
fn test_import_bindings_conflict() {
    let options = module().with_lexical(true);
    fail_with("import a from 'm'; let a;", options);
    fail_with("import { a, b as a } from 'm';", options);
    pass_with("import a from 'm'; function f() { let a; }", options);
}

// ============================================================================
// Scanner Integration
// ============================================================================

#[test]
fn test_identifiers_and_escapes() {
    pass("var \\u0061 = 1;");
    pass("var \\u{63} = 1;");
    pass("var ünïcödé = 1, $ = 2, _ = 3;");
    fail("v\\u0061r x = 1;");
    fail("var a\\u0020b;");
    fail("var \\u0030x;");
}

#[test]
fn test_strings_and_comments() {
    pass("'single'; \"double\"; '\\x41\\u0041\\u{41}';");
    pass("/* block */ a; // line\nb;");
    pass("#!/usr/bin/env node\nx;");
    fail("'unterminated");
    fail("'\\x4';");
    fail("/* unterminated");
    fail("a #!b");
}

// ============================================================================
// Error Reporting
// ============================================================================

#[test]
fn test_error_position() {
    let err = fail_with("let x = 1;\nlet x = 2;", lexical());
    assert_eq!(err.kind, ErrorKind::DuplicateBinding);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 4);
    assert_eq!(err.message, "Identifier 'x' has already been declared");
}

#[test]
fn test_error_kinds() {
    assert_eq!(fail("'abc").kind, ErrorKind::Lex);
    assert_eq!(fail("a b").kind, ErrorKind::UnexpectedToken);
    assert_eq!(fail("1 = a;").kind, ErrorKind::InvalidDestructuringTarget);
    assert_eq!(fail("break;").kind, ErrorKind::IllegalContext);
    assert_eq!(fail("'use strict'; with (a) {}").kind, ErrorKind::StrictMode);
}

#[test]
fn test_unexpected_eof() {
    let err = fail("function f() {");
    assert_eq!(err.message, "Unexpected end of input");
    fail("a +");
    fail("[1, 2");
}

/// Run `f` on a thread with the 2 MiB stack that test threads and rayon
/// workers get by default.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_deep_nesting_is_rejected() {
    let errors = on_small_stack(|| {
        [
            "[".repeat(5_000),
            "(".repeat(5_000),
            format!("let {} = x;", "[".repeat(5_000)),
            format!("{}x;", "!".repeat(5_000)),
            format!("{}1;", "a ** ".repeat(5_000)),
            format!("{}0", "function f() { return ".repeat(2_000)),
        ]
        .into_iter()
        .map(|source| try_parse(&source, ParseOptions::default()).map(|_| ()))
        .collect::<Vec<_>>()
    });
    for result in errors {
        let err = result.unwrap_err();
        assert_eq!(err.message, "Maximum nesting depth exceeded");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }
}

#[test]
fn test_nested_functions_on_small_stack() {
    let source = format!("{}0{}", "function f() { return ".repeat(100), "}".repeat(100));
    let result = on_small_stack(move || try_parse(&source, ParseOptions::default()));
    assert_eq!(result.unwrap(), 1);
}

#[test]
fn test_deep_expressions_on_small_stack() {
    let results = on_small_stack(|| {
        [
            format!("{}{};", "[".repeat(200), "]".repeat(200)),
            format!("{}x{};", "(".repeat(200), ")".repeat(200)),
            format!("{}x{} = [];", "[".repeat(200), "]".repeat(200)),
            format!("x = {}0{};", "() => (".repeat(100), ")".repeat(100)),
            format!("{}{}", "{ ".repeat(250), "}".repeat(250)),
        ]
        .into_iter()
        .map(|source| try_parse(&source, ParseOptions::default()).map_err(|e| (source, e)))
        .collect::<Vec<_>>()
    });
    for result in results {
        if let Err((source, err)) = result {
            panic!("expected {:?} to parse, got: {}", source, err);
        }
    }
}
