//! ESTree output shape tests.
//!
//! Serializes parsed programs with serde_json and compares them against the
//! expected ESTree objects field by field.

use bumpalo::Bump;
use esparse_parser::{parse, ParseOptions};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn to_json(source: &str, options: ParseOptions) -> Value {
    let arena = Bump::new();
    let program = match parse(&arena, source, &options) {
        Ok(program) => program,
        Err(err) => panic!("expected {:?} to parse, got: {}", source, err),
    };
    serde_json::to_value(&program).unwrap()
}

/// The single statement of a script.
fn statement(source: &str, options: ParseOptions) -> Value {
    let mut program = to_json(source, options);
    let body = program["body"].as_array_mut().unwrap();
    assert_eq!(body.len(), 1, "source: {}", source);
    body.remove(0)
}

fn expression(source: &str, options: ParseOptions) -> Value {
    statement(source, options)["expression"].clone()
}

fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn number(value: i64) -> Value {
    json!({ "type": "Literal", "value": value })
}

// ============================================================================
// Program
// ============================================================================

#[test]
fn test_empty_program() {
    assert_eq!(
        to_json("", ParseOptions::default()),
        json!({ "type": "Program", "sourceType": "script", "body": [] })
    );
    assert_eq!(
        to_json("", ParseOptions::module()),
        json!({ "type": "Program", "sourceType": "module", "body": [] })
    );
}

#[test]
fn test_ranges_and_loc() {
    let options = ParseOptions::default().with_ranges(true).with_loc(true);
    assert_eq!(
        to_json("\nx;", options),
        json!({
            "type": "Program",
            "start": 0,
            "end": 3,
            "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 2, "column": 2 } },
            "sourceType": "script",
            "body": [{
                "type": "ExpressionStatement",
                "start": 1,
                "end": 3,
                "loc": { "start": { "line": 2, "column": 0 }, "end": { "line": 2, "column": 2 } },
                "expression": {
                    "type": "Identifier",
                    "start": 1,
                    "end": 2,
                    "loc": { "start": { "line": 2, "column": 0 }, "end": { "line": 2, "column": 1 } },
                    "name": "x"
                }
            }]
        })
    );
}

#[test]
fn test_ranges_off_adds_no_fields() {
    let plain = to_json("a + b;", ParseOptions::default());
    let explicit = to_json("a + b;", ParseOptions::default().with_ranges(false).with_loc(false));
    assert_eq!(plain, explicit);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literal_values() {
    let options = ParseOptions::default();
    assert_eq!(expression("42;", options), number(42));
    assert_eq!(expression("1.5;", options), json!({ "type": "Literal", "value": 1.5 }));
    assert_eq!(expression("0x10;", options), number(16));
    assert_eq!(expression("'a\\u0062';", options), json!({ "type": "Literal", "value": "ab" }));
    assert_eq!(expression("null;", options), json!({ "type": "Literal", "value": null }));
    assert_eq!(expression("true;", options), json!({ "type": "Literal", "value": true }));
}

#[test]
fn test_raw_option() {
    let options = ParseOptions::default().with_raw(true);
    assert_eq!(expression("0x10;", options), json!({ "type": "Literal", "value": 16, "raw": "0x10" }));
    assert_eq!(expression("'x';", options), json!({ "type": "Literal", "value": "x", "raw": "'x'" }));
}

#[test]
fn test_regex_and_bigint_literals() {
    let options = ParseOptions::default();
    assert_eq!(
        expression("/ab+c/gi;", options),
        json!({ "type": "Literal", "value": null, "regex": { "pattern": "ab+c", "flags": "gi" } })
    );
    assert_eq!(
        expression("10n;", options),
        json!({ "type": "Literal", "value": null, "bigint": "10" })
    );
}

#[test]
fn test_template_literal() {
    assert_eq!(
        expression("`a${b}c`;", ParseOptions::default()),
        json!({
            "type": "TemplateLiteral",
            "quasis": [
                { "type": "TemplateElement", "value": { "raw": "a", "cooked": "a" }, "tail": false },
                { "type": "TemplateElement", "value": { "raw": "c", "cooked": "c" }, "tail": true }
            ],
            "expressions": [ident("b")]
        })
    );
}

#[test]
fn test_tagged_template_invalid_escape() {
    assert_eq!(
        expression("tag`\\u`;", ParseOptions::default()),
        json!({
            "type": "TaggedTemplateExpression",
            "tag": ident("tag"),
            "quasi": {
                "type": "TemplateLiteral",
                "quasis": [
                    { "type": "TemplateElement", "value": { "raw": "\\u", "cooked": null }, "tail": true }
                ],
                "expressions": []
            }
        })
    );
}

// ============================================================================
// Directives
// ============================================================================

#[test]
fn test_directive_field() {
    let options = ParseOptions::default().with_directives(true);
    assert_eq!(
        statement("'use strict';", options),
        json!({
            "type": "ExpressionStatement",
            "expression": { "type": "Literal", "value": "use strict" },
            "directive": "use strict"
        })
    );
    assert_eq!(
        statement("'use strict';", ParseOptions::default()),
        json!({
            "type": "ExpressionStatement",
            "expression": { "type": "Literal", "value": "use strict" }
        })
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_array_destructuring_assignment() {
    assert_eq!(
        expression("[a, ...b] = [1, 2, 3];", ParseOptions::default()),
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": {
                "type": "ArrayPattern",
                "elements": [
                    ident("a"),
                    { "type": "RestElement", "argument": ident("b") }
                ]
            },
            "right": {
                "type": "ArrayExpression",
                "elements": [number(1), number(2), number(3)]
            }
        })
    );
}

#[test]
fn test_object_destructuring_assignment() {
    assert_eq!(
        expression("({ a, b: c = 1 } = d);", ParseOptions::default()),
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": {
                "type": "ObjectPattern",
                "properties": [
                    {
                        "type": "Property",
                        "key": ident("a"),
                        "value": ident("a"),
                        "kind": "init",
                        "computed": false,
                        "method": false,
                        "shorthand": true
                    },
                    {
                        "type": "Property",
                        "key": ident("b"),
                        "value": { "type": "AssignmentPattern", "left": ident("c"), "right": number(1) },
                        "kind": "init",
                        "computed": false,
                        "method": false,
                        "shorthand": false
                    }
                ]
            },
            "right": ident("d")
        })
    );
}

#[test]
fn test_parenthesized_target_is_transparent() {
    assert_eq!(
        expression("[(x)] = [];", ParseOptions::default()),
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": { "type": "ArrayPattern", "elements": [ident("x")] },
            "right": { "type": "ArrayExpression", "elements": [] }
        })
    );
}

#[test]
fn test_optional_chain_marks_every_link() {
    let options = ParseOptions::default().with_next(true);
    assert_eq!(
        expression("obj?.[expr]?.[other];", options),
        json!({
            "type": "OptionalMemberExpression",
            "object": {
                "type": "OptionalMemberExpression",
                "object": ident("obj"),
                "property": ident("expr"),
                "computed": true,
                "optional": true
            },
            "property": ident("other"),
            "computed": true,
            "optional": true
        })
    );
}

#[test]
fn test_optional_chain_continuation() {
    let options = ParseOptions::default().with_next(true);
    assert_eq!(
        expression("a?.b.c();", options),
        json!({
            "type": "OptionalCallExpression",
            "callee": {
                "type": "OptionalMemberExpression",
                "object": {
                    "type": "OptionalMemberExpression",
                    "object": ident("a"),
                    "property": ident("b"),
                    "computed": false,
                    "optional": true
                },
                "property": ident("c"),
                "computed": false,
                "optional": false
            },
            "arguments": [],
            "optional": false
        })
    );
}

#[test]
fn test_binary_precedence() {
    assert_eq!(
        expression("a + b * c ** d ** e;", ParseOptions::default()),
        json!({
            "type": "BinaryExpression",
            "operator": "+",
            "left": ident("a"),
            "right": {
                "type": "BinaryExpression",
                "operator": "*",
                "left": ident("b"),
                "right": {
                    "type": "BinaryExpression",
                    "operator": "**",
                    "left": ident("c"),
                    "right": {
                        "type": "BinaryExpression",
                        "operator": "**",
                        "left": ident("d"),
                        "right": ident("e")
                    }
                }
            }
        })
    );
}

#[test]
fn test_logical_and_conditional() {
    assert_eq!(
        expression("a ?? b ? c : d;", ParseOptions::default()),
        json!({
            "type": "ConditionalExpression",
            "test": {
                "type": "LogicalExpression",
                "operator": "??",
                "left": ident("a"),
                "right": ident("b")
            },
            "consequent": ident("c"),
            "alternate": ident("d")
        })
    );
}

#[test]
fn test_new_and_member() {
    assert_eq!(
        expression("new a.b(c);", ParseOptions::default()),
        json!({
            "type": "NewExpression",
            "callee": {
                "type": "MemberExpression",
                "object": ident("a"),
                "property": ident("b"),
                "computed": false
            },
            "arguments": [ident("c")]
        })
    );
}

#[test]
fn test_arrow_function() {
    assert_eq!(
        expression("async (a, b = 1) => a;", ParseOptions::default()),
        json!({
            "type": "ArrowFunctionExpression",
            "params": [
                ident("a"),
                { "type": "AssignmentPattern", "left": ident("b"), "right": number(1) }
            ],
            "body": ident("a"),
            "async": true,
            "expression": true
        })
    );
}

#[test]
fn test_update_and_unary() {
    assert_eq!(
        expression("-x++;", ParseOptions::default()),
        json!({
            "type": "UnaryExpression",
            "operator": "-",
            "prefix": true,
            "argument": {
                "type": "UpdateExpression",
                "operator": "++",
                "prefix": false,
                "argument": ident("x")
            }
        })
    );
}

#[test]
fn test_object_expression() {
    assert_eq!(
        expression("({ get a() {}, [b]: 1 });", ParseOptions::default()),
        json!({
            "type": "ObjectExpression",
            "properties": [
                {
                    "type": "Property",
                    "key": ident("a"),
                    "value": {
                        "type": "FunctionExpression",
                        "id": null,
                        "params": [],
                        "body": { "type": "BlockStatement", "body": [] },
                        "async": false,
                        "generator": false
                    },
                    "kind": "get",
                    "computed": false,
                    "method": false,
                    "shorthand": false
                },
                {
                    "type": "Property",
                    "key": ident("b"),
                    "value": number(1),
                    "kind": "init",
                    "computed": true,
                    "method": false,
                    "shorthand": false
                }
            ]
        })
    );
}

#[test]
fn test_private_in() {
    let program = to_json("class A { #x; m(o) { return #x in o; } }", ParseOptions::default());
    let method = &program["body"][0]["body"]["body"][1];
    assert_eq!(
        method["value"]["body"]["body"][0]["argument"],
        json!({
            "type": "BinaryExpression",
            "operator": "in",
            "left": { "type": "PrivateIdentifier", "name": "x" },
            "right": ident("o")
        })
    );
}

// ============================================================================
// Statements and Declarations
// ============================================================================

#[test]
fn test_variable_declaration() {
    assert_eq!(
        statement("let x = 1, y;", ParseOptions::default()),
        json!({
            "type": "VariableDeclaration",
            "declarations": [
                { "type": "VariableDeclarator", "id": ident("x"), "init": number(1) },
                { "type": "VariableDeclarator", "id": ident("y"), "init": null }
            ],
            "kind": "let"
        })
    );
}

#[test]
fn test_function_declaration() {
    assert_eq!(
        statement("function* f(a = 1, ...r) {}", ParseOptions::default()),
        json!({
            "type": "FunctionDeclaration",
            "id": ident("f"),
            "params": [
                { "type": "AssignmentPattern", "left": ident("a"), "right": number(1) },
                { "type": "RestElement", "argument": ident("r") }
            ],
            "body": { "type": "BlockStatement", "body": [] },
            "async": false,
            "generator": true
        })
    );
}

#[test]
fn test_for_of_statement() {
    assert_eq!(
        statement("for (const x of y);", ParseOptions::default()),
        json!({
            "type": "ForOfStatement",
            "left": {
                "type": "VariableDeclaration",
                "declarations": [{ "type": "VariableDeclarator", "id": ident("x"), "init": null }],
                "kind": "const"
            },
            "right": ident("y"),
            "body": { "type": "EmptyStatement" },
            "await": false
        })
    );
}

#[test]
fn test_labelled_loop() {
    assert_eq!(
        statement("a: while (1) continue a;", ParseOptions::default()),
        json!({
            "type": "LabeledStatement",
            "label": ident("a"),
            "body": {
                "type": "WhileStatement",
                "test": number(1),
                "body": { "type": "ContinueStatement", "label": ident("a") }
            }
        })
    );
}

#[test]
fn test_try_statement() {
    assert_eq!(
        statement("try {} catch {} finally {}", ParseOptions::default()),
        json!({
            "type": "TryStatement",
            "block": { "type": "BlockStatement", "body": [] },
            "handler": {
                "type": "CatchClause",
                "param": null,
                "body": { "type": "BlockStatement", "body": [] }
            },
            "finalizer": { "type": "BlockStatement", "body": [] }
        })
    );
}

#[test]
fn test_class_declaration() {
    let options = ParseOptions::default().with_next(true);
    assert_eq!(
        statement("class A extends B { static x = 1; static {} }", options),
        json!({
            "type": "ClassDeclaration",
            "id": ident("A"),
            "superClass": ident("B"),
            "body": {
                "type": "ClassBody",
                "body": [
                    {
                        "type": "PropertyDefinition",
                        "key": ident("x"),
                        "value": number(1),
                        "computed": false,
                        "static": true
                    },
                    { "type": "StaticBlock", "body": [] }
                ]
            }
        })
    );
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_import_declaration() {
    assert_eq!(
        statement("import a, { b as c } from 'm';", ParseOptions::module()),
        json!({
            "type": "ImportDeclaration",
            "specifiers": [
                { "type": "ImportDefaultSpecifier", "local": ident("a") },
                { "type": "ImportSpecifier", "local": ident("c"), "imported": ident("b") }
            ],
            "source": { "type": "Literal", "value": "m" }
        })
    );
}

#[test]
fn test_export_declarations() {
    let program = to_json(
        "export * as ns from 'm'; export { x as 'y z' }; export default 1; var x;",
        ParseOptions::module(),
    );
    assert_eq!(
        program["body"][0],
        json!({
            "type": "ExportAllDeclaration",
            "exported": ident("ns"),
            "source": { "type": "Literal", "value": "m" }
        })
    );
    assert_eq!(
        program["body"][1],
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": null,
            "specifiers": [{
                "type": "ExportSpecifier",
                "local": ident("x"),
                "exported": { "type": "Literal", "value": "y z" }
            }],
            "source": null
        })
    );
    assert_eq!(
        program["body"][2],
        json!({ "type": "ExportDefaultDeclaration", "declaration": number(1) })
    );
}
