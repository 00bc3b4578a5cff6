//! Table-driven coverage of the pipeline's end-to-end scenarios: one
//! case per row, asserting the shape `parse_source` produces.

use esflow::ast::{Expression, Statement};
use esflow::span::SourceUrl;
use test_case::test_case;

#[test_case("x", 1 ; "bare identifier statement")]
#[test_case("x;", 1 ; "identifier statement with semicolon")]
#[test_case("console.log(\"hi\")", 1 ; "member call with a string argument")]
#[test_case("a.b.c", 1 ; "nested member expression")]
#[test_case("f(a, b,)", 1 ; "call with trailing comma")]
fn parses_the_expected_number_of_statements(source: &str, expected_count: usize) {
    let statements =
        esflow::parse_source(SourceUrl::anonymous(), source).expect("parse should succeed");
    assert_eq!(statements.len(), expected_count);
}

#[test]
fn bare_identifier_statement_has_no_trailing_semicolon() {
    let statements = esflow::parse_source(SourceUrl::anonymous(), "x").expect("parse failed");
    let Statement::Expression(stmt) = &statements[0];
    assert!(stmt.semicolon().is_none());
    assert!(matches!(stmt.expression(), Expression::Identifier(id) if id.name() == "x"));
}

#[test]
fn identifier_statement_with_semicolon_retains_it() {
    let statements = esflow::parse_source(SourceUrl::anonymous(), "x;").expect("parse failed");
    let Statement::Expression(stmt) = &statements[0];
    assert!(stmt.semicolon().is_some());
}

#[test]
fn member_call_with_string_argument_has_the_expected_shape() {
    let statements = esflow::parse_source(SourceUrl::anonymous(), "console.log(\"hi\")")
        .expect("parse failed");
    let Statement::Expression(stmt) = &statements[0];
    let Expression::Call(call) = stmt.expression() else {
        panic!("expected a call expression");
    };
    let Expression::Member(callee) = call.callee() else {
        panic!("expected a member expression callee");
    };
    assert!(matches!(callee.object(), Expression::Identifier(id) if id.name() == "console"));
    assert_eq!(callee.property().name(), "log");
    assert_eq!(call.args().len(), 1);
    assert!(call.args()[0].comma().is_none());
}

#[test]
fn nested_member_expression_associates_left_to_right() {
    let statements =
        esflow::parse_source(SourceUrl::anonymous(), "a.b.c").expect("parse failed");
    let Statement::Expression(stmt) = &statements[0];
    let Expression::Member(outer) = stmt.expression() else {
        panic!("expected a member expression");
    };
    assert_eq!(outer.property().name(), "c");
    let Expression::Member(inner) = outer.object() else {
        panic!("expected a nested member expression");
    };
    assert_eq!(inner.property().name(), "b");
    assert!(matches!(inner.object(), Expression::Identifier(id) if id.name() == "a"));
}

#[test]
fn call_with_trailing_comma_keeps_both_arguments_with_commas() {
    let statements =
        esflow::parse_source(SourceUrl::anonymous(), "f(a, b,)").expect("parse failed");
    let Statement::Expression(stmt) = &statements[0];
    let Expression::Call(call) = stmt.expression() else {
        panic!("expected a call expression");
    };
    assert_eq!(call.args().len(), 2);
    assert!(call.args()[0].comma().is_some());
    assert!(call.args()[1].comma().is_some());
}

#[test]
fn truncated_call_argument_list_is_a_fatal_end_of_input_diagnostic() {
    let err = esflow::parse_source(SourceUrl::anonymous(), "f(a,")
        .expect_err("truncated input must fail");
    assert!(err.message().contains("end of input"));
}
