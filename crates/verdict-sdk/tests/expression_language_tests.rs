//! FEEL expression language tests through the SDK
//!
//! Expressions are evaluated as literal decisions and through
//! `DecisionEngine::evaluate_expression`.

mod common;

use common::{ctx, feel, TestEngine};
use serde_json::json;
use verdict_sdk::Value;

// ========== Arithmetic and Precedence ==========

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(feel("2 + 3 * 4", json!({})), Value::Number(14.0));
    assert_eq!(feel("(2 + 3) * 4", json!({})), Value::Number(20.0));
    assert_eq!(feel("2 ** 3 ** 2", json!({})), Value::Number(512.0));
    assert_eq!(feel("10 / 0", json!({})), Value::Null);
}

#[test]
fn test_names_with_spaces() {
    let context = json!({"Monthly Salary": 5000, "Bonus Rate": 0.5});
    assert_eq!(
        feel("Monthly Salary * 12 + Monthly Salary * Bonus Rate", context),
        Value::Number(62500.0)
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        feel("\"Hello \" + First Name", json!({"First Name": "Ada"})),
        Value::from("Hello Ada")
    );
}

// ========== Ternary Logic ==========

#[test]
fn test_null_in_boolean_logic() {
    let context = json!({"Unknown": null});
    assert_eq!(feel("Unknown and false", context.clone()), Value::Bool(false));
    assert_eq!(feel("Unknown and true", context.clone()), Value::Null);
    assert_eq!(feel("Unknown or true", context.clone()), Value::Bool(true));
    assert_eq!(feel("Unknown + 1", context), Value::Null);
}

#[test]
fn test_conditionals_and_comparisons() {
    let expression = "if Age >= 18 and Country = \"US\" then \"eligible\" else \"ineligible\"";
    assert_eq!(
        feel(expression, json!({"Age": 30, "Country": "US"})),
        Value::from("eligible")
    );
    assert_eq!(
        feel(expression, json!({"Age": 30, "Country": "CA"})),
        Value::from("ineligible")
    );
}

#[test]
fn test_property_access() {
    let context = json!({"applicant": {"name": "Ada", "address": {"city": "London"}}});
    assert_eq!(feel("applicant.address.city", context), Value::from("London"));
}

// ========== Built-in Functions ==========

#[test]
fn test_string_functions() {
    assert_eq!(feel("string length(\"héllo\")", json!({})), Value::Number(5.0));
    assert_eq!(feel("upper case(\"abc\")", json!({})), Value::from("ABC"));
    assert_eq!(feel("substring(\"foobar\", 3)", json!({})), Value::from("obar"));
    assert_eq!(
        feel("substring(string: \"foobar\", start position: 3, length: 3)", json!({})),
        Value::from("oba")
    );
    assert_eq!(
        feel("contains(\"foobar\", \"bar\")", json!({})),
        Value::Bool(true)
    );
    assert_eq!(
        feel("matches(\"FOOBAR\", \"^foo\", \"i\")", json!({})),
        Value::Bool(true)
    );
}

#[test]
fn test_list_functions() {
    assert_eq!(feel("sum([1, 2, 3])", json!({})), Value::Number(6.0));
    assert_eq!(feel("count(Items)", json!({"Items": [1, 2, 3, 4]})), Value::Number(4.0));
    assert_eq!(feel("max(Scores)", json!({"Scores": [3, 9, 4]})), Value::Number(9.0));
    assert_eq!(
        feel("list contains([1, 2], 2)", json!({})),
        Value::Bool(true)
    );
    assert_eq!(
        feel("reverse([1, 2, 3])", json!({})),
        ctx(json!([3, 2, 1]))
    );
}

#[test]
fn test_numeric_and_date_functions() {
    assert_eq!(feel("round half up(2.5, 0)", json!({})), Value::Number(3.0));
    assert_eq!(feel("abs(-4)", json!({})), Value::Number(4.0));
    assert_eq!(feel("date(2017, 1, 5)", json!({})), Value::from("2017-01-05"));
    assert_eq!(
        feel("number(\"1,000.25\", \",\", \".\")", json!({})),
        Value::Number(1000.25)
    );
}

#[test]
fn test_function_misuse() {
    // Wrong types and unbindable arguments yield null
    assert_eq!(feel("upper case(1)", json!({})), Value::Null);
    assert_eq!(feel("abs(n: 1, extra: 2)", json!({})), Value::Null);

    let engine = verdict_sdk::DecisionEngine::default();
    let err = engine
        .evaluate_expression("no such function(1)", &ctx(json!({})))
        .unwrap_err();
    assert!(err.to_string().contains("Unknown function"));
}

// ========== Literal Decisions ==========

#[test]
fn test_literal_decisions_in_a_model() {
    let engine = TestEngine::new()
        .with_decision(
            r#"
            - name: Annual Income
              expression: "Monthly Salary * 12"
            "#,
        )
        .with_decision(
            r#"
            - name: Label
              expression: 'upper case(Name) + " (" + string(Age) + ")"'
            "#,
        )
        .build();

    let result = engine
        .evaluate(&ctx(json!({"Monthly Salary": 1000, "Name": "ada", "Age": 36})))
        .unwrap();
    assert_eq!(result.get("Annual Income"), Some(&Value::Number(12000.0)));
    assert_eq!(result.get("Label"), Some(&Value::from("ADA (36)")));
}
