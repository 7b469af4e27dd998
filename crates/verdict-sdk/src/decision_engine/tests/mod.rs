//! Unit tests for DecisionEngine

use super::*;
use crate::config::EngineConfig;
use crate::error::SdkError;
use verdict_core::{
    BusinessKnowledgeModel, DecisionTable, HitPolicy, InputClause, LiteralDecision, OutputClause,
    Rule, Value,
};

fn age_table() -> DecisionTable {
    DecisionTable::new("dt_age")
        .with_name("Eligibility")
        .with_hit_policy(HitPolicy::First)
        .add_input(InputClause::new("Age"))
        .add_output(OutputClause::new("Eligible"))
        .add_rule(Rule::from_text([">= 18"], ["true"]))
        .add_rule(Rule::from_text(["-"], ["false"]))
}

fn ctx(age: f64) -> Value {
    Value::object([("Age", Value::Number(age))])
}

// ========== Registration Tests ==========

#[test]
fn test_engine_creation() {
    let engine = DecisionEngine::new(EngineConfig::new());
    assert!(engine.decision_table_names().is_empty());
    assert!(engine.literal_decision_names().is_empty());
    assert!(engine.bkm_names().is_empty());
    assert_eq!(engine.config().max_recursion_depth, 64);
}

#[test]
fn test_table_without_name_uses_id() {
    let engine = DecisionEngine::default();
    engine
        .add_decision_table(DecisionTable::new("dt_only_id"))
        .unwrap();
    assert_eq!(engine.decision_table_names(), vec!["dt_only_id"]);
}

#[test]
fn test_table_without_name_or_id_is_rejected() {
    let engine = DecisionEngine::default();
    let err = engine.add_decision_table(DecisionTable::new("")).unwrap_err();
    assert!(matches!(err, SdkError::InvalidModel(_)));
}

#[test]
fn test_tables_built_in_code_get_cached_asts() {
    let engine = DecisionEngine::default();
    engine.add_decision_table(age_table()).unwrap();

    let table = engine.decision_table("Eligibility").unwrap();
    // ">= 18" and "-" are unary tests and stay uncached
    assert!(!table.rules[0].input_entries[0].has_ast());
    assert!(!table.rules[1].input_entries[0].has_ast());
    assert!(table.rules[0].output_entries[0].has_ast());
}

#[test]
fn test_ast_cache_disabled() {
    let engine = DecisionEngine::new(EngineConfig::new().with_ast_cache(false));
    engine.add_decision_table(age_table()).unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Double", "Age * 2"))
        .unwrap();

    let table = engine.decision_table("Eligibility").unwrap();
    assert!(!table.rules[0].output_entries[0].has_ast());
    assert!(engine.literal_decision("Double").unwrap().ast.is_none());

    // Literal decisions parse from text; uncached output cells are literal text
    let result = engine.evaluate(&ctx(21.0)).unwrap();
    assert_eq!(result.get("Eligible"), None);
    assert_eq!(result.get("Eligibility"), Some(&Value::from("true")));
    assert_eq!(result.get("Double"), Some(&Value::Number(42.0)));
}

#[test]
fn test_names_are_unique_across_kinds() {
    let engine = DecisionEngine::default();
    engine.add_decision_table(age_table()).unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Eligibility", "Age > 30"))
        .unwrap();

    assert!(engine.decision_table_names().is_empty());
    assert_eq!(engine.literal_decision_names(), vec!["Eligibility"]);

    engine.add_decision_table(age_table()).unwrap();
    assert!(engine.literal_decision_names().is_empty());
    assert!(engine.has_decision("Eligibility"));
}

#[test]
fn test_remove_and_clear() {
    let engine = DecisionEngine::default();
    engine.add_decision_table(age_table()).unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Greeting", "\"hi\""))
        .unwrap();
    engine
        .add_bkm(BusinessKnowledgeModel::new("Twice", "x * 2").with_parameters(["x"]))
        .unwrap();

    assert!(engine.remove_decision_table("Eligibility"));
    assert!(!engine.remove_decision_table("Eligibility"));
    assert!(engine.remove_literal_decision("Greeting"));
    assert!(!engine.remove_literal_decision("Greeting"));
    assert!(engine.remove_bkm("Twice").unwrap());
    assert!(!engine.remove_bkm("Twice").unwrap());
    assert!(engine.remove_bkm("").is_err());

    engine.add_decision_table(age_table()).unwrap();
    engine.clear();
    assert!(!engine.has_decision("Eligibility"));
}

// ========== Evaluation Tests ==========

#[test]
fn test_evaluate_all_decisions() {
    let engine = DecisionEngine::default();
    engine.add_decision_table(age_table()).unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Next Year", "Age + 1"))
        .unwrap();

    let result = engine.evaluate(&ctx(17.0)).unwrap();
    assert_eq!(result.get("Eligibility"), Some(&Value::Bool(false)));
    assert_eq!(result.get("Next Year"), Some(&Value::Number(18.0)));
}

#[test]
fn test_failing_literal_decision_contributes_null() {
    let engine = DecisionEngine::default();
    engine
        .add_literal_decision(LiteralDecision::new("Broken", "Missing Variable + 1"))
        .unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Fine", "Age"))
        .unwrap();

    let result = engine.evaluate(&ctx(40.0)).unwrap();
    assert_eq!(result.get("Broken"), Some(&Value::Null));
    assert_eq!(result.get("Fine"), Some(&Value::Number(40.0)));

    // Evaluated alone, the error surfaces
    assert!(engine.evaluate_decision("Broken", &ctx(40.0)).is_err());
}

#[test]
fn test_table_error_propagates() {
    let engine = DecisionEngine::default();
    let table = DecisionTable::new("dt_grade")
        .with_name("Grade")
        .add_input(
            InputClause::new("Grade").with_allowed_values(vec!["\"A\"".into(), "\"B\"".into()]),
        )
        .add_output(OutputClause::new("Pass"))
        .add_rule(Rule::from_text(["\"A\""], ["true"]));
    engine.add_decision_table(table).unwrap();

    let context = Value::object([("Grade", Value::from("C"))]);
    let err = engine.evaluate(&context).unwrap_err();
    assert!(matches!(err, SdkError::Runtime(_)));
}

#[test]
fn test_evaluate_unknown_decision() {
    let engine = DecisionEngine::default();
    assert!(matches!(
        engine.evaluate_decision("Nope", &ctx(1.0)),
        Err(SdkError::DecisionNotFound(name)) if name == "Nope"
    ));
}

#[test]
fn test_decisions_can_call_bkms() {
    let engine = DecisionEngine::default();
    engine
        .add_bkm(BusinessKnowledgeModel::new("Twice", "x * 2").with_parameters(["x"]))
        .unwrap();
    engine
        .add_literal_decision(LiteralDecision::new("Doubled Age", "Twice(Age)"))
        .unwrap();

    assert_eq!(
        engine.evaluate_decision("Doubled Age", &ctx(21.0)).unwrap(),
        Value::Number(42.0)
    );
    assert_eq!(
        engine
            .invoke_bkm("Twice", vec![Value::Number(5.0)], &ctx(0.0))
            .unwrap(),
        Value::Number(10.0)
    );
    assert_eq!(
        engine.evaluate_expression("Twice(x: 3) + 1", &ctx(0.0)).unwrap(),
        Value::Number(7.0)
    );
}

#[test]
fn test_recursion_limit_from_config() {
    let engine = DecisionEngine::new(EngineConfig::new().with_max_recursion_depth(4));
    engine
        .add_bkm(BusinessKnowledgeModel::new("Forever", "Forever(n)").with_parameters(["n"]))
        .unwrap();

    let err = engine
        .invoke_bkm("Forever", vec![Value::Number(1.0)], &ctx(0.0))
        .unwrap_err();
    assert!(err.to_string().contains("recursion depth limit of 4"));
}

#[test]
fn test_lenient_input_values() {
    let engine = DecisionEngine::new(EngineConfig::new().with_strict_input_values(false));
    let table = DecisionTable::new("dt_grade")
        .with_name("Grade")
        .add_input(InputClause::new("Grade").with_allowed_values(vec!["\"A\"".into()]))
        .add_output(OutputClause::new("Pass"))
        .add_rule(Rule::from_text(["\"A\""], ["true"]));
    engine.add_decision_table(table).unwrap();

    let result = engine
        .evaluate(&Value::object([("Grade", Value::from("C"))]))
        .unwrap();
    assert_eq!(result.get("Grade"), Some(&Value::Null));
}

#[test]
fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DecisionEngine>();
}
