//! Integration tests for DecisionEngine
//!
//! Models are loaded from YAML, JSON and files, then evaluated end to end.

mod common;

use common::{ctx, TestEngine};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use verdict_sdk::{DecisionEngine, DecisionEngineBuilder, EngineConfig, SdkError, Value};

const LOAN_MODEL: &str = r#"
model:
  name: loan-approval
  decisions:
    - name: Approval
      decision_table:
        id: dt_approval
        hit_policy: FIRST
        inputs:
          - label: Applicant.Age
            type: number
          - label: Credit Score
            type: number
        outputs:
          - label: Result
            type: string
        rules:
          - inputs: ["< 18", "-"]
            outputs: ['"Declined"']
          - inputs: ["-", ">= 700"]
            outputs: ['"Approved"']
          - inputs: ["-", "[600..700)"]
            outputs: ['"Review"']
          - inputs: ["-", "-"]
            outputs: ['"Declined"']
    - name: Monthly Payment
      expression: "PMT(Amount, 0, 12)"
  bkms:
    - name: PMT
      parameters: [p, r, n]
      expression: "if r = 0 then p / n else (p*r/12)/(1-(1+r/12)**-n)"
"#;

fn applicant(age: i64, score: i64) -> Value {
    ctx(json!({"Applicant": {"Age": age}, "Credit Score": score, "Amount": 1200}))
}

// ========== Model Loading Tests ==========

#[test]
fn test_load_yaml_model() {
    let engine = DecisionEngine::default();
    let count = engine.load_model_str(LOAN_MODEL).unwrap();

    assert_eq!(count, 3);
    assert_eq!(engine.decision_table_names(), vec!["Approval"]);
    assert_eq!(engine.literal_decision_names(), vec!["Monthly Payment"]);
    assert_eq!(engine.bkm_names(), vec!["PMT"]);
}

#[test]
fn test_evaluate_loan_model() {
    let engine = DecisionEngine::default();
    engine.load_model_str(LOAN_MODEL).unwrap();

    let cases = [
        (16, 800, "Declined"),
        (30, 720, "Approved"),
        (30, 650, "Review"),
        (30, 500, "Declined"),
    ];
    for (age, score, expected) in cases {
        let result = engine.evaluate(&applicant(age, score)).unwrap();
        assert_eq!(
            result.get("Approval"),
            Some(&Value::from(expected)),
            "age {} score {}",
            age,
            score
        );
        assert_eq!(result.get("Monthly Payment"), Some(&Value::Number(100.0)));
    }
}

#[test]
fn test_load_json_model() {
    let json_model = json!({
        "model": {
            "name": "greeting",
            "decisions": [
                {"name": "Greeting", "expression": "\"Hello \" + Name"}
            ]
        }
    })
    .to_string();

    let engine = DecisionEngine::default();
    assert_eq!(engine.load_model_str(&json_model).unwrap(), 1);

    let result = engine
        .evaluate_decision("Greeting", &ctx(json!({"Name": "Ada"})))
        .unwrap();
    assert_eq!(result, Value::from("Hello Ada"));
}

#[test]
fn test_load_empty_model_text() {
    let engine = DecisionEngine::default();
    assert!(matches!(
        engine.load_model_str("   \n"),
        Err(SdkError::InvalidModel(_))
    ));
}

#[test]
fn test_load_malformed_model() {
    let engine = DecisionEngine::default();
    let err = engine
        .load_model_str("model:\n  decisions:\n    - name: Orphan\n")
        .unwrap_err();
    assert!(matches!(err, SdkError::Parse(_)));
    assert!(engine.decision_table_names().is_empty());
}

#[test]
fn test_load_model_files() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("loan.yaml");
    std::fs::write(&yaml_path, LOAN_MODEL).unwrap();

    let json_path = dir.path().join("extra.json");
    let mut json_file = std::fs::File::create(&json_path).unwrap();
    write!(
        json_file,
        r#"{{"decisions": [{{"name": "Adult", "expression": "Applicant.Age >= 18"}}]}}"#
    )
    .unwrap();

    let engine = DecisionEngineBuilder::new()
        .add_model_file(&yaml_path)
        .add_model_file(&json_path)
        .build()
        .unwrap();

    assert_eq!(
        engine.literal_decision_names(),
        vec!["Adult", "Monthly Payment"]
    );
    let result = engine.evaluate(&applicant(40, 710)).unwrap();
    assert_eq!(result.get("Adult"), Some(&Value::Bool(true)));
    assert_eq!(result.get("Approval"), Some(&Value::from("Approved")));
}

#[test]
fn test_model_files_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("loan.yaml");
    std::fs::write(&model_path, LOAN_MODEL).unwrap();

    let config_path = dir.path().join("verdict.json");
    std::fs::write(
        &config_path,
        json!({"model_files": [model_path], "max_recursion_depth": 10}).to_string(),
    )
    .unwrap();

    let config = EngineConfig::load_from(&config_path).unwrap();
    let engine = DecisionEngineBuilder::new()
        .with_config(config)
        .build()
        .unwrap();

    assert_eq!(engine.config().max_recursion_depth, 10);
    assert_eq!(engine.bkm_names(), vec!["PMT"]);
}

#[test]
fn test_empty_model_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.yaml");
    std::fs::write(&path, "").unwrap();

    let engine = DecisionEngine::default();
    assert!(matches!(
        engine.load_model_file(&path),
        Err(SdkError::InvalidModel(message)) if message.contains("empty.yaml")
    ));
}

// ========== Hit Policy Tests ==========

#[test]
fn test_collect_sum_shorthand() {
    let engine = TestEngine::new().with_decision(
        r#"
        - name: Risk Points
          decision_table:
            hit_policy: C+
            inputs:
              - label: Age
              - label: Income
            outputs:
              - label: Points
            rules:
              - inputs: ["< 25", "-"]
                outputs: ["10"]
              - inputs: ["-", "< 30000"]
                outputs: ["20"]
              - inputs: ["-", ">= 100000"]
                outputs: ["-5"]
        "#,
    );

    assert_eq!(
        engine.decide("Risk Points", json!({"Age": 22, "Income": 25000})),
        ctx(json!({"Points": 30}))
    );
    assert_eq!(
        engine.decide("Risk Points", json!({"Age": 40, "Income": 150000})),
        ctx(json!({"Points": -5}))
    );
}

#[test]
fn test_rule_order_and_collect_count() {
    let engine = TestEngine::new()
        .with_decision(
            r#"
            - name: Flags
              decision_table:
                hit_policy: RULE_ORDER
                inputs:
                  - label: Amount
                outputs:
                  - label: ""
                rules:
                  - inputs: ["> 1000"]
                    outputs: ['"large"']
                  - inputs: ["> 10000"]
                    outputs: ['"very large"']
                  - inputs: ["-"]
                    outputs: ['"seen"']
            "#,
        )
        .with_decision(
            r#"
            - name: Flag Count
              decision_table:
                hit_policy: COLLECT
                aggregation: COUNT
                inputs:
                  - label: Amount
                outputs:
                  - label: ""
                rules:
                  - inputs: ["> 1000"]
                    outputs: ["1"]
                  - inputs: ["> 10000"]
                    outputs: ["1"]
            "#,
        );

    let result = engine.build().evaluate(&ctx(json!({"Amount": 5000}))).unwrap();
    assert_eq!(result.get("Flags"), Some(&ctx(json!(["large", "seen"]))));
    assert_eq!(result.get("Flag Count"), Some(&Value::Number(1.0)));
}

#[test]
fn test_priority_with_output_values() {
    let engine = TestEngine::new().with_decision(
        r#"
        - name: Routing
          decision_table:
            hit_policy: P
            inputs:
              - label: Country
                allowed_values: ['"US"', '"CA"', '"FR"']
            outputs:
              - label: Queue
                output_values: ['"manual"', '"standard"']
            rules:
              - inputs: ["-"]
                outputs: ['"standard"']
              - inputs: ['"FR"']
                outputs: ['"manual"']
        "#,
    );

    assert_eq!(
        engine.decide("Routing", json!({"Country": "FR"})),
        Value::from("manual")
    );
    assert_eq!(
        engine.decide("Routing", json!({"Country": "US"})),
        Value::from("standard")
    );

    let err = engine
        .build()
        .evaluate(&ctx(json!({"Country": "DE"})))
        .unwrap_err();
    assert!(err.to_string().contains("allowed values"));
}

#[test]
fn test_unique_with_no_match_is_null() {
    let engine = TestEngine::new().with_decision(
        r#"
        - name: Band
          decision_table:
            inputs:
              - label: Score
            outputs:
              - label: Band
            rules:
              - inputs: ["[0..50)"]
                outputs: ['"low"']
              - inputs: ["[50..100]"]
                outputs: ['"high"']
        "#,
    );

    assert_eq!(engine.decide("Band", json!({"Score": 75})), Value::from("high"));
    assert_eq!(engine.decide("Band", json!({"Score": 150})), Value::Null);
}

// ========== BKM Tests ==========

#[test]
fn test_rule_outputs_invoke_bkms() {
    let engine = TestEngine::new()
        .with_bkm(
            r#"
            - name: Discount
              parameters: [price, rate]
              expression: "price * (1 - rate)"
            "#,
        )
        .with_decision(
            r#"
            - name: Final Price
              decision_table:
                hit_policy: FIRST
                inputs:
                  - label: Member
                outputs:
                  - label: ""
                rules:
                  - inputs: ["true"]
                    outputs: ["Discount(Price, 0.5)"]
                  - inputs: ["-"]
                    outputs: ["Discount(rate: 0, price: Price)"]
            "#,
        );

    assert_eq!(
        engine.decide("Final Price", json!({"Member": true, "Price": 80})),
        Value::Number(40.0)
    );
    assert_eq!(
        engine.decide("Final Price", json!({"Member": false, "Price": 80})),
        Value::Number(80.0)
    );
}

#[test]
fn test_recursive_bkm() {
    let engine = TestEngine::new()
        .with_bkm(
            r#"
            - name: Factorial
              parameters: [n]
              expression: "if n <= 1 then 1 else n * Factorial(n - 1)"
            "#,
        )
        .with_decision(
            r#"
            - name: Result
              expression: "Factorial(N)"
            "#,
        );

    assert_eq!(engine.decide("Result", json!({"N": 6})), Value::Number(720.0));
}

#[test]
fn test_recursion_limit_makes_literal_null() {
    let engine = TestEngine::new()
        .with_config(EngineConfig::new().with_max_recursion_depth(5))
        .with_bkm(
            r#"
            - name: Loop
              parameters: [n]
              expression: "Loop(n + 1)"
            "#,
        )
        .with_decision(
            r#"
            - name: Endless
              expression: "Loop(0)"
            "#,
        )
        .build();

    let result = engine.evaluate(&ctx(json!({}))).unwrap();
    assert_eq!(result.get("Endless"), Some(&Value::Null));
    assert!(engine.evaluate_decision("Endless", &ctx(json!({}))).is_err());
}

// ========== Concurrency Tests ==========

#[test]
fn test_concurrent_evaluation() {
    let engine = Arc::new(DecisionEngine::default());
    engine.load_model_str(LOAN_MODEL).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let score = if i % 2 == 0 { 750 } else { 550 };
                engine.evaluate(&applicant(30, score)).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        let expected = if i % 2 == 0 { "Approved" } else { "Declined" };
        assert_eq!(result.get("Approval"), Some(&Value::from(expected)));
    }
}

#[test]
fn test_registration_during_evaluation() {
    let engine = Arc::new(DecisionEngine::default());
    engine.load_model_str(LOAN_MODEL).unwrap();

    let writer = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            for i in 0..50 {
                let model = format!(
                    "model:\n  decisions:\n    - name: Extra {i}\n      expression: \"{i}\"\n"
                );
                engine.load_model_str(&model).unwrap();
            }
        })
    };

    for _ in 0..50 {
        let result = engine.evaluate(&applicant(30, 720)).unwrap();
        assert_eq!(result.get("Approval"), Some(&Value::from("Approved")));
    }
    writer.join().unwrap();
    assert_eq!(engine.literal_decision_names().len(), 51);
}
