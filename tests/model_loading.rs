mod common;

use common::fixture;
use modelrpc::model::{ModelError, ModelFormat, ModelLoader, SchemaKind};
use modelrpc::Error;

#[tokio::test]
async fn test_load_json_fixture() {
    let model = ModelLoader::new()
        .load_from_file(fixture("calculator.json"))
        .await
        .unwrap();

    assert_eq!(model.endpoint_url, "http://localhost:4000");
    let names: Vec<_> = model.operation_names().collect();
    assert_eq!(
        names,
        vec!["add", "subtract", "multiply", "sum_pair", "describe_point"]
    );

    let add = model.operation("add").unwrap();
    assert_eq!(add.name, "add");
    assert_eq!(add.documentation, "Adds numbers together.");
    assert!(matches!(add.input.kind, SchemaKind::List(_)));
    assert_eq!(add.output.documentation(), "The sum");

    let point = model.operation("describe_point").unwrap();
    let members: Vec<_> = point.input.members().unwrap().keys().cloned().collect();
    assert_eq!(members, vec!["label", "visible", "point"]);
}

#[tokio::test]
async fn test_load_yaml_fixture_matches_json() {
    let loader = ModelLoader::new();
    let yaml = loader
        .load_from_file(fixture("calculator.yaml"))
        .await
        .unwrap();
    let json = loader
        .load_from_file(fixture("calculator.json"))
        .await
        .unwrap();

    let shape = |model: &modelrpc::ApiModel| -> Vec<(String, String)> {
        model
            .operation("sum_pair")
            .unwrap()
            .input
            .members()
            .unwrap()
            .iter()
            .map(|(name, node)| (name.clone(), node.type_name()))
            .collect()
    };
    assert_eq!(shape(&yaml), shape(&json));
    assert_eq!(
        shape(&yaml),
        vec![
            ("x".to_string(), "integer".to_string()),
            ("y".to_string(), "integer".to_string())
        ]
    );

    // Documentation is carried per source and is not part of the shape.
    let member_doc = |model: &modelrpc::ApiModel| {
        model.operation("sum_pair").unwrap().input.members().unwrap()["x"]
            .documentation()
            .to_string()
    };
    assert_eq!(member_doc(&yaml), "");
    assert_eq!(member_doc(&json), "First term");
    // No documentation key defaults to empty.
    assert_eq!(yaml.operation("sum_pair").unwrap().documentation, "");
}

#[tokio::test]
async fn test_missing_output_is_rejected() {
    let err = ModelLoader::new()
        .load_from_file(fixture("missing_output.json"))
        .await
        .unwrap_err();
    match err {
        ModelError::ValidationError(msg) => assert!(msg.contains("output"), "{}", msg),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_reports_path() {
    let err = ModelLoader::new()
        .load_from_file(fixture("does_not_exist.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::LoadError { .. }));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[tokio::test]
async fn test_unsupported_kinds_load_but_fail_at_validation() {
    let model = ModelLoader::new()
        .load_from_file(fixture("future_kinds.json"))
        .await
        .unwrap();

    let scale = model.operation("scale").unwrap();
    assert_eq!(
        scale.input.unsupported_kinds(),
        vec![("$.factor".to_string(), "float".to_string())]
    );

    let validator = modelrpc::interpreter::ParamsValidator::new();
    let err = validator
        .validate(
            &scale.input,
            modelrpc::Args::new().kwarg("value", 2).kwarg("factor", 1.5),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedSchemaKind { ref kind, .. } if kind == "float"));
}

#[test]
fn test_load_from_str_reports_yaml_error() {
    let err = ModelLoader::new()
        .load_from_str("endpoint_url: [unclosed", ModelFormat::Yaml)
        .unwrap_err();
    assert!(matches!(err, ModelError::Parse(_)), "{:?}", err);
}
