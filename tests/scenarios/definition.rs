//! Test: definitions built from code and from YAML reach the service intact

use crate::helpers::*;
use pipeline_workflow::client::CreateOptions;
use pipeline_workflow::core::config::PipelineConfig;
use pipeline_workflow::core::{
    Condition, ConditionStep, ExecutionVariable, Parameter, Pipeline, RegisterModel,
    RequestValue, Step, StepType,
};
use pipeline_workflow::WorkflowSession;
use serde_json::{json, Value};

fn train_register_pipeline() -> Pipeline {
    let threshold = Parameter::float("Threshold").unwrap().with_default(0.8).unwrap();
    let approval = Parameter::string("ApprovalStatus")
        .unwrap()
        .with_default("PendingManualApproval")
        .unwrap();

    let train = Step::new(
        "Train",
        StepType::Training,
        RequestValue::from_pairs([
            ("JobName", RequestValue::from(ExecutionVariable::PipelineExecutionId)),
            ("Rate", RequestValue::from(&threshold)),
        ]),
    );
    let artifacts = train.properties().get("ModelArtifacts").get("S3ModelArtifacts");
    let accuracy = train
        .properties()
        .get("FinalMetricDataList")
        .index(0)
        .get("Value");

    let register = RegisterModel::new("Register", "image:latest", artifacts)
        .with_content_types(vec!["text/csv".to_string()])
        .with_approval_status(&approval);

    let gate = ConditionStep::new(
        "CheckAccuracy",
        vec![Condition::greater_than_or_equal_to(accuracy, &threshold)],
    )
    .with_if_steps(vec![register.into()]);

    Pipeline::new("TrainAndRegister")
        .unwrap()
        .with_parameters(vec![threshold, approval])
        .unwrap()
        .with_step(train)
        .with_step(gate)
}

/// Every reference in a nested definition is sent as its expression
#[tokio::test]
async fn test_nested_definition_is_fully_interpolated() {
    let session = WorkflowSession::new(MockClient::new());
    let pipeline = train_register_pipeline();

    session
        .create(&pipeline, &CreateOptions::new(ROLE_ARN))
        .await
        .unwrap();

    let stored = session.client().stored_definition("TrainAndRegister").unwrap();
    let definition: Value = serde_json::from_str(&stored).unwrap();

    assert_eq!(
        definition["Parameters"],
        json!([
            {"Name": "Threshold", "Type": "Float", "DefaultValue": 0.8},
            {"Name": "ApprovalStatus", "Type": "String", "DefaultValue": "PendingManualApproval"}
        ])
    );
    assert_eq!(
        definition["Steps"][0]["Arguments"],
        json!({
            "JobName": {"Get": "Execution.PipelineExecutionId"},
            "Rate": {"Get": "Parameters.Threshold"}
        })
    );

    let gate = &definition["Steps"][1];
    assert_eq!(gate["Type"], "Condition");
    assert_eq!(
        gate["Arguments"]["Conditions"],
        json!([{
            "Type": "GreaterThanOrEqualTo",
            "LeftValue": {"Get": "Steps.Train.FinalMetricDataList[0].Value"},
            "RightValue": {"Get": "Parameters.Threshold"}
        }])
    );

    let register = &gate["Arguments"]["IfSteps"][0];
    assert_eq!(register["Name"], "Register");
    assert_eq!(register["Type"], "RegisterModel");
    assert_eq!(
        register["Arguments"]["InferenceSpecification"]["Containers"][0]["ModelDataUrl"],
        json!({"Get": "Steps.Train.ModelArtifacts.S3ModelArtifacts"})
    );
    assert_eq!(
        register["Arguments"]["ModelApprovalStatus"],
        json!({"Get": "Parameters.ApprovalStatus"})
    );
    assert_eq!(gate["Arguments"]["ElseSteps"], json!([]));
}

/// Serializing twice gives the same string
#[test]
fn test_definition_is_stable() {
    let pipeline = train_register_pipeline();
    assert_eq!(pipeline.definition().unwrap(), pipeline.definition().unwrap());
}

/// A YAML pipeline and its hand-built twin produce identical definitions
#[tokio::test]
async fn test_yaml_pipeline_matches_code_pipeline() {
    let yaml = r#"
name: "MyPipeline"
parameters:
  - name: Threshold
    type: Float
steps:
  - name: Train
    type: Training
    arguments:
      Rate: "{{ Parameters.Threshold }}"
"#;
    let from_yaml = PipelineConfig::from_yaml(yaml).unwrap().to_pipeline().unwrap();
    let from_code = sample_pipeline("MyPipeline");

    assert_eq!(from_yaml.definition().unwrap(), from_code.definition().unwrap());

    let session = WorkflowSession::new(MockClient::new().with_existing_pipeline("MyPipeline"));
    session
        .upsert(&from_yaml, &CreateOptions::new(ROLE_ARN))
        .await
        .unwrap();

    assert_eq!(
        session.client().stored_definition("MyPipeline").unwrap(),
        r#"{"Version": "2020-12-01", "Metadata": {}, "Parameters": [{"Name": "Threshold", "Type": "Float"}], "Steps": [{"Name": "Train", "Type": "Training", "Arguments": {"Rate": {"Get": "Parameters.Threshold"}}}]}"#
    );
}
