//! Test: starting executions

use crate::helpers::*;
use indexmap::IndexMap;
use pipeline_workflow::client::{CreateOptions, ParameterOverride};
use pipeline_workflow::{WorkflowError, WorkflowSession};
use serde_json::json;

/// Starting a pipeline the service does not know sends no start request
#[tokio::test]
async fn test_start_missing_pipeline_is_not_found() {
    let session = WorkflowSession::new(MockClient::new());

    let err = session
        .start(&sample_pipeline("Ghost"), None, None)
        .await
        .unwrap_err();

    match err {
        WorkflowError::PipelineNotFound { name } => assert_eq!(name, "Ghost"),
        other => panic!("Expected PipelineNotFound, got {:?}", other),
    }
    assert_eq!(session.client().calls("describe_pipeline"), 1);
    assert_eq!(session.client().calls("start_pipeline_execution"), 0);
}

/// Overrides are sent in the order given, values as strings
#[tokio::test]
async fn test_start_forwards_parameter_overrides_in_order() {
    let session = WorkflowSession::new(MockClient::new().with_existing_pipeline("MyPipeline"));

    let mut overrides = IndexMap::new();
    overrides.insert("Threshold".to_string(), json!(0.5));
    overrides.insert("InstanceType".to_string(), json!("ml.m5.large"));
    overrides.insert("Count".to_string(), json!(3));

    let execution = session
        .start(&sample_pipeline("MyPipeline"), Some(&overrides), Some("manual run"))
        .await
        .unwrap();

    assert!(execution.arn().ends_with("pipeline/mypipeline/execution/1"));

    let started = session.client().started();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].pipeline_name, "MyPipeline");
    assert_eq!(
        started[0].pipeline_execution_description.as_deref(),
        Some("manual run")
    );
    assert_eq!(
        started[0].pipeline_parameters.clone().unwrap(),
        vec![
            ParameterOverride {
                name: "Threshold".to_string(),
                value: "0.5".to_string(),
            },
            ParameterOverride {
                name: "InstanceType".to_string(),
                value: "ml.m5.large".to_string(),
            },
            ParameterOverride {
                name: "Count".to_string(),
                value: "3".to_string(),
            },
        ]
    );
}

/// Without overrides the request carries no parameter list at all
#[tokio::test]
async fn test_start_without_overrides() {
    let session = WorkflowSession::new(MockClient::new());
    let pipeline = sample_pipeline("MyPipeline");
    session
        .create(&pipeline, &CreateOptions::new(ROLE_ARN))
        .await
        .unwrap();

    session.start(&pipeline, None, None).await.unwrap();

    let started = session.client().started();
    assert!(started[0].pipeline_parameters.is_none());
    assert!(started[0].pipeline_execution_description.is_none());
}

/// Each start yields a distinct execution handle
#[tokio::test]
async fn test_start_twice_gives_two_executions() {
    let session = WorkflowSession::new(MockClient::new().with_existing_pipeline("MyPipeline"));
    let pipeline = sample_pipeline("MyPipeline");

    let first = session.start(&pipeline, None, None).await.unwrap();
    let second = session.start(&pipeline, None, None).await.unwrap();

    assert_ne!(first.arn(), second.arn());
    assert_eq!(session.client().calls("start_pipeline_execution"), 2);
}

/// Stop and step listing go through the execution handle
#[tokio::test]
async fn test_execution_stop_and_list_steps() {
    let session = WorkflowSession::new(MockClient::new().with_existing_pipeline("MyPipeline"));
    let execution = session
        .start(&sample_pipeline("MyPipeline"), None, None)
        .await
        .unwrap();

    let stopped = execution.stop().await.unwrap();
    assert_eq!(stopped.pipeline_execution_arn, execution.arn());

    let steps = execution.list_steps().await.unwrap();
    let names: Vec<&str> = steps.iter().map(|s| s.step_name.as_str()).collect();
    assert_eq!(names, vec!["Train", "Register"]);
}
