use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::{EnvPair, TaskStartRequest};

/// Launch mode applied to every built request.
pub const LAUNCH_TYPE_FARGATE: &str = "FARGATE";

/// Container whose command and environment are overridden in the task.
pub const RUNNER_CONTAINER_NAME: &str = "LambdaTaskRunner";

/// Provider-ready snapshot of one task-run submission.
///
/// Kept as plain data so tests can assert the exact request a workflow built
/// without talking to the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRunRequest {
    pub cluster: String,
    pub task_definition: String,
    pub launch_type: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub assign_public_ip: bool,
    pub container_name: String,
    pub command: Vec<String>,
    pub environment: Vec<EnvPair>,
    pub execution_role_arn: String,
    pub task_role_arn: String,
}

/// Command line the launched container runs: re-invokes the function by
/// reference, in the region captured at build time, with the serialized
/// event inline.
pub fn invoke_command(arn: &str, region: &str, input: &Value) -> Vec<String> {
    vec![
        "invoke".to_string(),
        arn.to_string(),
        "--region".to_string(),
        region.to_string(),
        "--event".to_string(),
        input.to_string(),
    ]
}

pub fn build_task_run_request(
    request: &TaskStartRequest,
    environment: Vec<EnvPair>,
    region: &str,
) -> TaskRunRequest {
    TaskRunRequest {
        cluster: request.cluster.clone(),
        task_definition: request.task_definition.clone(),
        launch_type: LAUNCH_TYPE_FARGATE.to_string(),
        subnets: request.subnets.clone(),
        security_groups: request.security_groups.clone(),
        assign_public_ip: true,
        container_name: RUNNER_CONTAINER_NAME.to_string(),
        command: invoke_command(&request.arn, region, &request.input),
        environment,
        execution_role_arn: request.role_arn.clone(),
        task_role_arn: request.role_arn.clone(),
    }
}
