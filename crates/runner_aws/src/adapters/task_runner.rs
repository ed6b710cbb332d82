use aws_sdk_ecs::operation::run_task::RunTaskOutput;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, ContainerOverride, KeyValuePair, LaunchType,
    NetworkConfiguration, TaskOverride,
};
use runner_core::run_request::TaskRunRequest;
use serde_json::{json, Value};

/// Submits built task-run requests to the container orchestrator.
pub trait TaskRunner {
    fn run_task(&self, request: &TaskRunRequest) -> Result<Value, String>;
}

/// `TaskRunner` backed by the ECS `RunTask` API.
pub struct EcsTaskRunner {
    client: aws_sdk_ecs::Client,
}

impl EcsTaskRunner {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ecs::Client::new(config),
        }
    }
}

impl TaskRunner for EcsTaskRunner {
    fn run_task(&self, request: &TaskRunRequest) -> Result<Value, String> {
        let client = self.client.clone();
        let request = request.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let network = AwsVpcConfiguration::builder()
                    .set_subnets(Some(request.subnets.clone()))
                    .set_security_groups(Some(request.security_groups.clone()))
                    .assign_public_ip(if request.assign_public_ip {
                        AssignPublicIp::Enabled
                    } else {
                        AssignPublicIp::Disabled
                    })
                    .build()
                    .map_err(|error| format!("failed to build network configuration: {error}"))?;

                let environment: Vec<KeyValuePair> = request
                    .environment
                    .iter()
                    .map(|pair| {
                        KeyValuePair::builder()
                            .name(&pair.name)
                            .value(&pair.value)
                            .build()
                    })
                    .collect();

                let container = ContainerOverride::builder()
                    .name(&request.container_name)
                    .set_command(Some(request.command.clone()))
                    .set_environment(Some(environment))
                    .build();

                let overrides = TaskOverride::builder()
                    .container_overrides(container)
                    .execution_role_arn(&request.execution_role_arn)
                    .task_role_arn(&request.task_role_arn)
                    .build();

                let output = client
                    .run_task()
                    .cluster(&request.cluster)
                    .task_definition(&request.task_definition)
                    .launch_type(LaunchType::from(request.launch_type.as_str()))
                    .network_configuration(
                        NetworkConfiguration::builder()
                            .awsvpc_configuration(network)
                            .build(),
                    )
                    .overrides(overrides)
                    .send()
                    .await
                    .map_err(|error| format!("failed to run task: {error}"))?;

                Ok(run_task_response(&output))
            })
        })
    }
}

/// Projects the provider response into JSON so the workflow can hand it back
/// to the caller untouched.
fn run_task_response(output: &RunTaskOutput) -> Value {
    let tasks: Vec<Value> = output
        .tasks()
        .iter()
        .map(|task| {
            json!({
                "taskArn": task.task_arn(),
                "clusterArn": task.cluster_arn(),
                "lastStatus": task.last_status(),
            })
        })
        .collect();
    let failures: Vec<Value> = output
        .failures()
        .iter()
        .map(|failure| {
            json!({
                "arn": failure.arn(),
                "reason": failure.reason(),
                "detail": failure.detail(),
            })
        })
        .collect();

    json!({ "tasks": tasks, "failures": failures })
}
