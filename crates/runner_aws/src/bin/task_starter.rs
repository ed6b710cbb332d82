use lambda_runtime::{service_fn, Error, LambdaEvent};
use runner_aws::adapters::function_store::LambdaFunctionStore;
use runner_aws::adapters::task_runner::EcsTaskRunner;
use runner_aws::handlers::task_start::handle_task_start;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let functions = LambdaFunctionStore::new(&config);
    let tasks = EcsTaskRunner::new(&config);

    handle_task_start(&event.payload, &functions, &tasks)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
