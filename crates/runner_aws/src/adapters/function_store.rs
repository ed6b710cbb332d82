use std::collections::HashMap;

use runner_core::contract::FunctionRecord;

/// Read access to a deployed function's provider metadata.
pub trait FunctionStore {
    /// Full metadata needed to stage the function's artifact locally.
    fn describe(&self, arn: &str) -> Result<FunctionRecord, String>;

    /// Just the function's declared environment variables; empty when the
    /// function declares none.
    fn environment(&self, arn: &str) -> Result<HashMap<String, String>, String>;
}

/// `FunctionStore` backed by the Lambda `GetFunction` API.
pub struct LambdaFunctionStore {
    client: aws_sdk_lambda::Client,
}

impl LambdaFunctionStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_lambda::Client::new(config),
        }
    }

    fn get_function(
        &self,
        arn: &str,
    ) -> Result<aws_sdk_lambda::operation::get_function::GetFunctionOutput, String> {
        let client = self.client.clone();
        let function_name = arn.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_function()
                    .function_name(function_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe function: {error}"))
            })
        })
    }
}

impl FunctionStore for LambdaFunctionStore {
    fn describe(&self, arn: &str) -> Result<FunctionRecord, String> {
        let output = self.get_function(arn)?;

        let code_location = output
            .code()
            .and_then(|code| code.location())
            .ok_or_else(|| format!("function '{arn}' has no code location"))?
            .to_string();

        let configuration = output
            .configuration()
            .ok_or_else(|| format!("function '{arn}' has no configuration"))?;
        let handler = configuration
            .handler()
            .ok_or_else(|| format!("function '{arn}' has no handler"))?
            .to_string();
        let environment = configuration
            .environment()
            .and_then(|environment| environment.variables())
            .cloned()
            .unwrap_or_default();

        Ok(FunctionRecord {
            code_location,
            handler,
            environment,
        })
    }

    fn environment(&self, arn: &str) -> Result<HashMap<String, String>, String> {
        let output = self.get_function(arn)?;

        Ok(output
            .configuration()
            .and_then(|configuration| configuration.environment())
            .and_then(|environment| environment.variables())
            .cloned()
            .unwrap_or_default())
    }
}
