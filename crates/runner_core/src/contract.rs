use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::handler_id::HandlerId;

/// Stable code carried by every [`ValidationError`], distinguishing local
/// input rejection from provider failures.
pub const INVALID_INPUT: &str = "INVALID_INPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &'static str {
        INVALID_INPUT
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Provider-returned descriptor of a deployed function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionRecord {
    pub code_location: String,
    pub handler: String,
    pub environment: HashMap<String, String>,
}

impl FunctionRecord {
    pub fn handler_id(&self) -> Result<HandlerId, ValidationError> {
        HandlerId::parse(&self.handler)
    }
}

/// A single `{name, value}` environment entry for a container override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvPair {
    pub name: String,
    pub value: String,
}

/// Converts a declared environment-variable mapping into env pairs.
///
/// Pair order follows the map's iteration order and is not stable across
/// calls; consumers must not depend on it.
pub fn env_pairs(variables: &HashMap<String, String>) -> Vec<EnvPair> {
    variables
        .iter()
        .map(|(name, value)| EnvPair {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}

/// A validated request to start one containerized task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStartRequest {
    pub arn: String,
    pub input: Value,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub cluster: String,
    pub task_definition: String,
    pub role_arn: String,
}

impl TaskStartRequest {
    /// Validates a raw event in fixed declared order, first failure wins.
    ///
    /// Presence checks run for every required field before any type check
    /// fires, so a malformed field never masks a missing one.
    pub fn from_event(event: &Value) -> Result<Self, ValidationError> {
        if is_missing(event, "arn") {
            return Err(ValidationError::new("Lambda ARN is missing"));
        }
        if is_missing(event, "input") {
            return Err(ValidationError::new(
                "The input for the ecs task is not provided",
            ));
        }
        if is_missing(event, "subnets") {
            return Err(ValidationError::new("The list of subnets is missing"));
        }
        if is_missing(event, "securityGroups") {
            return Err(ValidationError::new("The list of security groups is missing"));
        }
        if is_missing(event, "cluster") {
            return Err(ValidationError::new("The cluster name is missing"));
        }
        if is_missing(event, "taskDefinition") {
            return Err(ValidationError::new("The ECS task definition name is missing"));
        }
        if is_missing(event, "roleArn") {
            return Err(ValidationError::new("The ECS role ARN is missing"));
        }

        if !event.get("subnets").is_some_and(|value| value.is_array()) {
            return Err(ValidationError::new("subnets must be an array"));
        }
        if !event
            .get("securityGroups")
            .is_some_and(|value| value.is_array())
        {
            return Err(ValidationError::new("securityGroups must be an array"));
        }
        if !event
            .get("input")
            .is_some_and(|value| value.is_object() || value.is_array())
        {
            return Err(ValidationError::new("input must be an object"));
        }

        let request: TaskStartRequest = serde_json::from_value(event.clone())
            .map_err(|error| ValidationError::new(format!("invalid task start request: {error}")))?;

        if request.subnets.is_empty() {
            return Err(ValidationError::new("subnets must not be empty"));
        }
        if request.security_groups.is_empty() {
            return Err(ValidationError::new("securityGroups must not be empty"));
        }

        Ok(request)
    }
}

fn is_missing(event: &Value, name: &str) -> bool {
    match event.get(name) {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_event() -> Value {
        json!({
            "arn": "arn:aws:lambda:us-east-1:123456789012:function:fake",
            "input": { "test": "testing" },
            "subnets": ["subnet-1"],
            "securityGroups": ["sg-1"],
            "cluster": "fakeCluster",
            "taskDefinition": "fakeDefinition",
            "roleArn": "myRole"
        })
    }

    #[test]
    fn missing_fields_fail_with_field_specific_messages() {
        let cases = [
            ("arn", "Lambda ARN is missing"),
            ("input", "The input for the ecs task is not provided"),
            ("subnets", "The list of subnets is missing"),
            ("securityGroups", "The list of security groups is missing"),
            ("cluster", "The cluster name is missing"),
            ("taskDefinition", "The ECS task definition name is missing"),
            ("roleArn", "The ECS role ARN is missing"),
        ];

        for (field, expected) in cases {
            let mut event = valid_event();
            event
                .as_object_mut()
                .expect("event fixture should be an object")
                .remove(field);

            let error = TaskStartRequest::from_event(&event)
                .expect_err("validation should fail without the field");
            assert_eq!(error.message(), expected, "field: {field}");
            assert_eq!(error.code(), INVALID_INPUT);
        }
    }

    #[test]
    fn null_and_empty_string_fields_count_as_missing() {
        let mut event = valid_event();
        event["cluster"] = Value::Null;
        let error = TaskStartRequest::from_event(&event).expect_err("null should fail");
        assert_eq!(error.message(), "The cluster name is missing");

        let mut event = valid_event();
        event["arn"] = json!("");
        let error = TaskStartRequest::from_event(&event).expect_err("empty arn should fail");
        assert_eq!(error.message(), "Lambda ARN is missing");
    }

    #[test]
    fn subnets_must_be_an_array() {
        let mut event = valid_event();
        event["subnets"] = json!("subnet-1");
        let error = TaskStartRequest::from_event(&event).expect_err("scalar subnets should fail");
        assert_eq!(error.message(), "subnets must be an array");
    }

    #[test]
    fn security_groups_must_be_an_array() {
        let mut event = valid_event();
        event["securityGroups"] = json!("sg-1");
        let error =
            TaskStartRequest::from_event(&event).expect_err("scalar security groups should fail");
        assert_eq!(error.message(), "securityGroups must be an array");
    }

    #[test]
    fn input_must_be_structured() {
        let mut event = valid_event();
        event["input"] = json!("1");
        let error = TaskStartRequest::from_event(&event).expect_err("scalar input should fail");
        assert_eq!(error.message(), "input must be an object");
    }

    #[test]
    fn presence_checks_run_before_type_checks() {
        let mut event = valid_event();
        event["subnets"] = json!("subnet-1");
        event
            .as_object_mut()
            .expect("event fixture should be an object")
            .remove("cluster");

        let error = TaskStartRequest::from_event(&event).expect_err("validation should fail");
        assert_eq!(error.message(), "The cluster name is missing");
    }

    #[test]
    fn earlier_rule_wins_when_several_fields_are_missing() {
        let mut event = valid_event();
        let object = event
            .as_object_mut()
            .expect("event fixture should be an object");
        object.remove("arn");
        object.remove("roleArn");

        let error = TaskStartRequest::from_event(&event).expect_err("validation should fail");
        assert_eq!(error.message(), "Lambda ARN is missing");
    }

    #[test]
    fn empty_sequences_are_rejected() {
        let mut event = valid_event();
        event["subnets"] = json!([]);
        let error = TaskStartRequest::from_event(&event).expect_err("empty subnets should fail");
        assert_eq!(error.message(), "subnets must not be empty");

        let mut event = valid_event();
        event["securityGroups"] = json!([]);
        let error =
            TaskStartRequest::from_event(&event).expect_err("empty security groups should fail");
        assert_eq!(error.message(), "securityGroups must not be empty");
    }

    #[test]
    fn valid_event_decodes_verbatim() {
        let request =
            TaskStartRequest::from_event(&valid_event()).expect("valid event should decode");
        assert_eq!(
            request.arn,
            "arn:aws:lambda:us-east-1:123456789012:function:fake"
        );
        assert_eq!(request.input, json!({ "test": "testing" }));
        assert_eq!(request.subnets, vec!["subnet-1".to_string()]);
        assert_eq!(request.security_groups, vec!["sg-1".to_string()]);
        assert_eq!(request.cluster, "fakeCluster");
        assert_eq!(request.task_definition, "fakeDefinition");
        assert_eq!(request.role_arn, "myRole");
    }

    #[test]
    fn array_input_counts_as_structured() {
        let mut event = valid_event();
        event["input"] = json!([1, 2, 3]);
        let request =
            TaskStartRequest::from_event(&event).expect("array input should be accepted");
        assert_eq!(request.input, json!([1, 2, 3]));
    }

    #[test]
    fn env_pairs_cover_the_whole_mapping() {
        let variables = HashMap::from([
            ("FOO".to_string(), "bar".to_string()),
            ("BAZ".to_string(), "qux".to_string()),
        ]);

        let mut pairs = env_pairs(&variables);
        pairs.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            pairs,
            vec![
                EnvPair {
                    name: "BAZ".to_string(),
                    value: "qux".to_string(),
                },
                EnvPair {
                    name: "FOO".to_string(),
                    value: "bar".to_string(),
                },
            ]
        );
    }

    #[test]
    fn env_pairs_of_empty_mapping_is_empty() {
        assert!(env_pairs(&HashMap::new()).is_empty());
    }
}
