use crate::contract::ValidationError;

/// Dotted `<module>.<export>` reference to a packaged entry point.
///
/// The module segment may itself contain dots (nested paths, extensions), so
/// the split happens at the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerId {
    pub module: String,
    pub export: String,
}

impl HandlerId {
    pub fn parse(handler: &str) -> Result<Self, ValidationError> {
        let Some((module, export)) = handler.rsplit_once('.') else {
            return Err(bad_handler(handler));
        };
        if module.is_empty() || export.is_empty() {
            return Err(bad_handler(handler));
        }
        Ok(Self {
            module: module.to_string(),
            export: export.to_string(),
        })
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.export)
    }
}

fn bad_handler(handler: &str) -> ValidationError {
    ValidationError::new(format!(
        "Handler '{handler}' is not in <module>.<export> form"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_segments() {
        let handler = HandlerId::parse("fakeModule.handler").expect("should parse");
        assert_eq!(handler.module, "fakeModule");
        assert_eq!(handler.export, "handler");
    }

    #[test]
    fn splits_at_the_last_dot() {
        let handler = HandlerId::parse("nested/module.v2.handler").expect("should parse");
        assert_eq!(handler.module, "nested/module.v2");
        assert_eq!(handler.export, "handler");
    }

    #[test]
    fn rejects_handler_without_a_dot() {
        let error = HandlerId::parse("handler").expect_err("should fail");
        assert!(error.message().contains("<module>.<export>"));
    }

    #[test]
    fn rejects_empty_segments() {
        HandlerId::parse(".handler").expect_err("empty module should fail");
        HandlerId::parse("module.").expect_err("empty export should fail");
        HandlerId::parse(".").expect_err("both segments empty should fail");
    }

    #[test]
    fn displays_in_original_form() {
        let handler = HandlerId::parse("fakeModule.handler").expect("should parse");
        assert_eq!(handler.to_string(), "fakeModule.handler");
    }
}
