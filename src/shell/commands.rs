//! Named command handlers for `DesktopShell::invoke`
//!
//! Handlers are typed: the JSON payload is deserialized into the handler's
//! argument type and the result serialized back, so a bad payload surfaces as
//! `ShellError::Serde` before the handler runs.

use super::ShellError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;

type Handler = Box<dyn Fn(Value) -> Result<Value, ShellError> + Send + Sync>;

#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler
    ///
    /// Commands without arguments take `()` and expect a `null` payload.
    pub fn register<P, R, F>(&mut self, name: &str, handler: F)
    where
        P: DeserializeOwned,
        R: Serialize,
        F: Fn(P) -> Result<R, ShellError> + Send + Sync + 'static,
    {
        let erased = move |payload: Value| -> Result<Value, ShellError> {
            let args: P = serde_json::from_value(payload)?;
            let result = handler(args)?;
            Ok(serde_json::to_value(result)?)
        };
        if self
            .handlers
            .insert(name.to_string(), Box::new(erased))
            .is_some()
        {
            tracing::debug!("Replaced shell command handler '{}'", name);
        }
    }

    pub fn invoke(&self, name: &str, payload: Value) -> Result<Value, ShellError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;
        handler(payload)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct AddArgs {
        a: i64,
        b: i64,
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register("add", |args: AddArgs| Ok(args.a + args.b));
        registry.register("ping", |_: ()| Ok("pong"));
        registry.register("fail", |_: ()| -> Result<(), ShellError> {
            Err(ShellError::Command {
                command: "fail".to_string(),
                message: "always fails".to_string(),
            })
        });
        registry
    }

    #[test]
    fn test_typed_payload_and_result() {
        let registry = registry();
        assert_eq!(registry.invoke("add", json!({"a": 2, "b": 3})).unwrap(), json!(5));
        assert_eq!(registry.invoke("ping", Value::Null).unwrap(), json!("pong"));
    }

    #[test]
    fn test_unknown_command() {
        let err = registry().invoke("reboot", Value::Null).unwrap_err();
        assert!(matches!(err, ShellError::UnknownCommand(name) if name == "reboot"));
    }

    #[test]
    fn test_bad_payload_is_serde_error() {
        let err = registry().invoke("add", json!({"a": "two"})).unwrap_err();
        assert!(matches!(err, ShellError::Serde(_)));
    }

    #[test]
    fn test_handler_error_propagates_unchanged() {
        let err = registry().invoke("fail", Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "command 'fail' failed: always fails");
    }

    #[test]
    fn test_names_sorted() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["add", "fail", "ping"]);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }
}
