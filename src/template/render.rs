//! Template rendering.

use super::TemplateError;
use super::parse::{Node, Template};
use crate::config::Configuration;
use serde_json::Value;

impl Template {
    /// Render the template against a configuration.
    ///
    /// Rendering is a pure function of the template and the configuration:
    /// the same inputs always produce the same text.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered text
    /// * `Err(TemplateError::UndefinedField)` - A referenced field does not resolve
    pub fn render(&self, config: &Configuration) -> Result<String, TemplateError> {
        let mut result = String::new();

        for node in &self.nodes {
            match node {
                Node::Text(text) => result.push_str(text),
                Node::Field { path, position } => {
                    let value = config.lookup(path.as_slice()).ok_or_else(|| {
                        TemplateError::UndefinedField {
                            name: path.join("."),
                            position: *position,
                        }
                    })?;
                    push_value(&mut result, &value);
                }
            }
        }

        Ok(result)
    }
}

/// Append a value's template text.
///
/// Strings are inserted verbatim with no quoting or escaping. Null renders as
/// nothing; arrays and objects render as compact JSON.
fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(_) | Value::Object(_) => out.push_str(&value.to_string()),
    }
}
