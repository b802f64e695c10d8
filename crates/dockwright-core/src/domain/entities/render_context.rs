use std::collections::HashMap;

use crate::domain::naming::to_kebab_case;

/// Context for rendering built-in file templates.
///
/// A value object holding every `{{VARIABLE}}` a template may reference.
/// Transformations create new instances (see `with_variable`).
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `NAME` | "foobar" | Topology base name |
/// | `NAME_KEBAB` | "foo-bar" | Computed |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut vars = HashMap::new();

        vars.insert("NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("NAME".to_string(), name);

        Self { variables: vars }
    }

    /// Add a variable, consuming self and returning a new context.
    ///
    /// Later calls override earlier values, including built-ins.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.variables.insert(key.into(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Render a template string by replacing `{{VARIABLE}}` placeholders.
    ///
    /// - `{{UNKNOWN}}` remains as literal `{{UNKNOWN}}`
    /// - `${DB_HOST}` is left alone; compose resolves it from `.env`
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}
