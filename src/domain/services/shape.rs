//! Collecting shape checks over an untyped JSON value.
//!
//! Every check records a [`Violation`] instead of returning early, so a
//! caller can walk a whole document and report all defects at once. Checks
//! return `Option`s that are `None` when the value at that path is unusable.

use serde_json::{Map, Value};

use crate::domain::Violation;

/// Dot-joined location of a value inside a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index.to_string());
        Self(segments)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[derive(Debug, Default)]
pub struct ShapeChecker {
    violations: Vec<Violation>,
}

impl ShapeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.violations
            .push(Violation::new(message, path.to_string()));
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    fn mismatch(&mut self, expected: &str, value: &Value, path: &FieldPath) {
        self.report(
            path,
            format!("Expected {expected}, received {}", type_name(value)),
        );
    }

    pub fn object<'v>(
        &mut self,
        value: &'v Value,
        path: &FieldPath,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.mismatch("object", other, path);
                None
            }
        }
    }

    pub fn string<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<&'v str> {
        match value {
            Value::String(s) => Some(s),
            other => {
                self.mismatch("string", other, path);
                None
            }
        }
    }

    pub fn array<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<&'v [Value]> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.mismatch("array", other, path);
                None
            }
        }
    }

    /// Look up a required key; a missing key is reported as `Required`.
    pub fn field<'v>(
        &mut self,
        object: &'v Map<String, Value>,
        key: &str,
        path: &FieldPath,
    ) -> Option<&'v Value> {
        let value = object.get(key);
        if value.is_none() {
            self.report(&path.key(key), "Required");
        }
        value
    }

    pub fn string_field(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        path: &FieldPath,
    ) -> Option<String> {
        let value = self.field(object, key, path)?;
        self.string(value, &path.key(key)).map(str::to_string)
    }

    /// A string constrained to a closed set of names, mapped by `parse`.
    pub fn enumeration<T>(
        &mut self,
        value: &Value,
        path: &FieldPath,
        allowed: &[&str],
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.string(value, path)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            self.report(
                path,
                format!(
                    "Invalid enum value. Expected {}, received '{raw}'",
                    quoted(allowed)
                ),
            );
        }
        parsed
    }

    pub fn enum_field<T>(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        path: &FieldPath,
        allowed: &[&str],
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = self.field(object, key, path)?;
        self.enumeration(value, &path.key(key), allowed, parse)
    }

    /// Check every element of an array with `item`, visiting all of them
    /// even after a failure.
    pub fn array_of<T>(
        &mut self,
        value: &Value,
        path: &FieldPath,
        mut item: impl FnMut(&mut Self, &Value, &FieldPath) -> Option<T>,
    ) -> Option<Vec<T>> {
        let elements = self.array(value, path)?;
        let mut out = Vec::with_capacity(elements.len());
        let mut complete = true;
        for (i, element) in elements.iter().enumerate() {
            match item(self, element, &path.index(i)) {
                Some(v) => out.push(v),
                None => complete = false,
            }
        }
        complete.then_some(out)
    }

    pub fn strings(&mut self, value: &Value, path: &FieldPath) -> Option<Vec<String>> {
        self.array_of(value, path, |checker, v, p| {
            checker.string(v, p).map(str::to_string)
        })
    }

    pub fn strings_field(
        &mut self,
        object: &Map<String, Value>,
        key: &str,
        path: &FieldPath,
    ) -> Option<Vec<String>> {
        let value = self.field(object, key, path)?;
        self.strings(value, &path.key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_path_joins_keys_and_indices() {
        let path = FieldPath::root().key("weeklySchedule").key("schedule").index(2);
        assert_eq!(path.to_string(), "weeklySchedule.schedule.2");
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn array_of_visits_every_element() {
        let mut checker = ShapeChecker::new();
        let value = json!(["a", 1, "b", false]);

        let result = checker.strings(&value, &FieldPath::root().key("notes"));

        assert!(result.is_none());
        let violations = checker.into_violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "notes.1");
        assert_eq!(violations[0].message, "Expected string, received number");
        assert_eq!(violations[1].path, "notes.3");
        assert_eq!(violations[1].message, "Expected string, received boolean");
    }

    #[test]
    fn missing_field_is_required() {
        let mut checker = ShapeChecker::new();
        let value = json!({});
        let object = value.as_object().unwrap();

        assert!(checker
            .string_field(object, "learningPath", &FieldPath::root())
            .is_none());
        let violations = checker.into_violations();
        assert_eq!(violations, vec![Violation::new("Required", "learningPath")]);
    }

    #[test]
    fn enumeration_lists_allowed_values() {
        let mut checker = ShapeChecker::new();
        let value = json!("weekend");

        let parsed: Option<()> =
            checker.enumeration(&value, &FieldPath::root().key("day"), &["a", "b"], |_| None);

        assert!(parsed.is_none());
        assert_eq!(
            checker.into_violations()[0].message,
            "Invalid enum value. Expected 'a' | 'b', received 'weekend'"
        );
    }
}
