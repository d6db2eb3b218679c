use serde_json::Value;

use super::shape::{FieldPath, ShapeChecker};
use crate::domain::{DomainError, ResponseCategory, UserResponse, Violation};

/// Validates an inbound questionnaire payload: an array of
/// `{question, answer, category}` objects.
pub struct RequestValidator;

impl RequestValidator {
    /// Returns the typed records in input order, or every violation found.
    pub fn validate(input: &Value) -> Result<Vec<UserResponse>, DomainError> {
        let mut checker = ShapeChecker::new();
        let responses = checker.array_of(input, &FieldPath::root(), Self::user_response);

        match responses {
            Some(responses) if checker.is_clean() => Ok(responses),
            _ => Err(DomainError::invalid_input(checker.into_violations())),
        }
    }

    /// Parse raw request text first; unparseable text is a single root violation.
    pub fn validate_str(raw: &str) -> Result<Vec<UserResponse>, DomainError> {
        let input: Value = serde_json::from_str(raw).map_err(|e| {
            DomainError::invalid_input(vec![Violation::new(
                format!("Request body is not valid JSON: {e}"),
                "",
            )])
        })?;
        Self::validate(&input)
    }

    fn user_response(
        checker: &mut ShapeChecker,
        value: &Value,
        path: &FieldPath,
    ) -> Option<UserResponse> {
        let object = checker.object(value, path)?;

        let question = checker.string_field(object, "question", path);
        let answer = checker.string_field(object, "answer", path);
        let category = checker.enum_field(
            object,
            "category",
            path,
            &ResponseCategory::names(),
            ResponseCategory::parse,
        );

        Some(UserResponse::new(question?, answer?, category?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_valid_records_in_order() {
        let input = json!([
            {"question": "role?", "answer": "Developer", "category": "background"},
            {"question": "languages?", "answer": "", "category": "technical"},
        ]);

        let responses = RequestValidator::validate(&input).unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].question(), "role?");
        assert_eq!(responses[1].answer(), "");
        assert_eq!(responses[1].category(), ResponseCategory::Technical);
    }

    #[test]
    fn accepts_empty_array() {
        assert!(RequestValidator::validate(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn reports_invalid_category_by_path() {
        let input = json!([
            {"question": "role?", "answer": "Developer", "category": "background"},
            {"question": "goal?", "answer": "DApps", "category": "goals"},
        ]);

        let err = RequestValidator::validate(&input).unwrap_err();
        let violations = err.violations().unwrap();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "1.category");
        assert!(violations[0].message.contains("'goals'"));
    }

    #[test]
    fn collects_all_violations() {
        let input = json!([
            {"question": 1, "category": "nope"},
            "not an object",
        ]);

        let err = RequestValidator::validate(&input).unwrap_err();
        let paths: Vec<&str> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.path.as_str())
            .collect();

        assert_eq!(paths, vec!["0.question", "0.answer", "0.category", "1"]);
    }

    #[test]
    fn rejects_non_array_root() {
        let err = RequestValidator::validate(&json!({"question": "x"})).unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations[0].path, "");
        assert_eq!(violations[0].message, "Expected array, received object");
    }

    #[test]
    fn unparseable_text_is_invalid_input() {
        let err = RequestValidator::validate_str("{oops").unwrap_err();
        assert!(err.is_invalid_input());
    }
}
