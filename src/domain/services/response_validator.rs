use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::shape::{FieldPath, ShapeChecker};
use crate::domain::{
    BlockCategory, DaySchedule, DomainError, MethodologyResponse, Recommendation,
    ResponseCategory, TimeBlock, Weekday, WeeklySchedule, RECOMMENDATION_ITEMS, TIME_FORMAT,
};

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_FORMAT).expect("invalid time regex"));

/// Parses and shape-checks raw provider output.
///
/// Outcomes are terminal: text that is not JSON is `MalformedOutput`; JSON
/// that does not match the methodology schema is `SchemaViolation` carrying
/// every defect found. Keys the schema does not name are dropped.
///
/// Without [`ResponseValidator::with_allowed_categories`] recommendation
/// categories are free strings; with it, each must be one of the given
/// questionnaire categories.
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    allowed_categories: Option<Vec<ResponseCategory>>,
}

impl ResponseValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_categories(mut self, categories: &[ResponseCategory]) -> Self {
        self.allowed_categories = Some(categories.to_vec());
        self
    }

    pub fn validate(&self, raw: &str) -> Result<MethodologyResponse, DomainError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            debug!("Provider output is not JSON ({} bytes): {e}", raw.len());
            DomainError::malformed_output(e.to_string())
        })?;
        self.validate_value(&value)
    }

    pub fn validate_value(&self, value: &Value) -> Result<MethodologyResponse, DomainError> {
        let mut checker = ShapeChecker::new();
        let methodology = self.methodology(&mut checker, value, &FieldPath::root());

        if !checker.is_clean() {
            return Err(DomainError::schema_violation(checker.into_violations()));
        }
        methodology.ok_or_else(|| DomainError::internal("shape check produced no value"))
    }

    fn methodology(
        &self,
        checker: &mut ShapeChecker,
        value: &Value,
        path: &FieldPath,
    ) -> Option<MethodologyResponse> {
        let object = checker.object(value, path)?;

        let learning_path = checker.string_field(object, "learningPath", path);
        let time_strategy = checker.string_field(object, "timeStrategy", path);
        let recommendations = checker
            .field(object, "recommendations", path)
            .and_then(|v| {
                checker.array_of(v, &path.key("recommendations"), |c, item, p| {
                    self.recommendation(c, item, p)
                })
            })
            .and_then(|recommendations| {
                self.check_coverage(checker, recommendations, &path.key("recommendations"))
            });
        let suggested_resources = checker
            .strings_field(object, "suggestedResources", path)
            .and_then(|resources| {
                if resources.is_empty() {
                    checker.report(
                        &path.key("suggestedResources"),
                        "Array must contain at least 1 element(s)",
                    );
                    None
                } else {
                    Some(resources)
                }
            });
        let weekly_schedule = checker
            .field(object, "weeklySchedule", path)
            .and_then(|v| weekly_schedule(checker, v, &path.key("weeklySchedule")));

        Some(MethodologyResponse {
            learning_path: learning_path?,
            time_strategy: time_strategy?,
            recommendations: recommendations?,
            suggested_resources: suggested_resources?,
            weekly_schedule: weekly_schedule?,
        })
    }

    fn recommendation(
        &self,
        checker: &mut ShapeChecker,
        value: &Value,
        path: &FieldPath,
    ) -> Option<Recommendation> {
        let object = checker.object(value, path)?;

        let category = checker
            .string_field(object, "category", path)
            .and_then(|category| self.check_category(checker, category, &path.key("category")));
        let items = checker.strings_field(object, "items", path).and_then(|items| {
            if items.len() == RECOMMENDATION_ITEMS {
                Some(items)
            } else {
                checker.report(
                    &path.key("items"),
                    format!("Array must contain exactly {RECOMMENDATION_ITEMS} element(s)"),
                );
                None
            }
        });

        Some(Recommendation {
            category: category?,
            items: items?,
        })
    }

    /// One entry per category: no repeats, and with allowed categories set,
    /// none of them left out.
    fn check_coverage(
        &self,
        checker: &mut ShapeChecker,
        recommendations: Vec<Recommendation>,
        path: &FieldPath,
    ) -> Option<Vec<Recommendation>> {
        let complete = {
            let mut complete = true;
            let mut seen = HashSet::new();
            for recommendation in &recommendations {
                if !seen.insert(recommendation.category.as_str()) {
                    checker.report(
                        path,
                        format!(
                            "Duplicate recommendations for category '{}'",
                            recommendation.category
                        ),
                    );
                    complete = false;
                }
            }

            for category in self.allowed_categories.iter().flatten() {
                if !seen.contains(category.as_str()) {
                    checker.report(
                        path,
                        format!("Missing recommendations for category '{category}'"),
                    );
                    complete = false;
                }
            }
            complete
        };

        complete.then_some(recommendations)
    }

    fn check_category(
        &self,
        checker: &mut ShapeChecker,
        category: String,
        path: &FieldPath,
    ) -> Option<String> {
        let Some(allowed) = &self.allowed_categories else {
            return Some(category);
        };

        if allowed.iter().any(|c| c.as_str() == category) {
            return Some(category);
        }

        let names = allowed
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        checker.report(
            path,
            format!("Recommendation category '{category}' was not among the submitted categories ({names})"),
        );
        None
    }
}

fn weekly_schedule(
    checker: &mut ShapeChecker,
    value: &Value,
    path: &FieldPath,
) -> Option<WeeklySchedule> {
    let object = checker.object(value, path)?;

    let schedule = checker
        .field(object, "schedule", path)
        .and_then(|v| checker.array_of(v, &path.key("schedule"), day_schedule));
    let notes = checker.strings_field(object, "notes", path);

    Some(WeeklySchedule {
        schedule: schedule?,
        notes: notes?,
    })
}

fn day_schedule(checker: &mut ShapeChecker, value: &Value, path: &FieldPath) -> Option<DaySchedule> {
    let object = checker.object(value, path)?;

    let day = checker.enum_field(object, "day", path, &Weekday::names(), Weekday::parse);
    let blocks = checker
        .field(object, "blocks", path)
        .and_then(|v| checker.array_of(v, &path.key("blocks"), time_block));

    Some(DaySchedule {
        day: day?,
        blocks: blocks?,
    })
}

fn time_block(checker: &mut ShapeChecker, value: &Value, path: &FieldPath) -> Option<TimeBlock> {
    let object = checker.object(value, path)?;

    let start_time = time_field(checker, object, "startTime", path);
    let end_time = time_field(checker, object, "endTime", path);
    let activity = checker.string_field(object, "activity", path);
    let category = checker.enum_field(
        object,
        "category",
        path,
        &BlockCategory::names(),
        BlockCategory::parse,
    );
    let description = checker.string_field(object, "description", path);

    Some(TimeBlock {
        start_time: start_time?,
        end_time: end_time?,
        activity: activity?,
        category: category?,
        description: description?,
    })
}

fn time_field(
    checker: &mut ShapeChecker,
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Option<String> {
    let time = checker.string_field(object, key, path)?;
    if TIME_PATTERN.is_match(&time) {
        Some(time)
    } else {
        checker.report(
            &path.key(key),
            format!("Invalid time '{time}', expected 24-hour HH:MM"),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conforming() -> Value {
        json!({
            "learningPath": "Start with fundamentals, then build.",
            "timeStrategy": "Five evenings a week.",
            "recommendations": [
                {"category": "background", "items": ["a", "b", "c"]}
            ],
            "suggestedResources": ["Mastering Ethereum"],
            "weeklySchedule": {
                "schedule": [{
                    "day": "Monday",
                    "blocks": [{
                        "startTime": "19:00",
                        "endTime": "20:00",
                        "activity": "Blockchain Fundamentals",
                        "category": "learning",
                        "description": "Watch curated video content"
                    }]
                }],
                "notes": ["Adjust as you go"]
            }
        })
    }

    fn paths(err: &DomainError) -> Vec<String> {
        err.violations()
            .unwrap()
            .iter()
            .map(|v| v.path.clone())
            .collect()
    }

    #[test]
    fn not_json_is_malformed_output() {
        let err = ResponseValidator::new().validate("not json").unwrap_err();
        assert!(err.is_malformed_output());
        assert!(err.violations().is_none());
    }

    #[test]
    fn conforming_output_is_accepted() {
        let methodology = ResponseValidator::new()
            .validate(&conforming().to_string())
            .unwrap();

        assert_eq!(methodology.recommendations[0].items.len(), 3);
        assert_eq!(methodology.weekly_schedule.schedule[0].day, Weekday::Monday);
        assert_eq!(
            methodology.weekly_schedule.schedule[0].blocks[0].category,
            BlockCategory::Learning
        );
    }

    #[test]
    fn two_recommendation_items_are_rejected() {
        let raw = r#"{"learningPath":"...", "timeStrategy":"...", "recommendations":[{"category":"background","items":["a","b"]}], "suggestedResources":["x"], "weeklySchedule":{"schedule":[],"notes":[]}}"#;

        let err = ResponseValidator::new().validate(raw).unwrap_err();

        assert!(err.is_schema_violation());
        assert_eq!(paths(&err), vec!["recommendations.0.items"]);
        assert_eq!(
            err.violations().unwrap()[0].message,
            "Array must contain exactly 3 element(s)"
        );
    }

    #[test]
    fn four_recommendation_items_are_rejected() {
        let mut value = conforming();
        value["recommendations"][0]["items"] = json!(["a", "b", "c", "d"]);

        let err = ResponseValidator::new().validate_value(&value).unwrap_err();
        assert_eq!(paths(&err), vec!["recommendations.0.items"]);
    }

    #[test]
    fn unknown_day_and_block_category_are_rejected() {
        let mut value = conforming();
        value["weeklySchedule"]["schedule"][0]["day"] = json!("Funday");
        value["weeklySchedule"]["schedule"][0]["blocks"][0]["category"] = json!("leisure");

        let err = ResponseValidator::new().validate_value(&value).unwrap_err();
        assert_eq!(
            paths(&err),
            vec![
                "weeklySchedule.schedule.0.day",
                "weeklySchedule.schedule.0.blocks.0.category",
            ]
        );
    }

    #[test]
    fn bad_time_format_is_rejected() {
        let mut value = conforming();
        value["weeklySchedule"]["schedule"][0]["blocks"][0]["startTime"] = json!("7pm");
        value["weeklySchedule"]["schedule"][0]["blocks"][0]["endTime"] = json!("24:00");

        let err = ResponseValidator::new().validate_value(&value).unwrap_err();
        assert_eq!(
            paths(&err),
            vec![
                "weeklySchedule.schedule.0.blocks.0.startTime",
                "weeklySchedule.schedule.0.blocks.0.endTime",
            ]
        );
    }

    #[test]
    fn every_missing_field_is_reported() {
        let err = ResponseValidator::new()
            .validate_value(&json!({"learningPath": 3}))
            .unwrap_err();

        assert_eq!(
            paths(&err),
            vec![
                "learningPath",
                "timeStrategy",
                "recommendations",
                "suggestedResources",
                "weeklySchedule",
            ]
        );
        assert_eq!(
            err.violations().unwrap()[0].message,
            "Expected string, received number"
        );
    }

    #[test]
    fn empty_resources_are_rejected_but_empty_notes_are_not() {
        let mut value = conforming();
        value["suggestedResources"] = json!([]);
        value["weeklySchedule"]["notes"] = json!([]);

        let err = ResponseValidator::new().validate_value(&value).unwrap_err();
        assert_eq!(paths(&err), vec!["suggestedResources"]);
    }

    #[test]
    fn recommendation_category_must_be_submitted() {
        let mut value = conforming();
        value["recommendations"] = json!([
            {"category": "background", "items": ["a", "b", "c"]},
            {"category": "technical", "items": ["a", "b", "c"]}
        ]);

        let validator =
            ResponseValidator::new().with_allowed_categories(&[ResponseCategory::Background]);
        let err = validator.validate_value(&value).unwrap_err();

        assert_eq!(paths(&err), vec!["recommendations.1.category"]);
        assert!(ResponseValidator::new().validate_value(&value).is_ok());
    }

    #[test]
    fn every_submitted_category_needs_an_entry() {
        let mut value = conforming();
        value["recommendations"] = json!([]);

        let validator = ResponseValidator::new().with_allowed_categories(&[
            ResponseCategory::Background,
            ResponseCategory::Technical,
        ]);
        let err = validator.validate_value(&value).unwrap_err();

        assert!(err.is_schema_violation());
        assert_eq!(paths(&err), vec!["recommendations", "recommendations"]);
        assert_eq!(
            err.violations().unwrap()[1].message,
            "Missing recommendations for category 'technical'"
        );
    }

    #[test]
    fn repeated_category_is_rejected() {
        let mut value = conforming();
        value["recommendations"] = json!([
            {"category": "background", "items": ["a", "b", "c"]},
            {"category": "background", "items": ["d", "e", "f"]}
        ]);

        let validator = ResponseValidator::new().with_allowed_categories(&[
            ResponseCategory::Background,
            ResponseCategory::Technical,
        ]);
        let err = validator.validate_value(&value).unwrap_err();

        let messages: Vec<&str> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Duplicate recommendations for category 'background'",
                "Missing recommendations for category 'technical'",
            ]
        );
        assert!(ResponseValidator::new().validate_value(&value).is_err());
    }

    #[test]
    fn revalidating_validated_output_is_identity() {
        let validator =
            ResponseValidator::new().with_allowed_categories(&[ResponseCategory::Background]);
        let first = validator.validate_value(&conforming()).unwrap();

        let second = validator
            .validate_value(&serde_json::to_value(&first).unwrap())
            .unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let mut value = conforming();
        value["potentialChallenges"] = json!(["time"]);

        let methodology = ResponseValidator::new().validate_value(&value).unwrap();
        let reserialized = serde_json::to_value(&methodology).unwrap();
        assert!(reserialized.get("potentialChallenges").is_none());
    }
}
