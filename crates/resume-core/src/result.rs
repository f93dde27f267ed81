//! The structured record the parse endpoint returns.

use serde_json::Value;

/// Extracted resume data plus the computed match score.
///
/// Every field is optional: the backend may omit any of them, and a field
/// with an unexpected JSON type is treated as absent rather than failing the
/// whole response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Fit between resume and requirements, nominally 0–100.
    pub match_score: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
    pub experience: Option<Vec<String>>,
    pub full_text: Option<String>,
}

impl ParseResult {
    /// Decode a result object, keeping whatever fields have the expected type.
    /// A non-object value decodes to an empty result.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let string = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        let list = |key: &str| {
            obj.get(key).and_then(Value::as_array).map(|arr| {
                arr.iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
        };

        Self {
            name: string("name"),
            email: string("email"),
            phone: string("phone"),
            match_score: obj.get("match_score").and_then(Value::as_f64),
            skills: list("skills"),
            education: list("education"),
            experience: list("experience"),
            full_text: string("full_text"),
        }
    }

    /// Pull the nested result out of the response envelope
    /// (`{"success": true, "data": {...}}`).
    pub fn from_envelope(body: &Value) -> Self {
        match body.get("data") {
            Some(data) => Self::from_value(data),
            None => {
                tracing::debug!("response envelope has no `data` field");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_envelope() {
        let body = json!({
            "success": true,
            "data": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 555 123 4567",
                "match_score": 87,
                "skills": ["Python", "SQL"],
                "education": ["B.Tech in Computer Science"],
                "experience": ["Jan 2020 - Dec 2023"],
                "full_text": "Jane Doe\nPython developer"
            }
        });

        let result = ParseResult::from_envelope(&body);
        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.match_score, Some(87.0));
        assert_eq!(
            result.skills,
            Some(vec!["Python".to_string(), "SQL".to_string()])
        );
        assert_eq!(
            result.full_text.as_deref(),
            Some("Jane Doe\nPython developer")
        );
    }

    #[test]
    fn empty_object_has_no_fields() {
        assert_eq!(
            ParseResult::from_envelope(&json!({"data": {}})),
            ParseResult::default()
        );
    }

    #[test]
    fn unexpected_shapes_degrade_to_absent_fields() {
        let body = json!({
            "data": {
                "name": 42,
                "email": null,
                "match_score": "high",
                "skills": "Python",
                "education": ["BSc Physics", null, {"x": 1}]
            }
        });
        let result = ParseResult::from_envelope(&body);
        assert_eq!(result.name, None);
        assert_eq!(result.email, None);
        assert_eq!(result.match_score, None);
        assert_eq!(result.skills, None);
        assert_eq!(result.education, Some(vec!["BSc Physics".to_string()]));

        assert_eq!(
            ParseResult::from_envelope(&json!({"data": [1, 2]})),
            ParseResult::default()
        );
        assert_eq!(
            ParseResult::from_envelope(&json!({"success": true})),
            ParseResult::default()
        );
    }

    #[test]
    fn fractional_scores_are_kept() {
        let result = ParseResult::from_value(&json!({"match_score": 73.33}));
        assert_eq!(result.match_score, Some(73.33));
    }
}
