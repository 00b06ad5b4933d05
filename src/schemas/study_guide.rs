use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameters for one step of a study guide. Absent fields fall back to
/// empty values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyGuideRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_available: String,
    #[serde(deserialize_with = "null_as_default")]
    pub learning_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub step: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub previous_responses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentRequest {
    pub component: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuideResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let req: StudyGuideRequest = serde_json::from_str(r#"{"subject": "Algebra"}"#).unwrap();
        assert_eq!(req.subject, "Algebra");
        assert_eq!(req.current_level, "");
        assert_eq!(req.step, 0);
        assert!(req.previous_responses.is_empty());
    }

    #[test]
    fn camel_case_fields_are_read() {
        let req: StudyGuideRequest = serde_json::from_str(
            r#"{
                "subject": "Chemistry",
                "currentLevel": "Intermediate",
                "timeAvailable": "3",
                "learningStyle": "Auditory",
                "goal": "Lab work",
                "step": 2,
                "previousResponses": ["one", "two"]
            }"#,
        )
        .unwrap();
        assert_eq!(req.current_level, "Intermediate");
        assert_eq!(req.time_available, "3");
        assert_eq!(req.learning_style, "Auditory");
        assert_eq!(req.step, 2);
        assert_eq!(req.previous_responses, vec!["one", "two"]);
    }

    #[test]
    fn explicit_nulls_read_as_empty() {
        let req: StudyGuideRequest = serde_json::from_str(
            r#"{"subject": null, "goal": null, "step": null, "previousResponses": null}"#,
        )
        .unwrap();
        assert_eq!(req.subject, "");
        assert_eq!(req.goal, "");
        assert_eq!(req.step, 0);
        assert!(req.previous_responses.is_empty());
    }

    #[test]
    fn negative_step_is_rejected() {
        let result = serde_json::from_str::<StudyGuideRequest>(r#"{"subject": "Algebra", "step": -1}"#);
        assert!(result.is_err());
    }
}
