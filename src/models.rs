//! Data model for trip requests and generated itineraries
//!
//! All wire shapes use camelCase field names, matching what the frontend
//! sends and what the completion provider is prompted to emit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An incoming request for a trip itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Destination name, 2-60 characters after trimming
    pub destination: String,
    /// Trip start date, "YYYY-MM-DD"
    pub start_date: String,
    /// Trip end date, "YYYY-MM-DD"
    pub end_date: String,
    /// Model identifier to run the generation with
    #[serde(default)]
    pub model: String,
}

/// A structured day-by-day itinerary as returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(default)]
    pub general_tips: Vec<String>,
}

/// One day of the itinerary.
///
/// Every field defaults so that a model response with the right top-level
/// shape still parses when individual days are incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub morning: Vec<Activity>,
    #[serde(default)]
    pub afternoon: Vec<Activity>,
    #[serde(default)]
    pub evening: Vec<Activity>,
    #[serde(default)]
    pub weather_alternatives: Vec<String>,
}

/// A single planned activity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// The combined artifact returned to the caller: structured data plus a
/// markdown rendering. The two are produced by independent generation
/// steps and are not reconciled against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub itinerary_json: Option<ItineraryDocument>,
    pub itinerary_markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ItineraryDocument {
    /// Parse completion output into a document, enforcing the top-level
    /// shape: destination/startDate/endDate must be strings, days and
    /// generalTips must be arrays. Any type mismatch counts as unparsed,
    /// not just syntax errors.
    #[must_use]
    pub fn from_completion_text(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        if !Self::has_expected_shape(&value) {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    fn has_expected_shape(value: &Value) -> bool {
        let Some(obj) = value.as_object() else {
            return false;
        };
        obj.get("destination").is_some_and(Value::is_string)
            && obj.get("startDate").is_some_and(Value::is_string)
            && obj.get("endDate").is_some_and(Value::is_string)
            && obj.get("days").is_some_and(Value::is_array)
            && obj.get("generalTips").is_some_and(Value::is_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document_json() -> String {
        serde_json::json!({
            "destination": "Tokyo",
            "startDate": "2025-05-01",
            "endDate": "2025-05-05",
            "days": [{
                "date": "2025-05-01",
                "summary": "Arrival and Asakusa",
                "morning": [{"title": "Senso-ji", "desc": "Temple visit"}],
                "afternoon": [{"title": "Nakamise", "desc": "Street food"}],
                "evening": [{"title": "Sumida river", "desc": "Evening walk"}],
                "weatherAlternatives": ["Edo museum", "Aquarium", "Kappabashi"]
            }],
            "generalTips": ["Get a Suica card"]
        })
        .to_string()
    }

    #[test]
    fn test_parse_valid_document() {
        let doc = ItineraryDocument::from_completion_text(&valid_document_json()).unwrap();
        assert_eq!(doc.destination, "Tokyo");
        assert_eq!(doc.days.len(), 1);
        assert_eq!(doc.days[0].morning[0].title, "Senso-ji");
        assert_eq!(doc.days[0].weather_alternatives.len(), 3);
        assert_eq!(doc.general_tips, vec!["Get a Suica card"]);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(ItineraryDocument::from_completion_text("not json at all").is_none());
        assert!(ItineraryDocument::from_completion_text("{\"destination\":").is_none());
    }

    #[test]
    fn test_parse_rejects_type_mismatch() {
        // days as a string is a shape failure even though the JSON parses
        let text = serde_json::json!({
            "destination": "Tokyo",
            "startDate": "2025-05-01",
            "endDate": "2025-05-05",
            "days": "none",
            "generalTips": []
        })
        .to_string();
        assert!(ItineraryDocument::from_completion_text(&text).is_none());

        let text = serde_json::json!({
            "destination": 42,
            "startDate": "2025-05-01",
            "endDate": "2025-05-05",
            "days": [],
            "generalTips": []
        })
        .to_string();
        assert!(ItineraryDocument::from_completion_text(&text).is_none());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let text = serde_json::json!({
            "destination": "Tokyo",
            "days": [],
            "generalTips": []
        })
        .to_string();
        assert!(ItineraryDocument::from_completion_text(&text).is_none());
    }

    #[test]
    fn test_parse_tolerates_incomplete_days() {
        // Day entries missing fields still parse; the shape rule is
        // top-level only.
        let text = serde_json::json!({
            "destination": "Tokyo",
            "startDate": "2025-05-01",
            "endDate": "2025-05-05",
            "days": [{"date": "2025-05-01"}],
            "generalTips": []
        })
        .to_string();
        let doc = ItineraryDocument::from_completion_text(&text).unwrap();
        assert_eq!(doc.days[0].date, "2025-05-01");
        assert!(doc.days[0].morning.is_empty());
        assert!(doc.days[0].summary.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(ItineraryDocument::from_completion_text("[1, 2, 3]").is_none());
        assert!(ItineraryDocument::from_completion_text("\"just a string\"").is_none());
    }

    #[test]
    fn test_result_serialization_skips_absent_note() {
        let result = ItineraryResult {
            itinerary_json: None,
            itinerary_markdown: "raw text".to_string(),
            note: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["itineraryMarkdown"], "raw text");
        assert_eq!(json["itineraryJson"], Value::Null);
    }

    #[test]
    fn test_trip_request_wire_names() {
        let request: TripRequest = serde_json::from_str(
            r#"{"destination":"Tokyo","startDate":"2025-05-01","endDate":"2025-05-05","model":"openai/gpt-4o-mini"}"#,
        )
        .unwrap();
        assert_eq!(request.start_date, "2025-05-01");
        assert_eq!(request.model, "openai/gpt-4o-mini");
    }
}
