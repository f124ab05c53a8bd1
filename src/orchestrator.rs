//! Itinerary generation orchestrator
//!
//! Drives the two dependent completion calls that turn a validated trip
//! request into an [`ItineraryResult`]: one JSON-constrained call for the
//! structured document (with a single repair attempt when the model's
//! output does not parse), then one free-form call rendering that
//! document as markdown. All calls share one deadline.

use crate::completion::{CompletionBackend, CompletionRequest};
use crate::models::{ItineraryDocument, ItineraryResult, TripRequest};
use crate::validation::validate_trip;
use crate::{Result, WanderplanError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

/// Temperature for the initial JSON-constrained call
const JSON_TEMPERATURE: f32 = 0.3;
/// Temperature for the repair call, lowered further to bias toward
/// mechanical correction
const REPAIR_TEMPERATURE: f32 = 0.1;
/// Temperature for the markdown rendering call
const MARKDOWN_TEMPERATURE: f32 = 0.5;

/// Note attached to the degraded fallback result
const PARSE_FAILED_NOTE: &str = "JSON parse failed";

/// Placeholder used when the markdown call fails after a valid document
/// was obtained
const MARKDOWN_PLACEHOLDER: &str =
    "_The formatted itinerary could not be generated, but the structured itinerary data above is available._";

/// Orchestrates itinerary generation against a completion backend
#[derive(Clone)]
pub struct Orchestrator {
    backend: Arc<dyn CompletionBackend>,
    default_model: String,
    timeout: Duration,
}

/// Shared deadline spanning one whole generation request
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
}

impl Deadline {
    fn starting_now(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

impl Orchestrator {
    /// Create a new orchestrator over the given backend
    pub fn new(backend: Arc<dyn CompletionBackend>, default_model: String, timeout: Duration) -> Self {
        Self {
            backend,
            default_model,
            timeout,
        }
    }

    /// Generate an itinerary for the given trip request.
    ///
    /// Validation failures, upstream rejections of the initial call, and
    /// deadline expiry during the JSON phase are errors. Everything else
    /// degrades: an unrepairable document becomes a raw-text fallback
    /// with a note, a failed markdown call becomes a placeholder.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate(&self, request: &TripRequest) -> Result<ItineraryResult> {
        let span = validate_trip(&request.destination, &request.start_date, &request.end_date)?;
        let destination = request.destination.trim();

        let deadline = Deadline::starting_now(self.timeout);
        let model = if request.model.is_empty() {
            self.default_model.as_str()
        } else {
            request.model.as_str()
        };

        info!(model, days = span.days, "Generating itinerary");

        let raw = self
            .call(
                model,
                itinerary_prompt(destination, &request.start_date, &request.end_date),
                JSON_TEMPERATURE,
                true,
                deadline,
                "itinerary generation",
            )
            .await?;

        let (document, raw) = match ItineraryDocument::from_completion_text(&raw) {
            Some(document) => (Some(document), raw),
            None => {
                warn!("Itinerary response failed JSON parse, attempting repair");
                let repaired = self.repair(model, &raw, deadline).await?;
                (repaired, raw)
            }
        };

        let Some(document) = document else {
            // Degraded fallback: deliver the raw model output instead of
            // failing the whole request.
            info!("Repair unsuccessful, returning raw text fallback");
            return Ok(ItineraryResult {
                itinerary_json: None,
                itinerary_markdown: raw,
                note: Some(PARSE_FAILED_NOTE.to_string()),
            });
        };

        let markdown = match self
            .call(
                model,
                markdown_prompt(&document),
                MARKDOWN_TEMPERATURE,
                false,
                deadline,
                "markdown rendering",
            )
            .await
        {
            Ok(markdown) => markdown,
            Err(e) => {
                warn!("Markdown rendering failed, substituting placeholder: {e}");
                MARKDOWN_PLACEHOLDER.to_string()
            }
        };

        Ok(ItineraryResult {
            itinerary_json: Some(document),
            itinerary_markdown: markdown,
            note: None,
        })
    }

    /// Issue the single repair call for a malformed itinerary response.
    ///
    /// Deadline expiry propagates as a timeout error (no document exists
    /// yet); any other failure resolves to `None` so the caller degrades
    /// to the raw-text fallback.
    async fn repair(
        &self,
        model: &str,
        malformed: &str,
        deadline: Deadline,
    ) -> Result<Option<ItineraryDocument>> {
        match self
            .call(
                model,
                repair_prompt(malformed),
                REPAIR_TEMPERATURE,
                true,
                deadline,
                "itinerary repair",
            )
            .await
        {
            Ok(text) => Ok(ItineraryDocument::from_completion_text(&text)),
            Err(timeout @ WanderplanError::Timeout { .. }) => Err(timeout),
            Err(e) => {
                warn!("Repair call failed: {e}");
                Ok(None)
            }
        }
    }

    /// Run one completion call bounded by the shared deadline
    async fn call(
        &self,
        model: &str,
        prompt: String,
        temperature: f32,
        json_mode: bool,
        deadline: Deadline,
        phase: &'static str,
    ) -> Result<String> {
        let remaining = deadline.remaining();
        if remaining.is_zero() {
            return Err(WanderplanError::Timeout { phase });
        }

        let request = CompletionRequest {
            model: model.to_string(),
            prompt,
            temperature,
            json_mode,
            timeout: remaining,
        };

        match tokio::time::timeout(remaining, self.backend.complete(request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(WanderplanError::Timeout { .. })) | Err(_) => {
                Err(WanderplanError::Timeout { phase })
            }
            Ok(Err(e)) => Err(e),
        }
    }
}

fn itinerary_prompt(destination: &str, start_date: &str, end_date: &str) -> String {
    format!(
        r#"Create a day-by-day travel itinerary for {destination} from {start_date} to {end_date}.

Respond with ONLY a JSON object, no prose and no code fences, in exactly this shape:
{{
  "destination": "{destination}",
  "startDate": "{start_date}",
  "endDate": "{end_date}",
  "days": [
    {{
      "date": "YYYY-MM-DD",
      "summary": "one-sentence theme of the day",
      "morning": [{{"title": "activity name", "desc": "one or two sentences"}}],
      "afternoon": [{{"title": "activity name", "desc": "one or two sentences"}}],
      "evening": [{{"title": "activity name", "desc": "one or two sentences"}}],
      "weatherAlternatives": ["indoor option 1", "indoor option 2", "indoor option 3"]
    }}
  ],
  "generalTips": ["tip 1", "tip 2"]
}}

Include exactly three weatherAlternatives per day. Output nothing but the JSON object."#
    )
}

fn repair_prompt(malformed: &str) -> String {
    format!(
        r#"The following text was supposed to be a valid JSON object but is malformed or has the wrong shape. Fix it into valid JSON with string fields destination, startDate, endDate and array fields days and generalTips. Respond with ONLY the corrected JSON object, no commentary and no code fences.

{malformed}"#
    )
}

fn markdown_prompt(document: &ItineraryDocument) -> String {
    // Serialization of our own document cannot fail
    let json = serde_json::to_string_pretty(document).unwrap_or_default();
    format!(
        r#"Transform this travel itinerary JSON into a well-formatted markdown itinerary with a heading per day. Respond with ONLY the formatted markdown text, no JSON and no code fences.

{json}"#
    )
}
