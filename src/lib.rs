//! Wanderplan - AI-assisted day-by-day travel itinerary planning
//!
//! This library turns a destination and a date range into a structured
//! itinerary plus a markdown rendering of it, by orchestrating calls to
//! an OpenAI-compatible completion provider.

pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod validation;
pub mod web;

// Re-export core types for public API
pub use completion::{CompletionBackend, CompletionClient, CompletionRequest};
pub use config::WanderplanConfig;
pub use error::WanderplanError;
pub use models::{Activity, DayPlan, ItineraryDocument, ItineraryResult, TripRequest};
pub use orchestrator::Orchestrator;
pub use validation::{TripSpan, validate_trip};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WanderplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
