//! # amebo
//!
//! Neighborhood intelligence reports from Google Gemini.
//!
//! Give it a place name and it asks Gemini, grounded on Google Search and
//! optionally Google Maps, for the weather, social buzz, news, security and
//! power situation, rent outlook and a handful of categorized "vibes", then
//! returns all of that as a typed [`Summary`] with de-duplicated citations.
//!
//! ```rust,no_run
//! use amebo::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let summarizer = Summarizer::from_config(&config);
//!
//! match summarizer.summarize("Yaba, Lagos", None).await {
//!     Ok(summary) => println!("{} vibes, {} sources", summary.vibes.len(), summary.sources.len()),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod common;
pub mod config;
mod error;
pub mod geolocation;
mod models;
pub mod normalize;
pub mod prelude;
pub mod prompt;
mod summarizer;
mod summary;
pub mod tools;

#[cfg(test)]
mod tests;

pub use client::{Error as ClientError, Gemini, Generate};
pub use config::{Config, Error as ConfigError};
pub use error::Error;
pub use geolocation::{Coordinates, FixedLocation, LocationProvider, NoLocation};
pub use models::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerationResponse,
    GroundingChunk, GroundingMetadata, MapsChunk, Part, Role, UsageMetadata, WebChunk,
};
pub use prompt::{build_request, Location, RequestOptions, SummaryRequest};
pub use summarizer::Summarizer;
pub use summary::{
    DeepDive, GroundingSource, Insight, LocationVibe, NewsArticle, RentersGuide, Sentiment,
    ShareMessage, SocialTrends, SubInsight, Summary, WeatherData,
};
pub use tools::{LatLng, Tool, ToolConfig};
