//! # Prelude for the amebo Crate
//!
//! This module re-exports the most commonly used types for convenience.
//!
//! ```rust,ignore
//! use amebo::prelude::*;
//! ```

pub use crate::client::{Error as ClientError, Gemini, Generate};
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::geolocation::{Coordinates, FixedLocation, LocationProvider, NoLocation};
pub use crate::summarizer::Summarizer;
pub use crate::summary::{GroundingSource, LocationVibe, Sentiment, Summary};
