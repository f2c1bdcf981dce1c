use snafu::ResultExt;
use std::{sync::Arc, time::Duration};
use tracing::{info, instrument, warn};

use crate::{
    client::{Gemini, Generate},
    config::{Config, DEFAULT_GEOLOCATION_TIMEOUT},
    error::{Error, ServiceUnavailableSnafu},
    geolocation::{locate, Coordinates, LocationProvider},
    normalize::normalize,
    prompt::{build_request, Location, RequestOptions},
    summary::Summary,
};

/// Runs the summary workflow: build the request, make one call, normalize.
///
/// There are no retries; each failure goes straight back to the caller.
#[derive(Clone)]
pub struct Summarizer {
    backend: Arc<dyn Generate>,
    options: RequestOptions,
    geolocation_timeout: Duration,
}

impl Summarizer {
    /// Summarizer backed by the Gemini HTTP API
    pub fn from_config(config: &Config) -> Self {
        Self::with_backend(Gemini::from_config(config))
            .with_maps_grounding(config.maps_grounding)
            .with_geolocation_timeout(config.geolocation_timeout)
    }

    /// Summarizer backed by any [`Generate`] implementation
    pub fn with_backend(backend: impl Generate + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            options: RequestOptions::default(),
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
        }
    }

    pub fn with_maps_grounding(mut self, enabled: bool) -> Self {
        self.options.maps_grounding = enabled;
        self
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Summarize `location`, optionally biasing maps results towards `coordinates`.
    #[instrument(skip_all, fields(
        location = location,
        coordinates.present = coordinates.is_some(),
        maps.grounding = self.options.maps_grounding,
    ))]
    pub async fn summarize(
        &self,
        location: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<Summary, Error> {
        let location = Location::new(location)?;
        let request = build_request(&location, coordinates, self.options);

        let response = self
            .backend
            .generate_content(request.into())
            .await
            .inspect_err(|error| warn!(%error, "summary request failed"))
            .context(ServiceUnavailableSnafu)?;

        let summary = normalize(&response)?;
        info!(
            vibes = summary.vibes.len(),
            sources = summary.sources.len(),
            weather = summary.weather.is_some(),
            "summary ready"
        );
        Ok(summary)
    }

    /// Like [`summarize`](Self::summarize), but first asks `provider` for the
    /// current position. The lookup is bounded by the geolocation timeout and
    /// its failure only means the request goes out without coordinates.
    pub async fn summarize_with_location(
        &self,
        location: &str,
        provider: &dyn LocationProvider,
    ) -> Result<Summary, Error> {
        // reject empty input before spending time on the position lookup
        Location::new(location)?;
        let coordinates = locate(provider, self.geolocation_timeout).await;
        self.summarize(location, coordinates).await
    }
}
