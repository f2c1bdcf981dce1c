//! Best-effort device position lookup.
//!
//! A position only biases the maps grounding tool. A lookup that is denied,
//! fails or runs past its timeout yields `None` and the summary goes ahead
//! without coordinates.

use async_trait::async_trait;
use snafu::Snafu;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::tools::LatLng;

/// Latitude/longitude in degrees
pub type Coordinates = LatLng;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("permission to read the position was denied"))]
    PermissionDenied,

    #[snafu(display("position is unavailable: {reason}"))]
    Unavailable { reason: String },

    #[snafu(display("position lookup is not supported here"))]
    Unsupported,
}

/// Source of the caller's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

/// Always reports the same coordinates, e.g. ones passed on the command line
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        Ok(self.0)
    }
}

/// A provider for environments without any position source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        UnsupportedSnafu.fail()
    }
}

/// Ask `provider` for a position, giving up after `timeout`.
///
/// Never fails: every error and the timeout map to `None`.
#[instrument(skip_all, fields(timeout.ms = timeout.as_millis() as u64))]
pub async fn locate(provider: &dyn LocationProvider, timeout: Duration) -> Option<Coordinates> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(position)) if is_valid(&position) => {
            debug!(
                latitude = position.latitude,
                longitude = position.longitude,
                "position acquired"
            );
            Some(position)
        }
        Ok(Ok(position)) => {
            warn!(
                latitude = position.latitude,
                longitude = position.longitude,
                "position out of range, proceeding without it"
            );
            None
        }
        Ok(Err(error)) => {
            warn!(%error, "geolocation failed or denied, proceeding without it");
            None
        }
        Err(_) => {
            warn!("geolocation timed out, proceeding without it");
            None
        }
    }
}

fn is_valid(position: &Coordinates) -> bool {
    (-90.0..=90.0).contains(&position.latitude) && (-180.0..=180.0).contains(&position.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Denied;

    #[async_trait]
    impl LocationProvider for Denied {
        async fn current_position(&self) -> Result<Coordinates, Error> {
            PermissionDeniedSnafu.fail()
        }
    }

    struct Slow;

    #[async_trait]
    impl LocationProvider for Slow {
        async fn current_position(&self) -> Result<Coordinates, Error> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(LatLng::new(6.5, 3.4))
        }
    }

    #[tokio::test]
    async fn fixed_location_is_returned() {
        let provider = FixedLocation(LatLng::new(6.5244, 3.3792));
        let position = locate(&provider, Duration::from_secs(1)).await;
        assert_eq!(position, Some(LatLng::new(6.5244, 3.3792)));
    }

    #[tokio::test]
    async fn denial_is_swallowed() {
        assert_eq!(locate(&Denied, Duration::from_secs(1)).await, None);
    }

    #[tokio::test]
    async fn unsupported_is_swallowed() {
        assert_eq!(locate(&NoLocation, Duration::from_secs(1)).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookup_times_out() {
        assert_eq!(locate(&Slow, Duration::from_millis(1500)).await, None);
    }

    #[tokio::test]
    async fn out_of_range_position_is_dropped() {
        let provider = FixedLocation(LatLng::new(123.0, 3.0));
        let position = locate(&provider, Duration::from_secs(1)).await;
        assert_eq!(position, None);
    }
}
