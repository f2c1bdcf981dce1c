use serde::{Deserialize, Serialize};

/// Grounding tool that can be enabled for a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Tool {
    /// Google Search tool
    GoogleSearch {
        /// The Google Search configuration
        #[serde(rename = "googleSearch")]
        google_search: GoogleSearchConfig,
    },
    /// Google Maps tool
    GoogleMaps {
        /// The Google Maps configuration
        #[serde(rename = "googleMaps")]
        google_maps: GoogleMapsConfig,
    },
}

/// Empty configuration for Google Search tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoogleSearchConfig {}

/// Configuration for Google Maps tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleMapsConfig {
    /// Whether to return a widget context token alongside maps results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_widget: Option<bool>,
}

impl Tool {
    /// Create a new Google Search tool
    pub fn google_search() -> Self {
        Self::GoogleSearch {
            google_search: GoogleSearchConfig {},
        }
    }

    /// Create a new Google Maps tool
    pub fn google_maps(enable_widget: Option<bool>) -> Self {
        Self::GoogleMaps {
            google_maps: GoogleMapsConfig { enable_widget },
        }
    }

    pub fn is_google_maps(&self) -> bool {
        matches!(self, Self::GoogleMaps { .. })
    }
}

/// Configuration for tools
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Retrieval hints for grounding tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_config: Option<RetrievalConfig>,
}

impl ToolConfig {
    /// Tool configuration that biases maps retrieval towards a coordinate.
    pub fn near(lat_lng: LatLng) -> Self {
        Self {
            retrieval_config: Some(RetrievalConfig {
                lat_lng: Some(lat_lng),
            }),
        }
    }
}

/// Retrieval configuration for grounding tools
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    /// Location the maps tool should treat as "here"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
