//! Prompt and tool selection for a neighborhood summary request.
//!
//! The JSON schema embedded in the prompt is the contract the
//! [`normalize`](crate::normalize) module decodes; the two move together.

use crate::{
    error::Error,
    geolocation::Coordinates,
    models::{Content, GenerateContentRequest, Role},
    tools::{Tool, ToolConfig},
};

/// Top-level keys the model is asked to return
pub const SCHEMA_KEYS: [&str; 6] = [
    "weather",
    "social",
    "latestNews",
    "deepDive",
    "rentersGuide",
    "vibes",
];

/// A non-empty, trimmed location name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    pub fn new(name: impl AsRef<str>) -> Result<Self, Error> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::InvalidInput);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Location {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Knobs for [`build_request`]
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    /// Enable Google Maps grounding next to Google Search
    pub maps_grounding: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            maps_grounding: true,
        }
    }
}

/// Prompt text plus tool configuration, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub prompt: String,
    pub tools: Vec<Tool>,
    pub tool_config: Option<ToolConfig>,
}

impl From<SummaryRequest> for GenerateContentRequest {
    fn from(request: SummaryRequest) -> Self {
        GenerateContentRequest {
            contents: vec![Content::text(request.prompt).with_role(Role::User)],
            tools: Some(request.tools),
            tool_config: request.tool_config,
        }
    }
}

/// Build the prompt and tools for `location`.
///
/// Search grounding is always on. Coordinates, when present, become a
/// retrieval hint for the maps tool and are dropped if maps grounding is off.
pub fn build_request(
    location: &Location,
    coordinates: Option<Coordinates>,
    options: RequestOptions,
) -> SummaryRequest {
    let mut tools = vec![Tool::google_search()];
    let mut tool_config = None;

    if options.maps_grounding {
        tools.push(Tool::google_maps(None));
        tool_config = coordinates.map(ToolConfig::near);
    }

    SummaryRequest {
        prompt: summary_prompt(location),
        tools,
        tool_config,
    }
}

fn summary_prompt(location: &Location) -> String {
    format!(
        r##"You are "AmeboAI", the number one gossip in town. Your task is to give the REAL, unfiltered, dramatic gist about {location}.

Use Google Search and Google Maps to find:
1. CURRENT WEATHER: real-time temperature (Celsius), condition, humidity (%), and wind speed (km/h).
2. SOCIAL MEDIA TRENDS: what is trending on Twitter/X, Instagram, or local forums about {location}. Identify popular hashtags and the single most talked-about topic right now.
3. LATEST NEWS: up to five recent local headlines with their outlet, link, and how long ago they were published.
4. DEEP DIVE: security (crime reports, area reputation), power supply (outages, tariff band), and infrastructure (roads, flooding, network quality).
5. RENTERS GUIDE: typical rent, a livability score from 1 to 10, who the area suits best, and practical tips for someone moving in.
6. VIBES: traffic, popular spots, and general happenings, grouped by category.

Respond with ONLY a raw JSON object with exactly this structure:
{{
  "weather": {{
    "temperature": 0,
    "condition": "Condition string",
    "humidity": 0,
    "wind_speed": 0
  }},
  "social": {{
    "hashtags": ["#tag1", "#tag2", "#tag3"],
    "topDiscussion": "Dramatic summary of the hottest social media topic",
    "vibeScore": 8
  }},
  "latestNews": [
    {{ "headline": "Headline", "source": "Outlet", "url": "https://...", "timeAgo": "2 hours ago" }}
  ],
  "deepDive": {{
    "security": "Security gist",
    "power": "Power supply gist",
    "infrastructure": "Roads, flooding and network gist"
  }},
  "rentersGuide": {{
    "averageRent": "Typical yearly rent with currency",
    "livabilityScore": 7,
    "bestFor": ["Who the area suits"],
    "tips": ["Practical tip"]
  }},
  "vibes": [
    {{
      "category": "Category Name",
      "icon": "Emoji",
      "mainInsight": {{ "title": "Pidgin Title", "description": "Gossip detail", "sentiment": "POSITIVE", "icon": "Emoji" }},
      "subInsight": {{ "text": "Nuance detail", "sentiment": "NEUTRAL" }}
    }}
  ]
}}

"sentiment" must be one of POSITIVE, NEGATIVE or NEUTRAL.
Be dramatic and use Nigerian Pidgin/slang for the vibes and social discussion. For weather, news and rent figures, be accurate.
Do not wrap the JSON in Markdown code fences and do not add any text before or after it."##,
        location = location.as_str()
    )
}
