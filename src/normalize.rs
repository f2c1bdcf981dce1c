//! # Response Normalizer
//!
//! Turns a raw `generateContent` reply into a [`Summary`]. The model is asked for
//! bare JSON but regularly wraps it in code fences or prose, so the payload is
//! located heuristically before a strict parse.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use snafu::ResultExt;
use std::collections::HashSet;
use tracing::{debug, error, warn};

use crate::{
    error::{Error, MalformedResponseSnafu},
    models::{GenerationResponse, GroundingChunk},
    summary::{GroundingSource, LocationVibe, NewsArticle, Summary},
};

pub const WEB_SOURCE_TITLE: &str = "Web Source";
pub const MAPS_SOURCE_TITLE: &str = "Maps Location";

/// The JSON object the prompt asks for. Every section is optional.
///
/// Sections are held as raw JSON and decoded one at a time in [`reconcile`], so a
/// section with the wrong shape is dropped without sinking the rest.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub social: Option<Value>,
    /// An array of articles; a lone article object is also accepted
    #[serde(default)]
    pub latest_news: Option<Value>,
    #[serde(default)]
    pub deep_dive: Option<Value>,
    #[serde(default)]
    pub renters_guide: Option<Value>,
    #[serde(default)]
    pub vibes: Option<Value>,
}

/// Locate the JSON object inside free text.
///
/// Code-fence markers are stripped, then the text between the first `{` and the
/// last `}` (inclusive) is returned.
pub fn extract_json_payload(text: &str) -> Result<&str, Error> {
    let trimmed = strip_code_fence(text.trim());
    let start = trimmed.find('{').ok_or(Error::SynthesisFailed)?;
    let end = trimmed.rfind('}').ok_or(Error::SynthesisFailed)?;
    if end < start {
        return Err(Error::SynthesisFailed);
    }
    Ok(&trimmed[start..=end])
}

/// Drops a leading ```` ```json ```` / ```` ``` ```` line and a trailing fence.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Extract and strictly parse the payload.
///
/// The raw text is logged on failure and never carried in the error.
pub fn parse_payload(text: &str) -> Result<SummaryPayload, Error> {
    let json = extract_json_payload(text).inspect_err(|_| {
        error!(raw = text, "no JSON object in model reply");
    })?;
    serde_json::from_str(json)
        .inspect_err(|e| error!(error = %e, raw = text, "failed to parse JSON from model reply"))
        .context(MalformedResponseSnafu)
}

/// Citations from grounding metadata, unique by URL in first-seen order.
///
/// `web` wins over `maps` when a chunk carries both with a URI; chunks without
/// any URI are skipped and missing titles get a fixed placeholder.
pub fn merge_sources(chunks: &[GroundingChunk]) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(chunk_source)
        .filter(|source| seen.insert(source.url.clone()))
        .collect()
}

fn chunk_source(chunk: &GroundingChunk) -> Option<GroundingSource> {
    let web = chunk
        .web
        .as_ref()
        .and_then(|web| source(web.uri.as_deref(), web.title.as_deref(), WEB_SOURCE_TITLE));
    web.or_else(|| {
        chunk
            .maps
            .as_ref()
            .and_then(|maps| source(maps.uri.as_deref(), maps.title.as_deref(), MAPS_SOURCE_TITLE))
    })
}

fn source(uri: Option<&str>, title: Option<&str>, placeholder: &str) -> Option<GroundingSource> {
    let url = uri.map(str::trim).filter(|u| !u.is_empty())?;
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(placeholder);

    Some(GroundingSource {
        title: title.to_string(),
        url: url.to_string(),
    })
}

/// Decode one optional section, logging and dropping it if it has the wrong shape.
fn section<T: DeserializeOwned>(name: &'static str, value: Option<Value>) -> Option<T> {
    match value? {
        Value::Null => None,
        value => serde_json::from_value(value)
            .inspect_err(|error| {
                warn!(section = name, %error, "dropping section that does not match the schema")
            })
            .ok(),
    }
}

/// Decode a list section entry by entry, keeping the entries that fit.
fn entries<T: DeserializeOwned>(name: &'static str, value: Option<Value>) -> Option<Vec<T>> {
    let items = match value? {
        Value::Null => return None,
        Value::Array(items) => items,
        item @ Value::Object(_) => vec![item],
        other => {
            warn!(
                section = name,
                kind = json_kind(&other),
                "dropping list section that is not an array"
            );
            return None;
        }
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(
                    section = name,
                    index,
                    %error,
                    "dropping entry that does not match the schema"
                );
                None
            }
        })
        .collect();
    debug!(section = name, kept = kept.len(), total, "decoded entries");
    Some(kept)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a [`Summary`] from a payload and the reply's grounding chunks.
pub fn reconcile(payload: SummaryPayload, chunks: &[GroundingChunk]) -> Summary {
    Summary {
        vibes: entries::<LocationVibe>("vibes", payload.vibes).unwrap_or_default(),
        sources: merge_sources(chunks),
        weather: section("weather", payload.weather),
        social: section("social", payload.social),
        latest_news: entries::<NewsArticle>("latestNews", payload.latest_news),
        deep_dive: section("deepDive", payload.deep_dive),
        renters_guide: section("rentersGuide", payload.renters_guide),
    }
}

/// Normalize a full API reply: text of the first candidate plus its citations.
pub fn normalize(response: &GenerationResponse) -> Result<Summary, Error> {
    let text = response.text();
    if text.trim().is_empty() {
        warn!(
            candidates = response.candidates.len(),
            "model reply contained no text"
        );
        return Err(Error::SynthesisFailed);
    }
    let payload = parse_payload(&text)?;
    Ok(reconcile(payload, response.grounding_chunks()))
}
