//! # Neighborhood Summary Model
//!
//! The display-ready result of a summary request. Everything except the list of
//! vibes and the list of sources is optional, because the only producer is a
//! language model and none of its fields are guaranteed.
//!
//! The types deserialize from the JSON the model is asked to return, so field
//! names follow that schema (`camelCase`, except `wind_speed`).

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::serde::{lenient_f64, lenient_string, lenient_strings};

/// A neighborhood report assembled from one model reply
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Categorized insights, in the order the model returned them
    pub vibes: Vec<LocationVibe>,
    /// Citations, unique by URL, in first-seen order
    pub sources: Vec<GroundingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialTrends>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_news: Option<Vec<NewsArticle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_dive: Option<DeepDive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renters_guide: Option<RentersGuide>,
}

impl Summary {
    /// True when there is nothing worth rendering: no vibes and no weather.
    pub fn is_empty(&self) -> bool {
        self.vibes.is_empty() && self.weather.is_none()
    }

    /// News items, or an empty slice when the section is absent
    pub fn news(&self) -> &[NewsArticle] {
        self.latest_news.as_deref().unwrap_or_default()
    }
}

/// Tone of an insight. Unknown values from the model decode as `Neutral`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => Sentiment::parse_lenient(&s),
            _ => Sentiment::Neutral,
        })
    }
}

/// One categorized insight about the location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationVibe {
    #[serde(default)]
    pub category: String,
    /// Emoji for the category
    #[serde(default)]
    pub icon: String,
    pub main_insight: Insight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_insight: Option<SubInsight>,
}

/// Title and body of a ready-to-share vibe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
}

impl LocationVibe {
    /// Builds the text shared when someone forwards this vibe.
    pub fn share_text(&self, location: &str) -> ShareMessage {
        let main = &self.main_insight;
        let mut text = format!("{} {}\n\"{}\"", main.icon, main.title, main.description);
        if let Some(sub) = &self.sub_insight {
            text.push_str(&format!("\n\nSide Gist: \"{}\"", sub.text));
        }
        text.push_str("\n\n#AmeboAI #HouseHuntingNG #RealTimeGist");

        ShareMessage {
            title: format!("The Real Gist for {location}: {}", self.category),
            text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    /// Emoji
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubInsight {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// A citation backing part of the answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingSource {
    pub title: String,
    pub url: String,
}

/// Current conditions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherData {
    /// Degrees Celsius
    #[serde(default, with = "lenient_f64")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: Option<String>,
    /// Percent
    #[serde(default, with = "lenient_f64")]
    pub humidity: Option<f64>,
    /// km/h
    #[serde(default, alias = "windSpeed", with = "lenient_f64")]
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialTrends {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub hashtags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub top_discussion: Option<String>,
    /// How busy the social scene is, 1 to 10
    #[serde(default, with = "lenient_f64")]
    pub vibe_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time_ago: Option<String>,
}

/// Security, power supply and infrastructure notes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeepDive {
    #[serde(default, deserialize_with = "lenient_string")]
    pub security: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub power: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub infrastructure: Option<String>,
}

/// Livability and rent notes for people looking to move in
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentersGuide {
    #[serde(default, deserialize_with = "lenient_string")]
    pub average_rent: Option<String>,
    /// 1 to 10
    #[serde(default, with = "lenient_f64")]
    pub livability_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub best_for: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_sentiment_is_neutral() {
        let insight: Insight = serde_json::from_value(json!({
            "title": "Traffic",
            "description": "Go-slow everywhere",
            "sentiment": "POSITIVE/NEGATIVE/NEUTRAL",
            "icon": "🚗"
        }))
        .unwrap();
        assert_eq!(insight.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn sentiment_is_case_insensitive() {
        for (raw, expected) in [
            (json!("positive"), Sentiment::Positive),
            (json!(" Negative "), Sentiment::Negative),
            (json!("NEUTRAL"), Sentiment::Neutral),
            (json!(3), Sentiment::Neutral),
            (json!(null), Sentiment::Neutral),
        ] {
            let sub: SubInsight =
                serde_json::from_value(json!({"text": "x", "sentiment": raw})).unwrap();
            assert_eq!(sub.sentiment, expected);
        }
    }

    #[test]
    fn missing_sentiment_is_neutral() {
        let sub: SubInsight = serde_json::from_value(json!({"text": "x"})).unwrap();
        assert_eq!(sub.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn vibe_requires_main_insight() {
        let result = serde_json::from_value::<LocationVibe>(json!({"category": "Security"}));
        assert!(result.is_err());
    }

    #[test]
    fn weather_accepts_both_wind_spellings() {
        let snake: WeatherData = serde_json::from_value(json!({"wind_speed": 8})).unwrap();
        let camel: WeatherData = serde_json::from_value(json!({"windSpeed": "8"})).unwrap();
        assert_eq!(snake.wind_speed, Some(8.0));
        assert_eq!(camel.wind_speed, Some(8.0));
    }

    #[test]
    fn empty_summary() {
        let mut summary = Summary::default();
        assert!(summary.is_empty());
        assert!(summary.news().is_empty());
        summary.weather = Some(WeatherData::default());
        assert!(!summary.is_empty());
    }

    #[test]
    fn share_text_includes_side_gist() {
        let vibe = LocationVibe {
            category: "Power".into(),
            icon: "⚡".into(),
            main_insight: Insight {
                title: "Light don stable".into(),
                description: "Two days without outage".into(),
                sentiment: Sentiment::Positive,
                icon: "💡".into(),
            },
            sub_insight: Some(SubInsight {
                text: "Band A only".into(),
                sentiment: Sentiment::Neutral,
            }),
        };

        let share = vibe.share_text("Yaba");
        assert_eq!(share.title, "The Real Gist for Yaba: Power");
        assert_eq!(
            share.text,
            "💡 Light don stable\n\"Two days without outage\"\n\nSide Gist: \"Band A only\"\n\n#AmeboAI #HouseHuntingNG #RealTimeGist"
        );
    }

    #[test]
    fn serializes_with_schema_names() {
        let summary = Summary {
            social: Some(SocialTrends {
                hashtags: vec!["#Lagos".into()],
                top_discussion: Some("Third Mainland Bridge".into()),
                vibe_score: Some(8.0),
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["social"]["topDiscussion"], "Third Mainland Bridge");
        assert_eq!(value["social"]["vibeScore"], 8.0);
        assert!(value.get("weather").is_none());
        assert_eq!(value["vibes"], json!([]));
    }
}
