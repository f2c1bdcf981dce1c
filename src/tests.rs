use crate::{normalize::normalize, FinishReason, GenerationResponse, Part, Sentiment};
use serde_json::json;

fn grounded_reply() -> serde_json::Value {
    let payload = json!({
        "weather": {"temperature": "29", "condition": "Light rain", "humidity": 88, "wind_speed": 12},
        "social": {"hashtags": ["#Yaba", "#LagosTraffic"], "topDiscussion": "Herbert Macaulay go-slow", "vibeScore": 7},
        "latestNews": [
            {"headline": "Road repairs begin on Herbert Macaulay Way", "source": "Punch", "url": "https://punchng.com/road", "timeAgo": "3 hours ago"}
        ],
        "deepDive": {"security": "Calm, but watch your phone for bus stops", "power": "Band B, about 16 hours daily", "infrastructure": null},
        "rentersGuide": {"averageRent": "₦1.8m per year", "livabilityScore": 7, "bestFor": ["Students", "Tech workers"], "tips": null},
        "vibes": [
            {
                "category": "Traffic",
                "icon": "🚗",
                "mainInsight": {"title": "Go-slow no get part two", "description": "Rain don join", "sentiment": "NEGATIVE", "icon": "🌧️"},
                "subInsight": {"text": "Third Mainland still dey move small", "sentiment": "NEUTRAL"}
            }
        ]
    });

    json!({
        "candidates": [
            {
                "content": {
                    "parts": [
                        {"text": "Let me look up the area first.", "thought": true},
                        {"text": format!("Here you go:\n```json\n{payload}\n```")}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP",
                "groundingMetadata": {
                    "webSearchQueries": ["Yaba Lagos news today"],
                    "groundingChunks": [
                        {"web": {"uri": "https://punchng.com/road", "title": "punchng.com"}},
                        {"maps": {"uri": "https://maps.google.com/?cid=123", "title": "Yaba Market", "placeId": "places/abc"}},
                        {"web": {"uri": "https://punchng.com/road", "title": "Punch duplicate"}},
                        {"web": {"uri": "https://guardian.ng/yaba"}}
                    ]
                },
                "index": 0
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 412,
            "candidatesTokenCount": 530,
            "totalTokenCount": 1200,
            "thoughtsTokenCount": 258
        },
        "modelVersion": "gemini-2.5-flash"
    })
}

#[test]
fn test_grounded_response_deserialization() {
    let response: GenerationResponse = serde_json::from_value(grounded_reply()).unwrap();

    assert_eq!(response.candidates.len(), 1);
    let candidate = &response.candidates[0];
    assert_eq!(candidate.finish_reason, Some(FinishReason::Stop));

    // The thought part is kept on the wire type but excluded from text()
    let parts = candidate.content.parts.as_ref().unwrap();
    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[0], Part::Text { thought: Some(true), .. }));
    assert!(!response.text().contains("Let me look up"));
    assert!(response.text().starts_with("Here you go:"));

    // Both kinds of grounding chunk are decoded
    let chunks = response.grounding_chunks();
    assert_eq!(chunks.len(), 4);
    assert_eq!(
        chunks[1].maps.as_ref().unwrap().place_id.as_deref(),
        Some("places/abc")
    );

    let usage = response.usage_metadata.as_ref().unwrap();
    assert_eq!(usage.thoughts_token_count, Some(258));
}

#[test]
fn test_grounded_response_normalization() {
    let response: GenerationResponse = serde_json::from_value(grounded_reply()).unwrap();
    let summary = normalize(&response).unwrap();

    let weather = summary.weather.as_ref().unwrap();
    assert_eq!(weather.temperature, Some(29.0));
    assert_eq!(weather.condition.as_deref(), Some("Light rain"));

    let social = summary.social.as_ref().unwrap();
    assert_eq!(social.hashtags, ["#Yaba", "#LagosTraffic"]);
    assert_eq!(social.vibe_score, Some(7.0));

    assert_eq!(summary.news().len(), 1);
    assert_eq!(summary.news()[0].source.as_deref(), Some("Punch"));

    let deep_dive = summary.deep_dive.as_ref().unwrap();
    assert!(deep_dive.power.as_deref().unwrap().contains("Band B"));
    assert_eq!(deep_dive.infrastructure, None);

    let guide = summary.renters_guide.as_ref().unwrap();
    assert_eq!(guide.best_for.len(), 2);
    assert!(guide.tips.is_empty());

    assert_eq!(summary.vibes.len(), 1);
    let vibe = &summary.vibes[0];
    assert_eq!(vibe.main_insight.sentiment, Sentiment::Negative);
    assert_eq!(vibe.sub_insight.as_ref().unwrap().sentiment, Sentiment::Neutral);

    // Duplicate URL collapsed onto the first title, missing title filled in
    let sources: Vec<_> = summary
        .sources
        .iter()
        .map(|s| (s.title.as_str(), s.url.as_str()))
        .collect();
    assert_eq!(
        sources,
        [
            ("punchng.com", "https://punchng.com/road"),
            ("Yaba Market", "https://maps.google.com/?cid=123"),
            ("Web Source", "https://guardian.ng/yaba"),
        ]
    );
}

#[test]
fn test_unknown_finish_reason_and_parts() {
    // Newer API versions add enum values and part kinds; they must not break decoding
    let response: GenerationResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": {
                "parts": [
                    {"functionCall": {"name": "lookup", "args": {}}},
                    {"text": "{\"vibes\": []}"}
                ]
            },
            "finishReason": "MALFORMED_FUNCTION_CALL"
        }]
    }))
    .unwrap();

    assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Other));
    assert_eq!(response.text(), "{\"vibes\": []}");
    let summary = normalize(&response).unwrap();
    assert!(summary.is_empty());
}
