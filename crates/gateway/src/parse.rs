use roam_core::{AdvisoryRecord, Location, LocationList};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{UpstreamError, AI_GATEWAY, TRAVEL_ADVISORY};

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: String,
    advisory: Advisory,
}

#[derive(Debug, Deserialize)]
struct Advisory {
    score: f64,
    message: String,
    sources_active: u32,
    updated: String,
}

pub fn message_content(payload: &Value) -> Result<String, UpstreamError> {
    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| UpstreamError::malformed(AI_GATEWAY, "no message content in AI response"))
}

/// Locations come back as the JSON-encoded arguments of the forced tool call.
pub fn tool_call_locations(payload: &Value) -> Result<Vec<Location>, UpstreamError> {
    let arguments = payload
        .pointer("/choices/0/message/tool_calls/0/function/arguments")
        .and_then(Value::as_str)
        .ok_or_else(|| UpstreamError::malformed(AI_GATEWAY, "no tool call in AI response"))?;

    let parsed: LocationList =
        serde_json::from_str(arguments).map_err(|source| UpstreamError::Decode {
            service: AI_GATEWAY,
            source,
        })?;
    Ok(parsed.locations)
}

pub fn advisory_record(payload: &Value, country_code: &str) -> Result<AdvisoryRecord, UpstreamError> {
    let entry = payload
        .get("data")
        .and_then(Value::as_object)
        .and_then(|data| data.values().next())
        .ok_or_else(|| UpstreamError::NotFound(country_code.to_string()))?;

    let entry: CountryEntry =
        serde_json::from_value(entry.clone()).map_err(|source| UpstreamError::Decode {
            service: TRAVEL_ADVISORY,
            source,
        })?;

    Ok(AdvisoryRecord {
        name: entry.name,
        score: entry.advisory.score,
        message: entry.advisory.message,
        sources_active: entry.advisory.sources_active,
        updated: entry.advisory.updated,
    })
}

#[cfg(test)]
mod tests {
    use roam_core::LocationKind;
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let payload = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Day 1\nMorning: Louvre" } }]
        });
        assert_eq!(message_content(&payload).unwrap(), "Day 1\nMorning: Louvre");
    }

    #[test]
    fn missing_content_is_malformed() {
        let error = message_content(&json!({ "choices": [] })).unwrap_err();
        assert!(matches!(error, UpstreamError::Malformed { .. }));
    }

    #[test]
    fn decodes_tool_call_arguments() {
        let arguments = json!({
            "locations": [{
                "name": "Louvre Museum",
                "coordinates": [2.3376, 48.8606],
                "type": "attraction",
                "description": "The world's most visited museum.",
                "recommendations": ["Mona Lisa", "Winged Victory", "Napoleon III apartments"]
            }]
        })
        .to_string();
        let payload = json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "type": "function",
                        "function": { "name": "extract_locations", "arguments": arguments }
                    }]
                }
            }]
        });

        let locations = tool_call_locations(&payload).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].kind, LocationKind::Attraction);
        assert_eq!(locations[0].longitude(), 2.3376);
    }

    #[test]
    fn bad_tool_arguments_fail_to_decode() {
        let payload = json!({
            "choices": [{ "message": { "tool_calls": [{ "function": { "arguments": "{not json" } }] } }]
        });
        assert!(matches!(
            tool_call_locations(&payload),
            Err(UpstreamError::Decode { .. })
        ));
    }

    #[test]
    fn reads_advisory_envelope() {
        let payload = json!({
            "api": { "status": { "code": 200 } },
            "data": {
                "JP": {
                    "iso_alpha2": "JP",
                    "name": "Japan",
                    "advisory": {
                        "score": 1.3,
                        "sources_active": 5,
                        "message": "Japan has a current risk level of 1.3 (out of 5).",
                        "updated": "2024-06-01 07:23:04",
                        "source": "https://www.travel-advisory.info/japan"
                    }
                }
            }
        });

        let record = advisory_record(&payload, "JP").unwrap();
        assert_eq!(record.name, "Japan");
        assert_eq!(record.sources_active, 5);
        assert_eq!(record.score, 1.3);
    }

    #[test]
    fn empty_advisory_data_is_not_found() {
        for payload in [json!({ "data": {} }), json!({ "data": [] }), json!({})] {
            assert!(matches!(
                advisory_record(&payload, "ZZ"),
                Err(UpstreamError::NotFound(code)) if code == "ZZ"
            ));
        }
    }
}
