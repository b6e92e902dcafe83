use serde_json::{json, Value};

use crate::models::TripRequest;

pub const EXTRACT_LOCATIONS_TOOL: &str = "extract_locations";

pub const TRIP_SYSTEM_PROMPT: &str = "You are an expert travel planner. Generate a detailed, personalized travel itinerary based on the user's preferences.

Format the response as a well-structured itinerary with:
- Day-by-day breakdown
- Activities and attractions for each day
- Estimated costs
- Travel tips specific to the destination
- Restaurant and accommodation recommendations

Be specific, practical, and ensure the itinerary fits within the given budget and duration.";

pub const LOCATIONS_SYSTEM_PROMPT: &str = "You are a travel location extraction assistant. Extract all significant locations (cities, landmarks, attractions, neighborhoods) from the itinerary with their details, coordinates, descriptions, and top recommendations.";

pub fn trip_user_prompt(request: &TripRequest) -> String {
    format!(
        "Create a {days}-day travel itinerary for {destination}.\n\nBudget: {budget}\nInterests: {interests}\nDuration: {days} days\n\nPlease provide a comprehensive day-by-day plan that maximizes the experience while staying within budget.",
        days = request.duration,
        destination = request.destination,
        budget = request.budget,
        interests = request.interests,
    )
}

pub fn locations_user_prompt(itinerary: &str) -> String {
    format!("Extract all locations from this itinerary with detailed information:\n\n{itinerary}")
}

/// Function-calling schema the gateway is forced to answer with.
pub fn extract_locations_tool() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": EXTRACT_LOCATIONS_TOOL,
            "description": "Extract locations with their coordinates, descriptions, and recommendations from a travel itinerary",
            "parameters": {
                "type": "object",
                "properties": {
                    "locations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {
                                    "type": "string",
                                    "description": "The name of the location (e.g., 'Tokyo Tower', 'Paris, France')"
                                },
                                "coordinates": {
                                    "type": "array",
                                    "items": { "type": "number" },
                                    "minItems": 2,
                                    "maxItems": 2,
                                    "description": "Longitude and latitude [lng, lat] in decimal degrees"
                                },
                                "type": {
                                    "type": "string",
                                    "enum": ["city", "attraction", "landmark", "neighborhood"],
                                    "description": "Type of location"
                                },
                                "description": {
                                    "type": "string",
                                    "description": "A brief 1-2 sentence description of the location highlighting what makes it special"
                                },
                                "recommendations": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "Top 3-5 things to do, see, or experience at this location",
                                    "minItems": 3,
                                    "maxItems": 5
                                }
                            },
                            "required": ["name", "coordinates", "type", "description", "recommendations"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["locations"],
                "additionalProperties": false
            }
        }
    })
}
