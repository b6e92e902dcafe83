use serde::{Deserialize, Serialize};

use crate::safety::RiskLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub duration: i64,
    pub budget: String,
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripItinerary {
    pub itinerary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub itinerary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    City,
    Attraction,
    Landmark,
    Neighborhood,
}

impl LocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Attraction => "attraction",
            Self::Landmark => "landmark",
            Self::Neighborhood => "neighborhood",
        }
    }
}

/// A point of interest pulled out of an itinerary. Coordinates are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: [f64; 2],
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub description: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Location {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationList {
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRequest {
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    pub name: String,
    pub score: f64,
    pub message: String,
    pub sources_active: u32,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub name: String,
    pub score: f64,
    pub message: String,
    pub sources_active: u32,
    pub updated: String,
    #[serde(rename = "riskLevel")]
    pub risk_level: String,
    pub color: String,
}

impl From<AdvisoryRecord> for SafetyReport {
    fn from(record: AdvisoryRecord) -> Self {
        let risk = RiskLevel::from_score(record.score);
        Self {
            name: record.name,
            score: record.score,
            message: record.message,
            sources_active: record.sources_active,
            updated: record.updated,
            risk_level: risk.label().to_string(),
            color: risk.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_uses_type_on_the_wire() {
        let location = Location {
            name: "Tokyo Tower".to_string(),
            coordinates: [139.7454, 35.6586],
            kind: LocationKind::Landmark,
            description: "Lattice tower with city views".to_string(),
            recommendations: vec!["Main deck at dusk".to_string()],
        };

        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["type"], "landmark");
        assert_eq!(location.latitude(), 35.6586);
    }

    #[test]
    fn safety_report_derives_risk_from_score() {
        let report = SafetyReport::from(AdvisoryRecord {
            name: "France".to_string(),
            score: 2.3,
            message: "Exercise normal precautions".to_string(),
            sources_active: 6,
            updated: "2024-03-01 07:23:04".to_string(),
        });

        assert_eq!(report.risk_level, "Safe");
        assert_eq!(report.color, "blue");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["riskLevel"], "Safe");
        assert_eq!(value["sources_active"], 6);
    }
}
