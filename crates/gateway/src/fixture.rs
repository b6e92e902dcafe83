use roam_core::{AdvisoryRecord, Location, LocationKind, TripRequest};

use crate::error::UpstreamError;
use crate::{AdvisorySource, LocationExtractor, TripGenerator};

struct KnownPlace {
    name: &'static str,
    coordinates: [f64; 2],
    kind: LocationKind,
    description: &'static str,
    recommendations: [&'static str; 3],
}

const GAZETTEER: &[KnownPlace] = &[
    KnownPlace {
        name: "Paris",
        coordinates: [2.3522, 48.8566],
        kind: LocationKind::City,
        description: "France's capital, known for its boulevards, cafés and museums.",
        recommendations: ["Walk the Seine quays", "Picnic on the Champ de Mars", "Browse Le Marais"],
    },
    KnownPlace {
        name: "Eiffel Tower",
        coordinates: [2.2945, 48.8584],
        kind: LocationKind::Landmark,
        description: "Wrought-iron lattice tower with views across the city.",
        recommendations: ["Go up at sunset", "Book summit tickets early", "See the hourly sparkle"],
    },
    KnownPlace {
        name: "Louvre",
        coordinates: [2.3376, 48.8606],
        kind: LocationKind::Attraction,
        description: "The world's largest art museum, home of the Mona Lisa.",
        recommendations: ["Enter via the Carrousel", "See the Winged Victory", "Visit on a late-opening night"],
    },
    KnownPlace {
        name: "Montmartre",
        coordinates: [2.3431, 48.8867],
        kind: LocationKind::Neighborhood,
        description: "Hilltop artists' quarter crowned by the Sacré-Cœur.",
        recommendations: ["Climb to Sacré-Cœur", "Watch painters at Place du Tertre", "Find the Wall of Love"],
    },
    KnownPlace {
        name: "Tokyo",
        coordinates: [139.6503, 35.6762],
        kind: LocationKind::City,
        description: "Japan's sprawling capital mixing neon districts and quiet shrines.",
        recommendations: ["Eat at a depachika food hall", "Ride the Yamanote line", "Visit Meiji Shrine"],
    },
    KnownPlace {
        name: "Shibuya",
        coordinates: [139.7016, 35.6580],
        kind: LocationKind::Neighborhood,
        description: "Shopping and nightlife hub around the famous scramble crossing.",
        recommendations: ["Cross the scramble", "See Hachiko", "Go up Shibuya Sky"],
    },
    KnownPlace {
        name: "Rome",
        coordinates: [12.4964, 41.9028],
        kind: LocationKind::City,
        description: "The Eternal City, layered with ancient ruins and piazzas.",
        recommendations: ["Toss a coin in Trevi", "Eat supplì in Trastevere", "Walk the Appian Way"],
    },
    KnownPlace {
        name: "Colosseum",
        coordinates: [12.4922, 41.8902],
        kind: LocationKind::Landmark,
        description: "Flavian amphitheatre, the largest ever built.",
        recommendations: ["Book the underground tour", "Combine with the Forum", "Visit at opening"],
    },
    KnownPlace {
        name: "Lisbon",
        coordinates: [-9.1393, 38.7223],
        kind: LocationKind::City,
        description: "Hilly Atlantic capital of trams, tiles and miradouros.",
        recommendations: ["Ride tram 28", "Hear fado in Alfama", "Eat pastéis in Belém"],
    },
];

const ADVISORIES: &[(&str, &str, f64, u32)] = &[
    ("FR", "France", 2.3, 6),
    ("JP", "Japan", 1.3, 5),
    ("IT", "Italy", 2.6, 6),
    ("PT", "Portugal", 1.6, 4),
    ("US", "United States", 3.1, 6),
    ("CO", "Colombia", 3.6, 6),
    ("EG", "Egypt", 3.9, 7),
    ("UA", "Ukraine", 5.0, 8),
];

const FIXTURE_UPDATED: &str = "2024-06-01 07:23:04";

/// Deterministic stand-in for both upstream services.
#[derive(Debug, Clone, Default)]
pub struct FixtureGateway;

impl FixtureGateway {
    pub fn new() -> Self {
        Self
    }
}

impl TripGenerator for FixtureGateway {
    async fn generate_itinerary(&self, request: &TripRequest) -> Result<String, UpstreamError> {
        let destination = request.destination.as_str();
        let mut lines = vec![format!(
            "Here is your {}-day plan for {destination}.",
            request.duration
        )];

        for day in 1..=request.duration {
            lines.push(String::new());
            lines.push(format!("**Day {day}: Exploring {destination}**"));
            lines.push(format!("Morning: Walk the historic centre of {destination}"));
            lines.push("Lunch: Local market stalls".to_string());
            lines.push("- Try the street food near the main square".to_string());
            lines.push("- Photo stop at the best city view".to_string());
            lines.push("Evening: Sunset stroll and a **relaxed dinner**".to_string());
        }

        lines.push(String::new());
        lines.push(format!("Budget: {}", request.budget));
        if !request.interests.is_empty() {
            lines.push(format!("Notes: Tailored for {}", request.interests));
        }
        lines.push("Tips: Book popular sights a few days ahead".to_string());
        lines.push(format!("Accommodation: Central guesthouse in {destination}"));

        Ok(lines.join("\n"))
    }
}

impl LocationExtractor for FixtureGateway {
    async fn extract_locations(&self, itinerary: &str) -> Result<Vec<Location>, UpstreamError> {
        let lower = itinerary.to_lowercase();

        Ok(GAZETTEER
            .iter()
            .filter(|place| lower.contains(&place.name.to_lowercase()))
            .map(|place| Location {
                name: place.name.to_string(),
                coordinates: place.coordinates,
                kind: place.kind,
                description: place.description.to_string(),
                recommendations: place
                    .recommendations
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect())
    }
}

impl AdvisorySource for FixtureGateway {
    async fn country_advisory(&self, country_code: &str) -> Result<AdvisoryRecord, UpstreamError> {
        let (_, name, score, sources_active) = ADVISORIES
            .iter()
            .find(|(code, ..)| code.eq_ignore_ascii_case(country_code))
            .ok_or_else(|| UpstreamError::NotFound(country_code.to_string()))?;

        Ok(AdvisoryRecord {
            name: name.to_string(),
            score: *score,
            message: format!("{name} has a current risk level of {score} (out of 5)."),
            sources_active: *sources_active,
            updated: FIXTURE_UPDATED.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use roam_core::itinerary::{classify, SegmentKind};

    use super::*;

    fn request(days: i64) -> TripRequest {
        TripRequest {
            destination: "Paris".to_string(),
            duration: days,
            budget: "€900".to_string(),
            interests: "art, food".to_string(),
        }
    }

    #[tokio::test]
    async fn itinerary_has_one_header_per_day() {
        let itinerary = FixtureGateway::new()
            .generate_itinerary(&request(3))
            .await
            .unwrap();

        let headers = classify(&itinerary)
            .iter()
            .filter(|segment| segment.kind() == SegmentKind::DayHeader)
            .count();
        assert_eq!(headers, 3);
        assert!(itinerary.contains("Budget: €900"));
    }

    #[tokio::test]
    async fn locations_come_from_known_names() {
        let locations = FixtureGateway::new()
            .extract_locations("Day 1\nMorning: louvre\nEvening: Eiffel Tower lights")
            .await
            .unwrap();
        let names = locations
            .iter()
            .map(|location| location.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Eiffel Tower", "Louvre"]);
    }

    #[tokio::test]
    async fn unknown_country_is_not_found() {
        let gateway = FixtureGateway::new();
        assert_eq!(gateway.country_advisory("jp").await.unwrap().name, "Japan");
        assert!(matches!(
            gateway.country_advisory("ZZ").await,
            Err(UpstreamError::NotFound(_))
        ));
    }
}
