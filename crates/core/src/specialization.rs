use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Medical practice area used to route a patient to a doctor listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Specialization {
    Neurology,
    Cardiology,
    Dermatology,
    Orthopedics,
    Gastroenterology,
    Pulmonology,
    Endocrinology,
    Ophthalmology,
    Ent,
    Psychiatry,
    #[default]
    General,
}

/// Keyword table, in match order. The first entry with a keyword found in the
/// symptoms wins, so `General` stays last.
const KEYWORDS: &[(Specialization, &[&str])] = &[
    (
        Specialization::Neurology,
        &[
            "headache",
            "migraine",
            "seizure",
            "dizziness",
            "numbness",
            "memory loss",
            "tremor",
            "paralysis",
        ],
    ),
    (
        Specialization::Cardiology,
        &[
            "chest pain",
            "heart",
            "palpitation",
            "blood pressure",
            "hypertension",
            "irregular heartbeat",
        ],
    ),
    (
        Specialization::Dermatology,
        &["skin", "rash", "acne", "itch", "eczema", "psoriasis", "hair loss"],
    ),
    (
        Specialization::Orthopedics,
        &[
            "bone",
            "joint",
            "fracture",
            "back pain",
            "knee",
            "shoulder",
            "sprain",
            "arthritis",
        ],
    ),
    (
        Specialization::Gastroenterology,
        &[
            "stomach",
            "abdominal",
            "diarrhea",
            "constipation",
            "vomit",
            "nausea",
            "acidity",
            "indigestion",
        ],
    ),
    (
        Specialization::Pulmonology,
        &["cough", "breath", "asthma", "wheez", "lung", "chest congestion"],
    ),
    (
        Specialization::Endocrinology,
        &["thyroid", "diabetes", "blood sugar", "hormone", "excessive thirst"],
    ),
    (
        Specialization::Ophthalmology,
        &["eye", "vision", "blurred", "cataract", "glaucoma"],
    ),
    (
        Specialization::Ent,
        &[
            "earache",
            "ear pain",
            "ear infection",
            "hearing",
            "tinnitus",
            "nose",
            "throat",
            "sinus",
            "tonsil",
        ],
    ),
    (
        Specialization::Psychiatry,
        &["anxiety", "depress", "stress", "insomnia", "panic", "mood"],
    ),
    (
        Specialization::General,
        &["fever", "fatigue", "cold", "flu", "weakness", "body ache"],
    ),
];

impl Specialization {
    /// All labels in classifier table order
    pub const ALL: [Specialization; 11] = [
        Specialization::Neurology,
        Specialization::Cardiology,
        Specialization::Dermatology,
        Specialization::Orthopedics,
        Specialization::Gastroenterology,
        Specialization::Pulmonology,
        Specialization::Endocrinology,
        Specialization::Ophthalmology,
        Specialization::Ent,
        Specialization::Psychiatry,
        Specialization::General,
    ];

    /// Classify free-text symptoms by keyword match.
    ///
    /// Walks the keyword table in order and returns the first specialization
    /// with a keyword contained in the lower-cased text. Falls back to
    /// `General` when nothing matches, including for blank input.
    pub fn detect(symptoms: &str) -> Self {
        let symptoms = symptoms.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| symptoms.contains(k)))
            .map(|(spec, _)| *spec)
            .unwrap_or(Specialization::General)
    }

    /// Display name as stored in the doctors table
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Neurology => "Neurology",
            Specialization::Cardiology => "Cardiology",
            Specialization::Dermatology => "Dermatology",
            Specialization::Orthopedics => "Orthopedics",
            Specialization::Gastroenterology => "Gastroenterology",
            Specialization::Pulmonology => "Pulmonology",
            Specialization::Endocrinology => "Endocrinology",
            Specialization::Ophthalmology => "Ophthalmology",
            Specialization::Ent => "ENT",
            Specialization::Psychiatry => "Psychiatry",
            Specialization::General => "General",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known specialization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown specialization: {0}")]
pub struct UnknownSpecialization(pub String);

impl FromStr for Specialization {
    type Err = UnknownSpecialization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Specialization::ALL
            .into_iter()
            .find(|spec| spec.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSpecialization(s.to_string()))
    }
}

impl Serialize for Specialization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Specialization {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_match() {
        assert_eq!(
            Specialization::detect("I have a bad headache"),
            Specialization::Neurology
        );
        assert_eq!(
            Specialization::detect("Sharp CHEST PAIN since morning"),
            Specialization::Cardiology
        );
        assert_eq!(
            Specialization::detect("itchy red rash on my arm"),
            Specialization::Dermatology
        );
        assert_eq!(
            Specialization::detect("my thyroid levels are off"),
            Specialization::Endocrinology
        );
    }

    #[test]
    fn test_no_match_is_general() {
        assert_eq!(
            Specialization::detect("tired all the time"),
            Specialization::General
        );
        assert_eq!(Specialization::detect(""), Specialization::General);
        assert_eq!(Specialization::detect("   \t\n"), Specialization::General);
    }

    #[test]
    fn test_general_keywords() {
        assert_eq!(Specialization::detect("fatigue"), Specialization::General);
        assert_eq!(Specialization::detect("high fever"), Specialization::General);
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // headache (Neurology) and fever (General) both match
        assert_eq!(
            Specialization::detect("fever with a headache"),
            Specialization::Neurology
        );
        // chest pain (Cardiology) before cough (Pulmonology)
        assert_eq!(
            Specialization::detect("chest pain and a cough"),
            Specialization::Cardiology
        );
    }

    #[test]
    fn test_ear_keywords_need_whole_phrase() {
        for text in [
            "high fever for a year",
            "fever since early morning",
            "I feel weakness and fear",
            "cold sweat when I wear a mask",
        ] {
            assert_eq!(Specialization::detect(text), Specialization::General, "{text}");
        }
        assert_eq!(
            Specialization::detect("earache since yesterday"),
            Specialization::Ent
        );
        assert_eq!(
            Specialization::detect("trouble hearing on the left"),
            Specialization::Ent
        );
        assert_eq!(Specialization::detect("heart racing"), Specialization::Cardiology);
    }

    #[test]
    fn test_parse_labels() {
        for spec in Specialization::ALL {
            assert_eq!(spec.as_str().parse::<Specialization>(), Ok(spec));
        }
        assert_eq!("ent".parse::<Specialization>(), Ok(Specialization::Ent));
        assert_eq!(" cardiology ".parse::<Specialization>(), Ok(Specialization::Cardiology));
        assert!("Astrology".parse::<Specialization>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Specialization::Ent).unwrap();
        assert_eq!(json, "\"ENT\"");
        let parsed: Specialization = serde_json::from_str("\"orthopedics\"").unwrap();
        assert_eq!(parsed, Specialization::Orthopedics);
    }
}
