use serde::{Deserialize, Serialize};

/// Highest level on the Dreyfus scale. Sliders are normalized to this maximum.
pub const MAX_DREYFUS_LEVEL: i32 = 5;

/// One rung of the Dreyfus ladder for a single competency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyLevel {
    pub level: i32,
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
}

/// A rateable competency as presented to the user.
///
/// `levels` should hold one entry per level `1..=max_value`, but nothing
/// enforces that; use [`Slider::level`] and handle `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub id: i32,
    pub name: String,
    pub label: String,
    pub min_value: i32,
    pub max_value: i32,
    pub default_value: i32,
    pub step: i32,
    pub category: String,
    pub description: String,
    pub levels: Vec<CompetencyLevel>,
}

impl Slider {
    /// Returns the level whose number equals `level` exactly.
    pub fn level(&self, level: i32) -> Option<&CompetencyLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Root of a `<TYPE>Competency.json` file. Only lives for the duration of a load.
#[derive(Debug, Clone, Default)]
pub struct SliderConfiguration {
    pub sliders: Vec<Slider>,
}

/// Whether an AI suggestion came back from the model or was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Generated,
    Fallback,
}

/// Per-slider suggestion result. Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencySuggestion {
    pub slider_id: i32,
    pub competency_name: String,
    pub category: String,
    pub current_score: i32,
    pub level_name: String,
    pub user_notes: String,
    pub ai_suggestion: String,
    pub status: SuggestionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: i32, name: &str) -> CompetencyLevel {
        CompetencyLevel {
            level: n,
            name: name.to_string(),
            description: String::new(),
            characteristics: vec![],
        }
    }

    #[test]
    fn test_level_lookup_is_exact_match() {
        let slider = Slider {
            id: 7,
            name: "testing".to_string(),
            label: "Testing".to_string(),
            min_value: 1,
            max_value: 5,
            default_value: 3,
            step: 1,
            category: "Quality".to_string(),
            description: String::new(),
            levels: vec![level(1, "Novice"), level(3, "Competent")],
        };

        assert_eq!(slider.level(3).map(|l| l.name.as_str()), Some("Competent"));
        assert!(slider.level(2).is_none());
        assert!(slider.level(6).is_none());
    }

    #[test]
    fn test_slider_serializes_camel_case() {
        let slider = Slider {
            id: 1,
            name: "x".to_string(),
            label: "X".to_string(),
            min_value: 1,
            max_value: 5,
            default_value: 2,
            step: 1,
            category: String::new(),
            description: String::new(),
            levels: vec![],
        };
        let json = serde_json::to_value(&slider).unwrap();
        assert_eq!(json["minValue"], 1);
        assert_eq!(json["maxValue"], 5);
        assert_eq!(json["defaultValue"], 2);
    }

    #[test]
    fn test_suggestion_status_serde() {
        assert_eq!(
            serde_json::to_string(&SuggestionStatus::Fallback).unwrap(),
            r#""fallback""#
        );
        let status: SuggestionStatus = serde_json::from_str(r#""generated""#).unwrap();
        assert_eq!(status, SuggestionStatus::Generated);
    }
}
