//! Built-in Dreyfus levels and the fallback slider set.

use crate::models::competency::{CompetencyLevel, Slider};

/// Type code used when nothing else is available.
pub const DEFAULT_COMPETENCY_TYPE: &str = "SE";

/// (level, name, description prefix, characteristics)
const DREYFUS_LEVELS: [(i32, &str, &str, [&str; 3]); 5] = [
    (
        1,
        "Novice",
        "Basic understanding of",
        ["Learning fundamentals", "Requires guidance", "Limited experience"],
    ),
    (
        2,
        "Advanced Beginner",
        "Can work with guidance on",
        [
            "Understands basics",
            "Can complete simple tasks",
            "Needs some support",
        ],
    ),
    (
        3,
        "Competent",
        "Can work independently with",
        [
            "Works independently",
            "Solves problems systematically",
            "Plans and executes tasks",
        ],
    ),
    (
        4,
        "Proficient",
        "Deep understanding and intuitive use of",
        [
            "Intuitive problem solving",
            "Sees bigger picture",
            "Mentors others",
        ],
    ),
    (
        5,
        "Expert",
        "Expert-level mastery of",
        ["Innovates and improves", "Sets standards", "Leads and teaches"],
    ),
];

/// Synthesizes the five standard Dreyfus levels for a competency label.
pub fn default_levels(label: &str) -> Vec<CompetencyLevel> {
    let subject = label.to_lowercase();
    DREYFUS_LEVELS
        .iter()
        .map(|(level, name, prefix, characteristics)| CompetencyLevel {
            level: *level,
            name: name.to_string(),
            description: format!("{prefix} {subject}"),
            characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}

/// Single-slider configuration served when a competency file is unusable.
pub fn default_sliders() -> Vec<Slider> {
    let label = "Frontend Frameworks";
    vec![Slider {
        id: 1,
        name: "frontend_frameworks".to_string(),
        label: label.to_string(),
        min_value: 1,
        max_value: 5,
        default_value: 3,
        step: 1,
        category: "Frontend Development".to_string(),
        description: "React, Vue, Angular, Svelte proficiency".to_string(),
        levels: default_levels(label),
    }]
}
