// Prompt text for competency suggestions.

use crate::models::competency::{CompetencyLevel, Slider, MAX_DREYFUS_LEVEL};

/// System message sent with every suggestion request.
pub const COACH_SYSTEM: &str = "You are a helpful career development coach specializing in \
    software engineering and QA competencies. Provide concise, actionable suggestions to help \
    professionals improve their skills. Keep responses brief (2-3 sentences max) and practical.";

/// Shown to the user whenever the endpoint call fails for a competency.
pub const FALLBACK_SUGGESTION: &str = "Unable to generate suggestion at this time.";

/// Shown when the endpoint succeeded but returned no text.
pub const EMPTY_SUGGESTION: &str = "No suggestion available.";

pub const UNKNOWN_LEVEL_NAME: &str = "Unknown";

const EXPERT_NOTICE: &str = "The user is already at Expert level.";

const MAINTAIN_EXPERTISE_INSTRUCTION: &str = "Provide suggestions on how to maintain \
    expert-level skills and contribute to the community (mentoring, thought leadership, etc.).";

/// Builds the user message for one competency.
///
/// Sections with no source data are left out. At the top score the next-level
/// block is replaced by the expert notice.
pub fn build_prompt(
    slider: &Slider,
    current_score: i32,
    current_level: Option<&CompetencyLevel>,
    next_level: Option<&CompetencyLevel>,
    user_note: &str,
) -> String {
    let mut lines = vec![
        format!("Competency: {}", slider.label),
        format!("Description: {}", slider.description),
        format!(
            "Current Level: {}/{} ({})",
            current_score,
            MAX_DREYFUS_LEVEL,
            current_level.map_or(UNKNOWN_LEVEL_NAME, |l| l.name.as_str())
        ),
    ];

    if let Some(level) = current_level {
        lines.push(format!("Current Level Description: {}", level.description));
        if !level.characteristics.is_empty() {
            lines.push(format!(
                "Current Characteristics: {}",
                level.characteristics.join(", ")
            ));
        }
    }

    if let Some(next) = next_level {
        lines.push(format!("Next Level: {}", next.name));
        lines.push(format!("Next Level Description: {}", next.description));
        if !next.characteristics.is_empty() {
            lines.push(format!(
                "Target Characteristics: {}",
                next.characteristics.join(", ")
            ));
        }
    } else if current_score == MAX_DREYFUS_LEVEL {
        lines.push(EXPERT_NOTICE.to_string());
    }

    if !user_note.trim().is_empty() {
        lines.push(format!("User's Notes: {user_note}"));
    }

    lines.push(String::new());
    if current_score == MAX_DREYFUS_LEVEL {
        lines.push(MAINTAIN_EXPERTISE_INSTRUCTION.to_string());
    } else {
        lines.push(format!(
            "Provide specific, actionable suggestions to help improve from level {} to level {}.",
            current_score,
            current_score.saturating_add(1)
        ));
    }

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    prompt
}
