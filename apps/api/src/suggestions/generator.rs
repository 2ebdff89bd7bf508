//! Suggestion Generator: one chat-completion call per slider, sequential.
//!
//! Every slider yields exactly one `CompetencySuggestion`, in input order. A
//! failed call only affects its own slider: the error is logged and the
//! suggestion carries `FALLBACK_SUGGESTION` with `SuggestionStatus::Fallback`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::llm_client::{ChatCompletion, LlmError};
use crate::models::competency::{
    CompetencyLevel, CompetencySuggestion, Slider, SuggestionStatus, MAX_DREYFUS_LEVEL,
};
use crate::suggestions::prompts::{
    build_prompt, COACH_SYSTEM, EMPTY_SUGGESTION, FALLBACK_SUGGESTION, UNKNOWN_LEVEL_NAME,
};

/// Produces AI suggestions for a set of sliders.
///
/// Only constructed when the feature is enabled in configuration.
#[derive(Clone)]
pub struct SuggestionGenerator {
    client: Arc<dyn ChatCompletion>,
}

impl SuggestionGenerator {
    pub fn new(client: Arc<dyn ChatCompletion>) -> Self {
        Self { client }
    }

    pub async fn generate_suggestions(
        &self,
        sliders: &[Slider],
        values_by_id: &HashMap<i32, i32>,
        notes_by_id: &HashMap<i32, String>,
    ) -> Vec<CompetencySuggestion> {
        let mut suggestions = Vec::with_capacity(sliders.len());

        for slider in sliders {
            let current_score = values_by_id
                .get(&slider.id)
                .copied()
                .unwrap_or(slider.default_value);
            let current_level = slider.level(current_score);
            let user_note = notes_by_id.get(&slider.id).map(String::as_str).unwrap_or("");

            let (ai_suggestion, status) = match self
                .suggest_for(slider, current_score, current_level, user_note)
                .await
            {
                Ok(text) => (text, SuggestionStatus::Generated),
                Err(e) => {
                    error!("Error generating suggestion for {}: {e}", slider.label);
                    (FALLBACK_SUGGESTION.to_string(), SuggestionStatus::Fallback)
                }
            };

            suggestions.push(CompetencySuggestion {
                slider_id: slider.id,
                competency_name: slider.label.clone(),
                category: slider.category.clone(),
                current_score,
                level_name: current_level
                    .map_or(UNKNOWN_LEVEL_NAME, |l| l.name.as_str())
                    .to_string(),
                user_notes: user_note.to_string(),
                ai_suggestion,
                status,
            });
        }

        let fallbacks = suggestions
            .iter()
            .filter(|s| s.status == SuggestionStatus::Fallback)
            .count();
        info!(
            "Generated {} suggestions ({} fallbacks)",
            suggestions.len(),
            fallbacks
        );

        suggestions
    }

    async fn suggest_for(
        &self,
        slider: &Slider,
        current_score: i32,
        current_level: Option<&CompetencyLevel>,
        user_note: &str,
    ) -> Result<String, LlmError> {
        // Sliders that keep a 1-10 scale with their own levels still get a next level above 5.
        let next_level = if current_score == MAX_DREYFUS_LEVEL {
            None
        } else {
            current_score
                .checked_add(1)
                .and_then(|next| slider.level(next))
        };

        let prompt = build_prompt(slider, current_score, current_level, next_level, user_note);
        let content = self.client.complete(COACH_SYSTEM, &prompt).await?;

        Ok(content
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| EMPTY_SUGGESTION.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::sliders::defaults::default_levels;

    /// Scripted backend: fails for prompts mentioning `fail_on`, echoes a canned
    /// reply otherwise, and records every prompt it sees.
    struct ScriptedCompletion {
        reply: Option<String>,
        fail_on: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedCompletion {
        fn new(reply: Option<&str>, fail_on: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                fail_on: fail_on.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for ScriptedCompletion {
        async fn complete(&self, system: &str, prompt: &str) -> Result<Option<String>, LlmError> {
            assert_eq!(system, COACH_SYSTEM);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(marker) = &self.fail_on {
                if prompt.contains(marker.as_str()) {
                    return Err(LlmError::Api {
                        status: 500,
                        message: "boom".to_string(),
                    });
                }
            }
            Ok(self.reply.clone())
        }
    }

    fn slider(id: i32, label: &str, default_value: i32) -> Slider {
        Slider {
            id,
            name: label.to_lowercase().replace(' ', "_"),
            label: label.to_string(),
            min_value: 1,
            max_value: 5,
            default_value,
            step: 1,
            category: "Engineering".to_string(),
            description: format!("{label} skills"),
            levels: default_levels(label),
        }
    }

    fn generator(backend: Arc<ScriptedCompletion>) -> SuggestionGenerator {
        SuggestionGenerator::new(backend)
    }

    #[tokio::test]
    async fn test_one_suggestion_per_slider_in_order_with_defaults() {
        let backend = Arc::new(ScriptedCompletion::new(Some("  Read the docs.\n"), None));
        let sliders = vec![slider(3, "Rust", 2), slider(1, "Testing", 4), slider(2, "SQL", 1)];

        let suggestions = generator(backend.clone())
            .generate_suggestions(&sliders, &HashMap::new(), &HashMap::new())
            .await;

        let ids: Vec<i32> = suggestions.iter().map(|s| s.slider_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        let scores: Vec<i32> = suggestions.iter().map(|s| s.current_score).collect();
        assert_eq!(scores, vec![2, 4, 1]);
        assert_eq!(suggestions[1].level_name, "Proficient");
        assert!(suggestions
            .iter()
            .all(|s| s.ai_suggestion == "Read the docs." && s.status == SuggestionStatus::Generated));
        assert_eq!(backend.prompts.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_values_and_notes_override_defaults() {
        let backend = Arc::new(ScriptedCompletion::new(Some("ok"), None));
        let sliders = vec![slider(1, "Rust", 2)];
        let values = HashMap::from([(1, 5)]);
        let notes = HashMap::from([(1, "Maintainer of two crates".to_string())]);

        let suggestions = generator(backend.clone())
            .generate_suggestions(&sliders, &values, &notes)
            .await;

        assert_eq!(suggestions[0].current_score, 5);
        assert_eq!(suggestions[0].level_name, "Expert");
        assert_eq!(suggestions[0].user_notes, "Maintainer of two crates");

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains("already at Expert level"));
        assert!(prompts[0].contains("User's Notes: Maintainer of two crates"));
        assert!(!prompts[0].contains("Next Level"));
    }

    #[tokio::test]
    async fn test_failure_only_affects_its_slider() {
        let backend = Arc::new(ScriptedCompletion::new(
            Some("Practice daily."),
            Some("Competency: Testing"),
        ));
        let sliders = vec![slider(1, "Rust", 2), slider(2, "Testing", 3), slider(3, "SQL", 1)];

        let suggestions = generator(backend)
            .generate_suggestions(&sliders, &HashMap::new(), &HashMap::new())
            .await;

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].ai_suggestion, "Practice daily.");
        assert_eq!(suggestions[1].ai_suggestion, FALLBACK_SUGGESTION);
        assert_eq!(suggestions[1].status, SuggestionStatus::Fallback);
        assert_eq!(suggestions[2].ai_suggestion, "Practice daily.");
        assert_eq!(suggestions[2].status, SuggestionStatus::Generated);
    }

    #[tokio::test]
    async fn test_missing_content_uses_empty_suggestion() {
        let backend = Arc::new(ScriptedCompletion::new(None, None));
        let sliders = vec![slider(1, "Rust", 2)];

        let suggestions = generator(backend)
            .generate_suggestions(&sliders, &HashMap::new(), &HashMap::new())
            .await;

        assert_eq!(suggestions[0].ai_suggestion, EMPTY_SUGGESTION);
        assert_eq!(suggestions[0].status, SuggestionStatus::Generated);
    }

    #[tokio::test]
    async fn test_unmatched_score_reports_unknown_level() {
        let backend = Arc::new(ScriptedCompletion::new(Some("ok"), None));
        let sliders = vec![slider(1, "Rust", 2)];
        let values = HashMap::from([(1, 9)]);

        let suggestions = generator(backend.clone())
            .generate_suggestions(&sliders, &values, &HashMap::new())
            .await;

        assert_eq!(suggestions[0].level_name, "Unknown");
        assert!(backend.prompts.lock().unwrap()[0].contains("Current Level: 9/5 (Unknown)"));
    }

    #[tokio::test]
    async fn test_ten_point_slider_with_custom_levels_gets_next_level() {
        let backend = Arc::new(ScriptedCompletion::new(Some("ok"), None));
        let mut legacy = slider(1, "Automation", 7);
        legacy.max_value = 10;
        legacy.levels = (1..=10)
            .map(|level| CompetencyLevel {
                level,
                name: format!("L{level}"),
                description: format!("Stage {level}"),
                characteristics: vec![format!("Trait {level}")],
            })
            .collect();

        let suggestions = generator(backend.clone())
            .generate_suggestions(&[legacy], &HashMap::new(), &HashMap::new())
            .await;

        assert_eq!(suggestions[0].level_name, "L7");
        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains("Next Level: L8\n"));
        assert!(prompts[0].contains("Next Level Description: Stage 8\n"));
        assert!(prompts[0].contains("Target Characteristics: Trait 8\n"));
        assert!(!prompts[0].contains("already at Expert level"));
        assert!(prompts[0].ends_with("improve from level 7 to level 8.\n"));
    }

    #[tokio::test]
    async fn test_max_int_score_still_yields_one_suggestion() {
        let backend = Arc::new(ScriptedCompletion::new(Some("ok"), None));
        let sliders = vec![slider(1, "Rust", 2)];
        let values = HashMap::from([(1, i32::MAX)]);

        let suggestions = generator(backend.clone())
            .generate_suggestions(&sliders, &values, &HashMap::new())
            .await;

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].current_score, i32::MAX);
        assert_eq!(suggestions[0].level_name, "Unknown");
        assert_eq!(suggestions[0].status, SuggestionStatus::Generated);
        let prompts = backend.prompts.lock().unwrap();
        assert!(!prompts[0].contains("Next Level"));
        assert!(prompts[0].ends_with(&format!(
            "improve from level {} to level {}.\n",
            i32::MAX,
            i32::MAX
        )));
    }

    #[tokio::test]
    async fn test_empty_slider_list_makes_no_calls() {
        let backend = Arc::new(ScriptedCompletion::new(Some("ok"), None));

        let suggestions = generator(backend.clone())
            .generate_suggestions(&[], &HashMap::new(), &HashMap::new())
            .await;

        assert!(suggestions.is_empty());
        assert!(backend.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_500_for_one_slider_against_azure_client() {
        use crate::config::AzureOpenAiSettings;
        use crate::llm_client::AzureOpenAiClient;
        use httpmock::prelude::*;
        use std::time::Duration;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("Competency: Testing");
                then.status(500).body("internal error");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("Competency: Rust");
                then.status(200).json_body(serde_json::json!({
                    "choices": [{"message": {"content": " Contribute to a crate. "}}]
                }));
            })
            .await;

        let client = AzureOpenAiClient::new(&AzureOpenAiSettings {
            enabled: true,
            endpoint: server.base_url(),
            api_key: "k".to_string(),
            deployment_name: "coach".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let generator = SuggestionGenerator::new(Arc::new(client));
        let sliders = vec![slider(1, "Rust", 2), slider(2, "Testing", 3)];

        let suggestions = generator
            .generate_suggestions(&sliders, &HashMap::new(), &HashMap::new())
            .await;

        assert_eq!(suggestions[0].ai_suggestion, "Contribute to a crate.");
        assert_eq!(suggestions[1].ai_suggestion, FALLBACK_SUGGESTION);
    }
}
