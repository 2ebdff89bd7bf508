use crate::config::Config;
use crate::sliders::SliderLoader;
use crate::storage::AssessmentStore;
use crate::suggestions::SuggestionGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub loader: SliderLoader,
    /// `None` when AI suggestions are disabled; handlers must not call the model then.
    pub suggestions: Option<SuggestionGenerator>,
    pub store: AssessmentStore,
}
