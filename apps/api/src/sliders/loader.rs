//! Slider Configuration Loader: reads `<TYPE>Competency.json`, falls back to
//! built-in defaults, and normalizes every slider onto the 1–5 Dreyfus scale.
//!
//! Loading never fails from the caller's point of view: a missing, unreadable
//! or malformed file is logged and replaced with `default_sliders()`.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::competency::{
    CompetencyLevel, Slider, SliderConfiguration, MAX_DREYFUS_LEVEL,
};
use crate::sliders::defaults::{default_levels, default_sliders, DEFAULT_COMPETENCY_TYPE};

/// File stem suffix shared by every competency configuration file.
pub const COMPETENCY_FILE_SUFFIX: &str = "Competency";
const COMPETENCY_FILE_EXTENSION: &str = "json";

/// Upper bound of the pre-Dreyfus rating scale.
const LEGACY_MAX_VALUE: i32 = 10;
/// Rescaled defaults never land above "Competent".
const RESCALED_DEFAULT_CAP: i32 = 3;

#[derive(Debug, Error)]
enum LoadError {
    #[error("competency file not found at {0}")]
    NotFound(PathBuf),

    #[error("invalid competency type code '{0}'")]
    InvalidType(String),

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// File schema (keys folded to lowercase before deserialization)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    /// Missing key → empty list; explicit `null` → `None` (served as defaults).
    #[serde(default = "empty_sliders")]
    sliders: Option<Vec<RawSlider>>,
}

fn empty_sliders() -> Option<Vec<RawSlider>> {
    Some(Vec::new())
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSlider {
    id: i32,
    name: String,
    label: String,
    #[serde(rename = "minvalue")]
    min_value: i32,
    #[serde(rename = "maxvalue")]
    max_value: i32,
    #[serde(rename = "defaultvalue")]
    default_value: i32,
    step: i32,
    category: String,
    description: String,
    levels: Vec<RawLevel>,
}

impl Default for RawSlider {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            label: String::new(),
            min_value: 0,
            max_value: 0,
            default_value: 0,
            step: 1,
            category: String::new(),
            description: String::new(),
            levels: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLevel {
    level: i32,
    name: String,
    description: String,
    characteristics: Vec<String>,
}

impl From<RawLevel> for CompetencyLevel {
    fn from(raw: RawLevel) -> Self {
        Self {
            level: raw.level,
            name: raw.name,
            description: raw.description,
            characteristics: raw.characteristics,
        }
    }
}

impl From<RawSlider> for Slider {
    fn from(raw: RawSlider) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            label: raw.label,
            min_value: raw.min_value,
            max_value: raw.max_value,
            default_value: raw.default_value,
            step: raw.step,
            category: raw.category,
            description: raw.description,
            levels: raw.levels.into_iter().map(CompetencyLevel::from).collect(),
        }
    }
}

/// Parses a competency file body with case-insensitive field names.
///
/// Returns `Ok(None)` when the document (or its `sliders` field) is `null`.
pub fn parse_configuration(content: &str) -> Result<Option<SliderConfiguration>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let raw: Option<RawConfiguration> = serde_json::from_value(fold_keys(value))?;

    Ok(raw.and_then(|r| r.sliders).map(|sliders| SliderConfiguration {
        sliders: sliders.into_iter().map(Slider::from).collect(),
    }))
}

/// Lowercases every object key, recursively.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| (key.to_lowercase(), fold_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Fills in the standard Dreyfus levels when a slider ships none.
/// Returns `true` if levels were synthesized.
pub fn synthesize_missing_levels(slider: &mut Slider) -> bool {
    if !slider.levels.is_empty() {
        return false;
    }
    slider.levels = default_levels(&slider.label);
    true
}

/// Converts a 1–10 slider to 1–5. Returns `true` if the slider was rescaled.
pub fn rescale_legacy_scale(slider: &mut Slider) -> bool {
    if slider.max_value != LEGACY_MAX_VALUE {
        return false;
    }
    slider.max_value = MAX_DREYFUS_LEVEL;
    slider.default_value = (slider.default_value.div_euclid(2) + 1).min(RESCALED_DEFAULT_CAP);
    true
}

/// Applies level synthesis, then rescaling, to every slider.
///
/// Rescaling only runs on sliders whose levels were just synthesized: a 1–10
/// slider that ships its own levels keeps its range.
pub fn normalize_sliders(sliders: &mut [Slider]) {
    for slider in sliders.iter_mut() {
        if synthesize_missing_levels(slider) && rescale_legacy_scale(slider) {
            debug!(
                "Rescaled slider '{}' from 1-{} to 1-{}",
                slider.label, LEGACY_MAX_VALUE, MAX_DREYFUS_LEVEL
            );
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loader
// ────────────────────────────────────────────────────────────────────────────

/// Maps a type code to its configuration file name, e.g. `SE` → `SECompetency.json`.
pub fn competency_file_name(competency_type: &str) -> String {
    format!("{competency_type}{COMPETENCY_FILE_SUFFIX}.{COMPETENCY_FILE_EXTENSION}")
}

/// Recovers the type code from a configuration file name.
fn competency_type_from_file_name(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_suffix(COMPETENCY_FILE_EXTENSION)?
        .strip_suffix('.')?;
    let code = stem.strip_suffix(COMPETENCY_FILE_SUFFIX)?;
    (!code.is_empty()).then_some(code)
}

/// Type codes end up in file paths; only plain identifiers are accepted.
fn is_valid_type_code(competency_type: &str) -> bool {
    !competency_type.is_empty()
        && competency_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Display name for a known type code; unknown codes pass through unchanged.
pub fn competency_display_name(competency_type: &str) -> &str {
    match competency_type {
        "SE" => "Software Engineer",
        "QA" => "QA Engineer",
        other => other,
    }
}

/// Reads competency configurations from a data directory.
#[derive(Debug, Clone)]
pub struct SliderLoader {
    data_dir: PathBuf,
}

impl SliderLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads and normalizes the sliders for `competency_type`.
    pub async fn load_sliders(&self, competency_type: &str) -> Vec<Slider> {
        let mut sliders = match self.read_configuration(competency_type).await {
            Ok(Some(configuration)) => {
                info!(
                    "Loaded {} sliders for competency type {}",
                    configuration.sliders.len(),
                    competency_type
                );
                configuration.sliders
            }
            Ok(None) => {
                warn!("Competency configuration for {competency_type} is empty, using defaults");
                default_sliders()
            }
            Err(e @ (LoadError::NotFound(_) | LoadError::InvalidType(_))) => {
                warn!("{e}, using defaults");
                default_sliders()
            }
            Err(e) => {
                error!("Error loading slider configuration for {competency_type}: {e}");
                default_sliders()
            }
        };

        normalize_sliders(&mut sliders);
        sliders
    }

    async fn read_configuration(
        &self,
        competency_type: &str,
    ) -> Result<Option<SliderConfiguration>, LoadError> {
        if !is_valid_type_code(competency_type) {
            return Err(LoadError::InvalidType(competency_type.to_string()));
        }

        let path = self.data_dir.join(competency_file_name(competency_type));
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path));
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };

        parse_configuration(&content).map_err(|source| LoadError::Parse { path, source })
    }

    /// Lists the type codes that have a configuration file, sorted.
    /// Falls back to `["SE"]` when none are present.
    pub async fn list_available_competency_types(&self) -> Vec<String> {
        let mut types = Vec::new();

        match tokio::fs::read_dir(&self.data_dir).await {
            Ok(mut entries) => loop {
                match entries.next_entry().await {
                    Ok(Some(entry)) => {
                        let file_name = entry.file_name();
                        if let Some(code) =
                            competency_type_from_file_name(&file_name.to_string_lossy())
                        {
                            types.push(code.to_string());
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Error scanning {}: {e}", self.data_dir.display());
                        break;
                    }
                }
            },
            Err(e) => {
                debug!(
                    "Competency data directory {} unavailable: {e}",
                    self.data_dir.display()
                );
            }
        }

        if types.is_empty() {
            return vec![DEFAULT_COMPETENCY_TYPE.to_string()];
        }

        types.sort();
        types
    }
}
