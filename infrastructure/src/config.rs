use crate::clusterer::CLUSTER_COUNT;
use crate::reducer::PROJECTION_DIMS;
use domain::language::FontSelection;
use dotenvy::dotenv;
use shared::error::SemanticMapError;
use shared::types::Result;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_SAMPLES: usize = 10;
pub const DEFAULT_FONT_JA: &str = "Meiryo";
pub const DEFAULT_FONT_EN: &str = "Arial";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Responses collected per language.
    pub samples: usize,
    pub font_ja: FontSelection,
    pub font_en: FontSelection,
    /// When set, figures are saved here instead of displayed.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let samples = match non_empty("SEMANTIC_MAP_SAMPLES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                SemanticMapError::config(format!(
                    "SEMANTIC_MAP_SAMPLES must be a positive integer, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_SAMPLES,
        };

        let font_ja = match non_empty("SEMANTIC_MAP_FONT_JA") {
            Some(path) => FontSelection::File(PathBuf::from(path)),
            None => FontSelection::Family(DEFAULT_FONT_JA.to_string()),
        };

        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY").unwrap_or_default(),
            base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty("SEMANTIC_MAP_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            samples,
            font_ja,
            font_en: FontSelection::Family(
                non_empty("SEMANTIC_MAP_FONT_EN").unwrap_or_else(|| DEFAULT_FONT_EN.to_string()),
            ),
            output_dir: non_empty("SEMANTIC_MAP_OUTPUT_DIR").map(PathBuf::from),
        })
    }

    /// Checks everything that can be checked before the first request.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SemanticMapError::config(
                "OPENAI_API_KEY is not set; export it or add it to .env",
            ));
        }
        validate_samples(self.samples)?;
        self.font_ja.family_name()?;
        self.font_en.family_name()?;
        Ok(())
    }
}

/// The sample count must feed both the projection and the clustering.
pub fn validate_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(SemanticMapError::config("sample count must be greater than zero"));
    }
    let required = CLUSTER_COUNT.max(PROJECTION_DIMS);
    if samples < required {
        return Err(SemanticMapError::config(format!(
            "sample count {} is too small: {} clusters and a {}-D projection need at least {}",
            samples, CLUSTER_COUNT, PROJECTION_DIMS, required
        )));
    }
    Ok(())
}
