use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::locale::Locale;
use crate::pipeline::ArtifactPaths;

pub const OUT_DIR_ENV: &str = "ORDERBOARD_OUT_DIR";
pub const LOCALE_ENV: &str = "ORDERBOARD_LOCALE";

pub const DEFAULT_DASHBOARD_FILE: &str = "order_dashboard.html";
pub const DEFAULT_REPORT_FILE: &str = "order_analysis.txt";
pub const DEFAULT_SUMMARY_FILE: &str = "order_summary.json";

/// Settings for one run. Layered as defaults, then TOML file, then environment;
/// the CLI applies its flags on top.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub out_dir: PathBuf,
    pub locale: Locale,
    pub input: Option<PathBuf>,
    pub dashboard_file: String,
    pub report_file: String,
    pub summary_json: bool,
    pub open: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            locale: Locale::default(),
            input: None,
            dashboard_file: DEFAULT_DASHBOARD_FILE.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            summary_json: false,
            open: true,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Defaults, or the given file when present, with environment overrides applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|key| env::var(key).ok())
    }

    /// Applies `ORDERBOARD_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(OUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.out_dir = PathBuf::from(dir);
        }
        if let Some(locale) = lookup(LOCALE_ENV).filter(|v| !v.trim().is_empty()) {
            self.locale = locale.parse()?;
        }
        Ok(self)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            out_dir: self.out_dir.clone(),
            dashboard_file: self.dashboard_file.clone(),
            report_file: self.report_file.clone(),
            summary_file: self
                .summary_json
                .then(|| DEFAULT_SUMMARY_FILE.to_string()),
        }
    }
}
