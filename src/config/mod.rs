#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::eutils_client::{DEFAULT_DATABASE, DEFAULT_ESEARCH_ENDPOINT};
use crate::core::rate_limiter::DEFAULT_MIN_INTERVAL;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_ORGANISMS: [&str; 8] = [
    "Homo sapiens",
    "Mus musculus",
    "Danio rerio",
    "Cricetulus griseus",
    "Bos taurus",
    "Gallus gallus",
    "Sus scrofa",
    "Rattus norvegicus",
];

pub const DEFAULT_GENE_SYMBOLS: [&str; 4] = ["BRCA1", "BRCA2", "BAD", "TP63"];

pub const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct EutilsSettings {
    pub endpoint: String,
    pub database: String,
    pub api_key: Option<String>,
    pub min_interval_secs: f64,
}

impl EutilsSettings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs_f64(self.min_interval_secs.max(0.0))
    }
}

impl Default for EutilsSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ESEARCH_ENDPOINT.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            api_key: None,
            min_interval_secs: DEFAULT_MIN_INTERVAL.as_secs_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireSettings {
    pub organisms: Vec<String>,
    pub gene_symbols: Vec<String>,
    pub default_organisms: Vec<String>,
}

impl Default for QuestionnaireSettings {
    fn default() -> Self {
        Self {
            organisms: DEFAULT_ORGANISMS.iter().map(|s| s.to_string()).collect(),
            gene_symbols: DEFAULT_GENE_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            default_organisms: vec!["Homo sapiens".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSettings {
    /// `None` → derived from the predefined organism names
    pub column_width: Option<usize>,
}

impl ReportSettings {
    /// 欄寬：明確設定優先，否則取預設物種名稱最長者（上限 50）
    pub fn column_width_for(&self, predefined_organisms: &[String]) -> usize {
        self.column_width.unwrap_or_else(|| {
            predefined_organisms
                .iter()
                .map(|organism| organism.chars().count())
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
    }
}

/// Effective settings for one run: defaults, then TOML file, then CLI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub eutils: EutilsSettings,
    pub questionnaire: QuestionnaireSettings,
    pub report: ReportSettings,
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let mut settings = Settings::default();
        settings.merge_toml(config);
        settings
    }

    pub fn merge_toml(&mut self, config: TomlConfig) {
        if let Some(eutils) = config.eutils {
            if let Some(endpoint) = eutils.endpoint {
                self.eutils.endpoint = endpoint;
            }
            if let Some(database) = eutils.database {
                self.eutils.database = database;
            }
            match eutils.api_key {
                Some(key) if toml_config::has_unresolved_env_var(&key) => {
                    tracing::warn!(
                        "⚠️ eutils.api_key references an unset environment variable ({}), sending requests without an API key",
                        key
                    );
                }
                Some(key) if !key.trim().is_empty() => self.eutils.api_key = Some(key),
                _ => {}
            }
            if let Some(interval) = eutils.min_interval_secs {
                self.eutils.min_interval_secs = interval;
            }
        }

        if let Some(questionnaire) = config.questionnaire {
            if let Some(organisms) = questionnaire.organisms {
                self.questionnaire.organisms = organisms;
                // 清單被覆寫時，原本的預設勾選可能已不存在
                self.questionnaire
                    .default_organisms
                    .retain(|o| self.questionnaire.organisms.contains(o));
            }
            if let Some(gene_symbols) = questionnaire.gene_symbols {
                self.questionnaire.gene_symbols = gene_symbols;
            }
            if let Some(defaults) = questionnaire.default_organisms {
                self.questionnaire.default_organisms = defaults;
            }
        }

        if let Some(report) = config.report {
            if report.column_width.is_some() {
                self.report.column_width = report.column_width;
            }
        }
    }

    pub fn column_width(&self) -> usize {
        self.report.column_width_for(&self.questionnaire.organisms)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("eutils.endpoint", &self.eutils.endpoint)?;
        validation::validate_non_empty_string("eutils.database", &self.eutils.database)?;
        validation::validate_range(
            "eutils.min_interval_secs",
            self.eutils.min_interval_secs,
            0.0,
            60.0,
        )?;

        validation::validate_non_empty_list(
            "questionnaire.organisms",
            &self.questionnaire.organisms,
        )?;
        validation::validate_non_empty_list(
            "questionnaire.gene_symbols",
            &self.questionnaire.gene_symbols,
        )?;
        validation::validate_subset(
            "questionnaire.default_organisms",
            &self.questionnaire.default_organisms,
            &self.questionnaire.organisms,
        )?;

        if let Some(width) = self.report.column_width {
            validation::validate_range("report.column_width", width, 1, 200)?;
        }

        Ok(())
    }
}
