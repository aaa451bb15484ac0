use crate::config::Settings;
use crate::utils::error::{GeneIdError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// True when `value` still carries a `${VAR}` placeholder that was not set.
pub fn has_unresolved_env_var(value: &str) -> bool {
    env_var_pattern().is_match(value)
}

/// On-disk configuration. Every key is optional; missing keys keep defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub eutils: Option<EutilsConfig>,
    pub questionnaire: Option<QuestionnaireConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EutilsConfig {
    pub endpoint: Option<String>,
    pub database: Option<String>,
    pub api_key: Option<String>,
    pub min_interval_secs: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireConfig {
    pub organisms: Option<Vec<String>>,
    pub gene_symbols: Option<Vec<String>>,
    pub default_organisms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub column_width: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| GeneIdError::ConfigError {
            message: format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${NCBI_API_KEY})；未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn into_settings(self) -> Settings {
        Settings::from_toml(self)
    }
}
