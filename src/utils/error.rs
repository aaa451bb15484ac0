use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneIdError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid organism ({organism}) or gene symbol ({gene_symbol}) [HTTP {status}]")]
    InvalidQuery {
        organism: String,
        gene_symbol: String,
        status: u16,
    },

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed esearch response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {message}")]
    Prompt { message: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GeneIdError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            GeneIdError::Http(_) => "Could not reach the NCBI E-utilities service".to_string(),
            GeneIdError::InvalidQuery {
                organism,
                gene_symbol,
                ..
            } => format!(
                "NCBI rejected the query for organism '{}' and gene symbol '{}'",
                organism, gene_symbol
            ),
            GeneIdError::Xml(_) | GeneIdError::MalformedResponse { .. } => {
                "NCBI returned a response that could not be read".to_string()
            }
            GeneIdError::Io(e) => format!("I/O failure: {}", e),
            GeneIdError::Prompt { message } => format!("Questionnaire aborted: {}", message),
            GeneIdError::TomlError(_) | GeneIdError::ConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            GeneIdError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GeneIdError::Http(_) => "Check your network connection and the --endpoint value",
            GeneIdError::InvalidQuery { .. } => {
                "Use an NCBI recognised organism name (e.g. \"Homo sapiens\") and gene symbol (e.g. \"BRCA1\")"
            }
            GeneIdError::Xml(_) | GeneIdError::MalformedResponse { .. } => {
                "Make sure the endpoint is an esearch.fcgi URL returning XML"
            }
            GeneIdError::Io(_) => "Check file permissions and that standard output is writable",
            GeneIdError::Prompt { .. } => {
                "Run in an interactive terminal, or pass --organism and --gene-symbols"
            }
            GeneIdError::TomlError(_)
            | GeneIdError::ConfigError { .. }
            | GeneIdError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            GeneIdError::TomlError(_)
            | GeneIdError::ConfigError { .. }
            | GeneIdError::InvalidConfigValueError { .. } => 1,
            GeneIdError::InvalidQuery { .. } => 2,
            GeneIdError::Http(_) | GeneIdError::Xml(_) | GeneIdError::MalformedResponse { .. } => 3,
            GeneIdError::Io(_) | GeneIdError::Prompt { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneIdError>;
