pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::app::questionnaire::DialoguerPrompter;
#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::app::questionnaire::Questionnaire;
pub use crate::app::report::{format_gene_ids, ReportPrinter};
pub use crate::config::Settings;
pub use crate::core::{
    clock::{MockClock, SystemClock},
    esearch::parse_gene_ids,
    eutils_client::EutilsClient,
    rate_limiter::RateLimiter,
};
pub use crate::domain::model::{GeneQuery, Selections};
pub use crate::utils::error::{GeneIdError, Result};
