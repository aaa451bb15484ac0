use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::{split_gene_symbols, Selections};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "gene-ids")]
#[command(about = "Convert gene symbols into NCBI gene IDs for selected organisms")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// esearch.fcgi endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// NCBI API key sent as `api_key`
    #[arg(long)]
    pub api_key: Option<String>,

    /// Minimum seconds between requests
    #[arg(long)]
    pub min_interval: Option<f64>,

    /// Width of the organism column in the report
    #[arg(long)]
    pub column_width: Option<usize>,

    /// Organism to query (repeatable); skips the questionnaire together with --gene-symbols
    #[arg(long = "organism", value_name = "ORGANISM")]
    pub organisms: Vec<String>,

    /// Gene symbols separated by white space and/or commas
    #[arg(long)]
    pub gene_symbols: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file (if any), then flags from this command line.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(endpoint) = &self.endpoint {
            settings.eutils.endpoint = endpoint.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.eutils.api_key = Some(api_key.clone());
        }
        if let Some(interval) = self.min_interval {
            settings.eutils.min_interval_secs = interval;
        }
        if let Some(width) = self.column_width {
            settings.report.column_width = Some(width);
        }
    }

    /// Selections given entirely on the command line, if both parts are present.
    pub fn preset_selections(&self) -> Option<Selections> {
        let gene_symbols = split_gene_symbols(self.gene_symbols.as_deref()?);
        if self.organisms.is_empty() || gene_symbols.is_empty() {
            return None;
        }
        Some(Selections::new(self.organisms.clone(), gene_symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "gene-ids",
            "--organism",
            "Homo sapiens",
            "--organism",
            "Mus musculus",
            "--gene-symbols",
            "BRCA1, TP63",
            "--min-interval",
            "0.5",
            "-v",
        ]);

        assert_eq!(cli.organisms, vec!["Homo sapiens", "Mus musculus"]);
        assert_eq!(cli.min_interval, Some(0.5));
        assert!(cli.verbose);

        let selections = cli.preset_selections().unwrap();
        assert_eq!(selections.gene_symbols(), ["BRCA1", "TP63"]);
    }

    #[test]
    fn test_preset_requires_both_parts() {
        let cli = CliConfig::parse_from(["gene-ids", "--organism", "Homo sapiens"]);
        assert!(cli.preset_selections().is_none());

        let cli = CliConfig::parse_from(["gene-ids", "--gene-symbols", "BRCA1"]);
        assert!(cli.preset_selections().is_none());

        let cli = CliConfig::parse_from(["gene-ids", "--organism", "Homo sapiens", "--gene-symbols", " , "]);
        assert!(cli.preset_selections().is_none());
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[eutils]\nmin_interval_secs = 1.0\napi_key = \"from-file\"\n\n[report]\ncolumn_width = 30\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_path_buf()),
            api_key: Some("from-cli".to_string()),
            ..Default::default()
        };

        let settings = cli.load_settings().unwrap();
        assert_eq!(settings.eutils.min_interval_secs, 1.0);
        assert_eq!(settings.eutils.api_key.as_deref(), Some("from-cli"));
        assert_eq!(settings.column_width(), 30);
    }
}
