use std::fmt;

/// NCBI Gene 的數字 ID，依文件順序排列，可能為空
pub type GeneIdList = Vec<i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneQuery {
    pub organism: String,
    pub gene_symbol: String,
}

impl GeneQuery {
    pub fn new(organism: impl Into<String>, gene_symbol: impl Into<String>) -> Self {
        Self {
            organism: organism.into(),
            gene_symbol: gene_symbol.into(),
        }
    }

    /// esearch 的 term 參數，例如 `BRCA1[symbol] AND Homo sapiens[organism]`
    pub fn term(&self) -> String {
        format!(
            "{}[symbol] AND {}[organism]",
            self.gene_symbol, self.organism
        )
    }
}

impl fmt::Display for GeneQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.gene_symbol, self.organism)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneSymbolSource {
    Predefined,
    UserDefined,
}

impl GeneSymbolSource {
    pub const ALL: [GeneSymbolSource; 2] =
        [GeneSymbolSource::Predefined, GeneSymbolSource::UserDefined];

    pub fn label(&self) -> &'static str {
        match self {
            GeneSymbolSource::Predefined => "predefined",
            GeneSymbolSource::UserDefined => "user-defined",
        }
    }
}

/// The organisms and gene symbols chosen for one run.
///
/// Duplicates are dropped on construction; first-seen order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    organisms: Vec<String>,
    gene_symbols: Vec<String>,
}

impl Selections {
    pub fn new(organisms: Vec<String>, gene_symbols: Vec<String>) -> Self {
        Self {
            organisms: dedup_in_order(organisms),
            gene_symbols: dedup_in_order(gene_symbols),
        }
    }

    pub fn organisms(&self) -> &[String] {
        &self.organisms
    }

    pub fn gene_symbols(&self) -> &[String] {
        &self.gene_symbols
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty() || self.gene_symbols.is_empty()
    }
}

fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Split free text such as `"BRCA1, BRCA2"`, `"BRCA1,BRCA2"` or `"BRCA1 BRCA2"`.
pub fn split_gene_symbols(text: &str) -> Vec<String> {
    text.split_whitespace()
        .flat_map(|chunk| chunk.split(','))
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}

/// Organism names contain spaces, so only commas separate them.
pub fn split_organisms(text: &str) -> Vec<String> {
    text.split(',')
        .map(|organism| organism.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|organism| !organism.is_empty())
        .collect()
}
