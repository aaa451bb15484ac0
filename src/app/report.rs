use crate::domain::model::{GeneQuery, Selections};
use crate::domain::ports::GeneLookup;
use crate::utils::error::Result;
use std::io::Write;

/// `""` for no IDs, `"672"` for one, `"12, 34"` for several.
pub fn format_gene_ids(ids: &[i64]) -> String {
    match ids {
        [] => String::new(),
        [single] => single.to_string(),
        many => many
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub struct ReportPrinter<W: Write> {
    out: W,
    column_width: usize,
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(out: W, column_width: usize) -> Self {
        Self { out, column_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Look up every (gene symbol, organism) pair and print one block per symbol.
    ///
    /// Stops at the first failed lookup; lines already printed stay printed.
    pub async fn print_gene_info<L: GeneLookup>(
        &mut self,
        lookup: &mut L,
        selections: &Selections,
    ) -> Result<usize> {
        let mut rows = 0;

        for gene_symbol in selections.gene_symbols() {
            writeln!(self.out, "Gene Symbol: {}", gene_symbol)?;

            for organism in selections.organisms() {
                let query = GeneQuery::new(organism.clone(), gene_symbol.clone());
                let ids = lookup.gene_ids(&query).await?;
                writeln!(
                    self.out,
                    "\t{:<width$} --> {}",
                    organism,
                    format_gene_ids(&ids),
                    width = self.column_width
                )?;
                rows += 1;
            }
        }

        self.out.flush()?;
        Ok(rows)
    }
}
