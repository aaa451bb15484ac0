use crate::config::QuestionnaireSettings;
use crate::domain::model::{split_gene_symbols, split_organisms, GeneSymbolSource, Selections};
use crate::domain::ports::Prompter;
use crate::utils::error::Result;

pub const OTHER_ORGANISM_ITEM: &str = "Other (type organism names)";

pub fn not_blank(value: &str) -> std::result::Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("enter gene symbol(s)")
    } else {
        Ok(())
    }
}

fn organisms_not_blank(value: &str) -> std::result::Result<(), &'static str> {
    if split_organisms(value).is_empty() {
        Err("enter organism name(s)")
    } else {
        Ok(())
    }
}

/// Collects the organisms and gene symbols to convert.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    organisms: Vec<String>,
    gene_symbols: Vec<String>,
    default_organisms: Vec<String>,
}

impl Questionnaire {
    pub fn new(settings: &QuestionnaireSettings) -> Self {
        Self {
            organisms: settings.organisms.clone(),
            gene_symbols: settings.gene_symbols.clone(),
            default_organisms: settings.default_organisms.clone(),
        }
    }

    pub fn run<P: Prompter>(&self, prompter: &mut P) -> Result<Selections> {
        let organisms = self.ask_organisms(prompter)?;
        let gene_symbols = match self.ask_gene_symbol_source(prompter)? {
            GeneSymbolSource::Predefined => self.ask_predefined_gene_symbols(prompter)?,
            GeneSymbolSource::UserDefined => self.ask_user_gene_symbols(prompter)?,
        };

        tracing::debug!(
            "Questionnaire answers: organisms={:?}, gene_symbols={:?}",
            organisms,
            gene_symbols
        );
        Ok(Selections::new(organisms, gene_symbols))
    }

    fn ask_organisms<P: Prompter>(&self, prompter: &mut P) -> Result<Vec<String>> {
        let mut items = self.organisms.clone();
        items.push(OTHER_ORGANISM_ITEM.to_string());

        let defaults: Vec<bool> = items
            .iter()
            .map(|item| self.default_organisms.contains(item))
            .collect();

        let chosen = prompter.multi_select("Organisms", &items, &defaults)?;

        let mut organisms = Vec::new();
        let mut wants_other = false;
        for index in chosen {
            match self.organisms.get(index) {
                Some(organism) => organisms.push(organism.clone()),
                None if index == self.organisms.len() => wants_other = true,
                None => {}
            }
        }

        if wants_other {
            let text = prompter.input(
                "Enter organisms separated by commas",
                organisms_not_blank,
            )?;
            organisms.extend(split_organisms(&text));
        }

        Ok(organisms)
    }

    fn ask_gene_symbol_source<P: Prompter>(&self, prompter: &mut P) -> Result<GeneSymbolSource> {
        let labels: Vec<String> = GeneSymbolSource::ALL
            .iter()
            .map(|source| source.label().to_string())
            .collect();

        let index = prompter.select("Gene symbol input", &labels, 0)?;
        Ok(GeneSymbolSource::ALL
            .get(index)
            .copied()
            .unwrap_or(GeneSymbolSource::Predefined))
    }

    fn ask_predefined_gene_symbols<P: Prompter>(&self, prompter: &mut P) -> Result<Vec<String>> {
        let defaults = vec![false; self.gene_symbols.len()];
        let chosen = prompter.multi_select("Gene symbols", &self.gene_symbols, &defaults)?;

        Ok(chosen
            .into_iter()
            .filter_map(|index| self.gene_symbols.get(index).cloned())
            .collect())
    }

    fn ask_user_gene_symbols<P: Prompter>(&self, prompter: &mut P) -> Result<Vec<String>> {
        let text = prompter.input(
            "Enter gene symbols separated by white space and/or commas",
            not_blank,
        )?;
        Ok(split_gene_symbols(&text))
    }
}

#[cfg(feature = "cli")]
mod dialoguer_prompter {
    use super::Prompter;
    use crate::utils::error::{GeneIdError, Result};
    use dialoguer::theme::ColorfulTheme;
    use dialoguer::{Input, MultiSelect, Select};

    /// Terminal prompts rendered with `dialoguer`.
    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
    }

    impl std::fmt::Debug for DialoguerPrompter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DialoguerPrompter")
                .field("theme", &"ColorfulTheme")
                .finish()
        }
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    impl Default for DialoguerPrompter {
        fn default() -> Self {
            Self::new()
        }
    }

    fn prompt_error(e: dialoguer::Error) -> GeneIdError {
        GeneIdError::Prompt {
            message: e.to_string(),
        }
    }

    impl Prompter for DialoguerPrompter {
        fn multi_select(
            &mut self,
            prompt: &str,
            items: &[String],
            defaults: &[bool],
        ) -> Result<Vec<usize>> {
            MultiSelect::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .defaults(defaults)
                .interact()
                .map_err(prompt_error)
        }

        fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact()
                .map_err(prompt_error)
        }

        fn input(
            &mut self,
            prompt: &str,
            validate: fn(&str) -> std::result::Result<(), &'static str>,
        ) -> Result<String> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .validate_with(move |input: &String| -> std::result::Result<(), &'static str> {
                    validate(input)
                })
                .interact_text()
                .map_err(prompt_error)
        }
    }
}

#[cfg(feature = "cli")]
pub use dialoguer_prompter::DialoguerPrompter;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records what was asked.
    #[derive(Default)]
    struct ScriptedPrompter {
        multi_selects: VecDeque<Vec<usize>>,
        selects: VecDeque<usize>,
        inputs: VecDeque<&'static str>,
        seen_defaults: Vec<Vec<bool>>,
        rejected_inputs: Vec<&'static str>,
    }

    impl Prompter for ScriptedPrompter {
        fn multi_select(
            &mut self,
            _prompt: &str,
            items: &[String],
            defaults: &[bool],
        ) -> Result<Vec<usize>> {
            assert_eq!(items.len(), defaults.len());
            self.seen_defaults.push(defaults.to_vec());
            Ok(self.multi_selects.pop_front().expect("unexpected multi-select"))
        }

        fn select(&mut self, _prompt: &str, _items: &[String], _default: usize) -> Result<usize> {
            Ok(self.selects.pop_front().expect("unexpected select"))
        }

        fn input(
            &mut self,
            _prompt: &str,
            validate: fn(&str) -> std::result::Result<(), &'static str>,
        ) -> Result<String> {
            // 模擬 dialoguer：驗證失敗就繼續要下一筆輸入
            loop {
                let answer = self.inputs.pop_front().expect("unexpected input");
                match validate(answer) {
                    Ok(()) => return Ok(answer.to_string()),
                    Err(_) => self.rejected_inputs.push(answer),
                }
            }
        }
    }

    fn questionnaire() -> Questionnaire {
        Questionnaire::new(&QuestionnaireSettings::default())
    }

    #[test]
    fn test_predefined_flow() {
        let mut prompter = ScriptedPrompter {
            multi_selects: VecDeque::from(vec![vec![0, 1], vec![0, 3]]),
            selects: VecDeque::from(vec![0]),
            ..Default::default()
        };

        let selections = questionnaire().run(&mut prompter).unwrap();

        assert_eq!(selections.organisms(), ["Homo sapiens", "Mus musculus"]);
        assert_eq!(selections.gene_symbols(), ["BRCA1", "TP63"]);
        // Homo sapiens 預設勾選
        assert!(prompter.seen_defaults[0][0]);
        assert!(!prompter.seen_defaults[0][1..].iter().any(|d| *d));
    }

    #[test]
    fn test_user_defined_flow_rejects_blank_entry() {
        let mut prompter = ScriptedPrompter {
            multi_selects: VecDeque::from(vec![vec![2]]),
            selects: VecDeque::from(vec![1]),
            inputs: VecDeque::from(vec!["", "   ", "BRCA1, BRCA2 TP63"]),
            ..Default::default()
        };

        let selections = questionnaire().run(&mut prompter).unwrap();

        assert_eq!(selections.organisms(), ["Danio rerio"]);
        assert_eq!(selections.gene_symbols(), ["BRCA1", "BRCA2", "TP63"]);
        assert_eq!(prompter.rejected_inputs, vec!["", "   "]);
    }

    #[test]
    fn test_other_organism_free_text() {
        let other_index = QuestionnaireSettings::default().organisms.len();
        let mut prompter = ScriptedPrompter {
            multi_selects: VecDeque::from(vec![vec![0, other_index], vec![1]]),
            selects: VecDeque::from(vec![0]),
            inputs: VecDeque::from(vec![",", "Felis catus, Canis lupus"]),
            ..Default::default()
        };

        let selections = questionnaire().run(&mut prompter).unwrap();

        assert_eq!(
            selections.organisms(),
            ["Homo sapiens", "Felis catus", "Canis lupus"]
        );
        assert_eq!(selections.gene_symbols(), ["BRCA2"]);
        assert_eq!(prompter.rejected_inputs, vec![","]);
    }

    #[test]
    fn test_nothing_selected_gives_empty_selections() {
        let mut prompter = ScriptedPrompter {
            multi_selects: VecDeque::from(vec![vec![], vec![]]),
            selects: VecDeque::from(vec![0]),
            ..Default::default()
        };

        let selections = questionnaire().run(&mut prompter).unwrap();
        assert!(selections.is_empty());
    }

    #[test]
    fn test_not_blank_message() {
        assert_eq!(not_blank(""), Err("enter gene symbol(s)"));
        assert!(not_blank("BRCA1").is_ok());
    }
}
