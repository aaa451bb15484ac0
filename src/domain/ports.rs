use crate::domain::model::{GeneIdList, GeneQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Time source for the rate limiter, swappable in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

#[async_trait]
pub trait GeneLookup: Send {
    async fn gene_ids(&mut self, query: &GeneQuery) -> Result<GeneIdList>;
}

/// Console interaction used by the questionnaire.
pub trait Prompter {
    fn multi_select(&mut self, prompt: &str, items: &[String], defaults: &[bool])
        -> Result<Vec<usize>>;

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Re-prompts until `validate` accepts the entry.
    fn input(
        &mut self,
        prompt: &str,
        validate: fn(&str) -> std::result::Result<(), &'static str>,
    ) -> Result<String>;
}
