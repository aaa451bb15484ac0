pub mod clock;
pub mod esearch;
pub mod eutils_client;
pub mod rate_limiter;

pub use crate::domain::model::{GeneIdList, GeneQuery, Selections};
pub use crate::domain::ports::{Clock, GeneLookup, Prompter};
pub use crate::utils::error::Result;
