pub mod bk_tree;
pub mod cli;
pub mod dictionary;
pub mod helpers;
pub mod levenshtein;

pub use bk_tree::{BkTree, Match, TreeError, brute_query};
pub use levenshtein::{Levenshtein, Metric, levenshtein};
