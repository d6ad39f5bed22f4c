use std::path::PathBuf;

use clap::Parser;

use crate::dictionary::DictionaryConfig;

/// Dictionary with spell checking backed by a BK-tree
#[derive(Parser, Debug, Clone)]
#[command(name = "wordtree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct WordtreeArgs {
    /// Word list, one JSON object per line; `.bz2` files are read-only
    #[arg(short, long, default_value = "dictionary.jsonl")]
    pub dictionary: PathBuf,

    /// Largest edit distance tried when suggesting corrections
    #[arg(long = "max-distance", default_value_t = 2)]
    pub max_distance: usize,

    /// Number of suggestions shown at most
    #[arg(long = "max-suggestions", default_value_t = 10)]
    pub max_suggestions: usize,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl WordtreeArgs {
    pub fn config(&self) -> DictionaryConfig {
        DictionaryConfig {
            max_suggestion_distance: self.max_distance,
            max_suggestions: self.max_suggestions,
        }
    }

    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "wordtree=warn",
            1 => "wordtree=info",
            2 => "wordtree=debug",
            _ => "wordtree=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = WordtreeArgs::parse_from(["wordtree"]);
        assert_eq!(args.dictionary, PathBuf::from("dictionary.jsonl"));
        assert_eq!(args.config(), DictionaryConfig::default());
        assert_eq!(args.log_directive(), "wordtree=warn");
    }

    #[test]
    fn test_overrides() {
        let args = WordtreeArgs::parse_from([
            "wordtree",
            "--dictionary",
            "words.jsonl.bz2",
            "--max-distance",
            "3",
            "--max-suggestions",
            "5",
            "-vv",
        ]);
        assert_eq!(args.dictionary, PathBuf::from("words.jsonl.bz2"));
        assert_eq!(args.config().max_suggestion_distance, 3);
        assert_eq!(args.config().max_suggestions, 5);
        assert_eq!(args.log_directive(), "wordtree=debug");
    }
}
