use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::dictionary::{Dictionary, DictionaryError, Insertion, SpellCheck, WordStore};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Menu entries. Any other number asks to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert,
    Lookup,
    SpellCheck,
    Compare,
    Stats,
    Sentence,
    Exit,
}

impl Command {
    /// `None` when the input is not a number at all.
    pub fn parse(input: &str) -> Option<Command> {
        let choice: i64 = input.trim().parse().ok()?;
        Some(match choice {
            1 => Command::Insert,
            2 => Command::Lookup,
            3 => Command::SpellCheck,
            4 => Command::Compare,
            5 => Command::Stats,
            6 => Command::Sentence,
            _ => Command::Exit,
        })
    }
}

pub struct Repl<'a, R, W> {
    dictionary: &'a mut Dictionary,
    store: &'a WordStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(dictionary: &'a mut Dictionary, store: &'a WordStore, input: R, output: W) -> Self {
        Self {
            dictionary,
            store,
            input,
            output,
        }
    }

    /// Reads one line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Yes only for `Y`/`y`; end of input counts as `eof`.
    fn confirm(&mut self, prompt: &str, eof: bool) -> Result<bool> {
        Ok(match self.ask(prompt)? {
            Some(answer) => matches!(answer.trim(), "Y" | "y"),
            None => eof,
        })
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "DICTIONARY USING BK-TREES\n")?;
        writeln!(self.output, "1: Insert a new word into the dictionary")?;
        writeln!(self.output, "2: Look up a word in the dictionary")?;
        writeln!(self.output, "3: Check whether the spelling of a given word is correct")?;
        writeln!(
            self.output,
            "4: Compare searches by brute query and Levenshtein distance-based query"
        )?;
        writeln!(self.output, "5: Performance and characteristics")?;
        writeln!(self.output, "6: Spell check tool for sentences")?;
        writeln!(self.output, "Any other number to exit\n")?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Enter a valid choice")?;
                continue;
            };

            if command == Command::Exit {
                if self.confirm("Are you sure you want to exit? (Y/N)", true)? {
                    break;
                }
                continue;
            }

            self.dispatch(command)?;

            if self.confirm("\nContinue? (Y/N)", false)? {
                continue;
            }
            if self.confirm("Are you sure you want to exit? (Y/N)", true)? {
                break;
            }
        }
        Ok(())
    }

    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Insert => self.insert(),
            Command::Lookup => self.lookup(),
            Command::SpellCheck => self.spellcheck(),
            Command::Compare => self.compare(),
            Command::Stats => self.stats(),
            Command::Sentence => self.sentence(),
            Command::Exit => Ok(()),
        }
    }

    fn insert(&mut self) -> Result<()> {
        writeln!(self.output, "Inserting a new word")?;
        let Some(word) = self.ask("Enter the word to be added:")? else {
            return Ok(());
        };
        let Some(definition) = self.ask("Enter the definition of the word:")? else {
            return Ok(());
        };

        let store = self.store;
        match self
            .dictionary
            .insert_word(&word, &definition, |entry| store.append(entry))
        {
            Ok(Insertion::Added) => writeln!(self.output, "Added \"{}\".", word.trim())?,
            Ok(Insertion::AlreadyExists) => {
                writeln!(self.output, "This word already exists in the dictionary.")?
            }
            Err(e @ (DictionaryError::InvalidWord(_) | DictionaryError::Store(_))) => {
                warn!(error = %e, "insertion failed");
                writeln!(self.output, "Could not add the word: {e}")?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn lookup(&mut self) -> Result<()> {
        writeln!(self.output, "Look up a word in the dictionary")?;
        let Some(word) = self.ask("Enter the word to look up")? else {
            return Ok(());
        };
        match self.dictionary.lookup(&word)? {
            Some((word, definition)) => writeln!(self.output, "{word} : {definition}")?,
            None => writeln!(self.output, "No match found!")?,
        }
        Ok(())
    }

    fn spellcheck(&mut self) -> Result<()> {
        writeln!(self.output, "Spell Check")?;
        let Some(word) = self.ask("Enter the word")? else {
            return Ok(());
        };
        match self.dictionary.spellcheck(&word)? {
            SpellCheck::Correct { word, definition } => {
                writeln!(self.output, "The spelling is correct! The word entered was:")?;
                writeln!(self.output, "{word} : {definition}")?;
            }
            SpellCheck::Corrected(word) => {
                writeln!(self.output, "The correct word is:")?;
                writeln!(self.output, "{word}")?;
            }
            SpellCheck::Suggestions(words) => {
                writeln!(self.output, "No matches found. Did you mean:")?;
                for word in words {
                    writeln!(self.output, "{word}")?;
                }
            }
            SpellCheck::NoSuggestions => {
                writeln!(self.output, "Suitable suggestions were not found")?;
            }
        }
        Ok(())
    }

    fn compare(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Compare searches by brute query and Levenshtein distance-based query"
        )?;
        let Some(word) = self.ask("Enter the word to look up")? else {
            return Ok(());
        };
        let comparison = self.dictionary.compare_queries(&word)?;
        let Some((word, definition)) = &comparison.found else {
            writeln!(self.output, "No match found!")?;
            return Ok(());
        };
        writeln!(self.output, "{word} : {definition}")?;
        writeln!(self.output, "Levenshtein distance-based query:")?;
        writeln!(
            self.output,
            "Time taken (in seconds): {}",
            comparison.tree_time.as_secs_f64()
        )?;
        writeln!(self.output, "Brute query:")?;
        writeln!(
            self.output,
            "Time taken (in seconds): {}",
            comparison.brute_time.as_secs_f64()
        )?;
        if !comparison.agree() {
            warn!(
                tree_hits = comparison.tree_hits.len(),
                brute_hits = comparison.brute_hits.len(),
                "tree and brute-force results differ"
            );
        }
        Ok(())
    }

    fn stats(&mut self) -> Result<()> {
        let stats = self.dictionary.stats();
        writeln!(self.output, "Size of dictionary: {}", stats.size)?;
        writeln!(self.output, "The depth of the tree is: {}", stats.max_depth)?;
        writeln!(
            self.output,
            "Time taken to create the tree: {} seconds",
            stats.build_time.as_secs_f64()
        )?;
        Ok(())
    }

    fn sentence(&mut self) -> Result<()> {
        writeln!(self.output, "Spell check tool for sentences")?;
        let Some(sentence) = self.ask("Enter a sentence")? else {
            return Ok(());
        };
        let correction = self.dictionary.correct_sentence(&sentence)?;
        writeln!(self.output, "The sentence has been corrected to:")?;
        writeln!(self.output, "{}\n", correction.corrected)?;

        if correction.unresolved.is_empty() {
            return Ok(());
        }
        writeln!(
            self.output,
            "Some words could not be autocorrected. Suggestions are given below:\n"
        )?;
        for unresolved in &correction.unresolved {
            let span = unresolved.span.clone();
            writeln!(
                self.output,
                "{}{BOLD}{}{RESET}{}",
                &sentence[..span.start],
                &sentence[span.clone()],
                &sentence[span.end..]
            )?;
            if unresolved.suggestions.is_empty() {
                writeln!(self.output, "Suitable suggestions were not found\n")?;
            } else {
                writeln!(self.output, "Did you mean:")?;
                for (i, suggestion) in unresolved.suggestions.iter().enumerate() {
                    writeln!(self.output, "{}. {suggestion}", i + 1)?;
                }
            }
            if self.ask("Press enter to continue")?.is_none() {
                break;
            }
        }
        Ok(())
    }
}
