//! Grammar compiler
//!
//! Turns a declarative table of command shapes into a single compiled
//! pattern. A shape is an ordered list of field patterns; the compiled
//! grammar accepts zero or more occurrences of any shape, each with its
//! fields joined by the token delimiter and terminated by the command
//! delimiter.
//!
//! Compilation happens exactly once, at construction. A shape table that
//! does not assemble into a valid pattern (for example, a malformed field
//! pattern) is a fatal configuration error, never a per-command condition.

use crate::types::GrammarError;
use regex::Regex;

/// A compiled command grammar plus its delimiter configuration
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    pattern: Regex,
    line_comment: char,
    token_delimiter: char,
    command_delimiter: char,
}

impl CommandGrammar {
    /// Compile a shape table into a matchable grammar
    ///
    /// Each shape is joined with the (escaped) token delimiter and
    /// terminated by the (escaped) command delimiter; the full grammar is
    /// the anchored alternation of all shapes, repeated zero or more times.
    /// Field patterns are regular-expression fragments and are embedded
    /// verbatim.
    ///
    /// # Arguments
    ///
    /// * `shapes` - the command shapes; each inner list starts with the verb
    ///   literal followed by its field patterns
    /// * `line_comment` - character that starts a to-end-of-line comment
    /// * `token_delimiter` - character separating tokens within a command
    /// * `command_delimiter` - character terminating a command
    ///
    /// # Errors
    ///
    /// * [`GrammarError::WhitespaceDelimiter`] if either delimiter is a
    ///   whitespace character
    /// * [`GrammarError::Pattern`] if the assembled pattern does not compile
    pub fn compile(
        shapes: &[Vec<String>],
        line_comment: char,
        token_delimiter: char,
        command_delimiter: char,
    ) -> Result<Self, GrammarError> {
        if token_delimiter.is_whitespace() {
            return Err(GrammarError::WhitespaceDelimiter {
                role: "token",
                delimiter: token_delimiter,
            });
        }
        if command_delimiter.is_whitespace() {
            return Err(GrammarError::WhitespaceDelimiter {
                role: "command",
                delimiter: command_delimiter,
            });
        }

        let token = regex::escape(&token_delimiter.to_string());
        let terminator = regex::escape(&command_delimiter.to_string());

        let alternatives: Vec<String> = shapes
            .iter()
            .map(|shape| format!("(?:{}{})", shape.join(&token), terminator))
            .collect();
        let pattern = Regex::new(&format!(r"\A(?:{})*\z", alternatives.join("|")))?;

        Ok(CommandGrammar {
            pattern,
            line_comment,
            token_delimiter,
            command_delimiter,
        })
    }

    /// True if `candidate` (a whitespace-stripped, delimiter-terminated
    /// command) conforms to the grammar.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }

    /// The comment character.
    pub fn line_comment(&self) -> char {
        self.line_comment
    }

    /// The character separating tokens within a command.
    pub fn token_delimiter(&self) -> char {
        self.token_delimiter
    }

    /// The character terminating a command.
    pub fn command_delimiter(&self) -> char {
        self.command_delimiter
    }
}
