//! Command stream parser
//!
//! Scans raw command text character by character, strips comments and
//! whitespace, segments the stream at command delimiters, and validates
//! each candidate against the compiled grammar. Matching commands are
//! tokenized and submitted downstream; non-matching candidates are
//! recorded as line-tagged syntax errors.
//!
//! Error handling follows a collect-then-report contract: the first syntax
//! error taints the run (no further commands are submitted, not even valid
//! ones), but scanning continues to the end of the input so that a single
//! aggregate report carries every error in the source.

use crate::pipeline::CommandBuffer;
use crate::types::{SyntaxError, SyntaxErrorReport, TokenizedCommand};

/// Parser driving a compiled grammar over a command source
#[derive(Debug, Clone)]
pub struct CommandStreamParser {
    grammar: crate::parser::CommandGrammar,
}

impl CommandStreamParser {
    /// Create a parser around an already-compiled grammar.
    pub fn new(grammar: crate::parser::CommandGrammar) -> Self {
        CommandStreamParser { grammar }
    }

    /// Parse `text`, submitting validated commands into `buffer`
    ///
    /// Reads the text one character at a time. A comment character discards
    /// input through end-of-line; whitespace is insignificant and dropped;
    /// everything else accumulates into the pending candidate, which is
    /// closed (delimiter included) when the command delimiter appears.
    /// Trailing undelimited text at end of input is ignored.
    ///
    /// Submission awaits when the buffer is full, so this method can
    /// suspend the caller; the parser holds no buffering of its own beyond
    /// the in-flight candidate.
    ///
    /// # Arguments
    ///
    /// * `source_name` - identifier used to tag syntax errors (e.g. the path)
    /// * `text` - the full command text
    /// * `max_commands` - stop after this many valid commands; `0` reads all
    /// * `buffer` - destination for tokenized commands
    ///
    /// # Returns
    ///
    /// The number of commands submitted downstream.
    ///
    /// # Errors
    ///
    /// After the full text has been scanned, returns a
    /// [`SyntaxErrorReport`] carrying every recorded error if there was at
    /// least one. Commands submitted before the first error remain in the
    /// buffer and stay valid.
    pub async fn parse(
        &self,
        source_name: &str,
        text: &str,
        max_commands: usize,
        buffer: &CommandBuffer,
    ) -> Result<usize, SyntaxErrorReport> {
        let comment = self.grammar.line_comment();
        let command_delimiter = self.grammar.command_delimiter();

        let mut errors: Vec<SyntaxError> = Vec::new();
        let mut submitted = 0usize;
        let mut line: u64 = 1;
        let mut candidate = String::new();

        let mut chars = text.chars();
        'scan: while let Some(ch) = chars.next() {
            if ch == comment {
                // Skip over any input between the comment and end-of-line.
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        line += 1;
                        break;
                    }
                }
                continue;
            }
            if ch == '\n' {
                line += 1;
                continue;
            }
            if ch.is_whitespace() {
                continue;
            }

            candidate.push(ch);
            if ch != command_delimiter {
                continue;
            }

            // The candidate is one complete, whitespace-stripped command.
            if !self.grammar.is_match(&candidate) {
                errors.push(SyntaxError {
                    source: source_name.to_string(),
                    line,
                    text: candidate.clone(),
                });
            } else if errors.is_empty() {
                submitted += 1;
                buffer.put(self.tokenize(&candidate)).await;

                if max_commands != 0 && submitted == max_commands {
                    break 'scan;
                }
            }
            candidate.clear();
        }

        if errors.is_empty() {
            Ok(submitted)
        } else {
            Err(SyntaxErrorReport { errors })
        }
    }

    /// Split a matched candidate into its token strings.
    fn tokenize(&self, candidate: &str) -> TokenizedCommand {
        candidate
            .trim_end_matches(self.grammar.command_delimiter())
            .split(self.grammar.token_delimiter())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::bank::bank_grammar;

    fn parser() -> CommandStreamParser {
        CommandStreamParser::new(bank_grammar().unwrap())
    }

    /// Run a parse against a generously sized buffer and return the outcome
    /// plus everything that reached the buffer.
    async fn parse_all(
        text: &str,
        max_commands: usize,
    ) -> (Result<usize, SyntaxErrorReport>, Vec<TokenizedCommand>) {
        let buffer = CommandBuffer::new(1000);
        let result = parser().parse("test.txt", text, max_commands, &buffer).await;

        let mut drained = Vec::new();
        while !buffer.is_empty() {
            drained.push(buffer.take().await);
        }
        (result, drained)
    }

    #[tokio::test]
    async fn test_deposit_command_tokenization() {
        let (result, commands) = parse_all("deposit,12345678,100,50;", 0).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(commands, vec![vec!["deposit", "12345678", "100", "50"]]);
    }

    #[tokio::test]
    async fn test_whitespace_is_insignificant() {
        let text = "deposit , 12345678 ,\n\t100, 50 ;";
        let (result, commands) = parse_all(text, 0).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(commands, vec![vec!["deposit", "12345678", "100", "50"]]);
    }

    #[tokio::test]
    async fn test_comments_are_discarded_to_end_of_line() {
        let text = "! opening remark\ndeposit,12345678,1,0; ! trailing note\nbalance,12345678;\n";
        let (result, commands) = parse_all(text, 0).await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], vec!["balance", "12345678"]);
    }

    #[tokio::test]
    async fn test_malformed_command_is_rejected_with_line_tag() {
        // 7-digit account number: the extra token shifts everything.
        let text = "balance,12345678;\ndeposit,1234,5,100,50;\n";
        let (result, commands) = parse_all(text, 0).await;

        let report = result.unwrap_err();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].source, "test.txt");
        assert_eq!(report.errors[0].line, 2);
        assert_eq!(report.errors[0].text, "deposit,1234,5,100,50;");

        // The valid command before the error was already submitted.
        assert_eq!(commands, vec![vec!["balance", "12345678"]]);
    }

    #[tokio::test]
    async fn test_all_errors_are_collected_in_one_pass() {
        let text = "deposit,123,1,0;\nbalance,12345678;\nwithdraw,456,2,0;\n";
        let (result, commands) = parse_all(text, 0).await;

        let report = result.unwrap_err();
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].line, 1);
        assert_eq!(report.errors[1].line, 3);

        // The run was tainted by line 1: the valid balance command on line 2
        // must not have been submitted.
        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn test_max_commands_stops_reading_without_error() {
        let text = "deposit,12345678,1,0;deposit,12345678,2,0;deposit,12345678,3,0;";
        let (result, commands) = parse_all(text, 2).await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1][2], "2");
    }

    #[tokio::test]
    async fn test_max_commands_ignores_garbage_past_cutoff() {
        // Reading stops at the cutoff; the malformed text after it is never
        // examined.
        let text = "deposit,12345678,1,0;this is not a command";
        let (result, commands) = parse_all(text, 1).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(commands.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_and_comment_only_input() {
        let (result, commands) = parse_all("! nothing here\n\n   \n", 0).await;

        assert_eq!(result.unwrap(), 0);
        assert!(commands.is_empty());
    }

    #[tokio::test]
    async fn test_trailing_undelimited_text_is_ignored() {
        let text = "balance,12345678;deposit,12345678,1";
        let (result, commands) = parse_all(text, 0).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(commands.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_amount_parses() {
        let (result, commands) = parse_all("deposit,12345678,-5,25;", 0).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(commands[0], vec!["deposit", "12345678", "-5", "25"]);
    }
}
