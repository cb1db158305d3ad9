//! The banking command grammar
//!
//! Defines the concrete command language the engine accepts. Four commands,
//! each a token sequence: all start with a verb and an 8-digit account
//! number; `deposit` and `withdraw` additionally carry an amount of money
//! written as an optionally signed dollars integer, the token delimiter,
//! and a 1-2 digit cents count.
//!
//! ```text
//! name,12345678;
//! balance,12345678;
//! deposit,12345678,100,50;     ! deposit 100.50
//! withdraw,12345678,-5,25;
//! ```

use crate::parser::CommandGrammar;
use crate::types::command::verbs;
use crate::types::GrammarError;

/// Comment symbol: the rest of the line is ignored.
pub const LINE_COMMENT: char = '!';

/// Character separating the tokens of a command.
pub const TOKEN_DELIMITER: char = ',';

/// Character terminating a command.
pub const COMMAND_DELIMITER: char = ';';

/// Account numbers are 8-digit strings.
const ACCOUNT_NUMBER: &str = r"\d{8}";

/// Compile the banking grammar
///
/// # Errors
///
/// Propagates [`GrammarError`] from compilation; with the constants above
/// this only fails if the shape table itself is edited into invalidity.
pub fn bank_grammar() -> Result<CommandGrammar, GrammarError> {
    // An amount of money spans two tokens: -?digits , one or two digits.
    let money = format!(
        r"-?\d+{}\d{{1,2}}",
        regex::escape(&TOKEN_DELIMITER.to_string())
    );

    let shapes = vec![
        vec![verbs::NAME.to_string(), ACCOUNT_NUMBER.to_string()],
        vec![verbs::BALANCE.to_string(), ACCOUNT_NUMBER.to_string()],
        vec![
            verbs::DEPOSIT.to_string(),
            ACCOUNT_NUMBER.to_string(),
            money.clone(),
        ],
        vec![verbs::WITHDRAW.to_string(), ACCOUNT_NUMBER.to_string(), money],
    ];

    CommandGrammar::compile(&shapes, LINE_COMMENT, TOKEN_DELIMITER, COMMAND_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::name("name,12345678;", true)]
    #[case::balance("balance,12345678;", true)]
    #[case::deposit("deposit,12345678,100,50;", true)]
    #[case::withdraw("withdraw,12345678,2000,0;", true)]
    #[case::negative_amount("deposit,12345678,-5,25;", true)]
    #[case::single_cent_digit("deposit,12345678,100,5;", true)]
    #[case::short_account("deposit,1234567,100,50;", false)]
    #[case::long_account("deposit,123456789,100,50;", false)]
    #[case::three_cent_digits("deposit,12345678,100,500;", false)]
    #[case::missing_amount("deposit,12345678;", false)]
    #[case::amount_on_query("balance,12345678,100,50;", false)]
    #[case::unknown_verb("transfer,12345678;", false)]
    fn test_bank_grammar(#[case] candidate: &str, #[case] expected: bool) {
        let grammar = bank_grammar().unwrap();
        assert_eq!(grammar.is_match(candidate), expected);
    }

    #[test]
    fn test_grammar_compiles() {
        assert!(bank_grammar().is_ok());
    }
}
