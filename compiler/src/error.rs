/// Every way a pattern can fail to compile into an automaton.
///
/// Positions index into the input of the failing stage, characters for the
/// normalizer and tokenizer, tokens for the parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },
    #[error("operator '{operator}' at position {position} has no preceding operand")]
    InvalidPostfixOperatorPlacement { operator: char, position: usize },
    #[error("invalid character range {start}-{end}")]
    InvalidCharacterRange { start: char, end: char },
    #[error("character class at position {position} is never closed")]
    UnterminatedCharacterClass { position: usize },
    #[error("character class at position {position} is empty")]
    EmptyCharacterClass { position: usize },
    #[error("escape at position {position} has no character to escape")]
    DanglingEscape { position: usize },
}
