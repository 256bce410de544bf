use parcel::parsers::character::expect_character;
use parcel::prelude::v1::*;

use crate::CompileError;

/// An atomic lexical unit of a normalized pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Epsilon,
    Union,
    Concat,
    Star,
    OpenParen,
    CloseParen,
}

impl Token {
    /// Binding strength of an operator, parens and operands bind at `0`.
    fn precedence(&self) -> u8 {
        match self {
            Token::Union => 1,
            Token::Concat => 2,
            Token::Star => 3,
            _ => 0,
        }
    }

    /// Returns `true` if an operand can end at this token.
    fn ends_operand(&self) -> bool {
        !matches!(self, Token::Union | Token::OpenParen | Token::Concat)
    }

    /// Returns `true` if an operand can begin at this token.
    fn starts_operand(&self) -> bool {
        !matches!(
            self,
            Token::Union | Token::CloseParen | Token::Star | Token::Concat
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(c) if is_operator_char(*c) => write!(f, "\\{}", c),
            Token::Literal(c) => write!(f, "{}", c),
            Token::Epsilon => write!(f, "ε"),
            Token::Union => write!(f, "|"),
            Token::Concat => write!(f, "."),
            Token::Star => write!(f, "*"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
        }
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '|' | '.' | '*' | '+' | '?' | '[' | ']' | '\\' | 'ε'
    )
}

/// Splits a normalized pattern into tokens, inserting an explicit
/// [Token::Concat] between every pair of adjacent operands.
///
/// # Example
///
/// ```
/// use enfa_compiler::parser::{add_explicit_concat, Token};
///
/// assert_eq!(
///     Ok(vec![
///         Token::Literal('a'),
///         Token::Concat,
///         Token::Literal('b'),
///         Token::Star,
///     ]),
///     add_explicit_concat("ab*")
/// );
/// ```
pub fn add_explicit_concat(regex: &str) -> Result<Vec<Token>, CompileError> {
    let input: Vec<(usize, char)> = regex.chars().enumerate().collect();

    let tokens: Vec<Token> = match lexemes().parse(input.as_slice()) {
        Ok(MatchStatus::Match {
            remainder, inner, ..
        }) => match remainder.first() {
            None => inner.into_iter().flatten().collect(),
            // only a trailing unpaired escape fails to lex.
            Some(&(position, _)) => return Err(CompileError::DanglingEscape { position }),
        },
        Ok(MatchStatus::NoMatch(remainder)) => match remainder.first() {
            None => vec![],
            Some(&(position, _)) => return Err(CompileError::DanglingEscape { position }),
        },
        Err(e) => return Err(CompileError::MalformedExpression(e.to_string())),
    };

    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        let needs_concat = iter
            .peek()
            .map(|next| token.ends_operand() && next.starts_operand())
            .unwrap_or(false);

        out.push(token);
        if needs_concat {
            out.push(Token::Concat);
        }
    }

    tracing::trace!(regex, tokens = %postfix_string(&out), "tokenized pattern");

    Ok(out)
}

/// Reorders an infix token stream into postfix order using the shunting-yard
/// algorithm. `|` binds loosest, then `.`, then `*`, all left-associative.
///
/// # Example
///
/// ```
/// use enfa_compiler::parser::{add_explicit_concat, infix_to_postfix, postfix_string};
///
/// let tokens = add_explicit_concat("a.b*").unwrap();
/// let postfix = infix_to_postfix(&tokens).unwrap();
///
/// assert_eq!("ab*.", postfix_string(&postfix));
/// ```
pub fn infix_to_postfix(tokens: &[Token]) -> Result<Vec<Token>, CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    // operators are stacked along with their position for error reporting.
    let mut stack: Vec<(usize, Token)> = vec![];

    for (position, &token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(_) | Token::Epsilon => output.push(token),
            Token::OpenParen => stack.push((position, token)),
            Token::CloseParen => loop {
                match stack.pop() {
                    Some((_, Token::OpenParen)) => break,
                    Some((_, op)) => output.push(op),
                    None => return Err(CompileError::UnbalancedParentheses { position }),
                }
            },
            op => {
                while let Some(&(_, top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }

                    output.push(top);
                    stack.pop();
                }
                stack.push((position, op));
            }
        }
    }

    while let Some((position, op)) = stack.pop() {
        if op == Token::OpenParen {
            return Err(CompileError::UnbalancedParentheses { position });
        }
        output.push(op);
    }

    Ok(output)
}

/// Renders a token sequence back into its textual form.
pub fn postfix_string(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

// Lexing

fn lexemes<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Vec<Vec<Token>>> {
    parcel::zero_or_more(lexeme())
}

fn lexeme<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Vec<Token>> {
    parcel::or(epsilon().map(|token| vec![token]), || {
        parcel::or(escaped_literal().map(|token| vec![token]), || {
            parcel::or(operator().map(|token| vec![token]), || {
                parcel::or(alphanumeric_run(), || {
                    literal().map(|token| vec![token])
                })
            })
        })
    })
}

fn epsilon<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Token> {
    expect_character('ε').map(|_| Token::Epsilon)
}

fn operator<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(expect_character('(').map(|_| Token::OpenParen), || {
        parcel::or(expect_character(')').map(|_| Token::CloseParen), || {
            parcel::or(expect_character('|').map(|_| Token::Union), || {
                parcel::or(expect_character('*').map(|_| Token::Star), || {
                    expect_character('.').map(|_| Token::Concat)
                })
            })
        })
    })
}

/// A run of alphanumerics lexes as one lexeme, emitted as one literal per
/// character so that a trailing `*` binds only to the last of them.
fn alphanumeric_run<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Vec<Token>> {
    parcel::one_or_more(any_character().predicate(|c| c.is_alphanumeric() && *c != 'ε'))
        .map(|run| run.into_iter().map(Token::Literal).collect::<Vec<_>>())
}

fn literal<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Token> {
    any_character()
        .predicate(|c| *c != '\\')
        .map(Token::Literal)
}

fn escaped_literal<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], Token> {
    move |input: &'a [(usize, char)]| match input.get(0..2) {
        Some(&[(escape_pos, '\\'), (escaped_pos, escaped)]) => Ok(MatchStatus::Match {
            span: escape_pos..escaped_pos + 1,
            remainder: &input[2..],
            inner: Token::Literal(escaped),
        }),
        _ => Ok(MatchStatus::NoMatch(input)),
    }
}

fn any_character<'a>() -> impl parcel::Parser<'a, &'a [(usize, char)], char> {
    move |input: &'a [(usize, char)]| match input.first() {
        Some(&(next_pos, next)) => Ok(MatchStatus::Match {
            span: next_pos..next_pos + 1,
            remainder: &input[1..],
            inner: next,
        }),
        None => Ok(MatchStatus::NoMatch(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_insert_concatenation_between_adjacent_operands() {
        use Token::*;

        let input_output = vec![
            ("ab", vec![Literal('a'), Concat, Literal('b')]),
            ("a.b*", vec![Literal('a'), Concat, Literal('b'), Star]),
            (
                "(a|b)c",
                vec![
                    OpenParen,
                    Literal('a'),
                    Union,
                    Literal('b'),
                    CloseParen,
                    Concat,
                    Literal('c'),
                ],
            ),
            ("a*b", vec![Literal('a'), Star, Concat, Literal('b')]),
            ("aε", vec![Literal('a'), Concat, Epsilon]),
            ("\\*a", vec![Literal('*'), Concat, Literal('a')]),
            ("a-b", vec![Literal('a'), Concat, Literal('-'), Concat, Literal('b')]),
            ("", vec![]),
        ];

        for (test_case, (input, expected)) in input_output.into_iter().enumerate() {
            assert_eq!(
                (test_case, Ok(expected)),
                (test_case, add_explicit_concat(input))
            );
        }
    }

    #[test]
    fn should_reject_trailing_escape() {
        assert_eq!(
            Err(CompileError::DanglingEscape { position: 2 }),
            add_explicit_concat("ab\\")
        );
    }

    #[test]
    fn should_convert_infix_to_postfix() {
        let input_output = [
            ("a.b*", "ab*."),
            ("a|b", "ab|"),
            ("(ab)(ab)*", "ab.ab.*."),
            ("a|bc*", "abc*.|"),
            ("(a|b)*c", "ab|*c."),
            ("a|b|c", "ab|c|"),
            ("(a|ε)", "aε|"),
            ("\\|a", "\\|a."),
        ];

        for (test_case, (input, expected)) in input_output.into_iter().enumerate() {
            let postfix = add_explicit_concat(input)
                .and_then(|tokens| infix_to_postfix(&tokens))
                .map(|postfix| postfix_string(&postfix));

            assert_eq!((test_case, Ok(expected.to_string())), (test_case, postfix));
        }
    }

    #[test]
    fn should_reject_unbalanced_parentheses() {
        let input_output = [
            (")a", CompileError::UnbalancedParentheses { position: 0 }),
            ("(a", CompileError::UnbalancedParentheses { position: 0 }),
            ("a(b|c", CompileError::UnbalancedParentheses { position: 2 }),
            ("(a))", CompileError::UnbalancedParentheses { position: 3 }),
        ];

        for (test_case, (input, expected)) in input_output.into_iter().enumerate() {
            let postfix = add_explicit_concat(input).and_then(|tokens| infix_to_postfix(&tokens));

            assert_eq!((test_case, Err(expected)), (test_case, postfix));
        }
    }
}
