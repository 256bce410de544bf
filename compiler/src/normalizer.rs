//! Desugars the extended operators `+`, `?` and `[...]` into the primitive
//! operator set understood by the parser.

use std::ops::Range;

use crate::CompileError;

/// Characters that must be escaped to be read back as literals.
const RESERVED: &[char] = &['(', ')', '|', '.', '*', '+', '?', '[', ']', '\\', 'ε'];

/// A single element of the rewrite buffer. An escaped character is kept as
/// one unit so it is never mistaken for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Escaped(char),
}

impl Unit {
    fn literal(c: char) -> Self {
        if RESERVED.contains(&c) {
            Self::Escaped(c)
        } else {
            Self::Char(c)
        }
    }
}

/// Rewrites a pattern so that it only contains literals, `ε`, `|`, `.`, `*`
/// and parentheses.
///
/// - `E+` becomes `EE*`.
/// - `E?` becomes `(E|ε)`.
/// - `[a-cx]` becomes `(a|b|c|x)`.
///
/// # Example
///
/// ```
/// use enfa_compiler::normalize;
///
/// assert_eq!(Ok("(ab)(ab)*".to_string()), normalize("(ab)+"));
/// assert_eq!(Ok("(a|b)c".to_string()), normalize("[ab]c"));
/// assert_eq!(Ok("((ab)(ab)*|ε)".to_string()), normalize("(ab)+?"));
/// ```
pub fn normalize(regex: &str) -> Result<String, CompileError> {
    let input: Vec<char> = regex.chars().collect();
    let mut out: Vec<Unit> = Vec::with_capacity(input.len());
    // the span of the most recent `+`/`?` rewrite, so a following operator
    // applies to the whole rewritten operand.
    let mut last_rewrite: Option<Range<usize>> = None;
    let mut cursor = 0;

    while let Some(&c) = input.get(cursor) {
        match c {
            '\\' => {
                let escaped = input
                    .get(cursor + 1)
                    .copied()
                    .ok_or(CompileError::DanglingEscape { position: cursor })?;
                out.push(Unit::Escaped(escaped));
                cursor += 2;
            }
            '[' => {
                let (members, next) = character_class(&input, cursor)?;

                out.push(Unit::Char('('));
                for (idx, member) in members.into_iter().enumerate() {
                    if idx > 0 {
                        out.push(Unit::Char('|'));
                    }
                    out.push(Unit::literal(member));
                }
                out.push(Unit::Char(')'));
                cursor = next;
            }
            '+' | '?' => {
                let start = operand_start(&out, last_rewrite.as_ref(), c, cursor)?;

                if c == '+' {
                    let operand = out[start..].to_vec();
                    out.extend(operand);
                    out.push(Unit::Char('*'));
                } else {
                    out.insert(start, Unit::Char('('));
                    out.extend([Unit::Char('|'), Unit::Char('ε'), Unit::Char(')')]);
                }

                last_rewrite = Some(start..out.len());
                cursor += 1;
            }
            _ => {
                out.push(Unit::Char(c));
                cursor += 1;
            }
        }
    }

    let normalized: String = out
        .into_iter()
        .flat_map(|unit| match unit {
            Unit::Char(c) => vec![c],
            Unit::Escaped(c) => vec!['\\', c],
        })
        .collect();

    tracing::trace!(regex, normalized = normalized.as_str(), "normalized pattern");

    Ok(normalized)
}

/// Locates the first unit of the operand ending at the end of `units`.
fn operand_start(
    units: &[Unit],
    last_rewrite: Option<&Range<usize>>,
    operator: char,
    position: usize,
) -> Result<usize, CompileError> {
    let mut end = units.len();

    // a starred operand extends back through each `*` to the starred unit.
    loop {
        if let Some(rewrite) = last_rewrite.filter(|rewrite| rewrite.end == end) {
            return Ok(rewrite.start);
        }

        match end.checked_sub(1).map(|idx| units[idx]) {
            Some(Unit::Char('*')) => end -= 1,
            _ => break,
        }
    }

    match end.checked_sub(1).map(|idx| (idx, units[idx])) {
        None | Some((_, Unit::Char('(' | '|' | '.'))) => {
            Err(CompileError::InvalidPostfixOperatorPlacement { operator, position })
        }
        Some((close, Unit::Char(')'))) => matching_open_paren(units, close)
            .ok_or(CompileError::UnbalancedParentheses { position }),
        Some((idx, _)) => Ok(idx),
    }
}

/// Scans left from a closing paren, returning the index of its match.
fn matching_open_paren(units: &[Unit], close: usize) -> Option<usize> {
    let mut depth = 0usize;

    for idx in (0..=close).rev() {
        match units[idx] {
            Unit::Char(')') => depth += 1,
            Unit::Char('(') => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => (),
        }
    }

    None
}

/// Expands the class opened at `open`, returning its members in first-seen
/// order along with the index following the closing `]`.
fn character_class(input: &[char], open: usize) -> Result<(Vec<char>, usize), CompileError> {
    let unterminated = || CompileError::UnterminatedCharacterClass { position: open };
    let mut members = vec![];
    let mut cursor = open + 1;

    loop {
        match input.get(cursor) {
            None => return Err(unterminated()),
            Some(']') => break,
            Some(_) => {
                let (lower, next) = class_item(input, cursor).ok_or_else(unterminated)?;

                match (input.get(next), input.get(next + 1)) {
                    (Some('-'), Some(&upper)) if upper != ']' => {
                        let (upper, after) =
                            class_item(input, next + 1).ok_or_else(unterminated)?;
                        if lower > upper {
                            return Err(CompileError::InvalidCharacterRange {
                                start: lower,
                                end: upper,
                            });
                        }

                        members.extend(lower..=upper);
                        cursor = after;
                    }
                    _ => {
                        members.push(lower);
                        cursor = next;
                    }
                }
            }
        }
    }

    if members.is_empty() {
        Err(CompileError::EmptyCharacterClass { position: open })
    } else {
        Ok((members, cursor + 1))
    }
}

fn class_item(input: &[char], cursor: usize) -> Option<(char, usize)> {
    match *input.get(cursor)? {
        '\\' => input.get(cursor + 1).map(|&escaped| (escaped, cursor + 2)),
        c => Some((c, cursor + 1)),
    }
}
