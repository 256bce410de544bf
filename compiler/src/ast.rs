use crate::parser::Token;
use crate::CompileError;

/// A node of a regular expression tree. Children are exclusively owned by
/// their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Literal(char),
    Epsilon,
    Union(Box<AstNode>, Box<AstNode>),
    Concat(Box<AstNode>, Box<AstNode>),
    Star(Box<AstNode>),
}

impl AstNode {
    pub fn union(left: AstNode, right: AstNode) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    pub fn concat(left: AstNode, right: AstNode) -> Self {
        Self::Concat(Box::new(left), Box::new(right))
    }

    pub fn star(child: AstNode) -> Self {
        Self::Star(Box::new(child))
    }
}

/// Renders the tree in prefix form, i.e. `(. a (* b))` for `ab*`.
impl std::fmt::Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstNode::Literal(c) => write!(f, "{}", Token::Literal(*c)),
            AstNode::Epsilon => write!(f, "ε"),
            AstNode::Union(left, right) => write!(f, "(| {} {})", left, right),
            AstNode::Concat(left, right) => write!(f, "(. {} {})", left, right),
            AstNode::Star(child) => write!(f, "(* {})", child),
        }
    }
}

/// Evaluates a postfix token sequence into a single expression tree.
///
/// # Example
///
/// ```
/// use enfa_compiler::ast::{build_ast, AstNode};
/// use enfa_compiler::parser::Token;
///
/// // `ab*.`
/// let postfix = [Token::Literal('a'), Token::Literal('b'), Token::Star, Token::Concat];
///
/// assert_eq!(
///     Ok(AstNode::concat(
///         AstNode::Literal('a'),
///         AstNode::star(AstNode::Literal('b'))
///     )),
///     build_ast(&postfix)
/// );
/// ```
pub fn build_ast(postfix: &[Token]) -> Result<AstNode, CompileError> {
    let mut stack: Vec<AstNode> = Vec::with_capacity(postfix.len());

    for (position, &token) in postfix.iter().enumerate() {
        let node = match token {
            Token::Literal(c) => AstNode::Literal(c),
            Token::Epsilon => AstNode::Epsilon,
            Token::Star => AstNode::star(pop_operand(&mut stack, token, position)?),
            Token::Union | Token::Concat => {
                // the right operand sits on top of the stack.
                let right = pop_operand(&mut stack, token, position)?;
                let left = pop_operand(&mut stack, token, position)?;

                if token == Token::Union {
                    AstNode::union(left, right)
                } else {
                    AstNode::concat(left, right)
                }
            }
            Token::OpenParen | Token::CloseParen => {
                return Err(CompileError::MalformedExpression(format!(
                    "unexpected '{}' at position {} in postfix expression",
                    token, position
                )))
            }
        };

        stack.push(node);
    }

    match (stack.pop(), stack.len()) {
        (Some(root), 0) => Ok(root),
        (None, _) => Err(CompileError::MalformedExpression(
            "empty expression".to_string(),
        )),
        (Some(_), remaining) => Err(CompileError::MalformedExpression(format!(
            "{} operands left without an operator",
            remaining + 1
        ))),
    }
}

fn pop_operand(
    stack: &mut Vec<AstNode>,
    operator: Token,
    position: usize,
) -> Result<AstNode, CompileError> {
    stack.pop().ok_or_else(|| {
        CompileError::MalformedExpression(format!(
            "operator '{}' at position {} is missing an operand",
            operator, position
        ))
    })
}
