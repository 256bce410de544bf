//! Provides methods and types to facilitate the compilation of an expression
//! tree into an ε-NFA via Thompson's construction.
//!
//! # Example
//!
//! ```
//! use enfa_compiler::ast::AstNode;
//! use enfa_compiler::compiler::{from_ast, SequentialAllocator};
//! use enfa_runtime::*;
//!
//! // approximate to `ab`
//! let ast = AstNode::concat(AstNode::Literal('a'), AstNode::Literal('b'));
//! let nfa = from_ast(&ast, &mut SequentialAllocator::new());
//!
//! assert_eq!(State::from(0), nfa.start());
//! assert_eq!(State::from(3), nfa.accept());
//! assert_eq!(
//!     vec![
//!         Edge::new(State::from(0), Symbol::Char('a'), State::from(1)),
//!         Edge::new(State::from(1), Symbol::Epsilon, State::from(2)),
//!         Edge::new(State::from(2), Symbol::Char('b'), State::from(3)),
//!     ],
//!     nfa.edges()
//! );
//! ```

use enfa_runtime::{Nfa, State, Symbol, TransitionRelation};

use super::ast::AstNode;

/// Issues fresh state identifiers during a single construction.
///
/// Implementations must never return the same state twice over their
/// lifetime.
pub trait StateAllocator {
    fn next_state(&mut self) -> State;
}

/// Issues state ids from a monotonically increasing counter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SequentialAllocator {
    next_id: usize,
}

impl SequentialAllocator {
    /// Instantiates an allocator issuing ids from `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates an allocator issuing ids from `first_id`.
    #[must_use]
    pub fn starting_at(first_id: usize) -> Self {
        Self { next_id: first_id }
    }

    /// Returns the number of states issued so far.
    pub fn issued(&self) -> usize {
        self.next_id
    }
}

impl StateAllocator for SequentialAllocator {
    fn next_state(&mut self) -> State {
        let state = State::from(self.next_id);
        self.next_id += 1;
        state
    }
}

/// Compiles an expression tree into an automaton with its own allocator, so
/// independent compilations never share a counter.
pub fn compile(ast: &AstNode) -> Nfa {
    let mut allocator = SequentialAllocator::new();
    let nfa = from_ast(ast, &mut allocator);

    tracing::debug!(
        states = allocator.issued(),
        transitions = nfa.transitions().len(),
        "constructed automaton"
    );

    nfa
}

/// Builds the fragment for a node, drawing every new state from `allocator`.
pub fn from_ast<A: StateAllocator + ?Sized>(node: &AstNode, allocator: &mut A) -> Nfa {
    match node {
        AstNode::Literal(c) => symbol(Symbol::Char(*c), allocator),
        AstNode::Epsilon => symbol(Symbol::Epsilon, allocator),
        AstNode::Concat(left, right) => {
            let left = from_ast(left, allocator);
            let right = from_ast(right, allocator);
            concat(left, right)
        }
        AstNode::Union(left, right) => {
            let left = from_ast(left, allocator);
            let right = from_ast(right, allocator);
            union(left, right, allocator)
        }
        AstNode::Star(child) => {
            let child = from_ast(child, allocator);
            star(child, allocator)
        }
    }
}

/// `s0 --sym--> s1`
fn symbol<A: StateAllocator + ?Sized>(sym: Symbol, allocator: &mut A) -> Nfa {
    let (start, accept) = (allocator.next_state(), allocator.next_state());

    let mut delta = TransitionRelation::default();
    delta.add(start, sym, accept);

    Nfa::new(start, accept, delta)
}

/// Links the accept state of `left` to the start of `right`.
fn concat(left: Nfa, right: Nfa) -> Nfa {
    let (start, left_accept, mut delta) = left.into_parts();
    let (right_start, accept, right_delta) = right.into_parts();

    delta.extend(right_delta);
    delta.add_epsilon(left_accept, right_start);

    Nfa::new(start, accept, delta)
}

fn union<A: StateAllocator + ?Sized>(left: Nfa, right: Nfa, allocator: &mut A) -> Nfa {
    let (start, accept) = (allocator.next_state(), allocator.next_state());
    let (left_start, left_accept, mut delta) = left.into_parts();
    let (right_start, right_accept, right_delta) = right.into_parts();

    delta.extend(right_delta);
    delta.add_epsilon(start, left_start);
    delta.add_epsilon(start, right_start);
    delta.add_epsilon(left_accept, accept);
    delta.add_epsilon(right_accept, accept);

    Nfa::new(start, accept, delta)
}

fn star<A: StateAllocator + ?Sized>(child: Nfa, allocator: &mut A) -> Nfa {
    let (start, accept) = (allocator.next_state(), allocator.next_state());
    let (child_start, child_accept, mut delta) = child.into_parts();

    delta.add_epsilon(start, accept);
    delta.add_epsilon(start, child_start);
    delta.add_epsilon(child_accept, accept);
    delta.add_epsilon(child_accept, child_start);

    Nfa::new(start, accept, delta)
}
