//! Provides the ε-NFA representation shared by the compiler and the
//! simulation routines used to evaluate an input against it.
//!
//! # Example
//!
//! ```rust
//! use enfa_runtime::*;
//!
//! // approximate to `ab*`
//! let mut delta = TransitionRelation::default();
//! delta.add(State::from(0), Symbol::Char('a'), State::from(1));
//! delta.add_epsilon(State::from(1), State::from(2));
//! delta.add(State::from(2), Symbol::Char('b'), State::from(2));
//!
//! let nfa = Nfa::new(State::from(0), State::from(2), delta);
//!
//! assert!(accepts(&nfa, "a"));
//! assert!(accepts(&nfa, "abbb"));
//! assert!(!accepts(&nfa, "ba"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

mod canonical;
mod dot;
pub mod matcher;

pub use canonical::{renumber, Renumbering};
use matcher::{PatternEvaluatorMut, Simulation};

/// An opaque automaton state, identified only by its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

impl State {
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn id(&self) -> usize {
        self.0
    }
}

impl From<usize> for State {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A transition label, either a single character or the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A single labeled edge of a transition relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub src: State,
    pub symbol: Symbol,
    pub dest: State,
}

impl Edge {
    pub const fn new(src: State, symbol: Symbol, dest: State) -> Self {
        Self { src, symbol, dest }
    }
}

impl From<Edge> for (State, Symbol, State) {
    fn from(edge: Edge) -> Self {
        (edge.src, edge.symbol, edge.dest)
    }
}

/// Maps a state and symbol to every state reachable over that symbol.
///
/// Missing keys signify that no transition exists. Ordered collections are
/// used throughout so that every traversal of the relation is deterministic.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TransitionRelation {
    delta: BTreeMap<State, BTreeMap<Symbol, BTreeSet<State>>>,
}

impl TransitionRelation {
    /// Inserts a transition, returning `true` if it was not already defined.
    pub fn add(&mut self, src: State, symbol: Symbol, dest: State) -> bool {
        self.delta
            .entry(src)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(dest)
    }

    /// Inserts an ε-transition.
    pub fn add_epsilon(&mut self, src: State, dest: State) -> bool {
        self.add(src, Symbol::Epsilon, dest)
    }

    /// Returns all destinations for a state over a symbol, if any.
    pub fn destinations(&self, src: State, symbol: Symbol) -> Option<&BTreeSet<State>> {
        self.delta.get(&src).and_then(|by_symbol| by_symbol.get(&symbol))
    }

    /// Returns every outgoing transition of a state keyed by symbol.
    pub fn outgoing(&self, src: State) -> Option<&BTreeMap<Symbol, BTreeSet<State>>> {
        self.delta.get(&src)
    }

    /// Moves every transition of `other` into this relation.
    pub fn extend(&mut self, other: TransitionRelation) {
        for (src, by_symbol) in other.delta {
            let entry = self.delta.entry(src).or_default();
            for (symbol, dests) in by_symbol {
                entry.entry(symbol).or_default().extend(dests);
            }
        }
    }

    /// Returns every state appearing as either a source or destination.
    pub fn states(&self) -> BTreeSet<State> {
        self.edges()
            .into_iter()
            .flat_map(|edge| [edge.src, edge.dest])
            .collect()
    }

    /// Flattens the relation into an ordered edge list.
    pub fn edges(&self) -> Vec<Edge> {
        self.delta
            .iter()
            .flat_map(|(&src, by_symbol)| {
                by_symbol.iter().flat_map(move |(&symbol, dests)| {
                    dests.iter().map(move |&dest| Edge::new(src, symbol, dest))
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.delta
            .values()
            .flat_map(|by_symbol| by_symbol.values())
            .map(BTreeSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Edge> for TransitionRelation {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut delta = Self::default();
        for Edge { src, symbol, dest } in iter {
            delta.add(src, symbol, dest);
        }
        delta
    }
}

/// An ε-NFA fragment with exactly one start and one accept state.
///
/// A completed automaton is itself an `Nfa`, there is no separate compiled
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    start: State,
    accept: State,
    delta: TransitionRelation,
}

impl Nfa {
    #[must_use]
    pub fn new(start: State, accept: State, delta: TransitionRelation) -> Self {
        Self {
            start,
            accept,
            delta,
        }
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn accept(&self) -> State {
        self.accept
    }

    pub fn transitions(&self) -> &TransitionRelation {
        &self.delta
    }

    /// Decomposes the automaton into its start, accept and owned relation.
    pub fn into_parts(self) -> (State, State, TransitionRelation) {
        (self.start, self.accept, self.delta)
    }

    /// Returns every state referenced by the automaton, including a start or
    /// accept state with no transitions.
    pub fn states(&self) -> BTreeSet<State> {
        let mut states = self.delta.states();
        states.insert(self.start);
        states.insert(self.accept);
        states
    }

    /// Returns all non-ε symbols used by the automaton.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.delta
            .edges()
            .into_iter()
            .filter_map(|edge| match edge.symbol {
                Symbol::Char(c) => Some(c),
                Symbol::Epsilon => None,
            })
            .collect()
    }

    /// Exposes the relation as an ordered `(source, symbol, destination)`
    /// edge list for external consumers.
    pub fn edges(&self) -> Vec<Edge> {
        self.delta.edges()
    }

    /// Renders the automaton as a graphviz digraph.
    pub fn to_dot(&self) -> String {
        dot::to_dot(self)
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start:  {}", self.start)?;
        writeln!(f, "accept: {}", self.accept)?;
        for Edge { src, symbol, dest } in self.edges() {
            writeln!(f, "{} -{}-> {}", src, symbol, dest)?
        }

        Ok(())
    }
}

/// Returns the smallest superset of `states` closed under ε-transitions.
pub fn epsilon_closure(nfa: &Nfa, states: &BTreeSet<State>) -> BTreeSet<State> {
    let mut closure = states.clone();
    let mut worklist: Vec<State> = states.iter().copied().collect();

    while let Some(state) = worklist.pop() {
        let reachable = nfa
            .delta
            .destinations(state, Symbol::Epsilon)
            .into_iter()
            .flatten();

        for &next in reachable {
            if closure.insert(next) {
                worklist.push(next);
            }
        }
    }

    closure
}

/// Returns the union of all destinations reachable from `states` by
/// consuming `c`.
pub fn r#move(nfa: &Nfa, states: &BTreeSet<State>, c: char) -> BTreeSet<State> {
    states
        .iter()
        .filter_map(|&state| nfa.delta.destinations(state, Symbol::Char(c)))
        .flatten()
        .copied()
        .collect()
}

/// Evaluates a word against an automaton, returning `true` if the accept
/// state is in the frontier once the entire input has been consumed.
///
/// # Example
///
/// ```
/// use enfa_runtime::*;
///
/// // approximate to `a|b`
/// let delta = [
///     Edge::new(State::from(4), Symbol::Epsilon, State::from(0)),
///     Edge::new(State::from(4), Symbol::Epsilon, State::from(2)),
///     Edge::new(State::from(0), Symbol::Char('a'), State::from(1)),
///     Edge::new(State::from(2), Symbol::Char('b'), State::from(3)),
///     Edge::new(State::from(1), Symbol::Epsilon, State::from(5)),
///     Edge::new(State::from(3), Symbol::Epsilon, State::from(5)),
/// ]
/// .into_iter()
/// .collect();
/// let nfa = Nfa::new(State::from(4), State::from(5), delta);
///
/// assert!(accepts(&nfa, "a"));
/// assert!(accepts(&nfa, "b"));
/// assert!(!accepts(&nfa, "ab"));
/// assert!(!accepts(&nfa, ""));
/// ```
pub fn accepts(nfa: &Nfa, word: &str) -> bool {
    Simulation::new(nfa).matches(word.chars())
}
