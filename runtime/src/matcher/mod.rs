use std::collections::BTreeSet;

use crate::{epsilon_closure, r#move, Nfa, State};

/// An incremental evaluator that consumes its input one item at a time.
pub trait PatternEvaluatorMut: Sized {
    /// The input interable type to be compared.
    type Item;

    fn initial_state(mut self) -> Self {
        self.initial_state_mut();
        self
    }

    /// Resets the evaluator to its initial state.
    fn initial_state_mut(&mut self);

    /// Returns a boolean signifying if the match is in a final state.
    fn is_in_accept_state(&self) -> bool;

    /// Attempts to advance to the next state, returning an [Option] signifying
    /// the success of that advance.
    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item>;

    fn matches<I>(&mut self, iter: I) -> bool
    where
        I: Iterator<Item = Self::Item>,
    {
        iter.fold(self.is_in_accept_state(), |_, item| {
            self.advance_mut(&item);

            self.is_in_accept_state()
        })
    }
}

/// Simulates an [Nfa] directly by tracking the full set of states it could
/// occupy after each consumed character.
///
/// # Examples
///
/// ```
/// use enfa_runtime::*;
/// use enfa_runtime::matcher::*;
///
/// let mut delta = TransitionRelation::default();
/// delta.add(State::from(0), Symbol::Char('a'), State::from(1));
/// let nfa = Nfa::new(State::from(0), State::from(1), delta);
///
/// let mut sim = Simulation::new(&nfa);
///
/// // Advances one character that matches the expected literal.
/// assert_eq!(Some(&'a'), sim.advance_mut(&'a'));
/// assert!(sim.is_in_accept_state());
///
/// // Fails to match 'b'.
/// sim.initial_state_mut();
/// assert!(sim.advance_mut(&'b').is_none());
/// assert!(!sim.is_in_accept_state());
///
/// sim.initial_state_mut();
/// assert!(sim.matches("a".chars()));
///
/// sim.initial_state_mut();
/// assert!(!sim.matches("ab".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    nfa: &'a Nfa,
    frontier: BTreeSet<State>,
}

impl<'a> Simulation<'a> {
    #[must_use]
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            frontier: Self::initial_frontier(nfa),
        }
    }

    fn initial_frontier(nfa: &Nfa) -> BTreeSet<State> {
        epsilon_closure(nfa, &[nfa.start()].into_iter().collect())
    }

    /// Returns the states currently occupied by the simulation.
    pub fn frontier(&self) -> &BTreeSet<State> {
        &self.frontier
    }
}

impl<'a> PatternEvaluatorMut for Simulation<'a> {
    type Item = char;

    fn initial_state_mut(&mut self) {
        self.frontier = Self::initial_frontier(self.nfa);
    }

    fn is_in_accept_state(&self) -> bool {
        self.frontier.contains(&self.nfa.accept())
    }

    fn advance_mut<'b>(&mut self, next: &'b Self::Item) -> Option<&'b Self::Item> {
        let moved = r#move(self.nfa, &self.frontier, *next);
        self.frontier = epsilon_closure(self.nfa, &moved);

        tracing::trace!(input = %next, frontier = ?self.frontier, "advanced simulation");

        (!self.frontier.is_empty()).then_some(next)
    }
}
