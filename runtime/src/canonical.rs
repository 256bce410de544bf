//! Relabels the states of an automaton into a contiguous `0..k` range.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{Edge, Nfa, State, TransitionRelation};

/// The order in which states are assigned their new ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Renumbering {
    /// The start state is assigned `0`, every remaining state follows in
    /// ascending order of its original id.
    SortedById,
    /// States are assigned ids in breadth-first discovery order from the start
    /// state. Unreachable states are dropped.
    #[default]
    Reachability,
}

/// Returns a new automaton with the same topology as `nfa` but with its
/// states remapped to `0..k`. The start state always maps to `0`.
///
/// # Example
///
/// ```
/// use enfa_runtime::*;
///
/// let mut delta = TransitionRelation::default();
/// delta.add(State::from(10), Symbol::Char('a'), State::from(4));
/// let nfa = Nfa::new(State::from(10), State::from(4), delta);
///
/// let renumbered = renumber(&nfa, Renumbering::Reachability);
///
/// assert_eq!(State::from(0), renumbered.start());
/// assert_eq!(State::from(1), renumbered.accept());
/// assert!(accepts(&renumbered, "a"));
/// ```
pub fn renumber(nfa: &Nfa, ordering: Renumbering) -> Nfa {
    let order = match ordering {
        Renumbering::SortedById => sorted_order(nfa),
        Renumbering::Reachability => reachability_order(nfa),
    };

    let mapping: BTreeMap<State, State> = order
        .iter()
        .enumerate()
        .map(|(new_id, &old)| (old, State::from(new_id)))
        .collect();

    tracing::debug!(?ordering, states = mapping.len(), "renumbering automaton");

    // edges touching a dropped state are discarded along with it.
    let delta: TransitionRelation = nfa
        .edges()
        .into_iter()
        .filter_map(|Edge { src, symbol, dest }| {
            let src = mapping.get(&src)?;
            let dest = mapping.get(&dest)?;
            Some(Edge::new(*src, symbol, *dest))
        })
        .collect();

    Nfa::new(mapping[&nfa.start()], mapping[&nfa.accept()], delta)
}

fn sorted_order(nfa: &Nfa) -> Vec<State> {
    let start = nfa.start();

    std::iter::once(start)
        .chain(nfa.states().into_iter().filter(|&state| state != start))
        .collect()
}

fn reachability_order(nfa: &Nfa) -> Vec<State> {
    let start = nfa.start();
    let mut order = vec![];
    let mut seen: BTreeSet<State> = [start].into_iter().collect();
    let mut queue: VecDeque<State> = [start].into_iter().collect();

    while let Some(state) = queue.pop_front() {
        order.push(state);

        let successors = nfa
            .transitions()
            .outgoing(state)
            .into_iter()
            .flat_map(|by_symbol| by_symbol.values())
            .flatten();

        for &next in successors {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    // an unreachable accept state is kept so the result stays well-formed.
    if !seen.contains(&nfa.accept()) {
        order.push(nfa.accept());
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accepts, Symbol};

    /// `a|b` as built by thompson's construction with a sequential counter,
    /// with a dangling unreachable state `q9`.
    fn union_with_unreachable_state() -> Nfa {
        let delta = [
            Edge::new(State::from(4), Symbol::Epsilon, State::from(0)),
            Edge::new(State::from(4), Symbol::Epsilon, State::from(2)),
            Edge::new(State::from(0), Symbol::Char('a'), State::from(1)),
            Edge::new(State::from(2), Symbol::Char('b'), State::from(3)),
            Edge::new(State::from(1), Symbol::Epsilon, State::from(5)),
            Edge::new(State::from(3), Symbol::Epsilon, State::from(5)),
            Edge::new(State::from(9), Symbol::Char('c'), State::from(5)),
        ]
        .into_iter()
        .collect();

        Nfa::new(State::from(4), State::from(5), delta)
    }

    #[test]
    fn should_assign_zero_to_start_under_both_orderings() {
        let nfa = union_with_unreachable_state();

        for ordering in [Renumbering::SortedById, Renumbering::Reachability] {
            let renumbered = renumber(&nfa, ordering);
            assert_eq!((ordering, State::from(0)), (ordering, renumbered.start()));
        }
    }

    #[test]
    fn should_keep_unreachable_states_when_sorted_by_id() {
        let nfa = union_with_unreachable_state();
        let renumbered = renumber(&nfa, Renumbering::SortedById);

        // q4 -> 0, then q0 q1 q2 q3 q5 q9 -> 1..=6
        assert_eq!(7, renumbered.states().len());
        assert_eq!(State::from(5), renumbered.accept());
        assert_eq!(
            Some(
                &[State::from(1), State::from(3)]
                    .into_iter()
                    .collect::<BTreeSet<_>>()
            ),
            renumbered
                .transitions()
                .destinations(State::from(0), Symbol::Epsilon)
        );
    }

    #[test]
    fn should_drop_unreachable_states_in_reachability_order() {
        let nfa = union_with_unreachable_state();
        let renumbered = renumber(&nfa, Renumbering::Reachability);

        let expected: Vec<Edge> = [
            Edge::new(State::from(0), Symbol::Epsilon, State::from(1)),
            Edge::new(State::from(0), Symbol::Epsilon, State::from(2)),
            Edge::new(State::from(1), Symbol::Char('a'), State::from(3)),
            Edge::new(State::from(2), Symbol::Char('b'), State::from(4)),
            Edge::new(State::from(3), Symbol::Epsilon, State::from(5)),
            Edge::new(State::from(4), Symbol::Epsilon, State::from(5)),
        ]
        .into_iter()
        .collect();

        assert_eq!(expected, renumbered.edges());
        assert_eq!(State::from(5), renumbered.accept());
        assert_eq!(6, renumbered.states().len());
    }

    #[test]
    fn should_yield_same_labels_for_shifted_ids() {
        let nfa = union_with_unreachable_state();
        let shifted_delta = nfa
            .edges()
            .into_iter()
            .map(|Edge { src, symbol, dest }| {
                Edge::new(
                    State::from(src.id() + 100),
                    symbol,
                    State::from(dest.id() + 100),
                )
            })
            .collect();
        let shifted = Nfa::new(State::from(104), State::from(105), shifted_delta);

        assert_eq!(
            renumber(&nfa, Renumbering::Reachability),
            renumber(&shifted, Renumbering::Reachability)
        );
    }

    #[test]
    fn should_preserve_acceptance_after_renumbering() {
        let nfa = union_with_unreachable_state();

        for ordering in [Renumbering::SortedById, Renumbering::Reachability] {
            let renumbered = renumber(&nfa, ordering);
            for input in ["a", "b", "", "ab", "c"] {
                assert_eq!(
                    (ordering, input, accepts(&nfa, input)),
                    (ordering, input, accepts(&renumbered, input))
                );
            }
        }
    }

    #[test]
    fn should_keep_unreachable_accept_state_last() {
        let mut delta = TransitionRelation::default();
        delta.add(State::from(3), Symbol::Char('a'), State::from(4));
        let nfa = Nfa::new(State::from(3), State::from(8), delta);

        let renumbered = renumber(&nfa, Renumbering::Reachability);

        assert_eq!(State::from(2), renumbered.accept());
        assert!(!accepts(&renumbered, "a"));
    }
}
