use enfa_compiler::*;
use enfa_runtime::*;

const PATTERNS: [&str; 5] = ["a.b*", "a|b", "(ab)+", "[ab]c", "(a|b)*abb"];
const INPUTS: [&str; 10] = ["", "a", "b", "ab", "abb", "abab", "ac", "bc", "aabb", "ba"];

#[test]
fn should_preserve_acceptance_across_renumberings() {
    for pattern in PATTERNS {
        let nfa = compile_pattern(pattern).unwrap();

        for ordering in [Renumbering::SortedById, Renumbering::Reachability] {
            let renumbered = renumber(&nfa, ordering);
            assert_eq!(State::from(0), renumbered.start());

            for input in INPUTS {
                assert_eq!(
                    (pattern, ordering, input, accepts(&nfa, input)),
                    (pattern, ordering, input, accepts(&renumbered, input))
                );
            }
        }
    }
}

#[test]
fn should_produce_contiguous_ids() {
    for pattern in PATTERNS {
        let nfa = compile_pattern(pattern).unwrap();
        let renumbered = renumber(&nfa, Renumbering::Reachability);

        let expected: Vec<State> = (0..renumbered.states().len()).map(State::from).collect();
        let received: Vec<State> = renumbered.states().into_iter().collect();
        assert_eq!((pattern, expected), (pattern, received));
    }
}

#[test]
fn should_be_independent_of_construction_ids() {
    for pattern in PATTERNS {
        let tokens = add_explicit_concat(&normalize(pattern).unwrap()).unwrap();
        let ast = build_ast(&infix_to_postfix(&tokens).unwrap()).unwrap();

        let from_zero = from_ast(&ast, &mut SequentialAllocator::new());
        let from_offset = from_ast(&ast, &mut SequentialAllocator::starting_at(1000));
        assert_ne!(from_zero, from_offset);

        assert_eq!(
            renumber(&from_zero, Renumbering::Reachability),
            renumber(&from_offset, Renumbering::Reachability)
        );
    }
}

#[test]
fn should_expose_edges_for_rendering() {
    let nfa = Compiler::default()
        .with_renumbering(Some(Renumbering::Reachability))
        .compile("a")
        .unwrap();

    assert_eq!(
        vec![(State::from(0), Symbol::Char('a'), State::from(1))],
        nfa.edges().into_iter().map(Into::into)
            .collect::<Vec<(State, Symbol, State)>>()
    );
    assert!(nfa.to_dot().contains("\"q1\" [shape=doublecircle];"));
}
