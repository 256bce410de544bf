use enfa_compiler::*;
use enfa_runtime::*;

/// Compiles each pattern and checks every listed input against its expected
/// outcome.
fn assert_acceptance(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let nfa = compile_pattern(pattern).expect("pattern should compile");

    for &input in accepted {
        assert_eq!((pattern, input, true), (pattern, input, accepts(&nfa, input)));
    }
    for &input in rejected {
        assert_eq!((pattern, input, false), (pattern, input, accepts(&nfa, input)));
    }
}

#[test]
fn should_accept_one_or_more_of_a_literal() {
    for c in ['a', 'x', '7'] {
        let pattern = format!("{c}+");
        assert_eq!(Ok(format!("{c}{c}*")), normalize(&pattern));

        let once = c.to_string();
        let twice = once.repeat(2);
        let thrice = once.repeat(3);
        assert_acceptance(
            &pattern,
            &[once.as_str(), twice.as_str(), thrice.as_str()],
            &[""],
        );
    }
}

#[test]
fn should_accept_empty_string_for_optional_expressions() {
    let input_output = [
        ("a?", "a", "(a|ε)"),
        ("(ab)?", "ab", "((ab)|ε)"),
        ("(a|b)?", "b", "((a|b)|ε)"),
    ];

    for (pattern, sub_match, expected_normalized) in input_output {
        assert_eq!(Ok(expected_normalized.to_string()), normalize(pattern));
        assert_acceptance(pattern, &["", sub_match], &["abc"]);
    }
}

#[test]
fn should_accept_concatenation_with_trailing_star() {
    let tokens = add_explicit_concat("a.b*").unwrap();
    let postfix = infix_to_postfix(&tokens).unwrap();
    assert_eq!("ab*.", postfix_string(&postfix));

    assert_acceptance("a.b*", &["a", "ab", "abbb"], &["", "b", "ba"]);
}

#[test]
fn should_accept_either_side_of_a_union() {
    assert_acceptance("a|b", &["a", "b"], &["ab", ""]);
}

#[test]
fn should_accept_repeated_groups() {
    assert_eq!(Ok("(ab)(ab)*".to_string()), normalize("(ab)+"));
    assert_acceptance("(ab)+", &["ab", "abab"], &["a", "aba", ""]);
}

#[test]
fn should_accept_expanded_character_classes() {
    assert_eq!(Ok("(a|b|c)".to_string()), normalize("[a-c]"));
    assert_eq!(Ok("(a|b)c".to_string()), normalize("[ab]c"));
    assert_acceptance("[ab]c", &["ac", "bc"], &["c", "abc"]);
}

#[test]
fn should_accept_chained_quantifiers() {
    assert_acceptance("(ab)+?", &["", "ab", "abab"], &["a", "aba"]);
    assert_acceptance("x[0-9]+y?", &["x0", "x42y", "x9y"], &["x", "xy", "x1yy"]);
}

#[test]
fn should_match_escaped_operators_literally() {
    assert_acceptance("a\\+", &["a+"], &["a", "aa"]);
    assert_acceptance("\\(a\\)*", &["(a", "(a)", "(a))"], &["(", "a", "()"]);
    assert_acceptance("[+*]", &["+", "*"], &["", "++"]);
}

#[test]
fn should_accept_alternation_of_words() {
    assert_acceptance(
        "(com|net)(\\.(gt|cr))?",
        &["com", "net", "com.gt", "net.cr"],
        &["org", "com.", "comgt"],
    );
}

#[test]
fn should_produce_a_single_root_and_a_single_start_and_accept() {
    for pattern in ["a", "a.b*", "(a|b)*c", "((ab)(ab)*|ε)", "a|ε"] {
        let compilation = Compiler::default().compile_traced(pattern).unwrap();
        let nfa = &compilation.nfa;

        // the accept state is a sink and reachable from the start state.
        assert!(nfa.transitions().outgoing(nfa.accept()).is_none());
        let reachable = renumber(nfa, Renumbering::Reachability);
        assert_eq!(nfa.states().len(), reachable.states().len());
    }
}

#[test]
fn should_reject_malformed_patterns() {
    for pattern in ["(a", "a)", "a|", "*a", "+", "[b-a]", "[ab", "()", "a\\"] {
        assert!(compile_pattern(pattern).is_err(), "{}", pattern);
    }
}
