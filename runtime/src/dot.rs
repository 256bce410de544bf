//! Graphviz export of an automaton's transition relation.

use std::fmt::Write;

use crate::{Edge, Nfa};

pub(crate) fn to_dot(nfa: &Nfa) -> String {
    let mut out = String::new();

    // writes to a String are infallible.
    let _ = write_dot(&mut out, nfa);
    out
}

fn write_dot<W: Write>(w: &mut W, nfa: &Nfa) -> std::fmt::Result {
    writeln!(w, "digraph G {{")?;
    writeln!(w, "\trankdir=LR;")?;
    writeln!(w, "\tstart [shape=none, label=\"\", width=0, height=0];")?;
    for state in nfa.states() {
        let shape = if state == nfa.accept() {
            "doublecircle"
        } else {
            "circle"
        };
        writeln!(w, "\t\"{}\" [shape={}];", state, shape)?;
    }
    writeln!(w, "\tstart -> \"{}\";", nfa.start())?;

    for Edge { src, symbol, dest } in nfa.edges() {
        writeln!(
            w,
            "\t\"{}\" -> \"{}\" [label=\"{}\"];",
            src,
            dest,
            escape_label(&symbol.to_string())
        )?;
    }

    writeln!(w, "}}")
}

fn escape_label(label: &str) -> String {
    label
        .chars()
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect()
}
