//! Provides for the normalization, parsing and compilation of a regex pattern
//! into an ε-NFA that can be simulated directly.
//!
//! # Example
//!
//! ```rust
//! // Compilation of a pattern into an automaton is accomplished by a single
//! // function exposed in the `enfa_compiler` crate.
//! use enfa_compiler::compile_pattern;
//!
//! // Evaluating a given input against an automaton is accomplished via a
//! // single exposed function in the `enfa_runtime` crate.
//! use enfa_runtime::accepts;
//!
//! // Extended operators are desugared before parsing, `(ab)+` is compiled as
//! // `(ab)(ab)*`.
//! let nfa = compile_pattern("(ab)+").expect("failed to compile");
//!
//! // The entire input must be consumed for a word to be accepted.
//! assert!(accepts(&nfa, "ab"));
//! assert!(accepts(&nfa, "abab"));
//! assert!(!accepts(&nfa, "aba"));
//! ```

pub mod ast;
pub mod compiler;
mod error;
mod normalizer;
pub mod parser;

use enfa_runtime::{renumber, Nfa, Renumbering};

pub use ast::{build_ast, AstNode};
pub use compiler::{compile, from_ast, SequentialAllocator, StateAllocator};
pub use error::CompileError;
pub use normalizer::normalize;
pub use parser::{add_explicit_concat, infix_to_postfix, postfix_string, Token};

/// Every intermediate product of compiling a single pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub pattern: String,
    pub normalized: String,
    pub tokens: Vec<Token>,
    pub postfix: Vec<Token>,
    pub ast: AstNode,
    pub nfa: Nfa,
}

impl std::fmt::Display for Compilation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Original : {}", self.pattern)?;
        writeln!(f, "Normal   : {}", self.normalized)?;
        writeln!(f, "Tokens   : {}", postfix_string(&self.tokens))?;
        writeln!(f, "Postfix  : {}", postfix_string(&self.postfix))?;
        writeln!(f, "Tree     : {}", self.ast)?;
        write!(f, "{}", self.nfa)
    }
}

/// Configures how patterns are compiled.
///
/// # Example
///
/// ```
/// use enfa_compiler::Compiler;
/// use enfa_runtime::{accepts, Renumbering, State};
///
/// let compiler = Compiler::default().with_renumbering(Some(Renumbering::Reachability));
/// let nfa = compiler.compile("a|b").unwrap();
///
/// assert_eq!(State::from(0), nfa.start());
/// assert!(accepts(&nfa, "b"));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    renumbering: Option<Renumbering>,
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordering applied to the constructed automaton's states. `None`
    /// keeps the ids assigned during construction.
    #[must_use]
    pub fn with_renumbering(mut self, renumbering: Option<Renumbering>) -> Self {
        self.renumbering = renumbering;
        self
    }

    pub fn renumbering(&self) -> Option<Renumbering> {
        self.renumbering
    }

    /// Compiles a pattern into an automaton.
    pub fn compile(&self, pattern: &str) -> Result<Nfa, CompileError> {
        self.compile_traced(pattern).map(|compilation| compilation.nfa)
    }

    /// Compiles a pattern, retaining the output of every stage.
    pub fn compile_traced(&self, pattern: &str) -> Result<Compilation, CompileError> {
        let span = tracing::debug_span!("compile", pattern);
        let _enter = span.enter();

        let normalized = normalize(pattern)?;
        let tokens = add_explicit_concat(&normalized)?;
        let postfix = infix_to_postfix(&tokens)?;
        tracing::debug!(
            normalized = normalized.as_str(),
            postfix = %postfix_string(&postfix),
            "parsed pattern"
        );

        let ast = build_ast(&postfix)?;
        let nfa = compile(&ast);
        let nfa = match self.renumbering {
            Some(ordering) => renumber(&nfa, ordering),
            None => nfa,
        };

        Ok(Compilation {
            pattern: pattern.to_string(),
            normalized,
            tokens,
            postfix,
            ast,
            nfa,
        })
    }

    /// Compiles each pattern independently, each with its own state counter.
    pub fn compile_many<S: AsRef<str>>(&self, patterns: &[S]) -> Vec<Result<Nfa, CompileError>> {
        patterns
            .iter()
            .map(|pattern| self.compile(pattern.as_ref()))
            .collect()
    }
}

/// Compiles a pattern into an automaton with construction-order state ids.
pub fn compile_pattern(pattern: &str) -> Result<Nfa, CompileError> {
    Compiler::default().compile(pattern)
}
