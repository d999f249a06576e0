//! Finite automata and a small pattern compiler
//!
//! This library simulates deterministic and non-deterministic finite automata
//! over `char` input, and compiles a five-operator pattern algebra (empty,
//! literal, concatenation, choice, repetition) into non-deterministic automata
//! using Thompson's construction.
//!
//! The pieces, from the bottom up:
//! - [`Rule`]: one edge `state --symbol--> state`, where a missing symbol is an
//!   epsilon (free) move
//! - [`NfaRulebook`] / [`DfaRulebook`]: immutable rule collections
//! - [`Nfa`] / [`Dfa`]: a simulation cursor borrowing a rulebook
//! - [`NfaDesign`] / [`DfaDesign`]: blueprints that build a fresh automaton for
//!   every match request
//! - [`Pattern`]: the pattern tree, which compiles to an [`NfaDesign`] and
//!   renders itself with minimal parentheses
//!
//! ```
//! use finite_automata::Pattern;
//!
//! let pattern = Pattern::repeat(Pattern::choose(
//!     Pattern::concatenate(Pattern::literal('a'), Pattern::literal('b')),
//!     Pattern::literal('a'),
//! ));
//! assert_eq!(pattern.to_string(), "(ab|a)*");
//! assert!(pattern.matches("abaab"));
//! assert!(!pattern.matches("abba"));
//! ```

#[macro_use]
mod macros;

pub mod compiler;
pub mod dfa;
pub mod nfa;
pub mod parse;
pub mod pattern;
pub mod rule;
pub mod state;
pub mod subset;

pub use compiler::Compiler;
pub use dfa::{Dfa, DfaDesign, DfaRulebook};
pub use nfa::{Nfa, NfaDesign, NfaRulebook};
pub use parse::{Config, Parser};
pub use pattern::Pattern;
pub use rule::Rule;
pub use state::{State, StateSet};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// The result type used throughout this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while simulating a deterministic automaton or while
/// parsing pattern syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A deterministic rulebook did not resolve to exactly one rule.
    ///
    /// `candidates` is the number of rules that matched: zero means the
    /// rulebook is incomplete, more than one means it is not deterministic.
    MissingTransition {
        state: State,
        symbol: char,
        candidates: usize,
    },
    /// A deterministic rulebook was given an epsilon rule
    EpsilonRule { state: State },
    /// The pattern text is not valid regex syntax
    Syntax(String),
    /// The pattern text uses something the pattern algebra cannot express
    UnsupportedFeature(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingTransition {
                state,
                symbol,
                candidates: 0,
            } => write!(f, "no transition from state {} on {:?}", state, symbol),
            Error::MissingTransition {
                state,
                symbol,
                candidates,
            } => write!(
                f,
                "ambiguous transition from state {} on {:?}: {} rules apply",
                state, symbol, candidates
            ),
            Error::EpsilonRule { state } => {
                write!(f, "epsilon rule from state {} in a deterministic rulebook", state)
            }
            Error::Syntax(msg) => write!(f, "syntax error: {}", msg),
            Error::UnsupportedFeature(feature) => write!(f, "unsupported feature: {}", feature),
        }
    }
}

impl std::error::Error for Error {}
