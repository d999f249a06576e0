use crate::nfa::{NfaDesign, NfaRulebook};
use crate::pattern::Pattern;
use crate::rule::Rule;
use crate::state::{State, StateSet};

/// A partially built automaton: its start state and accept states. The rules
/// live in the compiler's shared buffer.
#[derive(Debug, Clone)]
struct Fragment {
    start: State,
    accept: StateSet,
}

/// Compiler that turns a [`Pattern`] into an [`NfaDesign`] by Thompson
/// construction.
///
/// Every state the compiler introduces comes from [`State::fresh`], so two
/// sub-automata never share a state and neither do two compilations of the
/// same pattern.
#[derive(Debug, Default)]
pub struct Compiler {
    rules: Vec<Rule>,
}

impl Compiler {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn compile(mut self, pattern: &Pattern) -> NfaDesign {
        let fragment = self.compile_pattern(pattern);
        debug!(
            "compiled {} into {} rules with {} accept states",
            pattern,
            self.rules.len(),
            fragment.accept.len()
        );
        NfaDesign::new(fragment.start, fragment.accept, NfaRulebook::new(self.rules))
    }

    fn compile_pattern(&mut self, pattern: &Pattern) -> Fragment {
        match pattern {
            Pattern::Empty => self.compile_empty(),
            Pattern::Literal(symbol) => self.compile_literal(*symbol),
            Pattern::Concatenate(first, second) => self.compile_concatenate(first, second),
            Pattern::Choose(first, second) => self.compile_choose(first, second),
            Pattern::Repeat(pattern) => self.compile_repeat(pattern),
        }
    }

    /// One state that is both start and accept
    fn compile_empty(&mut self) -> Fragment {
        let start = State::fresh();
        Fragment {
            start,
            accept: StateSet::from([start]),
        }
    }

    fn compile_literal(&mut self, symbol: char) -> Fragment {
        let start = State::fresh();
        let accept = State::fresh();
        self.rules.push(Rule::new(start, symbol, accept));
        Fragment {
            start,
            accept: StateSet::from([accept]),
        }
    }

    /// Bridge every accept state of `first` to the start of `second`
    fn compile_concatenate(&mut self, first: &Pattern, second: &Pattern) -> Fragment {
        let first = self.compile_pattern(first);
        let second = self.compile_pattern(second);

        for &state in &first.accept {
            self.rules.push(Rule::epsilon(state, second.start));
        }

        Fragment {
            start: first.start,
            accept: second.accept,
        }
    }

    /// New start state with a free move into each alternative
    fn compile_choose(&mut self, first: &Pattern, second: &Pattern) -> Fragment {
        let first = self.compile_pattern(first);
        let second = self.compile_pattern(second);

        let start = State::fresh();
        self.rules.push(Rule::epsilon(start, first.start));
        self.rules.push(Rule::epsilon(start, second.start));

        let mut accept = first.accept;
        accept.extend(second.accept);
        Fragment { start, accept }
    }

    /// New start state that also accepts (zero repetitions), with every
    /// accept state of the body looping back to the body's start
    fn compile_repeat(&mut self, pattern: &Pattern) -> Fragment {
        let body = self.compile_pattern(pattern);

        let start = State::fresh();
        self.rules.push(Rule::epsilon(start, body.start));
        for &state in &body.accept {
            self.rules.push(Rule::epsilon(state, body.start));
        }

        let mut accept = body.accept;
        accept.insert(start);
        Fragment { start, accept }
    }
}
