use crate::rule::Rule;
use crate::state::{State, StateSet};
use crate::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// The rules of a deterministic automaton.
///
/// Epsilon rules are refused at construction. Two rules for the same
/// `(state, symbol)` pair are accepted here but make [`DfaRulebook::rule_for`]
/// fail for that pair, so an ambiguous rulebook never silently picks one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DfaRulebook {
    rules: Vec<Rule>,
    /// (state, symbol) -> positions in `rules`
    index: HashMap<(State, char), Vec<usize>>,
}

impl DfaRulebook {
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        if let Some(rule) = rules.iter().find(|rule| rule.is_epsilon()) {
            return Err(Error::EpsilonRule { state: rule.state });
        }
        Ok(Self::index_rules(rules))
    }

    /// Index rules already known to carry a symbol.
    pub(crate) fn index_rules(rules: Vec<Rule>) -> Self {
        let mut index: HashMap<(State, char), Vec<usize>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            if let Some(symbol) = rule.symbol {
                index.entry((rule.state, symbol)).or_default().push(position);
            }
        }
        Self { rules, index }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The one rule leaving `state` on `symbol`
    pub fn rule_for(&self, state: State, symbol: char) -> Result<&Rule> {
        match self.index.get(&(state, symbol)).map(Vec::as_slice) {
            Some(&[position]) => Ok(&self.rules[position]),
            found => Err(Error::MissingTransition {
                state,
                symbol,
                candidates: found.map_or(0, <[usize]>::len),
            }),
        }
    }

    pub fn next_state(&self, state: State, symbol: char) -> Result<State> {
        self.rule_for(state, symbol).map(Rule::follow)
    }

    pub fn alphabet(&self) -> BTreeSet<char> {
        self.index.keys().map(|&(_, symbol)| symbol).collect()
    }
}

/// A running deterministic automaton
#[derive(Debug, Clone)]
pub struct Dfa<'a> {
    current: State,
    accept: &'a StateSet,
    rulebook: &'a DfaRulebook,
}

impl<'a> Dfa<'a> {
    pub fn new(current: State, accept: &'a StateSet, rulebook: &'a DfaRulebook) -> Self {
        Self {
            current,
            accept,
            rulebook,
        }
    }

    pub fn current_state(&self) -> State {
        self.current
    }

    pub fn is_accepting(&self) -> bool {
        self.accept.contains(&self.current)
    }

    /// Follow the single rule for `symbol`. On error the automaton stays where
    /// it was.
    pub fn read_symbol(&mut self, symbol: char) -> Result<()> {
        self.current = self.rulebook.next_state(self.current, symbol)?;
        trace!("read {:?}: now in state {}", symbol, self.current);
        Ok(())
    }

    pub fn read_string(&mut self, input: &str) -> Result<()> {
        for symbol in input.chars() {
            self.read_symbol(symbol)?;
        }
        Ok(())
    }
}

/// Blueprint for deterministic automata
#[derive(Debug, Clone, PartialEq)]
pub struct DfaDesign {
    start: State,
    accept: StateSet,
    rulebook: DfaRulebook,
}

impl DfaDesign {
    pub fn new(start: State, accept: StateSet, rulebook: DfaRulebook) -> Self {
        Self {
            start,
            accept,
            rulebook,
        }
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn accept(&self) -> &StateSet {
        &self.accept
    }

    pub fn rulebook(&self) -> &DfaRulebook {
        &self.rulebook
    }

    pub fn to_dfa(&self) -> Dfa<'_> {
        Dfa::new(self.start, &self.accept, &self.rulebook)
    }

    /// Run `input` through a fresh automaton. A missing or ambiguous transition
    /// aborts the whole match.
    pub fn accepts(&self, input: &str) -> Result<bool> {
        let mut dfa = self.to_dfa();
        dfa.read_string(input)?;
        Ok(dfa.is_accepting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::labelled;

    fn rulebook() -> DfaRulebook {
        DfaRulebook::new(vec![
            Rule::labelled(1, 'a', 2),
            Rule::labelled(1, 'b', 1),
            Rule::labelled(2, 'a', 2),
            Rule::labelled(2, 'b', 3),
            Rule::labelled(3, 'a', 3),
            Rule::labelled(3, 'b', 3),
        ])
        .unwrap()
    }

    #[test]
    fn test_next_state() {
        let rulebook = rulebook();
        assert_eq!(rulebook.next_state(State::new(1), 'a').unwrap(), State::new(2));
        assert_eq!(rulebook.next_state(State::new(1), 'b').unwrap(), State::new(1));
        assert_eq!(rulebook.next_state(State::new(2), 'b').unwrap(), State::new(3));
    }

    #[test]
    fn test_accepting() {
        let rulebook = rulebook();
        let both = labelled([1, 3]);
        let third = labelled([3]);
        assert!(Dfa::new(State::new(1), &both, &rulebook).is_accepting());
        assert!(!Dfa::new(State::new(1), &third, &rulebook).is_accepting());
    }

    #[test]
    fn test_read_symbol() {
        let rulebook = rulebook();
        let accept = labelled([3]);
        let mut dfa = Dfa::new(State::new(1), &accept, &rulebook);
        assert!(!dfa.is_accepting());
        dfa.read_symbol('b').unwrap();
        assert!(!dfa.is_accepting());
        for _ in 0..3 {
            dfa.read_symbol('a').unwrap();
        }
        assert!(!dfa.is_accepting());
        dfa.read_symbol('b').unwrap();
        assert!(dfa.is_accepting());
    }

    #[test]
    fn test_read_string() {
        let rulebook = rulebook();
        let accept = labelled([3]);
        let mut dfa = Dfa::new(State::new(1), &accept, &rulebook);
        dfa.read_string("baaab").unwrap();
        assert!(dfa.is_accepting());
    }

    #[test]
    fn test_design_accepts() {
        let design = DfaDesign::new(State::new(1), labelled([3]), rulebook());
        assert!(!design.accepts("a").unwrap());
        assert!(!design.accepts("baa").unwrap());
        assert!(design.accepts("baba").unwrap());
    }

    #[test]
    fn test_missing_transition() {
        let design = DfaDesign::new(State::new(1), labelled([3]), rulebook());
        let err = design.accepts("abc").unwrap_err();
        assert_eq!(
            err,
            Error::MissingTransition {
                state: State::new(3),
                symbol: 'c',
                candidates: 0,
            }
        );
        assert_eq!(err.to_string(), "no transition from state 3 on 'c'");
    }

    #[test]
    fn test_ambiguous_transition() {
        let rulebook = DfaRulebook::new(vec![
            Rule::labelled(1, 'a', 2),
            Rule::labelled(1, 'a', 3),
        ])
        .unwrap();
        let accept = labelled([2, 3]);
        let mut dfa = Dfa::new(State::new(1), &accept, &rulebook);
        assert_eq!(
            dfa.read_symbol('a'),
            Err(Error::MissingTransition {
                state: State::new(1),
                symbol: 'a',
                candidates: 2,
            })
        );
        assert_eq!(dfa.current_state(), State::new(1));
    }

    #[test]
    fn test_epsilon_rule_refused() {
        let err = DfaRulebook::new(vec![Rule::labelled_epsilon(1, 2)]).unwrap_err();
        assert_eq!(err, Error::EpsilonRule { state: State::new(1) });
    }

    #[test]
    fn test_design_reuse() {
        let design = DfaDesign::new(State::new(1), labelled([3]), rulebook());
        assert!(design.accepts("ab").unwrap());
        assert!(!design.accepts("b").unwrap());
        assert!(design.accepts("ab").unwrap());
    }
}
