use crate::rule::Rule;
use crate::state::{State, StateSet};
use std::collections::{BTreeSet, HashMap};

/// The rules of a non-deterministic automaton.
///
/// Any number of rules may leave a state on the same symbol, and rules with no
/// symbol are epsilon moves. A rulebook is never modified after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NfaRulebook {
    rules: Vec<Rule>,
    /// (state, symbol) -> positions in `rules`
    index: HashMap<(State, Option<char>), Vec<usize>>,
}

impl NfaRulebook {
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut index: HashMap<(State, Option<char>), Vec<usize>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            index.entry((rule.state, rule.symbol)).or_default().push(position);
        }
        Self { rules, index }
    }

    /// All rules, in the order they were given
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Rules leaving `state` on `symbol`; `None` selects epsilon rules
    pub fn rules_for(&self, state: State, symbol: Option<char>) -> impl Iterator<Item = &Rule> + '_ {
        self.index
            .get(&(state, symbol))
            .into_iter()
            .flatten()
            .map(move |&position| &self.rules[position])
    }

    pub fn follow_rules_for(&self, state: State, symbol: Option<char>) -> impl Iterator<Item = State> + '_ {
        self.rules_for(state, symbol).map(Rule::follow)
    }

    /// Every state reachable from some state in `states` by one rule on `symbol`
    pub fn next_states(&self, states: &StateSet, symbol: Option<char>) -> StateSet {
        states
            .iter()
            .flat_map(|&state| self.follow_rules_for(state, symbol))
            .collect()
    }

    /// The epsilon closure of `states`.
    ///
    /// Worklist over newly discovered states, so the work done is bounded by
    /// the number of reachable states rather than by recursion depth.
    pub fn follow_free_moves(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<State> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for next in self.follow_rules_for(state, None) {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Every symbol some rule consumes
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.rules.iter().filter_map(|rule| rule.symbol).collect()
    }

    /// Every state mentioned by some rule
    pub fn states(&self) -> StateSet {
        self.rules
            .iter()
            .flat_map(|rule| [rule.state, rule.next_state])
            .collect()
    }
}

impl FromIterator<Rule> for NfaRulebook {
    fn from_iter<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        NfaRulebook::new(rules.into_iter().collect())
    }
}

/// A running non-deterministic automaton.
///
/// `current` is the raw frontier. Its epsilon closure is taken whenever the
/// automaton is queried or advanced, never stored.
#[derive(Debug, Clone)]
pub struct Nfa<'a> {
    current: StateSet,
    accept: &'a StateSet,
    rulebook: &'a NfaRulebook,
}

impl<'a> Nfa<'a> {
    pub fn new(current: StateSet, accept: &'a StateSet, rulebook: &'a NfaRulebook) -> Self {
        Self {
            current,
            accept,
            rulebook,
        }
    }

    /// `states` plus everything reachable from them by epsilon moves
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.rulebook.follow_free_moves(states)
    }

    /// The frontier closed over epsilon moves
    pub fn current_states(&self) -> StateSet {
        self.epsilon_closure(&self.current)
    }

    pub fn is_accepting(&self) -> bool {
        self.current_states()
            .iter()
            .any(|state| self.accept.contains(state))
    }

    /// Advance every branch by one symbol. Branches with no matching rule die
    /// quietly; an empty frontier is a rejection, not an error.
    pub fn read_symbol(&mut self, symbol: char) {
        let closed = self.current_states();
        self.current = self.rulebook.next_states(&closed, Some(symbol));
        trace!("read {:?}: frontier now holds {} states", symbol, self.current.len());
    }

    pub fn read_string(&mut self, input: &str) {
        for symbol in input.chars() {
            self.read_symbol(symbol);
        }
    }
}

/// Blueprint for non-deterministic automata.
///
/// Every call to [`NfaDesign::accepts`] builds its own [`Nfa`], so matches
/// never observe each other and one design can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct NfaDesign {
    start: State,
    accept: StateSet,
    rulebook: NfaRulebook,
}

impl NfaDesign {
    pub fn new(start: State, accept: StateSet, rulebook: NfaRulebook) -> Self {
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

    pub fn rulebook(&self) -> &NfaRulebook {
        &self.rulebook
    }

    pub fn into_parts(self) -> (State, StateSet, NfaRulebook) {
        (self.start, self.accept, self.rulebook)
    }

    /// A fresh automaton positioned at the start state
    pub fn to_nfa(&self) -> Nfa<'_> {
        let mut current = StateSet::new();
        current.insert(self.start);
        Nfa::new(current, &self.accept, &self.rulebook)
    }

    pub fn accepts(&self, input: &str) -> bool {
        let mut nfa = self.to_nfa();
        nfa.read_string(input);
        nfa.is_accepting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::labelled;

    fn scenario_rulebook() -> NfaRulebook {
        NfaRulebook::new(vec![
            Rule::labelled(1, 'a', 1),
            Rule::labelled(1, 'b', 1),
            Rule::labelled(1, 'b', 2),
            Rule::labelled(2, 'a', 3),
            Rule::labelled(2, 'b', 3),
            Rule::labelled(3, 'a', 4),
            Rule::labelled(3, 'b', 4),
        ])
    }

    fn free_move_rulebook() -> NfaRulebook {
        NfaRulebook::new(vec![
            Rule::labelled_epsilon(1, 2),
            Rule::labelled_epsilon(1, 4),
            Rule::labelled(2, 'a', 3),
            Rule::labelled(3, 'a', 2),
            Rule::labelled(4, 'a', 5),
            Rule::labelled(5, 'a', 6),
            Rule::labelled(6, 'a', 4),
        ])
    }

    #[test]
    fn test_next_states() {
        let rulebook = scenario_rulebook();
        assert_eq!(rulebook.next_states(&labelled([1]), Some('b')), labelled([1, 2]));
        assert_eq!(rulebook.next_states(&labelled([1, 2]), Some('a')), labelled([1, 3]));
        assert_eq!(rulebook.next_states(&labelled([1, 3]), Some('b')), labelled([1, 2, 4]));
        assert!(rulebook.next_states(&labelled([4]), Some('a')).is_empty());
    }

    #[test]
    fn test_accepting_with_explicit_frontier() {
        let rulebook = scenario_rulebook();
        let accept = labelled([4]);
        assert!(!Nfa::new(labelled([1]), &accept, &rulebook).is_accepting());
        assert!(Nfa::new(labelled([1, 2, 4]), &accept, &rulebook).is_accepting());
    }

    #[test]
    fn test_step_by_step() {
        let rulebook = scenario_rulebook();
        let accept = labelled([4]);
        let mut nfa = Nfa::new(labelled([1]), &accept, &rulebook);
        assert!(!nfa.is_accepting());
        nfa.read_symbol('b');
        assert!(!nfa.is_accepting());
        nfa.read_symbol('a');
        assert!(!nfa.is_accepting());
        nfa.read_symbol('b');
        assert!(nfa.is_accepting());
    }

    #[test]
    fn test_read_string() {
        let rulebook = scenario_rulebook();
        let accept = labelled([4]);
        let mut nfa = Nfa::new(labelled([1]), &accept, &rulebook);
        assert!(!nfa.is_accepting());
        nfa.read_string("bbbbb");
        assert!(nfa.is_accepting());
    }

    #[test]
    fn test_design_accepts() {
        let design = NfaDesign::new(State::new(1), labelled([4]), scenario_rulebook());
        assert!(design.accepts("bab"));
        assert!(design.accepts("bbbbb"));
        assert!(!design.accepts("bbabb"));
    }

    #[test]
    fn test_follow_free_moves() {
        let rulebook = free_move_rulebook();
        assert_eq!(rulebook.follow_free_moves(&labelled([1])), labelled([1, 2, 4]));
        assert_eq!(rulebook.follow_free_moves(&labelled([3])), labelled([3]));
    }

    #[test]
    fn test_epsilon_closure_idempotent() {
        let rulebook = free_move_rulebook();
        let accept = labelled([2, 4]);
        let nfa = Nfa::new(labelled([1]), &accept, &rulebook);
        let once = nfa.epsilon_closure(&labelled([1, 5]));
        assert_eq!(once, labelled([1, 2, 4, 5]));
        assert_eq!(nfa.epsilon_closure(&once), once);
    }

    #[test]
    fn test_follow_free_moves_with_cycle() {
        let rulebook = NfaRulebook::new(vec![
            Rule::labelled_epsilon(1, 2),
            Rule::labelled_epsilon(2, 3),
            Rule::labelled_epsilon(3, 1),
        ]);
        assert_eq!(rulebook.follow_free_moves(&labelled([2])), labelled([1, 2, 3]));
    }

    #[test]
    fn test_design_with_free_moves() {
        // Accepts strings of a's whose length is a multiple of two or three.
        let design = NfaDesign::new(State::new(1), labelled([2, 4]), free_move_rulebook());
        assert!(design.accepts(""));
        assert!(design.accepts("aa"));
        assert!(design.accepts("aaa"));
        assert!(!design.accepts("aaaaa"));
        assert!(design.accepts("aaaaaa"));
    }

    #[test]
    fn test_rules_for_keeps_order() {
        let rulebook = scenario_rulebook();
        let targets: Vec<State> = rulebook.follow_rules_for(State::new(1), Some('b')).collect();
        assert_eq!(targets, vec![State::new(1), State::new(2)]);
    }

    #[test]
    fn test_alphabet_skips_epsilon() {
        let rulebook = free_move_rulebook();
        assert_eq!(rulebook.alphabet().into_iter().collect::<Vec<_>>(), vec!['a']);
        assert_eq!(rulebook.states(), labelled([1, 2, 3, 4, 5, 6]));
    }
}
