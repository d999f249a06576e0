//! Subset construction: turning an NFA design into an equivalent DFA design.

use crate::dfa::{DfaDesign, DfaRulebook};
use crate::nfa::NfaDesign;
use crate::rule::Rule;
use crate::state::{State, StateSet};
use std::collections::{BTreeSet, HashMap};

/// Build a DFA design accepting the same strings as `design`.
///
/// Each DFA state stands for one epsilon-closed set of NFA states reachable
/// from the start. The empty set is kept as a dead state, so the result has
/// exactly one rule per state for every symbol of the NFA's alphabet. Symbols
/// outside that alphabet have no rule at all.
pub fn subset_construction(design: &NfaDesign) -> DfaDesign {
    let rulebook = design.rulebook();
    let alphabet = rulebook.alphabet();

    // Sorted sets of NFA states -> the DFA state standing for them
    let mut dfa_states: HashMap<BTreeSet<State>, State> = HashMap::new();
    let mut accept = StateSet::new();
    let mut rules = Vec::new();
    let mut worklist: Vec<(StateSet, State)> = Vec::new();

    let initial = rulebook.follow_free_moves(&StateSet::from([design.start()]));
    let start = State::fresh();
    if !initial.is_disjoint(design.accept()) {
        accept.insert(start);
    }
    dfa_states.insert(initial.iter().copied().collect(), start);
    worklist.push((initial, start));

    while let Some((current, current_state)) = worklist.pop() {
        for &symbol in &alphabet {
            let next = rulebook.follow_free_moves(&rulebook.next_states(&current, Some(symbol)));
            let key: BTreeSet<State> = next.iter().copied().collect();

            let next_state = match dfa_states.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = State::fresh();
                    if !next.is_disjoint(design.accept()) {
                        accept.insert(fresh);
                    }
                    dfa_states.insert(key, fresh);
                    worklist.push((next, fresh));
                    fresh
                }
            };

            rules.push(Rule::new(current_state, symbol, next_state));
        }
    }

    debug!(
        "subset construction produced {} states and {} rules over {} symbols",
        dfa_states.len(),
        rules.len(),
        alphabet.len()
    );

    DfaDesign::new(start, accept, DfaRulebook::index_rules(rules))
}

impl NfaDesign {
    /// See [`subset_construction`]
    pub fn to_dfa_design(&self) -> DfaDesign {
        subset_construction(self)
    }
}
