use crate::state::State;
use std::fmt;

/// A single transition edge.
///
/// `symbol` is `None` for an epsilon move, which is followed without
/// consuming input and only means something in a non-deterministic rulebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    /// The state the edge leaves from
    pub state: State,
    /// The symbol consumed, or `None` for an epsilon move
    pub symbol: Option<char>,
    /// The state the edge leads to
    pub next_state: State,
}

impl Rule {
    /// Create a rule consuming `symbol`
    pub fn new(state: State, symbol: char, next_state: State) -> Self {
        Rule {
            state,
            symbol: Some(symbol),
            next_state,
        }
    }

    /// Create an epsilon rule
    pub fn epsilon(state: State, next_state: State) -> Self {
        Rule {
            state,
            symbol: None,
            next_state,
        }
    }

    /// Create a rule between two caller-labelled states
    pub fn labelled(state: u32, symbol: char, next_state: u32) -> Self {
        Rule::new(State::new(state), symbol, State::new(next_state))
    }

    /// Create an epsilon rule between two caller-labelled states
    pub fn labelled_epsilon(state: u32, next_state: u32) -> Self {
        Rule::epsilon(State::new(state), State::new(next_state))
    }

    /// Whether this rule leaves `state` on `symbol` (`None` asks for epsilon)
    pub fn applies_to(&self, state: State, symbol: Option<char>) -> bool {
        self.state == state && self.symbol == symbol
    }

    pub fn follow(&self) -> State {
        self.next_state
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(symbol) => write!(f, "{} --{}--> {}", self.state, symbol, self.next_state),
            None => write!(f, "{} --ε--> {}", self.state, self.next_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_to() {
        let rule = Rule::labelled(1, 'a', 2);
        assert!(rule.applies_to(State::new(1), Some('a')));
        assert!(!rule.applies_to(State::new(1), Some('b')));
        assert!(!rule.applies_to(State::new(2), Some('a')));
        assert!(!rule.applies_to(State::new(1), None));
        assert_eq!(rule.follow(), State::new(2));
    }

    #[test]
    fn test_epsilon_applies_only_to_none() {
        let rule = Rule::labelled_epsilon(1, 2);
        assert!(rule.is_epsilon());
        assert!(rule.applies_to(State::new(1), None));
        assert!(!rule.applies_to(State::new(1), Some('a')));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rule::labelled(1, 'a', 2).to_string(), "1 --a--> 2");
        assert_eq!(Rule::labelled_epsilon(3, 4).to_string(), "3 --ε--> 4");
    }
}
