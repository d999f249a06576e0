use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh state tokens, shared by every compilation in the process.
static NEXT_FRESH: AtomicU64 = AtomicU64::new(0);

/// A state identity in an automaton.
///
/// States compare by token only. A state is either labelled by the caller
/// (handy for writing rulebooks by hand) or fresh, meaning it came from
/// [`State::fresh`]. A labelled state never equals a fresh one, and no two
/// calls to [`State::fresh`] return the same state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(Token);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Token {
    Labelled(u32),
    Fresh(u64),
}

impl State {
    /// A caller-labelled state
    pub const fn new(label: u32) -> Self {
        State(Token::Labelled(label))
    }

    /// Allocate a state that has never been handed out before
    pub fn fresh() -> Self {
        State(Token::Fresh(NEXT_FRESH.fetch_add(1, Ordering::Relaxed)))
    }

    /// The caller's label, if this is a labelled state
    pub fn label(&self) -> Option<u32> {
        match self.0 {
            Token::Labelled(label) => Some(label),
            Token::Fresh(_) => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self.0, Token::Fresh(_))
    }
}

impl From<u32> for State {
    fn from(label: u32) -> Self {
        State::new(label)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Token::Labelled(label) => write!(f, "{}", label),
            Token::Fresh(id) => write!(f, "q{}", id),
        }
    }
}

/// A set of states, as held by a non-deterministic automaton
pub type StateSet = HashSet<State>;

/// Build a [`StateSet`] of caller-labelled states.
///
/// ```
/// use finite_automata::state::{labelled, State};
///
/// let states = labelled([1, 2, 4]);
/// assert!(states.contains(&State::new(4)));
/// ```
pub fn labelled<I>(labels: I) -> StateSet
where
    I: IntoIterator<Item = u32>,
{
    labels.into_iter().map(State::new).collect()
}
