use crate::compiler::Compiler;
use crate::nfa::NfaDesign;
use crate::parse::Parser;
use crate::Result;
use std::fmt;

/// A pattern tree.
///
/// Patterns are plain immutable values. Compiling one never caches anything,
/// so every call to [`Pattern::to_nfa_design`] produces a design with states
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches only the empty string
    Empty,
    /// Matches exactly one symbol
    Literal(char),
    /// Matches the first pattern followed by the second
    Concatenate(Box<Pattern>, Box<Pattern>),
    /// Matches either pattern
    Choose(Box<Pattern>, Box<Pattern>),
    /// Matches zero or more repetitions of the pattern
    Repeat(Box<Pattern>),
}

impl Pattern {
    pub fn empty() -> Pattern {
        Pattern::Empty
    }

    pub fn literal(symbol: char) -> Pattern {
        Pattern::Literal(symbol)
    }

    pub fn concatenate(first: Pattern, second: Pattern) -> Pattern {
        Pattern::Concatenate(Box::new(first), Box::new(second))
    }

    pub fn choose(first: Pattern, second: Pattern) -> Pattern {
        Pattern::Choose(Box::new(first), Box::new(second))
    }

    pub fn repeat(pattern: Pattern) -> Pattern {
        Pattern::Repeat(Box::new(pattern))
    }

    /// The concatenation of one literal per symbol of `text`, or `Empty` for
    /// the empty string
    pub fn string(text: &str) -> Pattern {
        balanced(text.chars().map(Pattern::Literal).collect(), Pattern::concatenate)
            .unwrap_or(Pattern::Empty)
    }

    /// Parse conventional regex syntax with the default [`Config`](crate::Config)
    pub fn parse(pattern: &str) -> Result<Pattern> {
        Parser::default().parse(pattern)
    }

    /// Binding strength: atoms 3, repetition 2, concatenation 1, choice 0
    pub fn precedence(&self) -> u8 {
        match self {
            Pattern::Empty | Pattern::Literal(_) => 3,
            Pattern::Repeat(_) => 2,
            Pattern::Concatenate(..) => 1,
            Pattern::Choose(..) => 0,
        }
    }

    /// Render this pattern as the child of an operator with precedence
    /// `outer`, parenthesized when it binds more loosely than its parent
    pub fn bracket(&self, outer: u8) -> String {
        let mut rendered = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_bracketed(&mut rendered, outer);
        rendered
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn to_nfa_design(&self) -> NfaDesign {
        Compiler::new().compile(self)
    }

    pub fn matches(&self, input: &str) -> bool {
        self.to_nfa_design().accepts(input)
    }

    fn write_bracketed<W: fmt::Write>(&self, out: &mut W, outer: u8) -> fmt::Result {
        if self.precedence() < outer {
            out.write_char('(')?;
            self.write_to(out)?;
            out.write_char(')')
        } else {
            self.write_to(out)
        }
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let precedence = self.precedence();
        match self {
            Pattern::Empty => Ok(()),
            Pattern::Literal(symbol) => out.write_char(*symbol),
            Pattern::Concatenate(first, second) => {
                first.write_bracketed(out, precedence)?;
                second.write_bracketed(out, precedence)
            }
            Pattern::Choose(first, second) => {
                first.write_bracketed(out, precedence)?;
                out.write_char('|')?;
                second.write_bracketed(out, precedence)
            }
            Pattern::Repeat(pattern) => {
                pattern.write_bracketed(out, precedence)?;
                out.write_char('*')
            }
        }
    }
}

/// `{}` renders the pattern, `{:#}` wraps the rendering in slashes
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("/")?;
            self.write_to(f)?;
            f.write_str("/")
        } else {
            self.write_to(f)
        }
    }
}

/// Join `patterns` pairwise into a tree of depth log n. `None` if empty.
pub(crate) fn balanced(mut patterns: Vec<Pattern>, join: fn(Pattern, Pattern) -> Pattern) -> Option<Pattern> {
    while patterns.len() > 1 {
        let mut joined = Vec::with_capacity((patterns.len() + 1) / 2);
        let mut iter = patterns.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => joined.push(join(first, second)),
                None => joined.push(first),
            }
        }
        patterns = joined;
    }
    patterns.pop()
}
