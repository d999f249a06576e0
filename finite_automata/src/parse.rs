//! Building pattern trees from conventional regex syntax.
//!
//! The text is parsed by `regex-syntax` and its high-level IR is translated
//! into the five pattern operators. `+` and `?` are rewritten in terms of
//! repetition, concatenation and choice, and a character class is expanded
//! into a choice between its members as long as it is small enough. Anything
//! else the algebra has no way to say (anchors, word boundaries, counted
//! repetition, byte classes) is reported as [`Error::UnsupportedFeature`].

use crate::pattern::{balanced, Pattern};
use crate::{Error, Result};
use regex_syntax::hir::{Class, ClassUnicode, Hir, HirKind, Literal, Repetition};
use regex_syntax::ParserBuilder;

/// Parser options
#[derive(Clone, Debug)]
pub struct Config {
    case_insensitive: bool,
    nest_limit: u32,
    class_limit: usize,
}

impl Config {
    pub fn new() -> Config {
        Config {
            case_insensitive: false,
            nest_limit: 250,
            class_limit: 64,
        }
    }

    /// Match letters regardless of case. Each cased letter becomes a choice
    /// between its case variants.
    pub fn case_insensitive(mut self, yes: bool) -> Config {
        self.case_insensitive = yes;
        self
    }

    /// Maximum nesting depth accepted by the underlying parser
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = limit;
        self
    }

    /// The largest character class, counted in members, that will be expanded
    /// into a choice of literals
    pub fn class_limit(mut self, limit: usize) -> Config {
        self.class_limit = limit;
        self
    }

    pub fn get_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit
    }

    pub fn get_class_limit(&self) -> usize {
        self.class_limit
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

/// Translates regex syntax into [`Pattern`] trees
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: Config,
}

impl Parser {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parse(&self, pattern: &str) -> Result<Pattern> {
        let hir = ParserBuilder::new()
            .case_insensitive(self.config.case_insensitive)
            .nest_limit(self.config.nest_limit)
            .build()
            .parse(pattern)
            .map_err(|err| Error::Syntax(err.to_string()))?;
        self.translate(&hir)
    }

    fn translate(&self, hir: &Hir) -> Result<Pattern> {
        match hir.kind() {
            HirKind::Empty => Ok(Pattern::Empty),
            HirKind::Literal(literal) => self.translate_literal(literal),
            HirKind::Class(Class::Unicode(class)) => self.translate_class(class),
            HirKind::Class(Class::Bytes(_)) => {
                Err(Error::UnsupportedFeature("byte classes".to_string()))
            }
            HirKind::Look(look) => Err(Error::UnsupportedFeature(format!("assertion {:?}", look))),
            HirKind::Repetition(repetition) => self.translate_repetition(repetition),
            HirKind::Capture(capture) => self.translate(&capture.sub),
            HirKind::Concat(subs) => self.translate_all(subs, Pattern::concatenate),
            HirKind::Alternation(subs) => self.translate_all(subs, Pattern::choose),
        }
    }

    fn translate_all(&self, subs: &[Hir], join: fn(Pattern, Pattern) -> Pattern) -> Result<Pattern> {
        let patterns = subs
            .iter()
            .map(|sub| self.translate(sub))
            .collect::<Result<Vec<_>>>()?;
        Ok(balanced(patterns, join).unwrap_or(Pattern::Empty))
    }

    fn translate_literal(&self, literal: &Literal) -> Result<Pattern> {
        let text = std::str::from_utf8(&literal.0)
            .map_err(|_| Error::UnsupportedFeature("non-UTF-8 literal".to_string()))?;
        Ok(Pattern::string(text))
    }

    fn translate_class(&self, class: &ClassUnicode) -> Result<Pattern> {
        let size: usize = class
            .iter()
            .map(|range| (range.end() as usize) - (range.start() as usize) + 1)
            .sum();
        if size > self.config.class_limit {
            return Err(Error::UnsupportedFeature(format!(
                "character class of {} members (limit is {})",
                size, self.config.class_limit
            )));
        }

        let members: Vec<Pattern> = class
            .iter()
            .flat_map(|range| (range.start() as u32)..=(range.end() as u32))
            .filter_map(char::from_u32)
            .map(Pattern::Literal)
            .collect();
        balanced(members, Pattern::choose)
            .ok_or_else(|| Error::UnsupportedFeature("empty character class".to_string()))
    }

    fn translate_repetition(&self, repetition: &Repetition) -> Result<Pattern> {
        let sub = self.translate(&repetition.sub)?;
        match (repetition.min, repetition.max) {
            (0, None) => Ok(Pattern::repeat(sub)),
            (1, None) => Ok(Pattern::concatenate(sub.clone(), Pattern::repeat(sub))),
            (0, Some(1)) => Ok(Pattern::choose(sub, Pattern::Empty)),
            (1, Some(1)) => Ok(sub),
            (min, Some(max)) => Err(Error::UnsupportedFeature(format!(
                "counted repetition {{{},{}}}",
                min, max
            ))),
            (min, None) => Err(Error::UnsupportedFeature(format!("counted repetition {{{},}}", min))),
        }
    }
}
