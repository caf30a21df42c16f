//! Reaction parser - scans message bodies against a [`PatternCatalog`]

use std::sync::Arc;

use tapback_core::{Locale, ParsedReaction};

use crate::catalog::{self, PatternCatalog, PatternRule};
use crate::strings::StringKey;

/// A parsed reaction together with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionMatch {
    pub reaction: ParsedReaction,
    pub locale: Locale,
    pub key: StringKey,
}

/// Stateless parser over a shared catalog
#[derive(Debug, Clone)]
pub struct ReactionParser {
    catalog: Arc<PatternCatalog>,
}

impl ReactionParser {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    /// Parser over the installed process-wide catalog
    pub fn from_global() -> Option<Self> {
        catalog::global().map(Self::new)
    }

    pub fn catalog(&self) -> &Arc<PatternCatalog> {
        &self.catalog
    }

    /// Parse `body` as a reaction, or `None` if it is an ordinary message
    pub fn parse(&self, body: &str) -> Option<ParsedReaction> {
        self.parse_with_rule(body).map(|m| m.reaction)
    }

    /// Like [`parse`](Self::parse), also reporting which rule matched
    ///
    /// Removal rules are tried before addition rules. Within each set the
    /// first rule whose extractor yields a value wins.
    pub fn parse_with_rule(&self, body: &str) -> Option<ReactionMatch> {
        scan(self.catalog.removed(), body).or_else(|| scan(self.catalog.added(), body))
    }
}

fn scan(rules: &[PatternRule], body: &str) -> Option<ReactionMatch> {
    rules.iter().find_map(|rule| {
        let captures = rule.captures(body)?;
        let reaction = rule.extract(&captures)?;
        Some(ReactionMatch {
            reaction,
            locale: rule.locale().clone(),
            key: rule.key(),
        })
    })
}
