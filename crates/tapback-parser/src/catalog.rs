//! Pattern catalog - the ordered, locale-merged set of reaction patterns
//!
//! Per locale, rules are laid out as: generic-provider pair, the six
//! tapback pairs (loved, liked, disliked, laughed, emphasized,
//! questioned), then the generic fallback pair. Locales follow discovery
//! order with English first. The fallback patterns are supersets of the
//! tapback ones, so this order decides which rule wins.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use tapback_core::{Locale, ParsedReaction, ReactionEvent, ReactionObserver, TapbackKind};
use thiserror::Error;
use tracing::debug;

use crate::strings::{BundledStrings, LocaleDiscovery, StringKey, StringsError, StringsProvider};

/// Subject the generic "added" rule refuses to treat as an emoji
pub const STICKER_SUBJECT: &str = "with a sticker";

static GLOBAL: OnceCell<Arc<PatternCatalog>> = OnceCell::new();

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("English baseline unusable: {0}")]
    Baseline(String),

    #[error("pattern catalog already installed")]
    AlreadyInstalled,
}

/// How a matched pattern turns its captures into a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Fixed emoji; quoted text in group 1
    Tapback(TapbackKind),
    /// Emoji in group 1, quoted text in group 2
    Generic,
}

/// One compiled pattern and its extraction rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    locale: Locale,
    key: StringKey,
    regex: Regex,
    extraction: Extraction,
}

impl PatternRule {
    fn compile(locale: &Locale, key: StringKey, template: &str) -> Result<Self, String> {
        let regex = Regex::new(template).map_err(|e| format!("{key}: {e}"))?;
        if regex.captures_len() <= key.required_groups() {
            return Err(format!(
                "{key}: expected {} capture group(s), found {}",
                key.required_groups(),
                regex.captures_len() - 1
            ));
        }

        let extraction = key.tapback().map_or(Extraction::Generic, Extraction::Tapback);
        Ok(Self {
            locale: locale.clone(),
            key,
            regex,
            extraction,
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn key(&self) -> StringKey {
        self.key
    }

    pub fn extraction(&self) -> Extraction {
        self.extraction
    }

    pub fn is_removal(&self) -> bool {
        self.key.is_removal()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Captures for the first match anywhere in `body`
    pub fn captures<'b>(&self, body: &'b str) -> Option<Captures<'b>> {
        self.regex.captures(body)
    }

    /// Build a reaction from this rule's captures
    ///
    /// Returns `None` when a required group did not participate, or when a
    /// generic "added" match names the sticker subject.
    pub fn extract(&self, captures: &Captures<'_>) -> Option<ParsedReaction> {
        let (emoji, text) = match self.extraction {
            Extraction::Tapback(kind) => (kind.emoji(), captures.get(1)?.as_str()),
            Extraction::Generic => {
                let subject = captures.get(1)?.as_str();
                if !self.is_removal() && subject == STICKER_SUBJECT {
                    return None;
                }
                (subject, captures.get(2)?.as_str())
            }
        };

        Some(ParsedReaction {
            emoji: emoji.to_string(),
            original_message_text: text.to_string(),
            is_removal: self.is_removal(),
        })
    }
}

/// Immutable, ordered pattern set shared by every parser
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    locales: Vec<Locale>,
    added: Vec<PatternRule>,
    removed: Vec<PatternRule>,
}

impl PatternCatalog {
    /// Build from the bundled string tables, discarding diagnostics
    pub fn from_bundled() -> Result<Self, CatalogError> {
        let strings = BundledStrings::new();
        build_catalog(&strings, &strings, &tapback_core::NoopObserver)
    }

    /// Accepted locales, English first
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// "Reaction added" rules in match order
    pub fn added(&self) -> &[PatternRule] {
        &self.added
    }

    /// "Reaction removed" rules in match order
    pub fn removed(&self) -> &[PatternRule] {
        &self.removed
    }

    pub fn supports(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    fn push_locale(&mut self, locale: Locale, rules: Vec<PatternRule>, seen: &mut HashSet<(StringKey, String)>) {
        for rule in rules {
            // An inherited English template would never win a second time
            if !seen.insert((rule.key, rule.pattern().to_string())) {
                continue;
            }
            if rule.is_removal() {
                self.removed.push(rule);
            } else {
                self.added.push(rule);
            }
        }
        self.locales.push(locale);
    }
}

/// Build the catalog from every discoverable locale
pub fn build_catalog(
    discovery: &dyn LocaleDiscovery,
    strings: &dyn StringsProvider,
    observer: &dyn ReactionObserver,
) -> Result<PatternCatalog, CatalogError> {
    build_catalog_for(discovery, strings, observer, &[])
}

/// Build the catalog, restricted to `allowed` locales when non-empty
///
/// English is always included. A locale is accepted only when at least one
/// of its templates differs from English; lookup or compile failures skip
/// the locale and are reported to `observer`.
pub fn build_catalog_for(
    discovery: &dyn LocaleDiscovery,
    strings: &dyn StringsProvider,
    observer: &dyn ReactionObserver,
    allowed: &[Locale],
) -> Result<PatternCatalog, CatalogError> {
    let english = Locale::english();
    let baseline = load_templates(strings, &english).map_err(|e| CatalogError::Baseline(e.to_string()))?;
    let baseline_rules = compile_rules(&english, &baseline).map_err(CatalogError::Baseline)?;

    let mut catalog = PatternCatalog {
        locales: Vec::new(),
        added: Vec::new(),
        removed: Vec::new(),
    };
    let mut seen = HashSet::new();
    catalog.push_locale(english, baseline_rules, &mut seen);

    let candidates = match discovery.candidate_locales() {
        Ok(candidates) => candidates,
        Err(e) => {
            observer.observe(ReactionEvent::LocaleDiscoveryFailed { reason: e.to_string() });
            Vec::new()
        }
    };

    for locale in candidates {
        if catalog.supports(&locale) || (!allowed.is_empty() && !allowed.contains(&locale)) {
            continue;
        }

        let templates = match load_templates(strings, &locale) {
            Ok(templates) => templates,
            Err(e) => {
                observer.observe(ReactionEvent::LocaleSkipped {
                    locale,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if templates == baseline {
            debug!(locale = %locale, "Locale has no translations, skipping");
            continue;
        }

        match compile_rules(&locale, &templates) {
            Ok(rules) => catalog.push_locale(locale, rules, &mut seen),
            Err(reason) => observer.observe(ReactionEvent::LocaleSkipped { locale, reason }),
        }
    }

    observer.observe(ReactionEvent::CatalogBuilt {
        locales: catalog.locales.clone(),
        added_patterns: catalog.added.len(),
        removed_patterns: catalog.removed.len(),
    });

    Ok(catalog)
}

fn load_templates(strings: &dyn StringsProvider, locale: &Locale) -> Result<Vec<String>, StringsError> {
    StringKey::ALL
        .into_iter()
        .map(|key| strings.localized(locale, key))
        .collect()
}

fn compile_rules(locale: &Locale, templates: &[String]) -> Result<Vec<PatternRule>, String> {
    StringKey::ALL
        .into_iter()
        .zip(templates)
        .map(|(key, template)| PatternRule::compile(locale, key, template))
        .collect()
}

/// Install the process-wide catalog; only the first call succeeds
pub fn install_global(catalog: PatternCatalog) -> Result<Arc<PatternCatalog>, CatalogError> {
    let catalog = Arc::new(catalog);
    GLOBAL
        .set(Arc::clone(&catalog))
        .map_err(|_| CatalogError::AlreadyInstalled)?;
    Ok(catalog)
}

/// The process-wide catalog, if installed
pub fn global() -> Option<Arc<PatternCatalog>> {
    GLOBAL.get().cloned()
}
