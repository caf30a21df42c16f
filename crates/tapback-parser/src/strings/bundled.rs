//! Built-in string tables
//!
//! Lookups fall back from the exact tag to its language, then to English,
//! so a regional variant without its own table (e.g. `en-GB`) resolves to
//! the English baseline and is filtered out of the catalog.

use tapback_core::Locale;

use super::{LocaleDiscovery, StringKey, StringsError, StringsProvider};

type Table = [&'static str; StringKey::COUNT];

// Rows follow StringKey::ALL order.
const EN: Table = [
    r#"(?s)^Reacted (\S+) to [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed (\S+) from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Loved [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed a (?:heart|love) from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Liked [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed a like from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Disliked [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed a dislike from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Laughed at [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed a laugh from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Emphasized [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed an exclamation from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Questioned [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed a question mark from [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Reacted (.+?) to [“"'‘](.+)[”"'’]$"#,
    r#"(?s)^Removed (.+?) from [“"'‘](.+)[”"'’]$"#,
];

const DE: Table = [
    r#"(?s)^Mit (\S+) auf [„"](.+)[“"] reagiert$"#,
    r#"(?s)^(\S+) von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat [„"](.+)[“"] geliebt$"#,
    r#"(?s)^Hat ein Herz von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat [„"](.+)[“"] gemocht$"#,
    r#"(?s)^Hat ein Like von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat [„"](.+)[“"] abgelehnt$"#,
    r#"(?s)^Hat ein Dislike von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat über [„"](.+)[“"] gelacht$"#,
    r#"(?s)^Hat ein Lachen von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat [„"](.+)[“"] hervorgehoben$"#,
    r#"(?s)^Hat eine Hervorhebung von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat [„"](.+)[“"] infrage gestellt$"#,
    r#"(?s)^Hat ein Fragezeichen von [„"](.+)[“"] entfernt$"#,
    r#"(?s)^Hat mit (.+?) auf [„"](.+)[“"] reagiert$"#,
    r#"(?s)^Hat (.+?) von [„"](.+)[“"] entfernt$"#,
];

const FR: Table = [
    r#"(?s)^A réagi avec (\S+) à [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré (\S+) de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A adoré [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré un cœur de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A aimé [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré un j’aime de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^N’a pas aimé [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré un je n’aime pas de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A ri de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré un rire de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A mis en évidence [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré une mise en évidence de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A mis en question [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré un point d’interrogation de [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A réagi avec (.+?) à [«“"]\s*(.+?)\s*[»”"]$"#,
    r#"(?s)^A retiré (.+?) de [«“"]\s*(.+?)\s*[»”"]$"#,
];

const ES: Table = [
    r#"(?s)^Reaccionó con (\S+) a [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó (\S+) de [“"«](.+)[”"»]$"#,
    r#"(?s)^Le encantó [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó un corazón de [“"«](.+)[”"»]$"#,
    r#"(?s)^Le gustó [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó un me gusta de [“"«](.+)[”"»]$"#,
    r#"(?s)^No le gustó [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó un no me gusta de [“"«](.+)[”"»]$"#,
    r#"(?s)^Se rió de [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó una risa de [“"«](.+)[”"»]$"#,
    r#"(?s)^Enfatizó [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó un énfasis de [“"«](.+)[”"»]$"#,
    r#"(?s)^Cuestionó [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó una interrogación de [“"«](.+)[”"»]$"#,
    r#"(?s)^Reaccionó con (.+?) a [“"«](.+)[”"»]$"#,
    r#"(?s)^Eliminó (.+?) de [“"«](.+)[”"»]$"#,
];

const TABLES: [(&str, &Table); 4] = [("en", &EN), ("de", &DE), ("fr", &FR), ("es", &ES)];

/// Locales offered for discovery, English first
const CANDIDATES: [&str; 5] = ["en", "de", "fr", "es", "en-GB"];

/// Provider and discovery backed by the built-in tables
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledStrings;

impl BundledStrings {
    pub fn new() -> Self {
        Self
    }

    /// English template for `key`
    pub fn english(key: StringKey) -> &'static str {
        EN[key.index()]
    }

    fn table(locale: &Locale) -> &'static Table {
        let find = |tag: &str| TABLES.iter().find(|(t, _)| *t == tag).map(|(_, table)| *table);
        find(locale.as_str())
            .or_else(|| find(locale.language()))
            .unwrap_or(&EN)
    }
}

impl StringsProvider for BundledStrings {
    fn localized(&self, locale: &Locale, key: StringKey) -> Result<String, StringsError> {
        Ok(Self::table(locale)[key.index()].to_string())
    }
}

impl LocaleDiscovery for BundledStrings {
    fn candidate_locales(&self) -> Result<Vec<Locale>, StringsError> {
        CANDIDATES
            .iter()
            .map(|tag| Locale::parse(tag).map_err(|e| StringsError::Discovery(e.to_string())))
            .collect()
    }
}
