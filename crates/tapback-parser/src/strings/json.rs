//! String tables loaded from a directory of `<locale>.json` files
//!
//! Each file maps resource names (see [`StringKey::as_str`]) to templates:
//!
//! ```json
//! { "emoji_reaction_liked_added": "(?s)^Gefällt [„\"](.+)[“\"]$" }
//! ```
//!
//! Keys a table leaves out resolve through the language table, then the
//! English table, then the bundled English strings. A file that fails to
//! parse makes every lookup for its locale fail, except `en.json`, which is
//! replaced by the bundled English strings.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tapback_core::Locale;
use tracing::{debug, warn};

use super::{BundledStrings, LocaleDiscovery, StringKey, StringsError, StringsProvider};

type LoadedTable = Result<HashMap<StringKey, String>, String>;

#[derive(Debug, Clone)]
pub struct JsonStringsProvider {
    dir: PathBuf,
    tables: BTreeMap<Locale, LoadedTable>,
}

impl JsonStringsProvider {
    /// Load every `*.json` table in `dir`
    ///
    /// Files whose stem is not a valid locale tag are ignored.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StringsError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&dir).map_err(|source| StringsError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut tables = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StringsError::Io {
                    path: dir.display().to_string(),
                    source,
                })?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let locale = match Locale::parse(stem) {
                Ok(locale) => locale,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring string table with invalid locale name");
                    continue;
                }
            };

            let table = Self::load_table(&path);
            if let Err(reason) = &table {
                if locale.is_english() {
                    warn!(reason = %reason, "English string table failed to load, using bundled English");
                } else {
                    warn!(locale = %locale, reason = %reason, "String table failed to load");
                }
            }
            tables.insert(locale, table);
        }

        debug!(dir = %dir.display(), tables = tables.len(), "Loaded string tables");
        Ok(Self { dir, tables })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_table(path: &Path) -> LoadedTable {
        let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| e.to_string())?;

        let mut table = HashMap::with_capacity(entries.len());
        for (name, template) in entries {
            match StringKey::from_name(&name) {
                Some(key) => {
                    table.insert(key, template);
                }
                None => debug!(path = %path.display(), key = %name, "Ignoring unknown string key"),
            }
        }
        Ok(table)
    }

    /// Look up `key` in the table for exactly `locale`
    fn lookup(&self, locale: &Locale, key: StringKey) -> Result<Option<String>, StringsError> {
        match self.tables.get(locale) {
            Some(Ok(table)) => Ok(table.get(&key).cloned()),
            Some(Err(reason)) => Err(StringsError::InvalidTable {
                locale: locale.clone(),
                reason: reason.clone(),
            }),
            None => Ok(None),
        }
    }

    /// English template from `en.json`, or the bundled one
    fn english(&self, key: StringKey) -> String {
        match self.tables.get(&Locale::english()) {
            Some(Ok(table)) => table.get(&key).cloned(),
            _ => None,
        }
        .unwrap_or_else(|| BundledStrings::english(key).to_string())
    }
}

impl StringsProvider for JsonStringsProvider {
    fn localized(&self, locale: &Locale, key: StringKey) -> Result<String, StringsError> {
        if locale.is_english() {
            return Ok(self.english(key));
        }
        if let Some(template) = self.lookup(locale, key)? {
            return Ok(template);
        }

        if locale.language() != locale.as_str() {
            if let Ok(language) = Locale::parse(locale.language()) {
                if !language.is_english() {
                    if let Some(template) = self.lookup(&language, key)? {
                        return Ok(template);
                    }
                }
            }
        }

        Ok(self.english(key))
    }
}

impl LocaleDiscovery for JsonStringsProvider {
    /// English first, then the remaining tables in tag order
    fn candidate_locales(&self) -> Result<Vec<Locale>, StringsError> {
        let english = Locale::english();
        let mut locales = vec![english.clone()];
        locales.extend(self.tables.keys().filter(|locale| **locale != english).cloned());
        Ok(locales)
    }
}
