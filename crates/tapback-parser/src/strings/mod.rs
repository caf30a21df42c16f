//! Localized pattern templates
//!
//! Each locale supplies one regular-expression template per [`StringKey`].
//! Generic templates capture the emoji in group 1 and the quoted text in
//! group 2; tapback templates capture only the quoted text, in group 1.

mod bundled;
mod json;

use tapback_core::{Locale, TapbackKind};
use thiserror::Error;

pub use bundled::BundledStrings;
pub use json::JsonStringsProvider;

/// Names of the localized templates a catalog needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StringKey {
    ProviderAdded,
    ProviderRemoved,
    LovedAdded,
    LovedRemoved,
    LikedAdded,
    LikedRemoved,
    DislikedAdded,
    DislikedRemoved,
    LaughedAdded,
    LaughedRemoved,
    EmphasizedAdded,
    EmphasizedRemoved,
    QuestionedAdded,
    QuestionedRemoved,
    GenericAdded,
    GenericRemoved,
}

impl StringKey {
    pub const COUNT: usize = 16;

    /// Every key in catalog order: provider pair, tapback pairs, generic pair
    pub const ALL: [StringKey; Self::COUNT] = [
        Self::ProviderAdded,
        Self::ProviderRemoved,
        Self::LovedAdded,
        Self::LovedRemoved,
        Self::LikedAdded,
        Self::LikedRemoved,
        Self::DislikedAdded,
        Self::DislikedRemoved,
        Self::LaughedAdded,
        Self::LaughedRemoved,
        Self::EmphasizedAdded,
        Self::EmphasizedRemoved,
        Self::QuestionedAdded,
        Self::QuestionedRemoved,
        Self::GenericAdded,
        Self::GenericRemoved,
    ];

    /// Resource name, as used in JSON string tables
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProviderAdded => "emoji_reaction_provider_added",
            Self::ProviderRemoved => "emoji_reaction_provider_removed",
            Self::LovedAdded => "emoji_reaction_loved_added",
            Self::LovedRemoved => "emoji_reaction_loved_removed",
            Self::LikedAdded => "emoji_reaction_liked_added",
            Self::LikedRemoved => "emoji_reaction_liked_removed",
            Self::DislikedAdded => "emoji_reaction_disliked_added",
            Self::DislikedRemoved => "emoji_reaction_disliked_removed",
            Self::LaughedAdded => "emoji_reaction_laughed_added",
            Self::LaughedRemoved => "emoji_reaction_laughed_removed",
            Self::EmphasizedAdded => "emoji_reaction_emphasized_added",
            Self::EmphasizedRemoved => "emoji_reaction_emphasized_removed",
            Self::QuestionedAdded => "emoji_reaction_questioned_added",
            Self::QuestionedRemoved => "emoji_reaction_questioned_removed",
            Self::GenericAdded => "emoji_reaction_generic_added",
            Self::GenericRemoved => "emoji_reaction_generic_removed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Position of this key in [`StringKey::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_removal(self) -> bool {
        matches!(
            self,
            Self::ProviderRemoved
                | Self::LovedRemoved
                | Self::LikedRemoved
                | Self::DislikedRemoved
                | Self::LaughedRemoved
                | Self::EmphasizedRemoved
                | Self::QuestionedRemoved
                | Self::GenericRemoved
        )
    }

    /// Tapback kind for named tapback keys, `None` for generic keys
    pub const fn tapback(self) -> Option<TapbackKind> {
        match self {
            Self::LovedAdded | Self::LovedRemoved => Some(TapbackKind::Loved),
            Self::LikedAdded | Self::LikedRemoved => Some(TapbackKind::Liked),
            Self::DislikedAdded | Self::DislikedRemoved => Some(TapbackKind::Disliked),
            Self::LaughedAdded | Self::LaughedRemoved => Some(TapbackKind::Laughed),
            Self::EmphasizedAdded | Self::EmphasizedRemoved => Some(TapbackKind::Emphasized),
            Self::QuestionedAdded | Self::QuestionedRemoved => Some(TapbackKind::Questioned),
            Self::ProviderAdded | Self::ProviderRemoved | Self::GenericAdded | Self::GenericRemoved => None,
        }
    }

    /// Key for a tapback kind's added or removed template
    pub const fn for_tapback(kind: TapbackKind, removal: bool) -> Self {
        match (kind, removal) {
            (TapbackKind::Loved, false) => Self::LovedAdded,
            (TapbackKind::Loved, true) => Self::LovedRemoved,
            (TapbackKind::Liked, false) => Self::LikedAdded,
            (TapbackKind::Liked, true) => Self::LikedRemoved,
            (TapbackKind::Disliked, false) => Self::DislikedAdded,
            (TapbackKind::Disliked, true) => Self::DislikedRemoved,
            (TapbackKind::Laughed, false) => Self::LaughedAdded,
            (TapbackKind::Laughed, true) => Self::LaughedRemoved,
            (TapbackKind::Emphasized, false) => Self::EmphasizedAdded,
            (TapbackKind::Emphasized, true) => Self::EmphasizedRemoved,
            (TapbackKind::Questioned, false) => Self::QuestionedAdded,
            (TapbackKind::Questioned, true) => Self::QuestionedRemoved,
        }
    }

    /// Number of capture groups the template must define
    pub const fn required_groups(self) -> usize {
        if self.tapback().is_some() {
            1
        } else {
            2
        }
    }
}

impl std::fmt::Display for StringKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while looking up localized strings
#[derive(Debug, Error)]
pub enum StringsError {
    #[error("missing string {key} for locale {locale}")]
    MissingString { locale: Locale, key: StringKey },

    #[error("invalid string table for locale {locale}: {reason}")]
    InvalidTable { locale: Locale, reason: String },

    #[error("locale discovery failed: {0}")]
    Discovery(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies localized template strings
pub trait StringsProvider: Send + Sync {
    fn localized(&self, locale: &Locale, key: StringKey) -> Result<String, StringsError>;
}

/// Enumerates candidate locales in a stable order
pub trait LocaleDiscovery: Send + Sync {
    fn candidate_locales(&self) -> Result<Vec<Locale>, StringsError>;
}
