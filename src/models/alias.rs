//! Localized alternate names bound to a place.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{NameType, PlaceRef, WoeId};
use crate::error::{GazetteerError, Result};
use crate::store::Gazetteer;

/// A localized name record as loaded from storage.
///
/// The language code is lowercased at construction, so every read sees the
/// normalized form and codes differing only in case match each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    owner: WoeId,
    name: String,
    language_code: Option<String>,
    name_type: NameType,
}

impl Alias {
    pub fn new(
        owner: WoeId,
        name: impl Into<String>,
        name_type: NameType,
        language_code: Option<&str>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GazetteerError::InvalidRecord(format!(
                "alias of place {} has an empty name",
                owner
            )));
        }

        Ok(Self {
            owner,
            name,
            language_code: normalize_language(language_code),
            name_type,
        })
    }

    pub fn owner(&self) -> WoeId {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_deref()
    }

    pub fn name_type(&self) -> NameType {
        self.name_type
    }
}

fn normalize_language(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

/// Borrowed view of an alias inside a loaded [`Gazetteer`].
#[derive(Clone, Copy)]
pub struct AliasRef<'g> {
    gazetteer: &'g Gazetteer,
    idx: usize,
}

impl<'g> AliasRef<'g> {
    pub(crate) fn new(gazetteer: &'g Gazetteer, idx: usize) -> Self {
        Self { gazetteer, idx }
    }

    /// Underlying record
    pub fn record(&self) -> &'g Alias {
        &self.gazetteer.aliases[self.idx]
    }

    pub fn name(&self) -> &'g str {
        self.record().name()
    }

    /// Lowercase language code, or `None` if the alias has no language
    pub fn language_code(&self) -> Option<&'g str> {
        self.record().language_code()
    }

    pub fn name_type(&self) -> NameType {
        self.record().name_type()
    }

    /// The place owning this alias
    pub fn owner(&self) -> PlaceRef<'g> {
        PlaceRef::new(self.gazetteer, self.gazetteer.alias_owners[self.idx])
    }
}

impl PartialEq for AliasRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.gazetteer, other.gazetteer) && self.idx == other.idx
    }
}

impl Eq for AliasRef<'_> {}

impl Hash for AliasRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

impl fmt::Debug for AliasRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = self.record();
        f.debug_struct("AliasRef")
            .field("owner", &alias.owner)
            .field("name", &alias.name)
            .field("language_code", &alias.language_code)
            .field("name_type", &alias.name_type)
            .finish()
    }
}
