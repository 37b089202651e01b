//! Places and hierarchy navigation.
//!
//! A [`Place`] is a plain record; navigation goes through [`PlaceRef`], a
//! borrowed handle into the immutable [`Gazetteer`] that owns every place,
//! alias and relationship index.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::language::{language_of, same_language};
use super::{AliasRef, NameType, PlaceType};
use crate::error::{GazetteerError, Result};
use crate::store::Gazetteer;

/// Yahoo! "Where On Earth" identifier of a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WoeId(pub u64);

impl fmt::Display for WoeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity shared by every named geographic entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toponym {
    pub woe_id: WoeId,

    /// Default (resident language) name
    pub name: String,

    /// ISO 3166-1 country code, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
}

/// A node of the geographic tree as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub toponym: Toponym,

    /// Language of the default name, exposed as given by the data source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    pub place_type: PlaceType,

    /// Direct parent; `None` for roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<WoeId>,
}

impl Place {
    /// Create a root place with minimal required fields
    pub fn new(woe_id: WoeId, name: impl Into<String>, place_type: PlaceType) -> Self {
        Self {
            toponym: Toponym {
                woe_id,
                name: name.into(),
                iso_code: None,
            },
            language_code: None,
            place_type,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: WoeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_iso_code(mut self, iso_code: impl Into<String>) -> Self {
        self.toponym.iso_code = Some(iso_code.into());
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn woe_id(&self) -> WoeId {
        self.toponym.woe_id
    }
}

/// Borrowed view of a place inside a loaded [`Gazetteer`].
///
/// Equality and hashing use place identity (the WOEID within one gazetteer),
/// never field values.
/// Every collection returned is a fresh snapshot; nothing handed out can
/// mutate the gazetteer.
#[derive(Clone, Copy)]
pub struct PlaceRef<'g> {
    gazetteer: &'g Gazetteer,
    idx: usize,
}

impl<'g> PlaceRef<'g> {
    pub(crate) fn new(gazetteer: &'g Gazetteer, idx: usize) -> Self {
        Self { gazetteer, idx }
    }

    /// Underlying record
    pub fn record(&self) -> &'g Place {
        &self.gazetteer.places[self.idx]
    }

    pub fn woe_id(&self) -> WoeId {
        self.record().woe_id()
    }

    pub fn name(&self) -> &'g str {
        &self.record().toponym.name
    }

    pub fn iso_code(&self) -> Option<&'g str> {
        self.record().toponym.iso_code.as_deref()
    }

    pub fn language_code(&self) -> Option<&'g str> {
        self.record().language_code.as_deref()
    }

    pub fn place_type(&self) -> PlaceType {
        self.record().place_type
    }

    /// The direct parent of this place, or `None` if it is a root
    pub fn parent(&self) -> Option<PlaceRef<'g>> {
        self.gazetteer.parents[self.idx].map(|idx| PlaceRef::new(self.gazetteer, idx))
    }

    pub fn is_root(&self) -> bool {
        self.gazetteer.parents[self.idx].is_none()
    }

    /// Direct children, served from the index built at load time
    pub fn children(&self) -> Vec<PlaceRef<'g>> {
        self.refs(&self.gazetteer.children[self.idx])
    }

    /// All places sharing this place's parent and place type.
    ///
    /// This place is never its own sibling. A root has no siblings.
    pub fn siblings(&self) -> Vec<PlaceRef<'g>> {
        let Some(parent) = self.parent() else {
            return Vec::new();
        };

        let place_type = self.place_type();
        parent
            .children()
            .into_iter()
            .filter(|candidate| candidate.place_type() == place_type)
            .filter(|candidate| candidate != self)
            .collect()
    }

    /// All places strictly above this one, nearest first.
    ///
    /// Climbs iteratively so deep chains cannot exhaust the stack. Fails with
    /// [`GazetteerError::Structural`] if the chain revisits a place.
    pub fn ancestors(&self) -> Result<Vec<PlaceRef<'g>>> {
        let mut seen = HashSet::new();
        seen.insert(self.idx);

        let mut ancestors = Vec::new();
        let mut current = self.parent();

        while let Some(place) = current {
            if !seen.insert(place.idx) {
                return Err(GazetteerError::Structural {
                    start: self.woe_id(),
                    repeated: place.woe_id(),
                });
            }
            ancestors.push(place);
            current = place.parent();
        }

        Ok(ancestors)
    }

    /// All places strictly below this one, breadth first.
    pub fn descendants(&self) -> Result<Vec<PlaceRef<'g>>> {
        let mut seen = HashSet::new();
        seen.insert(self.idx);

        let mut descendants = Vec::new();
        let mut cursor = 0;
        let mut frontier = self.children();

        loop {
            for place in frontier {
                // In a tree every place is reached through exactly one parent
                if !seen.insert(place.idx) {
                    return Err(GazetteerError::Structural {
                        start: self.woe_id(),
                        repeated: place.woe_id(),
                    });
                }
                descendants.push(place);
            }

            let Some(next) = descendants.get(cursor) else {
                break;
            };
            frontier = next.children();
            cursor += 1;
        }

        Ok(descendants)
    }

    /// Adjacent places. No direction or transitivity is implied.
    pub fn neighbors(&self) -> Vec<PlaceRef<'g>> {
        self.refs(&self.gazetteer.neighbors[self.idx])
    }

    /// Aliases owned by this place, in load order
    pub fn aliases(&self) -> Vec<AliasRef<'g>> {
        self.gazetteer.place_aliases[self.idx]
            .iter()
            .map(|&idx| AliasRef::new(self.gazetteer, idx))
            .collect()
    }

    /// The qualified (Q) alias for the language of `locale`.
    ///
    /// The locale's language may be given in ISO 639-1 (`"zh"`) or 639-2
    /// (`"zho"`, `"chi"`) form; it matches aliases tagged with any of them.
    /// When several Q aliases share the language, the first in load order wins.
    pub fn preferred_alias(&self, locale: &str) -> Result<AliasRef<'g>> {
        let language = language_of(locale);

        self.aliases()
            .into_iter()
            .find(|alias| {
                alias.name_type() == NameType::Q
                    && alias
                        .language_code()
                        .is_some_and(|code| same_language(code, &language))
            })
            .ok_or_else(|| GazetteerError::NotFound {
                locale: locale.to_string(),
                woe_id: self.woe_id(),
                name: self.name().to_string(),
            })
    }

    /// Best human-readable name for `locale`.
    ///
    /// Falls back from the preferred alias to the English preferred (P) alias
    /// for English locales, and finally to the default name.
    pub fn display_name(&self, locale: &str) -> &'g str {
        if let Ok(alias) = self.preferred_alias(locale) {
            return alias.name();
        }

        if same_language(&language_of(locale), "en") {
            if let Some(alias) = self
                .aliases()
                .into_iter()
                .find(|alias| alias.name_type() == NameType::P)
            {
                return alias.name();
            }
        }

        self.name()
    }

    fn refs(&self, indices: &[usize]) -> Vec<PlaceRef<'g>> {
        indices
            .iter()
            .map(|&idx| PlaceRef::new(self.gazetteer, idx))
            .collect()
    }
}

impl PartialEq for PlaceRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.gazetteer, other.gazetteer) && self.idx == other.idx
    }
}

impl Eq for PlaceRef<'_> {}

impl Hash for PlaceRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.woe_id().hash(state);
    }
}

impl fmt::Debug for PlaceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceRef")
            .field("woe_id", &self.woe_id())
            .field("name", &self.name())
            .field("place_type", &self.place_type())
            .finish()
    }
}
