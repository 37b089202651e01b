//! Storage layer: builds the immutable place graph the core navigates.
//!
//! [`GazetteerBuilder`] stages records while a dataset is loaded and resolves
//! every reference once in [`GazetteerBuilder::build`]. The resulting
//! [`Gazetteer`] is read-only; writes are rejected through [`PlaceRepository`].

pub mod loader;
mod repository;

pub use loader::{load, load_aliases, load_adjacencies, load_places};
pub use repository::PlaceRepository;

use hashbrown::HashMap;

use crate::error::{GazetteerError, Result};
use crate::models::{Alias, Place, PlaceRef, WoeId};

/// Staging area for records read from storage.
#[derive(Debug, Default)]
pub struct GazetteerBuilder {
    places: Vec<Place>,
    aliases: Vec<Alias>,
    adjacencies: Vec<(WoeId, WoeId)>,
}

impl GazetteerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_place(&mut self, place: Place) -> &mut Self {
        self.places.push(place);
        self
    }

    pub fn add_alias(&mut self, alias: Alias) -> &mut Self {
        self.aliases.push(alias);
        self
    }

    /// Record that two places are adjacent. Adjacency is symmetric.
    pub fn add_adjacency(&mut self, place: WoeId, neighbor: WoeId) -> &mut Self {
        self.adjacencies.push((place, neighbor));
        self
    }

    /// Resolve all references and freeze the graph.
    ///
    /// Parent cycles are kept as loaded; see [`Gazetteer::validate`].
    pub fn build(self) -> Result<Gazetteer> {
        let mut places = self.places;
        places.sort_by_key(Place::woe_id);

        let mut index = HashMap::with_capacity(places.len());
        for (idx, place) in places.iter().enumerate() {
            if index.insert(place.woe_id(), idx).is_some() {
                return Err(GazetteerError::DuplicatePlace(place.woe_id()));
            }
        }

        let resolve = |from: WoeId, to: WoeId, relation: &'static str| {
            index
                .get(&to)
                .copied()
                .ok_or(GazetteerError::DanglingReference { from, to, relation })
        };

        // Parent pointers and the inverse children index
        let mut parents = Vec::with_capacity(places.len());
        let mut children = vec![Vec::new(); places.len()];
        for (idx, place) in places.iter().enumerate() {
            let parent = match place.parent {
                Some(parent) => Some(resolve(place.woe_id(), parent, "parent")?),
                None => None,
            };
            if let Some(parent) = parent {
                children[parent].push(idx);
            }
            parents.push(parent);
        }

        let mut neighbors = vec![Vec::new(); places.len()];
        for (place, neighbor) in self.adjacencies {
            let a = resolve(place, place, "adjacency")?;
            let b = resolve(place, neighbor, "neighbor")?;
            if a == b {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        let mut alias_owners = Vec::with_capacity(self.aliases.len());
        let mut place_aliases = vec![Vec::new(); places.len()];
        for (idx, alias) in self.aliases.iter().enumerate() {
            let owner = resolve(alias.owner(), alias.owner(), "alias owner")?;
            alias_owners.push(owner);
            place_aliases[owner].push(idx);
        }

        Ok(Gazetteer {
            places,
            index,
            parents,
            children,
            neighbors,
            aliases: self.aliases,
            alias_owners,
            place_aliases,
        })
    }
}

/// Immutable, fully indexed place graph.
///
/// Navigation over a `Gazetteer` is side-effect free and safe to run from
/// many threads at once.
#[derive(Debug)]
pub struct Gazetteer {
    pub(crate) places: Vec<Place>,
    index: HashMap<WoeId, usize>,
    pub(crate) parents: Vec<Option<usize>>,
    pub(crate) children: Vec<Vec<usize>>,
    pub(crate) neighbors: Vec<Vec<usize>>,
    pub(crate) aliases: Vec<Alias>,
    pub(crate) alias_owners: Vec<usize>,
    pub(crate) place_aliases: Vec<Vec<usize>>,
}

impl Gazetteer {
    /// Look up a place, failing if it was never loaded
    pub fn place(&self, woe_id: WoeId) -> Result<PlaceRef<'_>> {
        self.get(woe_id).ok_or(GazetteerError::UnknownPlace(woe_id))
    }

    pub fn get(&self, woe_id: WoeId) -> Option<PlaceRef<'_>> {
        self.index
            .get(&woe_id)
            .map(|&idx| PlaceRef::new(self, idx))
    }

    /// Iterate over all places in WOEID order
    pub fn places(&self) -> impl Iterator<Item = PlaceRef<'_>> {
        (0..self.places.len()).map(move |idx| PlaceRef::new(self, idx))
    }

    /// Places without a parent
    pub fn roots(&self) -> Vec<PlaceRef<'_>> {
        self.places().filter(PlaceRef::is_root).collect()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Places whose default name or any alias equals `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Vec<PlaceRef<'_>> {
        let needle = name.trim().to_lowercase();

        let mut found: Vec<usize> = self
            .places
            .iter()
            .enumerate()
            .filter(|(_, place)| place.toponym.name.to_lowercase() == needle)
            .map(|(idx, _)| idx)
            .collect();

        found.extend(
            self.aliases
                .iter()
                .zip(&self.alias_owners)
                .filter(|(alias, _)| alias.name().to_lowercase() == needle)
                .map(|(_, &owner)| owner),
        );

        found.sort_unstable();
        found.dedup();
        found
            .into_iter()
            .map(|idx| PlaceRef::new(self, idx))
            .collect()
    }

    /// WOEIDs of every place sitting on a parent cycle, ascending.
    ///
    /// An empty result means every ancestor chain terminates at a root.
    pub fn validate(&self) -> Vec<WoeId> {
        const NEW: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![NEW; self.places.len()];
        let mut on_cycle = vec![false; self.places.len()];

        for start in 0..self.places.len() {
            if state[start] != NEW {
                continue;
            }

            let mut path = Vec::new();
            let mut current = Some(start);
            while let Some(idx) = current {
                match state[idx] {
                    NEW => {
                        state[idx] = ON_PATH;
                        path.push(idx);
                        current = self.parents[idx];
                    }
                    ON_PATH => {
                        if let Some(pos) = path.iter().position(|&p| p == idx) {
                            for &p in &path[pos..] {
                                on_cycle[p] = true;
                            }
                        }
                        break;
                    }
                    _ => break,
                }
            }

            for idx in path {
                state[idx] = DONE;
            }
        }

        on_cycle
            .iter()
            .enumerate()
            .filter(|(_, &cyclic)| cyclic)
            .map(|(idx, _)| self.places[idx].woe_id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameType, PlaceType};

    #[test]
    fn test_empty_gazetteer() {
        let gazetteer = GazetteerBuilder::new().build().unwrap();
        assert!(gazetteer.is_empty());
        assert!(gazetteer.roots().is_empty());
        assert!(gazetteer.validate().is_empty());
    }

    #[test]
    fn test_duplicate_place_rejected() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(1), "Earth", PlaceType::Supername));
        builder.add_place(Place::new(WoeId(1), "Earth again", PlaceType::Supername));
        assert_eq!(
            builder.build().unwrap_err(),
            GazetteerError::DuplicatePlace(WoeId(1))
        );
    }

    #[test]
    fn test_dangling_parent_rejected() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(2), "Orphan", PlaceType::Town).with_parent(WoeId(99)));
        assert_eq!(
            builder.build().unwrap_err(),
            GazetteerError::DanglingReference {
                from: WoeId(2),
                to: WoeId(99),
                relation: "parent"
            }
        );
    }

    #[test]
    fn test_dangling_alias_owner_rejected() {
        let mut builder = GazetteerBuilder::new();
        builder.add_alias(Alias::new(WoeId(5), "Nowhere", NameType::V, None).unwrap());
        assert!(matches!(
            builder.build(),
            Err(GazetteerError::DanglingReference { to: WoeId(5), .. })
        ));
    }

    #[test]
    fn test_neighbors_symmetric_and_deduplicated() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(23424829), "Germany", PlaceType::Country));
        builder.add_place(Place::new(WoeId(23424957), "Switzerland", PlaceType::Country));
        builder
            .add_adjacency(WoeId(23424829), WoeId(23424957))
            .add_adjacency(WoeId(23424957), WoeId(23424829))
            .add_adjacency(WoeId(23424829), WoeId(23424829));
        let gazetteer = builder.build().unwrap();

        let germany = gazetteer.place(WoeId(23424829)).unwrap();
        let switzerland = gazetteer.place(WoeId(23424957)).unwrap();
        assert_eq!(germany.neighbors(), vec![switzerland]);
        assert_eq!(switzerland.neighbors(), vec![germany]);
    }

    #[test]
    fn test_find_by_name_matches_aliases() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(2459115), "New York", PlaceType::Town));
        builder.add_place(Place::new(WoeId(2347591), "New York", PlaceType::State));
        builder.add_alias(Alias::new(WoeId(2459115), "Big Apple", NameType::S, Some("en")).unwrap());
        let gazetteer = builder.build().unwrap();

        assert_eq!(gazetteer.find_by_name("new york").len(), 2);
        let found = gazetteer.find_by_name("BIG APPLE");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].woe_id(), WoeId(2459115));
        assert!(gazetteer.find_by_name("Gotham").is_empty());
    }

    #[test]
    fn test_validate_reports_cycle_members_only() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(1), "A", PlaceType::Zone).with_parent(WoeId(2)));
        builder.add_place(Place::new(WoeId(2), "B", PlaceType::Zone).with_parent(WoeId(1)));
        builder.add_place(Place::new(WoeId(3), "C", PlaceType::Zone).with_parent(WoeId(1)));
        builder.add_place(Place::new(WoeId(4), "D", PlaceType::Zone));
        let gazetteer = builder.build().unwrap();

        assert_eq!(gazetteer.validate(), vec![WoeId(1), WoeId(2)]);
    }

    #[test]
    fn test_unknown_place() {
        let gazetteer = GazetteerBuilder::new().build().unwrap();
        assert_eq!(
            gazetteer.place(WoeId(42)).unwrap_err(),
            GazetteerError::UnknownPlace(WoeId(42))
        );
    }
}
