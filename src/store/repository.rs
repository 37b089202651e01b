//! Write policy for the loaded dataset.

use super::Gazetteer;
use crate::error::{GazetteerError, Result};
use crate::models::{Alias, Place, WoeId};

/// Write operations a place store may offer.
///
/// The GeoPlanet dataset is read-only once loaded, so the [`Gazetteer`]
/// rejects every call before touching any state.
pub trait PlaceRepository {
    fn persist_place(&mut self, place: Place) -> Result<()>;
    fn update_place(&mut self, place: Place) -> Result<()>;
    fn reparent_place(&mut self, woe_id: WoeId, parent: Option<WoeId>) -> Result<()>;
    fn remove_place(&mut self, woe_id: WoeId) -> Result<()>;
    fn persist_alias(&mut self, alias: Alias) -> Result<()>;
    fn update_alias(&mut self, alias: Alias) -> Result<()>;
    fn remove_alias(&mut self, alias: &Alias) -> Result<()>;
}

fn reject(entity: &'static str, operation: &'static str) -> Result<()> {
    Err(GazetteerError::ReadOnlyViolation { entity, operation })
}

impl PlaceRepository for Gazetteer {
    fn persist_place(&mut self, _place: Place) -> Result<()> {
        reject("Place", "persist")
    }

    fn update_place(&mut self, _place: Place) -> Result<()> {
        reject("Place", "update")
    }

    fn reparent_place(&mut self, _woe_id: WoeId, _parent: Option<WoeId>) -> Result<()> {
        reject("Place", "reparent")
    }

    fn remove_place(&mut self, _woe_id: WoeId) -> Result<()> {
        reject("Place", "remove")
    }

    fn persist_alias(&mut self, _alias: Alias) -> Result<()> {
        reject("Alias", "persist")
    }

    fn update_alias(&mut self, _alias: Alias) -> Result<()> {
        reject("Alias", "update")
    }

    fn remove_alias(&mut self, _alias: &Alias) -> Result<()> {
        reject("Alias", "remove")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameType, PlaceType};
    use crate::store::GazetteerBuilder;

    #[test]
    fn test_all_writes_rejected_without_side_effects() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(Place::new(WoeId(1), "Earth", PlaceType::Supername));
        builder.add_place(Place::new(WoeId(24865670), "Africa", PlaceType::Continent).with_parent(WoeId(1)));
        let mut gazetteer = builder.build().unwrap();

        let alias = Alias::new(WoeId(1), "Terra", NameType::S, Some("la")).unwrap();
        assert_eq!(
            gazetteer.persist_alias(alias.clone()),
            Err(GazetteerError::ReadOnlyViolation {
                entity: "Alias",
                operation: "persist"
            })
        );
        assert_eq!(
            gazetteer.update_alias(alias.clone()),
            Err(GazetteerError::ReadOnlyViolation {
                entity: "Alias",
                operation: "update"
            })
        );
        assert!(gazetteer.remove_alias(&alias).is_err());
        assert!(gazetteer
            .persist_place(Place::new(WoeId(2), "Mars", PlaceType::Supername))
            .is_err());
        assert!(gazetteer
            .update_place(Place::new(WoeId(1), "Terra", PlaceType::Supername))
            .is_err());
        assert!(gazetteer.reparent_place(WoeId(24865670), None).is_err());
        assert!(gazetteer.remove_place(WoeId(1)).is_err());

        assert_eq!(gazetteer.len(), 2);
        assert_eq!(gazetteer.alias_count(), 0);
        let africa = gazetteer.place(WoeId(24865670)).unwrap();
        assert_eq!(africa.parent().map(|p| p.woe_id()), Some(WoeId(1)));
        assert_eq!(gazetteer.place(WoeId(1)).unwrap().name(), "Earth");
    }
}
