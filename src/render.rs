//! Exposes the semantic fields of gazetteer entities to a renderer.
//!
//! The output encoding is up to the caller; [`RenderFields::render_as_map`]
//! covers the common JSON case.

use serde_json::{Map, Value};

use crate::models::{AliasRef, PlaceRef};

/// Capability shared by every renderable entity.
pub trait RenderFields {
    /// Field name/value pairs in a stable order. Absent values are `Null`.
    fn render_fields(&self) -> Vec<(&'static str, Value)>;

    fn render_as_map(&self) -> Map<String, Value> {
        self.render_fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

impl RenderFields for AliasRef<'_> {
    fn render_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::String(self.name().to_string())),
            ("languageCode", optional(self.language_code())),
            ("nameType", Value::String(self.name_type().to_string())),
        ]
    }
}

impl RenderFields for PlaceRef<'_> {
    fn render_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            // Toponym identity
            ("woeId", Value::from(self.woe_id().0)),
            ("name", Value::String(self.name().to_string())),
            ("isoCode", optional(self.iso_code())),
            ("languageCode", optional(self.language_code())),
            ("placeType", Value::String(self.place_type().to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alias, NameType, Place, PlaceType, WoeId};
    use crate::store::GazetteerBuilder;
    use serde_json::json;

    #[test]
    fn test_render_alias_and_place() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place(
            Place::new(WoeId(2459115), "New York", PlaceType::Town)
                .with_iso_code("US")
                .with_language_code("ENG"),
        );
        builder.add_alias(Alias::new(WoeId(2459115), "NYC", NameType::A, None).unwrap());
        let gazetteer = builder.build().unwrap();
        let place = gazetteer.place(WoeId(2459115)).unwrap();

        assert_eq!(
            Value::Object(place.render_as_map()),
            json!({
                "woeId": 2459115,
                "name": "New York",
                "isoCode": "US",
                "languageCode": "ENG",
                "placeType": "Town",
            })
        );

        let alias = place.aliases()[0];
        assert_eq!(
            Value::Object(alias.render_as_map()),
            json!({"name": "NYC", "languageCode": null, "nameType": "A"})
        );
    }
}
