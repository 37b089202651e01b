//! GeoPlanet - a read-only hierarchical gazetteer
//!
//! This library loads a place graph once and answers navigation queries over
//! it: ancestors, children, siblings, neighbors and localized aliases.

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;

pub use error::{GazetteerError, Result};
pub use models::{Alias, AliasRef, NameType, Place, PlaceRef, PlaceType, WoeId};
pub use render::RenderFields;
pub use store::{Gazetteer, GazetteerBuilder, PlaceRepository};
