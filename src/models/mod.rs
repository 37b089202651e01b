//! Core data models of the gazetteer.

pub mod alias;
pub mod language;
pub mod place;
pub mod types;

pub use alias::{Alias, AliasRef};
pub use language::{language_of, same_language};
pub use place::{Place, PlaceRef, Toponym, WoeId};
pub use types::{NameType, PlaceType};
