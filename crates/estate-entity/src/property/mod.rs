//! Property listing entities and client input coercion.

pub mod input;
pub mod model;

pub use input::{NewProperty, PropertyChanges, RawPropertyFields};
pub use model::Property;
