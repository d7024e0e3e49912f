pub mod activities;
pub mod data;
pub mod edges;
pub mod models;

pub use activities::{create_property, delete_property, update_property, SaveOutcome};
pub use data::{PropertyData, PropertyInput, SavePropertyResult};
pub use models::{ListingType, Property, PropertyPhoto, PropertyVideo, VideoPlatform};
