pub mod data;
pub mod edges;
pub mod models;

pub use data::NoteData;
pub use models::{Note, Noteable, NoteableType};
