pub mod note;

pub use note::{Note, Noteable, NoteableType};
