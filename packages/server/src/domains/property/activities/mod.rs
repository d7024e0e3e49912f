pub mod delete;
pub mod media;
pub mod save;
pub mod validate;

pub use delete::delete_property;
pub use media::{partition_photos, partition_videos, reconcile_photos, reconcile_videos};
pub use save::{create_property, update_property, SaveOutcome};
pub use validate::validate;
