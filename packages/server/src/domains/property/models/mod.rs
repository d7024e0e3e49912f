pub mod draft;
pub mod photo;
pub mod property;
pub mod video;

pub use draft::{MediaSubmission, PropertyDraft, VideoSubmission};
pub use photo::PropertyPhoto;
pub use property::{ListingType, Property, PropertyRecord};
pub use video::{PropertyVideo, VideoPlatform};
