pub mod inputs;
pub mod property;

pub use inputs::{MediaInput, PropertyInput, VideoLinkInput};
pub use property::{PropertyData, PropertyPhotoData, PropertyVideoData, SavePropertyResult};
