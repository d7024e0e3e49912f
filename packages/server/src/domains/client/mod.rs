pub mod activities;
pub mod data;
pub mod edges;
pub mod models;

pub use activities::{resolve_owner, NewOwnerFields, OwnerSpec};
pub use data::{ClientData, ClientEmailData, ClientPhoneData};
pub use models::{Client, ClientEmail, ClientPhone, ClientType, PhoneType};
