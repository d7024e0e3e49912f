pub mod client;

pub use client::{ClientData, ClientEmailData, ClientPhoneData};
