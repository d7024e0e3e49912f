pub mod client;

pub use client::{Client, ClientEmail, ClientPhone, ClientType, PhoneType};
