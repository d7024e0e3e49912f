pub mod organization;

pub use organization::OrganizationData;
