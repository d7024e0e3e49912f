//! Typed ID aliases for all domain entities.
//!
//! One marker type per entity keeps ids incompatible at compile time; the
//! aliases below are the primary API used throughout the crate.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Organization entities (tenants).
pub struct Organization;

/// Marker type for Member entities (agents / CRM users).
pub struct Member;

/// Marker type for Client entities (buyers, owners, renters).
pub struct Client;

/// Marker type for ClientPhone rows.
pub struct ClientPhone;

/// Marker type for ClientEmail rows.
pub struct ClientEmail;

/// Marker type for Property entities (listings).
pub struct Property;

/// Marker type for PropertyPhoto rows.
pub struct PropertyPhoto;

/// Marker type for PropertyVideo rows.
pub struct PropertyVideo;

/// Marker type for Note entities.
pub struct Note;

/// Marker type for Noteable link rows.
pub struct Noteable;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type OrganizationId = Id<Organization>;
pub type MemberId = Id<Member>;
pub type ClientId = Id<Client>;
pub type ClientPhoneId = Id<ClientPhone>;
pub type ClientEmailId = Id<ClientEmail>;
pub type PropertyId = Id<Property>;
pub type PhotoId = Id<PropertyPhoto>;
pub type VideoId = Id<PropertyVideo>;
pub type NoteId = Id<Note>;
pub type NoteableId = Id<Noteable>;
