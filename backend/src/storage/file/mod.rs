//! File-backed storage for the family dataset.

pub mod connection;
pub mod family_store;

pub use connection::FileConnection;
pub use family_store::FamilyFileStore;
