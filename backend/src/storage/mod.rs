//! Storage layer: the sqlite-backed profile table and the file-backed
//! family dataset, behind the traits in [`traits`].

pub mod file;
pub mod sqlite;
pub mod traits;

pub use traits::{FamilyStorage, ProfileStorage};
