//! sqlite-backed storage for the profile table.

pub mod connection;
pub mod profile_repository;

pub use connection::DbConnection;
pub use profile_repository::ProfileRepository;
