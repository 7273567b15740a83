//! Domain layer: services, commands, models and the dataset validator.

pub mod access_policy;
pub mod commands;
pub mod family_service;
pub mod family_validator;
pub mod models;
pub mod profile_service;

pub use family_service::FamilyService;
pub use profile_service::ProfileService;
