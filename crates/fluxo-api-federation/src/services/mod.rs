//! Federation orchestration.

mod federation_service;

pub use federation_service::FederationService;
