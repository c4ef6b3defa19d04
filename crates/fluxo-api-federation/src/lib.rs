//! Federated identity API for fluxo.
//!
//! Drives the OAuth2 authorization-code grant against the supported
//! identity providers and disambiguates two flows that must never be
//! conflated: logging in *via* a provider (mints a session credential) and
//! *linking* a provider to an already-authenticated account (stores an
//! external identity, leaves the session untouched).
//!
//! Token exchange and user-info calls are provider-specific and live in
//! [`providers`]; account persistence sits behind the [`store::AccountStore`]
//! collaborator trait.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod router;
pub mod services;
pub mod store;

pub use error::{FederationError, FederationResult, ProviderKind};
pub use extractors::Session;
pub use models::{AppType, CallbackKind, CallbackRequest};
pub use providers::{ProviderClient, ProviderCredentials, ProviderRegistry};
pub use router::{
    protected_federation_router, public_federation_router, FederationState,
};
pub use services::FederationService;
pub use store::{AccountStore, ExternalIdentity, StoreError};
