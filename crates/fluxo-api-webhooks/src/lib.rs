//! Inbound webhook admission for fluxo.
//!
//! Third-party services deliver events to `/webhooks/{service}`. The
//! admission gate decides, per registered service, whether a delivery is
//! well-formed before anything downstream sees it; admitted events are
//! handed to the workflow engine through the [`event::TriggerEvaluator`]
//! collaborator. Unregistered services are rejected outright.

pub mod error;
pub mod event;
pub mod gate;
pub mod router;
pub mod validators;

pub use error::WebhookError;
pub use event::{EvaluatorError, TriggerEvaluator, WebhookEvent};
pub use gate::AdmissionGate;
pub use router::{webhooks_router, WebhooksState};
pub use validators::{GithubWebhookValidator, GitlabWebhookValidator, PayloadValidator};
