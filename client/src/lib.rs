//! ecotrace client facade.
//!
//! Wires the external interfaces (identity provider, document store) to the
//! engines, maps engine errors to the user-facing error surface, and provides
//! the dashboard read-models. No store failure is fatal here: every error is
//! logged and returned for the presentation layer to surface as a prompt,
//! inline message or toast, and retries are always user-initiated.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod session;

pub use client::EcoClient;
pub use config::ClientConfig;
pub use dashboard::{community_stats, CommunityStats, DashboardView};
pub use error::ClientError;
pub use logging::{init_logging, LogFormat};
