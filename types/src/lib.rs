//! Fundamental types for the ecotrace client.
//!
//! This crate defines the document shapes shared across every other crate in
//! the workspace: identifiers, timestamps, geocoordinates, the action / user /
//! challenge records, the fixed action-type table, and verification
//! parameters.

pub mod action;
pub mod challenge;
pub mod geo;
pub mod id;
pub mod identity;
pub mod params;
pub mod time;
pub mod user;

pub use action::{ActionStatus, ActionType, EcoAction, Evidence, Vote};
pub use challenge::{Challenge, ChallengeStatus};
pub use geo::{District, GeoPoint};
pub use id::{ActionId, ChallengeId, UserId};
pub use identity::{CurrentUser, IdentityProvider};
pub use params::VerificationParams;
pub use time::{Clock, SystemClock, Timestamp};
pub use user::UserProfile;
