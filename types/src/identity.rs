//! Identity-provider interface.
//!
//! Authentication itself is external; the client only consumes an opaque
//! current-user identity and a sign-in/sign-out notification hook.

use crate::id::UserId;
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub display_name: String,
    pub photo_url: Option<String>,
}

/// Callback invoked on every sign-in and sign-out.
pub type IdentityCallback = Box<dyn Fn(Option<&CurrentUser>) + Send + Sync>;

/// Interface to the external identity provider.
///
/// Implementations hold whatever SDK state they need; the engines receive the
/// identity as an explicit value, never through ambient globals.
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in user, if any.
    ///
    /// The client facade resolves this fresh on every operation and caches
    /// nothing, so a sign-out takes effect on the next call without any
    /// callback wiring.
    fn current_user(&self) -> Option<CurrentUser>;

    /// Register a callback fired on sign-in and sign-out.
    ///
    /// For views that re-render on identity transitions; operations
    /// themselves rely on `current_user` alone.
    fn on_change(&self, callback: IdentityCallback);
}
