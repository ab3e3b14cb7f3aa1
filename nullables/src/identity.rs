//! Nullable identity provider — programmatic sign-in/sign-out for testing.

use ecotrace_types::identity::{CurrentUser, IdentityCallback, IdentityProvider};
use ecotrace_types::UserId;
use std::sync::Mutex;

/// An identity provider controlled entirely from test code.
pub struct NullIdentity {
    current: Mutex<Option<CurrentUser>>,
    callbacks: Mutex<Vec<IdentityCallback>>,
}

impl NullIdentity {
    /// Start signed out.
    pub fn signed_out() -> Self {
        Self {
            current: Mutex::new(None),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Start signed in as the given user.
    pub fn signed_in(id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        let identity = Self::signed_out();
        identity.sign_in(CurrentUser {
            id: id.into(),
            display_name: display_name.into(),
            photo_url: None,
        });
        identity
    }

    /// Simulate a sign-in, firing registered callbacks.
    pub fn sign_in(&self, user: CurrentUser) {
        *self.current.lock().unwrap() = Some(user.clone());
        for cb in self.callbacks.lock().unwrap().iter() {
            cb(Some(&user));
        }
    }

    /// Simulate a sign-out, firing registered callbacks.
    pub fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
        for cb in self.callbacks.lock().unwrap().iter() {
            cb(None);
        }
    }
}

impl IdentityProvider for NullIdentity {
    fn current_user(&self) -> Option<CurrentUser> {
        self.current.lock().unwrap().clone()
    }

    fn on_change(&self, callback: IdentityCallback) {
        self.callbacks.lock().unwrap().push(callback);
    }
}
