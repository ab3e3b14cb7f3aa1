//! Session bootstrap — user document creation on first sign-in.

use crate::ClientError;
use ecotrace_store::UserStore;
use ecotrace_types::{CurrentUser, District, Timestamp, UserProfile};
use tracing::info;

/// Fetch the signed-in user's profile, creating it on first sign-in.
///
/// Idempotent: an existing profile is returned untouched, so re-running the
/// bootstrap after every sign-in never resets counters or trust.
pub async fn ensure_profile<S: UserStore>(
    store: &S,
    user: &CurrentUser,
    default_district: &str,
    now: Timestamp,
) -> Result<UserProfile, ClientError> {
    if let Some(existing) = store.get_user(&user.id).await? {
        return Ok(existing);
    }

    let mut profile = UserProfile::new(
        user.id.clone(),
        user.display_name.clone(),
        District::new(default_district),
        now,
    );
    profile.photo_url = user.photo_url.clone();
    store.put_user(&profile).await?;
    info!(user = %user.id, "profile created on first sign-in");
    Ok(profile)
}
