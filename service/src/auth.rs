//! Reviewer authorization with request-scoped memoization.
//!
//! Group membership lives in the host platform; the service only asks
//! whether the acting user belongs to one of the configured reviewer groups.
//! The answer is memoized per request in an explicitly passed cache, so a
//! page that gates a dozen elements performs one group lookup, and nothing
//! leaks across requests in a long-lived server process.

use std::collections::HashMap;

use veriseal_types::UserId;

/// Host-platform collaborator yielding a user's effective groups.
pub trait GroupProvider {
    fn effective_groups(&self, user: &UserId) -> Vec<String>;
}

/// Per-request memoization of reviewer decisions. Create one per request and
/// drop it with the request.
#[derive(Debug, Default)]
pub struct RequestAuthCache {
    decisions: HashMap<u64, bool>,
}

impl RequestAuthCache {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whether `user` belongs to any of the authorized reviewer groups.
pub fn is_authorized_reviewer(
    cache: &mut RequestAuthCache,
    provider: &dyn GroupProvider,
    user: &UserId,
    authorized_groups: &[String],
) -> bool {
    if let Some(&decision) = cache.decisions.get(&user.as_u64()) {
        return decision;
    }
    let groups = provider.effective_groups(user);
    let decision = groups
        .iter()
        .any(|g| authorized_groups.iter().any(|a| a == g));
    cache.decisions.insert(user.as_u64(), decision);
    decision
}
