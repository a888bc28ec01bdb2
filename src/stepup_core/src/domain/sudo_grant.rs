use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Proof that the session holder recently re-confirmed their password.
///
/// Stored in the session by the elevation view. The grant carries only the
/// issue time; freshness is always judged against the caller's max age so the
/// policy can change without invalidating stored sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SudoGrant {
    granted_at: DateTime<Utc>,
}

impl SudoGrant {
    pub fn issued(now: DateTime<Utc>) -> Self {
        Self { granted_at: now }
    }

    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }

    /// Whether the grant is still within `max_age` as of `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.granted_at) < max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_within_max_age() {
        let now = Utc::now();
        let grant = SudoGrant::issued(now);
        assert!(grant.is_fresh(now + Duration::minutes(10), Duration::hours(3)));
    }

    #[test]
    fn expired_at_exactly_max_age() {
        let now = Utc::now();
        let grant = SudoGrant::issued(now);
        assert!(!grant.is_fresh(now + Duration::hours(3), Duration::hours(3)));
    }

    #[test]
    fn survives_session_serialization() {
        let grant = SudoGrant::issued(Utc::now());
        let json = serde_json::to_string(&grant).unwrap();
        assert_eq!(serde_json::from_str::<SudoGrant>(&json).unwrap(), grant);
    }
}
