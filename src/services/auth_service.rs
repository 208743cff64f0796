use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dto::auth::Session;
use crate::error::{AppError, AppResult};

const MAX_FAILURES: u32 = 5;
const LOCKOUT_SECONDS: i64 = 30;

#[derive(Debug, Default)]
struct FailureState {
    consecutive: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// Admin login gate. Exact-match credentials, an in-memory consecutive
/// failure counter with a 30 second lockout, and opaque bearer tokens with a
/// fixed expiry. Explicitly a stub, not a security boundary.
pub struct AuthGate {
    username: String,
    password: String,
    session_ttl: Duration,
    failures: Mutex<FailureState>,
    sessions: Mutex<HashMap<Uuid, DateTime<Utc>>>,
}

impl AuthGate {
    pub fn new(username: &str, password: &str, session_ttl_hours: i64) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            session_ttl: Duration::hours(session_ttl_hours),
            failures: Mutex::new(FailureState::default()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        self.login_at(username, password, Utc::now()).await
    }

    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Session> {
        let mut failures = self.failures.lock().await;

        if let Some(until) = failures.locked_until {
            if now < until {
                // Locked: rejected regardless of credential correctness.
                return Err(AppError::LockedOut);
            }
            failures.locked_until = None;
            failures.consecutive = 0;
        }

        if username != self.username || password != self.password {
            failures.consecutive += 1;
            if failures.consecutive >= MAX_FAILURES {
                failures.locked_until = Some(now + Duration::seconds(LOCKOUT_SECONDS));
                failures.consecutive = 0;
                tracing::warn!("admin login locked out after repeated failures");
            }
            return Err(AppError::BadRequest("invalid credentials".into()));
        }

        failures.consecutive = 0;
        drop(failures);

        let token = Uuid::new_v4();
        let expires_at = now + self.session_ttl;
        self.sessions.lock().await.insert(token, expires_at);
        Ok(Session { token, expires_at })
    }

    pub async fn validate(&self, token: Uuid) -> AppResult<()> {
        self.validate_at(token, Utc::now()).await
    }

    pub async fn validate_at(&self, token: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&token) {
            Some(expires_at) if now < *expires_at => Ok(()),
            Some(_) => {
                sessions.remove(&token);
                Err(AppError::Unauthorized)
            }
            None => Err(AppError::Unauthorized),
        }
    }

    pub async fn logout(&self, token: Uuid) {
        self.sessions.lock().await.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthGate {
        AuthGate::new("admin", "secret", 24)
    }

    #[tokio::test]
    async fn login_issues_a_validating_session() {
        let gate = gate();
        let session = gate.login("admin", "secret").await.unwrap();
        gate.validate(session.token).await.unwrap();

        gate.logout(session.token).await;
        assert!(matches!(
            gate.validate(session.token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn five_failures_lock_the_gate_for_thirty_seconds() {
        let gate = gate();
        let now = Utc::now();

        for _ in 0..5 {
            let err = gate.login_at("admin", "wrong", now).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }

        // Correct credentials are rejected while locked.
        let err = gate.login_at("admin", "secret", now).await.unwrap_err();
        assert!(matches!(err, AppError::LockedOut));

        // After the window the counter has reset and login succeeds.
        let later = now + Duration::seconds(31);
        gate.login_at("admin", "secret", later).await.unwrap();
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected() {
        let gate = gate();
        let now = Utc::now();
        let session = gate.login_at("admin", "secret", now).await.unwrap();

        let past_expiry = now + Duration::hours(25);
        assert!(matches!(
            gate.validate_at(session.token, past_expiry).await,
            Err(AppError::Unauthorized)
        ));
    }
}
