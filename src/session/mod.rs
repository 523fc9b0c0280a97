//! Session Store
//!
//! Mock login state for the portal. Logging in never checks credentials: it
//! hands out a session bound to the configured demo doctor. Sessions live in
//! process memory only and are gone after a restart.
//!
//! Login is unauthenticated, so the store bounds itself: sessions idle past
//! `idle_timeout_minutes` are dropped, and at `max_sessions` the least
//! recently used one is evicted to make room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Email used when the login form is submitted without one
pub const DEFAULT_DEMO_EMAIL: &str = "sarah.mitchell@mediculture.com";

/// Identity of the doctor using the portal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub license: String,
    pub experience: String,
    pub hospital: String,
    pub firebase_uid: String,
}

impl Default for DoctorProfile {
    fn default() -> Self {
        Self {
            id: "doc_001".to_string(),
            name: "Dr. Sarah Mitchell".to_string(),
            email: DEFAULT_DEMO_EMAIL.to_string(),
            specialization: "Internal Medicine".to_string(),
            license: "MD12345".to_string(),
            experience: "8 years".to_string(),
            hospital: "Mediculture General Hospital".to_string(),
            firebase_uid: "doctor_demo_uid".to_string(),
        }
    }
}

impl DoctorProfile {
    /// Copy of this profile with the email entered at login, if any
    pub fn with_login_email(&self, email: Option<&str>) -> Self {
        let mut profile = self.clone();
        if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
            profile.email = email.to_string();
        }
        profile
    }
}

/// Bounds on the session store, the `[session_limits]` config section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionLimits {
    pub idle_timeout_minutes: u64,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: 8 * 60,
            max_sessions: 1_000,
        }
    }
}

impl SessionLimits {
    fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_minutes.saturating_mul(60))
    }
}

/// One logged-in browser
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub doctor: DoctorProfile,
    pub created_at: DateTime<Utc>,
    /// Last login or authenticated request
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        // A clock that moved backwards leaves the session alive
        (now - self.last_seen_at)
            .to_std()
            .map_or(false, |idle| idle > timeout)
    }
}

/// In-memory session registry
pub struct SessionStore {
    demo_doctor: DoctorProfile,
    limits: SessionLimits,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(demo_doctor: DoctorProfile) -> Self {
        Self::with_limits(demo_doctor, SessionLimits::default())
    }

    pub fn with_limits(demo_doctor: DoctorProfile, limits: SessionLimits) -> Self {
        Self {
            demo_doctor,
            limits,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session for the demo doctor
    pub async fn login(&self, email: Option<&str>) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            doctor: self.demo_doctor.with_login_email(email),
            created_at: now,
            last_seen_at: now,
        };

        let mut sessions = self.sessions.write().await;
        let expired = expire_idle(&mut sessions, now, self.limits.idle_timeout());
        if expired > 0 {
            tracing::debug!(expired, "Idle sessions dropped");
        }

        while sessions.len() >= self.limits.max_sessions.max(1) {
            let Some(oldest) = sessions.values().min_by_key(|s| s.last_seen_at).map(|s| s.id) else {
                break;
            };
            sessions.remove(&oldest);
            tracing::info!(session_id = %oldest, "Session evicted, store is full");
        }

        sessions.insert(session.id, session.clone());
        drop(sessions);

        tracing::info!(session_id = %session.id, doctor = %session.doctor.name, "Session started");
        session
    }

    /// End a session, returning whether it existed
    pub async fn logout(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session ended");
        }
        removed
    }

    /// Live session for `id`, refreshing its idle clock. Idle sessions are dropped.
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        if sessions.get(id)?.is_idle(now, self.limits.idle_timeout()) {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Session expired");
            return None;
        }

        let session = sessions.get_mut(id)?;
        session.last_seen_at = now;
        Some(session.clone())
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Remove sessions idle longer than `timeout`, returning how many went
fn expire_idle(sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>, timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_idle(now, timeout));
    before - sessions.len()
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DoctorProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_uses_demo_doctor() {
        let store = SessionStore::default();
        let session = store.login(None).await;

        assert_eq!(session.doctor.name, "Dr. Sarah Mitchell");
        assert_eq!(session.doctor.email, DEFAULT_DEMO_EMAIL);
        assert_eq!(session.doctor.firebase_uid, "doctor_demo_uid");
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_login_keeps_entered_email() {
        let store = SessionStore::default();
        let session = store.login(Some("  house@clinic.org ")).await;
        assert_eq!(session.doctor.email, "house@clinic.org");

        let blank = store.login(Some("   ")).await;
        assert_eq!(blank.doctor.email, DEFAULT_DEMO_EMAIL);
    }

    #[tokio::test]
    async fn test_logout_forgets_session() {
        let store = SessionStore::default();
        let session = store.login(None).await;

        assert!(store.get(&session.id).await.is_some());
        assert!(store.logout(&session.id).await);
        assert!(store.get(&session.id).await.is_none());
        assert!(!store.logout(&session.id).await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::default();
        let a = store.login(Some("a@x.org")).await;
        let b = store.login(Some("b@x.org")).await;

        assert_ne!(a.id, b.id);
        store.logout(&a.id).await;
        assert_eq!(store.get(&b.id).await.unwrap().doctor.email, "b@x.org");
    }

    async fn age(store: &SessionStore, id: &Uuid, by: chrono::Duration) {
        let mut sessions = store.sessions.write().await;
        sessions.get_mut(id).unwrap().last_seen_at -= by;
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let limits = SessionLimits {
            idle_timeout_minutes: 30,
            ..Default::default()
        };
        let store = SessionStore::with_limits(DoctorProfile::default(), limits);
        let stale = store.login(None).await;
        let fresh = store.login(None).await;
        age(&store, &stale.id, chrono::Duration::minutes(31)).await;
        age(&store, &fresh.id, chrono::Duration::minutes(29)).await;

        assert!(store.get(&stale.id).await.is_none());
        assert_eq!(store.count().await, 1);

        // Use refreshes the idle clock
        assert!(store.get(&fresh.id).await.is_some());
        age(&store, &fresh.id, chrono::Duration::minutes(29)).await;
        assert!(store.get(&fresh.id).await.is_some());
    }

    #[tokio::test]
    async fn test_login_drops_idle_sessions() {
        let store = SessionStore::default();
        let idle: Vec<_> = login_many(&store, 5).await;
        for id in &idle {
            age(&store, id, chrono::Duration::hours(9)).await;
        }

        store.login(None).await;
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_store_is_capped() {
        let limits = SessionLimits {
            max_sessions: 3,
            ..Default::default()
        };
        let store = SessionStore::with_limits(DoctorProfile::default(), limits);

        let first = store.login(None).await;
        age(&store, &first.id, chrono::Duration::minutes(1)).await;
        let ids = login_many(&store, 100).await;

        assert_eq!(store.count().await, 3);
        assert!(store.get(&first.id).await.is_none());
        assert!(store.get(ids.last().unwrap()).await.is_some());
    }

    async fn login_many(store: &SessionStore, n: usize) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(n);
        for _ in 0..n {
            ids.push(store.login(None).await.id);
        }
        ids
    }
}
