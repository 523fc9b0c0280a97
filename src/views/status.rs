//! Sidebar backend status

use serde::Serialize;

use crate::backend::{ClinicBackend, CollectionCounts, HealthStatus};

/// Backend connection summary shown next to the doctor profile
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemStatus {
    pub connected: bool,
    /// "Backend: Connected" or "Backend: Disconnected"
    pub label: String,
    pub database: String,
    pub collections: Option<CollectionCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SystemStatus {
    pub fn from_health(health: &HealthStatus) -> Self {
        let connected = health.is_ok();
        Self {
            connected,
            label: if connected {
                "Backend: Connected".to_string()
            } else {
                "Backend: Disconnected".to_string()
            },
            database: health.database_name().to_string(),
            collections: if connected { health.collections } else { None },
            error: health.error.clone(),
        }
    }

    pub async fn load(backend: &dyn ClinicBackend) -> Self {
        Self::from_health(&super::fetch_health(backend).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_status() {
        let health: HealthStatus = serde_json::from_str(
            r#"{"status": "OK", "database": "clinic", "collections": {"users": 2}}"#,
        )
        .unwrap();

        let status = SystemStatus::from_health(&health);
        assert!(status.connected);
        assert_eq!(status.label, "Backend: Connected");
        assert_eq!(status.database, "clinic");
        assert_eq!(status.collections.unwrap().users, Some(2));
    }

    #[test]
    fn test_disconnected_status() {
        let status = SystemStatus::from_health(&HealthStatus::error("refused"));
        assert!(!status.connected);
        assert_eq!(status.label, "Backend: Disconnected");
        assert!(status.collections.is_none());
        assert_eq!(status.error.as_deref(), Some("refused"));
    }
}
