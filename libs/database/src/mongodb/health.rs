use mongodb::Client;
use std::time::Instant;

use super::connector::ping;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error text when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    /// `Err` carries the failure reason and how long the ping took
    pub fn into_result(self) -> Result<(), String> {
        if self.healthy {
            return Ok(());
        }
        Err(format!(
            "{} (after {}ms)",
            self.message.as_deref().unwrap_or("ping failed"),
            self.response_time_ms
        ))
    }
}

/// Check MongoDB health with timing and the failure reason
///
/// ```ignore
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!(reason = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_status_reports_reason_and_timing() {
        let status = HealthStatus {
            healthy: false,
            message: Some("connection refused".to_string()),
            response_time_ms: 42,
        };
        assert_eq!(
            status.into_result().unwrap_err(),
            "connection refused (after 42ms)"
        );

        let healthy = HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 3,
        };
        assert!(healthy.into_result().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unhealthy() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200")
            .await
            .unwrap();
        let status = check_health_detailed(&client).await;

        assert!(!status.healthy);
        assert!(status.message.is_some());
        assert!(status.into_result().unwrap_err().contains("ms)"));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health_detailed() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health_detailed(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
