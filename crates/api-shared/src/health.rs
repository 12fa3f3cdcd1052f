use crate::types::HealthRes;
use chrono::{SecondsFormat, Utc};
use std::time::Instant;

/// Health service shared by every Folio API surface.
///
/// Records the moment it was created so health checks can report process uptime.
#[derive(Clone, Debug)]
pub struct HealthService {
    started: Instant,
}

impl HealthService {
    /// Creates a new instance of HealthService, starting the uptime clock now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Reports the service as healthy, with the current time and uptime in seconds.
    pub fn check_health(&self) -> HealthRes {
        HealthRes {
            status: "OK".into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime: self.started.elapsed().as_secs_f64(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reports_ok() {
        let service = HealthService::new();
        let res = service.check_health();

        assert_eq!(res.status, "OK");
        assert!(res.uptime >= 0.0);
        assert!(chrono::DateTime::parse_from_rfc3339(&res.timestamp).is_ok());
    }
}
