use duckds_core::{err::Result, web::HealthCheckResult};

/// Performs the host's connection test ("save & test")
pub trait HealthChecker {
    fn check_health(&self) -> Result<HealthCheckResult>;
}

impl<T: HealthChecker + ?Sized> HealthChecker for &T {
    fn check_health(&self) -> Result<HealthCheckResult> {
        (**self).check_health()
    }
}
