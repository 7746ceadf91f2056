//! Domain layer health check functionality

use std::collections::HashMap;

use async_trait::async_trait;
use my_lab_guide_data::database;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// A health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// Overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Component name to health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database.
    /// `Ok(false)` means the service runs on in-memory storage only.
    async fn check_database_status(&self) -> Result<bool, String>;
}

/// Check whether the database pool is initialized and answers queries.
///
/// Returns `Ok(false)` when no pool was configured, in which case the
/// repositories store records in memory.
pub async fn check_database_status() -> Result<bool, String> {
    match database::get_db_pool() {
        Ok(pool) => database::check_database_health(&pool)
            .map(|_| true)
            .map_err(|e| format!("Database health check failed: {}", e)),
        Err(database::DatabaseError::PoolNotInitialized) => Ok(false),
        Err(e) => Err(format!("Database connection error: {}", e)),
    }
}

/// Get overall system health
pub async fn get_system_health() -> SystemHealth {
    let db_component = match check_database_status().await {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Database not configured; records are kept in memory".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let overall_status = match db_component.status {
        ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        ComponentStatus::Degraded => SystemStatus::Degraded,
        ComponentStatus::Healthy => SystemStatus::Healthy,
    };

    SystemHealth {
        status: overall_status,
        components: [("database".to_string(), db_component)].into_iter().collect(),
    }
}
