//! Storage backends
//!
//! Bundles the three domain ports behind `Arc<dyn ...>` so the service layer
//! never knows whether it talks to SQLite or to the in-memory store.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
use domain_billing::BillPort;
use domain_identity::UserPort;
use domain_rooms::RoomPort;

use crate::adapters::{SqliteBillAdapter, SqliteRoomAdapter, SqliteUserAdapter};
use crate::error::DatabaseError;
use crate::gateway::Gateway;
use crate::memory::MemoryStore;
use crate::pool::{create_pool, DatabaseConfig, DatabasePool};
use crate::schema::ensure_schema;

/// Which store backs the ports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// The port set handed to the services
#[derive(Clone)]
pub struct Storage {
    pub rooms: Arc<dyn RoomPort>,
    pub bills: Arc<dyn BillPort>,
    pub users: Arc<dyn UserPort>,
    health: Arc<dyn HealthCheckable>,
    backend: StorageBackend,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").field("backend", &self.backend).finish_non_exhaustive()
    }
}

impl Storage {
    /// Opens the configured backend; SQLite gets its schema applied
    pub async fn open(backend: StorageBackend, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match backend {
            StorageBackend::Sqlite => {
                let pool = create_pool(config.clone()).await?;
                ensure_schema(&pool).await?;
                Ok(Self::sqlite(pool))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage, data will not survive a restart");
                Ok(Self::memory())
            }
        }
    }

    /// SQLite adapters sharing one pool
    pub fn sqlite(pool: DatabasePool) -> Self {
        let gateway = Gateway::new(pool);
        Self {
            rooms: Arc::new(SqliteRoomAdapter::new(gateway.clone())),
            bills: Arc::new(SqliteBillAdapter::new(gateway.clone())),
            users: Arc::new(SqliteUserAdapter::new(gateway.clone())),
            health: Arc::new(SqliteHealth { gateway }),
            backend: StorageBackend::Sqlite,
        }
    }

    /// A fresh, empty in-memory store
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            rooms: store.clone(),
            bills: store.clone(),
            users: store.clone(),
            health: store,
            backend: StorageBackend::Memory,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub async fn health_check(&self) -> HealthCheckResult {
        self.health.health_check().await
    }
}

struct SqliteHealth {
    gateway: Gateway,
}

#[async_trait]
impl HealthCheckable for SqliteHealth {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.gateway.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult {
                adapter_id: "sqlite".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "sqlite".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}
