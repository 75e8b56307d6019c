//! Database Test Utilities
//!
//! Temporary SQLite databases with the schema applied, and a helper that
//! wires the domain services over any storage backend with a fixed clock.

use std::sync::Arc;

use core_kernel::{Clock, UserId};
use domain_billing::{BillingConfig, BillingEngine};
use domain_identity::{IdentityConfig, IdentityService, User};
use domain_rooms::RoomCatalog;
use infra_db::{create_pool, ensure_schema, DatabaseConfig, DatabaseError, DatabasePool, Storage};
use tempfile::TempDir;

use crate::fixtures::{DateFixtures, UserFixtures};

/// A SQLite database in a temporary directory, removed on drop
pub struct TestDatabase {
    dir: TempDir,
    pool: DatabasePool,
}

impl TestDatabase {
    /// Creates the file, opens a pool and applies the schema
    pub async fn new() -> Result<Self, DatabaseError> {
        let dir = tempfile::tempdir()?;
        let pool = create_pool(DatabaseConfig::in_dir(dir.path(), "test_pos.db")).await?;
        ensure_schema(&pool).await?;
        Ok(Self { dir, pool })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Configuration pointing at the same file, for reopening it
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::in_dir(self.dir.path(), "test_pos.db")
    }

    /// SQLite-backed ports over this database
    pub fn storage(&self) -> Storage {
        Storage::sqlite(self.pool.clone())
    }

    /// Deletes all rows while keeping the schema
    pub async fn clear_data(&self) -> Result<(), DatabaseError> {
        for table in ["bills", "bill_sequences", "rooms", "users"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

/// The three services wired over one storage with a pinned clock
#[derive(Clone)]
pub struct TestServices {
    pub storage: Storage,
    pub rooms: RoomCatalog,
    pub billing: BillingEngine,
    pub identity: IdentityService,
}

impl TestServices {
    /// Services on the business day with default settings
    pub fn over(storage: Storage) -> Self {
        Self::with(storage, DateFixtures::clock(), BillingConfig::default())
    }

    pub fn with(storage: Storage, clock: Arc<dyn Clock>, billing: BillingConfig) -> Self {
        Self {
            rooms: RoomCatalog::new(storage.rooms.clone(), clock.clone()),
            billing: BillingEngine::new(storage.bills.clone(), storage.rooms.clone(), clock.clone(), billing),
            identity: IdentityService::new(storage.users.clone(), clock, IdentityConfig::default()),
            storage,
        }
    }

    /// In-memory services
    pub fn in_memory() -> Self {
        Self::over(Storage::memory())
    }

    /// Creates the fixture cashier and returns its id
    pub async fn seed_cashier(&self) -> UserId {
        self.seed_user(UserFixtures::cashier()).await.id
    }

    /// Creates the fixture admin
    pub async fn seed_admin(&self) -> User {
        self.seed_user(UserFixtures::admin()).await
    }

    async fn seed_user(&self, user: domain_identity::NewUser) -> User {
        match self.identity.create_user(user).await {
            Ok(user) => user,
            Err(e) => panic!("failed to seed user: {}", e),
        }
    }
}
