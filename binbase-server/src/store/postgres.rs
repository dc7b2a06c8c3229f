//! PostgreSQL-backed BIN store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{info, warn};

use crate::domain::{Bin, LookupResult};

use super::error::StoreError;
use super::record::{BinFields, BinRecord};
use super::BinStore;

/// Default PostgreSQL port (the pooled port of the hosted database).
pub const DEFAULT_PORT: u16 = 6543;

/// Default maximum pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

const SELECT_COLUMNS: &str = "id, bin, brand, bank, type, level, isocountry, isoa2, isoa3, \
                              isonumber, www, phone, created_at, updated_at";

/// Connection settings for the PostgreSQL store.
#[derive(Clone)]
pub struct PgStoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
}

impl PgStoreConfig {
    /// Create a config for the given host and database with default
    /// credentials and pool settings.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: "postgres".to_string(),
            password: String::new(),
            database: database.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the user and password.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Set the maximum pool size.
    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl Default for PgStoreConfig {
    fn default() -> Self {
        Self::new("localhost", "postgres")
    }
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for PgStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// BIN store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgBinStore {
    pool: PgPool,
}

impl PgBinStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool with the given configuration.
    pub async fn connect(config: &PgStoreConfig) -> Result<Self, StoreError> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to connect to database");
                e
            })?;

        info!("database connection pool created");
        Ok(Self { pool })
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BinStore for PgBinStore {
    async fn read(&self, bin: Bin) -> Result<Option<BinRecord>, StoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM binbase WHERE bin = $1");
        let record = sqlx::query_as::<_, BinRecord>(&sql)
            .bind(bin.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn create(&self, bin: Bin, result: &LookupResult) -> Result<(), StoreError> {
        let f = BinFields::from_result(result);
        sqlx::query(
            r#"
            INSERT INTO binbase (bin, brand, bank, type, level, isocountry, isoa2, isoa3, isonumber)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (bin) DO UPDATE SET
                brand = EXCLUDED.brand,
                bank = EXCLUDED.bank,
                type = EXCLUDED.type,
                level = EXCLUDED.level,
                isocountry = EXCLUDED.isocountry,
                isoa2 = EXCLUDED.isoa2,
                isoa3 = EXCLUDED.isoa3,
                isonumber = EXCLUDED.isonumber,
                updated_at = now()
            "#,
        )
        .bind(bin.as_i32())
        .bind(f.brand)
        .bind(f.bank)
        .bind(f.card_type)
        .bind(f.level)
        .bind(f.isocountry)
        .bind(f.isoa2)
        .bind(f.isoa3)
        .bind(f.isonumber)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, existing: &BinRecord, result: &LookupResult) -> Result<(), StoreError> {
        let f = BinFields::merged(existing, result);
        let done = sqlx::query(
            r#"
            UPDATE binbase SET
                brand = $2,
                bank = $3,
                type = $4,
                level = $5,
                isocountry = $6,
                isoa2 = $7,
                isoa3 = $8,
                isonumber = $9,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(existing.id)
        .bind(f.brand)
        .bind(f.bank)
        .bind(f.card_type)
        .bind(f.level)
        .bind(f.isocountry)
        .bind(f.isoa2)
        .bind(f.isoa3)
        .bind(f.isonumber)
        .execute(&self.pool)
        .await?;

        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: existing.id });
        }
        Ok(())
    }
}
