//! Idempotent schema initializer.
//!
//! Runs once per process start. Every statement is safe to repeat. A failing
//! statement is logged and skipped; later statements still run and callers
//! observe missing tables as query failures.

use sqlx::PgPool;
use tracing::{error, info};

/// Ordered schema statements. `properties` references `users`, so order matters.
const SCHEMA_STEPS: &[(&str, &str)] = &[
    (
        "user_type enum",
        "DO $$ BEGIN \
             CREATE TYPE user_type AS ENUM ('seller', 'buyer', 'admin'); \
         EXCEPTION WHEN duplicate_object THEN NULL; \
         END $$",
    ),
    (
        "users table",
        "CREATE TABLE IF NOT EXISTS users ( \
             id SERIAL PRIMARY KEY, \
             first_name VARCHAR(50) NOT NULL, \
             last_name VARCHAR(50) NOT NULL, \
             email VARCHAR(255) NOT NULL UNIQUE, \
             password VARCHAR(255) NOT NULL, \
             type user_type NOT NULL DEFAULT 'seller', \
             created_at TIMESTAMPTZ NOT NULL DEFAULT NOW() \
         )",
    ),
    (
        "properties table",
        "CREATE TABLE IF NOT EXISTS properties ( \
             id SERIAL PRIMARY KEY, \
             user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE, \
             location VARCHAR(255), \
             age VARCHAR(10), \
             floor_plan VARCHAR(255), \
             bedrooms INTEGER, \
             additional_facilities VARCHAR(255), \
             garden BOOLEAN NOT NULL DEFAULT FALSE, \
             parking BOOLEAN NOT NULL DEFAULT FALSE, \
             proximity_facilities INTEGER, \
             proximity_main_roads INTEGER, \
             tax_records NUMERIC(10, 2), \
             photo_url VARCHAR(255) \
         )",
    ),
    (
        "properties owner index",
        "CREATE INDEX IF NOT EXISTS properties_user_id_idx ON properties (user_id)",
    ),
];

/// Outcome of a schema initialization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Steps that executed successfully.
    pub applied: Vec<&'static str>,
    /// Steps that failed.
    pub failed: Vec<&'static str>,
}

impl SchemaReport {
    /// Whether every step succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ensure the `users` and `properties` tables exist.
pub async fn ensure_schema(pool: &PgPool) -> SchemaReport {
    info!("Initializing database schema...");
    let mut report = SchemaReport::default();

    for (name, statement) in SCHEMA_STEPS {
        match sqlx::query(statement).execute(pool).await {
            Ok(_) => {
                info!(step = name, "Schema step applied or already present");
                report.applied.push(name);
            }
            Err(e) => {
                error!(step = name, error = %e, "Schema step failed");
                report.failed.push(name);
            }
        }
    }

    if report.is_complete() {
        info!("Database schema ready");
    } else {
        error!(failed = ?report.failed, "Database schema incomplete, continuing startup");
    }
    report
}
