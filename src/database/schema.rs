use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

const CREATE_SCHEDULES: &str = r#"
CREATE TABLE IF NOT EXISTS schedules (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description VARCHAR(255) NOT NULL,
    abbreviation VARCHAR(255) NOT NULL,
    isactive BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// `schedule` is checked by the repository inside the write transaction
const CREATE_PRACTITIONERS: &str = r#"
CREATE TABLE IF NOT EXISTS practitioners (
    id SERIAL PRIMARY KEY,
    schedule INTEGER NOT NULL,
    firstname VARCHAR(255) NOT NULL,
    lastname VARCHAR(255) NOT NULL,
    gender BOOLEAN NOT NULL,
    email VARCHAR(255) NOT NULL,
    phonenumber VARCHAR(255) NOT NULL,
    interbankcode VARCHAR(255),
    birthdate DATE,
    isactive BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Create both tables when they are missing. Existing tables are left alone.
pub async fn create_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in [CREATE_SCHEDULES, CREATE_PRACTITIONERS] {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Tables ready: schedules, practitioners");
    Ok(())
}
