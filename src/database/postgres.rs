use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    NewPractitioner, NewSchedule, Practitioner, PractitionerChanges, Schedule, ScheduleChanges,
};
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::{Page, Repository};
use crate::filter::Filter;

/// [`Repository`] backed by the Postgres pool
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Locks the schedule row against key changes until the transaction ends
async fn ensure_schedule_exists(conn: &mut PgConnection, id: i32) -> Result<(), DatabaseError> {
    let found = sqlx::query_scalar::<_, i32>("SELECT id FROM schedules WHERE id = $1 FOR KEY SHARE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(DatabaseError::ScheduleNotFound(id)),
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn list_schedules(&self, filter: &Filter) -> Result<Page<Schedule>, DatabaseError> {
        QueryBuilder::new(filter).select_page(&self.pool).await
    }

    async fn find_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError> {
        let row = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_schedule(&self, new: NewSchedule) -> Result<Schedule, DatabaseError> {
        let row = sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (name, description, abbreviation)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.abbreviation)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_schedule(
        &self,
        id: i32,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>, DatabaseError> {
        let row = sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                abbreviation = COALESCE($4, abbreviation),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.abbreviation)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn toggle_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError> {
        let row = sqlx::query_as::<_, Schedule>(
            r#"
            UPDATE schedules SET isactive = NOT isactive, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_practitioners(
        &self,
        filter: &Filter,
    ) -> Result<Page<Practitioner>, DatabaseError> {
        QueryBuilder::new(filter).select_page(&self.pool).await
    }

    async fn find_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError> {
        let row = sqlx::query_as::<_, Practitioner>("SELECT * FROM practitioners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_practitioner(
        &self,
        new: NewPractitioner,
    ) -> Result<Practitioner, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        ensure_schedule_exists(&mut tx, new.schedule).await?;

        let row = sqlx::query_as::<_, Practitioner>(
            r#"
            INSERT INTO practitioners
                (schedule, firstname, lastname, gender, email, phonenumber, interbankcode, birthdate)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.schedule)
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(new.gender)
        .bind(&new.email)
        .bind(&new.phonenumber)
        .bind(&new.interbankcode)
        .bind(new.birthdate)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn update_practitioner(
        &self,
        id: i32,
        changes: PractitionerChanges,
    ) -> Result<Option<Practitioner>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_scalar::<_, i32>("SELECT id FROM practitioners WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(None);
        }
        if let Some(schedule) = changes.schedule {
            ensure_schedule_exists(&mut tx, schedule).await?;
        }

        let row = sqlx::query_as::<_, Practitioner>(
            r#"
            UPDATE practitioners SET
                schedule = COALESCE($2, schedule),
                firstname = COALESCE($3, firstname),
                lastname = COALESCE($4, lastname),
                gender = COALESCE($5, gender),
                email = COALESCE($6, email),
                phonenumber = COALESCE($7, phonenumber),
                interbankcode = COALESCE($8, interbankcode),
                birthdate = COALESCE($9, birthdate),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.schedule)
        .bind(changes.firstname)
        .bind(changes.lastname)
        .bind(changes.gender)
        .bind(changes.email)
        .bind(changes.phonenumber)
        .bind(changes.interbankcode)
        .bind(changes.birthdate)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn toggle_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError> {
        let row = sqlx::query_as::<_, Practitioner>(
            r#"
            UPDATE practitioners SET isactive = NOT isactive, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
