use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewPractitioner, NewSchedule, Practitioner, PractitionerChanges, Schedule, ScheduleChanges,
};
use crate::filter::Filter;

/// One window of rows plus the number of rows matching the filter overall
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: i64,
    pub rows: Vec<T>,
}

/// Storage operations behind the HTTP handlers.
///
/// Lookups by id return `Ok(None)` for unknown ids. Writes that reference a
/// schedule fail with [`DatabaseError::ScheduleNotFound`] when it is missing,
/// and nothing is persisted in that case.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn list_schedules(&self, filter: &Filter) -> Result<Page<Schedule>, DatabaseError>;

    async fn find_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError>;

    async fn create_schedule(&self, new: NewSchedule) -> Result<Schedule, DatabaseError>;

    async fn update_schedule(
        &self,
        id: i32,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>, DatabaseError>;

    /// Flip `isactive` in a single step and return the stored row
    async fn toggle_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError>;

    async fn list_practitioners(
        &self,
        filter: &Filter,
    ) -> Result<Page<Practitioner>, DatabaseError>;

    async fn find_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError>;

    async fn create_practitioner(
        &self,
        new: NewPractitioner,
    ) -> Result<Practitioner, DatabaseError>;

    /// An unknown practitioner id wins over an unknown schedule id
    async fn update_practitioner(
        &self,
        id: i32,
        changes: PractitionerChanges,
    ) -> Result<Option<Practitioner>, DatabaseError>;

    async fn toggle_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError>;
}
