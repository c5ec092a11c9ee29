use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    NewPractitioner, NewSchedule, Practitioner, PractitionerChanges, Schedule, ScheduleChanges,
};
use crate::database::repository::{Page, Repository};
use crate::filter::{Filter, Filterable};

#[derive(Default)]
struct Tables {
    schedules: BTreeMap<i32, Schedule>,
    practitioners: BTreeMap<i32, Practitioner>,
    last_schedule_id: i32,
    last_practitioner_id: i32,
}

/// In-process [`Repository`] with the same observable behavior as the
/// Postgres one. Every write holds the table lock for its whole duration.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of<T: Filterable + Clone>(rows: impl Iterator<Item = T>, filter: &Filter) -> Page<T> {
    let matching: Vec<T> = rows.filter(|row| filter.matches(row)).collect();
    let count = matching.len() as i64;
    let rows = matching
        .into_iter()
        .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(filter.limit()).unwrap_or(usize::MAX))
        .collect();
    Page { count, rows }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_schedules(&self, filter: &Filter) -> Result<Page<Schedule>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(page_of(tables.schedules.values().cloned(), filter))
    }

    async fn find_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError> {
        Ok(self.tables.read().await.schedules.get(&id).cloned())
    }

    async fn create_schedule(&self, new: NewSchedule) -> Result<Schedule, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.last_schedule_id += 1;
        let now = Utc::now();
        let schedule = Schedule {
            id: tables.last_schedule_id,
            name: new.name,
            description: new.description,
            abbreviation: new.abbreviation,
            isactive: true,
            created_at: now,
            updated_at: now,
        };
        tables.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        id: i32,
        changes: ScheduleChanges,
    ) -> Result<Option<Schedule>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.schedules.get_mut(&id).map(|schedule| {
            changes.apply_to(schedule);
            schedule.updated_at = Utc::now();
            schedule.clone()
        }))
    }

    async fn toggle_schedule(&self, id: i32) -> Result<Option<Schedule>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.schedules.get_mut(&id).map(|schedule| {
            schedule.isactive = !schedule.isactive;
            schedule.updated_at = Utc::now();
            schedule.clone()
        }))
    }

    async fn list_practitioners(
        &self,
        filter: &Filter,
    ) -> Result<Page<Practitioner>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(page_of(tables.practitioners.values().cloned(), filter))
    }

    async fn find_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError> {
        Ok(self.tables.read().await.practitioners.get(&id).cloned())
    }

    async fn create_practitioner(
        &self,
        new: NewPractitioner,
    ) -> Result<Practitioner, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.schedules.contains_key(&new.schedule) {
            return Err(DatabaseError::ScheduleNotFound(new.schedule));
        }

        tables.last_practitioner_id += 1;
        let now = Utc::now();
        let practitioner = Practitioner {
            id: tables.last_practitioner_id,
            schedule: new.schedule,
            firstname: new.firstname,
            lastname: new.lastname,
            gender: new.gender,
            email: new.email,
            phonenumber: new.phonenumber,
            interbankcode: new.interbankcode,
            birthdate: new.birthdate,
            isactive: true,
            created_at: now,
            updated_at: now,
        };
        tables.practitioners.insert(practitioner.id, practitioner.clone());
        Ok(practitioner)
    }

    async fn update_practitioner(
        &self,
        id: i32,
        changes: PractitionerChanges,
    ) -> Result<Option<Practitioner>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.practitioners.contains_key(&id) {
            return Ok(None);
        }
        if let Some(schedule) = changes.schedule {
            if !tables.schedules.contains_key(&schedule) {
                return Err(DatabaseError::ScheduleNotFound(schedule));
            }
        }

        Ok(tables.practitioners.get_mut(&id).map(|practitioner| {
            changes.apply_to(practitioner);
            practitioner.updated_at = Utc::now();
            practitioner.clone()
        }))
    }

    async fn toggle_practitioner(&self, id: i32) -> Result<Option<Practitioner>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.practitioners.get_mut(&id).map(|practitioner| {
            practitioner.isactive = !practitioner.isactive;
            practitioner.updated_at = Utc::now();
            practitioner.clone()
        }))
    }
}
