pub mod practitioner;
pub mod schedule;

pub use practitioner::{
    NewPractitioner, Practitioner, PractitionerChanges, PractitionerSummary, PRACTITIONERS,
};
pub use schedule::{NewSchedule, Schedule, ScheduleChanges, ScheduleSummary, SCHEDULES};
