use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Filterable, Table};

pub static PRACTITIONERS: Table = Table {
    name: "practitioners",
    columns: &[
        "id",
        "schedule",
        "firstname",
        "lastname",
        "gender",
        "email",
        "phonenumber",
        "interbankcode",
        "birthdate",
        "isactive",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Practitioner {
    pub id: i32,
    /// Id of the schedule this practitioner works on
    pub schedule: i32,
    pub firstname: String,
    pub lastname: String,
    pub gender: bool,
    pub email: String,
    pub phonenumber: String,
    pub interbankcode: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub isactive: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// List and single-record view: everything but the timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PractitionerSummary {
    pub id: i32,
    pub schedule: i32,
    pub firstname: String,
    pub lastname: String,
    pub gender: bool,
    pub email: String,
    pub phonenumber: String,
    pub interbankcode: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub isactive: bool,
}

impl From<Practitioner> for PractitionerSummary {
    fn from(p: Practitioner) -> Self {
        Self {
            id: p.id,
            schedule: p.schedule,
            firstname: p.firstname,
            lastname: p.lastname,
            gender: p.gender,
            email: p.email,
            phonenumber: p.phonenumber,
            interbankcode: p.interbankcode,
            birthdate: p.birthdate,
            isactive: p.isactive,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPractitioner {
    pub schedule: i32,
    pub firstname: String,
    pub lastname: String,
    pub gender: bool,
    pub email: String,
    pub phonenumber: String,
    pub interbankcode: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

/// Fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PractitionerChanges {
    pub schedule: Option<i32>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<bool>,
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    pub interbankcode: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

impl PractitionerChanges {
    pub fn apply_to(self, p: &mut Practitioner) {
        if let Some(schedule) = self.schedule {
            p.schedule = schedule;
        }
        if let Some(firstname) = self.firstname {
            p.firstname = firstname;
        }
        if let Some(lastname) = self.lastname {
            p.lastname = lastname;
        }
        if let Some(gender) = self.gender {
            p.gender = gender;
        }
        if let Some(email) = self.email {
            p.email = email;
        }
        if let Some(phonenumber) = self.phonenumber {
            p.phonenumber = phonenumber;
        }
        if self.interbankcode.is_some() {
            p.interbankcode = self.interbankcode;
        }
        if self.birthdate.is_some() {
            p.birthdate = self.birthdate;
        }
    }
}

impl Filterable for Practitioner {
    fn text_column(&self, column: &str) -> Option<&str> {
        match column {
            "firstname" => Some(&self.firstname),
            "lastname" => Some(&self.lastname),
            "email" => Some(&self.email),
            "phonenumber" => Some(&self.phonenumber),
            "interbankcode" => self.interbankcode.as_deref(),
            _ => None,
        }
    }
}
