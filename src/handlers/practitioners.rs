// handlers/practitioners.rs - /practitioners handlers

use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{get_pagination, get_paging_data, PagingData};
use crate::app::AppState;
use crate::config::config;
use crate::database::models::{
    NewPractitioner, PractitionerChanges, PractitionerSummary, PRACTITIONERS,
};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson, ValidatedQuery};
use crate::validation::{FieldRule, RuleSet};

use super::{parse_id, PAGE_MESSAGE, SIZE_MESSAGE};

const SCHEDULE_MESSAGE: &str = "The schedule must be a number since it is a numeric primary key";
const FIRSTNAME_MESSAGE: &str =
    "The firstname cannot be empty and cannot have a length greater than 50";
const LASTNAME_MESSAGE: &str =
    "The lastname cannot be empty and cannot have a length greater than 50";
const GENDER_MESSAGE: &str =
    "The gender must be a boolean value, because it represents the male and female gender";
const EMAIL_MESSAGE: &str = "The email must have a valid format";
const EMAIL_QUERY_MESSAGE: &str =
    "The email cannot be empty and cannot have a length greater than 80";
const PHONE_MESSAGE: &str = "The phonenumber must have a valid format";
const INTERBANK_MESSAGE: &str = "The interbank code is a number of exactly 18 characters";
const BIRTHDATE_MESSAGE: &str = "The birthdate has to be a valid date";

/// Largest id a schedule reference can hold
const MAX_ID: i64 = i32::MAX as i64;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl RuleSet for ListQuery {
    fn rules() -> Vec<FieldRule> {
        vec![
            FieldRule::query("page", PAGE_MESSAGE).optional().is_int(0, i64::MAX),
            FieldRule::query("size", SIZE_MESSAGE).optional().is_int(1, i64::MAX),
            FieldRule::query("firstName", FIRSTNAME_MESSAGE).optional().is_string().length(1, 50),
            FieldRule::query("lastName", LASTNAME_MESSAGE).optional().is_string().length(1, 50),
            FieldRule::query("email", EMAIL_QUERY_MESSAGE).optional().trim().is_string().length(1, 80),
        ]
    }
}

impl RuleSet for NewPractitioner {
    fn rules() -> Vec<FieldRule> {
        vec![
            FieldRule::body("schedule", SCHEDULE_MESSAGE).is_int(1, MAX_ID),
            FieldRule::body("firstname", FIRSTNAME_MESSAGE).trim().length(1, 50),
            FieldRule::body("lastname", LASTNAME_MESSAGE).trim().length(1, 50),
            FieldRule::body("gender", GENDER_MESSAGE).is_boolean(),
            FieldRule::body("email", EMAIL_MESSAGE).trim().is_email(),
            FieldRule::body("phonenumber", PHONE_MESSAGE).is_mobile_phone(),
            FieldRule::body("interbankcode", INTERBANK_MESSAGE).optional().trim().length(18, 18),
            FieldRule::body("birthdate", BIRTHDATE_MESSAGE).optional().is_date(),
        ]
    }
}

impl RuleSet for PractitionerChanges {
    fn rules() -> Vec<FieldRule> {
        vec![
            FieldRule::body("schedule", SCHEDULE_MESSAGE).optional().is_int(1, MAX_ID),
            FieldRule::body("firstname", FIRSTNAME_MESSAGE).optional().length(1, 50),
            FieldRule::body("lastname", LASTNAME_MESSAGE).optional().length(1, 50),
            FieldRule::body("gender", GENDER_MESSAGE).optional().is_boolean(),
            FieldRule::body("email", EMAIL_MESSAGE).optional().is_email(),
            FieldRule::body("phonenumber", PHONE_MESSAGE).optional().is_mobile_phone(),
            FieldRule::body("interbankcode", INTERBANK_MESSAGE).optional().length(18, 18),
            FieldRule::body("birthdate", BIRTHDATE_MESSAGE).optional().is_date(),
        ]
    }
}

/// GET /practitioners - Paginated list, filtered by name and email fragments
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<PagingData<PractitionerSummary>> {
    let pagination = get_pagination(query.page, query.size);
    let (limit, offset) = pagination.window(config().api.default_page_size);

    let filter = Filter::new(&PRACTITIONERS, limit, offset)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?
        .contains("firstname", query.first_name.as_deref())
        .contains("lastname", query.last_name.as_deref())
        .contains("email", query.email.as_deref());

    let data = state.repository.list_practitioners(&filter).await?;
    let data = crate::database::Page {
        count: data.count,
        rows: data.rows.into_iter().map(PractitionerSummary::from).collect(),
    };
    Ok(ApiResponse::success(get_paging_data(data, query.page, pagination.limit)))
}

/// GET /practitioners/:id - One practitioner without timestamps
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PractitionerSummary> {
    let found = match parse_id(&id) {
        Some(pk) => state.repository.find_practitioner(pk).await?,
        None => None,
    };

    match found {
        Some(practitioner) => Ok(ApiResponse::success(practitioner.into())),
        None => Err(ApiError::not_found(format!("There is no practitioner with the id {}", id))),
    }
}

/// POST /practitioners - Create a practitioner on an existing schedule
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewPractitioner>,
) -> ApiResult<Value> {
    let practitioner = state.repository.create_practitioner(new).await?;
    tracing::info!(
        "Created practitioner {} on schedule {}",
        practitioner.id,
        practitioner.schedule
    );
    Ok(ApiResponse::created(json!({ "practitioner": practitioner })))
}

/// PUT /practitioners/:id - Change any subset of fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<PractitionerChanges>,
) -> ApiResult<Value> {
    let updated = match parse_id(&id) {
        Some(pk) => state.repository.update_practitioner(pk, changes).await?,
        None => None,
    };

    let practitioner = updated.ok_or_else(|| unknown_practitioner(&id))?;
    tracing::info!("Updated practitioner {}", practitioner.id);
    Ok(ApiResponse::accepted(json!({ "practitioner": practitioner })))
}

/// PUT /practitioners/toggleActive/:id - Flip the active flag
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let toggled = match parse_id(&id) {
        Some(pk) => state.repository.toggle_practitioner(pk).await?,
        None => None,
    };

    let practitioner = toggled.ok_or_else(|| unknown_practitioner(&id))?;
    tracing::debug!(
        "Practitioner {} isactive={}",
        practitioner.id,
        practitioner.isactive
    );
    Ok(ApiResponse::accepted(json!({ "practitioner": practitioner })))
}

fn unknown_practitioner(id: &str) -> ApiError {
    ApiError::unknown_id(
        id,
        format!("The practitioner with id '{}' does not exist", id),
        "schedule",
    )
}
