// handlers/schedules.rs - /schedules handlers
//
// Response keys are kept as existing clients expect them: created and toggled
// schedules come back under `practitioner`, and list rows under `practitioners`.

use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{get_pagination, get_paging_data, PagingData};
use crate::app::AppState;
use crate::config::config;
use crate::database::models::{NewSchedule, Schedule, ScheduleChanges, ScheduleSummary, SCHEDULES};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson, ValidatedQuery};
use crate::validation::{FieldRule, RuleSet};

use super::{parse_id, PAGE_MESSAGE, SIZE_MESSAGE};

const NAME_MESSAGE: &str = "The name cannot be empty and cannot have a length greater than 15";
const DESCRIPTION_MESSAGE: &str =
    "The description cannot be empty and cannot have a length greater than 150";
const ABBREVIATION_MESSAGE: &str =
    "The abbreviation cannot be empty and cannot have a length greater than 5";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
}

impl RuleSet for ListQuery {
    fn rules() -> Vec<FieldRule> {
        vec![
            FieldRule::query("page", PAGE_MESSAGE).optional().is_int(0, i64::MAX),
            FieldRule::query("size", SIZE_MESSAGE).optional().is_int(1, i64::MAX),
            FieldRule::query("name", NAME_MESSAGE).optional().is_string().length(1, 15),
        ]
    }
}

fn body_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::body("name", NAME_MESSAGE).trim().length(1, 15),
        FieldRule::body("description", DESCRIPTION_MESSAGE).trim().length(1, 150),
        FieldRule::body("abbreviation", ABBREVIATION_MESSAGE).trim().length(1, 5),
    ]
}

impl RuleSet for NewSchedule {
    fn rules() -> Vec<FieldRule> {
        body_rules()
    }
}

// Updates carry the full schedule, same as creates
impl RuleSet for ScheduleChanges {
    fn rules() -> Vec<FieldRule> {
        body_rules()
    }
}

/// GET /schedules - Paginated list of schedules
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> ApiResult<PagingData<Schedule>> {
    let pagination = get_pagination(query.page, query.size);
    let (limit, offset) = pagination.window(config().api.default_page_size);

    // Schedules have no firstName column, so `name` is accepted and validated
    // but never narrows the result.
    let filter = Filter::new(&SCHEDULES, limit, offset)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?
        .contains("firstName", query.name.as_deref());

    let data = state.repository.list_schedules(&filter).await?;
    Ok(ApiResponse::success(get_paging_data(data, query.page, pagination.limit)))
}

/// GET /schedules/:id - One schedule without its active flag or timestamps
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ScheduleSummary> {
    let found = match parse_id(&id) {
        Some(pk) => state.repository.find_schedule(pk).await?,
        None => None,
    };

    match found {
        Some(schedule) => Ok(ApiResponse::success(schedule.into())),
        None => Err(ApiError::not_found(format!("There is no schedule with the id {}", id))),
    }
}

/// POST /schedules - Create a schedule
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(new): ValidatedJson<NewSchedule>,
) -> ApiResult<Value> {
    let schedule = state.repository.create_schedule(new).await?;
    tracing::info!("Created schedule {}", schedule.id);
    Ok(ApiResponse::created(json!({ "practitioner": schedule })))
}

/// PUT /schedules/:id - Overwrite name, description and abbreviation
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<ScheduleChanges>,
) -> ApiResult<Value> {
    let updated = match parse_id(&id) {
        Some(pk) => state.repository.update_schedule(pk, changes).await?,
        None => None,
    };

    let schedule = updated.ok_or_else(|| {
        ApiError::unknown_id(
            id.clone(),
            format!("The schedule with id '{}' does not exist", id),
            "id",
        )
    })?;
    tracing::info!("Updated schedule {}", schedule.id);
    Ok(ApiResponse::accepted(json!({ "schedule": schedule })))
}

/// PUT /schedules/toggleActive/:id - Flip the active flag
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let toggled = match parse_id(&id) {
        Some(pk) => state.repository.toggle_schedule(pk).await?,
        None => None,
    };

    let schedule = toggled.ok_or_else(|| {
        ApiError::unknown_id(
            id.clone(),
            format!("The practitioner with id '{}' does not exist", id),
            "schedule",
        )
    })?;
    tracing::debug!("Schedule {} isactive={}", schedule.id, schedule.isactive);
    Ok(ApiResponse::accepted(json!({ "practitioner": schedule })))
}
