mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{create_schedule, get, post, put, schedule_body, test_app};

#[tokio::test]
async fn create_returns_schedule_under_practitioner_key() -> Result<()> {
    let app = test_app();

    let (status, body) = post(&app, "/schedules", json!({
        "name": "  Cardiology ",
        "description": "Heart care",
        "abbreviation": "CRD",
        "unexpected": "ignored",
    }))
    .await?;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let schedule = &body["practitioner"];
    assert_eq!(schedule["id"], 1);
    assert_eq!(schedule["name"], "Cardiology");
    assert_eq!(schedule["isactive"], true);
    assert!(schedule.get("createdAt").is_some());
    assert!(schedule.get("unexpected").is_none());
    Ok(())
}

#[tokio::test]
async fn create_reports_every_failing_field() -> Result<()> {
    let app = test_app();

    let (status, body) = post(&app, "/schedules", json!({
        "name": "A name that is far too long",
        "abbreviation": "TOOLONG",
    }))
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().cloned().unwrap_or_default();
    let params: Vec<&str> = errors.iter().filter_map(|e| e["param"].as_str()).collect();
    assert_eq!(params, vec!["name", "description", "abbreviation"]);
    assert!(errors.iter().all(|e| e["location"] == "body"));

    // A missing field carries no value
    assert!(errors[1].get("value").is_none());
    assert_eq!(errors[2]["value"], "TOOLONG");
    Ok(())
}

#[tokio::test]
async fn get_hides_flag_and_timestamps() -> Result<()> {
    let app = test_app();
    let id = create_schedule(&app, "Pediatrics").await?;

    let (status, body) = get(&app, &format!("/schedules/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "id": id,
        "name": "Pediatrics",
        "description": "Pediatrics consultations",
        "abbreviation": "GEN",
    }));
    Ok(())
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_404() -> Result<()> {
    let app = test_app();

    let (status, body) = get(&app, "/schedules/77").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "There is no schedule with the id 77");

    let (status, body) = get(&app, "/schedules/abc").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "There is no schedule with the id abc");
    Ok(())
}

#[tokio::test]
async fn list_without_size_has_no_page_fields() -> Result<()> {
    let app = test_app();
    for name in ["One", "Two", "Three"] {
        create_schedule(&app, name).await?;
    }

    let (status, body) = get(&app, "/schedules").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 3);
    assert_eq!(body["practitioners"].as_array().map(Vec::len), Some(3));
    assert!(body.get("totalPages").is_none());
    assert!(body.get("currentPageIndex").is_none());
    Ok(())
}

#[tokio::test]
async fn list_pages_through_rows_in_id_order() -> Result<()> {
    let app = test_app();
    for name in ["One", "Two", "Three", "Four", "Five"] {
        create_schedule(&app, name).await?;
    }

    let (status, body) = get(&app, "/schedules?page=1&size=2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPageIndex"], 1);
    let names: Vec<&str> = body["practitioners"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Three", "Four"]);
    Ok(())
}

#[tokio::test]
async fn list_with_largest_size_counts_one_page() -> Result<()> {
    let app = test_app();
    create_schedule(&app, "One").await?;
    create_schedule(&app, "Two").await?;

    let (status, body) = get(&app, "/schedules?size=9223372036854775807&page=0").await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["practitioners"].as_array().map(Vec::len), Some(2));

    let (status, body) = get(&app, "/schedules?size=9223372036854775807&page=3").await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["practitioners"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn list_name_filter_does_not_narrow() -> Result<()> {
    let app = test_app();
    create_schedule(&app, "Cardiology").await?;
    create_schedule(&app, "Dermatology").await?;

    let (status, body) = get(&app, "/schedules?name=zzz").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    Ok(())
}

#[tokio::test]
async fn list_rejects_bad_paging_parameters() -> Result<()> {
    let app = test_app();

    let (status, body) = get(&app, "/schedules?page=-1&size=0").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "page");
    assert_eq!(body["errors"][0]["location"], "query");
    assert_eq!(body["errors"][0]["value"], "-1");
    assert_eq!(body["errors"][1]["param"], "size");
    assert_eq!(
        body["errors"][1]["msg"],
        "The size parameter must be a numeric value and at least its value must be 1"
    );
    Ok(())
}

#[tokio::test]
async fn update_overwrites_fields() -> Result<()> {
    let app = test_app();
    let id = create_schedule(&app, "Neurology").await?;

    let (status, body) = put(&app, &format!("/schedules/{}", id), Some(json!({
        "name": "Neuro",
        "description": "Brain care",
        "abbreviation": "NEU",
    })))
    .await?;

    assert_eq!(status, StatusCode::ACCEPTED, "{}", body);
    assert_eq!(body["schedule"]["name"], "Neuro");
    assert_eq!(body["schedule"]["abbreviation"], "NEU");
    assert_eq!(body["schedule"]["isactive"], true);
    Ok(())
}

#[tokio::test]
async fn update_requires_every_field() -> Result<()> {
    let app = test_app();
    let id = create_schedule(&app, "Neurology").await?;

    let (status, body) =
        put(&app, &format!("/schedules/{}", id), Some(json!({ "name": "Neuro" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_rejected() -> Result<()> {
    let app = test_app();

    let (status, body) = put(&app, "/schedules/9", Some(schedule_body("Ghost"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({
        "value": "9",
        "msg": "The schedule with id '9' does not exist",
        "param": "id",
        "location": "params",
    }));
    Ok(())
}

#[tokio::test]
async fn toggle_flips_and_restores_active_flag() -> Result<()> {
    let app = test_app();
    let id = create_schedule(&app, "Oncology").await?;
    let uri = format!("/schedules/toggleActive/{}", id);

    let (status, body) = put(&app, &uri, None).await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["practitioner"]["isactive"], false);

    let (_, body) = put(&app, &uri, None).await?;
    assert_eq!(body["practitioner"]["isactive"], true);
    Ok(())
}

#[tokio::test]
async fn toggle_unknown_id_is_rejected() -> Result<()> {
    let app = test_app();

    let (status, body) = put(&app, "/schedules/toggleActive/5", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "The practitioner with id '5' does not exist");
    assert_eq!(body["param"], "schedule");
    assert_eq!(body["location"], "params");
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_rejected_on_writes() -> Result<()> {
    let app = test_app();

    let (status, body) = put(&app, "/schedules/toggleActive/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "The practitioner with id 'abc' does not exist");

    let (status, body) = put(&app, "/schedules/abc", Some(schedule_body("Ghost"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["param"], "id");
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_413() -> Result<()> {
    let app = test_app();
    let mut body = schedule_body("Big");
    body["description"] = json!("x".repeat(2 * 1024 * 1024));

    let (status, reply) = post(&app, "/schedules", body).await?;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{}", reply);

    let (_, list) = get(&app, "/schedules").await?;
    assert_eq!(list["totalItems"], 0);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = test_app();

    let (status, body) = get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}
