mod common;

use axum::http::StatusCode;
use common::{staff_fields, TestApp};
use serde_json::json;

#[tokio::test]
async fn submitted_values_are_projected_onto_form_fields() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;

    let (status, body) = app
        .post(
            "/api/employees",
            json!({
                "form_id": form_id,
                "employee_data": {"full_name": "Ada", "pay": "100", "extra": "x"}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let employee = &body["data"];
    assert_eq!(employee["employee_data"], json!({"full_name": "Ada", "pay": "100"}));
    assert_eq!(employee["display_name"], "Ada");
    assert_eq!(employee["form"]["id"], form_id);
    assert_eq!(employee["is_active"], true);
}

#[tokio::test]
async fn missing_values_default_to_empty_and_scalars_become_text() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;

    let (status, body) = app
        .post("/api/employees", json!({ "form_id": form_id, "employee_data": {"pay": 100} }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["employee_data"], json!({"full_name": "", "pay": "100"}));
}

#[tokio::test]
async fn nested_values_are_rejected() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;

    let (status, body) = app
        .post(
            "/api/employees",
            json!({ "form_id": form_id, "employee_data": {"full_name": ["Ada", "Lovelace"]} }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .post("/api/employees", json!({ "form_id": form_id, "employee_data": "Ada" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn display_name_falls_back_to_id() {
    let app = TestApp::new();
    let form_id = app
        .create_form("Badges", json!([{"name": "id_code", "type": "text", "label": "Code"}]))
        .await;

    let id = app.create_employee(form_id, json!({"id_code": "77"})).await;
    let (status, body) = app.get(&format!("/api/employees/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["display_name"], format!("Employee #{}", id));
}

#[tokio::test]
async fn explicit_display_field_wins() {
    let app = TestApp::new();
    let (_, body) = app
        .post(
            "/api/forms",
            json!({
                "name": "Badges",
                "fields_config": [
                    {"name": "full_name", "type": "text", "label": "Name"},
                    {"name": "badge", "type": "text", "label": "Badge"}
                ],
                "display_field": "badge"
            }),
        )
        .await;
    let form_id = body["data"]["id"].as_i64().unwrap();

    let id = app
        .create_employee(form_id, json!({"full_name": "Ada", "badge": "B-12"}))
        .await;
    let (_, body) = app.get(&format!("/api/employees/{}", id)).await;
    assert_eq!(body["data"]["display_name"], "B-12");
}

#[tokio::test]
async fn records_need_an_active_form() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/employees", json!({ "form_id": 404, "employee_data": {} }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let form_id = app.create_form("Staff", staff_fields()).await;
    app.delete(&format!("/api/forms/{}", form_id)).await;
    let (status, _) = app
        .post("/api/employees", json!({ "form_id": form_id, "employee_data": {} }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_reprojects_against_current_fields() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;
    let raw = json!({"full_name": "Ada", "pay": "100"});
    let id = app.create_employee(form_id, raw.clone()).await;

    let (status, _) = app
        .patch(
            &format!("/api/forms/{}", form_id),
            json!({ "fields_config": [{"name": "full_name", "type": "text", "label": "Full name"}] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Existing values are untouched by the template edit
    let (_, body) = app.get(&format!("/api/employees/{}", id)).await;
    assert_eq!(body["data"]["employee_data"]["pay"], "100");

    let (status, body) = app
        .put(&format!("/api/employees/{}", id), json!({ "employee_data": raw }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_data"], json!({"full_name": "Ada"}));
}

#[tokio::test]
async fn update_is_a_full_overwrite() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;
    let id = app
        .create_employee(form_id, json!({"full_name": "Ada", "pay": "100"}))
        .await;

    let (status, body) = app
        .put(&format!("/api/employees/{}", id), json!({ "employee_data": {"pay": "120"} }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["employee_data"], json!({"full_name": "", "pay": "120"}));
    assert_eq!(body["data"]["display_name"], format!("Employee #{}", id));
}

#[tokio::test]
async fn deactivated_records_are_hidden() {
    let app = TestApp::new();
    let form_id = app.create_form("Staff", staff_fields()).await;
    let id = app.create_employee(form_id, json!({"full_name": "Ada"})).await;
    let uri = format!("/api/employees/{}", id);

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.put(&uri, json!({ "employee_data": {} })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/employees").await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = app.get("/api/employees?include_inactive=true").await;
    assert_eq!(body["data"][0]["id"], id);
    assert_eq!(body["data"][0]["is_active"], false);

    let (status, _) = app.delete("/api/employees/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_values_and_form_name() {
    let app = TestApp::new();
    let staff = app.create_form("Staff", staff_fields()).await;
    let vendors = app
        .create_form("Vendors", json!([{"name": "company", "type": "text", "label": "Company"}]))
        .await;
    let ada = app.create_employee(staff, json!({"full_name": "Ada"})).await;
    let grace = app.create_employee(staff, json!({"full_name": "Grace"})).await;
    let acme = app.create_employee(vendors, json!({"company": "Acme"})).await;

    let ids = |body: &serde_json::Value| -> Vec<i64> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect()
    };

    let (_, body) = app.get("/api/employees?search=ADA").await;
    assert_eq!(ids(&body), vec![ada]);

    let (_, body) = app.get("/api/employees?search=staff").await;
    assert_eq!(ids(&body), vec![grace, ada]);

    let (_, body) = app.get("/api/employees").await;
    assert_eq!(ids(&body), vec![acme, grace, ada]);

    let (_, body) = app.get("/api/employees?search=").await;
    assert_eq!(ids(&body), vec![acme, grace, ada]);

    let (_, body) = app.get(&format!("/api/employees?form_id={}", vendors)).await;
    assert_eq!(ids(&body), vec![acme]);

    let (_, body) = app.get("/api/employees?search=nobody").await;
    assert_eq!(ids(&body), Vec::<i64>::new());
}

#[tokio::test]
async fn list_items_are_compact() {
    let app = TestApp::new();
    let staff = app.create_form("Staff", staff_fields()).await;
    app.create_employee(staff, json!({"full_name": "Ada"})).await;

    let (_, body) = app.get("/api/employees").await;
    let item = &body["data"][0];
    assert_eq!(item["form_name"], "Staff");
    assert_eq!(item["display_name"], "Ada");
    assert!(item.get("employee_data").is_none());
}

#[tokio::test]
async fn bad_search_parameters_are_rejected() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/employees?form_id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn blank_filters_from_html_forms_are_ignored() {
    let app = TestApp::new();
    let staff = app.create_form("Staff", staff_fields()).await;
    let ada = app.create_employee(staff, json!({"full_name": "Ada"})).await;

    let (status, body) = app
        .get("/api/employees?search=ada&form_id=&include_inactive=")
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"][0]["id"], ada);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/forms?include_inactive=").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"][0]["id"], staff);
}
