use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    file: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.file);
    }
}

fn build_app() -> TestApp {
    // isolated CSV per test
    let file = std::env::temp_dir().join(format!("drivers_api_{}.csv", Uuid::new_v4()));
    let state = ServerState::new(&file, "http://localhost:8000/docs");
    TestApp { router: routes::build_router(state, cors()), file }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.router.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, json))
}

#[tokio::test]
async fn root_returns_welcome() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "CRUD API for Taxi Driver Management");
    assert_eq!(body["docs_url"], "http://localhost:8000/docs");
    Ok(())
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_assigns_sequential_ids_and_defaults() -> anyhow::Result<()> {
    let app = build_app();

    let (status, amy) = send(&app, "POST", "/drivers", Some(json!({"name": "Amy", "license_number": "L1"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        amy,
        json!({"id": 1, "name": "Amy", "license_number": "L1", "vehicle_type": null, "is_available": true})
    );

    let (status, bo) = send(&app, "POST", "/drivers", Some(json!({"name": "Bo", "license_number": "L2"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bo["id"], 2);

    let (status, found) = send(&app, "GET", "/drivers?name=am", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([amy]));
    Ok(())
}

#[tokio::test]
async fn get_after_create_is_identical() -> anyhow::Result<()> {
    let app = build_app();
    let (_, created) = send(
        &app,
        "POST",
        "/drivers",
        Some(json!({"name": "Cy", "license_number": "L3", "vehicle_type": "wagon", "is_available": false})),
    )
    .await?;
    let (status, fetched) = send(&app, "GET", "/drivers/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn missing_driver_is_404_with_detail() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/drivers/99", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Driver not found"}));

    let (status, body) = send(&app, "PUT", "/drivers/99", Some(json!({"name": "X", "license_number": "Y"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Driver not found");

    // a failed update must not create the file
    assert!(std::fs::metadata(&app.file).is_err());
    Ok(())
}

#[tokio::test]
async fn update_overwrites_every_mutable_field() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/drivers", Some(json!({"name": "Amy", "license_number": "L1", "vehicle_type": "sedan"}))).await?;

    let (status, updated) = send(
        &app,
        "PUT",
        "/drivers/1",
        Some(json!({"name": "Amelia", "license_number": "L1-B", "is_available": false})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": 1, "name": "Amelia", "license_number": "L1-B", "vehicle_type": null, "is_available": false})
    );

    let (_, fetched) = send(&app, "GET", "/drivers/1", None).await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn list_filters_combine() -> anyhow::Result<()> {
    let app = build_app();
    for body in [
        json!({"name": "John", "license_number": "L1", "vehicle_type": "sedan"}),
        json!({"name": "Joanna", "license_number": "L2", "vehicle_type": "sedan", "is_available": false}),
        json!({"name": "Amy", "license_number": "L3", "vehicle_type": "suv"}),
    ] {
        let (status, _) = send(&app, "POST", "/drivers", Some(body)).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, all) = send(&app, "GET", "/drivers", None).await?;
    let ids: Vec<u64> = all.as_array().unwrap().iter().map(|d| d["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let (_, jo) = send(&app, "GET", "/drivers?name=JO", None).await?;
    let names: Vec<&str> = jo.as_array().unwrap().iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["John", "Joanna"]);

    let (status, both) = send(&app, "GET", "/drivers?is_available=true&vehicle_type=sedan", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(both.as_array().unwrap().len(), 1);
    assert_eq!(both[0]["name"], "John");

    let (_, none) = send(&app, "GET", "/drivers?vehicle_type=wagon", None).await?;
    assert_eq!(none, json!([]));
    Ok(())
}

#[tokio::test]
async fn availability_filter_accepts_file_spellings() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/drivers", Some(json!({"name": "Amy", "license_number": "L1"}))).await?;
    send(&app, "POST", "/drivers", Some(json!({"name": "Bo", "license_number": "L2", "is_available": false}))).await?;

    for flag in ["true", "True", "1", "yes", "Y"] {
        let (status, body) = send(&app, "GET", &format!("/drivers?is_available={flag}"), None).await?;
        assert_eq!(status, StatusCode::OK, "{flag}");
        assert_eq!(body.as_array().map(Vec::len), Some(1), "{flag}");
        assert_eq!(body[0]["name"], "Amy", "{flag}");
    }
    for flag in ["false", "False", "0", "no"] {
        let (status, body) = send(&app, "GET", &format!("/drivers?is_available={flag}"), None).await?;
        assert_eq!(status, StatusCode::OK, "{flag}");
        assert_eq!(body.as_array().map(Vec::len), Some(1), "{flag}");
        assert_eq!(body[0]["name"], "Bo", "{flag}");
    }

    let (status, all) = send(&app, "GET", "/drivers?is_available=", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (status, _) = send(&app, "GET", "/drivers?is_available=maybe", None).await?;
    assert!(status.is_client_error(), "{status}");
    Ok(())
}

#[tokio::test]
async fn corrupt_row_is_a_server_error_until_rewritten() -> anyhow::Result<()> {
    let app = build_app();
    std::fs::write(
        &app.file,
        "id,name,license_number,vehicle_type,is_available\n1,Amy,L1,truck,True\n",
    )?;

    let (status, body) = send(&app, "GET", "/drivers/1", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Internal Server Error"}));

    let (status, body) = send(&app, "GET", "/drivers", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["detail"].as_str().unwrap_or_default().contains("truck"));

    let (status, fixed) = send(
        &app,
        "PUT",
        "/drivers/1",
        Some(json!({"name": "Amy", "license_number": "L1", "vehicle_type": "suv"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fixed["vehicle_type"], "suv");

    let (status, fetched) = send(&app, "GET", "/drivers/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, fixed);
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_nothing() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/drivers?name=anyone", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_input_is_rejected_before_the_store() -> anyhow::Result<()> {
    let app = build_app();

    let (status, _) = send(
        &app,
        "POST",
        "/drivers",
        Some(json!({"name": "Amy", "license_number": "L1", "vehicle_type": "truck"})),
    )
    .await?;
    assert!(status.is_client_error(), "{status}");

    let (status, _) = send(&app, "POST", "/drivers", Some(json!({"name": "Amy"}))).await?;
    assert!(status.is_client_error(), "{status}");

    let (status, _) = send(&app, "GET", "/drivers?vehicle_type=truck", None).await?;
    assert!(status.is_client_error(), "{status}");

    let (status, _) = send(&app, "GET", "/drivers/not-a-number", None).await?;
    assert!(status.is_client_error(), "{status}");

    assert!(std::fs::metadata(&app.file).is_err());
    Ok(())
}

#[tokio::test]
async fn backing_file_uses_expected_layout() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, "POST", "/drivers", Some(json!({"name": "Amy", "license_number": "L1"}))).await?;
    send(&app, "POST", "/drivers", Some(json!({"name": "Bo", "license_number": "L2", "vehicle_type": "suv", "is_available": false}))).await?;

    let text = std::fs::read_to_string(&app.file)?;
    assert_eq!(
        text,
        "id,name,license_number,vehicle_type,is_available\n1,Amy,L1,,True\n2,Bo,L2,suv,False\n"
    );
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/drivers/{id}").is_some());
    Ok(())
}
