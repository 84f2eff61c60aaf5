use super::*;
use axum::{body, body::Body, http::Request, response::Response};
use tower::ServiceExt;

fn test_app(api_token: Option<&str>) -> Router {
    build_router(AppState::new(api_token.map(str::to_string)))
}

fn create_request(name: &str) -> Request<Body> {
    Request::post("/api/inventory")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "item_name": name, "status": "in stock" }).to_string(),
        ))
        .expect("request")
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app(None).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn create_list_and_delete_round_trip() {
    let app = test_app(None);

    let response = app
        .clone()
        .oneshot(create_request("Corn"))
        .await
        .expect("create response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Item = json_body(response).await;
    assert_eq!(created.name, "Corn");
    assert_eq!(created.status, "in stock");
    assert!(!created.created_at.is_empty());

    let list = Request::get("/api/inventory")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(list).await.expect("list response");
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response).await;
    assert_eq!(items, vec![created.clone()]);

    let remove = Request::delete(format!("/api/inventory/{}", created.item_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(remove).await.expect("delete response");
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: Item = json_body(response).await;
    assert_eq!(deleted, created);

    let remove_again = Request::delete(format!("/api/inventory/{}", created.item_id))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(remove_again).await.expect("delete response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ApiError = json_body(response).await;
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let response = test_app(None)
        .oneshot(create_request(""))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = json_body(response).await;
    assert_eq!(error.code, ErrorCode::Validation);
}

#[tokio::test]
async fn bearer_token_is_enforced_when_configured() {
    let app = test_app(Some("s3cret"));

    let anonymous = Request::get("/api/inventory")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(anonymous).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong = Request::get("/api/inventory")
        .header("authorization", "Bearer nope")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(wrong).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let authorized = Request::get("/api/inventory")
        .header("authorization", "Bearer s3cret")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(authorized).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
