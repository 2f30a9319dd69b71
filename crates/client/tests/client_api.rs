use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use kitchen_client::{ClientError, KitchenClient};
use kitchen_core::{NewIngredient, NewUser, ReportPeriod, Role};

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn ingredient(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "weight": 1500.0,
        "created_at": "2024-03-01T08:00:00",
        "updated_at": "2024-03-01T08:00:00"
    })
}

#[tokio::test]
async fn lists_ingredients_with_bearer_token() {
    async fn list(headers: HeaderMap) -> impl IntoResponse {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer secret") => (
                StatusCode::OK,
                Json(json!({ "items": [ingredient(1, "Rice"), ingredient(2, "Milk")] })),
            ),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Not authenticated" })),
            ),
        }
    }

    let base = serve(Router::new().route("/ingredient/", get(list))).await;

    let client = KitchenClient::new(&base).unwrap().with_token("secret");
    let items = client.list_ingredients().await.unwrap();
    assert_eq!(
        items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        ["Rice", "Milk"]
    );

    let anonymous = KitchenClient::new(&base).unwrap();
    match anonymous.list_ingredients().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Not authenticated");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn creates_and_deletes_ingredient() {
    async fn create(Json(body): Json<Value>) -> impl IntoResponse {
        (StatusCode::CREATED, Json(ingredient(9, body["name"].as_str().unwrap())))
    }
    async fn remove(Path(id): Path<i64>) -> StatusCode {
        if id == 9 {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::NOT_FOUND
        }
    }

    let base = serve(
        Router::new()
            .route("/ingredient/", post(create))
            .route("/ingredient/{id}", delete(remove)),
    )
    .await;
    let client = KitchenClient::new(&base).unwrap();

    let created = client
        .create_ingredient(&NewIngredient::new("Buckwheat"))
        .await
        .unwrap();
    assert_eq!(created.id, 9);
    assert_eq!(created.name, "Buckwheat");

    client.delete_ingredient(9).await.unwrap();
    let missing = client.delete_ingredient(10).await.unwrap_err();
    assert_eq!(missing.status(), Some(404));
}

#[tokio::test]
async fn create_user_surfaces_backend_detail() {
    async fn create(Json(body): Json<Value>) -> impl IntoResponse {
        assert_eq!(body["role"], "manager");
        assert_eq!(body["password"], "pw");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Username already registered" })),
        )
    }

    let base = serve(Router::new().route("/user/", post(create))).await;
    let client = KitchenClient::new(&base).unwrap();

    let err = client
        .create_user(&NewUser {
            username: "nurlan".into(),
            email: "n@example.org".into(),
            phone: "+996555000111".into(),
            first_name: "Nurlan".into(),
            last_name: "Abdyldaev".into(),
            role: Role::Manager,
            password: "pw".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API error (400): Username already registered");
}

#[tokio::test]
async fn serve_portions_reports_partial_success() {
    async fn serve_one(
        State(calls): State<Arc<AtomicUsize>>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        assert_eq!(body, json!({ "meal_id": 4 }));
        // The kitchen runs out after three portions.
        if calls.fetch_add(1, Ordering::SeqCst) < 3 {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let base = serve(
        Router::new()
            .route("/serve-meal/", post(serve_one))
            .with_state(calls.clone()),
    )
    .await;
    let client = KitchenClient::new(&base).unwrap();

    let outcome = client.serve_portions(4, 5).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(outcome.requested, 5);
    assert_eq!(outcome.served, 3);
    assert!(!outcome.is_complete());
}

#[tokio::test]
async fn serve_portions_rejects_zero_quantity() {
    // Nothing listens here; the request must never be sent.
    let client = KitchenClient::new("http://127.0.0.1:9").unwrap();
    let err = client.serve_portions(1, 0).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn report_queries_cover_the_whole_month() {
    async fn usage(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(params["start_date"], "2024-02-01");
        assert_eq!(params["end_date"], "2024-02-29");
        assert_eq!(params["group_by"], "day");
        Json(json!([{
            "date": "2024-02-03",
            "ingredient_name": "Rice",
            "consumed": 3.5,
            "delivered": 10.0,
            "net_change": 6.5
        }]))
    }
    async fn summary(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(params["year"], "2024");
        assert_eq!(params["month"], "2");
        Json(json!({ "meals": [{
            "meal_name": "Plov",
            "portions_served": 90,
            "total_possible_portions": 120,
            "difference_rate": 25.0,
            "potential_misuse": true
        }]}))
    }
    async fn analysis() -> Json<Value> {
        Json(Value::Null)
    }

    let base = serve(
        Router::new()
            .route("/report/ingredient-usage/", get(usage))
            .route("/report/monthly-summary/", get(summary))
            .route("/report/ingredient-analysis/", get(analysis)),
    )
    .await;
    let client = KitchenClient::new(&base).unwrap();
    let period = ReportPeriod::new(2024, 2).unwrap();

    let usage = client.ingredient_usage(period).await.unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].net_change, 6.5);

    let summary = client.monthly_summary(period).await.unwrap();
    assert!(summary[0].potential_misuse);

    assert!(client.ingredient_analysis(period).await.unwrap().is_empty());
}

#[tokio::test]
async fn snapshots_treat_null_as_empty_and_keep_status() {
    async fn notifications() -> Json<Value> {
        Json(Value::Null)
    }
    async fn portions() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    let base = serve(
        Router::new()
            .route("/ws/notification/notifications", get(notifications))
            .route("/ws/portion/portions", get(portions)),
    )
    .await;
    let client = KitchenClient::new(&base).unwrap();

    assert!(client.notifications_snapshot().await.unwrap().is_empty());

    match client.portions_snapshot().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed: boom");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
