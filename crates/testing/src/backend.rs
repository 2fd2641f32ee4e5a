//! In-process stand-in for the inventory backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::fixtures;

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Canned response body.
#[derive(Debug, Clone)]
pub enum MockBody {
    Json(Value),
    Text(String),
}

#[derive(Debug, Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    products: Mutex<Vec<Value>>,
    overrides: Mutex<HashMap<(String, String), (u16, MockBody)>>,
}

/// Mock backend bound to an ephemeral port. Aborted on drop.
pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState {
            products: Mutex::new(fixtures::products()),
            ..MockState::default()
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().expect("listener has no local addr");
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend crashed");
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    /// Answer `method path` with a fixed status and body from now on.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: MockBody) {
        self.state
            .overrides
            .lock()
            .unwrap()
            .insert((method.to_uppercase(), path.to_string()), (status, body));
    }

    /// Replace the stock served by `GET /api/products`.
    pub fn set_products(&self, products: Vec<Value>) {
        *self.state.products.lock().unwrap() = products;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Last recorded request to `path`.
    pub fn last_request(&self, path: &str) -> Option<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice::<Value>(&body).ok();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let canned = state
        .overrides
        .lock()
        .unwrap()
        .get(&(method.as_str().to_string(), path.clone()))
        .cloned();
    if let Some((status, body)) = canned {
        return reply(status, body);
    }

    if method == Method::POST && path == "/api/token" {
        return login(body.as_ref());
    }

    let expected = format!("Bearer {}", fixtures::TOKEN);
    if authorization.as_deref() != Some(expected.as_str()) {
        return reply(401, MockBody::Json(json!({"detail": "Not authenticated"})));
    }

    let ok = |v: Value| reply(200, MockBody::Json(v));

    match (method.as_str(), path.as_str()) {
        ("GET", "/api/products") => {
            let products = state.products.lock().unwrap().clone();
            let total = products.len();
            ok(json!({"products": products, "total_count": total}))
        }
        ("GET", "/api/supply/planning") => ok(fixtures::supply_plan()),
        ("POST", "/api/stock/update") => ok(json!({"message": "Stock updated"})),
        ("GET", "/api/production/reports") => ok(fixtures::production_reports()),
        ("GET", "/api/production/required-parts") => ok(fixtures::required_parts()),
        ("POST", "/api/stock/check-part-status") => {
            let product_id = body
                .as_ref()
                .and_then(|b| b.get("product_id"))
                .cloned()
                .unwrap_or(Value::Null);
            ok(json!({"product_id": product_id, "available": true}))
        }
        ("POST", "/api/supply/procure-missing-parts") => {
            ok(json!({"message": "Procurement order created"}))
        }
        ("POST", "/api/logistics/plan") => ok(fixtures::logistics_plans()),
        ("GET", "/api/production/upcoming-products-report") => ok(fixtures::upcoming_products()),
        ("POST", "/api/stock/deliver-to-production") => ok(json!({"message": "Delivered"})),
        _ => reply(404, MockBody::Json(json!({"detail": "Not Found"}))),
    }
}

fn login(body: Option<&Value>) -> Response {
    let field = |name: &str| body.and_then(|b| b.get(name)).and_then(|v| v.as_str());

    if field("username") == Some(fixtures::USERNAME) && field("password") == Some(fixtures::PASSWORD)
    {
        reply(
            200,
            MockBody::Json(json!({"access_token": fixtures::TOKEN, "token_type": "bearer"})),
        )
    } else {
        reply(
            401,
            MockBody::Json(json!({"detail": "Incorrect username or password"})),
        )
    }
}

fn reply(status: u16, body: MockBody) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match body {
        MockBody::Json(v) => (status, axum::Json(v)).into_response(),
        MockBody::Text(t) => (status, t).into_response(),
    }
}
