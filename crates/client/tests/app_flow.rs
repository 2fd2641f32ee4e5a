//! Black-box tests of the front-end against the mock backend.
//!
//! Every test drives a real `App` over HTTP and inspects the resulting
//! session, state and screen.

use serde_json::json;

use stockdesk_api::{ApiClient, PlanLogisticsRequest, ProcureMissingPartsRequest};
use stockdesk_client::{
    App, AppState, Block, MemoryTokenStore, ScreenMode, Section, SessionState, StockFormError,
    StockUpdateInput, SubmitOutcome,
};
use stockdesk_core::{MovementType, PartId};
use stockdesk_testing::{MockBackend, MockBody, fixtures};

fn app(backend: &MockBackend, store: MemoryTokenStore) -> App<MemoryTokenStore> {
    App::new(ApiClient::new(backend.base_url.as_str()), store)
}

async fn logged_in(backend: &MockBackend) -> (App<MemoryTokenStore>, MemoryTokenStore) {
    let store = MemoryTokenStore::with_token(fixtures::TOKEN);
    let mut app = app(backend, store.clone());
    assert_eq!(app.restore_session(), SessionState::LoggedIn);
    (app, store)
}

fn input(part: u64, movement: MovementType, quantity: &str) -> StockUpdateInput {
    StockUpdateInput {
        part: Some(PartId::from(part)),
        movement,
        quantity: quantity.to_string(),
    }
}

fn notice_texts(app: &App<MemoryTokenStore>) -> Vec<String> {
    app.screen().notices().map(|n| n.text.clone()).collect()
}

#[tokio::test]
async fn startup_without_token_shows_login() {
    let backend = MockBackend::spawn().await;
    let mut app = app(&backend, MemoryTokenStore::new());

    assert_eq!(app.start().await, SessionState::LoggedOut);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    assert_eq!(backend.total_requests(), 0);
}

#[tokio::test]
async fn startup_with_persisted_token_shows_stock_list() {
    let backend = MockBackend::spawn().await;
    let mut app = app(&backend, MemoryTokenStore::with_token(fixtures::TOKEN));

    assert_eq!(app.start().await, SessionState::LoggedIn);
    assert_eq!(app.screen().mode(), ScreenMode::Main);
    assert!(app.state().is_active(Section::StockList));
    assert_eq!(app.state().stock.len(), 2);

    let req = backend.last_request("/api/products").unwrap();
    assert_eq!(req.authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn invalid_login_stays_logged_out() {
    let backend = MockBackend::spawn().await;
    let store = MemoryTokenStore::new();
    let mut app = app(&backend, store.clone());

    let state = app.login(fixtures::USERNAME, "wrong").await;

    assert_eq!(state, SessionState::LoggedOut);
    assert_eq!(store.get(), None);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    assert_eq!(
        app.screen().login_error(),
        Some("Incorrect username or password")
    );
    assert_eq!(backend.request_count("/api/products"), 0);
}

#[tokio::test]
async fn login_persists_token_and_renders_stock_list() {
    let backend = MockBackend::spawn().await;
    let store = MemoryTokenStore::new();
    let mut app = app(&backend, store.clone());

    let state = app.login(fixtures::USERNAME, fixtures::PASSWORD).await;

    assert_eq!(state, SessionState::LoggedIn);
    assert_eq!(store.get().as_deref(), Some(fixtures::TOKEN));
    assert_eq!(app.screen().mode(), ScreenMode::Main);
    assert!(app.screen().blocks().contains(&Block::Title("Stock Tracking".into())));

    let table = app.screen().tables().next().unwrap();
    assert_eq!(table.header.cells, ["Part ID", "Part Name", "Quantity"]);
    assert_eq!(table.body[0].cells, ["1", "Bolt", "10"]);
    assert_eq!(table.body.len(), 2);
}

#[tokio::test]
async fn logout_clears_token() {
    let backend = MockBackend::spawn().await;
    let (mut app, store) = logged_in(&backend).await;

    app.logout();

    assert_eq!(store.get(), None);
    assert_eq!(app.session().state(), SessionState::LoggedOut);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    assert_eq!(app.client().token(), None);
}

#[tokio::test]
async fn fetch_failure_empties_list_and_recovers() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;

    app.open(Section::StockList).await;
    assert_eq!(app.state().stock.len(), 2);

    backend.respond(
        "GET",
        "/api/products",
        500,
        MockBody::Json(json!({"detail": "database offline"})),
    );
    app.open(Section::StockList).await;

    assert!(app.state().stock.is_empty());
    assert!(app.screen().has_errors());
    assert_eq!(
        notice_texts(&app),
        ["Stock information could not be loaded: database offline"]
    );
    // a server error is not an auth failure
    assert_eq!(app.session().state(), SessionState::LoggedIn);
    assert_eq!(app.screen().mode(), ScreenMode::Main);

    backend.respond(
        "GET",
        "/api/products",
        200,
        MockBody::Json(json!([{"id": 7, "name": "Washer", "quantity": 4}])),
    );
    app.open(Section::StockList).await;

    assert!(!app.screen().has_errors());
    assert_eq!(app.state().stock.len(), 1);
    assert_eq!(app.state().stock[0].name, "Washer");
}

struct ListCase {
    section: &'static str,
    method: &'static str,
    path: &'static str,
    what: &'static str,
    two_entries: serde_json::Value,
    cached: fn(&AppState) -> usize,
}

fn list_cases() -> Vec<ListCase> {
    let plan = json!({"product_name": "Gearbox", "quantity": 3, "delivery_date": "2024-07-10"});
    vec![
        ListCase {
            section: "supply",
            method: "GET",
            path: "/api/supply/planning",
            what: "Supply plan",
            two_entries: json!({"items": [
                {"id": 1, "name": "Bolt", "missing_quantity": 5, "planned_delivery_date": "2024-07-01"},
                {"id": 2, "name": "Nut", "missing_quantity": 9, "planned_delivery_date": "2024-07-02"}
            ]}),
            cached: |s| s.supply_plan.len(),
        },
        ListCase {
            section: "logistics",
            method: "POST",
            path: "/api/logistics/plan",
            what: "Logistics plan",
            two_entries: json!({"plans": [plan.clone(), plan.clone()]}),
            cached: |s| s.logistics_plan.len(),
        },
        ListCase {
            section: "reports",
            method: "GET",
            path: "/api/production/reports",
            what: "Production reports",
            two_entries: json!([plan.clone(), plan]),
            cached: |s| s.production_reports.len(),
        },
        ListCase {
            section: "required-parts",
            method: "GET",
            path: "/api/production/required-parts",
            what: "Required parts",
            two_entries: json!({"parts": [
                {"product_name": "Gearbox", "part_id": 1, "part_name": "Bolt", "required_quantity": 8},
                {"product_name": "Gearbox", "part_id": 2, "part_name": "Nut", "required_quantity": 4}
            ]}),
            cached: |s| s.required_parts.len(),
        },
    ]
}

#[tokio::test]
async fn every_list_view_empties_on_failure_and_replaces_on_success() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;

    for case in list_cases() {
        let section = case.section;

        app.navigate(section).await;
        assert_eq!((case.cached)(app.state()), 1, "{section}: fixture list");

        backend.respond(
            case.method,
            case.path,
            500,
            MockBody::Json(json!({"detail": "database offline"})),
        );
        app.navigate(section).await;

        assert_eq!((case.cached)(app.state()), 0, "{section}: emptied");
        let errors: Vec<String> = app
            .screen()
            .notices()
            .filter(|n| n.is_error())
            .map(|n| n.text.clone())
            .collect();
        assert_eq!(
            errors,
            [format!("{} could not be loaded: database offline", case.what)],
            "{section}"
        );
        assert_eq!(app.screen().mode(), ScreenMode::Main, "{section}");

        backend.respond(case.method, case.path, 200, MockBody::Json(case.two_entries.clone()));
        app.navigate(section).await;
        assert_eq!((case.cached)(app.state()), 2, "{section}: replaced");
        assert!(!app.screen().has_errors(), "{section}");

        // a second successful render replaces rather than appends
        app.navigate(section).await;
        assert_eq!((case.cached)(app.state()), 2, "{section}: not appended");
    }
}

#[tokio::test]
async fn unauthorized_list_view_logs_out() {
    let backend = MockBackend::spawn().await;
    let (mut app, store) = logged_in(&backend).await;
    backend.respond(
        "GET",
        "/api/production/reports",
        401,
        MockBody::Json(json!({"detail": "Not authenticated"})),
    );

    app.navigate("reports").await;

    assert!(app.state().production_reports.is_empty());
    assert_eq!(store.get(), None);
    assert_eq!(app.session().state(), SessionState::LoggedOut);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    assert_eq!(app.screen().login_error(), Some("Unauthorized or Forbidden"));
}

#[tokio::test]
async fn empty_stock_shows_info_paragraph() {
    let backend = MockBackend::spawn().await;
    backend.set_products(vec![]);
    let (mut app, _) = logged_in(&backend).await;

    app.open(Section::StockList).await;

    assert!(app
        .screen()
        .blocks()
        .contains(&Block::Paragraph("No items currently in stock.".into())));
}

#[tokio::test]
async fn every_section_renders_its_table() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;

    app.navigate("supply").await;
    let table = app.screen().tables().next().unwrap();
    assert_eq!(
        table.header.cells,
        ["Part ID", "Part Name", "Missing Quantity", "Planned Delivery Date"]
    );
    assert_eq!(table.body[0].cells, ["1", "Bolt", "5", "2024-07-01"]);
    assert_eq!(
        notice_texts(&app),
        ["Supply status of missing parts is tracked here."]
    );

    app.navigate("logistics").await;
    assert_eq!(app.state().logistics_plan.len(), 1);
    assert_eq!(
        backend.last_request("/api/logistics/plan").unwrap().body,
        Some(json!({}))
    );

    app.navigate("reports").await;
    let table = app.screen().tables().next().unwrap();
    assert_eq!(table.header.cells, ["Product", "Quantity", "Delivery Date"]);
    assert_eq!(table.body[0].cells, ["Gearbox", "3", "2024-07-10"]);

    app.navigate("required-parts").await;
    let table = app.screen().tables().next().unwrap();
    assert_eq!(table.body[0].cells, ["Gearbox", "1", "Bolt", "8"]);
    assert!(app.screen().blocks().contains(&Block::Paragraph(
        "The parts above have been forwarded to production.".into()
    )));
    assert!(app.state().is_active(Section::RequiredParts));

    app.navigate("stock-update").await;
    let form = app.screen().form().unwrap();
    assert_eq!(form.parts.len(), 2);
    assert_eq!(form.parts[1].label, "Nut (Stock: 0)");
}

#[tokio::test]
async fn empty_required_parts_shows_paragraph_only() {
    let backend = MockBackend::spawn().await;
    backend.respond(
        "GET",
        "/api/production/required-parts",
        200,
        MockBody::Json(json!({"parts": []})),
    );
    let (mut app, _) = logged_in(&backend).await;

    app.navigate("required-parts").await;

    assert_eq!(app.screen().tables().count(), 0);
    assert!(app.screen().blocks().contains(&Block::Paragraph(
        "No required-parts information is available.".into()
    )));
}

#[tokio::test]
async fn unknown_section_clears_display() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;

    app.navigate("stock").await;
    assert!(!app.screen().blocks().is_empty());

    app.navigate("invoices").await;
    assert!(app.screen().blocks().is_empty());
    assert_eq!(app.state().active, None);
}

#[tokio::test]
async fn invalid_form_input_makes_no_request() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;
    app.open(Section::StockUpdate).await;
    let before = backend.total_requests();

    let cases = [
        (input(1, MovementType::Entry, "0"), StockFormError::InvalidSelection),
        (input(1, MovementType::Entry, "abc"), StockFormError::InvalidSelection),
        (input(99, MovementType::Entry, "1"), StockFormError::InvalidSelection),
        (
            input(2, MovementType::Exit, "1"),
            StockFormError::InsufficientStock {
                requested: 1,
                available: 0,
            },
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(
            app.submit_stock_update(input).await,
            SubmitOutcome::Rejected(expected)
        );
    }

    assert_eq!(backend.total_requests(), before);
    let form = app.screen().form().unwrap();
    assert_eq!(
        form.notice.as_ref().unwrap().text,
        "Not enough stock for this exit!"
    );
}

#[tokio::test]
async fn entry_and_exit_adjust_cached_stock_without_refetch() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;
    app.open(Section::StockUpdate).await;
    let fetches = backend.request_count("/api/products");

    let outcome = app
        .submit_stock_update(input(1, MovementType::Entry, "5"))
        .await;
    assert_eq!(
        outcome,
        SubmitOutcome::Applied {
            part: PartId::from(1),
            quantity: 15
        }
    );

    let sent = backend.last_request("/api/stock/update").unwrap();
    assert_eq!(
        sent.body,
        Some(json!({
            "product_id": "1",
            "warehouse_id": 1,
            "quantity": 5,
            "movement_type": "ENTRY",
            "description": "entry operation"
        }))
    );

    let outcome = app
        .submit_stock_update(input(1, MovementType::Exit, "10"))
        .await;
    assert_eq!(
        outcome,
        SubmitOutcome::Applied {
            part: PartId::from(1),
            quantity: 5
        }
    );

    assert_eq!(backend.request_count("/api/products"), fetches);
    assert_eq!(app.state().part(&PartId::from(1)).unwrap().quantity, 5);

    let form = app.screen().form().unwrap();
    assert_eq!(form.parts[0].label, "Bolt (Stock: 5)");
    assert_eq!(form.notice.as_ref().unwrap().text, "Stock updated");
}

#[tokio::test]
async fn update_rerenders_stock_list_when_it_is_active() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;
    app.open(Section::StockList).await;
    let fetches = backend.request_count("/api/products");

    let outcome = app
        .submit_stock_update(input(1, MovementType::Entry, "1"))
        .await;

    // the mock keeps serving 10, and the re-fetched value wins
    assert_eq!(
        outcome,
        SubmitOutcome::Applied {
            part: PartId::from(1),
            quantity: 10
        }
    );
    assert_eq!(app.state().part(&PartId::from(1)).unwrap().quantity, 10);
    assert_eq!(backend.request_count("/api/products"), fetches + 1);

    let table = app.screen().tables().next().unwrap();
    assert_eq!(table.body[0].cells, ["1", "Bolt", "10"]);
    assert_eq!(notice_texts(&app), ["Stock updated"]);
    assert!(!app.screen().has_errors());
}

#[tokio::test]
async fn stale_token_logs_out_on_first_call() {
    let backend = MockBackend::spawn().await;
    let store = MemoryTokenStore::with_token("expired");
    let mut app = app(&backend, store.clone());

    assert_eq!(app.start().await, SessionState::LoggedOut);
    assert_eq!(store.get(), None);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    assert_eq!(app.screen().login_error(), Some("Unauthorized or Forbidden"));
    assert!(app.state().stock.is_empty());
}

#[tokio::test]
async fn forbidden_update_logs_out() {
    let backend = MockBackend::spawn().await;
    let (mut app, store) = logged_in(&backend).await;
    app.open(Section::StockUpdate).await;
    backend.respond(
        "POST",
        "/api/stock/update",
        403,
        MockBody::Json(json!({"detail": "Forbidden"})),
    );

    let outcome = app
        .submit_stock_update(input(1, MovementType::Entry, "1"))
        .await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_unauthorized()));
    assert_eq!(store.get(), None);
    assert_eq!(app.screen().mode(), ScreenMode::Login);
    // the cached quantity is untouched
    assert_eq!(app.state().part(&PartId::from(1)).unwrap().quantity, 10);
}

#[tokio::test]
async fn supplementary_actions_show_backend_answer() {
    let backend = MockBackend::spawn().await;
    let (mut app, _) = logged_in(&backend).await;
    app.open(Section::StockList).await;

    let value = app
        .procure_missing_parts(&ProcureMissingPartsRequest {
            product_id: PartId::from(1),
            missing_quantity: 5,
        })
        .await
        .unwrap();
    assert_eq!(value["message"], "Procurement order created");
    assert_eq!(app.state().active, None);
    assert!(app.screen().blocks().iter().any(|b| matches!(b, Block::Json(_))));

    let planned = app
        .plan_logistics(&PlanLogisticsRequest {
            product_id: PartId::from(1),
            quantity: 3,
            delivery_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(planned, 1);
    assert_eq!(
        backend.last_request("/api/logistics/plan").unwrap().body,
        Some(json!({"product_id": "1", "quantity": 3, "delivery_date": "2024-07-10"}))
    );

    backend.respond(
        "GET",
        "/api/production/upcoming-products-report",
        500,
        MockBody::Text("boom".into()),
    );
    assert!(app.upcoming_products_report().await.is_err());
    assert_eq!(
        notice_texts(&app),
        ["Upcoming products report failed: HTTP error! Status: 500"]
    );
}
