use serde_json::{Value, json};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-123";

/// Stock served by `GET /api/products` until a test replaces it.
pub fn products() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Bolt", "quantity": 10}),
        json!({"id": 2, "name": "Nut", "quantity": 0}),
    ]
}

pub fn supply_plan() -> Value {
    json!([
        {"id": 1, "name": "Bolt", "missing_quantity": 5, "planned_delivery_date": "2024-07-01"}
    ])
}

pub fn production_reports() -> Value {
    json!({
        "reports": [
            {"product_name": "Gearbox", "quantity": 3, "delivery_date": "2024-07-10"}
        ]
    })
}

pub fn required_parts() -> Value {
    json!({
        "parts": [
            {"product_name": "Gearbox", "part_id": 1, "part_name": "Bolt", "required_quantity": 8}
        ]
    })
}

pub fn logistics_plans() -> Value {
    json!({
        "plans": [
            {"product_name": "Gearbox", "quantity": 3, "delivery_date": "2024-07-10"}
        ]
    })
}

pub fn upcoming_products() -> Value {
    json!({"products": [{"product_name": "Gearbox", "due": "2024-07-10"}]})
}
