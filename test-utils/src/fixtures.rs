//! JSON fixtures shaped like the book ordering API's responses.

use serde_json::{Value, json};

/// Timestamp used on every fixture order (milliseconds since the epoch).
pub const ORDER_TIMESTAMP: u64 = 1_735_689_600_000;

/// Client id recorded as `createdBy` on fixture orders.
pub const CREATED_BY: &str = "d2b8e1c0f5a54f0c9e3b0a1d7c6e5f4a";

/// A full book record, as returned by `GET /books/{id}`.
#[must_use]
pub fn book(id: u64, kind: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Book {id}"),
        "author": "Ann Author",
        "type": kind,
        "price": 12.5,
        "current-stock": 12,
        "available": true
    })
}

/// A book listing entry, as returned by `GET /books`.
#[must_use]
pub fn book_summary(id: u64, kind: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Book {id}"),
        "type": kind,
        "available": id % 4 != 0
    })
}

/// The six-book listing.
#[must_use]
pub fn book_list() -> Value {
    Value::Array(
        (1..=6)
            .map(|id| book_summary(id, if id % 2 == 0 { "non-fiction" } else { "fiction" }))
            .collect(),
    )
}

/// An order record, as returned by `GET /orders/{id}`.
#[must_use]
pub fn order(id: &str, book_id: u64, customer_name: &str) -> Value {
    json!({
        "id": id,
        "bookId": book_id,
        "customerName": customer_name,
        "createdBy": CREATED_BY,
        "quantity": 1,
        "timestamp": ORDER_TIMESTAMP
    })
}

/// Response to `POST /orders/`.
#[must_use]
pub fn order_created(order_id: &str) -> Value {
    json!({"created": true, "orderId": order_id})
}

/// Response to `POST /api-clients/`.
#[must_use]
pub fn registration(token: &str) -> Value {
    json!({"accessToken": token})
}

/// Error body the API uses for rejected requests.
#[must_use]
pub fn error(message: &str) -> Value {
    json!({"error": message})
}
