//! The book ordering suite.

use crate::schemas::{BOOK, BOOK_LIST, ORDER, ORDER_CREATED, ORDER_LIST};
use api_contract::{ContextKey, HttpMethod, Step, Suite};
use serde_json::json;

/// Book fetched by the single-book check.
pub const BOOK_ID: u64 = 3;
/// Expected type of [`BOOK_ID`].
pub const BOOK_TYPE: &str = "fiction";
/// Book ordered by the suite.
pub const ORDER_BOOK_ID: u64 = 5;
/// Customer name on the created order.
pub const CUSTOMER_NAME: &str = "ali";
/// Customer name after the update.
pub const UPDATED_CUSTOMER_NAME: &str = "abuakar";

/// Step names, in execution order.
pub mod steps {
    /// `GET /books`
    pub const LIST_BOOKS: &str = "should return a list of books";
    /// `GET /books/3`
    pub const SINGLE_BOOK: &str = "should return a single book";
    /// `POST /orders/`
    pub const SUBMIT_ORDER: &str = "should submit an order";
    /// `GET /orders`
    pub const LIST_ORDERS: &str = "should get all orders";
    /// `GET /orders/{orderId}`
    pub const SINGLE_ORDER: &str = "should get a single order";
    /// `PATCH /orders/{orderId}`
    pub const UPDATE_ORDER: &str = "should update an order";
    /// `GET /orders/{orderId}` after the update
    pub const UPDATED_ORDER: &str = "should reflect the order update";
    /// `DELETE /orders/{orderId}`
    pub const DELETE_ORDER: &str = "should delete an order";
    /// `GET /orders/{orderId}` after the delete
    pub const DELETED_ORDER: &str = "deleted order should no longer resolve";
}

/// Build the suite, registering a client named `client_name`.
#[must_use]
pub fn bookstore_suite(client_name: &str) -> Suite {
    Suite::new("book ordering api")
        .with_registration(client_name)
        .step(
            Step::new(steps::LIST_BOOKS, HttpMethod::Get, "/books")
                .expect_status(200)
                .expect_schema(BOOK_LIST),
        )
        .step(
            Step::new(steps::SINGLE_BOOK, HttpMethod::Get, format!("/books/{BOOK_ID}"))
                .expect_status(200)
                .expect_field("/id", BOOK_ID)
                .expect_field("/type", BOOK_TYPE)
                .expect_schema(BOOK),
        )
        .step(
            Step::new(steps::SUBMIT_ORDER, HttpMethod::Post, "/orders/")
                .bearer()
                .with_body(json!({"bookId": ORDER_BOOK_ID, "customerName": CUSTOMER_NAME}))
                .expect_status(201)
                .expect_field("/created", true)
                .expect_non_empty("/orderId")
                .expect_schema(ORDER_CREATED)
                .extract("/orderId", ContextKey::OrderId),
        )
        .step(
            Step::new(steps::LIST_ORDERS, HttpMethod::Get, "/orders")
                .bearer()
                .expect_status(200)
                .expect_schema(ORDER_LIST),
        )
        .step(
            Step::new(steps::SINGLE_ORDER, HttpMethod::Get, "/orders/{orderId}")
                .bearer()
                .expect_status(200)
                .expect_field("/quantity", 1)
                .expect_field("/customerName", CUSTOMER_NAME)
                .expect_field("/bookId", ORDER_BOOK_ID)
                .expect_schema(ORDER),
        )
        .step(
            Step::new(steps::UPDATE_ORDER, HttpMethod::Patch, "/orders/{orderId}")
                .bearer()
                .with_body(json!({"customerName": UPDATED_CUSTOMER_NAME}))
                .expect_status(204)
                .expect_empty_body(),
        )
        .step(
            Step::new(steps::UPDATED_ORDER, HttpMethod::Get, "/orders/{orderId}")
                .bearer()
                .expect_status(200)
                .expect_field("/customerName", UPDATED_CUSTOMER_NAME)
                .expect_schema(ORDER),
        )
        .step(
            Step::new(steps::DELETE_ORDER, HttpMethod::Delete, "/orders/{orderId}")
                .bearer()
                .expect_status(204)
                .expect_empty_body(),
        )
        .step(
            Step::new(steps::DELETED_ORDER, HttpMethod::Get, "/orders/{orderId}")
                .bearer()
                .expect_failure(),
        )
}
