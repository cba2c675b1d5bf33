//! Wiremock-backed stand-in for the book ordering API.
//!
//! Serves one registration, the book catalogue and a single order that walks
//! through create, read, update and delete. Order endpoints require the
//! issued bearer token and answer 401 otherwise.

use crate::fixtures;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Customer name the mock expects on order creation.
pub const CUSTOMER_NAME: &str = "ali";
/// Customer name the mock expects on order update.
pub const UPDATED_CUSTOMER_NAME: &str = "abuakar";
/// Book the mock expects to be ordered.
pub const ORDER_BOOK_ID: u64 = 5;

/// Behaviour knobs for [`MockBookstore`].
#[derive(Debug, Clone)]
pub struct MockBookstoreConfig {
    /// Token issued on registration
    pub token: String,
    /// Id assigned to the created order
    pub order_id: String,
    /// Status returned by `POST /api-clients/`
    pub registration_status: u16,
    /// Body returned by `POST /api-clients/`, defaults to `{"accessToken": token}`
    pub registration_body: Option<Value>,
    /// Status returned by `POST /orders/`
    pub order_create_status: u16,
    /// Extra property added to the single book record
    pub book_extra_field: Option<(String, Value)>,
    /// Extra property added to order records
    pub order_extra_field: Option<(String, Value)>,
    /// Accept the update but keep serving the original customer name
    pub stale_update: bool,
    /// Accept the delete but keep serving the order
    pub undeletable_order: bool,
}

impl Default for MockBookstoreConfig {
    fn default() -> Self {
        Self {
            token: "f1e2d3c4b5a697887766554433221100ffeeddccbbaa99887766554433221100".to_string(),
            order_id: "PF6MflPDcuhWobZcgmJy5".to_string(),
            registration_status: 201,
            registration_body: None,
            order_create_status: 201,
            book_extra_field: None,
            order_extra_field: None,
            stale_update: false,
            undeletable_order: false,
        }
    }
}

impl MockBookstoreConfig {
    /// Reject registration with `status`.
    #[must_use]
    pub fn with_registration_failure(mut self, status: u16) -> Self {
        self.registration_status = status;
        self.registration_body = Some(fixtures::error("API client already registered."));
        self
    }

    /// Reject order creation with `status`.
    #[must_use]
    pub const fn with_order_create_status(mut self, status: u16) -> Self {
        self.order_create_status = status;
        self
    }

    /// Add an undeclared property to the single book record.
    #[must_use]
    pub fn with_book_extra_field(mut self, name: &str, value: Value) -> Self {
        self.book_extra_field = Some((name.to_string(), value));
        self
    }

    /// Answer the update with 204 without applying it.
    #[must_use]
    pub const fn with_stale_update(mut self) -> Self {
        self.stale_update = true;
        self
    }

    /// Answer the delete with 204 without removing the order.
    #[must_use]
    pub const fn with_undeletable_order(mut self) -> Self {
        self.undeletable_order = true;
        self
    }

    /// Add an undeclared property to order records.
    #[must_use]
    pub fn with_order_extra_field(mut self, name: &str, value: Value) -> Self {
        self.order_extra_field = Some((name.to_string(), value));
        self
    }
}

/// A running mock of the book ordering API.
#[derive(Debug)]
pub struct MockBookstore {
    server: MockServer,
    config: MockBookstoreConfig,
}

impl MockBookstore {
    /// Start a mock with default behaviour.
    pub async fn start() -> Self {
        Self::start_with(MockBookstoreConfig::default()).await
    }

    /// Start a mock with `config`.
    pub async fn start_with(config: MockBookstoreConfig) -> Self {
        let server = MockServer::start().await;
        let mock = Self { server, config };
        mock.mount().await;
        mock
    }

    /// Base URI of the mock.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Underlying server, for request inspection.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Configuration the mock was started with.
    #[must_use]
    pub const fn config(&self) -> &MockBookstoreConfig {
        &self.config
    }

    fn order(&self, customer_name: &str) -> Value {
        let mut order = fixtures::order(&self.config.order_id, ORDER_BOOK_ID, customer_name);
        if let Some((name, value)) = &self.config.order_extra_field {
            order[name.as_str()] = value.clone();
        }
        order
    }

    async fn mount(&self) {
        let cfg = &self.config;
        let bearer = format!("Bearer {}", cfg.token);
        let order_path = format!("/orders/{}", cfg.order_id);

        let registration = cfg
            .registration_body
            .clone()
            .unwrap_or_else(|| fixtures::registration(&cfg.token));
        Mock::given(method("POST"))
            .and(path("/api-clients/"))
            .respond_with(ResponseTemplate::new(cfg.registration_status).set_body_json(registration))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::book_list()))
            .mount(&self.server)
            .await;

        let mut book = fixtures::book(3, "fiction");
        if let Some((name, value)) = &cfg.book_extra_field {
            book[name.as_str()] = value.clone();
        }
        Mock::given(method("GET"))
            .and(path("/books/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(book))
            .mount(&self.server)
            .await;

        let created = if cfg.order_create_status / 100 == 2 {
            fixtures::order_created(&cfg.order_id)
        } else {
            fixtures::error("Invalid or missing bookId.")
        };
        Mock::given(method("POST"))
            .and(path("/orders/"))
            .and(header("authorization", bearer.as_str()))
            .and(body_json(json!({
                "bookId": ORDER_BOOK_ID,
                "customerName": CUSTOMER_NAME,
            })))
            .respond_with(ResponseTemplate::new(cfg.order_create_status).set_body_json(created))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/orders"))
            .and(header("authorization", bearer.as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([self.order(CUSTOMER_NAME)])),
            )
            .mount(&self.server)
            .await;

        // Reads of the order see, in turn: the original, the update, nothing.
        let updated_name = if cfg.stale_update {
            CUSTOMER_NAME
        } else {
            UPDATED_CUSTOMER_NAME
        };
        let after_delete = if cfg.undeletable_order {
            ResponseTemplate::new(200).set_body_json(self.order(updated_name))
        } else {
            ResponseTemplate::new(404)
                .set_body_json(fixtures::error(&format!("No order with id {}.", cfg.order_id)))
        };
        Mock::given(method("GET"))
            .and(path(order_path.as_str()))
            .and(header("authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.order(CUSTOMER_NAME)))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(order_path.as_str()))
            .and(header("authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.order(updated_name)))
            .up_to_n_times(1)
            .with_priority(2)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(order_path.as_str()))
            .and(header("authorization", bearer.as_str()))
            .respond_with(after_delete)
            .with_priority(3)
            .mount(&self.server)
            .await;

        Mock::given(method("PATCH"))
            .and(path(order_path.as_str()))
            .and(header("authorization", bearer.as_str()))
            .and(body_json(json!({"customerName": UPDATED_CUSTOMER_NAME})))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(order_path.as_str()))
            .and(header("authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;

        Mock::given(path_regex("^/orders"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(fixtures::error("Missing Authorization header.")),
            )
            .with_priority(10)
            .mount(&self.server)
            .await;
    }
}
