//! Named response schemas for the book ordering API.
//!
//! Book schemas are closed (`additionalProperties: false`): the book shape is
//! a fixed contract. Order schemas stay open and only pin the required fields,
//! since order responses are allowed to grow.

use api_contract::{ContractResult, SchemaRegistry};
use serde_json::{Value, json};

/// Single book, all seven fields.
pub const BOOK: &str = "book";
/// Book listing entries.
pub const BOOK_LIST: &str = "book-list";
/// Single order.
pub const ORDER: &str = "order";
/// Order listing.
pub const ORDER_LIST: &str = "order-list";
/// Order creation acknowledgement.
pub const ORDER_CREATED: &str = "order-created";

/// Schema of `GET /books/{id}`.
#[must_use]
pub fn book_schema() -> Value {
    json!({
        "title": "Book",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"},
            "author": {"type": "string"},
            "type": {"type": "string"},
            "price": {"type": "number"},
            "current-stock": {"type": "integer"},
            "available": {"type": "boolean"}
        },
        "required": ["author", "available", "current-stock", "id", "name", "price", "type"]
    })
}

/// Schema of `GET /books`.
///
/// The listing returns a summary of each book, so entries carry only
/// `id`, `name`, `type` and `available`.
#[must_use]
pub fn book_list_schema() -> Value {
    json!({
        "title": "BookList",
        "type": "array",
        "items": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"},
                "type": {"type": "string"},
                "available": {"type": "boolean"}
            },
            "required": ["available", "id", "name", "type"]
        }
    })
}

/// Schema of `GET /orders/{id}`.
#[must_use]
pub fn order_schema() -> Value {
    json!({
        "title": "Order",
        "type": "object",
        "properties": {
            "id": {"type": "string"},
            "bookId": {"type": "number"},
            "customerName": {"type": "string"},
            "createdBy": {"type": "string"},
            "quantity": {"type": "number"},
            "timestamp": {"type": "number"}
        },
        "required": ["id", "bookId", "customerName", "createdBy", "quantity", "timestamp"]
    })
}

/// Schema of `GET /orders`.
#[must_use]
pub fn order_list_schema() -> Value {
    json!({
        "title": "OrderList",
        "type": "array",
        "items": order_schema()
    })
}

/// Schema of `POST /orders/`.
#[must_use]
pub fn order_created_schema() -> Value {
    json!({
        "title": "OrderCreated",
        "type": "object",
        "properties": {
            "created": {"type": "boolean"},
            "orderId": {"type": "string", "minLength": 1}
        },
        "required": ["created", "orderId"]
    })
}

/// Registry holding every bookstore schema.
///
/// # Errors
///
/// Returns an error if a schema fails to compile.
pub fn registry() -> ContractResult<SchemaRegistry> {
    SchemaRegistry::new()
        .with_schema(BOOK, &book_schema())?
        .with_schema(BOOK_LIST, &book_list_schema())?
        .with_schema(ORDER, &order_schema())?
        .with_schema(ORDER_LIST, &order_list_schema())?
        .with_schema(ORDER_CREATED, &order_created_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_contract::SchemaValidator;
    use proptest::prelude::*;
    use test_utils::{
        book_id_strategy, book_type_strategy, customer_name_strategy, fixtures, order_id_strategy,
    };

    #[test]
    fn test_registry_compiles() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec![BOOK, BOOK_LIST, ORDER, ORDER_CREATED, ORDER_LIST]
        );
    }

    #[test]
    fn test_book_schema_is_strict() {
        let registry = registry().unwrap();
        let mut book = fixtures::book(3, "fiction");
        assert!(registry.validate(BOOK, &book).is_ok());

        book["isbn"] = json!("978-0000000000");
        assert!(registry.validate(BOOK, &book).is_err());
    }

    #[test]
    fn test_book_schema_requires_every_field() {
        let registry = registry().unwrap();
        let mut book = fixtures::book(3, "fiction");
        book.as_object_mut().unwrap().remove("current-stock");
        assert!(registry.validate(BOOK, &book).is_err());
    }

    #[test]
    fn test_book_list_entries_are_strict() {
        let registry = registry().unwrap();
        assert!(registry.validate(BOOK_LIST, &fixtures::book_list()).is_ok());

        let listing = json!([{"id": 1, "name": "The Russian", "type": "fiction", "available": true, "price": 1}]);
        assert!(registry.validate(BOOK_LIST, &listing).is_err());
        assert!(registry.validate(BOOK_LIST, &json!({"id": 1})).is_err());
    }

    #[test]
    fn test_order_schema_is_open() {
        let registry = registry().unwrap();
        let mut order = fixtures::order("ord-1", 5, "ali");
        assert!(registry.validate(ORDER, &order).is_ok());

        order["giftWrap"] = json!(true);
        assert!(registry.validate(ORDER, &order).is_ok());

        order.as_object_mut().unwrap().remove("createdBy");
        assert!(registry.validate(ORDER, &order).is_err());
    }

    #[test]
    fn test_order_created_needs_non_empty_id() {
        let registry = registry().unwrap();
        assert!(registry.validate(ORDER_CREATED, &fixtures::order_created("ord-1")).is_ok());
        assert!(registry.validate(ORDER_CREATED, &fixtures::order_created("")).is_err());
    }

    proptest! {
        #[test]
        fn prop_served_books_conform(id in book_id_strategy(), kind in book_type_strategy()) {
            let registry = registry().unwrap();
            prop_assert!(registry.validate(BOOK, &fixtures::book(id, &kind)).is_ok());
        }

        #[test]
        fn prop_orders_conform(
            id in order_id_strategy(),
            book_id in book_id_strategy(),
            customer in customer_name_strategy(),
        ) {
            let registry = registry().unwrap();
            let order = fixtures::order(&id, book_id, &customer);
            prop_assert!(registry.validate(ORDER, &order).is_ok());
            prop_assert!(registry.validate(ORDER_LIST, &json!([order])).is_ok());
        }
    }
}
