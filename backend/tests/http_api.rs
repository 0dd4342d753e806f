//! End-to-end HTTP tests: the full API scope behind the trace middleware,
//! served from the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use food_backend::Trace;
use food_backend::domain::{Email, TRACE_ID_HEADER};
use food_backend::inbound::http::configure_api;
use rstest::rstest;
use serde_json::{Value, json};

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn menu_item_flows_from_creation_to_order() {
    let (store, state) = support::http_state();
    store
        .seed_user(
            "Ada Lovelace",
            Email::new("ada@example.com").expect("valid email"),
            "555-0100",
            "customer",
        )
        .await
        .expect("seeded user");
    let app = init_app!(state);

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/menu")
            .set_json(json!({"name": "Curry", "price": 10, "category": "mains"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let curry: Value = actix_test::read_body_json(created).await;

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/menu?category=mains&maxPrice=10")
            .to_request(),
    )
    .await;
    assert_eq!(listed["total"], json!(1));
    assert_eq!(listed["data"][0], curry);

    let placed = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/orders")
            .set_json(json!({
                "customer": "ada@example.com",
                "address": "1 Dock Street",
                "total": 1,
                "food_items": [curry["id"], curry["id"]],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(placed.status(), StatusCode::CREATED);
    let order: Value = actix_test::read_body_json(placed).await;
    assert_eq!(order["total"], json!(20.0));

    let profile: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/by-email?email=ada@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(profile["orders"][0]["id"], order["id"]);
}

#[rstest]
#[actix_web::test]
async fn error_payload_carries_the_response_trace_id() {
    let (_store, state) = support::http_state();
    let app = init_app!(state);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/menu/41")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("food item not found"));
    assert_eq!(body["traceId"], json!(header));
}

#[rstest]
#[actix_web::test]
async fn deleting_referenced_item_succeeds_over_http() {
    let (store, state) = support::http_state();
    store
        .seed_user(
            "Ada Lovelace",
            Email::new("ada@example.com").expect("valid email"),
            "",
            "customer",
        )
        .await
        .expect("seeded user");
    let app = init_app!(state);

    for body in [
        json!({"name": "Soup", "price": 4.5}),
        json!({"name": "Bread", "price": 2}),
    ] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/menu")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    let cart = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/user/cart")
            .set_json(json!({"email": "ada@example.com", "cart": [{"id": 1}, {"id": 2}]}))
            .to_request(),
    )
    .await;
    assert_eq!(cart.status(), StatusCode::OK);
    let order = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/order")
            .set_json(json!({
                "customer": "ada@example.com",
                "address": "1 Dock Street",
                "food_items": [{"id": 1}, {"id": 2}],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(order.status(), StatusCode::CREATED);

    let deleted: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/menu/1")
            .to_request(),
    )
    .await;
    assert_eq!(deleted["cleared_order_lines"], json!(1));
    assert_eq!(deleted["cleared_cart_entries"], json!(1));

    let cart_after: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/user/cart?email=ada@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(cart_after.as_array().map(Vec::len), Some(1));
    assert_eq!(cart_after[0]["name"], json!("Bread"));

    let orders: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/orders?userId=1")
            .to_request(),
    )
    .await;
    assert_eq!(orders[0]["food_items"][0]["name"], json!("Bread"));
    assert_eq!(orders[0]["total"], json!(6.5));
}

#[rstest]
#[actix_web::test]
async fn registered_user_can_fill_a_cart_without_seeding() {
    let (_store, state) = support::http_state();
    let app = init_app!(state);

    let registered = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "Lin", "email": "Lin@Example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "Lin again", "email": "lin@example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let item = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/menu")
            .set_json(json!({"name": "Dumplings", "price": 6}))
            .to_request(),
    )
    .await;
    assert_eq!(item.status(), StatusCode::CREATED);

    let cart: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/user/cart")
            .set_json(json!({"email": "LIN@example.com", "cart": [{"id": 1}]}))
            .to_request(),
    )
    .await;
    assert_eq!(cart[0]["name"], json!("Dumplings"));

    let users: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
    assert_eq!(users[0]["email"], json!("lin@example.com"));
}

#[rstest]
#[actix_web::test]
async fn support_messages_are_stored_and_listed() {
    let (_store, state) = support::http_state();
    let app = init_app!(state);

    let sent = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/support")
            .set_json(json!({
                "email": "visitor@example.com",
                "message": "Do you deliver on Sundays?",
                "attachments": ["map.png"],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(sent.status(), StatusCode::CREATED);

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/support/messages")
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["message"], json!("Do you deliver on Sundays?"));
    assert_eq!(listed[0]["attachments"], json!(["map.png"]));
}

#[rstest]
#[case(json!(99_999_999.99), StatusCode::CREATED)]
#[case(json!(100_000_000), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn menu_price_is_bounded_by_the_column_range(
    #[case] price: Value,
    #[case] expected: StatusCode,
) {
    let (_store, state) = support::http_state();
    let app = init_app!(state);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/menu")
            .set_json(json!({"name": "Truffle platter", "price": price}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
    if expected == StatusCode::BAD_REQUEST {
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(body["details"]["field"], json!("price"));
    }
}
