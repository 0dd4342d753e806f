//! Tests for the order service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use super::*;
use crate::domain::ports::{
    MockFoodItemRepository, MockOrderNotifier, MockOrderRepository, MockUserDirectory,
    OrderNotifierError, OrderRepositoryError,
};
use crate::domain::{CustomerRef, ErrorCode, FoodItem, FoodItemId, Price, User, UserId};

type TestService =
    OrderService<MockOrderRepository, MockFoodItemRepository, MockUserDirectory, MockOrderNotifier>;

fn item(id: i32, cents: i64) -> FoodItem {
    FoodItem {
        id: FoodItemId::new(id),
        name: format!("Dish {id}"),
        description: String::new(),
        price: Price::new(Decimal::new(cents, 2)).expect("valid price"),
        category: String::new(),
        picture_url: String::new(),
    }
}

fn noor() -> User {
    User {
        id: UserId::new(3),
        name: "Noor".to_owned(),
        email: Email::new("noor@example.com").expect("valid email"),
        phone: "555-0100".to_owned(),
        role: "customer".to_owned(),
    }
}

fn stored(order: &NewOrder, items: Vec<FoodItem>) -> Order {
    Order {
        id: OrderId::new(40),
        customer: order.customer.clone(),
        address: order.address.clone(),
        total: order.total,
        food_items: items,
        user_id: order.user_id,
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn directory() -> MockUserDirectory {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_find_by_email()
        .returning(|_| Ok(Some(noor())));
    directory.expect_find_by_id().returning(|_| Ok(Some(noor())));
    directory
}

fn catalog() -> MockFoodItemRepository {
    let mut catalog = MockFoodItemRepository::new();
    catalog
        .expect_find_by_ids()
        .returning(|_| Ok(vec![item(1, 1_000), item(2, 500)]));
    catalog
}

fn quiet_notifier() -> MockOrderNotifier {
    let mut notifier = MockOrderNotifier::new();
    notifier.expect_order_placed().returning(|_, _| Ok(()));
    notifier
}

fn make_service(
    orders: MockOrderRepository,
    catalog: MockFoodItemRepository,
    notifier: MockOrderNotifier,
) -> TestService {
    OrderService::new(
        Arc::new(orders),
        Arc::new(catalog),
        Arc::new(directory()),
        Arc::new(notifier),
    )
}

fn request(ids: &[i32]) -> PlaceOrderRequest {
    PlaceOrderRequest {
        customer: CustomerRef::Id(UserId::new(3)),
        address: "  12 Harbour Road ".to_owned(),
        item_ids: ids.iter().copied().map(FoodItemId::new).collect(),
    }
}

#[tokio::test]
async fn place_order_computes_total_from_catalog_prices() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_create_with_items()
        .withf(|order| {
            order.total.amount() == Decimal::new(2_000, 2)
                && order.item_ids.len() == 3
                && order.customer == "noor@example.com"
                && order.address == "12 Harbour Road"
                && order.user_id == UserId::new(3)
        })
        .times(1)
        .return_once(|order| {
            Ok(stored(
                order,
                vec![item(1, 1_000), item(2, 500), item(2, 500)],
            ))
        });

    let order = make_service(orders, catalog(), quiet_notifier())
        .place_order(request(&[1, 2, 2]))
        .await
        .expect("order placed");

    assert_eq!(order.total.to_string(), "20.00");
    assert_eq!(order.food_items.len(), 3);
}

#[tokio::test]
async fn unknown_item_fails_before_any_write() {
    let mut orders = MockOrderRepository::new();
    orders.expect_create_with_items().times(0);

    let err = make_service(orders, catalog(), quiet_notifier())
        .place_order(request(&[1, 77]))
        .await
        .expect_err("unknown item");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.details().expect("details")["missingIds"][0], 77);
}

#[tokio::test]
async fn blank_address_is_rejected() {
    let mut orders = MockOrderRepository::new();
    orders.expect_create_with_items().times(0);

    let mut blank = request(&[1]);
    blank.address = "   ".to_owned();
    let err = make_service(orders, catalog(), quiet_notifier())
        .place_order(blank)
        .await
        .expect_err("blank address");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["field"], "address");
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let mut orders = MockOrderRepository::new();
    orders.expect_create_with_items().times(0);

    let err = make_service(orders, MockFoodItemRepository::new(), quiet_notifier())
        .place_order(request(&[]))
        .await
        .expect_err("empty order");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn notifier_failure_does_not_undo_order() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_create_with_items()
        .times(1)
        .return_once(|order| Ok(stored(order, vec![item(1, 1_000)])));
    let mut notifier = MockOrderNotifier::new();
    notifier
        .expect_order_placed()
        .times(1)
        .return_once(|_, _| Err(OrderNotifierError::delivery("mailer offline")));

    let order = make_service(orders, catalog(), notifier)
        .place_order(request(&[1]))
        .await
        .expect("order still placed");
    assert_eq!(order.id, OrderId::new(40));
}

#[tokio::test]
async fn constraint_failure_during_insert_maps_to_not_found() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_create_with_items()
        .times(1)
        .return_once(|_| Err(OrderRepositoryError::constraint("food item removed")));

    let err = make_service(orders, catalog(), quiet_notifier())
        .place_order(request(&[1]))
        .await
        .expect_err("item vanished");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn customer_profile_lists_only_that_users_orders() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_list()
        .withf(|scope| *scope == OrderScope::ForUser(UserId::new(3)))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let profile = make_service(orders, catalog(), quiet_notifier())
        .customer_profile(&Email::new("noor@example.com").expect("email"))
        .await
        .expect("profile");
    assert_eq!(profile.user, noor());
    assert!(profile.orders.is_empty());
}

#[tokio::test]
async fn delete_missing_order_is_not_found() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_delete_with_items()
        .times(1)
        .return_once(|_| Ok(false));

    let err = make_service(orders, catalog(), quiet_notifier())
        .delete_order(OrderId::new(5))
        .await
        .expect_err("missing order");
    assert_eq!(err.message(), "order not found");
}
