//! Shared mapping from driven-port failures to domain errors.
//!
//! Connection failures and timeouts are retryable and surface as
//! `service_unavailable` with a fixed message; the cause is only logged.
//! Query failures are internal. A constraint failure on an order or cart
//! write means a referenced food item vanished after validation and maps to
//! `not_found`; on a registration it means the e-mail is taken and maps to
//! `conflict`.

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    CartRepositoryError, FoodItemRepositoryError, OrderRepositoryError, SupportRepositoryError,
    UserDirectoryError,
};

pub(crate) const FOOD_ITEM_NOT_FOUND: &str = "food item not found";
pub(crate) const USER_NOT_FOUND: &str = "user not found";
pub(crate) const ORDER_NOT_FOUND: &str = "order not found";
pub(crate) const USER_EXISTS: &str = "user already exists";
pub(crate) const CATALOG_UNAVAILABLE: &str = "catalog unavailable, retry later";
pub(crate) const ORDER_STORE_UNAVAILABLE: &str = "order store unavailable, retry later";
pub(crate) const CART_STORE_UNAVAILABLE: &str = "cart store unavailable, retry later";
pub(crate) const DIRECTORY_UNAVAILABLE: &str = "user directory unavailable, retry later";
pub(crate) const SUPPORT_STORE_UNAVAILABLE: &str = "support inbox unavailable, retry later";

fn unavailable(store: &'static str, cause: &str, public: &'static str) -> Error {
    warn!(store, cause, "store unavailable");
    Error::service_unavailable(public)
}

pub(crate) fn map_food_item_error(error: FoodItemRepositoryError) -> Error {
    match error {
        FoodItemRepositoryError::Connection { message } => {
            unavailable("catalog", &message, CATALOG_UNAVAILABLE)
        }
        FoodItemRepositoryError::Query { message }
        | FoodItemRepositoryError::Constraint { message } => {
            Error::internal(format!("catalog error: {message}"))
        }
    }
}

pub(crate) fn map_order_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            unavailable("orders", &message, ORDER_STORE_UNAVAILABLE)
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order store error: {message}"))
        }
        OrderRepositoryError::Constraint { .. } => Error::not_found(FOOD_ITEM_NOT_FOUND),
    }
}

pub(crate) fn map_cart_error(error: CartRepositoryError) -> Error {
    match error {
        CartRepositoryError::Connection { message } => {
            unavailable("carts", &message, CART_STORE_UNAVAILABLE)
        }
        CartRepositoryError::Query { message } => {
            Error::internal(format!("cart store error: {message}"))
        }
        CartRepositoryError::Constraint { .. } => Error::not_found(FOOD_ITEM_NOT_FOUND),
    }
}

pub(crate) fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            unavailable("user_directory", &message, DIRECTORY_UNAVAILABLE)
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::Constraint { message } => {
            warn!(cause = %message, "user registration rejected");
            Error::conflict(USER_EXISTS)
        }
    }
}

pub(crate) fn map_support_error(error: SupportRepositoryError) -> Error {
    match error {
        SupportRepositoryError::Connection { message } => {
            unavailable("support", &message, SUPPORT_STORE_UNAVAILABLE)
        }
        SupportRepositoryError::Query { message } => {
            Error::internal(format!("support inbox error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(map_food_item_error(FoodItemRepositoryError::connection("timeout")), ErrorCode::ServiceUnavailable)]
    #[case(map_food_item_error(FoodItemRepositoryError::query("syntax")), ErrorCode::InternalError)]
    #[case(map_order_error(OrderRepositoryError::connection("reset")), ErrorCode::ServiceUnavailable)]
    #[case(map_order_error(OrderRepositoryError::constraint("fk")), ErrorCode::NotFound)]
    #[case(map_cart_error(CartRepositoryError::query("bad")), ErrorCode::InternalError)]
    #[case(map_cart_error(CartRepositoryError::constraint("fk")), ErrorCode::NotFound)]
    #[case(map_directory_error(UserDirectoryError::connection("down")), ErrorCode::ServiceUnavailable)]
    #[case(map_directory_error(UserDirectoryError::constraint("users_email_key")), ErrorCode::Conflict)]
    #[case(map_support_error(SupportRepositoryError::query("bad")), ErrorCode::InternalError)]
    fn port_errors_map_to_codes(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn constraint_on_order_write_hides_database_detail() {
        let error = map_order_error(OrderRepositoryError::constraint(
            "violates foreign key constraint order_food_items_food_item_id_fkey",
        ));
        assert_eq!(error.message(), FOOD_ITEM_NOT_FOUND);
    }

    #[rstest]
    fn duplicate_registration_hides_the_index_name() {
        let error = map_directory_error(UserDirectoryError::constraint(
            "duplicate key value violates unique constraint \"users_email_lower_key\"",
        ));
        assert_eq!(error.message(), USER_EXISTS);
    }

    const POOL_CAUSE: &str = "failed to get connection from pool: password authentication \
        failed for user \"food\" at 10.0.0.5";

    #[rstest]
    #[case(map_food_item_error(FoodItemRepositoryError::connection(POOL_CAUSE)), CATALOG_UNAVAILABLE)]
    #[case(map_order_error(OrderRepositoryError::connection(POOL_CAUSE)), ORDER_STORE_UNAVAILABLE)]
    #[case(map_cart_error(CartRepositoryError::connection(POOL_CAUSE)), CART_STORE_UNAVAILABLE)]
    #[case(map_directory_error(UserDirectoryError::connection(POOL_CAUSE)), DIRECTORY_UNAVAILABLE)]
    #[case(map_support_error(SupportRepositoryError::connection(POOL_CAUSE)), SUPPORT_STORE_UNAVAILABLE)]
    fn connection_failures_keep_the_cause_out_of_the_payload(
        #[case] error: Error,
        #[case] expected: &str,
    ) {
        assert_eq!(error.message(), expected);
        let payload = serde_json::to_string(&error).expect("serialise error");
        assert!(!payload.contains("password"));
        assert!(!payload.contains("10.0.0.5"));
    }
}
