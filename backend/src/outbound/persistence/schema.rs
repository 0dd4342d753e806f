//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations in `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Customers and staff known to the directory.
    users (id) {
        id -> Int4,
        name -> Varchar,
        /// Unique ignoring case through `users_email_lower_key`.
        email -> Varchar,
        phone -> Varchar,
        role -> Varchar,
    }
}

diesel::table! {
    /// Purchasable catalog entries.
    food_items (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        /// `NUMERIC(10, 2)`, never negative.
        price -> Numeric,
        category -> Varchar,
        picture_url -> Text,
    }
}

diesel::table! {
    /// Placed orders. `total` is computed server side at placement.
    orders (id) {
        id -> Int4,
        user_id -> Int4,
        customer -> Varchar,
        address -> Text,
        total -> Numeric,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order lines. `position` keeps request order so an item may repeat.
    order_food_items (order_id, position) {
        order_id -> Int4,
        position -> Int4,
        food_item_id -> Int4,
    }
}

diesel::table! {
    /// Cart contents, one row per distinct item.
    user_cart_items (user_id, food_item_id) {
        user_id -> Int4,
        food_item_id -> Int4,
    }
}

diesel::table! {
    /// Customer enquiries; attachments are stored by name.
    support_messages (id) {
        id -> Int4,
        email -> Varchar,
        message -> Text,
        attachments -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_food_items -> orders (order_id));
diesel::joinable!(order_food_items -> food_items (food_item_id));
diesel::joinable!(user_cart_items -> users (user_id));
diesel::joinable!(user_cart_items -> food_items (food_item_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    food_items,
    orders,
    order_food_items,
    user_cart_items,
    support_messages,
);
