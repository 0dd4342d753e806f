//! Server-side price resolution.
//!
//! [`PriceResolver`] is the only place an order total is computed. It fetches
//! the authoritative catalog rows for the requested ids and sums their current
//! prices, one line per requested id.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::json;

use crate::domain::port_error_mapping::{FOOD_ITEM_NOT_FOUND, map_food_item_error};
use crate::domain::ports::FoodItemRepository;
use crate::domain::{Error, FoodItem, FoodItemId, MAX_ORDER_TOTAL, Price};

/// Resolved order lines and their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedSelection {
    /// One entry per requested id, in request order.
    pub items: Vec<FoodItem>,
    pub total: Price,
}

/// Distinct ids in first-seen order.
pub fn distinct_ids(ids: &[FoodItemId]) -> Vec<FoodItemId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn missing_items_error(missing: &[FoodItemId]) -> Error {
    let ids: Vec<i32> = missing.iter().map(|id| id.get()).collect();
    Error::not_found(FOOD_ITEM_NOT_FOUND).with_details(json!({ "missingIds": ids }))
}

fn total_out_of_range() -> Error {
    Error::invalid_request(format!("order total must be at most {MAX_ORDER_TOTAL}")).with_details(
        json!({
            "field": "food_items",
            "code": "total_out_of_range",
        }),
    )
}

/// Price `requested` against already fetched catalog rows.
///
/// Fails with `not_found` listing every id absent from `catalog`, and with
/// `invalid_request` when nothing was requested or the total would exceed
/// [`MAX_ORDER_TOTAL`].
///
/// # Examples
/// ```
/// use food_backend::domain::{price_selection, FoodItem, FoodItemId, Price};
/// use rust_decimal::Decimal;
///
/// let item = |id, cents| FoodItem {
///     id: FoodItemId::new(id),
///     name: format!("item {id}"),
///     description: String::new(),
///     price: Price::new(Decimal::new(cents, 2)).expect("price"),
///     category: String::new(),
///     picture_url: String::new(),
/// };
/// let catalog = [item(1, 1_000), item(2, 500)];
/// let ids = [FoodItemId::new(1), FoodItemId::new(2), FoodItemId::new(2)];
///
/// let selection = price_selection(&ids, &catalog).expect("all ids known");
/// assert_eq!(selection.total.amount(), Decimal::new(2_000, 2));
/// assert_eq!(selection.items.len(), 3);
/// ```
pub fn price_selection(
    requested: &[FoodItemId],
    catalog: &[FoodItem],
) -> Result<PricedSelection, Error> {
    if requested.is_empty() {
        return Err(
            Error::invalid_request("at least one food item is required").with_details(json!({
                "field": "food_items",
                "code": "empty_selection",
            })),
        );
    }

    let by_id: HashMap<FoodItemId, &FoodItem> =
        catalog.iter().map(|item| (item.id, item)).collect();
    let missing: Vec<FoodItemId> = distinct_ids(requested)
        .into_iter()
        .filter(|id| !by_id.contains_key(id))
        .collect();
    if !missing.is_empty() {
        return Err(missing_items_error(&missing));
    }

    let mut items = Vec::with_capacity(requested.len());
    let mut total = Price::ZERO;
    for id in requested {
        let Some(item) = by_id.get(id) else {
            return Err(missing_items_error(&[*id]));
        };
        total = total
            .checked_add(item.price)
            .filter(|sum| sum.amount() <= MAX_ORDER_TOTAL)
            .ok_or_else(total_out_of_range)?;
        items.push((*item).clone());
    }
    Ok(PricedSelection { items, total })
}

/// Resolves item ids against the catalog repository.
#[derive(Clone)]
pub struct PriceResolver<R> {
    catalog: Arc<R>,
}

impl<R> PriceResolver<R> {
    /// Create a resolver over the given catalog repository.
    pub fn new(catalog: Arc<R>) -> Self {
        Self { catalog }
    }
}

impl<R> PriceResolver<R>
where
    R: FoodItemRepository,
{
    async fn fetch(&self, ids: &[FoodItemId]) -> Result<Vec<FoodItem>, Error> {
        let distinct = distinct_ids(ids);
        self.catalog
            .find_by_ids(&distinct)
            .await
            .map_err(map_food_item_error)
    }

    /// Resolve and price a selection in one catalog round trip.
    pub async fn resolve(&self, ids: &[FoodItemId]) -> Result<PricedSelection, Error> {
        if ids.is_empty() {
            return price_selection(ids, &[]);
        }
        let catalog = self.fetch(ids).await?;
        price_selection(ids, &catalog)
    }

    /// Check every id exists without pricing. An empty list passes.
    pub async fn verify(&self, ids: &[FoodItemId]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        let catalog = self.fetch(ids).await?;
        let known: HashSet<FoodItemId> = catalog.iter().map(|item| item.id).collect();
        let missing: Vec<FoodItemId> = distinct_ids(ids)
            .into_iter()
            .filter(|id| !known.contains(id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing_items_error(&missing))
        }
    }
}
