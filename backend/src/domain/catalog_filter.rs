//! Catalog listing filters.
//!
//! Raw query-string values are parsed here so every adapter applies the same
//! rules: blank values count as absent, unparseable or negative numbers are
//! rejected with the offending field named in the error details.

use std::str::FromStr;

use pagination::{PageRequest, PageRequestError};
use rust_decimal::Decimal;
use serde_json::json;

use super::{Error, FoodItem, FoodItemValidationError, Price};

/// Raw filter values as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCatalogFilter {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated catalog filter.
///
/// Every populated criterion must match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// One page of catalog entries plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub items: Vec<FoodItem>,
    pub total: u64,
}

fn invalid_field(field: &str, value: &str, reason: &str) -> Error {
    Error::invalid_request(format!("{field} {reason}")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_number",
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
}

fn parse_price(field: &str, raw: Option<String>) -> Result<Option<Price>, Error> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let amount = Decimal::from_str(&raw)
        .map_err(|_| invalid_field(field, &raw, "must be a decimal number"))?;
    Price::new(amount).map(Some).map_err(|error| match error {
        FoodItemValidationError::PriceTooLarge { max, .. } => {
            invalid_field(field, &raw, &format!("must be at most {max}"))
        }
        _ => invalid_field(field, &raw, "must not be negative"),
    })
}

fn map_page_error(error: PageRequestError) -> Error {
    match error {
        PageRequestError::InvalidPage { value } => {
            invalid_field("page", &value, "must be a non-negative integer")
        }
        PageRequestError::InvalidLimit { value } => {
            invalid_field("limit", &value, "must be a non-negative integer")
        }
    }
}

impl TryFrom<RawCatalogFilter> for CatalogFilter {
    type Error = Error;

    fn try_from(raw: RawCatalogFilter) -> Result<Self, Self::Error> {
        let min_price = parse_price("minPrice", raw.min_price)?;
        let max_price = parse_price("maxPrice", raw.max_price)?;
        let page = PageRequest::parse(raw.page.as_deref(), raw.limit.as_deref())
            .map_err(map_page_error)?;
        Ok(Self {
            category: non_blank(raw.category),
            min_price,
            max_price,
            search: non_blank(raw.search),
            page,
        })
    }
}

impl CatalogFilter {
    /// `true` when the price bounds cannot match anything.
    pub fn is_empty_range(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }

    /// In-process evaluation of the filter, used by the memory store.
    pub fn matches(&self, item: &FoodItem) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| item.category != *category)
        {
            return false;
        }
        if self.min_price.is_some_and(|min| item.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price > max) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let needle = term.to_lowercase();
                item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// `ILIKE` pattern for the search term with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for ch in term.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }
}
