//! Catalog entries offered for ordering.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits stored for prices.
pub const PRICE_SCALE: u32 = 2;

/// Largest catalog price, `99999999.99`, the range of `NUMERIC(10, 2)`.
pub const MAX_ITEM_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, PRICE_SCALE);

/// Largest order total, `9999999999.99`, the range of `NUMERIC(12, 2)`.
pub const MAX_ORDER_TOTAL: Decimal =
    Decimal::from_parts(3_567_587_327, 232, 0, false, PRICE_SCALE);

/// Validation errors raised while building catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FoodItemValidationError {
    /// The name was empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The price was below zero.
    #[error("price must not be negative, got {price}")]
    NegativePrice {
        /// Offending price as supplied.
        price: Decimal,
    },
    /// The price exceeded [`MAX_ITEM_PRICE`] once rounded.
    #[error("price must be at most {max}, got {price}")]
    PriceTooLarge {
        /// Offending price as supplied.
        price: Decimal,
        /// Largest accepted price.
        max: Decimal,
    },
}

/// Server-assigned catalog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FoodItemId(i32);

impl FoodItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for FoodItemId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FoodItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-negative amount with two fractional digits.
///
/// # Examples
/// ```
/// use food_backend::domain::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(10_005, 3)).expect("valid price");
/// assert_eq!(price.amount(), Decimal::new(1_001, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validate and round an amount to [`PRICE_SCALE`] digits.
    ///
    /// # Errors
    ///
    /// Rejects negative amounts and amounts above [`MAX_ITEM_PRICE`].
    pub fn new(amount: Decimal) -> Result<Self, FoodItemValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FoodItemValidationError::NegativePrice { price: amount });
        }
        let rounded =
            amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded > MAX_ITEM_PRICE {
            return Err(FoodItemValidationError::PriceTooLarge {
                price: amount,
                max: MAX_ITEM_PRICE,
            });
        }
        Ok(Self(rounded))
    }

    /// Wrap an amount already stored at the right scale.
    pub(crate) fn from_stored(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Add two prices, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodItem {
    pub id: FoodItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub picture_url: String,
}

/// Unvalidated input for a new catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FoodItemDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub picture_url: String,
}

/// Validated catalog entry awaiting an identifier.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `price` is non-negative, rounded to two decimals and at most
///   [`MAX_ITEM_PRICE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFoodItem {
    name: String,
    description: String,
    price: Price,
    category: String,
    picture_url: String,
}

impl NewFoodItem {
    /// Name shown in the menu.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Validated price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Category tag.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image reference.
    pub fn picture_url(&self) -> &str {
        &self.picture_url
    }

    /// Attach a server-assigned identifier.
    pub fn into_food_item(self, id: FoodItemId) -> FoodItem {
        FoodItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            picture_url: self.picture_url,
        }
    }
}

impl TryFrom<FoodItemDraft> for NewFoodItem {
    type Error = FoodItemValidationError;

    fn try_from(draft: FoodItemDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            return Err(FoodItemValidationError::EmptyName);
        }
        Ok(Self {
            name,
            description: draft.description,
            price: Price::new(draft.price)?,
            category: draft.category.trim().to_owned(),
            picture_url: draft.picture_url,
        })
    }
}
