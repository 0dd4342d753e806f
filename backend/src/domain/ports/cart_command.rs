//! Driving port for replacing carts.

use async_trait::async_trait;

use crate::domain::{CustomerRef, Error, FoodItem, FoodItemId};

/// Write-side cart use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCommand: Send + Sync {
    /// Replace the whole cart with `items`.
    ///
    /// Duplicate ids collapse; unknown ids reject the request and leave the
    /// stored cart untouched.
    async fn replace_cart(
        &self,
        customer: &CustomerRef,
        items: Vec<FoodItemId>,
    ) -> Result<Vec<FoodItem>, Error>;
}
