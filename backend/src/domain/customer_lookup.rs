//! Resolution of customer references through the user directory.

use tracing::debug;

use crate::domain::port_error_mapping::{USER_NOT_FOUND, map_directory_error};
use crate::domain::ports::UserDirectory;
use crate::domain::{CustomerRef, Error, User};

/// Resolve `customer` to a directory user or fail with `not_found`.
pub(crate) async fn resolve_customer<D>(directory: &D, customer: &CustomerRef) -> Result<User, Error>
where
    D: UserDirectory + ?Sized,
{
    let found = match customer {
        CustomerRef::Email(email) => directory.find_by_email(email).await,
        CustomerRef::Id(id) => directory.find_by_id(*id).await,
    }
    .map_err(map_directory_error)?;

    found.ok_or_else(|| {
        debug!(customer = %customer, "customer reference did not resolve");
        Error::not_found(USER_NOT_FOUND)
    })
}
