//! Users referenced by carts and orders.
//!
//! The directory owns credentials and sessions; this module models the
//! profile fields the ordering flow reads and the registration payload.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Validation errors for user references.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The e-mail address was empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The e-mail address is not shaped like `local@domain`.
    #[error("email must look like name@domain")]
    InvalidEmail,
    /// The customer reference is neither an e-mail nor a numeric id.
    #[error("customer must be an email address or a numeric user id")]
    InvalidCustomerReference,
    /// The display name was empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
}

/// Role assigned to self-registered users.
pub const REGISTERED_ROLE: &str = "customer";

/// Directory identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
fn compile_email_regex() -> Regex {
    Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email regex compiles")
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(compile_email_regex);

/// Lookup key for users, normalised to lower case.
///
/// Directory rows may hold any case; adapters compare case-insensitively.
///
/// # Examples
/// ```
/// use food_backend::domain::Email;
///
/// let email = Email::new(" Ada@Example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an e-mail address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !EMAIL_RE.is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User record as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub role: String,
}

/// Unvalidated registration payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated registration, ready for the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub role: String,
}

impl TryFrom<UserDraft> for NewUser {
    type Error = UserValidationError;

    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            email: Email::new(&draft.email)?,
            phone: draft.phone.trim().to_owned(),
            role: REGISTERED_ROLE.to_owned(),
        })
    }
}

impl NewUser {
    /// Attach the directory-assigned identifier.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
        }
    }
}

/// How a request names its customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// Resolve by e-mail address.
    Email(Email),
    /// Resolve by directory identifier.
    Id(UserId),
}

impl FromStr for CustomerRef {
    type Err = UserValidationError;

    /// Anything containing `@` is an e-mail; an all-digit string is a user id.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.contains('@') {
            return Email::new(trimmed).map(Self::Email);
        }
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<i32>()
                .map(|id| Self::Id(UserId::new(id)))
                .map_err(|_| UserValidationError::InvalidCustomerReference);
        }
        Err(UserValidationError::InvalidCustomerReference)
    }
}

impl From<Email> for CustomerRef {
    fn from(value: Email) -> Self {
        Self::Email(value)
    }
}

impl From<UserId> for CustomerRef {
    fn from(value: UserId) -> Self {
        Self::Id(value)
    }
}

impl fmt::Display for CustomerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => email.fmt(f),
            Self::Id(id) => id.fmt(f),
        }
    }
}
