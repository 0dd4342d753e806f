//! Support enquiries sent by customers.
//!
//! Messages are stored for staff to read; the sender does not need a
//! directory account. Attachments are recorded by name only.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Email, UserValidationError};

/// Validation errors for support messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupportValidationError {
    /// The sender address failed e-mail validation.
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// The message body was empty once trimmed.
    #[error("message must not be empty")]
    EmptyMessage,
    /// An attachment name was empty once trimmed.
    #[error("attachment {index} must have a name")]
    BlankAttachment {
        /// Position of the offending entry.
        index: usize,
    },
}

/// Server-assigned support message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupportMessageId(i32);

impl SupportMessageId {
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

impl fmt::Display for SupportMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored support message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportMessage {
    pub id: SupportMessageId,
    pub email: Email,
    pub message: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated support message as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportMessageDraft {
    pub email: String,
    pub message: String,
    pub attachments: Vec<String>,
}

/// Validated support message ready to be stored.
///
/// # Examples
/// ```
/// use food_backend::domain::{NewSupportMessage, SupportMessageDraft};
///
/// let message = NewSupportMessage::try_from(SupportMessageDraft {
///     email: "Ada@Example.com".into(),
///     message: " Where is my soup? ".into(),
///     attachments: vec!["receipt.pdf".into()],
/// })
/// .expect("valid message");
/// assert_eq!(message.email.as_ref(), "ada@example.com");
/// assert_eq!(message.message, "Where is my soup?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupportMessage {
    pub email: Email,
    pub message: String,
    pub attachments: Vec<String>,
}

impl TryFrom<SupportMessageDraft> for NewSupportMessage {
    type Error = SupportValidationError;

    fn try_from(draft: SupportMessageDraft) -> Result<Self, Self::Error> {
        let email = Email::new(&draft.email)?;
        let message = draft.message.trim();
        if message.is_empty() {
            return Err(SupportValidationError::EmptyMessage);
        }
        let attachments = draft
            .attachments
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                if name.is_empty() {
                    Err(SupportValidationError::BlankAttachment { index })
                } else {
                    Ok(name.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            email,
            message: message.to_owned(),
            attachments,
        })
    }
}

impl NewSupportMessage {
    /// Attach the stored identifier and timestamp.
    pub fn into_message(self, id: SupportMessageId, created_at: DateTime<Utc>) -> SupportMessage {
        SupportMessage {
            id,
            email: self.email,
            message: self.message,
            attachments: self.attachments,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(email: &str, message: &str, attachments: &[&str]) -> SupportMessageDraft {
        SupportMessageDraft {
            email: email.to_owned(),
            message: message.to_owned(),
            attachments: attachments.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    #[rstest]
    fn attachment_names_are_trimmed_and_kept_in_order() {
        let message =
            NewSupportMessage::try_from(draft("ada@example.com", "hi", &[" b.png", "a.pdf "]))
                .expect("valid message");
        assert_eq!(message.attachments, vec!["b.png", "a.pdf"]);
    }

    #[rstest]
    #[case(draft("", "hi", &[]), SupportValidationError::Email(UserValidationError::EmptyEmail))]
    #[case(draft("ada", "hi", &[]), SupportValidationError::Email(UserValidationError::InvalidEmail))]
    #[case(draft("ada@example.com", "  \n", &[]), SupportValidationError::EmptyMessage)]
    #[case(draft("ada@example.com", "hi", &["a.pdf", " "]), SupportValidationError::BlankAttachment { index: 1 })]
    fn incomplete_messages_are_rejected(
        #[case] draft: SupportMessageDraft,
        #[case] expected: SupportValidationError,
    ) {
        assert_eq!(NewSupportMessage::try_from(draft), Err(expected));
    }
}
