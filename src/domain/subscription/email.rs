use derive_more::Display;
use validator::validate_email;

use super::{required, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Email(String);

impl TryFrom<String> for Email {
    type Error = FieldError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = required(value)?;
        if validate_email(&value) {
            Ok(Self(value))
        } else {
            Err(FieldError::InvalidEmail)
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
