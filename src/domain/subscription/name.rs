use derive_more::Display;

use super::{required, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Name(String);

impl TryFrom<String> for Name {
    type Error = FieldError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        required(value).map(Self)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
