use derive_more::Display;

use super::{required, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Phone(String);

impl TryFrom<String> for Phone {
    type Error = FieldError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        required(value).map(Self)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
