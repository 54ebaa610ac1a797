use derive_more::Display;

use super::{required, FieldError};

/// Brazilian taxpayer id. Kept as an opaque string: only its presence is checked.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Cpf(String);

impl TryFrom<String> for Cpf {
    type Error = FieldError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        required(value).map(Self)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
