pub mod cpf;
pub mod email;
pub mod name;
pub mod phone;

use std::collections::BTreeMap;

use self::cpf::Cpf;
use self::email::Email;
use self::name::Name;
use self::phone::Phone;

/// The fields of the subscription form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Nome,
    Cpf,
    Email,
    Fone,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Nome, Field::Cpf, Field::Email, Field::Fone];

    /// Name of the field as submitted by the HTML form.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::Cpf => "cpf",
            Field::Email => "email",
            Field::Fone => "fone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Este campo é obrigatório.")]
    Required,
    #[error("Informe um endereço de email válido.")]
    InvalidEmail,
}

/// Strips surrounding whitespace and rejects what is left if empty.
fn required(value: String) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }

    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Field-level validation errors. Never empty when returned by [`SubscriptionForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, Vec<FieldError>>);

impl FormErrors {
    pub fn get(&self, field: Field) -> &[FieldError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn check<T>(&mut self, field: Field, outcome: Result<T, FieldError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.entry(field).or_default().push(e);
                None
            }
        }
    }
}

/// Raw, unvalidated form input. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionForm {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub fone: String,
}

impl SubscriptionForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Nome => &self.nome,
            Field::Cpf => &self.cpf,
            Field::Email => &self.email,
            Field::Fone => &self.fone,
        }
    }

    /// Checks every field and reports all the failing ones at once.
    pub fn validate(&self) -> Result<SubscriptionRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let name = errors.check(Field::Nome, Name::try_from(self.nome.clone()));
        let cpf = errors.check(Field::Cpf, Cpf::try_from(self.cpf.clone()));
        let email = errors.check(Field::Email, Email::try_from(self.email.clone()));
        let phone = errors.check(Field::Fone, Phone::try_from(self.fone.clone()));

        match (name, cpf, email, phone) {
            (Some(name), Some(cpf), Some(email), Some(phone)) => Ok(SubscriptionRequest {
                name,
                cpf,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated attendee registration. Lives only for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub name: Name,
    pub cpf: Cpf,
    pub email: Email,
    pub phone: Phone,
}
