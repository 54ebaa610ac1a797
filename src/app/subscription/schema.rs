use crate::app::csrf::CSRF_FIELD;
use crate::domain::subscription::{Field, FormErrors, SubscriptionForm};

/// Form-encoded body of `POST /inscricao/`. Missing fields are empty strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubscribeBody {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    pub fone: String,
    pub csrfmiddlewaretoken: String,
}

impl SubscribeBody {
    /// Folds the raw `key=value` pairs of a form body. Unknown keys are ignored
    /// and a repeated key keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut body = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "nome" => &mut body.nome,
                "cpf" => &mut body.cpf,
                "email" => &mut body.email,
                "fone" => &mut body.fone,
                CSRF_FIELD => &mut body.csrfmiddlewaretoken,
                _ => continue,
            };
            *slot = value;
        }
        body
    }

    /// Splits the body into the subscription fields and the submitted CSRF token.
    pub fn into_parts(self) -> (SubscriptionForm, String) {
        let form = SubscriptionForm {
            nome: self.nome,
            cpf: self.cpf,
            email: self.email,
            fone: self.fone,
        };
        (form, self.csrfmiddlewaretoken)
    }
}

/// A form field together with its current value and errors, ready for the template.
pub struct BoundField {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl BoundField {
    pub fn bind_all(form: &SubscriptionForm, errors: Option<&FormErrors>) -> Vec<Self> {
        Field::ALL
            .into_iter()
            .map(|field| Self {
                name: field.name(),
                label: label(field),
                input_type: input_type(field),
                value: form.value(field).to_owned(),
                errors: errors
                    .map(|errors| errors.get(field).iter().map(ToString::to_string).collect())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Nome => "Nome",
        Field::Cpf => "CPF",
        Field::Email => "Email",
        Field::Fone => "Telefone",
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Nome | Field::Cpf | Field::Fone => "text",
    }
}
