use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::core::error::{Error, FieldErrors};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const NULL: &str = "This field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";

/// A single submitted login field, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Field {
    #[default]
    Missing,
    Null,
    Invalid,
    Text(String),
}

impl From<Option<Value>> for Field {
    /// Numbers are accepted and read as their string form; booleans, arrays
    /// and objects are not strings.
    fn from(value: Option<Value>) -> Self {
        match value {
            None => Field::Missing,
            Some(Value::Null) => Field::Null,
            Some(Value::String(text)) => Field::Text(text),
            Some(Value::Number(number)) => Field::Text(number.to_string()),
            Some(_) => Field::Invalid,
        }
    }
}

/// Raw login payload. Presence, nullness and blankness are checked by
/// [`LoginData::validate`] so every field error can be reported at once.
#[derive(Debug, Default)]
pub(crate) struct LoginData {
    pub(crate) username: Field,
    pub(crate) password: Field,
}

#[derive(Debug)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

fn is_form(content_type: &str) -> bool {
    content_type
        .get(..FORM_CONTENT_TYPE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

impl LoginData {
    /// Parse a form-encoded or JSON body. An empty body yields no fields.
    pub(crate) fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, Error> {
        if body.is_empty() {
            return Ok(Self::default());
        }

        match content_type {
            Some(content_type) if is_form(content_type) => {
                let mut fields: HashMap<String, String> =
                    serde_urlencoded::from_bytes(body).map_err(|_| Error::MalformedBody)?;

                Ok(Self {
                    username: fields.remove("username").map_or(Field::Missing, Field::Text),
                    password: fields.remove("password").map_or(Field::Missing, Field::Text),
                })
            }
            _ => {
                let mut fields: Map<String, Value> =
                    serde_json::from_slice(body).map_err(|_| Error::MalformedBody)?;

                Ok(Self {
                    username: fields.remove("username").into(),
                    password: fields.remove("password").into(),
                })
            }
        }
    }

    pub(crate) fn validate(self) -> Result<Credentials, Error> {
        let mut errors = FieldErrors::new();

        // usernames are trimmed, passwords are taken verbatim
        let username = match self.username {
            Field::Text(username) => Field::Text(username.trim().to_owned()),
            other => other,
        };

        let username = check("username", username, &mut errors);
        let password = check("password", self.password, &mut errors);

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(Error::Validation(errors)),
        }
    }
}

fn check(name: &'static str, field: Field, errors: &mut FieldErrors) -> Option<String> {
    let message = match field {
        Field::Text(text) if !text.is_empty() => return Some(text),
        Field::Text(_) => BLANK,
        Field::Missing => REQUIRED,
        Field::Null => NULL,
        Field::Invalid => NOT_A_STRING,
    };

    errors.insert(name, vec![message]);
    None
}
