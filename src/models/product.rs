use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Longest accepted product name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Fields an update request is allowed to change.
pub const MUTABLE_PROPERTIES: &[&str] = &["shopping_cart"];

/// A grocery item, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub shopping_cart: bool,
}

impl Product {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Product {
            name: name.into(),
            shopping_cart: false,
        }
    }

    pub fn in_cart(mut self, shopping_cart: bool) -> Self {
        self.shopping_cart = shopping_cart;
        self
    }

    /// Applies the mutable fields carried by `changes`.
    pub fn apply(&mut self, changes: &ProductChanges) {
        if let Some(shopping_cart) = changes.shopping_cart {
            self.shopping_cart = shopping_cart;
        }
    }
}

/// Rejected client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name is required")]
    MissingName,
    #[error("Field 'name' must be a string of 1 to 50 characters")]
    InvalidName,
    #[error("Field '{0}' must be a boolean")]
    NotBoolean(String),
    #[error("No product fields are detected")]
    NoFields,
    #[error("The requested product field(s) cannot be updated")]
    NoMutableFields,
}

/// Validated payload of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub shopping_cart: bool,
}

impl NewProduct {
    /// Parses a create request body. Fields other than `name` and `shopping_cart` are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        let fields = parse_object(body).ok_or(ValidationError::MissingName)?;

        let name = match fields.get("name") {
            None | Some(Value::Null) => return Err(ValidationError::MissingName),
            Some(Value::String(name)) => validate_name(name)?,
            Some(_) => return Err(ValidationError::InvalidName),
        };

        let shopping_cart = match fields.get("shopping_cart") {
            None => false,
            Some(value) => as_bool("shopping_cart", value)?,
        };

        Ok(NewProduct {
            name,
            shopping_cart,
        })
    }

    pub fn into_product(self) -> Product {
        Product::new(self.name).in_cart(self.shopping_cart)
    }
}

/// Validated payload of an update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub shopping_cart: Option<bool>,
    /// Fields present in the request that are not allowed to change.
    pub discarded: Vec<String>,
}

impl ProductChanges {
    pub fn shopping_cart(value: bool) -> Self {
        ProductChanges {
            shopping_cart: Some(value),
            discarded: Vec::new(),
        }
    }

    /// Parses an update request body, keeping only [`MUTABLE_PROPERTIES`].
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        let fields = parse_object(body)
            .filter(|fields| !fields.is_empty())
            .ok_or(ValidationError::NoFields)?;

        let mut changes = ProductChanges::default();
        for (key, value) in &fields {
            match key.as_str() {
                "shopping_cart" => changes.shopping_cart = Some(as_bool(key, value)?),
                _ => changes.discarded.push(key.clone()),
            }
        }

        if changes.updated_fields().is_empty() {
            return Err(ValidationError::NoMutableFields);
        }

        Ok(changes)
    }

    /// Names of the fields this change set will write.
    pub fn updated_fields(&self) -> Vec<&'static str> {
        MUTABLE_PROPERTIES
            .iter()
            .copied()
            .filter(|field| match *field {
                "shopping_cart" => self.shopping_cart.is_some(),
                _ => false,
            })
            .collect()
    }
}

/// Parses the `shop` query flag; `true`, `false`, `1` and `0` in any case.
pub fn parse_flag(field: &str, raw: &str) -> Result<bool, ValidationError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValidationError::NotBoolean(field.to_owned())),
    }
}

fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ValidationError::InvalidName);
    }
    Ok(name.to_owned())
}

fn as_bool(field: &str, value: &Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::NotBoolean(field.to_owned()))
}
