use serde::{Deserialize, Serialize, de::Error as _};
use serde_json::Value;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const REQUIRED_FIELDS: [&str; 4] = ["name", "origin", "type", "price"];

const KNOWN_FIELDS: [&str; 7] = [
    "name",
    "origin",
    "type",
    "price",
    "roast",
    "rating",
    "description",
];

/// A decimal sent either as a JSON number or as numeric text. Any other JSON
/// value is kept so validation can reject it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(f64),
    Text(String),
    Other(Value),
}

impl DecimalInput {
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            DecimalInput::Number(n) => *n,
            DecimalInput::Text(s) => s.trim().parse::<f64>().ok()?,
            DecimalInput::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// A text field as sent by the client; non-string values are kept so
/// validation can reject them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Other(Value),
}

impl TextInput {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextInput::Text(s) => Some(s),
            TextInput::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_decimals", skip_on_field_errors = false))]
pub struct CreateProductRequest {
    #[validate(
        required(message = "name is required"),
        custom(function = "validate_name")
    )]
    #[schema(value_type = Option<String>, example = "Kona")]
    pub name: Option<TextInput>,

    #[validate(
        required(message = "origin is required"),
        custom(function = "validate_origin")
    )]
    #[schema(value_type = Option<String>, example = "Hawaii")]
    pub origin: Option<TextInput>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "type is required"),
        custom(function = "validate_kind")
    )]
    #[schema(value_type = Option<String>, example = "Arabica")]
    pub kind: Option<TextInput>,

    #[validate(required(message = "price is required"))]
    #[schema(value_type = Option<f64>, example = 65.0)]
    pub price: Option<DecimalInput>,

    #[validate(custom(function = "validate_roast"))]
    #[schema(value_type = Option<String>, example = "Medium")]
    pub roast: Option<TextInput>,

    #[schema(value_type = Option<f64>, example = 4.5)]
    pub rating: Option<DecimalInput>,

    #[validate(custom(function = "validate_description"))]
    #[schema(value_type = Option<String>, example = "Smooth and sweet")]
    pub description: Option<TextInput>,

    /// Top-level keys present in the payload, reported back on validation
    /// failure.
    #[serde(skip)]
    pub received: Vec<String>,
}

impl CreateProductRequest {
    /// Decodes a raw JSON body, remembering which keys carried a value.
    /// Known fields are listed in declaration order, unknown keys after them
    /// in sorted order.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(map) = &value else {
            return Err(serde_json::Error::custom("request body must be a JSON object"));
        };

        let present = |key: &str| map.get(key).is_some_and(|v| !v.is_null());

        let mut received: Vec<String> = KNOWN_FIELDS
            .into_iter()
            .filter(|&key| present(key))
            .map(str::to_string)
            .collect();

        let mut unknown: Vec<String> = map
            .keys()
            .filter(|&key| !KNOWN_FIELDS.contains(&key.as_str()) && present(key.as_str()))
            .cloned()
            .collect();
        unknown.sort();
        received.extend(unknown);

        let mut request: CreateProductRequest = serde_json::from_value(value)?;
        request.received = received;
        Ok(request)
    }
}

impl TryFrom<Value> for CreateProductRequest {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

fn field_error(message: String) -> ValidationError {
    ValidationError::new("text").with_message(Cow::Owned(message))
}

fn required_text(value: &TextInput, field: &str) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if !s.is_empty() => Ok(()),
        Some(_) => Err(field_error(format!("{field} must not be empty"))),
        None => Err(field_error(format!("{field} must be a string"))),
    }
}

fn optional_text(value: &TextInput, field: &str) -> Result<(), ValidationError> {
    match value {
        TextInput::Text(_) => Ok(()),
        TextInput::Other(_) => Err(field_error(format!("{field} must be a string"))),
    }
}

fn validate_name(value: &TextInput) -> Result<(), ValidationError> {
    required_text(value, "name")
}

fn validate_origin(value: &TextInput) -> Result<(), ValidationError> {
    required_text(value, "origin")
}

fn validate_kind(value: &TextInput) -> Result<(), ValidationError> {
    required_text(value, "type")
}

fn validate_roast(value: &TextInput) -> Result<(), ValidationError> {
    optional_text(value, "roast")
}

fn validate_description(value: &TextInput) -> Result<(), ValidationError> {
    optional_text(value, "description")
}

fn validate_decimals(req: &CreateProductRequest) -> Result<(), ValidationError> {
    if let Some(price) = &req.price {
        if price.to_f64().is_none() {
            return Err(ValidationError::new("decimal")
                .with_message(Cow::Borrowed("price must be a decimal number")));
        }
    }

    if let Some(rating) = &req.rating {
        if rating.to_f64().is_none() {
            return Err(ValidationError::new("decimal")
                .with_message(Cow::Borrowed("rating must be a decimal number")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::ValidationErrors;

    fn messages(errors: &ValidationErrors) -> Vec<String> {
        errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect()
    }

    #[test]
    fn decimal_input_accepts_numbers_and_numeric_text() {
        assert_eq!(DecimalInput::Number(12.5).to_f64(), Some(12.5));
        assert_eq!(DecimalInput::Text(" 18.40 ".into()).to_f64(), Some(18.4));
        assert_eq!(DecimalInput::Text("cheap".into()).to_f64(), None);
        assert_eq!(DecimalInput::Text("NaN".into()).to_f64(), None);
        assert_eq!(DecimalInput::Other(json!(true)).to_f64(), None);
    }

    #[test]
    fn complete_payload_validates() {
        let req = CreateProductRequest::from_json(json!({
            "name": "Kona",
            "origin": "Hawaii",
            "type": "Arabica",
            "price": 65.0
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.received, vec!["name", "origin", "type", "price"]);
    }

    #[test]
    fn missing_and_empty_fields_fail() {
        let req = CreateProductRequest::from_json(json!({
            "name": "",
            "type": "Arabica"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("origin"));
        assert!(fields.contains_key("price"));
        assert!(!fields.contains_key("kind"));
        assert!(messages(&errors).contains(&"name must not be empty".to_string()));
    }

    #[test]
    fn wrong_json_types_become_field_errors() {
        let req = CreateProductRequest::from_json(json!({
            "name": 123,
            "origin": "Hawaii",
            "type": ["Arabica"],
            "price": true,
            "roast": 5
        }))
        .unwrap();

        assert_eq!(req.received, vec!["name", "origin", "type", "price", "roast"]);

        let messages = messages(&req.validate().unwrap_err());
        assert!(messages.contains(&"name must be a string".to_string()));
        assert!(messages.contains(&"type must be a string".to_string()));
        assert!(messages.contains(&"price must be a decimal number".to_string()));
        assert!(messages.contains(&"roast must be a string".to_string()));
        assert!(!messages.iter().any(|m| m.starts_with("origin")));
    }

    #[test]
    fn unparseable_rating_fails() {
        let req = CreateProductRequest::from_json(json!({
            "name": "Kona",
            "origin": "Hawaii",
            "type": "Arabica",
            "price": 65,
            "rating": "five stars"
        }))
        .unwrap();

        let messages = messages(&req.validate().unwrap_err());
        assert_eq!(messages, vec!["rating must be a decimal number"]);
    }

    #[test]
    fn unparseable_price_fails_even_alongside_field_errors() {
        let req = CreateProductRequest::from_json(json!({
            "origin": "Kenya",
            "type": "Arabica",
            "price": "expensive"
        }))
        .unwrap();

        let messages = messages(&req.validate().unwrap_err());

        assert!(messages.iter().any(|m| m == "price must be a decimal number"));
        assert!(messages.iter().any(|m| m == "name is required"));
    }

    #[test]
    fn received_lists_known_fields_then_sorted_extras_and_skips_nulls() {
        let req = CreateProductRequest::from_json(json!({
            "zeta": 1,
            "price": 10,
            "alpha": true,
            "name": "Kona",
            "roast": null
        }))
        .unwrap();

        assert_eq!(req.received, vec!["name", "price", "alpha", "zeta"]);
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let err = CreateProductRequest::from_json(json!(["Kona"])).unwrap_err();
        assert_eq!(err.to_string(), "request body must be a JSON object");
        assert!(CreateProductRequest::from_json(json!("Kona")).is_err());
    }
}
