//! Input validation for coffee payloads
//!
//! Payloads arrive as untyped JSON. Each editable field is checked against a
//! rule from [`RULES`]; every rule is evaluated so the caller sees all
//! violations at once.

use serde_json::{Map, Value};

use crate::models::{CoffeeField, CreateCoffeeRequest, UpdateCoffeeRequest};

/// Message emitted when an update carries no editable field
pub const AT_LEAST_ONE_FIELD: &str = "At least one field required for update";

/// Message emitted when the payload is not a JSON object
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Which rule set to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Create,
    Update,
}

/// Parses a raw value into its slot of the normalized request, or names the
/// violated constraint
pub type FieldParser = fn(&Value, &mut UpdateCoffeeRequest) -> Result<(), &'static str>;

/// Declarative rule for one editable field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: CoffeeField,
    /// Must be present in a create payload
    pub required: bool,
    pub parse: FieldParser,
}

/// Rules in evaluation order
pub const RULES: [FieldRule; 5] = [
    FieldRule {
        field: CoffeeField::Name,
        required: true,
        parse: |raw, fields| {
            fields.name = Some(text(raw)?);
            Ok(())
        },
    },
    FieldRule {
        field: CoffeeField::Description,
        required: true,
        parse: |raw, fields| {
            fields.description = Some(text(raw)?);
            Ok(())
        },
    },
    FieldRule {
        field: CoffeeField::Price,
        required: true,
        parse: |raw, fields| {
            fields.price = Some(positive_number(raw)?);
            Ok(())
        },
    },
    FieldRule {
        field: CoffeeField::Category,
        required: true,
        parse: |raw, fields| {
            fields.category = Some(text(raw)?);
            Ok(())
        },
    },
    FieldRule {
        field: CoffeeField::Available,
        required: false,
        parse: |raw, fields| {
            fields.available = Some(raw.as_bool().ok_or("must be a boolean")?);
            Ok(())
        },
    },
];

/// String that is non-empty after trimming
fn text(raw: &Value) -> Result<String, &'static str> {
    let text = raw.as_str().ok_or("must be a string")?.trim();
    if text.is_empty() {
        return Err("must not be empty");
    }
    Ok(text.to_string())
}

/// Number strictly greater than zero
fn positive_number(raw: &Value) -> Result<f64, &'static str> {
    let number = raw.as_f64().ok_or("must be a number")?;
    if number <= 0.0 {
        return Err("must be greater than 0");
    }
    Ok(number)
}

/// Outcome of validating a payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a payload against a shape without keeping the normalized value
pub fn validate(shape: Shape, payload: &Value) -> ValidationReport {
    let (_, errors) = check(shape, payload);
    ValidationReport { errors }
}

/// Validate a create payload and return the trimmed request
pub fn validate_create(payload: &Value) -> Result<CreateCoffeeRequest, ValidationReport> {
    let (fields, errors) = check(Shape::Create, payload);
    if !errors.is_empty() {
        return Err(ValidationReport { errors });
    }

    let UpdateCoffeeRequest {
        name: Some(name),
        description: Some(description),
        price: Some(price),
        category: Some(category),
        available,
    } = fields
    else {
        debug_assert!(false, "required rule passed without filling its field");
        return Err(ValidationReport {
            errors: vec!["Incomplete coffee payload".to_string()],
        });
    };

    Ok(CreateCoffeeRequest {
        name,
        description,
        price,
        category,
        available,
    })
}

/// Validate an update payload and return the trimmed partial request
pub fn validate_update(payload: &Value) -> Result<UpdateCoffeeRequest, ValidationReport> {
    let (fields, errors) = check(Shape::Update, payload);
    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(ValidationReport { errors })
    }
}

fn check(shape: Shape, payload: &Value) -> (UpdateCoffeeRequest, Vec<String>) {
    let mut errors = Vec::new();
    let mut fields = UpdateCoffeeRequest::default();

    let empty = Map::new();
    let record = match payload.as_object() {
        Some(record) => record,
        None => {
            errors.push(NOT_AN_OBJECT.to_string());
            &empty
        }
    };

    for rule in &RULES {
        match record.get(rule.field.as_str()) {
            None => {
                if shape == Shape::Create && rule.required {
                    errors.push(format!("{} is required", rule.field));
                }
            }
            Some(raw) => {
                if let Err(problem) = (rule.parse)(raw, &mut fields) {
                    errors.push(format!("{} {}", rule.field, problem));
                }
            }
        }
    }

    // Presence, not validity: a malformed field still counts as provided.
    if shape == Shape::Update
        && !RULES
            .iter()
            .any(|rule| record.contains_key(rule.field.as_str()))
    {
        errors.push(AT_LEAST_ONE_FIELD.to_string());
    }

    (fields, errors)
}
