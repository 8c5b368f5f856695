//! Partial update compilation
//!
//! A validated [`UpdateCoffeeRequest`] is turned into an ordered list of
//! field assignments. Storage adapters translate the list into their own
//! partial-update command.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{CoffeeField, CoffeeItem, UpdateCoffeeRequest};

/// A single `field := value` instruction; each variant carries its own field
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Name(String),
    Description(String),
    Price(f64),
    Category(String),
    Available(bool),
    UpdatedAt(DateTime<Utc>),
}

impl Assignment {
    /// Field targeted by this assignment
    pub fn field(&self) -> CoffeeField {
        match self {
            Assignment::Name(_) => CoffeeField::Name,
            Assignment::Description(_) => CoffeeField::Description,
            Assignment::Price(_) => CoffeeField::Price,
            Assignment::Category(_) => CoffeeField::Category,
            Assignment::Available(_) => CoffeeField::Available,
            Assignment::UpdatedAt(_) => CoffeeField::UpdatedAt,
        }
    }

    /// Name token used in expression-style update statements
    pub fn name_token(&self) -> String {
        format!("#{}", self.field())
    }

    /// Value placeholder used in expression-style update statements
    pub fn placeholder(&self) -> String {
        format!(":{}", self.field())
    }
}

/// Assignments targeting one stored item
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub id: String,
    pub assignments: Vec<Assignment>,
}

impl fmt::Display for UpdatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET ")?;
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{} = {}",
                assignment.name_token(),
                assignment.placeholder()
            )?;
        }
        Ok(())
    }
}

/// Compile a partial update for item `id`
///
/// Fields are emitted in [`CoffeeField::EDITABLE`] order, followed by the
/// `updatedAt` assignment, which is always present and always last. Text is
/// copied verbatim: the request comes out of validation already trimmed.
///
/// The request must carry at least one field; an empty request yields a plan
/// that only touches `updatedAt`.
pub fn compile_update(id: &str, request: &UpdateCoffeeRequest, now: DateTime<Utc>) -> UpdatePlan {
    let mut assignments = Vec::with_capacity(CoffeeField::EDITABLE.len() + 1);

    for field in CoffeeField::EDITABLE {
        let assignment = match field {
            CoffeeField::Name => request.name.clone().map(Assignment::Name),
            CoffeeField::Description => request.description.clone().map(Assignment::Description),
            CoffeeField::Price => request.price.map(Assignment::Price),
            CoffeeField::Category => request.category.clone().map(Assignment::Category),
            CoffeeField::Available => request.available.map(Assignment::Available),
            CoffeeField::UpdatedAt => None,
        };
        assignments.extend(assignment);
    }

    assignments.push(Assignment::UpdatedAt(now));

    UpdatePlan {
        id: id.to_string(),
        assignments,
    }
}

impl CoffeeItem {
    /// Apply assignments in order
    pub fn apply(&mut self, assignments: &[Assignment]) {
        for assignment in assignments {
            match assignment {
                Assignment::Name(v) => self.name = v.clone(),
                Assignment::Description(v) => self.description = v.clone(),
                Assignment::Price(v) => self.price = *v,
                Assignment::Category(v) => self.category = v.clone(),
                Assignment::Available(v) => self.available = *v,
                Assignment::UpdatedAt(v) => self.updated_at = *v,
            }
        }
    }
}
