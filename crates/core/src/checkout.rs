//! Checkout planning.
//!
//! Turns the laptop selections of a cart into the immutable item snapshot
//! that is persisted with an order. Planning is pure: the caller resolves
//! the referenced catalog records (inside the same transaction that writes
//! the order) and hands them in as a [`CatalogSnapshot`].
//!
//! Selections that can no longer be bought are not silently dropped: they
//! are returned in [`CheckoutPlan::unavailable`] so the caller can report
//! them. When nothing is purchasable the checkout fails with
//! [`CoreError::Unavailable`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::cart::CartItem;
use crate::catalog::{CatalogSnapshot, PricedLine, UnavailableItem};
use crate::error::CoreError;
use crate::types::{DbId, Money};

/// Customer contact details as submitted at checkout.
///
/// Fields are optional at the wire level so a missing field produces a
/// validation error naming it rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomerInfo {
    #[validate(required, length(min = 1, max = 200))]
    pub customer_name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(required, length(min = 1, max = 500))]
    pub address: Option<String>,
}

/// Contact details after validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Validate and trim. Blank values count as missing.
    pub fn into_customer(self) -> Result<Customer, CoreError> {
        validate_input(&self)?;

        let mut blank = Vec::new();
        let mut take = |field: &'static str, value: Option<String>| {
            let value = value.unwrap_or_default().trim().to_string();
            if value.is_empty() {
                blank.push(field);
            }
            value
        };
        let customer = Customer {
            name: take("customer_name", self.customer_name),
            email: take("email", self.email),
            phone: take("phone", self.phone),
            address: take("address", self.address),
        };

        if blank.is_empty() {
            Ok(customer)
        } else {
            Err(CoreError::Validation(format!(
                "Missing required field(s): {}",
                blank.join(", ")
            )))
        }
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub customer: CustomerInfo,
    #[validate(required)]
    pub items: Option<Vec<CartItem>>,
}

/// Successful response body of `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: String,
    pub total_amount: Money,
    #[serde(default)]
    pub unavailable: Vec<UnavailableItem>,
}

/// A spare part as recorded in an order snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPart {
    pub part_id: DbId,
    pub name: String,
    pub price: Money,
}

/// One purchased laptop, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemSnapshot {
    pub laptop_id: DbId,
    pub laptop_brand: String,
    pub laptop_model: String,
    pub base_price: Money,
    pub spare_parts: Vec<SnapshotPart>,
    pub total_price: Money,
}

impl From<PricedLine> for OrderItemSnapshot {
    fn from(line: PricedLine) -> Self {
        Self {
            laptop_id: line.laptop.id,
            laptop_brand: line.laptop.brand,
            laptop_model: line.laptop.model,
            base_price: line.base_price,
            spare_parts: line
                .spare_parts
                .into_iter()
                .map(|p| SnapshotPart {
                    part_id: p.id,
                    name: p.name,
                    price: p.price,
                })
                .collect(),
            total_price: line.total_price,
        }
    }
}

/// The order contents decided by [`plan_checkout`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPlan {
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: Money,
    pub unavailable: Vec<UnavailableItem>,
}

/// Decide what an order will contain.
///
/// - no lines: [`CoreError::EmptyCart`]
/// - the same laptop twice: [`CoreError::Validation`]
/// - nothing purchasable: [`CoreError::Unavailable`] with every rejection
/// - otherwise the purchasable items, their total, and the rejections
pub fn plan_checkout(
    lines: &[CartItem],
    snapshot: &CatalogSnapshot,
) -> Result<CheckoutPlan, CoreError> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let mut seen = HashSet::new();
    if let Some(dup) = lines.iter().find(|l| !seen.insert(l.laptop_id)) {
        return Err(CoreError::Validation(format!(
            "Laptop {} appears more than once in the order",
            dup.laptop_id
        )));
    }

    let mut items = Vec::with_capacity(lines.len());
    let mut unavailable = Vec::new();
    for line in lines {
        match snapshot.price(line.laptop_id, &line.spare_part_ids) {
            Ok(priced) => items.push(OrderItemSnapshot::from(priced)),
            Err(rejected) => unavailable.push(rejected),
        }
    }

    if items.is_empty() {
        return Err(CoreError::Unavailable(unavailable));
    }

    let total_amount = items.iter().map(|i| i.total_price).sum();
    Ok(CheckoutPlan {
        items,
        total_amount,
        unavailable,
    })
}

/// Run `validator` rules and convert failures into a [`CoreError::Validation`]
/// naming every offending field.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe_errors(&errors)))
}

fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = Vec::new();
    collect_fields(errors, &mut fields);
    fields.sort();
    fields.dedup();
    format!("Missing or invalid field(s): {}", fields.join(", "))
}

fn collect_fields(errors: &ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(_) => out.push(field.to_string()),
            // Flattened structs report their own field names.
            ValidationErrorsKind::Struct(nested) => collect_fields(nested, out),
            ValidationErrorsKind::List(list) => {
                for nested in list.values() {
                    collect_fields(nested, out);
                }
            }
        }
    }
}
