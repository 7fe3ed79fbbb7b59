use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use serde::{Deserialize, Serialize};

use crate::domain::models::category::Category;

/// Fraction of the stored value taken off in the reseller feed.
pub const RESELLER_DISCOUNT: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub value: Decimal,
    pub image: String,
    #[serde(rename = "categoryId")]
    pub category_id: i32,
    pub category: Category,
}

/// A product that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub value: Decimal,
    pub image: String,
    pub category: Category,
}

impl Product {
    /// Full replacement of every mutable field, category included.
    pub fn replace(
        &mut self,
        name: String,
        description: String,
        value: Decimal,
        image: String,
        category: Category,
    ) {
        self.name = name;
        self.description = description;
        self.value = value;
        self.image = image;
        self.category_id = category.id;
        self.category = category;
    }

    /// Value offered to resellers.
    ///
    /// The discount goes through `f64` and back, so the result can carry
    /// binary rounding noise in its trailing digits. Returns `None` only when
    /// the value does not fit an `f64`.
    pub fn reseller_value(&self) -> Option<Decimal> {
        let discount = Decimal::from_f64(self.value.to_f64()? * RESELLER_DISCOUNT)?;
        Some(self.value - discount)
    }
}
