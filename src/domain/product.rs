use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Catalog product that a recipe can be generated for.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: i32,
    /// Unique catalog code, e.g. `PRD-0001`.
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    /// Whether the product is made with in-house capability.
    pub core_capability: bool,
    /// Whether production is outsourced.
    pub outsourced: bool,
    /// Label of the recipe the catalog already associates with the product.
    pub assigned_recipe: Option<String>,
    pub short_description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a product during a catalog upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub core_capability: bool,
    pub outsourced: bool,
    pub assigned_recipe: Option<String>,
    pub short_description: Option<String>,
}

impl NewProduct {
    /// Build a product payload with the mandatory catalog columns.
    pub fn new(
        product_code: impl Into<String>,
        product_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            product_name: product_name.into(),
            category: category.into(),
            core_capability: false,
            outsourced: false,
            assigned_recipe: None,
            short_description: None,
        }
    }

    /// Set the in-house capability and outsourcing flags.
    pub fn with_flags(mut self, core_capability: bool, outsourced: bool) -> Self {
        self.core_capability = core_capability;
        self.outsourced = outsourced;
        self
    }

    /// Attach the catalog's assigned recipe label.
    pub fn with_assigned_recipe(mut self, assigned_recipe: impl Into<String>) -> Self {
        self.assigned_recipe = Some(assigned_recipe.into());
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }
}
