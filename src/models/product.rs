use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub core_capability: bool,
    pub outsourced: bool,
    pub assigned_recipe: Option<String>,
    pub short_description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub product_code: &'a str,
    pub product_name: &'a str,
    pub category: &'a str,
    pub core_capability: bool,
    pub outsourced: bool,
    pub assigned_recipe: Option<&'a str>,
    pub short_description: Option<&'a str>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            product_code: value.product_code,
            product_name: value.product_name,
            category: value.category,
            core_capability: value.core_capability,
            outsourced: value.outsourced,
            assigned_recipe: value.assigned_recipe,
            short_description: value.short_description,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            product_code: value.product_code.as_str(),
            product_name: value.product_name.as_str(),
            category: value.category.as_str(),
            core_capability: value.core_capability,
            outsourced: value.outsourced,
            assigned_recipe: value.assigned_recipe.as_deref(),
            short_description: value.short_description.as_deref(),
        }
    }
}
