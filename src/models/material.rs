use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::material::{Material as DomainMaterial, NewMaterial as DomainNewMaterial};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::materials)]
pub struct Material {
    pub id: i32,
    pub partcode: String,
    pub friendly_description: String,
    pub base: String,
    pub sub: Option<String>,
    pub thk: Option<f64>,
    pub grd: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::materials)]
pub struct NewMaterial<'a> {
    pub partcode: &'a str,
    pub friendly_description: &'a str,
    pub base: &'a str,
    pub sub: Option<&'a str>,
    pub thk: Option<f64>,
    pub grd: Option<&'a str>,
}

impl From<Material> for DomainMaterial {
    fn from(value: Material) -> Self {
        Self {
            id: value.id,
            partcode: value.partcode,
            friendly_description: value.friendly_description,
            base: value.base,
            sub: value.sub,
            thk: value.thk,
            grd: value.grd,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewMaterial> for NewMaterial<'a> {
    fn from(value: &'a DomainNewMaterial) -> Self {
        Self {
            partcode: value.partcode.as_str(),
            friendly_description: value.friendly_description.as_str(),
            base: value.base.as_str(),
            sub: value.sub.as_deref(),
            thk: value.thk,
            grd: value.grd.as_deref(),
        }
    }
}
