use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{
    NewRecipeLine as DomainNewRecipeLine, RecipeLine as DomainRecipeLine, UnknownRecipeSection,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeLine {
    pub id: i32,
    pub generation_id: String,
    pub product_code: String,
    pub product_name: String,
    pub recipe_section: String,
    pub sequence: i32,
    pub parent_sequence: Option<i32>,
    pub process_material_code: String,
    pub process_name: String,
    pub work_instruction: String,
    pub discipline: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeLine<'a> {
    pub generation_id: &'a str,
    pub product_code: &'a str,
    pub product_name: &'a str,
    pub recipe_section: &'static str,
    pub sequence: i32,
    pub parent_sequence: Option<i32>,
    pub process_material_code: &'a str,
    pub process_name: &'a str,
    pub work_instruction: &'a str,
    pub discipline: &'a str,
}

impl TryFrom<RecipeLine> for DomainRecipeLine {
    type Error = UnknownRecipeSection;

    fn try_from(value: RecipeLine) -> Result<Self, Self::Error> {
        Ok(Self {
            recipe_section: value.recipe_section.parse()?,
            id: value.id,
            generation_id: value.generation_id,
            product_code: value.product_code,
            product_name: value.product_name,
            sequence: value.sequence,
            parent_sequence: value.parent_sequence,
            process_material_code: value.process_material_code,
            process_name: value.process_name,
            work_instruction: value.work_instruction,
            discipline: value.discipline,
            created_at: value.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewRecipeLine> for NewRecipeLine<'a> {
    fn from(value: &'a DomainNewRecipeLine) -> Self {
        Self {
            generation_id: value.generation_id.as_str(),
            product_code: value.product_code.as_str(),
            product_name: value.product_name.as_str(),
            recipe_section: value.recipe_section.as_str(),
            sequence: value.sequence,
            parent_sequence: value.parent_sequence,
            process_material_code: value.process_material_code.as_str(),
            process_name: value.process_name.as_str(),
            work_instruction: value.work_instruction.as_str(),
            discipline: value.discipline.as_str(),
        }
    }
}
