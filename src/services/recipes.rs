use serde::Serialize;

use crate::domain::recipe::{RecipeLine, RecipeSection};
use crate::repository::RecipeReader;
use crate::services::{ServiceError, ServiceResult};

/// A rendered CSV download.
#[derive(Debug)]
pub struct RecipeExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct RecipeCsvRow<'a> {
    #[serde(rename = "Product Code")]
    product_code: &'a str,
    #[serde(rename = "Product Name")]
    product_name: &'a str,
    #[serde(rename = "Recipe Section")]
    recipe_section: RecipeSection,
    #[serde(rename = "Sequence")]
    sequence: i32,
    #[serde(rename = "Parent Sequence")]
    parent_sequence: Option<i32>,
    #[serde(rename = "Process/Material Code")]
    process_material_code: &'a str,
    #[serde(rename = "Process Name")]
    process_name: &'a str,
    #[serde(rename = "Work Instruction")]
    work_instruction: &'a str,
    #[serde(rename = "Discipline")]
    discipline: &'a str,
}

impl<'a> From<&'a RecipeLine> for RecipeCsvRow<'a> {
    fn from(line: &'a RecipeLine) -> Self {
        Self {
            product_code: &line.product_code,
            product_name: &line.product_name,
            recipe_section: line.recipe_section,
            sequence: line.sequence,
            parent_sequence: line.parent_sequence,
            process_material_code: &line.process_material_code,
            process_name: &line.process_name,
            work_instruction: &line.work_instruction,
            discipline: &line.discipline,
        }
    }
}

/// Render the latest recipe generated for `product_code` as CSV.
pub fn export_recipe<R>(repo: &R, product_code: &str) -> ServiceResult<RecipeExport>
where
    R: RecipeReader + ?Sized,
{
    let lines = repo.list_latest_recipe(product_code.trim())?;
    let Some(first) = lines.first() else {
        return Err(ServiceError::NotFound);
    };
    let filename = export_filename(&first.product_name);

    let mut writer = csv::Writer::from_writer(Vec::new());
    for line in &lines {
        writer
            .serialize(RecipeCsvRow::from(line))
            .map_err(|err| ServiceError::Internal(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(err.to_string()))?;

    Ok(RecipeExport { filename, bytes })
}

fn export_filename(product_name: &str) -> String {
    format!("{}_recipe.csv", product_name.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::repository::mock::MockRecipeReader;

    fn line(
        id: i32,
        section: RecipeSection,
        sequence: i32,
        parent_sequence: Option<i32>,
        code: &str,
    ) -> RecipeLine {
        RecipeLine {
            id,
            generation_id: "gen-1".to_string(),
            product_code: "PRD-0001".to_string(),
            product_name: "Banner A".to_string(),
            recipe_section: section,
            sequence,
            parent_sequence,
            process_material_code: code.to_string(),
            process_name: format!("{code} name"),
            work_instruction: "Do it, carefully".to_string(),
            discipline: "Finishing".to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn export_renders_header_and_rows_in_repository_order() {
        let mut repo = MockRecipeReader::new();
        repo.expect_list_latest_recipe()
            .times(1)
            .withf(|code| code == "PRD-0001")
            .returning(|_| {
                Ok(vec![
                    line(1, RecipeSection::Material, 1, None, "MAT-PVC"),
                    line(2, RecipeSection::Process, 2, Some(1), "PRC-PRINT"),
                ])
            });

        let export = export_recipe(&repo, " PRD-0001 ").expect("export");
        let text = String::from_utf8(export.bytes).expect("utf8");
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(export.filename, "Banner_A_recipe.csv");
        assert_eq!(
            rows[0],
            "Product Code,Product Name,Recipe Section,Sequence,Parent Sequence,Process/Material Code,Process Name,Work Instruction,Discipline"
        );
        assert_eq!(
            rows[1],
            "PRD-0001,Banner A,Material,1,,MAT-PVC,MAT-PVC name,\"Do it, carefully\",Finishing"
        );
        assert_eq!(
            rows[2],
            "PRD-0001,Banner A,Process,2,1,PRC-PRINT,PRC-PRINT name,\"Do it, carefully\",Finishing"
        );
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn export_without_rows_is_not_found() {
        let mut repo = MockRecipeReader::new();
        repo.expect_list_latest_recipe().returning(|_| Ok(Vec::new()));

        assert!(matches!(
            export_recipe(&repo, "PRD-9999"),
            Err(ServiceError::NotFound)
        ));
    }
}
