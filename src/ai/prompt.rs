//! Prompt assembly for recipe generation.

use serde::Serialize;

use crate::domain::catalog::{CatalogCounts, CatalogSample};

/// Code of the administrative setup process every recipe starts with.
pub const ADMIN_SETUP_CODE: &str = "ADM-STD-ADMIN";

const OUTPUT_SCHEMA: &str = r#"{
  "product_match": {
    "product_code": "PRD-XXXX",
    "product_name": "Product Name",
    "category": "Category",
    "confidence": 0.95
  },
  "recipe": [
    {
      "recipe_section": "Material|Process",
      "sequence": 1,
      "parent_sequence": null,
      "process_material_code": "CODE",
      "process_name": "Name",
      "work_instruction": "Detailed instruction",
      "discipline": "Discipline"
    }
  ]
}"#;

#[derive(Serialize)]
struct PromptContext<'a> {
    sample_products: Vec<ProductContext<'a>>,
    sample_materials: Vec<MaterialContext<'a>>,
    sample_processes: Vec<ProcessContext<'a>>,
}

#[derive(Serialize)]
struct ProductContext<'a> {
    code: &'a str,
    name: &'a str,
    category: &'a str,
}

#[derive(Serialize)]
struct MaterialContext<'a> {
    code: &'a str,
    name: &'a str,
    base: &'a str,
}

#[derive(Serialize)]
struct ProcessContext<'a> {
    code: &'a str,
    name: &'a str,
    discipline: &'a str,
}

impl<'a> From<&'a CatalogSample> for PromptContext<'a> {
    fn from(sample: &'a CatalogSample) -> Self {
        Self {
            sample_products: sample
                .products
                .iter()
                .map(|product| ProductContext {
                    code: &product.product_code,
                    name: &product.product_name,
                    category: &product.category,
                })
                .collect(),
            sample_materials: sample
                .materials
                .iter()
                .map(|material| MaterialContext {
                    code: &material.partcode,
                    name: &material.friendly_description,
                    base: &material.base,
                })
                .collect(),
            sample_processes: sample
                .processes
                .iter()
                .map(|process| ProcessContext {
                    code: &process.proc_code,
                    name: &process.proc_name,
                    discipline: &process.discipline,
                })
                .collect(),
        }
    }
}

/// Fixed role, rules and output format, with the live catalog counts.
pub fn instructions(counts: &CatalogCounts) -> String {
    format!(
        "You are an expert MIS Workflow specialist for the sign and print industry. \
Your mission is to create detailed manufacturing recipes.

Available Data:
- {products} products in catalog
- {materials} materials in database
- {processes} processes in library

CRITICAL REQUIREMENTS:
1. Always include {ADMIN_SETUP_CODE} as the first process
2. Always include packing/dispatch as the last process
3. List materials first, then processes
4. Use proper sequencing (1, 2, 3...)
5. Include parent_sequence for materials used in processes
6. Default workflow: print -> laminate -> mount (unless flatbed specified)
7. Each material needs corresponding process (e.g., eyelets material + eyeletting process)

OUTPUT FORMAT:
Return only a JSON object with:
{OUTPUT_SCHEMA}

Available materials include: ACM panels, SAV vinyl, laminates, corrugated boards, adhesives, eyelets, etc.
Available processes include: artwork setup, printing, laminating, mounting, cutting, finishing, etc.

Generate a complete recipe based on the user's product description.",
        products = counts.products,
        materials = counts.materials,
        processes = counts.processes,
    )
}

/// Prompt split into the fixed instructions and the per-request text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Instructions followed by the request, for backends that take a single
    /// user message.
    pub fn combined(&self) -> String {
        if self.system.is_empty() {
            return self.user.clone();
        }
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Render the prompt: instructions as the system part, the user's request
/// verbatim and the catalog sample as JSON as the user part.
pub fn build_prompt(
    user_message: &str,
    counts: &CatalogCounts,
    sample: &CatalogSample,
) -> Result<Prompt, serde_json::Error> {
    let context = serde_json::to_string_pretty(&PromptContext::from(sample))?;

    Ok(Prompt::new(
        instructions(counts),
        format!("Create a manufacturing recipe for: {user_message}\n\nContext: {context}"),
    ))
}
