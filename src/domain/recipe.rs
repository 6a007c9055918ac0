//! Recipe line items and the document returned by a text-generation provider.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Section a recipe line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeSection {
    Material,
    Process,
}

impl RecipeSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeSection::Material => "Material",
            RecipeSection::Process => "Process",
        }
    }
}

impl fmt::Display for RecipeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown recipe section `{0}`")]
pub struct UnknownRecipeSection(pub String);

impl FromStr for RecipeSection {
    type Err = UnknownRecipeSection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Material" => Ok(RecipeSection::Material),
            "Process" => Ok(RecipeSection::Process),
            other => Err(UnknownRecipeSection(other.to_string())),
        }
    }
}

/// Catalog product the provider matched the user's request to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    #[serde(default)]
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    /// Must be present; `null` is accepted.
    #[serde(deserialize_with = "required_nullable")]
    pub confidence: Option<f64>,
}

fn required_nullable<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

/// One line of a generated recipe before it is tied to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipeLineItem {
    pub recipe_section: RecipeSection,
    pub sequence: i32,
    /// Sequence of the material line this process consumes.
    #[serde(default)]
    pub parent_sequence: Option<i32>,
    #[validate(length(min = 1, message = "process_material_code must not be empty"))]
    pub process_material_code: String,
    #[validate(length(min = 1, message = "process_name must not be empty"))]
    pub process_name: String,
    pub work_instruction: String,
    pub discipline: String,
}

impl RecipeLineItem {
    fn trimmed(self) -> Self {
        Self {
            process_material_code: self.process_material_code.trim().to_string(),
            process_name: self.process_name.trim().to_string(),
            work_instruction: self.work_instruction.trim().to_string(),
            discipline: self.discipline.trim().to_string(),
            ..self
        }
    }
}

/// Reasons a provider response cannot become a recipe.
#[derive(Debug, Error)]
pub enum RecipeParseError {
    /// The text is not JSON or lacks the `product_match`/`recipe` structure.
    #[error("response is not a recipe document: {0}")]
    Malformed(String),
    /// The document parsed but its product match is unusable.
    #[error("invalid product match: {0}")]
    InvalidProductMatch(String),
    /// A recipe element is missing a field or carries a bad value.
    #[error("invalid recipe line {index}: {reason}")]
    InvalidLine { index: usize, reason: String },
    #[error("recipe contains no line items")]
    Empty,
}

impl RecipeParseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RecipeParseError::Malformed(_))
    }
}

#[derive(Deserialize)]
struct RecipeDocument {
    product_match: ProductMatch,
    recipe: Vec<serde_json::Value>,
}

/// A provider response that passed parsing and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    pub product_match: ProductMatch,
    pub lines: Vec<RecipeLineItem>,
}

impl GeneratedRecipe {
    /// Parse provider text strictly as a recipe document.
    ///
    /// A blank `product_code` is replaced with `product_code_fallback`.
    pub fn parse(raw: &str, product_code_fallback: Option<&str>) -> Result<Self, RecipeParseError> {
        let document: RecipeDocument = serde_json::from_str(raw)
            .map_err(|err| RecipeParseError::Malformed(err.to_string()))?;

        let mut product_match = document.product_match;
        product_match.product_code = product_match.product_code.trim().to_string();
        product_match.product_name = product_match.product_name.trim().to_string();
        product_match.category = product_match.category.trim().to_string();

        if product_match.product_code.is_empty()
            && let Some(fallback) = product_code_fallback
                .map(str::trim)
                .filter(|code| !code.is_empty())
        {
            product_match.product_code = fallback.to_string();
        }

        if product_match.product_code.is_empty() {
            return Err(RecipeParseError::InvalidProductMatch(
                "product_code is missing".to_string(),
            ));
        }
        if product_match.product_name.is_empty() {
            return Err(RecipeParseError::InvalidProductMatch(
                "product_name is empty".to_string(),
            ));
        }

        if document.recipe.is_empty() {
            return Err(RecipeParseError::Empty);
        }

        let lines = document
            .recipe
            .into_iter()
            .enumerate()
            .map(|(index, value)| -> Result<RecipeLineItem, RecipeParseError> {
                let line = serde_json::from_value::<RecipeLineItem>(value)
                    .map_err(|err| RecipeParseError::InvalidLine {
                        index,
                        reason: err.to_string(),
                    })?
                    .trimmed();
                line.validate()
                    .map_err(|err| RecipeParseError::InvalidLine {
                        index,
                        reason: err.to_string(),
                    })?;
                Ok(line)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            product_match,
            lines,
        })
    }

    pub fn total_materials(&self) -> usize {
        self.count_section(RecipeSection::Material)
    }

    pub fn total_processes(&self) -> usize {
        self.count_section(RecipeSection::Process)
    }

    fn count_section(&self, section: RecipeSection) -> usize {
        self.lines
            .iter()
            .filter(|line| line.recipe_section == section)
            .count()
    }

    /// Sequencing irregularities in the generated lines. They are reported,
    /// never rejected.
    pub fn sequence_anomalies(&self) -> Vec<SequenceAnomaly> {
        let mut anomalies = Vec::new();

        let mut occurrences: HashMap<i32, usize> = HashMap::new();
        for line in &self.lines {
            *occurrences.entry(line.sequence).or_default() += 1;
        }
        let mut duplicates: Vec<i32> = occurrences
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(sequence, _)| sequence)
            .collect();
        duplicates.sort_unstable();
        anomalies.extend(
            duplicates
                .into_iter()
                .map(|sequence| SequenceAnomaly::DuplicateSequence { sequence }),
        );

        let material_sequences: HashSet<i32> = self
            .lines
            .iter()
            .filter(|line| line.recipe_section == RecipeSection::Material)
            .map(|line| line.sequence)
            .collect();
        for line in &self.lines {
            if let Some(parent_sequence) = line.parent_sequence
                && !material_sequences.contains(&parent_sequence)
            {
                anomalies.push(SequenceAnomaly::DanglingParent {
                    sequence: line.sequence,
                    parent_sequence,
                });
            }
        }

        anomalies
    }

    /// Tag every line with the matched product and `generation_id`.
    pub fn to_new_lines(&self, generation_id: &str) -> Vec<NewRecipeLine> {
        self.lines
            .iter()
            .map(|item| NewRecipeLine::from_item(generation_id, &self.product_match, item))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAnomaly {
    /// More than one line uses the same sequence number.
    DuplicateSequence { sequence: i32 },
    /// A parent sequence that does not name a material line.
    DanglingParent { sequence: i32, parent_sequence: i32 },
}

impl fmt::Display for SequenceAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceAnomaly::DuplicateSequence { sequence } => {
                write!(f, "sequence {sequence} is used more than once")
            }
            SequenceAnomaly::DanglingParent {
                sequence,
                parent_sequence,
            } => write!(
                f,
                "line {sequence} points at parent sequence {parent_sequence}, which is not a material line"
            ),
        }
    }
}

/// Recipe line ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipeLine {
    #[serde(skip)]
    pub generation_id: String,
    pub product_code: String,
    pub product_name: String,
    pub recipe_section: RecipeSection,
    pub sequence: i32,
    pub parent_sequence: Option<i32>,
    pub process_material_code: String,
    pub process_name: String,
    pub work_instruction: String,
    pub discipline: String,
}

impl NewRecipeLine {
    pub fn from_item(generation_id: &str, product: &ProductMatch, item: &RecipeLineItem) -> Self {
        Self {
            generation_id: generation_id.to_string(),
            product_code: product.product_code.clone(),
            product_name: product.product_name.clone(),
            recipe_section: item.recipe_section,
            sequence: item.sequence,
            parent_sequence: item.parent_sequence,
            process_material_code: item.process_material_code.clone(),
            process_name: item.process_name.clone(),
            work_instruction: item.work_instruction.clone(),
            discipline: item.discipline.clone(),
        }
    }
}

/// Stored recipe line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeLine {
    pub id: i32,
    /// Identifier shared by all lines written by one chat turn.
    pub generation_id: String,
    pub product_code: String,
    pub product_name: String,
    pub recipe_section: RecipeSection,
    pub sequence: i32,
    pub parent_sequence: Option<i32>,
    pub process_material_code: String,
    pub process_name: String,
    pub work_instruction: String,
    pub discipline: String,
    pub created_at: NaiveDateTime,
}
