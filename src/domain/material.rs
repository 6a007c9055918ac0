use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Raw material available to recipes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Material {
    pub id: i32,
    /// Unique part code, e.g. `MAT-EYE`.
    pub partcode: String,
    pub friendly_description: String,
    /// Base material classifier (ACM, SAV, ...).
    pub base: String,
    /// Sub material classifier.
    pub sub: Option<String>,
    /// Thickness.
    pub thk: Option<f64>,
    /// Grade.
    pub grd: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    pub partcode: String,
    pub friendly_description: String,
    pub base: String,
    pub sub: Option<String>,
    pub thk: Option<f64>,
    pub grd: Option<String>,
}

impl NewMaterial {
    pub fn new(
        partcode: impl Into<String>,
        friendly_description: impl Into<String>,
        base: impl Into<String>,
    ) -> Self {
        Self {
            partcode: partcode.into(),
            friendly_description: friendly_description.into(),
            base: base.into(),
            sub: None,
            thk: None,
            grd: None,
        }
    }
}
