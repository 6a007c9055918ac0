use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `parent_id` value carried by top-level processes.
pub const TOP_LEVEL_PARENT_ID: i32 = 0;

/// Manufacturing process from the process library.
///
/// `parent_id` groups sub-steps under a top-level process by `sort_id`; the
/// link is informational and never enforced.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Process {
    pub id: i32,
    pub sort_id: i32,
    pub parent_id: i32,
    /// Unique process code, e.g. `PRC-EYELET`.
    pub proc_code: String,
    pub proc_name: String,
    pub discipline: String,
    pub input_form: Option<String>,
    pub output_form: Option<String>,
    pub key_tools: Option<String>,
    pub setup_time_min: Option<f64>,
    pub run_rate_unit: Option<String>,
    pub defect_risk_percent: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProcess {
    pub sort_id: i32,
    pub parent_id: i32,
    pub proc_code: String,
    pub proc_name: String,
    pub discipline: String,
    pub input_form: Option<String>,
    pub output_form: Option<String>,
    pub key_tools: Option<String>,
    pub setup_time_min: Option<f64>,
    pub run_rate_unit: Option<String>,
    pub defect_risk_percent: Option<f64>,
    pub notes: Option<String>,
}

impl NewProcess {
    /// Build a top-level process with only the identifying columns set.
    pub fn new(
        proc_code: impl Into<String>,
        proc_name: impl Into<String>,
        discipline: impl Into<String>,
    ) -> Self {
        Self {
            sort_id: 0,
            parent_id: TOP_LEVEL_PARENT_ID,
            proc_code: proc_code.into(),
            proc_name: proc_name.into(),
            discipline: discipline.into(),
            input_form: None,
            output_form: None,
            key_tools: None,
            setup_time_min: None,
            run_rate_unit: None,
            defect_risk_percent: None,
            notes: None,
        }
    }

    /// Place the process under `parent_id` in the library hierarchy.
    pub fn with_parent(mut self, sort_id: i32, parent_id: i32) -> Self {
        self.sort_id = sort_id;
        self.parent_id = parent_id;
        self
    }
}
