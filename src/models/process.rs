use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::process::{NewProcess as DomainNewProcess, Process as DomainProcess};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::processes)]
pub struct Process {
    pub id: i32,
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
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::processes)]
pub struct NewProcess<'a> {
    pub sort_id: i32,
    pub parent_id: i32,
    pub proc_code: &'a str,
    pub proc_name: &'a str,
    pub discipline: &'a str,
    pub input_form: Option<&'a str>,
    pub output_form: Option<&'a str>,
    pub key_tools: Option<&'a str>,
    pub setup_time_min: Option<f64>,
    pub run_rate_unit: Option<&'a str>,
    pub defect_risk_percent: Option<f64>,
    pub notes: Option<&'a str>,
}

impl From<Process> for DomainProcess {
    fn from(value: Process) -> Self {
        Self {
            id: value.id,
            sort_id: value.sort_id,
            parent_id: value.parent_id,
            proc_code: value.proc_code,
            proc_name: value.proc_name,
            discipline: value.discipline,
            input_form: value.input_form,
            output_form: value.output_form,
            key_tools: value.key_tools,
            setup_time_min: value.setup_time_min,
            run_rate_unit: value.run_rate_unit,
            defect_risk_percent: value.defect_risk_percent,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewProcess> for NewProcess<'a> {
    fn from(value: &'a DomainNewProcess) -> Self {
        Self {
            sort_id: value.sort_id,
            parent_id: value.parent_id,
            proc_code: value.proc_code.as_str(),
            proc_name: value.proc_name.as_str(),
            discipline: value.discipline.as_str(),
            input_form: value.input_form.as_deref(),
            output_form: value.output_form.as_deref(),
            key_tools: value.key_tools.as_deref(),
            setup_time_min: value.setup_time_min,
            run_rate_unit: value.run_rate_unit.as_deref(),
            defect_risk_percent: value.defect_risk_percent,
            notes: value.notes.as_deref(),
        }
    }
}
