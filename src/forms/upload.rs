//! Multipart catalog upload and the CSV parsers behind it.

use std::collections::HashSet;
use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use thiserror::Error;

use crate::domain::catalog::CatalogUpload;
use crate::domain::material::NewMaterial;
use crate::domain::process::{NewProcess, TOP_LEVEL_PARENT_ID};
use crate::domain::product::NewProduct;

#[derive(MultipartForm)]
/// Multipart form carrying the three catalog CSV files.
pub struct UploadCatalogForm {
    #[multipart(limit = "10MB")]
    pub products_file: TempFile,
    #[multipart(limit = "10MB")]
    pub materials_file: TempFile,
    #[multipart(limit = "10MB")]
    pub processes_file: TempFile,
}

/// Which of the three uploaded files a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFile {
    Products,
    Materials,
    Processes,
}

impl std::fmt::Display for CatalogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFile::Products => f.write_str("products"),
            CatalogFile::Materials => f.write_str("materials"),
            CatalogFile::Processes => f.write_str("processes"),
        }
    }
}

#[derive(Debug, Error)]
/// Errors that can occur while parsing the uploaded catalog files.
pub enum CatalogUploadError {
    #[error("error reading {0} file")]
    FileRead(CatalogFile),
    #[error("{file} file: failed to parse CSV: {source}")]
    Csv {
        file: CatalogFile,
        #[source]
        source: csv::Error,
    },
    #[error("{file} file is missing the required `{header}` column")]
    MissingHeader {
        file: CatalogFile,
        header: &'static str,
    },
    #[error("{file} file row {row}: `{column}` is required")]
    MissingValue {
        file: CatalogFile,
        row: usize,
        column: &'static str,
    },
    #[error("{file} file row {row}: `{column}` has invalid number `{value}`")]
    InvalidNumber {
        file: CatalogFile,
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("{file} file row {row}: `{column}` has invalid flag `{value}`")]
    InvalidFlag {
        file: CatalogFile,
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("{file} file row {row}: duplicate code `{code}`")]
    DuplicateCode {
        file: CatalogFile,
        row: usize,
        code: String,
    },
}

impl UploadCatalogForm {
    /// Parse all three uploaded files. Nothing is returned unless every row of
    /// every file is valid.
    pub fn parse(&mut self) -> Result<CatalogUpload, CatalogUploadError> {
        let products = parse_products(rewound(&mut self.products_file, CatalogFile::Products)?)?;
        let materials =
            parse_materials(rewound(&mut self.materials_file, CatalogFile::Materials)?)?;
        let processes =
            parse_processes(rewound(&mut self.processes_file, CatalogFile::Processes)?)?;

        Ok(CatalogUpload {
            products,
            materials,
            processes,
        })
    }
}

fn rewound(file: &mut TempFile, kind: CatalogFile) -> Result<&mut impl Read, CatalogUploadError> {
    file.file
        .rewind()
        .map_err(|_| CatalogUploadError::FileRead(kind))?;
    Ok(&mut file.file)
}

/// Headers of one uploaded CSV file.
struct CsvTable {
    file: CatalogFile,
    headers: StringRecord,
}

impl CsvTable {
    fn index(&self, header: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(header))
    }

    fn require_header(&self, header: &'static str) -> Result<(), CatalogUploadError> {
        match self.index(header) {
            Some(_) => Ok(()),
            None => Err(CatalogUploadError::MissingHeader {
                file: self.file,
                header,
            }),
        }
    }

    fn text<'r>(&self, record: &'r StringRecord, header: &str) -> Option<&'r str> {
        self.index(header)
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn owned(&self, record: &StringRecord, header: &str) -> Option<String> {
        self.text(record, header).map(str::to_string)
    }

    fn required(
        &self,
        record: &StringRecord,
        row: usize,
        column: &'static str,
    ) -> Result<String, CatalogUploadError> {
        self.owned(record, column)
            .ok_or(CatalogUploadError::MissingValue {
                file: self.file,
                row,
                column,
            })
    }

    fn number(
        &self,
        record: &StringRecord,
        row: usize,
        column: &'static str,
    ) -> Result<Option<f64>, CatalogUploadError> {
        match self.text(record, column) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| CatalogUploadError::InvalidNumber {
                    file: self.file,
                    row,
                    column,
                    value: value.to_string(),
                }),
        }
    }

    /// Integer column; spreadsheets often export `3` as `3.0`.
    fn integer(
        &self,
        record: &StringRecord,
        row: usize,
        column: &'static str,
    ) -> Result<Option<i32>, CatalogUploadError> {
        let invalid = |value: &str| CatalogUploadError::InvalidNumber {
            file: self.file,
            row,
            column,
            value: value.to_string(),
        };

        match self.text(record, column) {
            None => Ok(None),
            Some(value) => match value.parse::<i32>() {
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => {
                    let float = value.parse::<f64>().map_err(|_| invalid(value))?;
                    if float.fract() == 0.0
                        && float >= f64::from(i32::MIN)
                        && float <= f64::from(i32::MAX)
                    {
                        Ok(Some(float as i32))
                    } else {
                        Err(invalid(value))
                    }
                }
            },
        }
    }

    fn flag(
        &self,
        record: &StringRecord,
        row: usize,
        column: &'static str,
    ) -> Result<bool, CatalogUploadError> {
        match self.text(record, column) {
            None => Ok(false),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => Ok(true),
                "false" | "no" | "n" | "0" => Ok(false),
                _ => Err(CatalogUploadError::InvalidFlag {
                    file: self.file,
                    row,
                    column,
                    value: value.to_string(),
                }),
            },
        }
    }
}

/// Iterate a CSV file, handing each record to `parse_row` with its 1-based
/// line number (the header is line 1). Codes returned by `parse_row` must be
/// unique within the file.
fn parse_table<R, T, F>(
    reader: R,
    file: CatalogFile,
    required_headers: &[&'static str],
    mut parse_row: F,
) -> Result<Vec<T>, CatalogUploadError>
where
    R: Read,
    F: FnMut(&CsvTable, &StringRecord, usize) -> Result<(String, T), CatalogUploadError>,
{
    let csv_error = |source: csv::Error| CatalogUploadError::Csv { file, source };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let table = CsvTable { file, headers };

    for header in required_headers {
        table.require_header(header)?;
    }

    let mut seen_codes = HashSet::new();
    let mut items = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row_number = index + 2; // account for header row
        let record = row.map_err(csv_error)?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let (code, item) = parse_row(&table, &record, row_number)?;
        if !seen_codes.insert(code.clone()) {
            return Err(CatalogUploadError::DuplicateCode {
                file,
                row: row_number,
                code,
            });
        }
        items.push(item);
    }

    Ok(items)
}

pub fn parse_products<R: Read>(reader: R) -> Result<Vec<NewProduct>, CatalogUploadError> {
    parse_table(
        reader,
        CatalogFile::Products,
        &["Product Code", "Product Name"],
        |table, record, row| {
            let code = table.required(record, row, "Product Code")?;
            let name = table.required(record, row, "Product Name")?;
            let category = table.owned(record, "Category").unwrap_or_default();

            let mut product = NewProduct::new(code.clone(), name, category).with_flags(
                table.flag(record, row, "Core Capability")?,
                table.flag(record, row, "Outsourced")?,
            );
            if let Some(assigned) = table.owned(record, "Assigned Recipe") {
                product = product.with_assigned_recipe(assigned);
            }
            if let Some(description) = table.owned(record, "Short Description") {
                product = product.with_short_description(description);
            }

            Ok((code, product))
        },
    )
}

pub fn parse_materials<R: Read>(reader: R) -> Result<Vec<NewMaterial>, CatalogUploadError> {
    parse_table(
        reader,
        CatalogFile::Materials,
        &["partcode"],
        |table, record, row| {
            let code = table.required(record, row, "partcode")?;

            let mut material = NewMaterial::new(
                code.clone(),
                table.owned(record, "friendly_description").unwrap_or_default(),
                table.owned(record, "base").unwrap_or_default(),
            );
            material.sub = table.owned(record, "sub");
            material.thk = table.number(record, row, "thk")?;
            material.grd = table.owned(record, "grd");

            Ok((code, material))
        },
    )
}

pub fn parse_processes<R: Read>(reader: R) -> Result<Vec<NewProcess>, CatalogUploadError> {
    parse_table(
        reader,
        CatalogFile::Processes,
        &["PROC_CODE", "PROC_NAME"],
        |table, record, row| {
            let code = table.required(record, row, "PROC_CODE")?;
            let name = table.required(record, row, "PROC_NAME")?;

            let mut process = NewProcess::new(
                code.clone(),
                name,
                table.owned(record, "DISCIPLINE").unwrap_or_default(),
            )
            .with_parent(
                table.integer(record, row, "sortID")?.unwrap_or(0),
                table
                    .integer(record, row, "parentID")?
                    .unwrap_or(TOP_LEVEL_PARENT_ID),
            );
            process.input_form = table.owned(record, "INPUT_FORM");
            process.output_form = table.owned(record, "OUTPUT_FORM");
            process.key_tools = table.owned(record, "KEY_TOOLS");
            process.setup_time_min = table.number(record, row, "SETUP_TIME_MIN")?;
            process.run_rate_unit = table.owned(record, "RUN_RATE_UNIT");
            process.defect_risk_percent = table.number(record, row, "DEFECT_RISK_%")?;
            process.notes = table.owned(record, "NOTES");

            Ok((code, process))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_products_reads_all_columns() {
        let csv = "Product Code,Product Name,Category,Core Capability,Outsourced,Assigned Recipe,Short Description\n\
                   PRD-0001,Banner A,Banners,Yes,no,RCP-BANNER,PVC banner with eyelets\n\
                   PRD-0002, Board B ,Boards,,,,\n";

        let products = parse_products(Cursor::new(csv)).expect("should parse");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_code, "PRD-0001");
        assert!(products[0].core_capability);
        assert!(!products[0].outsourced);
        assert_eq!(products[0].assigned_recipe.as_deref(), Some("RCP-BANNER"));
        assert_eq!(
            products[0].short_description.as_deref(),
            Some("PVC banner with eyelets")
        );
        assert_eq!(products[1].product_name, "Board B");
        assert!(products[1].assigned_recipe.is_none());
    }

    #[test]
    fn parse_products_rejects_missing_code_value() {
        let csv = "Product Code,Product Name\nPRD-0001,Banner A\n,Nameless\n";

        assert!(matches!(
            parse_products(Cursor::new(csv)),
            Err(CatalogUploadError::MissingValue {
                file: CatalogFile::Products,
                row: 3,
                column: "Product Code"
            })
        ));
    }

    #[test]
    fn parse_products_rejects_missing_header_and_bad_flag() {
        let csv = "Product Name,Category\nBanner A,Banners\n";
        assert!(matches!(
            parse_products(Cursor::new(csv)),
            Err(CatalogUploadError::MissingHeader {
                header: "Product Code",
                ..
            })
        ));

        let csv = "Product Code,Product Name,Outsourced\nPRD-1,Banner,maybe\n";
        assert!(matches!(
            parse_products(Cursor::new(csv)),
            Err(CatalogUploadError::InvalidFlag { row: 2, .. })
        ));
    }

    #[test]
    fn parse_products_rejects_duplicate_codes() {
        let csv = "Product Code,Product Name\nPRD-1,One\nPRD-1,Again\n";

        match parse_products(Cursor::new(csv)) {
            Err(CatalogUploadError::DuplicateCode { row, code, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(code, "PRD-1");
            }
            other => panic!("expected duplicate code error, got {other:?}"),
        }
    }

    #[test]
    fn parse_materials_reads_numbers_and_skips_blank_lines() {
        let csv = "partcode,friendly_description,base,sub,thk,grd\n\
                   MAT-EYE,Eyelets,Hardware,,,\n\
                   ,,,,,\n\
                   MAT-ACM3,ACM 3mm,ACM,White,3.0,A\n";

        let materials = parse_materials(Cursor::new(csv)).expect("should parse");

        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].thk, None);
        assert_eq!(materials[1].thk, Some(3.0));
        assert_eq!(materials[1].sub.as_deref(), Some("White"));
    }

    #[test]
    fn parse_materials_rejects_invalid_thickness() {
        let csv = "partcode,thk\nMAT-1,thick\n";

        assert!(matches!(
            parse_materials(Cursor::new(csv)),
            Err(CatalogUploadError::InvalidNumber { column: "thk", row: 2, .. })
        ));
    }

    #[test]
    fn parse_processes_reads_hierarchy_and_metrics() {
        let csv = "sortID,parentID,PROC_CODE,PROC_NAME,DISCIPLINE,INPUT_FORM,OUTPUT_FORM,KEY_TOOLS,SETUP_TIME_MIN,RUN_RATE_UNIT,DEFECT_RISK_%,NOTES\n\
                   1,0,PRC-EYELET,Eyeletting,Finishing,Sheet,Sheet,Eyelet press,5,per eyelet,1.5,\n\
                   2.0,1,PRC-EYELET-QC,Eyelet check,Finishing,,,,,,,Visual check\n";

        let processes = parse_processes(Cursor::new(csv)).expect("should parse");

        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].parent_id, 0);
        assert_eq!(processes[0].setup_time_min, Some(5.0));
        assert_eq!(processes[0].defect_risk_percent, Some(1.5));
        assert_eq!(processes[0].key_tools.as_deref(), Some("Eyelet press"));
        assert_eq!(processes[1].sort_id, 2);
        assert_eq!(processes[1].parent_id, 1);
        assert_eq!(processes[1].notes.as_deref(), Some("Visual check"));
    }

    #[test]
    fn parse_processes_requires_name() {
        let csv = "PROC_CODE,PROC_NAME\nPRC-1,\n";

        assert!(matches!(
            parse_processes(Cursor::new(csv)),
            Err(CatalogUploadError::MissingValue {
                column: "PROC_NAME",
                ..
            })
        ));
    }

    #[test]
    fn header_only_files_parse_to_empty_lists() {
        let products = parse_products(Cursor::new("Product Code,Product Name\n")).expect("ok");
        assert!(products.is_empty());
    }
}
