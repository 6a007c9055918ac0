use serde::Serialize;

use crate::domain::catalog::{CatalogCounts, CatalogUpload};
use crate::domain::product::Product;
use crate::forms::upload::UploadCatalogForm;
use crate::repository::{CatalogReader, CatalogWriter};
use crate::services::ServiceResult;

/// Response body of a successful catalog upload.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadSummary {
    pub message: String,
    pub products: usize,
    pub materials: usize,
    pub processes: usize,
}

impl From<CatalogCounts> for UploadSummary {
    fn from(counts: CatalogCounts) -> Self {
        Self {
            message: "Data uploaded successfully".to_string(),
            products: counts.products,
            materials: counts.materials,
            processes: counts.processes,
        }
    }
}

/// Parses the uploaded CSV files and replaces the catalog with them.
pub fn upload_catalog<R>(repo: &R, form: &mut UploadCatalogForm) -> ServiceResult<UploadSummary>
where
    R: CatalogWriter + ?Sized,
{
    let upload = form.parse()?;
    replace_catalog(repo, &upload)
}

/// Replaces every product, material and process (and every recipe) with
/// `upload`.
pub fn replace_catalog<R>(repo: &R, upload: &CatalogUpload) -> ServiceResult<UploadSummary>
where
    R: CatalogWriter + ?Sized,
{
    let counts = repo.replace_catalog(upload)?;
    log::info!(
        "Catalog replaced: {} products, {} materials, {} processes",
        counts.products,
        counts.materials,
        counts.processes
    );
    Ok(counts.into())
}

/// Product entry returned by the products listing.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub short_description: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            product_code: product.product_code,
            product_name: product.product_name,
            category: product.category,
            short_description: product.short_description,
        }
    }
}

/// Lists every catalog product.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: CatalogReader + ?Sized,
{
    let products = repo.list_products()?;
    Ok(products.into_iter().map(ProductView::from).collect())
}
