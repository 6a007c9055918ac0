use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::catalog::{CatalogCounts, CatalogSample, CatalogUpload, SampleLimits, StoreStats},
    domain::process::TOP_LEVEL_PARENT_ID,
    domain::product::Product as DomainProduct,
    models::material::{Material as DbMaterial, NewMaterial as DbNewMaterial},
    models::process::{NewProcess as DbNewProcess, Process as DbProcess},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    repository::{
        CatalogReader, CatalogWriter, DieselRepository, RepositoryError, RepositoryResult,
        StatsReader,
    },
};

impl CatalogReader for DieselRepository {
    fn count_catalog(&self) -> RepositoryResult<CatalogCounts> {
        let mut conn = self.conn()?;
        count_catalog(&mut conn)
    }

    fn sample_catalog(&self, limits: SampleLimits) -> RepositoryResult<CatalogSample> {
        use crate::schema::{materials, processes, products};

        let mut conn = self.conn()?;

        let sampled_products = products::table
            .order(products::id.asc())
            .limit(limits.products as i64)
            .load::<DbProduct>(&mut conn)?;

        let sampled_materials = materials::table
            .order(materials::id.asc())
            .limit(limits.materials as i64)
            .load::<DbMaterial>(&mut conn)?;

        let sampled_processes = processes::table
            .filter(processes::parent_id.eq(TOP_LEVEL_PARENT_ID))
            .order(processes::id.asc())
            .limit(limits.processes as i64)
            .load::<DbProcess>(&mut conn)?;

        Ok(CatalogSample {
            products: sampled_products.into_iter().map(Into::into).collect(),
            materials: sampled_materials.into_iter().map(Into::into).collect(),
            processes: sampled_processes.into_iter().map(Into::into).collect(),
        })
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let items = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}

impl CatalogWriter for DieselRepository {
    fn replace_catalog(&self, upload: &CatalogUpload) -> RepositoryResult<CatalogCounts> {
        use crate::schema::{materials, processes, products, recipes};

        let mut conn = self.conn()?;

        conn.transaction::<CatalogCounts, RepositoryError, _>(|conn| {
            // Recipes reference product codes, so they go with the catalog.
            diesel::delete(recipes::table).execute(conn)?;
            diesel::delete(products::table).execute(conn)?;
            diesel::delete(materials::table).execute(conn)?;
            diesel::delete(processes::table).execute(conn)?;

            for product in &upload.products {
                let db_new: DbNewProduct = product.into();
                diesel::insert_into(products::table)
                    .values(&db_new)
                    .execute(conn)?;
            }

            for material in &upload.materials {
                let db_new: DbNewMaterial = material.into();
                diesel::insert_into(materials::table)
                    .values(&db_new)
                    .execute(conn)?;
            }

            for process in &upload.processes {
                let db_new: DbNewProcess = process.into();
                diesel::insert_into(processes::table)
                    .values(&db_new)
                    .execute(conn)?;
            }

            count_catalog(conn)
        })
    }
}

impl StatsReader for DieselRepository {
    fn load_stats(&self) -> RepositoryResult<StoreStats> {
        use crate::schema::{chat_sessions, recipes};

        let mut conn = self.conn()?;
        let catalog = count_catalog(&mut conn)?;
        let recipes = recipes::table.count().get_result::<i64>(&mut conn)? as usize;
        let chat_sessions = chat_sessions::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        Ok(StoreStats {
            products: catalog.products,
            materials: catalog.materials,
            processes: catalog.processes,
            recipes,
            chat_sessions,
        })
    }
}

fn count_catalog(conn: &mut SqliteConnection) -> RepositoryResult<CatalogCounts> {
    use crate::schema::{materials, processes, products};

    let products = products::table.count().get_result::<i64>(conn)? as usize;
    let materials = materials::table.count().get_result::<i64>(conn)? as usize;
    let processes = processes::table.count().get_result::<i64>(conn)? as usize;

    Ok(CatalogCounts {
        products,
        materials,
        processes,
    })
}
