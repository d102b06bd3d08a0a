//! Product business logic - catalogue reads and writes.
//!
//! Writes are whole-document overwrites keyed by the product id. Name search is
//! a lexicographic range over the stored name, which gives prefix matches only.

use crate::{
    entities::{self, product},
    errors::Result,
    models::Product,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, info, instrument};

/// Upper-bound suffix for prefix range scans; sorts after any character a
/// product name is expected to contain.
pub const PREFIX_SENTINEL: char = '\u{f8ff}';

impl From<product::Model> for Product {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image_url: model.image_url,
            stock: model.stock,
        }
    }
}

fn to_active_model(item: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(item.id.clone()),
        name: Set(item.name.clone()),
        description: Set(item.description.clone()),
        price: Set(item.price),
        category: Set(item.category.clone()),
        image_url: Set(item.image_url.clone()),
        stock: Set(item.stock),
    }
}

/// Creates or replaces the product stored under `item.id`.
#[instrument(skip(db, item), fields(product_id = %item.id))]
pub async fn add_product<C>(db: &C, item: &Product) -> Result<()>
where
    C: ConnectionTrait,
{
    entities::Product::insert(to_active_model(item))
        .on_conflict(
            OnConflict::column(product::Column::Id)
                .update_columns([
                    product::Column::Name,
                    product::Column::Description,
                    product::Column::Price,
                    product::Column::Category,
                    product::Column::ImageUrl,
                    product::Column::Stock,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    info!("Stored product '{}' ({})", item.name, item.id);
    Ok(())
}

/// Same overwrite semantics as [`add_product`].
pub async fn update_product<C>(db: &C, item: &Product) -> Result<()>
where
    C: ConnectionTrait,
{
    add_product(db, item).await
}

/// Retrieves the whole catalogue, ordered by id.
pub async fn get_all_products<C>(db: &C) -> Result<Vec<Product>>
where
    C: ConnectionTrait,
{
    let products = entities::Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} products.", products.len());
    Ok(products.into_iter().map(Product::from).collect())
}

/// Retrieves products whose category equals `category` exactly.
pub async fn get_products_by_category<C>(db: &C, category: &str) -> Result<Vec<Product>>
where
    C: ConnectionTrait,
{
    Ok(entities::Product::find()
        .filter(product::Column::Category.eq(category))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect())
}

/// Finds a product by id, returning `None` if it does not exist.
pub async fn get_product_by_id<C>(db: &C, product_id: &str) -> Result<Option<Product>>
where
    C: ConnectionTrait,
{
    Ok(entities::Product::find_by_id(product_id.to_string())
        .one(db)
        .await?
        .map(Product::from))
}

/// Deletes a product. Deleting a missing product succeeds.
#[instrument(skip(db))]
pub async fn delete_product<C>(db: &C, product_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = entities::Product::delete_by_id(product_id.to_string())
        .exec(db)
        .await?;
    info!(
        "Deleted product '{}', rows affected: {}",
        product_id, result.rows_affected
    );
    Ok(())
}

/// Prefix search on the stored product name.
///
/// The query is lowercased and used as an inclusive range
/// `[query, query + PREFIX_SENTINEL]`. Only names stored in lowercase that
/// start with the query match; this is not substring or case-folded search.
#[instrument(skip(db))]
pub async fn search_products<C>(db: &C, query: &str) -> Result<Vec<Product>>
where
    C: ConnectionTrait,
{
    let lower = query.to_lowercase();
    let upper = format!("{lower}{PREFIX_SENTINEL}");

    let products = entities::Product::find()
        .filter(product::Column::Name.gte(lower.as_str()))
        .filter(product::Column::Name.lte(upper.as_str()))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;
    debug!("Search '{}' matched {} products", query, products.len());
    Ok(products.into_iter().map(Product::from).collect())
}
