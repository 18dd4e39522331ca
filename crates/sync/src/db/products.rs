//! Product, variant and image upserts.

use shopify_sync_core::{ImagePayload, ProductPayload, VariantPayload};
use sqlx::PgPool;

use super::RepositoryError;

/// Repository for product rows and their children.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or fully overwrite a product row.
    ///
    /// Variants and images on the payload are not written here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, product: &ProductPayload) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopify_products (
                id, title, body_html, vendor, product_type, handle, tags,
                created_at, updated_at, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                body_html = EXCLUDED.body_html,
                vendor = EXCLUDED.vendor,
                product_type = EXCLUDED.product_type,
                handle = EXCLUDED.handle,
                tags = EXCLUDED.tags,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at,
                published_at = EXCLUDED.published_at
            ",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.body_html)
        .bind(&product.vendor)
        .bind(&product.product_type)
        .bind(&product.handle)
        .bind(&product.tags)
        .bind(product.created_at)
        .bind(product.updated_at)
        .bind(product.published_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Insert or fully overwrite a variant row, including its `product_id`.
    ///
    /// `price` and `compare_at_price` go through the lenient decimal parse,
    /// so malformed amounts are stored as zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_variant(&self, variant: &VariantPayload) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopify_variants (
                id, product_id, title, price, sku, position, inventory_policy,
                compare_at_price, taxable, barcode, weight, weight_unit,
                inventory_quantity, requires_shipping, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                product_id = EXCLUDED.product_id,
                title = EXCLUDED.title,
                price = EXCLUDED.price,
                sku = EXCLUDED.sku,
                position = EXCLUDED.position,
                inventory_policy = EXCLUDED.inventory_policy,
                compare_at_price = EXCLUDED.compare_at_price,
                taxable = EXCLUDED.taxable,
                barcode = EXCLUDED.barcode,
                weight = EXCLUDED.weight,
                weight_unit = EXCLUDED.weight_unit,
                inventory_quantity = EXCLUDED.inventory_quantity,
                requires_shipping = EXCLUDED.requires_shipping,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(variant.id)
        .bind(variant.product_id)
        .bind(&variant.title)
        .bind(variant.price_amount())
        .bind(&variant.sku)
        .bind(variant.position)
        .bind(&variant.inventory_policy)
        .bind(variant.compare_at_price_amount())
        .bind(variant.taxable)
        .bind(&variant.barcode)
        .bind(variant.weight)
        .bind(&variant.weight_unit)
        .bind(variant.inventory_quantity)
        .bind(variant.requires_shipping)
        .bind(variant.created_at)
        .bind(variant.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Insert or fully overwrite an image row, including its `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_image(&self, image: &ImagePayload) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopify_images (
                id, product_id, position, src, alt, width, height, variant_ids,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                product_id = EXCLUDED.product_id,
                position = EXCLUDED.position,
                src = EXCLUDED.src,
                alt = EXCLUDED.alt,
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                variant_ids = EXCLUDED.variant_ids,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(image.id)
        .bind(image.product_id)
        .bind(image.position)
        .bind(&image.src)
        .bind(&image.alt)
        .bind(image.width)
        .bind(image.height)
        .bind(image.variant_ids_i64())
        .bind(image.created_at)
        .bind(image.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
