//! Customer and address upserts.

use shopify_sync_core::{AddressPayload, CustomerPayload};
use sqlx::PgPool;

use super::RepositoryError;

/// Repository for customer rows and their addresses.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or fully overwrite a customer row.
    ///
    /// `total_spent` goes through the lenient decimal parse. Addresses on the
    /// payload are not written here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, customer: &CustomerPayload) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopify_customers (
                id, email, accepts_marketing, created_at, updated_at, first_name,
                last_name, orders_count, state, total_spent, last_order_id, note,
                verified_email, multipass_identifier, tax_exempt, phone, tags,
                last_order_name, currency
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                accepts_marketing = EXCLUDED.accepts_marketing,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                orders_count = EXCLUDED.orders_count,
                state = EXCLUDED.state,
                total_spent = EXCLUDED.total_spent,
                last_order_id = EXCLUDED.last_order_id,
                note = EXCLUDED.note,
                verified_email = EXCLUDED.verified_email,
                multipass_identifier = EXCLUDED.multipass_identifier,
                tax_exempt = EXCLUDED.tax_exempt,
                phone = EXCLUDED.phone,
                tags = EXCLUDED.tags,
                last_order_name = EXCLUDED.last_order_name,
                currency = EXCLUDED.currency
            ",
        )
        .bind(customer.id)
        .bind(&customer.email)
        .bind(customer.accepts_marketing)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.orders_count)
        .bind(&customer.state)
        .bind(customer.total_spent_amount())
        .bind(customer.last_order_id)
        .bind(&customer.note)
        .bind(customer.verified_email)
        .bind(&customer.multipass_identifier)
        .bind(customer.tax_exempt)
        .bind(&customer.phone)
        .bind(&customer.tags)
        .bind(&customer.last_order_name)
        .bind(&customer.currency)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Insert or fully overwrite an address row, including its `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_address(&self, address: &AddressPayload) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopify_customer_addresses (
                id, customer_id, first_name, last_name, company, address_one,
                address_two, city, province, country, zip, phone, province_code,
                country_code, country_name, default_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                customer_id = EXCLUDED.customer_id,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                company = EXCLUDED.company,
                address_one = EXCLUDED.address_one,
                address_two = EXCLUDED.address_two,
                city = EXCLUDED.city,
                province = EXCLUDED.province,
                country = EXCLUDED.country,
                zip = EXCLUDED.zip,
                phone = EXCLUDED.phone,
                province_code = EXCLUDED.province_code,
                country_code = EXCLUDED.country_code,
                country_name = EXCLUDED.country_name,
                default_address = EXCLUDED.default_address
            ",
        )
        .bind(address.id)
        .bind(address.customer_id)
        .bind(&address.first_name)
        .bind(&address.last_name)
        .bind(&address.company)
        .bind(&address.address_one)
        .bind(&address.address_two)
        .bind(&address.city)
        .bind(&address.province)
        .bind(&address.country)
        .bind(&address.zip)
        .bind(&address.phone)
        .bind(&address.province_code)
        .bind(&address.country_code)
        .bind(&address.country_name)
        .bind(address.is_default)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
