// src/store.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::dtos::product::{CreateProductRequest, UpdateProductRequest};
use crate::models::product::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, price, created_at";

/// Product data access. `Memory` is used when no database is configured.
#[derive(Clone)]
pub enum ProductStore {
    Memory(MemoryProducts),
    Postgres(PgPool),
}

#[derive(Clone, Default)]
pub struct MemoryProducts {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    last_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl ProductStore {
    pub fn memory() -> Self {
        ProductStore::Memory(MemoryProducts::default())
    }

    pub fn postgres(pool: PgPool) -> Self {
        ProductStore::Postgres(pool)
    }

    pub async fn list(&self) -> Result<Vec<Product>, sqlx::Error> {
        match self {
            ProductStore::Memory(mem) => {
                let inner = mem.inner.read().await;
                Ok(inner.rows.values().cloned().collect())
            }
            ProductStore::Postgres(pool) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
                ))
                .fetch_all(pool)
                .await
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        match self {
            ProductStore::Memory(mem) => Ok(mem.inner.read().await.rows.get(&id).cloned()),
            ProductStore::Postgres(pool) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(pool)
                .await
            }
        }
    }

    pub async fn create(&self, new: CreateProductRequest) -> Result<Product, sqlx::Error> {
        match self {
            ProductStore::Memory(mem) => {
                let mut inner = mem.inner.write().await;
                inner.last_id += 1;
                let product = Product {
                    id: inner.last_id,
                    name: new.name,
                    description: new.description,
                    price: new.price,
                    created_at: Utc::now(),
                };
                inner.rows.insert(product.id, product.clone());
                Ok(product)
            }
            ProductStore::Postgres(pool) => {
                sqlx::query_as::<_, Product>(&format!(
                    "INSERT INTO products (name, description, price)
                     VALUES ($1, $2, $3) RETURNING {PRODUCT_COLUMNS}"
                ))
                .bind(&new.name)
                .bind(&new.description)
                .bind(new.price)
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Fields left as `None` keep their stored value.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateProductRequest,
    ) -> Result<Option<Product>, sqlx::Error> {
        match self {
            ProductStore::Memory(mem) => {
                let mut inner = mem.inner.write().await;
                let Some(product) = inner.rows.get_mut(&id) else {
                    return Ok(None);
                };
                if let Some(name) = changes.name {
                    product.name = name;
                }
                if let Some(description) = changes.description {
                    product.description = description;
                }
                if let Some(price) = changes.price {
                    product.price = price;
                }
                Ok(Some(product.clone()))
            }
            ProductStore::Postgres(pool) => {
                sqlx::query_as::<_, Product>(&format!(
                    "UPDATE products SET
                     name = COALESCE($1, name),
                     description = COALESCE($2, description),
                     price = COALESCE($3, price)
                     WHERE id = $4 RETURNING {PRODUCT_COLUMNS}"
                ))
                .bind(changes.name)
                .bind(changes.description)
                .bind(changes.price)
                .bind(id)
                .fetch_optional(pool)
                .await
            }
        }
    }

    /// Returns `false` when no product had this id.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        match self {
            ProductStore::Memory(mem) => Ok(mem.inner.write().await.rows.remove(&id).is_some()),
            ProductStore::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
        }
    }
}
