use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors from the persistence store. Callers treat these as a generic
/// failure signal; they are not interpreted further.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A stored order row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderRecord {
    pub order_id: String,
    pub value: Option<f64>,
    pub creation_date: Option<String>,
}

/// A stored line item row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ItemRecord {
    pub id: i64,
    pub order_id: String,
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

/// Item fields as inserted alongside an order; the row id is assigned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

/// Handle over the orders/items table pair. Cheap to clone; handlers get
/// one injected rather than reaching for a global connection.
#[derive(Clone)]
pub struct OrderStore {
    pool: SqlitePool,
}

impl OrderStore {
    /// Open (creating if missing) the database at `url` and ensure the
    /// schema exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|_| StoreError::InvalidUrl(url.to_string()))?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        info!("connected to database at {}", url);

        Ok(Self { pool })
    }

    /// In-memory store for tests. A single never-recycled connection keeps
    /// the database alive for the life of the pool.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|_| StoreError::InvalidUrl("sqlite::memory:".to_string()))?
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Create the orders/items tables if they do not exist. The foreign key
    /// declaration is advisory; orphaned item inserts are not rejected.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS orders (
                order_id TEXT PRIMARY KEY,
                value REAL,
                creation_date TEXT
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id TEXT,
                product_id INTEGER,
                quantity INTEGER,
                price REAL,
                FOREIGN KEY(order_id) REFERENCES orders(order_id)
            )",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Pings the database to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_order(&self, order: &OrderRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO orders (order_id, value, creation_date) VALUES (?1, ?2, ?3)")
            .bind(&order.order_id)
            .bind(order.value)
            .bind(order.creation_date.as_deref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        let row = sqlx::query_as::<_, OrderRecord>(
            "SELECT order_id, value, creation_date FROM orders WHERE order_id = ?1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRecord>(
            "SELECT order_id, value, creation_date FROM orders",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns the number of rows affected; zero means no such order.
    pub async fn update_order(
        &self,
        order_id: &str,
        value: Option<f64>,
        creation_date: Option<&str>,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE orders SET value = ?1, creation_date = ?2 WHERE order_id = ?3")
                .bind(value)
                .bind(creation_date)
                .bind(order_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows affected; zero means no such order.
    pub async fn delete_order(&self, order_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = ?1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert_item(&self, order_id: &str, item: &NewItem) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO items (order_id, product_id, quantity, price) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_items(&self, order_id: &str) -> Result<Vec<ItemRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRecord>(
            "SELECT id, order_id, product_id, quantity, price FROM items WHERE order_id = ?1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all_items(&self) -> Result<Vec<ItemRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRecord>(
            "SELECT id, order_id, product_id, quantity, price FROM items",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete_items(&self, order_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM items WHERE order_id = ?1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
