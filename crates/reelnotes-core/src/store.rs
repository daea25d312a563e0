use crate::error::StoreError;
use chrono::Local;
use reelnotes_models::{MovieId, Review, ANONYMOUS_AUTHOR, REVIEW_DATE_FORMAT};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Review persistence on a single SQLite file
///
/// Writers take the exclusive side of `lock` for the whole
/// acquire/execute/commit/release cycle, readers take the shared side. With
/// the default pool of one connection every operation is serialized.
pub struct ReviewStore {
    pool: SqlitePool,
    lock: RwLock<()>,
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    author: Option<String>,
    created_on: Option<String>,
    content: Option<String>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            author: row.author.unwrap_or_default(),
            created_on: row.created_on.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
        }
    }
}

impl ReviewStore {
    /// Open (creating if needed) the database file and make sure the table exists
    pub async fn open(path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        if pool_size == 0 {
            return Err(StoreError::InvalidPoolSize);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let is_new = !path.exists();

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .connect_with(options)
            .await?;

        if is_new {
            info!(path = %path.display(), "Created review database");
        }

        let store = Self::with_pool(pool);
        store.init().await?;

        debug!(path = %path.display(), pool_size, "Review store ready");
        Ok(store)
    }

    /// Wrap an existing pool. Call [`ReviewStore::init`] before first use.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            lock: RwLock::new(()),
        }
    }

    pub async fn init(&self) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS MovieReviews (
                ID INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                MovieID TEXT,
                Name TEXT,
                Timestamp TEXT,
                Content TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store an anonymous review dated today
    pub async fn write(&self, id: &MovieId, content: &str) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;

        let result = self.insert(id, content).await;
        if let Err(e) = &result {
            error!(imdb_id = %id, error = %e, "Failed to save review");
        }
        result
    }

    async fn insert(&self, id: &MovieId, content: &str) -> Result<(), StoreError> {
        let today = Local::now().format(REVIEW_DATE_FORMAT).to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT INTO MovieReviews (MovieID, Name, Timestamp, Content) VALUES (?, ?, ?, ?)")
            .bind(id.as_str())
            .bind(ANONYMOUS_AUTHOR)
            .bind(&today)
            .bind(content)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(imdb_id = %id, date = %today, "Saved review");
        Ok(())
    }

    /// Reviews for `id` in insertion order. Failures are logged and read as no reviews.
    pub async fn read(&self, id: &MovieId) -> Vec<Review> {
        match self.try_read(id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                error!(imdb_id = %id, error = %e, "Failed to load reviews");
                Vec::new()
            }
        }
    }

    pub async fn try_read(&self, id: &MovieId) -> Result<Vec<Review>, StoreError> {
        let _guard = self.lock.read().await;
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT Name AS author, Timestamp AS created_on, Content AS content FROM MovieReviews WHERE MovieID = ? ORDER BY ID",
        )
        .bind(id.as_str())
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    pub async fn count(&self, id: &MovieId) -> Result<i64, StoreError> {
        let _guard = self.lock.read().await;
        let mut conn = self.pool.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM MovieReviews WHERE MovieID = ?")
            .bind(id.as_str())
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
