//! Write transaction helpers.

use sqlx::{Executor, Sqlite, SqlitePool, Transaction};

/// Begin a transaction that holds the database write lock from the start.
///
/// `Pool::begin` issues a deferred `BEGIN`. A deferred transaction that reads
/// before it writes cannot upgrade its lock while another writer is active,
/// and SQLite fails that upgrade at once instead of waiting out the busy
/// timeout. Starting with `BEGIN IMMEDIATE` makes concurrent writers queue.
///
/// The deferred transaction is swapped for an immediate one on the same
/// connection, so commit and rollback-on-drop stay with sqlx.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // One batch, so cancellation cannot land between the two statements.
    if let Err(e) = (&mut *tx).execute("ROLLBACK; BEGIN IMMEDIATE").await {
        // Reopen a transaction so the rollback issued on drop has one to end.
        (&mut *tx).execute("BEGIN").await?;
        return Err(e);
    }

    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::create_pool;

    async fn pool() -> SqlitePool {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn rows(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let pool = pool().await;

        let mut tx = begin_immediate(&pool).await.unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (1)")
            .execute(&mut *tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(rows(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back_and_connection_is_reusable() {
        let pool = pool().await;

        {
            let mut tx = begin_immediate(&pool).await.unwrap();
            sqlx::query("INSERT INTO t (v) VALUES (1)")
                .execute(&mut *tx)
                .await
                .unwrap();
        }

        assert_eq!(rows(&pool).await, 0);

        let tx = begin_immediate(&pool).await.unwrap();
        tx.commit().await.unwrap();
    }
}
