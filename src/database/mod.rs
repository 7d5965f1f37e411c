// 数据库模块
// 连接池初始化、迁移和实体存储

pub mod store;

pub use store::{Entity, EntityStore, PgStore, StoreError, StoreResult};

use std::time::Duration;

use sqlx::Executor;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// 最大连接尝试次数
const MAX_CONNECT_ATTEMPTS: u32 = 5;

/// 两次连接尝试之间的等待时间
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// 建立连接池，失败时按固定间隔重试
pub async fn connect_with_retry(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(max_connections)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET application_name = 'portfolio_backend';")
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await;

        match result {
            Ok(pool) => {
                tracing::info!("Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < MAX_CONNECT_ATTEMPTS => {
                tracing::warn!(
                    attempt,
                    max_attempts = MAX_CONNECT_ATTEMPTS,
                    error = %e,
                    "Failed to connect to database"
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// 执行内嵌的数据库迁移
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
