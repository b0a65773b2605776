use diesel_async::pooled_connection::bb8::Pool as AsyncPool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use std::fmt;

pub mod friendship;
pub mod profile;

pub type DbAsyncPool = AsyncPool<AsyncPgConnection>;
pub type DbAsyncConnection =
    bb8::PooledConnection<'static, AsyncDieselConnectionManager<AsyncPgConnection>>;

pub async fn create_db_async_pool(database_uri: &str, max_db_connections: u32) -> DbAsyncPool {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_uri);
    AsyncPool::builder()
        .max_size(max_db_connections)
        .build(config)
        .await
        .expect("Failed to create async DB pool")
}

#[derive(Debug)]
pub enum DaoError {
    DbAsyncPoolFailure(String),
    QueryFailure(diesel::result::Error),
    // Rejected before any storage call (e.g. a profile paired with itself)
    InvalidPair(&'static str),
}

impl std::error::Error for DaoError {}

impl fmt::Display for DaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoError::DbAsyncPoolFailure(e) => {
                write!(f, "DaoError: Failed to obtain async DB connection: {e}")
            }
            DaoError::QueryFailure(e) => {
                write!(f, "DaoError: Query failed: {e}")
            }
            DaoError::InvalidPair(msg) => {
                write!(f, "DaoError: Invalid pair: {msg}")
            }
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<bb8::RunError<E>> for DaoError {
    fn from(error: bb8::RunError<E>) -> Self {
        DaoError::DbAsyncPoolFailure(error.to_string())
    }
}

impl From<diesel::result::Error> for DaoError {
    fn from(error: diesel::result::Error) -> Self {
        DaoError::QueryFailure(error)
    }
}
