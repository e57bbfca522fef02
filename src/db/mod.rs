pub mod postgres;
pub mod redis;
pub mod templates;

pub use postgres::create_pool;
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use redis::CacheWriterHandle;
pub use templates::PgTemplateStore;
pub use templates::TemplateStore;
