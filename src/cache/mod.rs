// 缓存模块
// 缓存键、缓存存储和读穿透解析器

pub mod errors;
pub mod keys;
pub mod resolver;
pub mod store;

pub use errors::{CacheError, CacheResult};
pub use keys::derive_key;
pub use resolver::{
    Cacheable, NotFoundKind, ReadThroughResolver, ResolveError, Resolution, Resolved,
};
pub use store::{CacheStore, RedisCache};
