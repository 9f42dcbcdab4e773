//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] is the raw key-value store (Redis or an in-process
//! LRU). [`EntityCache`] and [`ListCache`] put read-through semantics on
//! top of it for single entities and materialized views.

mod cache_interface;
pub mod cache_keys;
mod entity_cache;
mod list_cache;
mod memory_cache;
mod policy;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::EntityKind;
pub use entity_cache::EntityCache;
pub use list_cache::{CachedList, ListCache, View};
pub use memory_cache::MemoryCacheService;
pub use policy::CachePolicy;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
