//! Client Module
//!
//! The backing store contract and the read-through client layered on top of
//! the bounded cache.

mod backend;
mod read_through;
mod redis_backend;

pub use backend::{BackingStore, MemoryBackend};
pub use read_through::{ClientStats, ReadThroughClient};
pub use redis_backend::RedisBackend;
