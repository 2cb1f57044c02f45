pub mod memory;
pub mod redis;

pub use self::memory::InMemorySessionStore;
pub use self::redis::RedisSessionStore;
