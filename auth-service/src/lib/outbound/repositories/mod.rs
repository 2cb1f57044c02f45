mod credentials;
pub mod memory;
pub mod musician;
pub mod user;

pub use memory::InMemoryPrincipalRepository;
pub use musician::PostgresMusicianRepository;
pub use user::PostgresUserRepository;
