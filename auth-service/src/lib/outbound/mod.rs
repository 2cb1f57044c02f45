pub mod repositories;
pub mod session_store;
