pub mod database;
pub mod email;
pub mod realtime;
pub mod redis;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
