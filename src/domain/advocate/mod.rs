//! Advocate aggregate

pub mod model;
pub mod repository;

pub use model::Advocate;
pub use repository::AdvocateRepository;
