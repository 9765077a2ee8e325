pub mod client;
pub mod error;
pub mod repository;
pub mod types;

pub use client::{id_equals_formula, AirtableClient};
pub use error::AirtableError;
pub use repository::AirtableStoreRepository;
pub use types::{Record, RecordList, StoreFields};
