pub mod error;
pub mod models;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use postgres::PgStore;
pub use store::Store;

#[cfg(test)]
pub use store::MockStore;
