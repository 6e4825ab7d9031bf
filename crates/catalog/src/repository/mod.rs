mod memory;
mod mongo;
mod postgres;
mod unavailable;

pub use self::memory::InMemoryCatalogStore;
pub use self::mongo::MongoCatalogStore;
pub use self::postgres::PostgresCatalogStore;
pub use self::unavailable::UnavailableCatalogStore;
