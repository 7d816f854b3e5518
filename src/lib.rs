pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod repository;
pub mod store;
pub mod types;

pub use catalog::{load_catalog, Catalog, CatalogSource};
pub use config::{load_config, Config};
pub use error::{Result, WorkforceError};
pub use filter::{filter_and_sort, FeaturedList, SortMode};
pub use repository::{MissionRepository, MissionStore};
pub use store::{RecordStore, StoreLocation};
pub use types::*;
