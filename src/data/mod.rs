//! Data module - CSV loading and typed records

mod loader;
mod records;

pub use loader::{DataLoader, LoaderError, MeteoDataset};
pub use records::{DetailRecord, MetadataRecord, StationRecord};
