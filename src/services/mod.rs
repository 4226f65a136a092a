pub mod catalog_service;
pub mod draft_service;
pub mod export_service;
pub mod usage_service;

pub use catalog_service::{CatalogData, CatalogService};
pub use draft_service::DraftStore;
pub use export_service::DocumentExporter;
pub use usage_service::UsageReporter;
