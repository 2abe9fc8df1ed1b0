pub mod catalog;
pub mod composer;
pub mod directory;
pub mod reports;
pub mod stock_ledger;

pub use catalog::CatalogService;
pub use composer::TransactionComposerService;
pub use directory::PartyDirectoryService;
pub use reports::ReportService;
