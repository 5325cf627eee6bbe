mod data_file;
mod model;
mod store;

pub use data_file::DataFile;
pub use model::{CompanyDraft, CompanyRecord};
pub use store::{CompanyStore, StoreError};
