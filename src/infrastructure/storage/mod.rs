pub mod cache;

pub use cache::{CacheClearHandle, CompanyCache};
