//! Admin backend that joins investment records with company metadata and
//! renders pipe-delimited holdings reports.
//!
//! Company lookups go through a shared [`CompanyCache`] that is cleared on a
//! fixed interval; failed lookups degrade to an "Unknown Holding" placeholder.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

pub use application::collect::collect_unique_company_ids;
pub use application::report::{
    export_report, format_value, generate_report, render_report, REPORT_HEADER,
};
pub use application::resolver::CompanyResolver;
pub use domain::error::AdminError;
pub use domain::model::{CompanyRecord, Holding, Investment, UNKNOWN_HOLDING_NAME};
pub use domain::traits::Fetcher;
pub use infrastructure::config::Config;
pub use infrastructure::storage::{CacheClearHandle, CompanyCache};
pub use state::AppState;
