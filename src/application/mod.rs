pub mod collect;
pub mod investments;
pub mod report;
pub mod resolver;
