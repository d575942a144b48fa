pub mod bump;
pub mod report;
pub mod store;
