//! Persistence layer backed by SQLite

mod database;
mod models;

pub use database::Database;
pub use models::{ParseQuarterError, Quarter, Report, ReportMeta, Summary};
