//! # cqs-catalog: Catalog Importer
//!
//! Turns an ordered sequence of tabular records into catalog [`Question`]s and
//! merge-upserts them into a [`CatalogRepository`].
//!
//! ## Import Contract
//!
//! - Records with a blank `Question_ID` are skipped silently.
//! - A question id not yet in the catalog is inserted; an existing one is
//!   overwritten in full.
//! - The whole batch is applied atomically, after every record is mapped.
//! - Re-importing unchanged input yields `inserted == 0` and
//!   `updated == <row count>`.
//! - A missing source file is [`ImportError::SourceNotFound`], never a
//!   generic failure.
//!
//! [`Question`]: cqs_core::Question
//! [`CatalogRepository`]: cqs_core::CatalogRepository

pub mod importer;
pub mod record;
pub mod source;

pub use importer::{import_csv, ImportError, ImportStats, Importer};
pub use record::CatalogRecord;
pub use source::{read_csv, read_csv_from};
