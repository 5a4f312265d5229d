//! Export functionality for learned values
//!
//! This module provides exporters for writing value tables in formats
//! suitable for external analysis.

pub mod values_csv;

pub use values_csv::ValuesCsvExporter;
