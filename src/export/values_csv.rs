//! CSV export of learned action values
//!
//! One row per stored state: the table it came from, the packed key, the
//! board as nine characters, and the nine action values.

use std::{fs::File, io::Write, path::Path};

use crate::{
    Error, Result,
    q_learning::{ValueStore, ValueTable},
    tictactoe::Cell,
    types::BOARD_CELLS,
};

/// Exporter for value-table CSV files
pub struct ValuesCsvExporter;

impl ValuesCsvExporter {
    /// Column names in output order
    pub fn header() -> Vec<String> {
        let mut header = vec!["table".to_string(), "key".to_string(), "board".to_string()];
        header.extend((0..BOARD_CELLS).map(|action| format!("a{action}")));
        header
    }

    /// Write every stored state of `store` as CSV, in ascending key order per
    /// table.
    pub fn write<W: Write>(store: &ValueStore, writer: W) -> Result<usize> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(Self::header())?;

        let mut rows = 0;
        for (name, table) in named_tables(store) {
            for record in Self::records(name, table) {
                csv.write_record(&record)?;
                rows += 1;
            }
        }
        csv.flush().map_err(|source| Error::Io {
            operation: "flush CSV output".to_string(),
            source,
        })?;
        Ok(rows)
    }

    /// Write the CSV to `path`, returning the number of data rows
    pub fn export_to_path(store: &ValueStore, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Self::write(store, file)
    }

    fn records<'a>(name: &'a str, table: &'a ValueTable) -> impl Iterator<Item = Vec<String>> + 'a {
        table.entries().into_iter().map(move |(key, values)| {
            let board: String = key.cells().iter().map(|&c: &Cell| c.to_char()).collect();
            let mut record = vec![name.to_string(), key.to_string(), board];
            record.extend(values.iter().map(|v| v.to_string()));
            record
        })
    }
}

fn named_tables(store: &ValueStore) -> Vec<(&'static str, &ValueTable)> {
    match store {
        ValueStore::Single(table) => vec![("single", table)],
        ValueStore::Double { first, second, .. } => vec![("first", first), ("second", second)],
    }
}
