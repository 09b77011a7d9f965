use std::path::Path;

use log::warn;
use pv_core::{ReferenceValue, VerifyError};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use super::{corrupt_data, file_label};
use crate::flatten::{into_references, parse_cell};
use crate::{FormatLoader, LoadOptions};

/// Loads every user table of a SQLite database as
/// `{table}.{column}.row{n}` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteLoader;

impl FormatLoader for SqliteLoader {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["sqlite", "sqlite3", "db"]
    }

    fn load(&self, path: &Path, _options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| corrupt_data("store.sqlite_open", path, err))?;
        let tables = user_tables(&conn).map_err(|err| corrupt_data("store.sqlite_schema", path, err))?;

        let mut pairs = Vec::new();
        for table in tables {
            match table_values(&conn, &table) {
                Ok(values) => pairs.extend(values),
                Err(err) => warn!(
                    "skipping table {table} in {}: {err}",
                    path.display()
                ),
            }
        }
        Ok(into_references(pairs, &file_label(path)))
    }
}

fn user_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
    names.collect()
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn table_values(conn: &Connection, table: &str) -> rusqlite::Result<Vec<(String, f64)>> {
    let quoted = quote_ident(table);
    // WITHOUT ROWID tables have no rowid column.
    let mut stmt = match conn.prepare(&format!("SELECT * FROM {quoted} ORDER BY rowid")) {
        Ok(stmt) => stmt,
        Err(_) => conn.prepare(&format!("SELECT * FROM {quoted}"))?,
    };
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut rows = stmt.query([])?;
    let mut pairs = Vec::new();
    let mut row_idx = 0usize;
    while let Some(row) = rows.next()? {
        for (col_idx, column) in columns.iter().enumerate() {
            let value = match row.get_ref(col_idx)? {
                ValueRef::Integer(number) => Some(number as f64),
                ValueRef::Real(number) => Some(number).filter(|value| value.is_finite()),
                ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_cell),
                ValueRef::Null | ValueRef::Blob(_) => None,
            };
            if let Some(value) = value {
                pairs.push((format!("{table}.{column}.row{row_idx}"), value));
            }
        }
        row_idx += 1;
    }
    Ok(pairs)
}
