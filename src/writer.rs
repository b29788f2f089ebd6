//! Buffered output sink for generated SQL scripts.

use crate::sql::{insert_statement, multi_row_insert, SqlValue};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const STMT_FLUSH_COUNT: usize = 100;

/// Rows written for one table, in emission order.
#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// Per-run statistics reported in the summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub tables: Vec<TableCount>,
    pub skipped_rows: usize,
}

impl RunStats {
    fn bump(&mut self, table: &str, rows: usize) {
        if let Some(entry) = self.tables.iter_mut().find(|t| t.table == table) {
            entry.rows += rows;
        } else {
            self.tables.push(TableCount {
                table: table.to_string(),
                rows,
            });
        }
    }

    pub fn rows_for(&self, table: &str) -> usize {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| t.rows)
            .unwrap_or(0)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Writes statements to a single sink, flushing every `STMT_FLUSH_COUNT`
/// statements, and counts rows per table so trailer comments and the run
/// summary always match what was actually written.
pub struct ScriptWriter {
    writer: BufWriter<Box<dyn Write>>,
    write_count: usize,
    stats: RunStats,
}

impl ScriptWriter {
    pub fn new(sink: Box<dyn Write>) -> Self {
        Self {
            writer: BufWriter::with_capacity(WRITER_BUFFER_SIZE, sink),
            write_count: 0,
            stats: RunStats::default(),
        }
    }

    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Write one single-row INSERT statement.
    pub fn write_insert(
        &mut self,
        table: &str,
        columns: &[&str],
        values: &[SqlValue],
    ) -> io::Result<()> {
        let stmt = insert_statement(table, columns, values);
        self.writer.write_all(stmt.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.stats.bump(table, 1);
        self.after_statement()
    }

    /// Write one multi-row INSERT statement covering `rows.len()` rows.
    pub fn write_rows(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let stmt = multi_row_insert(table, columns, rows);
        self.writer.write_all(stmt.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.stats.bump(table, rows.len());
        self.after_statement()
    }

    /// Write a `-- comment` line.
    pub fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(b"-- ")?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.after_statement()
    }

    /// Write a comment explaining a skipped row and count the skip.
    pub fn write_skip(&mut self, reason: &str) -> io::Result<()> {
        self.stats.skipped_rows += 1;
        self.write_comment(reason)
    }

    pub fn write_blank(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn rows_written(&self, table: &str) -> usize {
        self.stats.rows_for(table)
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn after_statement(&mut self) -> io::Result<()> {
        self.write_count += 1;
        if self.write_count >= STMT_FLUSH_COUNT {
            self.write_count = 0;
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Flush and return the run statistics.
    pub fn finish(mut self) -> io::Result<RunStats> {
        self.writer.flush()?;
        Ok(self.stats)
    }
}
