// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::error::LoadError;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Blank lines are skipped.
/// A quote only opens a quoted field at the start of a field; anywhere else
/// it is literal text. Fails only on an unterminated quoted field.
pub fn parse_rows(text: &str, sep: char) -> Result<Vec<Vec<String>>, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else if field.is_empty() {
                    in_quotes = true;
                    quote_line = line;
                } else {
                    field.push('"');
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                line += 1;
                row.push(take(&mut field));
                push_row(&mut rows, &mut row);
            }
            _ => {
                if ch == '\n' { line += 1; }
                field.push(ch);
            }
        }
    }

    if in_quotes {
        return Err(LoadError::Decode(format!(
            "unterminated quoted field starting on line {}", quote_line
        )));
    }

    // Trailing row without a final newline.
    row.push(field);
    push_row(&mut rows, &mut row);

    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let blank = row.is_empty() || (row.len() == 1 && row[0].trim().is_empty());
    if blank {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

/* ---------------- Header-keyed access ---------------- */

/// Decoded file: a header row plus data rows of the same width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Decode text with the first non-blank row as header.
    /// A data row whose width differs from the header is a decode error.
    pub fn parse(text: &str, sep: char) -> Result<Self, LoadError> {
        let mut rows = parse_rows(text, sep)?;
        if rows.is_empty() {
            return Ok(Self::default());
        }
        let headers: Vec<String> = rows.remove(0).into_iter().map(|h| s!(h.trim())).collect();

        for (i, r) in rows.iter().enumerate() {
            if r.len() != headers.len() {
                return Err(LoadError::Decode(format!(
                    "row {} has {} fields, header has {}", i + 1, r.len(), headers.len()
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record { table: self, cells })
    }

    pub fn row_count(&self) -> usize { self.rows.len() }
}

/// One data row, looked up by column header.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// `None` when the column is absent from the header.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let ix = self.table.column(column)?;
        self.cells.get(ix).map(|s| s.as_str())
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

pub fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
