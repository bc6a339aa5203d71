//! Reading and writing xtsv: one header row, one token per row, tab separated
//! columns, sentences separated by blank lines.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use anyhow::Context;

const COLUMN_SEPARATOR: char = '\t';

/// Rows of one sentence as they came in, with the counters the rest of the
/// pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence {
    /// 0-based, counts non-empty sentences only
    pub nr: usize,
    /// 1-based position of the first row among all token rows of the input
    pub first_abs_index: usize,
    pub rows: Vec<Vec<String>>,
    /// First row that was not valid UTF-8; its text was decoded lossily
    pub undecodable: Option<Undecodable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undecodable {
    /// 1-based line number in the input, header included
    pub line: usize,
    pub abs_index: usize,
}

/// Splits an xtsv stream into sentences.
///
/// Runs of blank lines count as a single boundary, so no empty sentences
/// come out of it. A line that is not valid UTF-8 only spoils its own
/// sentence, see [`RawSentence::undecodable`].
pub struct XtsvReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_nr: usize,
    header: Vec<String>,
    next_nr: usize,
    next_abs_index: usize,
}

impl<R: BufRead> XtsvReader<R> {
    /// Consumes the header row.
    pub fn new(reader: R) -> anyhow::Result<Self> {
        let mut xtsv = Self {
            reader,
            buf: Vec::new(),
            line_nr: 0,
            header: Vec::new(),
            next_nr: 0,
            next_abs_index: 1,
        };
        let (header, valid) = xtsv
            .read_line()
            .context("Failed to read the header row")?
            .context("Input is empty, expected a header row")?;
        if !valid {
            anyhow::bail!("Header row is not valid UTF-8");
        }
        xtsv.header = split_row(&header);
        Ok(xtsv)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Next line without its line ending, and whether it decoded cleanly.
    fn read_line(&mut self) -> io::Result<Option<(String, bool)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_nr += 1;

        let bytes = self.buf.as_slice();
        let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let line = String::from_utf8_lossy(bytes);
        let valid = matches!(line, Cow::Borrowed(_));
        Ok(Some((line.into_owned(), valid)))
    }
}

impl<R: BufRead> Iterator for XtsvReader<R> {
    type Item = io::Result<RawSentence>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = Vec::new();
        let mut undecodable = None;
        loop {
            let (line, valid) = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => return Some(Err(e)),
            };
            if line.trim().is_empty() {
                if rows.is_empty() {
                    continue;
                }
                break;
            }
            if !valid && undecodable.is_none() {
                log::debug!("Line {} is not valid UTF-8", self.line_nr);
                undecodable = Some(Undecodable {
                    line: self.line_nr,
                    abs_index: self.next_abs_index + rows.len(),
                });
            }
            rows.push(split_row(&line));
        }

        if rows.is_empty() {
            return None;
        }

        let sentence = RawSentence {
            nr: self.next_nr,
            first_abs_index: self.next_abs_index,
            rows,
            undecodable,
        };
        self.next_nr += 1;
        self.next_abs_index += sentence.rows.len();
        Some(Ok(sentence))
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(COLUMN_SEPARATOR).map(str::to_string).collect()
}

pub struct XtsvWriter<W> {
    writer: W,
}

impl<W: Write> XtsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self, columns: &[String]) -> io::Result<()> {
        self.write_row(columns)
    }

    /// Writes the rows followed by the blank separator line.
    pub fn write_sentence<Row: AsRef<[String]>>(&mut self, rows: &[Row]) -> io::Result<()> {
        for row in rows {
            self.write_row(row.as_ref())?;
        }
        writeln!(self.writer)
    }

    fn write_row(&mut self, fields: &[String]) -> io::Result<()> {
        writeln!(self.writer, "{}", fields.join("\t"))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
