//! CSV serialization of quotes
//!
//! Each quote becomes one row. The tag list is stored in a single column as
//! a JSON array of strings (`["love","life"]`, `[]` when there are no tags),
//! which keeps any tag content unambiguous and parses back losslessly.

use crate::crawler::Quote;
use crate::output::{OutputError, OutputResult};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Column names of the output file, in order
pub const CSV_HEADER: [&str; 3] = ["text", "author", "tags"];

/// Writes quotes to a CSV file, creating parent directories as needed
///
/// An existing file at `output_path` is replaced.
///
/// # Arguments
///
/// * `quotes` - Records to write, in order
/// * `output_path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - The header and every record were written and flushed
/// * `Err(OutputError)` - Directory creation, file creation or encoding failed
pub fn write_quotes(quotes: &[Quote], output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(output_path)?;
    write_quotes_to(quotes, file)
}

/// Writes quotes as CSV to any writer
pub fn write_quotes_to<W: Write>(quotes: &[Quote], writer: W) -> OutputResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for quote in quotes {
        let tags = serde_json::to_string(&quote.tags)?;
        wtr.write_record([quote.text.as_str(), quote.author.as_str(), tags.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reads quotes back from a CSV file written by [`write_quotes`]
///
/// # Returns
///
/// * `Ok(Vec<Quote>)` - Records in file order
/// * `Err(OutputError)` - The file is unreadable or not in the expected layout
pub fn read_quotes(path: &Path) -> OutputResult<Vec<Quote>> {
    let file = fs::File::open(path)?;
    read_quotes_from(file)
}

/// Reads quotes from any reader producing the CSV layout of [`write_quotes_to`]
pub fn read_quotes_from<R: Read>(reader: R) -> OutputResult<Vec<Quote>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(OutputError::Format {
            row: 0,
            message: format!("unexpected header {:?}", headers),
        });
    }

    let mut quotes = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let row = index + 1;

        let [text, author, tags] = [0, 1, 2].map(|i| record.get(i));
        let (Some(text), Some(author), Some(tags)) = (text, author, tags) else {
            return Err(OutputError::Format {
                row,
                message: format!("expected 3 fields, found {}", record.len()),
            });
        };

        let tags: Vec<String> = serde_json::from_str(tags).map_err(|e| OutputError::Format {
            row,
            message: format!("invalid tags column: {}", e),
        })?;

        quotes.push(Quote {
            text: text.to_string(),
            author: author.to_string(),
            tags,
        });
    }

    Ok(quotes)
}
