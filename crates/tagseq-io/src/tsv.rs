//! Tab-separated (or any single-byte delimited) record reader.
//!
//! Up to `header_lines` leading lines are skipped. With `has_headers` the first
//! of them names the columns, so records can deserialize into structs with
//! named fields; otherwise fields bind by position (tuples). Schema-less input is read as raw
//! `StringRecord`s through [`read_string_records`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use serde::de::DeserializeOwned;
use tagseq_core::config::TsvConfig;
use tagseq_core::RangeFrame;

use crate::error::Result;

/// Read every record of `path` into an implicit-index sequence.
pub fn read_tsv<T, P>(path: P, cfg: &TsvConfig) -> Result<RangeFrame<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("read_tsv", path = %path.display()).entered();

    let file = File::open(path)?;
    read_records(file, cfg)
}

/// Column names from the first line of `path`, or `None` when the config
/// says the input has no header.
pub fn read_header<P: AsRef<Path>>(path: P, cfg: &TsvConfig) -> Result<Option<StringRecord>> {
    if !cfg.has_headers || cfg.header_lines == 0 {
        return Ok(None);
    }
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(cfg.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(Some(rdr.headers()?.clone()))
}

/// Read every record from `reader` into an implicit-index sequence.
pub fn read_records<T, R>(reader: R, cfg: &TsvConfig) -> Result<RangeFrame<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = open_reader(reader, cfg)?;

    let mut values = Vec::new();
    for record in rdr.deserialize() {
        values.push(record?);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = values.len(), "records loaded");

    Ok(RangeFrame::from_values(values))
}

/// Read every record of `path` as raw fields, for input without a schema.
pub fn read_tsv_records<P: AsRef<Path>>(path: P, cfg: &TsvConfig) -> Result<RangeFrame<StringRecord>> {
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("read_tsv_records", path = %path.display()).entered();

    let file = File::open(path)?;
    read_string_records(file, cfg)
}

/// Read every record from `reader` as raw fields.
pub fn read_string_records<R: Read>(reader: R, cfg: &TsvConfig) -> Result<RangeFrame<StringRecord>> {
    let mut rdr = open_reader(reader, cfg)?;

    let mut values = Vec::new();
    for record in rdr.records() {
        values.push(record?);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = values.len(), "raw records loaded");

    Ok(RangeFrame::from_values(values))
}

/// Skip the leading lines and hand the rest to a csv reader. The column-name
/// line, if any, is put back in front so the reader sees it as its header.
fn open_reader<R: Read>(reader: R, cfg: &TsvConfig) -> Result<csv::Reader<impl Read>> {
    let mut input = BufReader::new(reader);

    let mut header = Vec::new();
    let mut skip = cfg.header_lines;
    if cfg.has_headers && skip > 0 {
        input.read_until(b'\n', &mut header)?;
        skip -= 1;
    }
    for _ in 0..skip {
        let mut line = Vec::new();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
    }

    Ok(csv::ReaderBuilder::new()
        .delimiter(cfg.delimiter)
        .has_headers(cfg.has_headers && !header.is_empty())
        .flexible(cfg.flexible)
        .from_reader(io::Cursor::new(header).chain(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Sale {
        store: String,
        amount: f64,
    }

    #[test]
    fn named_fields_from_header() {
        let text = "store\tamount\nnorth\t1.5\nsouth\t2\n";
        let df: RangeFrame<Sale> = read_records(text.as_bytes(), &TsvConfig::default()).unwrap();

        assert_eq!(df.len(), 2);
        assert_eq!(df.get(1).unwrap().1.store, "south");
        assert_eq!(df.get(1).unwrap().1.amount, 2.0);
    }

    #[test]
    fn positional_tuples_without_header() {
        let cfg = TsvConfig {
            header_lines: 0,
            has_headers: false,
            ..Default::default()
        };
        let df: RangeFrame<(String, i64)> = read_records("a\t1\nb\t2\n".as_bytes(), &cfg).unwrap();
        assert_eq!(df.values(), &vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn extra_header_lines_are_skipped() {
        let cfg = TsvConfig {
            header_lines: 3,
            ..Default::default()
        };
        let text = "store\tamount\n# generated\n# units: usd\nnorth\t4\n";
        let df: RangeFrame<Sale> = read_records(text.as_bytes(), &cfg).unwrap();
        assert_eq!(df.len(), 1);
        assert_eq!(df.value(0).unwrap().amount, 4.0);
    }

    #[test]
    fn string_records_and_custom_delimiter() {
        let cfg = TsvConfig {
            delimiter: b',',
            ..Default::default()
        };
        let df = read_string_records("k,v\nx,1\ny,2\n".as_bytes(), &cfg).unwrap();
        assert_eq!(df.len(), 2);
        assert_eq!(df.value(1).unwrap().get(0), Some("y"));
        assert_eq!(df.value(1).unwrap().get(1), Some("2"));
    }

    #[test]
    fn string_records_skip_extra_header_lines() {
        let cfg = TsvConfig {
            header_lines: 2,
            flexible: true,
            ..Default::default()
        };
        let text = "a\tb\tc\n# note\n1\t2\t3\n4\t5\n";
        let df = read_string_records(text.as_bytes(), &cfg).unwrap();

        assert_eq!(df.len(), 2);
        assert_eq!(df.value(0).unwrap().iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(df.value(1).unwrap().len(), 2);
    }

    #[test]
    fn string_records_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store\tamount").unwrap();
        writeln!(file, "east\t7").unwrap();

        let df = read_tsv_records(file.path(), &TsvConfig::default()).unwrap();
        assert_eq!(df.get(0).unwrap().0, 0);
        assert_eq!(df.value(0).unwrap().iter().collect::<Vec<_>>(), vec!["east", "7"]);
    }

    #[test]
    fn header_only_input_is_empty() {
        let df: RangeFrame<Sale> =
            read_records("store\tamount\n".as_bytes(), &TsvConfig::default()).unwrap();
        assert!(df.is_empty());

        let df: RangeFrame<Sale> = read_records("".as_bytes(), &TsvConfig::default()).unwrap();
        assert!(df.is_empty());
    }

    #[test]
    fn bad_field_is_a_csv_error() {
        let err = read_records::<Sale, _>("store\tamount\nnorth\tlots\n".as_bytes(), &TsvConfig::default())
            .unwrap_err();
        assert!(matches!(err, crate::Error::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_tsv::<Sale, _>("/nonexistent/tagseq/input.tsv", &TsvConfig::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn header_names_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store\tamount").unwrap();
        writeln!(file, "east\t7").unwrap();

        let header = read_header(file.path(), &TsvConfig::default()).unwrap().unwrap();
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["store", "amount"]);

        let cfg = TsvConfig {
            header_lines: 0,
            has_headers: false,
            ..Default::default()
        };
        assert!(read_header(file.path(), &cfg).unwrap().is_none());
    }

    #[test]
    fn read_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store\tamount").unwrap();
        writeln!(file, "east\t7").unwrap();

        let df: RangeFrame<Sale> = read_tsv(file.path(), &TsvConfig::default()).unwrap();
        assert_eq!(df.get(0).unwrap(), (0, &Sale { store: "east".into(), amount: 7.0 }));
    }
}
