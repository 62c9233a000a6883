//! tagseq CLI: load a delimited file, re-key it by a column and summarize.

use clap::{Parser, Subcommand, ValueEnum};
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tagseq_core::config::{parse_delimiter, EngineConfig};
use tagseq_core::{materialize, rows, Cursor, Frame, RangeFrame};
use tagseq_ops::{retag_by, CursorExt};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagseq")]
#[command(about = "Group and summarize delimited text with sorted-merge operators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-key statistics of a numeric column
    GroupStats {
        /// Path to the input file
        #[arg(short, long)]
        input: PathBuf,

        /// Key column (name, or zero-based index)
        #[arg(short, long)]
        key: String,

        /// Value column (name, or zero-based index)
        #[arg(short, long)]
        value: String,

        #[arg(long, value_enum, default_value_t = Stat::Mean)]
        stat: Stat,

        /// Field delimiter (overrides config)
        #[arg(long)]
        delimiter: Option<String>,

        /// JSON engine config (overrides environment)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the first rows of a file, tagged by position
    Head {
        /// Path to the input file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,

        /// Field delimiter (overrides config)
        #[arg(long)]
        delimiter: Option<String>,

        /// JSON engine config (overrides environment)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stat {
    Mean,
    Sum,
    Max,
    Min,
    Count,
    Std,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::GroupStats {
            input,
            key,
            value,
            stat,
            delimiter,
            config,
        } => load_config(config.as_deref(), delimiter.as_deref())
            .and_then(|cfg| group_stats(&input, &key, &value, stat, &cfg))
            .map(|out| print!("{out}")),
        Commands::Head {
            input,
            rows,
            delimiter,
            config,
        } => load_config(config.as_deref(), delimiter.as_deref())
            .and_then(|cfg| head(&input, rows, &cfg))
            .map(|out| print!("{out}")),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Environment first, then the config file, then command-line flags.
fn load_config(
    path: Option<&Path>,
    delimiter: Option<&str>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut cfg = EngineConfig::from_env();
    if let Some(p) = path {
        cfg = cfg.overlay_json(&fs::read_to_string(p)?)?;
    }
    if let Some(d) = delimiter {
        cfg.tsv.delimiter = parse_delimiter(d)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn group_stats(
    input: &Path,
    key: &str,
    value: &str,
    stat: Stat,
    cfg: &EngineConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let header = tagseq_io::read_header(input, &cfg.tsv)?;
    let key_col = resolve_column(header.as_ref(), key)?;
    let value_col = resolve_column(header.as_ref(), value)?;

    let records = tagseq_io::read_tsv_records(input, &cfg.tsv)?;
    tracing::info!(rows = records.len(), key_col, value_col, "loaded");

    let pairs = records
        .values()
        .iter()
        .enumerate()
        .map(|(row, rec)| parse_row(row, rec, key_col, value_col))
        .collect::<Result<Vec<_>, _>>()?;
    let keyed = retag_by(&RangeFrame::from_values(pairs), |_, (k, _)| k.clone())?;
    let by_key = keyed.cursor().map_values(|_, (_, v)| *v);

    let out = summarize(by_key, stat);
    tracing::info!(groups = out.len(), ?stat, "grouped");
    Ok(out.to_string())
}

fn summarize<C>(by_key: C, stat: Stat) -> Frame<String, f64>
where
    C: Cursor<Tag = String, Value = f64>,
{
    match stat {
        Stat::Mean => by_key.reduce_mean().materialize(),
        Stat::Sum => by_key.reduce_sum().materialize(),
        Stat::Max => by_key.reduce_max().materialize(),
        Stat::Min => by_key.reduce_min().materialize(),
        Stat::Count => materialize(by_key.reduce_count().map_values(|_, n| *n as f64)),
        Stat::Std => materialize(tagseq_ops::reduce::std_dev(by_key)),
    }
}

fn head(input: &Path, n: usize, cfg: &EngineConfig) -> Result<String, Box<dyn std::error::Error>> {
    let records = tagseq_io::read_tsv_records(input, &cfg.tsv)?;
    let delim = char::from(cfg.tsv.delimiter).to_string();

    let mut out = String::new();
    for (row, rec) in rows(&records).take(n) {
        let fields = rec.iter().collect::<Vec<_>>().join(delim.as_str());
        out.push_str(&format!("{}\t{}\n", row, fields));
    }
    Ok(out)
}

fn resolve_column(header: Option<&StringRecord>, col: &str) -> Result<usize, String> {
    if let Some(i) = header.and_then(|h| h.iter().position(|name| name == col)) {
        return Ok(i);
    }
    col.parse::<usize>()
        .map_err(|_| format!("unknown column '{}'", col))
}

fn parse_row(
    row: usize,
    rec: &StringRecord,
    key_col: usize,
    value_col: usize,
) -> Result<(String, f64), String> {
    let key = rec
        .get(key_col)
        .ok_or_else(|| format!("row {}: no field {}", row, key_col))?;
    let raw = rec
        .get(value_col)
        .ok_or_else(|| format!("row {}: no field {}", row, value_col))?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("row {}: '{}' is not a number: {}", row, raw, e))?;
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sales_file() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "store\titem\tamount").unwrap();
        writeln!(f, "south\tpen\t4").unwrap();
        writeln!(f, "north\tcup\t1").unwrap();
        writeln!(f, "south\tcup\t8").unwrap();
        writeln!(f, "north\tpen\t3").unwrap();
        f
    }

    #[test]
    fn group_stats_by_name_and_index() {
        let file = sales_file();
        let path = file.path();
        let cfg = EngineConfig::default();

        let mean = group_stats(path, "store", "amount", Stat::Mean, &cfg).unwrap();
        assert_eq!(mean, "north\t2\nsouth\t6\n");

        let count = group_stats(path, "0", "2", Stat::Count, &cfg).unwrap();
        assert_eq!(count, "north\t2\nsouth\t2\n");

        let std = group_stats(path, "store", "amount", Stat::Std, &cfg).unwrap();
        assert_eq!(std, "north\t1\nsouth\t2\n");
    }

    #[test]
    fn head_keeps_leading_rows() {
        let file = sales_file();
        let out = head(file.path(), 2, &EngineConfig::default()).unwrap();
        assert_eq!(out, "0\tsouth\tpen\t4\n1\tnorth\tcup\t1\n");

        let all = head(file.path(), 100, &EngineConfig::default()).unwrap();
        assert_eq!(all.lines().count(), 4);
        assert!(head(file.path(), 0, &EngineConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn unknown_column_is_reported() {
        assert!(resolve_column(None, "store").is_err());
        let header = StringRecord::from(vec!["a", "b"]);
        assert_eq!(resolve_column(Some(&header), "b"), Ok(1));
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let rec = StringRecord::from(vec!["k", "x"]);
        assert!(parse_row(0, &rec, 0, 1).is_err());
    }

    #[test]
    fn config_file_overlays_and_flags_win() {
        let mut doc = tempfile::NamedTempFile::new().unwrap();
        write!(doc, r#"{{"max_reserve_rows": 7, "tsv": {{"delimiter": 59}}}}"#).unwrap();

        let cfg = load_config(Some(doc.path()), None).unwrap();
        assert_eq!(cfg.max_reserve_rows, 7);
        assert_eq!(cfg.tsv.delimiter, b';');
        assert!(cfg.tsv.has_headers);

        let cfg = load_config(Some(doc.path()), Some("|")).unwrap();
        assert_eq!(cfg.tsv.delimiter, b'|');
        assert_eq!(cfg.max_reserve_rows, 7);
    }

    #[test]
    fn delimiter_flag_overrides_config() {
        let cfg = load_config(None, Some(",")).unwrap();
        assert_eq!(cfg.tsv.delimiter, b',');
    }
}
