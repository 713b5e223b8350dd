use std::fmt::Debug;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::errors::*;

/// Reads a tab-separated table, skipping blank lines and `#` comments.
pub fn read<P: AsRef<Path> + Debug>(path: &P) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).chain_err(|| format!("failed to open table {:?}", path))?;
    let reader = BufReader::new(file);

    let mut table: Vec<Vec<String>> = Vec::new();
    for line in reader.lines() {
        let line = line.chain_err(|| "error reading line from table")?;
        let trimmed = line.trim_end();
        if !trimmed.trim().is_empty() && !trimmed.starts_with('#') {
            table.push(trimmed.split('\t').map(|v| v.trim().to_string()).collect());
        }
    }

    Ok(table)
}

/// Parses column `idx` of a table row; `line` is used for error messages.
pub fn column<T: FromStr>(row: &[String], idx: usize, line: usize) -> Result<T> {
    match row.get(idx) {
        Some(value) => value.parse::<T>().map_err(|_| {
            Error::from(format!(
                "invalid value {:?} in column {} of row {}",
                value,
                idx + 1,
                line
            ))
        }),
        None => Err(format!("row {} has no column {}", line, idx + 1).into()),
    }
}
