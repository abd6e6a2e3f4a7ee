//! Line-oriented dataset loading.
//!
//! A dataset is a text file with one subject per line: two whitespace
//! separated real numbers, height then weight. Blank lines are skipped;
//! anything else malformed is fatal with a line-numbered error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One dataset row: a measured subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subject {
    pub height: f64,
    pub weight: f64,
}

/// Parsed dataset with per-quantity sample accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub subjects: Vec<Subject>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.subjects.iter().map(|s| s.height).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.subjects.iter().map(|s| s.weight).collect()
    }
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    /// Line (1-based) that is not two parseable numbers.
    Malformed {
        line: usize,
        content: String,
    },
    /// File contained no subject rows at all.
    Empty,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "{e}"),
            DatasetError::Malformed { line, content } => {
                write!(f, "line {line} is not a \"height weight\" pair: {content:?}")
            }
            DatasetError::Empty => write!(f, "dataset contains no rows"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::Io(e)
    }
}

/// Parse a dataset from any buffered reader.
pub fn parse<R: BufRead>(reader: R) -> Result<Dataset, DatasetError> {
    let mut subjects = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let malformed = || DatasetError::Malformed {
            line: idx + 1,
            content: trimmed.to_string(),
        };

        let mut fields = trimmed.split_whitespace();
        let (height, weight) = match (fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(w), None) => (
                h.parse::<f64>().map_err(|_| malformed())?,
                w.parse::<f64>().map_err(|_| malformed())?,
            ),
            _ => return Err(malformed()),
        };

        subjects.push(Subject { height, weight });
    }

    if subjects.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(Dataset { subjects })
}

/// Load a dataset from a file path.
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    parse(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    #[test]
    fn parses_pairs_and_skips_blank_lines() {
        let input = "150.5 60.2\n\n  \n151.0 62.8\n";
        let dataset = parse(Cursor::new(input)).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.heights(), vec![150.5, 151.0]);
        assert_eq!(dataset.weights(), vec![60.2, 62.8]);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let input = "150.5 60.2\n151.0 sixty\n";
        match parse(Cursor::new(input)).unwrap_err() {
            DatasetError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn extra_fields_are_malformed() {
        let input = "150.5 60.2 1.0\n";
        assert!(matches!(
            parse(Cursor::new(input)).unwrap_err(),
            DatasetError::Malformed { line: 1, .. }
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            parse(Cursor::new("\n  \n")).unwrap_err(),
            DatasetError::Empty
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "160.0 70.0").unwrap();
        writeln!(file, "161.3 72.5").unwrap();
        let dataset = load(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load(Path::new("/nonexistent/data.txt")).unwrap_err(),
            DatasetError::Io(_)
        ));
    }
}
