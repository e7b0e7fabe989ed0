//! Timing-log parsing
//!
//! A timing log holds one integer cycle count per line, appended once per
//! kernel execution. Parsing is strict: any line that does not parse as an
//! `i64` fails the whole read.

use crate::StatsError;
use std::path::Path;

/// Read every sample from a timing log.
///
/// Returns an error if the file cannot be read, contains a non-integer
/// line, or holds no samples at all.
pub fn read_samples(path: &Path) -> Result<Vec<i64>, StatsError> {
    let content = std::fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(StatsError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                content: line.to_string(),
            });
        }
        let value: i64 = trimmed.parse().map_err(|_| StatsError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            content: line.to_string(),
        })?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(StatsError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_one_sample_per_line() {
        let log = write_log("123\n456\n789\n");
        let samples = read_samples(log.path()).unwrap();
        assert_eq!(samples, vec![123, 456, 789]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let log = write_log("  42 \n7\n");
        let samples = read_samples(log.path()).unwrap();
        assert_eq!(samples, vec![42, 7]);
    }

    #[test]
    fn empty_file_is_an_error() {
        let log = write_log("");
        assert!(matches!(
            read_samples(log.path()),
            Err(StatsError::Empty { .. })
        ));
    }

    #[test]
    fn non_integer_line_is_an_error() {
        let log = write_log("100\nnot-a-number\n200\n");
        match read_samples(log.path()) {
            Err(StatsError::Parse { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "not-a-number");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.time");
        assert!(matches!(
            read_samples(&missing),
            Err(StatsError::Io { .. })
        ));
    }
}
