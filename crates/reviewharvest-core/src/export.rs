use csv::{QuoteStyle, Terminator, WriterBuilder};
use reviewharvest_models::ReviewCollection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("separator {0:?} must be a single ASCII character")]
    InvalidSeparator(char),

    #[error("output path {} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Destination actually written for a requested path: spaces become underscores.
///
/// Paths that are not valid UTF-8 are refused rather than rewritten lossily.
pub fn output_path(filepath: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let filepath = filepath.as_ref();
    let text = filepath
        .to_str()
        .ok_or_else(|| ExportError::NonUtf8Path(filepath.to_path_buf()))?;
    Ok(PathBuf::from(text.replace(' ', "_")))
}

/// Whole ratings keep one decimal (`8.0`), others are written unrounded
fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{:.1}", rating)
    } else {
        rating.to_string()
    }
}

/// Write one `rating<separator>title body` line per review, overwriting the file.
///
/// No header, no quoting. A separator or newline inside review text is written
/// as-is. Line order follows the collection's iteration order.
pub fn write_reviews(
    reviews: &ReviewCollection,
    filepath: impl AsRef<Path>,
    separator: char,
) -> Result<PathBuf, ExportError> {
    let path = output_path(filepath)?;
    let result = write_to(reviews, &path, separator);
    match &result {
        Ok(()) => info!(path = %path.display(), count = reviews.len(), "Wrote reviews"),
        Err(e) => error!(path = %path.display(), error = %e, "Failed to write reviews"),
    }
    result.map(|()| path)
}

fn write_to(reviews: &ReviewCollection, path: &Path, separator: char) -> Result<(), ExportError> {
    if !separator.is_ascii() {
        return Err(ExportError::InvalidSeparator(separator));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .delimiter(separator as u8)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(csv_err)?;

    for record in reviews.records() {
        let rating = format_rating(record.rating);
        writer
            .write_record([rating.as_str(), record.composite_text().as_str()])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewharvest_models::ReviewRecord;
    use tempfile::TempDir;

    fn collection(n: usize) -> ReviewCollection {
        (0..n)
            .map(|i| ReviewRecord::new(format!("Title {}", i), format!("Body text {}", i), (i % 10 + 1) as f64))
            .collect()
    }

    #[test]
    fn test_output_path_replaces_spaces() {
        assert_eq!(
            output_path("/tmp/my reviews/the matrix.csv").unwrap(),
            PathBuf::from("/tmp/my_reviews/the_matrix.csv")
        );
        assert_eq!(output_path("plain.csv").unwrap(), PathBuf::from("plain.csv"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let requested = dir.path().join(OsStr::from_bytes(b"bad\xff name.csv"));

        assert!(matches!(output_path(&requested), Err(ExportError::NonUtf8Path(_))));
        let result = write_reviews(&collection(1), &requested, '~');
        assert!(matches!(result, Err(ExportError::NonUtf8Path(p)) if p == requested));
    }

    #[test]
    fn test_round_trip_line_format() {
        let dir = TempDir::new().unwrap();
        let reviews = collection(12);

        let written = write_reviews(&reviews, dir.path().join("out.csv"), '~').unwrap();
        let content = std::fs::read_to_string(&written).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 12);
        for line in &lines {
            let (rating, text) = line.split_once('~').expect("two fields");
            assert!(rating.parse::<f64>().is_ok());
            assert!(text.starts_with("Title "));
        }
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_rating_keeps_one_decimal() {
        let dir = TempDir::new().unwrap();
        let reviews: ReviewCollection = vec![ReviewRecord::new("Solid", "Good pacing", 8.0)].into_iter().collect();

        let written = write_reviews(&reviews, dir.path().join("one.csv"), '~').unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "8.0~Solid Good pacing\n");
    }

    #[test]
    fn test_fractional_rating_is_not_rounded() {
        let dir = TempDir::new().unwrap();
        let reviews: ReviewCollection = vec![ReviewRecord::new("Odd", "scale", 7.25)].into_iter().collect();

        let written = write_reviews(&reviews, dir.path().join("frac.csv"), '~').unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "7.25~Odd scale\n");
    }

    #[test]
    fn test_path_with_spaces_is_substituted() {
        let dir = TempDir::new().unwrap();
        let requested = dir.path().join("rambo reviews.csv");

        let written = write_reviews(&collection(2), &requested, ';').unwrap();

        assert_eq!(written, dir.path().join("rambo_reviews.csv"));
        assert!(written.exists());
        assert!(!requested.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        write_reviews(&collection(1), &path, '~').unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_separator_in_text_is_not_escaped() {
        let dir = TempDir::new().unwrap();
        let reviews: ReviewCollection = vec![ReviewRecord::new("A~B", "C", 5.0)].into_iter().collect();

        let written = write_reviews(&reviews, dir.path().join("raw.csv"), '~').unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "5.0~A~B C\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let written = write_reviews(&collection(1), dir.path().join("a").join("b.csv"), '~').unwrap();
        assert!(written.exists());
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let dir = TempDir::new().unwrap();
        let result = write_reviews(&collection(1), dir.path().join("x.csv"), '§');
        assert!(matches!(result, Err(ExportError::InvalidSeparator('§'))));
    }

    #[test]
    fn test_directory_as_target_fails() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();

        let result = write_reviews(&collection(1), &target, '~');
        assert!(matches!(result, Err(ExportError::Csv { .. } | ExportError::Io { .. })));
        assert!(target.is_dir());
    }

    #[test]
    fn test_empty_collection_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let written = write_reviews(&ReviewCollection::default(), dir.path().join("empty.csv"), '~').unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "");
    }
}
