//! CSV parsing of labelled predictions.
//!
//! Every file starts with a header row, which is skipped. Each data row then
//! follows one of three fixed layouts:
//!
//! | Reader              | Column 0                  | Columns 1..          |
//! |---------------------|---------------------------|----------------------|
//! | [`read_multiclass`] | class label (`label_base`-based integer) | K class probabilities |
//! | [`read_binary`]     | `0` or `1`                | probability of class 1 |
//! | [`read_regression`] | actual value              | predicted value      |
//!
//! Any malformed row aborts the read with [`ModevalError::Ingestion`], naming
//! the file line and the raw row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};
use modeval_core::{Dataset, ModevalError, ProbVector, Result};

/// Read a multi-class prediction file with `n_classes` probability columns.
///
/// Labels in column 0 are shifted by `label_base` to become 0-based.
pub fn read_multiclass(
    path: impl AsRef<Path>,
    n_classes: usize,
    label_base: i64,
) -> Result<Dataset<usize, ProbVector>> {
    let path = path.as_ref();
    let data = multiclass_from_reader(open(path)?, n_classes, label_base)?;
    tracing::info!(
        path = %path.display(),
        rows = data.len(),
        n_classes,
        "read multi-class predictions"
    );
    Ok(data)
}

/// Read a binary prediction file: `label,probability`.
pub fn read_binary(path: impl AsRef<Path>) -> Result<Dataset<usize, f64>> {
    let path = path.as_ref();
    let data = binary_from_reader(open(path)?)?;
    tracing::info!(path = %path.display(), rows = data.len(), "read binary predictions");
    Ok(data)
}

/// Read a regression prediction file: `actual,predicted`.
pub fn read_regression(path: impl AsRef<Path>) -> Result<Dataset<f64, f64>> {
    let path = path.as_ref();
    let data = regression_from_reader(open(path)?)?;
    tracing::info!(path = %path.display(), rows = data.len(), "read regression predictions");
    Ok(data)
}

/// [`read_multiclass`] over any reader.
pub fn multiclass_from_reader<R: Read>(
    reader: R,
    n_classes: usize,
    label_base: i64,
) -> Result<Dataset<usize, ProbVector>> {
    // Label column plus one column per class.
    let width = n_classes
        .checked_add(1)
        .filter(|_| n_classes > 0)
        .ok_or_else(|| {
            ModevalError::InvalidInput(format!("unsupported number of classes: {n_classes}"))
        })?;
    let rows = parse_rows(reader, width, |row| {
        let raw_label = row.integer(0)?;
        let label = raw_label
            .checked_sub(label_base)
            .and_then(|l| usize::try_from(l).ok())
            .ok_or_else(|| {
                row.error(format!(
                    "class label {raw_label} is below the first class {label_base}"
                ))
            })?;
        let probs = (1..=n_classes)
            .map(|col| row.number(col))
            .collect::<Result<Vec<f64>>>()?;
        let probs = ProbVector::with_classes(probs, n_classes).map_err(|e| row.invalid(e))?;
        Ok((label, probs))
    })?;
    let (actual, predicted) = rows.into_iter().unzip();
    Dataset::new(actual, predicted)
}

/// [`read_binary`] over any reader.
pub fn binary_from_reader<R: Read>(reader: R) -> Result<Dataset<usize, f64>> {
    let rows = parse_rows(reader, 2, |row| {
        let label = row.integer(0)?;
        let label = usize::try_from(label)
            .map_err(|_| row.error(format!("label {label} is negative")))?;
        Ok((label, row.number(1)?))
    })?;
    let (actual, predicted) = rows.into_iter().unzip();
    Dataset::new(actual, predicted)
}

/// [`read_regression`] over any reader.
pub fn regression_from_reader<R: Read>(reader: R) -> Result<Dataset<f64, f64>> {
    let rows = parse_rows(reader, 2, |row| Ok((row.number(0)?, row.number(1)?)))?;
    let (actual, predicted) = rows.into_iter().unzip();
    Dataset::new(actual, predicted)
}

// ---------------------------------------------------------------------------
// Row plumbing
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        ModevalError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// One data row with enough context to build a diagnostic.
struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl Row<'_> {
    fn raw(&self) -> String {
        self.record.iter().collect::<Vec<_>>().join(",")
    }

    /// The row could not be parsed.
    fn error(&self, reason: impl Into<String>) -> ModevalError {
        ModevalError::Ingestion {
            line: self.line,
            raw: self.raw(),
            reason: reason.into(),
        }
    }

    /// The row parsed but its values are out of range. Stays a validation
    /// error, with the line and row attached.
    fn invalid(&self, err: ModevalError) -> ModevalError {
        let reason = match err {
            ModevalError::InvalidInput(reason) => reason,
            other => other.to_string(),
        };
        ModevalError::InvalidInput(format!(
            "line {}: {reason} (row: {:?})",
            self.line,
            self.raw()
        ))
    }

    fn field(&self, col: usize) -> Result<&str> {
        self.record
            .get(col)
            .ok_or_else(|| self.error(format!("missing column {}", col + 1)))
    }

    fn integer(&self, col: usize) -> Result<i64> {
        let field = self.field(col)?;
        field.parse().map_err(|_| {
            self.error(format!("column {} is not an integer: {field:?}", col + 1))
        })
    }

    fn number(&self, col: usize) -> Result<f64> {
        let field = self.field(col)?;
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.error(format!(
                "column {} is not a finite number: {field:?}",
                col + 1
            ))),
        }
    }
}

/// Parse every data row after the header, requiring exactly `width` columns.
fn parse_rows<R, T, F>(reader: R, width: usize, mut parse: F) -> Result<Vec<T>>
where
    R: Read,
    F: FnMut(&Row<'_>) -> Result<T>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result.map_err(from_csv)?;
        let line = record.position().map_or(0, |p| p.line());
        let row = Row {
            record: &record,
            line,
        };
        if record.len() != width {
            return Err(row.error(format!(
                "expected {width} columns, found {}",
                record.len()
            )));
        }
        out.push(parse(&row)?);
    }
    Ok(out)
}

fn from_csv(e: ::csv::Error) -> ModevalError {
    let msg = e.to_string();
    if let Some(pos) = e.position() {
        return ModevalError::Ingestion {
            line: pos.line(),
            raw: String::new(),
            reason: msg,
        };
    }
    match e.into_kind() {
        ::csv::ErrorKind::Io(io) => ModevalError::Io(io),
        _ => ModevalError::Parse(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modeval_core::ErrorStage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn line_of(err: &ModevalError) -> u64 {
        match err {
            ModevalError::Ingestion { line, .. } => *line,
            other => panic!("expected ingestion error, got {other:?}"),
        }
    }

    #[test]
    fn multiclass_from_file() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "y,p1,p2,p3").unwrap();
        writeln!(file, "1,0.7,0.2,0.1").unwrap();
        writeln!(file, "3, 0.1, 0.1, 0.8").unwrap();
        file.flush().unwrap();

        let data = read_multiclass(file.path(), 3, 1).unwrap();
        assert_eq!(data.actual(), &[0, 2]);
        assert_eq!(data.predicted()[1].as_slice(), &[0.1, 0.1, 0.8]);
    }

    #[test]
    fn multiclass_zero_based_labels() {
        let data = multiclass_from_reader("y,a,b\n0,0.4,0.6\n".as_bytes(), 2, 0).unwrap();
        assert_eq!(data.actual(), &[0]);
    }

    #[test]
    fn multiclass_label_below_base() {
        let err = multiclass_from_reader("y,a,b\n0,0.4,0.6\n".as_bytes(), 2, 1).unwrap_err();
        assert_eq!(line_of(&err), 2);
    }

    #[test]
    fn multiclass_wrong_column_count() {
        let input = "y,a,b,c\n1,0.2,0.3,0.5\n2,0.5,0.5\n";
        let err = multiclass_from_reader(input.as_bytes(), 3, 1).unwrap_err();
        assert_eq!(line_of(&err), 3);
        assert!(err.to_string().contains("2,0.5,0.5"), "{err}");
    }

    #[test]
    fn multiclass_negative_probability_is_validation_error() {
        let err = multiclass_from_reader("y,a,b\n1,-0.1,1.1\n".as_bytes(), 2, 1).unwrap_err();
        assert_eq!(err.stage(), ErrorStage::Validation);
        assert!(matches!(err, ModevalError::InvalidInput(_)));
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("1,-0.1,1.1"), "{msg}");
    }

    #[test]
    fn multiclass_class_count_bounds() {
        for k in [0, usize::MAX] {
            let err = multiclass_from_reader("y,a\n1,1.0\n".as_bytes(), k, 1).unwrap_err();
            assert_eq!(err.stage(), ErrorStage::Validation);
        }
    }

    #[test]
    fn binary_rows() {
        let data = binary_from_reader("y,p\n1,0.9\n0,0.2\n".as_bytes()).unwrap();
        assert_eq!(data.actual(), &[1, 0]);
        assert_eq!(data.predicted(), &[0.9, 0.2]);
    }

    #[test]
    fn binary_non_numeric_field() {
        let err = binary_from_reader("y,p\n1,0.9\n0,abc\n".as_bytes()).unwrap_err();
        assert_eq!(line_of(&err), 3);
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn binary_fractional_label() {
        assert!(binary_from_reader("y,p\n0.5,0.9\n".as_bytes()).is_err());
    }

    #[test]
    fn regression_rows() {
        let input = "actual,predicted\n1.5,1.0\n-2,3e2\n";
        let data = regression_from_reader(input.as_bytes()).unwrap();
        assert_eq!(data.actual(), &[1.5, -2.0]);
        assert_eq!(data.predicted(), &[1.0, 300.0]);
    }

    #[test]
    fn regression_rejects_non_finite() {
        let err = regression_from_reader("a,p\n1,NaN\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ModevalError::Ingestion { .. }));
        assert!(regression_from_reader("a,p\ninf,1\n".as_bytes()).is_err());
    }

    #[test]
    fn header_only_is_empty() {
        let data = regression_from_reader("a,p\n".as_bytes()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn file_not_found() {
        let err = read_regression("/nonexistent/model.csv").unwrap_err();
        assert!(matches!(err, ModevalError::Io(_)));
        assert!(err.to_string().contains("/nonexistent/model.csv"));
    }
}
