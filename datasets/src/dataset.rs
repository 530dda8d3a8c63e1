use std::io::Read;

use arbor::Dataset;
use csv::{ReaderBuilder, Trim};
use ndarray::{Array1, Array2};
use thiserror::Error;

/// Errors while reading a dataset from CSV
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("target column `{0}` is not part of the header")]
    MissingTarget(String),
    #[error(transparent)]
    Dataset(#[from] arbor::Error),
}

/// Read a categorical dataset from CSV with a header row
///
/// Every cell is kept as a string. The column named `target_column` becomes the label of a
/// row, all other columns become attributes named after their header, in header order. Cells
/// are trimmed of surrounding whitespace.
///
/// ```rust
/// let csv = "color,size,edible\nred,small,yes\ngreen,large,no\n";
/// let dataset = arbor_datasets::dataset_from_csv(csv.as_bytes(), "edible").unwrap();
///
/// assert_eq!(dataset.feature_names(), ["color", "size"]);
/// assert_eq!(dataset.labels(), vec!["yes".to_string(), "no".to_string()]);
/// ```
pub fn dataset_from_csv<R: Read>(
    reader: R,
    target_column: &str,
) -> Result<Dataset<String, String>, ReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let target_idx = headers
        .iter()
        .position(|name| name == target_column)
        .ok_or_else(|| ReadError::MissingTarget(target_column.to_string()))?;

    let feature_names = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != target_idx)
        .map(|(_, name)| name.to_string())
        .collect::<Vec<_>>();

    let mut cells = Vec::new();
    let mut targets = Vec::new();
    for record in reader.records() {
        let record = record?;
        for (idx, cell) in record.iter().enumerate() {
            if idx == target_idx {
                targets.push(cell.to_string());
            } else {
                cells.push(cell.to_string());
            }
        }
    }

    let records = Array2::from_shape_vec((targets.len(), feature_names.len()), cells)
        .map_err(arbor::Error::from)?;
    let dataset =
        Dataset::new(records, Array1::from(targets)).with_feature_names(feature_names);
    dataset.validate()?;

    Ok(dataset)
}

#[cfg(feature = "weather")]
/// Read in the play-tennis weather table
///
/// Attributes are `outlook`, `temperature`, `humidity` and `windy`, the label `play` is
/// either "yes" or "no".
pub fn weather() -> Dataset<String, String> {
    let data = include_str!("../data/weather.csv");

    dataset_from_csv(data.as_bytes(), "play").unwrap()
}

#[cfg(feature = "dating")]
/// Twelve dates described by the attributes `handsome` (0 or 1) and `height` (0 short,
/// 1 medium, 2 tall), labelled 1 if a second date followed
pub fn dating() -> Dataset<usize, usize> {
    Dataset::from_columns(
        vec![
            ("handsome", vec![1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1]),
            ("height", vec![0, 0, 0, 2, 0, 0, 2, 1, 1, 2, 0, 0]),
        ],
        vec![0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0],
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_column_can_be_anywhere() {
        let csv = "label, a, b\n x, 1, 2\n y, 3, 4\n";
        let dataset = dataset_from_csv(csv.as_bytes(), "label").unwrap();

        assert_eq!(dataset.feature_names(), ["a", "b"]);
        assert_eq!(dataset.nsamples(), 2);
        assert_eq!(dataset.records[[1, 0]], "3");
        assert_eq!(dataset.records[[1, 1]], "4");
        assert_eq!(dataset.labels(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn unknown_target_column() {
        let csv = "a,b\n1,2\n";

        assert!(matches!(
            dataset_from_csv(csv.as_bytes(), "label"),
            Err(ReadError::MissingTarget(name)) if name == "label"
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let csv = "a,b,label\n1,2,x\n3,y\n";

        assert!(matches!(
            dataset_from_csv(csv.as_bytes(), "label"),
            Err(ReadError::Csv(_))
        ));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let csv = "a,a,label\n1,2,x\n";

        assert!(matches!(
            dataset_from_csv(csv.as_bytes(), "label"),
            Err(ReadError::Dataset(arbor::Error::MalformedDataset(_)))
        ));
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let dataset = dataset_from_csv("a,label\n".as_bytes(), "label").unwrap();

        assert_eq!(dataset.nsamples(), 0);
        assert_eq!(dataset.nfeatures(), 1);
    }

    #[cfg(feature = "weather")]
    #[test]
    fn weather_table() {
        let dataset = weather();

        assert_eq!(
            dataset.feature_names(),
            ["outlook", "temperature", "humidity", "windy"]
        );
        assert_eq!(dataset.nsamples(), 14);
        assert_eq!(
            dataset.domain("outlook").unwrap(),
            vec!["sunny", "overcast", "rainy"]
        );
        assert_eq!(dataset.label_frequencies()["yes"], 9);
    }

    #[cfg(feature = "dating")]
    #[test]
    fn dating_table() {
        let dataset = dating();

        assert_eq!(dataset.feature_names(), ["handsome", "height"]);
        assert_eq!(dataset.domain("height").unwrap(), vec![0, 2, 1]);
    }
}
