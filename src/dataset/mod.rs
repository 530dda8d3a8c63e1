//! Datasets
//!
//! This module implements the categorical dataset struct and the helper traits used to look up
//! attribute values of single samples.
use ndarray::{Array1, Array2};

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod impl_labels;
mod sample;

pub use sample::{RowSample, Rows, Sample};

/// Categorical attribute values
///
/// Attribute values are only ever compared for equality and used as hash keys, so any type
/// which is comparable, hashable and clonable can be used. `Debug` is needed to report values
/// which were never seen during training.
pub trait Category: PartialEq + Eq + Hash + Clone + fmt::Debug {}

impl<T: PartialEq + Eq + Hash + Clone + fmt::Debug> Category for T {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. Majority votes count labels in a hash map
/// and break ties by first occurrence, so no ordering is required.
pub trait Label: PartialEq + Eq + Hash + Clone + fmt::Debug {}

impl<T: PartialEq + Eq + Hash + Clone + fmt::Debug> Label for T {}

/// Dataset
///
/// This is the fundamental structure of a categorical dataset. Each row of `records` is one
/// training example, each column one attribute. The attribute names are index-aligned with the
/// columns and the targets are index-aligned with the rows.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array with one label per sample
///
/// Both fields are public. Nothing prevents them from getting out of sync, which is why
/// [`Dataset::validate`] is called again before any model is fitted.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<A, L> {
    pub records: Array2<A>,
    pub targets: Array1<L>,

    feature_names: Vec<String>,
}

/// Collects the distinct elements of an iterator, in order of first appearance
pub(crate) fn distinct<'a, T: 'a + Eq + Hash + Clone>(items: impl IntoIterator<Item = &'a T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in items {
        if seen.insert(item) {
            out.push(item.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use ndarray::array;
    use std::collections::HashMap;

    fn dating() -> Result<Dataset<usize, usize>> {
        Dataset::from_columns(
            vec![
                ("handsome", vec![1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1]),
                ("height", vec![0, 0, 0, 2, 0, 0, 2, 1, 1, 2, 0, 0]),
            ],
            vec![0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0],
        )
    }

    #[test]
    fn from_columns_keeps_column_order() -> Result<()> {
        let dataset = dating()?;

        assert_eq!(dataset.nsamples(), 12);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.feature_names(), &["handsome", "height"]);
        assert_eq!(dataset.feature_index("height"), Some(1));
        assert_eq!(dataset.records[(3, 1)], 2);
        assert!(dataset.validate().is_ok());

        Ok(())
    }

    #[test]
    fn from_columns_rejects_length_mismatch() {
        let res = Dataset::from_columns(vec![("a", vec![1, 2, 3]), ("b", vec![1, 2])], vec![0, 0, 1]);

        assert!(matches!(res, Err(Error::MalformedDataset(_))));
    }

    #[test]
    fn from_columns_rejects_duplicate_names() {
        let res = Dataset::from_columns(vec![("a", vec![1, 2]), ("a", vec![1, 2])], vec![0, 1]);

        assert!(matches!(res, Err(Error::MalformedDataset(_))));
    }

    #[test]
    fn validate_detects_desynced_fields() -> Result<()> {
        let mut dataset = dating()?;
        dataset.targets = array![0, 1];

        assert!(matches!(dataset.validate(), Err(Error::MalformedDataset(_))));

        let dataset = Dataset::new(array![[1, 2], [3, 4]], array![0, 1]).with_feature_names(vec!["only-one"]);
        assert!(matches!(dataset.validate(), Err(Error::MalformedDataset(_))));

        Ok(())
    }

    #[test]
    fn default_feature_names() {
        let dataset = Dataset::new(array![["a", "b"], ["c", "d"]], array![true, false]);

        assert_eq!(dataset.feature_names(), &["feature-0", "feature-1"]);
    }

    #[test]
    fn domain_in_first_seen_order() -> Result<()> {
        let dataset = dating()?;

        assert_eq!(dataset.domain("height"), Some(vec![0, 2, 1]));
        assert_eq!(dataset.domain("handsome"), Some(vec![1, 0]));
        assert_eq!(dataset.domain("weight"), None);
        assert_eq!(dataset.labels(), vec![0, 1]);

        Ok(())
    }

    #[test]
    fn label_frequencies_with_mask() -> Result<()> {
        let dataset = dating()?;

        let mut mask = vec![false; 12];
        for i in &[0, 1, 2, 4, 5, 10, 11] {
            mask[*i] = true;
        }

        let freqs = dataset.label_frequencies_with_mask(&mask);
        assert_eq!(freqs.get(&0), Some(&6));
        assert_eq!(freqs.get(&1), Some(&1));

        Ok(())
    }

    #[test]
    fn samples_from_maps_and_rows() -> Result<()> {
        let dataset = dating()?;

        let row = dataset.rows().nth(3).unwrap();
        assert_eq!(row.value("handsome"), Some(&0));
        assert_eq!(row.value("height"), Some(&2));
        assert_eq!(row.value("weight"), None);

        let mut map = HashMap::new();
        map.insert("height".to_string(), 1);
        assert_eq!(map.value("height"), Some(&1));
        assert_eq!(map.value("handsome"), None);

        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn dataset_round_trips_through_json() -> Result<()> {
        let dataset: Dataset<String, String> = Dataset::from_columns(
            vec![
                ("outlook", vec!["sunny".to_string(), "rainy".to_string()]),
                ("windy", vec!["false".to_string(), "true".to_string()]),
            ],
            vec!["no".to_string(), "yes".to_string()],
        )?;

        let json = serde_json::to_string(&dataset).unwrap();
        let restored: Dataset<String, String> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, dataset);
        assert_eq!(restored.feature_names(), &["outlook", "windy"]);
        assert_eq!(restored.domain("outlook"), Some(vec!["sunny".to_string(), "rainy".to_string()]));

        Ok(())
    }
}
