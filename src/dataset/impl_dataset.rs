use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::HashSet;

use super::{distinct, Category, Dataset, Label, Rows};
use crate::error::{Error, Result};

impl<A, L> Dataset<A, L> {
    /// Create a new dataset from records and targets
    ///
    /// The attributes are named `feature-0`, `feature-1`, .. until
    /// [`with_feature_names`](Dataset::with_feature_names) is called.
    pub fn new(records: Array2<A>, targets: Array1<L>) -> Self {
        let feature_names = (0..records.ncols())
            .map(|idx| format!("feature-{}", idx))
            .collect();

        Dataset {
            records,
            targets,
            feature_names,
        }
    }

    /// Updates the attribute names
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> Self {
        self.feature_names = names.into_iter().map(|x| x.into()).collect();
        self
    }

    /// Returns the attribute names, one per column
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Returns the column index of the attribute `name`
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|x| x == name)
    }

    /// Number of examples
    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    /// Number of attributes
    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Returns the values of attribute `name`, one per example
    pub fn column(&self, name: &str) -> Option<ArrayView1<A>> {
        self.feature_index(name)
            .map(|idx| self.records.index_axis(Axis(1), idx))
    }

    /// Returns an iterator over all examples, each one usable as a [`Sample`](super::Sample)
    pub fn rows(&self) -> Rows<A> {
        Rows::new(&self.feature_names, self.records.view())
    }

    /// Checks that records, targets and attribute names are consistent with each other
    ///
    /// Every attribute column needs exactly one value per label and every column needs a
    /// unique name.
    pub fn validate(&self) -> Result<()> {
        if self.records.nrows() != self.targets.len() {
            return Err(Error::MalformedDataset(format!(
                "{} examples but {} labels",
                self.records.nrows(),
                self.targets.len()
            )));
        }

        if self.feature_names.len() != self.records.ncols() {
            return Err(Error::MalformedDataset(format!(
                "{} attribute names for {} columns",
                self.feature_names.len(),
                self.records.ncols()
            )));
        }

        let mut seen = HashSet::new();
        if let Some(name) = self.feature_names.iter().find(|name| !seen.insert(*name)) {
            return Err(Error::MalformedDataset(format!(
                "attribute `{}` appears more than once",
                name
            )));
        }

        Ok(())
    }
}

impl<A: Category, L: Label> Dataset<A, L> {
    /// Create a dataset from named attribute columns and a parallel label sequence
    ///
    /// Columns keep the order in which they are given. Fails with
    /// [`Error::MalformedDataset`] if any column has a different length than `targets` or if
    /// an attribute name is used twice.
    ///
    /// ```rust
    /// use arbor::Dataset;
    ///
    /// let dataset = Dataset::from_columns(
    ///     vec![("outlook", vec!["sunny", "rain"]), ("windy", vec!["no", "yes"])],
    ///     vec!["play", "stay"],
    /// ).unwrap();
    ///
    /// assert_eq!(dataset.nsamples(), 2);
    /// assert_eq!(dataset.feature_names(), &["outlook", "windy"]);
    /// ```
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Vec<A>)>,
        targets: Vec<L>,
    ) -> Result<Self> {
        let nsamples = targets.len();
        let mut feature_names = Vec::new();
        let mut values = Vec::new();

        for (name, column) in columns {
            let name = name.into();
            if column.len() != nsamples {
                return Err(Error::MalformedDataset(format!(
                    "attribute `{}` has {} values but there are {} labels",
                    name,
                    column.len(),
                    nsamples
                )));
            }
            if feature_names.contains(&name) {
                return Err(Error::MalformedDataset(format!(
                    "attribute `{}` appears more than once",
                    name
                )));
            }

            feature_names.push(name);
            values.push(column);
        }

        let records = Array2::from_shape_fn((nsamples, values.len()), |(row, col)| {
            values[col][row].clone()
        });

        Ok(Dataset {
            records,
            targets: Array1::from(targets),
            feature_names,
        })
    }

    /// Returns the distinct values of attribute `name`, in order of first appearance
    pub fn domain(&self, name: &str) -> Option<Vec<A>> {
        self.column(name).map(|column| distinct(column.iter()))
    }
}
