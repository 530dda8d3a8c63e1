use arbor::{Category, Error, Label, ParamGuard};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{DecisionTree, TreeError};

/// The metric used to determine the attribute by which a node is split
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitQuality {
    /// Measures the entropy of the labels left after splitting on an attribute: the entropy of
    /// every value partition, weighted by the size of the partition. Since the entropy of the
    /// node itself does not depend on the attribute, the attribute with the smallest conditional
    /// entropy is the one with the biggest information gain.
    InformationGain,
    /// Information gain normalized by the entropy of the attribute itself. Not implemented.
    GainRatio,
    /// Weighted Gini impurity of the value partitions. Not implemented.
    GiniIndex,
}

impl SplitQuality {
    /// Returns true if trees can be fitted with this criterion
    pub fn is_supported(&self) -> bool {
        matches!(self, SplitQuality::InformationGain)
    }

    /// The identifier accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitQuality::InformationGain => "information-gain",
            SplitQuality::GainRatio => "gain-ratio",
            SplitQuality::GiniIndex => "gini-index",
        }
    }
}

impl Default for SplitQuality {
    fn default() -> Self {
        SplitQuality::InformationGain
    }
}

impl fmt::Display for SplitQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitQuality {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "information-gain" => Ok(SplitQuality::InformationGain),
            "gain-ratio" => Ok(SplitQuality::GainRatio),
            "gini-index" => Ok(SplitQuality::GiniIndex),
            other => Err(TreeError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](crate::DecisionTree).
///
/// ### Example
///
/// ```rust
/// use arbor_trees::{DecisionTree, SplitQuality};
/// use arbor::prelude::*;
///
/// let dataset = arbor_datasets::weather();
///
/// // Initialize the default set of parameters and restrict the candidate attributes
/// let params = DecisionTree::<String, String>::params()
///     .split_quality(SplitQuality::InformationGain)
///     .attributes(Some(vec!["outlook", "humidity", "windy"]));
///
/// // Fit the decision tree on the training data
/// let tree = params.fit(&dataset).unwrap();
/// assert_eq!(tree.root_node().unwrap().attribute(), Some("outlook"));
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeValidParams<A, L> {
    split_quality: SplitQuality,
    attributes: Option<Vec<String>>,
    default_label: Option<L>,

    attribute_marker: PhantomData<A>,
}

impl<A, L: Label> DecisionTreeValidParams<A, L> {
    pub fn split_quality(&self) -> SplitQuality {
        self.split_quality
    }

    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }

    pub fn default_label(&self) -> Option<&L> {
        self.default_label.as_ref()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTreeParams<A, L>(DecisionTreeValidParams<A, L>);

impl<A: Category, L: Label> DecisionTreeParams<A, L> {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            split_quality: SplitQuality::InformationGain,
            attributes: None,
            default_label: None,
            attribute_marker: PhantomData,
        })
    }

    /// Sets the metric used to decide the attribute on which to split a node
    pub fn split_quality(mut self, split_quality: SplitQuality) -> Self {
        self.0.split_quality = split_quality;
        self
    }

    /// Sets the candidate attributes, in order of preference on ties
    ///
    /// `None` uses every attribute of the dataset in column order.
    pub fn attributes<S: Into<String>>(mut self, attributes: Option<Vec<S>>) -> Self {
        self.0.attributes =
            attributes.map(|names| names.into_iter().map(|name| name.into()).collect());
        self
    }

    /// Sets the label of leaves for which no training example is left
    ///
    /// Such leaves predict the first label of the training set. The default label is only used
    /// when the training set has no labels at all; if it is `None` as well, fitting an empty
    /// training set fails.
    pub fn default_label(mut self, default_label: Option<L>) -> Self {
        self.0.default_label = default_label;
        self
    }
}

impl<A: Category, L: Label> Default for DecisionTreeParams<A, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Category, L: Label> DecisionTree<A, L> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `split_quality = SplitQuality::InformationGain`
    /// * `attributes = None`
    /// * `default_label = None`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams<A, L> {
        DecisionTreeParams::new()
    }
}

impl<A, L> ParamGuard for DecisionTreeParams<A, L> {
    type Checked = DecisionTreeValidParams<A, L>;
    type Error = TreeError;

    fn check_ref(&self) -> Result<&Self::Checked, TreeError> {
        if !self.0.split_quality.is_supported() {
            return Err(TreeError::UnsupportedMethod(
                self.0.split_quality.to_string(),
            ));
        }

        if let Some(attributes) = &self.0.attributes {
            let mut seen = HashSet::new();
            if let Some(name) = attributes.iter().find(|name| !seen.insert(*name)) {
                return Err(Error::Parameters(format!(
                    "candidate attribute `{}` is listed more than once",
                    name
                ))
                .into());
            }
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked, TreeError> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor::{Dataset, Fit};

    #[test]
    fn split_quality_from_identifier() {
        assert_eq!(
            "information-gain".parse::<SplitQuality>().unwrap(),
            SplitQuality::InformationGain
        );
        assert_eq!(
            "gini-index".parse::<SplitQuality>().unwrap(),
            SplitQuality::GiniIndex
        );
        assert!(matches!(
            "variance".parse::<SplitQuality>(),
            Err(TreeError::UnsupportedMethod(name)) if name == "variance"
        ));

        for quality in &[
            SplitQuality::InformationGain,
            SplitQuality::GainRatio,
            SplitQuality::GiniIndex,
        ] {
            assert_eq!(quality.to_string().parse::<SplitQuality>().unwrap(), *quality);
        }
    }

    #[test]
    fn reserved_criteria_are_rejected() {
        for quality in &[SplitQuality::GainRatio, SplitQuality::GiniIndex] {
            let res = DecisionTreeParams::<usize, usize>::new()
                .split_quality(*quality)
                .check();

            assert!(matches!(
                res,
                Err(TreeError::UnsupportedMethod(name)) if name == quality.as_str()
            ));
        }
    }

    #[test]
    fn duplicate_candidates_are_rejected() {
        let res = DecisionTreeParams::<usize, usize>::new()
            .attributes(Some(vec!["a", "b", "a"]))
            .check();

        assert!(matches!(
            res,
            Err(TreeError::BaseCrate(Error::Parameters(_)))
        ));
    }

    #[test]
    fn default_params_are_valid() {
        let params = DecisionTreeParams::<usize, usize>::default().check_unwrap();

        assert_eq!(params.split_quality(), SplitQuality::InformationGain);
        assert_eq!(params.attributes(), None);
        assert_eq!(params.default_label(), None);
    }

    #[test]
    fn fit_rejects_reserved_criteria_of_checked_params() -> Result<(), TreeError> {
        // pure labels never reach attribute scoring
        let dataset = Dataset::from_columns(vec![("a", vec![0u8, 1])], vec![1u8, 1])?;

        for quality in &[SplitQuality::GainRatio, SplitQuality::GiniIndex] {
            let params = DecisionTreeValidParams::<u8, u8> {
                split_quality: *quality,
                attributes: None,
                default_label: None,
                attribute_marker: PhantomData,
            };

            assert!(matches!(
                params.fit(&dataset),
                Err(TreeError::UnsupportedMethod(name)) if name == quality.as_str()
            ));
        }

        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn params_round_trip_through_json() {
        let quality: SplitQuality = serde_json::from_str("\"InformationGain\"").unwrap();
        assert_eq!(quality, SplitQuality::InformationGain);
        assert_eq!(
            serde_json::to_string(&SplitQuality::GiniIndex).unwrap(),
            "\"GiniIndex\""
        );

        let params = DecisionTreeParams::<String, String>::new()
            .attributes(Some(vec!["outlook", "windy"]))
            .default_label(Some("no".to_string()));
        let json = serde_json::to_string(&params).unwrap();
        let restored: DecisionTreeParams<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, params);

        let checked = restored.check().unwrap();
        assert_eq!(checked.attributes().unwrap(), ["outlook", "windy"]);
        assert_eq!(checked.default_label(), Some(&"no".to_string()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_checked_params_are_rechecked_at_fit() -> Result<(), TreeError> {
        let json = r#"{
            "split_quality": "GiniIndex",
            "attributes": null,
            "default_label": null,
            "attribute_marker": null
        }"#;
        let params: DecisionTreeValidParams<u8, u8> = serde_json::from_str(json).unwrap();

        for labels in vec![vec![1u8, 1], vec![0, 1]] {
            let dataset = Dataset::from_columns(vec![("a", vec![0u8, 1])], labels)?;

            assert!(matches!(
                params.fit(&dataset),
                Err(TreeError::UnsupportedMethod(name)) if name == "gini-index"
            ));
        }

        Ok(())
    }
}
