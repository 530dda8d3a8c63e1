//! ID3 decision trees
//!
use std::collections::HashMap;
use std::fmt;

use ndarray::{Array1, Array2};
use tracing::{debug, trace};

use super::selection::best_candidate;
use super::NodeIter;
use super::DecisionTreeValidParams;
use crate::error::{Result, TreeError};
use arbor::{
    dataset::{RowSample, Sample},
    traits::*,
    Category, Dataset, Label,
};

/// RowMask tracks observations
///
/// A decision node sends every observation down the branch of its attribute value. The
/// children can then only use a subset of the observations. In order to track that, the
/// observations are masked with a boolean vector, hiding all observations which are not
/// applicable in a lower tree. The dataset itself is never copied or modified.
struct RowMask {
    mask: Vec<bool>,
    nsamples: usize,
}

impl RowMask {
    /// Generates a RowMask without hidden observations
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of observations
    ///
    fn all(nsamples: usize) -> Self {
        RowMask {
            mask: vec![true; nsamples],
            nsamples,
        }
    }

    /// Generates a RowMask where all observations are hidden
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of observations
    fn none(nsamples: usize) -> Self {
        RowMask {
            mask: vec![false; nsamples],
            nsamples: 0,
        }
    }

    /// Sets the observation at the specified index as visible
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    ///
    fn mark(&mut self, idx: usize) {
        self.mask[idx] = true;
        self.nsamples += 1;
    }
}

/// A node in the decision tree
///
/// Either a decision on the value of one attribute, or a leaf holding the predicted label.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<A, L> {
    Decision(DecisionNode<A, L>),
    Leaf(L),
}

impl<A: Category, L: Label> TreeNode<A, L> {
    /// Returns true if the node ends the traversal
    pub fn is_terminal(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for decision nodes.
    pub fn prediction(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf(label) => Some(label),
            TreeNode::Decision(_) => None,
        }
    }

    /// Returns the name of the attribute a decision node asks for, `None` for leaves
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TreeNode::Decision(node) => Some(node.attribute()),
            TreeNode::Leaf(_) => None,
        }
    }

    /// Returns the branches of a decision node, leaves have none
    pub fn children(&self) -> &[(A, TreeNode<A, L>)] {
        match self {
            TreeNode::Decision(node) => node.children(),
            TreeNode::Leaf(_) => &[],
        }
    }

    /// Number of decisions on the longest path from this node to a leaf
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|(_, child)| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Decision on the value of a single attribute
///
/// Holds one branch for every value the attribute took in the full training set, in order of
/// first appearance, and the majority label of the training examples which reached the node.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionNode<A, L> {
    attribute: String,
    children: Vec<(A, TreeNode<A, L>)>,
    majority: L,
}

impl<A: Category, L: Label> DecisionNode<A, L> {
    fn new(attribute: String, majority: L) -> Self {
        DecisionNode {
            attribute,
            children: Vec::new(),
            majority,
        }
    }

    /// Adds the branch taken for `value`, replacing an existing one
    fn insert_decision(&mut self, value: A, child: TreeNode<A, L>) {
        match self.children.iter_mut().find(|(x, _)| *x == value) {
            Some((_, node)) => *node = child,
            None => self.children.push((value, child)),
        }
    }

    /// Returns the branch taken for `value`, if the node has one
    pub fn do_decision(&self, value: &A) -> Option<&TreeNode<A, L>> {
        self.children
            .iter()
            .find(|(x, _)| x == value)
            .map(|(_, child)| child)
    }

    /// Name of the attribute this node decides on
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Value and child node of every branch
    pub fn children(&self) -> &[(A, TreeNode<A, L>)] {
        &self.children
    }

    /// Most common label of the training examples which reached this node
    pub fn majority(&self) -> &L {
        &self.majority
    }
}

/// What to do when a sample cannot be routed below a decision node
///
/// This happens if the sample has a value for which the node has no branch, because the value
/// never occurred in the training set, or if the sample lacks the attribute altogether.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback<L> {
    /// Fail with [`TreeError::UnmodeledValue`] or [`TreeError::MissingAttribute`]
    Reject,
    /// Predict the majority label of the training examples at the node
    NodeMajority,
    /// Predict a fixed label
    Label(L),
}

impl<L> Default for Fallback<L> {
    fn default() -> Self {
        Fallback::Reject
    }
}

/// Grows a tree for one dataset and one set of hyperparameters
struct TreeBuilder<'a, A, L> {
    dataset: &'a Dataset<A, L>,
    hyperparameters: &'a DecisionTreeValidParams<A, L>,
    /// distinct values of every attribute in the full training set, indexed by column
    domains: Vec<Vec<A>>,
    /// label of leaves which no training example reaches
    empty_label: L,
}

impl<'a, A: Category, L: Label> TreeBuilder<'a, A, L> {
    /// Recursively fits the node for the observations visible in `mask`
    ///
    /// `candidates` holds the column indices of the attributes which have not been used on the
    /// path from the root. It shrinks by one on every level, which bounds the recursion depth by
    /// the number of attributes.
    fn fit(&self, mask: &RowMask, candidates: &[usize]) -> Result<TreeNode<A, L>> {
        // with at most one attribute left the node is forced to be a leaf
        if candidates.len() <= 1 {
            let prediction = self.modal_label(mask);
            trace!(
                nsamples = mask.nsamples,
                candidates = candidates.len(),
                "forced leaf"
            );
            return Ok(TreeNode::Leaf(prediction));
        }

        if let Some(prediction) = self.pure_label(mask) {
            return Ok(TreeNode::Leaf(prediction));
        }

        let (best_pos, score) = best_candidate(
            self.dataset,
            &mask.mask,
            candidates,
            self.hyperparameters.split_quality(),
        )?;
        let feature_idx = candidates[best_pos];
        let attribute = &self.dataset.feature_names()[feature_idx];

        trace!(
            attribute = %attribute,
            conditional_entropy = score,
            nsamples = mask.nsamples,
            "split"
        );

        let remaining = candidates
            .iter()
            .copied()
            .filter(|idx| *idx != feature_idx)
            .collect::<Vec<_>>();

        let mut node = DecisionNode::new(attribute.clone(), self.modal_label(mask));

        // every value of the full training set gets a branch, also the ones which do not occur
        // in this subset
        for value in &self.domains[feature_idx] {
            let mut child_mask = RowMask::none(self.dataset.nsamples());
            for (i, visible) in mask.mask.iter().enumerate() {
                if *visible && self.dataset.records[(i, feature_idx)] == *value {
                    child_mask.mark(i);
                }
            }

            let child = self.fit(&child_mask, &remaining)?;
            node.insert_decision(value.clone(), child);
        }

        Ok(TreeNode::Decision(node))
    }

    /// Returns the label of a node whose observations all share one label
    ///
    /// Nodes without observations predict the first label of the training set. Returns `None`
    /// if the observations have different labels.
    fn pure_label(&self, mask: &RowMask) -> Option<L> {
        let mut visible = self
            .dataset
            .targets
            .iter()
            .zip(mask.mask.iter())
            .filter(|(_, visible)| **visible)
            .map(|(label, _)| label);

        match visible.next() {
            None => Some(self.empty_label.clone()),
            Some(first) if visible.all(|label| label == first) => Some(first.clone()),
            Some(_) => None,
        }
    }

    fn modal_label(&self, mask: &RowMask) -> L {
        let class_freq = self.dataset.label_frequencies_with_mask(&mask.mask);

        find_modal_class(
            self.dataset
                .targets
                .iter()
                .zip(mask.mask.iter())
                .filter(|(_, visible)| **visible)
                .map(|(label, _)| label),
            &class_freq,
        )
        .unwrap_or_else(|| self.empty_label.clone())
    }
}

/// A fitted ID3 decision tree model for classification.
///
/// ### Structure
/// A decision tree is a tree where:
/// * Each decision node asks for the value of one attribute and has one child for every value
///   the attribute took in the training set.
/// * Leaf nodes make predictions.
///
/// No attribute is asked twice on a path from the root to a leaf.
///
/// ### Algorithm
///
/// Starting with a single root node holding all training examples, the tree is grown
/// recursively. For every node, the first matching rule applies:
///
/// * If at most one candidate attribute is left, the node becomes a leaf predicting the most
///   common label of its examples. Ties go to the label encountered first.
/// * If all examples share the same label, the node becomes a leaf predicting it. A node without
///   examples predicts the first label of the training set.
/// * Otherwise the candidate with the highest information gain, i.e. the smallest
///   [conditional entropy](crate::conditional_entropy), is chosen, removed from the candidates
///   and the examples are partitioned by its value.
///
/// ### Predictions
///
/// To predict the label of a sample, the tree is traversed from the root to a leaf, following the
/// branch of the sample's value at every decision node. See [`Fallback`] for samples whose values
/// the tree does not know.
///
/// ### Example
///
/// ```rust
/// use arbor_trees::DecisionTree;
/// use arbor::prelude::*;
/// use std::collections::HashMap;
///
/// let dataset = arbor_datasets::dating();
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
///
/// let sample: HashMap<String, usize> = vec![("handsome".to_string(), 1), ("height".to_string(), 0)]
///     .into_iter()
///     .collect();
///
/// assert_eq!(tree.predict_sample(&sample).unwrap(), 0);
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<A, L> {
    root_node: Option<TreeNode<A, L>>,
    feature_names: Vec<String>,
}

impl<A, L> Default for DecisionTree<A, L> {
    fn default() -> Self {
        DecisionTree {
            root_node: None,
            feature_names: Vec::new(),
        }
    }
}

impl<A: Category, L: Label> Fit<A, L, TreeError> for DecisionTreeValidParams<A, L> {
    type Object = DecisionTree<A, L>;

    /// Fit a decision tree using `hyperparameters` on the dataset consisting of
    /// a matrix of attribute values and an array of labels.
    ///
    /// Fails before any node is built if the split criterion is not implemented, or if the
    /// training set has no labels and no default label is configured.
    fn fit(&self, dataset: &Dataset<A, L>) -> Result<Self::Object> {
        // checked params can also be obtained through deserialization
        if !self.split_quality().is_supported() {
            return Err(TreeError::UnsupportedMethod(
                self.split_quality().to_string(),
            ));
        }

        dataset.validate()?;

        let candidates = match self.attributes() {
            Some(names) => names
                .iter()
                .map(|name| {
                    dataset.feature_index(name).ok_or_else(|| {
                        arbor::Error::MalformedDataset(format!(
                            "attribute `{}` is not part of the dataset",
                            name
                        ))
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?,
            None => (0..dataset.nfeatures()).collect(),
        };

        let domains = dataset
            .feature_names()
            .iter()
            .map(|name| dataset.domain(name).unwrap_or_default())
            .collect();

        let empty_label = dataset
            .targets
            .iter()
            .next()
            .or_else(|| self.default_label())
            .cloned()
            .ok_or_else(|| {
                arbor::Error::MalformedDataset(
                    "the training set has no labels and no default label is set".to_string(),
                )
            })?;

        debug!(
            nsamples = dataset.nsamples(),
            candidates = candidates.len(),
            split_quality = %self.split_quality(),
            "fitting decision tree"
        );

        let builder = TreeBuilder {
            dataset,
            hyperparameters: self,
            domains,
            empty_label,
        };
        let root_node = builder.fit(&RowMask::all(dataset.nsamples()), &candidates)?;

        let tree = DecisionTree {
            root_node: Some(root_node),
            feature_names: dataset.feature_names().to_vec(),
        };

        debug!(
            nodes = tree.num_nodes(),
            leaves = tree.num_leaves(),
            depth = tree.depth(),
            "fitted decision tree"
        );

        Ok(tree)
    }
}

impl<A: Category, L: Label> DecisionTree<A, L> {
    /// Releases all nodes, leaving an empty tree
    pub fn clear(&mut self) {
        self.root_node = None;
        self.feature_names.clear();
    }

    /// Returns true if the tree was never fitted or has been cleared
    pub fn is_empty(&self) -> bool {
        self.root_node.is_none()
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> Option<&TreeNode<A, L>> {
        self.root_node.as_ref()
    }

    /// Attribute names of the training set, in column order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<A, L> {
        NodeIter::new(self.root_node.iter().collect())
    }

    /// Return the attributes used by decision nodes, in level-order of first use
    pub fn features(&self) -> Vec<&str> {
        let mut fitted_features = Vec::new();

        for attribute in self.iter_nodes().filter_map(|node| node.attribute()) {
            if !fitted_features.contains(&attribute) {
                fitted_features.push(attribute);
            }
        }

        fitted_features
    }

    /// Return the number of decisions on the longest path from the root to a leaf
    pub fn depth(&self) -> usize {
        self.root_node.as_ref().map(|x| x.depth()).unwrap_or(0)
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_terminal()).count()
    }

    /// Return the number of nodes in this tree
    pub fn num_nodes(&self) -> usize {
        self.iter_nodes().count()
    }

    /// Classify a single sample
    ///
    /// Fails with [`TreeError::NotFitted`] on an empty tree and with
    /// [`TreeError::UnmodeledValue`] or [`TreeError::MissingAttribute`] if the sample cannot be
    /// routed to a leaf.
    pub fn predict_sample<S: Sample<A>>(&self, sample: &S) -> Result<L> {
        self.predict_sample_with(sample, &Fallback::Reject)
    }

    /// Classify a single sample, resolving unknown or missing values with `fallback`
    pub fn predict_sample_with<S: Sample<A>>(&self, sample: &S, fallback: &Fallback<L>) -> Result<L> {
        let mut node = self.root_node.as_ref().ok_or(TreeError::NotFitted)?;

        loop {
            let decision = match node {
                TreeNode::Leaf(label) => return Ok(label.clone()),
                TreeNode::Decision(decision) => decision,
            };

            let next = match sample.value(decision.attribute()) {
                Some(value) => decision
                    .do_decision(value)
                    .ok_or_else(|| TreeError::UnmodeledValue {
                        attribute: decision.attribute().to_string(),
                        value: format!("{:?}", value),
                    }),
                None => Err(TreeError::MissingAttribute(decision.attribute().to_string())),
            };

            node = match (next, fallback) {
                (Ok(child), _) => child,
                (Err(err), Fallback::Reject) => return Err(err),
                (Err(_), Fallback::NodeMajority) => return Ok(decision.majority().clone()),
                (Err(_), Fallback::Label(label)) => return Ok(label.clone()),
            };
        }
    }
}

impl<A: Category, L: Label> PredictInplace<Array2<A>, Array1<Option<L>>> for DecisionTree<A, L> {
    /// Make predictions for each row of a matrix of attribute values `x`.
    ///
    /// Columns are matched by position with the attributes of the training set. Rows which
    /// cannot be routed to a leaf are predicted as `None`.
    fn predict_inplace(&self, x: &Array2<A>, y: &mut Array1<Option<L>>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
            let sample = RowSample::new(&self.feature_names, row);
            *target = self.predict_sample(&sample).ok();
        }
    }

    fn default_target(&self, x: &Array2<A>) -> Array1<Option<L>> {
        Array1::from_elem(x.nrows(), None)
    }
}

impl<A: Category, L: Label, T> PredictInplace<Dataset<A, T>, Array1<Option<L>>>
    for DecisionTree<A, L>
{
    /// Make predictions for each example of a dataset.
    ///
    /// Attributes are matched by name, so the dataset may order or extend its columns
    /// differently than the training set. Examples which cannot be routed to a leaf are
    /// predicted as `None`.
    fn predict_inplace(&self, x: &Dataset<A, T>, y: &mut Array1<Option<L>>) {
        assert_eq!(
            x.nsamples(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        for (sample, target) in x.rows().zip(y.iter_mut()) {
            *target = self.predict_sample(&sample).ok();
        }
    }

    fn default_target(&self, x: &Dataset<A, T>) -> Array1<Option<L>> {
        Array1::from_elem(x.nsamples(), None)
    }
}

impl<A: Category, L: Label> fmt::Display for DecisionTree<A, L> {
    /// Renders the tree as an indented outline, one branch per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root_node {
            None => writeln!(f, "<empty tree>"),
            Some(TreeNode::Leaf(label)) => writeln!(f, "-> {:?}", label),
            Some(node) => write_branches(f, node, 0),
        }
    }
}

fn write_branches<A: Category, L: Label>(
    f: &mut fmt::Formatter<'_>,
    node: &TreeNode<A, L>,
    indent: usize,
) -> fmt::Result {
    let attribute = node.attribute().unwrap_or_default();

    for (value, child) in node.children() {
        write!(f, "{:indent$}{} = {:?}", "", attribute, value, indent = indent)?;
        match child {
            TreeNode::Leaf(label) => writeln!(f, " -> {:?}", label)?,
            TreeNode::Decision(_) => {
                writeln!(f)?;
                write_branches(f, child, indent + 2)?;
            }
        }
    }

    Ok(())
}

/// Finds the most frequent label in `class_freq`. If two labels occur equally often, the
/// one encountered first in `labels` is returned. Returns `None` for no labels.
fn find_modal_class<'a, L: Label + 'a>(
    labels: impl Iterator<Item = &'a L>,
    class_freq: &HashMap<L, usize>,
) -> Option<L> {
    labels
        .fold(None, |acc: Option<(&L, usize)>, label| {
            let freq = class_freq.get(label).copied().unwrap_or(0);
            match acc {
                Some((_, best_freq)) if best_freq >= freq => acc,
                _ => Some((label, freq)),
            }
        })
        .map(|(label, _)| label.clone())
}
