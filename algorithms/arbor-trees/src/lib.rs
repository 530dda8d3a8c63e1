//!
//! # Decision tree learning
//! `arbor-trees` provides a pure Rust implementation of ID3 decision tree learning over
//! categorical attributes.
//!
//! # The big picture
//!
//! `arbor-trees` is the algorithm crate of the `arbor` workspace. Datasets, the fit/predict
//! traits and the hyperparameter checking live in `arbor`, bundled example data in
//! `arbor-datasets`.
//!
//! A decision tree predicts a label by asking one question per level: "which value does the
//! sample have for attribute X?". The answer selects a child node, until a leaf with the
//! predicted label is reached. The attribute asked at each node is the one with the highest
//! information gain on the training examples that reach it.
//!
//! # Current state
//!
//! `arbor-trees` currently provides an [implementation](DecisionTree) of single-tree fitting for
//! classification with the information-gain criterion. Gain ratio and the Gini index are
//! reserved [split criteria](SplitQuality) and are rejected when a tree is fitted.
//!

mod decision_trees;
mod error;

pub use decision_trees::*;
pub use error::{Result, TreeError};
