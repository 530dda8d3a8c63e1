//! `arbor` provides the shared foundations for learning decision trees over categorical data.
//!
//! It defines the categorical [`Dataset`] container, the trait bounds attribute values and labels
//! have to satisfy, the checked-hyperparameter pattern ([`ParamGuard`]) and the [`Fit`] /
//! [`Predict`](traits::Predict) traits every algorithm crate implements.
//!
//! ## Current state
//!
//! The only algorithm crate is `arbor-trees`, which learns ID3 decision trees with the
//! information-gain criterion. Small example datasets are bundled in `arbor-datasets`.
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! let dataset = Dataset::from_columns(
//!     vec![("outlook", vec!["sunny", "rain", "overcast"])],
//!     vec!["no", "yes", "yes"],
//! )?;
//!
//! assert_eq!(dataset.domain("outlook").unwrap(), vec!["sunny", "rain", "overcast"]);
//! # Ok::<(), arbor::Error>(())
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Category, Dataset, Label};
pub use error::Error;
pub use param_guard::ParamGuard;
pub use traits::Fit;
