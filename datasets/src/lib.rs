//! `arbor-datasets` provides small categorical datasets ready to be used in tests and examples.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["weather"]` : the play-tennis weather table, 14 days with four attributes
//! * `["dating"]` : twelve dates described by how handsome and how tall the partner was
//!
//! Each dataset sits behind the feature of the same name. Any CSV table with a header row can
//! be loaded with [`dataset_from_csv`].
//!
//! ## Using a dataset
//!
//! ```ignore
//! arbor-datasets = { version = "0.1.0", features = ["weather"] }
//! ```
//! and then use it in your tests as
//! ```ignore
//! let dataset = arbor_datasets::weather();
//! assert_eq!(dataset.feature_names(), ["outlook", "temperature", "humidity", "windy"]);
//! ```

mod dataset;

pub use dataset::*;
