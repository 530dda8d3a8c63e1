mod algorithm;
mod hyperparams;
mod iter;
mod selection;

pub use algorithm::*;
pub use hyperparams::*;
pub use iter::*;
pub use selection::{conditional_entropy, entropy, select_attribute};
