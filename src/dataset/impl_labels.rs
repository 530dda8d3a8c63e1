use std::collections::HashMap;

use super::{distinct, Dataset, Label};

impl<A, L: Label> Dataset<A, L> {
    /// Returns the distinct labels, in order of first appearance
    pub fn labels(&self) -> Vec<L> {
        distinct(self.targets.iter())
    }

    /// Counts the labels of all examples which are not masked out. Examples beyond the end of
    /// `mask` are ignored.
    pub fn label_frequencies_with_mask(&self, mask: &[bool]) -> HashMap<L, usize> {
        let mut freqs = HashMap::new();

        for (label, _) in self
            .targets
            .iter()
            .zip(mask.iter())
            .filter(|(_, visible)| **visible)
        {
            *freqs.entry(label.clone()).or_insert(0) += 1;
        }

        freqs
    }

    /// Counts the labels of all examples
    pub fn label_frequencies(&self) -> HashMap<L, usize> {
        self.label_frequencies_with_mask(&vec![true; self.targets.len()])
    }
}
