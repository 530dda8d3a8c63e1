//! Attribute selection
//!
//! Entropies are computed with logarithms in base 10. The base only scales all entropies by
//! the same factor, so the ranking of attributes is the same for any base.
use std::collections::HashMap;
use std::hash::Hash;

use arbor::{Category, Dataset, Label};
use ndarray::{ArrayView1, Axis};
use tracing::trace;

use super::SplitQuality;
use crate::error::{Result, TreeError};

/// Given the class frequencies calculates the entropy of the subset.
///
/// Empty subsets have zero entropy.
pub fn entropy<K: Eq + Hash>(class_freq: &HashMap<K, usize>) -> f64 {
    entropy_of_counts(class_freq.values().copied())
}

fn entropy_of_counts(counts: impl Iterator<Item = usize> + Clone) -> f64 {
    let n_samples = counts.clone().sum::<usize>() as f64;
    if n_samples == 0.0 {
        return 0.0;
    }

    counts
        .map(|x| x as f64 / n_samples)
        .map(|x| if x > 0.0 { -x * x.log10() } else { 0.0 })
        .sum()
}

/// Conditional entropy of the labels given the values of one attribute
///
/// Examples are partitioned by their attribute value, the entropy of the labels in every
/// partition is weighted by the share of examples in that partition.
pub fn conditional_entropy<A: Category, L: Label>(
    values: ArrayView1<A>,
    targets: ArrayView1<L>,
) -> f64 {
    conditional_entropy_with_mask(values, targets, &vec![true; targets.len()])
}

/// Conditional entropy over the examples which are visible in `mask`
///
/// Partitions and labels are visited in order of first appearance, so the result does not
/// depend on hash map iteration order. Attributes with equal partitions get bit-identical
/// scores, which keeps tie breaking stable.
pub(crate) fn conditional_entropy_with_mask<A: Category, L: Label>(
    values: ArrayView1<A>,
    targets: ArrayView1<L>,
    mask: &[bool],
) -> f64 {
    let mut label_idx: HashMap<&L, usize> = HashMap::new();
    let mut partition_idx: HashMap<&A, usize> = HashMap::new();
    // label counts for every partition, in order of first appearance
    let mut partitions: Vec<Vec<usize>> = Vec::new();
    let mut nsamples = 0usize;

    for ((value, label), _) in values
        .iter()
        .zip(targets.iter())
        .zip(mask.iter())
        .filter(|(_, visible)| **visible)
    {
        let nlabels = label_idx.len();
        let label = *label_idx.entry(label).or_insert(nlabels);

        let npartitions = partitions.len();
        let partition = *partition_idx.entry(value).or_insert(npartitions);
        if partition == npartitions {
            partitions.push(Vec::new());
        }

        let counts = &mut partitions[partition];
        if counts.len() <= label {
            counts.resize(label + 1, 0);
        }
        counts[label] += 1;
        nsamples += 1;
    }

    if nsamples == 0 {
        return 0.0;
    }

    partitions
        .iter()
        .map(|counts| {
            let size = counts.iter().sum::<usize>() as f64;
            entropy_of_counts(counts.iter().copied()) * size / nsamples as f64
        })
        .sum()
}

/// Picks the attribute to split on from the candidate columns
///
/// Returns the position in `candidates` of the attribute with the smallest conditional entropy
/// together with that entropy. The first candidate wins on ties.
pub(crate) fn best_candidate<A: Category, L: Label>(
    dataset: &Dataset<A, L>,
    mask: &[bool],
    candidates: &[usize],
    split_quality: SplitQuality,
) -> Result<(usize, f64)> {
    if split_quality != SplitQuality::InformationGain {
        return Err(TreeError::UnsupportedMethod(split_quality.to_string()));
    }

    let mut best: Option<(usize, f64)> = None;

    for (pos, &feature_idx) in candidates.iter().enumerate() {
        let score = conditional_entropy_with_mask(
            dataset.records.index_axis(Axis(1), feature_idx),
            dataset.targets.view(),
            mask,
        );

        trace!(
            attribute = %dataset.feature_names()[feature_idx],
            conditional_entropy = score,
            "scored candidate"
        );

        // override best candidate only when strictly better
        best = match best.take() {
            None => Some((pos, score)),
            Some((_, best_score)) if score < best_score => Some((pos, score)),
            x => x,
        };
    }

    best.ok_or(TreeError::NoCandidates)
}

/// Returns the name of the candidate attribute with the highest information gain on `dataset`
///
/// Candidates are ranked by their conditional entropy, the first of several equally good
/// candidates is returned. Fails with [`TreeError::NoCandidates`] if `candidates` is empty and
/// with a malformed-dataset error if a candidate is not an attribute of `dataset`.
///
/// ```rust
/// use arbor::Dataset;
/// use arbor_trees::{select_attribute, SplitQuality};
///
/// let dataset = Dataset::from_columns(
///     vec![
///         ("handsome", vec![1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1]),
///         ("height", vec![0, 0, 0, 2, 0, 0, 2, 1, 1, 2, 0, 0]),
///     ],
///     vec![0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0],
/// ).unwrap();
///
/// let best = select_attribute(&dataset, &["handsome", "height"], SplitQuality::InformationGain);
/// assert_eq!(best.unwrap(), "height");
/// ```
pub fn select_attribute<A: Category, L: Label, S: AsRef<str>>(
    dataset: &Dataset<A, L>,
    candidates: &[S],
    split_quality: SplitQuality,
) -> Result<String> {
    dataset.validate()?;

    let indices = candidates
        .iter()
        .map(|name| {
            dataset.feature_index(name.as_ref()).ok_or_else(|| {
                arbor::Error::MalformedDataset(format!(
                    "attribute `{}` is not part of the dataset",
                    name.as_ref()
                ))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mask = vec![true; dataset.nsamples()];
    let (pos, _) = best_candidate(dataset, &mask, &indices, split_quality)?;

    Ok(candidates[pos].as_ref().to_string())
}
