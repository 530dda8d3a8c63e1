use ndarray::{ArrayView1, ArrayView2, Axis};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A single example to classify
///
/// Gives access to attribute values by attribute name. Attributes which the sample does not
/// carry return `None`.
pub trait Sample<A> {
    fn value(&self, attribute: &str) -> Option<&A>;
}

impl<A, S: BuildHasher> Sample<A> for HashMap<String, A, S> {
    fn value(&self, attribute: &str) -> Option<&A> {
        self.get(attribute)
    }
}

impl<A> Sample<A> for BTreeMap<String, A> {
    fn value(&self, attribute: &str) -> Option<&A> {
        self.get(attribute)
    }
}

impl<A, T: Sample<A> + ?Sized> Sample<A> for &T {
    fn value(&self, attribute: &str) -> Option<&A> {
        (**self).value(attribute)
    }
}

/// One row of a records matrix, with the attribute names of its columns
#[derive(Debug, Clone)]
pub struct RowSample<'a, A> {
    names: &'a [String],
    values: ArrayView1<'a, A>,
}

impl<'a, A> RowSample<'a, A> {
    pub fn new(names: &'a [String], values: ArrayView1<'a, A>) -> Self {
        RowSample { names, values }
    }
}

impl<'a, A> Sample<A> for RowSample<'a, A> {
    fn value(&self, attribute: &str) -> Option<&A> {
        self.names
            .iter()
            .position(|name| name == attribute)
            .and_then(|idx| self.values.get(idx))
    }
}

/// Iterator over the rows of a records matrix
pub struct Rows<'a, A> {
    names: &'a [String],
    records: ArrayView2<'a, A>,
    idx: usize,
}

impl<'a, A> Rows<'a, A> {
    pub fn new(names: &'a [String], records: ArrayView2<'a, A>) -> Self {
        Rows {
            names,
            records,
            idx: 0,
        }
    }
}

impl<'a, A> Iterator for Rows<'a, A> {
    type Item = RowSample<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.records.nrows() {
            return None;
        }

        let row = self.records.clone().index_axis_move(Axis(0), self.idx);
        self.idx += 1;

        Some(RowSample::new(self.names, row))
    }
}
