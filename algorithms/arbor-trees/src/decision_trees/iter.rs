use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;
use arbor::{Category, Label};

/// Level-order (BFT) iterator of nodes in a decision tree
///
/// Children are visited in the order of their branches.
pub struct NodeIter<'a, A, L> {
    queue: VecDeque<&'a TreeNode<A, L>>,
}

impl<'a, A, L> NodeIter<'a, A, L> {
    pub fn new(queue: VecDeque<&'a TreeNode<A, L>>) -> Self {
        NodeIter { queue }
    }
}

impl<'a, A: Category, L: Label> Iterator for NodeIter<'a, A, L> {
    type Item = &'a TreeNode<A, L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            self.queue
                .extend(node.children().iter().map(|(_, child)| child));

            node
        })
    }
}
