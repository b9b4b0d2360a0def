use crate::walker::SearchNode;
use std::collections::VecDeque;

/// Open list kept in ascending key order. A new node goes in front of the first entry with a
/// strictly greater key, so nodes with equal keys are expanded in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct SortedOpenList {
    nodes: VecDeque<(u32, SearchNode)>,
}

impl SortedOpenList {
    pub fn insert(&mut self, key: u32, node: SearchNode) {
        let ix = self.nodes.partition_point(|(k, _)| *k <= key);
        self.nodes.insert(ix, (key, node));
    }

    pub fn pop_front(&mut self) -> Option<SearchNode> {
        self.nodes.pop_front().map(|(_, node)| node)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> Vec<SearchNode> {
        self.nodes.iter().map(|(_, node)| *node).collect()
    }

    #[cfg(test)]
    pub fn keys(&self) -> Vec<u32> {
        self.nodes.iter().map(|(key, _)| *key).collect()
    }
}
