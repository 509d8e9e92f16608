use std::collections::VecDeque;

use crate::tree::Tree;

/// Traversal order for iteration and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Depth-first pre-order: a node, then its whole subtree, then the
    /// next sibling.
    #[default]
    Dfs,
    /// Breadth-first level order: a full level before the next.
    Bfs,
}

/// Lazy traversal over borrowed nodes.
///
/// A single pending deque serves both orders: DFS pushes children to the
/// front (in original order, so they come out left to right before the
/// remaining siblings), BFS appends them to the back.
pub struct Iter<'a, V> {
    pending: VecDeque<&'a Tree<V>>,
    order: Order,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: &'a Tree<V>, include_root: bool, order: Order) -> Self {
        let pending = if include_root {
            VecDeque::from([root])
        } else {
            root.children.iter().collect()
        };
        Self { pending, order }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Tree<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop_front()?;
        match self.order {
            Order::Dfs => {
                // Reversed so the front-pushes preserve child order.
                for child in node.children.iter().rev() {
                    self.pending.push_front(child);
                }
            }
            Order::Bfs => self.pending.extend(node.children.iter()),
        }
        Some(node)
    }
}

impl<'a, V> IntoIterator for &'a Tree<V> {
    type Item = &'a Tree<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
