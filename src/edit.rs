//! Structural mutation: relocating and removing subtrees.
//!
//! Nodes keep no parent links, so every mutation re-derives its target
//! position from the root. Endpoints are resolved to index paths (child
//! positions from the root) before anything is touched; a rejected
//! operation therefore leaves the tree completely unmodified.

use std::collections::VecDeque;

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::iter::Order;
use crate::tree::Tree;

impl<V> Tree<V> {
    /// Paired parent/child search: the first node matching `value` in the
    /// given order, together with its parent. A root match has no parent.
    pub(crate) fn find_with_parent<Q>(
        &self,
        value: &Q,
        order: Order,
    ) -> Option<(Option<&Self>, &Self)>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.value == *value {
            return Some((None, self));
        }
        let mut pending: VecDeque<(&Self, &Self)> =
            self.children.iter().map(|child| (self, child)).collect();
        while let Some((parent, node)) = pending.pop_front() {
            if node.value == *value {
                return Some((Some(parent), node));
            }
            match order {
                Order::Dfs => {
                    for child in node.children.iter().rev() {
                        pending.push_front((node, child));
                    }
                }
                Order::Bfs => pending.extend(node.children.iter().map(|child| (node, child))),
            }
        }
        None
    }

    /// Resolves `value` to an index path: the child positions leading from
    /// the root to the first match in the given order. The root itself
    /// resolves to the empty path.
    fn locate<Q>(&self, value: &Q, order: Order) -> Option<Vec<usize>>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.value == *value {
            return Some(Vec::new());
        }
        let mut pending: VecDeque<(Vec<usize>, &Self)> = self
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| (vec![i], child))
            .collect();
        while let Some((path, node)) = pending.pop_front() {
            if node.value == *value {
                return Some(path);
            }
            match order {
                Order::Dfs => {
                    for (i, child) in node.children.iter().enumerate().rev() {
                        let mut child_path = path.clone();
                        child_path.push(i);
                        pending.push_front((child_path, child));
                    }
                }
                Order::Bfs => {
                    for (i, child) in node.children.iter().enumerate() {
                        let mut child_path = path.clone();
                        child_path.push(i);
                        pending.push_back((child_path, child));
                    }
                }
            }
        }
        None
    }

    /// Resolves a value path (as in [`get_from`](Self::get_from)) to an
    /// index path. The root resolves to the empty path.
    fn locate_from<Q>(&self, path: &[Q]) -> Option<Vec<usize>>
    where
        V: PartialEq<Q>,
    {
        let (first, rest) = path.split_first()?;
        if self.value != *first {
            return None;
        }
        let mut indices = Vec::with_capacity(rest.len());
        let mut current = self;
        for step in rest {
            let i = current
                .children
                .iter()
                .position(|child| child.value == *step)?;
            indices.push(i);
            current = &current.children[i];
        }
        Some(indices)
    }

    fn node_at_mut(&mut self, path: &[usize]) -> &mut Self {
        let mut current = self;
        for &i in path {
            current = &mut current.children[i];
        }
        current
    }

    /// Detaches the node at `path`, returning it with its whole subtree.
    /// Callers guarantee a non-empty, in-bounds path.
    fn remove_at(&mut self, path: &[usize]) -> Self {
        let (last, parents) = path
            .split_last()
            .expect("detach path must not address the root");
        self.node_at_mut(parents).children.remove(*last)
    }

    /// Detaches the subtree at `src` and appends it to the children of the
    /// node at `dst`. Both are index paths into the current tree.
    fn relocate(&mut self, src: &[usize], dst: &[usize]) -> TreeResult<()> {
        if src.is_empty() {
            return Err(TreeError::InvalidOperation);
        }
        if dst.starts_with(src) {
            return Err(TreeError::CycleRejected);
        }
        let mut dst = dst.to_vec();
        let pivot = src.len() - 1;
        // Detaching src shifts later siblings on the shared level down by one.
        if dst.len() > pivot && dst[..pivot] == src[..pivot] && dst[pivot] > src[pivot] {
            dst[pivot] -= 1;
        }
        let subtree = self.remove_at(src);
        self.node_at_mut(&dst).children.push(subtree);
        Ok(())
    }

    /// Relocates the first subtree matching `src` to become the last child
    /// of the first node matching `dst`, both resolved by search in the
    /// given order.
    ///
    /// Fails without mutating if `src` equals the root value
    /// ([`TreeError::InvalidOperation`]), if either endpoint is absent
    /// ([`TreeError::NotFound`]), or if the resolved destination is the
    /// source node itself or one of its descendants
    /// ([`TreeError::CycleRejected`]).
    #[instrument(level = "debug", skip_all)]
    pub fn move_node<Q>(&mut self, dst: &Q, src: &Q, order: Order) -> TreeResult<()>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.value == *src {
            return Err(TreeError::InvalidOperation);
        }
        let src_path = self
            .locate(src, order)
            .ok_or(TreeError::NotFound("move source"))?;
        let dst_path = self
            .locate(dst, order)
            .ok_or(TreeError::NotFound("move destination"))?;
        self.relocate(&src_path, &dst_path)
    }

    /// Path-addressed variant of [`move_node`](Self::move_node): both
    /// endpoints are value paths as in [`get_from`](Self::get_from). The
    /// same root-move and cycle restrictions apply.
    #[instrument(level = "debug", skip_all)]
    pub fn move_from<Q>(&mut self, dst_path: &[Q], src_path: &[Q]) -> TreeResult<()>
    where
        V: PartialEq<Q>,
    {
        let src = self
            .locate_from(src_path)
            .ok_or(TreeError::NotFound("move source path"))?;
        let dst = self
            .locate_from(dst_path)
            .ok_or(TreeError::NotFound("move destination path"))?;
        self.relocate(&src, &dst)
    }

    /// Detaches and returns the first subtree matching `value` (depth-first,
    /// root excluded). The caller owns the returned subtree, descendants
    /// intact.
    ///
    /// Fails with [`TreeError::InvalidOperation`] if `value` equals the
    /// root value and [`TreeError::NotFound`] if nothing matches.
    #[instrument(level = "debug", skip_all)]
    pub fn remove<Q>(&mut self, value: &Q) -> TreeResult<Tree<V>>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.value == *value {
            return Err(TreeError::InvalidOperation);
        }
        let path = self
            .locate(value, Order::Dfs)
            .ok_or(TreeError::NotFound("removal target"))?;
        Ok(self.remove_at(&path))
    }

    /// Path-addressed removal. An unresolved path fails with
    /// [`TreeError::NotFound`]; a path resolving to the root itself has no
    /// parent to detach from and fails with [`TreeError::InvalidOperation`].
    #[instrument(level = "debug", skip_all)]
    pub fn remove_from<Q>(&mut self, path: &[Q]) -> TreeResult<Tree<V>>
    where
        V: PartialEq<Q>,
    {
        let indices = self
            .locate_from(path)
            .ok_or(TreeError::NotFound("removal path"))?;
        if indices.is_empty() {
            return Err(TreeError::InvalidOperation);
        }
        Ok(self.remove_at(&indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    // ├── a
    // │   └── a.1
    // ├── b
    // │   └── b.1
    // └── c
    fn sample() -> Tree<&'static str> {
        let mut root = Tree::new("root");
        root.add("a").add("a.1");
        root.add("b").add("b.1");
        root.add("c");
        root
    }

    #[test]
    fn test_find_with_parent_pairs() {
        let tree = sample();
        let (parent, node) = tree.find_with_parent(&"b.1", Order::Dfs).unwrap();
        assert_eq!(parent.unwrap().value(), &"b");
        assert_eq!(node.value(), &"b.1");
    }

    #[test]
    fn test_find_with_parent_root_has_none() {
        let tree = sample();
        let (parent, node) = tree.find_with_parent(&"root", Order::Bfs).unwrap();
        assert!(parent.is_none());
        assert!(std::ptr::eq(node, &tree));
    }

    #[test]
    fn test_locate_respects_order() {
        // Duplicate value "x" at depth 2 (under a) and depth 1 (last child):
        // DFS reaches the deep one first, BFS the shallow one.
        let mut tree = sample();
        tree.add_to(&["root", "a"], "x").unwrap();
        tree.add("x");
        assert_eq!(tree.locate(&"x", Order::Dfs).unwrap(), [0, 1]);
        assert_eq!(tree.locate(&"x", Order::Bfs).unwrap(), [3]);
    }

    #[test]
    fn test_locate_from_maps_values_to_indices() {
        let tree = sample();
        assert_eq!(tree.locate_from(&["root", "b", "b.1"]).unwrap(), [1, 0]);
        assert!(tree.locate_from(&["root"]).unwrap().is_empty());
        assert!(tree.locate_from(&["root", "nope"]).is_none());
    }

    #[test]
    fn test_relocate_adjusts_shifted_sibling_index() {
        // Moving "a" under "c": c sits after a on the same level, so its
        // index shifts down when a is detached.
        let mut tree = sample();
        tree.move_node(&"c", &"a", Order::Dfs).unwrap();
        assert!(tree.get_from(&["root", "c", "a", "a.1"]).is_some());
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_relocate_earlier_sibling_unaffected() {
        let mut tree = sample();
        tree.move_node(&"a", &"c", Order::Dfs).unwrap();
        assert!(tree.get_from(&["root", "a", "c"]).is_some());
        assert!(tree.get_from(&["root", "c"]).is_none());
    }

    #[test]
    fn test_move_into_own_descendant_rejected() {
        let mut tree = sample();
        let before: Vec<_> = tree.iter().map(|n| *n.value()).collect();
        assert_eq!(
            tree.move_node(&"a.1", &"a", Order::Dfs),
            Err(TreeError::CycleRejected)
        );
        assert_eq!(
            tree.move_node(&"a", &"a", Order::Bfs),
            Err(TreeError::CycleRejected)
        );
        let after: Vec<_> = tree.iter().map(|n| *n.value()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_root_rejected() {
        let mut tree = sample();
        assert_eq!(
            tree.move_node(&"a", &"root", Order::Dfs),
            Err(TreeError::InvalidOperation)
        );
        assert_eq!(
            tree.move_from(&["root", "a"], &["root"]),
            Err(TreeError::InvalidOperation)
        );
    }

    #[test]
    fn test_move_missing_endpoints() {
        let mut tree = sample();
        assert!(matches!(
            tree.move_node(&"a", &"ghost", Order::Dfs),
            Err(TreeError::NotFound(_))
        ));
        assert!(matches!(
            tree.move_node(&"ghost", &"a", Order::Dfs),
            Err(TreeError::NotFound(_))
        ));
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_remove_returns_intact_subtree() {
        let mut tree = sample();
        let detached = tree.remove(&"a").unwrap();
        let values: Vec<_> = detached.iter().map(|n| *n.value()).collect();
        assert_eq!(values, ["a", "a.1"]);
        assert!(tree.find(&"a", Order::Dfs).is_none());
        assert!(tree.find(&"a.1", Order::Bfs).is_none());
    }

    #[test]
    fn test_remove_root_rejected() {
        let mut tree = sample();
        assert_eq!(tree.remove(&"root"), Err(TreeError::InvalidOperation));
        assert_eq!(
            tree.remove_from(&["root"]),
            Err(TreeError::InvalidOperation)
        );
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_remove_from_unresolved_path() {
        let mut tree = sample();
        assert!(matches!(
            tree.remove_from(&["root", "a", "nope"]),
            Err(TreeError::NotFound(_))
        ));
        assert!(matches!(
            tree.remove_from(&[] as &[&str]),
            Err(TreeError::NotFound(_))
        ));
    }
}
