use std::fmt;

use tracing::instrument;

use crate::iter::{Iter, Order};

/// A node of an unsorted, multi-child tree.
///
/// Each node holds an opaque value and exclusively owns an ordered list of
/// child subtrees. There are no parent links and no shared ownership;
/// detaching or relocating a subtree is a plain ownership transfer.
/// Insertion order of children is preserved and determines traversal order.
///
/// Equality compares values only, never children. Values may repeat across
/// the tree; lookups return the first match in the traversal order used.
#[derive(Debug, Clone)]
pub struct Tree<V> {
    pub(crate) value: V,
    pub(crate) children: Vec<Tree<V>>,
}

impl<V> Tree<V> {
    /// Creates a leaf node carrying `value`.
    pub fn new(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Immediate children, in insertion order.
    pub fn children(&self) -> &[Tree<V>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a new leaf child with the given value.
    ///
    /// The parent keeps ownership; the returned reference allows building
    /// nested structures in one expression: `root.add("a").add("a.1")`.
    pub fn add(&mut self, value: V) -> &mut Tree<V> {
        self.extend(Tree::new(value))
    }

    /// Appends an existing subtree as the last immediate child, taking
    /// ownership of it.
    pub fn extend(&mut self, subtree: Tree<V>) -> &mut Tree<V> {
        let idx = self.children.len();
        self.children.push(subtree);
        &mut self.children[idx]
    }

    /// Gets the node matching `value`: `self` if its own value matches,
    /// otherwise the first matching *immediate* child. Not recursive.
    #[instrument(level = "trace", skip_all)]
    pub fn get<Q>(&self, value: &Q) -> Option<&Tree<V>>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.value == *value {
            return Some(self);
        }
        self.children.iter().find(|child| child.value == *value)
    }

    /// Resolves a path of values starting at this node.
    ///
    /// `path[0]` must equal this node's value; each following element
    /// selects the first immediate child with an equal value. An empty
    /// path or any unmatched step resolves to `None`. A single-element
    /// path equal to the root value returns `self`.
    #[instrument(level = "trace", skip_all)]
    pub fn get_from<Q>(&self, path: &[Q]) -> Option<&Tree<V>>
    where
        V: PartialEq<Q>,
    {
        let (first, rest) = path.split_first()?;
        if self.value != *first {
            return None;
        }
        let mut current = self;
        for step in rest {
            current = current.children.iter().find(|child| child.value == *step)?;
        }
        Some(current)
    }

    /// Mutable variant of [`get_from`](Self::get_from), same resolution rules.
    #[instrument(level = "trace", skip_all)]
    pub fn get_from_mut<Q>(&mut self, path: &[Q]) -> Option<&mut Tree<V>>
    where
        V: PartialEq<Q>,
    {
        let (first, rest) = path.split_first()?;
        if self.value != *first {
            return None;
        }
        let mut current = self;
        for step in rest {
            current = current
                .children
                .iter_mut()
                .find(|child| child.value == *step)?;
        }
        Some(current)
    }

    /// Adds `value` as a new leaf child of the node the path resolves to.
    ///
    /// Returns the new child, or `None` without mutating if the path does
    /// not resolve.
    #[instrument(level = "debug", skip_all)]
    pub fn add_to<Q>(&mut self, path: &[Q], value: V) -> Option<&mut Tree<V>>
    where
        V: PartialEq<Q>,
    {
        let parent = self.get_from_mut(path)?;
        Some(parent.add(value))
    }

    /// Finds the first node matching `value` anywhere in the tree.
    ///
    /// The root matches before any traversal; otherwise the tree is walked
    /// (root excluded) in the requested order and the first match wins.
    #[instrument(level = "trace", skip_all)]
    pub fn find<Q>(&self, value: &Q, order: Order) -> Option<&Tree<V>>
    where
        V: PartialEq<Q>,
        Q: ?Sized,
    {
        self.find_with_parent(value, order).map(|(_, node)| node)
    }

    /// Lazily traverses the tree in the given order.
    ///
    /// The iterator borrows the tree, so structural mutation while it is
    /// alive is rejected at compile time.
    pub fn iterate(&self, include_root: bool, order: Order) -> Iter<'_, V> {
        Iter::new(self, include_root, order)
    }

    /// Default traversal: depth-first pre-order, root included.
    pub fn iter(&self) -> Iter<'_, V> {
        self.iterate(true, Order::Dfs)
    }

    /// Total number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth of the tree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Values of all leaf nodes, in depth-first order.
    pub fn leaf_values(&self) -> Vec<&V> {
        if self.children.is_empty() {
            vec![&self.value]
        } else {
            let mut leaves = Vec::new();
            for child in &self.children {
                leaves.extend(child.leaf_values());
            }
            leaves
        }
    }
}

/// Equality relies on matching values only, not children.
impl<V: PartialEq> PartialEq for Tree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Tree<V> {}

impl<V: fmt::Display> Tree<V> {
    fn to_termtree(&self) -> termtree::Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|child| child.to_termtree())
            .collect();
        termtree::Tree::new(self.value.to_string()).with_leaves(leaves)
    }
}

impl<V: fmt::Display> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_termtree())
    }
}
