//! Unsorted, multi-child tree container.
//!
//! [`Tree`] holds an opaque value and an ordered list of exclusively owned
//! child subtrees. It imposes no ordering or balancing invariant on
//! children (it is not a search tree); child insertion order is preserved
//! and determines traversal order. Lookup is by value equality, addressed
//! either globally ([`Tree::find`]) or by a path of values from the root
//! ([`Tree::get_from`]). Subtrees can be detached ([`Tree::remove`]) or
//! relocated ([`Tree::move_node`]) without copying.
//!
//! Value types only need the capability an operation uses: `PartialEq`
//! for lookup (including heterogeneous keys via `V: PartialEq<Q>`),
//! `Display` for rendering. Traversal iterators borrow the tree, so
//! structural mutation during iteration is rejected at compile time.
//!
//! ```
//! use bctree::{Order, Tree};
//!
//! let mut root = Tree::new("root");
//! root.add("a").add("a.1");
//! root.add("b");
//!
//! let dfs: Vec<_> = root.iter().map(|node| *node.value()).collect();
//! assert_eq!(dfs, ["root", "a", "a.1", "b"]);
//!
//! root.move_node(&"a", &"b", Order::Dfs)?;
//! assert!(root.get_from(&["root", "a", "b"]).is_some());
//! # Ok::<(), bctree::TreeError>(())
//! ```

pub mod errors;
mod edit;
mod iter;
mod tree;

pub use errors::{TreeError, TreeResult};
pub use iter::{Iter, Order};
pub use tree::Tree;
