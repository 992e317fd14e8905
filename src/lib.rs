mod config;
mod error;
mod iter;
mod node;
mod record;
mod store;

pub use config::{DuplicatePolicy, StoreConfig};
pub use error::{Error, Result};
pub use iter::{Iter, Range};
pub use record::Record;
pub use store::{RecordStore, RemoveOutcome};

use node::{Link, NodeInsertResult, NodeRemoveResult};
use std::{fmt::Debug, iter::FromIterator, ops::RangeBounds};

/// An ordered map kept height-balanced (AVL) under every insert and remove
#[derive(Clone)]
pub struct AvlTree<K, V> {
	root: Link<K, V>,
	len: usize,
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum InsertResult<V> {
	Inserted,
	/// The key was already present; the value passed in was not stored and is handed back
	Existed(V),
}

impl<K, V> AvlTree<K, V> {
	pub fn new() -> Self { Self { root: None, len: 0 } }

	pub fn len(&self) -> usize { self.len }

	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Number of levels, 0 for an empty tree
	pub fn height(&self) -> u8 { node::height(&self.root) }

	pub fn clear(&mut self) {
		self.root = None;
		self.len = 0;
	}

	pub fn iter(&self) -> Iter<'_, K, V> { Iter::new(self.root.as_deref(), self.len) }

	pub fn first(&self) -> Option<(&K, &V)> {
		self.root
			.as_deref()
			.map(node::first)
			.map(|node| (node.key(), node.value()))
	}

	pub fn last(&self) -> Option<(&K, &V)> {
		self.root
			.as_deref()
			.map(node::last)
			.map(|node| (node.key(), node.value()))
	}
}

impl<K, V> AvlTree<K, V>
where
	K: Ord,
{
	/// Inserts a new entry. An existing entry for the key is left as it is.
	pub fn insert(&mut self, key: K, value: V) -> InsertResult<V> {
		match self.insert_node(key, value, false) {
			NodeInsertResult::Inserted => InsertResult::Inserted,
			NodeInsertResult::Existed(rejected) | NodeInsertResult::Replaced(rejected) => {
				InsertResult::Existed(rejected)
			}
		}
	}

	/// Inserts an entry, overwriting and returning the previous value for the key
	pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V> {
		match self.insert_node(key, value, true) {
			NodeInsertResult::Inserted => None,
			NodeInsertResult::Replaced(old) | NodeInsertResult::Existed(old) => Some(old),
		}
	}

	fn insert_node(&mut self, key: K, value: V, overwrite: bool) -> NodeInsertResult<V> {
		let (root, result) = node::insert(self.root.take(), key, value, overwrite);
		self.root = Some(root);
		if let NodeInsertResult::Inserted = result {
			self.len += 1;
		}
		result
	}

	pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
		let (root, result) = node::remove(self.root.take(), key);
		self.root = root;
		match result {
			NodeRemoveResult::NotThere => None,
			NodeRemoveResult::Removed(key, value) => {
				self.len -= 1;
				Some((key, value))
			}
		}
	}

	pub fn get(&self, key: &K) -> Option<&V> {
		node::get(self.root.as_deref(), key).map(|node| node.value())
	}

	pub fn contains_key(&self, key: &K) -> bool { self.get(key).is_some() }

	/// Entries with keys inside `bounds`, ascending. An inverted range yields nothing.
	pub fn range<R>(&self, bounds: R) -> Range<'_, K, V, R>
	where
		R: RangeBounds<K>,
	{
		Range::new(self.root.as_deref(), bounds)
	}

	/// Walks the whole tree and verifies ordering, cached heights, balance and the entry count
	pub fn check_invariants(&self) -> Result<()> {
		let (_, count) = node::check(&self.root, None, None)?;
		if count != self.len {
			return Err(Error::Corrupted(format!(
				"tracked length {} but found {} nodes",
				self.len, count
			)));
		}
		Ok(())
	}
}

impl<K, V> Default for AvlTree<K, V> {
	fn default() -> Self { Self::new() }
}

impl<K, V> Debug for AvlTree<K, V>
where
	K: Debug,
	V: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
	type IntoIter = Iter<'a, K, V>;
	type Item = (&'a K, &'a V);

	fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<K, V> FromIterator<(K, V)> for AvlTree<K, V>
where
	K: Ord,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut tree = Self::new();
		tree.extend(iter);
		tree
	}
}

impl<K, V> Extend<(K, V)> for AvlTree<K, V>
where
	K: Ord,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			// First value for a key wins
			let _ = self.insert(key, value);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn shape(tree: &AvlTree<i32, &str>) -> (i32, Option<i32>, Option<i32>) {
		let root = tree.root.as_deref().expect("tree is not empty");
		(
			*root.key(),
			root.left().map(|n| *n.key()),
			root.right().map(|n| *n.key()),
		)
	}

	fn built_from(keys: &[i32]) -> AvlTree<i32, &'static str> {
		let mut tree = AvlTree::new();
		for &key in keys {
			assert_eq!(tree.insert(key, "v"), InsertResult::Inserted);
		}
		tree
	}

	#[test]
	fn ascending_inserts_rotate_left() {
		let tree = built_from(&[10, 20, 30]);
		assert_eq!(shape(&tree), (20, Some(10), Some(30)));
		assert_eq!(tree.height(), 2);
		let root = tree.root.as_deref().expect("tree is not empty");
		assert_eq!(root.left().map(|n| n.height()), Some(1));
		assert_eq!(root.right().map(|n| n.height()), Some(1));
	}

	#[test]
	fn descending_inserts_rotate_right() {
		let tree = built_from(&[30, 20, 10]);
		assert_eq!(shape(&tree), (20, Some(10), Some(30)));
		assert_eq!(tree.height(), 2);
	}

	#[test]
	fn left_right_case_rotates_twice() {
		let tree = built_from(&[30, 10, 20]);
		assert_eq!(shape(&tree), (20, Some(10), Some(30)));
		assert_eq!(tree.height(), 2);
	}

	#[test]
	fn right_left_case_rotates_twice() {
		let tree = built_from(&[10, 30, 20]);
		assert_eq!(shape(&tree), (20, Some(10), Some(30)));
	}

	#[test]
	fn duplicate_insert_keeps_first_value() {
		let mut tree = built_from(&[1, 2, 3]);
		assert_eq!(tree.insert(2, "other"), InsertResult::Existed("other"));
		assert_eq!(tree.get(&2), Some(&"v"));
		assert_eq!(tree.len(), 3);
		assert_eq!(shape(&tree), (2, Some(1), Some(3)));
	}

	#[test]
	fn insert_or_replace_overwrites() {
		let mut tree = built_from(&[1, 2, 3]);
		assert_eq!(tree.insert_or_replace(2, "new"), Some("v"));
		assert_eq!(tree.insert_or_replace(4, "four"), None);
		assert_eq!(tree.get(&2), Some(&"new"));
		assert_eq!(tree.len(), 4);
	}

	#[test]
	fn remove_reports_missing_keys() {
		let mut tree = built_from(&[1, 2, 3]);
		assert_eq!(tree.remove(&9), None);
		assert_eq!(tree.remove(&2), Some((2, "v")));
		assert_eq!(tree.remove(&2), None);
		assert_eq!(tree.len(), 2);
		assert!(tree.check_invariants().is_ok());
	}

	#[test]
	fn remove_from_empty_tree() {
		let mut tree: AvlTree<i32, &str> = AvlTree::new();
		assert_eq!(tree.remove(&1), None);
		assert!(tree.is_empty());
		assert_eq!(tree.height(), 0);
	}

	#[test]
	fn first_last_and_clear() {
		let mut tree = built_from(&[8, 3, 12, 1]);
		assert_eq!(tree.first(), Some((&1, &"v")));
		assert_eq!(tree.last(), Some((&12, &"v")));

		tree.clear();
		assert!(tree.is_empty());
		assert_eq!(tree.first(), None);
		assert!(tree.check_invariants().is_ok());
	}

	#[test]
	fn stale_length_is_reported() {
		let mut tree = built_from(&[1, 2]);
		tree.len = 5;
		assert!(matches!(tree.check_invariants(), Err(Error::Corrupted(_))));
	}

	#[test]
	fn debug_lists_entries_in_order() {
		let tree: AvlTree<i32, i32> = vec![(2, 20), (1, 10)].into_iter().collect();
		assert_eq!(format!("{:?}", tree), "{1: 10, 2: 20}");
	}

	#[test]
	fn clone_is_independent() {
		let mut tree = built_from(&[1, 2, 3]);
		let copy = tree.clone();
		let _ = tree.remove(&1);
		assert_eq!(copy.len(), 3);
		assert!(copy.contains_key(&1));
		assert!(copy.check_invariants().is_ok());
	}

	#[test]
	fn sequential_inserts_stay_shallow() {
		let tree: AvlTree<u32, u32> = (0..100_000).map(|k| (k, k)).collect();
		assert!(tree.height() <= 25);
		assert!(tree.check_invariants().is_ok());
	}
}
