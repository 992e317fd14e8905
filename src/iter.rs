use crate::node::Node;
use std::{
	iter::FusedIterator,
	ops::{Bound, RangeBounds},
};

/// Ascending iterator over every entry of an `AvlTree`
pub struct Iter<'a, K, V> {
	// Nodes whose left subtree has been fully pushed, smallest on top
	stack: Vec<&'a Node<K, V>>,
	remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
	pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
		let mut iter = Self {
			stack: Vec::new(),
			remaining: len,
		};
		iter.push_left_spine(root);
		iter
	}

	fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
		while let Some(node) = link {
			self.stack.push(node);
			link = node.left();
		}
	}
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.push_left_spine(node.right());
		self.remaining -= 1;
		Some((node.key(), node.value()))
	}

	fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
	fn clone(&self) -> Self {
		Self {
			stack: self.stack.clone(),
			remaining: self.remaining,
		}
	}
}

/// Ascending iterator over the entries of an `AvlTree` whose keys fall inside a range.
///
/// Subtrees that cannot hold a key inside the range are never visited.
pub struct Range<'a, K, V, R> {
	stack: Vec<&'a Node<K, V>>,
	bounds: R,
}

impl<'a, K, V, R> Range<'a, K, V, R>
where
	K: Ord,
	R: RangeBounds<K>,
{
	pub(crate) fn new(root: Option<&'a Node<K, V>>, bounds: R) -> Self {
		let mut stack = Vec::new();
		push_from_start(&mut stack, bounds.start_bound(), root);
		Self { stack, bounds }
	}
}

// Pushes the path to the smallest key at or after the start bound
fn push_from_start<'a, K, V>(
	stack: &mut Vec<&'a Node<K, V>>,
	start: Bound<&K>,
	mut link: Option<&'a Node<K, V>>,
) where
	K: Ord,
{
	while let Some(node) = link {
		let key = node.key();
		let after_start = match start {
			Bound::Included(start) => key >= start,
			Bound::Excluded(start) => key > start,
			Bound::Unbounded => true,
		};

		if !after_start {
			// Node and its whole left subtree are before the range
			link = node.right();
			continue;
		}

		stack.push(node);

		// The left subtree only holds keys below this one
		link = match start {
			Bound::Included(start) | Bound::Excluded(start) if key <= start => None,
			_ => node.left(),
		};
	}
}

impl<'a, K, V, R> Iterator for Range<'a, K, V, R>
where
	K: Ord,
	R: RangeBounds<K>,
{
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		let key = node.key();

		let (before_end, right_may_match) = match self.bounds.end_bound() {
			Bound::Included(end) => (key <= end, key < end),
			Bound::Excluded(end) => (key < end, key < end),
			Bound::Unbounded => (true, true),
		};

		if !before_end {
			// Everything left on the stack is larger still
			self.stack.clear();
			return None;
		}

		if right_may_match {
			push_from_start(&mut self.stack, self.bounds.start_bound(), node.right());
		}

		Some((key, node.value()))
	}
}

impl<K, V, R> FusedIterator for Range<'_, K, V, R>
where
	K: Ord,
	R: RangeBounds<K>,
{
}
