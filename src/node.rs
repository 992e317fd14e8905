pub mod rotation;

use crate::error::{Error, Result};
use rotation::rebalance;
use std::{cmp::Ordering, mem::replace};

pub type Link<K, V> = Option<Box<Node<K, V>>>;

// Invariants, for every node reachable from a root:
// keys in `left` are strictly less than `key`, keys in `right` strictly greater
// height == 1 + max(height(left), height(right))
// |height(left) - height(right)| <= 1
#[derive(Debug, Clone)]
pub struct Node<K, V> {
	key: K,
	value: V,
	height: u8,
	left: Link<K, V>,
	right: Link<K, V>,
}

#[must_use]
pub enum NodeInsertResult<V> {
	Inserted,
	// Carries the value that was not stored
	Existed(V),
	// Carries the value that was overwritten
	Replaced(V),
}

#[must_use]
pub enum NodeRemoveResult<K, V> {
	NotThere,
	Removed(K, V),
}

pub fn height<K, V>(link: &Link<K, V>) -> u8 {
	match link {
		Some(node) => node.height,
		None => 0,
	}
}

pub fn balance_factor<K, V>(link: &Link<K, V>) -> i16 {
	match link {
		Some(node) => node.balance_factor(),
		None => 0,
	}
}

impl<K, V> Node<K, V> {
	pub fn new(key: K, value: V) -> Self {
		Self {
			key,
			value,
			height: 1,
			left: None,
			right: None,
		}
	}

	pub fn key(&self) -> &K { &self.key }

	pub fn value(&self) -> &V { &self.value }

	pub fn height(&self) -> u8 { self.height }

	pub fn left(&self) -> Option<&Node<K, V>> { self.left.as_deref() }

	pub fn right(&self) -> Option<&Node<K, V>> { self.right.as_deref() }

	pub fn balance_factor(&self) -> i16 { height(&self.left) as i16 - height(&self.right) as i16 }

	pub fn update_height(&mut self) { self.height = 1 + height(&self.left).max(height(&self.right)) }

	pub fn into_entry(self) -> (K, V) { (self.key, self.value) }
}

pub fn get<'a, K, V>(mut link: Option<&'a Node<K, V>>, key: &K) -> Option<&'a Node<K, V>>
where
	K: Ord,
{
	while let Some(node) = link {
		link = match key.cmp(&node.key) {
			Ordering::Less => node.left(),
			Ordering::Greater => node.right(),
			Ordering::Equal => return Some(node),
		};
	}
	None
}

pub fn insert<K, V>(
	link: Link<K, V>,
	key: K,
	value: V,
	overwrite: bool,
) -> (Box<Node<K, V>>, NodeInsertResult<V>)
where
	K: Ord,
{
	let mut node = match link {
		None => return (Box::new(Node::new(key, value)), NodeInsertResult::Inserted),
		Some(node) => node,
	};

	let result = match key.cmp(&node.key) {
		Ordering::Less => {
			let (child, result) = insert(node.left.take(), key, value, overwrite);
			node.left = Some(child);
			result
		}
		Ordering::Greater => {
			let (child, result) = insert(node.right.take(), key, value, overwrite);
			node.right = Some(child);
			result
		}
		Ordering::Equal => {
			// Key exists already - the shape of the tree is untouched
			let result = match overwrite {
				true => NodeInsertResult::Replaced(replace(&mut node.value, value)),
				false => NodeInsertResult::Existed(value),
			};
			return (node, result);
		}
	};

	match result {
		NodeInsertResult::Inserted => {
			node.update_height();
			(rebalance(node), result)
		}
		_ => (node, result),
	}
}

pub fn remove<K, V>(link: Link<K, V>, key: &K) -> (Link<K, V>, NodeRemoveResult<K, V>)
where
	K: Ord,
{
	let mut node = match link {
		None => return (None, NodeRemoveResult::NotThere),
		Some(node) => node,
	};

	let result = match key.cmp(&node.key) {
		Ordering::Less => {
			let (child, result) = remove(node.left.take(), key);
			node.left = child;
			result
		}
		Ordering::Greater => {
			let (child, result) = remove(node.right.take(), key);
			node.right = child;
			result
		}
		Ordering::Equal => match (node.left.take(), node.right.take()) {
			(None, None) => return (None, remove_entry(node)),
			// The sole child takes this node's place
			(Some(child), None) | (None, Some(child)) => return (Some(child), remove_entry(node)),
			(Some(left), Some(right)) => {
				// Move the in-order successor's entry into this node
				let (right, successor) = take_min(right);
				let (successor_key, successor_value) = successor.into_entry();
				let key = replace(&mut node.key, successor_key);
				let value = replace(&mut node.value, successor_value);
				node.left = Some(left);
				node.right = right;
				NodeRemoveResult::Removed(key, value)
			}
		},
	};

	match result {
		NodeRemoveResult::NotThere => (Some(node), result),
		NodeRemoveResult::Removed(..) => {
			node.update_height();
			(Some(rebalance(node)), result)
		}
	}
}

fn remove_entry<K, V>(node: Box<Node<K, V>>) -> NodeRemoveResult<K, V> {
	let (key, value) = node.into_entry();
	NodeRemoveResult::Removed(key, value)
}

// Detaches the minimum node of a subtree, returning the rebalanced remainder and the detached node
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
	match node.left.take() {
		None => {
			let right = node.right.take();
			(right, node)
		}
		Some(left) => {
			let (left, min) = take_min(left);
			node.left = left;
			node.update_height();
			(Some(rebalance(node)), min)
		}
	}
}

pub fn first<K, V>(mut node: &Node<K, V>) -> &Node<K, V> {
	while let Some(left) = node.left() {
		node = left;
	}
	node
}

pub fn last<K, V>(mut node: &Node<K, V>) -> &Node<K, V> {
	while let Some(right) = node.right() {
		node = right;
	}
	node
}

// Walks the whole subtree, returning (height, node count) when every invariant holds
pub fn check<K, V>(link: &Link<K, V>, lower: Option<&K>, upper: Option<&K>) -> Result<(u8, usize)>
where
	K: Ord,
{
	let node = match link {
		None => return Ok((0, 0)),
		Some(node) => node,
	};

	if lower.map_or(false, |lower| node.key <= *lower) {
		return Err(Error::Corrupted(String::from(
			"key is not greater than every key of the subtree it is right of",
		)));
	}
	if upper.map_or(false, |upper| node.key >= *upper) {
		return Err(Error::Corrupted(String::from(
			"key is not less than every key of the subtree it is left of",
		)));
	}

	let (left_height, left_count) = check(&node.left, lower, Some(&node.key))?;
	let (right_height, right_count) = check(&node.right, Some(&node.key), upper)?;

	let expected = 1 + left_height.max(right_height);
	if node.height != expected {
		return Err(Error::Corrupted(format!(
			"cached height {} does not match computed height {}",
			node.height, expected
		)));
	}

	let balance = left_height as i16 - right_height as i16;
	if balance.abs() > 1 {
		return Err(Error::Corrupted(format!("balance factor {} out of range", balance)));
	}

	Ok((expected, left_count + right_count + 1))
}
