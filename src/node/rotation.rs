use crate::node::{balance_factor, Node};

// Promotes the left child to the root of this subtree
// The left child must be present, otherwise the subtree is returned unchanged
pub fn rotate_right<K, V>(mut y: Box<Node<K, V>>) -> Box<Node<K, V>> {
	let mut x = match y.left.take() {
		Some(x) => x,
		None => {
			debug_assert!(false, "right rotation without a left child");
			return y;
		}
	};

	// x's right subtree sits between x and y so it moves under y
	y.left = x.right.take();
	y.update_height();

	x.right = Some(y);
	x.update_height();

	tracing::trace!(height = x.height(), "rotated right");
	x
}

// Mirror of rotate_right - promotes the right child
pub fn rotate_left<K, V>(mut x: Box<Node<K, V>>) -> Box<Node<K, V>> {
	let mut y = match x.right.take() {
		Some(y) => y,
		None => {
			debug_assert!(false, "left rotation without a right child");
			return x;
		}
	};

	x.right = y.left.take();
	x.update_height();

	y.left = Some(x);
	y.update_height();

	tracing::trace!(height = y.height(), "rotated left");
	y
}

// Restores the balance invariant for a node whose children are already balanced and whose height
// is up to date. Returns the new root of the subtree.
pub fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
	let balance = node.balance_factor();

	if balance > 1 {
		// Left-Right - straighten the left child first
		if balance_factor(&node.left) < 0 {
			node.left = node.left.take().map(rotate_left);
		}
		return rotate_right(node);
	}

	if balance < -1 {
		// Right-Left - straighten the right child first
		if balance_factor(&node.right) > 0 {
			node.right = node.right.take().map(rotate_right);
		}
		return rotate_left(node);
	}

	node
}
