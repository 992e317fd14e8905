/// What `RecordStore::add_record` does when the id is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Keep the stored record and drop the new one
	Keep,
	/// Fail with `Error::DuplicateKey`
	Reject,
	/// Overwrite the stored record
	Replace,
}

impl Default for DuplicatePolicy {
	fn default() -> Self { DuplicatePolicy::Keep }
}

/// Configuration for the record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
	/// Handling of ids that already exist (default: Keep)
	pub duplicate_policy: DuplicatePolicy,

	/// Run a full invariant check after every mutation (default: on in debug builds)
	pub verify_invariants: bool,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			duplicate_policy: DuplicatePolicy::default(),
			verify_invariants: cfg!(debug_assertions),
		}
	}
}

impl StoreConfig {
	pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicate_policy = policy;
		self
	}

	pub fn with_verify_invariants(mut self, verify: bool) -> Self {
		self.verify_invariants = verify;
		self
	}
}
