use crate::{
	config::{DuplicatePolicy, StoreConfig},
	error::{Error, Result},
	record::Record,
	AvlTree, InsertResult,
};

/// What `RecordStore::remove_record` found
#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
	Removed(Record),
	NotFound,
	/// The store held no records at all
	TreeEmpty,
}

impl RemoveOutcome {
	/// Turns the misses into errors for callers that treat them as failures
	pub fn into_result(self, id: i64) -> Result<Record> {
		match self {
			RemoveOutcome::Removed(record) => Ok(record),
			RemoveOutcome::NotFound => Err(Error::NotFound { id }),
			RemoveOutcome::TreeEmpty => Err(Error::EmptyTree),
		}
	}
}

/// Records indexed by id, listed in ascending id order
#[derive(Debug, Default)]
pub struct RecordStore {
	index: AvlTree<i64, Record>,
	config: StoreConfig,
}

impl RecordStore {
	pub fn new() -> Self { Self::with_config(StoreConfig::default()) }

	pub fn with_config(config: StoreConfig) -> Self {
		Self {
			index: AvlTree::new(),
			config,
		}
	}

	pub fn config(&self) -> &StoreConfig { &self.config }

	pub fn len(&self) -> usize { self.index.len() }

	pub fn is_empty(&self) -> bool { self.index.is_empty() }

	pub fn add_record(
		&mut self,
		id: i64,
		title: impl Into<String>,
		author: impl Into<String>,
	) -> Result<()> {
		let record = Record::new(id, title, author);

		match self.config.duplicate_policy {
			DuplicatePolicy::Replace => match self.index.insert_or_replace(id, record) {
				Some(_) => tracing::debug!("Replaced record {}", id),
				None => tracing::debug!("Added record {}", id),
			},
			DuplicatePolicy::Keep => match self.index.insert(id, record) {
				InsertResult::Inserted => tracing::debug!("Added record {}", id),
				InsertResult::Existed(_) => {
					tracing::debug!("Record {} already present, keeping the stored one", id)
				}
			},
			DuplicatePolicy::Reject => match self.index.insert(id, record) {
				InsertResult::Inserted => tracing::debug!("Added record {}", id),
				InsertResult::Existed(_) => {
					tracing::debug!("Rejected duplicate record {}", id);
					return Err(Error::DuplicateKey { id });
				}
			},
		}

		self.verify();
		Ok(())
	}

	pub fn remove_record(&mut self, id: i64) -> RemoveOutcome {
		if self.index.is_empty() {
			tracing::debug!("Remove of record {} on an empty store", id);
			return RemoveOutcome::TreeEmpty;
		}

		match self.index.remove(&id) {
			Some((_, record)) => {
				tracing::debug!("Removed record {}", id);
				self.verify();
				RemoveOutcome::Removed(record)
			}
			None => {
				tracing::debug!("Record {} not found for removal", id);
				RemoveOutcome::NotFound
			}
		}
	}

	pub fn find_record(&self, id: i64) -> Option<&Record> { self.index.get(&id) }

	/// Every record in ascending id order
	pub fn list_all(&self) -> impl Iterator<Item = &Record> + '_ {
		self.index.iter().map(|(_, record)| record)
	}

	/// Records with `low <= id <= high` in ascending id order; nothing when `low > high`
	pub fn list_range(&self, low: i64, high: i64) -> impl Iterator<Item = &Record> + '_ {
		self.index.range(low..=high).map(|(_, record)| record)
	}

	pub fn check_invariants(&self) -> Result<()> { self.index.check_invariants() }

	fn verify(&self) {
		if !self.config.verify_invariants {
			return;
		}
		if let Err(e) = self.index.check_invariants() {
			tracing::error!("Index invariant violated after mutation: {}", e);
		}
	}
}
