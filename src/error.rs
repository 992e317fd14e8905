use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
	#[error("Record not found: {id}")]
	NotFound { id: i64 },

	#[error("The index is empty")]
	EmptyTree,

	#[error("Duplicate record id: {id}")]
	DuplicateKey { id: i64 },

	#[error("Index corrupted: {0}")]
	Corrupted(String),
}
