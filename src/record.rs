use std::fmt;

/// A single entry in the record store. Fields are fixed at construction; changing a record means
/// removing it and adding a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
	id: i64,
	title: String,
	author: String,
}

impl Record {
	pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>) -> Self {
		Self {
			id,
			title: title.into(),
			author: author.into(),
		}
	}

	pub fn id(&self) -> i64 { self.id }

	pub fn title(&self) -> &str { &self.title }

	pub fn author(&self) -> &str { &self.author }
}

impl fmt::Display for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "id: {}, title: {}, author: {}", self.id, self.title, self.author)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_lists_every_field() {
		let record = Record::new(42, "Dune", "Frank Herbert");
		assert_eq!(record.to_string(), "id: 42, title: Dune, author: Frank Herbert");
	}

	#[test]
	fn accessors() {
		let record = Record::new(-7, String::from("t"), "a");
		assert_eq!(record.id(), -7);
		assert_eq!(record.title(), "t");
		assert_eq!(record.author(), "a");
	}
}
