// Cache module for local filesystem caching.
// Stores the merged article list so repeated launches skip the API.

pub mod paths;
pub mod store;

pub use store::{read_if_fresh, write_record};
