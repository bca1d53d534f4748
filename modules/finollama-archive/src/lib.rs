pub mod error;
pub mod fetch;
mod readability;
pub mod store;

pub use error::{ArchiveError, FetchError, Result};
pub use fetch::PageFetcher;
pub use readability::html_to_text;
pub use store::PgContentStore;
