pub mod error;
pub mod explorer;
pub mod facts;
pub mod parse;
pub mod testing;
pub mod traits;

pub use error::{ExploreError, ParseError};
pub use explorer::{Exploration, Explorer, Source, DEFAULT_FRESHNESS};
pub use facts::{fact_check_prompt, LlmFactExtractor};
pub use parse::{parse_fact_check, parse_fenced_json};
pub use traits::{ArticleExtractor, ContentFetcher, FactExtractor, ReadabilityExtractor, RecordStore};
