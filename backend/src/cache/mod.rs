mod etag;
mod structs;

pub use etag::{etag_for_text, generate_etag, matches_if_none_match};
pub use structs::{cache_key, CacheEntry, TtlCache};
