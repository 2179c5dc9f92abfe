/// Page caching layer
///
/// Redis-backed cache for the rendered home feed, with a fixed TTL and an
/// explicit clear operation for the admin/test surface.
mod page_cache;

pub use page_cache::PageCache;
