/// Administrative surface
use crate::cache::PageCache;
use crate::error::Result;
use actix_web::{web, HttpResponse};

/// Flush every cached home-feed page. Used by the admin/test surface; the
/// next request re-renders from the persistence layer.
pub async fn flush_page_cache(cache: web::Data<PageCache>) -> Result<HttpResponse> {
    let removed = cache.clear().await?;
    tracing::info!(removed, "page cache flushed");
    Ok(HttpResponse::NoContent().finish())
}
