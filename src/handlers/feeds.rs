/// Feed handlers - the four paginated listings
use crate::cache::PageCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics::FEED_REQUEST_TOTAL;
use crate::pagination::PageQuery;
use crate::services::{FeedService, FollowService, GroupService, UserService};
use crate::session::{CurrentUser, Viewer};
use crate::views::{FollowPage, GroupPage, IndexPage, Pagination, PostCard, ProfilePage};
use actix_web::{web, HttpResponse};
use askama::Template;
use sqlx::PgPool;

/// Global feed, served from the page cache within the TTL.
///
/// The cache key is the requested page number (pre-clamping), mirroring
/// per-URL caching; a cache failure degrades to an uncached rebuild.
pub async fn index(
    pool: web::Data<PgPool>,
    cache: web::Data<PageCache>,
    config: web::Data<Config>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    FEED_REQUEST_TOTAL.with_label_values(&["index"]).inc();

    let requested = query.page.as_deref();
    let cache_page = requested
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1);

    if let Ok(Some(body)) = cache.get(cache_page).await {
        return Ok(super::html(body));
    }

    let feeds = FeedService::new((**pool).clone(), config.feed.page_size);
    let page = feeds.global(requested).await?;

    let body = IndexPage {
        pager: Pagination::from(&page.meta),
        posts: page.items.into_iter().map(PostCard::from).collect(),
    }
    .render()?;

    if let Err(err) = cache.put(cache_page, &body).await {
        tracing::debug!(cache_page, "page cache set failed: {}", err);
    }

    Ok(super::html(body))
}

/// Group feed; 404 when the slug does not resolve.
pub async fn group_feed(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    FEED_REQUEST_TOTAL.with_label_values(&["group"]).inc();

    let group = GroupService::new((**pool).clone())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))?;

    let feeds = FeedService::new((**pool).clone(), config.feed.page_size);
    let page = feeds.group(group.id, query.page.as_deref()).await?;

    let body = GroupPage {
        title: group.title,
        slug: group.slug,
        description: group.description.unwrap_or_default(),
        pager: Pagination::from(&page.meta),
        posts: page.items.into_iter().map(PostCard::from).collect(),
    }
    .render()?;

    Ok(super::html(body))
}

/// Profile feed with the viewer's follow flag; 404 for an unknown username.
pub async fn profile(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: Viewer,
) -> Result<HttpResponse> {
    FEED_REQUEST_TOTAL.with_label_values(&["profile"]).inc();

    let author = UserService::new((**pool).clone())
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

    let following = match viewer.0 {
        Some(viewer_id) => {
            FollowService::new((**pool).clone())
                .is_following(viewer_id, author.id)
                .await?
        }
        None => false,
    };
    let can_follow = viewer.0.map(|id| id != author.id).unwrap_or(false);

    let feeds = FeedService::new((**pool).clone(), config.feed.page_size);
    let page = feeds.profile(author.id, query.page.as_deref()).await?;

    let body = ProfilePage {
        author_username: author.username,
        post_count: page.meta.total_items,
        following,
        can_follow,
        pager: Pagination::from(&page.meta),
        posts: page.items.into_iter().map(PostCard::from).collect(),
    }
    .render()?;

    Ok(super::html(body))
}

/// Following feed; requires a session, empty when following nobody.
pub async fn following_feed(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<PageQuery>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    FEED_REQUEST_TOTAL.with_label_values(&["follow"]).inc();

    let feeds = FeedService::new((**pool).clone(), config.feed.page_size);
    let page = feeds.following(user.0, query.page.as_deref()).await?;

    let body = FollowPage {
        pager: Pagination::from(&page.meta),
        posts: page.items.into_iter().map(PostCard::from).collect(),
    }
    .render()?;

    Ok(super::html(body))
}
