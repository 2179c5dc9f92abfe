/// Business logic layer for quill
///
/// High-level operations over the persistence layer:
/// - Feed service: the four paginated listings
/// - Post service: creation, retrieval, ownership-gated updates
/// - Comment service: creation and per-post listing
/// - Follow service: the directed follow graph
/// - User / group services: resource resolution by username / slug
pub mod comments;
pub mod feeds;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod users;

// Re-export commonly used services
pub use comments::CommentService;
pub use feeds::FeedService;
pub use follows::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;
