/// Template structs and display-ready view models
///
/// Templates are kept free of logic: every conditional is a precomputed
/// boolean and every value is a display-ready string, so the rendering
/// engine stays a dumb collaborator.
use askama::Template;

use crate::forms::FieldError;
use crate::models::{CommentWithAuthor, FeedPost, Group};
use crate::pagination::PageMeta;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A post as shown in feeds and on the detail page.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub id: String,
    pub text: String,
    pub author_username: String,
    pub published_at: String,
    pub group_title: String,
    pub group_slug: String,
    pub has_group: bool,
    pub image_key: String,
    pub has_image: bool,
}

impl From<FeedPost> for PostCard {
    fn from(post: FeedPost) -> Self {
        let has_group = post.group_slug.is_some();
        let has_image = post.image_key.is_some();
        PostCard {
            id: post.id.to_string(),
            text: post.text,
            author_username: post.author_username,
            published_at: post.created_at.format(DATE_FORMAT).to_string(),
            group_title: post.group_title.unwrap_or_default(),
            group_slug: post.group_slug.unwrap_or_default(),
            has_group,
            image_key: post.image_key.unwrap_or_default(),
            has_image,
        }
    }
}

/// Pager controls under every feed.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub number: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous: i64,
    pub next: i64,
}

impl From<&PageMeta> for Pagination {
    fn from(meta: &PageMeta) -> Self {
        Pagination {
            number: meta.number,
            total_pages: meta.total_pages,
            has_previous: meta.has_previous(),
            has_next: meta.has_next(),
            previous: meta.number - 1,
            next: meta.number + 1,
        }
    }
}

/// A comment under a post.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub author_username: String,
    pub text: String,
    pub published_at: String,
}

impl From<CommentWithAuthor> for CommentView {
    fn from(comment: CommentWithAuthor) -> Self {
        CommentView {
            author_username: comment.author_username,
            text: comment.text,
            published_at: comment.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// One option of the post form's group selector.
#[derive(Debug, Clone)]
pub struct GroupOption {
    pub slug: String,
    pub title: String,
    pub selected: bool,
}

impl GroupOption {
    /// Build the selector options, marking the currently chosen slug.
    pub fn for_form(groups: Vec<Group>, selected: Option<&str>) -> Vec<GroupOption> {
        groups
            .into_iter()
            .map(|g| {
                let is_selected = selected == Some(g.slug.as_str());
                GroupOption {
                    slug: g.slug,
                    title: g.title,
                    selected: is_selected,
                }
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub posts: Vec<PostCard>,
    pub pager: Pagination,
}

#[derive(Template)]
#[template(path = "group.html")]
pub struct GroupPage {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub posts: Vec<PostCard>,
    pub pager: Pagination,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub author_username: String,
    pub post_count: i64,
    pub following: bool,
    pub can_follow: bool,
    pub posts: Vec<PostCard>,
    pub pager: Pagination,
}

#[derive(Template)]
#[template(path = "follow.html")]
pub struct FollowPage {
    pub posts: Vec<PostCard>,
    pub pager: Pagination,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailPage {
    pub post: PostCard,
    pub is_author: bool,
    pub comments: Vec<CommentView>,
    pub comment_text: String,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormPage {
    pub is_edit: bool,
    pub action: String,
    pub text: String,
    pub image_key: String,
    pub groups: Vec<GroupOption>,
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn card(text: &str, author: &str) -> PostCard {
        PostCard::from(FeedPost {
            id: Uuid::new_v4(),
            text: text.to_string(),
            image_key: None,
            created_at: Utc::now(),
            author_id: Uuid::new_v4(),
            author_username: author.to_string(),
            group_title: None,
            group_slug: None,
        })
    }

    fn pager() -> Pagination {
        Pagination::from(&crate::pagination::resolve(None, 1, 10))
    }

    #[test]
    fn index_renders_post_text_and_author() {
        let page = IndexPage {
            posts: vec![card("hello", "alice")],
            pager: pager(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("hello"));
        assert!(html.contains("alice"));
        assert!(html.contains("/profile/alice"));
    }

    #[test]
    fn post_text_is_escaped() {
        let page = IndexPage {
            posts: vec![card("<script>alert(1)</script>", "mallory")],
            pager: pager(),
        };
        let html = page.render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn pager_links_follow_page_numbers() {
        let meta = crate::pagination::resolve(Some("2"), 25, 10);
        let page = IndexPage {
            posts: vec![],
            pager: Pagination::from(&meta),
        };
        let html = page.render().unwrap();
        assert!(html.contains("?page=1"));
        assert!(html.contains("?page=3"));
    }

    #[test]
    fn form_re_render_shows_field_errors() {
        let page = PostFormPage {
            is_edit: false,
            action: "/create".to_string(),
            text: String::new(),
            image_key: String::new(),
            groups: vec![],
            errors: vec![FieldError {
                field: "text".to_string(),
                message: "Text must not be empty".to_string(),
            }],
        };
        let html = page.render().unwrap();
        assert!(html.contains("Text must not be empty"));
    }

    #[test]
    fn group_option_marks_selection() {
        let groups = vec![
            Group {
                id: Uuid::new_v4(),
                title: "Rust".to_string(),
                slug: "rust".to_string(),
                description: None,
            },
            Group {
                id: Uuid::new_v4(),
                title: "Go".to_string(),
                slug: "go".to_string(),
                description: None,
            },
        ];
        let options = GroupOption::for_form(groups, Some("go"));
        assert!(!options[0].selected);
        assert!(options[1].selected);
    }
}
