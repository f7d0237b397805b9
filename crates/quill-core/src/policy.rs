//! Visibility and ownership policy.
//!
//! Every listing, detail, and mutation decision in the application reduces to
//! the predicates here. Listings apply the same rules at the query level (see
//! the repository implementations); detail and mutation handlers call the
//! predicates directly.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

/// Fixed page size for all post listings.
pub const PAGE_SIZE: u64 = 10;

/// The identity a request is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(*id),
        }
    }

    pub fn is_owner_of(&self, author_id: Uuid) -> bool {
        matches!(self, Viewer::User(id) if *id == author_id)
    }
}

/// A post is publicly visible when it is published, its publication date is
/// not in the future, and its category (if any) is itself published.
///
/// `category` is the row referenced by `post.category_id`; passing `None` for
/// a post that has a category id set means the row could not be resolved, and
/// the post is treated as hidden.
pub fn post_is_public(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    if !post.is_published || post.pub_date > now {
        return false;
    }
    match (post.category_id, category) {
        (None, _) => true,
        (Some(_), Some(cat)) => cat.is_published,
        (Some(_), None) => false,
    }
}

/// Detail access: the author always sees their own post, published or not;
/// everyone else gets the public rule.
pub fn can_view(
    viewer: Viewer,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    viewer.is_owner_of(post.author_id) || post_is_public(post, category, now)
}

/// Edit/delete access: authenticated and owner. Refusals are rendered as a
/// silent redirect to the detail view, never as an error.
pub fn can_modify(viewer: Viewer, author_id: Uuid) -> bool {
    viewer.is_owner_of(author_id)
}

/// Which slice of posts a listing query returns.
///
/// Repositories translate a scope into one parameterized query; the public
/// gate is exactly [`post_is_public`] expressed as SQL filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    /// The public index: all publicly visible posts.
    Public,
    /// Publicly visible posts of one category. Callers resolve the slug and
    /// check the category's own publication flag before building this scope.
    Category(Uuid),
    /// Posts of one author. When the viewer is that author the gate is
    /// dropped entirely: unpublished and future-dated posts are included.
    Profile { author: Uuid, viewer_is_owner: bool },
}

impl PostScope {
    pub fn profile(author: Uuid, viewer: Viewer) -> Self {
        PostScope::Profile {
            author,
            viewer_is_owner: viewer.is_owner_of(author),
        }
    }

    /// Whether this scope applies the public visibility gate.
    pub fn gated(&self) -> bool {
        !matches!(
            self,
            PostScope::Profile {
                viewer_is_owner: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn post(author: Uuid) -> Post {
        Post::new(
            author,
            "Trip".to_owned(),
            "Went somewhere.".to_owned(),
            Utc::now() - TimeDelta::days(1),
        )
    }

    fn category(published: bool) -> Category {
        let mut cat = Category::new(
            "Travel".to_owned(),
            "On the road".to_owned(),
            "travel".to_owned(),
        );
        cat.is_published = published;
        cat
    }

    #[test]
    fn published_past_post_without_category_is_public() {
        let p = post(Uuid::new_v4());
        assert!(post_is_public(&p, None, Utc::now()));
    }

    #[test]
    fn unpublished_post_is_hidden() {
        let mut p = post(Uuid::new_v4());
        p.is_published = false;
        assert!(!post_is_public(&p, None, Utc::now()));
    }

    #[test]
    fn future_dated_post_is_hidden_until_its_date() {
        let mut p = post(Uuid::new_v4());
        p.pub_date = Utc::now() + TimeDelta::days(365);
        assert!(!post_is_public(&p, None, Utc::now()));
        assert!(post_is_public(&p, None, p.pub_date + TimeDelta::seconds(1)));
    }

    #[test]
    fn post_in_unpublished_category_is_hidden() {
        let cat = category(false);
        let mut p = post(Uuid::new_v4());
        p.category_id = Some(cat.id);
        assert!(!post_is_public(&p, Some(&cat), Utc::now()));
    }

    #[test]
    fn post_in_published_category_is_public() {
        let cat = category(true);
        let mut p = post(Uuid::new_v4());
        p.category_id = Some(cat.id);
        assert!(post_is_public(&p, Some(&cat), Utc::now()));
    }

    #[test]
    fn unresolved_category_row_hides_the_post() {
        let mut p = post(Uuid::new_v4());
        p.category_id = Some(Uuid::new_v4());
        assert!(!post_is_public(&p, None, Utc::now()));
    }

    #[test]
    fn author_sees_own_post_regardless_of_gating() {
        let author = Uuid::new_v4();
        let mut p = post(author);
        p.is_published = false;
        p.pub_date = Utc::now() + TimeDelta::days(365);

        assert!(can_view(Viewer::User(author), &p, None, Utc::now()));
        assert!(!can_view(Viewer::Anonymous, &p, None, Utc::now()));
        assert!(!can_view(Viewer::User(Uuid::new_v4()), &p, None, Utc::now()));
    }

    #[test]
    fn only_the_author_may_modify() {
        let author = Uuid::new_v4();
        assert!(can_modify(Viewer::User(author), author));
        assert!(!can_modify(Viewer::User(Uuid::new_v4()), author));
        assert!(!can_modify(Viewer::Anonymous, author));
    }

    #[test]
    fn own_profile_scope_drops_the_gate() {
        let author = Uuid::new_v4();
        assert!(!PostScope::profile(author, Viewer::User(author)).gated());
        assert!(PostScope::profile(author, Viewer::User(Uuid::new_v4())).gated());
        assert!(PostScope::profile(author, Viewer::Anonymous).gated());
        assert!(PostScope::Public.gated());
        assert!(PostScope::Category(Uuid::new_v4()).gated());
    }

    #[test]
    fn viewer_ownership_helpers() {
        let id = Uuid::new_v4();
        assert_eq!(Viewer::User(id).user_id(), Some(id));
        assert_eq!(Viewer::Anonymous.user_id(), None);
        assert!(Viewer::User(id).is_owner_of(id));
        assert!(!Viewer::Anonymous.is_owner_of(id));
    }
}
