//! Domain → DTO conversions.

use quill_core::domain::{AnnotatedPost, Category, Comment, Page, Post, User};
use quill_shared::dto::{
    CategoryResponse, CommentResponse, PostDetailResponse, PostListResponse, PostResponse,
    ProfileResponse,
};

pub(crate) fn post(annotated: AnnotatedPost) -> PostResponse {
    let AnnotatedPost {
        post,
        comment_count,
    } = annotated;
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        image: post.image,
        category_id: post.category_id,
        location_id: post.location_id,
        is_published: post.is_published,
        created_at: post.created_at,
        comment_count,
    }
}

pub(crate) fn post_list(page: Page<AnnotatedPost>) -> PostListResponse {
    let page = page.map(post);
    PostListResponse {
        posts: page.items,
        page: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}

pub(crate) fn post_detail(p: Post, comments: Vec<Comment>) -> PostDetailResponse {
    let comment_count = comments.len() as u64;
    PostDetailResponse {
        post: post(AnnotatedPost {
            post: p,
            comment_count,
        }),
        comments: comments.into_iter().map(comment).collect(),
    }
}

pub(crate) fn comment(c: Comment) -> CommentResponse {
    CommentResponse {
        id: c.id,
        post_id: c.post_id,
        author_id: c.author_id,
        text: c.text,
        created_at: c.created_at,
    }
}

pub(crate) fn category(c: Category) -> CategoryResponse {
    CategoryResponse {
        id: c.id,
        title: c.title,
        description: c.description,
        slug: c.slug,
    }
}

pub(crate) fn profile(u: User) -> ProfileResponse {
    ProfileResponse {
        id: u.id,
        username: u.username,
        first_name: u.first_name,
        last_name: u.last_name,
        email: u.email,
        created_at: u.created_at,
    }
}
