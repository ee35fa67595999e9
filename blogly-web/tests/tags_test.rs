//! Integration tests for the tag pages

mod common;

use axum::http::StatusCode;
use blogly_shared::models::post::{CreatePost, Post};
use blogly_shared::models::post_tag::PostTag;
use blogly_shared::models::tag::Tag;
use common::{unique, TestContext};

#[tokio::test]
async fn test_create_tag_redirects_and_lists_tag() {
    let ctx = TestContext::new().await.unwrap();
    let name = unique("rust");

    let listing = ctx.post_form_follow("/tags/new", &format!("name={}", name)).await;

    assert_eq!(listing.status, StatusCode::OK);
    assert!(listing.body.contains(&name));
}

#[tokio::test]
async fn test_duplicate_tag_name_conflicts() {
    let ctx = TestContext::new().await.unwrap();
    let tag = ctx.create_tag().await;

    let response = ctx.post_form("/tags/new", &format!("name={}", tag.name)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body.contains("already exists"));
}

#[tokio::test]
async fn test_blank_tag_name_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    for body in ["name=", "name=+%09+"] {
        let response = ctx.post_form("/tags/new", body).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "body {}", body);
    }
}

#[tokio::test]
async fn test_show_tag_lists_posts() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.create_user().await;
    let tag = ctx.create_tag().await;
    let post = Post::create(
        &ctx.db,
        CreatePost {
            user_id: user.id,
            title: unique("tagged"),
            content: "Body".to_string(),
            tag_ids: vec![tag.id],
        },
    )
    .await
    .unwrap();

    let response = ctx.get(&format!("/tags/{}", tag.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(&tag.name));
    assert!(response.body.contains(&post.title));
}

#[tokio::test]
async fn test_unknown_tag_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    for path in ["/tags/2147483647", "/tags/2147483647/edit", "/tags/x1"] {
        let response = ctx.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "GET {}", path);
    }

    let response = ctx.post_form("/tags/2147483647/delete", "").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_tag() {
    let ctx = TestContext::new().await.unwrap();
    let tag = ctx.create_tag().await;
    let name = unique("renamed");

    let response = ctx
        .post_form(&format!("/tags/{}/edit", tag.id), &format!("name={}", name))
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/tags");

    let renamed = Tag::find_by_id(&ctx.db, tag.id).await.unwrap().unwrap();
    assert_eq!(renamed.name, name);
}

#[tokio::test]
async fn test_delete_tag_keeps_posts() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.create_user().await;
    let tag = ctx.create_tag().await;
    let post = Post::create(
        &ctx.db,
        CreatePost {
            user_id: user.id,
            title: unique("kept"),
            content: "Body".to_string(),
            tag_ids: vec![tag.id],
        },
    )
    .await
    .unwrap();

    let response = ctx.post_form(&format!("/tags/{}/delete", tag.id), "").await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/tags");

    assert!(Tag::find_by_id(&ctx.db, tag.id).await.unwrap().is_none());
    assert!(Post::find_by_id(&ctx.db, post.id).await.unwrap().is_some());
    assert!(PostTag::list_for_post(&ctx.db, post.id).await.unwrap().is_empty());
}
