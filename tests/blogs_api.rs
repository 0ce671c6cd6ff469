mod common;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use common::spawn;

fn titles(blogs: &Value) -> Vec<String> {
    blogs
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

mod when_there_are_initial_blogs {
    use super::*;

    #[tokio::test]
    async fn all_blogs_are_returned_as_json() {
        let app = spawn();
        app.seed_initial_blogs().await;

        let res = app.get("/api/v1/blogs").await;

        assert_eq!(res.status, StatusCode::OK);
        assert!(
            res.headers["content-type"]
                .to_str()
                .unwrap()
                .starts_with("application/json")
        );
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unique_identifier_is_an_opaque_id() {
        let app = spawn();
        let (root, _) = app.seed_initial_blogs().await;

        let res = app.get("/api/v1/blogs").await;
        let first = &res.body[0];

        assert!(first["id"].is_string());
        assert!(first.get("blogId").is_none());
        assert_eq!(first["user"], json!(root.id));
    }

    #[tokio::test]
    async fn a_single_blog_can_be_fetched_by_id() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app.get(&format!("/api/v1/blogs/{id}")).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["title"], "Nothing Really");
        assert_eq!(res.body["likes"], 23);
    }

    #[tokio::test]
    async fn malformed_id_is_a_bad_request() {
        let app = spawn();

        let res = app.get("/api/v1/blogs/!!not-an-id!!").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"]["code"], "INVALID_PUBLIC_ID");
    }
}

mod creating_a_blog {
    use super::*;

    #[tokio::test]
    async fn succeeds_with_valid_data() {
        let app = spawn();
        let (root, token) = app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&token),
                Some(json!({
                    "title": "Just Right",
                    "author": "Crazy",
                    "url": "Crazy.ca",
                    "likes": 190
                })),
            )
            .await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body["user"], json!(root.id));

        let blogs = app.blogs_in_db().await;
        assert_eq!(blogs.len(), 3);
        assert!(blogs.iter().any(|b| b.title == "Just Right"));

        // owner's back-reference gained the new id
        let owner = app.get(&format!("/api/v1/users/{}", root.id)).await;
        assert!(
            owner.body["blogs"]
                .as_array()
                .unwrap()
                .contains(&res.body["id"])
        );
    }

    #[tokio::test]
    async fn missing_likes_defaults_to_zero_and_is_listed() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;

        let created = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&token),
                Some(json!({ "title": "Just Right", "author": "Crazy", "url": "Crazy.ca" })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["likes"], 0);

        let listed = app.get("/api/v1/blogs").await;
        let found = listed
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["id"] == created.body["id"])
            .cloned()
            .unwrap();
        assert_eq!(found["likes"], 0);
        assert_eq!(found["title"], "Just Right");
    }

    #[tokio::test]
    async fn missing_title_or_url_is_a_bad_request() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&token),
                Some(json!({ "author": "JoJo", "likes": 9 })),
            )
            .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }

    #[tokio::test]
    async fn negative_likes_are_a_bad_request() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&token),
                Some(json!({ "title": "t", "author": "a", "url": "u", "likes": -1 })),
            )
            .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }

    #[tokio::test]
    async fn oversized_likes_are_rejected_and_stats_still_work() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;

        for _ in 0..2 {
            let res = app
                .request(
                    Method::POST,
                    "/api/v1/blogs",
                    Some(&token),
                    Some(json!({ "title": "t", "author": "a", "url": "u", "likes": i64::MAX })),
                )
                .await;
            assert_eq!(res.status, StatusCode::BAD_REQUEST);
            assert_eq!(res.body["error"]["code"], "VALIDATION_ERROR");
        }
        assert_eq!(app.blogs_in_db().await.len(), 2);

        let stats = app.get("/api/v1/blogs/stats").await;
        assert_eq!(stats.status, StatusCode::OK);
        assert_eq!(stats.body["total_likes"], 28);
    }

    #[tokio::test]
    async fn likes_at_the_cap_are_accepted() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&token),
                Some(json!({ "title": "t", "author": "a", "url": "u", "likes": u32::MAX })),
            )
            .await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body["likes"], u32::MAX);
    }

    #[tokio::test]
    async fn without_token_is_unauthorized() {
        let app = spawn();
        app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                None,
                Some(json!({
                    "title": "this test pmo",
                    "author": "JoJo",
                    "url": "random.ca",
                    "likes": 9
                })),
            )
            .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }

    #[tokio::test]
    async fn with_invalid_token_is_unauthorized() {
        let app = spawn();
        app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some("not.a.token"),
                Some(json!({ "title": "t", "author": "a", "url": "u" })),
            )
            .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_fields_are_reported_before_missing_token() {
        let app = spawn();
        app.seed_initial_blogs().await;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                None,
                Some(json!({ "author": "JoJo" })),
            )
            .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn token_of_a_removed_user_is_unauthorized() {
        let app = spawn();
        app.seed_initial_blogs().await;

        // signed correctly, but nobody with this id exists
        let ghost = app
            .state
            .auth
            .issue(uuid::Uuid::new_v4(), "ghost")
            .unwrap()
            .access_token;

        let res = app
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(&ghost),
                Some(json!({ "title": "t", "author": "a", "url": "u" })),
            )
            .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }
}

mod deleting_a_blog {
    use super::*;

    #[tokio::test]
    async fn owner_removes_it_with_no_content() {
        let app = spawn();
        let (root, token) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;
        app.seed_blog(&root, "So Much", "Men", 5).await;

        let res = app
            .request(Method::DELETE, &format!("/api/v1/blogs/{id}"), Some(&token), None)
            .await;

        assert_eq!(res.status, StatusCode::NO_CONTENT);

        let blogs = app.blogs_in_db().await;
        assert_eq!(blogs.len(), 1);
        assert!(!blogs.iter().any(|b| b.title == "Nothing Really"));

        let owner = app.get(&format!("/api/v1/users/{}", root.id)).await;
        assert!(!owner.body["blogs"].as_array().unwrap().contains(&json!(id)));
        assert_eq!(owner.body["blogs"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_changes() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let (_, other_token) = app.seed_user("mallory").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(
                Method::DELETE,
                &format!("/api/v1/blogs/{id}"),
                Some(&other_token),
                None,
            )
            .await;

        assert_eq!(res.status, StatusCode::FORBIDDEN);
        assert_eq!(res.body["error"]["code"], "FORBIDDEN");
        assert_eq!(app.blogs_in_db().await.len(), 1);
    }

    #[tokio::test]
    async fn without_token_is_unauthorized() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(Method::DELETE, &format!("/api/v1/blogs/{id}"), None, None)
            .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.blogs_in_db().await.len(), 1);
    }

    #[tokio::test]
    async fn without_token_does_not_reveal_whether_the_blog_exists() {
        let app = spawn();
        let missing = app.state.id_codec.encode(9_999).unwrap();

        let res = app
            .request(Method::DELETE, &format!("/api/v1/blogs/{missing}"), None, None)
            .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = spawn();
        let (_, token) = app.seed_initial_blogs().await;
        let missing = app.state.id_codec.encode(9_999).unwrap();

        let res = app
            .request(
                Method::DELETE,
                &format!("/api/v1/blogs/{missing}"),
                Some(&token),
                None,
            )
            .await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(app.blogs_in_db().await.len(), 2);
    }
}

mod updating_a_blog {
    use super::*;

    #[tokio::test]
    async fn succeeds_without_a_token() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(
                Method::PUT,
                &format!("/api/v1/blogs/{id}"),
                None,
                Some(json!({
                    "title": "Nothing Really",
                    "author": "Krutik",
                    "url": "adi.ca",
                    "likes": 24
                })),
            )
            .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["author"], "Krutik");
        assert_eq!(res.body["likes"], 24);
        assert_eq!(res.body["user"], json!(root.id));

        let blogs = app.blogs_in_db().await;
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].author, "Krutik");
    }

    #[tokio::test]
    async fn an_invalid_token_does_not_block_the_update() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(
                Method::PUT,
                &format!("/api/v1/blogs/{id}"),
                Some("garbage"),
                Some(json!({ "likes": 30 })),
            )
            .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["likes"], 30);
        assert_eq!(res.body["title"], "Nothing Really");
    }

    #[tokio::test]
    async fn oversized_likes_are_rejected_and_the_blog_is_unchanged() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(
                Method::PUT,
                &format!("/api/v1/blogs/{id}"),
                None,
                Some(json!({ "likes": i64::MAX })),
            )
            .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.blogs_in_db().await[0].likes, 23);

        let stats = app.get("/api/v1/blogs/stats").await;
        assert_eq!(stats.status, StatusCode::OK);
        assert_eq!(stats.body["total_likes"], 23);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = spawn();
        let missing = app.state.id_codec.encode(9_999).unwrap();

        let res = app
            .request(
                Method::PUT,
                &format!("/api/v1/blogs/{missing}"),
                None,
                Some(json!({ "likes": 1 })),
            )
            .await;

        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_title_is_a_bad_request() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        let id = app.seed_blog(&root, "Nothing Really", "Adi", 23).await;

        let res = app
            .request(
                Method::PUT,
                &format!("/api/v1/blogs/{id}"),
                None,
                Some(json!({ "title": "" })),
            )
            .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(titles(&app.get("/api/v1/blogs").await.body), vec!["Nothing Really"]);
    }
}

mod blog_statistics {
    use super::*;

    #[tokio::test]
    async fn summarizes_the_whole_collection() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        app.seed_blog(&root, "one", "me", 1).await;
        let adi = app.seed_blog(&root, "two", "adi", 9).await;
        app.seed_blog(&root, "three", "mani", 3).await;
        app.seed_blog(&root, "four", "me", 8).await;

        let res = app.get("/api/v1/blogs/stats").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["total_likes"], 21);
        assert_eq!(res.body["favorite_blog"]["id"], json!(adi));
        assert_eq!(
            res.body["most_blogs"],
            json!({ "author": "me", "post_count": 2 })
        );
        // me (1 + 8) ties adi (9); me is seen first
        assert_eq!(
            res.body["most_likes"],
            json!({ "author": "me", "total_likes": 9 })
        );
    }

    #[tokio::test]
    async fn empty_collection_has_no_favorites() {
        let app = spawn();

        let res = app.get("/api/v1/blogs/stats").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(
            res.body,
            json!({
                "total_likes": 0,
                "favorite_blog": null,
                "most_blogs": null,
                "most_likes": null
            })
        );
    }

    #[tokio::test]
    async fn huge_stored_likes_do_not_break_the_summary() {
        let app = spawn();
        let (root, _) = app.seed_user("root").await;
        // written straight to the store, past request validation
        app.seed_blog(&root, "one", "me", i64::MAX).await;
        app.seed_blog(&root, "two", "me", i64::MAX).await;

        let res = app.get("/api/v1/blogs/stats").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["total_likes"], i64::MAX);
        assert_eq!(
            res.body["most_likes"],
            json!({ "author": "me", "total_likes": i64::MAX })
        );
    }
}

mod http_surface {
    use super::*;

    #[tokio::test]
    async fn health_is_ok() {
        let app = spawn();

        let res = app.get("/api/v1/health").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn responses_carry_request_id_and_security_headers() {
        let app = spawn();

        let res = app.get("/api/v1/blogs").await;

        assert!(res.headers.contains_key("x-request-id"));
        assert_eq!(res.headers["x-content-type-options"], "nosniff");
        assert_eq!(res.headers["x-frame-options"], "DENY");
    }
}
