#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use bloglist::{
    app::build_router,
    config::{AppEnv, Config, DEFAULT_SQIDS_ALPHABET},
    repos::{MemoryStore, NewPost, NewUser, PostRepo, User, UserRepo},
    services::{auth::build_auth_service, id_codec::IdCodec, password::PasswordHasher},
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "fullstack";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub state: AppState,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: None,
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        sqids_min_length: 10,
        sqids_alphabet: DEFAULT_SQIDS_ALPHABET.to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        auth_issuer: "bloglist".to_string(),
        auth_audience: "bloglist-api".to_string(),
        access_token_ttl_seconds: 3600,
        access_token_leeway_seconds: 0,
        bcrypt_cost: 4,
    }
}

pub fn spawn() -> TestApp {
    let config = config();
    let store = MemoryStore::new();

    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap(),
        build_auth_service(&config),
        PasswordHasher::new(config.bcrypt_cost),
    );

    TestApp {
        router: build_router(state.clone(), &config),
        store,
        state,
    }
}

impl TestApp {
    /// Registers a user directly in the store and returns it with a bearer token.
    pub async fn seed_user(&self, username: &str) -> (User, String) {
        let password_hash = self.state.passwords.hash(PASSWORD.to_string()).await.unwrap();
        let user = UserRepo::create(
            &self.store,
            NewUser {
                username: username.to_string(),
                name: format!("{username} user"),
                password_hash,
            },
        )
        .await
        .unwrap();

        let token = self
            .state
            .auth
            .issue(user.id, &user.username)
            .unwrap()
            .access_token;

        (user, token)
    }

    pub async fn seed_blog(&self, owner: &User, title: &str, author: &str, likes: i64) -> String {
        let post = PostRepo::create(
            &self.store,
            NewPost {
                title: title.to_string(),
                author: author.to_string(),
                url: format!("{}.ca", author.to_lowercase()),
                likes,
                owner_id: owner.id,
            },
        )
        .await
        .unwrap();

        self.state.id_codec.encode(post.id).unwrap()
    }

    /// The two blogs every blog test starts with, owned by `root`.
    pub async fn seed_initial_blogs(&self) -> (User, String) {
        let (root, token) = self.seed_user("root").await;
        self.seed_blog(&root, "Nothing Really", "Adi", 23).await;
        self.seed_blog(&root, "So Much", "Men", 5).await;
        (root, token)
    }

    pub async fn blogs_in_db(&self) -> Vec<bloglist::repos::BlogPost> {
        PostRepo::list(&self.store).await.unwrap()
    }

    pub async fn users_in_db(&self) -> Vec<User> {
        UserRepo::list(&self.store).await.unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let res = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }
}
