//! End-to-end tests against a spawned server
//!
//! These tests require:
//! - Running PostgreSQL instance with `crates/blog-db/schema.sql` applied
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_found, assert_json, assert_status, check_test_env, fixtures::*, set_cookie, TestServer,
};
use reqwest::{header, multipart, StatusCode};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_listing_unknown_category_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    server.seed_category().await.unwrap();

    let response = server.get("/?cat_id=987654321").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_listing_pages_and_empty_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.seed_user().await.unwrap();
    let category = server.seed_category().await.unwrap();
    for i in 0..3 {
        server
            .seed_article(&author, &category, &format!("post {i}"))
            .await
            .unwrap();
    }

    let response = server
        .get(&format!("/?cat_id={}&page_size=2", category.id))
        .await
        .unwrap();
    let page: ListingPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.category.id, category.id.into_inner());
    assert!(page.categories.iter().any(|c| c.title == category.title));
    assert_eq!(page.page_num, 1);
    assert_eq!(page.total_page, 2);
    assert_eq!(page.total_count, 3);
    // Newest first
    assert_eq!(page.articles[0].title, "post 2");

    let response = server
        .get(&format!("/?cat_id={}&page_size=2&page_num=2", category.id))
        .await
        .unwrap();
    let page: ListingPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.articles.len(), 1);

    let response = server
        .get(&format!("/?cat_id={}&page_size=2&page_num=3", category.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Detail and Comment Tests
// ============================================================================

#[tokio::test]
async fn test_each_detail_read_counts_one_view() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.seed_user().await.unwrap();
    let category = server.seed_category().await.unwrap();
    let article = server.seed_article(&author, &category, "viewed").await.unwrap();

    let path = format!("/detail?id={}", article.id);
    let first: DetailPage = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let second: DetailPage = assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(first.article.total_views, 1);
    assert_eq!(second.article.total_views, 2);
    assert!(second.hot_articles.len() <= 9);
}

#[tokio::test]
async fn test_detail_missing_article_or_comment_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.seed_user().await.unwrap();
    let category = server.seed_category().await.unwrap();
    let article = server.seed_article(&author, &category, "quiet").await.unwrap();

    let response = server.get("/detail?id=987654321").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get(&format!("/detail?id={}&page_num=2", article.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_anonymous_comment_redirects_to_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .post_form("/detail", &[("id", "42"), ("content", "hello")])
        .await
        .unwrap();
    let location = assert_found(response).await.unwrap();
    assert_eq!(location, "/login?next=%2Fdetail%3Fid%3D42");
}

#[tokio::test]
async fn test_comment_bumps_counter_and_shows_up() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.seed_user().await.unwrap();
    let category = server.seed_category().await.unwrap();
    let article = server.seed_article(&author, &category, "discussed").await.unwrap();

    let mobile = unique_mobile();
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();

    let id = article.id.to_string();
    let response = server
        .post_form("/detail", &[("id", &id), ("content", "First!")])
        .await
        .unwrap();
    let location = assert_found(response).await.unwrap();
    assert_eq!(location, format!("/detail?id={id}#comment"));

    let page: DetailPage = assert_json(
        server.get(&format!("/detail?id={id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.article.comments_count, 1);
    assert_eq!(page.total_count, 1);
    assert_eq!(page.comments[0].content, "First!");
    assert_eq!(page.comments[0].author_name.as_deref(), Some(mobile.as_str()));

    // Blank comments are refused and leave the counter alone
    let response = server
        .post_form("/detail", &[("id", &id), ("content", "  ")])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_logs_in_and_redirects_home() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();

    let response = server.register(&mobile).await.unwrap();
    assert!(set_cookie(&response, "sessionid").is_some());
    assert!(set_cookie(&response, "is_login").is_some());
    assert_eq!(
        set_cookie(&response, "username").unwrap().split(';').next(),
        Some(format!("username={mobile}").as_str())
    );
    assert_eq!(assert_found(response).await.unwrap(), "/");

    // The code is spent
    assert_eq!(server.sms_code_for(&mobile).await.unwrap(), None);

    let profile: ProfilePage = assert_json(server.get("/center").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(profile.mobile, mobile);
    assert_eq!(profile.username, mobile);
}

#[tokio::test]
async fn test_register_rejections() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    server.plant_sms_code(&mobile).await.unwrap();

    // Missing field
    let response = server
        .post_form("/register", &[("mobile", &mobile), ("password", PASSWORD)])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Malformed mobile
    let response = server
        .post_form(
            "/register",
            &[
                ("mobile", "23800138000"),
                ("password", PASSWORD),
                ("password2", PASSWORD),
                ("sms_code", SMS_CODE),
            ],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Passwords differ
    let response = server
        .post_form(
            "/register",
            &[
                ("mobile", &mobile),
                ("password", PASSWORD),
                ("password2", "Different123"),
                ("sms_code", SMS_CODE),
            ],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Wrong code
    let response = server
        .post_form(
            "/register",
            &[
                ("mobile", &mobile),
                ("password", PASSWORD),
                ("password2", PASSWORD),
                ("sms_code", "000000"),
            ],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // No code at all
    let stale = unique_mobile();
    let response = server
        .post_form(
            "/register",
            &[
                ("mobile", &stale),
                ("password", PASSWORD),
                ("password2", PASSWORD),
                ("sms_code", SMS_CODE),
            ],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // A rejected form leaves the code usable
    assert_eq!(
        server.sms_code_for(&mobile).await.unwrap().as_deref(),
        Some(SMS_CODE)
    );

    // Taken mobile
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();
    let response = server.register(&mobile).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_failed_registration_keeps_sms_code_for_retry() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let taken = server.seed_user().await.unwrap();
    let mobile = taken.mobile.to_string();
    server.plant_sms_code(&mobile).await.unwrap();

    let form = [
        ("mobile", mobile.as_str()),
        ("password", PASSWORD),
        ("password2", PASSWORD),
        ("sms_code", SMS_CODE),
    ];
    let response = server.post_form("/register", &form).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The same code still works for the follow-up password reset
    let response = server.post_form("/forgetpassword", &form).await.unwrap();
    assert_eq!(assert_found(response).await.unwrap(), "/login");
}

// ============================================================================
// Login and Logout Tests
// ============================================================================

#[tokio::test]
async fn test_login_cookie_lifetime_follows_remember() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();
    let ttl = server.state.session_ttl_seconds();

    let browser = server.new_client().unwrap();
    let response = browser
        .post(server.url("/login"))
        .form(&[("mobile", mobile.as_str()), ("password", PASSWORD)])
        .send()
        .await
        .unwrap();
    let session = set_cookie(&response, "sessionid").unwrap();
    assert!(!session.contains("Max-Age"), "{session}");
    assert_eq!(assert_found(response).await.unwrap(), "/");

    let response = browser
        .post(server.url("/login"))
        .form(&[
            ("mobile", mobile.as_str()),
            ("password", PASSWORD),
            ("remember", "on"),
        ])
        .send()
        .await
        .unwrap();
    let session = set_cookie(&response, "sessionid").unwrap();
    assert!(session.contains(&format!("Max-Age={ttl}")), "{session}");
}

#[tokio::test]
async fn test_login_follows_local_next_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();

    let browser = server.new_client().unwrap();
    let response = browser
        .post(server.url("/login?next=/center"))
        .form(&[("mobile", mobile.as_str()), ("password", PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(assert_found(response).await.unwrap(), "/center");

    let response = browser
        .post(server.url("/login"))
        .form(&[
            ("mobile", mobile.as_str()),
            ("password", PASSWORD),
            ("next", "https://example.com/"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(assert_found(response).await.unwrap(), "/");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();

    let browser = server.new_client().unwrap();
    let response = browser
        .post(server.url("/login"))
        .form(&[("mobile", mobile.as_str()), ("password", "WrongPass123")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = unique_mobile();
    let response = browser
        .post(server.url("/login"))
        .form(&[("mobile", unknown.as_str()), ("password", PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    assert_found(server.register(&unique_mobile()).await.unwrap())
        .await
        .unwrap();
    assert_status(server.get("/center").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(assert_found(server.get("/logout").await.unwrap()).await.unwrap(), "/");

    let location = assert_found(server.get("/center").await.unwrap()).await.unwrap();
    assert_eq!(location, "/login?next=%2Fcenter");
}

// ============================================================================
// Password Reset Tests
// ============================================================================

#[tokio::test]
async fn test_forget_password_is_idempotent_and_revokes_sessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    let new_password = "NewPassw0rd99";

    // Unknown mobile: the reset creates the account. One texted code
    // covers both identical submissions.
    server.plant_sms_code(&mobile).await.unwrap();
    for _ in 0..2 {
        let browser = server.new_client().unwrap();
        let response = browser
            .post(server.url("/forgetpassword"))
            .form(&[
                ("mobile", mobile.as_str()),
                ("password", new_password),
                ("password2", new_password),
                ("sms_code", SMS_CODE),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(assert_found(response).await.unwrap(), "/login");
    }

    // Log in with the new password on the default client
    let response = server
        .post_form("/login", &[("mobile", &mobile), ("password", new_password)])
        .await
        .unwrap();
    assert_found(response).await.unwrap();
    assert_status(server.get("/center").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(
        server.sms_code_for(&mobile).await.unwrap().as_deref(),
        Some(SMS_CODE)
    );

    // Another reset logs every browser out
    let response = server
        .new_client()
        .unwrap()
        .post(server.url("/forgetpassword"))
        .form(&[
            ("mobile", mobile.as_str()),
            ("password", PASSWORD),
            ("password2", PASSWORD),
            ("sms_code", SMS_CODE),
        ])
        .send()
        .await
        .unwrap();
    assert_found(response).await.unwrap();

    let location = assert_found(server.get("/center").await.unwrap()).await.unwrap();
    assert!(location.starts_with("/login"));
}

// ============================================================================
// Verification Tests
// ============================================================================

#[tokio::test]
async fn test_image_code_is_a_jpeg() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let uuid = uuid::Uuid::new_v4().to_string();

    let response = server.get(&format!("/imagecode?uuid={uuid}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = response.bytes().await.unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let response = server.get("/imagecode").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_sms_code_flow_and_throttle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    let sms_path = |uuid: &str, answer: &str| {
        format!("/smscode?mobile={mobile}&image_code={answer}&uuid={uuid}")
    };

    // Missing parameters and bad mobile
    let envelope: Envelope = assert_json(server.get("/smscode").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(envelope.code, "4003");
    let envelope: Envelope = assert_json(
        server
            .get("/smscode?mobile=123&image_code=ABCD&uuid=x")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(envelope.code, "4007");

    // Wrong answer, and the captcha is gone afterwards
    let uuid = uuid::Uuid::new_v4().to_string();
    server.plant_image_code(&uuid, "K7QX").await.unwrap();
    let envelope: Envelope = assert_json(
        server.get(&sms_path(&uuid, "AAAA")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(envelope.code, "4001");
    let envelope: Envelope = assert_json(
        server.get(&sms_path(&uuid, "K7QX")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(envelope.code, "4001");

    // Right answer, any case
    let uuid = uuid::Uuid::new_v4().to_string();
    server.plant_image_code(&uuid, "K7QX").await.unwrap();
    let envelope: Envelope = assert_json(
        server.get(&sms_path(&uuid, "k7qx")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(envelope.code, "0", "{}", envelope.errmsg);

    let code = server.sms_code_for(&mobile).await.unwrap().unwrap();
    assert_eq!(code.len(), 6);

    // A second send inside the interval is throttled
    let uuid = uuid::Uuid::new_v4().to_string();
    server.plant_image_code(&uuid, "K7QX").await.unwrap();
    let envelope: Envelope = assert_json(
        server.get(&sms_path(&uuid, "K7QX")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(envelope.code, "4002");

    // The texted code registers the account
    let response = server
        .post_form(
            "/register",
            &[
                ("mobile", &mobile),
                ("password", PASSWORD),
                ("password2", PASSWORD),
                ("sms_code", &code),
            ],
        )
        .await
        .unwrap();
    assert_eq!(assert_found(response).await.unwrap(), "/");
}

// ============================================================================
// Profile and Authoring Tests
// ============================================================================

fn png_part(name: &str) -> multipart::Part {
    multipart::Part::bytes(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
        .file_name(name.to_string())
        .mime_str("image/png")
        .unwrap()
}

#[tokio::test]
async fn test_profile_update_refreshes_username_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let mobile = unique_mobile();
    assert_found(server.register(&mobile).await.unwrap()).await.unwrap();

    let username = format!("writer{}", unique_suffix());
    let form = multipart::Form::new()
        .text("username", username.clone())
        .text("user_desc", "I write about Rust")
        .part("avatar", png_part("me.png"));
    let response = server.post_multipart("/center", form).await.unwrap();
    assert_eq!(
        set_cookie(&response, "username").unwrap().split(';').next(),
        Some(format!("username={username}").as_str())
    );
    assert_eq!(assert_found(response).await.unwrap(), "/center");

    let profile: ProfilePage = assert_json(server.get("/center").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(profile.username, username);
    assert_eq!(profile.user_desc, "I write about Rust");
    let avatar_url = profile.avatar_url.unwrap();
    assert!(avatar_url.starts_with("/media/avatar/"), "{avatar_url}");

    // The upload is served back
    assert_status(server.get(&avatar_url).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    // Leaving the username out keeps it
    let form = multipart::Form::new().text("user_desc", "Still Rust");
    assert_found(server.post_multipart("/center", form).await.unwrap())
        .await
        .unwrap();
    let profile: ProfilePage = assert_json(server.get("/center").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(profile.username, username);
    assert_eq!(profile.avatar_url.as_deref(), Some(avatar_url.as_str()));
}

#[tokio::test]
async fn test_write_blog_publishes_into_category() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let category = server.seed_category().await.unwrap();

    // Anonymous authors are sent to log in first
    let location = assert_found(server.get("/writeblog").await.unwrap()).await.unwrap();
    assert_eq!(location, "/login?next=%2Fwriteblog");

    assert_found(server.register(&unique_mobile()).await.unwrap())
        .await
        .unwrap();
    let page: WritePage = assert_json(server.get("/writeblog").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(page.categories.iter().any(|c| c.id == category.id.into_inner()));

    let cat_id = category.id.to_string();
    let form = |cat: &str| {
        multipart::Form::new()
            .part("avatar", png_part("cover.png"))
            .text("title", "Hello from the tests")
            .text("category_id", cat.to_string())
            .text("tags", "rust")
            .text("sumary", "A short summary")
            .text("content", "The body")
    };

    let response = server.post_multipart("/writeblog", form(&cat_id)).await.unwrap();
    assert_eq!(assert_found(response).await.unwrap(), "/");

    let listing: ListingPage = assert_json(
        server.get(&format!("/?cat_id={cat_id}")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(listing.total_count, 1);
    assert_eq!(listing.articles[0].title, "Hello from the tests");

    // Unknown category
    let response = server.post_multipart("/writeblog", form("987654321")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Missing title
    let incomplete = multipart::Form::new()
        .part("avatar", png_part("cover.png"))
        .text("category_id", cat_id.clone())
        .text("tags", "rust")
        .text("sumary", "A short summary")
        .text("content", "The body");
    let response = server.post_multipart("/writeblog", incomplete).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
