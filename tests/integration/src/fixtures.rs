//! Test fixtures and data generators
//!
//! Seeds rows straight through the repositories and codes straight into
//! Redis, then describes the JSON page contexts the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use blog_core::traits::{ArticleRepository, CategoryRepository, UserRepository};
use blog_core::{Article, ArticleCategory, Mobile, NewArticle, NewUser, User};
use reqwest::Response;
use serde::Deserialize;

use crate::helpers::TestServer;

/// Password accepted by the format rules
pub const PASSWORD: &str = "Passw0rd2024";

/// SMS code planted in Redis for form submissions
pub const SMS_CODE: &str = "246810";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A mobile number unlikely to collide with other test runs
pub fn unique_mobile() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::from(d.subsec_nanos()))
        .unwrap_or(0);
    let tail = (nanos + unique_suffix() * 7919) % 100_000_000;
    format!("198{tail:08}")
}

impl TestServer {
    /// Put an SMS code in Redis as if it had just been texted
    pub async fn plant_sms_code(&self, mobile: &str) -> Result<()> {
        let mobile = Mobile::parse(mobile)?;
        self.state
            .service_context()
            .verification_store()
            .store_sms_code(&mobile, SMS_CODE)
            .await?;
        Ok(())
    }

    /// Remember a captcha answer for `uuid`
    pub async fn plant_image_code(&self, uuid: &str, text: &str) -> Result<()> {
        self.state
            .service_context()
            .verification_store()
            .store_image_code(uuid, text)
            .await?;
        Ok(())
    }

    pub async fn sms_code_for(&self, mobile: &str) -> Result<Option<String>> {
        let mobile = Mobile::parse(mobile)?;
        Ok(self
            .state
            .service_context()
            .verification_store()
            .get_sms_code(&mobile)
            .await?)
    }

    /// Register `mobile` through the form; the default client ends up logged in
    pub async fn register(&self, mobile: &str) -> Result<Response> {
        self.plant_sms_code(mobile).await?;
        self.post_form(
            "/register",
            &[
                ("mobile", mobile),
                ("password", PASSWORD),
                ("password2", PASSWORD),
                ("sms_code", SMS_CODE),
            ],
        )
        .await
    }

    pub async fn seed_user(&self) -> Result<User> {
        let mobile = Mobile::parse(&unique_mobile())?;
        Ok(self
            .state
            .service_context()
            .user_repo()
            .create(&NewUser::from_mobile(mobile), "not-a-real-hash")
            .await?)
    }

    pub async fn seed_category(&self) -> Result<ArticleCategory> {
        let title = format!("Category {}", unique_suffix());
        Ok(self
            .state
            .service_context()
            .category_repo()
            .create(&title)
            .await?)
    }

    pub async fn seed_article(
        &self,
        author: &User,
        category: &ArticleCategory,
        title: &str,
    ) -> Result<Article> {
        Ok(self
            .state
            .service_context()
            .article_repo()
            .create(&NewArticle {
                author_id: author.id,
                category_id: category.id,
                avatar: None,
                tags: "test".to_string(),
                title: title.to_string(),
                summary: "summary".to_string(),
                content: "content".to_string(),
            })
            .await?)
    }
}

/// Category entry of a page context
#[derive(Debug, Deserialize)]
pub struct CategoryItem {
    pub id: i64,
    pub title: String,
}

/// Article entry of a listing
#[derive(Debug, Deserialize)]
pub struct ArticleItem {
    pub id: i64,
    pub title: String,
    pub total_views: i64,
    pub comments_count: i64,
}

/// `GET /`
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub categories: Vec<CategoryItem>,
    pub category: CategoryItem,
    pub articles: Vec<ArticleItem>,
    pub page_num: u32,
    pub total_page: u32,
    pub total_count: i64,
}

/// Comment entry of a detail page
#[derive(Debug, Deserialize)]
pub struct CommentItem {
    pub content: String,
    pub author_name: Option<String>,
}

/// `GET /detail`
#[derive(Debug, Deserialize)]
pub struct DetailPage {
    pub article: ArticleItem,
    pub hot_articles: Vec<ArticleItem>,
    pub comments: Vec<CommentItem>,
    pub total_count: i64,
}

/// `GET /center`
#[derive(Debug, Deserialize)]
pub struct ProfilePage {
    pub username: String,
    pub mobile: String,
    pub avatar_url: Option<String>,
    pub user_desc: String,
}

/// `GET /writeblog`
#[derive(Debug, Deserialize)]
pub struct WritePage {
    pub categories: Vec<CategoryItem>,
}

/// `{code, errmsg}` envelope of `/smscode`
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: String,
    pub errmsg: String,
}
