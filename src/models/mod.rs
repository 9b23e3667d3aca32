use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Board {
    pub board_id: i64,
    pub board: String,
    pub board_zh: String,
    pub article_count: i64,
    pub last_update: Option<String>,
}

/// Listing row. Carries no body content so listing responses stay small.
#[derive(Debug, Serialize, Clone)]
pub struct ArticleSummary {
    pub article_id: i64,
    pub article_board: String,
    pub article_title: String,
    pub upload_time: String,
    pub author_id: String,
    pub pinned: bool,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    pub article_id: i64,
    pub article_board: String,
    pub article_title: String,
    pub article_content: String,
    pub upload_time: String,
    pub author_id: String,
    pub pinned: bool,
}

#[derive(Debug, Serialize)]
pub struct CommentSummary {
    pub comment_id: i64,
    pub article_id: i64,
    pub comment_content: String,
    pub upload_time: String,
    pub author_id: String,
}

/// Identity carried by the cookie session between login and logout.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionUser {
    pub author_id: String,
    pub name: String,
    pub email: String,
    pub is_manager: bool,
}

pub mod db_operations;
