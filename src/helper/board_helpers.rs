use crate::error::ApiError;
use crate::models::db_operations::{articles_db_operations, boards_db_operations};
use crate::models::{ArticleDetail, ArticleSummary, Board, CommentSummary, SessionUser};
use crate::DbPool;
use actix_web::web;
use chrono::Utc;

pub const DEFAULT_LIST_LIMIT: u32 = 30;
/// Upper clamp on caller-supplied page sizes.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Sentinel `last_id` meaning "first page".
pub const FIRST_PAGE: i64 = -1;

fn minute_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M").to_string()
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub fn fetch_boards(pool: &web::Data<DbPool>) -> Result<Vec<Board>, ApiError> {
    let conn = pool.get()?;
    Ok(boards_db_operations::read_all_boards(&conn)?)
}

pub fn fetch_board_zh(pool: &web::Data<DbPool>, board: &str) -> Result<Option<String>, ApiError> {
    let conn = pool.get()?;
    Ok(boards_db_operations::read_board_zh(&conn, board)?)
}

/// One page of a board's feed. The first page (`last_id == FIRST_PAGE`) gets
/// every pinned article prepended, outside the limit; later pages never
/// contain pinned articles.
pub fn fetch_article_page(
    pool: &web::Data<DbPool>,
    board: &str,
    last_id: i64,
    limit: u32,
) -> Result<Vec<ArticleSummary>, ApiError> {
    let conn = pool.get()?;
    let limit = limit.min(MAX_LIST_LIMIT);

    if last_id == FIRST_PAGE {
        let mut page = articles_db_operations::read_pinned_summaries(&conn, board)?;
        page.extend(articles_db_operations::read_article_summaries(&conn, board, None, limit)?);
        Ok(page)
    } else {
        Ok(articles_db_operations::read_article_summaries(&conn, board, Some(last_id), limit)?)
    }
}

pub fn fetch_article(pool: &web::Data<DbPool>, article_id: i64) -> Result<ArticleDetail, ApiError> {
    let conn = pool.get()?;
    articles_db_operations::read_article(&conn, article_id)?
        .ok_or_else(|| ApiError::NotFound(format!("No article with id {}.", article_id)))
}

pub fn fetch_comments(pool: &web::Data<DbPool>, article_id: i64) -> Result<Vec<CommentSummary>, ApiError> {
    let conn = pool.get()?;
    Ok(articles_db_operations::read_comments(&conn, article_id)?)
}

/// Validates and writes a new article. The pinned request is honored only for
/// managers; everyone else gets `pinned = false` without an error. The insert
/// and the board-counter update commit together or not at all.
pub fn submit_article(
    pool: &web::Data<DbPool>,
    user: &SessionUser,
    board: &str,
    title: &str,
    content: &str,
    pinned_request: bool,
) -> Result<i64, ApiError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Article title must not be empty.".to_string()));
    }
    if content.is_empty() {
        return Err(ApiError::Validation("Article content must not be empty.".to_string()));
    }

    let pinned = pinned_request && user.is_manager;

    let mut conn = pool.get()?;
    let article_id = articles_db_operations::create_article(
        &mut conn,
        board,
        title,
        content,
        &minute_timestamp(),
        &user.author_id,
        pinned,
        &today(),
    )?;
    log::info!("Article {} created on board '{}' by {}", article_id, board, user.author_id);
    Ok(article_id)
}

/// Validates and writes a new comment. No existence check on `article_id`;
/// comments on deleted or never-existing articles are accepted.
pub fn submit_comment(
    pool: &web::Data<DbPool>,
    user: &SessionUser,
    article_id: i64,
    content: &str,
) -> Result<i64, ApiError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ApiError::Validation("Comment content must not be empty.".to_string()));
    }

    let conn = pool.get()?;
    let comment_id = articles_db_operations::create_comment(
        &conn,
        article_id,
        content,
        &minute_timestamp(),
        &user.author_id,
    )?;
    log::info!("Comment {} created on article {} by {}", comment_id, article_id, user.author_id);
    Ok(comment_id)
}
