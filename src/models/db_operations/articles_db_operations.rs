use crate::models::{ArticleDetail, ArticleSummary, CommentSummary};
use rusqlite::{params, Connection, OptionalExtension, Error as RusqliteError};

/// All pinned articles on a board, newest first. These form the first-page
/// prefix and are never filtered by the caller's limit.
pub fn read_pinned_summaries(
    conn: &Connection,
    board: &str,
) -> Result<Vec<ArticleSummary>, RusqliteError> {
    let mut stmt = conn.prepare(
        "SELECT article_id, article_board, article_title, upload_time, author_id, pinned
         FROM articles WHERE article_board = ?1 AND pinned = 1
         ORDER BY article_id DESC",
    )?;
    let rows = stmt.query_map([board], map_summary_row)?;
    rows.collect()
}

/// One page of the non-pinned feed. `last_id` is an exclusive upper cursor;
/// `None` means the first page. Descending `article_id` equals
/// reverse-chronological order because ids are assigned monotonically.
pub fn read_article_summaries(
    conn: &Connection,
    board: &str,
    last_id: Option<i64>,
    limit: u32,
) -> Result<Vec<ArticleSummary>, RusqliteError> {
    match last_id {
        Some(last_id) => {
            let mut stmt = conn.prepare(
                "SELECT article_id, article_board, article_title, upload_time, author_id, pinned
                 FROM articles WHERE article_board = ?1 AND pinned = 0 AND article_id < ?2
                 ORDER BY article_id DESC LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![board, last_id, limit], map_summary_row)?;
            rows.collect()
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT article_id, article_board, article_title, upload_time, author_id, pinned
                 FROM articles WHERE article_board = ?1 AND pinned = 0
                 ORDER BY article_id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![board, limit], map_summary_row)?;
            rows.collect()
        }
    }
}

fn map_summary_row(row: &rusqlite::Row) -> Result<ArticleSummary, RusqliteError> {
    Ok(ArticleSummary {
        article_id: row.get(0)?,
        article_board: row.get(1)?,
        article_title: row.get(2)?,
        upload_time: row.get(3)?,
        author_id: row.get(4)?,
        pinned: row.get(5)?,
    })
}

pub fn read_article(conn: &Connection, article_id: i64) -> Result<Option<ArticleDetail>, RusqliteError> {
    conn.query_row(
        "SELECT article_id, article_board, article_title, article_content, upload_time, author_id, pinned
         FROM articles WHERE article_id = ?1",
        [article_id],
        |row| {
            Ok(ArticleDetail {
                article_id: row.get(0)?,
                article_board: row.get(1)?,
                article_title: row.get(2)?,
                article_content: row.get(3)?,
                upload_time: row.get(4)?,
                author_id: row.get(5)?,
                pinned: row.get(6)?,
            })
        },
    )
    .optional()
}

/// Inserts the article and bumps the owning board's denormalized counter and
/// last-activity date inside one transaction. Either both rows persist or
/// neither does; any error before commit rolls the whole thing back.
pub fn create_article(
    conn: &mut Connection,
    board: &str,
    title: &str,
    content: &str,
    upload_time: &str,
    author_id: &str,
    pinned: bool,
    today: &str,
) -> Result<i64, RusqliteError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO articles (article_board, article_title, article_content, upload_time, author_id, pinned)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![board, title, content, upload_time, author_id, pinned],
    )?;
    let article_id = tx.last_insert_rowid();
    // Board is referenced by name without a foreign key; an unknown board
    // updates zero rows and the article still commits.
    tx.execute(
        "UPDATE boards SET article_count = article_count + 1, last_update = ?1 WHERE board = ?2",
        params![today, board],
    )?;
    tx.commit()?;
    Ok(article_id)
}

/// Comments on an article in creation order. `article_id` is not checked
/// against the articles table.
pub fn read_comments(conn: &Connection, article_id: i64) -> Result<Vec<CommentSummary>, RusqliteError> {
    let mut stmt = conn.prepare(
        "SELECT comment_id, article_id, comment_content, upload_time, author_id
         FROM comments WHERE article_id = ?1 ORDER BY comment_id ASC",
    )?;
    let rows = stmt.query_map([article_id], |row| {
        Ok(CommentSummary {
            comment_id: row.get(0)?,
            article_id: row.get(1)?,
            comment_content: row.get(2)?,
            upload_time: row.get(3)?,
            author_id: row.get(4)?,
        })
    })?;
    rows.collect()
}

pub fn create_comment(
    conn: &Connection,
    article_id: i64,
    content: &str,
    upload_time: &str,
    author_id: &str,
) -> Result<i64, RusqliteError> {
    conn.execute(
        "INSERT INTO comments (article_id, comment_content, upload_time, author_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![article_id, content, upload_time, author_id],
    )?;
    Ok(conn.last_insert_rowid())
}
