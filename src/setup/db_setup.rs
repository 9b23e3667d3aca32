use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

pub fn setup_board_db(conn: &mut Connection) -> Result<(), SetupError> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS boards (
            board_id INTEGER PRIMARY KEY AUTOINCREMENT,
            board TEXT NOT NULL UNIQUE,
            board_zh TEXT NOT NULL,
            article_count INTEGER NOT NULL DEFAULT 0,
            last_update TEXT
        )",
        [],
    )?;

    // article_board references boards.board by name on purpose; no FK.
    tx.execute(
        "CREATE TABLE IF NOT EXISTS articles (
            article_id INTEGER PRIMARY KEY AUTOINCREMENT,
            article_board TEXT NOT NULL,
            article_title TEXT NOT NULL,
            article_content TEXT NOT NULL,
            upload_time TEXT NOT NULL,
            author_id TEXT NOT NULL,
            pinned INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS comments (
            comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            article_id INTEGER NOT NULL,
            comment_content TEXT NOT NULL,
            upload_time TEXT NOT NULL,
            author_id TEXT NOT NULL
        )",
        [],
    )?;

    // Covers both the pinned prefix and the cursor-paged listing.
    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_articles_board_pinned_id
         ON articles (article_board, pinned, article_id)",
        [],
    )?;

    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_comments_article_id
         ON comments (article_id)",
        [],
    )?;

    tx.commit()?;
    Ok(())
}
