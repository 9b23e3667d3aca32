use crate::models::Board;
use rusqlite::{params, Connection, OptionalExtension, Error as RusqliteError};

pub fn read_all_boards(conn: &Connection) -> Result<Vec<Board>, RusqliteError> {
    let mut stmt = conn.prepare(
        "SELECT board_id, board, board_zh, article_count, last_update FROM boards ORDER BY board_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Board {
            board_id: row.get(0)?,
            board: row.get(1)?,
            board_zh: row.get(2)?,
            article_count: row.get(3)?,
            last_update: row.get(4)?,
        })
    })?;
    rows.collect()
}

pub fn read_board_zh(conn: &Connection, board: &str) -> Result<Option<String>, RusqliteError> {
    conn.query_row("SELECT board_zh FROM boards WHERE board = ?1", [board], |row| row.get(0))
        .optional()
}

pub fn create_board(conn: &Connection, board: &str, board_zh: &str) -> Result<(), RusqliteError> {
    conn.execute(
        "INSERT INTO boards (board, board_zh) VALUES (?1, ?2)",
        params![board, board_zh],
    )?;
    Ok(())
}
