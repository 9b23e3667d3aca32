pub mod articles_db_operations;
pub mod boards_db_operations;
