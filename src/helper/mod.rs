pub mod auth_helpers;
pub mod board_helpers;
