use crate::error::ApiError;
use crate::helper::board_helpers;
use crate::DbPool;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ListQuery {
    board: String,
    limit: Option<u32>,
    last_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct BoardZhQuery {
    board: String,
}

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_articles))
        .route("/boards", web::get().to(list_boards))
        .route("/board_zh", web::get().to(board_zh))
        .route("/article/{id}", web::get().to(get_article))
        .route("/comments/{article_id}", web::get().to(get_comments));
}

async fn list_articles(
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(board_helpers::DEFAULT_LIST_LIMIT);
    let last_id = query.last_id.unwrap_or(board_helpers::FIRST_PAGE);

    let page = board_helpers::fetch_article_page(&pool, &query.board, last_id, limit)?;
    Ok(HttpResponse::Ok().json(page))
}

async fn list_boards(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let boards = board_helpers::fetch_boards(&pool)?;
    Ok(HttpResponse::Ok().json(boards))
}

async fn board_zh(
    pool: web::Data<DbPool>,
    query: web::Query<BoardZhQuery>,
) -> Result<HttpResponse, ApiError> {
    let board_zh = board_helpers::fetch_board_zh(&pool, &query.board)?;
    Ok(HttpResponse::Ok().json(json!({ "board_zh": board_zh })))
}

async fn get_article(
    pool: web::Data<DbPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let article = board_helpers::fetch_article(&pool, id.into_inner())?;
    Ok(HttpResponse::Ok().json(article))
}

async fn get_comments(
    pool: web::Data<DbPool>,
    article_id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let comments = board_helpers::fetch_comments(&pool, article_id.into_inner())?;
    Ok(HttpResponse::Ok().json(comments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::{articles_db_operations, boards_db_operations};
    use crate::setup::db_setup;
    use actix_web::{test, App};
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_pool() -> web::Data<DbPool> {
        let manager = SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder().max_size(1).build(manager).expect("pool");
        {
            let mut conn = pool.get().unwrap();
            db_setup::setup_board_db(&mut conn).unwrap();
            boards_db_operations::create_board(&conn, "general", "綜合").unwrap();
            for i in 1..=5 {
                articles_db_operations::create_article(
                    &mut conn, "general", &format!("article {}", i), "body",
                    "2024-01-01 12:00", "author-1", false, "2024-01-01",
                )
                .unwrap();
            }
        }
        web::Data::new(pool)
    }

    macro_rules! test_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data($pool.clone())
                    .service(web::scope("/api").configure(config_api)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn listing_returns_summaries_newest_first() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api?board=general").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["article_id"], 5);
        assert!(items[0].get("article_content").is_none());
    }

    #[actix_web::test]
    async fn boards_endpoint_includes_counters() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api/boards").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["board"], "general");
        assert_eq!(body[0]["article_count"], 5);
    }

    #[actix_web::test]
    async fn board_zh_lookup_returns_null_for_unknown_boards() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api/board_zh?board=general").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["board_zh"], "綜合");

        let req = test::TestRequest::get().uri("/api/board_zh?board=nope").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["board_zh"].is_null());
    }

    #[actix_web::test]
    async fn missing_article_is_a_404_with_error_body() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api/article/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.get("error").is_some());
    }

    #[actix_web::test]
    async fn comments_of_an_uncommented_article_are_an_empty_array() {
        let pool = test_pool();
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api/comments/1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 0);
    }
}
