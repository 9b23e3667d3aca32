use crate::error::ApiError;
use crate::helper::board_helpers;
use crate::models::SessionUser;
use crate::DbPool;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct WriteArticleForm {
    article_board: String,
    article_title: String,
    article_content: String,
    #[serde(default)]
    pinned: bool,
}

#[derive(Deserialize)]
pub struct WriteCommentForm {
    article_id: i64,
    comment_content: String,
}

pub fn config_write(cfg: &mut web::ServiceConfig) {
    cfg.route("/write", web::post().to(write_article))
        .route("/write_comment", web::post().to(write_comment));
}

async fn write_article(
    user: SessionUser,
    pool: web::Data<DbPool>,
    form: web::Json<WriteArticleForm>,
) -> Result<HttpResponse, ApiError> {
    let article_id = board_helpers::submit_article(
        &pool,
        &user,
        &form.article_board,
        &form.article_title,
        &form.article_content,
        form.pinned,
    )?;
    Ok(HttpResponse::Created().json(json!({ "message": format!("Article {} created.", article_id) })))
}

async fn write_comment(
    user: SessionUser,
    pool: web::Data<DbPool>,
    form: web::Json<WriteCommentForm>,
) -> Result<HttpResponse, ApiError> {
    let comment_id =
        board_helpers::submit_comment(&pool, &user, form.article_id, &form.comment_content)?;
    Ok(HttpResponse::Created().json(json!({ "message": format!("Comment {} created.", comment_id) })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::boards_db_operations;
    use crate::setup::db_setup;
    use actix_session::{storage::CookieSessionStore, SessionMiddleware};
    use actix_web::cookie::Key;
    use actix_web::{test, App};
    use r2d2_sqlite::SqliteConnectionManager;

    fn test_pool() -> web::Data<DbPool> {
        let manager = SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder().max_size(1).build(manager).expect("pool");
        {
            let mut conn = pool.get().unwrap();
            db_setup::setup_board_db(&mut conn).unwrap();
            boards_db_operations::create_board(&conn, "general", "綜合").unwrap();
        }
        web::Data::new(pool)
    }

    #[actix_web::test]
    async fn writes_without_a_session_are_unauthorized() {
        let pool = test_pool();
        let key = Key::from(&[0u8; 64]);
        let app = test::init_service(
            App::new()
                .app_data(pool.clone())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .service(web::scope("/api").configure(config_write)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/write")
            .set_json(json!({
                "article_board": "general",
                "article_title": "title",
                "article_content": "body",
                "pinned": false
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/write_comment")
            .set_json(json!({ "article_id": 1, "comment_content": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

        // Nothing was written.
        let articles: i64 = pool
            .get()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM articles", [], |r| r.get(0))
            .unwrap();
        assert_eq!(articles, 0);
    }
}
