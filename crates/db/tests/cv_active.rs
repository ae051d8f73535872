//! Integration tests for CV records and the single-active invariant.

use folio_db::models::cv::CreateCv;
use folio_db::repositories::CvRepo;
use sqlx::PgPool;

fn new_cv(name: &str) -> CreateCv {
    CreateCv {
        file_name: name.to_string(),
        storage_path: format!("cv_1_{name}"),
        public_url: format!("https://cdn.example.com/cv-files/cv_1_{name}"),
    }
}

async fn active_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cvs WHERE is_active")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_cvs_start_inactive(pool: PgPool) {
    let cv = CvRepo::create(&pool, &new_cv("a.pdf")).await.unwrap();
    assert!(!cv.is_active);
    assert!(CvRepo::find_active(&pool).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activation_swaps_the_active_cv(pool: PgPool) {
    let first = CvRepo::create(&pool, &new_cv("first.pdf")).await.unwrap();
    let second = CvRepo::create(&pool, &new_cv("second.pdf")).await.unwrap();

    CvRepo::set_active(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(active_count(&pool).await, 1);

    let activated = CvRepo::set_active(&pool, second.id).await.unwrap().unwrap();
    assert!(activated.is_active);
    assert_eq!(active_count(&pool).await, 1);
    assert_eq!(CvRepo::find_active(&pool).await.unwrap().unwrap().id, second.id);

    // Re-activating the already active CV keeps exactly one active.
    CvRepo::set_active(&pool, second.id).await.unwrap().unwrap();
    assert_eq!(active_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activating_missing_cv_keeps_previous_active(pool: PgPool) {
    let cv = CvRepo::create(&pool, &new_cv("keep.pdf")).await.unwrap();
    CvRepo::set_active(&pool, cv.id).await.unwrap();

    let result = CvRepo::set_active(&pool, 999_999).await.unwrap();
    assert!(result.is_none());
    assert_eq!(CvRepo::find_active(&pool).await.unwrap().unwrap().id, cv.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_active_row_violates_unique_index(pool: PgPool) {
    let a = CvRepo::create(&pool, &new_cv("a.pdf")).await.unwrap();
    let b = CvRepo::create(&pool, &new_cv("b.pdf")).await.unwrap();
    CvRepo::set_active(&pool, a.id).await.unwrap();

    let err = sqlx::query("UPDATE cvs SET is_active = true WHERE id = $1")
        .bind(b.id)
        .execute(&pool)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_cvs_single_active"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_newest_first_and_delete_returns_row(pool: PgPool) {
    let older = CvRepo::create(&pool, &new_cv("older.pdf")).await.unwrap();
    let newer = CvRepo::create(&pool, &new_cv("newer.pdf")).await.unwrap();

    let ids: Vec<i64> = CvRepo::list(&pool).await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let deleted = CvRepo::delete(&pool, older.id).await.unwrap().unwrap();
    assert_eq!(deleted.storage_path, "cv_1_older.pdf");
    assert!(CvRepo::find_by_id(&pool, older.id).await.unwrap().is_none());
}
