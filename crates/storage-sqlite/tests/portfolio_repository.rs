use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use diesel::prelude::*;
use folio_core::portfolios::{DailyBucket, NewPortfolio, PortfolioRepositoryTrait};
use folio_storage_sqlite::portfolios::PortfolioRepository;
use folio_storage_sqlite::schema::portfolio_daily_views;
use folio_storage_sqlite::{create_pool, get_connection, init, run_migrations, spawn_writer, DbPool};
use tempfile::{tempdir, TempDir};

struct TestDb {
    _dir: TempDir,
    pool: Arc<DbPool>,
    repo: Arc<PortfolioRepository>,
}

fn setup() -> TestDb {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let db_path = init(&db_path).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    let repo = Arc::new(PortfolioRepository::new(pool.clone(), writer));
    TestDb {
        _dir: dir,
        pool,
        repo,
    }
}

fn new_portfolio(title: &str) -> NewPortfolio {
    NewPortfolio {
        title: title.to_string(),
        description: "A description".to_string(),
        content: "Some content".to_string(),
        user_id: "user-1".to_string(),
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn insert_and_load_round_trip() {
    let db = setup();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();

    let created = db
        .repo
        .insert_new_portfolio(new_portfolio("First"), created_at)
        .await
        .unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(created.views.total, 0);
    assert!(created.views.daily.is_empty());
    assert_eq!(created.created_at, created_at);

    let loaded = db.repo.get_portfolio(&created.id).unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn record_view_buckets_in_first_seen_order() {
    let db = setup();
    let id = db
        .repo
        .insert_new_portfolio(new_portfolio("Views"), Utc::now())
        .await
        .unwrap()
        .id;

    for view_day in [day(2024, 1, 2), day(2024, 1, 1), day(2024, 1, 2)] {
        db.repo.record_view(id.clone(), view_day).await.unwrap();
    }
    let returned = db.repo.record_view(id.clone(), day(2024, 1, 1)).await.unwrap();

    let expected = vec![
        DailyBucket {
            date: day(2024, 1, 2),
            count: 2,
        },
        DailyBucket {
            date: day(2024, 1, 1),
            count: 2,
        },
    ];
    assert_eq!(returned.views.total, 4);
    assert_eq!(returned.views.daily, expected);

    let stored = db.repo.get_portfolio(&id).unwrap();
    assert_eq!(stored.views, returned.views);
}

#[tokio::test]
async fn record_view_on_missing_portfolio_is_not_found() {
    let db = setup();
    let err = db
        .repo
        .record_view("does-not-exist".to_string(), day(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_views_lose_no_increment() {
    let db = setup();
    let id = db
        .repo
        .insert_new_portfolio(new_portfolio("Busy"), Utc::now())
        .await
        .unwrap()
        .id;

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let repo = db.repo.clone();
            let id = id.clone();
            tokio::spawn(async move { repo.record_view(id, day(2024, 3, 1)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = db.repo.get_portfolio(&id).unwrap();
    assert_eq!(stored.views.total, 25);
    assert_eq!(
        stored.views.daily,
        vec![DailyBucket {
            date: day(2024, 3, 1),
            count: 25
        }]
    );
}

#[tokio::test]
async fn update_keeps_view_statistics() {
    let db = setup();
    let mut portfolio = db
        .repo
        .insert_new_portfolio(new_portfolio("Before"), Utc::now())
        .await
        .unwrap();
    db.repo
        .record_view(portfolio.id.clone(), day(2024, 1, 1))
        .await
        .unwrap();

    // Stale copy with zero views must not reset the counters
    portfolio.title = "After".to_string();
    let updated = db.repo.update_portfolio(portfolio).await.unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.views.total, 1);
    assert_eq!(updated.views.daily.len(), 1);
}

#[tokio::test]
async fn update_missing_portfolio_is_not_found() {
    let db = setup();
    let mut ghost = db
        .repo
        .insert_new_portfolio(new_portfolio("Ghost"), Utc::now())
        .await
        .unwrap();
    db.repo.delete_portfolio(ghost.id.clone()).await.unwrap();

    ghost.title = "Still here?".to_string();
    assert!(db.repo.update_portfolio(ghost).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_cascades_daily_views() {
    let db = setup();
    let id = db
        .repo
        .insert_new_portfolio(new_portfolio("Doomed"), Utc::now())
        .await
        .unwrap()
        .id;
    db.repo.record_view(id.clone(), day(2024, 1, 1)).await.unwrap();
    db.repo.record_view(id.clone(), day(2024, 1, 2)).await.unwrap();

    assert_eq!(db.repo.delete_portfolio(id.clone()).await.unwrap(), 1);
    assert_eq!(db.repo.delete_portfolio(id.clone()).await.unwrap(), 0);
    assert!(db.repo.get_portfolio(&id).unwrap_err().is_not_found());

    let mut conn = get_connection(&db.pool).unwrap();
    let remaining: i64 = portfolio_daily_views::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn load_portfolios_in_creation_order_with_their_own_buckets() {
    let db = setup();
    let first = db
        .repo
        .insert_new_portfolio(
            new_portfolio("First"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .await
        .unwrap();
    let second = db
        .repo
        .insert_new_portfolio(
            new_portfolio("Second"),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        )
        .await
        .unwrap();
    db.repo
        .record_view(second.id.clone(), day(2024, 1, 3))
        .await
        .unwrap();

    let all = db.repo.load_portfolios().unwrap();

    assert_eq!(
        all.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec![first.id.as_str(), second.id.as_str()]
    );
    assert!(all[0].views.daily.is_empty());
    assert_eq!(all[1].views.total, 1);
    assert_eq!(all[1].views.daily[0].date, day(2024, 1, 3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reads_during_views_see_consistent_totals() {
    let db = setup();
    let id = db
        .repo
        .insert_new_portfolio(new_portfolio("Popular"), Utc::now())
        .await
        .unwrap()
        .id;

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let repo = db.repo.clone();
        let id = id.clone();
        let done = done.clone();
        std::thread::spawn(move || {
            let mut torn = 0;
            while !done.load(Ordering::Relaxed) {
                let stored = repo.get_portfolio(&id).unwrap();
                let summed: u64 = stored.views.daily.iter().map(|b| b.count).sum();
                if summed != stored.views.total {
                    torn += 1;
                }
                for listed in repo.load_portfolios().unwrap() {
                    let summed: u64 = listed.views.daily.iter().map(|b| b.count).sum();
                    if summed != listed.views.total {
                        torn += 1;
                    }
                }
            }
            torn
        })
    };

    for i in 0..600u32 {
        let view_day = day(2024, 1, 1) + chrono::Days::new(u64::from(i % 30));
        db.repo.record_view(id.clone(), view_day).await.unwrap();
    }
    done.store(true, Ordering::Relaxed);

    assert_eq!(reader.join().unwrap(), 0);

    let stored = db.repo.get_portfolio(&id).unwrap();
    assert_eq!(stored.views.total, 600);
    assert_eq!(stored.views.daily.len(), 30);
    assert!(stored.views.daily.iter().all(|b| b.count == 20));
}
