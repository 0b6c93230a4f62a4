//! Durable storage tests over a real SQLite file.
//!
//! Quota and Free-plan history must survive an application restart; these
//! tests open the same database file twice to simulate one.

mod helpers;

use tempfile::TempDir;

use indexflow::session::Plan;
use indexflow::storage::SqliteStore;
use indexflow::{App, Config, SimulatedAuditor};

use helpers::profile;

async fn open_app(dir: &TempDir) -> App<SimulatedAuditor, SqliteStore> {
    let db_path = dir.path().join("indexflow.db");
    let store = SqliteStore::open(&db_path).await.expect("open store");
    let mut app = App::new(
        SimulatedAuditor::deterministic(42),
        store,
        &Config::default(),
    );
    app.startup().await;
    app
}

#[tokio::test]
async fn quota_exhaustion_survives_a_restart() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut app = open_app(&dir).await;
        for i in 1..=3 {
            app.submit(&format!("https://site-{i}.example"))
                .await
                .expect("within quota");
        }
        assert!(app.view().quota_exhausted);
    }

    // Fresh process, same database: startup restores the lockout
    let mut app = open_app(&dir).await;
    assert!(app.view().quota_exhausted);
    assert!(app.quota().limit_reached(Plan::Free).await);
    assert!(app.submit("https://site-4.example").await.is_err());
}

#[tokio::test]
async fn free_history_survives_a_restart_and_relogin() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut app = open_app(&dir).await;
        app.login(profile("ada@example.com")).await;
        app.submit("https://site-1.example").await.expect("submit");
        app.submit("https://site-2.example").await.expect("submit");
        app.logout().await;
    }

    let mut app = open_app(&dir).await;
    assert!(app.history().is_empty(), "nothing before sign-in");
    app.login(profile("ada@example.com")).await;
    assert_eq!(app.history().len(), 2);
    assert_eq!(app.history()[0].url, "https://site-2.example");
}

#[tokio::test]
async fn cookie_consent_survives_a_restart() {
    let dir = TempDir::new().expect("tempdir");

    {
        let app = open_app(&dir).await;
        assert!(app.cookie_banner_needed().await);
        app.accept_cookies().await;
    }

    let app = open_app(&dir).await;
    assert!(!app.cookie_banner_needed().await);
}
