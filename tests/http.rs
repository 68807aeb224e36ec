use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct EntryBody {
    date: String,
    category: String,
    metric: u64,
    reflection: String,
    bible_verse: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ReportRowBody {
    period: String,
    category: Option<String>,
    metric: u64,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("practice_tracker_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/categories")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_practice_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_entries(client: &Client, base_url: &str) -> Vec<EntryBody> {
    client
        .get(format!("{base_url}/api/entries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_entry(client: &Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/entries"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_first_run_config_has_defaults() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let config: serde_json::Value = client
        .get(format!("{}/api/config", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(config["goals"].as_object().unwrap().len(), 7);
    assert_eq!(config["notification_settings"]["daily_reminder_time"], "08:00");
    assert_eq!(config["notification_settings"]["enable_notifications"], true);

    let page = client
        .get(format!("{}/settings", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Settings are currently read-only in this version."));
}

#[tokio::test]
async fn http_append_then_list_returns_entry_last() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_entries(&client, &server.base_url).await;
    let response = post_entry(
        &client,
        &server.base_url,
        serde_json::json!({
            "date": "2021-04-11",
            "category": "Generosity & Giving",
            "metric": 7,
            "reflection": "gave to the food bank"
        }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let after = fetch_entries(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(
        after.last().unwrap(),
        &EntryBody {
            date: "2021-04-11".to_string(),
            category: "Generosity & Giving".to_string(),
            metric: 7,
            reflection: "gave to the food bank".to_string(),
            bible_verse: "2 Corinthians 9:7".to_string(),
        }
    );
}

#[tokio::test]
async fn http_unknown_category_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_entries(&client, &server.base_url).await;
    let response = post_entry(
        &client,
        &server.base_url,
        serde_json::json!({ "category": "Fasting", "metric": 1 }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(fetch_entries(&client, &server.base_url).await.len(), before.len());
}

#[tokio::test]
async fn http_monthly_report_sums_per_category() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for (date, category, metric) in [
        ("1999-01-05", "Love & Service", 3),
        ("1999-01-12", "Love & Service", 2),
        ("1999-02-01", "Holiness & Obedience", 4),
    ] {
        let response = post_entry(
            &client,
            &server.base_url,
            serde_json::json!({ "date": date, "category": category, "metric": metric }),
        )
        .await;
        assert!(response.status().is_success());
    }

    let rows: Vec<ReportRowBody> = client
        .get(format!("{}/api/reports", server.base_url))
        .query(&[("granularity", "Monthly"), ("category", "All")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let in_1999: Vec<&ReportRowBody> = rows.iter().filter(|row| row.period.starts_with("1999")).collect();
    assert_eq!(
        in_1999,
        vec![
            &ReportRowBody {
                period: "1999-01".to_string(),
                category: Some("Love & Service".to_string()),
                metric: 5,
            },
            &ReportRowBody {
                period: "1999-02".to_string(),
                category: Some("Holiness & Obedience".to_string()),
                metric: 4,
            },
        ]
    );

    let response = client
        .get(format!("{}/api/reports", server.base_url))
        .query(&[("granularity", "Daily")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_log_form_submission_shows_success() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let page = client
        .post(format!("{}/log", server.base_url))
        .form(&[
            ("category", "Heart & Motivation Check"),
            ("date", "2022-09-18"),
            ("metric", "1"),
            ("reflection", "<quiet> morning"),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Entry logged successfully!"));
    assert!(page.contains("Matthew 6:1-4"));

    let dashboard = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(dashboard.contains("&lt;quiet&gt; morning"));
}

#[tokio::test]
async fn http_log_form_with_bad_metric_renders_page_notice() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_entries(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/log", server.base_url))
        .form(&[
            ("category", "Love & Service"),
            ("date", "2022-09-18"),
            ("metric", "lots"),
            ("reflection", ""),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("notice error"));
    assert!(page.contains("Entry was not saved"));
    assert_eq!(fetch_entries(&client, &server.base_url).await.len(), before.len());
}
