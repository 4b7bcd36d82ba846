use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct Report {
    content: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct Member {
    id: usize,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    monday: String,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    date: String,
    done_count: usize,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct WeekResponse {
    monday: String,
    week: String,
    dates: Vec<String>,
    reports: BTreeMap<String, BTreeMap<String, Report>>,
    summary: Vec<DaySummary>,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("status_board_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_team_status_board"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

async fn get_reports(client: &Client, server: &TestServer, date: &str) -> BTreeMap<String, Report> {
    client
        .get(format!("{}/api/reports/{date}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_today_reports_date_and_monday() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(today.date.len(), 10);
    assert_eq!(today.monday.len(), 10);
    assert!(today.monday <= today.date);
}

#[tokio::test]
async fn http_daily_page_renders_default_members() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/daily?date=2024-05-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("미작성"));
    assert!(html.contains(r#"value="2024-05-01""#));

    let bad = client
        .get(format!("{}/daily?date=yesterday", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_row_save_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/reports/2024-05-01/2", server.base_url))
        .json(&serde_json::json!({ "content": "배포 완료", "done": true }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let reports = get_reports(&client, &server, "2024-05-01").await;
    assert_eq!(
        reports.get("2"),
        Some(&Report {
            content: "배포 완료".to_string(),
            done: true
        })
    );
}

#[tokio::test]
async fn http_completion_toggle_saves_displayed_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .put(format!("{}/api/reports/2024-05-02/0", server.base_url))
        .json(&serde_json::json!({ "content": "draft", "done": false }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/reports/2024-05-02/0/completion", server.base_url))
        .json(&serde_json::json!({ "done": true, "content": "draft, then more" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let reports = get_reports(&client, &server, "2024-05-02").await;
    assert_eq!(
        reports["0"],
        Report {
            content: "draft, then more".to_string(),
            done: true
        }
    );
}

#[tokio::test]
async fn http_save_all_touches_only_listed_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .put(format!("{}/api/reports/2024-06-01/1", server.base_url))
        .json(&serde_json::json!({ "content": "untouched", "done": true }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/save-all", server.base_url))
        .json(&serde_json::json!({
            "reports": {
                "2024-06-03": {
                    "0": { "content": "mon", "done": true },
                    "1": { "content": "", "done": false }
                },
                "2024-06-04": {
                    "0": { "content": "tue", "done": false }
                }
            }
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let monday = get_reports(&client, &server, "2024-06-03").await;
    assert_eq!(monday.len(), 2);
    assert_eq!(monday["0"].content, "mon");
    assert!(monday["0"].done);

    let untouched = get_reports(&client, &server, "2024-06-01").await;
    assert_eq!(untouched["1"].content, "untouched");

    let week: WeekResponse = client
        .get(format!("{}/api/weeks/2024-06-05", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(week.monday, "2024-06-03");
    assert_eq!(week.week, "2024-W23");
    assert_eq!(week.dates.len(), 7);
    assert_eq!(week.dates[6], "2024-06-09");
    assert_eq!(week.reports["2024-06-04"]["0"].content, "tue");
    assert_eq!(week.summary[0].date, "2024-06-03");
    assert_eq!(week.summary[0].done_count, 1);
    assert_eq!(week.summary[0].total, 6);
}

#[tokio::test]
async fn http_blank_rename_reverts_to_default() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let renamed: Member = client
        .put(format!("{}/api/members/4", server.base_url))
        .json(&serde_json::json!({ "name": "  Dana  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(renamed.id, 4);
    assert_eq!(renamed.name, "Dana");

    let reverted: Member = client
        .put(format!("{}/api/members/4", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reverted.name, "최수진");

    let members: Vec<Member> = client
        .get(format!("{}/api/members", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(members.len(), 6);
    assert_eq!(members[4].name, "최수진");

    let missing = client
        .put(format!("{}/api/members/99", server.base_url))
        .json(&serde_json::json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_out_of_range_years_are_bad_requests() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let paths = [
        "/daily?date=%2B262142-12-31",
        "/weekly?date=%2B262142-12-31",
        "/daily?date=-262143-01-01",
        "/weekly?date=-262143-01-01",
        "/api/weeks/+262142-12-31",
        "/api/weeks/-262143-01-01",
        "/api/reports/+262142-12-31",
    ];
    for path in paths {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
    }

    let response = client
        .put(format!("{}/api/reports/+262142-12-31/0", server.base_url))
        .json(&serde_json::json!({ "content": "x", "done": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let still_up = client
        .get(format!("{}/weekly?date=9999-12-31", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(still_up.status().is_success());
}

#[tokio::test]
async fn http_save_all_rejects_same_date_spelled_twice() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/save-all", server.base_url))
        .json(&serde_json::json!({
            "reports": {
                "2024-7-1": { "0": { "content": "first", "done": true } },
                "2024-07-01": { "0": { "content": "second", "done": false } }
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let reports = get_reports(&client, &server, "2024-07-01").await;
    assert!(reports.is_empty());
}
