use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use task_calendar::{ApiClient, ApiError, DayCell, DayStatus};
use tokio::sync::Mutex;
use tokio::time::sleep;

const PINNED_TODAY: &str = "2024-02-15";

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    display: String,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    year: i32,
    month: u32,
    days: Vec<DayCell>,
}

#[derive(Debug, Deserialize)]
struct NamesResponse {
    names: String,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    js: i32,
    backend: i32,
}

#[derive(Debug, Deserialize)]
struct WeekdayOptionBody {
    name: String,
    value: i32,
}

#[derive(Debug, Deserialize)]
struct DisplayResponse {
    display: String,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl TestServer {
    fn api(&self) -> ApiClient {
        ApiClient::new(format!("{}/api", self.base_url))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

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
    let child = Command::new(env!("CARGO_BIN_EXE_task_calendar"))
        .env("PORT", port.to_string())
        .env("APP_TODAY", PINNED_TODAY)
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

#[tokio::test]
async fn http_today_follows_pinned_clock() {
    let server = shared_server().await;

    let today: TodayResponse = Client::new()
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(today.date, PINNED_TODAY);
    assert_eq!(today.display, "2024年2月15日");
}

#[tokio::test]
async fn http_calendar_marks_today() {
    let server = shared_server().await;

    let calendar: CalendarResponse = server.api().get("/calendar?year=2024&month=1").await.unwrap();

    assert_eq!((calendar.year, calendar.month), (2024, 1));
    // 2024-02-01 was a Thursday.
    assert_eq!(calendar.days.len(), 4 + 29);
    assert!(calendar.days[..4].iter().all(|cell| !cell.is_current_month));

    let marked: Vec<_> = calendar.days.iter().filter(|cell| cell.is_today).collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].day, Some(15));
}

#[tokio::test]
async fn http_calendar_rejects_bad_month() {
    let server = shared_server().await;

    let err = server
        .api()
        .get::<CalendarResponse>("/calendar?year=2024&month=12")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    match err {
        ApiError::Status { message, .. } => assert!(message.contains("month 12"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn http_calendar_status_applies_history() {
    let server = shared_server().await;

    let body = serde_json::json!({
        "year": 2024,
        "month": 1,
        "history": [
            { "date": "2024-02-01", "total_active_tasks": 2, "completed_count": 2 },
            { "date": "2024-02-02", "total_active_tasks": 2, "completed_count": 1 },
        ],
    });
    let calendar: CalendarResponse = server.api().post("/calendar/status", &body).await.unwrap();

    let status_of = |day: u32| {
        calendar
            .days
            .iter()
            .find(|cell| cell.day == Some(day))
            .map(|cell| cell.status)
            .unwrap()
    };
    assert_eq!(status_of(1), DayStatus::Completed);
    assert_eq!(status_of(2), DayStatus::Partial);
    assert_eq!(status_of(3), DayStatus::Pending);
}

#[tokio::test]
async fn http_weekday_endpoints() {
    let server = shared_server().await;
    let api = server.api();

    let options: Vec<WeekdayOptionBody> = api.get("/weekdays").await.unwrap();
    let values: Vec<i32> = options.iter().map(|option| option.value).collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 0]);
    assert_eq!(options[6].name, "周日");

    let names: NamesResponse = api.get("/weekdays/names?days=1,3").await.unwrap();
    assert_eq!(names.names, "周一, 周三");
    let none: NamesResponse = api.get("/weekdays/names").await.unwrap();
    assert_eq!(none.names, "无");

    let converted: ConvertResponse = api.get("/weekdays/convert?js=0").await.unwrap();
    assert_eq!((converted.js, converted.backend), (0, 6));
    let converted: ConvertResponse = api.get("/weekdays/convert?backend=0").await.unwrap();
    assert_eq!((converted.js, converted.backend), (1, 0));

    let err = api
        .get::<NamesResponse>("/weekdays/names?days=1,mon")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn http_display_date_degrades_instead_of_failing() {
    let server = shared_server().await;
    let api = server.api();

    let shown: DisplayResponse = api.get("/display-date?date=2024-03-07").await.unwrap();
    assert_eq!(shown.display, "2024年3月7日");
    let malformed: DisplayResponse = api.get("/display-date?date=2024").await.unwrap();
    assert_eq!(malformed.display, "2024年NaN月NaN日");
    let empty: DisplayResponse = api.get("/display-date").await.unwrap();
    assert_eq!(empty.display, "");
}

#[tokio::test]
async fn http_missing_query_field_is_json_error() {
    let server = shared_server().await;

    let err = server
        .api()
        .get::<CalendarResponse>("/calendar?year=2024")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    match err {
        ApiError::Status { message, .. } => assert!(message.contains("month"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn http_malformed_query_values_are_json_errors() {
    let server = shared_server().await;
    let api = server.api();

    for path in [
        "/weekdays/convert?js=abc",
        "/calendar?year=2024&month=-1",
        "/calendar?year=twenty&month=1",
    ] {
        let err = api.get::<ConvertResponse>(path).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }), "{path}: {err}");
    }
}

#[tokio::test]
async fn http_bad_status_body_is_json_error() {
    let server = shared_server().await;

    let body = serde_json::json!({ "year": 2024 });
    let err = server
        .api()
        .post::<CalendarResponse, _>("/calendar/status", &body)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));

    let body = serde_json::json!({
        "year": 2024,
        "month": 1,
        "history": [{ "date": "2024-2-1", "total_active_tasks": 1, "completed_count": 1 }],
    });
    let err = server
        .api()
        .post::<CalendarResponse, _>("/calendar/status", &body)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
}
