use chess_tasks::models::{SessionResponse, StatsResponse, Task};
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    data_path: PathBuf,
    data_dir: Option<TempDir>,
    child: Child,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
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
        if let Ok(resp) = client.get(format!("{base_url}/api/session")).send().await {
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

async fn spawn_server(data_path: PathBuf) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_chess_tasks"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", &data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        data_dir: None,
        child,
    }
}

/// Starts a server whose profile lives in a fresh directory, removed when the
/// server is dropped.
async fn fresh_server() -> TestServer {
    let data_dir = tempfile::tempdir().expect("create profile dir");
    let mut server = spawn_server(data_dir.path().join("profile.json")).await;
    server.data_dir = Some(data_dir);
    server
}

async fn logged_in_server() -> (TestServer, Client) {
    let server = fresh_server().await;
    let client = Client::new();
    let response = client
        .post(server.url("/login"))
        .form(&[("email", "player@chess.club"), ("password", "pw")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    (server, client)
}

async fn session(client: &Client, server: &TestServer) -> SessionResponse {
    client
        .get(server.url("/api/session"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn tasks(client: &Client, server: &TestServer) -> Vec<Task> {
    let response = client.get(server.url("/api/tasks")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_login_stores_lowercased_email() {
    let server = fresh_server().await;
    let client = Client::new();

    let page = client
        .post(server.url("/login"))
        .form(&[("email", "  Knight@Board.Games "), ("password", "anything")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("id=\"view-main\""));

    let current = session(&client, &server).await;
    assert_eq!(current.user.as_deref(), Some("knight@board.games"));
    assert_eq!(current.view, "main");
}

#[tokio::test]
async fn http_malformed_email_is_rejected() {
    let server = fresh_server().await;
    let client = Client::new();

    for email in ["not-an-email", "a@b", ""] {
        let page = client
            .post(server.url("/login"))
            .form(&[("email", email), ("password", "pw")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(page.contains("role=\"alertdialog\""), "{email}");
    }

    let current = session(&client, &server).await;
    assert!(current.user.is_none());
    assert_eq!(current.view, "login");

    let response = client.get(server.url("/api/tasks")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_views_follow_the_setter() {
    let (server, client) = logged_in_server().await;

    let page = client.get(server.url("/view/prod")).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("id=\"pieChart\""));
    assert!(page.contains("id=\"barChart\""));
    assert_eq!(session(&client, &server).await.view, "prod");

    let page = client.get(server.url("/view/details")).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("id=\"detailSelect\""));

    let response = client.get(server.url("/view/settings")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    client.post(server.url("/logout")).send().await.unwrap();
    client.get(server.url("/view/prod")).send().await.unwrap();
    assert_eq!(session(&client, &server).await.view, "login");
}

#[tokio::test]
async fn http_add_task_appends_one_pending_record() {
    let (server, client) = logged_in_server().await;
    let before = tasks(&client, &server).await;
    assert_eq!(before.len(), 3);

    client.get(server.url("/modal/new")).send().await.unwrap();
    let response = client
        .post(server.url("/modal/save"))
        .form(&[
            ("category", "Minor"),
            ("title", "Buy milk"),
            ("description", ""),
            ("deadline", ""),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = tasks(&client, &server).await;
    assert_eq!(after.len(), before.len() + 1);
    let added: Vec<&Task> = after
        .iter()
        .filter(|task| before.iter().all(|old| old.id != task.id))
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].title, "Buy milk");
    assert_eq!(added[0].category.label(), "Minor");
    assert!(!added[0].done);
    assert!(added[0].deadline.is_none());
}

#[tokio::test]
async fn http_toggle_persists_immediately() {
    let (server, client) = logged_in_server().await;
    let target = tasks(&client, &server).await[0].clone();
    assert!(!target.done);

    client
        .post(server.url(&format!("/tasks/{}/toggle", target.id)))
        .form(&[("done", "on")])
        .send()
        .await
        .unwrap();
    let reloaded = tasks(&client, &server).await;
    assert!(reloaded.iter().any(|task| task.id == target.id && task.done));

    client
        .post(server.url(&format!("/tasks/{}/toggle", target.id)))
        .form(&[] as &[(&str, &str)])
        .send()
        .await
        .unwrap();
    let reloaded = tasks(&client, &server).await;
    assert!(reloaded.iter().any(|task| task.id == target.id && !task.done));
}

#[tokio::test]
async fn http_delete_removes_exactly_one() {
    let (server, client) = logged_in_server().await;
    let before = tasks(&client, &server).await;
    let victim = before[1].id.clone();

    client
        .post(server.url("/details/delete"))
        .form(&[("id", victim.as_str())])
        .send()
        .await
        .unwrap();

    let after = tasks(&client, &server).await;
    let expected: Vec<Task> = before.into_iter().filter(|task| task.id != victim).collect();
    assert_eq!(after, expected);

    client
        .post(server.url("/details/delete"))
        .form(&[("id", "missing")])
        .send()
        .await
        .unwrap();
    assert_eq!(tasks(&client, &server).await, expected);
}

#[tokio::test]
async fn http_stats_count_per_category_and_completion() {
    let (server, client) = logged_in_server().await;

    let response = client
        .post(server.url("/api/tasks"))
        .json(&serde_json::json!({ "category": "Priority", "title": "Castle early" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let stats: StatsResponse = client
        .get(server.url("/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let counts: Vec<usize> = stats.per_category.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, [2, 1, 1, 0]);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completed + stats.pending, stats.total);
    assert_eq!(stats.total, 4);
}

#[tokio::test]
async fn http_markup_escapes_user_text() {
    let (server, client) = logged_in_server().await;
    client
        .post(server.url("/api/tasks"))
        .json(&serde_json::json!({
            "category": "Priority",
            "title": "<img src=x onerror=alert(1)>",
            "description": "\"quoted\" & more",
        }))
        .send()
        .await
        .unwrap();

    let page = client.get(server.url("/tabs/Priority")).send().await.unwrap().text().await.unwrap();
    assert!(!page.contains("<img src=x"));
    assert!(page.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(page.contains("&quot;quoted&quot; &amp; more"));
}

#[tokio::test]
async fn http_profile_survives_restart() {
    let (mut server, client) = logged_in_server().await;
    client
        .post(server.url("/theme"))
        .form(&[("theme", "dark")])
        .send()
        .await
        .unwrap();
    let before = tasks(&client, &server).await;

    let data_path = server.data_path.clone();
    let data_dir = server.data_dir.take();
    drop(server);

    let mut restarted = spawn_server(data_path).await;
    restarted.data_dir = data_dir;
    let current = session(&client, &restarted).await;
    assert_eq!(current.user.as_deref(), Some("player@chess.club"));
    assert_eq!(tasks(&client, &restarted).await, before);

    let page = client.get(restarted.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(page.contains("data-theme=\"dark\""));
}

#[tokio::test]
async fn http_profile_is_removed_with_the_server() {
    let (server, client) = logged_in_server().await;
    assert!(session(&client, &server).await.user.is_some());

    let data_path = server.data_path.clone();
    let data_dir = server.data_dir.as_ref().map(|dir| dir.path().to_path_buf());
    assert!(data_path.exists());
    drop(server);

    assert!(!data_path.exists());
    assert!(data_dir.is_some_and(|dir| !dir.exists()));
}
