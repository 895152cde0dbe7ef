use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};
use server::auth::{ServerAuth, ServerState};
use server::startup;

const ADMIN_EMAIL: &str = "admin@studio.test";
const ADMIN_PASSWORD: &str = "S3curePass!";

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    state: ServerState,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    async fn token(&self, email: &str, password: &str) -> anyhow::Result<String> {
        let res = self.client.post(self.url("/api/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body: Value = res.json().await?;
        Ok(body["token"].as_str().unwrap_or_default().to_string())
    }

    async fn admin_token(&self) -> anyhow::Result<String> { self.token(ADMIN_EMAIL, ADMIN_PASSWORD).await }

    async fn create(&self, token: &str, path: &str, body: Value) -> anyhow::Result<Value> {
        let res = self.client.post(self.url(path)).bearer_auth(token).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED, "create {path}");
        Ok(res.json().await?)
    }

    async fn list(&self, path: &str) -> anyhow::Result<Vec<Value>> {
        let res = self.client.get(self.url(path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        Ok(res.json().await?)
    }

    async fn reorder(&self, token: &str, path: &str, ids: &[&Value]) -> anyhow::Result<reqwest::Response> {
        let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        Ok(self.client.post(self.url(path)).bearer_auth(token).json(&json!({"items": items})).send().await?)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.auth.admin_email = Some(ADMIN_EMAIL.into());
    cfg.auth.admin_password = Some(ADMIN_PASSWORD.into());

    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    let state = ServerState::new(db.clone(), (&cfg.auth).into());
    startup::prepare(&db, &cfg, &state).await?;
    let app = startup::app(&cfg, state.clone()).await;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new(), state })
}

fn names(rows: &[Value], field: &str) -> Vec<String> {
    rows.iter().map(|r| r[field].as_str().unwrap_or_default().to_string()).collect()
}

fn orders(rows: &[Value]) -> Vec<i64> {
    rows.iter().map(|r| r["order"].as_i64().unwrap_or_default()).collect()
}

#[tokio::test]
async fn e2e_health_and_openapi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");

    let doc = app.client.get(app.url("/api-docs/openapi.json")).send().await?.json::<Value>().await?;
    assert!(doc["paths"]["/api/services/reorder"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_mutations_need_an_admin_token() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app.client.post(app.url("/api/services")).json(&json!({"title": "Branding"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["kind"], "unauthorized");

    let res = app.client.post(app.url("/api/services")).bearer_auth("not-a-jwt").json(&json!({"title": "Branding"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let hash = ServerAuth::hash_password("EditorPass1")?;
    models::user::create(&app.state.db, "editor@studio.test", "Editor", hash, models::user::ROLE_EDITOR).await?;
    let editor = app.token("editor@studio.test", "EditorPass1").await?;
    let res = app.client.post(app.url("/api/services")).bearer_auth(&editor).json(&json!({"title": "Branding"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["kind"], "forbidden");

    let me = app.client.get(app.url("/api/auth/me")).bearer_auth(&editor).send().await?.json::<Value>().await?;
    assert_eq!(me["role"], "editor");

    let res = app.client.post(app.url("/api/auth/login"))
        .json(&json!({"email": ADMIN_EMAIL, "password": "wrong-password"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_reorder_then_append() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = app.admin_token().await?;

    let a = app.create(&token, "/api/services", json!({"title": "A"})).await?;
    let b = app.create(&token, "/api/services", json!({"title": "B"})).await?;
    let c = app.create(&token, "/api/services", json!({"title": "C"})).await?;
    assert_eq!(orders(&[a.clone(), b.clone(), c.clone()]), [1, 2, 3]);

    let res = app.reorder(&token, "/api/services/reorder", &[&c["id"], &a["id"], &b["id"]]).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["success"], true);

    let rows = app.list("/api/services").await?;
    assert_eq!(names(&rows, "title"), ["C", "A", "B"]);
    assert_eq!(orders(&rows), [1, 2, 3]);

    let d = app.create(&token, "/api/services", json!({"title": "D"})).await?;
    assert_eq!(d["order"], 4);

    // partial list: unlisted follow in their previous relative order
    app.reorder(&token, "/api/services/reorder", &[&d["id"]]).await?;
    let rows = app.list("/api/services").await?;
    assert_eq!(names(&rows, "title"), ["D", "C", "A", "B"]);
    assert_eq!(orders(&rows), [1, 2, 3, 4]);
    Ok(())
}

#[tokio::test]
async fn e2e_rejected_reorders_change_nothing() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = app.admin_token().await?;
    let a = app.create(&token, "/api/clients", json!({"name": "Acme"})).await?;
    let b = app.create(&token, "/api/clients", json!({"name": "Globex"})).await?;

    let ghost = json!("6f1c1b8e-9a43-4c0e-8d8e-3b7a8f0c2d11");
    let res = app.reorder(&token, "/api/clients/reorder", &[&b["id"], &ghost]).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["kind"], "not_found");

    let res = app.reorder(&token, "/api/clients/reorder", &[&b["id"], &b["id"]]).await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.reorder(&token, "/api/clients/reorder", &[]).await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.client.post(app.url("/api/clients/reorder")).bearer_auth(&token)
        .header("content-type", "application/json").body("{\"items\": [").send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["kind"], "validation");

    let rows = app.list("/api/clients").await?;
    assert_eq!(names(&rows, "name"), ["Acme", "Globex"]);
    assert_eq!(rows[0]["id"], a["id"]);
    Ok(())
}

#[tokio::test]
async fn e2e_skills_reorder_within_one_category() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = app.admin_token().await?;
    let figma = app.create(&token, "/api/skills", json!({"name": "Figma", "category": "tools"})).await?;
    let sketch = app.create(&token, "/api/skills", json!({"name": "Sketch", "category": "tools"})).await?;
    let rust = app.create(&token, "/api/skills", json!({"name": "Rust", "category": "development"})).await?;
    assert_eq!(orders(&[figma.clone(), sketch.clone(), rust.clone()]), [1, 2, 1]);

    let res = app.reorder(&token, "/api/skills/reorder", &[&figma["id"], &rust["id"]]).await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    app.reorder(&token, "/api/skills/reorder", &[&sketch["id"], &figma["id"]]).await?;
    let tools = app.list("/api/skills?category=tools").await?;
    assert_eq!(names(&tools, "name"), ["Sketch", "Figma"]);
    Ok(())
}

#[tokio::test]
async fn e2e_projects_messages_and_settings() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = app.admin_token().await?;

    let p = app.create(&token, "/api/projects", json!({"title": "Harbor Identity", "is_published": true})).await?;
    let res = app.client.get(app.url("/api/projects/slug/harbor-identity")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["id"], p["id"]);
    let res = app.client.get(app.url(&format!("/api/projects/{}", uuid::Uuid::new_v4()))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = app.client.post(app.url("/api/messages"))
        .json(&json!({"name": "Ada", "email": "ada@example.com", "body": "Hello!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = app.client.get(app.url("/api/messages")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let page = app.client.get(app.url("/api/messages?unread_only=true")).bearer_auth(&token).send().await?.json::<Value>().await?;
    assert_eq!(page["total_items"], 1);
    let id = page["items"][0]["id"].as_str().unwrap_or_default().to_string();
    let res = app.client.patch(app.url(&format!("/api/messages/{id}"))).bearer_auth(&token).json(&json!({"is_read": true})).send().await?;
    assert_eq!(res.json::<Value>().await?["is_read"], true);

    let res = app.client.put(app.url("/api/settings")).bearer_auth(&token)
        .json(&json!({"contact_email": "hi@studio.test"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let settings = app.client.get(app.url("/api/settings")).send().await?.json::<Value>().await?;
    assert_eq!(settings["contact_email"], "hi@studio.test");
    Ok(())
}
