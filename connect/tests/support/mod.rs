//! Stub Connect API server for HTTP adapter tests.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use connect::config::ConnectSettings;
use connect::domain::{BearerToken, Session};
use connect::outbound::http::ConnectHttpClient;
use serde_json::Value;

/// A request received by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct Routes {
    replies: Mutex<HashMap<(String, String), Reply>>,
    received: Mutex<Vec<Recorded>>,
}

/// Running stub with scripted replies keyed by method and path.
pub struct StubApi {
    routes: Arc<Routes>,
    base_url: String,
    handle: ServerHandle,
}

impl StubApi {
    /// Start the stub on an ephemeral port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let routes = Arc::new(Routes::default());
        let data = web::Data::from(Arc::clone(&routes));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            routes,
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn reply(&self, method: &str, path: &str, status: u16, body: &Value) {
        self.reply_raw(method, path, status, &body.to_string());
    }

    /// Answer `method path` with `status` and a raw body.
    pub fn reply_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.routes.replies.lock().expect("routes lock").insert(
            (method.to_owned(), path.to_owned()),
            Reply {
                status,
                body: body.to_owned(),
            },
        );
    }

    /// Requests received so far.
    pub fn received(&self) -> Vec<Recorded> {
        self.routes.received.lock().expect("received lock").clone()
    }

    /// Client pointed at the stub.
    pub fn client(&self) -> ConnectHttpClient {
        let mut settings = ConnectSettings::local();
        settings.api_base_url = self.base_url.clone();
        settings.request_timeout_secs = 5;
        ConnectHttpClient::from_settings(&settings).expect("client builds")
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(
    request: HttpRequest,
    body: web::Bytes,
    routes: web::Data<Routes>,
) -> HttpResponse {
    let method = request.method().to_string();
    let path = request.path().to_owned();
    routes.received.lock().expect("received lock").push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = routes
        .replies
        .lock()
        .expect("routes lock")
        .get(&(method, path))
        .cloned();
    match reply {
        Some(reply) => HttpResponse::build(reply.status)
            .content_type("application/json")
            .body(reply.body),
        None => HttpResponse::NotFound()
            .content_type("application/json")
            .body(r#"{"message":"Route not found"}"#),
    }
}

/// Session carrying a fixed bearer token.
pub fn session() -> Session {
    Session::new(BearerToken::new("stub-token").expect("valid token"))
}
