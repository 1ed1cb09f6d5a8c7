//! Throw-away clinic backend used by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// A request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Value,
    pub authorization: Option<String>,
}

/// Decides the status and JSON body answered for a request. `Value::Null`
/// produces an empty body.
pub type Responder = fn(&RecordedRequest) -> (StatusCode, Value);

#[derive(Clone)]
struct BackendState {
    responder: Responder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl FakeBackend {
    /// Starts the backend on an ephemeral local port.
    pub async fn start(responder: Responder) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            responder,
            requests: requests.clone(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}/api/v1"),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the backend")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn record(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<BackendState>,
) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        authorization: req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };

    let (status, payload) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    if payload.is_null() {
        HttpResponse::build(status).finish()
    } else {
        HttpResponse::build(status).json(payload)
    }
}

pub fn client_json(id: i32, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "phone": "+1 415 555 2671",
        "created_at": "2026-01-05T09:00:00Z",
        "updated_at": "2026-01-05T09:00:00.000000Z"
    })
}

pub fn product_json(id: i32, name: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "Food",
        "price": 12.5,
        "stock_quantity": 3,
        "is_active": is_active,
        "created_at": "2026-01-05T09:00:00Z",
        "updated_at": "2026-01-05T09:00:00Z"
    })
}

pub fn appointment_json(id: i32, status: &str) -> Value {
    json!({
        "id": id,
        "client_id": 1,
        "pet_id": 2,
        "service_id": 3,
        "user_id": 4,
        "scheduled_at": "2026-02-10T14:30:00Z",
        "duration_minutes": 30,
        "status": status,
        "notes": null,
        "client": {"id": 1, "first_name": "Anna", "last_name": "Berg"},
        "pet": {"id": 2, "name": "Rex", "species": "dog"},
        "created_at": "2026-01-05T09:00:00Z",
        "updated_at": "2026-01-05T09:00:00Z"
    })
}

/// Wraps records in the paginated list envelope.
pub fn list_envelope(data: Vec<Value>, current_page: usize, last_page: usize, total: usize) -> Value {
    json!({
        "data": data,
        "links": {"first": null, "last": null, "prev": null, "next": null},
        "meta": {
            "current_page": current_page,
            "last_page": last_page,
            "per_page": 10,
            "total": total
        }
    })
}
