use std::{
    collections::{HashMap, VecDeque},
    sync::{mpsc, Arc, Mutex},
    thread,
    time::Duration,
};

use actix_web::{
    dev::ServerHandle, http::StatusCode, rt, web, App, HttpRequest, HttpResponse, HttpServer,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct StubReply {
    status: u16,
    body: String,
    delay_ms: u64,
}

#[derive(Default)]
struct StubState {
    replies: HashMap<String, VecDeque<StubReply>>,
    requests: Vec<RecordedRequest>,
}

type SyncedState = Arc<Mutex<StubState>>;

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method, path)
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<SyncedState>) -> HttpResponse {
    let method = req.method().to_string();
    let path = req.path().to_string();

    let reply = {
        let mut state = state.lock().unwrap();

        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            content_type: req
                .headers()
                .get("Content-Type")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

        state
            .replies
            .get_mut(&route_key(&method, &path))
            .and_then(|queue| queue.pop_front())
    };

    let reply = reply.unwrap_or(StubReply {
        status: 404,
        body: "Not Found".to_string(),
        delay_ms: 0,
    });

    if reply.delay_ms > 0 {
        rt::time::sleep(Duration::from_millis(reply.delay_ms)).await;
    }

    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body)
}

/// A fake blockchain node answering scripted responses in order per route.
pub struct StubNode {
    port: u16,
    handle: ServerHandle,
    state: SyncedState,
}

#[allow(dead_code)]
impl StubNode {
    pub fn start() -> StubNode {
        let state = SyncedState::default();
        let server_state = state.clone();
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let system = rt::System::new();

            system.block_on(async move {
                let data = web::Data::new(server_state);

                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(data.clone())
                        .default_service(web::to(handle))
                })
                .workers(2)
                .bind(("127.0.0.1", 0))
                .unwrap();

                let port = server.addrs()[0].port();
                let server = server.run();

                sender.send((port, server.handle())).unwrap();

                server.await
            })
        });

        let (port, handle) = receiver.recv().unwrap();

        StubNode {
            port,
            handle,
            state,
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn reply(&self, method: &str, path: &str, status: u16, body: &str) -> &StubNode {
        self.reply_after(method, path, status, body, 0)
    }

    pub fn reply_after(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: &str,
        delay_ms: u64,
    ) -> &StubNode {
        let mut state = self.state.lock().unwrap();

        state
            .replies
            .entry(route_key(method, path))
            .or_default()
            .push_back(StubReply {
                status,
                body: body.to_string(),
                delay_ms,
            });

        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

/**
 * Stopping on drop keeps a failing test from leaving the server thread
 * listening for the rest of the run.
 */
impl Drop for StubNode {
    fn drop(&mut self) {
        futures::executor::block_on(self.handle.stop(false));
    }
}
