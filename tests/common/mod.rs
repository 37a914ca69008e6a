#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use mazad_client::api::ApiClient;
use mazad_client::config::Config;
use mazad_client::feedback::RecordingFeedback;
use mazad_client::session::{AccountType, Session, SessionHandle, SessionUser};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// 미리 정해둔 응답
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: Option<Value>,
}

impl Canned {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

/// 가짜 백엔드 상태
pub struct FakeState {
    pub calls: Mutex<Vec<String>>,
    pub auction: Mutex<Value>,
    pub tender: Mutex<Value>,
    pub offers: Mutex<Vec<Value>>,
    pub offer_response: Mutex<Canned>,
    pub offer_persists: Mutex<bool>,
    pub offer_delay: Mutex<Duration>,
    pub listing_delay: Mutex<Duration>,
    pub fail_listing_reads: Mutex<bool>,
    pub auto_bid: Mutex<Option<Value>>,
    pub auto_bid_save_response: Mutex<Canned>,
    pub auto_bid_delete_response: Mutex<Canned>,
    pub notifications: Mutex<Value>,
    pub notifications_status: Mutex<u16>,
    pub last_notification_headers: Mutex<Option<HeaderMap>>,
}

impl FakeState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            auction: Mutex::new(auction_json(50000, Some(60000))),
            tender: Mutex::new(json!({
                "_id": "t1",
                "title": "Fourniture de ciment",
                "maxBudget": 900000,
                "endingAt": "2030-01-01T00:00:00Z",
                "owner": "owner-1",
                "status": "OPEN"
            })),
            offers: Mutex::new(Vec::new()),
            offer_response: Mutex::new(Canned::new(
                201,
                json!({ "_id": "o-new", "price": 0, "user": "user-1" }),
            )),
            offer_persists: Mutex::new(true),
            offer_delay: Mutex::new(Duration::ZERO),
            listing_delay: Mutex::new(Duration::ZERO),
            fail_listing_reads: Mutex::new(false),
            auto_bid: Mutex::new(None),
            auto_bid_save_response: Mutex::new(Canned::new(
                201,
                json!({ "_id": "ab1", "price": 0 }),
            )),
            auto_bid_delete_response: Mutex::new(Canned::empty(204)),
            notifications: Mutex::new(json!([])),
            notifications_status: Mutex::new(200),
            last_notification_headers: Mutex::new(None),
        })
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn set<T>(&self, field: &Mutex<T>, value: T) {
        *field.lock().unwrap() = value;
    }
}

pub fn auction_json(starting_price: i64, current_price: Option<i64>) -> Value {
    json!({
        "_id": "a1",
        "title": "Pelle hydraulique",
        "description": "Pelle 20 tonnes, bon état",
        "startingPrice": starting_price,
        "currentPrice": current_price,
        "endingAt": "2030-01-01T00:00:00Z",
        "owner": { "_id": "owner-1", "firstName": "Karim" },
        "status": "OPEN",
        "quantity": 1
    })
}

// region:    --- Fake Routes

async fn list_auctions(State(s): State<Arc<FakeState>>) -> Response {
    s.record("GET /bid".to_string());
    Json(json!([s.auction.lock().unwrap().clone()])).into_response()
}

async fn get_auction(State(s): State<Arc<FakeState>>, Path(id): Path<String>) -> Response {
    s.record(format!("GET /bid/{}", id));
    let delay = *s.listing_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if *s.fail_listing_reads.lock().unwrap() {
        return Canned::new(500, json!({ "message": "boom" })).into_response();
    }
    let auction = s.auction.lock().unwrap().clone();
    if auction["_id"] != id {
        return Canned::new(404, json!({ "message": "Auction not found" })).into_response();
    }
    Json(auction).into_response()
}

async fn list_offers(State(s): State<Arc<FakeState>>, Path(id): Path<String>) -> Response {
    s.record(format!("GET /offer/{}", id));
    Json(Value::Array(s.offers.lock().unwrap().clone())).into_response()
}

async fn create_offer(
    State(s): State<Arc<FakeState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    s.record(format!("POST /offer/{}", id));
    // 공고 입찰 ({bidAmount})
    if let Some(amount) = body.get("bidAmount").cloned() {
        s.record(format!("BODY {}", body));
        return Canned::new(
            201,
            json!({ "_id": "tb1", "bidAmount": amount, "status": "pending" }),
        )
        .into_response();
    }
    let delay = *s.offer_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    // 응답 코드와 관계없이 저장 (위장된 성공 재현)
    let response = s.offer_response.lock().unwrap().clone();
    if *s.offer_persists.lock().unwrap() {
        if let Some(price) = body.get("price").and_then(Value::as_i64) {
            s.auction.lock().unwrap()["currentPrice"] = json!(price);
            s.offers.lock().unwrap().push(json!({
                "_id": format!("o{}", price),
                "price": price,
                "user": body["user"].clone()
            }));
        }
    }
    response.into_response()
}

async fn get_tender(State(s): State<Arc<FakeState>>, Path(id): Path<String>) -> Response {
    s.record(format!("GET /tender/{}", id));
    Json(s.tender.lock().unwrap().clone()).into_response()
}

async fn list_tender_bids(State(s): State<Arc<FakeState>>, Path(id): Path<String>) -> Response {
    s.record(format!("GET /tender/{}/bids", id));
    Json(Value::Array(s.offers.lock().unwrap().clone())).into_response()
}

async fn get_auto_bid(
    State(s): State<Arc<FakeState>>,
    Path((listing, user)): Path<(String, String)>,
) -> Response {
    s.record(format!("GET /auto-bid/{}/{}", listing, user));
    match s.auto_bid.lock().unwrap().clone() {
        Some(auto_bid) => Json(auto_bid).into_response(),
        None => Canned::new(404, json!({ "message": "Auto-bid not found" })).into_response(),
    }
}

async fn save_auto_bid(
    State(s): State<Arc<FakeState>>,
    Path(listing): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    s.record(format!("POST /auto-bid/{}", listing));
    s.record(format!("BODY {}", body));
    s.auto_bid_save_response.lock().unwrap().clone().into_response()
}

async fn delete_auto_bid(
    State(s): State<Arc<FakeState>>,
    Path((listing, user)): Path<(String, String)>,
) -> Response {
    s.record(format!("DELETE /auto-bid/{}/{}", listing, user));
    s.auto_bid_delete_response.lock().unwrap().clone().into_response()
}

async fn post_comment(
    State(s): State<Arc<FakeState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    s.record(format!("POST /comment/{}", id));
    s.record(format!("BODY {}", body));
    Canned::new(201, json!({ "_id": "c1" })).into_response()
}

async fn post_review(
    State(s): State<Arc<FakeState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    s.record(format!("POST /review/{}", id));
    s.record(format!("BODY {}", body));
    Canned::new(201, json!({ "_id": "r1" })).into_response()
}

async fn general_notifications(State(s): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    s.record("GET /notification/general".to_string());
    *s.last_notification_headers.lock().unwrap() = Some(headers);
    let status = *s.notifications_status.lock().unwrap();
    if status != 200 {
        return Canned::new(status, json!({ "message": "Unauthorized" })).into_response();
    }
    let notifications = s.notifications.lock().unwrap().clone();
    Json(json!({ "notifications": notifications })).into_response()
}

async fn mark_read(State(s): State<Arc<FakeState>>, Path(id): Path<String>) -> Response {
    s.record(format!("PUT /notification/{}/read", id));
    StatusCode::OK.into_response()
}

// endregion: --- Fake Routes

/// 가짜 백엔드 실행 후 기본 주소 반환
pub async fn spawn_backend(state: Arc<FakeState>) -> String {
    serve(backend_app(state)).await
}

fn backend_app(state: Arc<FakeState>) -> Router {
    Router::new()
        .route("/bid", get(list_auctions))
        .route("/bid/:id", get(get_auction))
        .route("/offer/:id", get(list_offers).post(create_offer))
        .route("/tender/:id", get(get_tender))
        .route("/tender/:id/bids", get(list_tender_bids))
        .route(
            "/auto-bid/:listing/:user",
            get(get_auto_bid).delete(delete_auto_bid),
        )
        .route("/auto-bid/:listing", post(save_auto_bid))
        .route("/comment/:id", post(post_comment))
        .route("/review/:id", post(post_review))
        .route("/notification/general", get(general_notifications))
        .route("/notification/:id/read", put(mark_read))
        .with_state(state)
}

/// 도중에 내릴 수 있는 가짜 백엔드 (연결 실패 재현)
pub struct StoppableBackend {
    pub base_url: String,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl StoppableBackend {
    /// 리스너와 남은 연결을 모두 닫는다
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = tokio::time::timeout(Duration::from_secs(2), self.task).await;
    }
}

pub async fn spawn_stoppable_backend(state: Arc<FakeState>) -> StoppableBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    let (shutdown, signal) = oneshot::channel::<()>();
    let app = backend_app(state);
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = signal.await;
            })
            .await
            .unwrap();
    });
    StoppableBackend {
        base_url: format!("http://{}", addr),
        shutdown,
        task,
    }
}

/// 아무도 듣지 않는 주소
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    drop(listener);
    format!("http://{}", addr)
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn session(user_id: &str, account_type: AccountType) -> Session {
    Session {
        access_token: format!("token-{}", user_id),
        user: SessionUser {
            id: user_id.to_string(),
            first_name: None,
            last_name: None,
            account_type,
        },
    }
}

pub fn client(base_url: &str, session: Option<Session>) -> ApiClient {
    let config = Config::with_api_url(base_url).unwrap();
    let handle = match session {
        Some(session) => SessionHandle::with_session(session),
        None => SessionHandle::new(),
    };
    ApiClient::new(&config, handle).unwrap()
}

pub fn feedback(confirm: bool) -> Arc<RecordingFeedback> {
    Arc::new(RecordingFeedback::new(confirm))
}
