//! Mock items service and recording display surface shared by the tests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shared::{
    domain::{Item, ItemId},
    protocol::ItemPayload,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::controller::surface::{DisplaySurface, ItemForm, ListRow};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// How the mock answers mutations.
#[derive(Debug, Clone)]
pub enum Reply {
    Normal,
    /// Status plus a `{"detail": ...}` body.
    Detail(StatusCode, Value),
    /// Status with a body that is not JSON.
    Raw(StatusCode, &'static str),
}

struct MockInner {
    items: Vec<Item>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    list_reply: Reply,
    mutation_reply: Reply,
    delete_status: StatusCode,
}

#[derive(Clone)]
pub struct MockItemsService {
    inner: Arc<Mutex<MockInner>>,
}

impl MockItemsService {
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id.0).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                items,
                next_id,
                requests: Vec::new(),
                list_reply: Reply::Normal,
                mutation_reply: Reply::Normal,
                delete_status: StatusCode::NO_CONTENT,
            })),
        }
    }

    pub async fn set_list_reply(&self, reply: Reply) {
        self.inner.lock().await.list_reply = reply;
    }

    pub async fn set_mutation_reply(&self, reply: Reply) {
        self.inner.lock().await.mutation_reply = reply;
    }

    pub async fn set_delete_status(&self, status: StatusCode) {
        self.inner.lock().await.delete_status = status;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn count(&self, method: Method) -> usize {
        self.inner
            .lock()
            .await
            .requests
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    pub async fn items(&self) -> Vec<Item> {
        self.inner.lock().await.items.clone()
    }

    /// Binds an ephemeral port and returns the base url.
    pub async fn spawn(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new()
            .route("/items/", get(list_items).post(create_item))
            .route(
                "/items/:id",
                get(get_item).put(update_item).delete(delete_item),
            )
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }
}

fn reply_response(reply: &Reply) -> Option<Response> {
    match reply {
        Reply::Normal => None,
        Reply::Detail(status, detail) => {
            Some((*status, Json(json!({ "detail": detail }))).into_response())
        }
        Reply::Raw(status, body) => Some((*status, *body).into_response()),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Item not found" })),
    )
        .into_response()
}

async fn list_items(State(service): State<MockItemsService>) -> Response {
    let mut inner = service.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::GET,
        path: "/items/".into(),
        body: None,
    });
    if let Some(response) = reply_response(&inner.list_reply) {
        return response;
    }
    Json(inner.items.clone()).into_response()
}

async fn get_item(State(service): State<MockItemsService>, Path(id): Path<i64>) -> Response {
    let mut inner = service.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::GET,
        path: format!("/items/{id}"),
        body: None,
    });
    match inner.items.iter().find(|item| item.id == ItemId(id)) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_item(State(service): State<MockItemsService>, Json(body): Json<Value>) -> Response {
    let mut inner = service.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::POST,
        path: "/items/".into(),
        body: Some(body.clone()),
    });
    if let Some(response) = reply_response(&inner.mutation_reply) {
        return response;
    }
    let Ok(payload) = serde_json::from_value::<ItemPayload>(body) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "msg": "Invalid item payload" }] })),
        )
            .into_response();
    };
    let id = ItemId(inner.next_id);
    inner.next_id += 1;
    let item = item_from_payload(id, payload);
    inner.items.push(item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn update_item(
    State(service): State<MockItemsService>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = service.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::PUT,
        path: format!("/items/{id}"),
        body: Some(body.clone()),
    });
    if let Some(response) = reply_response(&inner.mutation_reply) {
        return response;
    }
    let Ok(payload) = serde_json::from_value::<ItemPayload>(body) else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match inner.items.iter_mut().find(|item| item.id == ItemId(id)) {
        Some(slot) => {
            *slot = item_from_payload(ItemId(id), payload);
            Json(slot.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_item(State(service): State<MockItemsService>, Path(id): Path<i64>) -> Response {
    let mut inner = service.inner.lock().await;
    inner.requests.push(RecordedRequest {
        method: Method::DELETE,
        path: format!("/items/{id}"),
        body: None,
    });
    if let Some(response) = reply_response(&inner.mutation_reply) {
        return response;
    }
    let Some(index) = inner.items.iter().position(|item| item.id == ItemId(id)) else {
        return not_found();
    };
    let removed = inner.items.remove(index);
    if inner.delete_status == StatusCode::NO_CONTENT {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (inner.delete_status, Json(removed)).into_response()
    }
}

fn item_from_payload(id: ItemId, payload: ItemPayload) -> Item {
    Item {
        id,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        is_offer: payload.is_offer,
    }
}

/// Base url of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn item(id: i64, name: &str, price: f64) -> Item {
    Item {
        id: ItemId(id),
        name: name.into(),
        description: None,
        price,
        is_offer: false,
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub renders: Vec<Vec<ListRow>>,
    pub form: ItemForm,
    pub heading: String,
    pub submit_label: String,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub confirm_answer: bool,
}

impl RecordingSurface {
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirm_answer: answer,
            ..Self::default()
        }
    }

    pub fn last_render(&self) -> &[ListRow] {
        self.renders.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl DisplaySurface for RecordingSurface {
    fn render_rows(&mut self, rows: Vec<ListRow>) {
        self.renders.push(rows);
    }

    fn read_form(&self) -> ItemForm {
        self.form.clone()
    }

    fn write_form(&mut self, form: &ItemForm) {
        self.form = form.clone();
    }

    fn set_heading(&mut self, text: &str) {
        self.heading = text.to_string();
    }

    fn set_submit_label(&mut self, text: &str) {
        self.submit_label = text.to_string();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }
}
