#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Fake stats service. Month 12 answers 500 and `limit=999` answers a body
/// that is not an activity list.
#[derive(Clone)]
pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[derive(Debug, Deserialize)]
struct MonthQuery {
    month: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: u32,
}

type Recorded = Arc<Mutex<Vec<String>>>;

fn record(requests: &Recorded, uri: &Uri) {
    requests.lock().unwrap().push(uri.to_string());
}

async fn stats(
    State(requests): State<Recorded>,
    uri: Uri,
    Query(query): Query<MonthQuery>,
) -> Response {
    record(&requests, &uri);
    match query.month {
        Some(12) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some(month) => Json(json!({
            "total_revenue": f64::from(month) * 1000.5,
            "total_sales": u64::from(month) * 10,
            "total_customers": 42,
        }))
        .into_response(),
        None => Json(json!({
            "total_revenue": 98765.43,
            "total_sales": 1234,
            "total_customers": 42,
        }))
        .into_response(),
    }
}

async fn recent_activity(
    State(requests): State<Recorded>,
    uri: Uri,
    Query(query): Query<LimitQuery>,
) -> Response {
    record(&requests, &uri);
    if query.limit == 999 {
        return Json(json!({ "activity": "unavailable" })).into_response();
    }

    let entries: Vec<_> = (0..query.limit.min(20))
        .map(|i| {
            if i % 2 == 0 {
                json!({ "time": format!("12:{i:02}"), "desc": format!("Sale #{i}"), "type": "success" })
            } else {
                json!({ "time": format!("12:{i:02}"), "desc": format!("New customer #{i}"), "type": "customer" })
            }
        })
        .collect();
    Json(entries).into_response()
}

async fn weekday_analysis(State(requests): State<Recorded>, uri: Uri) -> Response {
    record(&requests, &uri);
    Json(json!({
        "0": [],
        "1": [{ "hour": "09h", "sales": 3 }, { "hour": "12h", "sales": 8 }, { "hour": "18h", "sales": 8 }],
        "2": [{ "hour": "10h", "sales": 1 }],
        "3": [{ "hour": "11h", "sales": 5 }, { "hour": "20h", "sales": 2 }],
        "4": [],
        "5": [{ "hour": "19h", "sales": 30 }],
        "6": []
    }))
    .into_response()
}

fn upstream_router(requests: Recorded) -> Router {
    Router::new()
        .route("/getStats/stats", get(stats))
        .route("/overviewSection/recent-activity", get(recent_activity))
        .route("/weekdayAnalysis/weekdayAnalysis", get(weekday_analysis))
        .with_state(requests)
}

/// Serves the mock on the current runtime.
pub async fn spawn_upstream() -> MockUpstream {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().unwrap();
    let requests = Recorded::default();
    let app = upstream_router(Arc::clone(&requests));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Serves the mock from its own thread so it outlives any single test runtime.
pub fn spawn_upstream_thread() -> MockUpstream {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build mock runtime");
        runtime.block_on(async move {
            let upstream = spawn_upstream().await;
            tx.send(upstream).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().expect("mock upstream did not start")
}
