//! Mock news API server for testing

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response, StatusCode, body::Incoming, header};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// How the server answers search requests
#[derive(Clone, Debug)]
pub enum ResponseMode {
	/// 200 with the given JSON body
	Json(String),
	/// Empty body with the given status
	Status(u16),
	/// 200 with the given JSON body and a session cookie
	JsonWithCookie(String, String),
}

/// A request seen by the server
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub path_and_query: String,
	pub cookie: Option<String>,
}

#[derive(Debug)]
struct MockState {
	mode: ResponseMode,
	requests: Vec<RecordedRequest>,
}

/// Mock server answering `/news/search`
pub struct MockSearchServer {
	state: Arc<Mutex<MockState>>,
	local_addr: SocketAddr,
}

impl MockSearchServer {
	/// Start a server on an ephemeral port
	pub async fn start(mode: ResponseMode) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let local_addr = listener.local_addr().unwrap();

		let state = Arc::new(Mutex::new(MockState {
			mode,
			requests: Vec::new(),
		}));

		let state_clone = state.clone();
		tokio::spawn(async move {
			let state = state_clone;
			loop {
				if let Ok((stream, _)) = listener.accept().await {
					let io = TokioIo::new(stream);
					let state = state.clone();

					tokio::spawn(async move {
						let service = hyper::service::service_fn(move |req: Request<Incoming>| {
							let state = state.clone();
							async move { handle_request(req, state).await }
						});

						let _ = hyper::server::conn::http1::Builder::new()
							.serve_connection(io, service)
							.await;
					});
				}
			}
		});

		Self { state, local_addr }
	}

	/// Base URL of the API
	pub fn base_url(&self) -> String {
		format!("http://{}", self.local_addr)
	}

	/// Change the response mode
	pub fn set_mode(&self, mode: ResponseMode) {
		self.state.lock().unwrap().mode = mode;
	}

	/// Requests received so far
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().unwrap().requests.clone()
	}
}

/// An address nothing listens on
pub async fn closed_address() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);
	format!("http://{}", addr)
}

async fn handle_request(
	req: Request<Incoming>,
	state: Arc<Mutex<MockState>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
	let recorded = RecordedRequest {
		method: req.method().to_string(),
		path_and_query: req
			.uri()
			.path_and_query()
			.map(|pq| pq.to_string())
			.unwrap_or_default(),
		cookie: req
			.headers()
			.get(header::COOKIE)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string),
	};

	let mode = {
		let mut state = state.lock().unwrap();
		state.requests.push(recorded);
		state.mode.clone()
	};

	if req.uri().path() != "/news/search" {
		return Ok(Response::builder()
			.status(StatusCode::NOT_FOUND)
			.body(Full::new(Bytes::new()))
			.unwrap());
	}

	let response = match mode {
		ResponseMode::Json(body) => Response::builder()
			.status(StatusCode::OK)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Full::new(Bytes::from(body)))
			.unwrap(),
		ResponseMode::Status(status) => Response::builder()
			.status(StatusCode::from_u16(status).unwrap())
			.body(Full::new(Bytes::new()))
			.unwrap(),
		ResponseMode::JsonWithCookie(body, cookie) => Response::builder()
			.status(StatusCode::OK)
			.header(header::CONTENT_TYPE, "application/json")
			.header(header::SET_COOKIE, format!("{}; Path=/", cookie))
			.body(Full::new(Bytes::from(body)))
			.unwrap(),
	};

	Ok(response)
}
