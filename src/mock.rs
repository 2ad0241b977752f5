//! In-memory [`Transport`] for tests, behind the `mock` feature.
//!
//! Replies are scripted per method and path. One-shot replies (queued with
//! [`ScriptedTransport::enqueue`] or [`ScriptedTransport::hold`]) are consumed
//! before the persistent reply of a route. Every request is recorded, and a
//! request future dropped before it resolved is counted as aborted.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use futures::FutureExt;
use tokio::sync::oneshot;

use crate::{
    errors::ApiError,
    transport::{Transport, TransportFuture},
};

/// HTTP method of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A request seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

enum Reply {
    Ready(Result<String, ApiError>),
    Gated(oneshot::Receiver<Result<String, ApiError>>),
    Pending,
}

impl Reply {
    fn duplicate(&self) -> Reply {
        match self {
            Reply::Ready(result) => Reply::Ready(result.clone()),
            Reply::Gated(_) | Reply::Pending => Reply::Pending,
        }
    }

    async fn resolve(self) -> Result<String, ApiError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("reply gate dropped".to_string()))),
            Reply::Pending => futures::future::pending().await,
        }
    }
}

#[derive(Default)]
struct Script {
    persistent: HashMap<(Method, String), Reply>,
    queued: HashMap<(Method, String), VecDeque<Reply>>,
    calls: Vec<RecordedCall>,
}

/// Releases a held reply
pub struct ReplyGate {
    sender: oneshot::Sender<Result<String, ApiError>>,
}

impl ReplyGate {
    /// Resolve the held request with a JSON body
    ///
    /// Returns false if the request was aborted in the meantime.
    pub fn succeed(self, body: serde_json::Value) -> bool {
        self.sender.send(Ok(body.to_string())).is_ok()
    }

    /// Resolve the held request with an error
    pub fn fail(self, error: ApiError) -> bool {
        self.sender.send(Err(error)).is_ok()
    }
}

struct CompletionGuard {
    completed: bool,
    aborted: Arc<AtomicUsize>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.completed {
            self.aborted.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A scripted, call-counting transport
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
    aborted: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(method: Method, path: &str) -> (Method, String) {
        (method, format!("/{}", path.trim_start_matches('/')))
    }

    fn set_persistent(&self, method: Method, path: &str, reply: Reply) {
        if let Ok(mut script) = self.script.lock() {
            script.persistent.insert(Self::key(method, path), reply);
        }
    }

    fn push_queued(&self, method: Method, path: &str, reply: Reply) {
        if let Ok(mut script) = self.script.lock() {
            script
                .queued
                .entry(Self::key(method, path))
                .or_default()
                .push_back(reply);
        }
    }

    /// Answer every GET to `path` with `body`
    pub fn respond_json(&self, path: &str, body: serde_json::Value) -> &Self {
        self.set_persistent(Method::Get, path, Reply::Ready(Ok(body.to_string())));
        self
    }

    /// Answer every GET to `path` with a raw body
    pub fn respond_raw(&self, path: &str, body: impl Into<String>) -> &Self {
        self.set_persistent(Method::Get, path, Reply::Ready(Ok(body.into())));
        self
    }

    /// Fail every GET to `path`
    pub fn fail(&self, path: &str, error: ApiError) -> &Self {
        self.set_persistent(Method::Get, path, Reply::Ready(Err(error)));
        self
    }

    /// Never answer GETs to `path`
    pub fn hang(&self, path: &str) -> &Self {
        self.set_persistent(Method::Get, path, Reply::Pending);
        self
    }

    /// Answer every POST to `path` with `body`
    pub fn respond_post(&self, path: &str, body: serde_json::Value) -> &Self {
        self.set_persistent(Method::Post, path, Reply::Ready(Ok(body.to_string())));
        self
    }

    /// Fail every POST to `path`
    pub fn fail_post(&self, path: &str, error: ApiError) -> &Self {
        self.set_persistent(Method::Post, path, Reply::Ready(Err(error)));
        self
    }

    /// Answer the next GET to `path` once, ahead of the persistent reply
    pub fn enqueue(&self, path: &str, result: Result<serde_json::Value, ApiError>) -> &Self {
        let reply = Reply::Ready(result.map(|body| body.to_string()));
        self.push_queued(Method::Get, path, reply);
        self
    }

    /// Hold the next request to `path` open until the returned gate is released
    pub fn hold(&self, method: Method, path: &str) -> ReplyGate {
        let (sender, receiver) = oneshot::channel();
        self.push_queued(method, path, Reply::Gated(receiver));
        ReplyGate { sender }
    }

    /// Every request seen so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Number of requests seen for one method and path
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        let (_, path) = Self::key(method, path);
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    /// Number of request futures dropped before they resolved
    pub fn aborted(&self) -> usize {
        self.aborted.load(Ordering::SeqCst)
    }

    fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportFuture {
        let key = Self::key(method, path);
        let reply = match self.script.lock() {
            Ok(mut script) => {
                script.calls.push(RecordedCall {
                    method,
                    path: key.1.clone(),
                    body,
                });
                let queued = script
                    .queued
                    .get_mut(&key)
                    .and_then(|replies| replies.pop_front());
                queued
                    .or_else(|| script.persistent.get(&key).map(Reply::duplicate))
                    .unwrap_or_else(|| {
                        Reply::Ready(Err(ApiError::Status {
                            status: 404,
                            body: format!("no route for {}", key.1),
                        }))
                    })
            }
            Err(_) => Reply::Ready(Err(ApiError::Network("script poisoned".to_string()))),
        };

        let guard = CompletionGuard {
            completed: false,
            aborted: self.aborted.clone(),
        };
        async move {
            let mut guard = guard;
            let result = reply.resolve().await;
            guard.completed = true;
            result
        }
        .boxed()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, path: &str) -> TransportFuture {
        self.dispatch(Method::Get, path, None)
    }

    fn post(&self, path: &str, body: serde_json::Value) -> TransportFuture {
        self.dispatch(Method::Post, path, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn queued_replies_take_precedence() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json("/projects", json!([]))
            .enqueue("/projects", Err(ApiError::Timeout));

        assert_eq!(transport.get("/projects").await, Err(ApiError::Timeout));
        assert_eq!(transport.get("projects").await, Ok("[]".to_string()));
        assert_eq!(transport.call_count(Method::Get, "/projects"), 2);
    }

    #[tokio::test]
    async fn dropped_request_counts_as_aborted() {
        let transport = ScriptedTransport::new();
        transport.hang("/skills");

        let request = transport.get("/skills");
        drop(request);
        assert_eq!(transport.aborted(), 1);
    }

    #[tokio::test]
    async fn completed_request_is_not_aborted() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/a", json!(1));

        let request = transport.get("/a");
        assert_eq!(transport.aborted(), 0);
        assert_eq!(request.await, Ok("1".to_string()));
        assert_eq!(transport.aborted(), 0);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let transport = ScriptedTransport::new();
        let err = transport.get("/missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
