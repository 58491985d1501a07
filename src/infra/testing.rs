//! Scripted transport for client and controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::Url;

use super::transport::{HttpResponse, Transport, TransportError};

#[derive(Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

/// Answers GETs from a script of replies and records the URLs. The last
/// reply repeats once the script runs out.
#[derive(Clone)]
pub struct StubTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl StubTransport {
    pub fn json(body: serde_json::Value) -> Self {
        Self::with_status(200, body.to_string())
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(Reply::Respond(HttpResponse {
            status,
            body: body.into(),
        }))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Reply::Fail(message.into()))
    }

    fn new(reply: Reply) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from([reply]))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues `next`'s replies after this stub's.
    pub fn then(self, next: StubTransport) -> Self {
        let queued: Vec<Reply> = next.replies.lock().unwrap().iter().cloned().collect();
        self.replies.lock().unwrap().extend(queued);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.to_string())
            .collect()
    }
}

impl Transport for StubTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url);
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };
        match reply.expect("stub transport has no replies") {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(message) => Err(TransportError::Network(message)),
        }
    }
}
