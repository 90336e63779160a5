//! Monotonic request tokens for discarding stale responses.
//!
//! Every fetch the page starts takes a fresh token; when the response
//! arrives it is applied only if its token is still the latest one.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, making every earlier token stale.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Make all outstanding tokens stale without starting a request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
