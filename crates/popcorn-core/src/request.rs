//! Request tokens for the stale-response guard.
//!
//! Every fetch a controller asks for carries a token. Only the most recently
//! issued token of a controller may change its state; anything older is
//! dropped when it comes back.

/// Opaque identity of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Issues monotonically increasing tokens and remembers the current one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    current: Option<RequestToken>,
}

impl RequestTracker {
    /// Issue a new token, superseding any outstanding one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        token
    }

    /// Forget the outstanding token so no in-flight response is applied.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// Consume `token` if it is current. A token settles at most once.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn has_pending(&self) -> bool {
        self.current.is_some()
    }
}
