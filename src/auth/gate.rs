//! Single-fire authentication gate.
//!
//! Fetch operations wait here until authentication has completed at least
//! once for the client, and every queued waiter observes the same terminal
//! outcome. After release the gate stays open until an explicit
//! re-authentication (or a stale credential) moves it back to pending.

use tokio::sync::watch;

use crate::error::AuthError;

/// Gate state machine. Exactly one pending window exists at a time.
#[derive(Debug, Clone)]
enum GateState {
    /// No authentication has been attempted yet.
    Idle,
    /// An exchange is in flight; fetches queue up.
    Pending,
    /// Authentication completed with this outcome.
    Done(Result<(), AuthError>),
}

/// What the caller should do after probing the gate.
#[derive(Debug)]
pub(crate) enum Claim {
    /// The caller won the transition to pending and must run the exchange,
    /// then release the gate.
    Claimed,
    /// Another task holds the pending window; wait for its outcome.
    MustWait,
    /// Authentication already completed with this outcome.
    Done(Result<(), AuthError>),
}

pub(crate) struct AuthGate {
    tx: watch::Sender<GateState>,
}

impl AuthGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GateState::Idle);
        Self { tx }
    }

    /// Atomically probe the gate, claiming the pending window when allowed.
    ///
    /// Without `force`, only an untouched (`Idle`) gate can be claimed and a
    /// completed one reports its outcome. With `force` (explicit
    /// re-authentication, stale-credential refresh), a completed gate is
    /// re-opened as well. A pending gate is never claimed twice.
    pub fn claim(&self, force: bool) -> Claim {
        let mut claim = Claim::MustWait;
        self.tx.send_modify(|state| {
            claim = match state {
                GateState::Pending => Claim::MustWait,
                GateState::Idle => {
                    *state = GateState::Pending;
                    Claim::Claimed
                }
                GateState::Done(outcome) => {
                    if force {
                        *state = GateState::Pending;
                        Claim::Claimed
                    } else {
                        Claim::Done(outcome.clone())
                    }
                }
            };
        });
        claim
    }

    /// Terminate the pending window, waking every waiter with `outcome`.
    pub fn release(&self, outcome: Result<(), AuthError>) {
        self.tx.send_modify(|state| *state = GateState::Done(outcome));
    }

    /// Wait until the in-flight authentication completes.
    pub async fn wait(&self) -> Result<(), AuthError> {
        let mut rx = self.tx.subscribe();
        loop {
            if let GateState::Done(outcome) = &*rx.borrow_and_update() {
                return outcome.clone();
            }
            // The sender lives as long as the gate; a closed channel means
            // the owning manager was dropped mid-flight.
            if rx.changed().await.is_err() {
                return Err(AuthError::NotAuthenticated);
            }
        }
    }
}

/// Guard held by whichever task claimed the pending window.
///
/// The gate is released on every exit path: if the exchange future is
/// cancelled or panics before completing, dropping the guard releases the
/// gate with a failure so queued fetches never starve.
pub(crate) struct ReleaseGuard<'a> {
    gate: &'a AuthGate,
    released: bool,
}

impl<'a> ReleaseGuard<'a> {
    pub fn new(gate: &'a AuthGate) -> Self {
        Self {
            gate,
            released: false,
        }
    }

    /// Release the gate with the exchange outcome.
    pub fn finish(mut self, outcome: Result<(), AuthError>) -> Result<(), AuthError> {
        self.released = true;
        self.gate.release(outcome.clone());
        outcome
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.gate.release(Err(AuthError::ExchangeFailed(
                "authentication aborted before completion".into(),
            )));
        }
    }
}
