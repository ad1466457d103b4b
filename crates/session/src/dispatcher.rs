//! Message-passing front end for a [`SessionStore`].
//!
//! The store is moved onto one tokio task; every handle sends actions over a
//! channel and the task applies them in arrival order. Readers get snapshots
//! through a `watch` channel, so they never hold a reference into the store.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{SessionAction, SessionError, SessionState, SessionStore, Transition};

const QUEUE_DEPTH: usize = 32;

struct Envelope {
    action: SessionAction,
    reply: oneshot::Sender<Transition>,
}

/// Cloneable handle to a running session loop.
#[derive(Clone)]
pub struct SessionDispatcher {
    actions: mpsc::Sender<Envelope>,
    state: watch::Receiver<SessionState>,
}

impl SessionDispatcher {
    /// Move `store` onto a new task. The task exits once every handle is
    /// dropped.
    pub fn spawn(store: SessionStore) -> (Self, JoinHandle<()>) {
        let (actions, mut inbox) = mpsc::channel::<Envelope>(QUEUE_DEPTH);
        let (publish, state) = watch::channel(store.select_session().clone());

        let handle = tokio::spawn(async move {
            let mut store = store;
            while let Some(Envelope { action, reply }) = inbox.recv().await {
                let transition = store.dispatch(action);
                // Publish before replying: whoever awaits the transition
                // (e.g. to redirect) already sees the new state.
                publish.send_replace(store.select_session().clone());
                let _ = reply.send(transition);
            }
            tracing::debug!("session dispatcher stopped");
        });

        (Self { actions, state }, handle)
    }

    /// Apply `action` and wait until it has taken effect.
    pub async fn dispatch(&self, action: SessionAction) -> Result<Transition, SessionError> {
        let (reply, done) = oneshot::channel();
        self.actions
            .send(Envelope { action, reply })
            .await
            .map_err(|_| SessionError::DispatcherClosed)?;
        done.await.map_err(|_| SessionError::DispatcherClosed)
    }

    /// Snapshot of the current state.
    pub fn select_session(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every applied action.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }
}
