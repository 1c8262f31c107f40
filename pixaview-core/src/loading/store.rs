//! Published search state.
//!
//! A `watch` channel alone would coalesce rapid transitions, so observers
//! that need every step (`Loading` then `Loaded`) get their own unbounded
//! queue. The `watch` side backs [`SearchStateStore::current`].

use parking_lot::Mutex;
use pixaview_model::SearchState;
use tokio::sync::{mpsc, watch};

#[derive(Debug)]
pub struct SearchStateStore {
    current: watch::Sender<SearchState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SearchState>>>,
}

impl Default for SearchStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStateStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(SearchState::Empty);
        Self {
            current,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> SearchState {
        self.current.borrow().clone()
    }

    /// Latest-value view, for observers that only render the newest state.
    pub fn watch(&self) -> watch::Receiver<SearchState> {
        self.current.subscribe()
    }

    /// Every state published after this call, in order.
    pub fn subscribe(&self) -> StateSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        StateSubscription { receiver: rx }
    }

    pub(crate) fn publish(&self, state: SearchState) {
        self.current.send_replace(state.clone());
        self.subscribers
            .lock()
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
    }
}

/// Ordered stream of published states.
#[derive(Debug)]
pub struct StateSubscription {
    receiver: mpsc::UnboundedReceiver<SearchState>,
}

impl StateSubscription {
    /// Waits for the next state. `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<SearchState> {
        self.receiver.recv().await
    }

    /// Next already-published state, if any.
    pub fn try_recv(&mut self) -> Option<SearchState> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixaview_model::SearchError;

    #[test]
    fn subscribers_see_every_transition_in_order() {
        let store = SearchStateStore::new();
        let mut first = store.subscribe();

        store.publish(SearchState::Loading { first_page: true });
        let mut late = store.subscribe();
        store.publish(SearchState::Loaded { first_page: true });
        store.publish(SearchState::Error(SearchError::Network));

        assert_eq!(first.try_recv(), Some(SearchState::Loading { first_page: true }));
        assert_eq!(first.try_recv(), Some(SearchState::Loaded { first_page: true }));
        assert_eq!(first.try_recv(), Some(SearchState::Error(SearchError::Network)));
        assert_eq!(first.try_recv(), None);

        assert_eq!(late.try_recv(), Some(SearchState::Loaded { first_page: true }));
        assert_eq!(store.current(), SearchState::Error(SearchError::Network));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = SearchStateStore::new();
        let kept = store.subscribe();
        drop(store.subscribe());

        store.publish(SearchState::NoResults);
        assert_eq!(store.subscribers.lock().len(), 1);
        drop(kept);
    }

    #[test]
    fn watch_tracks_latest_value() {
        let store = SearchStateStore::new();
        let watcher = store.watch();
        assert_eq!(*watcher.borrow(), SearchState::Empty);

        store.publish(SearchState::Loading { first_page: false });
        store.publish(SearchState::Loaded { first_page: false });
        assert_eq!(*watcher.borrow(), SearchState::Loaded { first_page: false });
    }
}
