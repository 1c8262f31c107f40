//! Search orchestrator.
//!
//! One actor task owns the pagination cursor and the accumulated results.
//! The [`ImageLoadingService`] handle only sends commands and reads
//! snapshots. Page fetches run on their own tasks and report back through the
//! command channel, tagged with the generation of the commit that issued
//! them; a result from an older generation is dropped on arrival.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use pixaview_model::{ImagePair, SearchError, SearchState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::debounce::Debouncer;
use super::pagination::PaginationCursor;
use super::store::{SearchStateStore, StateSubscription};
use crate::search::PairingProvider;

#[derive(Debug)]
enum LoadingCommand {
    /// Raw text from the search field; committed after the debounce interval.
    TextChanged(String),
    /// Fired by the debouncer. Dropped unless `sequence` is still current.
    Debounced { query: String, sequence: u64 },
    /// Explicit submit. Skips duplicate suppression.
    Commit(String),
    LoadMore,
    PageLoaded {
        generation: u64,
        page: u32,
        outcome: Result<Vec<ImagePair>, SearchError>,
    },
    Shutdown,
}

#[derive(Debug, Default)]
struct LoadingData {
    cursor: PaginationCursor,
    pairs: Vec<ImagePair>,
}

/// Handle to the search orchestrator.
///
/// Dropping the handle stops the actor and any pending debounce.
pub struct ImageLoadingService {
    commands: mpsc::UnboundedSender<LoadingCommand>,
    store: Arc<SearchStateStore>,
    data: Arc<RwLock<LoadingData>>,
    task: JoinHandle<()>,
}

impl fmt::Debug for ImageLoadingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.read();
        f.debug_struct("ImageLoadingService")
            .field("state", &self.store.current())
            .field("cursor", &data.cursor)
            .field("pairs", &data.pairs.len())
            .finish()
    }
}

impl ImageLoadingService {
    /// Starts the orchestrator on the current tokio runtime.
    pub fn spawn(provider: Arc<dyn PairingProvider>, debounce: Duration) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let store = Arc::new(SearchStateStore::new());
        let data = Arc::new(RwLock::new(LoadingData::default()));

        let orchestrator = Orchestrator {
            provider,
            store: store.clone(),
            data: data.clone(),
            debouncer: Debouncer::new(debounce),
            commands: commands.clone(),
            committed: String::new(),
            last_committed: String::new(),
            generation: 0,
        };
        let task = tokio::spawn(orchestrator.run(receiver));

        Self {
            commands,
            store,
            data,
            task,
        }
    }

    /// Feeds a raw text change. The query is committed once the text has
    /// been stable for the debounce interval.
    pub fn update_search_text(&self, text: impl Into<String>) {
        self.send(LoadingCommand::TextChanged(text.into()));
    }

    /// Commits `text` immediately, cancelling any pending debounce. Unlike a
    /// debounced commit, re-submitting the current query runs it again.
    pub fn search_now(&self, text: impl Into<String>) {
        self.send(LoadingCommand::Commit(text.into()));
    }

    /// Requests the next page. Ignored while a fetch is in flight, after the
    /// last page, or without a committed query.
    pub fn load_more(&self) {
        self.send(LoadingCommand::LoadMore);
    }

    /// Most recently published state.
    pub fn state(&self) -> SearchState {
        self.store.current()
    }

    /// Every state published from now on, in order.
    pub fn subscribe(&self) -> StateSubscription {
        self.store.subscribe()
    }

    /// Results accumulated for the current query, in page order.
    pub fn image_pairs(&self) -> Vec<ImagePair> {
        self.data.read().pairs.clone()
    }

    /// The pair at `index`, if that many results are loaded.
    pub fn pair_at(&self, index: usize) -> Option<ImagePair> {
        self.data.read().pairs.get(index).cloned()
    }

    pub fn pagination(&self) -> PaginationCursor {
        self.data.read().cursor
    }

    fn send(&self, command: LoadingCommand) {
        if self.commands.send(command).is_err() {
            warn!(target: "loading::orchestrator", "orchestrator is no longer running");
        }
    }
}

impl Drop for ImageLoadingService {
    fn drop(&mut self) {
        let _ = self.commands.send(LoadingCommand::Shutdown);
        self.task.abort();
    }
}

struct Orchestrator {
    provider: Arc<dyn PairingProvider>,
    store: Arc<SearchStateStore>,
    data: Arc<RwLock<LoadingData>>,
    debouncer: Debouncer,
    commands: mpsc::UnboundedSender<LoadingCommand>,
    /// Query the current session is fetching pages for.
    committed: String,
    /// Last value seen by duplicate suppression.
    last_committed: String,
    generation: u64,
}

impl Orchestrator {
    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<LoadingCommand>) {
        debug!(target: "loading::orchestrator", "orchestrator started");
        while let Some(command) = receiver.recv().await {
            if matches!(command, LoadingCommand::Shutdown) {
                break;
            }
            self.handle_command(command);
        }
        debug!(target: "loading::orchestrator", "orchestrator stopped");
    }

    fn handle_command(&mut self, command: LoadingCommand) {
        match command {
            LoadingCommand::TextChanged(text) => {
                let commands = self.commands.clone();
                self.debouncer.schedule(move |sequence| async move {
                    let _ = commands.send(LoadingCommand::Debounced {
                        query: text,
                        sequence,
                    });
                });
            }
            LoadingCommand::Debounced { query, sequence } => {
                if self.debouncer.is_current(sequence) {
                    self.commit(query, false);
                } else {
                    debug!(target: "loading::orchestrator", query = %query, "stale debounced commit dropped");
                }
            }
            LoadingCommand::Commit(query) => self.commit(query, true),
            LoadingCommand::LoadMore => self.load_more(),
            LoadingCommand::PageLoaded {
                generation,
                page,
                outcome,
            } => self.page_loaded(generation, page, outcome),
            LoadingCommand::Shutdown => {}
        }
    }

    fn commit(&mut self, query: String, force: bool) {
        if force {
            self.debouncer.cancel();
        }

        let query = query.trim().to_string();
        if !force && query == self.last_committed {
            debug!(target: "loading::orchestrator", query = %query, "duplicate commit suppressed");
            return;
        }
        self.last_committed = query.clone();
        self.committed = query;
        self.generation += 1;

        {
            let mut data = self.data.write();
            data.cursor.reset();
            data.pairs.clear();
        }

        if self.committed.is_empty() {
            debug!(target: "loading::orchestrator", "blank query committed");
            self.store.publish(SearchState::Empty);
            return;
        }

        info!(
            target: "loading::orchestrator",
            query = %self.committed,
            generation = self.generation,
            "new search session"
        );
        self.data.write().cursor.is_loading = true;
        self.store.publish(SearchState::Loading { first_page: true });
        self.fetch(1);
    }

    fn load_more(&mut self) {
        let page = {
            let mut data = self.data.write();
            if !data.cursor.can_load_more() || self.committed.is_empty() {
                debug!(
                    target: "loading::orchestrator",
                    cursor = ?data.cursor,
                    "load more ignored"
                );
                return;
            }
            data.cursor.current_page += 1;
            data.cursor.is_loading = true;
            data.cursor.current_page
        };

        debug!(target: "loading::orchestrator", query = %self.committed, page, "loading next page");
        self.store.publish(SearchState::Loading { first_page: false });
        self.fetch(page);
    }

    fn fetch(&self, page: u32) {
        let provider = self.provider.clone();
        let commands = self.commands.clone();
        let query = self.committed.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let outcome = provider.search(&query, page).await;
            let _ = commands.send(LoadingCommand::PageLoaded {
                generation,
                page,
                outcome,
            });
        });
    }

    fn page_loaded(
        &mut self,
        generation: u64,
        page: u32,
        outcome: Result<Vec<ImagePair>, SearchError>,
    ) {
        if generation != self.generation {
            debug!(
                target: "loading::orchestrator",
                generation,
                current = self.generation,
                page,
                "discarding result from a superseded search"
            );
            return;
        }

        let first_page = page == 1;
        let state = {
            let mut data = self.data.write();
            data.cursor.is_loading = false;

            match outcome {
                Ok(pairs) if !pairs.is_empty() => {
                    if first_page {
                        data.pairs = pairs;
                    } else {
                        data.pairs.extend(pairs);
                    }
                    SearchState::Loaded { first_page }
                }
                Ok(_) | Err(SearchError::NoResults) => {
                    data.cursor.has_more_pages = false;
                    if first_page {
                        SearchState::NoResults
                    } else {
                        SearchState::Loaded { first_page: false }
                    }
                }
                Err(error) => {
                    warn!(
                        target: "loading::orchestrator",
                        query = %self.committed,
                        page,
                        error = %error,
                        "page fetch failed"
                    );
                    SearchState::Error(error)
                }
            }
        };

        debug!(
            target: "loading::orchestrator",
            page,
            state = state.as_str(),
            "page settled"
        );
        self.store.publish(state);
    }
}
