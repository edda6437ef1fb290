//! Broadcast + history reply transcript.

use std::{
    collections::VecDeque,
    sync::{Arc, PoisonError, RwLock},
};

use futures::{StreamExt, future, stream};
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, errors::BroadcastStreamRecvError};

use crate::{Fragment, ResponseSink};

/// Default history size limit (10 MB).
const HISTORY_BYTES: usize = 10_000 * 1024;

/// Live channel capacity. Slower listeners catch up from history.
const LIVE_CAPACITY: usize = 1024;

#[derive(Clone)]
struct StoredFragment {
    seq: u64,
    fragment: Fragment,
    bytes: usize,
}

struct Inner {
    history: VecDeque<StoredFragment>,
    total_bytes: usize,
    next_seq: u64,
}

/// Reply transcript with broadcast and history support.
///
/// A chat view that attaches after the reply started still receives
/// every fragment still held in history: history first, then live updates.
/// A listener that falls behind the live channel is refilled from history,
/// so it only misses fragments the history limit has already evicted.
pub struct Transcript {
    inner: Arc<RwLock<Inner>>,
    sender: broadcast::Sender<(u64, Fragment)>,
    history_limit: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create a new transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(HISTORY_BYTES)
    }

    /// Create a transcript keeping at most `limit` bytes of history.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        let (sender, _) = broadcast::channel(LIVE_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                history: VecDeque::with_capacity(32),
                total_bytes: 0,
                next_seq: 0,
            })),
            sender,
            history_limit: limit,
        }
    }

    /// Push a fragment to both history and live listeners.
    pub fn push(&self, fragment: Fragment) {
        let bytes = fragment.approx_bytes();

        // Held across the send so subscribers never see a gap between
        // their history snapshot and the live channel.
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        while inner.total_bytes.saturating_add(bytes) > self.history_limit {
            if let Some(front) = inner.history.pop_front() {
                inner.total_bytes = inner.total_bytes.saturating_sub(front.bytes);
            } else {
                break;
            }
        }
        inner.history.push_back(StoredFragment {
            seq,
            fragment: fragment.clone(),
            bytes,
        });
        inner.total_bytes = inner.total_bytes.saturating_add(bytes);

        let _ = self.sender.send((seq, fragment)); // no listeners is fine
    }

    /// Push a markdown fragment.
    pub fn push_markdown<S: Into<String>>(&self, s: S) {
        self.push(Fragment::Markdown(s.into()));
    }

    /// Push finished notification.
    pub fn push_finished(&self) {
        self.push(Fragment::Finished);
    }

    /// Get a snapshot of the history.
    #[must_use]
    pub fn get_history(&self) -> Vec<Fragment> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .iter()
            .map(|s| s.fragment.clone())
            .collect()
    }

    /// Markdown text in history, in order.
    #[must_use]
    pub fn markdown_history(&self) -> Vec<String> {
        self.get_history()
            .into_iter()
            .filter_map(|f| match f {
                Fragment::Markdown(s) => Some(s),
                Fragment::Finished => None,
            })
            .collect()
    }

    /// Stream that yields history first, then live updates.
    #[must_use]
    pub fn history_plus_stream(&self) -> stream::BoxStream<'static, Fragment> {
        let listener = {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            Listener {
                pending: inner.history.clone(),
                live: BroadcastStream::new(self.sender.subscribe()),
                next_seq: inner.next_seq,
                inner: Arc::clone(&self.inner),
            }
        };

        stream::unfold(listener, |mut listener| async move {
            let fragment = listener.next_fragment().await?;
            Some((fragment, listener))
        })
        .boxed()
    }

    /// Stream of markdown fragments (until Finished).
    #[must_use]
    pub fn markdown_stream(&self) -> stream::BoxStream<'static, String> {
        self.history_plus_stream()
            .take_while(|f| future::ready(!matches!(f, Fragment::Finished)))
            .filter_map(|f| async move {
                match f {
                    Fragment::Markdown(s) => Some(s),
                    Fragment::Finished => None,
                }
            })
            .boxed()
    }
}

/// One reader's position in a transcript.
struct Listener {
    pending: VecDeque<StoredFragment>,
    live: BroadcastStream<(u64, Fragment)>,
    /// Sequence number of the first fragment not yet yielded from `live`.
    next_seq: u64,
    inner: Arc<RwLock<Inner>>,
}

impl Listener {
    async fn next_fragment(&mut self) -> Option<Fragment> {
        loop {
            if let Some(stored) = self.pending.pop_front() {
                return Some(stored.fragment);
            }
            match self.live.next().await? {
                Ok((seq, _)) if seq < self.next_seq => {}
                Ok((seq, fragment)) => {
                    self.next_seq = seq + 1;
                    return Some(fragment);
                }
                Err(BroadcastStreamRecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "Transcript listener lagged, refilling from history");
                    self.refill_from_history();
                }
            }
        }
    }

    fn refill_from_history(&mut self) {
        let next_seq = self.next_seq;
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let missed: VecDeque<StoredFragment> = inner
            .history
            .iter()
            .filter(|s| s.seq >= next_seq)
            .cloned()
            .collect();
        drop(inner);

        if let Some(first) = missed.front() {
            if first.seq > next_seq {
                tracing::warn!(
                    lost = first.seq - next_seq,
                    "Transcript history evicted fragments before a lagging listener read them"
                );
            }
        }
        if let Some(last) = missed.back() {
            self.next_seq = last.seq + 1;
        }
        self.pending = missed;
    }
}

impl ResponseSink for Transcript {
    fn markdown(&self, fragment: String) {
        self.push(Fragment::Markdown(fragment));
    }
}
