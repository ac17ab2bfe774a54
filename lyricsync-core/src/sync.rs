use crate::config::SyncConfig;
use crate::document::LyricDocument;
use crate::line::LyricLine;
use crate::render::RenderOptions;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::info;

/// Events emitted by the sync engine
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A lyric document was loaded for the current track
    LyricsLoaded {
        line_count: usize,
        has_translation: bool,
    },
    /// The current lyric document was dropped
    LyricsCleared,
    /// Playback moved onto a different line
    LineChanged {
        line: LyricLine,
    },
    /// Playback moved back before the first line
    BeforeFirstLine,
    /// The effective offset changed
    OffsetChanged {
        offset: f64,
    },
}

/// Sync engine state
struct SyncEngineInner {
    document: Option<LyricDocument>,
    active: Option<usize>,
}

/// Drives a [`LyricDocument`] from an external playback clock.
///
/// Lookups and offset changes share one lock, since both touch the
/// document's cursor. The engine owns no timer: call [`SyncEngine::tick`]
/// with the playback position on every UI tick.
pub struct SyncEngine {
    inner: Mutex<SyncEngineInner>,
    event_tx: broadcast::Sender<SyncEvent>,
}

impl SyncEngine {
    /// Create a new sync engine
    #[must_use]
    pub fn new(config: &SyncConfig) -> Arc<Self> {
        Arc::new(Self::with_capacity(config.event_capacity))
    }

    fn with_capacity(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));

        Self {
            inner: Mutex::new(SyncEngineInner {
                document: None,
                active: None,
            }),
            event_tx,
        }
    }

    /// Subscribe to sync events
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    /// Replace the current document with one for a new track
    pub async fn load(&self, document: LyricDocument) {
        let line_count = document.len();
        let has_translation = document.has_translation();

        let mut inner = self.inner.lock().await;
        inner.document = Some(document);
        inner.active = None;
        drop(inner);

        info!(line_count, has_translation, "Lyrics loaded");
        let _ = self.event_tx.send(SyncEvent::LyricsLoaded {
            line_count,
            has_translation,
        });
    }

    /// Drop the current document
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.document = None;
        inner.active = None;
        drop(inner);

        info!("Lyrics cleared");
        let _ = self.event_tx.send(SyncEvent::LyricsCleared);
    }

    /// Advance to playback `position` (seconds) and return the active line index.
    ///
    /// Emits [`SyncEvent::LineChanged`] only when the active line differs
    /// from the previous tick.
    pub async fn tick(&self, position: f64) -> Option<usize> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let document = inner.document.as_mut()?;

        let current = document.locate_index(position);
        let changed_line = match current {
            Some(index) if inner.active != current => document.lines().get(index).cloned(),
            _ => None,
        };
        let previous = std::mem::replace(&mut inner.active, current);
        drop(guard);

        if let Some(line) = changed_line {
            let _ = self.event_tx.send(SyncEvent::LineChanged { line });
        } else if current.is_none() && previous.is_some() {
            let _ = self.event_tx.send(SyncEvent::BeforeFirstLine);
        }

        current
    }

    /// Override the effective offset (seconds) of the current document
    pub async fn set_offset(&self, seconds: f64) {
        let mut inner = self.inner.lock().await;
        let Some(document) = inner.document.as_mut() else {
            return;
        };
        document.set_offset(seconds);
        let offset = document.effective_offset();
        inner.active = None;
        drop(inner);

        let _ = self.event_tx.send(SyncEvent::OffsetChanged { offset });
    }

    /// Render the current document, if any
    pub async fn render(&self, options: RenderOptions) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.document.as_ref().map(|doc| doc.render(options))
    }

    /// Check if the current document carries a translation
    pub async fn has_translation(&self) -> bool {
        let inner = self.inner.lock().await;
        inner
            .document
            .as_ref()
            .is_some_and(LyricDocument::has_translation)
    }

    /// Get the currently active line
    pub async fn active_line(&self) -> Option<LyricLine> {
        let inner = self.inner.lock().await;
        let index = inner.active?;
        inner.document.as_ref()?.lines().get(index).cloned()
    }

    /// Check if a document is loaded
    pub async fn has_lyrics(&self) -> bool {
        self.inner.lock().await.document.is_some()
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::with_capacity(SyncConfig::default().event_capacity)
    }
}
