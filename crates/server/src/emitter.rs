//! # Stream Emitter
//!
//! Turns a generated answer into a paced, word-by-word byte stream.
//!
//! A producer task runs the generation future, splits the result into
//! chunks and pushes them into a bounded channel; the HTTP body (or any
//! other consumer) drains the receiving end. When the consumer goes away
//! the producer notices on its next send, or while still generating, and
//! stops quietly.
//!
//! Invariants:
//! - concatenating all chunks gives back the generated text exactly
//! - a failed or panicking generation yields exactly one apology chunk
//! - the stream closes exactly once, when the producer task ends

use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use axum::body::Bytes;
use futures::FutureExt;
use rand::Rng;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

/// Sent instead of an answer when generation fails after headers went out
pub const APOLOGY: &str = "Unable to fetch recommendations. Please try again.";

/// Chunks buffered between producer and consumer
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Stream items as the HTTP body expects them
pub type ChunkStream = ReceiverStream<Result<Bytes, Infallible>>;

/// Delay between successive chunks, drawn uniformly from `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl PacingConfig {
    /// No delay at all; used by tests and the `--min/max-delay-ms 0` setup
    pub fn disabled() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.max_delay.is_zero()
    }

    /// Draw the next delay.
    ///
    /// The thread-local RNG is created and dropped here so that no
    /// non-`Send` value lives across an await point in the producer.
    pub fn next_delay(&self) -> Duration {
        if self.is_disabled() || self.min_delay >= self.max_delay {
            return self.min_delay.min(self.max_delay);
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(30),
            max_delay: Duration::from_millis(70),
        }
    }
}

/// Split `text` on single spaces, keeping the separator on every word but
/// the last. Each extra space of a run becomes its own `" "` chunk; only a
/// trailing empty word is skipped.
pub fn split_chunks(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i < last {
                format!("{word} ")
            } else {
                (*word).to_string()
            }
        })
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Spawns producer tasks that feed paced chunks into a channel.
#[derive(Debug, Clone)]
pub struct StreamEmitter {
    pacing: PacingConfig,
    capacity: usize,
}

impl StreamEmitter {
    pub fn new(pacing: PacingConfig) -> Self {
        Self {
            pacing,
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Stream an already generated text.
    pub fn emit(&self, text: String) -> ChunkStream {
        self.spawn(async move { Ok::<_, anyhow::Error>(text) })
    }

    /// Run `generate` on a new task and stream its output.
    ///
    /// Returns immediately; the first chunk arrives once generation is
    /// done. An `Err` or a panic from `generate` becomes [`APOLOGY`].
    pub fn spawn<F>(&self, generate: F) -> ChunkStream
    where
        F: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.capacity);
        let pacing = self.pacing;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = tx.closed() => {
                    debug!("Consumer went away before generation finished");
                    return;
                }
                outcome = AssertUnwindSafe(generate).catch_unwind() => outcome,
            };

            match outcome {
                Ok(Ok(text)) => send_paced(&tx, &text, pacing).await,
                Ok(Err(e)) => {
                    error!("Generation failed mid-stream: {:#}", e);
                    send_apology(&tx).await;
                }
                Err(_) => {
                    error!("Generation panicked mid-stream");
                    send_apology(&tx).await;
                }
            }
            // Dropping `tx` here closes the stream
        });

        ReceiverStream::new(rx)
    }
}

impl Default for StreamEmitter {
    fn default() -> Self {
        Self::new(PacingConfig::default())
    }
}

async fn send_paced(tx: &mpsc::Sender<Result<Bytes, Infallible>>, text: &str, pacing: PacingConfig) {
    let chunks = split_chunks(text);
    let total = chunks.len();

    for (i, chunk) in chunks.into_iter().enumerate() {
        if i > 0 && !pacing.is_disabled() {
            tokio::time::sleep(pacing.next_delay()).await;
        }
        if tx.send(Ok(Bytes::from(chunk))).await.is_err() {
            debug!("Consumer closed the stream after {} of {} chunks", i, total);
            return;
        }
    }
    debug!("Streamed {} chunks", total);
}

async fn send_apology(tx: &mpsc::Sender<Result<Bytes, Infallible>>) {
    if tx.send(Ok(Bytes::from_static(APOLOGY.as_bytes()))).await.is_err() {
        debug!("Consumer closed the stream before the apology was sent");
    }
}
