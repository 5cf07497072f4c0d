//! Application orchestration layer
//!
//! Owns the sample source and the renderer and runs the receive loop: wait for an event,
//! decode it, draw it, repeat. Everything runs on one logical task, so the display never sees
//! two frames at once and samples are drawn in the order they arrived.

use crate::config::{BackpressurePolicy, MalformedPolicy, StreamConfig};
use crate::error::{AmpviewError, Result};
use crate::render::SampleRenderer;
use crate::sample::decode_payload;
use crate::stream::{SampleSource, StreamEvent};
use std::future::Future;

/// Stream-handling choices the loop applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelinePolicy {
    pub on_malformed: MalformedPolicy,
    pub backpressure: BackpressurePolicy,
    /// Log disconnects instead of stopping; set when the transport reconnects by itself.
    pub tolerate_disconnects: bool,
}

impl From<&StreamConfig> for PipelinePolicy {
    fn from(config: &StreamConfig) -> Self {
        Self {
            on_malformed: config.on_malformed,
            backpressure: config.backpressure,
            tolerate_disconnects: config.reconnect,
        }
    }
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rendered: u64,
    pub skipped: u64,
    pub coalesced: u64,
    pub disconnects: u64,
}

/// Application orchestrator - the single owner of source and display
pub struct Application {
    source: Box<dyn SampleSource>,
    renderer: SampleRenderer,
    policy: PipelinePolicy,
    stats: PipelineStats,
}

impl Application {
    pub fn new(
        source: Box<dyn SampleSource>,
        renderer: SampleRenderer,
        policy: PipelinePolicy,
    ) -> Self {
        Self {
            source,
            renderer,
            policy,
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Run until the stream ends or a fatal error occurs.
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Run until the stream ends, a fatal error occurs, or `shutdown` resolves.
    ///
    /// The source is closed and the display released on every exit path, including a display
    /// that fails to initialize. The display keeps its last frame; the first error encountered
    /// is the one returned.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let outcome = match self.renderer.initialize() {
            Ok(()) => self.pump(shutdown).await,
            Err(err) => Err(err),
        };

        if let Err(err) = self.source.close().await {
            log::warn!("Closing sample stream failed: {err}");
        }
        let cleanup = self.renderer.cleanup();

        log::info!(
            "Pipeline stopped: {} rendered, {} skipped, {} coalesced",
            self.stats.rendered,
            self.stats.skipped,
            self.stats.coalesced
        );
        outcome.and(cleanup)
    }

    async fn pump<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let event = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    log::info!("Shutdown requested");
                    return Ok(());
                }
                event = self.source.next_event() => event,
            };

            let Some(event) = event else {
                log::info!("Sample stream ended");
                return Ok(());
            };

            match self.policy.backpressure {
                BackpressurePolicy::Sequential => self.handle_event(event)?,
                BackpressurePolicy::Latest => {
                    let (latest, deferred) = self.coalesce(event);
                    self.handle_event(latest)?;
                    if let Some(deferred) = deferred {
                        self.handle_event(deferred)?;
                    }
                }
            }
        }
    }

    /// Skip over already-queued samples, keeping the newest.
    ///
    /// Stops at the first connection event so it is still handled, right after the kept sample.
    fn coalesce(&mut self, first: StreamEvent) -> (StreamEvent, Option<StreamEvent>) {
        if !first.carries_sample() {
            return (first, None);
        }

        let mut latest = first;
        while let Some(next) = self.source.try_next_event() {
            if !next.carries_sample() {
                return (latest, Some(next));
            }
            self.stats.coalesced += 1;
            latest = next;
        }
        (latest, None)
    }

    fn handle_event(&mut self, event: StreamEvent) -> Result<()> {
        match event {
            StreamEvent::Payload(payload) => match decode_payload(&payload) {
                Ok(sample) => {
                    self.renderer.render(sample)?;
                    self.stats.rendered += 1;
                    Ok(())
                }
                Err(err) => self.reject_payload(err),
            },
            StreamEvent::Undecodable { description } => {
                self.reject_payload(AmpviewError::malformed(description))
            }
            StreamEvent::Disconnected { reason } => {
                self.stats.disconnects += 1;
                if self.policy.tolerate_disconnects {
                    log::warn!("Stream disconnected ({reason}); waiting for reconnect");
                    Ok(())
                } else {
                    Err(AmpviewError::transport(reason))
                }
            }
        }
    }

    fn reject_payload(&mut self, err: AmpviewError) -> Result<()> {
        match self.policy.on_malformed {
            MalformedPolicy::Fail => Err(err),
            MalformedPolicy::Skip if err.is_payload_error() => {
                log::warn!("Skipping sample: {err}");
                self.stats.skipped += 1;
                Ok(())
            }
            MalformedPolicy::Skip => Err(err),
        }
    }
}
