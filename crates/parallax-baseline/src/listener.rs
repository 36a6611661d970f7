//! Signal-bus listener: build baselines when content extraction completes.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use tracing::warn;

use parallax_core::bus::Signal;
use parallax_core::errors::ParallaxResult;
use parallax_core::models::ContentSignals;

use crate::builder::{BaselineBuilder, BuildRequest};

/// Source of structural signals for a content item — the seam to the
/// out-of-scope extraction pipeline.
pub trait ContentSource: Send + Sync {
    fn signals(&self, content_id: &str) -> ParallaxResult<ContentSignals>;
}

/// Consume `ContentExtractionCompleted` signals and run baseline builds.
/// Other signals are ignored. The thread exits when the bus side hangs up.
pub fn spawn(
    receiver: Receiver<Signal>,
    builder: Arc<BaselineBuilder>,
    source: Arc<dyn ContentSource>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for signal in receiver.iter() {
            let Signal::ContentExtractionCompleted { content_id } = signal else {
                continue;
            };
            let signals = match source.signals(&content_id) {
                Ok(signals) => signals,
                Err(e) => {
                    warn!(content_id = %content_id, error = %e, "content source failed");
                    continue;
                }
            };
            if let Err(e) = builder.build(&BuildRequest::global(&content_id, signals)) {
                warn!(content_id = %content_id, error = %e, "baseline build failed");
            }
        }
    })
}
