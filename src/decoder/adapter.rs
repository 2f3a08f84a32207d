use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::DecodeEngine;
use crate::channels::ScanChannels;
use crate::error::{DecodeError, ScanError};
use crate::models::{Decoded, FrameVariant, VariantKind};

/// First successful decode of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Engine output
    pub decoded: Decoded,
    /// Variant that produced it
    pub variant: VariantKind,
}

/// Tries variants strictly in order; the first hit ends the tick
pub struct DecodeAdapter<E> {
    engine: Arc<E>,
}

impl<E: DecodeEngine> DecodeAdapter<E> {
    /// Wrap an engine
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Shared handle to the engine
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Attempt each variant on a blocking worker, one at a time.
    ///
    /// Not-found misses are silent. Other engine errors go to the error
    /// channel and the next variant is still tried. Returns `None` early if
    /// `cancel` fires between attempts.
    pub async fn first_hit(
        &self,
        variants: Vec<FrameVariant>,
        channels: &ScanChannels,
        cancel: &CancellationToken,
    ) -> Option<Hit> {
        for variant in variants {
            if cancel.is_cancelled() {
                return None;
            }
            let engine = Arc::clone(&self.engine);
            let FrameVariant { kind, frame } = variant;
            let attempt = tokio::task::spawn_blocking(move || engine.decode(&frame))
                .await
                .map_err(|join| ScanError::Worker(join.to_string()));
            if let Some(hit) = classify(kind, attempt, &mut |err| channels.report(err)) {
                return Some(hit);
            }
        }
        None
    }

    /// Same walk on the calling thread, for still images
    pub fn first_hit_blocking(
        &self,
        variants: &[FrameVariant],
        report: &mut dyn FnMut(ScanError),
    ) -> Option<Hit> {
        variants.iter().find_map(|variant| {
            classify(variant.kind, Ok(self.engine.decode(&variant.frame)), report)
        })
    }
}

fn classify(
    kind: VariantKind,
    attempt: Result<Result<Decoded, DecodeError>, ScanError>,
    report: &mut dyn FnMut(ScanError),
) -> Option<Hit> {
    match attempt {
        Ok(Ok(decoded)) => {
            log::debug!("{kind}: decoded {:?}", decoded.text);
            Some(Hit {
                decoded,
                variant: kind,
            })
        }
        Ok(Err(DecodeError::NotFound)) => {
            log::trace!("{kind}: not found");
            None
        }
        Ok(Err(err)) => {
            report(err.into());
            None
        }
        Err(err) => {
            report(err);
            None
        }
    }
}
