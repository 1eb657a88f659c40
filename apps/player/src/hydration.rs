//! Startup sequencing: load the lesson, restore progress, offer resume.
//!
//! Runs once per process. Awaiting [`hydrate`] is the completion signal:
//! it resolves exactly once when both the document load and the restore
//! attempt have finished, so nothing ever polls a flag.

use crate::engine::SessionEngine;
use std::time::Duration;
use tokio::sync::watch;

/// How long the "resume available" hint stays up before clearing itself.
pub const RESUME_HINT_TTL: Duration = Duration::from_secs(2);

/// Outcome of the startup sequence.
#[derive(Debug)]
pub struct HydrationReport {
    /// Human-readable lesson load failure, if any. When set, the mid-lesson
    /// check was skipped and the caller should surface a retry.
    pub error: Option<String>,
    /// True when restored progress put the session mid-lesson.
    pub resumed_mid_lesson: bool,
    /// Transient resume hint: starts `true`, flips to `false` after
    /// [`RESUME_HINT_TTL`]. Present only when `resumed_mid_lesson`.
    ///
    /// The hint never navigates anywhere; resuming versus restarting stays
    /// an explicit user decision.
    pub resume_hint: Option<watch::Receiver<bool>>,
}

/// Run the startup sequence against a freshly composed engine.
pub async fn hydrate(engine: &mut SessionEngine) -> HydrationReport {
    if let Err(err) = engine.load_lesson() {
        return HydrationReport {
            error: Some(err.to_string()),
            resumed_mid_lesson: false,
            resume_hint: None,
        };
    }

    engine.restore().await;

    let mid_lesson = engine.state().is_mid_lesson();
    tracing::debug!(
        mid_lesson,
        current_index = engine.state().current_index(),
        hearts = engine.state().hearts(),
        xp = engine.state().xp(),
        "hydration finished"
    );

    let resume_hint = mid_lesson.then(|| {
        let (tx, rx) = watch::channel(true);
        tokio::spawn(async move {
            tokio::time::sleep(RESUME_HINT_TTL).await;
            // Receivers may be gone already; the hint just expires.
            let _ = tx.send(false);
        });
        rx
    });

    HydrationReport {
        error: None,
        resumed_mid_lesson: mid_lesson,
        resume_hint,
    }
}
