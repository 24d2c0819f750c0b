use crate::display::PresentationSink;
use crate::error::GameError;
use tracing::warn;

/// 失敗した呼び出しの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    HumanMove,
    AgentMove,
}

/// Puts the presentation back into a retryable condition after a failed
/// remote call. Nothing here touches session state: failed calls never
/// apply anything, so there is nothing to roll back.
pub struct ErrorRecoveryHandler;

impl ErrorRecoveryHandler {
    pub fn recover<S: PresentationSink + ?Sized>(sink: &mut S, stage: Stage, err: &GameError) {
        warn!(stage = ?stage, error = %err, "Remote call failed");
        match stage {
            Stage::Start => {
                sink.reset_controls();
                sink.show_message(&format!("Error starting the game: {}", err));
            }
            Stage::HumanMove => {
                sink.show_message(&format!("Error making move: {}", err));
            }
            Stage::AgentMove => {
                sink.set_busy(false);
                sink.show_message(&format!("Error during AI move: {}", err));
            }
        }
    }
}
