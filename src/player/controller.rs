use crate::core::{Deadline, LegalMoveSet, Move};
use crate::error::SelectError;
use crate::player::lifecycle::GamerPhase;

/// プレイヤー操作のtrait
///
/// The hooks the match host calls. Only `choose_move` can fail; the
/// lifecycle hooks are fire-and-forget.
pub trait PlayerController {
    fn name(&self) -> &str;

    fn phase(&self) -> GamerPhase;

    /// Look at the game before a match is scheduled. Leaves the phase alone.
    fn preview(&mut self, deadline: Deadline);

    fn meta_game(&mut self, deadline: Deadline);

    fn choose_move(
        &mut self,
        legal_moves: LegalMoveSet,
        deadline: Deadline,
    ) -> Result<Move, SelectError>;

    /// Match ended normally.
    fn stop(&mut self);

    /// Match ended abnormally.
    fn abort(&mut self);
}
