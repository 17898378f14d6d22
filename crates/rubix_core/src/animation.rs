//! Animation logic.

use crate::{MoveEngine, PendingMove, expand_double_turns};

/// Angle of a quarter turn, in degrees.
pub const QUARTER_TURN: f32 = 90.0;
/// Default turn speed, in degrees per tick.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Minimum turn speed, in degrees per tick.
pub const MIN_SPEED: f32 = 0.01;

/// Move tokens awaiting execution.
///
/// The queue resets to empty (with the cursor at 0) as soon as its last token
/// is taken or it is abandoned.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveQueue {
    tokens: Vec<String>,
    cursor: usize,
}
impl MoveQueue {
    /// Constructs a queue of tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens, cursor: 0 }
    }
    /// Returns whether there are no tokens left.
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }
    /// Returns the index of the next token.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    /// Returns the tokens that have not been taken yet.
    pub fn remaining(&self) -> &[String] {
        self.tokens.get(self.cursor..).unwrap_or_default()
    }
    /// Takes the next token.
    pub fn pop(&mut self) -> Option<String> {
        let token = self.tokens.get(self.cursor)?.clone();
        self.cursor += 1;
        if self.is_empty() {
            self.clear();
        }
        Some(token)
    }
    /// Abandons the remaining tokens.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.cursor = 0;
    }
}

/// Interpolates the turn in flight and feeds queued moves to the engine one
/// at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    /// Degrees turned so far in the current move.
    angle: f32,
    /// Degrees per tick.
    speed: f32,
    queue: MoveQueue,
}
impl Default for AnimationController {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}
impl AnimationController {
    /// Constructs an animation controller with no moves queued.
    pub fn new(speed: f32) -> Self {
        Self {
            angle: 0.0,
            speed: speed.max(MIN_SPEED),
            queue: MoveQueue::default(),
        }
    }

    /// Returns the angle turned so far in the current move, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }
    /// Returns the turn speed, in degrees per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }
    /// Sets the turn speed, in degrees per tick.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(MIN_SPEED);
    }
    /// Returns the queue of scripted moves.
    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }
    /// Returns whether no move is in flight and none are queued.
    pub fn is_idle(&self, engine: &MoveEngine) -> bool {
        !engine.is_turning() && self.queue.is_empty()
    }
    /// Returns the move in flight and the angle it has turned.
    pub fn current_turn(&self, engine: &MoveEngine) -> Option<(PendingMove, f32)> {
        Some((engine.pending()?, self.angle))
    }

    /// Submits a scripted sequence, replacing any sequence still queued.
    /// Double turns are expanded into two quarter turns.
    pub fn play_sequence<S: AsRef<str>>(
        &mut self,
        tokens: impl IntoIterator<Item = S>,
        speed: Option<f32>,
    ) {
        let tokens = expand_double_turns(tokens);
        log::info!("playing sequence of {} moves", tokens.len());
        if let Some(speed) = speed {
            self.set_speed(speed);
        }
        self.queue = MoveQueue::new(tokens);
    }
    /// Abandons the queued sequence. The move in flight keeps turning.
    pub fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            log::warn!("abandoning {} queued moves", self.queue.remaining().len());
        }
        self.queue.clear();
    }

    /// Advances by one tick: starts the next queued move if the engine is
    /// idle, then advances the move in flight. Returns the move committed
    /// during this tick, if any.
    pub fn tick(&mut self, engine: &mut MoveEngine) -> Option<PendingMove> {
        self.drain_queue(engine);
        self.advance(engine)
    }

    /// Starts the next queued move if the engine is idle. An invalid token
    /// abandons the rest of the queue.
    pub fn drain_queue(&mut self, engine: &mut MoveEngine) {
        if engine.is_turning() {
            return;
        }
        let Some(token) = self.queue.pop() else {
            return;
        };
        match engine.begin_move(&token) {
            Ok(_) => self.angle = 0.0,
            Err(e) => {
                log::warn!("bad move in sequence: {e}");
                self.clear_queue();
            }
        }
    }

    /// Advances the move in flight by one tick, committing it once it has
    /// turned a quarter turn. Any overshoot is discarded.
    pub fn advance(&mut self, engine: &mut MoveEngine) -> Option<PendingMove> {
        if !engine.is_turning() {
            // The engine may have committed or reset without us.
            self.angle = 0.0;
            return None;
        }
        self.angle += self.speed;
        if self.angle < QUARTER_TURN {
            return None;
        }
        self.angle = 0.0;
        engine.commit()
    }

    /// Instantly finishes the move in flight and every queued move.
    pub fn catch_up(&mut self, engine: &mut MoveEngine) {
        engine.commit();
        self.angle = 0.0;
        while let Some(token) = self.queue.pop() {
            if let Err(e) = engine.begin_move(&token) {
                log::warn!("bad move in sequence: {e}");
                self.clear_queue();
                break;
            }
            engine.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_queue_resets_when_exhausted() {
        let mut q = MoveQueue::new(vec!["R".to_owned(), "U".to_owned()]);
        assert_eq!(Some("R".to_owned()), q.pop());
        assert_eq!(1, q.cursor());
        assert_eq!(["U".to_owned()], q.remaining());
        assert_eq!(Some("U".to_owned()), q.pop());
        assert_eq!(MoveQueue::default(), q);
        assert_eq!(None, q.pop());
    }

    #[test]
    fn test_turn_takes_ticks() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(5.0);
        let pending = engine.begin_move("R").unwrap();
        for i in 1..18 {
            assert_eq!(None, anim.tick(&mut engine));
            assert_eq!(Some((pending, 5.0 * i as f32)), anim.current_turn(&engine));
        }
        assert_eq!(Some(pending), anim.tick(&mut engine));
        assert_eq!(0.0, anim.angle());
        assert_eq!(None, anim.current_turn(&engine));
        assert!(!engine.is_home());
    }

    #[test]
    fn test_overshoot_commits_once() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(70.0);
        engine.begin_move("U").unwrap();
        assert_eq!(None, anim.tick(&mut engine));
        assert!(anim.tick(&mut engine).is_some());
        assert_eq!(0.0, anim.angle());
        assert_eq!(None, anim.tick(&mut engine));

        let mut expected = MoveEngine::new();
        expected.apply_move("U".parse().unwrap()).unwrap();
        assert_eq!(expected, engine);
    }

    #[test]
    fn test_sequence_serializes_moves() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(45.0);
        anim.play_sequence(["R2", "U'"], None);
        assert_eq!(3, anim.queue().remaining().len());

        let mut committed = vec![];
        for _ in 0..6 {
            committed.extend(anim.tick(&mut engine));
            assert!(engine.check_invariant());
        }
        let names: Vec<String> = committed.iter().map(|p| p.to_string()).collect();
        assert_eq!(["R", "R", "U'"], names.as_slice());
        assert!(anim.is_idle(&engine));
    }

    #[test]
    fn test_bad_token_abandons_queue() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(90.0);
        anim.play_sequence(["R", "Q", "U"], None);
        assert!(anim.tick(&mut engine).is_some());
        assert_eq!(None, anim.tick(&mut engine));
        assert!(anim.is_idle(&engine));
    }

    #[test]
    fn test_clear_queue_keeps_turn_in_flight() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(30.0);
        anim.play_sequence(["F", "B"], Some(30.0));
        anim.tick(&mut engine);
        anim.clear_queue();
        assert!(engine.is_turning());
        let committed: Vec<_> = (0..5).filter_map(|_| anim.tick(&mut engine)).collect();
        assert_eq!(1, committed.len());
        assert!(anim.is_idle(&engine));
    }

    #[test]
    fn test_angle_resets_when_engine_commits_elsewhere() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(5.0);
        engine.begin_move("R").unwrap();
        for _ in 0..9 {
            anim.tick(&mut engine);
        }
        assert_eq!(45.0, anim.angle());

        engine.commit();
        assert_eq!(None, anim.tick(&mut engine));
        assert_eq!(0.0, anim.angle());

        engine.begin_move("U").unwrap();
        let ticks = std::iter::repeat_with(|| anim.tick(&mut engine))
            .position(|committed| committed.is_some());
        assert_eq!(Some(17), ticks);
    }

    #[test]
    fn test_catch_up() {
        let mut engine = MoveEngine::new();
        let mut anim = AnimationController::new(1.0);
        anim.play_sequence(["R", "U", "R'", "U'"], None);
        anim.tick(&mut engine);
        anim.catch_up(&mut engine);
        assert!(anim.is_idle(&engine));

        let mut expected = MoveEngine::new();
        for mv in ["R", "U", "R'", "U'"] {
            expected.apply_move(mv.parse().unwrap()).unwrap();
        }
        assert_eq!(expected, engine);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut anim = AnimationController::new(-3.0);
        assert_eq!(MIN_SPEED, anim.speed());
        anim.set_speed(f32::NAN);
        assert_eq!(MIN_SPEED, anim.speed());
    }
}
