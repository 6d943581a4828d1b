//! The game engine: state machine, player intents and the frame tick
//!
//! Every operation is total. Calling one in a phase where it makes no sense
//! is a silent no-op.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{GamePhase, GameState};
use super::tick::{BallOutcome, collide_bricks, update_ball, update_paddle};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::platform::{InputEvent, KeyCode};
use crate::renderer::{Renderer, UiReporter};

/// Owns the simulation and its presentation collaborators
pub struct GameEngine<R: Renderer, U: UiReporter> {
    config: GameConfig,
    state: GameState,
    rng: Box<dyn RandomSource>,
    renderer: R,
    reporter: U,
}

impl<R: Renderer, U: UiReporter> GameEngine<R, U> {
    /// Validate `config` and build an Idle engine
    pub fn new(
        config: GameConfig,
        renderer: R,
        reporter: U,
        rng: impl RandomSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config);
        Ok(Self {
            config,
            state,
            rng: Box::new(rng),
            renderer,
            reporter,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn reporter(&self) -> &U {
        &self.reporter
    }

    /// Begin a run from Idle, or restart after GameOver/Won
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running | GamePhase::Paused => {}
            previous => {
                self.state.reset(&self.config);
                log::info!(
                    "Game started (from {:?}): {} bricks, {} lives",
                    previous,
                    self.state.bricks.len(),
                    self.state.lives
                );
            }
        }
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Running => {
                log::info!("Paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                GamePhase::Running
            }
            other => other,
        };
    }

    /// Release the carried ball with a randomised horizontal component
    pub fn launch(&mut self) {
        if self.state.phase != GamePhase::Running || !self.state.ball.on_paddle {
            return;
        }
        let spread = self.config.launch_dx_spread;
        let dx = self.rng.uniform(-spread, spread);
        let vel = Vec2::new(dx, self.config.launch_dy);
        self.state.ball.launch(vel);
        log::debug!("Ball launched: dx={:.3}, dy={:.3}", vel.x, vel.y);
    }

    /// Nudge the paddle one step left (on-screen button)
    pub fn move_left(&mut self) {
        self.nudge(-self.config.paddle_speed);
    }

    /// Nudge the paddle one step right (on-screen button)
    pub fn move_right(&mut self) {
        self.nudge(self.config.paddle_speed);
    }

    fn nudge(&mut self, delta: f32) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.paddle.shift(delta, self.config.paddle_max_x());
        self.state.ball.follow(&self.state.paddle);
    }

    pub fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::Left => self.state.input.left = true,
            KeyCode::Right => self.state.input.right = true,
            KeyCode::Launch => self.launch(),
            KeyCode::Pause => self.toggle_pause(),
            KeyCode::Start => self.start(),
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::Left => self.state.input.left = false,
            KeyCode::Right => self.state.input.right = false,
            _ => {}
        }
    }

    /// Dispatch a host input event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::StartPressed => self.start(),
            InputEvent::PausePressed => self.toggle_pause(),
        }
    }

    /// Advance one frame
    ///
    /// Does nothing outside Running. Otherwise runs the paddle, ball and brick
    /// steps, then paints and reports. A run that ends this tick also gets its
    /// banner, once.
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.state.time_ticks += 1;

        update_paddle(&mut self.state, &self.config);
        match update_ball(&mut self.state, &self.config) {
            BallOutcome::LifeLost => {
                log::info!("Ball lost, {} lives left", self.state.lives);
            }
            BallOutcome::OutOfLives => {
                log::info!("Game over, final score {}", self.state.score);
            }
            _ => {}
        }
        if self.state.phase == GamePhase::Running {
            collide_bricks(&mut self.state, &self.config);
            if self.state.phase == GamePhase::Won {
                log::info!("All bricks cleared, final score {}", self.state.score);
            }
        }

        self.render();
        self.reporter.report_score(self.state.score);
        self.reporter.report_lives(self.state.lives);

        match self.state.phase {
            GamePhase::GameOver => {
                let subtext = format!("Score: {}", self.state.score);
                self.renderer.draw_banner("GAME OVER", &subtext);
            }
            GamePhase::Won => {
                let subtext = format!("Score: {}", self.state.score);
                self.renderer.draw_banner("YOU WIN!", &subtext);
            }
            _ => {}
        }
    }

    fn render(&mut self) {
        let r = &mut self.renderer;
        r.clear();
        for brick in self.state.bricks.alive() {
            r.draw_brick(brick.rect, brick.color);
        }
        r.draw_paddle(self.state.paddle.rect());
        r.draw_ball(self.state.ball.pos, self.state.ball.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameRecorder;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};
    use crate::sim::state::BrickStatus;
    use proptest::prelude::*;

    type TestEngine = GameEngine<FrameRecorder, FrameRecorder>;

    fn engine() -> TestEngine {
        GameEngine::new(
            GameConfig::default(),
            FrameRecorder::new(),
            FrameRecorder::new(),
            ScriptedRandom::constant(1.5),
        )
        .expect("default config is valid")
    }

    fn running_engine() -> TestEngine {
        let mut e = engine();
        e.start();
        e
    }

    /// Free ball somewhere harmless in the middle of the board
    fn free_ball(e: &mut TestEngine, pos: Vec2, vel: Vec2) {
        let s = e.state_mut();
        s.ball.on_paddle = false;
        s.ball.pos = pos;
        s.ball.vel = vel;
    }

    fn destroy_all_but(e: &mut TestEngine, column: usize, row: usize) {
        for brick in e.state_mut().bricks.iter_mut() {
            if (brick.column, brick.row) != (column, row) {
                brick.status = BrickStatus::Destroyed;
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig {
            board_height: -1.0,
            ..Default::default()
        };
        let result = GameEngine::new(
            config,
            FrameRecorder::new(),
            FrameRecorder::new(),
            SeededRandom::new(1),
        );
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut e = engine();
        assert_eq!(e.phase(), GamePhase::Idle);
        let before = e.state().clone();
        e.tick();
        assert_eq!(e.state(), &before);
        assert_eq!(e.renderer().frames, 0);
        assert_eq!(e.reporter().reports, 0);
    }

    #[test]
    fn test_start_resets_to_fresh_run() {
        let e = running_engine();
        let s = e.state();
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.bricks.alive_count(), 40);
        assert!(s.ball.on_paddle);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut e = running_engine();
        e.state_mut().score = 50;
        e.start();
        assert_eq!(e.state().score, 50);
        e.toggle_pause();
        e.start();
        assert_eq!(e.phase(), GamePhase::Paused);
        assert_eq!(e.state().score, 50);
    }

    #[test]
    fn test_double_toggle_pause_restores_state() {
        let mut e = running_engine();
        e.launch();
        e.tick();
        let before = e.state().clone();
        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::Paused);
        e.toggle_pause();
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn test_toggle_pause_from_idle_is_noop() {
        let mut e = engine();
        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_paused_tick_does_not_simulate() {
        let mut e = running_engine();
        e.launch();
        e.toggle_pause();
        let before = e.state().clone();
        for _ in 0..10 {
            e.tick();
        }
        assert_eq!(e.state(), &before);
    }

    #[test]
    fn test_launch_velocity() {
        let mut e = running_engine();
        e.launch();
        let ball = &e.state().ball;
        assert!(!ball.on_paddle);
        assert_eq!(ball.vel, Vec2::new(1.5, -4.0));
    }

    #[test]
    fn test_seeded_launch_dx_is_bounded() {
        for seed in 0..50 {
            let mut e = GameEngine::new(
                GameConfig::default(),
                FrameRecorder::new(),
                FrameRecorder::new(),
                SeededRandom::new(seed),
            )
            .expect("valid");
            e.start();
            e.launch();
            let vel = e.state().ball.vel;
            assert!((-3.0..3.0).contains(&vel.x));
            assert_eq!(vel.y, -4.0);
        }
    }

    #[test]
    fn test_launch_is_noop_when_ball_free_or_not_running() {
        let mut e = engine();
        e.launch();
        assert!(e.state().ball.on_paddle);

        let mut e = running_engine();
        e.launch();
        let vel = e.state().ball.vel;
        e.state_mut().ball.vel = vel * 2.0;
        e.launch();
        assert_eq!(e.state().ball.vel, vel * 2.0);
    }

    #[test]
    fn test_key_events_drive_paddle() {
        let mut e = running_engine();
        let x0 = e.state().paddle.x;
        e.handle(InputEvent::KeyDown(KeyCode::Right));
        e.tick();
        e.tick();
        assert_eq!(e.state().paddle.x, x0 + 2.0 * e.config().paddle_speed);
        e.handle(InputEvent::KeyUp(KeyCode::Right));
        e.tick();
        assert_eq!(e.state().paddle.x, x0 + 2.0 * e.config().paddle_speed);
        // Carried ball tracks the paddle
        assert_eq!(e.state().ball.pos.x, e.state().paddle.center_x());
    }

    #[test]
    fn test_move_buttons_nudge_and_clamp() {
        let mut e = running_engine();
        for _ in 0..200 {
            e.move_left();
        }
        assert_eq!(e.state().paddle.x, 0.0);
        assert_eq!(e.state().ball.pos.x, e.state().paddle.center_x());
        e.move_right();
        assert_eq!(e.state().paddle.x, e.config().paddle_speed);

        let mut idle = engine();
        let x0 = idle.state().paddle.x;
        idle.move_left();
        assert_eq!(idle.state().paddle.x, x0);
    }

    #[test]
    fn test_restart_clears_held_keys() {
        let mut e = running_engine();
        e.key_down(KeyCode::Left);
        e.state_mut().phase = GamePhase::GameOver;
        e.start();
        assert!(!e.state().input.left);
    }

    #[test]
    fn test_ball_drop_loses_life_and_reattaches() {
        let mut e = running_engine();
        // Paddle far right, ball below the board on the left
        e.state_mut().paddle.x = e.config().paddle_max_x();
        let h = e.config().board_height;
        free_ball(&mut e, Vec2::new(100.0, h + 5.0), Vec2::new(0.0, 4.0));
        e.tick();

        let s = e.state();
        assert_eq!(s.lives, 2);
        assert!(s.ball.on_paddle);
        assert_eq!(s.ball.pos.x, s.paddle.center_x());
        assert_eq!(s.ball.pos.y, s.paddle.y - s.ball.radius);
        assert_eq!(s.phase, GamePhase::Running);
    }

    #[test]
    fn test_ball_drop_under_paddle_loses_life() {
        let mut e = running_engine();
        let x = e.state().paddle.center_x();
        let h = e.config().board_height;
        free_ball(&mut e, Vec2::new(x, h + 5.0), Vec2::new(0.0, 4.0));
        e.tick();

        let s = e.state();
        assert_eq!(s.lives, 2);
        assert!(s.ball.on_paddle);
        assert_eq!(s.ball.pos, Vec2::new(s.paddle.center_x(), s.paddle.y - s.ball.radius));
    }

    #[test]
    fn test_ball_below_paddle_band_keeps_falling() {
        let mut e = running_engine();
        let paddle = e.state().paddle.rect();
        let radius = e.state().ball.radius;
        // Directly under the paddle, top edge already past its bottom
        free_ball(
            &mut e,
            Vec2::new(paddle.x + paddle.width / 2.0, paddle.bottom() + radius + 4.0),
            Vec2::new(0.0, 4.0),
        );
        e.tick();
        assert_eq!(e.state().ball.vel, Vec2::new(0.0, 4.0));
        assert!(!e.state().ball.on_paddle);
        assert_eq!(e.state().lives, 3);
    }

    #[test]
    fn test_single_brick_hit() {
        let mut e = running_engine();
        let rect = e.state().bricks.get(0, 0).map(|b| b.rect).expect("brick");
        // Ball centred inside brick (0,0) after moving up by 4
        free_ball(
            &mut e,
            Vec2::new(rect.x + rect.width / 2.0, rect.y + 4.0 + 4.0),
            Vec2::new(0.0, -4.0),
        );
        e.tick();

        let s = e.state();
        assert_eq!(
            s.bricks.get(0, 0).map(|b| b.status),
            Some(BrickStatus::Destroyed)
        );
        assert_eq!(s.bricks.alive_count(), 39);
        assert_eq!(s.score, 10);
        assert_eq!(s.ball.vel.y, 4.0);
        assert_eq!(e.reporter().score, Some(10));
        assert_eq!(e.renderer().bricks_drawn(), 39);
    }

    #[test]
    fn test_last_brick_wins_and_freezes() {
        let mut e = running_engine();
        destroy_all_but(&mut e, 3, 2);
        let rect = e.state().bricks.get(3, 2).map(|b| b.rect).expect("brick");
        free_ball(
            &mut e,
            Vec2::new(rect.x + 10.0, rect.bottom() + 6.0),
            Vec2::new(0.0, -4.0),
        );
        e.tick();
        assert_eq!(e.phase(), GamePhase::Won);
        assert_eq!(e.state().score, 10);
        assert_eq!(e.renderer().banners.len(), 1);
        assert_eq!(e.renderer().banners[0].0, "YOU WIN!");

        let frozen = e.state().clone();
        let frames = e.renderer().frames;
        for _ in 0..5 {
            e.tick();
        }
        assert_eq!(e.state(), &frozen);
        assert_eq!(e.renderer().frames, frames);
        assert_eq!(e.renderer().banners.len(), 1);
    }

    #[test]
    fn test_out_of_lives_game_over_and_freezes() {
        let mut e = running_engine();
        e.state_mut().paddle.x = 0.0;
        let (w, h) = (e.config().board_width, e.config().board_height);
        for expected in [2, 1, 0] {
            free_ball(&mut e, Vec2::new(w - 50.0, h + 5.0), Vec2::new(0.0, 4.0));
            e.tick();
            assert_eq!(e.state().lives, expected);
        }
        assert_eq!(e.phase(), GamePhase::GameOver);
        assert_eq!(e.reporter().lives, Some(0));
        assert_eq!(
            e.renderer().banners,
            vec![("GAME OVER".to_string(), "Score: 0".to_string())]
        );

        let frozen = e.state().clone();
        e.tick();
        e.launch();
        e.toggle_pause();
        e.move_right();
        assert_eq!(e.state(), &frozen);
        assert_eq!(e.renderer().banners.len(), 1);
    }

    #[test]
    fn test_restart_after_game_over_matches_fresh_start() {
        let fresh = running_engine();

        let mut e = running_engine();
        e.state_mut().score = 120;
        e.state_mut().lives = 1;
        for brick in e.state_mut().bricks.iter_mut().take(12) {
            brick.status = BrickStatus::Destroyed;
        }
        e.state_mut().phase = GamePhase::GameOver;

        e.start();
        assert_eq!(e.state(), fresh.state());
    }

    #[test]
    fn test_render_order_each_tick() {
        use crate::renderer::DrawCommand;

        let mut e = running_engine();
        e.tick();
        let frame = &e.renderer().frame;
        assert_eq!(frame.len(), 42);
        assert!(matches!(frame[40], DrawCommand::Paddle { .. }));
        assert!(matches!(frame[41], DrawCommand::Ball { .. }));
        assert_eq!(e.reporter().lives, Some(3));
    }

    #[test]
    fn test_fast_ball_tunnels_through_brick() {
        let mut e = running_engine();
        let rect = e.state().bricks.get(0, 4).map(|b| b.rect).expect("brick");
        // Jumps from below the row-4 brick to above it in one tick
        free_ball(
            &mut e,
            Vec2::new(rect.x + 40.0, rect.bottom() + 9.0),
            Vec2::new(0.0, -(rect.height + 19.0)),
        );
        e.tick();
        assert_eq!(
            e.state().bricks.get(0, 4).map(|b| b.status),
            Some(BrickStatus::Alive)
        );
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_board(keys in prop::collection::vec(0u8..6, 1..400)) {
            let mut e = running_engine();
            let max_x = e.config().paddle_max_x();
            for k in keys {
                match k {
                    0 => e.key_down(KeyCode::Left),
                    1 => e.key_up(KeyCode::Left),
                    2 => e.key_down(KeyCode::Right),
                    3 => e.key_up(KeyCode::Right),
                    4 => e.move_left(),
                    _ => e.move_right(),
                }
                e.tick();
                let x = e.state().paddle.x;
                prop_assert!((0.0..=max_x).contains(&x));
            }
        }

        #[test]
        fn prop_lives_never_increase(
            seed in any::<u64>(),
            steps in prop::collection::vec(0u8..4, 1..600),
        ) {
            let mut e = GameEngine::new(
                GameConfig::default(),
                FrameRecorder::new(),
                FrameRecorder::new(),
                SeededRandom::new(seed),
            ).expect("valid");
            e.start();
            let mut lives = e.state().lives;
            for step in steps {
                match step {
                    0 => e.launch(),
                    1 => e.key_down(KeyCode::Left),
                    2 => e.key_down(KeyCode::Right),
                    _ => e.key_up(KeyCode::Left),
                }
                e.tick();
                prop_assert!(e.state().lives <= lives);
                lives = e.state().lives;
            }
        }
    }
}
