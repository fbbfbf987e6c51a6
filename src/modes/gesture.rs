use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::flavor::Oracle;
use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::gesture::{classify, Gesture, HandFrame};
use crate::input::{map_gesture, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::recognition::ProfileStore;
use crate::render::{GestureHud, Renderer};
use crate::tracker::FrameSource;

/// Consecutive frames a gesture must hold before it earns a flavor line.
const STABLE_FRAMES: u32 = 5;

/// Without a frame for this long, the hand counts as out of view.
const TRACKING_TIMEOUT: Duration = Duration::from_millis(500);

/// Snake steered by hand gestures from an external tracker.
///
/// Finger counts turn the snake, a held fist pauses it, and the keyboard
/// stays live as a fallback for steering, restart and quit.
pub struct GestureMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    source: Option<FrameSource>,
    oracle: Option<Oracle>,
    profiles: Option<ProfileStore>,
    hud: GestureHud,
    held_gesture: Option<String>,
    held_frames: u32,
    flavor_requested_for: Option<String>,
    last_frame: Option<Instant>,
    should_quit: bool,
}

impl GestureMode {
    pub fn new(
        config: GameConfig,
        source: FrameSource,
        oracle: Option<Oracle>,
        profiles: Option<ProfileStore>,
    ) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            source: Some(source),
            oracle,
            profiles,
            hud: GestureHud::default(),
            held_gesture: None,
            held_frames: 0,
            flavor_requested_for: None,
            last_frame: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Start the frame source before touching the terminal so startup
        // failures print normally
        let source = self.source.take().context("frame source already started")?;
        let frames = source.start().await?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, frames).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        mut frames: mpsc::Receiver<HandFrame>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frames_open = true;

        let (flavor_tx, mut flavor_rx) = mpsc::channel::<String>(8);

        let tick_interval = Duration::from_millis(self.engine.config().tick_ms);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Tracked hand frames
                maybe_frame = frames.recv(), if frames_open => {
                    match maybe_frame {
                        Some(frame) => {
                            self.identify_player(&frame);
                            let gesture = classify(&frame);
                            self.apply_gesture(gesture, &flavor_tx);
                        }
                        None => {
                            frames_open = false;
                            self.hud.tracking = false;
                            info!("frame source ended, keyboard remains live");
                        }
                    }
                }

                // Flavor lines coming back from the generator
                Some(line) = flavor_rx.recv() => {
                    self.hud.flavor = Some(line);
                }

                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.advance_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.refresh_tracking();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, Some(&self.hud));
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Feed one classified gesture into the game and the HUD.
    fn apply_gesture(&mut self, gesture: Gesture, flavor_tx: &mpsc::Sender<String>) {
        let input = map_gesture(&gesture);

        self.state.set_paused(input.pause);
        if let Some(direction) = input.heading {
            self.state.submit(Action::Move(direction));
        }

        self.track_stability(&gesture, flavor_tx);

        self.last_frame = Some(Instant::now());
        self.hud.tracking = true;
        self.hud.gesture = Some(gesture);
    }

    /// Put a name to the tracked hand when profiles are loaded.
    fn identify_player(&mut self, frame: &HandFrame) {
        let Some(store) = &self.profiles else {
            return;
        };

        let identity = store.identify(frame);
        if self.hud.player.as_ref() != Some(&identity) {
            info!("hand recognized as {}", identity.label());
            self.hud.player = Some(identity);
        }
    }

    /// Count consecutive frames of the same gesture; a newly stable hold
    /// earns one flavor request.
    fn track_stability(&mut self, gesture: &Gesture, flavor_tx: &mpsc::Sender<String>) {
        if self.held_gesture.as_deref() == Some(gesture.name.as_str()) {
            self.held_frames += 1;
        } else {
            self.held_gesture = Some(gesture.name.clone());
            self.held_frames = 1;
        }

        if self.held_frames == STABLE_FRAMES {
            debug!("gesture held steady: {}", gesture.name);
            self.maybe_request_flavor(gesture, flavor_tx);
        }
    }

    fn maybe_request_flavor(&mut self, gesture: &Gesture, flavor_tx: &mpsc::Sender<String>) {
        let Some(oracle) = &self.oracle else {
            return;
        };
        if self.flavor_requested_for.as_deref() == Some(gesture.name.as_str()) {
            return;
        }
        self.flavor_requested_for = Some(gesture.name.clone());

        let oracle = oracle.clone();
        let gesture = gesture.clone();
        let tx = flavor_tx.clone();
        tokio::spawn(async move {
            let line = oracle.flavor(&gesture).await;
            let _ = tx.send(line).await;
        });
    }

    fn refresh_tracking(&mut self) {
        if let Some(at) = self.last_frame {
            if at.elapsed() > TRACKING_TIMEOUT {
                self.hud.tracking = false;
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);

            match action {
                KeyAction::GameAction(action) => {
                    self.state.submit(action);
                }
                // The fist owns pausing here; a keyboard toggle would be
                // overridden by the next tracked frame's pause level
                KeyAction::TogglePause => {}
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn advance_game(&mut self) {
        let outcome = self.engine.tick(&mut self.state);
        if let Some(collision) = outcome.collision {
            info!(
                "game over: {:?} at score {} after {} ticks",
                collision, self.state.score, self.state.ticks
            );
        }
    }

    fn reset_game(&mut self) {
        self.metrics.on_restart(self.state.phase, self.state.score);
        self.state = self.engine.reset();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::gesture::landmarks::LANDMARK_COUNT;
    use crate::gesture::{Handedness, Landmark};
    use crate::recognition::Identity;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;
    use std::path::PathBuf;

    fn test_mode(oracle: Option<Oracle>) -> GestureMode {
        let source = FrameSource::Replay(PathBuf::from("unused.ndjson"));
        GestureMode::new(GameConfig::default(), source, oracle, None)
    }

    fn gesture(name: &str, extended_fingers: u8) -> Gesture {
        Gesture {
            name: name.to_string(),
            glyph: "✊",
            extended_fingers,
            confidence: 0.9,
            description: "test gesture",
        }
    }

    fn recorded_frame() -> HandFrame {
        let mut lm = [Landmark::default(); LANDMARK_COUNT];
        for (i, slot) in lm.iter_mut().enumerate() {
            *slot = Landmark::new(0.1 + i as f32 * 0.01, 0.5, 0.0);
        }
        HandFrame::new(lm, Handedness::Right)
    }

    fn recording_line() -> String {
        let landmarks: Vec<_> = recorded_frame()
            .landmarks
            .iter()
            .map(|lm| json!({ "x": lm.x, "y": lm.y, "z": lm.z }))
            .collect();
        json!({
            "hands": [{ "handedness": "Right", "score": 0.9, "landmarks": landmarks }]
        })
        .to_string()
    }

    #[test]
    fn test_fist_pauses_and_counts_steer() {
        let mut mode = test_mode(None);
        let (tx, _rx) = mpsc::channel(8);

        mode.apply_gesture(gesture("Fist", 0), &tx);
        assert!(mode.state.is_paused());

        mode.apply_gesture(gesture("Peace", 2), &tx);
        assert!(mode.state.is_running());
        assert_eq!(mode.state.snake.pending_heading, Direction::Down);

        assert!(mode.hud.tracking);
        assert_eq!(mode.hud.gesture.as_ref().unwrap().name, "Peace");
    }

    #[test]
    fn test_gesture_switch_resets_hold_counter() {
        let mut mode = test_mode(None);
        let (tx, _rx) = mpsc::channel(8);

        mode.apply_gesture(gesture("Peace", 2), &tx);
        mode.apply_gesture(gesture("Peace", 2), &tx);
        assert_eq!(mode.held_frames, 2);

        mode.apply_gesture(gesture("Rock", 2), &tx);
        assert_eq!(mode.held_frames, 1);
        assert_eq!(mode.held_gesture.as_deref(), Some("Rock"));
    }

    #[tokio::test]
    async fn test_stable_hold_requests_flavor_once() {
        let mut mode = test_mode(Some(Oracle::Canned));
        let (tx, mut rx) = mpsc::channel(8);

        for _ in 0..STABLE_FRAMES + 2 {
            mode.apply_gesture(gesture("Vulcan", 4), &tx);
        }

        let line = rx.recv().await.unwrap();
        assert_eq!(line, "Live long and slither.");
        assert!(rx.try_recv().is_err(), "flavor should be requested once");
    }

    #[tokio::test]
    async fn test_unstable_gestures_request_nothing() {
        let mut mode = test_mode(Some(Oracle::Canned));
        let (tx, mut rx) = mpsc::channel(8);

        for name in ["Peace", "Rock", "Peace", "Rock"] {
            mode.apply_gesture(gesture(name, 2), &tx);
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_restart_captures_high_score() {
        let mut mode = test_mode(None);
        mode.state.score = 30;
        mode.state.phase = crate::game::Phase::GameOver;

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
        assert_eq!(mode.metrics.high_score, 30);
    }

    #[test]
    fn test_keyboard_pause_is_inert_while_gestures_drive() {
        let mut mode = test_mode(None);
        let (tx, _rx) = mpsc::channel(8);
        let pause_key = Event::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));

        mode.handle_event(pause_key.clone()).unwrap();
        assert!(mode.state.is_running(), "only the fist pauses gesture play");

        mode.apply_gesture(gesture("Fist", 0), &tx);
        assert!(mode.state.is_paused());

        mode.handle_event(pause_key).unwrap();
        assert!(mode.state.is_paused());

        mode.apply_gesture(gesture("Peace", 2), &tx);
        assert!(mode.state.is_running());
    }

    #[test]
    fn test_keyboard_steering_stays_live() {
        let mut mode = test_mode(None);

        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        mode.handle_event(down).unwrap();
        assert_eq!(mode.state.snake.pending_heading, Direction::Down);
    }

    #[tokio::test]
    async fn test_recognized_player_lands_on_hud() {
        let dir = std::env::temp_dir().join(format!("gesture-profiles-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("alice.ndjson"), recording_line()).unwrap();

        let store = ProfileStore::load(&dir).await.unwrap();
        let source = FrameSource::Replay(PathBuf::from("unused.ndjson"));
        let mut mode = GestureMode::new(GameConfig::default(), source, None, Some(store));

        mode.identify_player(&recorded_frame());
        assert_eq!(mode.hud.player, Some(Identity::Player("Alice".to_string())));

        let blank = HandFrame::new([Landmark::default(); LANDMARK_COUNT], Handedness::Right);
        mode.identify_player(&blank);
        assert_eq!(mode.hud.player, Some(Identity::Unknown));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_identity_stays_off_the_hud_without_profiles() {
        let mut mode = test_mode(None);

        mode.identify_player(&recorded_frame());
        assert_eq!(mode.hud.player, None);
    }
}
