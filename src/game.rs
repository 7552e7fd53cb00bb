//! Simulation context and the per-frame loop.
//!
//! `Game` owns every piece of mutable gameplay state (bird, pipes, score, phase).
//! It never touches the DOM: drawing and sound go through the [`Surface`] and
//! [`Audio`] traits so the host decides how they are realised.
//!
//! Per-frame order inside [`Game::step`]:
//! physics -> bird draw -> pipes (shift, draw, pass, collide) -> game over on hit or fall
//! -> prune -> overlay.
//! Pass and collision checks therefore always see this frame's bird and pipe positions.

use std::ops::ControlFlow;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::frames::FrameCycle;
use crate::geometry::Rect;
use crate::pipes::{PipeKind, PipePair, PipeStream};
use crate::scoring::{evaluate_collision, evaluate_pass};

pub const GAME_OVER_TEXT: &str = "GAME OVER";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    Floor,
    Collision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Wing,
    Hit,
    Point,
}

/// Image the host should blit. `Bird` carries the animation frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Bird(usize),
    TopPipe,
    BottomPipe,
}

impl From<PipeKind> for Sprite {
    fn from(kind: PipeKind) -> Self {
        match kind {
            PipeKind::Top => Sprite::TopPipe,
            PipeKind::Bottom => Sprite::BottomPipe,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge of the text.
    Start,
    /// `x` is the horizontal centre of the text.
    Center,
}

/// 2D drawing target the simulation renders into each frame.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect);
    /// Outlined overlay text.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, align: TextAlign);
}

/// Sound effects plus the looping background track.
pub trait Audio {
    fn play(&mut self, sound: Sound);
    /// Starts the background track from its current position.
    fn start_music(&mut self);
    /// Pauses the background track and rewinds it to the beginning.
    fn stop_music(&mut self);
    fn music_playing(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    pub rect: Rect,
    pub velocity_y: f64,
}

/// Reference ticks represented by `elapsed_ms` of wall time, capped at
/// `config.max_scale_factor`.
pub fn scale_factor(elapsed_ms: f64, config: &GameConfig) -> f64 {
    let ticks = elapsed_ms.max(0.0) / 1000.0 * config.reference_hz;
    ticks.min(config.max_scale_factor)
}

pub struct Game {
    config: GameConfig,
    board_width: f64,
    board_height: f64,
    bird: Bird,
    pipes: PipeStream,
    frames: FrameCycle<usize>,
    score: u32,
    phase: Phase,
    last_tick_ms: Option<f64>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let frames = FrameCycle::new((0..config.bird_frames).collect())?;
        Ok(Self {
            board_width: config.board_width,
            board_height: config.board_height,
            bird: Bird {
                rect: Rect::new(
                    config.bird_x,
                    config.bird_start_y,
                    config.bird_width,
                    config.bird_height,
                ),
                velocity_y: 0.0,
            },
            pipes: PipeStream::new(),
            frames,
            score: 0,
            phase: Phase::Running,
            last_tick_ms: None,
            config,
        })
    }

    /// Render-loop entry: derives the scale factor from the time since the previous
    /// call and runs one [`Game::step`]. The clock keeps running while the game is
    /// over so a restart does not integrate the idle time.
    pub fn tick<S, A>(&mut self, now_ms: f64, surface: &mut S, audio: &mut A)
    where
        S: Surface + ?Sized,
        A: Audio + ?Sized,
    {
        let scale = match self.last_tick_ms {
            Some(prev) => scale_factor(now_ms - prev, &self.config),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);
        self.step(scale, surface, audio);
    }

    /// Advances the simulation by `scale` reference ticks and draws the frame.
    /// While the game is over nothing moves and the last scene is redrawn.
    pub fn step<S, A>(&mut self, scale: f64, surface: &mut S, audio: &mut A)
    where
        S: Surface + ?Sized,
        A: Audio + ?Sized,
    {
        if self.phase == Phase::GameOver {
            self.render(surface);
            return;
        }

        surface.clear(self.board_width, self.board_height);

        self.bird.velocity_y += self.config.gravity * scale;
        self.bird.rect.y = (self.bird.rect.y + self.bird.velocity_y * scale).max(0.0);
        surface.draw_sprite(self.bird_sprite(), self.bird.rect);

        // a fall still lets this frame's pipes scroll and score
        let fell = self.bird.rect.y > self.board_height;

        let bird = self.bird.rect;
        let milestone = self.config.point_milestone;
        let mut collided = false;
        let score = &mut self.score;
        let advanced = self
            .pipes
            .advance_while(self.config.velocity_x * scale, |pair| {
                draw_pair(surface, pair);
                if evaluate_pass(pair, &bird) {
                    *score += 1;
                    if *score % milestone == 0 {
                        audio.play(Sound::Point);
                    }
                }
                if evaluate_collision(pair, &bird) {
                    collided = true;
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            });
        // pairs behind a collision keep their position but stay visible
        for pair in self.pipes.iter().skip(advanced) {
            draw_pair(surface, pair);
        }
        if collided {
            audio.play(Sound::Hit);
            self.end(GameOverCause::Collision, audio);
        } else if fell {
            self.end(GameOverCause::Floor, audio);
        }

        let pruned = self.pipes.prune();
        if pruned > 0 {
            log::trace!("pruned {pruned} pipe pair(s), {} live", self.pipes.len());
        }

        self.draw_overlay(surface);
    }

    /// Draws the current scene without changing any state.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.board_width, self.board_height);
        surface.draw_sprite(self.bird_sprite(), self.bird.rect);
        for pair in self.pipes.iter() {
            draw_pair(surface, pair);
        }
        self.draw_overlay(surface);
    }

    /// Player input (flap key or click). Restarts first when the game is over.
    pub fn activate<A: Audio + ?Sized>(&mut self, audio: &mut A) {
        if self.phase == Phase::GameOver {
            self.restart(audio);
        }
        if !audio.music_playing() {
            audio.start_music();
        }
        audio.play(Sound::Wing);
        self.bird.velocity_y = self.config.flap_impulse;
    }

    /// Back to the initial running state; the background track starts over.
    pub fn restart<A: Audio + ?Sized>(&mut self, audio: &mut A) {
        log::info!("restart (previous score {})", self.score);
        self.bird.rect.y = self.config.bird_start_y;
        self.bird.velocity_y = 0.0;
        self.pipes.reset();
        self.score = 0;
        self.phase = Phase::Running;
        audio.stop_music();
        audio.start_music();
    }

    /// Spawn-timer entry: appends a pair at the right edge with a random vertical
    /// offset. Does nothing once the game is over.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        let pipe_height = self.config.pipe_height;
        let offset: f64 = rng.gen_range(0.0..1.0);
        let top_y = self.config.pipe_base_y - pipe_height / 4.0 - offset * (pipe_height / 2.0);
        self.pipes.append(PipePair::new(
            self.board_width,
            top_y,
            self.config.pipe_width,
            pipe_height,
            self.config.opening(self.board_height),
        ));
        true
    }

    /// Animation-timer entry: shows the next bird frame.
    pub fn animate(&mut self) {
        self.frames.advance();
    }

    /// New play-area size. Affects later spawns, the floor and overlay layout;
    /// pipes already on screen keep their geometry. Returns `false` (and changes
    /// nothing) for a non-positive size, in which case the host keeps its canvas too.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {width}x{height}");
            return false;
        }
        log::debug!("board resized to {width}x{height}");
        self.board_width = width;
        self.board_height = height;
        true
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board_size(&self) -> (f64, f64) {
        (self.board_width, self.board_height)
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    pub fn pipes(&self) -> &PipeStream {
        &self.pipes
    }

    pub fn pipes_mut(&mut self) -> &mut PipeStream {
        &mut self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn frame_index(&self) -> usize {
        *self.frames.current()
    }

    fn bird_sprite(&self) -> Sprite {
        Sprite::Bird(*self.frames.current())
    }

    fn end<A: Audio + ?Sized>(&mut self, cause: GameOverCause, audio: &mut A) {
        if self.phase == Phase::GameOver {
            return;
        }
        log::info!("game over ({cause:?}) with score {}", self.score);
        self.phase = Phase::GameOver;
        audio.stop_music();
    }

    fn draw_overlay<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (w, h) = (self.board_width, self.board_height);
        surface.draw_text(
            &self.score.to_string(),
            w / 2.0,
            h / 6.0,
            self.config.score_font_px(w),
            TextAlign::Start,
        );
        if self.phase == Phase::GameOver {
            surface.draw_text(
                GAME_OVER_TEXT,
                w / 2.0,
                h / 3.5,
                self.config.banner_font_px(w),
                TextAlign::Center,
            );
        }
    }
}

fn draw_pair<S: Surface + ?Sized>(surface: &mut S, pair: &PipePair) {
    for pipe in pair.pipes() {
        surface.draw_sprite(pipe.kind.into(), pipe.rect);
    }
}
