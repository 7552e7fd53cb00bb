// Recording fakes for the Surface / Audio seams, shared by the integration tests.
#![allow(dead_code)]

use flappy_wasm::{Audio, GameConfig, Rect, Sound, Sprite, Surface, TextAlign};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Sprite(Sprite, Rect),
    Text(String, TextAlign),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Calls since the most recent clear (i.e. the last rendered frame).
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite(s, _) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        self.calls.push(DrawCall::Sprite(sprite, rect));
    }

    fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _font_px: f64, align: TextAlign) {
        self.calls.push(DrawCall::Text(text.to_string(), align));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioCall {
    Play(Sound),
    StartMusic,
    StopMusic,
}

#[derive(Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
    pub music: bool,
}

impl RecordingAudio {
    pub fn count(&self, sound: Sound) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == AudioCall::Play(sound))
            .count()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.calls.push(AudioCall::Play(sound));
    }

    fn start_music(&mut self) {
        self.music = true;
        self.calls.push(AudioCall::StartMusic);
    }

    fn stop_music(&mut self) {
        self.music = false;
        self.calls.push(AudioCall::StopMusic);
    }

    fn music_playing(&self) -> bool {
        self.music
    }
}

pub const WIDTH: f64 = 500.0;
pub const HEIGHT: f64 = 600.0;

pub fn config() -> GameConfig {
    GameConfig::for_board(WIDTH, HEIGHT)
}
