//! Tunables for one game session. Sizes and speeds scale with the board size
//! the page had at startup; the rest are fixed constants.

use crate::error::GameError;

/// Bird sprite aspect (height / width) of the source artwork.
const BIRD_ASPECT: f64 = 34.0 / 44.0;
/// Pipe sprite aspect (height / width) of the source artwork.
const PIPE_ASPECT: f64 = 2072.0 / 450.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub board_width: f64,
    pub board_height: f64,

    pub bird_x: f64,
    pub bird_start_y: f64,
    pub bird_width: f64,
    pub bird_height: f64,

    pub pipe_width: f64,
    pub pipe_height: f64,
    /// Baseline y the random top-pipe offset is measured from.
    pub pipe_base_y: f64,
    /// Fraction of the board height left open between the pipes of a pair.
    pub opening_ratio: f64,

    /// Horizontal scroll per reference tick (negative = leftward).
    pub velocity_x: f64,
    /// Downward acceleration per reference tick.
    pub gravity: f64,
    /// Vertical velocity set by a flap (negative = upward).
    pub flap_impulse: f64,

    pub spawn_interval_ms: u32,
    pub frame_interval_ms: u32,
    pub bird_frames: usize,

    /// Tick rate the per-tick constants above are tuned for.
    pub reference_hz: f64,
    /// Upper bound on reference ticks integrated by one frame.
    pub max_scale_factor: f64,
    /// The point sound plays whenever the score is a multiple of this.
    pub point_milestone: u32,
}

impl GameConfig {
    pub fn for_board(width: f64, height: f64) -> Self {
        let bird_width = width / 25.0;
        let pipe_width = width / 12.0;
        Self {
            board_width: width,
            board_height: height,
            bird_x: width / 8.0,
            bird_start_y: height / 2.0,
            bird_width,
            bird_height: bird_width * BIRD_ASPECT,
            pipe_width,
            pipe_height: pipe_width * PIPE_ASPECT,
            pipe_base_y: 0.0,
            opening_ratio: 1.0 / 3.0,
            velocity_x: -width / 250.0,
            gravity: 0.4,
            flap_impulse: -6.0,
            spawn_interval_ms: 850,
            frame_interval_ms: 100,
            bird_frames: 4,
            reference_hz: 60.0,
            max_scale_factor: 3.0,
            point_milestone: 5,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        positive("board_width", self.board_width)?;
        positive("board_height", self.board_height)?;
        positive("bird_width", self.bird_width)?;
        positive("bird_height", self.bird_height)?;
        positive("pipe_width", self.pipe_width)?;
        positive("pipe_height", self.pipe_height)?;
        positive("reference_hz", self.reference_hz)?;
        positive("max_scale_factor", self.max_scale_factor)?;
        finite("bird_x", self.bird_x)?;
        finite("bird_start_y", self.bird_start_y)?;
        finite("pipe_base_y", self.pipe_base_y)?;
        finite("opening_ratio", self.opening_ratio)?;
        finite("velocity_x", self.velocity_x)?;
        finite("gravity", self.gravity)?;
        finite("flap_impulse", self.flap_impulse)?;
        if self.opening_ratio < 0.0 {
            return Err(GameError::InvalidConfig {
                field: "opening_ratio",
                reason: "must not be negative",
            });
        }
        for (field, value) in [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
            ("point_milestone", self.point_milestone),
        ] {
            if value == 0 {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: "must be non-zero",
                });
            }
        }
        if self.bird_frames == 0 {
            return Err(GameError::EmptyFrameSet);
        }
        Ok(())
    }

    /// Vertical gap between a pair's pipes for a board of the given height.
    pub fn opening(&self, board_height: f64) -> f64 {
        board_height * self.opening_ratio
    }

    /// Score text size for a board of the given width.
    pub fn score_font_px(&self, board_width: f64) -> f64 {
        board_width * 0.05
    }

    /// "GAME OVER" banner text size for a board of the given width.
    pub fn banner_font_px(&self, board_width: f64) -> f64 {
        board_width * 0.08
    }

    /// Parses a JSON object of overrides; fields it omits keep the
    /// [`GameConfig::for_board`] value.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str, width: f64, height: f64) -> Result<Self, GameError> {
        let base = serde_json::to_value(Self::for_board(width, height))?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(GameError::Config("expected a JSON object".to_string()));
        };
        let mut merged = base;
        if let serde_json::Value::Object(fields) = &mut merged {
            for (k, v) in overrides {
                fields.insert(k, v);
            }
        }
        let cfg: Self = serde_json::from_value(merged)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), GameError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: "must be finite",
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), GameError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            reason: "must be positive",
        })
    }
}
