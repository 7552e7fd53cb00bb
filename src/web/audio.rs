//! `Audio` implementation over `<audio>` elements.

use web_sys::HtmlAudioElement;

use crate::error::GameError;
use crate::game::{Audio, Sound};

const WING_SRC: &str = "./audio/sfx_wing.wav";
const HIT_SRC: &str = "./audio/sfx_hit.wav";
const POINT_SRC: &str = "./audio/sfx_point.wav";
const MUSIC_SRC: &str = "./audio/bgm_mario.mp3";

pub struct AudioBank {
    wing: HtmlAudioElement,
    hit: HtmlAudioElement,
    point: HtmlAudioElement,
    music: HtmlAudioElement,
}

impl AudioBank {
    pub fn load() -> Result<Self, GameError> {
        let music = HtmlAudioElement::new_with_src(MUSIC_SRC)?;
        music.set_loop(true);
        Ok(Self {
            wing: HtmlAudioElement::new_with_src(WING_SRC)?,
            hit: HtmlAudioElement::new_with_src(HIT_SRC)?,
            point: HtmlAudioElement::new_with_src(POINT_SRC)?,
            music,
        })
    }
}

impl Audio for AudioBank {
    fn play(&mut self, sound: Sound) {
        let clip = match sound {
            Sound::Wing => &self.wing,
            Sound::Hit => &self.hit,
            Sound::Point => &self.point,
        };
        // rewind so rapid repeats are audible
        clip.set_current_time(0.0);
        if let Err(err) = clip.play() {
            log::debug!("could not play {sound:?}: {err:?}");
        }
    }

    fn start_music(&mut self) {
        // An autoplay refusal rejects the returned promise and leaves the element
        // paused, so the next activation retries.
        if let Err(err) = self.music.play() {
            log::warn!("background music: {err:?}");
        }
    }

    fn stop_music(&mut self) {
        self.music.pause().ok();
        self.music.set_current_time(0.0);
    }

    fn music_playing(&self) -> bool {
        !self.music.paused()
    }
}
