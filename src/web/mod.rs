//! Browser host: owns the DOM side of the game and drives [`Game`] from
//! requestAnimationFrame plus two interval timers (pipe spawns, bird animation).
//!
//! All callbacks run on the page's single JS thread and each one runs to
//! completion, so the shared state lives in a thread-local `RefCell`.

mod audio;
mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::input::{Input, key_input, suppresses_default};
use audio::AudioBank;
use canvas::{CanvasSurface, load_image};

const CANVAS_ID: &str = "board";
const TOP_PIPE_SRC: &str = "./flappy-bird/toppipe.png";
const BOTTOM_PIPE_SRC: &str = "./flappy-bird/bottompipe.png";

fn bird_frame_src(frame: usize) -> String {
    format!("./flappy-bird/flappybird{frame}.png")
}

struct Host {
    game: Game,
    surface: CanvasSurface,
    audio: AudioBank,
    rng: SmallRng,
}

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
}

fn with_host(f: impl FnOnce(&mut Host)) {
    HOST.with(|cell| {
        if let Some(host) = cell.borrow_mut().as_mut() {
            f(host);
        }
    });
}

/// Sets up canvas, assets, listeners and timers, then starts the render loop.
/// `make_config` receives the current viewport size.
pub fn start(
    make_config: impl FnOnce(f64, f64) -> Result<GameConfig, GameError>,
) -> Result<(), GameError> {
    let win = window().ok_or(GameError::MissingElement("window"))?;
    let doc = win.document().ok_or(GameError::MissingElement("document"))?;

    let (width, height) = viewport_size(&win)?;
    let config = make_config(width, height)?;

    let canvas = board_canvas(&doc)?;
    let bird_frames = (0..config.bird_frames)
        .map(|i| load_image(&bird_frame_src(i)))
        .collect::<Result<Vec<_>, _>>()?;
    let surface = CanvasSurface::new(
        canvas.clone(),
        bird_frames,
        load_image(TOP_PIPE_SRC)?,
        load_image(BOTTOM_PIPE_SRC)?,
    )?;
    surface.resize(config.board_width, config.board_height);

    let audio = AudioBank::load()?;

    let spawn_ms = config.spawn_interval_ms;
    let frame_ms = config.frame_interval_ms;
    let game = Game::new(config)?;

    HOST.with(|cell| {
        cell.replace(Some(Host {
            game,
            surface,
            audio,
            rng: SmallRng::from_entropy(),
        }))
    });

    install_listeners(&win, &doc, &canvas)?;
    every(&win, spawn_ms, || {
        with_host(|host| {
            host.game.spawn(&mut host.rng);
        })
    })?;
    every(&win, frame_ms, || with_host(|host| host.game.animate()))?;
    start_loop();

    log::info!("game started on a {width}x{height} board");
    Ok(())
}

fn viewport_size(win: &Window) -> Result<(f64, f64), GameError> {
    let width = win
        .inner_width()?
        .as_f64()
        .ok_or(GameError::MissingElement("window.innerWidth"))?;
    let height = win
        .inner_height()?
        .as_f64()
        .ok_or(GameError::MissingElement("window.innerHeight"))?;
    Ok((width, height))
}

/// Reuses `<canvas id="board">` when the page provides one, otherwise appends it.
fn board_canvas(doc: &Document) -> Result<HtmlCanvasElement, GameError> {
    if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        return el
            .dyn_into()
            .map_err(|_| GameError::MissingElement("#board is not a canvas"));
    }
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| GameError::MissingElement("canvas element"))?;
    canvas.set_id(CANVAS_ID);
    canvas
        .set_attribute("style", "position:fixed; left:0; top:0; display:block;")
        .ok();
    doc.body()
        .ok_or(GameError::MissingElement("document body"))?
        .append_child(&canvas)?;
    Ok(canvas)
}

fn install_listeners(
    win: &Window,
    doc: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), GameError> {
    // Keyboard: flap / restart
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let code = evt.code();
            if key_input(&code) != Input::Activate {
                return;
            }
            if suppresses_default(&code) {
                evt.prevent_default();
            }
            with_host(|host| host.game.activate(&mut host.audio));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer: flap / restart
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_host(|host| host.game.activate(&mut host.audio));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize: follow the viewport
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            match viewport_size(&win) {
                Ok((w, h)) => with_host(|host| {
                    if host.game.resize(w, h) {
                        host.surface.resize(w, h);
                    }
                }),
                Err(err) => log::warn!("resize: {err}"),
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Runs `f` every `period_ms` for the lifetime of the page.
fn every(win: &Window, period_ms: u32, mut f: impl FnMut() + 'static) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move || f()) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        i32::try_from(period_ms).unwrap_or(i32::MAX),
    )?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_host(|host| {
            let Host {
                game,
                surface,
                audio,
                ..
            } = host;
            game.tick(ts, surface, audio);
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    let Some(win) = window() else { return };
    if let Some(closure) = callback.borrow().as_ref() {
        if let Err(err) = win.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", err);
        }
    }
}
