//! An interactive force-composition visualizer written in Rust.
//!
//! The user drags force vectors onto a canvas and the application sums them
//! in real time, displaying each force's magnitude, angle and components
//! together with the resultant. Rendering uses SDL2 with the gfx and ttf
//! extensions; all geometry lives in the board and vector modules.

mod board;
mod force;

use crate::board::Board;
use anyhow::{Context, Result, anyhow};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::ttf::{Font, Sdl2TtfContext};
use std::time::Duration;

/// Window title displayed in the title bar
const TITLE: &str = "Force Composition in Rust";
/// Default width of the canvas in pixels
const DEFAULT_WIDTH: u32 = 1200;
/// Default height of the canvas in pixels
const DEFAULT_HEIGHT: u32 = 800;
/// Background color for the canvas
const BACKGROUND: Color = Color::WHITE;
/// Point size of the body font
const FONT_SIZE: u16 = 16;
/// Point size of the panel title font
const TITLE_FONT_SIZE: u16 = 24;
/// Candidate font files probed in order at startup
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
];

/// Reads the optional `WIDTH HEIGHT` command-line arguments.
///
/// Both must be present and parse as positive integers; anything else falls
/// back to the 1200x800 default.
fn canvas_size() -> (u32, u32) {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [width, height] = args.as_slice() {
        match (width.parse::<u32>(), height.parse::<u32>()) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => return (w, h),
            _ => log::warn!("ignoring invalid canvas size {width}x{height}"),
        }
    }
    (DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

/// Loads the first available candidate font at the given point size.
///
/// # Arguments
///
/// * `ttf` - The SDL2 ttf context
/// * `size` - Point size to load the font at
fn load_font(ttf: &Sdl2TtfContext, size: u16) -> Result<Font<'_, 'static>> {
    for path in FONT_PATHS {
        match ttf.load_font(path, size) {
            Ok(font) => {
                log::info!("using font {path} at {size}pt");
                return Ok(font);
            }
            Err(err) => log::debug!("font {path} unavailable: {err}"),
        }
    }
    Err(anyhow!("no usable font among {FONT_PATHS:?}"))
}

/// Main entry point for the force-composition visualizer.
///
/// Initializes SDL2, creates the window and rendering context, and runs the
/// event loop at 60 FPS, feeding pointer and keyboard events to the board.
fn main() -> Result<()> {
    env_logger::init();

    let (width, height) = canvas_size();

    // Initialize SDL2 subsystems
    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    let ttf_context =
        sdl2::ttf::init().map_err(|e| anyhow!("failed to init ttf: {e}"))?;

    // Create window and fonts
    let window = video_subsystem
        .window(TITLE, width, height)
        .position_centered()
        .build()
        .context("failed to create window")?;
    let font = load_font(&ttf_context, FONT_SIZE)?;
    let title_font = load_font(&ttf_context, TITLE_FONT_SIZE)?;

    // Create rendering canvas
    let mut canvas = window
        .into_canvas()
        .build()
        .context("failed to create canvas")?;
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();
    canvas.present();

    let mut board = Board::new(width, height);
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    // Main loop
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => board.begin_primary_press([x, y]),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Right,
                    x,
                    y,
                    ..
                } => board.delete_at([x, y]),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => board.end_primary_press([x, y]),
                Event::MouseMotion { x, y, .. } => board.pointer_move([x, y]),
                Event::KeyDown {
                    keycode: Some(Keycode::C),
                    ..
                } => {
                    log::debug!("clearing all forces");
                    board.clear_all();
                }
                Event::KeyDown {
                    keycode: Some(Keycode::G),
                    ..
                } => {
                    board.toggle_grid();
                    log::debug!("grid {}", if board.show_grid { "on" } else { "off" });
                }
                Event::KeyDown {
                    keycode: Some(Keycode::H),
                    ..
                } => {
                    board.toggle_components();
                    log::debug!(
                        "components {}",
                        if board.show_components { "on" } else { "off" }
                    );
                }
                _ => {}
            }
        }

        // Recompute the resultant before the frame reads it
        board.update();

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        board.draw_frame(&mut canvas, &font, &title_font);
        canvas.present();
        // Target 60 FPS
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
