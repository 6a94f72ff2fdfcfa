// What you SEE:
// • The recorded color stream, with everything farther than the clipping
//   distance (or without a depth reading) painted flat grey.
// • A small colorized depth view in the bottom-right corner.
// • Up / Down move the clipping distance by 10 cm. ESC quits.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};

use depth_clip::Error;
use depth_clip::align::AlignToColor;
use depth_clip::colorize::Colorizer;
use depth_clip::config::Args;
use depth_clip::draw::{Drawer, blit_rgb, draw_frame_outline, draw_text_5x7, layout};
use depth_clip::session::{Session, run_cycle};
use depth_clip::source::{FrameSource, RecordedPipeline};
use depth_clip::types::FrameBuffer;

const LETTERBOX: u32 = 0x00_20_20_20;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    args.validate()?;

    /* --- Source + device ---
       A recording without a depth sensor cannot be clipped: fatal. */
    let mut pipe = RecordedPipeline::open(&args.recording, args.looping)?.paced(args.fps)?;
    let depth_scale = pipe.device().require_depth_scale()?;
    info!("Depth scale: {depth_scale} m/unit");

    let mut session = Session::new(depth_scale, args.clipping());
    let aligner = AlignToColor;
    let colorizer = Colorizer::new();

    /* --- Window + reusable screen buffer --- */
    let mut drawer = Drawer::new("Depth Clip: Background Removal", args.width, args.height)?;
    let mut screen = FrameBuffer::new(args.width, args.height);

    info!("Press Up/Down to change the depth clipping distance.");

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs first, so this frame already uses the new distance. */
        for (key, action) in drawer.key_events() {
            session.on_key(key, action);
        }

        /* 2) Wait, align, mask. A dropped cycle just moves on to the next one. */
        let Some(aligned) = run_cycle(&mut pipe, &aligner, &session) else {
            if pipe.is_finished() {
                info!("Recording finished");
                break;
            }
            drawer.poll(); // keep the window responsive while frames drop
            continue;
        };

        /* 3) Compose: masked color fills the window, colorized depth as thumbnail. */
        let (main_rect, pip_rect) = layout(
            screen.width,
            screen.height,
            aligned.color.dimensions(),
            aligned.depth.dimensions(),
        );
        screen.fill(LETTERBOX);
        blit_rgb(&mut screen, &aligned.color, main_rect);

        let colorized = colorizer.colorize(&aligned.depth);
        blit_rgb(&mut screen, &colorized, pip_rect);
        draw_frame_outline(&mut screen, pip_rect, 0x00_FF_FF_FF);

        let hud = format!(
            "CLIP: {:.3} M | {} | UP/DOWN",
            session.clipping.get(),
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 4) Present to the window. */
        drawer.present(&screen)?;

        /* 5) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
