//! End-to-end tests: recording on disk -> align -> background removal.

use std::fs;
use std::path::Path;

use depth_clip::BACKGROUND_FILL;
use depth_clip::Error;
use depth_clip::align::AlignToColor;
use depth_clip::clipping::ClippingDistance;
use depth_clip::colorize::Colorizer;
use depth_clip::session::{ControlKey, KeyAction, Session, run_cycle};
use depth_clip::source::{DEVICE_FILE, FrameSource, RecordedPipeline};
use image::{ImageBuffer, Luma, Rgb};
use tempfile::TempDir;

const FG: [u8; 3] = [200, 40, 10];

fn write_recording(
    dir: &Path,
    device_json: &str,
    depth: &[u16],
    (dw, dh): (u32, u32),
    (cw, ch): (u32, u32),
) {
    fs::write(dir.join(DEVICE_FILE), device_json).unwrap();
    ImageBuffer::<Rgb<u8>, _>::from_pixel(cw, ch, Rgb(FG))
        .save(dir.join("0000_color.png"))
        .unwrap();
    ImageBuffer::<Luma<u16>, _>::from_raw(dw, dh, depth.to_vec())
        .unwrap()
        .save(dir.join("0000_depth.png"))
        .unwrap();
}

const D435: &str = r#"{
    "name": "Intel RealSense D435",
    "serial": "000000000001",
    "sensors": [
        { "kind": "depth", "name": "Stereo Module", "depth_scale": 0.001 },
        { "kind": "color", "name": "RGB Camera" },
        { "kind": "motion", "name": "Motion Module" }
    ]
}"#;

#[test]
fn test_two_by_two_scenario_from_disk() {
    let dir = TempDir::new().unwrap();
    write_recording(dir.path(), D435, &[0, 100, 250, 500], (2, 2), (2, 2));

    let mut pipe = RecordedPipeline::open(dir.path(), false).unwrap();
    let scale = pipe.device().require_depth_scale().unwrap();
    let session = Session::new(scale, ClippingDistance::new(0.3));

    let out = run_cycle(&mut pipe, &AlignToColor, &session).expect("frame should survive");

    let masked = [BACKGROUND_FILL; 3];
    assert_eq!(out.color.pixel(0, 0).unwrap(), &masked);
    assert_eq!(out.color.pixel(1, 0).unwrap(), &FG);
    assert_eq!(out.color.pixel(0, 1).unwrap(), &FG);
    assert_eq!(out.color.pixel(1, 1).unwrap(), &masked);

    assert!(run_cycle(&mut pipe, &AlignToColor, &session).is_none());
    assert!(pipe.is_finished());
}

#[test]
fn test_low_resolution_depth_is_aligned_before_masking() {
    let dir = TempDir::new().unwrap();
    // Left column near, right column far; color is twice the depth resolution.
    write_recording(dir.path(), D435, &[500, 3000, 500, 3000], (2, 2), (4, 4));

    let mut pipe = RecordedPipeline::open(dir.path(), false).unwrap();
    let session = Session::new(0.001, ClippingDistance::new(1.0));

    let out = run_cycle(&mut pipe, &AlignToColor, &session).unwrap();

    assert_eq!(out.depth.dimensions(), (4, 4));
    for y in 0..4 {
        assert_eq!(out.color.pixel(0, y).unwrap(), &FG);
        assert_eq!(out.color.pixel(3, y).unwrap(), &[BACKGROUND_FILL; 3]);
    }

    let thumb = Colorizer::new().colorize(&out.depth);
    assert_eq!(thumb.dimensions(), (4, 4));
}

#[test]
fn test_key_presses_widen_the_kept_region() {
    let dir = TempDir::new().unwrap();
    write_recording(dir.path(), D435, &[1250], (1, 1), (1, 1));

    let mut pipe = RecordedPipeline::open(dir.path(), true).unwrap();
    let mut session = Session::new(0.001, ClippingDistance::default());

    let before = run_cycle(&mut pipe, &AlignToColor, &session).unwrap();
    assert_eq!(before.color.data, vec![BACKGROUND_FILL; 3]);

    for _ in 0..3 {
        session.on_key(ControlKey::Up, KeyAction::Press);
        session.on_key(ControlKey::Up, KeyAction::Release);
    }
    let after = run_cycle(&mut pipe, &AlignToColor, &session).unwrap();
    assert_eq!(after.color.data, FG.to_vec());
}

#[test]
fn test_device_without_depth_sensor_is_fatal() {
    let dir = TempDir::new().unwrap();
    let color_only = r#"{ "name": "webcam", "sensors": [{ "kind": "color", "name": "RGB" }] }"#;
    write_recording(dir.path(), color_only, &[1], (1, 1), (1, 1));

    let pipe = RecordedPipeline::open(dir.path(), false).unwrap();

    let err = pipe.device().require_depth_scale().unwrap_err();
    assert!(matches!(err, Error::NoDepthSensor));
    assert_eq!(err.to_string(), "Device does not have a depth sensor");
}
