//! Per-run state shared by the key handler and the frame loop.

use log::{debug, info, warn};

use crate::align::Aligner;
use crate::clipping::ClippingDistance;
use crate::error::Error;
use crate::mask::{MaskStats, remove_background};
use crate::source::FrameSource;
use crate::types::AlignedFrameSet;

/// What happened to a key. Only `Press` moves the clipping distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKey {
    Up,
    Down,
    Other,
}

pub struct Session {
    depth_scale: f32,
    pub clipping: ClippingDistance,
}

impl Session {
    pub fn new(depth_scale: f32, clipping: ClippingDistance) -> Self {
        Self { depth_scale, clipping }
    }

    pub fn depth_scale(&self) -> f32 {
        self.depth_scale
    }

    /// Apply one key event. Returns true if it was a handled press.
    pub fn on_key(&mut self, key: ControlKey, action: KeyAction) -> bool {
        if action != KeyAction::Press {
            return false;
        }
        match key {
            ControlKey::Up => self.clipping.increment(),
            ControlKey::Down => self.clipping.decrement(),
            ControlKey::Other => return false,
        }
        info!("Depth clipping distance: {:.3}", self.clipping.get());
        true
    }

    /// Remove the background from the aligned color frame in place.
    pub fn process(&self, aligned: &mut AlignedFrameSet) -> Result<MaskStats, Error> {
        remove_background(
            &mut aligned.color,
            &aligned.depth,
            self.depth_scale,
            self.clipping.get(),
        )
    }
}

/// One capture cycle: wait, align, mask.
/// `None` means the cycle was dropped; frames are never retried.
pub fn run_cycle<S, A>(source: &mut S, aligner: &A, session: &Session) -> Option<AlignedFrameSet>
where
    S: FrameSource + ?Sized,
    A: Aligner + ?Sized,
{
    let frames = source.wait_for_frames()?;
    let index = frames.index;

    let Some(mut aligned) = aligner.process(frames) else {
        debug!("Dropped frame {index}: alignment failed");
        return None;
    };

    match session.process(&mut aligned) {
        Ok(stats) => {
            debug!(
                "Frame {index}: {:.1}% background",
                stats.masked_fraction() * 100.0
            );
            Some(aligned)
        }
        Err(e) => {
            warn!("Dropped frame {index}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignToColor;
    use crate::device::{Device, Sensor};
    use crate::mask::BACKGROUND_FILL;
    use crate::types::{ColorFrame, DepthFrame, FrameSet};
    use std::collections::VecDeque;

    struct Scripted {
        device: Device,
        queue: VecDeque<Option<FrameSet>>,
    }

    impl Scripted {
        fn new(queue: Vec<Option<FrameSet>>) -> Self {
            Self {
                device: Device {
                    name: "scripted".into(),
                    serial: None,
                    sensors: vec![Sensor::Depth { name: "d".into(), depth_scale: 0.001 }],
                },
                queue: queue.into(),
            }
        }
    }

    impl FrameSource for Scripted {
        fn device(&self) -> &Device {
            &self.device
        }
        fn wait_for_frames(&mut self) -> Option<FrameSet> {
            self.queue.pop_front().flatten()
        }
    }

    fn pair(index: u64, depth: Vec<u16>) -> FrameSet {
        let n = depth.len();
        FrameSet {
            index,
            depth: Some(DepthFrame::new(n, 1, depth).unwrap()),
            color: Some(ColorFrame::new(n, 1, 3, vec![1; n * 3]).unwrap()),
        }
    }

    #[test]
    fn only_presses_move_the_distance() {
        let mut session = Session::new(0.001, ClippingDistance::new(1.0));

        assert!(!session.on_key(ControlKey::Up, KeyAction::Release));
        assert!(!session.on_key(ControlKey::Up, KeyAction::Repeat));
        assert!(!session.on_key(ControlKey::Other, KeyAction::Press));
        assert_eq!(session.clipping.get(), 1.0);

        assert!(session.on_key(ControlKey::Up, KeyAction::Press));
        assert!(session.on_key(ControlKey::Up, KeyAction::Press));
        assert!(session.on_key(ControlKey::Down, KeyAction::Press));
        assert!((session.clipping.get() - 1.1).abs() < 1e-4);
    }

    #[test]
    fn key_change_affects_next_frame() {
        let mut session = Session::new(0.001, ClippingDistance::new(1.0));
        let mut source = Scripted::new(vec![
            Some(pair(0, vec![1050])),
            Some(pair(1, vec![1050])),
        ]);

        let first = run_cycle(&mut source, &AlignToColor, &session).unwrap();
        assert_eq!(first.color.data, vec![BACKGROUND_FILL; 3]);

        session.on_key(ControlKey::Up, KeyAction::Press);
        let second = run_cycle(&mut source, &AlignToColor, &session).unwrap();
        assert_eq!(second.color.data, vec![1; 3]);
    }

    struct Careless;

    impl Aligner for Careless {
        fn process(&self, frames: FrameSet) -> Option<AlignedFrameSet> {
            Some(AlignedFrameSet {
                index: frames.index,
                depth: frames.depth?,
                color: frames.color?,
            })
        }
    }

    #[test]
    fn mismatched_alignment_drops_the_cycle() {
        let session = Session::new(0.001, ClippingDistance::default());
        let bad = FrameSet {
            index: 0,
            depth: Some(DepthFrame::new(2, 1, vec![1, 1]).unwrap()),
            color: Some(ColorFrame::new(1, 1, 3, vec![0; 3]).unwrap()),
        };
        let mut source = Scripted::new(vec![Some(bad)]);

        assert!(run_cycle(&mut source, &Careless, &session).is_none());
    }

    #[test]
    fn empty_and_partial_cycles_are_dropped() {
        let session = Session::new(0.001, ClippingDistance::default());
        let partial = FrameSet { index: 1, depth: None, color: None };
        let mut source = Scripted::new(vec![None, Some(partial), Some(pair(2, vec![500]))]);

        assert!(run_cycle(&mut source, &AlignToColor, &session).is_none());
        assert!(run_cycle(&mut source, &AlignToColor, &session).is_none());
        let ok = run_cycle(&mut source, &AlignToColor, &session).unwrap();
        assert_eq!(ok.index, 2);
    }
}
