//! Screen effect counters and audio cues.
//! The core only counts frames here; drawing offsets and sound playback are
//! frontend concerns.

use crate::types::Cue;

const FADE_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FadeDir {
    None,
    Out,
    In,
}

/// Emitted by `tick` when a fade-out reaches full black. The game commits
/// pending mode switches on this edge so the player never sees the swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeEvent {
    ReachedBlack,
}

#[derive(Debug)]
pub struct FxState {
    shake_frames: u8,
    flicker_frames: u8,
    fade_alpha: f32,
    fade_dir: FadeDir,
    cues: Vec<Cue>,
}

impl Default for FxState {
    fn default() -> Self {
        Self {
            shake_frames: 0,
            flicker_frames: 0,
            fade_alpha: 0.0,
            fade_dir: FadeDir::None,
            cues: Vec::new(),
        }
    }
}

impl FxState {
    /// Overlapping shakes keep the longer remainder rather than stacking.
    pub fn shake(&mut self, frames: u8) {
        self.shake_frames = self.shake_frames.max(frames);
    }

    pub fn flicker(&mut self, frames: u8) {
        self.flicker_frames = self.flicker_frames.max(frames);
    }

    pub fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn begin_fade_out(&mut self) {
        self.fade_dir = FadeDir::Out;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_frames > 0
    }

    pub fn is_flickering(&self) -> bool {
        self.flicker_frames > 0
    }

    pub fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    /// True while a fade is mid-flight; input is held until it settles.
    pub fn fade_in_progress(&self) -> bool {
        self.fade_dir != FadeDir::None
    }

    pub fn tick(&mut self) -> Option<FadeEvent> {
        self.shake_frames = self.shake_frames.saturating_sub(1);
        self.flicker_frames = self.flicker_frames.saturating_sub(1);
        match self.fade_dir {
            FadeDir::None => None,
            FadeDir::Out => {
                self.fade_alpha = (self.fade_alpha + FADE_STEP).min(1.0);
                if self.fade_alpha >= 1.0 {
                    self.fade_dir = FadeDir::In;
                    Some(FadeEvent::ReachedBlack)
                } else {
                    None
                }
            }
            FadeDir::In => {
                self.fade_alpha = (self.fade_alpha - FADE_STEP).max(0.0);
                if self.fade_alpha <= 0.0 {
                    self.fade_dir = FadeDir::None;
                }
                None
            }
        }
    }
}
