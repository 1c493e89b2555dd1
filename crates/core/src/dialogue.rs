//! Dialogue queue, option menus, and the gaslight overlay.
//! This module exists to serialize every piece of text the player must
//! acknowledge; continuations fire only after the last page is dismissed,
//! which is what keeps battle and room transitions ordered.
//! It does not own the consequences; the game module interprets them.

use crate::content::items::InteractionKind;
use crate::types::{ItemKey, Pos, RoomKey};

/// What happens once a dialogue sequence is fully dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AfterDialogue {
    EnterRoom { room: RoomKey, spawn: Option<Pos> },
    /// The pre-battle lines, then the battle proper.
    BattleCutscene,
    StartBattle,
    /// Intrusive overlay after a result is dismissed; `then` fires once the
    /// overlay releases input.
    Gaslight { text: &'static str, then: Option<Box<AfterDialogue>> },
    BeginPlayerTurn,
    BulletPhase,
    BattleOver,
}

/// Which menu produced a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionContext {
    /// An item's option list (labels map by index to `ItemDef::options`).
    ItemOptions { item: ItemKey },
    /// The prompt menu shown when an item defines several interaction kinds.
    InteractionMenu { item: ItemKey, kinds: Vec<InteractionKind> },
    /// Battle main menu.
    BattleMenu,
    /// Battle negotiate submenu.
    NegotiateMenu,
}

#[derive(Clone, Debug)]
enum Mode {
    Idle,
    Lines { pages: Vec<&'static str>, index: usize, then: Option<AfterDialogue> },
    Options { prompt: &'static str, labels: Vec<&'static str>, selected: usize, context: OptionContext },
}

/// Full-screen intrusive text. Holds input for a beat, then fades slowly so
/// it lingers over whatever the player does next.
#[derive(Clone, Debug)]
pub struct GaslightOverlay {
    pub text: &'static str,
    pub alpha: f32,
    blocking_frames: u8,
    then: Option<AfterDialogue>,
}

const GASLIGHT_BLOCK_FRAMES: u8 = 60;
const GASLIGHT_FADE_PER_FRAME: f32 = 0.01;

/// Ambient voice line. Never blocks input.
#[derive(Clone, Debug)]
pub struct MomVoice {
    pub text: &'static str,
    frames_left: u16,
}

const MOM_VOICE_FRAMES: u16 = 180;

/// What a frame of dialogue input produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogueSignal {
    None,
    /// Advanced to the next page.
    Page,
    /// The sequence finished; run its continuation.
    Completed(Option<AfterDialogue>),
    /// The option cursor moved.
    MovedSelection,
    /// An option was chosen.
    Selected { context: OptionContext, index: usize },
    /// The option menu was dismissed without choosing.
    Cancelled,
}

#[derive(Debug)]
pub struct DialogueState {
    mode: Mode,
    pub gaslight: Option<GaslightOverlay>,
    pub mom_voice: Option<MomVoice>,
}

impl Default for DialogueState {
    fn default() -> Self {
        Self { mode: Mode::Idle, gaslight: None, mom_voice: None }
    }
}

impl DialogueState {
    /// Queue a page sequence. Multi-line strings are split on newlines into
    /// separate pages so every line is individually acknowledged.
    pub fn show(&mut self, text: &'static str, then: Option<AfterDialogue>) {
        let pages: Vec<&'static str> = text.split('\n').filter(|l| !l.is_empty()).collect();
        if pages.is_empty() {
            self.mode = Mode::Idle;
            return;
        }
        self.mode = Mode::Lines { pages, index: 0, then };
    }

    pub fn show_pages(&mut self, pages: &'static [&'static str], then: Option<AfterDialogue>) {
        self.show_lines(pages.to_vec(), then);
    }

    pub fn show_lines(&mut self, pages: Vec<&'static str>, then: Option<AfterDialogue>) {
        if pages.is_empty() {
            self.mode = Mode::Idle;
            return;
        }
        self.mode = Mode::Lines { pages, index: 0, then };
    }

    pub fn show_options(
        &mut self,
        prompt: &'static str,
        labels: Vec<&'static str>,
        context: OptionContext,
    ) {
        self.mode = Mode::Options { prompt, labels, selected: 0, context };
    }

    pub fn show_gaslight(&mut self, text: &'static str, then: Option<AfterDialogue>) {
        self.gaslight = Some(GaslightOverlay {
            text,
            alpha: 1.0,
            blocking_frames: GASLIGHT_BLOCK_FRAMES,
            then,
        });
    }

    pub fn show_mom_voice(&mut self, text: &'static str) {
        self.mom_voice = Some(MomVoice { text, frames_left: MOM_VOICE_FRAMES });
    }

    /// True while movement and interaction must be held.
    pub fn is_blocking(&self) -> bool {
        if !matches!(self.mode, Mode::Idle) {
            return true;
        }
        matches!(&self.gaslight, Some(g) if g.blocking_frames > 0)
    }

    pub fn current_page(&self) -> Option<&'static str> {
        match &self.mode {
            Mode::Lines { pages, index, .. } => pages.get(*index).copied(),
            _ => None,
        }
    }

    pub fn current_options(&self) -> Option<(&'static str, &[&'static str], usize)> {
        match &self.mode {
            Mode::Options { prompt, labels, selected, .. } => Some((prompt, labels, *selected)),
            _ => None,
        }
    }

    /// Per-frame decay of the overlays. Returns the gaslight continuation on
    /// the frame its input hold ends.
    pub fn tick(&mut self) -> Option<AfterDialogue> {
        let mut released = None;
        if let Some(overlay) = &mut self.gaslight {
            if overlay.blocking_frames > 0 {
                overlay.blocking_frames -= 1;
                if overlay.blocking_frames == 0 {
                    released = overlay.then.take();
                }
            } else {
                overlay.alpha -= GASLIGHT_FADE_PER_FRAME;
                if overlay.alpha <= 0.0 {
                    self.gaslight = None;
                }
            }
        }
        if let Some(voice) = &mut self.mom_voice {
            voice.frames_left = voice.frames_left.saturating_sub(1);
            if voice.frames_left == 0 {
                self.mom_voice = None;
            }
        }
        released
    }

    /// Feed one frame of input while a sequence or menu is open.
    pub fn advance(&mut self, confirm: bool, cancel: bool, dir: Option<crate::types::Dir>) -> DialogueSignal {
        match &mut self.mode {
            Mode::Idle => DialogueSignal::None,
            Mode::Lines { pages, index, then } => {
                if !confirm {
                    return DialogueSignal::None;
                }
                if *index + 1 < pages.len() {
                    *index += 1;
                    return DialogueSignal::Page;
                }
                let then = then.take();
                self.mode = Mode::Idle;
                DialogueSignal::Completed(then)
            }
            Mode::Options { labels, selected, context, .. } => {
                if let Some(dir) = dir {
                    let moved = match dir {
                        crate::types::Dir::Up if *selected > 0 => {
                            *selected -= 1;
                            true
                        }
                        crate::types::Dir::Down if *selected + 1 < labels.len() => {
                            *selected += 1;
                            true
                        }
                        _ => false,
                    };
                    if moved {
                        return DialogueSignal::MovedSelection;
                    }
                }
                if confirm {
                    let context = context.clone();
                    let index = *selected;
                    self.mode = Mode::Idle;
                    return DialogueSignal::Selected { context, index };
                }
                if cancel {
                    self.mode = Mode::Idle;
                    return DialogueSignal::Cancelled;
                }
                DialogueSignal::None
            }
        }
    }
}
