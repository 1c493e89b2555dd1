//! Session state machine: one `update` per frame, mode dispatch, and the
//! typed continuations that order dialogue, fades, and mode switches.
//! This module owns control flow; the rules live in the explore, interact,
//! and battle submodules.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use xxhash_rust::xxh3::xxh3_64;

use crate::content::{BATTLE_CUTSCENE_LINES, ContentPack, keys};
use crate::dialogue::{AfterDialogue, DialogueSignal, DialogueState, OptionContext};
use crate::fx::{FadeEvent, FxState};
use crate::state::{Snapshot, WorldState};
use crate::types::{BattleKey, Cue, InputFrame, LogEvent, Pos, RestoreError, RoomKey};

mod battle;
mod explore;
mod interact;

pub use battle::{BattlePhase, BattleState};

#[cfg(test)]
pub(crate) mod test_support;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Title,
    Explore,
    Battle,
    Ending,
}

/// Mode switch waiting for the fade-out to reach black.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingSwitch {
    NewGame,
    EnterRoom { room: RoomKey, spawn: Option<Pos> },
    StartBattle(BattleKey),
    Ending,
}

pub struct Session {
    pub(crate) content: ContentPack,
    pub(crate) rng: ChaCha8Rng,
    mode: Mode,
    pub world: WorldState,
    pub dialogue: DialogueState,
    pub fx: FxState,
    pub(crate) battle: Option<BattleState>,
    pending_switch: Option<PendingSwitch>,
    save_request: bool,
    log: Vec<LogEvent>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let content = ContentPack::build_default();
        let world = WorldState::new_game(&content);
        // Broken table entries degrade to logged skips, never a panic.
        let log = content
            .validate()
            .into_iter()
            .map(|error| LogEvent::ContentErrorIgnored {
                context: "content_validate",
                id: format!("{error:?}"),
            })
            .collect();
        Self {
            content,
            rng: ChaCha8Rng::seed_from_u64(seed),
            mode: Mode::Title,
            world,
            dialogue: DialogueState::default(),
            fx: FxState::default(),
            battle: None,
            pending_switch: None,
            save_request: false,
            log,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_content(content: ContentPack, seed: u64) -> Self {
        let world = WorldState::new_game(&content);
        Self {
            content,
            rng: ChaCha8Rng::seed_from_u64(seed),
            mode: Mode::Title,
            world,
            dialogue: DialogueState::default(),
            fx: FxState::default(),
            battle: None,
            pending_switch: None,
            save_request: false,
            log: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn current_room(&self) -> Option<&'static crate::content::RoomDef> {
        self.content.room(self.world.room)
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub(crate) fn push_log(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    /// Drive one frame. The order is fixed: effects settle first (committing
    /// any pending mode switch at full black), then dialogue consumes input,
    /// then the active mode runs.
    pub fn update(&mut self, input: InputFrame) {
        if self.fx.tick() == Some(FadeEvent::ReachedBlack)
            && let Some(switch) = self.pending_switch.take()
        {
            self.commit_switch(switch);
        }
        if let Some(after) = self.dialogue.tick() {
            self.handle_after(after);
        }
        if self.fx.fade_in_progress() {
            return;
        }
        if self.dialogue.is_blocking() {
            self.route_dialogue(input);
            return;
        }
        match self.mode {
            Mode::Title => {
                if input.confirm {
                    self.fx.cue(Cue::Confirm);
                    self.switch_to(PendingSwitch::NewGame);
                }
            }
            Mode::Explore => self.update_explore(input),
            Mode::Battle => self.update_battle(input),
            Mode::Ending => {}
        }
    }

    pub fn start_new_game(&mut self) {
        self.commit_switch(PendingSwitch::NewGame);
    }

    fn route_dialogue(&mut self, input: InputFrame) {
        match self.dialogue.advance(input.confirm, input.cancel, input.dir_pressed) {
            DialogueSignal::None => {}
            DialogueSignal::Page => self.fx.cue(Cue::Confirm),
            DialogueSignal::MovedSelection => self.fx.cue(Cue::MenuMove),
            DialogueSignal::Completed(then) => {
                self.fx.cue(Cue::Confirm);
                if let Some(after) = then {
                    self.handle_after(after);
                }
            }
            DialogueSignal::Selected { context, index } => {
                self.fx.cue(Cue::Confirm);
                self.handle_selection(context, index);
            }
            DialogueSignal::Cancelled => {
                self.fx.cue(Cue::Cancel);
                self.handle_menu_cancel();
            }
        }
    }

    pub(crate) fn handle_after(&mut self, after: AfterDialogue) {
        match after {
            AfterDialogue::EnterRoom { room, spawn } => {
                self.switch_to(PendingSwitch::EnterRoom { room, spawn });
            }
            AfterDialogue::BattleCutscene => {
                self.fx.cue(Cue::BattleStart);
                self.dialogue
                    .show_pages(BATTLE_CUTSCENE_LINES, Some(AfterDialogue::StartBattle));
            }
            AfterDialogue::StartBattle => {
                self.switch_to(PendingSwitch::StartBattle(keys::MOM_BATTLE));
            }
            AfterDialogue::Gaslight { text, then } => self.show_gaslight(text, then.map(|b| *b)),
            AfterDialogue::BeginPlayerTurn => self.begin_player_turn(),
            AfterDialogue::BulletPhase => self.begin_bullet_phase(),
            AfterDialogue::BattleOver => {
                self.push_log(LogEvent::BattleEnded);
                self.switch_to(PendingSwitch::Ending);
            }
        }
    }

    fn handle_selection(&mut self, context: OptionContext, index: usize) {
        match context {
            OptionContext::ItemOptions { item } => self.resolve_item_option(item, index),
            OptionContext::InteractionMenu { item, kinds } => {
                if let Some(&kind) = kinds.get(index) {
                    self.resolve_interaction_kind(item, kind);
                }
            }
            OptionContext::BattleMenu => self.resolve_battle_menu(index),
            OptionContext::NegotiateMenu => self.resolve_negotiate(index),
        }
    }

    /// Item menus may be walked away from; battle menus may not.
    fn handle_menu_cancel(&mut self) {
        if self.mode == Mode::Battle {
            self.begin_player_turn();
        }
    }

    fn switch_to(&mut self, switch: PendingSwitch) {
        self.pending_switch = Some(switch);
        self.fx.begin_fade_out();
    }

    fn commit_switch(&mut self, switch: PendingSwitch) {
        match switch {
            PendingSwitch::NewGame => {
                self.world = WorldState::new_game(&self.content);
                self.battle = None;
                self.mode = Mode::Explore;
                let (room, spawn) = (self.world.room, self.world.pos);
                self.enter_room(room, Some(spawn));
            }
            PendingSwitch::EnterRoom { room, spawn } => self.enter_room(room, spawn),
            PendingSwitch::StartBattle(key) => self.begin_battle(key),
            PendingSwitch::Ending => {
                self.battle = None;
                self.mode = Mode::Ending;
            }
        }
    }

    /// Gaslight bookkeeping lives here so every path counts the same way:
    /// overlay, cue, log, and the exact-threshold escalation voice.
    pub(crate) fn show_gaslight(&mut self, text: &'static str, then: Option<AfterDialogue>) {
        self.world.flags.gaslight_count += 1;
        let count = self.world.flags.gaslight_count;
        self.dialogue.show_gaslight(text, then);
        self.fx.cue(Cue::Gaslight);
        self.push_log(LogEvent::GaslightShown { count });
        if let Some(line) = crate::content::items::escalation_line(count) {
            self.dialogue.show_mom_voice(line);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    /// Stable digest of a snapshot's canonical JSON, stored beside the save
    /// file to detect tampering or truncation.
    pub fn snapshot_hash(snapshot: &Snapshot) -> Result<u64, serde_json::Error> {
        Ok(xxh3_64(&serde_json::to_vec(snapshot)?))
    }

    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        self.world = WorldState::restore(&self.content, snapshot)?;
        self.battle = None;
        self.mode = Mode::Explore;
        self.recompute_nearby();
        self.push_log(LogEvent::RoomEntered { room: self.world.room, first_visit: false });
        Ok(())
    }

    /// True once per save-point activation; the frontend performs the write
    /// and reports back through `resolve_save`.
    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_request)
    }

    pub(crate) fn request_save(&mut self) {
        self.save_request = true;
        self.push_log(LogEvent::SaveRequested);
    }

    pub fn resolve_save(&mut self, ok: bool) {
        if ok {
            self.world.flags.saved_game = true;
            self.fx.cue(Cue::Save);
            self.push_log(LogEvent::SaveCompleted);
            if let Some(item) = self.content.item(keys::SAVE_POINT)
                && let Some(interaction) =
                    item.interaction(crate::content::InteractionKind::Check)
            {
                self.dialogue.show(interaction.result, None);
            }
        } else {
            self.push_log(LogEvent::SaveFailed);
            self.dialogue.show("无法保存。", None);
        }
    }
}
