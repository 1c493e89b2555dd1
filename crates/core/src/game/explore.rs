//! Grid movement, door resolution, and room entry.

use crate::content::{self, Cell, ExitKind};
use crate::dialogue::AfterDialogue;
use crate::state::NearbyInteractable;
use crate::types::{Cue, DoorMark, InputFrame, LogEvent, Pos, RoomKey};

use super::Session;

impl Session {
    pub(super) fn update_explore(&mut self, input: InputFrame) {
        self.world.move_cooldown = self.world.move_cooldown.saturating_sub(1);
        if input.confirm {
            self.interact();
            return;
        }
        if let Some(dir) = input.dir_pressed {
            self.step(dir);
        }
    }

    fn step(&mut self, dir: crate::types::Dir) {
        if self.world.move_cooldown > 0 {
            return;
        }
        let Some(room) = self.content.room(self.world.room) else { return };
        let target = self.world.pos.offset(dir);
        match room.cell_at(target) {
            None | Some(Cell::Wall) => self.fx.cue(Cue::Cancel),
            Some(Cell::Door(mark)) => self.resolve_door(room.key, mark),
            Some(Cell::Floor | Cell::Item(_)) => {
                self.world.pos = target;
                self.world.move_cooldown = content::MOVE_COOLDOWN_FRAMES;
                self.fx.cue(Cue::Step);
                self.recompute_nearby();
            }
        }
    }

    /// Stepping into a door marker resolves its link. Labels are flavor; the
    /// spec behind the link decides where the player actually ends up.
    fn resolve_door(&mut self, from: RoomKey, mark: DoorMark) {
        let Some(room) = self.content.room(from) else { return };
        let Some(link) = room.link(mark) else {
            self.fx.cue(Cue::Cancel);
            return;
        };
        let Some(spec) = link.spec else {
            self.fx.cue(Cue::Cancel);
            self.dialogue.show("门打不开。", None);
            return;
        };
        if link.locked && !self.world.flags.has_key {
            self.fx.cue(Cue::Cancel);
            self.dialogue.show(content::items::LOCKED_EXIT_LINE, None);
            return;
        }

        let resolved = spec.resolve(&mut self.rng);
        match resolved.kind {
            ExitKind::Fixed => self.fx.flicker(4),
            ExitKind::Teleport => self.fx.flicker(6),
            ExitKind::Loop => self.fx.shake(6),
            ExitKind::Distorted => {
                if resolved.target == from {
                    self.fx.shake(12);
                } else {
                    self.fx.flicker(4);
                }
            }
        }
        self.push_log(LogEvent::ExitTaken { from, door: mark, to: resolved.target });

        let after = AfterDialogue::EnterRoom { room: resolved.target, spawn: Some(resolved.spawn) };
        match resolved.message {
            Some(message) => self.dialogue.show(message, Some(after)),
            None => self.handle_after(after),
        }
    }

    /// Commit a room entry. Runs after the fade reaches black, so it may
    /// queue dialogue freely without fighting the transition.
    pub(super) fn enter_room(&mut self, room_key: RoomKey, spawn: Option<Pos>) {
        let Some(room) = self.content.room(room_key) else {
            self.push_log(LogEvent::ContentErrorIgnored {
                context: "enter_room",
                id: room_key.0.to_string(),
            });
            return;
        };
        self.world.room = room.key;
        self.world.pos = match spawn {
            Some(pos) if room.is_walkable(pos) => pos,
            _ => room.spawn,
        };
        self.world.move_cooldown = 0;
        self.world.flags.key_just_flew = false;

        let first_visit = self.world.visited.insert(room.key);
        self.push_log(LogEvent::RoomEntered { room: room.key, first_visit });
        let battle_now = room.trigger_battle && !self.world.flags.battle_triggered;
        if battle_now {
            self.world.flags.battle_triggered = true;
            self.push_log(LogEvent::BattleTriggered { room: room.key });
        }
        if first_visit {
            // The cutscene waits for the description to be read.
            self.dialogue
                .show(room.description, battle_now.then_some(AfterDialogue::BattleCutscene));
        } else if battle_now {
            self.handle_after(AfterDialogue::BattleCutscene);
        }
        self.recompute_nearby();
    }

    pub(super) fn begin_battle(&mut self, key: crate::types::BattleKey) {
        let Some(def) = self.content.battle(key) else {
            self.push_log(LogEvent::ContentErrorIgnored {
                context: "begin_battle",
                id: key.0.to_string(),
            });
            return;
        };
        if self.world.hp <= 0 {
            self.world.hp = def.player_max_hp;
        }
        self.battle = Some(super::BattleState::new(def));
        self.mode = super::Mode::Battle;
        self.dialogue.show_pages(def.intro_lines, Some(AfterDialogue::BeginPlayerTurn));
    }

    /// Rescan for the nearest interactable: current tile first, then the four
    /// neighbors in up, down, left, right order. The roaming key outranks
    /// placed items at the same position.
    pub(super) fn recompute_nearby(&mut self) {
        self.world.nearby = None;
        let Some(room) = self.content.room(self.world.room) else { return };
        let key_here = self.world.roaming_key_room == Some(room.key)
            && !self.world.flags.key_just_flew;
        let scan = [
            self.world.pos,
            self.world.pos.offset(crate::types::Dir::Up),
            self.world.pos.offset(crate::types::Dir::Down),
            self.world.pos.offset(crate::types::Dir::Left),
            self.world.pos.offset(crate::types::Dir::Right),
        ];
        for pos in scan {
            if key_here && room.key_spot == Some(pos) {
                self.world.nearby = Some(NearbyInteractable::RoamingKey { pos });
                return;
            }
            if let Some(Cell::Item(item)) = room.cell_at(pos)
                && !self.world.despawned.contains(&(room.key, pos))
            {
                self.world.nearby = Some(NearbyInteractable::Item { key: item, pos });
                return;
            }
        }
    }
}
