//! Interaction resolution: items, the roaming key chase, the save point, and
//! mom's door. Prompts describe intent; outcomes are resolved here and
//! rarely match it.

use crate::content::{self, EffectKind, InteractionKind, items, keys};
use crate::dialogue::{AfterDialogue, OptionContext};
use crate::rng::UnitRoll;
use crate::state::NearbyInteractable;
use crate::types::{Cue, ItemKey, LogEvent, Pos, RoomKey};

use super::Session;

impl Session {
    pub(super) fn interact(&mut self) {
        match self.world.nearby {
            None => {}
            Some(NearbyInteractable::RoamingKey { .. }) => self.chase_key(),
            Some(NearbyInteractable::Item { key, .. }) => self.resolve_item(key),
        }
    }

    /// The key flees a fixed number of times, then lets itself be caught.
    fn chase_key(&mut self) {
        let Some(def) = self.content.item(keys::KEY) else {
            self.push_log(LogEvent::ContentErrorIgnored {
                context: "chase_key",
                id: keys::KEY.0.to_string(),
            });
            return;
        };
        self.world.flags.key_fly_count += 1;
        let attempt = self.world.flags.key_fly_count;

        if attempt >= content::MAX_KEY_FLY_ATTEMPTS {
            self.world.flags.has_key = true;
            self.world.roaming_key_room = None;
            self.push_log(LogEvent::KeyCaught { attempts: attempt });
            self.fx.cue(Cue::Confirm);
            if let Some(result) = def.final_result {
                self.dialogue.show(result, None);
            }
            self.recompute_nearby();
            return;
        }

        let from = self.world.room;
        let candidates: Vec<RoomKey> = self
            .content
            .key_fly_rooms()
            .iter()
            .copied()
            .filter(|&room| Some(room) != self.world.roaming_key_room)
            .collect();
        if candidates.is_empty() {
            return;
        }
        let to = candidates[self.rng.index(candidates.len())];
        self.world.roaming_key_room = Some(to);
        self.world.flags.key_just_flew = true;
        self.push_log(LogEvent::KeyFlew { from, to, attempt });
        self.fx.cue(Cue::KeyFly);
        self.fx.shake(8);
        self.fx.flicker(4);
        if let Some(take) = def.interaction(InteractionKind::Take) {
            let after = take.gaslight.map(|text| AfterDialogue::Gaslight { text, then: None });
            self.dialogue.show(take.result, after);
        }
        self.recompute_nearby();
    }

    fn resolve_item(&mut self, key: ItemKey) {
        let Some(def) = self.content.item(key) else {
            self.push_log(LogEvent::ContentErrorIgnored {
                context: "resolve_item",
                id: key.0.to_string(),
            });
            return;
        };
        if key == keys::SAVE_POINT {
            self.request_save();
            return;
        }
        if !def.options.is_empty() {
            let labels: Vec<&'static str> = def.options.iter().map(|o| o.label).collect();
            self.dialogue
                .show_options(def.name, labels, OptionContext::ItemOptions { item: key });
            return;
        }
        match def.interactions {
            [] => self.dialogue.show(def.examine, None),
            [(_, only)] => {
                let only = *only;
                self.apply_outcome(key, only.result, only.effect, only.damage, only.gaslight);
            }
            many => {
                let kinds: Vec<InteractionKind> = many.iter().map(|&(kind, _)| kind).collect();
                let labels: Vec<&'static str> =
                    many.iter().map(|&(_, interaction)| interaction.prompt).collect();
                self.dialogue.show_options(
                    def.name,
                    labels,
                    OptionContext::InteractionMenu { item: key, kinds },
                );
            }
        }
    }

    pub(super) fn resolve_item_option(&mut self, item: ItemKey, index: usize) {
        let Some(def) = self.content.item(item) else { return };
        let Some(option) = def.options.get(index) else { return };
        self.apply_outcome(item, option.result, option.effect, option.damage, option.gaslight);
    }

    pub(super) fn resolve_interaction_kind(&mut self, item: ItemKey, kind: InteractionKind) {
        if item == keys::MOM_DOOR {
            match kind {
                InteractionKind::Use => self.mom_door_use(),
                _ => self.mom_door_check(),
            }
            return;
        }
        let Some(def) = self.content.item(item) else { return };
        let Some(interaction) = def.interaction(kind) else { return };
        self.apply_outcome(
            item,
            interaction.result,
            interaction.effect,
            interaction.damage,
            interaction.gaslight,
        );
    }

    fn mom_door_check(&mut self) {
        let Some(def) = self.content.item(keys::MOM_DOOR) else { return };
        if let Some(check) = def.interaction(InteractionKind::Check) {
            self.dialogue.show(check.result, None);
        }
        let voice = items::MOM_VOICE_LINES[self.rng.index(items::MOM_VOICE_LINES.len())];
        self.dialogue.show_mom_voice(voice);
    }

    /// The door never opens. Without the key it stays locked; with the key
    /// the key melts and the door stays locked anyway. Enough failed
    /// attempts force the battle, exactly once.
    fn mom_door_use(&mut self) {
        self.world.flags.mom_door_attempts += 1;
        let attempts = self.world.flags.mom_door_attempts;

        let force_battle = attempts >= content::MOM_DOOR_BATTLE_ATTEMPTS
            && !self.world.flags.battle_triggered;
        let battle_after = if force_battle {
            self.world.flags.battle_triggered = true;
            self.push_log(LogEvent::BattleTriggered { room: self.world.room });
            Some(AfterDialogue::BattleCutscene)
        } else {
            None
        };

        if self.world.flags.has_key {
            // Melt line first, overlay after it is dismissed, battle last.
            let gaslight = AfterDialogue::Gaslight {
                text: items::MOM_DOOR_GASLIGHT,
                then: battle_after.map(Box::new),
            };
            self.dialogue.show(items::MOM_DOOR_MELT_LINE, Some(gaslight));
        } else {
            self.dialogue.show(items::MOM_DOOR_LOCKED_LINE, battle_after);
        }
    }

    fn nearby_pos_of(&self, item: ItemKey) -> Option<Pos> {
        match self.world.nearby {
            Some(NearbyInteractable::Item { key, pos }) if key == item => Some(pos),
            _ => None,
        }
    }

    /// Apply one outcome: mechanical effect first, then the result text, with
    /// any gaslight deferred until the text is dismissed.
    fn apply_outcome(
        &mut self,
        item: ItemKey,
        result: &'static str,
        effect: EffectKind,
        damage: Option<i32>,
        gaslight: Option<&'static str>,
    ) {
        match effect {
            EffectKind::Break => {
                self.fx.cue(Cue::ItemBreak);
                self.fx.shake(10);
            }
            EffectKind::Hurt => {
                let amount = damage.unwrap_or(content::DEFAULT_HURT_DAMAGE);
                self.world.apply_damage(amount);
                self.fx.cue(Cue::Hurt);
                self.fx.shake(8);
                self.fx.flicker(4);
            }
            EffectKind::Vanish => {
                if let Some(pos) = self.nearby_pos_of(item) {
                    self.world.despawned.insert((self.world.room, pos));
                }
                self.fx.shake(4);
            }
            EffectKind::Gaslight | EffectKind::Unease => self.fx.shake(6),
            EffectKind::Save => {
                self.request_save();
                return;
            }
            EffectKind::Fly => {
                self.chase_key();
                return;
            }
            EffectKind::Inert => {}
        }
        let after = gaslight.map(|text| AfterDialogue::Gaslight { text, then: None });
        self.dialogue.show(result, after);
        if effect == EffectKind::Vanish {
            self.recompute_nearby();
        }
    }
}
