//! The unwinnable battle. Every menu action hurts the player, the enemy
//! never takes damage, and the bullet phase punishes both dodging and
//! getting caught. The fight ends exactly once, when HP reaches zero.

use crate::content::{ActionMechanic, BattleDef, NegotiateOption};
use crate::dialogue::{AfterDialogue, OptionContext};
use crate::types::{Cue, InputFrame};

use super::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    Intro,
    PlayerTurn,
    Bullet,
    End,
}

const NEGOTIATE_LABEL: &str = "谈判";
const CONTACT_LINE: &str = "【妈妈抱住了你】";
const BATTLE_MENU_PROMPT: &str = "你要怎么做？";
const NEGOTIATE_PROMPT: &str = "你想说什么？";
const FRAME_MS: f32 = 16.0;
const TICKS_PER_SECOND: f32 = 60.0;

pub struct BattleState {
    pub(crate) def: &'static BattleDef,
    pub phase: BattlePhase,
    pub turn: u32,
    pub enemy_y: f32,
    pub player_x: f32,
    pub player_y: f32,
    pub timer_ms: f32,
    enhanced: bool,
    ended: bool,
}

impl BattleState {
    pub(super) fn new(def: &'static BattleDef) -> Self {
        Self {
            def,
            phase: BattlePhase::Intro,
            turn: 0,
            enemy_y: def.bullet.enemy_start_y,
            player_x: def.bullet.area.center_x(),
            player_y: def.bullet.area.center_y(),
            timer_ms: def.bullet.duration_ms,
            enhanced: false,
            ended: false,
        }
    }

    pub fn enemy_name(&self) -> &'static str {
        self.def.enemy_name
    }

    pub fn arena(&self) -> crate::content::RectPx {
        self.def.bullet.area
    }

    pub fn next_bullet_enhanced(&self) -> bool {
        self.enhanced
    }
}

enum BulletOutcome {
    Airborne,
    Contact { damage: i32 },
    Dodged { line: &'static str },
}

impl Session {
    pub(super) fn update_battle(&mut self, input: InputFrame) {
        let Some(phase) = self.battle.as_ref().map(|b| b.phase) else { return };
        match phase {
            BattlePhase::Bullet => self.tick_bullet(input),
            // A turn with no open menu means a menu was dismissed; it cannot
            // be escaped, so reopen it.
            BattlePhase::PlayerTurn => self.begin_player_turn(),
            BattlePhase::Intro | BattlePhase::End => {}
        }
    }

    pub(super) fn begin_player_turn(&mut self) {
        let Some(battle) = self.battle.as_mut() else { return };
        battle.phase = BattlePhase::PlayerTurn;
        let mut labels: Vec<&'static str> =
            battle.def.actions.iter().map(|action| action.name).collect();
        labels.push(NEGOTIATE_LABEL);
        self.dialogue
            .show_options(BATTLE_MENU_PROMPT, labels, OptionContext::BattleMenu);
    }

    pub(super) fn resolve_battle_menu(&mut self, index: usize) {
        let Some(battle) = self.battle.as_mut() else { return };
        let def = battle.def;
        if index >= def.actions.len() {
            let labels: Vec<&'static str> =
                def.negotiate.iter().map(|option| option.name).collect();
            self.dialogue
                .show_options(NEGOTIATE_PROMPT, labels, OptionContext::NegotiateMenu);
            return;
        }
        let action = def.actions[index];
        match action.mechanic {
            ActionMechanic::SelfDamage(amount) | ActionMechanic::ForcedDamage(amount) => {
                self.world.apply_damage(amount);
                self.fx.cue(Cue::Hurt);
                self.fx.shake(8);
            }
            ActionMechanic::EnhanceNextBullet => battle.enhanced = true,
        }
        self.dialogue
            .show_lines(action.lines.to_vec(), Some(AfterDialogue::BulletPhase));
    }

    /// Every negotiation line is answered with hostility and chip damage.
    pub(super) fn resolve_negotiate(&mut self, index: usize) {
        let Some(battle) = self.battle.as_ref() else { return };
        let Some(&option) = battle.def.negotiate.get(index) else { return };
        let NegotiateOption { player_line, responses, damage, .. } = option;
        self.world.apply_damage(damage);
        self.fx.cue(Cue::Hurt);
        self.fx.shake(6);
        self.dialogue.show_lines(
            vec![player_line, responses[0], responses[1]],
            Some(AfterDialogue::BulletPhase),
        );
    }

    pub(super) fn begin_bullet_phase(&mut self) {
        if self.world.hp <= 0 {
            self.enter_battle_end();
            return;
        }
        let Some(battle) = self.battle.as_mut() else { return };
        battle.phase = BattlePhase::Bullet;
        battle.enemy_y = battle.def.bullet.enemy_start_y;
        battle.player_x = battle.def.bullet.area.center_x();
        battle.player_y = battle.def.bullet.area.center_y();
        battle.timer_ms = battle.def.bullet.duration_ms;
    }

    fn tick_bullet(&mut self, input: InputFrame) {
        let outcome = {
            let Some(battle) = self.battle.as_mut() else { return };
            let pattern = battle.def.bullet;
            let area = pattern.area;

            if input.held_left {
                battle.player_x -= pattern.player_speed;
            }
            if input.held_right {
                battle.player_x += pattern.player_speed;
            }
            if input.held_up {
                battle.player_y -= pattern.player_speed;
            }
            if input.held_down {
                battle.player_y += pattern.player_speed;
            }
            battle.player_x = battle.player_x.clamp(area.x, area.x + area.w);
            battle.player_y = battle.player_y.clamp(area.y, area.y + area.h);

            let (speed, damage) = if battle.enhanced {
                (battle.def.enhanced_bullet.approach_speed, battle.def.enhanced_bullet.contact_damage)
            } else {
                (pattern.approach_speed, pattern.contact_damage)
            };
            battle.enemy_y += speed / TICKS_PER_SECOND;
            battle.timer_ms -= FRAME_MS;

            if (battle.player_y - battle.enemy_y).abs() <= pattern.contact_band {
                battle.enhanced = false;
                BulletOutcome::Contact { damage }
            } else if battle.timer_ms <= 0.0 {
                battle.enhanced = false;
                let line =
                    pattern.dodge_lines[battle.turn as usize % pattern.dodge_lines.len()];
                BulletOutcome::Dodged { line }
            } else {
                BulletOutcome::Airborne
            }
        };

        match outcome {
            BulletOutcome::Airborne => {}
            BulletOutcome::Contact { damage } => {
                self.world.apply_damage(damage);
                self.fx.cue(Cue::Hurt);
                self.fx.shake(8);
                self.end_bullet_phase(CONTACT_LINE);
            }
            BulletOutcome::Dodged { line } => self.end_bullet_phase(line),
        }
    }

    fn end_bullet_phase(&mut self, line: &'static str) {
        if self.world.hp <= 0 {
            self.enter_battle_end();
            return;
        }
        if let Some(battle) = self.battle.as_mut() {
            battle.turn += 1;
            battle.phase = BattlePhase::PlayerTurn;
        }
        self.dialogue.show(line, Some(AfterDialogue::BeginPlayerTurn));
    }

    fn enter_battle_end(&mut self) {
        let Some(battle) = self.battle.as_mut() else { return };
        if battle.ended {
            return;
        }
        battle.ended = true;
        battle.phase = BattlePhase::End;
        self.dialogue
            .show_lines(battle.def.defeat_lines.to_vec(), Some(AfterDialogue::BattleOver));
    }

    #[cfg(test)]
    pub(crate) fn in_mode(&self, mode: super::Mode) -> bool {
        self.mode() == mode
    }
}
