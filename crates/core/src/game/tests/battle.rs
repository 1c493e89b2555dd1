use crate::game::test_support::{TRAP_ROOMS, battle_session, choose, fixture_pack, settle};
use crate::game::{BattlePhase, Mode, Session};
use crate::types::{InputFrame, LogEvent};

fn phase(session: &crate::game::Session) -> BattlePhase {
    session.battle().expect("battle running").phase
}

#[test]
fn a_trigger_room_forces_the_battle_once_on_entry() {
    let mut session = Session::with_content(fixture_pack(TRAP_ROOMS), 7);
    session.start_new_game();
    assert!(session.world.flags.battle_triggered);
    settle(&mut session);
    assert!(session.in_mode(Mode::Battle));
    let triggers = session
        .log()
        .iter()
        .filter(|e| matches!(e, LogEvent::BattleTriggered { .. }))
        .count();
    assert_eq!(triggers, 1);
}

#[test]
fn intro_ends_in_the_main_menu() {
    let mut session = battle_session(7);
    assert!(session.in_mode(Mode::Battle));
    assert_eq!(phase(&session), BattlePhase::PlayerTurn);
    let (prompt, labels, _) = session.dialogue.current_options().unwrap();
    assert_eq!(prompt, "你要怎么做？");
    assert_eq!(labels, ["挥拳", "冻结", "等待", "谈判"]);
}

#[test]
fn punching_hurts_only_the_player() {
    let mut session = battle_session(7);
    choose(&mut session, 0);
    assert_eq!(session.world.hp, 85);
    settle(&mut session);
    assert_eq!(phase(&session), BattlePhase::Bullet);
}

#[test]
fn waiting_is_punished_harder() {
    let mut session = battle_session(7);
    choose(&mut session, 2);
    assert_eq!(session.world.hp, 80);
    settle(&mut session);
}

#[test]
fn negotiation_chips_hp_through_hostile_responses() {
    let mut session = battle_session(7);
    choose(&mut session, 3);
    let (prompt, labels, _) = session.dialogue.current_options().unwrap();
    assert_eq!(prompt, "你想说什么？");
    assert_eq!(labels, ["辩解", "解释", "顺从"]);

    choose(&mut session, 2);
    assert_eq!(session.world.hp, 95);
    assert_eq!(session.dialogue.current_page(), Some("「对不起，妈妈...」"));
    settle(&mut session);
    assert_eq!(phase(&session), BattlePhase::Bullet);
}

#[test]
fn cancelling_the_submenu_returns_to_the_main_menu() {
    let mut session = battle_session(7);
    choose(&mut session, 3);
    assert!(session.dialogue.current_options().is_some());
    session.update(InputFrame { cancel: true, ..InputFrame::default() });
    let (prompt, _, _) = session.dialogue.current_options().unwrap();
    assert_eq!(prompt, "你要怎么做？");
}

#[test]
fn standing_still_gets_caught_and_hurt() {
    let mut session = battle_session(7);
    choose(&mut session, 0);
    settle(&mut session);
    assert_eq!(phase(&session), BattlePhase::Bullet);

    let hp_before = session.world.hp;
    let mut frames = 0;
    while phase(&session) == BattlePhase::Bullet {
        session.update(InputFrame::default());
        frames += 1;
        assert!(frames < 400, "bullet phase never resolved");
    }
    assert_eq!(session.world.hp, hp_before - 10);
}

#[test]
fn fleeing_downward_survives_the_phase() {
    let mut session = battle_session(7);
    choose(&mut session, 0);
    settle(&mut session);

    let hp_before = session.world.hp;
    let flee = InputFrame { held_down: true, ..InputFrame::default() };
    let mut frames = 0;
    while phase(&session) == BattlePhase::Bullet {
        session.update(flee);
        frames += 1;
        assert!(frames < 400, "bullet phase never timed out");
    }
    assert_eq!(session.world.hp, hp_before);
    // Dodging is answered with a guilt line, not a reward.
    assert!(session.dialogue.current_page().is_some());
    let turn = session.battle().unwrap().turn;
    assert_eq!(turn, 1);
}

#[test]
fn freeze_makes_the_next_bullet_faster_and_harder() {
    let contact_frames = |freeze: bool| {
        let mut session = battle_session(7);
        let menu_index = if freeze { 1 } else { 0 };
        choose(&mut session, menu_index);
        let hp_after_action = session.world.hp;
        settle(&mut session);
        let mut frames = 0u32;
        while phase(&session) == BattlePhase::Bullet {
            session.update(InputFrame::default());
            frames += 1;
            assert!(frames < 400);
        }
        (frames, hp_after_action - session.world.hp)
    };

    let (normal_frames, normal_damage) = contact_frames(false);
    let (enhanced_frames, enhanced_damage) = contact_frames(true);
    assert!(enhanced_frames < normal_frames);
    assert_eq!(normal_damage, 10);
    assert_eq!(enhanced_damage, 15);
}

#[test]
fn enhancement_does_not_carry_into_the_following_phase() {
    let mut session = battle_session(7);
    choose(&mut session, 1);
    settle(&mut session);
    while phase(&session) == BattlePhase::Bullet {
        session.update(InputFrame::default());
    }
    assert!(!session.battle().unwrap().next_bullet_enhanced());
}

#[test]
fn the_battle_ends_exactly_once_at_zero_hp() {
    let mut session = battle_session(7);
    session.world.hp = 10;
    choose(&mut session, 0);
    assert_eq!(session.world.hp, 0);
    settle(&mut session);

    assert!(session.in_mode(Mode::Ending));
    let ends = session.log().iter().filter(|e| matches!(e, LogEvent::BattleEnded)).count();
    assert_eq!(ends, 1);
    assert_eq!(session.world.hp, 0);
}

#[test]
fn contact_at_low_hp_also_ends_the_battle() {
    let mut session = battle_session(7);
    session.world.hp = 25;
    choose(&mut session, 0);
    settle(&mut session);
    while session.battle().map(|b| b.phase) == Some(BattlePhase::Bullet) {
        session.update(InputFrame::default());
    }
    settle(&mut session);
    assert!(session.in_mode(Mode::Ending));
    assert_eq!(session.world.hp, 0);
}
