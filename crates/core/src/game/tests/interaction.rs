use crate::content::keys;
use crate::game::test_support::{choose, explore_session, item_pos, place, settle};
use crate::types::{Cue, InputFrame, LogEvent};

#[test]
fn checking_the_bed_breaks_it_instead() {
    let mut session = explore_session(7);
    let bed = item_pos(&session, keys::BEDROOM_1, keys::BED);
    place(&mut session, keys::BEDROOM_1, bed);
    session.fx.drain_cues();
    session.update(InputFrame::press_confirm());
    assert!(session.fx.drain_cues().contains(&Cue::ItemBreak));
    assert!(session.fx.is_shaking());
    assert_eq!(session.dialogue.current_page(), Some("你靠近床..."));
    settle(&mut session);
    assert_eq!(session.world.hp, 100);
}

#[test]
fn sitting_on_the_sofa_hurts() {
    let mut session = explore_session(7);
    let sofa = item_pos(&session, keys::LIVING_ROOM, keys::SOFA);
    place(&mut session, keys::LIVING_ROOM, sofa);
    session.fx.drain_cues();
    session.update(InputFrame::press_confirm());
    assert_eq!(session.world.hp, 95);
    assert!(session.fx.drain_cues().contains(&Cue::Hurt));
    settle(&mut session);
}

#[test]
fn tv_options_resolve_by_index() {
    let mut session = explore_session(7);
    let tv = item_pos(&session, keys::LIVING_ROOM, keys::TV);
    place(&mut session, keys::LIVING_ROOM, tv);
    session.update(InputFrame::press_confirm());
    let (_, labels, selected) = session.dialogue.current_options().unwrap();
    assert_eq!(labels, ["打开电视", "关掉电视"]);
    assert_eq!(selected, 0);

    // Second option: the off switch breaks the screen.
    session.fx.drain_cues();
    choose(&mut session, 1);
    assert!(session.fx.drain_cues().contains(&Cue::ItemBreak));
    settle(&mut session);
}

#[test]
fn desk_offers_its_interaction_kinds_as_a_menu() {
    let mut session = explore_session(7);
    let desk = item_pos(&session, keys::BEDROOM_1, keys::DESK);
    place(&mut session, keys::BEDROOM_1, desk);
    session.update(InputFrame::press_confirm());
    let (_, labels, _) = session.dialogue.current_options().unwrap();
    assert_eq!(labels, ["检查书桌", "翻找抽屉"]);

    choose(&mut session, 1);
    assert_eq!(session.world.hp, 97);
    settle(&mut session);
}

#[test]
fn taking_junk_despawns_the_placement() {
    let mut session = explore_session(7);
    let junk = item_pos(&session, keys::KEY_ROOM_2, keys::JUNK);
    place(&mut session, keys::KEY_ROOM_2, junk);
    session.update(InputFrame::press_confirm());
    choose(&mut session, 1);
    settle(&mut session);
    assert!(session.world.despawned.contains(&(keys::KEY_ROOM_2, junk)));
    assert_eq!(session.world.nearby, None);
}

#[test]
fn window_gaslight_counts_and_logs() {
    let mut session = explore_session(7);
    let window = item_pos(&session, keys::LIVING_ROOM, keys::WINDOW_GASLIGHT);
    place(&mut session, keys::LIVING_ROOM, window);
    session.update(InputFrame::press_confirm());
    choose(&mut session, 0);
    settle(&mut session);
    assert_eq!(session.world.flags.gaslight_count, 1);
    assert!(session.log().contains(&LogEvent::GaslightShown { count: 1 }));
}

#[test]
fn gaslight_escalation_speaks_on_exact_thresholds() {
    let mut session = explore_session(7);
    session.world.flags.gaslight_count = 2;
    session.show_gaslight("【安静】", None);
    assert!(session.dialogue.mom_voice.is_some());

    settle(&mut session);
    session.dialogue.mom_voice = None;
    session.show_gaslight("【安静】", None);
    assert_eq!(session.world.flags.gaslight_count, 4);
    assert!(session.dialogue.mom_voice.is_none());
}

#[test]
fn save_point_requests_a_save_and_reports_back() {
    let mut session = explore_session(7);
    let spot = item_pos(&session, keys::HALLWAY, keys::SAVE_POINT);
    place(&mut session, keys::HALLWAY, spot);
    assert!(!session.take_save_request());

    session.update(InputFrame::press_confirm());
    assert!(session.take_save_request());
    assert!(session.log().contains(&LogEvent::SaveRequested));

    session.fx.drain_cues();
    session.resolve_save(true);
    assert!(session.world.flags.saved_game);
    assert!(session.fx.drain_cues().contains(&Cue::Save));
    assert!(session.log().contains(&LogEvent::SaveCompleted));
    settle(&mut session);
}

#[test]
fn failed_save_reports_without_setting_the_flag() {
    let mut session = explore_session(7);
    let spot = item_pos(&session, keys::HALLWAY, keys::SAVE_POINT);
    place(&mut session, keys::HALLWAY, spot);
    session.update(InputFrame::press_confirm());
    assert!(session.take_save_request());

    session.resolve_save(false);
    assert!(!session.world.flags.saved_game);
    assert!(session.log().contains(&LogEvent::SaveFailed));
    assert_eq!(session.dialogue.current_page(), Some("无法保存。"));
    settle(&mut session);
}

#[test]
fn mom_door_check_speaks_a_voice_line() {
    let mut session = explore_session(7);
    let door = item_pos(&session, keys::MOM_DOOR_ROOM, keys::MOM_DOOR);
    place(&mut session, keys::MOM_DOOR_ROOM, door);
    session.update(InputFrame::press_confirm());
    assert!(session.dialogue.current_options().is_some());
    choose(&mut session, 0);
    assert!(session.dialogue.mom_voice.is_some());
    settle(&mut session);
}

#[test]
fn mom_door_melts_the_key_but_stays_locked() {
    let mut session = explore_session(7);
    session.world.flags.has_key = true;
    let door = item_pos(&session, keys::MOM_DOOR_ROOM, keys::MOM_DOOR);
    place(&mut session, keys::MOM_DOOR_ROOM, door);

    session.update(InputFrame::press_confirm());
    choose(&mut session, 1);
    settle(&mut session);

    assert_eq!(session.world.flags.mom_door_attempts, 1);
    assert!(session.world.flags.has_key);
    assert_eq!(session.world.flags.gaslight_count, 1);
    assert!(!session.world.flags.battle_triggered);
}

#[test]
fn melt_gaslight_waits_for_the_result_to_be_dismissed() {
    let mut session = explore_session(7);
    session.world.flags.has_key = true;
    let door = item_pos(&session, keys::MOM_DOOR_ROOM, keys::MOM_DOOR);
    place(&mut session, keys::MOM_DOOR_ROOM, door);

    session.update(InputFrame::press_confirm());
    choose(&mut session, 1);
    assert!(session.dialogue.current_page().is_some());
    assert!(session.dialogue.gaslight.is_none());

    settle(&mut session);
    assert!(session.dialogue.gaslight.is_some());
    assert_eq!(session.world.flags.gaslight_count, 1);
}

#[test]
fn repeated_door_attempts_force_the_battle_once() {
    let mut session = explore_session(7);
    let door = item_pos(&session, keys::MOM_DOOR_ROOM, keys::MOM_DOOR);

    for _ in 0..2 {
        place(&mut session, keys::MOM_DOOR_ROOM, door);
        session.update(InputFrame::press_confirm());
        choose(&mut session, 1);
        settle(&mut session);
    }

    assert_eq!(session.world.flags.mom_door_attempts, 2);
    assert!(session.world.flags.battle_triggered);
    assert!(session.in_mode(crate::game::Mode::Battle));
    let triggers = session
        .log()
        .iter()
        .filter(|e| matches!(e, LogEvent::BattleTriggered { .. }))
        .count();
    assert_eq!(triggers, 1);
}

#[test]
fn keyed_door_attempts_also_force_the_battle_once() {
    let mut session = explore_session(7);
    session.world.flags.has_key = true;
    let door = item_pos(&session, keys::MOM_DOOR_ROOM, keys::MOM_DOOR);

    for _ in 0..2 {
        place(&mut session, keys::MOM_DOOR_ROOM, door);
        session.update(InputFrame::press_confirm());
        choose(&mut session, 1);
        settle(&mut session);
    }

    assert_eq!(session.world.flags.mom_door_attempts, 2);
    assert_eq!(session.world.flags.gaslight_count, 2);
    assert!(session.in_mode(crate::game::Mode::Battle));
    let triggers = session
        .log()
        .iter()
        .filter(|e| matches!(e, LogEvent::BattleTriggered { .. }))
        .count();
    assert_eq!(triggers, 1);
}
