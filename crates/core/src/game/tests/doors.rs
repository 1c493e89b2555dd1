use crate::content::keys;
use crate::game::Session;
use crate::game::test_support::{
    LOCKED_ROOMS, explore_session, fixture_pack, place, settle, take_door,
};
use crate::types::{Dir, DoorMark, InputFrame, LogEvent, Pos};

#[test]
fn up_door_claims_hallway_but_leads_to_the_living_room() {
    let mut session = explore_session(7);
    let label = session
        .content
        .room(keys::BEDROOM_1)
        .unwrap()
        .link(DoorMark::Up)
        .unwrap()
        .label;
    assert_eq!(label, "走廊");

    take_door(&mut session, DoorMark::Up);
    assert_eq!(session.world.room, keys::LIVING_ROOM);
    assert_eq!(session.world.pos, Pos::new(6, 6));
    assert!(session.log().contains(&LogEvent::ExitTaken {
        from: keys::BEDROOM_1,
        door: DoorMark::Up,
        to: keys::LIVING_ROOM,
    }));
}

#[test]
fn sealed_door_rejects_without_a_transition() {
    let mut session = explore_session(7);
    place(&mut session, keys::BEDROOM_1, Pos::new(4, 6));
    session.update(InputFrame::press(Dir::Down));
    assert_eq!(session.dialogue.current_page(), Some("门打不开。"));
    settle(&mut session);
    assert_eq!(session.world.room, keys::BEDROOM_1);
    assert_eq!(session.world.pos, Pos::new(4, 6));
    assert!(!session.log().iter().any(|e| matches!(e, LogEvent::ExitTaken { .. })));
}

#[test]
fn loop_exit_announces_and_returns_to_the_same_room() {
    let mut session = explore_session(7);
    place(&mut session, keys::LIVING_ROOM, Pos::new(6, 4));
    take_door(&mut session, DoorMark::Left);
    assert_eq!(session.world.room, keys::LIVING_ROOM);
    assert_eq!(session.world.pos, Pos::new(6, 4));
    assert!(session.log().contains(&LogEvent::ExitTaken {
        from: keys::LIVING_ROOM,
        door: DoorMark::Left,
        to: keys::LIVING_ROOM,
    }));
}

#[test]
fn teleport_exit_relocates_after_its_message() {
    let mut session = explore_session(7);
    place(&mut session, keys::LIVING_ROOM, Pos::new(6, 4));
    take_door(&mut session, DoorMark::Down);
    assert_eq!(session.world.room, keys::BEDROOM_2);
    assert_eq!(session.world.pos, Pos::new(5, 1));
}

#[test]
fn distorted_exit_lands_only_on_declared_targets() {
    for seed in 0..16 {
        let mut session = explore_session(seed);
        take_door(&mut session, DoorMark::Left);
        assert!(
            session.world.room == keys::LIVING_ROOM || session.world.room == keys::BEDROOM_2,
            "seed {seed} landed in {:?}",
            session.world.room
        );
    }
}

#[test]
fn revisited_room_skips_its_description() {
    let mut session = explore_session(7);
    take_door(&mut session, DoorMark::Up);
    assert!(session.log().contains(&LogEvent::RoomEntered {
        room: keys::LIVING_ROOM,
        first_visit: true
    }));
    // Loop back into the same room: no description, not a first visit.
    take_door(&mut session, DoorMark::Left);
    assert!(session.log().contains(&LogEvent::RoomEntered {
        room: keys::LIVING_ROOM,
        first_visit: false
    }));
}

#[test]
fn locked_door_needs_the_key() {
    let mut session = Session::with_content(fixture_pack(LOCKED_ROOMS), 7);
    session.start_new_game();
    settle(&mut session);

    session.update(InputFrame::press(Dir::Up));
    assert_eq!(session.dialogue.current_page(), Some("门是锁着的。你需要钥匙。"));
    settle(&mut session);
    assert!(!session.log().iter().any(|e| matches!(e, LogEvent::ExitTaken { .. })));

    session.world.flags.has_key = true;
    session.update(InputFrame::press(Dir::Up));
    settle(&mut session);
    assert!(session.log().iter().any(|e| matches!(e, LogEvent::ExitTaken { .. })));
}
