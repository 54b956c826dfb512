//! End-to-end scenarios for the dispatcher and the media player.

use concordat::arbiter::{ConflictTable, Decision};
use concordat::builder::{airport, RegistryBuilder};
use concordat::{
    Arbiter, Command, CommandResult, CoordinationError, CoordinationState, DeviceState,
    EntityFacade, EntityId, Guard, LocalState, Sensors, SideEffect, VehicleState,
};

fn e1_e2() -> Arbiter {
    RegistryBuilder::new()
        .vehicle("e1", VehicleState::Garage, CoordinationState::AtRest)
        .vehicle("e2", VehicleState::Garage, CoordinationState::HoldingLandingStrip)
        .build_arbiter()
        .unwrap()
}

fn coordination_of(arbiter: &Arbiter, id: &str) -> CoordinationState {
    arbiter
        .snapshot()
        .get(&EntityId::from(id))
        .unwrap()
        .coordination_state
}

#[test]
fn runway_is_granted_while_strip_is_held_elsewhere() {
    let arbiter = e1_e2();
    let e1 = EntityId::from("e1");

    let decision = arbiter
        .request_transition(&e1, CoordinationState::HoldingRunway)
        .unwrap();

    assert_eq!(
        decision,
        Decision::Approved {
            requester: e1,
            granted: CoordinationState::HoldingRunway,
        }
    );
    assert_eq!(coordination_of(&arbiter, "e1"), CoordinationState::HoldingRunway);
}

#[test]
fn strip_is_declined_while_another_holds_it() {
    let arbiter = e1_e2();
    let e1 = EntityId::from("e1");
    arbiter
        .request_transition(&e1, CoordinationState::HoldingRunway)
        .unwrap();
    let before = arbiter.snapshot();

    let decision = arbiter
        .request_transition(&e1, CoordinationState::HoldingLandingStrip)
        .unwrap();

    assert_eq!(
        decision,
        Decision::Declined {
            requester: e1,
            requested: CoordinationState::HoldingLandingStrip,
            conflicting: EntityId::from("e2"),
            held: CoordinationState::HoldingLandingStrip,
        }
    );
    assert_eq!(arbiter.snapshot(), before);
}

#[test]
fn ready_device_starts_playback() {
    let arbiter = RegistryBuilder::new()
        .device("walkman", DeviceState::Ready)
        .build_arbiter()
        .unwrap();

    let result = EntityFacade::new("walkman")
        .handle_command(&arbiter, Command::Play)
        .unwrap();

    assert_eq!(result.local_state(), LocalState::Device(DeviceState::Playing));
    assert_eq!(result.effect(), SideEffect::StartPlayback);
    assert_eq!(result.effect().to_string(), "start playback");
}

#[test]
fn double_activation_advances_track() {
    let arbiter = RegistryBuilder::new()
        .device("walkman", DeviceState::Playing)
        .build_arbiter()
        .unwrap();
    let walkman = EntityFacade::new("walkman")
        .with_sensors(Sensors::default().with_double_activation(Guard::constant(true)));

    let result = walkman.handle_command(&arbiter, Command::Next).unwrap();

    assert_eq!(result.local_state(), LocalState::Device(DeviceState::Playing));
    assert_eq!(result.effect(), SideEffect::NextTrack);
    assert_eq!(result.effect().to_string(), "advance to next track");
}

#[test]
fn lock_then_unlock_follows_playing_guard() {
    let arbiter = RegistryBuilder::new()
        .device("walkman", DeviceState::Playing)
        .device("radio", DeviceState::Playing)
        .build_arbiter();
    // both seeded holding the one audio output
    assert!(arbiter.is_err());

    let arbiter = RegistryBuilder::new()
        .device("walkman", DeviceState::Playing)
        .build_arbiter()
        .unwrap();
    let playing = EntityFacade::new("walkman")
        .with_sensors(Sensors::default().with_playing(Guard::constant(true)));

    let locked = playing.handle_command(&arbiter, Command::Lock).unwrap();
    assert_eq!(locked.local_state(), LocalState::Device(DeviceState::Locked));
    assert_eq!(
        coordination_of(&arbiter, "walkman"),
        CoordinationState::HoldingAudioOutput
    );

    let unlocked = playing.handle_command(&arbiter, Command::Lock).unwrap();
    assert_eq!(unlocked.local_state(), LocalState::Device(DeviceState::Playing));

    let silent = EntityFacade::new("walkman")
        .with_sensors(Sensors::default().with_playing(Guard::constant(false)));
    silent.handle_command(&arbiter, Command::Lock).unwrap();
    let unlocked = silent.handle_command(&arbiter, Command::Lock).unwrap();
    assert_eq!(unlocked.local_state(), LocalState::Device(DeviceState::Ready));
    assert_eq!(coordination_of(&arbiter, "walkman"), CoordinationState::AtRest);
}

#[test]
fn dispatcher_demo_with_shared_strip() {
    let arbiter = airport(ConflictTable::shared_strip()).unwrap();
    let boeing = EntityFacade::new("boeing-747");
    let helicopter = EntityFacade::new("helicopter");

    let landing = boeing.handle_command(&arbiter, Command::Land).unwrap();
    assert!(matches!(
        landing,
        CommandResult::Applied {
            effect: SideEffect::Arrival,
            coordination: CoordinationState::HoldingLandingStrip,
            ..
        }
    ));

    let take_off = helicopter.handle_command(&arbiter, Command::TakeOff).unwrap();
    assert_eq!(
        take_off,
        CommandResult::Declined {
            entity: EntityId::from("helicopter"),
            local_state: LocalState::Vehicle(VehicleState::Garage),
            requested: CoordinationState::HoldingRunway,
            conflicting: EntityId::from("boeing-747"),
            held: CoordinationState::HoldingLandingStrip,
        }
    );

    boeing.handle_command(&arbiter, Command::Clear).unwrap();
    let take_off = helicopter.handle_command(&arbiter, Command::TakeOff).unwrap();
    assert_eq!(take_off.local_state(), LocalState::Vehicle(VehicleState::Air));
}

#[test]
fn history_tracks_committed_path() {
    let arbiter = airport(ConflictTable::airport()).unwrap();
    let boeing = EntityFacade::new("boeing-747");

    boeing.handle_command(&arbiter, Command::Land).unwrap();
    boeing.handle_command(&arbiter, Command::Clear).unwrap();
    boeing.handle_command(&arbiter, Command::TakeOff).unwrap();

    let path: Vec<CoordinationState> = arbiter.inspect(|registry| {
        registry
            .get(&EntityId::from("boeing-747"))
            .unwrap()
            .history()
            .get_path()
            .into_iter()
            .copied()
            .collect()
    });

    assert_eq!(
        path,
        vec![
            CoordinationState::AtRest,
            CoordinationState::HoldingLandingStrip,
            CoordinationState::AtRest,
            CoordinationState::HoldingRunway,
        ]
    );
}

#[test]
fn late_registration_joins_arbitration() {
    let arbiter = airport(ConflictTable::airport()).unwrap();
    arbiter
        .register("cessna", VehicleState::Air, CoordinationState::HoldingLandingStrip)
        .unwrap();

    let result = EntityFacade::new("boeing-747")
        .handle_command(&arbiter, Command::Land)
        .unwrap();

    assert!(result.is_declined());
}

#[test]
fn late_registration_cannot_double_book_the_runway() {
    let arbiter = RegistryBuilder::new()
        .vehicle("a", VehicleState::Garage, CoordinationState::HoldingRunway)
        .build_arbiter()
        .unwrap();

    let result = arbiter.register("b", VehicleState::Garage, CoordinationState::HoldingRunway);

    assert_eq!(
        result,
        Err(CoordinationError::RegistrationConflict {
            entity: EntityId::from("b"),
            requested: CoordinationState::HoldingRunway,
            conflicting: EntityId::from("a"),
            held: CoordinationState::HoldingRunway,
        })
    );
    let runway_holders =
        arbiter.inspect(|r| r.holders(CoordinationState::HoldingRunway).count());
    assert_eq!(runway_holders, 1);
    assert!(!arbiter.inspect(|r| r.contains(&EntityId::from("b"))));
}

#[test]
fn raw_requests_cannot_free_a_playing_device_output() {
    let arbiter = RegistryBuilder::new()
        .device("w", DeviceState::Ready)
        .device("r", DeviceState::Ready)
        .build_arbiter()
        .unwrap();
    let w = EntityId::from("w");
    EntityFacade::new("w")
        .handle_command(&arbiter, Command::Play)
        .unwrap();

    let runway = arbiter.request_transition(&w, CoordinationState::HoldingRunway);
    let release = arbiter.request_transition(&w, CoordinationState::AtRest);
    assert!(matches!(runway, Err(CoordinationError::Inadmissible { .. })));
    assert!(matches!(release, Err(CoordinationError::Inadmissible { .. })));

    let second = EntityFacade::new("r")
        .handle_command(&arbiter, Command::Play)
        .unwrap();
    assert!(second.is_declined());

    let playing = arbiter
        .snapshot()
        .members
        .iter()
        .filter(|m| m.local_state == LocalState::Device(DeviceState::Playing))
        .count();
    assert_eq!(playing, 1);
}

#[test]
fn history_last_entry_carries_commit_sequence() {
    let arbiter = airport(ConflictTable::airport()).unwrap();
    EntityFacade::new("boeing-747")
        .handle_command(&arbiter, Command::Land)
        .unwrap();
    EntityFacade::new("helicopter")
        .handle_command(&arbiter, Command::TakeOff)
        .unwrap();

    let sequences = arbiter.inspect(|registry| {
        ["boeing-747", "helicopter"].map(|id| {
            registry
                .get(&EntityId::from(id))
                .and_then(|m| m.history().last())
                .map(|t| t.sequence)
        })
    });

    assert_eq!(sequences, [Some(1), Some(2)]);
}
