#[cfg(test)]
mod tests {
    use crate::commands::{PlayerCommand, ScriptAction};
    use crate::components::{Body, Vehicle};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::MatchEvent;
    use crate::level::{Level, LevelError, LevelObject, LevelPoint};
    use crate::net::PeerPacket;
    use crate::types::{Position, SimTime, Velocity};

    // ---- Types ----

    #[test]
    fn test_velocity_from_angle() {
        let right = Velocity::from_angle(PROJECTILE_SPEED, 0.0);
        assert!((right.x - 200.0).abs() < 1e-9);
        assert!(right.y.abs() < 1e-9);

        // Screen space: 90 degrees points down (+y).
        let down = Velocity::from_angle(PROJECTILE_SPEED, 90.0);
        assert!(down.x.abs() < 1e-9);
        assert!((down.y - 200.0).abs() < 1e-9);

        let diagonal = Velocity::from_angle(PROJECTILE_SPEED, 45.0);
        assert!((diagonal.as_dvec2().length() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(DT);
        time.advance(DT);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 2.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_is_finite() {
        assert!(Position::new(0.0, -3.5).is_finite());
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY).is_finite());
    }

    // ---- Enums ----

    #[test]
    fn test_laser_ownership() {
        assert_eq!(VehicleKind::Spaceship.laser(), ProjectileOwner::SpaceshipLaser);
        assert_eq!(VehicleKind::Ufo.laser(), ProjectileOwner::UfoLaser);
        for kind in VehicleKind::ALL {
            assert_eq!(kind.laser().shooter(), kind);
            assert!(!kind.laser().can_hit(kind), "no friendly fire for {kind:?}");
            assert!(kind.laser().can_hit(kind.opponent()));
        }
    }

    #[test]
    fn test_direction_units() {
        assert_eq!(Direction::Up.unit(), (0.0, -1.0));
        assert_eq!(Direction::Down.unit(), (0.0, 1.0));
        assert_eq!(Direction::Left.unit(), (-1.0, 0.0));
        assert_eq!(Direction::Right.unit(), (1.0, 0.0));
    }

    // ---- Components ----

    #[test]
    fn test_body_disable_is_idempotent() {
        let mut body = Body::square(VEHICLE_HALF_EXTENT);
        assert!(body.disable());
        assert!(!body.enabled);
        assert!(!body.visible);
        assert!(!body.disable(), "second disable should be a no-op");
        assert!(body.enable());
        assert!(!body.enable(), "second enable should be a no-op");
        assert!(body.enabled && body.visible);
    }

    #[test]
    fn test_vehicle_starts_at_full_health() {
        let vehicle = Vehicle::new(
            VehicleKind::Ufo,
            Position::new(UFO_SPAWN_X, UFO_SPAWN_Y),
            VEHICLE_SPEED,
        );
        assert_eq!(vehicle.health, VEHICLE_MAX_HEALTH);
        assert!(vehicle.alive);
        assert!(!vehicle.is_destroyed());
        assert_eq!(vehicle.laser(), ProjectileOwner::UfoLaser);
        assert_eq!(vehicle.spawn_speed, VEHICLE_SPEED);
    }

    // ---- Commands & events ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Move {
                vehicle: VehicleKind::Spaceship,
                direction: Direction::Up,
            },
            PlayerCommand::Shoot {
                vehicle: VehicleKind::Ufo,
                degrees: 180.0,
            },
            PlayerCommand::QueueScript {
                vehicle: VehicleKind::Spaceship,
                actions: vec![
                    ScriptAction::Move {
                        direction: Direction::Right,
                    },
                    ScriptAction::Shoot { degrees: -45.0 },
                ],
            },
            PlayerCommand::SpawnAttractor { x: 500.0, y: 300.0 },
            PlayerCommand::ResetMatch,
            PlayerCommand::Pause,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // PlayerCommand doesn't derive PartialEq; compare JSON forms.
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_move_command_wire_shape() {
        let cmd = PlayerCommand::Move {
            vehicle: VehicleKind::Ufo,
            direction: Direction::Left,
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value["type"], "Move");
        assert_eq!(value["vehicle"], "Ufo");
        assert_eq!(value["direction"], "left");
    }

    #[test]
    fn test_script_action_to_command() {
        let cmd = ScriptAction::MoveAngle { degrees: 30.0 }.to_command(VehicleKind::Ufo);
        assert!(matches!(
            cmd,
            PlayerCommand::MoveAngle { vehicle: VehicleKind::Ufo, degrees } if degrees == 30.0
        ));
    }

    #[test]
    fn test_match_event_tagged() {
        let event = MatchEvent::MatchEnded {
            winner: VehicleKind::Ufo,
            loser: VehicleKind::Spaceship,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "MatchEnded");
        assert_eq!(value["winner"], "Ufo");
    }

    // ---- Level ----

    fn sample_level() -> Level {
        Level {
            spaceship_position: LevelPoint::new(100.0, 300.0),
            ufo_position: LevelPoint::new(900.0, 300.0),
            objects: vec![
                LevelObject::Asteroid { x: 400.0, y: 120.0 },
                LevelObject::Asteroid { x: 610.0, y: 480.0 },
            ],
        }
    }

    #[test]
    fn test_level_field_names_are_stable() {
        let json = sample_level().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["spaceshipPosition"]["x"], 100.0);
        assert_eq!(value["ufoPosition"]["y"], 300.0);
        assert_eq!(value["objects"][0]["type"], "astroid");
        assert_eq!(value["objects"][1]["x"], 610.0);
    }

    #[test]
    fn test_level_parses_existing_document() {
        let json = r#"{
            "spaceshipPosition": {"x": 120, "y": 310},
            "ufoPosition": {"x": 880, "y": 290},
            "objects": [{"type": "astroid", "x": 500, "y": 75}]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.spaceship_position, LevelPoint::new(120.0, 310.0));
        let asteroids: Vec<Position> = level.asteroid_positions().collect();
        assert_eq!(asteroids, vec![Position::new(500.0, 75.0)]);
    }

    #[test]
    fn test_level_from_snapshot() {
        use crate::state::{MatchSnapshot, VehicleView};
        let view = |kind, x, y| VehicleView {
            kind,
            position: Position::new(x, y),
            velocity: Velocity::default(),
            health: VEHICLE_MAX_HEALTH,
            alive: true,
            visible: true,
            queued_actions: 0,
        };
        let snapshot = MatchSnapshot {
            time: SimTime::default(),
            phase: GamePhase::Active,
            spaceship: view(VehicleKind::Spaceship, 150.0, 250.0),
            ufo: view(VehicleKind::Ufo, 850.0, 350.0),
            projectiles: vec![],
            asteroids: vec![Position::new(500.0, 120.0)],
            attractors: vec![Position::new(10.0, 10.0)],
            events: vec![],
            outcome: None,
        };
        let level = Level::from_snapshot(&snapshot);
        assert_eq!(level.spaceship_position, LevelPoint::new(150.0, 250.0));
        assert_eq!(level.ufo_position, LevelPoint::new(850.0, 350.0));
        assert_eq!(level.objects, vec![LevelObject::Asteroid { x: 500.0, y: 120.0 }]);
    }

    #[test]
    fn test_level_rejects_unknown_object_type() {
        let json = r#"{
            "spaceshipPosition": {"x": 120, "y": 310},
            "ufoPosition": {"x": 880, "y": 290},
            "objects": [{"type": "asteroid", "x": 500, "y": 75}]
        }"#;
        assert!(matches!(Level::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_level_rejects_missing_fields() {
        let json = r#"{"spaceshipPosition": {"x": 1, "y": 1}, "objects": []}"#;
        assert!(matches!(Level::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_level_rejects_out_of_bounds() {
        let mut level = sample_level();
        level.objects.push(LevelObject::Asteroid {
            x: PLAYFIELD_WIDTH + 10.0,
            y: 100.0,
        });
        let err = level.validate(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT).unwrap_err();
        assert!(matches!(err, LevelError::OutOfBounds { .. }));
        assert!(err.to_string().contains("object 2"));
    }

    #[test]
    fn test_level_rejects_non_finite() {
        let mut level = sample_level();
        level.ufo_position = LevelPoint::new(f64::NAN, 10.0);
        assert!(matches!(
            level.validate(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            Err(LevelError::NonFinite { .. })
        ));
    }

    // ---- Peer packets ----

    #[test]
    fn test_peer_packet_decode() {
        assert_eq!(PeerPacket::decode(r#"{"type":"up"}"#), Some(PeerPacket::Up));
        assert_eq!(PeerPacket::decode(r#"{"type":"shoot"}"#), Some(PeerPacket::Shoot));
        assert_eq!(
            PeerPacket::decode(r#"{"type":"asteroid"}"#),
            Some(PeerPacket::Asteroid)
        );
    }

    #[test]
    fn test_peer_packet_malformed_is_ignored() {
        assert_eq!(PeerPacket::decode(r#"{"type":"warp"}"#), None);
        assert_eq!(PeerPacket::decode(r#"{"kind":"up"}"#), None);
        assert_eq!(PeerPacket::decode("not json"), None);
    }

    #[test]
    fn test_peer_packet_encode_shape() {
        assert_eq!(PeerPacket::Left.encode(), r#"{"type":"left"}"#);
    }

    #[test]
    fn test_peer_packet_into_command() {
        let cmd = PeerPacket::Down.into_command(VehicleKind::Ufo).unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::Move {
                vehicle: VehicleKind::Ufo,
                direction: Direction::Down
            }
        ));

        let shot = PeerPacket::Shoot.into_command(VehicleKind::Ufo).unwrap();
        assert!(matches!(
            shot,
            PlayerCommand::Shoot { vehicle: VehicleKind::Ufo, degrees } if degrees == UFO_FACING_DEGREES
        ));

        assert!(PeerPacket::Asteroid.into_command(VehicleKind::Ufo).is_none());
    }

    #[test]
    fn test_peer_packet_from_command() {
        let cmd = PlayerCommand::Move {
            vehicle: VehicleKind::Spaceship,
            direction: Direction::Right,
        };
        assert_eq!(PeerPacket::from_command(&cmd), Some(PeerPacket::Right));
        let shot = PlayerCommand::Shoot {
            vehicle: VehicleKind::Spaceship,
            degrees: 12.0,
        };
        assert_eq!(PeerPacket::from_command(&shot), Some(PeerPacket::Shoot));
        assert_eq!(PeerPacket::from_command(&PlayerCommand::ResetMatch), None);
    }
}
