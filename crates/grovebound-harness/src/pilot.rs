use glam::Vec2;
use grovebound_core::constants::TICKS_PER_SECOND;
use grovebound_sim::hazard::HazardTarget;
use grovebound_sim::{PlayerInput, Session, Stage};

/// Ticks between strafe direction changes during the boss fight.
const STRAFE_PERIOD_TICKS: u64 = 2 * TICKS_PER_SECOND as u64;

/// Scripted stand-in for a human player.
///
/// While exploring it holds position and shoots the nearest grunt; once the
/// portal opens it walks onto it and steps through. In the arena it strafes
/// along the bottom edge and keeps firing at the boss.
pub fn next_input(session: &Session, tick: u64) -> PlayerInput {
    let player_pos = session.player().position();
    match session.stage() {
        Stage::Exploring => {
            if let Some(portal) = session.portal() {
                let on_portal = portal.intersects(&session.player().bounds());
                return PlayerInput {
                    movement: portal.center - player_pos,
                    aim: None,
                    interact: on_portal,
                };
            }
            let aim = session
                .grunts()
                .iter()
                .map(|g| g.position())
                .min_by(|a, b| {
                    a.distance_squared(player_pos)
                        .total_cmp(&b.distance_squared(player_pos))
                });
            PlayerInput {
                movement: Vec2::ZERO,
                aim,
                interact: false,
            }
        }
        Stage::BossFight => {
            let strafe = if (tick / STRAFE_PERIOD_TICKS) % 2 == 0 {
                Vec2::X
            } else {
                Vec2::NEG_X
            };
            PlayerInput {
                movement: strafe,
                aim: session.boss().map(|b| b.position()),
                interact: false,
            }
        }
        Stage::Finished(_) => PlayerInput::default(),
    }
}
