use glam::Vec2;
use grovebound_core::config::BossConfig;

/// Charge attack sub-machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeState {
    /// Cooling down since the last dash started.
    Waiting,
    /// Aim is locked; the dash follows after the telegraph duration.
    Telegraphing { direction: Vec2, started_at: u64 },
    /// Moving along the locked direction. `travelled` is the distance
    /// already applied to the boss.
    Dashing {
        direction: Vec2,
        started_at: u64,
        travelled: f32,
    },
}

/// Timing and distance parameters of a charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeParams {
    pub cooldown_ms: u64,
    pub telegraph_ms: u64,
    /// Pixels per second.
    pub dash_speed: f32,
    pub max_distance: f32,
}

impl From<&BossConfig> for ChargeParams {
    fn from(cfg: &BossConfig) -> Self {
        Self {
            cooldown_ms: cfg.charge_cooldown_ms,
            telegraph_ms: cfg.telegraph_ms,
            dash_speed: cfg.dash_speed,
            max_distance: cfg.dash_max_distance,
        }
    }
}

impl ChargeParams {
    /// Total distance covered `elapsed_ms` after the dash started.
    pub fn distance_at(&self, elapsed_ms: u64) -> f32 {
        (self.dash_speed * elapsed_ms as f32 / 1000.0).min(self.max_distance)
    }
}

/// Telegraph-then-dash attack with its own cooldown clock.
///
/// At most one transition happens per `advance` call.
#[derive(Debug, Clone)]
pub struct ChargeAttack {
    params: ChargeParams,
    state: ChargeState,
    /// Start of the most recent dash. `None` until the first dash.
    last_dash: Option<u64>,
}

impl ChargeAttack {
    pub fn new(params: ChargeParams) -> Self {
        Self {
            params,
            state: ChargeState::Waiting,
            last_dash: None,
        }
    }

    pub fn state(&self) -> ChargeState {
        self.state
    }

    pub fn params(&self) -> &ChargeParams {
        &self.params
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.state, ChargeState::Dashing { .. })
    }

    pub fn is_telegraphing(&self) -> bool {
        matches!(self.state, ChargeState::Telegraphing { .. })
    }

    /// Step the sub-machine and return the displacement to apply to the boss
    /// this tick. Displacement is only ever non-zero while dashing.
    pub fn advance(&mut self, now: u64, boss_pos: Vec2, player_pos: Vec2) -> Vec2 {
        match self.state {
            ChargeState::Waiting => {
                let ready = self
                    .last_dash
                    .map_or(true, |t| now.saturating_sub(t) > self.params.cooldown_ms);
                if ready {
                    let direction = (player_pos - boss_pos).normalize_or_zero();
                    log::debug!("charge telegraph toward {direction}");
                    self.state = ChargeState::Telegraphing {
                        direction,
                        started_at: now,
                    };
                }
                Vec2::ZERO
            }
            ChargeState::Telegraphing {
                direction,
                started_at,
            } => {
                if now.saturating_sub(started_at) > self.params.telegraph_ms {
                    self.last_dash = Some(now);
                    self.state = ChargeState::Dashing {
                        direction,
                        started_at: now,
                        travelled: 0.0,
                    };
                }
                Vec2::ZERO
            }
            ChargeState::Dashing {
                direction,
                started_at,
                travelled,
            } => {
                let target = self.params.distance_at(now.saturating_sub(started_at));
                let step = (target - travelled).max(0.0);
                let travelled = travelled + step;
                self.state = if travelled >= self.params.max_distance {
                    ChargeState::Waiting
                } else {
                    ChargeState::Dashing {
                        direction,
                        started_at,
                        travelled,
                    }
                };
                direction * step
            }
        }
    }
}
