//! Per-level objective checklist. Completed objectives pay a score bonus
//! when the level ends.

use crate::level::LevelParams;

/// Fuel that must remain for the reserve objective.
const FUEL_RESERVE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Collect every coin in the sector.
    CollectAll,
    /// Finish with more than half a tank.
    FuelReserve,
    /// Finish without using the bomb.
    NoBomb,
    /// Finish inside the level's time limit.
    SpeedRun,
}

impl Objective {
    pub fn bonus(self) -> u64 {
        match self {
            Objective::CollectAll => 100,
            Objective::FuelReserve => 150,
            Objective::NoBomb => 200,
            Objective::SpeedRun => 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveStatus {
    pub objective: Objective,
    pub label: String,
    pub completed: bool,
}

/// Checklist for the current level.
#[derive(Debug, Clone)]
pub struct MissionLog {
    pub level: u32,
    pub time_limit: f32,
    pub elapsed: f32,
    pub bomb_used: bool,
    pub objectives: Vec<ObjectiveStatus>,
}

impl MissionLog {
    pub fn for_level(params: &LevelParams) -> Self {
        let status = |objective: Objective, label: String| ObjectiveStatus {
            objective,
            label,
            completed: false,
        };
        Self {
            level: params.level,
            time_limit: params.time_limit,
            elapsed: 0.0,
            bomb_used: false,
            objectives: vec![
                status(Objective::CollectAll, format!("Collect all {} coins", params.coins_needed)),
                status(Objective::FuelReserve, format!("Finish with over {FUEL_RESERVE:.0} fuel")),
                status(Objective::NoBomb, "Finish without using the bomb".to_string()),
                status(
                    Objective::SpeedRun,
                    format!("Finish within {:.0} seconds", params.time_limit),
                ),
            ],
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn record_bomb(&mut self) {
        self.bomb_used = true;
    }

    /// Close out the checklist on level completion. Returns the objectives
    /// completed by this call.
    pub fn complete(&mut self, fuel_left: f32) -> Vec<Objective> {
        let mut newly = Vec::new();
        for status in &mut self.objectives {
            if status.completed {
                continue;
            }
            let done = match status.objective {
                Objective::CollectAll => true,
                Objective::FuelReserve => fuel_left > FUEL_RESERVE,
                Objective::NoBomb => !self.bomb_used,
                Objective::SpeedRun => self.elapsed <= self.time_limit,
            };
            if done {
                status.completed = true;
                newly.push(status.objective);
            }
        }
        newly
    }

    pub fn completed_count(&self) -> usize {
        self.objectives.iter().filter(|s| s.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_fast_run_completes_everything() {
        let mut log = MissionLog::for_level(&LevelParams::for_level(1));
        log.tick(10.0);
        let done = log.complete(80.0);
        assert_eq!(done.len(), 4);
        assert!(log.complete(80.0).is_empty());
        assert_eq!(log.completed_count(), 4);
    }

    #[test]
    fn bomb_and_slow_run_miss_objectives() {
        let params = LevelParams::for_level(1);
        let mut log = MissionLog::for_level(&params);
        log.record_bomb();
        log.tick(params.time_limit + 1.0);
        let done = log.complete(20.0);
        assert_eq!(done, vec![Objective::CollectAll]);
    }

    #[test]
    fn labels_mention_coin_count() {
        let log = MissionLog::for_level(&LevelParams::for_level(2));
        assert_eq!(log.objectives[0].label, "Collect all 20 coins");
    }
}
