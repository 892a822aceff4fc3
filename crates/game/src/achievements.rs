//! Achievement catalogue and unlock rules.

/// Every achievement the game can award. Stored in saves by [`AchievementId::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstCoin,
    CoinHoarder,
    Tycoon,
    LevelFive,
    LevelTen,
    Bomber,
    Untouchable,
    RunningOnFumes,
    CometChaser,
}

impl AchievementId {
    pub const ALL: [AchievementId; 9] = [
        AchievementId::FirstCoin,
        AchievementId::CoinHoarder,
        AchievementId::Tycoon,
        AchievementId::LevelFive,
        AchievementId::LevelTen,
        AchievementId::Bomber,
        AchievementId::Untouchable,
        AchievementId::RunningOnFumes,
        AchievementId::CometChaser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AchievementId::FirstCoin => "first_coin",
            AchievementId::CoinHoarder => "coin_hoarder",
            AchievementId::Tycoon => "tycoon",
            AchievementId::LevelFive => "level_five",
            AchievementId::LevelTen => "level_ten",
            AchievementId::Bomber => "bomber",
            AchievementId::Untouchable => "untouchable",
            AchievementId::RunningOnFumes => "running_on_fumes",
            AchievementId::CometChaser => "comet_chaser",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            AchievementId::FirstCoin => "First Coin",
            AchievementId::CoinHoarder => "Coin Hoarder",
            AchievementId::Tycoon => "Galactic Tycoon",
            AchievementId::LevelFive => "Deep Space",
            AchievementId::LevelTen => "Edge of the Galaxy",
            AchievementId::Bomber => "Clear Skies",
            AchievementId::Untouchable => "Untouchable",
            AchievementId::RunningOnFumes => "Running on Fumes",
            AchievementId::CometChaser => "Comet Chaser",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstCoin => "Collect your first coin",
            AchievementId::CoinHoarder => "Collect 100 coins in total",
            AchievementId::Tycoon => "Collect 1000 coins in total",
            AchievementId::LevelFive => "Complete level 5",
            AchievementId::LevelTen => "Complete level 10",
            AchievementId::Bomber => "Clear enemies with a bomb",
            AchievementId::Untouchable => "Complete a level without taking damage",
            AchievementId::RunningOnFumes => "Complete a level with less than 10 fuel",
            AchievementId::CometChaser => "Catch a comet coin",
        }
    }
}

/// Facts the unlock rules look at.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    pub lifetime_coins: u64,
    /// Highest level completed.
    pub levels_completed: u32,
    pub bombs_used: u32,
    pub comets_caught: u32,
    /// Set when a level was just completed.
    pub level_cleared: Option<LevelClear>,
}

/// How the most recent level ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelClear {
    pub took_damage: bool,
    pub fuel_left: f32,
}

/// Every achievement whose condition holds for `progress`. Callers unlock
/// each one; repeats are harmless because unlocking is idempotent.
pub fn earned(progress: &Progress) -> Vec<AchievementId> {
    let mut out = Vec::new();
    if progress.lifetime_coins >= 1 {
        out.push(AchievementId::FirstCoin);
    }
    if progress.lifetime_coins >= 100 {
        out.push(AchievementId::CoinHoarder);
    }
    if progress.lifetime_coins >= 1000 {
        out.push(AchievementId::Tycoon);
    }
    if progress.levels_completed >= 5 {
        out.push(AchievementId::LevelFive);
    }
    if progress.levels_completed >= 10 {
        out.push(AchievementId::LevelTen);
    }
    if progress.bombs_used >= 1 {
        out.push(AchievementId::Bomber);
    }
    if progress.comets_caught >= 1 {
        out.push(AchievementId::CometChaser);
    }
    if let Some(clear) = progress.level_cleared {
        if !clear.took_damage {
            out.push(AchievementId::Untouchable);
        }
        if clear.fuel_left < 10.0 {
            out.push(AchievementId::RunningOnFumes);
        }
    }
    out
}
