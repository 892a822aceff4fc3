//! Collectible coins: weighted kinds, multi-hit collection.

use rand::Rng;

/// Coin rarity. Rarer coins are worth more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinKind {
    Bronze,
    Silver,
    Gold,
    Comet,
}

impl CoinKind {
    /// Weighted pick: 60% bronze, 25% silver, 12% gold, 3% comet.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll = rng.gen::<f32>();
        if roll < 0.60 {
            CoinKind::Bronze
        } else if roll < 0.85 {
            CoinKind::Silver
        } else if roll < 0.97 {
            CoinKind::Gold
        } else {
            CoinKind::Comet
        }
    }

    /// Score awarded on collection.
    pub fn value(self) -> u32 {
        match self {
            CoinKind::Bronze => 10,
            CoinKind::Silver => 25,
            CoinKind::Gold => 50,
            CoinKind::Comet => 150,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            CoinKind::Comet => 26.0,
            _ => 20.0,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            CoinKind::Bronze => [0.8, 0.5, 0.2, 1.0],
            CoinKind::Silver => [0.85, 0.85, 0.9, 1.0],
            CoinKind::Gold => [1.0, 0.84, 0.0, 1.0],
            CoinKind::Comet => [0.4, 0.9, 1.0, 1.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CoinKind::Bronze => "bronze",
            CoinKind::Silver => "silver",
            CoinKind::Gold => "gold",
            CoinKind::Comet => "comet",
        }
    }
}

/// Outcome of a contact check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinHit {
    /// Nothing new happened.
    None,
    /// A fresh contact that did not yet reach the threshold.
    Hit { hits: u32, required: u32 },
    /// The threshold was reached on this contact. Reported once per coin.
    Collected { value: u32 },
}

/// Coin component.
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub kind: CoinKind,
    pub required_hits: u32,
    pub hits: u32,
    pub collected: bool,
    /// Whether the player overlapped this coin on the previous check.
    touching: bool,
}

impl Coin {
    pub fn new(kind: CoinKind, required_hits: u32) -> Self {
        Self {
            kind,
            required_hits: required_hits.max(1),
            hits: 0,
            collected: false,
            touching: false,
        }
    }

    /// Feed the current overlap state. A hit is counted when contact begins,
    /// so one long overlap is one hit.
    pub fn register_contact(&mut self, touching: bool) -> CoinHit {
        let began = touching && !self.touching;
        self.touching = touching;
        if self.collected || !began {
            return CoinHit::None;
        }

        self.hits += 1;
        if self.hits >= self.required_hits {
            self.collected = true;
            CoinHit::Collected {
                value: self.kind.value(),
            }
        } else {
            CoinHit::Hit {
                hits: self.hits,
                required: self.required_hits,
            }
        }
    }

    /// Fraction of hits landed, for rendering.
    pub fn progress(&self) -> f32 {
        self.hits as f32 / self.required_hits as f32
    }
}
