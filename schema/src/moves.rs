use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    // Normal
    Tackle,
    Scratch,
    Pound,
    QuickAttack,
    Slash,
    BodySlam,
    Bite,
    Headbutt,
    Struggle,
    Growl,
    TailWhip,
    Leer,
    SwordsDance,
    Harden,
    Sing,
    Glare,
    Whirlwind,
    Roar,
    HornDrill,
    Guillotine,
    Splash,
    // Fighting
    KarateChop,
    LowKick,
    // Fire
    Ember,
    Flamethrower,
    // Water
    WaterGun,
    Surf,
    Bubble,
    Withdraw,
    // Grass
    VineWhip,
    RazorLeaf,
    SleepPowder,
    StunSpore,
    // Electric
    ThunderShock,
    Thunderbolt,
    ThunderWave,
    // Poison
    PoisonSting,
    PoisonPowder,
    Acid,
    Toxic,
    // Ground / Rock
    Earthquake,
    Fissure,
    RockThrow,
    // Psychic
    Confusion,
    Psychic,
    Agility,
    Amnesia,
    Teleport,
    // Ice
    IceBeam,
    // Flying / Bug
    Peck,
    Gust,
    WingAttack,
    StringShot,
}

impl Move {
    /// Human-readable name, e.g. `QuickAttack` -> "Quick Attack".
    pub fn display_name(self) -> String {
        let debug_string = format!("{:?}", self);
        debug_string
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i > 0 && c.is_uppercase() {
                    format!(" {}", c)
                } else {
                    c.to_string()
                }
            })
            .collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
