//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Every weapon the catalog knows about, across all seven ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    // Port 1: front fire
    #[default]
    Missile,
    DoubleMissile,
    TripleMissile,
    BeamLaser,
    PowerLaser,
    TriStriker,
    // Port 2: blasters
    Blaster,
    GuideBlaster,
    BlastGuider,
    NukeBlaster,
    SwirlBlaster,
    // Port 3: rear attack
    RearDouble,
    RearGuided,
    RearChaos,
    TeleportFoe,
    RearTriple,
    // Port 4: breakers and guided
    TriBreaker,
    Guided,
    QuintBreaker,
    QuintGuider,
    OctoBreaker,
    SparkFiends,
    // Port 5: aggressive defence
    Swirler,
    ElectroBuds,
    NormalBomb,
    DeathBomb,
    // Port 6: special defence
    DeathTouch,
    Deflector,
    EcmWiper,
    Confusor,
    // Port 7: harmless defence
    Healer,
    GlowShield,
    FadeShield,
    TeleportSelf,
}

impl WeaponType {
    /// The port this weapon mounts on.
    pub fn port(self) -> Port {
        use WeaponType::*;
        match self {
            Missile | DoubleMissile | TripleMissile | BeamLaser | PowerLaser | TriStriker => {
                Port::P1
            }
            Blaster | GuideBlaster | BlastGuider | NukeBlaster | SwirlBlaster => Port::P2,
            RearDouble | RearGuided | RearChaos | TeleportFoe | RearTriple => Port::P3,
            TriBreaker | Guided | QuintBreaker | QuintGuider | OctoBreaker | SparkFiends => {
                Port::P4
            }
            Swirler | ElectroBuds | NormalBomb | DeathBomb => Port::P5,
            DeathTouch | Deflector | EcmWiper | Confusor => Port::P6,
            Healer | GlowShield | FadeShield | TeleportSelf => Port::P7,
        }
    }
}

/// One of the seven mutually exclusive weapon mounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    #[default]
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
}

impl Port {
    pub const ALL: [Port; 7] = [
        Port::P1,
        Port::P2,
        Port::P3,
        Port::P4,
        Port::P5,
        Port::P6,
        Port::P7,
    ];

    /// Port from its 1-based number. Out-of-range numbers yield `None`.
    pub fn from_number(n: u8) -> Option<Port> {
        match n {
            1..=7 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    /// 1-based port number.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based index into per-port arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Match lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Menu,
    Playing,
    Shop,
    GameOver,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndReason {
    /// One or zero tanks left alive.
    Kill,
    /// The round timer ran out.
    Timeout,
}

/// Binary stat upgrades sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Speed,
    Rotation,
    Armor,
    Energy,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Speed,
        UpgradeKind::Rotation,
        UpgradeKind::Armor,
        UpgradeKind::Energy,
    ];
}

/// Tank hull archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankArchetype {
    #[default]
    Standard,
    RotraI,
    RotraII,
    OpecI,
    OpecII,
}

impl TankArchetype {
    pub const ALL: [TankArchetype; 5] = [
        TankArchetype::Standard,
        TankArchetype::RotraI,
        TankArchetype::RotraII,
        TankArchetype::OpecI,
        TankArchetype::OpecII,
    ];
}

/// Logical input roles, independent of physical key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Fire,
    ChangeWeapon,
    SelectPort(Port),
}
