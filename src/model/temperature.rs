use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Storage temperature requested by an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    /// The dedicated shelf for this temperature.
    pub fn home_shelf(self) -> ShelfKind {
        match self {
            Temperature::Hot => ShelfKind::Hot,
            Temperature::Cold => ShelfKind::Cold,
            Temperature::Frozen => ShelfKind::Frozen,
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Frozen => "frozen",
        };
        f.write_str(name)
    }
}

/// Identity of one of the four shelves in the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfKind {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl ShelfKind {
    /// Every shelf, in the order they are swept and reported.
    pub const ALL: [ShelfKind; 4] = [
        ShelfKind::Hot,
        ShelfKind::Cold,
        ShelfKind::Frozen,
        ShelfKind::Overflow,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            ShelfKind::Hot => 0,
            ShelfKind::Cold => 1,
            ShelfKind::Frozen => 2,
            ShelfKind::Overflow => 3,
        }
    }
}

impl Display for ShelfKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShelfKind::Hot => "hot",
            ShelfKind::Cold => "cold",
            ShelfKind::Frozen => "frozen",
            ShelfKind::Overflow => "overflow",
        };
        f.write_str(name)
    }
}
