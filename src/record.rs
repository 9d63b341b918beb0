use std::fmt;

use serde::{Deserialize, Serialize};

/// Passenger sex as recorded on the manifest.
///
/// Variant order is the fixed category order used when sorting grouped
/// output: `Female` before `Male`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => f.write_str("female"),
            Sex::Male => f.write_str("male"),
        }
    }
}

/// One row of the passenger manifest in canonical form.
///
/// `age`, `fare`, and `survived` are nullable: a missing value is normal
/// manifest data, not an error. Mirrored feeds may omit the `survived`
/// column entirely, in which case every row carries `None`.
#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    pub id: u32,
    pub class: u8,
    pub sex: Sex,
    pub age: Option<f64>,
    pub siblings_spouses: u32,
    pub parents_children: u32,
    pub fare: Option<f64>,
    pub survived: Option<bool>,
    pub name: String,
}

impl Passenger {
    /// Passenger plus immediate relatives aboard. Always >= 1.
    pub fn family_size(&self) -> u32 {
        self.siblings_spouses + self.parents_children + 1
    }

    /// True when the passenger traveled without any immediate family.
    pub fn alone(&self) -> bool {
        self.family_size() == 1
    }
}
