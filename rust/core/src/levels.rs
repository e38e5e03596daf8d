// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor level datums

use crate::error::{Error, Result};

/// Height table of the two-story house
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelHeights {
    /// Ground floor datum
    pub ground: f64,
    /// First floor datum
    pub first_floor: f64,
    /// Top of the wall shell
    pub eaves: f64,
}

/// One floor's vertical slice of the wall shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub index: usize,
    pub base_y: f64,
    pub height: f64,
}

impl Floor {
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.base_y + self.height
    }
}

impl LevelHeights {
    pub fn new(ground: f64, first_floor: f64, eaves: f64) -> Result<Self> {
        let levels = Self {
            ground,
            first_floor,
            eaves,
        };
        levels.validate()?;
        Ok(levels)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.ground < self.first_floor && self.first_floor < self.eaves) {
            return Err(Error::invalid(
                "levels",
                format!(
                    "datums must ascend (ground={}, first_floor={}, eaves={})",
                    self.ground, self.first_floor, self.eaves
                ),
            ));
        }
        Ok(())
    }

    pub fn floors(&self) -> [Floor; 2] {
        [
            Floor {
                index: 0,
                base_y: self.ground,
                height: self.first_floor - self.ground,
            },
            Floor {
                index: 1,
                base_y: self.first_floor,
                height: self.eaves - self.first_floor,
            },
        ]
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            ground: self.ground * factor,
            first_floor: self.first_floor * factor,
            eaves: self.eaves * factor,
        }
    }
}

impl Default for LevelHeights {
    fn default() -> Self {
        Self {
            ground: 0.0,
            first_floor: 2.75,
            eaves: 5.6,
        }
    }
}
