//! Guimerà–Amaral role classification
//!
//! Each node with a participation coefficient gets one of seven roles from
//! its within-community degree z-score and participation coefficient P:
//!
//! | z        | P               | Role |
//! |----------|-----------------|------|
//! | z < 2.5  | P = 0           | R1   |
//! | z < 2.5  | 0 < P < 0.625   | R2   |
//! | z < 2.5  | 0.625 ≤ P < 0.8 | R3   |
//! | z < 2.5  | P ≥ 0.8         | R4   |
//! | z ≥ 2.5  | P < 0.3         | R5   |
//! | z ≥ 2.5  | 0.3 ≤ P < 0.75  | R6   |
//! | z ≥ 2.5  | P ≥ 0.75        | R7   |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{NodeKey, NodeMap, RoleGraph};
use crate::observer::Stage;

/// z-score from which a node counts as a hub
pub const HUB_THRESHOLD: f64 = 2.5;

/// Structural role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Ultra-peripheral: all links inside its own community
    R1,
    /// Peripheral: most links inside its own community
    R2,
    /// Non-hub connector: many links to other communities
    R3,
    /// Non-hub kinless: links spread evenly across communities
    R4,
    /// Provincial hub: hub with most links inside its community
    R5,
    /// Connector hub: hub with many links to other communities
    R6,
    /// Kinless hub: hub with links spread evenly across communities
    R7,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::R1,
        Role::R2,
        Role::R3,
        Role::R4,
        Role::R5,
        Role::R6,
        Role::R7,
    ];

    /// Classify a node from its z-score and participation coefficient
    pub fn classify(z: f64, p: f64) -> Role {
        if z < HUB_THRESHOLD {
            if p == 0.0 {
                Role::R1
            } else if p < 0.625 {
                Role::R2
            } else if p < 0.8 {
                Role::R3
            } else {
                Role::R4
            }
        } else if p < 0.3 {
            Role::R5
        } else if p < 0.75 {
            Role::R6
        } else {
            Role::R7
        }
    }

    /// Guimerà–Amaral name of the role
    pub fn name(self) -> &'static str {
        match self {
            Role::R1 => "ultra-peripheral",
            Role::R2 => "peripheral",
            Role::R3 => "non-hub connector",
            Role::R4 => "non-hub kinless",
            Role::R5 => "provincial hub",
            Role::R6 => "connector hub",
            Role::R7 => "kinless hub",
        }
    }

    pub fn is_hub(self) -> bool {
        matches!(self, Role::R5 | Role::R6 | Role::R7)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<N: NodeKey> RoleGraph<N> {
    /// Role of every node that has a participation coefficient.
    ///
    /// Isolated nodes have no entry. Cached per `weight_key`.
    pub fn roles(&self, weight_key: &str) -> Result<Arc<NodeMap<N, Role>>> {
        self.memoized(
            &self.cache.roles,
            weight_key.to_string(),
            Stage::Roles,
            || {
                let z_scores = self.within_community_degrees(weight_key)?;
                let participation = self.participation_coefficients(weight_key)?;

                Ok(participation
                    .iter()
                    .filter_map(|(node, &p)| {
                        z_scores
                            .get(node)
                            .map(|&z| (node.clone(), Role::classify(z, p)))
                    })
                    .collect())
            },
        )
    }
}

/// Number of nodes per role, listing every role even when unused
pub fn role_distribution<N: NodeKey>(roles: &NodeMap<N, Role>) -> BTreeMap<Role, usize> {
    let mut counts: BTreeMap<Role, usize> = Role::ALL.iter().map(|&role| (role, 0)).collect();
    for role in roles.values() {
        *counts.entry(*role).or_insert(0) += 1;
    }
    counts
}
