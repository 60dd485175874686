// RelSim: AS-Level Route Propagation Simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing all type definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsNum(pub u32);

impl std::fmt::Display for AsNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for AsNum {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<u64> for AsNum {
    fn from(x: u64) -> Self {
        Self(x as u32)
    }
}

impl From<usize> for AsNum {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for AsNum {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

impl<T> From<&T> for AsNum
where
    T: Into<AsNum> + Copy,
{
    fn from(x: &T) -> Self {
        (*x).into()
    }
}

impl std::str::FromStr for AsNum {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches("AS").parse::<u32>().map(AsNum)
    }
}

/// Commercial relationship between two ASes, stored as the label of a directed edge. An edge
/// `A -> B` labelled [`Relation::Customer`] means that B is a customer of A.
///
/// The variant order gives the Gao--Rexford local preference: customer-learned routes beat
/// peer-learned routes beat provider-learned routes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Relation {
    /// The neighbor is a customer (it pays for transit).
    Customer,
    /// The neighbor is a peer (settlement-free).
    Peer,
    /// The neighbor is a provider (we pay for transit).
    Provider,
}

impl Relation {
    /// The integer code used in the CAIDA data and in the preference comparator: `Customer`
    /// is -1, `Peer` is 0, and `Provider` is +1.
    pub fn code(&self) -> i8 {
        match self {
            Relation::Customer => -1,
            Relation::Peer => 0,
            Relation::Provider => 1,
        }
    }

    /// The relation seen from the other endpoint of the edge.
    pub fn inverse(&self) -> Relation {
        match self {
            Relation::Customer => Relation::Provider,
            Relation::Peer => Relation::Peer,
            Relation::Provider => Relation::Customer,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Customer => f.write_str("customer"),
            Relation::Peer => f.write_str("peer"),
            Relation::Provider => f.write_str("provider"),
        }
    }
}

/// Topology Errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The AS number is not present in the topology.
    #[error("Router was not found in the topology: {0}")]
    RouterNotFound(AsNum),
    /// There is no edge between the two ASes.
    #[error("No relationship exists between {0} and {1}")]
    NoRelation(AsNum, AsNum),
}
