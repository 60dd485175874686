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

//! Module defining the route value type.

use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::AsNum;

/// An immutable route advertisement.
///
/// A route describes a path toward its destination AS along with the provenance flags
/// carried end-to-end. `path[0]` is the origin of the advertisement (which equals the
/// destination the route reaches), and the last element is the AS currently holding or
/// considering the route. A route never mutates; forwarding yields a new route with the
/// neighbor appended (see [`Route::extended`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    /// Ordered AS path, origin first. Always non-empty.
    path: Vec<AsNum>,
    /// The destination this route reaches. Always equal to `path[0]`.
    final_as: AsNum,
    /// RPKI origin validation verdict, carried as an input-provided flag.
    origin_invalid: bool,
    /// BGPsec path-end validation verdict, carried as an input-provided flag.
    path_end_invalid: bool,
    /// Whether the route was originated by an authenticated (BGPsec-enabled) speaker.
    authenticated: bool,
}

impl Route {
    /// Create a route from a raw path and its provenance flags.
    ///
    /// # Panics
    /// Panics if `path` is empty; a route always has at least its origin in the path.
    pub fn new(path: Vec<AsNum>, origin_invalid: bool, path_end_invalid: bool, authenticated: bool) -> Self {
        assert!(!path.is_empty(), "a route must contain at least its origin");
        let final_as = path[0];
        Self {
            path,
            final_as,
            origin_invalid,
            path_end_invalid,
            authenticated,
        }
    }

    /// The degenerate route an AS installs toward itself: a path of length 1, valid and
    /// authenticated.
    pub fn self_route(asn: AsNum) -> Self {
        Self::new(vec![asn], false, false, true)
    }

    /// A new route with `next_hop` appended to the path and all flags copied.
    pub fn extended(&self, next_hop: AsNum) -> Self {
        let mut path = self.path.clone();
        path.push(next_hop);
        Self {
            path,
            final_as: self.final_as,
            origin_invalid: self.origin_invalid,
            path_end_invalid: self.path_end_invalid,
            authenticated: self.authenticated,
        }
    }

    /// The full AS path, origin first.
    pub fn path(&self) -> &[AsNum] {
        &self.path
    }

    /// The destination of the route. Equal to the origin `path[0]`.
    pub fn final_as(&self) -> AsNum {
        self.final_as
    }

    /// The origin of the advertisement (`path[0]`).
    pub fn origin(&self) -> AsNum {
        self.path[0]
    }

    /// The AS currently holding (or considering) the route: the last element of the path.
    pub fn holder(&self) -> AsNum {
        *self.path.last().unwrap()
    }

    /// The hop before the holder, i.e., the neighbor the holder learned the route from.
    /// `None` for the origin's own self-route.
    pub fn prev_hop(&self) -> Option<AsNum> {
        (self.path.len() >= 2).then(|| self.path[self.path.len() - 2])
    }

    /// The number of ASes in the path.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// `true` iff any AS appears more than once in the path.
    pub fn contains_cycle(&self) -> bool {
        let mut visited = HashSet::with_capacity(self.path.len());
        self.path.iter().any(|asn| !visited.insert(*asn))
    }

    /// RPKI origin validation flag.
    pub fn origin_invalid(&self) -> bool {
        self.origin_invalid
    }

    /// BGPsec path-end validation flag.
    pub fn path_end_invalid(&self) -> bool {
        self.path_end_invalid
    }

    /// Whether the route was originated by an authenticated speaker.
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route(dest={}, path=[{}])",
            self.final_as,
            self.path.iter().map(|asn| asn.to_string()).join(", ")
        )
    }
}
