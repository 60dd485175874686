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

//! Module defining routing policies.
//!
//! A policy decides, for one specific router, which routes are acceptable, which of two
//! routes toward the same destination is preferred, and to which class of neighbors a route
//! may be exported. The default is the standard commercial (Gao--Rexford) policy. Policies
//! are replaceable per router via [`crate::router::Router::set_policy`].

use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    graph::AsGraph,
    route::Route,
    types::{AsNum, Relation},
};

/// Decision functions applied by a single router.
///
/// All three functions are total: they never fail. [`Policy::prefer_route`] panics when
/// called with routes toward different destinations, which is a programming error in the
/// caller.
pub trait Policy: std::fmt::Debug {
    /// Whether the route may enter the routing table at all.
    fn accept_route(&self, route: &Route) -> bool;

    /// Whether `candidate` is strictly preferred over the installed `current`. Both routes
    /// must reach the same destination.
    fn prefer_route(&self, current: &Route, candidate: &Route) -> bool;

    /// Whether a route may be advertised to a neighbor with the given relation.
    fn forward_to(&self, route: &Route, neighbor_relation: Relation) -> bool;
}

/// The standard commercial routing policy (Gao--Rexford).
///
/// * Accept any loop-free route. The `origin_invalid` and `path_end_invalid` flags are
///   carried but not enforced here; policies that reject on them can be layered on top.
/// * Prefer customer-learned routes over peer-learned over provider-learned; break ties by
///   AS-path length, then by the AS number of the neighbor the route was learned from.
/// * Export customer-learned routes to everyone, but peer- and provider-learned routes to
///   customers only (valley-free export).
#[derive(Debug, Clone)]
pub struct GaoRexford {
    asn: AsNum,
    graph: Arc<AsGraph>,
}

impl GaoRexford {
    /// Create the policy for the router with the given AS number. The graph reference is
    /// only ever used for relation lookups.
    pub fn new(asn: AsNum, graph: Arc<AsGraph>) -> Self {
        Self { asn, graph }
    }

    /// The relation at which this router learned the given route: the relation toward the
    /// hop before this router in the path. The previous hop is always a direct neighbor for
    /// routes that travelled through the propagation driver; a missing edge ranks as
    /// customer so that the preference order stays total.
    fn learned_relation(&self, route: &Route) -> Relation {
        let prev = match route.prev_hop() {
            Some(prev) => prev,
            None => return Relation::Customer,
        };
        self.graph
            .relation(self.asn, prev)
            .unwrap_or(Relation::Customer)
    }

    /// The rank of a route: lower is better. Relation code first (customer -1, peer 0,
    /// provider +1), then AS-path length, then the AS number of the learned-from neighbor.
    fn rank(&self, route: &Route) -> (i8, usize, u32) {
        (
            self.learned_relation(route).code(),
            route.path_len(),
            route.prev_hop().unwrap_or_else(|| route.origin()).0,
        )
    }
}

impl Policy for GaoRexford {
    fn accept_route(&self, route: &Route) -> bool {
        !route.contains_cycle()
    }

    fn prefer_route(&self, current: &Route, candidate: &Route) -> bool {
        if current.final_as() != candidate.final_as() {
            panic!(
                "prefer_route called with routes toward different destinations: {} and {}",
                current.final_as(),
                candidate.final_as()
            );
        }
        matches!(
            self.rank(candidate).cmp(&self.rank(current)),
            Ordering::Less
        )
    }

    fn forward_to(&self, route: &Route, neighbor_relation: Relation) -> bool {
        match self.learned_relation(route) {
            // routes learned from a customer may be advertised to anyone
            Relation::Customer => true,
            // routes learned from a peer or provider only go to customers
            Relation::Peer | Relation::Provider => neighbor_relation == Relation::Customer,
        }
    }
}
