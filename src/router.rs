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

//! Module defining a router representing one AS.

use std::collections::BTreeMap;
use std::fmt::Write;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    policy::Policy,
    route::Route,
    types::{AsNum, Relation},
};

/// A neighbor of a router: the neighboring AS together with the relation from the owning
/// router's perspective (the label on the edge `R -> N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Neighbor {
    /// The AS number of the neighbor.
    pub asn: AsNum,
    /// What the neighbor is to the owning router.
    pub relation: Relation,
}

/// A router representing a single AS.
///
/// Routers are created by [`crate::topology::Topology::populate`] and live for the duration
/// of one simulation run. Their routing table is mutated only through [`Router::learn_route`],
/// [`Router::force_route`] and [`Router::reset_route_table`].
#[derive(Debug)]
pub struct Router {
    /// AS number of the router.
    asn: AsNum,
    /// Neighbors of the router, denormalised from the graph at topology init and sorted by
    /// AS number so that tie-breaks are reproducible across runs.
    neighbors: Vec<Neighbor>,
    /// The policy applied by this router.
    policy: Box<dyn Policy>,
    /// Routing table: best known route per destination AS.
    rib: BTreeMap<AsNum, Route>,
    /// Placeholder for BGPsec-like semantics; not consulted when originating routes.
    is_critical: bool,
}

impl Router {
    pub(crate) fn new(asn: AsNum, neighbors: Vec<Neighbor>, policy: Box<dyn Policy>) -> Self {
        debug_assert!(neighbors.windows(2).all(|w| w[0].asn < w[1].asn));
        Self {
            asn,
            neighbors,
            policy,
            rib: BTreeMap::new(),
            is_critical: false,
        }
    }

    /// The AS number of the router.
    pub fn asn(&self) -> AsNum {
        self.asn
    }

    /// The neighbors of the router, sorted by AS number.
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// The relation toward a specific neighbor, if it is one.
    pub fn neighbor_relation(&self, asn: AsNum) -> Option<Relation> {
        self.neighbors
            .binary_search_by(|n| n.asn.cmp(&asn))
            .ok()
            .map(|i| self.neighbors[i].relation)
    }

    /// The current routing table, keyed by destination AS.
    pub fn rib(&self) -> &BTreeMap<AsNum, Route> {
        &self.rib
    }

    /// The best known route toward the given destination, if any.
    pub fn route_to(&self, destination: AsNum) -> Option<&Route> {
        self.rib.get(&destination)
    }

    /// Whether this router is marked critical.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Mark or unmark this router as critical.
    pub fn set_critical(&mut self, critical: bool) {
        self.is_critical = critical;
    }

    /// Replace the policy of this router.
    pub fn set_policy(&mut self, policy: Box<dyn Policy>) {
        self.policy = policy;
    }

    /// Clear the routing table. Must be called on every router before re-running
    /// propagation for a different target.
    pub fn reset_route_table(&mut self) {
        self.rib.clear();
    }

    /// Unconditionally install a route, keyed by its destination AS. Used to seed the
    /// target with its self-route.
    pub fn force_route(&mut self, route: Route) {
        self.rib.insert(route.final_as(), route);
    }

    /// The degenerate route toward this router itself. Always authenticated.
    pub fn self_route(&self) -> Route {
        Route::self_route(self.asn)
    }

    /// Originate a new advertisement of this router toward `next_hop`: path
    /// `[self, next_hop]`, valid and authenticated.
    pub fn originate_route(&self, next_hop: AsNum) -> Route {
        Route::new(vec![self.asn, next_hop], false, false, true)
    }

    /// Forward an existing route toward `next_hop`, yielding a new route with the neighbor
    /// appended and all flags copied.
    pub fn forward_route(&self, route: &Route, next_hop: AsNum) -> Route {
        route.extended(next_hop)
    }

    /// Consider a route at this router. The route's path must end with this router.
    ///
    /// The route is discarded when this router already appears earlier in the path, when the
    /// policy rejects it, or when the installed route for the same destination is not
    /// strictly worse. Otherwise it is installed into the routing table, and the returned
    /// neighbors are those to which the forwarded route should be announced next. An empty
    /// result means nothing changed or nothing may be exported.
    pub fn learn_route(&mut self, route: &Route) -> Vec<Neighbor> {
        trace!("{}: considering {}", self.asn, route);

        // loop suppression: cheaper and more precise than the full cycle check while the
        // route is being considered *at* this router
        if self.is_in_path(route) {
            trace!("{}: discard {} (already in path)", self.asn, route);
            return Vec::new();
        }

        if !self.policy.accept_route(route) {
            trace!("{}: reject {}", self.asn, route);
            return Vec::new();
        }

        let destination = route.final_as();
        if let Some(current) = self.rib.get(&destination) {
            if !self.policy.prefer_route(current, route) {
                trace!("{}: keep {} over {}", self.asn, current, route);
                return Vec::new();
            }
        }

        let forward: Vec<Neighbor> = self
            .neighbors
            .iter()
            .filter(|n| self.policy.forward_to(route, n.relation))
            .copied()
            .collect();

        trace!("{}: install {}", self.asn, route);
        self.rib.insert(destination, route.clone());

        forward
    }

    /// Whether this router appears in the route's path, excluding the last element.
    fn is_in_path(&self, route: &Route) -> bool {
        let path = route.path();
        path[..path.len() - 1].contains(&self.asn)
    }

    /// Render the routing table for display.
    pub fn fmt_rib(&self) -> String {
        let mut result = String::new();
        let f = &mut result;
        for (destination, route) in self.rib.iter() {
            writeln!(f, "  [{destination}]: {route}").unwrap();
        }
        result
    }
}

impl std::fmt::Display for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Router {}", self.asn)
    }
}
