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

//! Module representing the materialised topology.
//!
//! The [`Topology`] is the single owner of all routers. It is derived in one shot from a
//! sequence of parsed relationship records: every unique AS becomes a router, each router's
//! neighbor list is denormalised from the graph (sorted by AS number), and every router is
//! attached a [`GaoRexford`] policy holding a shared reference to the graph. Neither the
//! graph nor the neighbor lists change during a propagation run.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use itertools::Itertools;
use log::info;

use crate::{
    graph::AsGraph,
    parser::AsRel,
    policy::GaoRexford,
    router::{Neighbor, Router},
    types::{AsNum, Relation, TopologyError},
};

/// The set of routers materialised from an AS-relationship graph, keyed by AS number.
#[derive(Debug)]
pub struct Topology {
    graph: Arc<AsGraph>,
    routers: BTreeMap<AsNum, Router>,
}

impl Topology {
    /// One-shot builder: wire the graph and create one router per unique AS referenced by
    /// the records.
    pub fn populate(records: &[AsRel]) -> Self {
        let graph = Arc::new(AsGraph::build(records));

        let mut routers = BTreeMap::new();
        for asn in graph.ases() {
            let neighbors: Vec<Neighbor> = graph
                .all_neighbors(asn)
                .expect("AS taken from the graph itself")
                .iter()
                .map(|&(n, relation)| Neighbor { asn: n, relation })
                .collect();
            let policy = Box::new(GaoRexford::new(asn, graph.clone()));
            routers.insert(asn, Router::new(asn, neighbors, policy));
        }

        info!("topology populated with {} routers", routers.len());
        Self { graph, routers }
    }

    /// The underlying relation graph.
    pub fn graph(&self) -> &AsGraph {
        &self.graph
    }

    /// Look up a router by AS number.
    pub fn router(&self, asn: AsNum) -> Result<&Router, TopologyError> {
        self.routers
            .get(&asn)
            .ok_or(TopologyError::RouterNotFound(asn))
    }

    /// Look up a router by AS number, mutably.
    pub fn router_mut(&mut self, asn: AsNum) -> Result<&mut Router, TopologyError> {
        self.routers
            .get_mut(&asn)
            .ok_or(TopologyError::RouterNotFound(asn))
    }

    /// Whether a router with the given AS number exists.
    pub fn contains(&self, asn: AsNum) -> bool {
        self.routers.contains_key(&asn)
    }

    /// The number of routers.
    pub fn num_routers(&self) -> usize {
        self.routers.len()
    }

    /// Iterate over all routers in ascending order of AS number. This is the read-only
    /// surface consumed by the artifact emitters.
    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.values()
    }

    /// All neighbors of a router (all roles combined), sorted by AS number.
    pub fn neighbors(&self, asn: AsNum) -> Result<Vec<AsNum>, TopologyError> {
        Ok(self.router(asn)?.neighbors().iter().map(|n| n.asn).collect())
    }

    /// The relation on the edge `a -> b`, i.e., what `b` is from the perspective of `a`.
    /// Delegates to the graph.
    pub fn relation(&self, a: AsNum, b: AsNum) -> Result<Relation, TopologyError> {
        self.graph.relation(a, b)
    }

    /// Clear the routing table of every router. Required between propagation runs for
    /// different targets.
    pub fn reset_route_tables(&mut self) {
        for router in self.routers.values_mut() {
            router.reset_route_table();
        }
    }

    /// Render a human-readable dump of the topology for debugging. Not a contract surface.
    pub fn fmt_topology(&self) -> String {
        let mut result = String::new();
        let f = &mut result;
        for router in self.routers.values() {
            writeln!(
                f,
                "{}: {}",
                router,
                router
                    .neighbors()
                    .iter()
                    .map(|n| format!("{} ({})", n.asn, n.relation))
                    .join(", ")
            )
            .unwrap();
        }
        result
    }
}
