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

//! Module defining the directed, relation-labelled AS graph.
//!
//! The graph is built once from a sequence of [`AsRel`] records and is immutable afterwards.
//! Every record materialises edges in both directions so that both endpoints can answer
//! neighbor queries: a p2c record `A|B|-1` creates `A -> B` labelled [`Relation::Customer`]
//! and `B -> A` labelled [`Relation::Provider`], while a p2p record creates both directions
//! labelled [`Relation::Peer`]. The provider-to-customer sub-relation forms a DAG (customer
//! cones); peer edges induce cycles and are expected to.

use std::collections::HashMap;

use log::info;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::{
    parser::{AsRel, AsRelKind},
    types::{AsNum, Relation, TopologyError},
};

/// Directed graph over AS numbers with edges labelled by their commercial relationship.
///
/// Adjacency and predecessor maps are computed once after all edges are inserted, because
/// recomputing them on every lookup dominates the cost of a simulation run. The maps are
/// sorted by neighbor AS number so that all iteration over neighbors is deterministic.
#[derive(Debug, Clone)]
pub struct AsGraph {
    graph: DiGraph<AsNum, Relation>,
    nodes: HashMap<AsNum, NodeIndex>,
    adjacency: HashMap<AsNum, Vec<(AsNum, Relation)>>,
    predecessors: HashMap<AsNum, Vec<(AsNum, Relation)>>,
}

impl AsGraph {
    /// Build the graph from parsed records. Duplicate records are tolerated: inserting a
    /// vertex or an edge that already exists is a no-op.
    pub fn build(records: &[AsRel]) -> Self {
        let mut graph: DiGraph<AsNum, Relation> = DiGraph::new();
        let mut nodes: HashMap<AsNum, NodeIndex> = HashMap::new();

        for rel in records {
            let a = intern(&mut graph, &mut nodes, rel.as1);
            let b = intern(&mut graph, &mut nodes, rel.as2);
            let label = match rel.kind {
                AsRelKind::ProviderCustomer => Relation::Customer,
                AsRelKind::PeerPeer => Relation::Peer,
            };
            add_edge_once(&mut graph, a, b, label);
            add_edge_once(&mut graph, b, a, label.inverse());
        }

        let mut adjacency: HashMap<AsNum, Vec<(AsNum, Relation)>> = HashMap::new();
        let mut predecessors: HashMap<AsNum, Vec<(AsNum, Relation)>> = HashMap::new();
        for (&asn, &idx) in nodes.iter() {
            let mut out: Vec<(AsNum, Relation)> = graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|e| (graph[e.target()], *e.weight()))
                .collect();
            out.sort();
            adjacency.insert(asn, out);

            let mut inc: Vec<(AsNum, Relation)> = graph
                .edges_directed(idx, Direction::Incoming)
                .map(|e| (graph[e.source()], *e.weight()))
                .collect();
            inc.sort();
            predecessors.insert(asn, inc);
        }

        info!(
            "AS graph built: {} ASes, {} directed edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self {
            graph,
            nodes,
            adjacency,
            predecessors,
        }
    }

    /// Check if an AS is present in the graph.
    pub fn contains(&self, asn: AsNum) -> bool {
        self.nodes.contains_key(&asn)
    }

    /// Iterate over all ASes in ascending order of AS number.
    pub fn ases(&self) -> impl Iterator<Item = AsNum> + '_ {
        let mut all: Vec<AsNum> = self.nodes.keys().copied().collect();
        all.sort();
        all.into_iter()
    }

    /// The number of ASes in the graph.
    pub fn num_ases(&self) -> usize {
        self.graph.node_count()
    }

    /// The number of directed edges in the graph (twice the number of links).
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// All neighbors of an AS reachable via an edge of the given role, sorted by AS number.
    /// `Relation::Customer` selects the customers of `asn`, `Relation::Peer` its peers, and
    /// `Relation::Provider` its providers.
    pub fn neighbors(&self, asn: AsNum, role: Relation) -> Result<Vec<AsNum>, TopologyError> {
        Ok(self
            .adjacency
            .get(&asn)
            .ok_or(TopologyError::RouterNotFound(asn))?
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(n, _)| *n)
            .collect())
    }

    /// All neighbors of an AS together with their relation (from the perspective of `asn`),
    /// sorted by AS number.
    pub fn all_neighbors(&self, asn: AsNum) -> Result<&[(AsNum, Relation)], TopologyError> {
        self.adjacency
            .get(&asn)
            .map(Vec::as_slice)
            .ok_or(TopologyError::RouterNotFound(asn))
    }

    /// All ASes with an edge pointing at `asn`, together with the label of that incoming
    /// edge, sorted by AS number.
    pub fn all_predecessors(&self, asn: AsNum) -> Result<&[(AsNum, Relation)], TopologyError> {
        self.predecessors
            .get(&asn)
            .map(Vec::as_slice)
            .ok_or(TopologyError::RouterNotFound(asn))
    }

    /// The relation label on the edge `a -> b`, i.e., what `b` is from the perspective of
    /// `a`.
    pub fn relation(&self, a: AsNum, b: AsNum) -> Result<Relation, TopologyError> {
        let ia = *self
            .nodes
            .get(&a)
            .ok_or(TopologyError::RouterNotFound(a))?;
        let ib = *self
            .nodes
            .get(&b)
            .ok_or(TopologyError::RouterNotFound(b))?;
        self.graph
            .find_edge(ia, ib)
            .map(|e| self.graph[e])
            .ok_or(TopologyError::NoRelation(a, b))
    }
}

/// Get the node index for an AS, adding a new vertex if needed.
fn intern(
    graph: &mut DiGraph<AsNum, Relation>,
    nodes: &mut HashMap<AsNum, NodeIndex>,
    asn: AsNum,
) -> NodeIndex {
    *nodes.entry(asn).or_insert_with(|| graph.add_node(asn))
}

/// Insert an edge unless it already exists.
fn add_edge_once(
    graph: &mut DiGraph<AsNum, Relation>,
    a: NodeIndex,
    b: NodeIndex,
    relation: Relation,
) {
    if graph.find_edge(a, b).is_none() {
        graph.add_edge(a, b, relation);
    }
}
