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

use pretty_assertions::assert_eq;

use crate::graph::AsGraph;
use crate::parser::AsRelParser;
use crate::types::{AsNum, Relation, TopologyError};

fn graph(records: &str) -> AsGraph {
    AsGraph::build(&AsRelParser::default().parse_str(records).unwrap())
}

#[test]
fn p2c_materialises_both_directions() {
    let g = graph("1|2|-1|bgp");
    assert_eq!(g.relation(AsNum(1), AsNum(2)), Ok(Relation::Customer));
    assert_eq!(g.relation(AsNum(2), AsNum(1)), Ok(Relation::Provider));
}

#[test]
fn p2p_materialises_both_directions() {
    let g = graph("1|2|0|bgp");
    assert_eq!(g.relation(AsNum(1), AsNum(2)), Ok(Relation::Peer));
    assert_eq!(g.relation(AsNum(2), AsNum(1)), Ok(Relation::Peer));
}

#[test]
fn customer_edges_have_symmetric_provider_edges() {
    let g = graph("1|2|-1|bgp\n1|3|-1|bgp\n2|4|-1|bgp\n3|4|0|bgp");
    for asn in g.ases() {
        for customer in g.neighbors(asn, Relation::Customer).unwrap() {
            assert_eq!(g.relation(customer, asn), Ok(Relation::Provider));
        }
    }
}

#[test]
fn duplicate_insertions_are_idempotent() {
    let once = graph("1|2|-1|bgp\n2|3|0|bgp");
    let twice = graph("1|2|-1|bgp\n2|3|0|bgp\n1|2|-1|bgp\n2|3|0|bgp");
    assert_eq!(once.num_ases(), twice.num_ases());
    assert_eq!(once.num_edges(), twice.num_edges());
}

#[test]
fn neighbors_by_role() {
    // 1 is the provider of 2 and 3; 2 and 3 peer; 3 is the provider of 4
    let g = graph("1|2|-1|bgp\n1|3|-1|bgp\n2|3|0|bgp\n3|4|-1|bgp");
    assert_eq!(
        g.neighbors(AsNum(1), Relation::Customer).unwrap(),
        vec![AsNum(2), AsNum(3)]
    );
    assert_eq!(g.neighbors(AsNum(1), Relation::Provider).unwrap(), vec![]);
    assert_eq!(
        g.neighbors(AsNum(3), Relation::Provider).unwrap(),
        vec![AsNum(1)]
    );
    assert_eq!(
        g.neighbors(AsNum(3), Relation::Peer).unwrap(),
        vec![AsNum(2)]
    );
    assert_eq!(
        g.neighbors(AsNum(3), Relation::Customer).unwrap(),
        vec![AsNum(4)]
    );
}

#[test]
fn all_neighbors_is_sorted_union_of_roles() {
    let g = graph("1|5|-1|bgp\n1|3|-1|bgp\n2|1|-1|bgp\n1|4|0|bgp");
    assert_eq!(
        g.all_neighbors(AsNum(1)).unwrap(),
        &[
            (AsNum(2), Relation::Provider),
            (AsNum(3), Relation::Customer),
            (AsNum(4), Relation::Peer),
            (AsNum(5), Relation::Customer),
        ]
    );
}

#[test]
fn predecessors_mirror_adjacency() {
    let g = graph("1|2|-1|bgp\n2|3|0|bgp");
    // 2's incoming edges: 1 -> 2 (customer) and 3 -> 2 (peer)
    assert_eq!(
        g.all_predecessors(AsNum(2)).unwrap(),
        &[(AsNum(1), Relation::Customer), (AsNum(3), Relation::Peer)]
    );
}

#[test]
fn missing_lookups_are_errors() {
    let g = graph("1|2|-1|bgp\n3|4|-1|bgp");
    assert_eq!(
        g.relation(AsNum(1), AsNum(9)),
        Err(TopologyError::RouterNotFound(AsNum(9)))
    );
    assert_eq!(
        g.relation(AsNum(1), AsNum(3)),
        Err(TopologyError::NoRelation(AsNum(1), AsNum(3)))
    );
    assert_eq!(
        g.neighbors(AsNum(9), Relation::Peer),
        Err(TopologyError::RouterNotFound(AsNum(9)))
    );
}
