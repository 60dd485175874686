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

use super::topo;
use crate::route::Route;
use crate::router::Neighbor;
use crate::types::{AsNum, Relation, TopologyError};

#[test]
fn populate_creates_one_router_per_unique_as() {
    let t = topo("1|2|-1|bgp\n1|3|-1|bgp\n2|3|0|bgp\n1|2|-1|bgp");
    assert_eq!(t.num_routers(), 3);
    assert!(t.contains(AsNum(1)));
    assert!(t.contains(AsNum(2)));
    assert!(t.contains(AsNum(3)));
    assert!(!t.contains(AsNum(4)));
}

#[test]
fn neighbor_lists_are_sorted_and_consistent_with_graph() {
    let t = topo("1|5|-1|bgp\n1|3|-1|bgp\n2|1|-1|bgp\n1|4|0|bgp");
    let r = t.router(AsNum(1)).unwrap();
    assert_eq!(
        r.neighbors(),
        &[
            Neighbor {
                asn: AsNum(2),
                relation: Relation::Provider
            },
            Neighbor {
                asn: AsNum(3),
                relation: Relation::Customer
            },
            Neighbor {
                asn: AsNum(4),
                relation: Relation::Peer
            },
            Neighbor {
                asn: AsNum(5),
                relation: Relation::Customer
            },
        ]
    );
    // every neighbor entry matches the label of the graph edge R -> N
    for router in t.routers() {
        for n in router.neighbors() {
            assert_eq!(t.relation(router.asn(), n.asn), Ok(n.relation));
        }
    }
}

#[test]
fn relation_delegates_to_graph() {
    let t = topo("1|2|-1|bgp");
    assert_eq!(t.relation(AsNum(2), AsNum(1)), Ok(Relation::Provider));
    assert_eq!(
        t.relation(AsNum(2), AsNum(7)),
        Err(TopologyError::RouterNotFound(AsNum(7)))
    );
}

#[test]
fn router_lookup_reports_missing_as() {
    let t = topo("1|2|-1|bgp");
    assert!(t.router(AsNum(1)).is_ok());
    assert_eq!(
        t.router(AsNum(9)).unwrap_err(),
        TopologyError::RouterNotFound(AsNum(9))
    );
}

#[test]
fn reset_route_tables_clears_every_rib() {
    let mut t = topo("1|2|-1|bgp\n2|3|-1|bgp");
    t.router_mut(AsNum(2))
        .unwrap()
        .force_route(Route::self_route(AsNum(2)));
    t.router_mut(AsNum(3))
        .unwrap()
        .force_route(Route::self_route(AsNum(3)));
    t.reset_route_tables();
    for router in t.routers() {
        assert!(router.rib().is_empty());
    }
}

#[test]
fn fmt_topology_lists_every_router() {
    let t = topo("1|2|-1|bgp");
    let dump = t.fmt_topology();
    assert!(dump.contains("Router AS1"));
    assert!(dump.contains("AS2 (customer)"));
    assert!(dump.contains("AS1 (provider)"));
}
