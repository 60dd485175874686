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

//! Module implementing the breadth-first propagation driver.
//!
//! The driver seeds announcements from the target AS and drains a queue of pending
//! advertisements until the routing tables stabilise:
//!
//! 1. Install the target's self-route.
//! 2. Enqueue an origination toward every neighbor of the target.
//! 3. While the queue is non-empty, pop a route, let the AS at the end of its path consider
//!    it, and enqueue the forwarded route for every neighbor the policy exports to.
//!
//! Termination is guaranteed: every dequeued route is either discarded (no further
//! enqueues) or strictly improves some routing-table entry under the preference order, and
//! each entry can only improve finitely many times.
//!
//! The announcement sequence is deterministic: neighbor lists are sorted at topology build
//! time, and the default queue drains in FIFO order.

use log::{debug, trace};

use crate::{
    event::{BasicEventQueue, Event, EventQueue},
    topology::Topology,
    types::{AsNum, TopologyError},
};

/// Propagate reachability toward `target` through the whole topology, using the default
/// FIFO queue. Afterwards, every AS that may reach the target under the export rules holds
/// a best route keyed by the target's AS number. Returns the number of processed
/// announcements.
///
/// The routing tables are not cleared first; call
/// [`Topology::reset_route_tables`] before re-running propagation for a different target.
pub fn find_routes_to(topology: &mut Topology, target: AsNum) -> Result<usize, TopologyError> {
    let mut queue = BasicEventQueue::new();
    find_routes_to_with(topology, target, &mut queue)
}

/// Propagate reachability toward `target` draining the given queue. The queue is cleared
/// before seeding. A FIFO queue yields the reproducible reference behavior.
pub fn find_routes_to_with<Q: EventQueue>(
    topology: &mut Topology,
    target: AsNum,
    queue: &mut Q,
) -> Result<usize, TopologyError> {
    queue.clear();

    // seed the target with its self-route and one origination per neighbor
    let router = topology.router_mut(target)?;
    let self_route = router.self_route();
    router.force_route(self_route);
    let originations: Vec<Event> = router
        .neighbors()
        .iter()
        .map(|n| Event::Advertise(router.originate_route(n.asn)))
        .collect();
    for event in originations {
        trace!("seeding {}", event.route());
        queue.push(event);
    }

    let mut processed = 0usize;
    while let Some(event) = queue.pop() {
        let Event::Advertise(route) = event;
        processed += 1;

        // the AS at the end of the path is the one being asked to consider the route; a
        // missing router here means the topology was built inconsistently
        let current = route.holder();
        let to_advertise = topology.router_mut(current)?.learn_route(&route);
        if to_advertise.is_empty() {
            continue;
        }

        let router = topology.router(current)?;
        for neighbor in to_advertise {
            queue.push(Event::Advertise(router.forward_route(&route, neighbor.asn)));
        }
    }

    debug!("propagation toward {target} converged after {processed} announcements");
    Ok(processed)
}
