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

//! Generator for [Kathara](https://www.kathara.org/) lab configurations.

use std::fmt::Write;

use super::{Addressor, ExportError};
use crate::{topology::Topology, types::AsNum};

/// The name of the collision domain shared by the two endpoints of a link.
fn collision_domain(a: AsNum, b: AsNum) -> String {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    format!("net_{}_{}", lo.0, hi.0)
}

/// The machine name of a router in the lab.
fn machine(asn: AsNum) -> String {
    format!("as{}", asn.0)
}

/// Generate the `lab.conf` content for the whole topology.
///
/// Every line has the form `X[Y]=Z`, where `X` is the machine name, `Y` the interface
/// `ethY`, and `Z` the collision domain. Both endpoints of a link join the same domain, so
/// every link becomes one emulated L2 segment. Lines are emitted in ascending order of AS
/// number and interface index, so the output is reproducible.
pub fn lab_conf(topology: &Topology) -> String {
    let mut result = String::new();
    let f = &mut result;
    for router in topology.routers() {
        for (idx, neighbor) in router.neighbors().iter().enumerate() {
            writeln!(
                f,
                "{}[{}]={}",
                machine(router.asn()),
                idx,
                collision_domain(router.asn(), neighbor.asn)
            )
            .unwrap();
        }
    }
    result
}

/// Generate the startup script of a single machine: assign every interface its address and
/// start the routing daemons.
pub fn startup_config(
    topology: &Topology,
    addressor: &mut Addressor,
    asn: AsNum,
) -> Result<String, ExportError> {
    let router = topology.router(asn)?;
    let mut result = String::new();
    let f = &mut result;
    for (idx, neighbor) in router.neighbors().iter().enumerate() {
        let addr = addressor.iface_address(asn, neighbor.asn)?;
        let net = addressor.link_network(asn, neighbor.asn)?;
        writeln!(f, "ip address add {}/{} dev eth{}", addr, net.prefix_len(), idx).unwrap();
    }
    writeln!(f, "systemctl start frr").unwrap();
    Ok(result)
}
