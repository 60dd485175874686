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

//! Generator for [FRRouting](https://frrouting.org/) configurations.

use std::fmt::Write;

use super::{Addressor, ExportError};
use crate::{topology::Topology, types::AsNum};

/// Generate the `frr.conf` content of a single router.
///
/// The configuration opens one eBGP session per neighbor, annotated with the commercial
/// relationship. Session-level policy (prefix filtering per relation) is left to the route
/// maps of the emulated deployment; the simulator has already computed which routes each AS
/// would select.
pub fn frr_config(
    topology: &Topology,
    addressor: &mut Addressor,
    asn: AsNum,
) -> Result<String, ExportError> {
    let router = topology.router(asn)?;
    let router_id = addressor.router_id(topology, asn)?;

    let mut result = String::new();
    let f = &mut result;
    writeln!(f, "frr defaults traditional").unwrap();
    writeln!(f, "hostname as{}", asn.0).unwrap();
    writeln!(f, "!").unwrap();
    writeln!(f, "router bgp {}", asn.0).unwrap();
    writeln!(f, " bgp router-id {router_id}").unwrap();
    writeln!(f, " no bgp ebgp-requires-policy").unwrap();
    for neighbor in router.neighbors() {
        let addr = addressor.iface_address(neighbor.asn, asn)?;
        writeln!(f, " neighbor {} remote-as {}", addr, neighbor.asn.0).unwrap();
        writeln!(
            f,
            " neighbor {} description {} ({})",
            addr, neighbor.asn, neighbor.relation
        )
        .unwrap();
    }
    writeln!(f, " address-family ipv4 unicast").unwrap();
    for neighbor in router.neighbors() {
        let net = addressor.link_network(asn, neighbor.asn)?;
        writeln!(f, "  network {net}").unwrap();
    }
    writeln!(f, " exit-address-family").unwrap();
    writeln!(f, "!").unwrap();
    writeln!(f, "line vty").unwrap();
    writeln!(f, "!").unwrap();
    Ok(result)
}
