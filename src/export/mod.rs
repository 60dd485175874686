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

//! This module provides export methods for turning a materialised topology into artifacts
//! for container-based emulation: a Kathara `lab.conf` describing the collision domains,
//! per-router startup scripts assigning interface addresses, and per-router FRR
//! configurations. The emitters only read the topology; addressing is handled by the
//! [`Addressor`], which deterministically assigns one `/30` subnet to every point-to-point
//! link.

use std::{collections::HashMap, net::Ipv4Addr};

use ipnet::Ipv4Net;
use thiserror::Error;

use crate::{
    topology::Topology,
    types::{AsNum, TopologyError},
};

mod frr;
mod kathara;

pub use frr::frr_config;
pub use kathara::{lab_conf, startup_config};

/// Link index used in the IP addressor. The two endpoints are stored in ascending order so
/// that both directions of a link map to the same subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(AsNum, AsNum);

impl LinkId {
    /// Create a new Link ID
    pub fn new(a: AsNum, b: AsNum) -> Self {
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

impl From<(AsNum, AsNum)> for LinkId {
    fn from(x: (AsNum, AsNum)) -> Self {
        Self::new(x.0, x.1)
    }
}

/// Error while exporting artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The base network has no more free subnets.
    #[error("The address space of the base network is exhausted")]
    AddressSpaceExhausted,
    /// The requested neighbor is not connected to the router.
    #[error("{0} has no interface toward {1}")]
    NoInterface(AsNum, AsNum),
    /// The router is isolated and cannot be addressed.
    #[error("{0} has no neighbors")]
    NoNeighbors(AsNum),
    /// The prefix length arithmetic failed (base network too small).
    #[error("Invalid prefix length: {0}")]
    PrefixLen(#[from] ipnet::PrefixLenError),
    /// The topology is inconsistent with the requested export.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

/// Deterministic IP allocation onto point-to-point links.
///
/// Every undirected link gets the next free `/30` out of the base network, in the order the
/// links are first requested; the endpoint with the smaller AS number takes the first host
/// address. Interface numbering follows the router's sorted neighbor list: the link to the
/// `i`-th neighbor is `eth{i}`.
#[derive(Debug, Clone)]
pub struct Addressor {
    base: Ipv4Net,
    links: HashMap<LinkId, Ipv4Net>,
}

impl Default for Addressor {
    fn default() -> Self {
        // the base network used by the emulation artifacts
        Self::new("192.168.0.0/16".parse().unwrap())
    }
}

impl Addressor {
    /// Create an addressor allocating out of the given base network.
    pub fn new(base: Ipv4Net) -> Self {
        Self {
            base,
            links: HashMap::new(),
        }
    }

    /// The base network.
    pub fn base(&self) -> Ipv4Net {
        self.base
    }

    /// The `/30` subnet of the link between `a` and `b`, allocating it on first use.
    pub fn link_network(&mut self, a: AsNum, b: AsNum) -> Result<Ipv4Net, ExportError> {
        let link = LinkId::new(a, b);
        if let Some(net) = self.links.get(&link) {
            return Ok(*net);
        }
        let net = self
            .base
            .subnets(30)?
            .nth(self.links.len())
            .ok_or(ExportError::AddressSpaceExhausted)?;
        self.links.insert(link, net);
        Ok(net)
    }

    /// The interface address of `router` on its link toward `neighbor`.
    pub fn iface_address(
        &mut self,
        router: AsNum,
        neighbor: AsNum,
    ) -> Result<Ipv4Addr, ExportError> {
        let net = self.link_network(router, neighbor)?;
        let mut hosts = net.hosts();
        let first = hosts.next().ok_or(ExportError::AddressSpaceExhausted)?;
        let second = hosts.next().ok_or(ExportError::AddressSpaceExhausted)?;
        Ok(if router < neighbor { first } else { second })
    }

    /// The interface index of `router`'s link toward `neighbor` (`ethN`). Follows the
    /// position of the neighbor in the router's sorted neighbor list.
    pub fn iface_index(
        &self,
        topology: &Topology,
        router: AsNum,
        neighbor: AsNum,
    ) -> Result<usize, ExportError> {
        topology
            .router(router)?
            .neighbors()
            .iter()
            .position(|n| n.asn == neighbor)
            .ok_or(ExportError::NoInterface(router, neighbor))
    }

    /// The router ID used in the FRR configuration: the address of the router's first
    /// interface.
    pub fn router_id(
        &mut self,
        topology: &Topology,
        router: AsNum,
    ) -> Result<Ipv4Addr, ExportError> {
        let first = topology
            .router(router)?
            .neighbors()
            .first()
            .map(|n| n.asn)
            .ok_or(ExportError::NoNeighbors(router))?;
        self.iface_address(router, first)
    }
}
