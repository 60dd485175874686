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

#![deny(missing_docs, missing_debug_implementations)]

//! # RelSim
//!
//! This is a library for simulating inter-domain route propagation over the AS-level topology
//! of the Internet, as captured by [CAIDA AS-relationship
//! data](https://catalog.caida.org/dataset/as_relationships_serial_2).
//!
//! ## Main Concepts
//!
//! The [`topology::Topology`] is the main datastructure to operate on. It is built from a
//! sequence of [`parser::AsRel`] records (produced by [`parser::AsRelParser`]) and owns one
//! [`router::Router`] per AS. The routers are wired over a directed, relation-labelled graph
//! (see [`graph::AsGraph`], stored on
//! [Petgraph](https://docs.rs/petgraph/latest/petgraph/index.html)).
//!
//! Route propagation is simulated as message passing: [`propagate::find_routes_to`] seeds the
//! target AS with its self-route and drains a FIFO of pending advertisements through the
//! network. Each router consults its [`policy::Policy`] (by default the Gao--Rexford policy
//! [`policy::GaoRexford`]: prefer customer over peer over provider routes, and never provide
//! transit between non-customers) to decide whether to accept a route, whether to prefer it
//! over the current best, and to which neighbors it may be exported.
//!
//! The default queue is a simple FIFO ([`event::BasicEventQueue`]), which makes the outcome
//! reproducible. The queue can be replaced by any type implementing [`event::EventQueue`].
//!
//! ## Example usage
//!
//! ```
//! use relsim::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // AS 1 is the provider of AS 2, which is the provider of AS 3.
//!     let records = AsRelParser::default().parse_str("1|2|-1|relsim\n2|3|-1|relsim")?;
//!     let mut topo = Topology::populate(&records);
//!
//!     find_routes_to(&mut topo, AsNum(1))?;
//!
//!     let route = topo.router(AsNum(3))?.route_to(AsNum(1)).unwrap();
//!     assert_eq!(route.path(), &[AsNum(1), AsNum(2), AsNum(3)]);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod event;
pub mod export;
pub mod graph;
pub mod parser;
pub mod policy;
pub mod prelude;
pub mod propagate;
pub mod route;
pub mod router;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test;
