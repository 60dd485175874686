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

//! Convenient re-export of the most important types.

pub use crate::engine::{Engine, EngineError, PropagationStats};
pub use crate::event::{BasicEventQueue, Event, EventQueue};
pub use crate::graph::AsGraph;
pub use crate::parser::{AsRel, AsRelKind, AsRelParser, ParseError};
pub use crate::policy::{GaoRexford, Policy};
pub use crate::propagate::{find_routes_to, find_routes_to_with};
pub use crate::route::Route;
pub use crate::router::{Neighbor, Router};
pub use crate::topology::Topology;
pub use crate::types::{AsNum, Relation, TopologyError};
