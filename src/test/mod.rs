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

use crate::{parser::AsRelParser, topology::Topology, types::AsNum};

/// Build a topology from inline serial-2 records.
fn topo(records: &str) -> Topology {
    Topology::populate(
        &AsRelParser::default()
            .parse_str(records)
            .expect("records must be well-formed"),
    )
}

/// Shorthand for a path of AS numbers.
fn path(ases: &[u32]) -> Vec<AsNum> {
    ases.iter().map(|&x| AsNum(x)).collect()
}

mod test_graph;
mod test_parser;
mod test_topology;
