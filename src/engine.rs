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

//! Module implementing the engine facade driven by the interactive shell.
//!
//! The engine carries the mutable session state (AS-relationship file, built topology,
//! target router) and exposes the operations the shell commands map onto. All errors are
//! recoverable at this level: the shell reports them in a single line and keeps running.

use std::path::{Path, PathBuf};

use log::info;
use serde_json::json;
use thiserror::Error;

use crate::{
    parser::{AsRelParser, ParseError},
    propagate::find_routes_to,
    topology::Topology,
    types::{AsNum, TopologyError},
};

/// Errors reported by the [`Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation was invoked before its prerequisites were configured.
    #[error("Not ready: {0}")]
    NotReady(&'static str),
    /// Loading the AS-relationship file failed.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A topology operation failed.
    #[error("{0}")]
    Topology(#[from] TopologyError),
}

/// Summary of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Number of announcements processed until the queue drained.
    pub announcements: usize,
    /// Number of routers holding a route toward the target afterwards.
    pub reached: usize,
}

/// The engine facade: session configuration plus the materialised topology.
#[derive(Debug, Default)]
pub struct Engine {
    asrel_file: Option<PathBuf>,
    parser: AsRelParser,
    topology: Option<Topology>,
    target: Option<AsNum>,
    running: bool,
}

impl Engine {
    /// Create an engine with no configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of the AS-relationship file to load on [`Engine::init_topology`].
    pub fn set_asrel_file(&mut self, path: impl AsRef<Path>) {
        self.asrel_file = Some(path.as_ref().to_path_buf());
    }

    /// The configured AS-relationship file, if any.
    pub fn asrel_file(&self) -> Option<&Path> {
        self.asrel_file.as_deref()
    }

    /// Replace the parser blacklist tokens.
    pub fn set_blacklist<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parser = AsRelParser::new(tokens);
    }

    /// Parse the configured AS-relationship file and materialise the topology.
    pub fn init_topology(&mut self) -> Result<(), EngineError> {
        let path = self
            .asrel_file
            .as_ref()
            .ok_or(EngineError::NotReady("no AS-relationship file set"))?;
        let records = self.parser.parse_file(path)?;
        let topology = Topology::populate(&records);
        info!(
            "initialised topology from {}: {} routers",
            path.display(),
            topology.num_routers()
        );
        self.topology = Some(topology);
        Ok(())
    }

    /// The materialised topology, if initialised.
    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    /// Set the target router. Validated against the topology when one is built.
    pub fn set_target(&mut self, target: AsNum) -> Result<(), EngineError> {
        if let Some(topology) = &self.topology {
            if !topology.contains(target) {
                return Err(TopologyError::RouterNotFound(target).into());
            }
        }
        self.target = Some(target);
        Ok(())
    }

    /// The configured target router, if any.
    pub fn target(&self) -> Option<AsNum> {
        self.target
    }

    /// Run propagation toward the given target (or the configured one). All routing tables
    /// are cleared first, so the resulting state is a function of the topology and the
    /// target only.
    pub fn find_routes(&mut self, target: Option<AsNum>) -> Result<PropagationStats, EngineError> {
        let target = target
            .or(self.target)
            .ok_or(EngineError::NotReady("no target router set"))?;
        let topology = self
            .topology
            .as_mut()
            .ok_or(EngineError::NotReady("topology is not initialised"))?;

        topology.reset_route_tables();
        let announcements = find_routes_to(topology, target)?;
        let reached = topology
            .routers()
            .filter(|r| r.route_to(target).is_some())
            .count();
        self.target = Some(target);
        Ok(PropagationStats {
            announcements,
            reached,
        })
    }

    /// Render the topology dump for `show-topology`.
    pub fn fmt_topology(&self) -> Result<String, EngineError> {
        self.topology
            .as_ref()
            .map(Topology::fmt_topology)
            .ok_or(EngineError::NotReady("topology is not initialised"))
    }

    /// Render the routing table of one router.
    pub fn fmt_rib(&self, asn: AsNum) -> Result<String, EngineError> {
        let topology = self
            .topology
            .as_ref()
            .ok_or(EngineError::NotReady("topology is not initialised"))?;
        Ok(topology.router(asn)?.fmt_rib())
    }

    /// The current configuration and session state as a JSON value, for `listconfig`.
    pub fn list_config(&self) -> serde_json::Value {
        json!({
            "asrel_file": &self.asrel_file,
            "blacklist": self.parser.blacklist(),
            "target": self.target,
            "running": self.running,
            "topology": self.topology.as_ref().map(|t| json!({
                "routers": t.num_routers(),
                "directed_edges": t.graph().num_edges(),
            })),
        })
    }

    /// Mark the session as started.
    pub fn start(&mut self) {
        self.running = true;
        info!("engine started");
    }

    /// Mark the session as stopped.
    pub fn stop(&mut self) {
        self.running = false;
        info!("engine stopped");
    }

    /// One-line status summary.
    pub fn status(&self) -> String {
        format!(
            "{}; file: {}; topology: {}; target: {}",
            if self.running { "running" } else { "stopped" },
            self.asrel_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unset".to_string()),
            self.topology
                .as_ref()
                .map(|t| format!("{} routers", t.num_routers()))
                .unwrap_or_else(|| "not initialised".to_string()),
            self.target
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unset".to_string()),
        )
    }
}
