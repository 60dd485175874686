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

//! Interactive shell around the RelSim engine.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::Parser;

use relsim::{
    engine::Engine,
    export::{frr_config, lab_conf, startup_config, Addressor, ExportError},
    topology::Topology,
    types::AsNum,
};

/// Simulate route propagation over CAIDA AS-relationship data.
#[derive(Debug, Parser)]
struct Cli {
    /// AS-relationship file (serial-2 format) to preset.
    #[clap(long = "asrel-file", short = 'f')]
    asrel_file: Option<PathBuf>,
    /// Target router (AS number) to preset.
    #[clap(long = "target", short = 't')]
    target: Option<AsNum>,
    /// Blacklist tokens: lines containing any of them are skipped while parsing.
    #[clap(long = "blacklist")]
    blacklist: Vec<String>,
}

fn main() {
    pretty_env_logger::init_timed();

    let args = Cli::parse();
    let mut engine = Engine::new();

    if !args.blacklist.is_empty() {
        engine.set_blacklist(args.blacklist);
    }
    if let Some(path) = args.asrel_file {
        engine.set_asrel_file(path);
    }
    if let Some(target) = args.target {
        if let Err(e) = engine.set_target(target) {
            eprintln!("Error: {e}");
        }
    }

    println!("Welcome to relsim. Type 'help' for a list of commands.");

    let stdin = io::stdin();
    loop {
        print!("\u{276f} ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading line: {e}");
                continue;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let (command, args) = match parts.split_first() {
            Some((c, a)) => (*c, a),
            None => continue,
        };

        match command {
            "exit" => {
                println!("Exiting...");
                break;
            }
            "help" => help(),
            "start" => engine.start(),
            "stop" => engine.stop(),
            "status" => println!("{}", engine.status()),
            "set-asrel-file" => match args.first() {
                Some(path) => engine.set_asrel_file(path),
                None => eprintln!("Usage: set-asrel-file <path>"),
            },
            "init-topology" => report(engine.init_topology()),
            "settargetrouter" => match parse_asn(args.first()) {
                Some(asn) => report(engine.set_target(asn)),
                None => eprintln!("Usage: settargetrouter <as>"),
            },
            "findroutes" => {
                let target = parse_asn(args.first());
                if target.is_none() && !args.is_empty() {
                    eprintln!("Usage: findroutes [<as>]");
                    continue;
                }
                match engine.find_routes(target) {
                    Ok(stats) => println!(
                        "Converged after {} announcements; {} routers reach the target.",
                        stats.announcements, stats.reached
                    ),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            "show-topology" => match engine.fmt_topology() {
                Ok(dump) => print!("{dump}"),
                Err(e) => eprintln!("Error: {e}"),
            },
            "show-rib" => match parse_asn(args.first()) {
                Some(asn) => match engine.fmt_rib(asn) {
                    Ok(rib) => print!("{rib}"),
                    Err(e) => eprintln!("Error: {e}"),
                },
                None => eprintln!("Usage: show-rib <as>"),
            },
            "listconfig" => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&engine.list_config())
                        .expect("config is always serializable")
                );
            }
            "export-artifacts" => match args.first() {
                Some(dir) => match engine.topology() {
                    Some(topology) => {
                        if let Err(e) = export_artifacts(topology, Path::new(dir)) {
                            eprintln!("Error: {e}");
                        }
                    }
                    None => eprintln!("Error: Not ready: topology is not initialised"),
                },
                None => eprintln!("Usage: export-artifacts <dir>"),
            },
            _ => println!("Unknown command. Type 'help' for a list of commands."),
        }
    }
}

/// Print the result of a unit operation as a single line, if it failed.
fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
}

fn parse_asn(arg: Option<&&str>) -> Option<AsNum> {
    arg.and_then(|s| s.parse().ok())
}

fn help() {
    println!("Available commands:");
    println!("  set-asrel-file <path>   Set the AS-relationship file path");
    println!("  init-topology           Parse the file and build the topology");
    println!("  settargetrouter <as>    Set the target router by AS number");
    println!("  findroutes [<as>]       Propagate routes toward the target");
    println!("  show-topology           Show the topology");
    println!("  show-rib <as>           Show the routing table of a router");
    println!("  listconfig              List all configurations in JSON format");
    println!("  export-artifacts <dir>  Write Kathara and FRR artifacts");
    println!("  start | stop | status   Session lifecycle");
    println!("  help | exit");
}

/// Write `lab.conf`, and per router `frr.conf` and `startup.sh`, under `dir`.
fn export_artifacts(topology: &Topology, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut addressor = Addressor::default();

    fs::create_dir_all(dir)?;
    fs::write(dir.join("lab.conf"), lab_conf(topology))?;

    let ases: Vec<AsNum> = topology.routers().map(|r| r.asn()).collect();
    for asn in ases {
        let machine_dir = dir.join(format!("as{}", asn.0));
        fs::create_dir_all(&machine_dir)?;
        let frr: Result<String, ExportError> = frr_config(topology, &mut addressor, asn);
        fs::write(machine_dir.join("frr.conf"), frr?)?;
        fs::write(
            machine_dir.join("startup.sh"),
            startup_config(topology, &mut addressor, asn)?,
        )?;
    }

    println!("Artifacts written to {}", dir.display());
    Ok(())
}
