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

//! Module for parsing [CAIDA AS-relationship
//! files](https://catalog.caida.org/dataset/as_relationships_serial_2) (serial-2 format).
//!
//! The files contain p2p and p2c relationships, one record per line:
//!
//! ```text
//! <provider-as>|<customer-as>|-1|<source>
//! <peer-as>|<peer-as>|0|<source>
//! ```
//!
//! Lines containing a blacklisted token (by default `#`, which covers the file header
//! comments) are skipped. Every other line must parse; a malformed line aborts the entire
//! load without retaining partial output.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::AsNum;

/// The kind of a parsed AS relationship. The serial-2 format only encodes provider-customer
/// (code -1) and peer-peer (code 0) links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsRelKind {
    /// `as1` is the provider of `as2` (code -1).
    ProviderCustomer,
    /// `as1` and `as2` are peers (code 0).
    PeerPeer,
}

impl AsRelKind {
    /// The relationship code used in the file format.
    pub fn code(&self) -> i8 {
        match self {
            AsRelKind::ProviderCustomer => -1,
            AsRelKind::PeerPeer => 0,
        }
    }
}

/// A single parsed AS-relationship record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AsRel {
    /// The first AS of the record (the provider for p2c records).
    pub as1: AsNum,
    /// The second AS of the record (the customer for p2c records).
    pub as2: AsNum,
    /// The kind of the relationship.
    pub kind: AsRelKind,
    /// The data source annotation of the record (e.g., `bgp`).
    pub source: String,
}

/// Error while parsing an AS-relationship file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An I/O error from the underlying stream, surfaced unchanged.
    #[error("Cannot read the AS-relationship data: {0}")]
    Io(#[from] std::io::Error),
    /// A line does not have exactly four pipe-separated fields (empty lines included).
    #[error("Invalid line format on line {line}: {content:?}")]
    InvalidLine {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// A field that must be an integer could not be parsed.
    #[error("Invalid {field} on line {line}: {value:?}")]
    InvalidField {
        /// 1-based line number of the offending line.
        line: usize,
        /// Which field failed to parse (`AS1`, `AS2` or `REL`).
        field: &'static str,
        /// The offending field value.
        value: String,
    },
    /// The relationship code is an integer, but not -1 or 0.
    #[error("Invalid relationship code on line {line}: {value} (expected -1 or 0)")]
    InvalidRelation {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending code.
        value: i64,
    },
}

/// Parser for AS-relationship files.
///
/// The parser is configured with a list of blacklist tokens: any line that contains one of
/// the tokens as a substring is skipped. All remaining lines must be well-formed records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsRelParser {
    blacklist: Vec<String>,
}

impl Default for AsRelParser {
    fn default() -> Self {
        Self {
            blacklist: vec![String::from("#")],
        }
    }
}

impl AsRelParser {
    /// Create a parser with a custom blacklist.
    pub fn new<I, S>(blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blacklist: blacklist.into_iter().map(|s| s.into()).collect(),
        }
    }

    /// The configured blacklist tokens.
    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    /// Parse all records from a buffered reader. On any malformed line the whole load fails
    /// and no records are returned.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<AsRel>, ParseError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if self.is_blacklisted(&line) {
                continue;
            }
            records.push(self.parse_line(idx + 1, &line)?);
        }
        debug!("parsed {} AS-relationship records", records.len());
        Ok(records)
    }

    /// Parse records from a string slice.
    pub fn parse_str(&self, data: &str) -> Result<Vec<AsRel>, ParseError> {
        self.parse(data.as_bytes())
    }

    /// Open and parse a file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<AsRel>, ParseError> {
        self.parse(BufReader::new(File::open(path)?))
    }

    /// Check if a line contains any blacklisted token as a substring.
    fn is_blacklisted(&self, line: &str) -> bool {
        self.blacklist.iter().any(|token| line.contains(token))
    }

    /// Parse a single record line of the form `AS1|AS2|REL|SOURCE`.
    fn parse_line(&self, line_no: usize, line: &str) -> Result<AsRel, ParseError> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != 4 {
            return Err(ParseError::InvalidLine {
                line: line_no,
                content: line.to_string(),
            });
        }

        let as1: AsNum = parts[0]
            .parse::<u32>()
            .map(AsNum)
            .map_err(|_| ParseError::InvalidField {
                line: line_no,
                field: "AS1",
                value: parts[0].to_string(),
            })?;
        let as2: AsNum = parts[1]
            .parse::<u32>()
            .map(AsNum)
            .map_err(|_| ParseError::InvalidField {
                line: line_no,
                field: "AS2",
                value: parts[1].to_string(),
            })?;
        let code: i64 = parts[2].parse().map_err(|_| ParseError::InvalidField {
            line: line_no,
            field: "REL",
            value: parts[2].to_string(),
        })?;

        let kind = match code {
            -1 => AsRelKind::ProviderCustomer,
            0 => AsRelKind::PeerPeer,
            _ => {
                return Err(ParseError::InvalidRelation {
                    line: line_no,
                    value: code,
                })
            }
        };

        Ok(AsRel {
            as1,
            as2,
            kind,
            source: parts[3].to_string(),
        })
    }
}
