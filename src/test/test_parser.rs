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

use std::io::{BufReader, Read};

use pretty_assertions::assert_eq;

use crate::parser::{AsRel, AsRelKind, AsRelParser, ParseError};
use crate::types::AsNum;

#[test]
fn parse_records() {
    let data = "1|2|-1|bgp\n2|3|0|mlp";
    let records = AsRelParser::default().parse_str(data).unwrap();
    assert_eq!(
        records,
        vec![
            AsRel {
                as1: AsNum(1),
                as2: AsNum(2),
                kind: AsRelKind::ProviderCustomer,
                source: "bgp".to_string(),
            },
            AsRel {
                as1: AsNum(2),
                as2: AsNum(3),
                kind: AsRelKind::PeerPeer,
                source: "mlp".to_string(),
            },
        ]
    );
    assert_eq!(records[0].kind.code(), -1);
    assert_eq!(records[1].kind.code(), 0);
}

#[test]
fn blacklist_skips_headers() {
    let data = "# inferred relationships\n# source: bgp\n1|2|-1|bgp";
    let records = AsRelParser::default().parse_str(data).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].as1, AsNum(1));
}

#[test]
fn blacklist_matches_substring_anywhere() {
    let data = "1|2|-1|bgp\n3|4|-1|skipme\n5|6|0|bgp";
    let parser = AsRelParser::new(["skip"]);
    let records = parser.parse_str(data).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].as1, AsNum(5));
}

#[test]
fn duplicates_pass_through() {
    let data = "1|2|-1|bgp\n1|2|-1|bgp";
    let records = AsRelParser::default().parse_str(data).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}

#[test]
fn too_few_fields_is_malformed() {
    let err = AsRelParser::default().parse_str("1|2|-1").unwrap_err();
    assert!(matches!(err, ParseError::InvalidLine { line: 1, .. }));
}

#[test]
fn empty_line_is_malformed() {
    let err = AsRelParser::default()
        .parse_str("1|2|-1|bgp\n\n2|3|0|bgp")
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidLine { line: 2, .. }));
}

#[test]
fn non_integer_as_is_malformed() {
    let err = AsRelParser::default().parse_str("one|2|-1|bgp").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidField {
            line: 1,
            field: "AS1",
            ..
        }
    ));

    let err = AsRelParser::default().parse_str("1|2|x|bgp").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidField {
            line: 1,
            field: "REL",
            ..
        }
    ));
}

#[test]
fn out_of_range_relation_is_malformed() {
    let err = AsRelParser::default().parse_str("1|2|1|bgp").unwrap_err();
    assert!(matches!(err, ParseError::InvalidRelation { line: 1, value: 1 }));
}

#[test]
fn no_partial_output_on_failure() {
    // the first record is fine, but the load must fail as a whole
    let result = AsRelParser::default().parse_str("1|2|-1|bgp\nbroken");
    assert!(result.is_err());
}

/// A reader that fails after producing its content.
struct FailingReader {
    content: &'static [u8],
    pos: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pos < self.content.len() {
            let n = buf.len().min(self.content.len() - self.pos);
            buf[..n].copy_from_slice(&self.content[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stream interrupted",
            ))
        }
    }
}

#[test]
fn io_errors_surface_unchanged() {
    let reader = BufReader::new(FailingReader {
        content: b"1|2|-1|bgp\n",
        pos: 0,
    });
    let err = AsRelParser::default().parse(reader).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}
