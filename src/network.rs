// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-version network/host mask tables, built lazily once per process.

use crate::{
    address::IpAddress,
    segment::{segment_host_mask, segment_network_mask},
    IpVersion, Segment,
};
use lazy_static::lazy_static;

// Lazily evaluated mask tables, one address per prefix length.
// Generated only once per program execution.
lazy_static! {
    static ref V4_TABLES: MaskTables = MaskTables::build(IpVersion::V4);
    static ref V6_TABLES: MaskTables = MaskTables::build(IpVersion::V6);
}

struct MaskTables {
    /// network masks carrying their prefix length
    subnets: Vec<IpAddress>,
    /// network masks as plain values
    subnet_masks: Vec<IpAddress>,
    host_masks: Vec<IpAddress>,
}

impl MaskTables {
    fn build(version: IpVersion) -> Self {
        let bit_len = version.bit_count();
        let mut subnets = Vec::with_capacity(bit_len as usize + 1);
        let mut subnet_masks = Vec::with_capacity(bit_len as usize + 1);
        let mut host_masks = Vec::with_capacity(bit_len as usize + 1);
        for prefix in 0..=bit_len {
            subnets.push(build_mask(version, prefix, true, true));
            subnet_masks.push(build_mask(version, prefix, true, false));
            host_masks.push(build_mask(version, prefix, false, false));
        }
        MaskTables {
            subnets,
            subnet_masks,
            host_masks,
        }
    }
}

fn tables(version: IpVersion) -> &'static MaskTables {
    match version {
        IpVersion::V4 => &V4_TABLES,
        IpVersion::V6 => &V6_TABLES,
    }
}

/**
The CIDR network mask for a prefix length: all 1s across the first
`prefix_bits` bits, 0s after. With `with_prefix_len` the mask address
remembers the prefix (and so represents the whole network); without, it
is the plain mask value. Prefixes past the bit length are clamped.
*/
pub fn network_mask(version: IpVersion, prefix_bits: u32, with_prefix_len: bool) -> IpAddress {
    let index = prefix_bits.min(version.bit_count()) as usize;
    let t = tables(version);
    if with_prefix_len {
        t.subnets[index].clone()
    } else {
        t.subnet_masks[index].clone()
    }
}

/// The CIDR host mask for a prefix length: 0s across the network bits,
/// 1s after.
pub fn host_mask(version: IpVersion, prefix_bits: u32) -> IpAddress {
    let index = prefix_bits.min(version.bit_count()) as usize;
    tables(version).host_masks[index].clone()
}

fn build_mask(version: IpVersion, prefix_bits: u32, network: bool, with_prefix: bool) -> IpAddress {
    let bps = version.bits_per_segment();
    let seg_count = version.segment_count();
    let max = version.max_segment_value();
    let mut segments: Vec<Segment> = Vec::with_capacity(seg_count);
    let mut bits = prefix_bits.min(version.bit_count()) as i64;
    let mut i = 0usize;
    while bits > 0 {
        // no prefix on the last segment of the full-length network mask
        let extends_to_end = network && bits == bps as i64 && i >= seg_count - 1;
        if bits <= bps as i64 && !extends_to_end {
            let mask = segment_network_mask(version, bits as u32);
            let seg = if network {
                if with_prefix {
                    Segment::with_prefix(version, mask, Some(bits as u32))
                } else {
                    Segment::new(version, mask)
                }
            } else {
                Segment::new(version, segment_host_mask(version, mask))
            };
            segments.push(seg);
        } else if network {
            segments.push(Segment::new(version, max));
        } else {
            segments.push(Segment::new(version, 0));
        }
        bits -= bps as i64;
        i += 1;
    }
    for _ in i..seg_count {
        let seg = if network {
            if with_prefix {
                Segment::with_prefix(version, 0, Some(0))
            } else {
                Segment::new(version, 0)
            }
        } else {
            Segment::new(version, max)
        };
        segments.push(seg);
    }
    let address = IpAddress::from_segments(version, segments);
    // the answer to "is this a mask" is known by construction
    address
        .section()
        .preset_mask_prefix(prefix_bits.min(version.bit_count()), network);
    address
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_masks_v4() {
        assert_eq!(network_mask(IpVersion::V4, 0, false).to_normalized_string(), "0.0.0.0");
        assert_eq!(network_mask(IpVersion::V4, 1, false).to_normalized_string(), "128.0.0.0");
        assert_eq!(
            network_mask(IpVersion::V4, 17, false).to_normalized_string(),
            "255.255.128.0"
        );
        assert_eq!(
            network_mask(IpVersion::V4, 32, false).to_normalized_string(),
            "255.255.255.255"
        );
        // beyond the bit length clamps
        assert_eq!(
            network_mask(IpVersion::V4, 129, false).to_normalized_string(),
            "255.255.255.255"
        );
    }

    #[test]
    fn test_network_masks_with_prefix() {
        assert_eq!(
            network_mask(IpVersion::V4, 17, true).to_normalized_string(),
            "255.255.128.0/17"
        );
        // a full-length mask carries no prefix
        assert_eq!(
            network_mask(IpVersion::V4, 32, true).to_normalized_string(),
            "255.255.255.255"
        );
        assert_eq!(
            network_mask(IpVersion::V6, 17, true).to_canonical_string(),
            "ffff:8000::/17"
        );
    }

    #[test]
    fn test_host_masks() {
        assert_eq!(host_mask(IpVersion::V4, 0).to_normalized_string(), "255.255.255.255");
        assert_eq!(host_mask(IpVersion::V4, 17).to_normalized_string(), "0.0.127.255");
        assert_eq!(host_mask(IpVersion::V4, 32).to_normalized_string(), "0.0.0.0");
        assert_eq!(
            host_mask(IpVersion::V6, 15).to_canonical_string(),
            "1:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
    }

    #[test]
    fn test_masks_complement() {
        for p in 0..=32 {
            let net = network_mask(IpVersion::V4, p, false);
            let host = host_mask(IpVersion::V4, p);
            let net_bytes = net.lowest_bytes();
            let host_bytes = host.lowest_bytes();
            for (n, h) in net_bytes.iter().zip(&host_bytes) {
                // every bit covered exactly once
                assert_eq!(n | h, 0xff);
                assert_eq!(n & h, 0);
            }
        }
    }

    #[test]
    fn test_mask_prefix_precomputed() {
        let mask = network_mask(IpVersion::V6, 64, false);
        assert_eq!(mask.cidr_mask_prefix_len(true), Some(64));
        assert_eq!(mask.cidr_mask_prefix_len(false), None);
        let mask = host_mask(IpVersion::V6, 64);
        assert_eq!(mask.cidr_mask_prefix_len(false), Some(64));
    }
}
