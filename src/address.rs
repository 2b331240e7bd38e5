// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    builder::VariantOptions,
    network::network_mask,
    render::V6Normalize,
    section::{segment_prefix_bits, subnet_segments, to_cidr_segments, Section, SegmentSetIter},
    segment::Segment,
    strings::{
        PANIC_BYTE_LENGTH, PANIC_MASK_MULTIPLE, PANIC_NO_SINGLE_VALUE, PANIC_SEGMENT_COUNT,
        PANIC_VERSION_MISMATCH,
    },
    IpVersion, ZONE_SEPARATOR,
};
use num_bigint::BigUint;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/**
An IP address, or a set of addresses. A set can come from a CIDR prefix
(`1.2.3.4/11`), wildcard segments (`1.2.*.4`) or explicit segment ranges
(`1.2.3-4.5`).

Addresses are immutable: masking and subnetting always produce a new
address. The two IP versions form a single total order through
IPv4-mapped conversion (`::ffff:a.b.c.d`), so `::ffff:1.2.3.4` and
`1.2.3.4` compare equal.
*/
#[derive(Clone, Debug)]
pub enum IpAddress {
    V4(Ipv4Address),
    V6(Ipv6Address),
}

impl IpAddress {
    /// Build from raw bytes: 4 bytes makes IPv4, 16 bytes IPv6.
    ///
    /// # Panics
    ///
    /// Panics on any other length.
    pub fn from_bytes(bytes: &[u8]) -> IpAddress {
        IpAddress::from_bytes_with_prefix(bytes, None)
    }

    /// Like [`IpAddress::from_bytes`], applying a CIDR prefix during
    /// segment assembly (bits past the prefix are zeroed).
    pub fn from_bytes_with_prefix(bytes: &[u8], prefix_bits: Option<u32>) -> IpAddress {
        match bytes.len() {
            4 => IpAddress::V4(Ipv4Address::from_bytes(bytes, prefix_bits)),
            16 => IpAddress::V6(Ipv6Address::from_bytes(bytes, prefix_bits)),
            _ => panic!("{}: {}", PANIC_BYTE_LENGTH, bytes.len()),
        }
    }

    pub(crate) fn from_segments(version: IpVersion, segments: Vec<Segment>) -> IpAddress {
        match version {
            IpVersion::V4 => IpAddress::V4(Ipv4Address::new(segments)),
            IpVersion::V6 => IpAddress::V6(Ipv6Address::new(segments, false, "")),
        }
    }

    pub fn version(&self) -> IpVersion {
        match self {
            IpAddress::V4(_) => IpVersion::V4,
            IpAddress::V6(_) => IpVersion::V6,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, IpAddress::V6(_))
    }

    pub fn as_ipv4(&self) -> Option<&Ipv4Address> {
        match self {
            IpAddress::V4(a) => Some(a),
            IpAddress::V6(_) => None,
        }
    }

    pub fn as_ipv6(&self) -> Option<&Ipv6Address> {
        match self {
            IpAddress::V6(a) => Some(a),
            IpAddress::V4(_) => None,
        }
    }

    pub fn section(&self) -> &Section {
        match self {
            IpAddress::V4(a) => &a.section,
            IpAddress::V6(a) => &a.section,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        self.section().segments()
    }

    pub fn bit_count(&self) -> u32 {
        self.version().bit_count()
    }

    pub fn byte_count(&self) -> usize {
        self.version().byte_count()
    }

    pub fn segment_count(&self) -> usize {
        self.version().segment_count()
    }

    pub fn separator(&self) -> char {
        self.version().separator()
    }

    /// Whether this address represents a network prefix (the set of all
    /// addresses sharing it).
    pub fn is_network_prefix(&self) -> bool {
        self.section().is_network_prefix()
    }

    pub fn network_prefix_bits(&self) -> Option<u32> {
        self.section().network_prefix_bits()
    }

    fn is_multiple_cidr_addresses(&self) -> bool {
        match self.network_prefix_bits() {
            Some(prefix) => prefix < self.bit_count(),
            None => false,
        }
    }

    /// Whether this address represents more than one concrete address.
    pub fn is_multiple(&self) -> bool {
        self.is_multiple_cidr_addresses() || self.section().is_multiple()
    }

    pub fn is_zero(&self) -> bool {
        !self.is_multiple_cidr_addresses() && self.section().is_zero()
    }

    /// The wildcard address (all zeros), see `InetAddress.isAnyLocalAddress`.
    pub fn is_any_local(&self) -> bool {
        self.is_zero()
    }

    /// The count of concrete addresses represented; 1 for a single
    /// address, up to 2^128 for an unrestricted IPv6 wildcard.
    pub fn count(&self) -> BigUint {
        if !self.is_multiple() {
            return BigUint::from(1u8);
        }
        self.section().count()
    }

    /// Lazily enumerate every concrete address represented, last segment
    /// varying fastest. Never materializes the set.
    pub fn iter(&self) -> AddressIter<'_> {
        AddressIter {
            inner: self.section().iter_segment_sets(),
            version: self.version(),
            zone: match self {
                IpAddress::V6(a) => a.zone.clone(),
                IpAddress::V4(_) => String::new(),
            },
            was_mixed: match self {
                IpAddress::V6(a) => a.was_mixed,
                IpAddress::V4(_) => false,
            },
        }
    }

    /* ------------- classification ------------- */

    pub fn is_loopback(&self) -> bool {
        match self {
            IpAddress::V4(a) => a.is_loopback(),
            IpAddress::V6(a) => a.is_loopback(),
        }
    }

    pub fn is_link_local(&self) -> bool {
        match self {
            IpAddress::V4(a) => a.is_link_local(),
            IpAddress::V6(a) => a.is_link_local(),
        }
    }

    pub fn is_site_local(&self) -> bool {
        match self {
            IpAddress::V4(a) => a.is_site_local(),
            IpAddress::V6(a) => a.is_site_local(),
        }
    }

    /// Whether the address is (or embeds as) an IPv4-mapped value:
    /// trivially true for IPv4, `::ffff:0:0/96` for IPv6.
    pub fn is_ipv4_mapped(&self) -> bool {
        match self {
            IpAddress::V4(_) => true,
            IpAddress::V6(a) => a.is_ipv4_mapped(),
        }
    }

    pub fn is_ipv4_compatible(&self) -> bool {
        match self {
            IpAddress::V4(_) => true,
            IpAddress::V6(a) => a.is_ipv4_compatible(),
        }
    }

    pub fn is_ipv6_to_ipv4_relay(&self) -> bool {
        match self {
            IpAddress::V4(_) => false,
            IpAddress::V6(a) => a.is_6to4(),
        }
    }

    /// The 4 bytes of the IPv4 form, when one exists.
    pub fn ipv4_mapped_bytes(&self) -> Option<Vec<u8>> {
        match self {
            IpAddress::V4(a) => Some(a.bytes()),
            IpAddress::V6(a) => {
                if a.is_ipv4_mapped() {
                    Some(a.mixed_address().bytes())
                } else {
                    None
                }
            }
        }
    }

    fn ipv4_comparable_section(&self) -> Option<Section> {
        match self {
            IpAddress::V4(a) => Some(a.section.clone()),
            IpAddress::V6(a) => {
                if a.is_ipv4_mapped() {
                    Some(a.mixed_address().section)
                } else {
                    None
                }
            }
        }
    }

    /* ------------- bytes ------------- */

    /// Bytes of the lowest address in the represented range.
    pub fn lowest_bytes(&self) -> Vec<u8> {
        let bytes_per_segment = self.version().bytes_per_segment();
        let mut bytes = Vec::with_capacity(self.byte_count());
        for seg in self.segments() {
            let value = seg.lower();
            if bytes_per_segment == 2 {
                bytes.push((value >> 8) as u8);
            }
            bytes.push((value & 0xff) as u8);
        }
        bytes
    }

    /**
    The address bytes.

    # Panics

    Panics if this address represents more than one concrete address.
    */
    pub fn bytes(&self) -> Vec<u8> {
        if self.is_multiple() {
            panic!("{}: {}", PANIC_NO_SINGLE_VALUE, self);
        }
        self.lowest_bytes()
    }

    /**
    Convert to the standard-library address type. The IPv6 zone, if any,
    is dropped ([`std::net::Ipv6Addr`] has no scope field).

    # Panics

    Panics if this address represents more than one concrete address.
    */
    pub fn to_ip_addr(&self) -> IpAddr {
        let bytes = self.bytes();
        match self {
            IpAddress::V4(_) => {
                let octets: [u8; 4] = bytes.try_into().unwrap();
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            IpAddress::V6(_) => {
                let octets: [u8; 16] = bytes.try_into().unwrap();
                IpAddr::V6(Ipv6Addr::from(octets))
            }
        }
    }

    /// Convert a network-prefix or single address to an [`ipnet::IpNet`].
    /// Returns `None` for wildcard/range addresses which are not CIDR
    /// networks.
    pub fn to_ip_net(&self) -> Option<ipnet::IpNet> {
        if self.is_multiple() && !self.is_network_prefix() {
            return None;
        }
        let bytes = self.lowest_bytes();
        let addr = match self {
            IpAddress::V4(_) => {
                let octets: [u8; 4] = bytes.try_into().unwrap();
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            IpAddress::V6(_) => {
                let octets: [u8; 16] = bytes.try_into().unwrap();
                IpAddr::V6(Ipv6Addr::from(octets))
            }
        };
        let prefix = self.network_prefix_bits().unwrap_or(self.bit_count());
        ipnet::IpNet::new(addr, prefix as u8).ok()
    }

    pub fn from_ip_net(net: ipnet::IpNet) -> IpAddress {
        match net {
            ipnet::IpNet::V4(n) => IpAddress::from_bytes_with_prefix(
                &n.addr().octets(),
                Some(n.prefix_len() as u32),
            ),
            ipnet::IpNet::V6(n) => IpAddress::from_bytes_with_prefix(
                &n.addr().octets(),
                Some(n.prefix_len() as u32),
            ),
        }
    }

    /* ------------- masks and subnets ------------- */

    /// If this address's value is exactly a CIDR network/host mask,
    /// the corresponding prefix length. See
    /// [`Section::cidr_mask_prefix_len`].
    pub fn cidr_mask_prefix_len(&self, network: bool) -> Option<u32> {
        self.section().cidr_mask_prefix_len(network)
    }

    /**
    The subnet of this address under the given mask, optionally also
    applying a prefix length.

    # Panics

    Panics if this address represents multiple addresses (masking a
    range is undefined), or if the mask's IP version differs.
    */
    pub fn to_subnet_masked(&self, mask: &IpAddress, prefix_bits: Option<u32>) -> IpAddress {
        if self.is_multiple() {
            panic!("{}: {}", PANIC_MASK_MULTIPLE, self);
        }
        self.to_subnet_impl(mask, prefix_bits)
    }

    /// The subnet of this address under a prefix length. Idempotent once
    /// `prefix_bits` meets or exceeds the effective bit length.
    pub fn to_subnet(&self, prefix_bits: u32) -> IpAddress {
        let effective = self.network_prefix_bits().unwrap_or(self.bit_count());
        if prefix_bits >= effective {
            return self.clone();
        }
        let mask = network_mask(self.version(), prefix_bits, false);
        self.to_subnet_impl(&mask, Some(prefix_bits))
    }

    fn to_subnet_impl(&self, mask: &IpAddress, prefix_bits: Option<u32>) -> IpAddress {
        if mask.version() != self.version() {
            panic!("{}: {}, {}", PANIC_VERSION_MISMATCH, self, mask);
        }
        match subnet_segments(self.segments(), mask.segments(), prefix_bits) {
            None => self.clone(),
            Some(segments) => match self {
                IpAddress::V4(_) => IpAddress::V4(Ipv4Address::with_prefix(segments, prefix_bits)),
                IpAddress::V6(a) => IpAddress::V6(Ipv6Address::with_prefix(
                    segments,
                    a.was_mixed,
                    &a.zone,
                    prefix_bits,
                )),
            },
        }
    }

    /// The network portion of the address as a section (remembering the
    /// prefix length used to create it).
    pub fn network_section(&self, cidr_bits: u32) -> Section {
        self.section().network_section(cidr_bits)
    }

    /// The host portion of the address as a section.
    pub fn host_section(&self, cidr_bits: u32) -> Section {
        self.section().host_section(cidr_bits)
    }

    /* ------------- string creation ------------- */

    /// RFC 5952 canonical form; unique per address value.
    pub fn to_canonical_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_canonical_string().to_string(),
            IpAddress::V6(a) => a.append_zone(a.section.to_canonical_string().to_string()),
        }
    }

    /// No compression, no mixed notation; unique per address value.
    pub fn to_normalized_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_normalized_string().to_string(),
            IpAddress::V6(a) => a.append_zone(a.section.to_normalized_string().to_string()),
        }
    }

    /// Every segment at full width; unique per address value.
    pub fn to_full_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_full_string().to_string(),
            IpAddress::V6(a) => a.append_zone(a.section.to_full_string().to_string()),
        }
    }

    /// The shortest valid spelling; unique per address value.
    pub fn to_compressed_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_compressed_string().to_string(),
            IpAddress::V6(a) => a.append_zone(a.section.to_compressed_string().to_string()),
        }
    }

    /// Canonical, but with CIDR ranges shown as wildcards/ranges and no
    /// prefix length.
    pub fn to_canonical_wildcard_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_canonical_wildcard_string().to_string(),
            IpAddress::V6(a) => a.append_zone(a.section.to_canonical_wildcard_string().to_string()),
        }
    }

    pub fn to_normalized_wildcard_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_normalized_wildcard_string().to_string(),
            IpAddress::V6(a) => {
                a.append_zone(a.section.to_normalized_wildcard_string().to_string())
            }
        }
    }

    pub fn to_compressed_wildcard_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.section.to_compressed_wildcard_string().to_string(),
            IpAddress::V6(a) => {
                a.append_zone(a.section.to_compressed_wildcard_string().to_string())
            }
        }
    }

    /// A handful of spellings (compression and case variants).
    pub fn to_basic_strings(&self) -> Vec<String> {
        match self {
            IpAddress::V4(a) => a.section.to_basic_strings(),
            IpAddress::V6(a) => a.append_zones(a.section.to_basic_strings()),
        }
    }

    /// The standard spellings (at most a couple dozen).
    pub fn to_standard_strings(&self) -> Vec<String> {
        match self {
            IpAddress::V4(a) => a.section.to_standard_strings(),
            IpAddress::V6(a) => a.append_zones(a.section.to_standard_strings()),
        }
    }

    /**
    Every spelling of the address.

    Use with care: "::" alone has 1297 variants, `a:b:c:0:d:e:f:1` has
    3840.
    */
    pub fn to_all_strings(&self) -> Vec<String> {
        match self {
            IpAddress::V4(a) => a.section.to_all_strings(),
            IpAddress::V6(a) => a.append_zones(a.section.to_all_strings()),
        }
    }

    /// Custom variant enumeration.
    pub fn to_strings(&self, options: VariantOptions) -> Vec<String> {
        match self {
            IpAddress::V4(a) => a.section.to_strings(options),
            IpAddress::V6(a) => a.append_zones(a.section.to_strings(options)),
        }
    }

    /// SQL predicate matching a text column against this address or
    /// network; see [`Section::append_starts_with_sql_clause`].
    pub fn append_starts_with_sql_clause(&self, builder: &mut String, column: &str) {
        self.section().append_starts_with_sql_clause(builder, column);
    }

    /// Quote and comma-join strings for use in an SQL `IN (...)` list.
    pub fn to_delimited_sql_strings(strs: &[String]) -> String {
        if strs.is_empty() {
            return String::new();
        }
        let mut builder = String::new();
        for s in strs {
            builder.push('\'');
            builder.push_str(s);
            builder.push_str("',");
        }
        builder.pop();
        builder
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => IpAddress::from_bytes(&v4.octets()),
            IpAddr::V6(v6) => IpAddress::from_bytes(&v6.octets()),
        }
    }
}

impl Ord for IpAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IpAddress::V4(a), IpAddress::V4(b)) => {
                a.section.cmp(&b.section).then_with(|| {
                    compare_prefixes(self.network_prefix_bits(), other.network_prefix_bits())
                })
            }
            (IpAddress::V6(a), IpAddress::V6(b)) => {
                a.section.cmp(&b.section).then_with(|| {
                    compare_prefixes(self.network_prefix_bits(), other.network_prefix_bits())
                })
            }
            (IpAddress::V4(a), IpAddress::V6(b)) => {
                // order across versions through IPv4-mapped conversion
                if b.is_ipv4_mapped() {
                    a.section.cmp(&b.mixed_address().section)
                } else {
                    Ordering::Less
                }
            }
            (IpAddress::V6(a), IpAddress::V4(b)) => {
                if a.is_ipv4_mapped() {
                    a.mixed_address().section.cmp(&b.section)
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl PartialOrd for IpAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for IpAddress {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IpAddress {}

impl Hash for IpAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // consistent with Eq across versions: a mapped IPv6 address
        // hashes like its IPv4 form
        match self.ipv4_comparable_section() {
            Some(section) => section.to_normalized_string().hash(state),
            None => self.section().to_normalized_string().hash(state),
        }
    }
}

fn compare_prefixes(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/* -------------------------------------------------------------------------- */

/// An IPv4 address or set of addresses.
#[derive(Clone, Debug)]
pub struct Ipv4Address {
    section: Section,
}

impl Ipv4Address {
    /**
    Build from exactly 4 one-byte segments.

    # Panics

    Panics on a wrong segment count.
    */
    pub fn new(segments: Vec<Segment>) -> Self {
        Ipv4Address::with_prefix(segments, None)
    }

    /// Like [`Ipv4Address::new`], distributing a CIDR prefix across the
    /// segments so the address represents the whole network.
    pub fn with_prefix(segments: Vec<Segment>, cidr_prefix_bits: Option<u32>) -> Self {
        if segments.len() != IpVersion::V4.segment_count() {
            panic!("{}: {}", PANIC_SEGMENT_COUNT, segments.len());
        }
        let segments = to_cidr_segments(cidr_prefix_bits, segments);
        Ipv4Address {
            section: Section::new(IpVersion::V4, segments),
        }
    }

    /**
    Build from 4 raw bytes, optionally applying a CIDR prefix during
    assembly.

    # Panics

    Panics on a wrong byte count.
    */
    pub fn from_bytes(bytes: &[u8], cidr_prefix_bits: Option<u32>) -> Self {
        if bytes.len() != IpVersion::V4.byte_count() {
            panic!("{}: {}", PANIC_BYTE_LENGTH, bytes.len());
        }
        Ipv4Address {
            section: Section::new(IpVersion::V4, bytes_to_segments(IpVersion::V4, bytes, cidr_prefix_bits)),
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn segments(&self) -> &[Segment] {
        self.section.segments()
    }

    pub fn bytes(&self) -> Vec<u8> {
        IpAddress::V4(self.clone()).bytes()
    }

    /// 169.254/16
    pub fn is_link_local(&self) -> bool {
        let segs = self.segments();
        segs[0].matches(169) && segs[1].matches(254)
    }

    /// The RFC 1918 private blocks: 10/8, 172.16/12, 192.168/16.
    pub fn is_site_local(&self) -> bool {
        let segs = self.segments();
        segs[0].matches(10)
            || (segs[0].matches(172) && segs[1].matches_with_mask(16, 0xf0))
            || (segs[0].matches(192) && segs[1].matches(168))
    }

    /// 127/8
    pub fn is_loopback(&self) -> bool {
        self.segments()[0].matches(127)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section.to_canonical_string())
    }
}

/* -------------------------------------------------------------------------- */

/// An IPv6 address or set of addresses, optionally carrying a zone
/// (scope) identifier and a preference for mixed-notation rendering.
#[derive(Clone, Debug)]
pub struct Ipv6Address {
    section: Section,
    zone: String,
    /// whether the source string used mixed notation (a:b:c:d:e:f:1.2.3.4)
    was_mixed: bool,
}

impl Ipv6Address {
    /**
    Build from exactly 8 two-byte segments. The zone should be empty when
    a CIDR prefix is carried by the segments.

    # Panics

    Panics on a wrong segment count.
    */
    pub fn new(segments: Vec<Segment>, was_mixed: bool, zone: &str) -> Self {
        Ipv6Address::with_prefix(segments, was_mixed, zone, None)
    }

    /// Like [`Ipv6Address::new`], distributing a CIDR prefix across the
    /// segments.
    pub fn with_prefix(
        segments: Vec<Segment>,
        was_mixed: bool,
        zone: &str,
        cidr_prefix_bits: Option<u32>,
    ) -> Self {
        if segments.len() != IpVersion::V6.segment_count() {
            panic!("{}: {}", PANIC_SEGMENT_COUNT, segments.len());
        }
        let segments = to_cidr_segments(cidr_prefix_bits, segments);
        Ipv6Address {
            section: Section::full_ipv6(segments),
            zone: zone.to_string(),
            was_mixed,
        }
    }

    /**
    Build from 16 raw bytes, optionally applying a CIDR prefix during
    assembly.

    # Panics

    Panics on a wrong byte count.
    */
    pub fn from_bytes(bytes: &[u8], cidr_prefix_bits: Option<u32>) -> Self {
        if bytes.len() != IpVersion::V6.byte_count() {
            panic!("{}: {}", PANIC_BYTE_LENGTH, bytes.len());
        }
        Ipv6Address {
            section: Section::full_ipv6(bytes_to_segments(IpVersion::V6, bytes, cidr_prefix_bits)),
            zone: String::new(),
            was_mixed: false,
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn segments(&self) -> &[Segment] {
        self.section.segments()
    }

    pub fn has_zone(&self) -> bool {
        !self.zone.is_empty()
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// The low 4 bytes as an IPv4 address (the mixed-notation part).
    pub fn mixed_address(&self) -> Ipv4Address {
        Ipv4Address {
            section: self
                .section
                .mixed_section()
                .expect("full IPv6 sections always embed a mixed IPv4 section")
                .clone(),
        }
    }

    /// `::ffff:0:0/96`, IPv6-mapped IPv4.
    pub fn is_ipv4_mapped(&self) -> bool {
        let segs = self.segments();
        segs[5].matches(0xffff) && segs[..4].iter().all(|s| s.is_zero())
    }

    /// `::ffff:0:0:0/96`, addresses translated from IPv4.
    pub fn is_ipv4_translated(&self) -> bool {
        let segs = self.segments();
        segs[4].matches(0xffff) && segs[5].is_zero() && segs[..3].iter().all(|s| s.is_zero())
    }

    /// Top 96 bits zero (deprecated IPv4-compatible form).
    pub fn is_ipv4_compatible(&self) -> bool {
        self.segments()[..6].iter().all(|s| s.is_zero())
    }

    /// First segment 0xfe80. Narrower than the RFC 4291 fe80::/10
    /// prefix: this is the current behavior, kept as-is (fe90::1 is not
    /// link-local here although the RFC says it is).
    pub fn is_link_local(&self) -> bool {
        self.segments()[0].matches(0xfe80)
    }

    /// First segment 0xfec0; same current-behavior caveat as
    /// [`Ipv6Address::is_link_local`].
    pub fn is_site_local(&self) -> bool {
        self.segments()[0].matches(0xfec0)
    }

    /// 2002::/16, the 6to4 relay prefix.
    pub fn is_6to4(&self) -> bool {
        self.segments()[0].matches(0x2002)
    }

    /// 64:ff9b::/96, the well-known IPv4/IPv6 translation prefix.
    pub fn is_well_known_translation(&self) -> bool {
        let segs = self.segments();
        segs[0].matches(0x64) && segs[1].matches(0xff9b) && segs[2..6].iter().all(|s| s.is_zero())
    }

    /// `::1`, or the IPv4 loopback seen through the mapped form.
    pub fn is_loopback(&self) -> bool {
        if self.is_ipv4_mapped() {
            return self.mixed_address().is_loopback();
        }
        let segs = self.segments();
        segs[..7].iter().all(|s| s.is_zero()) && segs[7].matches(1)
    }

    /// Mixed IPv6/IPv4 rendering (`a:b:c:d:e:f:1.2.3.4`).
    pub fn to_mixed_string(&self) -> String {
        self.append_zone(self.section.to_mixed_string())
    }

    /**
    Render with explicit normalization choices: `keep_mixed` preserves
    the source's mixed notation, `make_mixed` forces it, `compress`
    compresses the largest zero run and `compress_single` extends that to
    lone zero segments.
    */
    pub fn to_normalized_string_opts(
        &self,
        keep_mixed: bool,
        make_mixed: bool,
        compress: bool,
        compress_single: bool,
    ) -> String {
        let make_mixed = make_mixed || (keep_mixed && self.was_mixed);
        V6Normalize::new(make_mixed, compress, compress_single, true, false, false)
            .to_string_of(&self.section)
    }

    fn append_zone(&self, mut s: String) -> String {
        if !self.section.is_multiple() && self.has_zone() {
            s.push(ZONE_SEPARATOR);
            s.push_str(&self.zone);
        }
        s
    }

    fn append_zones(&self, mut strs: Vec<String>) -> Vec<String> {
        if !self.section.is_multiple() && self.has_zone() {
            for s in &mut strs {
                s.push(ZONE_SEPARATOR);
                s.push_str(&self.zone);
            }
        }
        strs
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.append_zone(self.section.to_canonical_string().to_string()))
    }
}

/* -------------------------------------------------------------------------- */

/// Iterator over the concrete addresses an address represents.
pub struct AddressIter<'a> {
    inner: SegmentSetIter<'a>,
    version: IpVersion,
    zone: String,
    was_mixed: bool,
}

impl Iterator for AddressIter<'_> {
    type Item = IpAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let segments = self.inner.next()?;
        Some(match self.version {
            IpVersion::V4 => IpAddress::V4(Ipv4Address::new(segments)),
            IpVersion::V6 => {
                IpAddress::V6(Ipv6Address::new(segments, self.was_mixed, &self.zone))
            }
        })
    }
}

/* -------------------------------------------------------------------------- */

/// Build segments from raw address bytes, masking past the CIDR boundary.
fn bytes_to_segments(version: IpVersion, bytes: &[u8], cidr_prefix_bits: Option<u32>) -> Vec<Segment> {
    let bytes_per_segment = version.bytes_per_segment();
    let segment_count = version.segment_count();
    let cidr_byte_index = match cidr_prefix_bits {
        None => bytes.len() as i64,
        Some(p) => ((p as i64 - 1) >> 3).min(bytes.len() as i64),
    };
    let mut segments = Vec::with_capacity(segment_count);
    for segment_index in 0..segment_count {
        let mut value: u16 = 0;
        for k in 0..bytes_per_segment {
            let j = segment_index * bytes_per_segment + k;
            let byte_value = if (j as i64) >= cidr_byte_index {
                if j as i64 == cidr_byte_index {
                    let start_bits = cidr_prefix_bits.unwrap() % 8;
                    if start_bits != 0 {
                        bytes[j] & (0xffu16 << (8 - start_bits)) as u8
                    } else {
                        bytes[j]
                    }
                } else {
                    0
                }
            } else {
                bytes[j]
            };
            value = (value << 8) | byte_value as u16;
        }
        let prefix = segment_prefix_bits(
            version.bits_per_segment(),
            cidr_prefix_bits,
            segment_index,
            segment_count,
        );
        segments.push(Segment::with_prefix(version, value, prefix));
    }
    segments
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(bytes: [u8; 4]) -> IpAddress {
        IpAddress::from_bytes(&bytes)
    }

    fn v6(segs: [u16; 8]) -> IpAddress {
        let mut bytes = Vec::new();
        for s in segs {
            bytes.push((s >> 8) as u8);
            bytes.push((s & 0xff) as u8);
        }
        IpAddress::from_bytes(&bytes)
    }

    #[test]
    fn test_from_bytes_strings() {
        assert_eq!(v4([255, 255, 255, 255]).to_canonical_string(), "255.255.255.255");
        assert_eq!(v4([1, 2, 3, 4]).to_canonical_string(), "1.2.3.4");
        assert_eq!(v6([0; 8]).to_canonical_string(), "::");
        assert_eq!(v6([0, 0, 0, 0, 0, 0, 0, 1]).to_canonical_string(), "::1");
        assert_eq!(
            v6([0xa, 0xb, 0xc, 0xd, 0xe, 0xf, 1, 2]).to_canonical_string(),
            "a:b:c:d:e:f:1:2"
        );
    }

    #[test]
    fn test_loopback() {
        assert!(v4([127, 0, 0, 1]).is_loopback());
        assert!(v4([127, 255, 0, 1]).is_loopback());
        assert!(!v4([128, 0, 0, 1]).is_loopback());
        assert!(v6([0, 0, 0, 0, 0, 0, 0, 1]).is_loopback());
        assert!(!v6([0, 0, 0, 0, 0, 0, 0, 2]).is_loopback());
        // the IPv4 loopback seen through the mapped form
        assert!(v6([0, 0, 0, 0, 0, 0xffff, 0x7f00, 1]).is_loopback());
    }

    #[test]
    fn test_link_and_site_local() {
        assert!(v4([169, 254, 1, 1]).is_link_local());
        assert!(!v4([169, 253, 1, 1]).is_link_local());
        assert!(v4([10, 0, 0, 1]).is_site_local());
        assert!(v4([172, 16, 0, 1]).is_site_local());
        assert!(v4([172, 31, 0, 1]).is_site_local());
        assert!(!v4([172, 32, 0, 1]).is_site_local());
        assert!(v4([192, 168, 3, 4]).is_site_local());

        assert!(v6([0xfe80, 0, 0, 0, 0, 0, 0, 1]).is_link_local());
        // current behavior: only the exact first segment matches, not
        // the whole fe80::/10 as RFC 4291 would have it
        assert!(!v6([0xfe90, 0, 0, 0, 0, 0, 0, 1]).is_link_local());
        assert!(v6([0xfec0, 0, 0, 0, 0, 0, 0, 1]).is_site_local());
    }

    #[test]
    fn test_mapped_and_compatible() {
        let mapped = v6([0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x011a]);
        assert!(mapped.is_ipv4_mapped());
        assert_eq!(mapped.ipv4_mapped_bytes(), Some(vec![192, 168, 1, 26]));
        assert!(!v6([0, 0, 0, 0, 0, 0xfffe, 0xc0a8, 0x011a]).is_ipv4_mapped());

        assert!(v6([0, 0, 0, 0, 0, 0, 0x1234, 1]).is_ipv4_compatible());
        let translated = v6([0, 0, 0, 0, 0xffff, 0, 0x0102, 0x0304]);
        assert!(translated.as_ipv6().unwrap().is_ipv4_translated());
        let relay = v6([0x2002, 1, 2, 3, 4, 5, 6, 7]);
        assert!(relay.is_ipv6_to_ipv4_relay());
        let wk = v6([0x64, 0xff9b, 0, 0, 0, 0, 0x0102, 0x0304]);
        assert!(wk.as_ipv6().unwrap().is_well_known_translation());
    }

    #[test]
    fn test_cross_version_ordering() {
        let four = v4([1, 2, 3, 4]);
        let mapped = v6([0, 0, 0, 0, 0, 0xffff, 0x0102, 0x0304]);
        let six = v6([1, 0, 0, 0, 0, 0, 0, 1]);
        // mapped form compares equal in either direction
        assert_eq!(four, mapped);
        assert_eq!(mapped, four);
        assert!(four < six);
        assert!(six > four);

        let mut list = vec![six.clone(), four.clone(), v4([0, 0, 0, 1])];
        list.sort();
        assert_eq!(list[0], v4([0, 0, 0, 1]));
        assert_eq!(list[2], six);
    }

    #[test]
    fn test_subnet_by_prefix() {
        let addr = v4([9, 129, 237, 26]);
        let subnet = addr.to_subnet(8);
        assert_eq!(subnet.to_normalized_string(), "9.0.0.0/8");
        // idempotent at or past the effective length
        assert_eq!(subnet.to_subnet(8), subnet);
        assert_eq!(addr.to_subnet(32), addr);
        assert_eq!(addr.to_subnet(33), addr);

        let addr = v6([9, 0x129, 0, 0, 0, 0, 0x237, 0x26]);
        assert_eq!(addr.to_subnet(16).to_canonical_string(), "9::/16");
    }

    #[test]
    fn test_subnet_by_mask() {
        let addr = v4([1, 2, 3, 4]);
        let mask = v4([0, 0, 2, 0]);
        assert_eq!(addr.to_subnet_masked(&mask, None).to_normalized_string(), "0.0.2.0");

        let addr = v6([0xa, 0xb, 0xc, 0xd, 0xe, 0xf, 0xa, 0xb]);
        let mask = v6([0xffff, 0xffff, 0xffff, 0xffff, 0, 0, 0, 0]);
        assert_eq!(
            addr.to_subnet_masked(&mask, None).to_canonical_string(),
            "a:b:c:d::"
        );
        let mask = v6([0, 0, 0, 0, 0xffff, 0xffff, 0xffff, 0xffff]);
        assert_eq!(
            addr.to_subnet_masked(&mask, None).to_canonical_string(),
            "::e:f:a:b"
        );
    }

    #[test]
    #[should_panic]
    fn test_subnet_version_mismatch_panics() {
        let addr = v4([1, 2, 3, 4]);
        let mask = v6([0xffff, 0, 0, 0, 0, 0, 0, 0]);
        addr.to_subnet_masked(&mask, None);
    }

    #[test]
    #[should_panic]
    fn test_masking_multiple_panics() {
        let addr = v4([9, 129, 237, 26]).to_subnet(8);
        let mask = v4([255, 0, 0, 0]);
        addr.to_subnet_masked(&mask, None);
    }

    #[test]
    fn test_count_and_iteration() {
        let addr = v4([1, 2, 3, 4]);
        assert_eq!(addr.count(), BigUint::from(1u8));
        assert_eq!(addr.iter().count(), 1);

        let subnet = addr.to_subnet(30);
        assert_eq!(subnet.count(), BigUint::from(4u8));
        let all: Vec<String> = subnet.iter().map(|a| a.to_canonical_string()).collect();
        assert_eq!(all, vec!["1.2.3.4", "1.2.3.5", "1.2.3.6", "1.2.3.7"]);

        // iteration restarts from a fresh iterator
        assert_eq!(subnet.iter().count(), 4);
    }

    #[test]
    fn test_bytes_round_trip() {
        let addr = v4([9, 129, 237, 26]);
        assert_eq!(addr.bytes(), vec![9, 129, 237, 26]);
        assert_eq!(IpAddress::from_bytes(&addr.bytes()), addr);
        assert_eq!(addr.to_ip_addr(), "9.129.237.26".parse::<IpAddr>().unwrap());

        let addr = v6([0x2001, 0, 0x1234, 0, 0, 0xc1c0, 0xabcd, 0x876]);
        assert_eq!(
            addr.to_ip_addr(),
            "2001:0:1234::c1c0:abcd:876".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_bytes_with_prefix_masked() {
        let addr = IpAddress::from_bytes_with_prefix(&[9, 129, 237, 26], Some(9));
        assert_eq!(addr.to_normalized_string(), "9.128.0.0/9");
        let addr = IpAddress::from_bytes_with_prefix(&[9, 129, 237, 26], Some(0));
        assert_eq!(addr.to_normalized_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_ipnet_interop() {
        let addr = v4([9, 129, 237, 26]).to_subnet(8);
        let net = addr.to_ip_net().unwrap();
        assert_eq!(net.to_string(), "9.0.0.0/8");
        assert_eq!(IpAddress::from_ip_net(net), addr);

        // a plain address maps to a full-length network
        let single = v4([1, 2, 3, 4]);
        assert_eq!(single.to_ip_net().unwrap().to_string(), "1.2.3.4/32");
    }

    #[test]
    fn test_network_and_host_sections() {
        let addr = v4([9, 129, 237, 26]);
        assert_eq!(addr.network_section(8).to_normalized_string(), "9");
        assert_eq!(addr.host_section(8).to_normalized_string(), "129.237.26");
        assert_eq!(addr.network_section(16).to_normalized_string(), "9.129");
        assert_eq!(addr.network_section(31).to_normalized_string(), "9.129.237.26/31");
        assert_eq!(addr.host_section(31).to_normalized_string(), "0");
        assert_eq!(addr.network_section(32).to_normalized_string(), "9.129.237.26");
        assert_eq!(addr.host_section(32).to_normalized_string(), "");
    }

    #[test]
    fn test_zone_rendering() {
        let mut bytes = vec![0u8; 16];
        bytes[15] = 1;
        let addr = Ipv6Address::from_bytes(&bytes, None);
        let zoned = Ipv6Address::new(addr.segments().to_vec(), false, "eth0");
        assert_eq!(
            IpAddress::V6(zoned).to_canonical_string(),
            "::1%eth0"
        );
    }
}
