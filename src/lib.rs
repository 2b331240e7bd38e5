// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Dual-stack IP address and hostname tooling.

This crate models IPv4/IPv6 addresses with support for exact addresses,
wildcard segments (`*`), explicit per-segment ranges (`a-b`), CIDR network
prefixes and IPv6 zones, plus the textual machinery around them: parsing
and validation ([`IpAddressString`]), hostname handling ([`Host`]),
multi-representation string rendering, subnet masking, address enumeration
and SQL prefix-search fragment generation for datastores which keep
addresses as plain text.
*/

mod address;
mod builder;
mod host;
mod network;
mod parser;
mod render;
mod section;
mod segment;
mod strings;

use serde::{Deserialize, Serialize};
use std::{error, fmt};
use strings::*;

pub use address::{IpAddress, Ipv4Address, Ipv6Address};
pub use builder::VariantOptions;
pub use host::{Host, HostOptions, NameResolver, SystemResolver};
pub use network::{host_mask, network_mask};
pub use parser::{IpAddressString, RangeOptions, ValidationOptions};
pub use section::Section;
pub use segment::Segment;

pub(crate) const IPV4_BITS: u32 = 32;
pub(crate) const IPV6_BITS: u32 = 128;

pub(crate) const SEGMENT_WILDCARD: char = '*';
pub(crate) const EQUIVALENT_WILDCARD: char = '%';
pub(crate) const RANGE_SEPARATOR: char = '-';
pub(crate) const PREFIX_SEPARATOR: char = '/';
pub(crate) const ZONE_SEPARATOR: char = '%';
pub(crate) const V4_SEPARATOR: char = '.';
pub(crate) const V6_SEPARATOR: char = ':';

/// Upper bound on the length of any single rendered IPv6 string.
pub(crate) const MAX_STRING_LEN: usize = 50;

/// IP address family/version.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    pub const fn bit_count(self) -> u32 {
        match self {
            IpVersion::V4 => IPV4_BITS,
            IpVersion::V6 => IPV6_BITS,
        }
    }

    pub const fn byte_count(self) -> usize {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 16,
        }
    }

    pub const fn segment_count(self) -> usize {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 8,
        }
    }

    pub const fn bits_per_segment(self) -> u32 {
        match self {
            IpVersion::V4 => 8,
            IpVersion::V6 => 16,
        }
    }

    pub const fn bytes_per_segment(self) -> usize {
        match self {
            IpVersion::V4 => 1,
            IpVersion::V6 => 2,
        }
    }

    pub const fn max_segment_value(self) -> u16 {
        match self {
            IpVersion::V4 => 0xff,
            IpVersion::V6 => 0xffff,
        }
    }

    /// Printable radix for segment values (decimal for v4, hex for v6).
    pub const fn radix(self) -> u32 {
        match self {
            IpVersion::V4 => 10,
            IpVersion::V6 => 16,
        }
    }

    pub const fn separator(self) -> char {
        match self {
            IpVersion::V4 => V4_SEPARATOR,
            IpVersion::V6 => V6_SEPARATOR,
        }
    }

    /// Widest printable segment: 3 chars for v4 ("255"), 4 for v6 ("ffff").
    pub const fn max_segment_chars(self) -> usize {
        match self {
            IpVersion::V4 => 3,
            IpVersion::V6 => 4,
        }
    }

    pub const fn is_ipv4(self) -> bool {
        matches!(self, IpVersion::V4)
    }

    pub const fn is_ipv6(self) -> bool {
        matches!(self, IpVersion::V6)
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

/// Format a segment value in the version's printable radix.
pub(crate) fn fmt_seg_value(version: IpVersion, value: u16) -> String {
    match version {
        IpVersion::V4 => value.to_string(),
        IpVersion::V6 => format!("{value:x}"),
    }
}

/* -------------------------------------------------------------------------- */

/// The specific reason an address string failed validation.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressErrorKind {
    /// not recognizable as either address family
    IpFormat,
    Ipv4Format,
    Ipv6SegmentFormat,
    TooFewSegments,
    TooManySegments,
    SingleSeparatorAtStart,
    SingleSeparatorAtEnd,
    /// more than one `::` (or a `:::` run)
    AmbiguousCompression,
    LeadingZeros,
    /// range lower bound not below upper bound
    InvalidRange,
    InvalidCidrPrefix,
    ZoneAndCidrPrefix,
    /// `%zone` on something that is not IPv6
    ZoneOnIpv4,
    /// the string is a URL, not an address
    Url,
    Empty,
}

impl AddressErrorKind {
    fn message(self) -> &'static str {
        match self {
            AddressErrorKind::IpFormat => ERR_IP_FORMAT,
            AddressErrorKind::Ipv4Format => ERR_IPV4_FORMAT,
            AddressErrorKind::Ipv6SegmentFormat => ERR_IPV6_SEGMENT,
            AddressErrorKind::TooFewSegments => ERR_TOO_FEW_SEGMENTS,
            AddressErrorKind::TooManySegments => ERR_TOO_MANY_SEGMENTS,
            AddressErrorKind::SingleSeparatorAtStart => ERR_SINGLE_SEP_START,
            AddressErrorKind::SingleSeparatorAtEnd => ERR_SINGLE_SEP_END,
            AddressErrorKind::AmbiguousCompression => ERR_AMBIGUOUS,
            AddressErrorKind::LeadingZeros => ERR_LEADING_ZEROS,
            AddressErrorKind::InvalidRange => ERR_INVALID_RANGE,
            AddressErrorKind::InvalidCidrPrefix => ERR_INVALID_PREFIX,
            AddressErrorKind::ZoneAndCidrPrefix => ERR_ZONE_AND_PREFIX,
            AddressErrorKind::ZoneOnIpv4 => ERR_ZONE_ON_IPV4,
            AddressErrorKind::Url => ERR_IS_URL,
            AddressErrorKind::Empty => ERR_EMPTY,
        }
    }
}

/// Validation failure for an address string. Carries the offending input
/// and a diagnostic kind rather than free-form text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressError {
    pub input: String,
    pub kind: AddressErrorKind,
}

impl AddressError {
    pub(crate) fn new(input: impl Into<String>, kind: AddressErrorKind) -> Self {
        AddressError {
            input: input.into(),
            kind,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}: {}", self.input, ERR_ADDRESS, self.kind.message())
    }
}

impl error::Error for AddressError {}

/* -------------------------------------------------------------------------- */

/// The specific reason a host string failed validation.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostErrorKind {
    /// over 253 characters
    InvalidLength,
    TooManySegments,
    InvalidFormat,
    /// the string is a URL, not a host
    Url,
    ZoneNotAllowed,
}

impl HostErrorKind {
    fn message(self) -> &'static str {
        match self {
            HostErrorKind::InvalidLength => ERR_HOST_LENGTH,
            HostErrorKind::TooManySegments => ERR_HOST_SEGMENTS,
            HostErrorKind::InvalidFormat => ERR_HOST_FORMAT,
            HostErrorKind::Url => ERR_IS_URL,
            HostErrorKind::ZoneNotAllowed => ERR_HOST_ZONE,
        }
    }
}

/// Validation failure for a host string, optionally wrapping the address
/// error that caused it (for IP-literal-shaped hosts).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostError {
    pub input: String,
    pub kind: HostErrorKind,
    pub source: Option<AddressError>,
}

impl HostError {
    pub(crate) fn new(input: impl Into<String>, kind: HostErrorKind) -> Self {
        HostError {
            input: input.into(),
            kind,
            source: None,
        }
    }

    pub(crate) fn with_source(
        input: impl Into<String>,
        kind: HostErrorKind,
        source: AddressError,
    ) -> Self {
        HostError {
            input: input.into(),
            kind,
            source: Some(source),
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}: {}", self.input, ERR_HOST, self.kind.message())
    }
}

impl error::Error for HostError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.source {
            Some(e) => Some(e),
            None => None,
        }
    }
}
