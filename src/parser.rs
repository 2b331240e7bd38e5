// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    address::{IpAddress, Ipv4Address, Ipv6Address},
    host::Host,
    network::network_mask,
    section::segment_prefix_bits,
    segment::Segment,
    strings::{PANIC_SEGMENT_TEXT, PANIC_VERSION_MISMATCH},
    AddressError, AddressErrorKind, IpVersion, EQUIVALENT_WILDCARD, PREFIX_SEPARATOR,
    RANGE_SEPARATOR, SEGMENT_WILDCARD, V4_SEPARATOR, V6_SEPARATOR, ZONE_SEPARATOR,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which range syntaxes a segment may use.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum RangeOptions {
    #[default]
    NoRange,
    /// `*` (or `%`) only
    WildcardOnly,
    /// `*`, `%` and explicit `a-b` ranges
    WildcardAndRange,
}

impl RangeOptions {
    fn wildcard_allowed(self) -> bool {
        !matches!(self, RangeOptions::NoRange)
    }

    fn range_allowed(self) -> bool {
        matches!(self, RangeOptions::WildcardAndRange)
    }
}

/**
What an [`IpAddressString`] accepts. No hidden process-wide state: every
parse site names its options, with [`ValidationOptions::DEFAULT`] (plain
addresses), [`ValidationOptions::WILDCARD`] and
[`ValidationOptions::WILDCARD_AND_RANGE`] as the common configurations.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// accept a zero-length string as a valid "no value"
    pub allow_empty: bool,
    /// accept `092` as `92` instead of rejecting it
    pub allow_leading_zeros_ipv4: bool,
    /// accept a trailing dotted-quad inside an IPv6 literal
    pub allow_mixed: bool,
    /// accept a `%zone` suffix (makes `%` unavailable as a wildcard)
    pub allow_ipv6_zone: bool,
    /// let a wildcard stand in for one or more whole segments
    pub allow_wildcarded_separator: bool,
    /// treat a CIDR prefix larger than the address as "full address"
    pub allow_prefixes_beyond_address_size: bool,
    pub range_options: RangeOptions,
    /// range options for the dotted-quad of a mixed address
    pub mixed_range_options: RangeOptions,
    pub mixed_allow_wildcarded_separator: bool,
    pub mixed_allow_zone: bool,
}

impl ValidationOptions {
    pub const DEFAULT: ValidationOptions = ValidationOptions {
        allow_empty: false,
        allow_leading_zeros_ipv4: true,
        allow_mixed: true,
        allow_ipv6_zone: true,
        allow_wildcarded_separator: false,
        allow_prefixes_beyond_address_size: true,
        range_options: RangeOptions::NoRange,
        mixed_range_options: RangeOptions::NoRange,
        mixed_allow_wildcarded_separator: false,
        mixed_allow_zone: true,
    };

    pub const WILDCARD: ValidationOptions = ValidationOptions {
        allow_empty: false,
        allow_leading_zeros_ipv4: true,
        allow_mixed: true,
        allow_ipv6_zone: false,
        allow_wildcarded_separator: true,
        allow_prefixes_beyond_address_size: true,
        range_options: RangeOptions::WildcardOnly,
        mixed_range_options: RangeOptions::WildcardOnly,
        mixed_allow_wildcarded_separator: true,
        mixed_allow_zone: false,
    };

    pub const WILDCARD_AND_RANGE: ValidationOptions = ValidationOptions {
        allow_empty: false,
        allow_leading_zeros_ipv4: true,
        allow_mixed: true,
        allow_ipv6_zone: false,
        allow_wildcarded_separator: true,
        allow_prefixes_beyond_address_size: true,
        range_options: RangeOptions::WildcardAndRange,
        mixed_range_options: RangeOptions::WildcardAndRange,
        mixed_allow_wildcarded_separator: true,
        mixed_allow_zone: false,
    };

    /// Options for the trailing dotted-quad of a mixed address.
    fn mixed_options(&self) -> ValidationOptions {
        ValidationOptions {
            allow_empty: false,
            allow_leading_zeros_ipv4: true,
            allow_mixed: false,
            allow_ipv6_zone: self.mixed_allow_zone,
            allow_wildcarded_separator: self.mixed_allow_wildcarded_separator,
            allow_prefixes_beyond_address_size: true,
            range_options: self.mixed_range_options,
            mixed_range_options: RangeOptions::NoRange,
            mixed_allow_wildcarded_separator: false,
            mixed_allow_zone: true,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions::DEFAULT
    }
}

/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StrType {
    Invalid,
    Ipv4,
    Ipv6,
    /// a valid prefix length with no address (e.g. "/24")
    Prefix,
    /// a valid empty string
    Empty,
}

#[derive(Clone, Copy, Debug)]
struct SegRange {
    lower: u16,
    upper: u16,
    wildcard: bool,
}

/// The per-segment outcome of scanning the raw text: the piece strings
/// exactly as written, their numeric values (absent for ranges and
/// wildcards) and their ranges (present only for ranges and wildcards).
#[derive(Clone, Debug, Default)]
struct ScanResult {
    texts: Vec<String>,
    values: Vec<Option<u16>>,
    ranges: Vec<Option<SegRange>>,
}

#[derive(Clone, Debug, Default)]
struct ParseState {
    validated_v4: bool,
    validated_v6: bool,
    validated_prefix: bool,
    v4_error: Option<AddressError>,
    v6_error: Option<AddressError>,
    prefix_error: Option<AddressError>,
    str_type: Option<StrType>,
    prefix_bits: Option<u32>,
    scan: Option<ScanResult>,
    mixed: bool,
    v6_part: String,
    mixed_part: String,
    value: Option<IpAddress>,
}

/**
An IP address parsed from a string: tokenizes and validates raw text into
one of {IPv4, IPv6, prefix-only, empty, invalid}, producing an
[`IpAddress`] on demand.

Validation is idempotent and memoized, including the validation error:
repeated calls never re-derive a different outcome and return the same
cached error for invalid input. Probing a string separately as IPv4 and
as IPv6 caches each outcome independently. All of this is safe under
concurrent readers.
*/
pub struct IpAddressString {
    /// the full original string
    full_text: String,
    /// the address part, zone and prefix stripped
    text: String,
    zone: String,
    prefix_text: String,
    options: ValidationOptions,
    state: RwLock<ParseState>,
}

impl IpAddressString {
    /// Parse lazily with [`ValidationOptions::DEFAULT`].
    pub fn new(addr: &str) -> Self {
        IpAddressString::with_options(addr, ValidationOptions::DEFAULT)
    }

    pub fn with_options(addr: &str, options: ValidationOptions) -> Self {
        let full_text = addr.to_string();
        let mut text = addr.trim().to_string();
        let mut state = ParseState::default();
        let mut zone = String::new();

        if options.allow_ipv6_zone {
            if let Some(idx) = text.find(ZONE_SEPARATOR) {
                zone = text[idx + 1..].to_string();
                text.truncate(idx);
            }
        }
        let mut prefix_text = String::new();
        if let Some(prefix_idx) = text.find(PREFIX_SEPARATOR) {
            // before assuming a CIDR prefix, check for a URL
            if looks_like_url(&text) {
                let err = AddressError::new(&full_text, AddressErrorKind::Url);
                state.v4_error = Some(err.clone());
                state.v6_error = Some(err);
                state.validated_v4 = true;
                state.validated_v6 = true;
            } else if !zone.is_empty() {
                state.prefix_error =
                    Some(AddressError::new(&full_text, AddressErrorKind::ZoneAndCidrPrefix));
                state.validated_prefix = true;
            } else {
                let candidate = text[prefix_idx + 1..].to_string();
                if candidate.trim().is_empty() {
                    state.prefix_error =
                        Some(AddressError::new(&full_text, AddressErrorKind::InvalidCidrPrefix));
                    state.validated_prefix = true;
                    text.truncate(prefix_idx);
                } else if is_decimal_number(&candidate) {
                    // negative values are rejected later, in prefix validation
                    prefix_text = candidate;
                    text.truncate(prefix_idx);
                }
                // otherwise the '/' stays in the text and fails the
                // address format checks instead
            }
        }
        IpAddressString {
            full_text,
            text,
            zone,
            prefix_text,
            options,
            state: RwLock::new(state),
        }
    }

    fn error(&self, kind: AddressErrorKind) -> AddressError {
        AddressError::new(&self.full_text, kind)
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn has_zone(&self) -> bool {
        !self.zone.is_empty()
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Whether the string carries a CIDR prefix suffix.
    pub fn is_network_prefix(&self) -> bool {
        !self.prefix_text.is_empty()
    }

    /* ------------- validation ------------- */

    fn str_type(&self) -> Option<StrType> {
        self.state.read().str_type
    }

    pub fn is_ipv4(&self) -> bool {
        let _ = self.validate();
        self.str_type() == Some(StrType::Ipv4)
    }

    pub fn is_ipv6(&self) -> bool {
        let _ = self.validate();
        self.str_type() == Some(StrType::Ipv6)
    }

    pub fn ip_version(&self) -> Option<IpVersion> {
        if self.is_ipv4() {
            Some(IpVersion::V4)
        } else if self.is_ipv6() {
            Some(IpVersion::V6)
        } else {
            None
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.validate().is_err()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    /// Whether the string is an actual address (not an empty string or a
    /// bare prefix length).
    pub fn is_valid_address(&self) -> bool {
        self.is_valid()
            && matches!(self.str_type(), Some(StrType::Ipv4) | Some(StrType::Ipv6))
    }

    pub fn is_empty(&self) -> bool {
        let _ = self.validate();
        self.str_type() == Some(StrType::Empty)
    }

    /// Whether any segment uses explicit `a-b` range syntax.
    pub fn has_segment_range(&self) -> bool {
        let _ = self.validate();
        let st = self.state.read();
        st.scan.as_ref().is_some_and(|scan| {
            scan.ranges
                .iter()
                .any(|r| r.is_some_and(|r| !r.wildcard))
        })
    }

    /// Whether any segment is a wildcard.
    pub fn has_segment_wildcard(&self) -> bool {
        let _ = self.validate();
        let st = self.state.read();
        st.scan.as_ref().is_some_and(|scan| {
            scan.ranges.iter().any(|r| r.is_some_and(|r| r.wildcard))
        })
    }

    pub fn is_loopback(&self) -> bool {
        self.get_value().is_some_and(|v| v.is_loopback())
    }

    pub fn is_zero(&self) -> bool {
        self.get_value().is_some_and(|v| v.is_zero())
    }

    /**
    Validate against both address families, memoizing the outcome. The
    cached error is returned verbatim on every later call.
    */
    pub fn validate(&self) -> Result<(), AddressError> {
        {
            let st = self.state.read();
            if st.validated_v4 && st.validated_v6 {
                return self.combined_result(&st);
            }
            if (st.validated_v4 && st.v4_error.is_none())
                || (st.validated_v6 && st.v6_error.is_none())
            {
                return Ok(());
            }
        }
        let mut st = self.state.write();
        self.validate_locked(&mut st)
    }

    fn validate_locked(&self, st: &mut ParseState) -> Result<(), AddressError> {
        if st.validated_v6 {
            if !st.validated_v4 {
                if st.v6_error.is_none() {
                    return Ok(());
                }
                // not IPv6; see if it is IPv4
                let _ = self.validate_ipv4_locked(st);
            }
            return self.combined_result(st);
        }
        if st.validated_v4 {
            if st.v4_error.is_none() {
                return Ok(());
            }
            let _ = self.validate_ipv6_locked(st);
            return self.combined_result(st);
        }
        // we know nothing about this address yet
        st.validated_v4 = true;
        st.validated_v6 = true;
        let result = self.do_validate_any(st);
        if let Err(e) = &result {
            st.mixed = false;
            st.v4_error = Some(e.clone());
            st.v6_error = Some(e.clone());
            st.str_type = Some(StrType::Invalid);
        }
        result
    }

    fn combined_result(&self, st: &ParseState) -> Result<(), AddressError> {
        match (&st.v4_error, &st.v6_error) {
            // pick the error matching what the string looks most like
            (Some(e4), Some(e6)) => Err(if self.text.contains(V6_SEPARATOR) {
                e6.clone()
            } else {
                e4.clone()
            }),
            _ => Ok(()),
        }
    }

    /// Validate strictly as IPv4, memoized separately from the IPv6
    /// probe.
    pub fn validate_ipv4(&self) -> Result<(), AddressError> {
        {
            let st = self.state.read();
            if st.validated_v4 {
                return match &st.v4_error {
                    Some(e) => Err(e.clone()),
                    None => Ok(()),
                };
            }
        }
        let mut st = self.state.write();
        self.validate_ipv4_locked(&mut st)
    }

    fn validate_ipv4_locked(&self, st: &mut ParseState) -> Result<(), AddressError> {
        if st.validated_v4 {
            return match &st.v4_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            };
        }
        // even if IPv6 validation succeeded, generate and cache the
        // appropriate IPv4 outcome
        st.validated_v4 = true;
        let result = self.do_validate_ipv4(st);
        if let Err(e) = &result {
            if st.validated_v6 && st.v6_error.is_some() {
                st.str_type = Some(StrType::Invalid);
            }
            st.v4_error = Some(e.clone());
        }
        result
    }

    /// Validate strictly as IPv6, memoized separately from the IPv4
    /// probe.
    pub fn validate_ipv6(&self) -> Result<(), AddressError> {
        {
            let st = self.state.read();
            if st.validated_v6 {
                return match &st.v6_error {
                    Some(e) => Err(e.clone()),
                    None => Ok(()),
                };
            }
        }
        let mut st = self.state.write();
        self.validate_ipv6_locked(&mut st)
    }

    fn validate_ipv6_locked(&self, st: &mut ParseState) -> Result<(), AddressError> {
        if st.validated_v6 {
            return match &st.v6_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            };
        }
        st.validated_v6 = true;
        let result = self.do_validate_ipv6(st);
        if let Err(e) = &result {
            st.mixed = false;
            if st.validated_v4 && st.v4_error.is_some() {
                st.str_type = Some(StrType::Invalid);
            }
            st.v6_error = Some(e.clone());
        }
        result
    }

    fn do_validate_any(&self, st: &mut ParseState) -> Result<(), AddressError> {
        let ipv4_separators = count_matches(&self.text, V4_SEPARATOR).count;
        let matches = count_matches(&self.text, V6_SEPARATOR);
        if matches.count == 0 {
            st.mixed = false;
            self.validate_as_ipv4(st, ipv4_separators, true)?;
        } else {
            st.mixed = self.options.allow_mixed && ipv4_separators > 0;
            self.validate_as_ipv6(st, &matches)?;
        }
        self.validate_network_prefix(st)
    }

    fn do_validate_ipv4(&self, st: &mut ParseState) -> Result<(), AddressError> {
        let ipv4_separators = count_matches(&self.text, V4_SEPARATOR).count;
        self.validate_as_ipv4(st, ipv4_separators, false)?;
        self.validate_network_prefix(st)
    }

    fn do_validate_ipv6(&self, st: &mut ParseState) -> Result<(), AddressError> {
        let ipv4_separators = count_matches(&self.text, V4_SEPARATOR).count;
        let matches = count_matches(&self.text, V6_SEPARATOR);
        st.mixed = self.options.allow_mixed && matches.count > 0 && ipv4_separators > 0;
        self.check_ipv6_segments(st, &matches)?;
        if !self.text.is_empty() {
            self.scan_and_check_ipv6(st)?;
        } else {
            self.classify_non_address(st)?;
        }
        self.validate_network_prefix(st)
    }

    /// Shared IPv4 branch; `generic` picks the looser "not an IP at all"
    /// diagnostic used by the version-agnostic path.
    fn validate_as_ipv4(
        &self,
        st: &mut ParseState,
        ipv4_separators: usize,
        generic: bool,
    ) -> Result<(), AddressError> {
        let expected = IpVersion::V4.segment_count() - 1;
        let has_wildcard = contains_wildcard(&self.text);
        let has_ipv4_separators = ipv4_separators == expected
            || (ipv4_separators < expected
                && has_wildcard
                && self.options.allow_wildcarded_separator);
        if !has_ipv4_separators {
            if !self.text.is_empty() {
                return Err(self.error(if generic && ipv4_separators == 0 {
                    AddressErrorKind::IpFormat
                } else {
                    AddressErrorKind::Ipv4Format
                }));
            }
            return self.classify_non_address(st);
        }
        let scan = self
            .scan_segments(&self.text, IpVersion::V4, self.options.range_options)
            .ok_or_else(|| self.error(AddressErrorKind::Ipv4Format))?;
        st.str_type = Some(StrType::Ipv4);
        st.mixed = false;
        self.check_segments(&scan, IpVersion::V4)?;
        st.scan = Some(scan);
        if self.has_zone() {
            return Err(self.error(AddressErrorKind::ZoneOnIpv4));
        }
        Ok(())
    }

    fn validate_as_ipv6(
        &self,
        st: &mut ParseState,
        matches: &SeparatorCounter,
    ) -> Result<(), AddressError> {
        // the text is known to hold a ':' here, so it cannot be empty
        self.check_ipv6_segments(st, matches)?;
        self.scan_and_check_ipv6(st)
    }

    fn scan_and_check_ipv6(&self, st: &mut ParseState) -> Result<(), AddressError> {
        let scan = self
            .scan_segments(&st.v6_part, IpVersion::V6, self.options.range_options)
            .ok_or_else(|| self.error(AddressErrorKind::Ipv6SegmentFormat))?;
        st.str_type = Some(StrType::Ipv6);
        if st.mixed {
            let mixed_addr =
                IpAddressString::with_options(&st.mixed_part, self.options.mixed_options());
            mixed_addr.validate_ipv4()?;
        }
        self.check_segments(&scan, IpVersion::V6)?;
        st.scan = Some(scan);
        Ok(())
    }

    /// The text holds no address; it may still be a bare prefix length
    /// or a valid empty string.
    fn classify_non_address(&self, st: &mut ParseState) -> Result<(), AddressError> {
        if !self.prefix_text.is_empty() {
            st.str_type = Some(StrType::Prefix);
        } else if !self.options.allow_empty {
            return Err(self.error(AddressErrorKind::Empty));
        } else {
            st.str_type = Some(StrType::Empty);
        }
        Ok(())
    }

    /**
    The `::` grammar: a lone `::` at the start or end contributes one
    extra virtual segment rather than two; exactly one `::` is allowed;
    mixed notation hides one separator behind the dotted-quad. Returns
    the effective separator count (a wildcard absorbed into the IPv6 part
    adds one).
    */
    fn check_ipv6_segments(
        &self,
        st: &mut ParseState,
        matches: &SeparatorCounter,
    ) -> Result<usize, AddressError> {
        let separator_count = matches.count;
        let mut added_separators = 0usize;
        let hidden_from_mixed = if st.mixed { 1 } else { 0 };
        let expected = IpVersion::V6.segment_count() - 1;
        let double_at_edge: i64 =
            if matches.ends_consecutive || matches.starts_consecutive { 1 } else { 0 };
        let virtual_separators = (separator_count + hidden_from_mixed) as i64 - double_at_edge;

        let no_wildcard_separators;
        if st.mixed {
            let ipv4_index = self.text.rfind(V6_SEPARATOR).unwrap();
            st.v6_part = self.text[..ipv4_index].to_string();
            st.mixed_part = self.text[ipv4_index + 1..].to_string();
            let mut has_v6_part_wildcard = contains_wildcard(&st.v6_part);

            // 1:2:*.3.4 - the wildcard covers both notations, so absorb
            // it into the IPv6 part when there is no compression
            if virtual_separators < expected as i64
                && matches.consecutive_count == 0
                && self.options.allow_wildcarded_separator
            {
                if let Some(next_index) = st.mixed_part.find(V4_SEPARATOR) {
                    let border = st.mixed_part[..next_index].to_string();
                    if is_entirely_wildcard(&border) {
                        st.v6_part.push(V6_SEPARATOR);
                        st.v6_part.push_str(&border);
                        has_v6_part_wildcard = true;
                        added_separators += 1;
                    }
                }
            }
            no_wildcard_separators =
                !(self.options.allow_wildcarded_separator && has_v6_part_wildcard);
        } else {
            st.v6_part = self.text.clone();
            no_wildcard_separators = !(self.options.allow_wildcarded_separator
                && contains_wildcard(&st.v6_part));
        }

        if separator_count + hidden_from_mixed < expected
            && matches.consecutive_count == 0
            && (!self.options.allow_empty || !self.text.is_empty())
            && no_wildcard_separators
        {
            return Err(self.error(AddressErrorKind::TooFewSegments));
        }
        if virtual_separators > expected as i64 {
            return Err(self.error(AddressErrorKind::TooManySegments));
        }
        if matches.starts && !matches.starts_consecutive {
            return Err(self.error(AddressErrorKind::SingleSeparatorAtStart));
        }
        if matches.ends && !matches.ends_consecutive {
            return Err(self.error(AddressErrorKind::SingleSeparatorAtEnd));
        }
        if matches.consecutive_count > 2 {
            // 1::2::3 could be several addresses; ::: is not allowed either
            return Err(self.error(AddressErrorKind::AmbiguousCompression));
        }
        Ok(separator_count + added_separators)
    }

    /// Tokenize the text into segments. `None` means the text does not
    /// match the segment grammar at all.
    fn scan_segments(
        &self,
        text: &str,
        version: IpVersion,
        range_options: RangeOptions,
    ) -> Option<ScanResult> {
        let mut scan = ScanResult::default();
        for piece in text.split(version.separator()) {
            let (value, range) = scan_segment(piece, version, range_options)?;
            scan.texts.push(piece.to_string());
            scan.values.push(value);
            scan.ranges.push(range);
        }
        Some(scan)
    }

    /// Semantic checks past tokenization: leading-zero policy and range
    /// ordering.
    fn check_segments(&self, scan: &ScanResult, version: IpVersion) -> Result<(), AddressError> {
        let check_zeros = version.is_ipv4() && !self.options.allow_leading_zeros_ipv4;
        for (i, text) in scan.texts.iter().enumerate() {
            match scan.ranges[i] {
                Some(range) => {
                    if check_zeros {
                        if text.len() > 1 && text.starts_with('0') {
                            return Err(self.error(AddressErrorKind::LeadingZeros));
                        }
                        if let Some(idx) = text.find(RANGE_SEPARATOR) {
                            let back = &text[idx + 1..];
                            if back.len() > 1 && back.starts_with('0') {
                                return Err(self.error(AddressErrorKind::LeadingZeros));
                            }
                        }
                    }
                    if !range.wildcard && range.lower >= range.upper {
                        return Err(self.error(AddressErrorKind::InvalidRange));
                    }
                }
                None => {
                    if check_zeros && text.len() > 1 && text.starts_with('0') {
                        return Err(self.error(AddressErrorKind::LeadingZeros));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_network_prefix(&self, st: &mut ParseState) -> Result<(), AddressError> {
        if st.validated_prefix {
            if let Some(e) = &st.prefix_error {
                return Err(e.clone());
            }
            return Ok(());
        }
        st.validated_prefix = true;
        let version = match st.str_type {
            Some(StrType::Ipv4) => Some(IpVersion::V4),
            Some(StrType::Ipv6) => Some(IpVersion::V6),
            _ => None,
        };
        match validate_cidr_prefix(
            version,
            &self.prefix_text,
            self.options.allow_prefixes_beyond_address_size,
        ) {
            Ok(bits) => {
                st.prefix_bits = bits;
                Ok(())
            }
            Err(()) => {
                let e = self.error(AddressErrorKind::InvalidCidrPrefix);
                st.prefix_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /* ------------- value construction ------------- */

    /**
    Materialize the validated text into an address, expanding `::` and
    wildcarded separators into the full 4/8 segments. Returns `Ok(None)`
    for the empty and prefix-only outcomes. The result (and any error)
    is memoized.
    */
    pub fn to_value(&self) -> Result<Option<IpAddress>, AddressError> {
        self.validate()?;
        {
            let st = self.state.read();
            if let Some(v) = &st.value {
                return Ok(Some(v.clone()));
            }
            if matches!(st.str_type, Some(StrType::Empty) | Some(StrType::Prefix)) {
                return Ok(None);
            }
        }
        let mut st = self.state.write();
        if st.value.is_none() {
            let value = self.build_value(&st);
            st.value = Some(value);
        }
        Ok(st.value.clone())
    }

    /**
    Like [`IpAddressString::to_value`] pinned to an address family: a
    prefix-only string materializes as that family's network mask.

    # Panics

    Panics when the parsed value is of the other family (programmer
    error, mirroring the unchecked-exception channel).
    */
    pub fn to_value_of(&self, version: IpVersion) -> Result<Option<IpAddress>, AddressError> {
        let value = self.to_value()?;
        match value {
            None => {
                if self.str_type() == Some(StrType::Prefix) {
                    let bits = self.state.read().prefix_bits.unwrap_or(0);
                    return Ok(Some(network_mask(version, bits, false)));
                }
                Ok(None)
            }
            Some(v) => {
                if v.version() != version {
                    panic!("{}: {}, {}", PANIC_VERSION_MISMATCH, self.full_text, version);
                }
                Ok(Some(v))
            }
        }
    }

    /// The parsed address, or `None` for invalid/empty/prefix-only input
    /// (the error stays cached).
    pub fn get_value(&self) -> Option<IpAddress> {
        self.to_value().ok().flatten()
    }

    pub fn get_value_of(&self, version: IpVersion) -> Option<IpAddress> {
        self.to_value_of(version).ok().flatten()
    }

    fn segment_prefix(&self, st: &ParseState, index: usize, version: IpVersion) -> Option<u32> {
        if !self.is_network_prefix() {
            return None;
        }
        segment_prefix_bits(
            version.bits_per_segment(),
            st.prefix_bits,
            index,
            version.segment_count(),
        )
    }

    fn build_value(&self, st: &ParseState) -> IpAddress {
        let scan = st.scan.as_ref().expect("validated address has a scan");
        match st.str_type {
            Some(StrType::Ipv4) => self.build_ipv4(st, scan),
            Some(StrType::Ipv6) => self.build_ipv6(st, scan),
            _ => unreachable!(),
        }
    }

    fn build_ipv4(&self, st: &ParseState, scan: &ScanResult) -> IpAddress {
        let seg_count = IpVersion::V4.segment_count();
        let mut segments: Vec<Segment> = Vec::with_capacity(seg_count);
        let mut expanded = false;
        for i in 0..scan.texts.len() {
            let index = segments.len();
            segments.push(create_segment(
                IpVersion::V4,
                scan.values[i],
                &scan.texts[i],
                scan.ranges[i],
                self.segment_prefix(st, index, IpVersion::V4),
            ));
            if !expanded && scan.ranges[i].is_some_and(|r| r.wildcard) {
                // a wildcard absorbs the missing segments, unless
                // another wildcard further down claims them
                let later_wildcard = scan.ranges[i + 1..]
                    .iter()
                    .any(|r| r.is_some_and(|r| r.wildcard));
                if !later_wildcard {
                    expanded = true;
                    let missing = seg_count - scan.texts.len();
                    for _ in 0..missing {
                        let index = segments.len();
                        segments.push(create_segment(
                            IpVersion::V4,
                            None,
                            &scan.texts[i],
                            scan.ranges[i],
                            self.segment_prefix(st, index, IpVersion::V4),
                        ));
                    }
                }
            }
        }
        IpAddress::V4(Ipv4Address::new(segments))
    }

    fn build_ipv6(&self, st: &ParseState, scan: &ScanResult) -> IpAddress {
        let seg_count = IpVersion::V6.segment_count();
        let texts = &scan.texts;
        let has_extra_first = texts[0].is_empty();
        let start_index = if has_extra_first { 1 } else { 0 };
        let mut last_index = texts.len() - 1;
        if !st.mixed && texts[last_index].is_empty() {
            last_index -= 1;
        }
        let mut segments: Vec<Segment> = Vec::with_capacity(seg_count);
        let mut expanded = false;

        for i in start_index..=last_index {
            let text = &texts[i];
            let range = scan.ranges[i];
            let index = segments.len();
            segments.push(create_segment(
                IpVersion::V6,
                scan.values[i],
                text,
                range,
                self.segment_prefix(st, index, IpVersion::V6),
            ));
            if expanded {
                continue;
            }
            let mut expand = false;
            let mut expand_value: Option<u16> = None;
            if range.is_some_and(|r| r.wildcard) {
                expand = true;
                for j in i + 1..=last_index {
                    if scan.ranges[j].is_some_and(|r| r.wildcard) || texts[j].is_empty() {
                        // another wildcard or a compressed run claims
                        // the missing segments instead
                        expand = false;
                        break;
                    }
                }
            } else if text.is_empty() {
                expand = true;
                expand_value = Some(0);
            }
            if expand {
                expanded = true;
                let total_segments = last_index - start_index + 1;
                let originals = if st.mixed { seg_count - 2 } else { seg_count };
                let missing = originals - total_segments;
                for _ in 0..missing {
                    let index = segments.len();
                    segments.push(create_segment(
                        IpVersion::V6,
                        expand_value,
                        text,
                        range,
                        self.segment_prefix(st, index, IpVersion::V6),
                    ));
                }
            }
        }

        if st.mixed {
            let mixed_addr =
                IpAddressString::with_options(&st.mixed_part, self.options.mixed_options());
            let mixed_value = mixed_addr
                .to_value()
                .expect("mixed part was validated")
                .expect("mixed part is an address");
            let v4_segs = mixed_value.segments().to_vec();
            for n in (0..4).step_by(2) {
                let one = &v4_segs[n];
                let two = &v4_segs[n + 1];
                let index = segments.len();
                let prefix = self.segment_prefix(st, index, IpVersion::V6);
                let text = format!(
                    "{}{}{}",
                    one.original().map(str::to_string).unwrap_or_else(|| one.standard_string()),
                    V4_SEPARATOR,
                    two.original().map(str::to_string).unwrap_or_else(|| two.standard_string()),
                );
                if !one.is_explicit_range() && !two.is_explicit_range() {
                    let value = (one.lower() << 8) | two.lower();
                    segments.push(Segment::with_text(IpVersion::V6, value, Some(text), prefix));
                } else {
                    let lower = (one.lower() << 8) | two.lower();
                    let upper = (one.upper() << 8) | two.upper();
                    segments.push(Segment::range(IpVersion::V6, Some(text), prefix, lower, upper));
                }
            }
        }
        IpAddress::V6(Ipv6Address::new(segments, st.mixed, &self.zone))
    }

    /* ------------- conversions ------------- */

    /**
    The `/p` prefix-length form of this string: its own prefix for a
    bare prefix length, or the detected mask prefix when the value is a
    CIDR network mask. `None` when the value is no mask at all.
    */
    pub fn convert_to_prefix_length(&self) -> Result<Option<String>, AddressError> {
        let value = self.to_value()?;
        let prefix = match value {
            None => {
                if self.str_type() == Some(StrType::Prefix) {
                    self.state.read().prefix_bits
                } else {
                    None
                }
            }
            Some(addr) => addr.cidr_mask_prefix_len(true),
        };
        Ok(prefix.map(|p| format!("{PREFIX_SEPARATOR}{p}")))
    }

    /// The mask this string denotes for the given address family,
    /// normalized; a bare prefix length becomes that family's network
    /// mask.
    pub fn convert_to_mask(&self, version: IpVersion) -> Result<Option<String>, AddressError> {
        Ok(self.to_value_of(version)?.map(|a| a.to_normalized_string()))
    }

    /// Interpret this string as a [`Host`].
    pub fn to_host(&self) -> Host {
        Host::from_address_string(self)
    }

    /// Whether the string is not an address but is a valid host name.
    pub fn is_valid_host(&self) -> bool {
        !self.is_valid() && self.to_host().is_valid()
    }

    /// The address value, or the host resolution of the string when it
    /// is a host name. Best-effort: failures resolve to `None`.
    pub fn resolve_with(&self, resolver: &dyn crate::host::NameResolver) -> Option<IpAddress> {
        self.get_value()
            .or_else(|| self.to_host().resolve_with(resolver))
    }
}

impl Clone for IpAddressString {
    fn clone(&self) -> Self {
        IpAddressString {
            full_text: self.full_text.clone(),
            text: self.text.clone(),
            zone: self.zone.clone(),
            prefix_text: self.prefix_text.clone(),
            options: self.options,
            state: RwLock::new(self.state.read().clone()),
        }
    }
}

impl fmt::Debug for IpAddressString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpAddressString")
            .field("text", &self.full_text)
            .finish()
    }
}

/// The original string; for normalized forms go through the value.
impl fmt::Display for IpAddressString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text)
    }
}

impl Ord for IpAddressString {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.to_value() {
            Ok(value) => match other.to_value() {
                Ok(other_value) => match (value, other_value) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Greater,
                    (None, Some(_)) => Ordering::Less,
                    (None, None) => {
                        let my_type = self.str_type();
                        let other_type = other.str_type();
                        if my_type == Some(StrType::Prefix) {
                            if other_type != Some(StrType::Prefix) {
                                return Ordering::Greater;
                            }
                            // wider prefixes (smaller lengths) sort later
                            let mine = self.state.read().prefix_bits.unwrap_or(0);
                            let theirs = other.state.read().prefix_bits.unwrap_or(0);
                            return theirs.cmp(&mine);
                        }
                        if other_type == Some(StrType::Prefix) {
                            return Ordering::Less;
                        }
                        self.full_text.cmp(&other.full_text)
                    }
                },
                Err(_) => Ordering::Less,
            },
            Err(_) => match other.to_value() {
                Ok(_) => Ordering::Greater,
                // two invalid strings are equal when their texts are
                Err(_) => self.full_text.cmp(&other.full_text),
            },
        }
    }
}

impl PartialOrd for IpAddressString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for IpAddressString {
    fn eq(&self, other: &Self) -> bool {
        // equal strings are the same address; different strings can
        // still be, since IPv6 has many representations
        self.full_text == other.full_text || self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IpAddressString {}

impl PartialEq<IpAddress> for IpAddressString {
    fn eq(&self, other: &IpAddress) -> bool {
        self.get_value().is_some_and(|v| v == *other)
    }
}

impl PartialEq<IpAddressString> for IpAddress {
    fn eq(&self, other: &IpAddressString) -> bool {
        other == self
    }
}

/* -------------------------------------------------------------------------- */

#[derive(Debug, Default)]
struct SeparatorCounter {
    /// total separator occurrences
    count: usize,
    /// separators sitting in runs of two or more
    consecutive_count: usize,
    starts: bool,
    ends: bool,
    /// a run of two or more at the very start
    starts_consecutive: bool,
    /// a run of exactly two ending the string
    ends_consecutive: bool,
}

fn count_matches(s: &str, sep: char) -> SeparatorCounter {
    let mut counter = SeparatorCounter::default();
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        if chars[i] != sep {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] == sep {
            i += 1;
        }
        let run_len = i - start;
        counter.count += run_len;
        if start == 0 {
            counter.starts = true;
            if run_len >= 2 {
                counter.starts_consecutive = true;
            }
        }
        if i == chars.len() {
            counter.ends = true;
            if run_len == 2 {
                counter.ends_consecutive = true;
            }
        }
        if run_len >= 2 {
            counter.consecutive_count += run_len;
        }
    }
    counter
}

fn contains_wildcard(s: &str) -> bool {
    s.contains([SEGMENT_WILDCARD, EQUIVALENT_WILDCARD])
}

fn is_entirely_wildcard(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(SEGMENT_WILDCARD) | Some(EQUIVALENT_WILDCARD), None)
    )
}

fn looks_like_url(s: &str) -> bool {
    match s.find("://") {
        Some(idx) if idx > 0 => {
            let scheme = &s[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        _ => false,
    }
}

pub(crate) fn url_shaped(s: &str) -> bool {
    looks_like_url(s)
}

fn is_decimal_number(s: &str) -> bool {
    let rest = s.strip_prefix(['-', '+']).unwrap_or(s);
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}

fn validate_cidr_prefix(
    version: Option<IpVersion>,
    text: &str,
    allow_beyond: bool,
) -> Result<Option<u32>, ()> {
    if text.is_empty() {
        return Ok(None);
    }
    let val: i64 = text.parse().map_err(|_| ())?;
    let max = version.unwrap_or(IpVersion::V6).bit_count() as i64;
    if val >= 0 && (allow_beyond || val <= max) {
        Ok(Some(val as u32))
    } else {
        Err(())
    }
}

/// One segment: a plain value, an `a-b` range, a wildcard, or (IPv6
/// only) an empty compression placeholder. Returns `None` on a grammar
/// mismatch.
fn scan_segment(
    piece: &str,
    version: IpVersion,
    range_options: RangeOptions,
) -> Option<(Option<u16>, Option<SegRange>)> {
    if let Some(value) = plain_segment_value(piece, version) {
        return Some((Some(value), None));
    }
    if version.is_ipv6() && piece.is_empty() {
        // a compression placeholder
        return Some((Some(0), None));
    }
    if range_options.wildcard_allowed() && is_entirely_wildcard(piece) {
        return Some((
            None,
            Some(SegRange {
                lower: 0,
                upper: version.max_segment_value(),
                wildcard: true,
            }),
        ));
    }
    if range_options.range_allowed() {
        if let Some(idx) = piece.find(RANGE_SEPARATOR) {
            let lower = plain_segment_value(&piece[..idx], version)?;
            let upper = plain_segment_value(&piece[idx + 1..], version)?;
            return Some((
                None,
                Some(SegRange {
                    lower,
                    upper,
                    wildcard: false,
                }),
            ));
        }
    }
    None
}

fn plain_segment_value(s: &str, version: IpVersion) -> Option<u16> {
    if s.is_empty() || s.len() > version.max_segment_chars() {
        return None;
    }
    match version {
        IpVersion::V4 => {
            if !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let val: u16 = s.parse().ok()?;
            (val <= 255).then_some(val)
        }
        IpVersion::V6 => {
            if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u16::from_str_radix(s, 16).ok()
        }
    }
}

fn create_segment(
    version: IpVersion,
    value: Option<u16>,
    text: &str,
    range: Option<SegRange>,
    prefix: Option<u32>,
) -> Segment {
    match value {
        Some(v) => Segment::with_text(version, v, Some(text.to_string()), prefix),
        None => match range {
            Some(r) => Segment::range(version, Some(text.to_string()), prefix, r.lower, r.upper),
            None => panic!("{}: '{}'", PANIC_SEGMENT_TEXT, text),
        },
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> IpAddressString {
        IpAddressString::new(s)
    }

    fn parse_wild(s: &str) -> IpAddressString {
        IpAddressString::with_options(s, ValidationOptions::WILDCARD)
    }

    fn parse_range(s: &str) -> IpAddressString {
        IpAddressString::with_options(s, ValidationOptions::WILDCARD_AND_RANGE)
    }

    fn canonical(s: &str) -> String {
        parse(s).get_value().unwrap().to_canonical_string()
    }

    fn normalized(s: &str) -> String {
        parse(s).get_value().unwrap().to_normalized_string()
    }

    #[test]
    fn test_valid_ipv4() {
        assert!(parse("1.2.3.4").is_ipv4());
        assert!(parse("0.0.0.0").is_valid());
        assert!(parse("255.255.255.255").is_valid());
        assert!(parse("1.2.3.4/1").is_valid());
        // extra-large prefixes are allowed and mean "the full address"
        assert!(parse("1.2.3.4/33").is_valid());
    }

    #[test]
    fn test_invalid_ipv4() {
        for bad in [
            "", "a", "1.2.3", "a.2.3.4", "1.a.3.4", "1.2.a.4", "1.2.3.a", ".2.3.4", "1..3.4",
            "1.2..4", "1.2.3.", "256.2.3.4", "1.256.3.4", "1.2.256.4", "1.2.3.256", "0000.0.0.0",
            "0.0000.0.0", "1.2.3.4.5", "[1.2.3.4]", "1.2.3.4/-1", "1.2.3.4/", "1.2.3.4/x",
        ] {
            assert!(parse(bad).is_invalid(), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_leading_zeros_allowed() {
        assert_eq!(normalized("00.2.00.000"), "0.2.0.0");
        assert_eq!(normalized("000.000.000.000"), "0.0.0.0");
        assert_eq!(normalized("1.2.00.4"), "1.2.0.4");
        assert_eq!(canonical("1.2.3.04"), "1.2.3.4");
    }

    #[test]
    fn test_valid_ipv6() {
        for good in [
            "::1",
            "::",
            "0:0:0:0:0:0:0:1",
            "2001:DB8:0:0:8:800:200C:417A",
            "FF01::101",
            "2001:DB8::8:800:200C:417A",
            "fe80::217:f2ff:fe07:ed62",
            "2001:0000:1234:0000:0000:C1C0:ABCD:0876",
            "2::10",
            "1:2:3:4:5:6:7:8",
            "1::1/1",
            "1::1/129",
            "::0:a:b:c:d:e:f",
            "0:a:b:c:d:e:f::",
            "a:b:c:d:e:f:0::",
        ] {
            assert!(parse(good).is_ipv6(), "{good} should be valid IPv6");
        }
    }

    #[test]
    fn test_invalid_ipv6() {
        for bad in [
            "2001:DB8:0:0:8:800:200C:417A:221",       // nine segments
            "FF01::101::2",                           // double ::
            "3ffe:b00::1::a",                         // double ::
            "02001:0000:1234:0000:0000:C1C0:ABCD:0876", // five hex chars
            "2001:0000:1234:0000:00001:C1C0:ABCD:0876",
            "3ffe:0b00:0000:0001:0000:0000:000a",     // seven segments
            "1111:2222:3333:4444:5555:6666:7777:8888:", // trailing single :
            ":1111:2222:3333:4444:5555:6666:7777:8888",
            "1:::2:3",
            ":::",
            ":",
            ":8888",
            "1111:",
            "12345::6:7:8",
            "1::2:3:4:5:6:1.2.3.4",                   // too many with mixed
            "1111:2222:3333:4444:5555:1.2.3.4",       // too few with mixed
            "::ffff:2.3.4",
            "::ffff:257.1.2.3",
            "1::5:400.2.3.4",
            "2001:0000:1234: 0000:0000:C1C0:ABCD:0876", // internal space
            "1::1/-1",
            "1::1/",
            "1::1/x",
        ] {
            assert!(parse(bad).is_invalid(), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse("1.2.3").validate().unwrap_err().kind, AddressErrorKind::Ipv4Format);
        assert_eq!(
            parse("FF01::101::2").validate().unwrap_err().kind,
            AddressErrorKind::AmbiguousCompression
        );
        assert_eq!(
            parse("1:2:3").validate().unwrap_err().kind,
            AddressErrorKind::TooFewSegments
        );
        assert_eq!(
            parse("1:2:3:4:5:6:7:8:9").validate().unwrap_err().kind,
            AddressErrorKind::TooManySegments
        );
        assert_eq!(
            parse(":2:3:4:5:6:7:8").validate().unwrap_err().kind,
            AddressErrorKind::SingleSeparatorAtStart
        );
        assert_eq!(
            parse("1:2:3:4:5:6:7:").validate().unwrap_err().kind,
            AddressErrorKind::SingleSeparatorAtEnd
        );
        assert_eq!(
            parse("1.2.3.4/").validate().unwrap_err().kind,
            AddressErrorKind::InvalidCidrPrefix
        );
        assert_eq!(parse("").validate().unwrap_err().kind, AddressErrorKind::Empty);
        assert_eq!(
            parse("http://1.2.3.4").validate().unwrap_err().kind,
            AddressErrorKind::Url
        );
        assert_eq!(
            parse("http://a:a:a:a:b:b:b:b").validate().unwrap_err().kind,
            AddressErrorKind::Url
        );
    }

    #[test]
    fn test_validation_memoized() {
        let addr = parse("FF01::101::2");
        let first = addr.validate().unwrap_err();
        let second = addr.validate().unwrap_err();
        assert_eq!(first, second);
        // probing as IPv4 afterwards keeps its own cached outcome
        assert_eq!(
            addr.validate_ipv4().unwrap_err().kind,
            AddressErrorKind::Ipv4Format
        );
        assert_eq!(addr.validate().unwrap_err(), first);
    }

    #[test]
    fn test_zone_handling() {
        let addr = parse("a::b:c:d:1.2.3.4%x");
        assert!(addr.is_valid());
        assert!(addr.has_zone());
        assert_eq!(addr.zone(), "x");
        assert_eq!(
            addr.get_value().unwrap().to_canonical_string(),
            "a::b:c:d:102:304%x"
        );
        // zone plus CIDR prefix cannot combine
        assert_eq!(
            parse("1::1/64%x").validate().unwrap_err().kind,
            AddressErrorKind::ZoneAndCidrPrefix
        );
        // zones belong to IPv6
        assert_eq!(
            parse("1.2.3.4%x").validate().unwrap_err().kind,
            AddressErrorKind::ZoneOnIpv4
        );
        // with zones disabled, '%' is a wildcard instead
        let wild = parse_wild("1.2.3.%");
        assert!(wild.is_valid());
        assert!(wild.has_segment_wildcard());
    }

    #[test]
    fn test_canonical_ipv6() {
        assert_eq!(
            canonical("2001:0000:1234:0000:0000:C1C0:ABCD:0876"),
            "2001:0:1234::c1c0:abcd:876"
        );
        // longest run wins, leftmost on ties
        assert_eq!(canonical("0001:0000:0000:000F:0000:0000:0001:0001"), "1::f:0:0:1:1");
        // single zero segments stay in the canonical form
        assert_eq!(canonical("0001:0001:0000:000F:0000:0001:0000:0001"), "1:1:0:f:0:1:0:1");
        assert_eq!(canonical("1:0:1:1:1:1:1:1"), "1:0:1:1:1:1:1:1");
        // ... but compress in the compressed form
        assert_eq!(
            parse("1:0:1:1:1:1:1:1").get_value().unwrap().to_compressed_string(),
            "1::1:1:1:1:1:1"
        );
    }

    #[test]
    fn test_normalized_ipv6() {
        let cases = [
            ("A:B:C:D:E:F:A:B", "a:b:c:d:e:f:a:b"),
            ("ABCD:ABCD:CCCC:Dddd:EeEe:fFfF:aAAA:Bbbb", "abcd:abcd:cccc:dddd:eeee:ffff:aaaa:bbbb"),
            ("0:0:0:0:0:0:0:0", "::"),
            ("0000:0000:0000:0000:0000:0000:0000:0001", "::1"),
            ("1:0:0:0:0:0:0:0", "1::"),
            ("1:0:0:0:0:0:0:1", "1::1"),
            ("1:0::1", "1::1"),
            ("0::", "::"),
            ("::0000", "::"),
            ("0:0:0:0:1:0:0:0", "::1:0:0:0"),
            ("0:0:0:1:0:0:0:0", "0:0:0:1::"),
            ("0:1:0:1:0:1:0:1", "::1:0:1:0:1:0:1"),
            ("1:1:0:1:0:1:0:1", "1:1::1:0:1:0:1"),
        ];
        for (input, expected) in cases {
            let value = parse(input).get_value().unwrap();
            assert_eq!(
                value
                    .as_ipv6()
                    .unwrap()
                    .to_normalized_string_opts(false, false, true, true),
                expected,
                "normalizing {input}"
            );
        }
        // no compression requested
        let value = parse("0:0:0:0::0:0:1").get_value().unwrap();
        assert_eq!(
            value
                .as_ipv6()
                .unwrap()
                .to_normalized_string_opts(true, false, false, false),
            "0:0:0:0:0:0:0:1"
        );
    }

    #[test]
    fn test_mixed_notation() {
        let addr = parse("::ffff:192.168.1.26");
        assert!(addr.is_ipv6());
        let value = addr.get_value().unwrap();
        assert!(value.is_ipv4_mapped());
        assert_eq!(value.to_normalized_string(), "0:0:0:0:0:ffff:c0a8:11a");

        assert!(parse("1:2:3:4:5:6:1.2.3.4").is_valid());
        assert!(parse("1::5:11.22.33.44").is_valid());
        assert!(parse("fe80::204:61ff:254.157.241.86").is_valid());
        assert!(parse("0:0:0:0:0:FFFF:129.144.52.38").is_valid());
        assert!(parse("::13.1.68.3").is_valid());

        let value = parse("1:0:1:1:1:1:1:1").get_value().unwrap();
        assert_eq!(
            value.as_ipv6().unwrap().to_mixed_string(),
            "1::1:1:1:1:0.1.0.1"
        );
        let value = parse("::").get_value().unwrap();
        assert_eq!(value.as_ipv6().unwrap().to_mixed_string(), "::0.0.0.0");
        let value = parse("0001:0001:0000:000F:0000:0001:0000:0001").get_value().unwrap();
        assert_eq!(
            value.as_ipv6().unwrap().to_mixed_string(),
            "1:1::f:0:1:0.0.0.1"
        );
    }

    #[test]
    fn test_mixed_preference_round_trip() {
        // a mixed source keeps mixed rendering on request
        let value = parse("A:B:C:D:E:F:000.000.000.000").get_value().unwrap();
        assert_eq!(
            value
                .as_ipv6()
                .unwrap()
                .to_normalized_string_opts(true, false, true, true),
            "a:b:c:d:e:f:0.0.0.0"
        );
        let value = parse("::C:D:E:F:000.000.000.000").get_value().unwrap();
        assert_eq!(
            value
                .as_ipv6()
                .unwrap()
                .to_normalized_string_opts(true, false, true, true),
            "::c:d:e:f:0.0.0.0"
        );
        assert_eq!(
            value
                .as_ipv6()
                .unwrap()
                .to_normalized_string_opts(true, false, false, false),
            "0:0:c:d:e:f:0.0.0.0"
        );
    }

    #[test]
    fn test_wildcards() {
        assert!(parse_wild("*").is_valid());
        assert!(parse_wild("1.*.3.4").is_valid());
        assert!(parse_wild("*::1").is_valid());
        assert!(parse_wild("1:2:3:4:*:6:7:8").is_valid());
        assert!(parse_wild("1.2.*.4/1").is_valid());
        // plain options reject wildcards
        assert!(parse("1.*.3.4").is_invalid());

        for bad in ["a.*.3.4", "1.*.3.256", ".2.3.*", "1.*..4", "3ffe:*::1::a", "0*::"] {
            assert!(parse_wild(bad).is_invalid(), "{bad} should be invalid");
        }
    }

    #[test]
    fn test_wildcarded_separators_expand() {
        for (input, expected) in [("1.*", "1.*.*.*"), ("*.1.*", "*.1.*.*"), ("*", "*.*.*.*")] {
            let value = parse_wild(input).get_value().unwrap();
            assert_eq!(value.to_normalized_wildcard_string(), expected, "expanding {input}");
        }
        for (input, expected) in [("*:1::*", "*:1::*"), ("*:1:*", "*:1:*:*:*:*:*:*")] {
            let value = parse_wild(input).get_value().unwrap();
            assert_eq!(
                value
                    .as_ipv6()
                    .unwrap()
                    .to_normalized_string_opts(false, false, true, true),
                expected,
                "expanding {input}"
            );
        }
    }

    #[test]
    fn test_ranges() {
        assert!(parse_range("1.1.*.100-101").is_valid());
        assert!(parse_range("1:2:4:a-ff:0-2::1").is_valid());
        // downward and empty ranges are rejected
        for bad in ["1.2.*.101-100", "1.2.*.101-101", "1:2:4:ff-a:0-2::1", "1.2.*.101-100/24"] {
            assert_eq!(
                parse_range(bad).validate().unwrap_err().kind,
                AddressErrorKind::InvalidRange,
                "{bad}"
            );
        }
        // ranges need the range option
        assert!(parse_wild("1.1-2.3.4").is_invalid());
    }

    #[test]
    fn test_counts() {
        use num_bigint::BigUint;
        fn count_of(addr: &IpAddressString) -> BigUint {
            addr.get_value().unwrap().count()
        }
        assert_eq!(count_of(&parse("1.2.3.4/32")), BigUint::from(1u8));
        assert_eq!(count_of(&parse("1.2.3.4/31")), BigUint::from(2u8));
        assert_eq!(count_of(&parse("1.2.3.4/30")), BigUint::from(4u8));
        assert_eq!(count_of(&parse_range("1.1-2.3.4")), BigUint::from(2u8));
        assert_eq!(count_of(&parse_wild("1.*.3.4")), BigUint::from(256u16));
        assert_eq!(
            count_of(&parse_range("1.*.11-200.4")),
            BigUint::from(190u32 * 256)
        );
        assert_eq!(count_of(&parse_wild("1.3.*.4/16")), BigUint::from(256u32 * 256));
        assert_eq!(
            count_of(&parse_range("1.2.*.1-3/25")),
            BigUint::from(256u32 * 128)
        );
        assert_eq!(count_of(&parse_wild("*::1")), BigUint::from(0x10000u32));
        assert_eq!(count_of(&parse_range("1-3::1")), BigUint::from(3u8));
        assert_eq!(count_of(&parse_range("0-299::1")), BigUint::from(0x299u32 + 1));
        assert_eq!(count_of(&parse_range("1:2:4:0-2:0-2::1")), BigUint::from(9u8));
        assert_eq!(count_of(&parse("9:129::237:26")), BigUint::from(1u8));
    }

    #[test]
    fn test_iteration_matches_count() {
        let value = parse_range("1.1-2.3.4").get_value().unwrap();
        let all: Vec<String> = value.iter().map(|a| a.to_canonical_string()).collect();
        assert_eq!(all, vec!["1.1.3.4", "1.2.3.4"]);

        let value = parse_range("1:2:4:0-2:0-2::1").get_value().unwrap();
        assert_eq!(value.iter().count(), 9);
    }

    #[test]
    fn test_masking_networks() {
        let cases = [
            ("9.129.237.26/0", "0.0.0.0/0"),
            ("9.129.237.26/1", "0.0.0.0/1"),
            ("9.129.237.26/4", "0.0.0.0/4"),
            ("9.129.237.26/5", "8.0.0.0/5"),
            ("9.129.237.26/7", "8.0.0.0/7"),
            ("9.129.237.26/8", "9.0.0.0/8"),
            ("9.129.237.26/9", "9.128.0.0/9"),
            ("9.129.237.26/15", "9.128.0.0/15"),
            ("9.129.237.26/16", "9.129.0.0/16"),
            ("9.129.237.26/30", "9.129.237.24/30"),
        ];
        for (original, expected) in cases {
            let a = parse(original);
            let b = parse(expected);
            assert_eq!(a, b, "{original} vs {expected}");
            assert_eq!(
                b.get_value().unwrap().to_normalized_string(),
                expected,
                "normalized {expected}"
            );
        }
        // a full-length prefix leaves a plain address
        let full = parse("9.129.237.26/32");
        assert_eq!(full.get_value().unwrap().to_normalized_string(), "9.129.237.26");
    }

    #[test]
    fn test_masking_wildcard_networks() {
        let cases = [
            ("9.*.237.26/0", "0.0.0.0/0"),
            ("9.*.237.26/5", "8.0.0.0/5"),
            ("9.*.237.26/8", "9.0.0.0/8"),
            ("9.*.237.26/9", "9.*.0.0/9"),
            ("9.*.237.26/16", "9.*.0.0/16"),
            ("9.*.237.26/30", "9.*.237.24/30"),
        ];
        for (original, expected) in cases {
            let a = parse_wild(original);
            let b = parse_wild(expected);
            assert_eq!(a, b, "{original} vs {expected}");
        }
    }

    #[test]
    fn test_masks_by_address() {
        fn masked(addr: &str, mask: &str) -> String {
            let a = parse(addr).get_value().unwrap();
            let m = parse(mask).get_value().unwrap();
            a.to_subnet_masked(&m, None).to_normalized_string()
        }
        assert_eq!(masked("1.2.3.4", "0.0.2.0"), "0.0.2.0");
        assert_eq!(masked("1.2.3.4", "0.0.1.0"), "0.0.1.0");
        assert_eq!(masked("A:B:C:D:E:F:A:B", "A:0:C:0:E:0:A:0"), "a:0:c:0:e:0:a:0");
        assert_eq!(
            masked("A:B:C:D:E:F:A:B", "FFFF:FFFF:FFFF:FFFF::"),
            "a:b:c:d:0:0:0:0"
        );
        assert_eq!(masked("A:B:C:D:E:F:A:B", "::FFFF:FFFF:FFFF:FFFF"), "0:0:0:0:e:f:a:b");
    }

    #[test]
    fn test_wildcard_subnets() {
        fn wildcarded(addr: &str, bits: u32) -> (String, String) {
            let value = parse(addr).get_value().unwrap().to_subnet(bits);
            (
                value.to_normalized_wildcard_string(),
                value.to_compressed_wildcard_string(),
            )
        }
        assert_eq!(wildcarded("1.2.3.4", 8).0, "1.*.*.*");
        assert_eq!(wildcarded("1.2.3.4", 9).0, "1.0-127.*.*");
        assert_eq!(wildcarded("1.2.3.4", 15).0, "1.2-3.*.*");
        assert_eq!(wildcarded("1.3.3.4", 15).0, "1.2-3.*.*");
        assert_eq!(wildcarded("1.2.3.4", 16).0, "1.2.*.*");
        assert_eq!(wildcarded("1::", 16), ("1:*:*:*:*:*:*:*".into(), "1::/16".into()));
        assert_eq!(
            wildcarded("1::", 17),
            ("1:0-7fff:*:*:*:*:*:*".into(), "1::/17".into())
        );
        assert_eq!(wildcarded("1::", 31), ("1:0-1:*:*:*:*:*:*".into(), "1::/31".into()));

        // the prefixed string parses to the same value
        let direct = parse("1.2.3.4/9").get_value().unwrap();
        assert_eq!(direct.to_normalized_wildcard_string(), "1.0-127.*.*");
    }

    #[test]
    fn test_prefix_only_strings() {
        let prefix = parse("/24");
        assert!(prefix.is_valid());
        assert!(!prefix.is_valid_address());
        assert!(prefix.get_value().is_none());
        assert_eq!(
            prefix.convert_to_mask(IpVersion::V4).unwrap().unwrap(),
            "255.255.255.0"
        );
        assert_eq!(
            parse("/17").convert_to_mask(IpVersion::V4).unwrap().unwrap(),
            "255.255.128.0"
        );
        assert_eq!(
            parse("/17").convert_to_mask(IpVersion::V6).unwrap().unwrap(),
            "ffff:8000:0:0:0:0:0:0"
        );
    }

    #[test]
    fn test_mask_prefix_round_trip() {
        assert_eq!(
            parse("255.255.128.0").convert_to_prefix_length().unwrap().unwrap(),
            "/17"
        );
        assert_eq!(
            parse("ffff:8000::").convert_to_prefix_length().unwrap().unwrap(),
            "/17"
        );
        assert_eq!(parse("255.255.0.1").convert_to_prefix_length().unwrap(), None);
        assert_eq!(parse("/64").convert_to_prefix_length().unwrap().unwrap(), "/64");
    }

    #[test]
    fn test_network_masks_equal_parsed() {
        let cases: [(u32, &str, &str, &str, &str); 8] = [
            (0, "0.0.0.0/0", "255.255.255.255", "::/0", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            (1, "128.0.0.0/1", "127.255.255.255", "8000::/1", "7fff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            (15, "255.254.0.0/15", "0.1.255.255", "fffe::/15", "1:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            (16, "255.255.0.0/16", "0.0.255.255", "ffff::/16", "::ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            (17, "255.255.128.0/17", "0.0.127.255", "ffff:8000::/17", "::7fff:ffff:ffff:ffff:ffff:ffff:ffff"),
            (31, "255.255.255.254/31", "0.0.0.1", "ffff:fffe::/31", "::1:ffff:ffff:ffff:ffff:ffff:ffff"),
            (32, "255.255.255.255/32", "0.0.0.0", "ffff:ffff::/32", "::ffff:ffff:ffff:ffff:ffff:ffff"),
            (128, "255.255.255.255/32", "0.0.0.0", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/128", "::"),
        ];
        for (prefix, v4_net, v4_host, v6_net, v6_host) in cases {
            assert_eq!(
                parse(v4_net).get_value().unwrap(),
                network_mask(IpVersion::V4, prefix, true),
                "v4 network /{prefix}"
            );
            assert_eq!(
                parse(v4_host).get_value().unwrap(),
                crate::host_mask(IpVersion::V4, prefix),
                "v4 host /{prefix}"
            );
            assert_eq!(
                parse(v6_net).get_value().unwrap(),
                network_mask(IpVersion::V6, prefix, true),
                "v6 network /{prefix}"
            );
            assert_eq!(
                parse(v6_host).get_value().unwrap(),
                crate::host_mask(IpVersion::V6, prefix),
                "v6 host /{prefix}"
            );
        }
    }

    #[test]
    fn test_mask_detection_every_prefix() {
        for version in [IpVersion::V4, IpVersion::V6] {
            for i in 0..=version.bit_count() {
                let host = crate::host_mask(version, i);
                assert_eq!(host.cidr_mask_prefix_len(false), Some(i));
                assert_eq!(host.cidr_mask_prefix_len(true), None);
                let net = network_mask(version, i, true);
                assert_eq!(net.cidr_mask_prefix_len(true), Some(i));
                assert_eq!(net.cidr_mask_prefix_len(false), None);
                // the same value built from raw bytes detects the same way
                let rebuilt = IpAddress::from_bytes(&net.lowest_bytes());
                assert_eq!(rebuilt.cidr_mask_prefix_len(true), Some(i));
            }
        }
    }

    #[test]
    fn test_not_masks() {
        for not_mask in ["254.255.0.0", "255.255.0.1", "0.1.0.0", "0::10", "1::0"] {
            let value = parse(not_mask).get_value().unwrap();
            assert_eq!(value.cidr_mask_prefix_len(true), None, "{not_mask}");
            assert_eq!(value.cidr_mask_prefix_len(false), None, "{not_mask}");
        }
    }

    #[test]
    fn test_network_host_splits_v6() {
        fn split(addr: &str, bits: u32) -> (String, String) {
            let value = parse(addr).get_value().unwrap();
            (
                value.network_section(bits).to_normalized_string().to_string(),
                value.host_section(bits).to_normalized_string().to_string(),
            )
        }
        let addr = "9:129::237:26";
        assert_eq!(split(addr, 0), ("".into(), "9:129:0:0:0:0:237:26".into()));
        assert_eq!(split(addr, 16), ("9".into(), "129:0:0:0:0:237:26".into()));
        assert_eq!(split(addr, 31), ("9:128/31".into(), "1:0:0:0:0:237:26".into()));
        assert_eq!(split(addr, 32), ("9:129".into(), "0:0:0:0:237:26".into()));
        assert_eq!(split(addr, 33), ("9:129:0/33".into(), "0:0:0:0:237:26".into()));
        assert_eq!(split(addr, 64), ("9:129:0:0".into(), "0:0:237:26".into()));
        assert_eq!(split(addr, 96), ("9:129:0:0:0:0".into(), "237:26".into()));
        assert_eq!(split(addr, 111), ("9:129:0:0:0:0:236/111".into(), "1:26".into()));
        assert_eq!(split(addr, 112), ("9:129:0:0:0:0:237".into(), "26".into()));
        assert_eq!(split(addr, 113), ("9:129:0:0:0:0:237:0/113".into(), "26".into()));
        assert_eq!(split(addr, 127), ("9:129:0:0:0:0:237:26/127".into(), "0".into()));
        assert_eq!(split(addr, 128), ("9:129:0:0:0:0:237:26".into(), "".into()));
    }

    #[test]
    fn test_split_standard_string_counts() {
        fn counts(addr: &str, bits: u32) -> (usize, usize) {
            let value = parse(addr).get_value().unwrap();
            (
                value.network_section(bits).to_standard_strings().len(),
                value.host_section(bits).to_standard_strings().len(),
            )
        }
        assert_eq!(counts("9.129.237.26", 0), (1, 2));
        assert_eq!(counts("9.129.237.26", 8), (2, 2));
        assert_eq!(counts("9.129.237.26", 16), (2, 2));
        assert_eq!(counts("9.129.237.26", 31), (2, 2));
        assert_eq!(counts("9.129.237.26", 32), (2, 1));
        assert_eq!(counts("1.2.3.4", 4), (2, 2));
        assert_eq!(counts("255.2.3.4", 4), (1, 2));

        assert_eq!(counts("9:129::237:26", 0), (1, 12));
        assert_eq!(counts("9:129::237:26", 16), (2, 12));
        assert_eq!(counts("9:129::237:26", 31), (2, 12));
        assert_eq!(counts("9:129::237:26", 32), (2, 10));
        assert_eq!(counts("9:129::237:26", 33), (2, 10));
        assert_eq!(counts("9:129::237:26", 64), (4, 10));
        assert_eq!(counts("9:129::237:26", 96), (4, 4));
        assert_eq!(counts("9:129::237:26", 111), (12, 4));
        assert_eq!(counts("9:129::237:26", 112), (12, 4));
        assert_eq!(counts("9:129::237:26", 127), (12, 4));
        assert_eq!(counts("9:129::237:26", 128), (12, 1));

        assert_eq!(counts("a:b:c:d:e:f:a:b", 4).0, 2);
        assert_eq!(counts("a:b:c:d:e:f:a:b", 4).1, 12);
        assert_eq!(counts("ffff:b:c:d:e:f:a:b", 4), (2, 12));
        assert_eq!(counts("ffff:b:c:d:e:f:a:b", 2), (2, 12));
    }

    #[test]
    fn test_split_network_strings() {
        let value = parse("1.2.3.4").get_value().unwrap();
        assert_eq!(value.network_section(4).to_normalized_string(), "0/4");
        assert_eq!(value.host_section(4).to_normalized_string(), "1.2.3.4");
        let value = parse("255.2.3.4").get_value().unwrap();
        assert_eq!(value.network_section(4).to_normalized_string(), "240/4");
        assert_eq!(value.host_section(4).to_normalized_string(), "15.2.3.4");
        let value = parse("a:b:c:d:e:f:a:b").get_value().unwrap();
        assert_eq!(value.network_section(4).to_normalized_string(), "0/4");
        let value = parse("ffff:b:c:d:e:f:a:b").get_value().unwrap();
        assert_eq!(value.network_section(4).to_normalized_string(), "f000/4");
        assert_eq!(value.host_section(4).to_normalized_string(), "fff:b:c:d:e:f:a:b");
        assert_eq!(value.network_section(2).to_normalized_string(), "c000/2");
        assert_eq!(value.host_section(2).to_normalized_string(), "3fff:b:c:d:e:f:a:b");
    }

    #[test]
    fn test_sql_clauses() {
        fn or_terms(addr: &str, bits: u32) -> usize {
            let value = parse(addr).get_value().unwrap();
            let mut clause = String::new();
            value
                .network_section(bits)
                .append_starts_with_sql_clause(&mut clause, "XXX");
            if clause.is_empty() {
                1
            } else {
                clause.matches(" OR ").count() + 1
            }
        }
        assert_eq!(or_terms("9.129.237.26", 0), 1);
        assert_eq!(or_terms("9.129.237.26", 8), 2);
        assert_eq!(or_terms("9.129.237.26", 16), 2);
        assert_eq!(or_terms("9.129.237.26", 24), 2);
        assert_eq!(or_terms("9.129.237.26", 32), 2);
        assert_eq!(or_terms("9:129::237:26", 0), 1);
        assert_eq!(or_terms("9:129::237:26", 16), 2);
        assert_eq!(or_terms("9:129::237:26", 64), 4);
        assert_eq!(or_terms("9:129::237:26", 80), 4);
        assert_eq!(or_terms("9:129::237:26", 96), 4);
        assert_eq!(or_terms("9:129::237:26", 112), 12);
        assert_eq!(or_terms("9:129::237:26", 128), 12);
        // off-boundary prefixes fan out across the in-segment range
        assert_eq!(or_terms("9.129.237.26", 7), 4);
        assert_eq!(or_terms("9.129.237.26", 9), 256);
        assert_eq!(or_terms("9.129.237.26", 10), 128);
        assert_eq!(or_terms("9.129.237.26", 14), 8);
        assert_eq!(or_terms("9.129.237.26", 15), 4);
    }

    #[test]
    fn test_sql_clause_content() {
        let value = parse("9.129.237.26").get_value().unwrap();
        let mut clause = String::new();
        value
            .network_section(16)
            .append_starts_with_sql_clause(&mut clause, "addr");
        assert_eq!(
            clause,
            "substring_index(addr,'.',2) = '9.129' OR substring_index(addr,'.',2) = '009.129'"
        );

        let mut clause = String::new();
        parse("1.2.3.4")
            .get_value()
            .unwrap()
            .append_starts_with_sql_clause(&mut clause, "addr");
        assert_eq!(clause, "addr = '1.2.3.4' OR addr = '001.002.003.004'");
    }

    #[test]
    fn test_round_trip_canonical_fixed_point() {
        for s in [
            "1.2.3.4",
            "9.129.237.26",
            "2001:0000:1234:0000:0000:C1C0:ABCD:0876",
            "::ffff:192.168.1.26",
            "a:b:c:d:e:f:a:b",
            "::1",
            "::",
            "1:0:1:1:1:1:1:1",
        ] {
            let value = parse(s).get_value().unwrap();
            let canonical = value.to_canonical_string();
            let round_tripped = parse(&canonical).get_value().unwrap();
            assert_eq!(round_tripped, value, "{s}");
            assert_eq!(round_tripped.to_canonical_string(), canonical, "{s}");
        }
    }

    #[test]
    fn test_string_ordering_total() {
        let mut list = vec![
            parse("1.2.3.4"),
            parse("::1"),
            parse("0.0.0.0"),
            parse("255.255.255.255"),
            parse("::ffff:0.0.0.1"),
            parse("8000::"),
        ];
        list.sort();
        let texts: Vec<String> = list.iter().map(|a| a.to_string()).collect();
        assert_eq!(
            texts,
            vec!["0.0.0.0", "::ffff:0.0.0.1", "1.2.3.4", "255.255.255.255", "::1", "8000::"]
        );
    }

    #[test]
    fn test_equality_with_address() {
        let s = parse("::ffff:1.2.3.4");
        let v = parse("1.2.3.4").get_value().unwrap();
        assert_eq!(s, v);
        assert_eq!(v, s);
    }

    #[test]
    fn test_resolve_literal() {
        let addr = parse("9.32.237.26");
        let resolved = addr
            .resolve_with(&crate::host::SystemResolver)
            .expect("literal resolves to itself");
        assert_eq!(resolved.to_canonical_string(), "9.32.237.26");
    }

    #[test]
    fn test_allow_empty_option() {
        let opts = ValidationOptions {
            allow_empty: true,
            ..ValidationOptions::DEFAULT
        };
        let empty = IpAddressString::with_options("", opts);
        assert!(empty.is_valid());
        assert!(empty.is_empty());
        assert!(!empty.is_valid_address());
        assert!(empty.get_value().is_none());
        // the default rejects empty strings
        assert!(parse("").is_invalid());
    }

    #[test]
    fn test_leading_zeros_rejected_when_disallowed() {
        let opts = ValidationOptions {
            allow_leading_zeros_ipv4: false,
            ..ValidationOptions::DEFAULT
        };
        assert_eq!(
            IpAddressString::with_options("092.1.2.3", opts)
                .validate()
                .unwrap_err()
                .kind,
            AddressErrorKind::LeadingZeros
        );
        assert!(IpAddressString::with_options("92.1.2.3", opts).is_valid());
        // IPv6 keeps its leading zeros regardless
        assert!(IpAddressString::with_options("0001::1", opts).is_valid());
    }

    #[test]
    fn test_whitespace_trimmed_and_junk_rejected() {
        assert!(parse(" 1.2.3.4 ").is_valid());
        assert!(parse("1.2.3.4  0").is_invalid());
        assert!(parse("0 1.2.3.4").is_invalid());
    }
}
