// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    builder::{self, VariantOptions},
    render,
    segment::{Segment, SegmentIter},
    IpVersion, PREFIX_SEPARATOR, SEGMENT_WILDCARD,
};
use num_bigint::BigUint;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/**
An ordered run of [`Segment`]s representing all or part of an address:
4 segments for a full IPv4 address, 8 for IPv6, fewer for a network or
host sub-section.

Sections own the multi-representation string rendering, CIDR-mask
detection, zero-run (compression) detection and segment-level subnetting.
They are immutable; derived values are memoized in interior compute-once
cells which never participate in equality or ordering.
*/
#[derive(Clone, Debug)]
pub struct Section {
    version: IpVersion,
    segments: Vec<Segment>,
    /// trailing 4 bytes as an embedded IPv4 section (IPv6 mixed notation)
    mixed: Option<Box<Section>>,
    cache: SectionCache,
}

#[derive(Clone, Debug, Default)]
struct SectionCache {
    canonical: OnceLock<String>,
    normalized: OnceLock<String>,
    full: OnceLock<String>,
    compressed: OnceLock<String>,
    canonical_wildcard: OnceLock<String>,
    normalized_wildcard: OnceLock<String>,
    compressed_wildcard: OnceLock<String>,
    network_mask_prefix: OnceLock<Option<u32>>,
    host_mask_prefix: OnceLock<Option<u32>>,
    zero_segments: OnceLock<Vec<(usize, usize)>>,
    zero_ranges: OnceLock<Vec<(usize, usize)>>,
}

impl Section {
    pub(crate) fn new(version: IpVersion, segments: Vec<Segment>) -> Self {
        Section {
            version,
            segments,
            mixed: None,
            cache: SectionCache::default(),
        }
    }

    fn with_mixed(version: IpVersion, segments: Vec<Segment>, mixed: Option<Section>) -> Self {
        Section {
            version,
            segments,
            mixed: mixed.map(Box::new),
            cache: SectionCache::default(),
        }
    }

    /// Full 8-segment IPv6 section; the trailing two segments are split
    /// into the embedded mixed-notation IPv4 section.
    pub(crate) fn full_ipv6(segments: Vec<Segment>) -> Self {
        let mixed_index = IpVersion::V6.segment_count() - 2;
        let mut mixed_segs = Vec::with_capacity(4);
        mixed_segs.extend(split_v6_segment(&segments[mixed_index]));
        mixed_segs.extend(split_v6_segment(&segments[mixed_index + 1]));
        let mixed = Section::new(IpVersion::V4, mixed_segs);
        Section::with_mixed(IpVersion::V6, segments, Some(mixed))
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn bits_per_segment(&self) -> u32 {
        self.version.bits_per_segment()
    }

    pub fn separator(&self) -> char {
        self.version.separator()
    }

    pub fn is_entire_address(&self) -> bool {
        self.segments.len() == self.version.segment_count()
    }

    pub(crate) fn mixed_section(&self) -> Option<&Section> {
        self.mixed.as_deref()
    }

    pub(crate) fn mixed_ipv4_segment_count(&self) -> usize {
        self.mixed.as_ref().map_or(0, |m| m.segment_count())
    }

    /// How many of this section's own segments the embedded IPv4 section
    /// covers.
    pub(crate) fn mixed_ipv6_segment_count(&self) -> usize {
        let ipv4_segs = self.mixed_ipv4_segment_count();
        if ipv4_segs == 0 {
            return 0;
        }
        let bytes = ipv4_segs * IpVersion::V4.bytes_per_segment();
        bytes.div_ceil(IpVersion::V6.bytes_per_segment())
    }

    /// Whether this section renders identically to its own mixed part:
    /// a single embedded IPv4 segment whose value reads the same in hex
    /// and decimal.
    pub(crate) fn is_same_as_mixed(&self, check_range: bool) -> bool {
        if self.mixed_ipv4_segment_count() == 1 {
            let seg = &self.segments[0];
            return if check_range {
                seg.range_is_within(0, 9)
            } else {
                seg.value_is_within(0, 9)
            };
        }
        false
    }

    pub(crate) fn has_alphabetic_digits(&self, mixed: bool) -> bool {
        let mixed_count = if mixed { self.mixed_ipv6_segment_count() } else { 0 };
        self.segments[..self.segments.len() - mixed_count]
            .iter()
            .any(|s| s.has_alphabetic_digits())
    }

    /* ---------------------------------- */

    /// Whether this section represents a network prefix (the set of all
    /// addresses sharing it). Prefixes run front-to-back, so checking
    /// the last segment suffices.
    pub fn is_network_prefix(&self) -> bool {
        self.segments.last().is_some_and(|s| s.is_prefixed())
    }

    pub fn network_prefix_bits(&self) -> Option<u32> {
        if !self.is_network_prefix() {
            return None;
        }
        let mut result = 0;
        for seg in &self.segments {
            match seg.prefix_bits() {
                Some(prefix) => {
                    result += prefix;
                    if prefix < seg.bit_count() {
                        break; // the rest are 0
                    }
                }
                None => result += seg.bit_count(),
            }
        }
        Some(result)
    }

    /// Whether this section represents more than one address (a CIDR
    /// network, wildcard or range).
    pub fn is_multiple(&self) -> bool {
        self.segments.iter().any(|s| s.is_multiple())
    }

    pub fn is_zero(&self) -> bool {
        self.segments.iter().all(|s| s.is_zero())
    }

    /// The count of concrete addresses this section represents. An
    /// unrestricted IPv6 wildcard covers 2^128 addresses, hence the
    /// arbitrary-precision result.
    pub fn count(&self) -> BigUint {
        if !self.is_multiple() {
            return BigUint::from(1u8);
        }
        let mut result = BigUint::from(1u8);
        for seg in &self.segments {
            result *= BigUint::from(seg.count());
        }
        result
    }

    /* ---------------------------------- */

    /**
    If this section's value is exactly a CIDR network mask (`network` =
    true: all 1s then all 0s) or host mask (all 0s then all 1s), returns
    the corresponding prefix length; otherwise `None`.

    This is about the section's *value* being usable as a mask for other
    addresses; it is unrelated to any prefix length this section was
    constructed with.
    */
    pub fn cidr_mask_prefix_len(&self, network: bool) -> Option<u32> {
        if network {
            *self.cache.network_mask_prefix.get_or_init(|| {
                let prefix = self.check_for_prefix_mask(self.max_segment_value(), 0);
                if prefix.is_some() {
                    // cannot be both a network and a host mask
                    let _ = self.cache.host_mask_prefix.set(None);
                }
                prefix
            })
        } else {
            *self.cache.host_mask_prefix.get_or_init(|| {
                let prefix = self.check_for_prefix_mask(0, self.max_segment_value());
                if prefix.is_some() {
                    let _ = self.cache.network_mask_prefix.set(None);
                }
                prefix
            })
        }
    }

    fn max_segment_value(&self) -> u16 {
        self.version.max_segment_value()
    }

    /// Seed the mask-prefix cache for mask addresses built by the mask
    /// tables, where the prefix length is known by construction.
    pub(crate) fn preset_mask_prefix(&self, prefix_len: u32, network: bool) {
        if network {
            let _ = self.cache.network_mask_prefix.set(Some(prefix_len));
            let _ = self.cache.host_mask_prefix.set(None);
        } else {
            let _ = self.cache.host_mask_prefix.set(Some(prefix_len));
            let _ = self.cache.network_mask_prefix.set(None);
        }
    }

    /**
    Scan for a single all-`front` to all-`back` bit transition. The
    transition may fall mid-segment; more than one transition, or any
    multi-valued segment, disqualifies the section.
    */
    fn check_for_prefix_mask(&self, front: u16, back: u16) -> Option<u32> {
        let mut prefix_len = 0u32;
        let mut i = 0usize;
        while i < self.segments.len() {
            let seg = &self.segments[i];
            if seg.is_multiple() {
                return None;
            }
            let value = seg.lower();
            let bits = seg.bit_count();
            if value != front {
                let front_bit = front & 1;
                let back_bit = back & 1;
                let mut k = 1u32;
                while k <= bits {
                    let bit = (value >> (bits - k)) & 1;
                    if bit != front_bit {
                        // everything past the transition must be `back`
                        k += 1;
                        while k <= bits {
                            if (value >> (bits - k)) & 1 != back_bit {
                                return None;
                            }
                            k += 1;
                        }
                        break;
                    }
                    prefix_len += 1;
                    k += 1;
                }
                i += 1;
                while i < self.segments.len() {
                    let rest = &self.segments[i];
                    if rest.is_multiple() || rest.lower() != back {
                        return None;
                    }
                    i += 1;
                }
                return Some(prefix_len);
            }
            prefix_len += bits;
            i += 1;
        }
        // an empty section is both an empty host and an empty network mask
        Some(prefix_len)
    }

    /* ---------------------------------- */

    /// Maximal runs of exactly-zero segments, as `(start, length)` pairs.
    pub(crate) fn zero_segments(&self) -> &[(usize, usize)] {
        self.cache
            .zero_segments
            .get_or_init(|| self.compute_zero_segments(false))
    }

    /// Like [`Section::zero_segments`], but a segment whose CIDR-covered
    /// range includes 0 also counts. Governs compression of prefixed
    /// addresses.
    pub(crate) fn zero_range_segments(&self) -> &[(usize, usize)] {
        self.cache.zero_ranges.get_or_init(|| {
            if !self.is_network_prefix() {
                self.compute_zero_segments(false)
            } else {
                self.compute_zero_segments(true)
            }
        })
    }

    fn compute_zero_segments(&self, include_ranges: bool) -> Vec<(usize, usize)> {
        let mut runs = Vec::with_capacity(self.segments.len() / 2 + 1);
        let mut current_index = 0usize;
        let mut current_count = 0usize;
        for (i, seg) in self.segments.iter().enumerate() {
            let compressible = seg.is_zero() || (include_ranges && seg.range_matches(0));
            if compressible {
                current_count += 1;
                if current_count == 1 {
                    current_index = i;
                }
                if i == self.segments.len() - 1 {
                    runs.push((current_index, current_count));
                }
            } else if current_count > 0 {
                runs.push((current_index, current_count));
                current_count = 0;
            }
        }
        runs
    }

    /**
    Pick the `::` compression run: longest, leftmost on ties. Returns the
    Java-style `(index, count)` pair with `(-1, 0)` when nothing
    compresses. With `mixed` the run cannot extend into the embedded
    IPv4 part.
    */
    pub(crate) fn compress_index_and_count(&self, with_cidr: bool, mixed: bool) -> (i32, i32) {
        let runs = if with_cidr {
            self.zero_range_segments()
        } else {
            self.zero_segments()
        };
        let mut max_index = -1i32;
        let mut max_count = 0i32;
        for &(index, count) in runs {
            let mut count = count as i32;
            if mixed {
                let mixed_index = (IpVersion::V6.segment_count() - 2) as i32;
                count = count.min(mixed_index - index as i32);
            }
            if count > max_count {
                max_index = index as i32;
                max_count = count;
            }
        }
        (max_index, max_count)
    }

    /* ---------------------------------- */

    /// The minimal run of leading segments covering `cidr_bits`, each
    /// re-masked to respect the exact bit boundary.
    pub(crate) fn network_segments(&self, cidr_bits: u32) -> Vec<Segment> {
        if self.segments.is_empty() {
            return Vec::new();
        }
        let total_bits = self.total_bits();
        if cidr_bits >= total_bits {
            return self.segments.clone();
        }
        if cidr_bits == 0 {
            return Vec::new();
        }
        let bps = self.bits_per_segment();
        let seg_count = (cidr_bits as usize + bps as usize - 1) / bps as usize;
        (0..seg_count)
            .map(|i| {
                let prefix = segment_prefix_bits(bps, Some(cidr_bits), i, seg_count);
                self.segments[i].to_network_segment(prefix)
            })
            .collect()
    }

    /// The trailing segments past `cidr_bits`, each masked down to the
    /// host portion.
    pub(crate) fn host_segments(&self, cidr_bits: i64) -> Vec<Segment> {
        if self.segments.is_empty() || cidr_bits <= 0 {
            return self.segments.clone();
        }
        let total_bits = self.total_bits() as i64;
        let host_bits = total_bits - cidr_bits;
        if host_bits <= 0 {
            return Vec::new();
        }
        let bps = self.bits_per_segment();
        let seg_count = (host_bits as usize + bps as usize - 1) / bps as usize;
        let first = self.segments.len() - seg_count;
        (first..self.segments.len())
            .map(|j| {
                let prefix =
                    segment_prefix_bits(bps, Some(cidr_bits as u32), j, seg_count).unwrap_or(0);
                self.segments[j].to_host_segment(prefix)
            })
            .collect()
    }

    fn total_bits(&self) -> u32 {
        if self.segments.len() < self.version.segment_count() {
            self.segments.len() as u32 * self.bits_per_segment()
        } else {
            self.version.bit_count()
        }
    }

    /// The network portion of this section as a new section. For IPv6
    /// the embedded IPv4 part is carried along when the prefix reaches
    /// into it.
    pub fn network_section(&self, cidr_bits: u32) -> Section {
        let segs = self.network_segments(cidr_bits);
        if self.version.is_ipv6() {
            let mixed_count = self.mixed_ipv6_segment_count();
            if mixed_count > 0 {
                let first_mixed_bits =
                    (self.segments.len() - mixed_count) as u32 * self.bits_per_segment();
                if cidr_bits > first_mixed_bits {
                    let mixed_cidr = cidr_bits - first_mixed_bits;
                    let mixed = Section::new(
                        IpVersion::V4,
                        self.mixed.as_ref().unwrap().network_segments(mixed_cidr),
                    );
                    return Section::with_mixed(self.version, segs, Some(mixed));
                }
            }
        }
        Section::new(self.version, segs)
    }

    /// The host portion of this section as a new section.
    pub fn host_section(&self, cidr_bits: u32) -> Section {
        let segs = self.host_segments(cidr_bits as i64);
        if self.version.is_ipv6() {
            let mixed_count = self.mixed_ipv6_segment_count();
            if mixed_count > 0 {
                let first_mixed_bits =
                    (self.segments.len() - mixed_count) as i64 * self.bits_per_segment() as i64;
                let mixed_cidr = cidr_bits as i64 - first_mixed_bits;
                let mixed = Section::new(
                    IpVersion::V4,
                    self.mixed.as_ref().unwrap().host_segments(mixed_cidr),
                );
                return Section::with_mixed(self.version, segs, Some(mixed));
            }
        }
        Section::new(self.version, segs)
    }

    /* ---------------------------------- */

    /// Iterate every concrete segment-array this section represents,
    /// odometer style (last segment varies fastest).
    pub(crate) fn iter_segment_sets(&self) -> SegmentSetIter<'_> {
        SegmentSetIter::new(self)
    }

    /// Iterate every concrete section this section represents.
    pub fn iter_sections(&self) -> impl Iterator<Item = Section> + '_ {
        let version = self.version;
        self.iter_segment_sets().map(move |segs| Section::new(version, segs))
    }

    /* ------------- string creation ------------- */

    /**
    The canonical string (RFC 5952 for IPv6: longest zero run compressed,
    leftmost on ties, single zeros never compressed, lowercase hex).
    Unique per address value.
    */
    pub fn to_canonical_string(&self) -> &str {
        self.cache
            .canonical
            .get_or_init(|| render::render_preset(self, render::Preset::Canonical))
    }

    /// No compression, no mixed notation; consistent with the platform's
    /// plain rendering. Unique per address value.
    pub fn to_normalized_string(&self) -> &str {
        self.cache
            .normalized
            .get_or_init(|| render::render_preset(self, render::Preset::Normalized))
    }

    /// Every segment expanded to full width (4 hex chars for IPv6,
    /// 3 digits for IPv4), no compression.
    pub fn to_full_string(&self) -> &str {
        self.cache
            .full
            .get_or_init(|| render::render_preset(self, render::Preset::Full))
    }

    /// The shortest valid string (single zero segments compress too).
    pub fn to_compressed_string(&self) -> &str {
        self.cache
            .compressed
            .get_or_init(|| render::render_preset(self, render::Preset::Compressed))
    }

    /// Like canonical, but CIDR ranges are shown as explicit
    /// wildcards/ranges and no prefix length is appended.
    pub fn to_canonical_wildcard_string(&self) -> &str {
        self.cache
            .canonical_wildcard
            .get_or_init(|| render::render_preset(self, render::Preset::CanonicalWildcard))
    }

    /// Like normalized, with wildcards/ranges instead of a prefix.
    pub fn to_normalized_wildcard_string(&self) -> &str {
        self.cache
            .normalized_wildcard
            .get_or_init(|| render::render_preset(self, render::Preset::NormalizedWildcard))
    }

    /// Like compressed, with wildcards/ranges instead of a prefix.
    pub fn to_compressed_wildcard_string(&self) -> &str {
        self.cache
            .compressed_wildcard
            .get_or_init(|| render::render_preset(self, render::Preset::CompressedWildcard))
    }

    /// Mixed IPv6/IPv4 rendering (`a:b:c:d:e:f:1.2.3.4`), compressed.
    pub fn to_mixed_string(&self) -> String {
        render::render_preset(self, render::Preset::Mixed)
    }

    /// A few representations: compressed or not, upper/lowercase.
    pub fn to_basic_strings(&self) -> Vec<String> {
        builder::build_strings(self, VariantOptions::basic())
    }

    /**
    The standard representations: mixed notation, full compressions,
    full leading zeros, uppercase/lowercase, and their combinations.
    At most a couple dozen strings.
    */
    pub fn to_standard_strings(&self) -> Vec<String> {
        builder::build_strings(self, VariantOptions::standard())
    }

    /**
    Every variation: variable leading zeros, every compressible run,
    mixed renderings, uppercase/lowercase, and all combinations.

    Use with care: a single IPv6 address can have thousands of spellings
    ("::" alone has 1297).
    */
    pub fn to_all_strings(&self) -> Vec<String> {
        builder::build_strings(self, VariantOptions::all())
    }

    /// Custom variant enumeration.
    pub fn to_strings(&self, options: VariantOptions) -> Vec<String> {
        builder::build_strings(self, options)
    }

    /* ---------------------------------- */

    /**
    Append an SQL predicate matching the text column against this network
    section, OR-ing over every standard spelling of the prefix. Partial
    sections match on `substring_index`; full-length sections match
    exactly. This exists because the downstream datastore keeps addresses
    as text.
    */
    pub fn append_starts_with_sql_clause(&self, builder: &mut String, column: &str) {
        if self.is_multiple() {
            for section in self.iter_sections() {
                section.append_starts_with_sql_clause(builder, column);
            }
        } else if self.segment_count() > 0 {
            let entire = self.is_entire_address();
            let separator = self.separator();
            for str in self.to_standard_strings() {
                if !builder.is_empty() {
                    builder.push_str(" OR ");
                }
                if entire {
                    builder.push_str(column);
                    builder.push_str(" = '");
                    builder.push_str(&str);
                    builder.push('\'');
                } else {
                    let mut separator_count = str.matches(separator).count();
                    let search_str = if str.ends_with(separator) {
                        // the network ends with "::"; match the same
                        // separator run inside the full address
                        &str[..str.len() - 1]
                    } else {
                        separator_count += 1;
                        &str[..]
                    };
                    builder.push_str("substring_index(");
                    builder.push_str(column);
                    builder.push_str(",'");
                    builder.push(separator);
                    builder.push_str("',");
                    builder.push_str(&separator_count.to_string());
                    builder.push_str(") = '");
                    builder.push_str(search_str);
                    builder.push('\'');
                }
            }
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_canonical_string())
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Section {}

impl Ord for Section {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .len()
            .cmp(&other.segments.len())
            .then_with(|| self.segments.cmp(&other.segments))
    }
}

impl PartialOrd for Section {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/* -------------------------------------------------------------------------- */

/// Odometer iterator over the concrete segment arrays of a section.
pub(crate) struct SegmentSetIter<'a> {
    section: &'a Section,
    variations: Vec<SegmentIter>,
    next_set: Vec<Segment>,
    single: bool,
    done: bool,
}

impl<'a> SegmentSetIter<'a> {
    fn new(section: &'a Section) -> Self {
        if !section.is_multiple() {
            return SegmentSetIter {
                section,
                variations: Vec::new(),
                next_set: Vec::new(),
                single: true,
                done: false,
            };
        }
        let mut variations: Vec<SegmentIter> =
            section.segments.iter().map(|s| s.iter()).collect();
        let next_set: Vec<Segment> = variations
            .iter_mut()
            .map(|it| it.next().expect("segment iterators are never empty"))
            .collect();
        SegmentSetIter {
            section,
            variations,
            next_set,
            single: false,
            done: false,
        }
    }

    fn increment(&mut self) {
        for j in (0..self.variations.len()).rev() {
            if let Some(seg) = self.variations[j].next() {
                self.next_set[j] = seg;
                for k in j + 1..self.variations.len() {
                    self.variations[k] = self.section.segments[k].iter();
                    self.next_set[k] =
                        self.variations[k].next().expect("segment iterators are never empty");
                }
                return;
            }
        }
        self.done = true;
    }
}

impl Iterator for SegmentSetIter<'_> {
    type Item = Vec<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.single {
            self.done = true;
            return Some(self.section.segments.clone());
        }
        let set = self.next_set.clone();
        self.increment();
        Some(set)
    }
}

/* -------------------------------------------------------------------------- */

/**
Per-segment share of a network prefix: `Some(0)` when the prefix ends
before this segment, `Some(n)` when it ends `n` bits in, and `None` when
every bit of the segment matters (including a prefix reaching exactly the
end of the final segment, which leaves the address un-prefixed).
*/
pub(crate) fn segment_prefix_bits(
    bits_per_segment: u32,
    network_prefix: Option<u32>,
    segment_index: usize,
    segment_count: usize,
) -> Option<u32> {
    let prefix = network_prefix?;
    let seg_bits = prefix as i64 - segment_index as i64 * bits_per_segment as i64;
    if segment_index < segment_count - 1 || seg_bits < bits_per_segment as i64 {
        segment_bits(bits_per_segment, seg_bits)
    } else {
        None
    }
}

/// Like [`segment_prefix_bits`] when the prefix is already known not to
/// reach the end of the last segment.
pub(crate) fn split_segment_prefix_bits(
    bits_per_segment: u32,
    network_prefix: Option<u32>,
    segment_index: usize,
) -> Option<u32> {
    let prefix = network_prefix?;
    segment_bits(
        bits_per_segment,
        prefix as i64 - segment_index as i64 * bits_per_segment as i64,
    )
}

fn segment_bits(bits_per_segment: u32, seg_bits: i64) -> Option<u32> {
    if seg_bits <= 0 {
        Some(0) // none of the bits in this segment matter
    } else if seg_bits <= bits_per_segment as i64 {
        Some(seg_bits as u32)
    } else {
        None // all of the bits in this segment matter
    }
}

/// Index of the segment a prefix boundary falls in (Java-division
/// semantics: a 0-bit prefix maps to segment 0).
pub(crate) fn segment_index_of_prefix(
    prefix_bits: Option<u32>,
    byte_len: usize,
    bytes_per_segment: usize,
) -> i64 {
    let byte_index = match prefix_bits {
        None => byte_len as i64,
        Some(p) => ((p as i64 - 1) >> 3).min(byte_len as i64),
    };
    byte_index / bytes_per_segment as i64
}

/**
Mask every segment of `original` with the lowest value of the matching
`mask` segment, applying the per-segment share of `cidr_prefix`. Returns
`None` when nothing changes, so callers can preserve identity.

# Panics

Panics if the slices mix IP versions.
*/
pub(crate) fn subnet_segments(
    original: &[Segment],
    mask: &[Segment],
    cidr_prefix: Option<u32>,
) -> Option<Vec<Segment>> {
    let count = original.len();
    let changed = original.iter().zip(mask).enumerate().any(|(i, (seg, m))| {
        let prefix = segment_prefix_bits(seg.bit_count(), cidr_prefix, i, count);
        seg.is_changed_by_mask(m, prefix)
    });
    if !changed {
        return None;
    }
    Some(
        original
            .iter()
            .zip(mask)
            .enumerate()
            .map(|(i, (seg, m))| {
                let prefix = segment_prefix_bits(seg.bit_count(), cidr_prefix, i, count);
                seg.to_masked_segment(m, prefix)
            })
            .collect(),
    )
}

/// Re-derive segments so the given CIDR prefix is distributed across
/// them. Returns the input unchanged when every segment already carries
/// its share.
pub(crate) fn to_cidr_segments(bits: Option<u32>, segments: Vec<Segment>) -> Vec<Segment> {
    let Some(bits) = bits else {
        return segments;
    };
    let count = segments.len();
    let changed = segments.iter().enumerate().any(|(i, seg)| {
        let prefix = segment_prefix_bits(seg.bit_count(), Some(bits), i, count);
        seg.is_network_changed_by_prefix(prefix)
    });
    if !changed {
        return segments;
    }
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let prefix = segment_prefix_bits(seg.bit_count(), Some(bits), i, count);
            seg.to_network_segment(prefix)
        })
        .collect()
}

/// Split one IPv6 segment into its two one-byte IPv4 segments.
pub(crate) fn split_v6_segment(seg: &Segment) -> [Segment; 2] {
    let bps = IpVersion::V4.bits_per_segment();
    let high_prefix = split_segment_prefix_bits(bps, seg.prefix_bits(), 0);
    let low_prefix = split_segment_prefix_bits(bps, seg.prefix_bits(), 1);
    if !seg.is_multiple() {
        return [
            Segment::with_prefix(IpVersion::V4, seg.lower() >> 8, high_prefix),
            Segment::with_prefix(IpVersion::V4, seg.lower() & 0xff, low_prefix),
        ];
    }
    let high = split_half(seg.lower() >> 8, seg.upper() >> 8, high_prefix);
    let low = split_half(seg.lower() & 0xff, seg.upper() & 0xff, low_prefix);
    [high, low]
}

fn split_half(lower: u16, upper: u16, prefix: Option<u32>) -> Segment {
    if lower == upper {
        return Segment::with_text(IpVersion::V4, lower, Some(lower.to_string()), prefix);
    }
    let text = if lower == 0 && upper == IpVersion::V4.max_segment_value() {
        SEGMENT_WILDCARD.to_string()
    } else {
        format!("{lower}-{upper}")
    };
    Segment::range(IpVersion::V4, Some(text), prefix, lower, upper)
}

/// Append a `/prefix` suffix to a rendered string.
pub(crate) fn push_prefix_len(out: &mut String, prefix_bits: u32) {
    out.push(PREFIX_SEPARATOR);
    out.push_str(&prefix_bits.to_string());
}

/* -------------------------------------------------------------------------- */
