// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String rendering policies for sections: one parameter set describes
//! exactly one spelling of an address.

use crate::{
    section::{push_prefix_len, segment_index_of_prefix},
    segment::Segment,
    IpVersion, Section, MAX_STRING_LEN, V4_SEPARATOR, V6_SEPARATOR,
};

/// The fixed rendering policies behind the section string methods.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Preset {
    Canonical,
    Normalized,
    Full,
    Compressed,
    CanonicalWildcard,
    NormalizedWildcard,
    CompressedWildcard,
    Mixed,
}

pub(crate) fn render_preset(section: &Section, preset: Preset) -> String {
    match section.version() {
        IpVersion::V4 => {
            let (expand, wildcards) = match preset {
                Preset::Full => (true, false),
                Preset::CanonicalWildcard
                | Preset::NormalizedWildcard
                | Preset::CompressedWildcard => (false, true),
                _ => (false, false),
            };
            let mut params = Ipv4Params::new(expand);
            params.make_wildcards = wildcards;
            params.to_string_of(section)
        }
        IpVersion::V6 => {
            let normalize = match preset {
                // (make_mixed, compress, compress_single, with_cidr, expand, wildcards)
                Preset::Mixed => V6Normalize::new(true, true, true, true, false, false),
                Preset::Full => V6Normalize::new(false, false, false, false, true, false),
                Preset::Normalized => V6Normalize::new(false, false, false, false, false, false),
                Preset::Canonical => V6Normalize::new(false, true, false, true, false, false),
                Preset::Compressed => V6Normalize::new(false, true, true, true, false, false),
                Preset::NormalizedWildcard => {
                    V6Normalize::new(false, false, false, false, false, true)
                }
                Preset::CanonicalWildcard => V6Normalize::new(false, true, false, true, false, true),
                Preset::CompressedWildcard => {
                    V6Normalize::new(false, true, true, true, false, true)
                }
            };
            normalize.to_string_of(section)
        }
    }
}

/* -------------------------------------------------------------------------- */

/**
High-level IPv6 normalization choices, resolved against a concrete
section into an [`Ipv6Params`] (picking the actual compression run).
*/
#[derive(Clone, Copy, Debug)]
pub(crate) struct V6Normalize {
    pub make_mixed: bool,
    /// compress the largest zero run
    pub compress: bool,
    /// also compress a lone zero segment (ignored unless `compress`)
    pub compress_single: bool,
    /// let CIDR-covered ranges count as compressible zeros
    pub compress_with_cidr: bool,
    pub expand_segments: bool,
    pub make_wildcards: bool,
}

impl V6Normalize {
    pub(crate) fn new(
        make_mixed: bool,
        compress: bool,
        compress_single: bool,
        compress_with_cidr: bool,
        expand_segments: bool,
        make_wildcards: bool,
    ) -> Self {
        V6Normalize {
            make_mixed,
            compress,
            compress_single,
            compress_with_cidr,
            expand_segments,
            make_wildcards,
        }
    }

    pub(crate) fn params_for(&self, section: &Section) -> Ipv6Params {
        let mut result = Ipv6Params::new(self.make_mixed, -1, 0);
        if self.compress {
            let (max_index, max_count) =
                section.compress_index_and_count(self.compress_with_cidr, self.make_mixed);
            if max_index >= 0 && (self.compress_single || max_count > 1) {
                result.first_compressed = max_index;
                result.next_uncompressed = max_index + max_count;
                result.wildcards_compressed = self.compress_with_cidr
                    && result.next_uncompressed as i64
                        > segment_index_of_prefix(
                            section.network_prefix_bits(),
                            IpVersion::V6.byte_count(),
                            IpVersion::V6.bytes_per_segment(),
                        );
            }
        }
        result.expand_segments = self.expand_segments;
        result.make_wildcards = self.make_wildcards;
        result
    }

    pub(crate) fn to_string_of(&self, section: &Section) -> String {
        self.params_for(section).to_string_of(section)
    }
}

/* -------------------------------------------------------------------------- */

/// Settings for writing exactly one IPv4 address string.
#[derive(Clone, Debug)]
pub(crate) struct Ipv4Params {
    pub expand_segments: bool,
    pub make_wildcards: bool,
    /// per-segment leading-zero expansion (character counts)
    pub expand_segment: Vec<usize>,
}

impl Ipv4Params {
    pub(crate) fn new(expand_segments: bool) -> Self {
        Ipv4Params {
            expand_segments,
            make_wildcards: false,
            expand_segment: Vec::new(),
        }
    }

    pub(crate) fn reset_expansions(&mut self, segment_count: usize) {
        self.expand_segment = vec![0; segment_count];
    }

    fn char_prefix(&self, seg: &Segment, i: usize) -> &'static str {
        if self.expand_segments {
            seg.full_char_prefix()
        } else if !self.expand_segment.is_empty() && self.expand_segment[i] > 0 {
            seg.char_prefix(self.expand_segment[i])
        } else {
            ""
        }
    }

    pub(crate) fn append(&self, out: &mut String, section: &Section) {
        self.append_segments(out, section.segments());
        if section.is_network_prefix() && !self.make_wildcards {
            push_prefix_len(out, section.network_prefix_bits().unwrap());
        }
    }

    pub(crate) fn append_segments(&self, out: &mut String, segments: &[Segment]) {
        for (i, seg) in segments.iter().enumerate() {
            if self.make_wildcards {
                out.push_str(&seg.wildcard_string());
            } else {
                out.push_str(self.char_prefix(seg, i));
                out.push_str(&seg.get_string());
            }
            out.push(V4_SEPARATOR);
        }
        if !out.is_empty() {
            out.pop();
        }
    }

    pub(crate) fn to_string_of(&self, section: &Section) -> String {
        let mut out = String::with_capacity(MAX_STRING_LEN);
        self.append(&mut out, section);
        out
    }
}

/* -------------------------------------------------------------------------- */

/// Settings for writing exactly one IPv6 address string.
#[derive(Clone, Debug)]
pub(crate) struct Ipv6Params {
    pub expand_segments: bool,
    pub make_wildcards: bool,
    pub expand_segment: Vec<usize>,
    /// index of the first `::`-compressed segment, -1 for none
    pub first_compressed: i32,
    /// index just past the compressed run
    pub next_uncompressed: i32,
    /// whether compression swallowed CIDR-covered wildcard segments, in
    /// which case the prefix length is still appended to wildcard strings
    pub wildcards_compressed: bool,
    pub create_mixed: bool,
    pub mixed: Ipv4Params,
    pub uppercase: bool,
}

impl Ipv6Params {
    pub(crate) fn new(create_mixed: bool, first_compressed: i32, compressed_count: i32) -> Self {
        Ipv6Params {
            expand_segments: false,
            make_wildcards: false,
            expand_segment: Vec::new(),
            first_compressed,
            next_uncompressed: first_compressed + compressed_count,
            wildcards_compressed: false,
            create_mixed,
            mixed: Ipv4Params::new(false),
            uppercase: false,
        }
    }

    pub(crate) fn reset_expansions(&mut self, segment_count: usize) {
        self.expand_segment = vec![0; segment_count];
    }

    fn char_prefix(&self, seg: &Segment, i: usize) -> &'static str {
        if self.expand_segments {
            seg.full_char_prefix()
        } else if !self.expand_segment.is_empty() && self.expand_segment[i] > 0 {
            seg.char_prefix(self.expand_segment[i])
        } else {
            ""
        }
    }

    pub(crate) fn append(&self, out: &mut String, section: &Section) {
        let mixed_count = if self.create_mixed {
            section.mixed_ipv6_segment_count()
        } else {
            0
        };
        let last_v6 = section.segment_count() as i32 - mixed_count as i32 - 1;
        let segments = section.segments();
        let mut i = 0i32;
        while i <= last_v6 {
            if i < self.first_compressed || i >= self.next_uncompressed {
                let seg = &segments[i as usize];
                let mut seg_str = if self.make_wildcards {
                    seg.wildcard_string()
                } else {
                    let prefix = self.char_prefix(seg, i as usize);
                    out.push_str(prefix);
                    seg.get_string()
                };
                if self.uppercase {
                    seg_str = seg_str.to_ascii_uppercase();
                }
                out.push_str(&seg_str);
                out.push(V6_SEPARATOR);
            } else if i == self.first_compressed {
                out.push(V6_SEPARATOR);
                if i == 0 {
                    out.push(V6_SEPARATOR);
                }
            }
            i += 1;
        }
        if self.create_mixed {
            let mixed_segments = section.mixed_section().map_or(&[][..], |m| m.segments());
            self.mixed.append_segments(out, mixed_segments);
        } else if self.next_uncompressed <= last_v6 && !out.is_empty() {
            out.pop(); // the extra trailing separator
        }
        if section.is_network_prefix() && (!self.make_wildcards || self.wildcards_compressed) {
            push_prefix_len(out, section.network_prefix_bits().unwrap());
        }
    }

    pub(crate) fn to_string_of(&self, section: &Section) -> String {
        let mut out = String::with_capacity(MAX_STRING_LEN);
        self.append(&mut out, section);
        out
    }
}
