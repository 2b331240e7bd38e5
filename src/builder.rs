// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enumeration of alternate spellings of an address under leading-zero,
//! compression, uppercase and mixed-notation options.

use crate::{
    render::{Ipv4Params, Ipv6Params},
    segment::Segment,
    IpVersion, Section,
};

/**
Which spelling variations to enumerate. `bits` uses the option constants
below; `mixed_bits` configures the embedded IPv4 part of mixed IPv6
renderings (zero disables mixed entirely).
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VariantOptions {
    bits: u32,
    mixed_bits: u32,
}

#[rustfmt::skip]
impl VariantOptions {
    /// no compression, lowercase only, no leading zeros, no mixed
    pub const SIMPLE: u32 = 0;
    pub const MIXED: u32 = 0x1;
    pub const UPPERCASE: u32 = 0x2;
    /// 0001:0002:00ab:0abc::
    pub const LEADING_ZEROS_FULL_ALL_SEGMENTS: u32 = 0x10;
    /// 1:0002:00ab:0abc::, 0001:2:00ab:0abc::, ...
    pub const LEADING_ZEROS_FULL_SOME_SEGMENTS: u32 = 0x20 | Self::LEADING_ZEROS_FULL_ALL_SEGMENTS;
    /// 1:02:00ab:0abc::, 01:2:00ab:0abc::, ...
    pub const LEADING_ZEROS_PARTIAL_SOME_SEGMENTS: u32 = 0x40 | Self::LEADING_ZEROS_FULL_SOME_SEGMENTS;
    /// the compression used by the canonical string
    pub const COMPRESSION_CANONICAL: u32 = 0x1000;
    /// also compress a lone zero segment
    pub const COMPRESSION_SINGLE: u32 = Self::COMPRESSION_CANONICAL | 0x2000;
    /// compress every compressible run in full
    pub const COMPRESSION_ALL_FULL: u32 = Self::COMPRESSION_SINGLE | 0x4000;
    /// compress every sub-run of every compressible run
    pub const COMPRESSION_ALL_PARTIAL: u32 = Self::COMPRESSION_ALL_FULL | 0x8000;

    pub fn new(bits: u32) -> Self {
        VariantOptions { bits, mixed_bits: 0 }
    }

    pub fn with_mixed(bits: u32, mixed_bits: u32) -> Self {
        let bits = if mixed_bits != 0 { bits | Self::MIXED } else { bits };
        VariantOptions { bits, mixed_bits }
    }

    fn includes(&self, option: u32) -> bool {
        self.bits & option == option
    }

    fn mixed_includes(&self, option: u32) -> bool {
        self.mixed_bits & option == option
    }

    pub(crate) fn basic() -> Self {
        VariantOptions::new(Self::UPPERCASE | Self::COMPRESSION_SINGLE)
    }

    pub(crate) fn standard() -> Self {
        VariantOptions::with_mixed(
            Self::UPPERCASE | Self::LEADING_ZEROS_FULL_ALL_SEGMENTS | Self::COMPRESSION_ALL_FULL,
            Self::LEADING_ZEROS_FULL_ALL_SEGMENTS,
        )
    }

    pub(crate) fn all() -> Self {
        VariantOptions::with_mixed(
            Self::UPPERCASE | Self::LEADING_ZEROS_FULL_SOME_SEGMENTS | Self::COMPRESSION_ALL_FULL,
            Self::LEADING_ZEROS_FULL_SOME_SEGMENTS,
        )
    }
}

pub(crate) fn build_strings(section: &Section, options: VariantOptions) -> Vec<String> {
    match section.version() {
        IpVersion::V4 => v4_strings(section, options),
        IpVersion::V6 => v6_strings(section, options),
    }
}

/* -------------------------------------------------------------------------- */

fn is_expandable(segments: &[Segment], segment_count: usize) -> bool {
    is_expandable_outside(segments, -1, 0, segment_count)
}

fn is_expandable_outside(
    segments: &[Segment],
    segment_index: i32,
    count: i32,
    segment_count: usize,
) -> bool {
    let next = segment_index + count;
    (0..segment_count as i32)
        .filter(|&i| i < segment_index || i >= next)
        .any(|i| segments[i as usize].is_char_prefixable())
}

fn expandable_lengths(segments: &[Segment]) -> Vec<usize> {
    segments.iter().map(|s| s.max_char_prefix_len()).collect()
}

/* -------------------------------------------------------------------------- */

fn v4_strings(section: &Section, options: VariantOptions) -> Vec<String> {
    let mut all_params = vec![Ipv4Params::new(false)];
    if options.includes(VariantOptions::LEADING_ZEROS_FULL_SOME_SEGMENTS) {
        all_params[0].reset_expansions(section.segment_count());
        let expandables = expandable_lengths(section.segments());
        for (i, &max_expansion) in expandables.iter().enumerate() {
            let mut expansion = max_expansion;
            let len = all_params.len();
            while expansion > 0 {
                for j in 0..len {
                    let mut clone = all_params[j].clone();
                    clone.expand_segment[i] = expansion;
                    all_params.push(clone);
                }
                if !options.includes(VariantOptions::LEADING_ZEROS_PARTIAL_SOME_SEGMENTS) {
                    break;
                }
                expansion -= 1;
            }
        }
    } else if options.includes(VariantOptions::LEADING_ZEROS_FULL_ALL_SEGMENTS)
        && is_expandable(section.segments(), section.segment_count())
    {
        all_params.push(Ipv4Params::new(true));
    }
    all_params.iter().map(|p| p.to_string_of(section)).collect()
}

/* -------------------------------------------------------------------------- */

/*
All potential strings come from:
    for the non-mixed case and then the mixed case
        for each zero-run choice, including choosing none
            for each compressible sub-run of that run (skipped when
            compressing in full)
                for each leading-zero expansion of an uncompressed segment
                    write the string
*/
fn v6_strings(section: &Section, options: VariantOptions) -> Vec<String> {
    let mut strings = Vec::new();
    add_all_compression_variations(&mut strings, section, options, false);
    if options.includes(VariantOptions::MIXED) && section.mixed_ipv6_segment_count() > 0 {
        add_all_compression_variations(&mut strings, section, options, true);
    }
    strings
}

fn add_all_compression_variations(
    out: &mut Vec<String>,
    section: &Section,
    options: VariantOptions,
    mixed: bool,
) {
    let segment_count = if mixed {
        section.segment_count() - section.mixed_ipv6_segment_count()
    } else {
        section.segment_count()
    };

    // the case of compressing nothing
    add_all_expansions(out, section, options, mixed, -1, 0, segment_count);

    if options.includes(VariantOptions::COMPRESSION_ALL_FULL) {
        for &(start, len) in section.zero_segments() {
            add_all_compressed_strings(
                out,
                section,
                options,
                mixed,
                start,
                len,
                options.includes(VariantOptions::COMPRESSION_ALL_PARTIAL),
                segment_count,
            );
        }
    } else if options.includes(VariantOptions::COMPRESSION_CANONICAL) {
        let (max_index, max_count) = section.compress_index_and_count(false, mixed);
        if max_index >= 0
            && (max_count > 1 || options.includes(VariantOptions::COMPRESSION_SINGLE))
        {
            add_all_compressed_strings(
                out,
                section,
                options,
                mixed,
                max_index as usize,
                max_count as usize,
                false,
                segment_count,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn add_all_compressed_strings(
    out: &mut Vec<String>,
    section: &Section,
    options: VariantOptions,
    mixed: bool,
    zero_start: usize,
    count: usize,
    partial: bool,
    segment_count: usize,
) {
    let mut end = (zero_start + count) as i32;
    if mixed {
        let ipv6_segment_end = (section.segment_count() - section.mixed_ipv6_segment_count()) as i32;
        end = end.min(ipv6_segment_end);
    }
    if partial {
        let mut i = zero_start as i32;
        while i < end {
            for j in i + 1..=end {
                add_all_expansions(out, section, options, mixed, i, j - i, segment_count);
            }
            i += 1;
        }
    } else {
        let len = end - zero_start as i32;
        if len > 0 {
            add_all_expansions(out, section, options, mixed, zero_start as i32, len, segment_count);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn add_all_expansions(
    out: &mut Vec<String>,
    section: &Section,
    options: VariantOptions,
    mixed: bool,
    first_compressed: i32,
    count: i32,
    segment_count: usize,
) {
    let mut all_params = vec![Ipv6Params::new(mixed, first_compressed, count)];

    // before any cloning happens
    let add_mixed_expansions =
        options.mixed_includes(VariantOptions::LEADING_ZEROS_FULL_SOME_SEGMENTS);
    if mixed && add_mixed_expansions {
        let mixed_len = section.mixed_section().map_or(0, |m| m.segment_count());
        all_params[0].mixed.reset_expansions(mixed_len);
    }

    if options.includes(VariantOptions::LEADING_ZEROS_FULL_SOME_SEGMENTS) {
        all_params[0].reset_expansions(section.segment_count());
        let expandables = expandable_lengths(section.segments());
        let next_uncompressed = first_compressed + count;
        let ipv6_segment_end = section.segment_count()
            - if mixed { section.mixed_ipv6_segment_count() } else { 0 };
        for i in 0..ipv6_segment_end {
            if (i as i32) < first_compressed || (i as i32) >= next_uncompressed {
                let mut expansion = expandables[i];
                let len = all_params.len();
                while expansion > 0 {
                    for j in 0..len {
                        let mut clone = all_params[j].clone();
                        clone.expand_segment[i] = expansion;
                        all_params.push(clone);
                    }
                    if !options.includes(VariantOptions::LEADING_ZEROS_PARTIAL_SOME_SEGMENTS) {
                        break;
                    }
                    expansion -= 1;
                }
            }
        }
    } else if options.includes(VariantOptions::LEADING_ZEROS_FULL_ALL_SEGMENTS)
        && is_expandable_outside(section.segments(), first_compressed, count, segment_count)
    {
        let len = all_params.len();
        for j in 0..len {
            let mut clone = all_params[j].clone();
            clone.expand_segments = true;
            all_params.push(clone);
        }
    }

    if mixed {
        let mixed_segments = section.mixed_section().unwrap().segments();
        if add_mixed_expansions {
            let expandables = expandable_lengths(mixed_segments);
            for (i, &max_expansion) in expandables.iter().enumerate() {
                let mut expansion = max_expansion;
                let len = all_params.len();
                while expansion > 0 {
                    for j in 0..len {
                        let mut clone = all_params[j].clone();
                        clone.mixed.expand_segment[i] = expansion;
                        all_params.push(clone);
                    }
                    if !options
                        .mixed_includes(VariantOptions::LEADING_ZEROS_PARTIAL_SOME_SEGMENTS)
                    {
                        break;
                    }
                    expansion -= 1;
                }
            }
        } else if options.mixed_includes(VariantOptions::LEADING_ZEROS_FULL_ALL_SEGMENTS)
            && is_expandable(mixed_segments, mixed_segments.len())
        {
            let len = all_params.len();
            for j in 0..len {
                let mut clone = all_params[j].clone();
                clone.mixed.expand_segments = true;
                all_params.push(clone);
            }
        }
    }

    if mixed && section.is_same_as_mixed(false) {
        // the plain mixed rendering duplicates the non-mixed one, but
        // any expanded variant does not
        all_params.remove(0);
    }

    if options.includes(VariantOptions::UPPERCASE) && section.has_alphabetic_digits(mixed) {
        let len = all_params.len();
        for j in 0..len {
            let mut clone = all_params[j].clone();
            clone.uppercase = true;
            all_params.push(clone);
        }
    }

    for params in &all_params {
        out.push(params.to_string_of(section));
    }
}

/* -------------------------------------------------------------------------- */
