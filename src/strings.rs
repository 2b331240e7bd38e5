// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

// lib.rs
pub(crate) static ERR_ADDRESS: &str = "invalid IP address";
pub(crate) static ERR_IP_FORMAT: &str = "not an IPv4 or IPv6 address";
pub(crate) static ERR_IPV4_FORMAT: &str = "invalid IPv4 address format";
pub(crate) static ERR_IPV6_SEGMENT: &str = "invalid IPv6 segment format";
pub(crate) static ERR_TOO_FEW_SEGMENTS: &str = "too few segments";
pub(crate) static ERR_TOO_MANY_SEGMENTS: &str = "too many segments";
pub(crate) static ERR_SINGLE_SEP_START: &str = "cannot start with a single separator";
pub(crate) static ERR_SINGLE_SEP_END: &str = "cannot end with a single separator";
pub(crate) static ERR_AMBIGUOUS: &str = "ambiguous '::' compression";
pub(crate) static ERR_LEADING_ZEROS: &str = "leading zeros not allowed";
pub(crate) static ERR_INVALID_RANGE: &str = "range lower bound must be below upper bound";
pub(crate) static ERR_INVALID_PREFIX: &str = "invalid CIDR prefix length";
pub(crate) static ERR_ZONE_AND_PREFIX: &str = "cannot have both a zone and a CIDR prefix";
pub(crate) static ERR_ZONE_ON_IPV4: &str = "only IPv6 addresses have zones";
pub(crate) static ERR_IS_URL: &str = "appears to be a URL";
pub(crate) static ERR_EMPTY: &str = "empty address string";

pub(crate) static ERR_HOST: &str = "invalid host";
pub(crate) static ERR_HOST_LENGTH: &str = "invalid host length";
pub(crate) static ERR_HOST_SEGMENTS: &str = "too many host segments";
pub(crate) static ERR_HOST_FORMAT: &str = "invalid host format";
pub(crate) static ERR_HOST_ZONE: &str = "zone not allowed in a host name";

// panic-class (programmer error) messages
pub(crate) static PANIC_VERSION_MISMATCH: &str = "IP version mismatch between address and mask";
pub(crate) static PANIC_MASK_MULTIPLE: &str = "cannot mask an address representing multiple values";
pub(crate) static PANIC_BYTE_LENGTH: &str = "address bytes must be 4 (IPv4) or 16 (IPv6) long";
pub(crate) static PANIC_SEGMENT_COUNT: &str = "wrong segment count for address version";
pub(crate) static PANIC_NO_SINGLE_VALUE: &str = "no single numeric value for a multi-valued address";
pub(crate) static PANIC_SEGMENT_TEXT: &str = "segment text describes neither a value nor a range";
