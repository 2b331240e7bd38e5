// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    address::IpAddress,
    parser::{url_shaped, IpAddressString},
    HostError, HostErrorKind, V4_SEPARATOR, V6_SEPARATOR,
};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use tracing::{debug, warn};

const MAX_LENGTH: usize = 253;
const MAX_SEGMENTS: usize = 127;

// RFC 1035-derived label grammar. Strictly speaking the underscore is
// not allowed, but it occurs in real DNS names, so it stays accepted.
lazy_static! {
    static ref LABEL_PATTERN: Regex =
        Regex::new("^[a-zA-Z0-9_]([a-zA-Z0-9_\\-]{0,61}[a-zA-Z0-9_])?$").unwrap();
    static ref NUMERIC_DOT_PATTERN: Regex = Regex::new("^[0-9.]+$").unwrap();
}

/// What a [`Host`] accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HostOptions {
    pub allow_empty: bool,
    /// accept a bare IPv6 literal without `[...]` brackets
    pub allow_unbracketed_ipv6: bool,
    pub normalize_to_lowercase: bool,
    /// accept a `%zone` on an unbracketed IPv6 literal (never allowed
    /// inside brackets)
    pub allow_zone: bool,
}

impl HostOptions {
    pub const DEFAULT: HostOptions = HostOptions {
        allow_empty: false,
        allow_unbracketed_ipv6: true,
        normalize_to_lowercase: false,
        allow_zone: false,
    };
}

impl Default for HostOptions {
    fn default() -> Self {
        HostOptions::DEFAULT
    }
}

/* -------------------------------------------------------------------------- */

/// An external name-resolution capability. The core treats resolution as
/// "given validated host text, obtain zero or more addresses or fail".
pub trait NameResolver {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolves through the operating system's resolver (blocking).
pub struct SystemResolver;

impl NameResolver for SystemResolver {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        Ok((host, 0u16)
            .to_socket_addrs()?
            .map(|sock| sock.ip())
            .collect())
    }
}

/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, Default)]
struct HostState {
    validated: bool,
    error: Option<HostError>,
    /// dot-separated labels; absent when the host is an IP literal
    labels: Option<Vec<String>>,
    /// set when the text is IP-literal shaped
    addr: Option<IpAddressString>,
    /// memoized resolution; distinguishes "not yet resolved" from
    /// "resolved to nothing"
    resolved: Option<Option<IpAddress>>,
    normalized: Option<String>,
    canonical: Option<String>,
    reversed: Option<String>,
    normalized_labels: Option<Vec<String>>,
}

/**
An internet host: a (fully qualified) domain name, a bracketed or
unbracketed IPv6 literal, or an IPv4 literal.

After validation exactly one of three things holds: the text is a
validated set of DNS labels, a validated IP address, or invalid.
Validation is lazy and memoized; resolution is memoized separately.
*/
pub struct Host {
    text: String,
    options: HostOptions,
    state: RwLock<HostState>,
}

impl Host {
    pub fn new(host: &str) -> Self {
        Host::with_options(host, HostOptions::DEFAULT)
    }

    pub fn with_options(host: &str, options: HostOptions) -> Self {
        Host {
            text: host.trim().to_string(),
            options,
            state: RwLock::new(HostState::default()),
        }
    }

    /// Wrap an already-parsed address string as a host.
    pub fn from_address_string(addr: &IpAddressString) -> Host {
        let text = if addr.is_ipv6() {
            match addr.get_value() {
                Some(v) => format!("[{}]", v.to_normalized_string()),
                None => addr.to_string(),
            }
        } else if addr.is_valid() {
            match addr.get_value() {
                Some(v) => v.to_normalized_string(),
                None => addr.to_string(),
            }
        } else {
            addr.to_string()
        };
        let host = Host::new(&text);
        if addr.is_valid() {
            let mut st = host.state.write();
            st.addr = Some(addr.clone());
            st.resolved = Some(addr.get_value());
            st.validated = true;
        }
        host
    }

    fn error(&self, kind: HostErrorKind) -> HostError {
        HostError::new(&self.text, kind)
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    /* ------------- validation ------------- */

    /// Validate, memoizing the outcome; the cached error is re-surfaced
    /// verbatim on later calls.
    pub fn validate(&self) -> Result<(), HostError> {
        {
            let st = self.state.read();
            if st.validated {
                return match &st.error {
                    Some(e) => Err(e.clone()),
                    None => Ok(()),
                };
            }
        }
        let mut st = self.state.write();
        self.validate_locked(&mut st)
    }

    fn validate_locked(&self, st: &mut HostState) -> Result<(), HostError> {
        if st.validated {
            return match &st.error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            };
        }
        st.validated = true;
        let result = self.do_validate(st);
        if let Err(e) = &result {
            st.error = Some(e.clone());
        }
        result
    }

    fn do_validate(&self, st: &mut HostState) -> Result<(), HostError> {
        if self.text.len() > MAX_LENGTH {
            return Err(self.error(HostErrorKind::InvalidLength));
        }
        let dot_count = self.text.matches(V4_SEPARATOR).count();
        if dot_count >= MAX_SEGMENTS {
            // normally covered by the length check, but consecutive
            // separators can pack more segments into fewer characters
            return Err(self.error(HostErrorKind::TooManySegments));
        }
        match self.match_labels() {
            None => {
                if self.text.is_empty() {
                    if !self.options.allow_empty {
                        return Err(self.error(HostErrorKind::InvalidFormat));
                    }
                    return Ok(());
                }
                let might_be_ipv6 = self.text.matches(V6_SEPARATOR).count() >= 2;
                if might_be_ipv6 {
                    let bytes = self.text.as_bytes();
                    let end = self.text.len() - 1;
                    if end > 1 && bytes[0] == b'[' && bytes[end] == b']' {
                        self.validate_ipv6_literal(st, &self.text[1..end], true)
                    } else if self.options.allow_unbracketed_ipv6 {
                        let text = self.text.clone();
                        self.validate_ipv6_literal(st, &text, false)
                    } else {
                        Err(self.error(HostErrorKind::InvalidFormat))
                    }
                } else if url_shaped(&self.text) {
                    Err(self.error(HostErrorKind::Url))
                } else {
                    Err(self.error(HostErrorKind::InvalidFormat))
                }
            }
            Some(labels) => {
                if NUMERIC_DOT_PATTERN.is_match(&self.text) {
                    // all-numeric-and-dots must be strict IPv4; 1.2.3.4.5
                    // is neither a host name nor an address
                    let ip = IpAddressString::new(&self.text);
                    match ip.validate_ipv4() {
                        Ok(()) => {
                            st.resolved = Some(ip.get_value());
                            st.addr = Some(ip);
                            Ok(())
                        }
                        Err(e) => Err(HostError::with_source(
                            &self.text,
                            HostErrorKind::InvalidFormat,
                            e,
                        )),
                    }
                } else {
                    st.labels = Some(labels);
                    Ok(())
                }
            }
        }
    }

    fn match_labels(&self) -> Option<Vec<String>> {
        if self.text.is_empty() {
            return None;
        }
        let labels: Vec<String> = self.text.split(V4_SEPARATOR).map(str::to_string).collect();
        if labels.iter().all(|l| LABEL_PATTERN.is_match(l)) {
            Some(labels)
        } else {
            None
        }
    }

    fn validate_ipv6_literal(
        &self,
        st: &mut HostState,
        addr_text: &str,
        bracketed: bool,
    ) -> Result<(), HostError> {
        let ip = IpAddressString::new(addr_text);
        match ip.validate_ipv6() {
            Err(e) => {
                // before settling on an invalid IPv6 literal, check for a URL
                if url_shaped(&self.text) {
                    Err(self.error(HostErrorKind::Url))
                } else {
                    Err(HostError::with_source(
                        &self.text,
                        HostErrorKind::InvalidFormat,
                        e,
                    ))
                }
            }
            Ok(()) => {
                // zones never combine with brackets, and unbracketed
                // zones need explicit opt-in
                if ip.has_zone() && (bracketed || !self.options.allow_zone) {
                    return Err(self.error(HostErrorKind::ZoneNotAllowed));
                }
                st.resolved = Some(ip.get_value());
                st.addr = Some(ip);
                Ok(())
            }
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.validate().is_err()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    pub fn is_ip_address(&self) -> bool {
        self.is_valid() && self.state.read().addr.is_some()
    }

    /// The address this host denotes, when it is an IP literal.
    pub fn as_address(&self) -> Option<IpAddress> {
        if !self.is_ip_address() {
            return None;
        }
        self.state.read().addr.as_ref().and_then(|a| a.get_value())
    }

    /// localhost (by name)
    pub fn is_local_host(&self) -> bool {
        self.is_valid() && self.text.eq_ignore_ascii_case("localhost")
    }

    /// `[::1]` or 127.0.0.1
    pub fn is_loopback(&self) -> bool {
        self.as_address().is_some_and(|a| a.is_loopback())
    }

    pub fn is_self(&self) -> bool {
        self.is_local_host() || self.is_loopback()
    }

    /// Whether this host stands for the local machine, by name or by
    /// resolving to a loopback address.
    pub fn resolves_to_self(&self) -> bool {
        self.is_self() || self.resolve().is_some_and(|a| a.is_loopback())
    }

    /* ------------- resolution ------------- */

    /// Resolve through the system resolver; see
    /// [`Host::resolve_with`].
    pub fn resolve(&self) -> Option<IpAddress> {
        self.resolve_with(&SystemResolver)
    }

    /**
    The address this host denotes: directly for an IP literal, through
    the given resolver for a host name. Best-effort by design: lookup
    failures are logged and swallowed to `None`. The first outcome is
    memoized, including "resolved to nothing".
    */
    pub fn resolve_with(&self, resolver: &dyn NameResolver) -> Option<IpAddress> {
        {
            let st = self.state.read();
            if let Some(resolved) = &st.resolved {
                return resolved.clone();
            }
        }
        let mut st = self.state.write();
        if let Some(resolved) = &st.resolved {
            return resolved.clone();
        }
        let result = self.resolve_locked(&mut st, resolver);
        st.resolved = Some(result.clone());
        result
    }

    fn resolve_locked(
        &self,
        st: &mut HostState,
        resolver: &dyn NameResolver,
    ) -> Option<IpAddress> {
        if let Err(e) = self.validate_locked(st) {
            debug!("not resolving invalid host: {e}");
            return None;
        }
        // empty host strings can be valid, but resolve to nothing
        if self.text.is_empty() {
            return None;
        }
        match resolver.lookup(&self.text) {
            Ok(addresses) => addresses.into_iter().next().map(IpAddress::from),
            Err(e) => {
                warn!("problem resolving host '{}' to an address: {e}", self.text);
                None
            }
        }
    }

    /* ------------- derived forms ------------- */

    /**
    The host without its domain: the leftmost label. IP-address hosts and
    single-label hosts come back whole; invalid hosts give `None`.
    */
    pub fn remove_domain(&self) -> Option<Host> {
        if !self.is_valid() {
            return None;
        }
        let (is_addr, first_label, label_count) = {
            let st = self.state.read();
            (
                st.addr.is_some(),
                st.labels.as_ref().and_then(|l| l.first().cloned()),
                st.labels.as_ref().map_or(0, Vec::len),
            )
        };
        if is_addr {
            return Some(self.clone());
        }
        let label = first_label?;
        if label_count == 1 {
            return Some(self.clone());
        }
        let host = Host::with_options(&label, self.options);
        {
            let mut seeded = host.state.write();
            seeded.labels = Some(vec![label.clone()]);
            seeded.reversed = Some(label);
            seeded.validated = true;
        }
        Some(host)
    }

    /// The labels in reverse order, matching the way they map to IP
    /// segments (`com.example.www`).
    pub fn to_reversed_domain_string(&self) -> Result<String, HostError> {
        {
            let st = self.state.read();
            if let Some(s) = &st.reversed {
                return Ok(s.clone());
            }
        }
        self.validate()?;
        let mut st = self.state.write();
        let reversed = match &st.labels {
            Some(labels) if !labels.is_empty() => {
                let mut parts: Vec<&str> = labels.iter().map(String::as_str).collect();
                parts.reverse();
                parts.join(".")
            }
            _ => self.text.clone(),
        };
        st.reversed = Some(reversed.clone());
        Ok(reversed)
    }

    pub fn to_normalized_labels(&self) -> Result<Vec<String>, HostError> {
        {
            let st = self.state.read();
            if let Some(labels) = &st.normalized_labels {
                return Ok(labels.clone());
            }
        }
        self.validate()?;
        let mut st = self.state.write();
        let normalized = match &st.labels {
            Some(labels) if !labels.is_empty() => {
                labels.iter().map(|l| self.normalize(l)).collect()
            }
            _ => vec![self.text.clone()],
        };
        st.normalized_labels = Some(normalized.clone());
        Ok(normalized)
    }

    fn normalize(&self, s: &str) -> String {
        if self.options.normalize_to_lowercase {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    }

    /// Canonical form: IPv6 literals become their bracketed canonical
    /// string, IPv4 its canonical string; invalid hosts stay as-is.
    pub fn to_canonical_string(&self) -> String {
        {
            let st = self.state.read();
            if let Some(s) = &st.canonical {
                return s.clone();
            }
        }
        let canonical = self.address_form(|a| a.to_canonical_string());
        self.state.write().canonical = Some(canonical.clone());
        canonical
    }

    /// Normalized form, consistent across spellings of the same host.
    pub fn to_normalized_string(&self) -> String {
        {
            let st = self.state.read();
            if let Some(s) = &st.normalized {
                return s.clone();
            }
        }
        let normalized = self.address_form(|a| a.to_normalized_string());
        self.state.write().normalized = Some(normalized.clone());
        normalized
    }

    fn address_form(&self, render: impl Fn(&IpAddress) -> String) -> String {
        if self.validate().is_err() {
            // invalid hosts are not normalized
            return self.text.clone();
        }
        let st = self.state.read();
        if let Some(addr) = &st.addr {
            // the address string was validated, so a value exists
            if let Some(value) = addr.get_value() {
                return if addr.is_ipv6() {
                    format!("[{}]", render(&value))
                } else {
                    render(&value)
                };
            }
        }
        self.normalize(&self.text)
    }
}

impl Clone for Host {
    fn clone(&self) -> Self {
        Host {
            text: self.text.clone(),
            options: self.options,
            state: RwLock::new(self.state.read().clone()),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").field("text", &self.text).finish()
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.to_normalized_string() == other.to_normalized_string()
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_normalized_string().hash(state);
    }
}

impl Ord for Host {
    /// IP-literal hosts order by address; named hosts by their reversed
    /// label sequence, then label count.
    fn cmp(&self, other: &Self) -> Ordering {
        let primary = if self.is_ip_address() && other.is_ip_address() {
            let a = self.state.read().addr.clone().unwrap();
            let b = other.state.read().addr.clone().unwrap();
            a.cmp(&b)
        } else {
            match (self.to_normalized_labels(), other.to_normalized_labels()) {
                (Ok(mine), Ok(theirs)) => {
                    let max = mine.len().min(theirs.len());
                    let mut result = Ordering::Equal;
                    for i in 1..=max {
                        result = mine[mine.len() - i].cmp(&theirs[theirs.len() - i]);
                        if result != Ordering::Equal {
                            break;
                        }
                    }
                    result.then(mine.len().cmp(&theirs.len()))
                }
                _ => {
                    let mine: String = self.to_normalized_string().chars().rev().collect();
                    let theirs: String = other.to_normalized_string().chars().rev().collect();
                    mine.cmp(&theirs)
                }
            }
        };
        primary.then_with(|| self.to_normalized_string().cmp(&other.to_normalized_string()))
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn host(s: &str) -> Host {
        Host::new(s)
    }

    fn valid(s: &str) -> bool {
        // validate twice to exercise the cache
        let h = host(s);
        let first = h.is_valid();
        assert_eq!(h.is_valid(), first);
        first
    }

    #[test]
    fn test_hostnames() {
        assert!(valid("www.abc.com"));
        assert!(valid("ab.cde.fgh.com"));
        assert!(valid("aB.cDE.fgh.COm"));
        assert!(valid("a9b.com"));
        assert!(valid("9ab.com"));
        assert!(valid("999.com"));
        assert!(valid("ab9.com9"));
        assert!(valid("xx.ab.com.xx"));
    }

    #[test]
    fn test_underscores_allowed_hyphen_edges_rejected() {
        assert!(valid("a_b.com"));
        assert!(valid("_ab.com"));
        assert!(valid("_ab_.com"));
        assert!(!valid("-ab-.com"));
        assert!(!valid("ab-.com"));
        assert!(!valid("-ab.com"));
        assert!(!valid("ab.-com"));
        assert!(!valid("ab.com-"));
        assert!(valid("ab-c.com"));
    }

    #[test]
    fn test_bad_characters() {
        assert!(!valid("a*b.com"));
        assert!(!valid("ab.co&m"));
        assert!(!valid("#.ab.com"));
        assert!(!valid("cd.ab.com.~"));
        assert!(!valid(""));
    }

    #[test]
    fn test_dots() {
        assert!(!valid(".as.b.com"));
        assert!(!valid("as.b.com."));
        assert!(!valid("as..b.com"));
        assert!(!valid("..as.b.com"));
        assert!(!valid("as.b.com.."));
    }

    #[test]
    fn test_label_length_limits() {
        // 63-char label is fine, 64 is not
        assert!(valid(
            "123-123456789-123456789-123456789-123456789-123456789-123456789.com"
        ));
        assert!(!valid(
            "1234-123456789-123456789-123456789-123456789-123456789-123456789.com"
        ));
    }

    #[test]
    fn test_total_length_limits() {
        let label49 = "0123456789-123456789-123456789-123456789-12345678";
        // 3 + 50*5 = 253 chars
        let ok = format!("a11-123456789-123456789-123456789-123456789-12345678.{label49}.{label49}.{label49}.{label49}9");
        assert_eq!(ok.len(), 253);
        assert!(valid(&ok));
        let too_long = format!("a222-123456789-123456789-123456789-123456789-12345678.{label49}.{label49}.{label49}.{label49}9");
        assert_eq!(too_long.len(), 254);
        assert!(!valid(&too_long));
    }

    #[test]
    fn test_segment_count_limits() {
        let fifty = "1.1.1.1.1.2.2.2.2.2.3.3.3.3.3.4.4.4.4.4.5.5.5.5.5.";
        // 127 segments in 252 chars
        let ok = format!("a.9.{fifty}{fifty}{fifty}{fifty}{}", &fifty[..fifty.len() - 1]);
        assert!(valid(&ok));
        // trailing dot
        let trailing = format!("a.8.{fifty}{fifty}{fifty}{fifty}{fifty}");
        assert!(!valid(&trailing));
        // 128 segments
        let too_many = format!("a.6.{fifty}{fifty}{fifty}{fifty}{fifty}8");
        assert!(!valid(&too_many));
    }

    #[test]
    fn test_all_numeric_hosts() {
        // an all-numeric host must be a strict IPv4 address
        assert!(valid("1.2.3.4"));
        assert!(valid("1.2.3.04"));
        assert!(!valid("999"));
        assert!(!valid("999.111"));
        assert!(!valid("1.2.3"));
        assert!(!valid("1.2.3.4.5"));
        assert!(!valid(
            "123.123456789.123456789.123456789.123456789.123456789.123456789.123"
        ));
        // numbers everywhere except the first label is a fine hostname
        assert!(valid(
            "aaa.123456789.123456789.123456789.123456789.123456789.123456789.123"
        ));
    }

    #[test]
    fn test_ipv6_literals() {
        assert!(valid("[a::b:c:d:1.2.3.4]"));
        assert!(valid("[2001:0000:1234:0000:0000:C1C0:ABCD:0876]"));
        assert!(valid("a:b::ccc"));
        assert!(valid("a:b:c:d:e:f:a:b"));
        assert!(!valid("a:b:com"));
        assert!(!valid("[1.2.3.4]")); // brackets are for IPv6 only
        // two colons are needed before a string is probed as IPv6
        assert!(!valid("a:b.com"));
    }

    #[test]
    fn test_zones_in_hosts() {
        // zones never combine with brackets
        assert!(!valid("[a::b:c:d:1.2.3.4%x]"));
        assert!(!valid("[2001:0000:1234:0000:0000:C1C0:ABCD:0876%x]"));
        // unbracketed zones need explicit opt-in
        assert!(!valid("a::b:c:d:1.2.3.4%x"));
        assert!(!valid("2001:0000:1234:0000:0000:C1C0:ABCD:0876%x"));
        let opts = HostOptions {
            allow_zone: true,
            ..HostOptions::DEFAULT
        };
        assert!(Host::with_options("a::b:c:d:1.2.3.4%x", opts).is_valid());
        let err = host("[a::b:c:d:1.2.3.4%x]").validate().unwrap_err();
        assert_eq!(err.kind, HostErrorKind::ZoneNotAllowed);
    }

    #[test]
    fn test_urls_rejected() {
        for url in ["http://1.2.3.4", "http://[a:a:a:a:b:b:b:b]", "http://a:a:a:a:b:b:b:b"] {
            let err = host(url).validate().unwrap_err();
            assert_eq!(err.kind, HostErrorKind::Url, "{url}");
        }
    }

    #[test]
    fn test_normalized_and_canonical() {
        assert_eq!(
            host("[A::b:c:d:1.2.03.4]").to_normalized_string(),
            "[a:0:0:b:c:d:102:304]"
        );
        assert_eq!(
            host("[2001:0000:1234:0000:0000:C1C0:ABCD:0876]").to_normalized_string(),
            "[2001:0:1234:0:0:c1c0:abcd:876]"
        );
        assert_eq!(host("1.2.3.04").to_normalized_string(), "1.2.3.4");
        assert_eq!(
            host("[A:0::c:d:1.2.03.4]").to_canonical_string(),
            "[a::c:d:102:304]"
        );
        assert_eq!(
            host("[2001:0000:1234:0000:0000:C1C0:ABCD:0876]").to_canonical_string(),
            "[2001:0:1234::c1c0:abcd:876]"
        );
        assert_eq!(host("1.2.3.04").to_canonical_string(), "1.2.3.4");
        // hostnames keep their case unless lowercasing is requested
        assert_eq!(host("WWW.ABC.COM").to_normalized_string(), "WWW.ABC.COM");
        let opts = HostOptions {
            normalize_to_lowercase: true,
            ..HostOptions::DEFAULT
        };
        assert_eq!(
            Host::with_options("WWW.AB-C.COM", opts).to_normalized_string(),
            "www.ab-c.com"
        );
        // invalid hosts are returned untouched
        assert_eq!(host("-ab.com").to_normalized_string(), "-ab.com");
    }

    #[test]
    fn test_literal_resolution() {
        // literals resolve to themselves without a resolver round-trip
        struct NeverResolver;
        impl NameResolver for NeverResolver {
            fn lookup(&self, _host: &str) -> io::Result<Vec<IpAddr>> {
                Err(io::Error::new(io::ErrorKind::Other, "no lookups in tests"))
            }
        }
        let resolved = host("9.32.237.26").resolve_with(&NeverResolver).unwrap();
        assert_eq!(resolved.to_canonical_string(), "9.32.237.26");
        let resolved = host("[a::b:c:d:1.2.3.4]").resolve_with(&NeverResolver).unwrap();
        assert_eq!(resolved.to_canonical_string(), "a::b:c:d:102:304");
        // failures are swallowed to None and memoized
        let named = host("ab.example.com");
        assert_eq!(named.resolve_with(&NeverResolver), None);
        assert_eq!(named.resolve_with(&NeverResolver), None);
        // invalid hosts resolve to nothing
        assert_eq!(host("1.2.3").resolve_with(&NeverResolver), None);
        assert_eq!(host("a::b%x").resolve_with(&NeverResolver), None);
    }

    #[test]
    fn test_stubbed_resolution() {
        struct FixedResolver(IpAddr);
        impl NameResolver for FixedResolver {
            fn lookup(&self, _host: &str) -> io::Result<Vec<IpAddr>> {
                Ok(vec![self.0])
            }
        }
        let h = host("sfoley1.guard.example.com");
        let resolver = FixedResolver("9.32.237.26".parse().unwrap());
        let resolved = h.resolve_with(&resolver).unwrap();
        assert_eq!(resolved.to_canonical_string(), "9.32.237.26");
        // the first resolution wins
        let other = FixedResolver("9.70.146.84".parse().unwrap());
        assert_eq!(h.resolve_with(&other).unwrap().to_canonical_string(), "9.32.237.26");
    }

    #[test]
    fn test_remove_domain() {
        let h = host("www.example.com").remove_domain().unwrap();
        assert_eq!(h.to_string(), "www");
        assert!(h.is_valid());
        let h = host("single").remove_domain().unwrap();
        assert_eq!(h.to_string(), "single");
        let h = host("1.2.3.4").remove_domain().unwrap();
        assert_eq!(h.to_string(), "1.2.3.4");
        assert!(host("-bad-.com").remove_domain().is_none());
    }

    #[test]
    fn test_reversed_and_labels() {
        assert_eq!(
            host("www.example.com").to_reversed_domain_string().unwrap(),
            "com.example.www"
        );
        assert_eq!(host("1.2.3.4").to_reversed_domain_string().unwrap(), "1.2.3.4");
        assert_eq!(
            host("www.example.com").to_normalized_labels().unwrap(),
            vec!["www", "example", "com"]
        );
    }

    #[test]
    fn test_self_detection() {
        assert!(host("localhost").is_local_host());
        assert!(host("LOCALHOST").is_local_host());
        assert!(host("127.0.0.1").is_loopback());
        assert!(host("[::1]").is_loopback());
        assert!(!host("128.0.0.1").is_loopback());
        assert!(host("localhost").resolves_to_self());
        assert!(host("127.0.0.1").resolves_to_self());
    }

    #[test]
    fn test_equality_and_ordering() {
        assert_eq!(host("1.2.3.04"), host("1.2.3.4"));
        assert_eq!(host("[a::b]"), host("[A:0::B]"));
        assert_ne!(host("a.com"), host("b.com"));

        let mut hosts = vec![host("b.example.com"), host("a.example.org"), host("z.example.com")];
        hosts.sort();
        let texts: Vec<String> = hosts.iter().map(|h| h.to_string()).collect();
        // reversed-label order groups by domain
        assert_eq!(texts, vec!["b.example.com", "z.example.com", "a.example.org"]);
    }
}
