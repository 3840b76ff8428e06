//! Expansion of `*_URL` keys into their URL components.
//!
//! Components are taken from the text as written: no case folding, no
//! percent-decoding, no default ports or paths. Relative references and
//! `host:port` shorthands are accepted.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::value::{EnvMap, Value};

const URL_SUFFIX: &str = "_URL";

/// Generic URI reference: scheme, authority, path, query, fragment.
static URI_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI reference pattern is valid")
});

/// `host:port` optionally followed by a path, with no `//`.
static HOST_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z0-9.\-]+):([0-9]+)(/[^?#]*)?$").expect("host:port pattern is valid")
});

/// For each key ending in `_URL`, append `_SCHEME`, `_HOST`, `_PORT`, `_USER`,
/// `_PASS`, `_PATH`, `_QUERY`, and `_FRAGMENT` siblings right after it.
///
/// Every scalar value gets all eight siblings; missing components are empty
/// strings and an explicit port is an integer. Table values get none.
pub(crate) fn expand_urls(env: EnvMap) -> EnvMap {
    let mut out = EnvMap::new();
    for (key, value) in env {
        let components = match (key.strip_suffix(URL_SUFFIX), &value) {
            (_, Value::Table(_)) => None,
            (Some(stem), scalar) => {
                let raw = scalar.to_env_string();
                Some((stem.to_string(), split_url(&raw).into_siblings()))
            }
            (None, _) => None,
        };

        if components.is_none() && key.ends_with(URL_SUFFIX) {
            debug!(key = %key, "Skipping URL expansion for a nested value");
        }
        out.insert(key, value);

        if let Some((stem, parts)) = components {
            for (suffix, part) in parts {
                out.insert(format!("{stem}_{suffix}"), part);
            }
        }
    }
    out
}

#[derive(Debug, Default, PartialEq, Eq)]
struct UrlParts<'a> {
    scheme: &'a str,
    user: &'a str,
    pass: &'a str,
    host: &'a str,
    port: Option<u16>,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

impl UrlParts<'_> {
    fn into_siblings(self) -> [(&'static str, Value); 8] {
        let text = |s: &str| Value::String(s.to_string());
        let port = self
            .port
            .map_or_else(|| text(""), |p| Value::Integer(i64::from(p)));
        [
            ("SCHEME", text(self.scheme)),
            ("HOST", text(self.host)),
            ("PORT", port),
            ("USER", text(self.user)),
            ("PASS", text(self.pass)),
            ("PATH", text(self.path)),
            ("QUERY", text(self.query)),
            ("FRAGMENT", text(self.fragment)),
        ]
    }
}

fn split_url(raw: &str) -> UrlParts<'_> {
    if let Some(caps) = HOST_PORT.captures(raw) {
        let (host, port, path) = (caps.get(1), caps.get(2), caps.get(3));
        return UrlParts {
            host: host.map_or("", |m| m.as_str()),
            port: port.and_then(|m| m.as_str().parse().ok()),
            path: path.map_or("", |m| m.as_str()),
            ..UrlParts::default()
        };
    }

    let Some(caps) = URI_REFERENCE.captures(raw) else {
        return UrlParts::default();
    };
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let mut parts = UrlParts {
        scheme: group(1),
        path: group(3),
        query: group(4),
        fragment: group(5),
        ..UrlParts::default()
    };
    if let Some(authority) = caps.get(2) {
        split_authority(authority.as_str(), &mut parts);
    }
    parts
}

/// `[user[:pass]@]host[:port]`, where host may be a bracketed IPv6 literal.
fn split_authority<'a>(authority: &'a str, parts: &mut UrlParts<'a>) {
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, rest)) => {
            match userinfo.split_once(':') {
                Some((user, pass)) => {
                    parts.user = user;
                    parts.pass = pass;
                }
                None => parts.user = userinfo,
            }
            rest
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => (&host_port[..=end], host_port[end + 1..].strip_prefix(':')),
            None => (host_port, None),
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    parts.host = host;
    parts.port = port.and_then(|p| p.parse().ok());
}
