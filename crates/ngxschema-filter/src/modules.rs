//! # Module Table
//!
//! Known nginx modules and what must be present for each to be built.
//! `mail_*` and `stream_*` modules hang off their family's core module,
//! which itself must be requested by name.

/// Modules built by `./configure` without extra flags.
pub const DEFAULT_GROUP: &str = "@default";

/// Modules enabled with `--with-*` flags.
pub const OPTIONAL_GROUP: &str = "@optional";

/// Modules only available in the commercial subscription.
pub const COMMERCIAL_GROUP: &str = "@commercial";

/// A module and its prerequisites (module names or groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: &'static str,
    pub depends_on: &'static [&'static str],
}

const fn module(name: &'static str, depends_on: &'static [&'static str]) -> ModuleSpec {
    ModuleSpec { name, depends_on }
}

/// Every module the filter knows about, by family.
pub const MODULES: &[ModuleSpec] = &[
    module("http_core", &[DEFAULT_GROUP]),
    module("http_access", &[DEFAULT_GROUP]),
    module("http_addition", &[OPTIONAL_GROUP]),
    module("http_auth_basic", &[DEFAULT_GROUP]),
    module("http_auth_jwt", &[COMMERCIAL_GROUP]),
    module("http_auth_request", &[OPTIONAL_GROUP]),
    module("http_autoindex", &[DEFAULT_GROUP]),
    module("http_browser", &[DEFAULT_GROUP]),
    module("http_charset", &[DEFAULT_GROUP]),
    module("http_dav", &[OPTIONAL_GROUP]),
    module("http_empty_gif", &[DEFAULT_GROUP]),
    module("http_f4f", &[COMMERCIAL_GROUP]),
    module("http_fastcgi", &[DEFAULT_GROUP]),
    module("http_flv", &[OPTIONAL_GROUP]),
    module("http_geo", &[DEFAULT_GROUP]),
    module("http_geoip", &[OPTIONAL_GROUP]),
    module("http_grpc", &["http_v2"]),
    module("http_gunzip", &[OPTIONAL_GROUP]),
    module("http_gzip_static", &[OPTIONAL_GROUP]),
    module("http_gzip", &[DEFAULT_GROUP]),
    module("http_headers", &[DEFAULT_GROUP]),
    module("http_hls", &[COMMERCIAL_GROUP]),
    module("http_image_filter", &[OPTIONAL_GROUP]),
    module("http_index", &[DEFAULT_GROUP]),
    module("http_internal_redirect", &[COMMERCIAL_GROUP]),
    module("http_js", &[OPTIONAL_GROUP]),
    module("http_keyval", &[COMMERCIAL_GROUP]),
    module("http_limit_conn", &[DEFAULT_GROUP]),
    module("http_limit_req", &[DEFAULT_GROUP]),
    module("http_log", &[DEFAULT_GROUP]),
    module("http_map", &[DEFAULT_GROUP]),
    module("http_memcached", &[DEFAULT_GROUP]),
    module("http_mirror", &[DEFAULT_GROUP]),
    module("http_mp4", &[OPTIONAL_GROUP]),
    module("http_perl", &[OPTIONAL_GROUP]),
    module("http_proxy", &[DEFAULT_GROUP]),
    module("http_random_index", &[OPTIONAL_GROUP]),
    module("http_realip", &[OPTIONAL_GROUP]),
    module("http_referer", &[DEFAULT_GROUP]),
    module("http_rewrite", &[DEFAULT_GROUP]),
    module("http_scgi", &[DEFAULT_GROUP]),
    module("http_secure_link", &[OPTIONAL_GROUP]),
    module("http_session_log", &[COMMERCIAL_GROUP]),
    module("http_slice", &[OPTIONAL_GROUP]),
    module("http_split_clients", &[DEFAULT_GROUP]),
    module("http_ssi", &[DEFAULT_GROUP]),
    module("http_ssl", &[DEFAULT_GROUP]),
    module("http_status", &[DEFAULT_GROUP]),
    module("http_stub_status", &[OPTIONAL_GROUP]),
    module("http_sub", &[OPTIONAL_GROUP]),
    module("http_upstream_conf", &[DEFAULT_GROUP]),
    module("http_upstream_hc", &[COMMERCIAL_GROUP]),
    module("http_upstream", &[DEFAULT_GROUP]),
    module("http_userid", &[DEFAULT_GROUP]),
    module("http_uwsgi", &[DEFAULT_GROUP]),
    module("http_v2", &[OPTIONAL_GROUP]),
    module("http_v3", &[OPTIONAL_GROUP]),
    module("http_xslt", &[OPTIONAL_GROUP]),

    module("mail_core", &["mail_core"]),
    module("mail_auth_http", &["mail_core"]),
    module("mail_imap", &["mail_core"]),
    module("mail_pop3", &["mail_core"]),
    module("mail_proxy", &["mail_core"]),
    module("mail_realip", &["mail_core"]),
    module("mail_smtp", &["mail_core"]),
    module("mail_ssl", &["mail_core"]),

    module("stream_core", &["stream_core"]),
    module("stream_access", &["stream_core"]),
    module("stream_geo", &["stream_core"]),
    module("stream_geoip", &["stream_core", OPTIONAL_GROUP]),
    module("stream_js", &["stream_core", OPTIONAL_GROUP]),
    module("stream_keyval", &["stream_core", COMMERCIAL_GROUP]),
    module("stream_limit_conn", &["stream_core"]),
    module("stream_log", &["stream_core"]),
    module("stream_map", &["stream_core"]),
    module("stream_mqtt_filter", &["stream_core", COMMERCIAL_GROUP]),
    module("stream_mqtt_preread", &["stream_core", COMMERCIAL_GROUP]),
    module("stream_pass", &["stream_core"]),
    module("stream_proxy", &["stream_core"]),
    module("stream_realip", &["stream_core", OPTIONAL_GROUP]),
    module("stream_return", &["stream_core"]),
    module("stream_set", &["stream_core"]),
    module("stream_split_clients", &["stream_core"]),
    module("stream_ssl_preread", &["stream_core", OPTIONAL_GROUP]),
    module("stream_ssl", &["stream_core"]),
    module("stream_upstream_hc", &["stream_core", COMMERCIAL_GROUP]),
    module("stream_upstream", &["stream_core"]),
    module("stream_zone_sync", &["stream_core", COMMERCIAL_GROUP]),
];

/// True for group names such as `@default`.
pub fn is_group(name: &str) -> bool {
    name.starts_with('@')
}

/// Prerequisites of `name`, or `None` for a module missing from the table.
pub fn prerequisites(name: &str) -> Option<&'static [&'static str]> {
    MODULES.iter().find(|m| m.name == name).map(|m| m.depends_on)
}
