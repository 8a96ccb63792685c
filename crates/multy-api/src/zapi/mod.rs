// ZAPI client modules
//
// Hand-written client for the router's `/zapi` endpoint: NETCONF-style
// `rpc` / `get-config` / `edit-config` requests carried as JSON, wrapped in
// the `{ "rpc-reply": { result, data: [...] } }` envelope. Each subsystem's
// operations live in their own file as inherent methods on `MultyClient`.

pub mod client;
pub mod envelope;
pub mod reply;
pub mod session;

pub mod devices;
pub mod easy_setup;
pub mod firewall;
pub mod firmware;
pub mod mesh;
pub mod nat;
pub mod parental;
pub mod speed_test;
pub mod system;

pub use client::MultyClient;
pub use envelope::Operation;

/// Path of the single ZAPI endpoint on the router.
pub const ZAPI_PATH: &str = "/zapi";

/// Namespace of the outer `rpc` frame.
pub const NETCONF_XMLNS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

/// Data-model namespaces addressed by the client.
pub mod ns {
    pub const AUTH: &str = "urn:zyxel:cpe:system:authentication";
    pub const SYSTEM: &str = "urn:zyxel:cpe:system:zyxel-system";
    pub const EASY123: &str = "urn:zyxel:cpe:system:zyxel-system-easy123";
    pub const SPEED_TEST: &str = "urn:zyxel:cpe:system:zyxel-system-speed-test";
    pub const FIRMWARE: &str = "urn:zyxel:cpe:system:zyxel-system-firmware-upgrade";
    pub const NETWORK_DEVICE: &str = "urn:zyxel:cpe:system:zyxel-system-network-device";
    pub const WIFI_SYSTEM: &str = "urn:zyxel:cpe:system:zyxel-system-wifi-system";
    pub const PARENTAL: &str = "urn:zyxel:cpe:applications:zyxel-applications-parental-control";
    pub const NAT_GENERAL: &str = "urn:zyxel:cpe:applications:zyxel-applications-nat-general";
    pub const FIREWALL_V4: &str = "urn:zyxel:cpe:applications:zyxel-applications-ipv4-firewall";
}

/// Router error codes with a known meaning.
pub mod codes {
    /// Access denied: the token is missing, wrong or expired.
    pub const ACCESS_DENIED: &str = "2002";
    /// The request body could not be parsed by the router.
    pub const PARSE_REQUEST: &str = "4143";
    /// A `get-config` filter lacked the empty `<root>: {}` entry.
    pub const FILTER_MISSING_ROOT: &str = "5156";
}
