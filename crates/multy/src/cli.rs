//! Clap derive structures for the `multy` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// multy -- manage Zyxel Multy mesh routers over ZAPI
#[derive(Debug, Parser)]
#[command(
    name = "multy",
    version,
    about = "Manage Zyxel Multy mesh routers from the command line",
    long_about = "Talks to the router's /zapi endpoint: system state, Wi-Fi,\n\
        speed tests, connected devices, port forwarding, parental control,\n\
        mesh nodes and online firmware upgrades.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "MULTY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router address or base URL (overrides profile)
    #[arg(long, short = 'H', env = "MULTY_HOST", global = true)]
    pub host: Option<String>,

    /// Login name (overrides profile)
    #[arg(long, short = 'u', env = "MULTY_USERNAME", global = true, hide_env = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MULTY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept the router's self-signed TLS certificate
    #[arg(long, short = 'k', env = "MULTY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MULTY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Where the session token is sent (overrides profile)
    #[arg(long, value_enum, global = true)]
    pub token_placement: Option<PlacementArg>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlacementArg {
    /// Header when the router sets a sysauth cookie, cookie otherwise
    Auto,
    /// ZAPI_TOKEN request header
    Header,
    /// ZAPI_TOKEN cookie
    Cookie,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LedArg {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Tcp,
    Udp,
    All,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Router identity, health and power actions
    #[command(alias = "sys")]
    System(SystemArgs),

    /// Wi-Fi and internet connectivity
    #[command(alias = "w")]
    Wifi(WifiArgs),

    /// Run and inspect WAN speed tests
    #[command(alias = "st")]
    Speedtest(SpeedtestArgs),

    /// Clients known to the router
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Port forwarding rules
    Nat(NatArgs),

    /// Parental control profiles
    Parental(ParentalArgs),

    /// Mesh satellite nodes
    Mesh(MeshArgs),

    /// Online firmware check, download and upgrade
    #[command(alias = "fw")]
    Firmware(FirmwareArgs),

    /// Send a raw ZAPI request
    Raw(RawArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── System ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Model, serial number and firmware identity
    Info,
    /// Uptime, CPU and memory usage
    State,
    /// ZAPI version supported by the firmware
    Version,
    /// Current WAN throughput
    Bandwidth,
    /// Link state of the physical ports
    Ports,
    /// Reboot the router
    Restart,
    /// Power the router off
    Shutdown,
    /// Send a wake-on-LAN magic packet
    Wol {
        /// Target MAC address
        mac: String,
    },
}

// ── Wi-Fi ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WifiArgs {
    #[command(subcommand)]
    pub command: WifiCommand,
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// WAN link and internet reachability
    Status,
    /// Show the configuration of a Wi-Fi network
    Show {
        /// Network to show
        #[arg(long, short = 'n', default_value = "main")]
        network: String,
    },
    /// Change SSIDs or the passphrase
    Set {
        #[arg(long, short = 'n', default_value = "main")]
        network: String,
        /// SSID (2.4 GHz, or both bands when unified)
        #[arg(long)]
        ssid: Option<String>,
        /// SSID for the 5 GHz band
        #[arg(long = "ssid-5g")]
        ssid_5g: Option<String>,
        /// Prompt for a new passphrase
        #[arg(long)]
        password: bool,
    },
}

// ── Speed test ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SpeedtestArgs {
    #[command(subcommand)]
    pub command: SpeedtestCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpeedtestCommand {
    /// Start a speed test
    Start,
    /// Result of the latest test
    Result,
    /// Past results
    History,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List every device the router has seen
    #[command(alias = "ls")]
    List,
    /// Traffic counters per device
    Stats,
    /// Give a device a friendly name
    Rename {
        /// Device id as reported by `devices list`
        id: String,
        name: String,
    },
    /// Block internet access for a device
    Block {
        mac: String,
        /// Block duration in minutes (0 = until unblocked)
        #[arg(long, short = 'm', default_value = "0")]
        minutes: u32,
    },
    /// Remove a block rule
    Unblock {
        /// Rule index
        index: String,
    },
}

// ── NAT ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NatArgs {
    #[command(subcommand)]
    pub command: NatCommand,
}

#[derive(Debug, Subcommand)]
pub enum NatCommand {
    /// Add a port forwarding rule
    Add {
        /// Service name
        #[arg(long)]
        service: String,
        #[arg(long, value_enum, default_value = "tcp")]
        protocol: ProtocolArg,
        #[arg(long)]
        external_port: u16,
        /// Last port of an external port range
        #[arg(long)]
        external_port_end: Option<u16>,
        #[arg(long)]
        internal_port: u16,
        /// LAN address to forward to
        #[arg(long)]
        local_ip: String,
    },
    /// Remove a port forwarding rule
    Remove {
        /// Rule index
        index: u32,
    },
}

// ── Parental control ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ParentalArgs {
    #[command(subcommand)]
    pub command: ParentalCommand,
}

#[derive(Debug, Subcommand)]
pub enum ParentalCommand {
    /// Block internet access for a profile
    Block { profile: String },
    /// Lift the block on a profile
    Unblock { profile: String },
    /// Grant extra minutes to a profile
    Bonus { profile: String, minutes: u32 },
}

// ── Mesh ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MeshArgs {
    #[command(subcommand)]
    pub command: MeshCommand,
}

#[derive(Debug, Subcommand)]
pub enum MeshCommand {
    /// State of every mesh node
    #[command(alias = "ls")]
    List,
    /// Reboot a mesh node
    Restart { mac: String },
    /// Switch a node's status LED
    Led {
        mac: String,
        #[arg(value_enum)]
        state: LedArg,
        /// Brightness level (defaults to 100 when on, 0 when off)
        #[arg(long, short = 'b')]
        brightness: Option<u8>,
    },
    /// Rename a mesh node
    Rename { mac: String, name: String },
}

// ── Firmware ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FirmwareArgs {
    #[command(subcommand)]
    pub command: FirmwareCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirmwareCommand {
    /// Look for a newer firmware online
    Check,
    /// Progress of the online check
    CheckStatus,
    /// Download the new firmware
    Download,
    /// Progress of the download
    DownloadStatus,
    /// Flash the downloaded firmware (the router reboots)
    Upgrade,
    /// Progress of the upgrade
    UpgradeStatus,
}

// ── Raw ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RawArgs {
    #[command(subcommand)]
    pub command: RawCommand,
}

#[derive(Debug, Subcommand)]
pub enum RawCommand {
    /// Issue an `rpc` and print its payload
    Rpc {
        /// Namespace URN
        namespace: String,
        root: String,
        /// JSON payload placed under the root
        #[arg(long)]
        payload: Option<String>,
    },
    /// Read a running configuration subtree
    GetConfig { namespace: String, root: String },
    /// Write a running configuration subtree
    EditConfig {
        namespace: String,
        root: String,
        #[arg(long)]
        payload: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile
    Init,
    /// Display the current configuration (secrets masked)
    Show,
    /// Print the config file path
    Path,
    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
