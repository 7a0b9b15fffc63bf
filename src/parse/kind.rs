//! Node kinds and the node registry metadata attached to them.
//!
//! The wire format is the dotted type key (`control.start`, `data.transform`, ...).
//! Keys this build does not know about are kept as `NodeKind::Other` so that
//! definitions written by a newer editor still load and round-trip unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Input,
    Control,
    Data,
    Output,
    Temporal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    // Entry
    Start,

    // Triggers
    DeviceState,
    DeviceConnect,
    DeviceDisconnect,
    DeviceInactive,
    Endpoint,
    DataTable,
    Event,
    GooglePubSub,
    Mqtt,
    Particle,
    VirtualButton,
    Webhook,

    // Logic & control
    End,
    If,
    Parallel,
    Debug,
    ValidateData,
    Timer,
    Signal,

    // Data
    ReadQueue,
    FinalizeQueue,
    ExtractMetadata,
    Transform,
    MtChannelHealth,
    MachineHealth,
    MachineStatusCalc,
    FactoryStatusCalc,
    HealthToLineProtocol,
    RealtimeToLineProtocol,

    // Output
    CacheRealtimeState,
    TdEngine,
    SupabaseValidationErrors,
    MtFeatureStatus,
    SupabaseStatus,

    // Temporal
    Activity,
    ChildWorkflow,

    /// A type key not known to this build.
    Other(String),
}

/// Every known kind, in palette order.
pub const KNOWN_KINDS: &[NodeKind] = &[
    NodeKind::Start,
    NodeKind::DeviceState,
    NodeKind::DeviceConnect,
    NodeKind::DeviceDisconnect,
    NodeKind::DeviceInactive,
    NodeKind::Endpoint,
    NodeKind::DataTable,
    NodeKind::Event,
    NodeKind::GooglePubSub,
    NodeKind::Mqtt,
    NodeKind::Particle,
    NodeKind::VirtualButton,
    NodeKind::Webhook,
    NodeKind::End,
    NodeKind::If,
    NodeKind::Parallel,
    NodeKind::Debug,
    NodeKind::ValidateData,
    NodeKind::Timer,
    NodeKind::Signal,
    NodeKind::ReadQueue,
    NodeKind::FinalizeQueue,
    NodeKind::ExtractMetadata,
    NodeKind::Transform,
    NodeKind::MtChannelHealth,
    NodeKind::MachineHealth,
    NodeKind::MachineStatusCalc,
    NodeKind::FactoryStatusCalc,
    NodeKind::HealthToLineProtocol,
    NodeKind::RealtimeToLineProtocol,
    NodeKind::CacheRealtimeState,
    NodeKind::TdEngine,
    NodeKind::SupabaseValidationErrors,
    NodeKind::MtFeatureStatus,
    NodeKind::SupabaseStatus,
    NodeKind::Activity,
    NodeKind::ChildWorkflow,
];

impl NodeKind {
    /// The dotted type key used on the wire.
    pub fn type_key(&self) -> &str {
        match self {
            NodeKind::Start => "control.start",
            NodeKind::DeviceState => "trigger.device_state",
            NodeKind::DeviceConnect => "trigger.device_connect",
            NodeKind::DeviceDisconnect => "trigger.device_disconnect",
            NodeKind::DeviceInactive => "trigger.device_inactive",
            NodeKind::Endpoint => "trigger.endpoint",
            NodeKind::DataTable => "trigger.data_table",
            NodeKind::Event => "trigger.event",
            NodeKind::GooglePubSub => "trigger.google_pubsub",
            NodeKind::Mqtt => "trigger.mqtt",
            NodeKind::Particle => "trigger.particle",
            NodeKind::VirtualButton => "trigger.virtual_button",
            NodeKind::Webhook => "trigger.webhook",
            NodeKind::End => "control.end",
            NodeKind::If => "control.if",
            NodeKind::Parallel => "control.parallel",
            NodeKind::Debug => "control.debug",
            NodeKind::ValidateData => "control.validate_data",
            NodeKind::Timer => "control.timer",
            NodeKind::Signal => "control.signal",
            NodeKind::ReadQueue => "data.read_queue",
            NodeKind::FinalizeQueue => "data.finalize_queue",
            NodeKind::ExtractMetadata => "data.extract_metadata",
            NodeKind::Transform => "data.transform",
            NodeKind::MtChannelHealth => "data.mtchannel_health",
            NodeKind::MachineHealth => "data.machine_health",
            NodeKind::MachineStatusCalc => "data.machine_status_calc",
            NodeKind::FactoryStatusCalc => "data.factory_status_calc",
            NodeKind::HealthToLineProtocol => "data.health_to_line_protocol",
            NodeKind::RealtimeToLineProtocol => "data.realtime_to_line_protocol",
            NodeKind::CacheRealtimeState => "output.cache_realtime_state",
            NodeKind::TdEngine => "output.tdengine",
            NodeKind::SupabaseValidationErrors => "output.supabase_validation_errors",
            NodeKind::MtFeatureStatus => "output.mt_feature_status",
            NodeKind::SupabaseStatus => "output.supabase_status",
            NodeKind::Activity => "temporal.activity",
            NodeKind::ChildWorkflow => "temporal.child_workflow",
            NodeKind::Other(key) => key,
        }
    }

    pub fn from_type_key(key: &str) -> Self {
        KNOWN_KINDS
            .iter()
            .find(|k| k.type_key() == key)
            .cloned()
            .unwrap_or_else(|| NodeKind::Other(key.to_string()))
    }

    /// Palette category. Unknown kinds have none.
    pub fn category(&self) -> Option<NodeCategory> {
        use NodeKind::*;
        let category = match self {
            Start | DeviceState | DeviceConnect | DeviceDisconnect | DeviceInactive | Endpoint
            | DataTable | Event | GooglePubSub | Mqtt | Particle | VirtualButton | Webhook => {
                NodeCategory::Input
            }
            End | If | Parallel | Debug | ValidateData => NodeCategory::Control,
            ReadQueue | FinalizeQueue | ExtractMetadata | Transform | MtChannelHealth
            | MachineHealth | MachineStatusCalc | FactoryStatusCalc | HealthToLineProtocol
            | RealtimeToLineProtocol => NodeCategory::Data,
            CacheRealtimeState | TdEngine | SupabaseValidationErrors | MtFeatureStatus
            | SupabaseStatus => NodeCategory::Output,
            Activity | Timer | Signal | ChildWorkflow => NodeCategory::Temporal,
            Other(_) => return None,
        };
        Some(category)
    }

    /// Human-readable name shown in the node palette.
    pub fn display_name(&self) -> &str {
        match self {
            NodeKind::Start => "Workflow Start",
            NodeKind::DeviceState => "Device: State",
            NodeKind::DeviceConnect => "Device: Connect",
            NodeKind::DeviceDisconnect => "Device: Disconnect",
            NodeKind::DeviceInactive => "Device: Inactive",
            NodeKind::Endpoint => "Endpoint",
            NodeKind::DataTable => "Data Table",
            NodeKind::Event => "Event",
            NodeKind::GooglePubSub => "Google Pub/Sub",
            NodeKind::Mqtt => "MQTT",
            NodeKind::Particle => "Particle",
            NodeKind::VirtualButton => "Virtual Button",
            NodeKind::Webhook => "Webhook",
            NodeKind::End => "Workflow End",
            NodeKind::If => "Conditional",
            NodeKind::Parallel => "Parallel Exec",
            NodeKind::Debug => "Debug",
            NodeKind::ValidateData => "Validate Data",
            NodeKind::Timer => "Wait Timer",
            NodeKind::Signal => "Signal Wait",
            NodeKind::ReadQueue => "Read Queue",
            NodeKind::FinalizeQueue => "Finalize Queue",
            NodeKind::ExtractMetadata => "Extract Metadata",
            NodeKind::Transform => "Transform",
            NodeKind::MtChannelHealth => "MTChannel Health",
            NodeKind::MachineHealth => "Machine Health",
            NodeKind::MachineStatusCalc => "Machine Status",
            NodeKind::FactoryStatusCalc => "Factory Status",
            NodeKind::HealthToLineProtocol => "HealthToLineProtocol",
            NodeKind::RealtimeToLineProtocol => "RealtimeToLineProtocol",
            NodeKind::CacheRealtimeState => "Cache State",
            NodeKind::TdEngine => "TDengine",
            NodeKind::SupabaseValidationErrors => "Supabase Validation Errors",
            NodeKind::MtFeatureStatus => "MTFeature State",
            NodeKind::SupabaseStatus => "Machine/Factory State",
            NodeKind::Activity => "Temporal Activity",
            NodeKind::ChildWorkflow => "Child Workflow",
            NodeKind::Other(key) => key,
        }
    }

    /// Kinds that compile to an activity invocation.
    pub fn is_activity(&self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Activity
                | ValidateData
                | ReadQueue
                | FinalizeQueue
                | ExtractMetadata
                | Transform
                | MtChannelHealth
                | MachineHealth
                | MachineStatusCalc
                | FactoryStatusCalc
                | HealthToLineProtocol
                | RealtimeToLineProtocol
                | CacheRealtimeState
                | TdEngine
                | SupabaseValidationErrors
                | MtFeatureStatus
                | SupabaseStatus
        )
    }

    pub fn is_trigger(&self) -> bool {
        self.type_key().starts_with("trigger.")
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, NodeKind::If)
    }
}

/// One palette entry, as handed to the editor and printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub type_key: String,
    pub display_name: String,
    pub category: NodeCategory,
    pub compiles_to_activity: bool,
}

/// The node registry, in palette order.
pub fn registry() -> Vec<RegistryEntry> {
    KNOWN_KINDS
        .iter()
        .filter_map(|kind| {
            Some(RegistryEntry {
                type_key: kind.type_key().to_string(),
                display_name: kind.display_name().to_string(),
                category: kind.category()?,
                compiles_to_activity: kind.is_activity(),
            })
        })
        .collect()
}

impl From<String> for NodeKind {
    fn from(key: String) -> Self {
        NodeKind::from_type_key(&key)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(key) => key,
            known => known.type_key().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_key())
    }
}
