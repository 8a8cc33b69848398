//! Fire-and-forget analytics interface.

/// Sink for SDK usage events.
///
/// Implementations must never block or fail the calling operation; events
/// are best-effort.
pub trait AnalyticsSink: Send + Sync {
    /// Record `event` with its properties.
    fn track(&self, event: &str, properties: serde_json::Value);
}

/// Discards every event. This is the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &str, _properties: serde_json::Value) {}
}

/// Event emitted when a full 3D node is generated.
pub const EVENT_NODE_REQUESTED: &str = "3D Node Requested";

/// Event emitted when a face-filter node is generated.
pub const EVENT_FACE_FILTER_REQUESTED: &str = "Face Filter Node Requested";
