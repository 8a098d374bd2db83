//! Origin-filtered fault channel.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::log::{FaultEntry, RuntimeFaultLog};
use super::message::{FaultEnvelope, InboundMessage};
use crate::host::ContextId;
use crate::pipeline::{Observers, PreviewEvent};

/// How faults from superseded renders are treated.
///
/// A frame keeps its identity across renders, so origin filtering alone
/// cannot tell a fault scheduled by the previous document from one raised
/// by the current document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleFaultPolicy {
    /// Accept any fault from the assigned context. A late fault from a
    /// superseded render may be attributed to the current one.
    #[default]
    Lenient,
    /// Tag envelopes with the render generation and drop mismatches.
    /// Untagged envelopes are still accepted.
    RejectStale,
}

impl StaleFaultPolicy {
    /// Whether the preamble should carry a generation tag.
    #[inline]
    pub fn tags_generation(self) -> bool {
        matches!(self, Self::RejectStale)
    }
}

/// Verdict for a delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Appended to the fault log.
    Accepted,
    /// No execution context is currently assigned.
    NoContext,
    /// The message did not come from the assigned context.
    ForeignOrigin,
    /// The message is not a runtime-error envelope.
    NotAFault,
    /// The envelope belongs to a superseded generation.
    Stale,
}

#[derive(Debug, Default)]
struct Target {
    context: Option<ContextId>,
    generation: u64,
}

/// Inbound message handler for the preview surface.
///
/// Created once per [`RenderController`](crate::RenderController) and kept
/// for its whole lifetime. The platform forwards every message it receives
/// to [`deliver`](Self::deliver); the bridge appends the ones that pass the
/// origin and kind filters to the shared [`RuntimeFaultLog`].
///
/// # Example
///
/// ```ignore
/// let bridge = controller.fault_bridge();
/// // Wire into the platform's message listener
/// window.on_message(move |msg| { bridge.deliver(&msg); });
/// ```
#[derive(Debug, Clone)]
pub struct FaultBridge {
    target: Arc<Mutex<Target>>,
    log: Arc<RuntimeFaultLog>,
    observers: Observers,
    policy: StaleFaultPolicy,
}

impl FaultBridge {
    /// Create a bridge writing into `log`.
    pub fn new(log: Arc<RuntimeFaultLog>, policy: StaleFaultPolicy) -> Self {
        Self::with_observers(log, policy, Observers::new())
    }

    pub(crate) fn with_observers(
        log: Arc<RuntimeFaultLog>,
        policy: StaleFaultPolicy,
        observers: Observers,
    ) -> Self {
        Self {
            target: Arc::new(Mutex::new(Target::default())),
            log,
            observers,
            policy,
        }
    }

    /// Accept messages from `context`, produced by render `generation`.
    pub fn attach(&self, context: ContextId, generation: u64) {
        let mut target = self.target.lock();
        target.context = Some(context);
        target.generation = generation;
    }

    /// Stop accepting messages until the next [`attach`](Self::attach).
    pub fn detach(&self) {
        self.target.lock().context = None;
    }

    /// Currently accepted context.
    pub fn context(&self) -> Option<ContextId> {
        self.target.lock().context
    }

    /// Stale-fault policy in effect.
    #[inline]
    pub fn policy(&self) -> StaleFaultPolicy {
        self.policy
    }

    /// The log this bridge appends to.
    #[inline]
    pub fn log(&self) -> &Arc<RuntimeFaultLog> {
        &self.log
    }

    /// Handle one inbound message.
    pub fn deliver(&self, message: &InboundMessage) -> Delivery {
        let verdict = self.filter(message);
        match verdict {
            Ok(envelope) => {
                let entry = FaultEntry::new(envelope.error, envelope.generation);
                let total = self.log.push(entry.clone());
                trace!(total, message = %entry.message, "runtime fault");
                self.observers.notify(&PreviewEvent::FaultAppended { entry, total });
                Delivery::Accepted
            }
            Err(dropped) => {
                debug!(?dropped, source = ?message.source, "dropped inbound message");
                dropped
            }
        }
    }

    fn filter(&self, message: &InboundMessage) -> Result<FaultEnvelope, Delivery> {
        let (context, generation) = {
            let target = self.target.lock();
            (target.context, target.generation)
        };

        let Some(context) = context else {
            return Err(Delivery::NoContext);
        };
        if message.source != Some(context) {
            return Err(Delivery::ForeignOrigin);
        }

        let envelope = FaultEnvelope::from_value(&message.data)
            .filter(FaultEnvelope::is_fault)
            .ok_or(Delivery::NotAFault)?;

        if self.policy == StaleFaultPolicy::RejectStale
            && envelope.generation.is_some_and(|g| g != generation)
        {
            return Err(Delivery::Stale);
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FRAME: ContextId = ContextId(1);

    fn bridge(policy: StaleFaultPolicy) -> FaultBridge {
        let bridge = FaultBridge::new(Arc::new(RuntimeFaultLog::new()), policy);
        bridge.attach(FRAME, 1);
        bridge
    }

    fn fault(error: &str) -> InboundMessage {
        InboundMessage::fault(FRAME, &FaultEnvelope::runtime_error(error))
    }

    #[test]
    fn test_foreign_origin_dropped() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        let spoofed = InboundMessage::fault(ContextId(99), &FaultEnvelope::runtime_error("spoof"));

        assert_eq!(bridge.deliver(&spoofed), Delivery::ForeignOrigin);
        let anonymous = InboundMessage {
            source: None,
            data: json!({ "type": "runtime-error", "error": "anon" }),
        };
        assert_eq!(bridge.deliver(&anonymous), Delivery::ForeignOrigin);
        assert!(bridge.log().is_empty());
    }

    #[test]
    fn test_arrival_order() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        // Second fault happened first inside the frame but arrives later.
        assert_eq!(bridge.deliver(&fault("Error: late (line 9, col 1)")), Delivery::Accepted);
        assert_eq!(bridge.deliver(&fault("Error: early (line 1, col 1)")), Delivery::Accepted);

        assert_eq!(
            bridge.log().messages(),
            ["Error: late (line 9, col 1)", "Error: early (line 1, col 1)"]
        );
    }

    #[test]
    fn test_non_fault_messages_ignored() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        assert_eq!(
            bridge.deliver(&InboundMessage::new(FRAME, json!({ "type": "resize", "error": "" }))),
            Delivery::NotAFault
        );
        assert_eq!(bridge.deliver(&InboundMessage::new(FRAME, json!(42))), Delivery::NotAFault);
        assert!(bridge.log().is_empty());
    }

    #[test]
    fn test_loosely_shaped_fault_still_logged() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        let thrown_object = InboundMessage::new(FRAME, json!({ "type": "runtime-error", "error": { "code": 7 } }));
        let bad_tag = InboundMessage::new(FRAME, json!({ "type": "runtime-error", "error": "x", "generation": "1" }));

        assert_eq!(bridge.deliver(&thrown_object), Delivery::Accepted);
        assert_eq!(bridge.deliver(&bad_tag), Delivery::Accepted);
        assert_eq!(bridge.log().messages(), [r#"{"code":7}"#, "x"]);
    }

    #[test]
    fn test_detached_bridge_drops() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        bridge.detach();
        assert_eq!(bridge.deliver(&fault("x")), Delivery::NoContext);
        assert_eq!(bridge.context(), None);
    }

    #[test]
    fn test_lenient_accepts_stale_generation() {
        let bridge = bridge(StaleFaultPolicy::Lenient);
        bridge.attach(FRAME, 2);
        let stale = InboundMessage::fault(FRAME, &FaultEnvelope::runtime_error("old").with_generation(1));
        assert_eq!(bridge.deliver(&stale), Delivery::Accepted);
    }

    #[test]
    fn test_reject_stale_generation() {
        let bridge = bridge(StaleFaultPolicy::RejectStale);
        bridge.attach(FRAME, 2);

        let stale = InboundMessage::fault(FRAME, &FaultEnvelope::runtime_error("old").with_generation(1));
        let fresh = InboundMessage::fault(FRAME, &FaultEnvelope::runtime_error("new").with_generation(2));
        assert_eq!(bridge.deliver(&stale), Delivery::Stale);
        assert_eq!(bridge.deliver(&fresh), Delivery::Accepted);
        assert_eq!(bridge.log().messages(), ["new"]);
    }

    #[test]
    fn test_observers_see_appends() {
        let observers = Observers::new();
        let totals = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&totals);
        observers.subscribe(move |event| {
            if let PreviewEvent::FaultAppended { total, .. } = event {
                sink.lock().push(*total);
            }
        });

        let bridge = FaultBridge::with_observers(
            Arc::new(RuntimeFaultLog::new()),
            StaleFaultPolicy::Lenient,
            observers,
        );
        bridge.attach(FRAME, 1);
        bridge.deliver(&fault("a"));
        bridge.deliver(&fault("b"));
        assert_eq!(*totals.lock(), [1, 2]);
    }
}
