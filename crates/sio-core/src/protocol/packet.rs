//! Typed representation of a decoded Socket.IO packet.
//!
//! # Wire layout (for beginners)
//!
//! ```text
//! <kind:1 digit> [<attachmentCount>-] [/<namespace>,] [<ackId digits>] [<jsonArrayPayload>]
//! ```
//!
//! - **kind** – which of the seven packet kinds this is (see [`PacketKind`]).
//! - **attachmentCount** – only for the two binary kinds: how many binary
//!   frames follow this text frame.
//! - **namespace** – the logical channel; `/` when omitted.
//! - **ackId** – present when the sender wants an acknowledgement back.
//! - **payload** – a JSON array.  For events the first element is the event
//!   name and the rest are its arguments.

/// Namespace used when a frame carries none.
pub const ROOT_NAMESPACE: &str = "/";

/// Object key marking a binary placeholder inside a payload.
pub const PLACEHOLDER_KEY: &str = "_placeholder";

/// Object key carrying a placeholder's attachment index.
pub const PLACEHOLDER_NUM_KEY: &str = "num";

// ── Packet kinds ──────────────────────────────────────────────────────────────

/// The seven packet kinds, ordinal-encoded on the wire as one decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketKind {
    Connect = 0,
    Disconnect = 1,
    Event = 2,
    Ack = 3,
    Error = 4,
    BinaryEvent = 5,
    BinaryAck = 6,
}

impl PacketKind {
    /// `true` for the kinds whose payload may reference out-of-band attachments.
    pub fn is_binary(self) -> bool {
        matches!(self, PacketKind::BinaryEvent | PacketKind::BinaryAck)
    }
}

impl TryFrom<char> for PacketKind {
    type Error = ();

    fn try_from(digit: char) -> Result<Self, ()> {
        match digit {
            '0' => Ok(PacketKind::Connect),
            '1' => Ok(PacketKind::Disconnect),
            '2' => Ok(PacketKind::Event),
            '3' => Ok(PacketKind::Ack),
            '4' => Ok(PacketKind::Error),
            '5' => Ok(PacketKind::BinaryEvent),
            '6' => Ok(PacketKind::BinaryAck),
            _ => Err(()),
        }
    }
}

// ── Payload values ────────────────────────────────────────────────────────────

/// One element of a packet payload.
///
/// This is a JSON value that can additionally hold raw bytes, because a
/// completed binary packet has its placeholders replaced by the attachments
/// that arrived in separate binary frames.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    /// An attachment substituted into a placeholder slot.
    Bytes(Vec<u8>),
    Array(Vec<PayloadValue>),
    /// Object entries in wire order.
    Object(Vec<(String, PayloadValue)>),
}

impl PayloadValue {
    /// Returns the string if this value is a [`PayloadValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PayloadValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes if this value is a substituted attachment.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PayloadValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Looks up `key` in an object value.
    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        match self {
            PayloadValue::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Returns the attachment index if this value is a binary placeholder,
    /// i.e. an object with `"_placeholder": true` and an integer `"num"`.
    pub fn placeholder_index(&self) -> Option<usize> {
        if self.get(PLACEHOLDER_KEY) != Some(&PayloadValue::Bool(true)) {
            return None;
        }
        match self.get(PLACEHOLDER_NUM_KEY) {
            Some(PayloadValue::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            _ => None,
        }
    }

    /// Replaces every placeholder in this value (recursively) with the
    /// matching attachment.  Placeholders whose index is out of range are
    /// left as they are.
    pub fn fill_placeholders(&mut self, attachments: &[Vec<u8>]) {
        if let Some(blob) = self.placeholder_index().and_then(|i| attachments.get(i)) {
            *self = PayloadValue::Bytes(blob.clone());
            return;
        }
        match self {
            PayloadValue::Array(items) => {
                for item in items {
                    item.fill_placeholders(attachments);
                }
            }
            PayloadValue::Object(entries) => {
                for (_, value) in entries {
                    value.fill_placeholders(attachments);
                }
            }
            _ => {}
        }
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => PayloadValue::Null,
            serde_json::Value::Bool(b) => PayloadValue::Bool(b),
            serde_json::Value::Number(n) => PayloadValue::Number(n),
            serde_json::Value::String(s) => PayloadValue::Str(s),
            serde_json::Value::Array(arr) => {
                PayloadValue::Array(arr.into_iter().map(PayloadValue::from).collect())
            }
            serde_json::Value::Object(obj) => PayloadValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, PayloadValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::Str(s.to_string())
    }
}

// ── Packet ────────────────────────────────────────────────────────────────────

/// A decoded packet.
///
/// Fields are read-only once decoded.  The only mutation a packet goes
/// through is receiving attachments while it waits in the
/// [`ReassemblyBuffer`](crate::protocol::ReassemblyBuffer).
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    kind: PacketKind,
    namespace: String,
    id: Option<u64>,
    payload: Vec<PayloadValue>,
    /// `Some(n)` for binary kinds: the declared attachment count.
    /// `None` for every other kind.
    pending_attachments: Option<usize>,
    attachments: Vec<Vec<u8>>,
}

impl Packet {
    /// Creates a packet with an empty payload and no ack id.
    ///
    /// An empty `namespace` is normalised to `/`.  Binary kinds start with a
    /// declared attachment count of zero.
    pub fn new(kind: PacketKind, namespace: impl Into<String>) -> Self {
        let mut namespace = namespace.into();
        if namespace.is_empty() {
            namespace = ROOT_NAMESPACE.to_string();
        }
        Self {
            kind,
            namespace,
            id: None,
            payload: Vec::new(),
            pending_attachments: kind.is_binary().then_some(0),
            attachments: Vec::new(),
        }
    }

    /// Sets the ack id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the payload.
    pub fn with_payload(mut self, payload: Vec<PayloadValue>) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the declared attachment count.  Ignored for non-binary kinds.
    pub fn with_pending_attachments(mut self, count: usize) -> Self {
        if self.kind.is_binary() {
            self.pending_attachments = Some(count);
        }
        self
    }

    pub fn kind(&self) -> PacketKind {
        self.kind
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn payload(&self) -> &[PayloadValue] {
        &self.payload
    }

    pub fn pending_attachments(&self) -> Option<usize> {
        self.pending_attachments
    }

    pub fn attachments(&self) -> &[Vec<u8>] {
        &self.attachments
    }

    /// A packet is complete when it is not binary-bearing, or when every
    /// declared attachment has arrived.
    pub fn is_complete(&self) -> bool {
        match self.pending_attachments {
            None => true,
            Some(expected) => self.attachments.len() >= expected,
        }
    }

    /// Appends one attachment.  When this completes the packet, the
    /// placeholders in the payload are resolved in the same step.
    pub(crate) fn add_attachment(&mut self, blob: Vec<u8>) {
        self.attachments.push(blob);
        if self.is_complete() {
            self.resolve_placeholders();
        }
    }

    /// Substitutes attachment `k` into placeholder `k` throughout the payload.
    pub(crate) fn resolve_placeholders(&mut self) {
        let attachments = &self.attachments;
        for value in &mut self.payload {
            value.fill_placeholders(attachments);
        }
    }

    /// Consumes the packet, returning its payload.
    pub fn into_payload(self) -> Vec<PayloadValue> {
        self.payload
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
