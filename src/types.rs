//! Record types produced by the section extractors.
//!
//! Each type mirrors one entry of an LDF section. Names that key an entry
//! (signal name, frame name, ...) live in the owning
//! [`SectionMap`](crate::SectionMap), not in the record itself.

use crate::SectionMap;

/// Global header assignments found outside any block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// `LIN_protocol_version`, without quotes (e.g. `2.1`)
    pub protocol_version: Option<String>,
    /// `LIN_language_version`, without quotes
    pub language_version: Option<String>,
    /// `LIN_speed` in kbit/s
    pub speed_kbps: Option<f64>,
    /// `Channel_name`, without quotes
    pub channel_name: Option<String>,
}

/// The `Nodes` section: one master and its slaves.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSection {
    pub master: String,
    pub timer_base_ms: f64,
    pub jitter_ms: f64,
    /// Slave node names in declaration order.
    pub slaves: Vec<String>,
}

/// Initial value of a signal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitValue {
    /// A single value as written (`0`, `0x3F`, ...)
    Scalar(String),
    /// A byte array initializer (`{0, 0xFF}`)
    Array(Vec<String>),
}

impl InitValue {
    /// Returns true for byte array initializers.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, InitValue::Array(_))
    }

    /// The scalar text, if this is not an array.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            InitValue::Scalar(s) => Some(s),
            InitValue::Array(_) => None,
        }
    }
}

/// An entry of the `Signals` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    /// Width in bits.
    pub size: u16,
    pub init: InitValue,
    pub publisher: String,
    /// Subscribing nodes in declaration order.
    pub subscribers: Vec<String>,
}

/// An entry of the `Diagnostic_signals` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticSignal {
    /// Width in bits.
    pub size: u16,
    pub init: InitValue,
}

/// An unconditional frame from the `Frames` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Frame identifier (decimal or hexadecimal in the source).
    pub identifier: u8,
    pub publisher: String,
    /// Response length in bytes.
    pub response_length: u8,
    /// Signal name to bit offset, kept as written.
    pub signals: SectionMap<String>,
}

/// A frame from the `Diagnostic_frames` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticFrame {
    pub identifier: u8,
    /// Signal name to bit offset, kept as written.
    pub signals: SectionMap<String>,
}

/// Per-node configuration from the `Node_attributes` section.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttribute {
    /// `LIN_protocol`, without quotes.
    pub lin_protocol: String,
    pub configured_nad: String,
    pub initial_nad: Option<String>,
    /// Supplier id, function id and optional variant.
    pub product_id: Vec<String>,
    pub response_error: String,
    pub p2_min_ms: Option<u32>,
    pub st_min_ms: Option<u32>,
    /// Frame name to configured message id. LIN 2.1 files may list frames
    /// without an id.
    pub configurable_frames: SectionMap<Option<String>>,
    /// Any other `key = value` attribute, in order of appearance.
    pub extra: Vec<(String, String)>,
}

/// One slot of a schedule table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSlot {
    /// First token of the slot line: a frame name or a command keyword.
    pub frame_slot_name: String,
    /// Everything before `delay`, e.g. `AssignNAD { Slave1 }`.
    pub command: String,
    pub delay_ms: f64,
}

/// An entry of the `Schedule_tables` section.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleTable {
    pub slots: Vec<ScheduleSlot>,
}

impl ScheduleTable {
    /// Sum of all slot delays.
    pub fn cycle_time_ms(&self) -> f64 {
        self.slots.iter().map(|s| s.delay_ms).sum()
    }
}

/// An entry of the `Signal_encoding_types` section.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalEncodingType {
    /// One row per value line, e.g. `["logical_value", "0", "off"]`.
    pub rows: Vec<Vec<String>>,
}

impl SignalEncodingType {
    /// Rows whose first token is `kind` (`logical_value`, `physical_value`, ...).
    pub fn rows_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a [String]> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.first().map(String::as_str) == Some(kind))
            .map(Vec::as_slice)
    }
}
