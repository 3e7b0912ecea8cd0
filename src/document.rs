use crate::{
    SectionMap,
    types::{
        DiagnosticFrame, DiagnosticSignal, Frame, Header, NodeAttribute, NodeSection,
        ScheduleTable, Signal, SignalEncodingType,
    },
};

/// High level representation of a parsed LDF.
///
/// A `Document` is created fresh by every call to
/// [`LdfParser::parse_all`](crate::LdfParser::parse_all) and owns all section
/// collections. Nothing is shared between documents.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub(crate) header: Header,
    pub(crate) nodes: Option<NodeSection>,
    pub(crate) signals: SectionMap<Signal>,
    pub(crate) diagnostic_signals: SectionMap<DiagnosticSignal>,
    pub(crate) frames: SectionMap<Frame>,
    pub(crate) diagnostic_frames: SectionMap<DiagnosticFrame>,
    pub(crate) node_attributes: SectionMap<NodeAttribute>,
    pub(crate) schedule_tables: SectionMap<ScheduleTable>,
    pub(crate) signal_encoding_types: SectionMap<SignalEncodingType>,
    pub(crate) signal_representation: SectionMap<Vec<String>>,
}

impl Document {
    /// Global header assignments (`LIN_protocol_version`, `LIN_speed`, ...).
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The `Nodes` section, or `None` if the file has none.
    pub fn nodes(&self) -> Option<&NodeSection> {
        self.nodes.as_ref()
    }

    pub fn signals(&self) -> &SectionMap<Signal> {
        &self.signals
    }

    pub fn diagnostic_signals(&self) -> &SectionMap<DiagnosticSignal> {
        &self.diagnostic_signals
    }

    pub fn frames(&self) -> &SectionMap<Frame> {
        &self.frames
    }

    pub fn diagnostic_frames(&self) -> &SectionMap<DiagnosticFrame> {
        &self.diagnostic_frames
    }

    /// Node attributes keyed by node name.
    pub fn node_attributes(&self) -> &SectionMap<NodeAttribute> {
        &self.node_attributes
    }

    pub fn schedule_tables(&self) -> &SectionMap<ScheduleTable> {
        &self.schedule_tables
    }

    pub fn signal_encoding_types(&self) -> &SectionMap<SignalEncodingType> {
        &self.signal_encoding_types
    }

    /// `Signal_representation` entries keyed by the name before the colon,
    /// each mapping to the names listed after it.
    pub fn signal_representation(&self) -> &SectionMap<Vec<String>> {
        &self.signal_representation
    }

    /// Returns true if no section produced any entry.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_none()
            && self.signals.is_empty()
            && self.diagnostic_signals.is_empty()
            && self.frames.is_empty()
            && self.diagnostic_frames.is_empty()
            && self.node_attributes.is_empty()
            && self.schedule_tables.is_empty()
            && self.signal_encoding_types.is_empty()
            && self.signal_representation.is_empty()
    }

    /// Frames that carry `signal`, in declaration order.
    pub fn frames_carrying<'a>(&'a self, signal: &'a str) -> impl Iterator<Item = (&'a str, &'a Frame)> + 'a {
        self.frames
            .iter()
            .filter(move |(_, frame)| frame.signals.contains_key(signal))
    }
}

#[cfg(feature = "serde")]
impl Document {
    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a document previously produced by [`Document::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the JSON form of the document to `path`.
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a document saved with [`Document::save_to_file`].
    pub fn load_from_file(path: &str) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(signals: &[&str]) -> Frame {
        let mut map = SectionMap::new();
        for (i, s) in signals.iter().enumerate() {
            assert!(map.insert_unique(*s, (i * 8).to_string()));
        }
        Frame {
            identifier: 0x10,
            publisher: "Master".into(),
            response_length: 2,
            signals: map,
        }
    }

    #[test]
    fn default_document_is_empty() {
        assert!(Document::default().is_empty());
    }

    #[test]
    fn frames_carrying_filters_by_signal() {
        let mut doc = Document::default();
        assert!(doc.frames.insert_unique("F1", frame_with(&["A", "B"])));
        assert!(doc.frames.insert_unique("F2", frame_with(&["C"])));
        assert!(doc.frames.insert_unique("F3", frame_with(&["B"])));
        let names: Vec<_> = doc.frames_carrying("B").map(|(n, _)| n).collect();
        assert_eq!(names, ["F1", "F3"]);
        assert!(!doc.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_roundtrip_keeps_order() -> crate::Result<()> {
        use crate::types::InitValue;

        let mut doc = Document::default();
        assert!(doc.signals.insert_unique(
            "Zeta",
            Signal {
                size: 8,
                init: InitValue::Scalar("0".into()),
                publisher: "Master".into(),
                subscribers: vec!["Slave1".into()],
            },
        ));
        assert!(doc.signals.insert_unique(
            "Alpha",
            Signal {
                size: 16,
                init: InitValue::Array(vec!["0".into(), "255".into()]),
                publisher: "Slave1".into(),
                subscribers: vec![],
            },
        ));
        let restored = Document::from_json(&doc.to_json()?)?;
        assert_eq!(restored, doc);
        assert_eq!(restored.signals().keys().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
        Ok(())
    }
}
