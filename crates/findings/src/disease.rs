//! Disease label vocabulary.
//!
//! The detection pipeline emits free-form labels. Three of them are recognised and drive the
//! narrative sections of the report; anything else is carried through verbatim.

/// Wire label for tooth abrasion.
pub const ABRASION_LABEL: &str = "tooth abrasion";

/// Wire label for caries.
pub const CARIES_LABEL: &str = "general_caries";

/// Wire label for a twisted (rotated) tooth.
pub const TWISTED_LABEL: &str = "twisted tooth";

/// Classified disease label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiseaseKind {
    /// Wear of the tooth surface.
    Abrasion,
    /// Tooth decay.
    Caries,
    /// Rotated tooth.
    Twisted,
    /// Unrecognised label, kept as-is.
    Other(String),
}

impl DiseaseKind {
    /// The recognised kinds, in report order.
    pub const KNOWN: [DiseaseKind; 3] =
        [DiseaseKind::Abrasion, DiseaseKind::Caries, DiseaseKind::Twisted];

    /// Classify a wire label.
    ///
    /// Matching is exact; the pipeline's labels are not normalised.
    pub fn from_label(label: &str) -> Self {
        match label {
            ABRASION_LABEL => DiseaseKind::Abrasion,
            CARIES_LABEL => DiseaseKind::Caries,
            TWISTED_LABEL => DiseaseKind::Twisted,
            other => DiseaseKind::Other(other.to_string()),
        }
    }

    /// The wire label for this kind.
    pub fn label(&self) -> &str {
        match self {
            DiseaseKind::Abrasion => ABRASION_LABEL,
            DiseaseKind::Caries => CARIES_LABEL,
            DiseaseKind::Twisted => TWISTED_LABEL,
            DiseaseKind::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DiseaseKind::Other(_))
    }
}

impl std::fmt::Display for DiseaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
