//! Detection result wire model and translation helpers.
//!
//! Responsibilities:
//! - Define public domain-level types for the rest of the workspace
//! - Define a permissive wire model mirroring `result.json`
//! - Translate wire into domain, applying the configured [`ParseMode`]
//!
//! Notes:
//! - Unknown keys are ignored; the detection pipeline adds fields over time
//! - Structural type mismatches (e.g. `diseases` not being a list) are always errors, reported
//!   with their JSON path. Unusable `tooth_fdi`, `label` or `confidence` values are only
//!   rejected in [`ParseMode::Strict`]

use crate::disease::DiseaseKind;
use crate::{FindingsError, FindingsResult};
use report_types::NonEmptyText;
use serde::Deserialize;
use serde_json::Value;

/// Lowest valid universal tooth number.
pub const MIN_TOOTH_ID: u8 = 1;

/// Highest valid universal tooth number.
pub const MAX_TOOTH_ID: u8 = 32;

// ============================================================================
// Public domain-level types
// ============================================================================

/// How malformed entries are treated during translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Absent or blank fields contribute nothing; nothing is rejected.
    #[default]
    Lenient,
    /// Missing tooth ids, out-of-range tooth ids and missing labels are rejected.
    Strict,
}

/// One disease observed on a tooth.
#[derive(Clone, Debug, PartialEq)]
pub struct Disease {
    pub kind: DiseaseKind,
    /// Detector confidence. Unconstrained; only used in narrative text.
    pub confidence: f64,
}

/// One entry of `diseased_teeth`.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseasedTooth {
    /// Universal tooth number ("1".."32"). `None` when absent or blank.
    pub tooth_id: Option<NonEmptyText>,
    pub diseases: Vec<Disease>,
    /// Path recorded by the pipeline for the square crop image of this tooth.
    pub square_crop_path: Option<NonEmptyText>,
}

/// A single (tooth, disease) observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finding<'a> {
    pub tooth_id: &'a NonEmptyText,
    pub kind: &'a DiseaseKind,
    pub confidence: f64,
}

/// Domain-level carrier for a parsed result document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindingsData {
    /// Entries in input order.
    pub teeth: Vec<DiseasedTooth>,
}

impl FindingsData {
    /// Ids of every entry that has one, in input order (duplicates included).
    pub fn tooth_ids(&self) -> impl Iterator<Item = &NonEmptyText> {
        self.teeth.iter().filter_map(|t| t.tooth_id.as_ref())
    }

    /// Flattened findings for entries that carry a tooth id.
    pub fn findings(&self) -> impl Iterator<Item = Finding<'_>> {
        self.teeth.iter().flat_map(|tooth| {
            tooth.tooth_id.iter().flat_map(move |id| {
                tooth.diseases.iter().map(move |d| Finding {
                    tooth_id: id,
                    kind: &d.kind,
                    confidence: d.confidence,
                })
            })
        })
    }

    /// Number of disease entries across all teeth.
    pub fn total_lesions(&self) -> usize {
        self.teeth.iter().map(|t| t.diseases.len()).sum()
    }
}

// ============================================================================
// Public operations
// ============================================================================

/// Result document operations.
///
/// Zero-sized namespace; all methods are associated functions.
pub struct Findings;

impl Findings {
    /// Parse a result document from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface the path (e.g. `diseased_teeth.0.diseases`)
    /// to the failing field when the JSON does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FindingsError`] if:
    /// - the text is not valid JSON,
    /// - the document structure has an unexpected type,
    /// - `mode` is [`ParseMode::Strict`] and an entry is incomplete, out of range or has a
    ///   value of the wrong kind.
    pub fn parse(json_text: &str, mode: ParseMode) -> FindingsResult<FindingsData> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, ResultWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                if source.is_syntax() || source.is_eof() {
                    return Err(FindingsError::InvalidJson(source));
                }
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FindingsError::Translation(format!(
                    "result schema mismatch at {path}: {source}"
                )));
            }
        };
        deserializer.end()?;

        wire_to_domain(wire, mode)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ResultWire {
    #[serde(default)]
    diseased_teeth: Vec<DiseasedToothWire>,
}

/// `tooth_fdi`, `label` and `confidence` stay untyped here so that one odd value does not sink
/// the whole document in lenient mode; [`tooth_to_domain`] decides what is usable.
#[derive(Debug, Deserialize)]
struct DiseasedToothWire {
    #[serde(default)]
    tooth_fdi: Option<Value>,

    #[serde(default)]
    diseases: Vec<DiseaseWire>,

    #[serde(default)]
    square_crop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiseaseWire {
    #[serde(default)]
    label: Option<Value>,

    #[serde(default)]
    confidence: Option<Value>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: ResultWire, mode: ParseMode) -> FindingsResult<FindingsData> {
    let teeth = wire
        .diseased_teeth
        .into_iter()
        .enumerate()
        .map(|(index, tooth)| tooth_to_domain(index, tooth, mode))
        .collect::<FindingsResult<Vec<_>>>()?;

    Ok(FindingsData { teeth })
}

/// Tooth ids are normally strings; non-negative integers are stringified. Anything else
/// (negative or fractional numbers, booleans, arrays, objects) is unusable.
fn tooth_id_text(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => match n.as_u64() {
            Some(n) => Ok(Some(n.to_string())),
            None => Err(Value::Number(n)),
        },
        other => Err(other),
    }
}

fn tooth_to_domain(
    index: usize,
    wire: DiseasedToothWire,
    mode: ParseMode,
) -> FindingsResult<DiseasedTooth> {
    let tooth_id = match wire.tooth_fdi.map(tooth_id_text).transpose() {
        Ok(text) => NonEmptyText::from_optional(text.flatten()),
        Err(value) => {
            if mode == ParseMode::Strict {
                return Err(FindingsError::InvalidFinding {
                    index,
                    reason: format!("tooth_fdi {value} is not a tooth number"),
                });
            }
            tracing::warn!("diseased_teeth[{index}].tooth_fdi {value} is not a tooth number; ignored");
            None
        }
    };

    if mode == ParseMode::Strict {
        match &tooth_id {
            None => {
                return Err(FindingsError::InvalidFinding {
                    index,
                    reason: "missing tooth_fdi".into(),
                })
            }
            Some(id) if !is_valid_tooth_id(id.as_str()) => {
                return Err(FindingsError::InvalidFinding {
                    index,
                    reason: format!(
                        "tooth_fdi '{id}' is not a tooth number between {MIN_TOOTH_ID} and {MAX_TOOTH_ID}"
                    ),
                })
            }
            Some(_) => {}
        }
    } else if tooth_id.is_none() {
        tracing::warn!("diseased_teeth[{index}] has no tooth_fdi; it will not be charted");
    }

    let mut diseases = Vec::with_capacity(wire.diseases.len());
    for (disease_index, disease) in wire.diseases.into_iter().enumerate() {
        let label = match disease.label {
            Some(Value::String(s)) => NonEmptyText::from_optional(Some(s)),
            _ => None,
        };
        let Some(label) = label else {
            if mode == ParseMode::Strict {
                return Err(FindingsError::InvalidFinding {
                    index,
                    reason: format!("diseases[{disease_index}] has no label"),
                });
            }
            tracing::warn!("diseased_teeth[{index}].diseases[{disease_index}] has no label; skipped");
            continue;
        };

        let confidence = match disease.confidence {
            None | Some(Value::Null) => 0.0,
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(other) => {
                if mode == ParseMode::Strict {
                    return Err(FindingsError::InvalidFinding {
                        index,
                        reason: format!("diseases[{disease_index}].confidence {other} is not a number"),
                    });
                }
                tracing::warn!(
                    "diseased_teeth[{index}].diseases[{disease_index}].confidence {other} is not a number; using 0"
                );
                0.0
            }
        };

        diseases.push(Disease {
            kind: DiseaseKind::from_label(label.as_str()),
            confidence,
        });
    }

    Ok(DiseasedTooth {
        tooth_id,
        diseases,
        square_crop_path: NonEmptyText::from_optional(wire.square_crop_path),
    })
}

/// Whether `id` is a universal tooth number in range. Leading zeros are not accepted, since ids
/// are matched as text against the chart.
pub fn is_valid_tooth_id(id: &str) -> bool {
    if id.starts_with('0') {
        return false;
    }
    id.parse::<u8>()
        .map(|n| (MIN_TOOTH_ID..=MAX_TOOTH_ID).contains(&n))
        .unwrap_or(false)
}
