//! Tooth chart rendering.
//!
//! Turns a set of findings into an inline SVG diagram of all 32 permanent teeth, highlighting
//! the ones with at least one finding. Rendering is a pure function of its input: no I/O, no
//! shared mutable state, no timestamps. Calling it twice with the same findings yields
//! byte-identical markup, and it is safe to call from several threads at once.

pub mod geometry;

use crate::html::escape_html;
use findings::FindingsData;
use geometry::{Arch, ToothGeometry, CANVAS_HEIGHT, CANVAS_WIDTH, TOOTH_CORNER_RADIUS, TOOTH_GEOMETRY};
use report_types::NonEmptyText;
use std::cmp::Ordering;
use std::collections::BTreeSet;

const CHART_STYLE: &str = r#"  <defs>
    <style>
      .tooth-normal { fill: #E8F5E9; stroke: #4CAF50; stroke-width: 2; }
      .tooth-problem { fill: #FFF9C4; stroke: #FBC02D; stroke-width: 3; }
      .tooth-text { font-family: Arial, sans-serif; font-size: 14px; font-weight: bold; fill: #2E7D32; }
      .tooth-problem-text { font-family: Arial, sans-serif; font-size: 14px; font-weight: bold; fill: #F57F17; }
      .arch-label { font-family: Arial, sans-serif; font-size: 16px; font-weight: bold; fill: #2E7D32; }
    </style>
  </defs>
"#;

const CHART_LEGEND: &str = r##"  <g id="legend">
    <rect x="600" y="100" width="180" height="120" fill="#F5F5F5" stroke="#4CAF50" stroke-width="2" rx="5"/>
    <text x="690" y="125" text-anchor="middle" font-family="Arial" font-size="14" font-weight="bold" fill="#2E7D32">图例</text>
    <rect x="610" y="140" width="20" height="15" fill="#E8F5E9" stroke="#4CAF50" stroke-width="1"/>
    <text x="635" y="152" font-family="Arial" font-size="12" fill="#2E7D32">正常</text>
    <rect x="610" y="165" width="20" height="15" fill="#FFF9C4" stroke="#FBC02D" stroke-width="2"/>
    <text x="635" y="177" font-family="Arial" font-size="12" fill="#F57F17">有问题</text>
  </g>
"##;

/// Distinct tooth ids that have at least one finding.
///
/// Built fresh for each render. An entry with an id but no diseases still counts; entries
/// without an id contribute nothing. Ids are kept verbatim, so ids the chart does not know
/// (for example `"99"`) are members but never match a tooth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemSet(BTreeSet<NonEmptyText>);

impl ProblemSet {
    pub fn from_findings(findings: &FindingsData) -> Self {
        findings.tooth_ids().cloned().collect()
    }

    pub fn contains(&self, tooth_id: &str) -> bool {
        self.0.contains(tooth_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in display order (see [`compare_tooth_ids`]).
    pub fn sorted(&self) -> Vec<&NonEmptyText> {
        let mut ids: Vec<_> = self.0.iter().collect();
        ids.sort_by(|a, b| compare_tooth_ids(a.as_str(), b.as_str()));
        ids
    }
}

impl FromIterator<NonEmptyText> for ProblemSet {
    fn from_iter<I: IntoIterator<Item = NonEmptyText>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Orders tooth ids numerically; ids that are not numbers sort after all numeric ones.
pub fn compare_tooth_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Visual class of one tooth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Normal,
    Problem,
}

impl Classification {
    pub fn shape_class(self) -> &'static str {
        match self {
            Classification::Normal => "tooth-normal",
            Classification::Problem => "tooth-problem",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Classification::Normal => "tooth-text",
            Classification::Problem => "tooth-problem-text",
        }
    }
}

/// A tooth placed on the chart together with its classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToothMark {
    pub geometry: &'static ToothGeometry,
    pub classification: Classification,
}

/// Tooth chart operations.
///
/// Zero-sized namespace; all methods are associated functions.
pub struct ToothChart;

impl ToothChart {
    /// Classifies every tooth in table order.
    pub fn layout(problems: &ProblemSet) -> Vec<ToothMark> {
        TOOTH_GEOMETRY
            .iter()
            .map(|geometry| ToothMark {
                geometry,
                classification: if problems.contains(geometry.id) {
                    Classification::Problem
                } else {
                    Classification::Normal
                },
            })
            .collect()
    }

    /// Renders the chart for a parsed findings document.
    pub fn render(findings: &FindingsData) -> String {
        Self::render_problems(&ProblemSet::from_findings(findings))
    }

    /// Renders the chart for an already computed problem set.
    pub fn render_problems(problems: &ProblemSet) -> String {
        let marks = Self::layout(problems);

        let mut svg = format!(
            "<svg width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );
        svg.push_str(CHART_STYLE);

        push_arch(&mut svg, &marks, Arch::Upper);
        push_arch(&mut svg, &marks, Arch::Lower);

        svg.push_str(CHART_LEGEND);
        svg.push_str("</svg>");
        svg
    }
}

fn push_arch(svg: &mut String, marks: &[ToothMark], arch: Arch) {
    let (group_id, label_y, label) = match arch {
        Arch::Upper => ("upper-arch", 30, "上颌 (Maxillary)"),
        Arch::Lower => ("lower-arch", 350, "下颌 (Mandibular)"),
    };

    svg.push_str(&format!("  <g id=\"{group_id}\">\n"));
    svg.push_str(&format!(
        "    <text x=\"{}\" y=\"{label_y}\" text-anchor=\"middle\" class=\"arch-label\">{label}</text>\n",
        CANVAS_WIDTH / 2
    ));

    for mark in marks.iter().filter(|m| m.geometry.arch == arch) {
        let g = mark.geometry;
        svg.push_str(&format!(
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{TOOTH_CORNER_RADIUS}\" class=\"{}\"/>\n",
            g.x,
            g.y,
            g.width,
            g.height,
            mark.classification.shape_class()
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" class=\"{}\">{}</text>\n",
            g.label_x(),
            g.label_y(),
            mark.classification.text_class(),
            escape_html(g.id)
        ));
    }

    svg.push_str("  </g>\n");
}
