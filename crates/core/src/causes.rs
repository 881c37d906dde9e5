//! Cause analysis: which teeth each recognised disease affects, and why it tends to happen.

use crate::catalogue::{disease_info, DiseaseInfo};
use crate::chart::compare_tooth_ids;
use crate::html::escape_html;
use findings::{DiseaseKind, FindingsData};

/// Analysis of one recognised disease.
#[derive(Debug)]
pub struct CauseEntry {
    pub kind: DiseaseKind,
    pub info: &'static DiseaseInfo,
    /// Findings of this kind (a tooth reported twice counts twice).
    pub count: usize,
    /// Distinct affected tooth ids in display order.
    pub teeth: Vec<String>,
}

/// Builds one entry per recognised disease that occurs, in catalogue order.
///
/// Findings without a tooth id and unrecognised labels are not analysed.
pub fn analyse_causes(findings: &FindingsData) -> Vec<CauseEntry> {
    DiseaseKind::KNOWN
        .into_iter()
        .filter_map(|kind| {
            let info = disease_info(&kind)?;
            let mut count = 0;
            let mut teeth: Vec<String> = Vec::new();

            for finding in findings.findings().filter(|f| *f.kind == kind) {
                count += 1;
                if !teeth.iter().any(|t| t == finding.tooth_id.as_str()) {
                    teeth.push(finding.tooth_id.to_string());
                }
            }

            if count == 0 {
                return None;
            }
            teeth.sort_by(|a, b| compare_tooth_ids(a, b));

            Some(CauseEntry {
                kind,
                info,
                count,
                teeth,
            })
        })
        .collect()
}

/// The cause analysis section.
pub fn causes_html(entries: &[CauseEntry]) -> String {
    let mut html = String::from("<div class=\"section\"><h3>🔬 病因分析</h3>");

    for entry in entries {
        let teeth = entry
            .teeth
            .iter()
            .map(|t| escape_html(t))
            .collect::<Vec<_>>()
            .join(", ");

        html.push_str(&format!(
            r#"
      <div style="margin-bottom: 20px; padding: 15px; background: #F9FBE7; border-left: 4px solid #8BC34A; border-radius: 5px;">
        <h4 style="margin: 0 0 10px 0; color: #558B2F; font-size: 18px;">{}</h4>
        <p style="margin: 5px 0; color: #555;"><strong>涉及牙齿：</strong>{}号牙</p>
        <p style="margin: 5px 0; color: #555;"><strong>可能原因：</strong></p>
        <ul style="margin: 10px 0; padding-left: 20px; color: #666;">
"#,
            entry.info.name, teeth
        ));
        for cause in entry.info.causes {
            html.push_str(&format!("          <li>{cause}</li>\n"));
        }
        html.push_str("        </ul>\n      </div>\n");
    }

    html.push_str("</div>");
    html
}
