//! Headline statistics, disease distribution and general recommendations.

use crate::catalogue::display_name;
use crate::chart::ProblemSet;
use crate::html::escape_html;
use findings::{DiseaseKind, FindingsData};
use serde::{Serialize, Serializer};

/// Advice printed under every report, in display order.
pub const RECOMMENDATIONS: [&str; 6] = [
    "建议尽快到专业口腔医疗机构进行详细检查和治疗",
    "改善口腔卫生习惯，使用正确的刷牙方法（建议使用巴氏刷牙法）",
    "定期进行口腔检查和清洁（建议每6个月一次）",
    "注意饮食健康，减少高糖食物和酸性饮料的摄入",
    "如有夜磨牙习惯，建议佩戴防护牙套",
    "使用含氟牙膏，增强牙齿抗龋能力",
];

/// Occurrences of one disease label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistributionEntry {
    #[serde(rename = "label", serialize_with = "serialize_label")]
    pub kind: DiseaseKind,
    pub count: usize,
    pub mean_confidence: f64,
}

/// Statistics shown on the cover and in the overview section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Distinct charted tooth ids.
    pub problem_teeth: usize,
    /// Disease entries across all teeth.
    pub lesions: usize,
    /// Per-label counts in order of first appearance.
    pub distribution: Vec<DistributionEntry>,
}

impl ReportSummary {
    pub fn from_findings(findings: &FindingsData) -> Self {
        let mut distribution: Vec<DistributionEntry> = Vec::new();
        let mut confidence_sums: Vec<f64> = Vec::new();

        for disease in findings.teeth.iter().flat_map(|t| t.diseases.iter()) {
            match distribution.iter().position(|e| e.kind == disease.kind) {
                Some(i) => {
                    distribution[i].count += 1;
                    confidence_sums[i] += disease.confidence;
                }
                None => {
                    distribution.push(DistributionEntry {
                        kind: disease.kind.clone(),
                        count: 1,
                        mean_confidence: 0.0,
                    });
                    confidence_sums.push(disease.confidence);
                }
            }
        }

        for (entry, sum) in distribution.iter_mut().zip(confidence_sums) {
            entry.mean_confidence = sum / entry.count as f64;
        }

        Self {
            problem_teeth: ProblemSet::from_findings(findings).len(),
            lesions: findings.total_lesions(),
            distribution,
        }
    }
}

fn serialize_label<S: Serializer>(kind: &DiseaseKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.label())
}

/// Overview, distribution and recommendation sections.
pub fn summary_html(summary: &ReportSummary) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"
    <div class="section">
      <h3>📊 检测概况</h3>
      <p>本次检测共发现 <strong style="color: #FBC02D;">{}</strong> 颗牙齿存在健康问题，共检测到 <strong style="color: #FBC02D;">{}</strong> 处病变。</p>
    </div>

    <div class="section">
      <h3>🔍 主要问题分布</h3>
      <ul style="line-height: 2;">
"#,
        summary.problem_teeth, summary.lesions
    ));

    for entry in &summary.distribution {
        html.push_str(&format!(
            "        <li><strong>{}</strong>：{} 处（平均置信度 {:.0}%）</li>\n",
            escape_html(display_name(&entry.kind)),
            entry.count,
            entry.mean_confidence * 100.0
        ));
    }

    html.push_str(
        r#"      </ul>
    </div>

    <div class="section">
      <h3>💡 健康建议</h3>
      <ul style="line-height: 2;">
"#,
    );
    for advice in RECOMMENDATIONS {
        html.push_str(&format!("        <li>{advice}</li>\n"));
    }
    html.push_str("      </ul>\n    </div>\n");

    html
}
