//! Full report page assembly.
//!
//! [`ReportDocument::render`] places the tooth chart and the narrative sections into the page
//! template. Images arrive pre-encoded in [`ReportAssets`]; anything missing is left out of the
//! page instead of producing a broken `<img>`.

use crate::catalogue::disease_info;
use crate::causes::{analyse_causes, causes_html};
use crate::chart::{ProblemSet, ToothChart};
use crate::html::escape_html;
use crate::summary::{summary_html, ReportSummary};
use chrono::NaiveDate;
use findings::{DiseasedTooth, FindingsData};
use oral_files::ImageAsset;
use std::collections::BTreeMap;

const PAGE_TITLE: &str = "口腔健康评估报告";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>口腔健康评估报告</title>
  <style>
    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'PingFang SC', 'Microsoft YaHei', 'Helvetica Neue', Arial, 'Noto Sans SC', sans-serif; background:#ffffff; color:#222; }
    .page { width: 100%; max-width: 1080px; margin: 24px auto 72px; background:#ffffff; padding: 28px 32px 40px; border-radius: 12px; box-shadow: 0 12px 36px rgba(0,0,0,.08); }
    .topbar { height: 10px; background: linear-gradient(90deg, #4CAF50 0%, #8BC34A 50%, #FFEB3B 100%); width: 50%; border-radius: 6px; margin-top: 4px; }
    .header { display:flex; align-items: center; justify-content: space-between; margin: 18px 0 12px; }
    .badge { display:inline-block; padding: 6px 12px; border-radius: 8px; background: linear-gradient(135deg, #4CAF50 0%, #8BC34A 100%); color:#fff; font-weight:600; margin-right: 12px; }
    h1 { margin: 0; font-size: 48px; letter-spacing:1px; color: #2E7D32; }
    .report-tag { color:#4CAF50; }
    .logo { height: 80px; width: auto; display:block; object-fit: contain; }
    .logo-large { height: 150px; width: auto; display:block; object-fit: contain; }
    .cover { display:flex; flex-direction: column; align-items:center; justify-content:center; padding: 80px 32px 120px; text-align:center; background: linear-gradient(135deg, #E8F5E9 0%, #F1F8E9 50%, #FFF9C4 100%); border-radius: 12px; }
    .cover h1 { font-size: 42px; margin: 18px 0 8px; color: #2E7D32; }
    .cover .subtitle { color:#4CAF50; font-size: 18px; margin-top: 4px; }
    .cover-summary { margin-top: 40px; padding: 30px; background: rgba(255,255,255,0.9); border-radius: 10px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); max-width: 600px; }
    .cover-summary h2 { color: #2E7D32; font-size: 24px; margin: 0 0 15px 0; }
    .cover-summary .stat { display: flex; justify-content: space-around; margin: 20px 0; }
    .cover-summary .stat-item { text-align: center; }
    .cover-summary .stat-number { font-size: 36px; font-weight: bold; color: #FBC02D; margin: 5px 0; }
    .cover-summary .stat-label { font-size: 14px; color: #666; }
    .layout { display:grid; grid-template-columns: 1fr 460px; gap: 28px; margin-top: 10px; }
    @media (max-width: 980px){ .layout { grid-template-columns: 1fr; } }
    .section { margin-bottom: 18px; background:#ffffff; border:1px solid #C8E6C9; border-radius:10px; padding:14px 16px; }
    .section h3 { margin: 0 0 6px; color:#2E7D32; font-size: 20px; display:flex; align-items:center; }
    .section h3::before { content:""; display:inline-block; width: 12px; height: 12px; border:2px solid #4CAF50; border-radius:50%; margin-right: 8px; }
    .section p { margin: 0; line-height: 1.8; color:#444; }
    .right h3 { color:#4CAF50; margin: 6px 0; font-size: 20px; }
    .chips { display:flex; flex-wrap:wrap; gap: 8px 10px; margin: 6px 0 12px; }
    .chip { background: linear-gradient(135deg, #4CAF50 0%, #8BC34A 100%); color:#fff; border-radius: 999px; padding: 6px 12px; font-weight: 700; min-width: 42px; text-align:center; font-size: 14px; }
    .grid { display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 14px; }
    @media (max-width: 980px){ .grid { grid-template-columns: repeat(2, minmax(0, 1fr)); } }
    .cell { background:#ffffff; padding: 8px; border:1px solid #C8E6C9; border-radius: 10px; }
    .cell img { width: 100%; aspect-ratio: 1 / 1; object-fit: cover; border-radius: 8px; display:block; }
    .meta { font-size: 13px; color:#555; margin-top: 6px; line-height: 1.55; }
    footer { margin-top: 24px; color:#666; font-size: 14px; }
    .legend { margin-top: 6px; font-size: 12px; color:#4CAF50; }
    .tooth-chart { width: 100%; max-width: 800px; margin: 20px auto; background: #F9FBE7; padding: 20px; border-radius: 10px; border: 2px solid #8BC34A; }
    .tooth-chart svg { width: 100%; height: auto; }
    @page { size: A4; margin: 12mm; }
    @media print {
      body { -webkit-print-color-adjust: exact; print-color-adjust: exact; font-size: 12px; }
      .page { break-after: page; page-break-after: always; box-shadow: none; max-width: 100%; margin: 0; border-radius: 0; page-break-inside: avoid; }
      .header h1 { font-size: 28px; }
      .badge { padding: 4px 10px; font-size: 12px; }
      .section { margin-bottom: 10px; padding: 10px 12px; }
      .section h3 { font-size: 16px; }
      .section p { line-height: 1.6; }
      .right h3 { font-size: 16px; }
      .chips { gap: 6px 8px; }
      .logo { height: 60px; }
    }
  </style>
</head>
<body>
"#;

const DISCLAIMER: &str = "本报告由AI智能分析系统生成，仅供参考。具体诊断和治疗方案请咨询专业口腔医生。";

/// Pre-encoded images for one report.
#[derive(Debug, Default)]
pub struct ReportAssets {
    pub cover_logo: Option<ImageAsset>,
    pub header_logo: Option<ImageAsset>,
    pub overview: Option<ImageAsset>,
    /// Crop images keyed by index into [`FindingsData::teeth`].
    pub crops: BTreeMap<usize, ImageAsset>,
}

/// Everything a report page is rendered from.
#[derive(Debug)]
pub struct ReportContext<'a> {
    pub findings: &'a FindingsData,
    pub assets: &'a ReportAssets,
    /// Printed in the footer when set.
    pub generated_on: Option<NaiveDate>,
}

/// Report page operations.
pub struct ReportDocument;

impl ReportDocument {
    /// Renders the complete HTML page.
    pub fn render(ctx: &ReportContext<'_>) -> String {
        let summary = ReportSummary::from_findings(ctx.findings);
        let problems = ProblemSet::from_findings(ctx.findings);
        let causes = analyse_causes(ctx.findings);

        let mut html = String::from(PAGE_HEAD);
        push_cover(&mut html, ctx.assets.cover_logo.as_ref(), &summary);

        html.push_str("\n  <div class=\"page\">\n    <div class=\"topbar\"></div>\n    <div class=\"header\">\n      <div>\n        <span class=\"badge\">AI智能分析</span>\n        <h1>口腔健康<span class=\"report-tag\">评估报告</span></h1>\n      </div>\n");
        if let Some(logo) = &ctx.assets.header_logo {
            html.push_str(&format!(
                "      <div>{}</div>\n",
                img_tag(logo, "logo", "Logo")
            ));
        }
        html.push_str("    </div>\n\n    <div class=\"layout\">\n      <div class=\"left\">\n");

        html.push_str(&summary_html(&summary));
        html.push_str(&causes_html(&causes));

        html.push_str(&format!(
            r#"
        <div class="section">
          <h3>🦷 牙齿问题分布图</h3>
          <div class="tooth-chart">
            {}
          </div>
          <p class="legend">注：黄色标记表示存在问题的牙齿</p>
        </div>
"#,
            ToothChart::render_problems(&problems)
        ));

        if let Some(overview) = &ctx.assets.overview {
            html.push_str(&format!(
                "\n        <div class=\"section\">\n          <h3>📸 整体视图</h3>\n          <img src=\"{}\" alt=\"整体视图\" style=\"width: 100%; border-radius: 8px; border: 2px solid #C8E6C9;\">\n        </div>\n",
                overview.data_uri
            ));
        }

        html.push_str("      </div>\n\n      <div class=\"right\">\n        <h3>🔍 详细检测结果</h3>\n        <div class=\"chips\">\n");
        for tooth_id in problems.sorted() {
            html.push_str(&format!(
                "          <span class=\"chip\">{}</span>\n",
                escape_html(tooth_id.as_str())
            ));
        }
        html.push_str("        </div>\n\n        <div class=\"grid\">\n");
        for (index, tooth) in ctx.findings.teeth.iter().enumerate() {
            if let Some(crop) = ctx.assets.crops.get(&index) {
                push_gallery_cell(&mut html, tooth, crop);
            }
        }
        html.push_str("        </div>\n      </div>\n    </div>\n");

        push_footer(&mut html, ctx.generated_on);
        html.push_str("  </div>\n</body>\n</html>");
        html
    }
}

fn img_tag(asset: &ImageAsset, class: &str, alt: &str) -> String {
    format!(
        "<img class=\"{class}\" src=\"{}\" alt=\"{}\">",
        asset.data_uri,
        escape_html(alt)
    )
}

fn push_cover(html: &mut String, logo: Option<&ImageAsset>, summary: &ReportSummary) {
    html.push_str("  <div class=\"page cover\">\n");
    if let Some(logo) = logo {
        html.push_str(&format!("    {}\n", img_tag(logo, "logo-large", "Logo")));
    }
    html.push_str(&format!(
        r#"    <h1>{PAGE_TITLE}</h1>
    <p class="subtitle">Oral Health Assessment Report</p>

    <div class="cover-summary">
      <h2>📋 检测概览</h2>
      <div class="stat">
        <div class="stat-item">
          <div class="stat-number">{}</div>
          <div class="stat-label">问题牙齿</div>
        </div>
        <div class="stat-item">
          <div class="stat-number">{}</div>
          <div class="stat-label">病变数量</div>
        </div>
      </div>
      <p style="margin: 15px 0 0 0; color: #555; line-height: 1.6;">
        本报告基于AI智能分析技术，对您的口腔健康状况进行了全面评估。
        建议您根据报告结果，及时咨询专业口腔医生，制定个性化的治疗方案。
      </p>
    </div>
  </div>
"#,
        summary.problem_teeth, summary.lesions
    ));
}

/// One crop image with its tooth number and the short names of its recognised diseases.
fn push_gallery_cell(html: &mut String, tooth: &DiseasedTooth, crop: &ImageAsset) {
    let tooth_label = tooth
        .tooth_id
        .as_ref()
        .map(|t| escape_html(t.as_str()))
        .unwrap_or_else(|| "?".to_string());

    let disease_text = tooth
        .diseases
        .iter()
        .filter_map(|d| disease_info(&d.kind).map(|info| info.short_name))
        .collect::<Vec<_>>()
        .join("、");

    html.push_str(&format!(
        r#"          <div class="cell">
            {}
            <div class="meta">
              <strong>{tooth_label}号牙</strong><br>
              {disease_text}
            </div>
          </div>
"#,
        img_tag(crop, "crop", &format!("牙齿 {tooth_label}"))
    ));
}

fn push_footer(html: &mut String, generated_on: Option<NaiveDate>) {
    html.push_str(&format!("\n    <footer>\n      <p>{DISCLAIMER}</p>\n"));
    if let Some(date) = generated_on {
        html.push_str(&format!(
            "      <p>报告日期：{}</p>\n",
            date.format("%Y-%m-%d")
        ));
    }
    html.push_str("      <p style=\"margin-top: 10px; color: #4CAF50;\">© 渡生科技 - 专业口腔健康解决方案</p>\n    </footer>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use findings::{Findings, ParseMode};

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    const SAMPLE: &str = r#"{"diseased_teeth": [
        {"tooth_fdi": "14", "diseases": [
            {"label": "general_caries", "confidence": 0.9},
            {"label": "calculus", "confidence": 0.3},
            {"label": "tooth abrasion", "confidence": 0.6}
        ], "square_crop_path": "/pipeline/crops/tooth_14.png"},
        {"tooth_fdi": "3", "diseases": [{"label": "twisted tooth", "confidence": 0.7}]}
    ]}"#;

    fn sample() -> FindingsData {
        Findings::parse(SAMPLE, ParseMode::Lenient).unwrap()
    }

    fn png(name: &str) -> ImageAsset {
        ImageAsset::from_bytes(name, &PNG_HEADER).unwrap()
    }

    #[test]
    fn renders_complete_page() {
        let findings = sample();
        let mut assets = ReportAssets {
            cover_logo: Some(png("cover.png")),
            header_logo: Some(png("header.png")),
            overview: Some(png("overview.png")),
            ..Default::default()
        };
        assets.crops.insert(0, png("tooth_14.png"));

        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 19),
        });

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert_eq!(html.matches("<svg ").count(), 1);
        assert_eq!(html.matches("class=\"tooth-problem\"").count(), 2);
        assert!(html.contains("<img class=\"logo-large\" src=\"data:image/png;base64,"));
        assert!(html.contains("<img class=\"logo\" src=\"data:image/png;base64,"));
        assert!(html.contains("alt=\"整体视图\""));
        assert!(html.contains("<strong>14号牙</strong><br>\n              龋齿、磨损\n"));
        assert!(html.contains("报告日期：2026-10-19"));
    }

    #[test]
    fn chips_are_sorted_numerically() {
        let findings = sample();
        let assets = ReportAssets::default();
        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: None,
        });

        let first = html.find("<span class=\"chip\">3</span>").unwrap();
        let second = html.find("<span class=\"chip\">14</span>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn missing_assets_are_omitted() {
        let findings = sample();
        let assets = ReportAssets::default();
        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: None,
        });

        assert!(!html.contains("<img"));
        assert!(!html.contains("整体视图"));
        assert!(!html.contains("class=\"cell\""));
        assert!(!html.contains("报告日期"));
    }

    #[test]
    fn cover_shows_counts() {
        let findings = sample();
        let assets = ReportAssets::default();
        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: None,
        });

        assert!(html.contains(
            "<div class=\"stat-number\">2</div>\n          <div class=\"stat-label\">问题牙齿</div>"
        ));
        assert!(html.contains(
            "<div class=\"stat-number\">4</div>\n          <div class=\"stat-label\">病变数量</div>"
        ));
    }

    #[test]
    fn tooth_ids_are_escaped() {
        let findings =
            Findings::parse(r#"{"diseased_teeth": [{"tooth_fdi": "<b>7</b>"}]}"#, ParseMode::Lenient)
                .unwrap();
        let assets = ReportAssets::default();
        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: None,
        });

        assert!(html.contains("<span class=\"chip\">&lt;b&gt;7&lt;/b&gt;</span>"));
        assert!(!html.contains("<b>7</b>"));
    }

    #[test]
    fn empty_report_has_all_normal_chart() {
        let findings = FindingsData::default();
        let assets = ReportAssets::default();
        let html = ReportDocument::render(&ReportContext {
            findings: &findings,
            assets: &assets,
            generated_on: None,
        });

        assert_eq!(html.matches("class=\"tooth-normal\"").count(), 32);
        assert!(!html.contains("class=\"chip\""));
    }
}
