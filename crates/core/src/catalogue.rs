//! Display names and possible causes for each recognised disease.

use findings::DiseaseKind;

/// Presentation data for a recognised disease.
#[derive(Debug)]
pub struct DiseaseInfo {
    /// Name used in headings and the distribution list.
    pub name: &'static str,
    /// Name used next to crop images.
    pub short_name: &'static str,
    pub causes: [&'static str; 5],
}

static ABRASION: DiseaseInfo = DiseaseInfo {
    name: "牙齿磨损",
    short_name: "磨损",
    causes: [
        "刷牙方式不当（横向刷牙、用力过猛）",
        "使用硬毛牙刷或磨料过多的牙膏",
        "饮食习惯（酸性食物、硬质食物）",
        "夜磨牙或紧咬牙习惯",
        "年龄因素导致的生理性磨损",
    ],
};

static CARIES: DiseaseInfo = DiseaseInfo {
    name: "龋齿",
    short_name: "龋齿",
    causes: [
        "口腔卫生不良，牙菌斑堆积",
        "高糖饮食，频繁摄入含糖食物",
        "唾液分泌不足，口腔自洁能力下降",
        "牙齿结构缺陷或发育不良",
        "缺乏定期口腔检查和预防性治疗",
    ],
};

static TWISTED: DiseaseInfo = DiseaseInfo {
    name: "牙齿扭转",
    short_name: "扭转",
    causes: [
        "遗传因素，家族性牙齿排列异常",
        "乳牙早失或滞留导致恒牙萌出异常",
        "牙弓空间不足，牙齿拥挤",
        "不良口腔习惯（咬唇、吐舌等）",
        "颌骨发育异常",
    ],
};

/// Presentation data for `kind`, or `None` for unrecognised labels.
pub fn disease_info(kind: &DiseaseKind) -> Option<&'static DiseaseInfo> {
    match kind {
        DiseaseKind::Abrasion => Some(&ABRASION),
        DiseaseKind::Caries => Some(&CARIES),
        DiseaseKind::Twisted => Some(&TWISTED),
        DiseaseKind::Other(_) => None,
    }
}

/// Display name, falling back to the raw label.
pub fn display_name(kind: &DiseaseKind) -> &str {
    disease_info(kind).map(|info| info.name).unwrap_or(kind.label())
}
