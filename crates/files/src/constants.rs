/// Media type assumed when neither content sniffing nor the extension identifies an image.
pub const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// Extension fallbacks, matched case-insensitively.
pub const EXTENSION_MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];
