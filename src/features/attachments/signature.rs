//! Upload allow-list, magic-byte sniffing and stored filename generation.

use uuid::Uuid;

/// Longest sanitized original name kept in the stored filename
const MAX_SANITIZED_LEN: usize = 100;

/// Allowed MIME types and the leading bytes each must start with
pub const FILE_SIGNATURES: &[(&str, &[&[u8]])] = &[
    ("image/jpeg", &[&[0xFF, 0xD8, 0xFF]]),
    (
        "image/png",
        &[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]],
    ),
    ("image/webp", &[&[0x52, 0x49, 0x46, 0x46]]),
    ("application/pdf", &[&[0x25, 0x50, 0x44, 0x46]]),
    (
        "application/msword",
        &[&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]],
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &[
            &[0x50, 0x4B, 0x03, 0x04],
            &[0x50, 0x4B, 0x05, 0x06],
            &[0x50, 0x4B, 0x07, 0x08],
        ],
    ),
];

/// Check if a MIME type is on the upload allow-list
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    FILE_SIGNATURES.iter().any(|(mime, _)| *mime == content_type)
}

/// Comma-separated allow-list for error messages
pub fn allowed_mime_types() -> String {
    FILE_SIGNATURES
        .iter()
        .map(|(mime, _)| *mime)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True when `data` starts with one of the signatures registered for `content_type`.
///
/// Unknown MIME types never match.
pub fn matches_signature(content_type: &str, data: &[u8]) -> bool {
    FILE_SIGNATURES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .is_some_and(|(_, signatures)| signatures.iter().any(|sig| data.starts_with(sig)))
}

fn is_kept_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') || ('가'..='힣').contains(&c)
}

/// Strip everything except ASCII alphanumerics, `.`, `-`, `_` and Hangul
/// syllables, then cut to 100 characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| is_kept_char(*c))
        .take(MAX_SANITIZED_LEN)
        .collect()
}

/// Build the on-disk name `<stem>_<uuid><ext>` from an uploaded file name
pub fn stored_filename(original_name: &str) -> String {
    let sanitized = sanitize_filename(original_name);

    let (stem, ext) = match sanitized.rfind('.') {
        Some(idx) => sanitized.split_at(idx),
        None => (sanitized.as_str(), ""),
    };
    let stem = if stem.is_empty() { "file" } else { stem };

    format!("{}_{}{}", stem, Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

    #[test]
    fn test_allow_list() {
        assert!(is_mime_type_allowed("image/png"));
        assert!(is_mime_type_allowed("application/msword"));
        assert!(!is_mime_type_allowed("image/gif"));
        assert!(!is_mime_type_allowed("text/html"));
    }

    #[test]
    fn test_png_signature() {
        assert!(matches_signature("image/png", PNG));
        assert!(!matches_signature("image/png", b"GIF89a...."));
        assert!(!matches_signature("image/png", &PNG[..4]));
    }

    #[test]
    fn test_declared_type_must_match_bytes() {
        assert!(!matches_signature("image/jpeg", PNG));
        assert!(matches_signature("application/pdf", b"%PDF-1.7\n"));
        assert!(!matches_signature("text/plain", b"%PDF-1.7\n"));
    }

    #[test]
    fn test_docx_accepts_all_zip_headers() {
        let docx = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
        assert!(matches_signature(docx, &[0x50, 0x4B, 0x03, 0x04, 0x14]));
        assert!(matches_signature(docx, &[0x50, 0x4B, 0x05, 0x06]));
        assert!(matches_signature(docx, &[0x50, 0x4B, 0x07, 0x08]));
        assert!(!matches_signature(docx, &[0x50, 0x4B, 0x01, 0x02]));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my report (v2).pdf"), "myreportv2.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_filename("사업계획서_최종.docx"), "사업계획서_최종.docx");
        assert_eq!(sanitize_filename(&"a".repeat(150)).chars().count(), 100);
    }

    #[test]
    fn test_stored_filename_shape() {
        let name = stored_filename("company logo.png");
        assert!(name.starts_with("companylogo_"));
        assert!(name.ends_with(".png"));
        // stem + '_' + 36-char uuid + ext
        assert_eq!(name.len(), "companylogo".len() + 1 + 36 + ".png".len());
    }

    #[test]
    fn test_stored_filename_without_usable_stem() {
        let name = stored_filename("!!!.pdf");
        assert!(name.starts_with("file_"));
        assert!(name.ends_with(".pdf"));

        let name = stored_filename("README");
        assert!(name.starts_with("README_"));
        assert!(!name.contains('.'));
    }
}
