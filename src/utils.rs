// src/utils.rs
use anyhow::Result;

/// Lowercased extension of a resume input or output path
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Reject resume paths whose extension is not one of `allowed`
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("Resume path has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Expected a .{} file, got .{}: {}",
            allowed.join(" or ."),
            ext,
            filename
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("personal.JSON"), Some("json".to_string()));
        assert_eq!(get_file_extension("/data/v1.2/personal"), None);
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("personal.json", &["json"]).is_ok());
        assert!(validate_file_extension("resume.pdf", &["pdf"]).is_ok());
        assert!(validate_file_extension("resume.docx", &["pdf"]).is_err());
        let err = validate_file_extension("resume.docx", &["pdf"]).unwrap_err();
        assert_eq!(err.to_string(), "Expected a .pdf file, got .docx: resume.docx");

        let err = validate_file_extension("resume", &["pdf"]).unwrap_err();
        assert!(err.to_string().contains("Resume path has no extension"));
    }
}
