use testgate_graph::ProjectRoot;

/// Parse and validate the base folder name.
///
/// The name must be a single folder name: not empty, no path separators,
/// not `.` or `..`. Leading and trailing slashes are trimmed.
pub fn parse_base_folder_name(s: &str) -> Result<String, String> {
    ProjectRoot::new(s)
        .map(|root| root.as_str().to_string())
        .map_err(|e| e.to_string())
}

/// Parse a diff timeout in whole seconds. Zero is rejected.
pub fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Timeout must be a whole number of seconds: '{}'", s))?;

    if secs == 0 {
        return Err("Timeout must be at least 1 second".to_string());
    }

    Ok(secs)
}
