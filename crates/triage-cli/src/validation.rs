use triage_github_issues::issue_event::RepoRef;

pub fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

pub fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .trim()
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

pub fn parse_non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("value must not be blank".to_string());
    }
    Ok(trimmed.to_string())
}

/// Action inputs arrive as strings; anything non-blank except `false`/`0` is on.
pub fn parse_input_flag(value: &str) -> Result<bool, String> {
    let normalized = value.trim().to_ascii_lowercase();
    Ok(!matches!(normalized.as_str(), "" | "false" | "0"))
}

pub fn parse_repo_slug(value: &str) -> Result<RepoRef, String> {
    RepoRef::parse(value).map_err(|error| error.to_string())
}
