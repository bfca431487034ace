use streamwatch_tools::ToolError;

/// Longest login the platform allows.
pub const MAX_CHANNEL_NAME_LEN: usize = 25;

/// Validate a name that will be stored or sent to the platform.
///
/// Surrounding whitespace is trimmed; the result must be 1–25 ASCII
/// letters, digits or underscores.
pub fn channel_name(tool_name: &str, field: &str, raw: &str) -> Result<String, ToolError> {
    let name = existing_name(tool_name, field, raw)?.trim().to_string();

    if name.chars().count() > MAX_CHANNEL_NAME_LEN {
        return Err(ToolError::invalid_params(
            tool_name,
            format!("{field} must be at most {MAX_CHANNEL_NAME_LEN} characters"),
        ));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ToolError::invalid_params(
            tool_name,
            format!("{field} contains an invalid character {bad:?}; use letters, digits or '_'"),
        ));
    }

    Ok(name)
}

/// Validate a name that only has to match an existing registry entry.
///
/// Entries written by hand may not follow the platform rules, so only
/// blank input is rejected and the value is returned untouched.
pub fn existing_name(tool_name: &str, field: &str, raw: &str) -> Result<String, ToolError> {
    if raw.trim().is_empty() {
        return Err(ToolError::invalid_params(
            tool_name,
            format!("{field} must not be empty"),
        ));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("alice", "alice")]
    #[case::mixed_case("AliceInChains", "AliceInChains")]
    #[case::underscore("the_b0b", "the_b0b")]
    #[case::trimmed("  bob \n", "bob")]
    #[case::max_len("abcdefghijklmnopqrstuvwxy", "abcdefghijklmnopqrstuvwxy")]
    fn accepts_valid_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(channel_name("add-streamer", "name", raw).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::inner_space("alice bob")]
    #[case::url("twitch.tv/alice")]
    #[case::query("alice&user_login=bob")]
    #[case::too_long("abcdefghijklmnopqrstuvwxyz")]
    fn rejects_invalid_names(#[case] raw: &str) {
        let err = channel_name("add-streamer", "name", raw).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams { .. }));
    }

    #[test]
    fn existing_names_only_need_content() {
        assert_eq!(
            existing_name("delete-streamer", "name", " odd name ").unwrap(),
            " odd name "
        );
        assert!(existing_name("delete-streamer", "name", "").is_err());
        assert!(existing_name("delete-streamer", "name", " \t").is_err());
    }
}
