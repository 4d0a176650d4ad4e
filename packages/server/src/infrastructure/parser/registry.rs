//! `reg query ... /v fDenyTSConnections` output parser.

const VALUE_NAME: &str = "fDenyTSConnections";

/// Whether remote desktop connections are allowed.
///
/// Returns `None` when the value line is missing or not a DWORD.
pub fn parse_remote_desktop_enabled(output: &str) -> Option<bool> {
    let line = output
        .lines()
        .find(|line| line.trim_start().starts_with(VALUE_NAME))?;
    let value = line.split_whitespace().last()?;
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    let deny = u32::from_str_radix(hex, 16).ok()?;
    Some(deny == 0)
}
