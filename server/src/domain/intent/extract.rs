/// Slice from the first `{` to the last `}` of the trimmed response.
///
/// No brace balancing: prose around a single object is tolerated, several
/// objects in one response produce a slice that fails to parse.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let response = response.trim();
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start < end).then(|| &response[start..=end])
}
