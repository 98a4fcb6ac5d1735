/// Checks if a lower-cased URL ends with a denied file extension
///
/// The check is a plain suffix test against `.<ext>` for each entry, applied to
/// the whole URL string. A query string or fragment after the extension means
/// the URL does not match.
///
/// # Arguments
///
/// * `url` - The candidate URL, already lower-cased
/// * `extensions` - Denied extensions without the leading dot, lower-cased
///
/// # Examples
///
/// ```
/// use tagged_corpus::url::matches_denied_extension;
///
/// let denied = vec!["css".to_string(), "mp4".to_string()];
/// assert!(matches_denied_extension("https://example.com/site.css", &denied));
/// assert!(!matches_denied_extension("https://example.com/site.css?v=2", &denied));
/// assert!(!matches_denied_extension("https://example.com/articles/a1", &denied));
/// ```
pub fn matches_denied_extension(url: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| {
        url.len() > ext.len()
            && url.ends_with(ext.as_str())
            && url.as_bytes()[url.len() - ext.len() - 1] == b'.'
    })
}
