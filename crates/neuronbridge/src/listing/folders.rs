//! Naming rules for the folder layout of the color depth MIP buckets.
//!
//! Alignment templates sit at the top level (`JRC2018_Unisex_20x_HR/`),
//! libraries below them (`JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/`),
//! and release directories are named `v<digit>...` (`v2.1.1`).

/// The last folder name of a rolled-up prefix, without delimiters.
///
/// ```
/// use neuronbridge::listing::folder_name;
///
/// assert_eq!(folder_name("JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/", "/"), "FlyEM_Hemibrain_v1.2.1");
/// assert_eq!(folder_name("JRC2018_Unisex_20x_HR/", "/"), "JRC2018_Unisex_20x_HR");
/// ```
pub fn folder_name<'a>(prefix: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return prefix;
    }
    let trimmed = prefix.strip_suffix(delimiter).unwrap_or(prefix);
    trimmed
        .rsplit_once(delimiter)
        .map_or(trimmed, |(_, name)| name)
}

/// True for a prefix naming an alignment template folder: `JRC`, a digit,
/// at least one more character, then `/`.
pub fn is_alignment_template(prefix: &str) -> bool {
    prefix.match_indices("JRC").any(|(at, _)| {
        let rest = prefix[at + 3..].as_bytes();
        rest.first().is_some_and(u8::is_ascii_digit)
            && rest.iter().skip(2).any(|&b| b == b'/')
    })
}

/// True for a release directory name such as `v2.1.1`.
pub fn is_release_version(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next() == Some(b'v') && bytes.next().is_some_and(|b| b.is_ascii_digit())
}
