use std::collections::HashMap;

/// Make header names usable as column keys.
///
/// Names are trimmed, blank names become `Unnamed: {index}` and repeated
/// names get `.1`, `.2`, ... suffixes in order of appearance.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();

    raw.into_iter()
        .enumerate()
        .map(|(index, name)| {
            let trimmed = name.as_ref().trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                trimmed.to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let header = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            header
        })
        .collect()
}
