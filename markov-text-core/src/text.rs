/// Collapses every maximal run of whitespace into a single space.
///
/// This is a pure replace: leading and trailing runs become one bounding
/// space, they are not trimmed.
pub(crate) fn sanitize(raw: &str) -> String {
	let mut sanitized = String::with_capacity(raw.len());
	let mut in_whitespace = false;

	for c in raw.chars() {
		if c.is_whitespace() {
			if !in_whitespace {
				sanitized.push(' ');
			}
			in_whitespace = true;
		} else {
			sanitized.push(c);
			in_whitespace = false;
		}
	}

	sanitized
}

/// Returns the last `n` characters of `chars` as a `String`.
///
/// If `n` is greater than the number of characters, the whole slice is returned.
pub(crate) fn last_n_chars(chars: &[char], n: usize) -> String {
	let start = chars.len().saturating_sub(n);
	chars[start..].iter().collect()
}
