//! C-style string escapes used inside PO string literals.

/// An escape sequence the reader did not understand.
///
/// The sequence is kept verbatim in the decoded string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnknownEscape {
	/// Character offset of the backslash within the literal's content.
	pub offset: usize,
	/// Character following the backslash, `None` for a trailing backslash.
	pub ch: Option<char>,
}

/// Decodes the content of a string literal (without the surrounding quotes).
pub(crate) fn unescape(s: &str) -> (String, Vec<UnknownEscape>) {
	let mut result = String::with_capacity(s.len());
	let mut unknown = Vec::new();
	let mut chars = s.chars().enumerate().peekable();

	while let Some((offset, ch)) = chars.next() {
		if ch != '\\' {
			result.push(ch);
			continue;
		}
		let Some((_, next)) = chars.next() else {
			result.push('\\');
			unknown.push(UnknownEscape { offset, ch: None });
			break;
		};
		match next {
			'n' => result.push('\n'),
			't' => result.push('\t'),
			'r' => result.push('\r'),
			'a' => result.push('\u{7}'),
			'b' => result.push('\u{8}'),
			'f' => result.push('\u{c}'),
			'v' => result.push('\u{b}'),
			'"' | '\\' | '\'' | '?' => result.push(next),
			'0'..='7' => {
				let mut value = next.to_digit(8).unwrap_or(0);
				for _ in 0..2 {
					match chars.peek() {
						Some(&(_, digit @ '0'..='7')) => {
							value = value * 8 + digit.to_digit(8).unwrap_or(0);
							chars.next();
						}
						_ => break,
					}
				}
				result.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
			}
			_ => {
				result.push('\\');
				result.push(next);
				unknown.push(UnknownEscape {
					offset,
					ch: Some(next),
				});
			}
		}
	}

	(result, unknown)
}

/// Encodes a string for use inside a PO string literal.
pub(crate) fn escape(s: &str) -> String {
	let mut result = String::with_capacity(s.len() + 2);
	for ch in s.chars() {
		match ch {
			'\\' => result.push_str("\\\\"),
			'"' => result.push_str("\\\""),
			'\n' => result.push_str("\\n"),
			'\t' => result.push_str("\\t"),
			'\r' => result.push_str("\\r"),
			'\u{7}' => result.push_str("\\a"),
			'\u{8}' => result.push_str("\\b"),
			'\u{c}' => result.push_str("\\f"),
			'\u{b}' => result.push_str("\\v"),
			_ => result.push(ch),
		}
	}
	result
}
