//! Text transforms applied to icon markup before it is embedded in CSS.
//!
//! The output of [`transform_markup`] is a single line with the root
//! element's intrinsic `width`/`height` removed. [`css_url`] then wraps it in
//! a `url('data:image/svg+xml;utf8,...')` expression.

use std::borrow::Cow;

use crate::{Error, Result};

/// Media type prefix of the inline data URI.
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Root attributes carrying the intrinsic size.
const DIMENSION_ATTRIBUTES: &[&str] = &["width", "height"];

/// Full markup pipeline for one icon.
///
/// Decodes the raw bytes as UTF-8, drops a leading byte order mark, removes
/// line breaks and strips the root dimensions. The result is deterministic
/// for a given input.
pub fn transform_markup(name: &str, raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| Error::malformed(name, format!("markup is not valid UTF-8 ({e})")))?;

    if text.contains('\0') {
        return Err(Error::malformed(name, "markup contains a NUL character"));
    }

    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let single_line = remove_line_breaks(text);
    Ok(strip_root_dimensions(&single_line).into_owned())
}

/// Remove every CR, LF and CRLF sequence.
///
/// Where a break was the only separator between two tokens inside a tag
/// (`<svg\nwidth=...`), a single space is kept so the tokens do not fuse.
/// Breaks next to whitespace or between tags vanish without trace.
pub fn remove_line_breaks(markup: &str) -> Cow<'_, str> {
    if !markup.contains(['\r', '\n']) {
        return Cow::Borrowed(markup);
    }

    let mut out = String::with_capacity(markup.len());
    let mut pending_break = false;

    for ch in markup.chars() {
        if ch == '\r' || ch == '\n' {
            pending_break = true;
            continue;
        }

        if pending_break {
            pending_break = false;
            let fused = match out.chars().next_back() {
                Some(prev) => {
                    !prev.is_whitespace() && !ch.is_whitespace() && prev != '>' && ch != '<'
                }
                None => false,
            };
            if fused {
                out.push(' ');
            }
        }

        out.push(ch);
    }

    Cow::Owned(out)
}

/// Remove `width` and `height` from the root `<svg>` tag only.
///
/// A leading XML declaration, comments and a doctype are skipped before the
/// root is located. The root tag is then read attribute by attribute, so
/// text inside quoted values is never touched. `viewBox`, `stroke-width` and
/// the dimensions of child elements are kept. Markup without an `<svg>` root,
/// or with an unterminated root tag, is returned unchanged.
pub fn strip_root_dimensions(markup: &str) -> Cow<'_, str> {
    let Some(start) = root_start(markup) else {
        return Cow::Borrowed(markup);
    };
    let Some((tag, len)) = strip_tag_dimensions(&markup[start..]) else {
        return Cow::Borrowed(markup);
    };

    let mut out = String::with_capacity(markup.len());
    out.push_str(&markup[..start]);
    out.push_str(&tag);
    out.push_str(&markup[start + len..]);
    Cow::Owned(out)
}

/// Byte offset of the root `<svg` tag, after any prolog.
fn root_start(markup: &str) -> Option<usize> {
    let mut pos = 0;
    loop {
        let rest = &markup[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        let skip = if trimmed.starts_with("<?") {
            trimmed.find("?>")? + 2
        } else if let Some(comment) = trimmed.strip_prefix("<!--") {
            comment.find("-->")? + 7
        } else if trimmed.starts_with("<!") {
            declaration_len(trimmed)?
        } else {
            break;
        };
        pos += skip;
    }

    let after = markup[pos..].strip_prefix("<svg")?;
    match after.chars().next() {
        Some(c) if c.is_whitespace() || c == '>' || c == '/' => Some(pos),
        _ => None,
    }
}

/// Length of a `<!DOCTYPE ...>` declaration, internal subset included.
fn declaration_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Rewrite the root tag at the start of `tag` without dimension attributes.
///
/// Returns the new tag and the byte length of the original one, or `None`
/// when nothing was removed or the tag does not end.
fn strip_tag_dimensions(tag: &str) -> Option<(String, usize)> {
    let bytes = tag.as_bytes();
    let skip_whitespace = |mut pos: usize| -> usize {
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        pos
    };

    let mut out = String::with_capacity(tag.len());
    out.push_str("<svg");
    let mut pos = "<svg".len();
    let mut stripped = false;

    loop {
        // Each attribute is copied together with the whitespace before it.
        let attr_start = pos;
        pos = skip_whitespace(pos);
        match *bytes.get(pos)? {
            b'>' => {
                out.push_str(&tag[attr_start..=pos]);
                return stripped.then_some((out, pos + 1));
            }
            b'/' => {
                out.push_str(&tag[attr_start..=pos]);
                pos += 1;
                continue;
            }
            _ => {}
        }

        let name_start = pos;
        while bytes
            .get(pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(*b, b'=' | b'>' | b'/'))
        {
            pos += 1;
        }
        let name = &tag[name_start..pos];

        let eq = skip_whitespace(pos);
        if bytes.get(eq) == Some(&b'=') {
            let value = skip_whitespace(eq + 1);
            let quote = *bytes.get(value)?;
            pos = if quote == b'"' || quote == b'\'' {
                let close = tag[value + 1..].find(char::from(quote))?;
                value + 1 + close + 1
            } else {
                let mut end = value;
                while bytes
                    .get(end)
                    .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
                {
                    end += 1;
                }
                end
            };
        }

        if DIMENSION_ATTRIBUTES.contains(&name) {
            stripped = true;
        } else {
            out.push_str(&tag[attr_start..pos]);
        }
    }
}

/// Build the `data:` URI for already transformed markup.
pub fn data_uri(markup: &str) -> String {
    format!("{DATA_URI_PREFIX}{markup}")
}

/// Build the single-quoted CSS `url(...)` expression for transformed markup.
///
/// Backslashes and single quotes are escaped so the CSS string cannot end
/// early. No percent-encoding is applied.
pub fn css_url(markup: &str) -> String {
    format!("url('{}')", escape_css_string(&data_uri(markup)))
}

fn escape_css_string(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        if ch == '\\' || ch == '\'' {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"\r\n  width=\"24\"\r\n  height=\"24\"\r\n  viewBox=\"0 0 24 24\"\r\n  stroke-width=\"2\"\r\n>\r\n  <rect width=\"18\" height=\"18\" x=\"3\" y=\"3\" />\r\n</svg>\r\n";

    #[test]
    fn removes_all_line_break_forms() {
        let out = remove_line_breaks("<svg>\n<g>\r\n<path/>\r</g>\n</svg>");
        assert_eq!(out, "<svg><g><path/></g></svg>");
    }

    #[test]
    fn keeps_separator_between_fused_tokens() {
        let out = remove_line_breaks("<svg\nwidth=\"1\"\r\nheight=\"1\">");
        assert_eq!(out, "<svg width=\"1\" height=\"1\">");
    }

    #[test]
    fn single_line_input_is_borrowed() {
        let input = "<svg viewBox=\"0 0 1 1\"></svg>";
        assert!(matches!(remove_line_breaks(input), Cow::Borrowed(_)));
    }

    #[test]
    fn strips_root_dimensions_but_keeps_view_box() {
        let out = strip_root_dimensions(
            "<svg width=\"24\" height=\"24\" viewBox=\"0 0 24 24\"><path d=\"M0 0\"/></svg>",
        );
        assert_eq!(out, "<svg viewBox=\"0 0 24 24\"><path d=\"M0 0\"/></svg>");
    }

    #[test]
    fn child_dimensions_and_stroke_width_survive() {
        let out = transform_markup("arrow", ARROW.as_bytes()).unwrap();

        assert!(out.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(out.contains("viewBox=\"0 0 24 24\""));
        assert!(out.contains("stroke-width=\"2\""));
        assert!(out.contains("<rect width=\"18\" height=\"18\""));

        let root_end = out.find('>').unwrap();
        let root = &out[..root_end];
        assert!(!root.contains(" width="));
        assert!(!root.contains(" height="));
    }

    #[test]
    fn single_quoted_dimensions_are_stripped() {
        let out = strip_root_dimensions("<svg width='16' height='16' viewBox='0 0 16 16'/>");
        assert_eq!(out, "<svg viewBox='0 0 16 16'/>");
    }

    #[test]
    fn quoted_text_resembling_dimensions_is_kept() {
        let out = strip_root_dimensions(
            "<svg aria-label=\"box width='5'\" width=\"24\" viewBox=\"0 0 24 24\">",
        );
        assert_eq!(out, "<svg aria-label=\"box width='5'\" viewBox=\"0 0 24 24\">");
    }

    #[test]
    fn dimension_like_attribute_names_are_kept() {
        let out = strip_root_dimensions("<svg data-width=\"2\" width=24 height=24>");
        assert_eq!(out, "<svg data-width=\"2\">");
    }

    #[test]
    fn root_after_leading_comment_is_stripped() {
        let out = transform_markup(
            "commented",
            b"<!-- made from <svg> export -->\n<svg width=\"24\" height=\"24\" viewBox=\"0 0 24 24\"></svg>",
        )
        .unwrap();
        assert_eq!(
            out,
            "<!-- made from <svg> export --><svg viewBox=\"0 0 24 24\"></svg>"
        );
    }

    #[test]
    fn root_after_prolog_and_doctype_is_stripped() {
        let out = strip_root_dimensions(
            "<?xml version=\"1.0\"?> <!DOCTYPE svg [<!ENTITY s \"<svg width='1'>\">]> <svg width=\"16\" viewBox=\"0 0 16 16\"/>",
        );
        assert!(out.ends_with("<svg viewBox=\"0 0 16 16\"/>"));
        assert!(out.contains("<!ENTITY s \"<svg width='1'>\">"));
    }

    #[test]
    fn unterminated_root_is_unchanged() {
        let input = "<svg width=\"24\" viewBox=\"0 0 24 24";
        assert!(matches!(strip_root_dimensions(input), Cow::Borrowed(_)));
    }

    #[test]
    fn markup_without_root_is_unchanged() {
        let out = strip_root_dimensions("<g width=\"1\"></g>");
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn transform_is_deterministic_and_single_line() {
        let first = transform_markup("arrow", ARROW.as_bytes()).unwrap();
        let second = transform_markup("arrow", ARROW.as_bytes()).unwrap();

        assert_eq!(first, second);
        assert!(!first.contains('\n'));
        assert!(!first.contains('\r'));
    }

    #[test]
    fn byte_order_mark_is_dropped() {
        let out = transform_markup("bom", "\u{FEFF}<svg></svg>".as_bytes()).unwrap();
        assert_eq!(out, "<svg></svg>");
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = transform_markup("broken", &[0x3c, 0x73, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { ref name, .. } if name == "broken"));
    }

    #[test]
    fn nul_character_is_malformed() {
        let err = transform_markup("nul", b"<svg>\0</svg>").unwrap_err();
        assert!(matches!(err, Error::MalformedMarkup { .. }));
    }

    #[test]
    fn css_url_wraps_data_uri() {
        let url = css_url("<svg></svg>");
        assert_eq!(url, "url('data:image/svg+xml;utf8,<svg></svg>')");
    }

    #[test]
    fn css_url_escapes_quotes_and_backslashes() {
        let url = css_url("<svg fill='none'>\\</svg>");
        assert_eq!(
            url,
            "url('data:image/svg+xml;utf8,<svg fill=\\'none\\'>\\\\</svg>')"
        );
    }
}
