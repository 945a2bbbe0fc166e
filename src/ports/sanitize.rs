// src/ports/sanitize.rs
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>").expect("tag pattern is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

/// Numeric character references; browsers accept them without the closing `;`.
static NUMERIC_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));?").expect("numeric reference pattern is valid")
});

const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite"];
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];
const LINK_REL: &str = "noopener noreferrer";

/// Attributes kept on each whitelisted tag. `None` means the tag is escaped.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "abbr" => &["title"],
        "blockquote" | "q" => &["cite"],
        "img" => &["src", "alt", "title", "width", "height"],
        "del" | "ins" => &["datetime"],
        "td" | "th" => &["colspan", "rowspan", "align", "width"],
        "b" | "i" | "u" | "s" | "em" | "strong" | "small" | "sub" | "sup" | "mark" | "code"
        | "pre" | "p" | "br" | "hr" | "div" | "span" | "h1" | "h2" | "h3" | "h4" | "h5"
        | "h6" | "ul" | "ol" | "li" | "dl" | "dt" | "dd" | "table" | "thead" | "tbody"
        | "tfoot" | "tr" | "caption" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Strip markup capable of running script while keeping benign formatting.
///
/// Whitelisted tags are rebuilt with only their permitted attributes; any other
/// tag, and every stray angle bracket, is HTML-escaped. Output contains no raw
/// bracket outside a rebuilt tag, so a second pass returns it unchanged.
///
/// # Examples
///
/// ```
/// use noteful::ports::sanitize;
///
/// let clean = sanitize(r#"<img src="a.png" onerror="alert(1)"> <strong>ok</strong>"#);
/// assert_eq!(clean, r#"<img src="a.png"> <strong>ok</strong>"#);
/// ```
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_text(&input[last..whole.start()]));

        let name = &caps[2];
        match allowed_attributes(&name.to_ascii_lowercase()) {
            Some(allowed) => {
                let closing = !caps[1].is_empty();
                out.push_str(&rebuild_tag(name, closing, &caps[3], allowed));
            }
            None => out.push_str(&escape_text(whole.as_str())),
        }
        last = whole.end();
    }

    out.push_str(&escape_text(&input[last..]));
    out
}

fn rebuild_tag(name: &str, closing: bool, raw_attrs: &str, allowed: &[&str]) -> String {
    if closing {
        return format!("</{name}>");
    }

    let trimmed = raw_attrs.trim_end();
    let (raw_attrs, self_closing) = match trimmed.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };

    let mut tag = format!("<{name}");
    let mut opens_new_context = false;
    for caps in ATTR_RE.captures_iter(raw_attrs) {
        let attr = caps[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str());
        match value {
            None => {
                tag.push(' ');
                tag.push_str(&attr);
            }
            Some(value) => {
                if URL_ATTRIBUTES.contains(&attr.as_str()) && !is_safe_url(value) {
                    continue;
                }
                tag.push_str(&format!(" {attr}=\"{}\"", escape_attr(value)));
            }
        }
        opens_new_context |= attr == "target";
    }
    if opens_new_context {
        tag.push_str(&format!(" rel=\"{LINK_REL}\""));
    }
    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

/// Relative URLs and a few plain schemes pass; `javascript:`, `data:` and the rest do not.
///
/// Only the text before the first `/`, `?` or `#` can name a scheme, so that
/// prefix must either carry no `:` or name a whitelisted scheme. A `&` left
/// there after decoding is a reference this filter cannot read and fails.
fn is_safe_url(value: &str) -> bool {
    let decoded: String = decode_html_entities(&decode_numeric_refs(value))
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let prefix = decoded.split(['/', '?', '#']).next().unwrap_or_default();
    if prefix.contains('&') {
        return false;
    }
    match prefix.split_once(':') {
        Some((scheme, _)) => SAFE_SCHEMES.contains(&scheme),
        None => true,
    }
}

fn decode_numeric_refs(value: &str) -> String {
    NUMERIC_REF_RE
        .replace_all(value, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                (None, None) => None,
            };
            code.and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string()
        })
        .into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
