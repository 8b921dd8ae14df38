//! In-place edits of a JSON document's text. Only the bytes of the edited
//! member change; layout and escape sequences elsewhere are left as written.

use std::ops::Range;

struct ObjectScan {
    /// Value span of the last member with the wanted key.
    found: Option<Range<usize>>,
    last_value_end: Option<usize>,
}

/// Sets `key` to the already-encoded JSON `value` inside the object reached by
/// following `path` from the top level. A missing key is appended after the
/// object's last member. `None` when `text` does not have that shape.
pub fn set_member(text: &str, path: &[&str], key: &str, value: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut open = skip_ws(bytes, 0);

    for segment in path {
        open = scan_object(text, open, segment)?.found?.start;
    }

    let scan = scan_object(text, open, key)?;
    let (at, replaced, insert) = match (scan.found, scan.last_value_end) {
        (Some(span), _) => (span.start, span.end, value.to_owned()),
        (None, Some(end)) => (end, end, format!(",{}:{value}", quote(key)?)),
        (None, None) => (open + 1, open + 1, format!("{}:{value}", quote(key)?)),
    };

    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..at]);
    out.push_str(&insert);
    out.push_str(&text[replaced..]);
    Some(out)
}

fn quote(key: &str) -> Option<String> {
    serde_json::to_string(key).ok()
}

fn scan_object(text: &str, open: usize, key: &str) -> Option<ObjectScan> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut scan = ObjectScan {
        found: None,
        last_value_end: None,
    };

    let mut i = skip_ws(bytes, open + 1);
    if bytes.get(i) == Some(&b'}') {
        return Some(scan);
    }

    loop {
        let key_end = string_end(bytes, i)?;
        let name: String = serde_json::from_str(&text[i..key_end]).ok()?;

        i = skip_ws(bytes, key_end);
        if bytes.get(i) != Some(&b':') {
            return None;
        }

        let start = skip_ws(bytes, i + 1);
        let end = value_end(bytes, start)?;
        if name == key {
            scan.found = Some(start..end);
        }
        scan.last_value_end = Some(end);

        i = skip_ws(bytes, end);
        match bytes.get(i) {
            Some(b',') => i = skip_ws(bytes, i + 1),
            Some(b'}') => return Some(scan),
            _ => return None,
        }
    }
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

/// `i` points at an opening quote; returns the index just past the closing one.
fn string_end(bytes: &[u8], i: usize) -> Option<usize> {
    if bytes.get(i) != Some(&b'"') {
        return None;
    }

    let mut j = i + 1;
    loop {
        match bytes.get(j)? {
            b'\\' => j += 2,
            b'"' => return Some(j + 1),
            _ => j += 1,
        }
    }
}

fn value_end(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes.get(i)? {
        b'"' => string_end(bytes, i),
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut j = i;
            loop {
                match bytes.get(j)? {
                    b'"' => {
                        j = string_end(bytes, j)?;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(j + 1);
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
        }
        _ => {
            let mut j = i;
            while let Some(c) = bytes.get(j) {
                if matches!(c, b',' | b'}' | b']') || c.is_ascii_whitespace() {
                    break;
                }
                j += 1;
            }
            (j > i).then_some(j)
        }
    }
}
