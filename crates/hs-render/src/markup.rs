//! ROOT-latex style markup (`#mu`, `fb^{-1}`, `#sqrt{s}`) to plain Unicode.

const SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "\u{03B1}"),
    ("beta", "\u{03B2}"),
    ("gamma", "\u{03B3}"),
    ("delta", "\u{03B4}"),
    ("epsilon", "\u{03B5}"),
    ("eta", "\u{03B7}"),
    ("theta", "\u{03B8}"),
    ("lambda", "\u{03BB}"),
    ("mu", "\u{03BC}"),
    ("nu", "\u{03BD}"),
    ("pi", "\u{03C0}"),
    ("rho", "\u{03C1}"),
    ("sigma", "\u{03C3}"),
    ("tau", "\u{03C4}"),
    ("phi", "\u{03C6}"),
    ("chi", "\u{03C7}"),
    ("psi", "\u{03C8}"),
    ("omega", "\u{03C9}"),
    ("Gamma", "\u{0393}"),
    ("Delta", "\u{0394}"),
    ("Sigma", "\u{03A3}"),
    ("Omega", "\u{03A9}"),
    ("ell", "\u{2113}"),
    ("pm", "\u{00B1}"),
    ("times", "\u{00D7}"),
    ("rightarrow", "\u{2192}"),
    ("geq", "\u{2265}"),
    ("leq", "\u{2264}"),
];

pub(crate) fn superscript_char(c: char) -> Option<char> {
    Some(match c {
        '-' => '\u{207B}',
        '+' => '\u{207A}',
        '0' => '\u{2070}',
        '1' => '\u{00B9}',
        '2' => '\u{00B2}',
        '3' => '\u{00B3}',
        '4' => '\u{2074}',
        '5' => '\u{2075}',
        '6' => '\u{2076}',
        '7' => '\u{2077}',
        '8' => '\u{2078}',
        '9' => '\u{2079}',
        _ => return None,
    })
}

fn subscript_char(c: char) -> Option<char> {
    Some(match c {
        '-' => '\u{208B}',
        '+' => '\u{208A}',
        '0'..='9' => char::from_u32('\u{2080}' as u32 + c.to_digit(10)?)?,
        _ => return None,
    })
}

/// Read a `{...}` group starting at `chars[i] == '{'`; returns (content, next index).
fn read_group(chars: &[char], i: usize) -> Option<(String, usize)> {
    if chars.get(i) != Some(&'{') {
        return None;
    }
    let mut depth = 0usize;
    for (j, &c) in chars.iter().enumerate().skip(i) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((chars[i + 1..j].iter().collect(), j + 1));
                }
            }
            _ => {}
        }
    }
    None
}

fn shift(content: &str, map: fn(char) -> Option<char>, marker: char) -> String {
    let plain = to_unicode(content);
    match plain.chars().map(map).collect::<Option<String>>() {
        Some(s) => s,
        None => format!("{marker}({plain})"),
    }
}

/// Convert markup to Unicode. Unknown commands are kept verbatim.
pub fn to_unicode(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '#' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_alphabetic() {
                    end += 1;
                }
                let name: String = chars[start..end].iter().collect();
                match name.as_str() {
                    "bf" | "it" | "mathrm" => {
                        if let Some((inner, next)) = read_group(&chars, end) {
                            out.push_str(&to_unicode(&inner));
                            i = next;
                            continue;
                        }
                    }
                    "sqrt" => {
                        if let Some((inner, next)) = read_group(&chars, end) {
                            out.push('\u{221A}');
                            out.push_str(&to_unicode(&inner));
                            i = next;
                            continue;
                        }
                    }
                    _ => {
                        if let Some((_, sym)) = SYMBOLS.iter().find(|(n, _)| *n == name) {
                            out.push_str(sym);
                            i = end;
                            continue;
                        }
                    }
                }
                out.push('#');
                i += 1;
            }
            '^' | '_' => match read_group(&chars, i + 1) {
                Some((inner, next)) => {
                    if c == '^' {
                        out.push_str(&shift(&inner, superscript_char, '^'));
                    } else {
                        out.push_str(&shift(&inner, subscript_char, '_'));
                    }
                    i = next;
                }
                None => {
                    out.push(c);
                    i += 1;
                }
            },
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lumi_units() {
        assert_eq!(to_unicode("138 fb^{-1} (13 TeV)"), "138 fb\u{207B}\u{00B9} (13 TeV)");
    }

    #[test]
    fn greek_and_sqrt() {
        assert_eq!(to_unicode("#mu-channel"), "\u{03BC}-channel");
        assert_eq!(to_unicode("#sqrt{s} = 13 TeV"), "\u{221A}s = 13 TeV");
        assert_eq!(to_unicode("#bf{CMS}"), "CMS");
    }

    #[test]
    fn unmappable_scripts_fall_back() {
        assert_eq!(to_unicode("p_{T}"), "p_(T)");
        assert_eq!(to_unicode("x^2"), "x^2");
        assert_eq!(to_unicode("#unknown"), "#unknown");
    }
}
