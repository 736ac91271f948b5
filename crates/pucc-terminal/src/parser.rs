//! Argument parser.
//!
//! Turns the text after a command name into positional and `key=value`
//! arguments. Parsing never fails: malformed syntax degrades to positional
//! tokens or verbatim strings.
//!
//! ```text
//! new customer                       -> positional ["new", "customer"]
//! name="John Smith" balance=5400     -> named {name: "John Smith", balance: 5400}
//! customer name='Jo' vip=true        -> positional ["customer"], named {name: "Jo", vip: true}
//! ```
//!
//! Quotes are `"` or `'`, do not nest, and have no escape syntax.

use std::collections::HashMap;
use std::fmt;

/// A typed named-argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ArgValue {
    /// Coerce a raw value: `true`/`false`, then integer, then float, else string.
    pub fn coerce(raw: String) -> Self {
        match raw.as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {},
        }
        if is_integer(&raw) {
            if let Ok(n) = raw.parse::<i64>() {
                return Self::Int(n);
            }
            // Out of i64 range: keep the magnitude as a float.
            if let Ok(f) = raw.parse::<f64>() {
                return Self::Float(f);
            }
        } else if is_float(&raw)
            && let Ok(f) = raw.parse::<f64>()
        {
            return Self::Float(f);
        }
        Self::Str(raw)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Parsed command arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Positional arguments in encounter order.
    pub positional: Vec<String>,
    /// `key=value` arguments. A repeated key keeps the last value.
    pub named: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    /// Look up a named argument.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.named.get(key)
    }

    /// True when there are neither positional nor named arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Parse an argument string.
pub fn parse(input: &str) -> ParsedArgs {
    let mut args = ParsedArgs::default();
    let chars: Vec<char> = input.trim().chars().collect();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        if let Some((key, after_eq)) = match_key(&chars, i) {
            i = after_eq;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let (value, next) = read_value(&chars, i);
            i = next;
            args.named.insert(key, ArgValue::coerce(value));
        } else {
            let (token, next) = read_positional(&chars, i);
            i = next;
            if !token.is_empty() {
                args.positional.push(token);
            }
        }
    }

    args
}

/// Match `identifier\s*=` at `start`, returning the key and the index after `=`.
fn match_key(chars: &[char], start: usize) -> Option<(String, usize)> {
    let first = *chars.get(start)?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let mut end = start + 1;
    while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    let mut eq = end;
    while eq < chars.len() && chars[eq].is_whitespace() {
        eq += 1;
    }
    if chars.get(eq) == Some(&'=') {
        Some((chars[start..end].iter().collect(), eq + 1))
    } else {
        None
    }
}

/// Read a named value: quoted if it opens with a quote, else up to whitespace.
fn read_value(chars: &[char], mut i: usize) -> (String, usize) {
    let quote = match chars.get(i) {
        Some(&q) if q == '"' || q == '\'' => {
            i += 1;
            Some(q)
        },
        _ => None,
    };
    let mut value = String::new();
    while i < chars.len() {
        let ch = chars[i];
        match quote {
            Some(q) if ch == q => {
                i += 1;
                break;
            },
            None if ch.is_whitespace() => break,
            _ => value.push(ch),
        }
        i += 1;
    }
    (value, i)
}

/// Read a positional token. A quote may open anywhere in the token; its
/// closing quote ends the token.
fn read_positional(chars: &[char], mut i: usize) -> (String, usize) {
    let mut token = String::new();
    let mut quote: Option<char> = None;
    while i < chars.len() {
        let ch = chars[i];
        match quote {
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                i += 1;
                continue;
            },
            Some(q) if ch == q => {
                i += 1;
                break;
            },
            None if ch.is_whitespace() => break,
            _ => {},
        }
        token.push(ch);
        i += 1;
    }
    (token, i)
}

/// `-?[0-9]+`
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]*\.[0-9]+`
fn is_float(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    match body.split_once('.') {
        Some((whole, frac)) => {
            whole.bytes().all(|b| b.is_ascii_digit())
                && !frac.is_empty()
                && frac.bytes().all(|b| b.is_ascii_digit())
        },
        None => false,
    }
}
