//! `s.*`: string manipulation.
//!
//! Positions and lengths count Unicode scalar values, not bytes. Negative
//! positions count from the end of the string.

use pfa_patterns::{Lifespan, Pattern, Signature, Version};

use super::args::{array, boolean, double, int, string, take};
use crate::{Builtin, BuiltinFn, CallBoundary, CallContext, EvalError, EvalResult, Value};

pub(super) fn provide() -> Vec<Builtin> {
    let search = |name: &'static str, base: i32, ret: Pattern, body: BuiltinFn| {
        Builtin::new(
            name,
            base,
            vec![Signature::new(
                [("haystack", Pattern::String), ("needle", Pattern::String)],
                ret,
            )],
            body,
        )
    };
    let edit = |name: &'static str, base: i32, params: &[&'static str], body: BuiltinFn| {
        Builtin::new(
            name,
            base,
            vec![Signature::new(
                params.iter().map(|&p| (p, Pattern::String)),
                Pattern::String,
            )],
            body,
        )
    };
    let integer = |lifespan: &Lifespan| {
        vec![
            Signature::new([("x", Pattern::Long)], Pattern::String)
                .with_lifespan(lifespan.clone()),
            Signature::new(
                [
                    ("x", Pattern::Long),
                    ("width", Pattern::Int),
                    ("zeroPad", Pattern::Boolean),
                ],
                Pattern::String,
            )
            .with_lifespan(lifespan.clone()),
        ]
    };
    let integer_number = Lifespan {
        deprecation: Some(Version::new(0, 7, 2)),
        death: Some(Version::new(0, 9, 0)),
        contingency: Some("use s.int for integers".to_owned()),
        ..Lifespan::always()
    };
    let maybe_int = || Pattern::union([Pattern::Int, Pattern::Null]);
    let mut number = integer(&integer_number);
    number.push(Signature::new(
        [
            ("x", Pattern::Double),
            ("width", maybe_int()),
            ("precision", maybe_int()),
        ],
        Pattern::String,
    ));
    number.push(Signature::new(
        [
            ("x", Pattern::Double),
            ("width", maybe_int()),
            ("precision", maybe_int()),
            ("minNoExp", Pattern::Double),
            ("maxNoExp", Pattern::Double),
        ],
        Pattern::String,
    ));

    vec![
        Builtin::new(
            "s.len",
            39000,
            vec![Signature::new([("s", Pattern::String)], Pattern::Int)],
            len,
        ),
        Builtin::new(
            "s.substr",
            39010,
            vec![Signature::new(
                [
                    ("s", Pattern::String),
                    ("start", Pattern::Int),
                    ("end", Pattern::Int),
                ],
                Pattern::String,
            )],
            substr,
        ),
        Builtin::new(
            "s.substrto",
            39020,
            vec![Signature::new(
                [
                    ("s", Pattern::String),
                    ("start", Pattern::Int),
                    ("end", Pattern::Int),
                    ("replacement", Pattern::String),
                ],
                Pattern::String,
            )],
            substr_to,
        ),
        search("s.contains", 39030, Pattern::Boolean, contains),
        search("s.count", 39040, Pattern::Int, count),
        search("s.index", 39050, Pattern::Int, index),
        search("s.rindex", 39060, Pattern::Int, rindex),
        search("s.startswith", 39070, Pattern::Boolean, starts_with),
        search("s.endswith", 39080, Pattern::Boolean, ends_with),
        Builtin::new(
            "s.join",
            39090,
            vec![Signature::new(
                [
                    ("array", Pattern::array(Pattern::String)),
                    ("sep", Pattern::String),
                ],
                Pattern::String,
            )],
            join,
        ),
        Builtin::new(
            "s.split",
            39100,
            vec![Signature::new(
                [("s", Pattern::String), ("sep", Pattern::String)],
                Pattern::array(Pattern::String),
            )],
            split,
        ),
        Builtin::new("s.hex", 39110, integer(&Lifespan::always()), hex),
        Builtin::new("s.number", 39120, number, number_to_string),
        edit("s.concat", 39130, &["x", "y"], concat),
        Builtin::new(
            "s.repeat",
            39140,
            vec![Signature::new(
                [("s", Pattern::String), ("n", Pattern::Int)],
                Pattern::String,
            )],
            repeat,
        ),
        edit("s.lower", 39150, &["s"], lower),
        edit("s.upper", 39160, &["s"], upper),
        edit("s.lstrip", 39170, &["s", "chars"], lstrip),
        edit("s.rstrip", 39180, &["s", "chars"], rstrip),
        edit("s.strip", 39190, &["s", "chars"], strip),
        edit("s.replaceall", 39200, &["s", "original", "replacement"], replace_all),
        edit("s.replacefirst", 39210, &["s", "original", "replacement"], replace_first),
        edit("s.replacelast", 39220, &["s", "original", "replacement"], replace_last),
        edit("s.translate", 39230, &["s", "oldchars", "newchars"], translate),
        Builtin::new("s.int", 39240, integer(&Lifespan::always()), int_to_string),
    ]
}

/// Character count as an `int`, saturating.
fn char_count(s: &str) -> i32 {
    i32::try_from(s.chars().count()).unwrap_or(i32::MAX)
}

/// Byte offset of the `n`th character, or the end of the string.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(at, _)| at)
}

/// Clamp a `[start, end)` character range the way slicing does.
///
/// Negative ends count back from `len`; an end before the start collapses
/// to an empty range at the start.
fn char_range(len: usize, start: i32, end: i32) -> (usize, usize) {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let clamp = |at: i32| {
        let at = i64::from(at);
        let at = if at < 0 { len + at } else { at };
        usize::try_from(at.clamp(0, len)).unwrap_or(0)
    };
    let (start, end) = (clamp(start), clamp(end));
    (start, end.max(start))
}

fn strings<'v, const N: usize>(
    ctx: &CallContext<'_>,
    args: &'v [Value],
) -> Result<[&'v str; N], EvalError> {
    let args: &[Value; N] = take(ctx, args)?;
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = string(ctx, arg)?;
    }
    Ok(out)
}

fn len(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s] = strings(ctx, args)?;
    Ok(Value::Int(char_count(s)))
}

/// The byte range of a character range of `s`.
fn byte_range(
    ctx: &CallContext<'_>,
    s: &str,
    start: &Value,
    end: &Value,
) -> Result<(usize, usize), EvalError> {
    let (start, end) = char_range(s.chars().count(), int(ctx, start)?, int(ctx, end)?);
    Ok((byte_offset(s, start), byte_offset(s, end)))
}

fn substr(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, start, end] = take(ctx, args)?;
    let s = string(ctx, s)?;
    let (start, end) = byte_range(ctx, s, start, end)?;
    Ok(Value::string(&s[start..end]))
}

/// Replace a character range of `s`.
fn substr_to(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, start, end, replacement] = take(ctx, args)?;
    let s = string(ctx, s)?;
    let (start, end) = byte_range(ctx, s, start, end)?;
    Ok(Value::string(format!(
        "{}{}{}",
        &s[..start],
        string(ctx, replacement)?,
        &s[end..]
    )))
}

fn contains(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    Ok(Value::Boolean(haystack.contains(needle)))
}

/// Non-overlapping occurrences; zero when either string is empty.
fn count(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    let n = if haystack.is_empty() || needle.is_empty() {
        0
    } else {
        haystack.matches(needle).count()
    };
    Ok(Value::Int(i32::try_from(n).unwrap_or(i32::MAX)))
}

/// Character position of a byte offset, or -1.
fn position(haystack: &str, found: Option<usize>) -> Value {
    Value::Int(found.map_or(-1, |at| char_count(&haystack[..at])))
}

fn index(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    Ok(position(haystack, haystack.find(needle)))
}

fn rindex(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    Ok(position(haystack, haystack.rfind(needle)))
}

fn starts_with(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    Ok(Value::Boolean(haystack.starts_with(needle)))
}

fn ends_with(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [haystack, needle] = strings(ctx, args)?;
    Ok(Value::Boolean(haystack.ends_with(needle)))
}

fn join(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [items, sep] = take(ctx, args)?;
    let items = array(ctx, items)?
        .iter()
        .map(|item| string(ctx, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::string(items.join(string(ctx, sep)?)))
}

/// Split on every `sep`; an empty separator yields an empty array.
fn split(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, sep] = strings(ctx, args)?;
    let parts = if sep.is_empty() {
        Vec::new()
    } else {
        s.split(sep).map(Value::string).collect()
    };
    Ok(Value::array(parts))
}

#[derive(Copy, Clone)]
enum Radix {
    Decimal,
    Hex,
}

/// Render `x` right-aligned in `width` columns, left-aligned when `width`
/// is negative, or zero-padded. A zero width renders nothing.
fn pad_integer(
    ctx: &CallContext<'_>,
    x: i64,
    width: i32,
    zero_pad: bool,
    radix: Radix,
) -> Result<String, EvalError> {
    if zero_pad && width < 0 {
        return Err(ctx.fail(0, "negative width cannot be used with zero-padding"));
    }
    let w = usize::try_from(width.unsigned_abs()).unwrap_or(usize::MAX);
    Ok(match (radix, zero_pad, width < 0) {
        _ if width == 0 => String::new(),
        (Radix::Decimal, true, _) => format!("{x:0w$}"),
        (Radix::Hex, true, _) => format!("{x:0w$x}"),
        (Radix::Decimal, false, true) => format!("{x:<w$}"),
        (Radix::Hex, false, true) => format!("{x:<w$x}"),
        (Radix::Decimal, false, false) => format!("{x:>w$}"),
        (Radix::Hex, false, false) => format!("{x:>w$x}"),
    })
}

/// The `(x)` and `(x, width, zeroPad)` integer forms.
fn format_integer(
    ctx: &CallContext<'_>,
    args: &[Value],
    radix: Radix,
) -> Result<String, EvalError> {
    let long = |value: &Value| value.as_long().ok_or_else(|| ctx.mismatch("a long"));
    match args {
        [x] => {
            let x = long(x)?;
            Ok(match radix {
                Radix::Decimal => x.to_string(),
                Radix::Hex => format!("{x:x}"),
            })
        }
        [x, width, zero_pad] => pad_integer(
            ctx,
            long(x)?,
            int(ctx, width)?,
            boolean(ctx, zero_pad)?,
            radix,
        ),
        _ => Err(ctx.arity(3, args.len())),
    }
}

fn hex(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    if args.first().and_then(Value::as_long).is_some_and(|x| x < 0) {
        return Err(ctx.fail(1, "negative number"));
    }
    format_integer(ctx, args, Radix::Hex).map(Value::string)
}

fn int_to_string(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    format_integer(ctx, args, Radix::Decimal).map(Value::string)
}

/// An `int` or `null` argument.
fn optional_int(ctx: &CallContext<'_>, value: &Value) -> Result<Option<i32>, EvalError> {
    match value {
        Value::Null => Ok(None),
        other => int(ctx, other).map(Some),
    }
}

/// Integers format like `s.int`; doubles in fixed notation when their
/// magnitude lies in `[minNoExp, maxNoExp]` (or is zero), otherwise in
/// exponential notation. Without a precision, six digits are rendered and
/// trailing zeros are dropped.
fn number_to_string(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    if matches!(args.first(), Some(Value::Int(_) | Value::Long(_))) {
        return format_integer(ctx, args, Radix::Decimal).map(Value::string);
    }
    let (x, width, precision, min_no_exp, max_no_exp) = match args {
        [x, width, precision] => (x, width, precision, 0.0001, 100_000.0),
        [x, width, precision, min, max] => (
            x,
            width,
            precision,
            double(ctx, min)?,
            double(ctx, max)?,
        ),
        _ => return Err(ctx.arity(3, args.len())),
    };
    let x = double(ctx, x)?;
    let width = optional_int(ctx, width)?;
    let precision = optional_int(ctx, precision)?;
    if precision.is_some_and(|p| p < 0) {
        return Err(ctx.fail(1, "negative precision"));
    }
    let digits = precision.map_or(6, |p| usize::try_from(p).unwrap_or(0));

    // -0.0 renders as 0
    let x = if x == 0.0 { 0.0 } else { x };
    let v = x.abs();
    let mut body = if v == 0.0 || (min_no_exp..=max_no_exp).contains(&v) {
        fixed_notation(x, digits)
    } else {
        exponential_notation(x, digits)
    };
    if precision.is_none() {
        body = strip_trailing_zeros(&body);
    }
    Ok(Value::string(match width {
        Some(w) if w < 0 => {
            let w = usize::try_from(w.unsigned_abs()).unwrap_or(usize::MAX);
            format!("{body:<w$}")
        }
        Some(w) => {
            let w = usize::try_from(w).unwrap_or(0);
            format!("{body:>w$}")
        }
        None => body,
    }))
}

fn non_finite(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("nan".to_owned())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "inf" } else { "-inf" }.to_owned())
    } else {
        None
    }
}

fn fixed_notation(x: f64, digits: usize) -> String {
    non_finite(x).unwrap_or_else(|| format!("{x:.digits$}"))
}

/// Mantissa with `digits` decimals and a signed exponent of at least two
/// digits, e.g. `1.500000e+07`.
fn exponential_notation(x: f64, digits: usize) -> String {
    if let Some(special) = non_finite(x) {
        return special;
    }
    let raw = format!("{x:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = match exponent.strip_prefix('-') {
                Some(magnitude) => ('-', magnitude),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{magnitude:0>2}")
        }
        None => raw,
    }
}

/// Drop trailing zeros after the decimal point, keeping at least one digit.
fn strip_trailing_zeros(body: &str) -> String {
    let Some(dot) = body.find('.') else {
        return body.to_owned();
    };
    let end = body[dot..].find('e').map_or(body.len(), |e| dot + e);
    let decimals = &body[dot + 1..end];
    let kept = decimals.trim_end_matches('0');
    let kept = if kept.is_empty() {
        &decimals[..decimals.len().min(1)]
    } else {
        kept
    };
    format!("{}{kept}{}", &body[..=dot], &body[end..])
}

fn concat(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [x, y] = strings(ctx, args)?;
    Ok(Value::string(format!("{x}{y}")))
}

/// `s` repeated `n` times; empty for `n <= 0`.
fn repeat(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, n] = take(ctx, args)?;
    let n = usize::try_from(int(ctx, n)?).unwrap_or(0);
    Ok(Value::string(string(ctx, s)?.repeat(n)))
}

fn lower(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s] = strings(ctx, args)?;
    Ok(Value::string(s.to_lowercase()))
}

fn upper(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s] = strings(ctx, args)?;
    Ok(Value::string(s.to_uppercase()))
}

fn lstrip(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, chars] = strings(ctx, args)?;
    Ok(Value::string(s.trim_start_matches(|c: char| chars.contains(c))))
}

fn rstrip(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, chars] = strings(ctx, args)?;
    Ok(Value::string(s.trim_end_matches(|c: char| chars.contains(c))))
}

fn strip(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, chars] = strings(ctx, args)?;
    Ok(Value::string(s.trim_matches(|c: char| chars.contains(c))))
}

fn replace_all(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, original, replacement] = strings(ctx, args)?;
    Ok(Value::string(s.replace(original, replacement)))
}

fn replace_first(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, original, replacement] = strings(ctx, args)?;
    Ok(Value::string(s.replacen(original, replacement, 1)))
}

fn replace_last(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, original, replacement] = strings(ctx, args)?;
    Ok(Value::string(match s.rfind(original) {
        Some(at) => format!("{}{replacement}{}", &s[..at], &s[at + original.len()..]),
        None => s.to_owned(),
    }))
}

/// Map each character of `oldchars` to the one at the same position in
/// `newchars`, deleting it when `newchars` is shorter.
fn translate(ctx: &CallContext<'_>, args: &[Value], _: &mut dyn CallBoundary) -> EvalResult {
    let [s, oldchars, newchars] = strings(ctx, args)?;
    let newchars: Vec<char> = newchars.chars().collect();
    let out: String = s
        .chars()
        .filter_map(|c| match oldchars.chars().position(|old| old == c) {
            Some(at) => newchars.get(at).copied(),
            None => Some(c),
        })
        .collect();
    Ok(Value::string(out))
}
