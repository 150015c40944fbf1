//! Host-backed packages: formatted output and string helpers

use std::io::Write;

use super::Package;
use crate::error::type_name;
use crate::value::{BuiltinFn, Value};

/// Canonical path of the formatted-output package.
pub const FMT: &str = "std::fmt";

/// Canonical path of the string package.
pub const STRINGS: &str = "std::strings";

/// The `fmt` package.
pub fn fmt_package() -> Package {
    let mut pkg = Package::new(FMT);
    pkg.define(BuiltinFn::new("Println", -1, println));
    pkg.define(BuiltinFn::new("Print", -1, print));
    pkg.define(BuiltinFn::new("Sprint", -1, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::from(sprint(args)))
    }));
    pkg.define(BuiltinFn::new("Sprintln", -1, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::from(sprintln(args)))
    }));
    pkg
}

/// The `strings` package.
pub fn strings_package() -> Package {
    let mut pkg = Package::new(STRINGS);
    pkg.define(BuiltinFn::new("ToUpper", 1, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::from(expect_str(args, 0)?.to_uppercase()))
    }));
    pkg.define(BuiltinFn::new("ToLower", 1, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::from(expect_str(args, 0)?.to_lowercase()))
    }));
    pkg.define(BuiltinFn::new("TrimSpace", 1, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::from(expect_str(args, 0)?.trim()))
    }));
    pkg.define(BuiltinFn::new("Repeat", 2, |_: &mut dyn Write, args: &[Value]| {
        let s = expect_str(args, 0)?;
        let count = match args.get(1) {
            Some(Value::I64(n)) => {
                usize::try_from(*n).map_err(|_| format!("negative Repeat count {}", n))?
            }
            Some(other) => return Err(format!("argument 1 must be int, got {}", type_name(other))),
            None => return Err("missing argument 1".to_string()),
        };
        Ok(Value::from(repeat(s, count)?))
    }));
    pkg.define(BuiltinFn::new("Contains", 2, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::Bool(expect_str(args, 0)?.contains(expect_str(args, 1)?)))
    }));
    pkg.define(BuiltinFn::new("HasPrefix", 2, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::Bool(expect_str(args, 0)?.starts_with(expect_str(args, 1)?)))
    }));
    pkg.define(BuiltinFn::new("HasSuffix", 2, |_: &mut dyn Write, args: &[Value]| {
        Ok(Value::Bool(expect_str(args, 0)?.ends_with(expect_str(args, 1)?)))
    }));
    pkg
}

// ═══════════════════════════════════════════════════════════════════════
// Printing
// ═══════════════════════════════════════════════════════════════════════

/// Write the arguments space-joined and newline-terminated.
pub fn println(out: &mut dyn Write, args: &[Value]) -> Result<Value, String> {
    out.write_all(sprintln(args).as_bytes())
        .map_err(|e| e.to_string())?;
    Ok(Value::Invalid)
}

/// Write the arguments, spaced only between two non-string operands.
pub fn print(out: &mut dyn Write, args: &[Value]) -> Result<Value, String> {
    out.write_all(sprint(args).as_bytes())
        .map_err(|e| e.to_string())?;
    Ok(Value::Invalid)
}

/// Format like `print`: a space separates two adjacent operands when
/// neither is a string.
pub fn sprint(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_string() && !args[i - 1].is_string() {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
    }
    out
}

/// Format like `println`: always space-separated, newline-terminated.
pub fn sprintln(args: &[Value]) -> String {
    let mut out = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    out.push('\n');
    out
}

fn expect_str(args: &[Value], index: usize) -> Result<&str, String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!(
            "argument {} must be string, got {}",
            index,
            type_name(other)
        )),
        None => Err(format!("missing argument {}", index)),
    }
}

/// `s` repeated `count` times, failing instead of aborting when the result
/// cannot be allocated.
fn repeat(s: &str, count: usize) -> Result<String, String> {
    if s.is_empty() || count == 0 {
        return Ok(String::new());
    }
    let len = s
        .len()
        .checked_mul(count)
        .ok_or_else(|| "Repeat output length overflow".to_string())?;

    let mut out = String::new();
    out.try_reserve_exact(len)
        .map_err(|_| "Repeat output length overflow".to_string())?;
    for _ in 0..count {
        out.push_str(s);
    }
    Ok(out)
}
