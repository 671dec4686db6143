use crate::error::SolverError;
use crate::model::Model;
use crate::result::SolverResult;

/// Parse a solver's stdout output into a `SolverResult`.
///
/// Expected output format:
/// - First line: `sat`, `unsat`, or `unknown`
/// - If `sat`: subsequent lines contain the model from `(get-model)`
///
/// An `(error "...")` line ahead of the answer means the solver rejected the
/// input; it is reported as a process error carrying the message.
pub fn parse_solver_output(stdout: &str, stderr: &str) -> Result<SolverResult, SolverError> {
    let stdout = stdout.trim();

    if stdout.is_empty() {
        if stderr.contains("timeout") {
            return Ok(SolverResult::Unknown("timeout".to_string()));
        }
        return Err(SolverError::ParseError(format!(
            "Empty solver output. stderr: {stderr}"
        )));
    }

    let first_line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if first_line.starts_with("(error") {
        return Err(SolverError::ProcessError(extract_error_message(first_line)));
    }

    match first_line {
        "unsat" => Ok(SolverResult::Unsat),
        "sat" => {
            let model = parse_model(stdout)?;
            Ok(SolverResult::Sat(model))
        }
        "unknown" => Ok(SolverResult::Unknown(extract_unknown_reason(stdout, stderr))),
        "timeout" => Ok(SolverResult::Unknown("timeout".to_string())),
        _ => Err(SolverError::ParseError(format!(
            "Unexpected solver output: {first_line}"
        ))),
    }
}

/// Pull the quoted message out of `(error "...")`.
fn extract_error_message(line: &str) -> String {
    match (line.find('"'), line.rfind('"')) {
        (Some(start), Some(end)) if end > start => line[start + 1..end].to_string(),
        _ => line.to_string(),
    }
}

/// Extract the reason string for an "unknown" result.
///
/// A `(:reason-unknown ...)` reply wins anywhere in the output. Otherwise the
/// first line after `unknown` is taken, unless it opens a model block: Z3 may
/// still print a (partial) model after `unknown`, and its text is no reason.
fn extract_unknown_reason(stdout: &str, stderr: &str) -> String {
    let after_unknown = || {
        stdout
            .lines()
            .skip_while(|line| line.trim() != "unknown")
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
    };

    let explicit = after_unknown().find_map(|line| line.strip_prefix("(:reason-unknown"));
    let bare = || {
        after_unknown()
            .take_while(|line| !starts_model_block(line))
            .find(|line| !line.contains("model is not available"))
    };

    let reason = match explicit {
        Some(reply) => Some(reply.trim().trim_end_matches(')').trim().trim_matches('"')),
        None => bare().map(|line| {
            line.trim_start_matches('(')
                .trim_end_matches(')')
                .trim_matches('"')
        }),
    };

    match reason {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ if !stderr.trim().is_empty() => stderr.trim().to_string(),
        _ => "unknown".to_string(),
    }
}

fn starts_model_block(line: &str) -> bool {
    line == "(" || line.starts_with("(define-fun") || line.starts_with("(model")
}

/// Parse a model from solver output.
///
/// Two layouts are accepted, the bare list used by Z3 4.15+:
/// ```text
/// (
///   (define-fun x () Int
///     5)
/// )
/// ```
/// and the older `(model ...)` wrapper:
/// ```text
/// (model
///   (define-fun x () Int 5)
/// )
/// ```
///
/// Only nullary `define-fun` entries (constants) are collected.
fn parse_model(output: &str) -> Result<Option<Model>, SolverError> {
    if !output.contains("(define-fun ") {
        return Ok(None);
    }

    let model_text = find_model_block(output);
    let mut assignments = Vec::new();
    let mut pos = 0;

    while let Some(def_pos) = model_text[pos..].find("(define-fun ") {
        let abs_pos = pos + def_pos;
        let after_define = abs_pos + "(define-fun ".len();

        match find_sexp_end(model_text, abs_pos) {
            Some(end) => {
                // `end` points after the closing ')'
                let body = &model_text[after_define..end - 1];
                if let Some((name, value)) = parse_define_fun(body) {
                    assignments.push((name, value));
                }
                pos = end;
            }
            None => {
                return Err(SolverError::ParseError(format!(
                    "Unbalanced model entry: {}",
                    &model_text[abs_pos..]
                )));
            }
        }
    }

    if assignments.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Model::with_assignments(assignments)))
    }
}

/// Find the model block in the output text.
fn find_model_block(output: &str) -> &str {
    if let Some(start) = output.find("(model") {
        return &output[start..];
    }

    // Skip the leading `sat` line
    let after_sat = output
        .trim_start()
        .strip_prefix("sat")
        .unwrap_or(output)
        .trim();
    if after_sat.starts_with('(') {
        after_sat
    } else {
        output
    }
}

/// Index just past a `|quoted symbol|` starting at `start`.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() && bytes[i] != b'|' {
        i += 1;
    }
    (i + 1).min(bytes.len())
}

/// Find the end of an S-expression starting at `start`.
/// Returns the index AFTER the closing paren.
fn find_sexp_end(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if start >= bytes.len() || bytes[start] != b'(' {
        return None;
    }

    let mut depth = 1;
    let mut i = start + 1;
    while i < bytes.len() && depth > 0 {
        match bytes[i] {
            b'|' => {
                i = skip_quoted(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        i += 1;
    }

    if depth == 0 { Some(i) } else { None }
}

/// Parse a single `define-fun` entry.
///
/// Input is the body after `(define-fun ` without the final paren, for
/// example `x () Int\n    5` or `|my var| () Int (- 3)`.
///
/// Returns `(name, value_string)` for nullary functions; names written as
/// quoted symbols are returned without the bars.
fn parse_define_fun(input: &str) -> Option<(String, String)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    let (name, rest) = if let Some(quoted) = input.strip_prefix('|') {
        let close = quoted.find('|')?;
        (quoted[..close].to_string(), &quoted[close + 1..])
    } else {
        let name_end = input.find(|c: char| c.is_whitespace())?;
        (input[..name_end].to_string(), &input[name_end..])
    };

    // Collapse whitespace in the remainder so multi-line values read as one
    let normalized: String = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    let rest = normalized.trim_start();

    // Functions with parameters are not constants
    let rest = rest.strip_prefix("()")?.trim_start();

    let value = extract_value_after_sort(rest)?;
    Some((name, value))
}

/// Skip the sort and return the value text that follows it.
///
/// - `"Int 5"` -> `"5"`
/// - `"Int (- 3)"` -> `"(- 3)"`
/// - `"Bool true"` -> `"true"`
fn extract_value_after_sort(input: &str) -> Option<String> {
    let pos = skip_sexp(input, 0)?;
    let value = input[pos..].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Skip one S-expression starting at `pos`.
/// Returns the position after the S-expression.
fn skip_sexp(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return None;
    }

    match bytes[pos] {
        b'(' => find_sexp_end(input, pos),
        b'|' => Some(skip_quoted(bytes, pos)),
        _ => {
            let mut i = pos;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'('
                && bytes[i] != b')'
            {
                i += 1;
            }
            Some(i)
        }
    }
}
