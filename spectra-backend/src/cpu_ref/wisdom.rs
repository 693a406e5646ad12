//! Wisdom of the reference engine: the set of problems it has measured,
//! rendered as
//!
//! ```text
//! (spectra-ref-wisdom
//!   (c2c-forward 8:1:1)
//!   (r2c 4:4:3 3:1:1 / 2:16:12)
//! )
//! ```

use std::{collections::BTreeSet, fs, path::Path};

use spectra_hal::oep::WisdomImpl;

use crate::cpu_ref::{FFTRef, engine::state};

const HEADER: &str = "(spectra-ref-wisdom";

fn render(problems: &BTreeSet<String>) -> String {
    let mut text: String = String::from(HEADER);
    text.push('\n');
    for problem in problems {
        text.push_str("  (");
        text.push_str(problem);
        text.push_str(")\n");
    }
    text.push_str(")\n");
    text
}

/// Problems listed in `text`, `None` if it is not reference wisdom.
fn parse(text: &str) -> Option<Vec<String>> {
    let body: &str = text.trim().strip_prefix(HEADER)?.strip_suffix(')')?;
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let problem: &str = line.strip_prefix('(')?.strip_suffix(')')?;
            (!problem.is_empty() && !problem.contains(['(', ')'])).then(|| problem.to_string())
        })
        .collect()
}

/// Merges the problems of `text` into the planner's wisdom. Nothing is
/// merged if any line is malformed.
fn import(text: &str) -> bool {
    match parse(text) {
        Some(problems) => {
            state().wisdom.extend(problems);
            true
        }
        None => false,
    }
}

unsafe impl WisdomImpl<Self> for FFTRef {
    fn export_wisdom_to_string_impl() -> Option<String> {
        Some(render(&state().wisdom))
    }

    fn export_wisdom_to_file_impl(path: &Path) -> bool {
        let text: String = render(&state().wisdom);
        fs::write(path, text).is_ok()
    }

    fn import_wisdom_from_string_impl(wisdom: &str) -> bool {
        import(wisdom)
    }

    fn import_wisdom_from_file_impl(path: &Path) -> bool {
        fs::read_to_string(path).is_ok_and(|text| import(&text))
    }

    /// The reference engine has no system-wide wisdom.
    fn import_system_wisdom_impl() -> bool {
        false
    }

    fn forget_wisdom_impl() {
        state().wisdom.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_then_parse() {
        let problems: BTreeSet<String> = ["c2c-forward 8:1:1", "r2c 4:4:3 3:1:1 / 2:16:12"]
            .into_iter()
            .map(String::from)
            .collect();
        let text: String = render(&problems);
        assert!(text.starts_with(HEADER));
        let parsed: BTreeSet<String> = parse(&text).unwrap().into_iter().collect();
        assert_eq!(parsed, problems);
    }

    #[test]
    fn empty_wisdom_is_valid() {
        assert_eq!(parse(&render(&BTreeSet::new())), Some(vec![]));
    }

    #[test]
    fn malformed_text_is_rejected() {
        for text in [
            "",
            "not wisdom at all",
            "(not wisdom",
            "(spectra-ref-wisdom\n  (c2c 8:1:1)\n",
            "(spectra-ref-wisdom\n  c2c 8:1:1\n)",
            "(spectra-ref-wisdom\n  ()\n)",
            "(fftw-3.3.10 fftw_wisdom)",
        ] {
            assert!(parse(text).is_none(), "{text:?}");
        }
    }
}
