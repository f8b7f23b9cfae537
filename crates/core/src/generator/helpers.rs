use std::ops::RangeInclusive;

use crate::generator::Degenerate;
use crate::model::QuestionFormat;
use crate::rng::PseudoRandomStream;

/// At most this many wrong options are offered next to the correct one.
pub(crate) const MAX_DISTRACTORS: usize = 3;

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// Builds shuffled multiple-choice options; `None` for fill-in.
///
/// Distractors equal to the correct answer or to an earlier distractor are
/// dropped, and at most `MAX_DISTRACTORS` are kept.
pub(crate) fn shuffled_choices(
    format: QuestionFormat,
    rng: &mut PseudoRandomStream,
    correct: &str,
    distractors: impl IntoIterator<Item = String>,
) -> Option<Vec<String>> {
    if format == QuestionFormat::FillIn {
        return None;
    }
    let mut options = vec![correct.to_owned()];
    for candidate in distractors {
        if options.len() > MAX_DISTRACTORS {
            break;
        }
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    rng.shuffle(&mut options);
    Some(options)
}

/// Canonical option list in a fixed order, for fixed-content questions.
pub(crate) fn fixed_choices(format: QuestionFormat, options: &[&str]) -> Option<Vec<String>> {
    match format {
        QuestionFormat::MultipleChoice => Some(options.iter().map(|o| (*o).to_owned()).collect()),
        QuestionFormat::FillIn => None,
    }
}

/// Perturbed numeric distractors, filtered to `domain`, rendered by `render`.
///
/// Candidates are taken in order, so callers list the preferred
/// perturbations first and fallbacks after them.
pub(crate) fn numeric_distractors(
    correct: i64,
    candidates: &[i64],
    domain: RangeInclusive<i64>,
    render: impl Fn(i64) -> String,
) -> Vec<String> {
    let mut kept: Vec<i64> = Vec::with_capacity(MAX_DISTRACTORS);
    for &candidate in candidates {
        if kept.len() == MAX_DISTRACTORS {
            break;
        }
        if candidate != correct && domain.contains(&candidate) && !kept.contains(&candidate) {
            kept.push(candidate);
        }
    }
    kept.into_iter().map(render).collect()
}

//
// ─── OPERANDS ──────────────────────────────────────────────────────────────────
//

/// Draws `count` variable names from `pool`; a repeated name is degenerate.
pub(crate) fn distinct_vars<'a>(
    rng: &mut PseudoRandomStream,
    pool: &[&'a str],
    count: usize,
) -> Result<Vec<&'a str>, Degenerate> {
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let name = *rng.pick(pool);
        if picked.contains(&name) {
            return Err(Degenerate);
        }
        picked.push(name);
    }
    Ok(picked)
}

/// Draws an integer in `0..max` as `i64`.
pub(crate) fn draw(rng: &mut PseudoRandomStream, max: usize) -> i64 {
    i64::try_from(rng.next_int(max)).unwrap_or(0)
}

//
// ─── RADIX RENDERING ───────────────────────────────────────────────────────────
//

/// Renders a non-negative value in base 2, 8, 10 or 16 (upper-case hex).
pub(crate) fn radix(value: i64, base: u32) -> String {
    match base {
        2 => format!("{value:b}"),
        8 => format!("{value:o}"),
        16 => format!("{value:X}"),
        _ => value.to_string(),
    }
}

/// Zero-padded binary of the given width.
pub(crate) fn binary_padded(value: i64, width: usize) -> String {
    format!("{value:0width$b}")
}

/// Repeated-division working, one line per step, e.g. `13 ÷ 2 = 6 remainder 1`.
pub(crate) fn division_steps(value: i64, base: i64) -> String {
    if value == 0 {
        return format!("0 ÷ {base} = 0 remainder 0");
    }
    let mut lines = Vec::new();
    let mut n = value;
    while n > 0 {
        let remainder = n % base;
        lines.push(format!(
            "{n} ÷ {base} = {} remainder {}",
            n / base,
            radix(remainder, 16)
        ));
        n /= base;
    }
    lines.join("\n")
}

/// Positional expansion of a digit string, e.g. `1×2² + 0×2¹ + 1×2⁰`.
pub(crate) fn positional_expansion(digits: &str, base: u32) -> String {
    let len = digits.chars().count();
    digits
        .chars()
        .enumerate()
        .map(|(i, digit)| {
            let value = digit.to_digit(base).unwrap_or(0);
            format!("{value}×{base}{}", superscript(len - 1 - i))
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

fn superscript(n: usize) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .chars()
        .map(|c| c.to_digit(10).map_or(c, |d| DIGITS[d as usize]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_distractors_filter_domain_and_duplicates() {
        let got = numeric_distractors(0, &[1, -1, 2, 1, -2, 3], 0..=255, |v| v.to_string());
        assert_eq!(got, vec!["1", "2", "3"]);

        let edge = numeric_distractors(255, &[256, 254, 257, 253], 0..=255, |v| v.to_string());
        assert_eq!(edge, vec!["254", "253"]);
    }

    #[test]
    fn shuffled_choices_keep_correct_and_drop_repeats() {
        let mut rng = PseudoRandomStream::new(9);
        let options = shuffled_choices(
            QuestionFormat::MultipleChoice,
            &mut rng,
            "A",
            ["A", "B", "B", "C", "D", "E"].map(String::from),
        )
        .unwrap();
        assert_eq!(options.len(), 4);
        assert!(options.contains(&"A".to_owned()));
        assert!(!options.contains(&"E".to_owned()));
    }

    #[test]
    fn fill_in_has_no_choices() {
        let mut rng = PseudoRandomStream::new(9);
        let state = rng.clone();
        assert!(shuffled_choices(QuestionFormat::FillIn, &mut rng, "A", Vec::new()).is_none());
        assert_eq!(rng, state);
    }

    #[test]
    fn distinct_vars_reports_collisions() {
        let mut rng = PseudoRandomStream::new(0);
        let single = distinct_vars(&mut rng, &["A"], 2);
        assert_eq!(single, Err(Degenerate));
    }

    #[test]
    fn radix_rendering() {
        assert_eq!(radix(255, 16), "FF");
        assert_eq!(radix(8, 8), "10");
        assert_eq!(binary_padded(5, 8), "00000101");
        assert_eq!(positional_expansion("101", 2), "1×2² + 0×2¹ + 1×2⁰");
        assert_eq!(positional_expansion("1A", 16), "1×16¹ + 10×16⁰");
        assert_eq!(division_steps(6, 2), "6 ÷ 2 = 3 remainder 0\n3 ÷ 2 = 1 remainder 1\n1 ÷ 2 = 0 remainder 1");
    }
}
