use crate::generator::helpers::{
    division_steps, draw, numeric_distractors, positional_expansion, radix, shuffled_choices,
};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

#[derive(Debug, Clone, Copy)]
enum Shape {
    DecimalToBinary,
    BinaryToDecimal,
    DecimalToHex,
    OctalToDecimal,
}

const SHAPES: [Shape; 4] = [
    Shape::DecimalToBinary,
    Shape::BinaryToDecimal,
    Shape::DecimalToHex,
    Shape::OctalToDecimal,
];

const BYTE: std::ops::RangeInclusive<i64> = 0..=255;
const NINE_BITS: std::ops::RangeInclusive<i64> = 0..=511;

/// Conversions between decimal and binary, hexadecimal and octal.
pub struct NumberConversion;

impl QuestionGenerator for NumberConversion {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let draft = match *rng.pick(&SHAPES) {
            Shape::DecimalToBinary => {
                let n = draw(rng, 256);
                let binary = radix(n, 2);
                let distractors =
                    numeric_distractors(n, &[n + 1, n - 1, n + 2, n - 2, n + 3], BYTE, |v| {
                        radix(v, 2)
                    });
                QuestionDraft {
                    id_prefix: "num-dec-bin",
                    format,
                    prompt: format!("Convert the decimal number {n} to binary."),
                    options: shuffled_choices(format, rng, &binary, distractors),
                    hint: format!("Divide {n} by 2 repeatedly and read the remainders upwards."),
                    solution: format!(
                        "Converting {n} to binary:\n\n{}\n\n\
                         Reading the remainders from bottom to top: {binary}₂\n\n\
                         Check: {} = {n}₁₀",
                        division_steps(n, 2),
                        positional_expansion(&binary, 2),
                    ),
                    correct_answer: CorrectAnswer::Single(binary),
                }
            }
            Shape::BinaryToDecimal => {
                let n = draw(rng, 256);
                let binary = radix(n, 2);
                let answer = n.to_string();
                let distractors =
                    numeric_distractors(n, &[n + 1, n - 1, n + 2, n - 2, n + 3], BYTE, |v| {
                        v.to_string()
                    });
                QuestionDraft {
                    id_prefix: "num-bin-dec",
                    format,
                    prompt: format!("Convert the binary number {binary} to decimal."),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: format!("{binary}₂ = {}", positional_expansion(&binary, 2)),
                    solution: format!(
                        "Converting {binary}₂ to decimal:\n\n{binary}₂ = {}\n      = {n}₁₀",
                        positional_expansion(&binary, 2),
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::DecimalToHex => {
                let n = draw(rng, 256);
                let hex = radix(n, 16);
                let distractors =
                    numeric_distractors(n, &[n + 1, n - 1, n + 16, n - 16, n + 2], BYTE, |v| {
                        radix(v, 16)
                    });
                QuestionDraft {
                    id_prefix: "num-dec-hex",
                    format,
                    prompt: format!(
                        "Convert the decimal number {n} to hexadecimal (upper-case digits)."
                    ),
                    options: shuffled_choices(format, rng, &hex, distractors),
                    hint: format!("Divide {n} by 16 repeatedly; remainders 10 to 15 are A to F."),
                    solution: format!(
                        "Converting {n} to hexadecimal:\n\n{}\n\n\
                         Reading the remainders from bottom to top: {hex}₁₆\n\n\
                         Check: {} = {n}₁₀",
                        division_steps(n, 16),
                        positional_expansion(&hex, 16),
                    ),
                    correct_answer: CorrectAnswer::Single(hex),
                }
            }
            Shape::OctalToDecimal => {
                let n = draw(rng, 512);
                let octal = radix(n, 8);
                let answer = n.to_string();
                let distractors =
                    numeric_distractors(n, &[n + 1, n - 1, n + 8, n - 8, n + 2], NINE_BITS, |v| {
                        v.to_string()
                    });
                QuestionDraft {
                    id_prefix: "num-oct-dec",
                    format,
                    prompt: format!("Convert the octal number {octal} to decimal."),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: format!("{octal}₈ = {}", positional_expansion(&octal, 8)),
                    solution: format!(
                        "Converting {octal}₈ to decimal:\n\n{octal}₈ = {}\n    = {n}₁₀",
                        positional_expansion(&octal, 8),
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
        };
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_42_draws_octal_operand_reproducibly() {
        let a = NumberConversion
            .generate(QuestionFormat::FillIn, &mut PseudoRandomStream::new(42))
            .unwrap();
        let b = NumberConversion
            .generate(QuestionFormat::FillIn, &mut PseudoRandomStream::new(42))
            .unwrap();
        assert_eq!(a.id_prefix, "num-oct-dec");
        assert_eq!(a, b);
    }

    #[test]
    fn answers_are_computed_from_the_prompt() {
        for seed in 0..300 {
            let draft = NumberConversion
                .generate(QuestionFormat::MultipleChoice, &mut PseudoRandomStream::new(seed))
                .unwrap();
            let answer = draft.correct_answer.as_single().unwrap();
            let operand = draft
                .prompt
                .split_whitespace()
                .nth(4)
                .unwrap()
                .trim_end_matches('.');
            let expected = match draft.id_prefix {
                "num-dec-bin" => format!("{:b}", operand.parse::<u32>().unwrap()),
                "num-bin-dec" => u32::from_str_radix(operand, 2).unwrap().to_string(),
                "num-dec-hex" => format!("{:X}", operand.parse::<u32>().unwrap()),
                "num-oct-dec" => u32::from_str_radix(operand, 8).unwrap().to_string(),
                other => panic!("unexpected shape {other}"),
            };
            assert_eq!(answer, expected, "{}", draft.prompt);
            assert!(draft.options.unwrap().len() >= 3);
        }
    }
}
