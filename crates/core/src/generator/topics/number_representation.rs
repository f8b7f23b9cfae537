use crate::generator::helpers::{
    draw, numeric_distractors, positional_expansion, radix, shuffled_choices,
};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

/// Reading 4-bit binary numbers and single hexadecimal digits as decimal.
pub struct NumberRepresentation;

impl QuestionGenerator for NumberRepresentation {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let from_hex = rng.next_int(2) == 1;
        let n = draw(rng, 16);
        let answer = n.to_string();
        let distractors =
            numeric_distractors(n, &[n + 1, n - 1, n + 2, n - 2, n + 3], 0..=15, |v| {
                v.to_string()
            });
        let options = shuffled_choices(format, rng, &answer, distractors);

        let draft = if from_hex {
            let digit = radix(n, 16);
            QuestionDraft {
                id_prefix: "num-rep-hex",
                format,
                prompt: format!("What is the decimal value of the hexadecimal digit {digit}?"),
                options,
                correct_answer: CorrectAnswer::Single(answer),
                hint: "Hex digits A to F stand for 10 to 15.".into(),
                solution: format!("{digit}₁₆ = {}\n    = {n}₁₀", positional_expansion(&digit, 16)),
            }
        } else {
            let binary = radix(n, 2);
            let expansion = positional_expansion(&binary, 2);
            QuestionDraft {
                id_prefix: "num-rep",
                format,
                prompt: format!("What is the decimal value of the binary number {binary}?"),
                options,
                correct_answer: CorrectAnswer::Single(answer),
                hint: format!("{binary}₂ = {expansion}"),
                solution: format!("{binary}₂ = {expansion}\n      = {n}₁₀"),
            }
        };
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_expansion_uses_real_powers() {
        for seed in 0..200 {
            let draft = NumberRepresentation
                .generate(QuestionFormat::FillIn, &mut PseudoRandomStream::new(seed))
                .unwrap();
            if draft.id_prefix == "num-rep" && draft.correct_answer.as_single() == Some("5") {
                assert_eq!(draft.hint, "101₂ = 1×2² + 0×2¹ + 1×2⁰");
                return;
            }
        }
        panic!("no draw of 5 in 200 seeds");
    }

    #[test]
    fn options_stay_within_a_nibble() {
        for seed in 0..200 {
            let draft = NumberRepresentation
                .generate(QuestionFormat::MultipleChoice, &mut PseudoRandomStream::new(seed))
                .unwrap();
            for option in draft.options.unwrap() {
                assert!(option.parse::<u8>().unwrap() <= 15);
            }
        }
    }
}
