use crate::generator::helpers::{binary_padded, draw, numeric_distractors, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const BITS: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Shape {
    Ones,
    Twos,
    Nines,
    Tens,
}

const SHAPES: [Shape; 4] = [Shape::Ones, Shape::Twos, Shape::Nines, Shape::Tens];

/// Radix and diminished-radix complements: 1's/2's on bytes, 9's/10's on three digits.
pub struct Complement;

impl QuestionGenerator for Complement {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let draft = match *rng.pick(&SHAPES) {
            Shape::Ones => {
                let n = draw(rng, 256);
                let ones = 255 - n;
                let (binary, answer) = (binary_padded(n, BITS), binary_padded(ones, BITS));
                let distractors =
                    numeric_distractors(ones, &[n, ones + 1, ones - 1, ones + 2], 0..=255, |v| {
                        binary_padded(v, BITS)
                    });
                QuestionDraft {
                    id_prefix: "comp-ones",
                    format,
                    prompt: format!("What is the 1's complement of the 8-bit number {binary}?"),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "The 1's complement inverts every bit.".into(),
                    solution: format!(
                        "Invert every bit (0 becomes 1, 1 becomes 0):\n\n\
                         number:       {binary}\n1's complement: {answer}"
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::Twos => {
                let n = draw(rng, 256);
                let ones = 255 - n;
                let twos = (256 - n) % 256;
                let (binary, ones_bits, answer) = (
                    binary_padded(n, BITS),
                    binary_padded(ones, BITS),
                    binary_padded(twos, BITS),
                );
                let distractors =
                    numeric_distractors(twos, &[ones, n, twos - 1, twos + 1, twos + 2], 0..=255, |v| {
                        binary_padded(v, BITS)
                    });
                QuestionDraft {
                    id_prefix: "comp-twos",
                    format,
                    prompt: format!("What is the 2's complement of the 8-bit number {binary}?"),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "2's complement = 1's complement + 1.".into(),
                    solution: format!(
                        "1. Take the 1's complement: {ones_bits}\n\
                         2. Add 1: {ones_bits} + 1 = {answer}\n\n\
                         Any carry out of the eighth bit is discarded."
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::Nines => {
                let n = draw(rng, 1000);
                let nines = 999 - n;
                let answer = format!("{nines:03}");
                let tens = (1000 - n) % 1000;
                let distractors = numeric_distractors(
                    nines,
                    &[tens, nines + 1, nines - 1, n, nines + 10],
                    0..=999,
                    |v| format!("{v:03}"),
                );
                QuestionDraft {
                    id_prefix: "comp-nines",
                    format,
                    prompt: format!(
                        "What is the 9's complement of the 3-digit decimal number {n:03}?"
                    ),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "Subtract each digit from 9.".into(),
                    solution: format!("999 - {n:03} = {answer}"),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::Tens => {
                let n = draw(rng, 1000);
                let tens = (1000 - n) % 1000;
                let nines = 999 - n;
                let answer = format!("{tens:03}");
                let distractors = numeric_distractors(
                    tens,
                    &[nines, tens + 1, tens - 1, n, tens + 10],
                    0..=999,
                    |v| format!("{v:03}"),
                );
                QuestionDraft {
                    id_prefix: "comp-tens",
                    format,
                    prompt: format!(
                        "What is the 10's complement of the 3-digit decimal number {n:03}?"
                    ),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "10's complement = 9's complement + 1.".into(),
                    solution: format!(
                        "9's complement: 999 - {n:03} = {nines:03}\n\
                         Add 1: {nines:03} + 1 = {answer} (a carry out of three digits is discarded)"
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
        };
        Ok(draft)
    }
}
