use crate::generator::helpers::{binary_padded, draw, numeric_distractors, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const NIBBLE: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Shape {
    Bcd,
    Ascii,
    Gray,
}

const SHAPES: [Shape; 3] = [Shape::Bcd, Shape::Ascii, Shape::Gray];

/// BCD digits, ASCII letter codes and 4-bit Gray code.
pub struct BcdEncoding;

impl QuestionGenerator for BcdEncoding {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let draft = match *rng.pick(&SHAPES) {
            Shape::Bcd => {
                let digit = draw(rng, 10);
                let bcd = binary_padded(digit, NIBBLE);
                let distractors = numeric_distractors(
                    digit,
                    &[digit + 1, digit - 1, digit + 2, digit - 2, digit + 3],
                    0..=9,
                    |v| binary_padded(v, NIBBLE),
                );
                QuestionDraft {
                    id_prefix: "bcd",
                    format,
                    prompt: format!("What is the BCD encoding of the decimal digit {digit}?"),
                    options: shuffled_choices(format, rng, &bcd, distractors),
                    hint: "BCD writes each decimal digit as its own 4-bit binary group.".into(),
                    solution: format!(
                        "BCD (Binary Coded Decimal):\n\n\
                         the decimal digit {digit} in 4-bit binary is {bcd}₂\n\n\
                         Every decimal digit 0 to 9 is encoded as one 4-bit group."
                    ),
                    correct_answer: CorrectAnswer::Single(bcd),
                }
            }
            Shape::Ascii => {
                let upper = rng.next() > 0.5;
                let (base, case, range) = if upper {
                    (65, "upper-case", "65 to 90")
                } else {
                    (97, "lower-case", "97 to 122")
                };
                let code = base + draw(rng, 26);
                let letter = u8::try_from(code).map(char::from).unwrap_or('?');
                let flipped = if upper { code + 32 } else { code - 32 };
                let answer = code.to_string();
                let distractors = numeric_distractors(
                    code,
                    &[code + 1, code - 1, flipped, code + 2],
                    0..=127,
                    |v| v.to_string(),
                );
                QuestionDraft {
                    id_prefix: "ascii",
                    format,
                    prompt: format!(
                        "What is the decimal ASCII code of the {case} letter {letter}?"
                    ),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: format!("{case} letters occupy codes {range}."),
                    solution: format!(
                        "In ASCII:\n\n\
                         - the {case} letter {letter} has code {code}\n\
                         - {case} letters run from {range}\n\
                         - upper- and lower-case forms of a letter differ by 32"
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::Gray => {
                let n = draw(rng, 16);
                let gray = n ^ (n >> 1);
                let (binary, answer) = (binary_padded(n, NIBBLE), binary_padded(gray, NIBBLE));
                let distractors = numeric_distractors(
                    gray,
                    &[n, gray ^ 1, gray ^ 0b1000, gray ^ 0b0010],
                    0..=15,
                    |v| binary_padded(v, NIBBLE),
                );
                QuestionDraft {
                    id_prefix: "gray",
                    format,
                    prompt: format!("What is the 4-bit Gray code of the binary number {binary}?"),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "Keep the top bit, then XOR each pair of neighbouring bits.".into(),
                    solution: format!(
                        "Gray code = B XOR (B >> 1):\n\n\
                         {binary} XOR {} = {answer}\n\n\
                         Consecutive Gray codes differ in exactly one bit.",
                        binary_padded(n >> 1, NIBBLE),
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

    fn drafts(format: QuestionFormat) -> impl Iterator<Item = QuestionDraft> {
        (0..300).map(move |seed| {
            BcdEncoding
                .generate(format, &mut PseudoRandomStream::new(seed))
                .unwrap()
        })
    }

    #[test]
    fn ascii_answer_matches_the_letter() {
        for draft in drafts(QuestionFormat::FillIn).filter(|d| d.id_prefix == "ascii") {
            let letter = draft.prompt.trim_end_matches('?').chars().last().unwrap();
            assert!(letter.is_ascii_alphabetic());
            assert_eq!(
                draft.correct_answer.as_single().unwrap(),
                (letter as u32).to_string()
            );
        }
    }

    #[test]
    fn gray_code_answer_is_xor_of_shift() {
        for draft in drafts(QuestionFormat::FillIn).filter(|d| d.id_prefix == "gray") {
            let bits = draft.prompt.trim_end_matches('?').rsplit(' ').next().unwrap();
            let n = u8::from_str_radix(bits, 2).unwrap();
            assert_eq!(
                draft.correct_answer.as_single().unwrap(),
                format!("{:04b}", n ^ (n >> 1))
            );
        }
    }

    #[test]
    fn bcd_options_are_valid_digits() {
        for draft in drafts(QuestionFormat::MultipleChoice).filter(|d| d.id_prefix == "bcd") {
            let options = draft.options.unwrap();
            assert!(options.len() >= 3);
            for option in options {
                assert!(u8::from_str_radix(&option, 2).unwrap() <= 9);
            }
        }
    }
}
