use crate::generator::helpers::{distinct_vars, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const VARS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    ComplementOfSum,
    ComplementOfProduct,
    TripleSum,
    DoubleInversion,
}

const SHAPES: [Shape; 4] = [
    Shape::ComplementOfSum,
    Shape::ComplementOfProduct,
    Shape::TripleSum,
    Shape::DoubleInversion,
];

/// De Morgan's theorem in two and three variables.
pub struct DeMorgan;

impl QuestionGenerator for DeMorgan {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let shape = *rng.pick(&SHAPES);
        let count = if shape == Shape::TripleSum { 3 } else { 2 };
        let vars = distinct_vars(rng, &VARS, count)?;
        let (x, y) = (vars[0], vars[1]);

        let two_var_forms = [
            format!("{x}' + {y}'"),
            format!("{x}' · {y}'"),
            format!("{x} + {y}"),
            format!("{x} · {y}"),
        ];

        let draft = match shape {
            Shape::ComplementOfSum => {
                let answer = format!("{x}' · {y}'");
                QuestionDraft {
                    id_prefix: "demorgan-or",
                    format,
                    prompt: format!("By De Morgan's theorem, ({x} + {y})' = ?"),
                    options: shuffled_choices(format, rng, &answer, two_var_forms),
                    correct_answer: CorrectAnswer::Single(answer),
                    hint: "The complement of a sum is the product of the complements.".into(),
                    solution: format!(
                        "First De Morgan law:\n\n({x} + {y})' = {x}' · {y}'\n\n\
                         Complementing an OR equals AND-ing the complemented variables."
                    ),
                }
            }
            Shape::ComplementOfProduct => {
                let answer = format!("{x}' + {y}'");
                QuestionDraft {
                    id_prefix: "demorgan-and",
                    format,
                    prompt: format!("By De Morgan's theorem, ({x} · {y})' = ?"),
                    options: shuffled_choices(format, rng, &answer, two_var_forms),
                    correct_answer: CorrectAnswer::Single(answer),
                    hint: "The complement of a product is the sum of the complements.".into(),
                    solution: format!(
                        "Second De Morgan law:\n\n({x} · {y})' = {x}' + {y}'\n\n\
                         Complementing an AND equals OR-ing the complemented variables."
                    ),
                }
            }
            Shape::TripleSum => {
                let z = vars[2];
                let answer = format!("{x}' · {y}' · {z}'");
                let distractors = [
                    format!("{x}' + {y}' + {z}'"),
                    format!("{x} · {y} · {z}"),
                    format!("{x} + {y} + {z}"),
                ];
                QuestionDraft {
                    id_prefix: "demorgan-triple",
                    format,
                    prompt: format!("By De Morgan's theorem, ({x} + {y} + {z})' = ?"),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    correct_answer: CorrectAnswer::Single(answer),
                    hint: "Extend the theorem to three variables: the complement of a sum is \
                           the product of the complements."
                        .into(),
                    solution: format!(
                        "De Morgan's theorem extends to any number of variables:\n\n\
                         ({x} + {y} + {z})' = {x}' · {y}' · {z}'"
                    ),
                }
            }
            Shape::DoubleInversion => {
                let answer = format!("{x} · {y}");
                QuestionDraft {
                    id_prefix: "demorgan-inv",
                    format,
                    prompt: format!("Simplify the expression: ({x}' + {y}')'"),
                    options: shuffled_choices(format, rng, &answer, two_var_forms),
                    correct_answer: CorrectAnswer::Single(answer),
                    hint: "Apply De Morgan's theorem, then cancel the double complements.".into(),
                    solution: format!(
                        "({x}' + {y}')' = ({x}')' · ({y}')' = {x} · {y}\n\n\
                         A double complement returns the original variable."
                    ),
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
    fn answer_is_always_an_option() {
        for seed in 0..500 {
            let mut rng = PseudoRandomStream::new(seed);
            if let Ok(draft) = DeMorgan.generate(QuestionFormat::MultipleChoice, &mut rng) {
                let answer = draft.correct_answer.as_single().unwrap().to_owned();
                let options = draft.options.unwrap();
                assert!(options.contains(&answer));
                assert_eq!(options.len(), 4);
            }
        }
    }

    #[test]
    fn repeated_variable_is_degenerate() {
        let degenerate = (0..500).any(|seed| {
            let mut rng = PseudoRandomStream::new(seed);
            DeMorgan.generate(QuestionFormat::FillIn, &mut rng).is_err()
        });
        assert!(degenerate);
    }
}
