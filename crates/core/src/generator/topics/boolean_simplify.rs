use crate::generator::helpers::{distinct_vars, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const VARS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    RedundantSum,
    Consensus,
}

const SHAPES: [Shape; 2] = [Shape::RedundantSum, Shape::Consensus];

/// Multi-step simplifications: the three-term sum and the consensus theorem.
pub struct BooleanSimplify;

impl QuestionGenerator for BooleanSimplify {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let shape = *rng.pick(&SHAPES);
        let count = if shape == Shape::Consensus { 3 } else { 2 };
        let vars = distinct_vars(rng, &VARS, count)?;
        let (x, y) = (vars[0], vars[1]);

        let draft = match shape {
            Shape::RedundantSum => {
                let answer = format!("{x} + {y}");
                let distractors = [format!("{x}·{y}"), x.to_owned(), y.to_owned()];
                QuestionDraft {
                    id_prefix: "simplify",
                    format,
                    prompt: format!(
                        "Simplify the Boolean expression: {x}·{y} + {x}·{y}' + {x}'·{y}"
                    ),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: "Use the distributive and complement laws.".into(),
                    solution: format!(
                        "{x}·{y} + {x}·{y}' + {x}'·{y}\n\
                         = {x}·({y} + {y}') + {x}'·{y}\n\
                         = {x}·1 + {x}'·{y}\n\
                         = {x} + {x}'·{y}\n\
                         = ({x} + {x}')·({x} + {y})\n\
                         = 1·({x} + {y})\n\
                         = {x} + {y}"
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
            Shape::Consensus => {
                let z = vars[2];
                let answer = format!("{x}·{y} + {x}'·{z}");
                let distractors = [
                    format!("{x}·{y} + {y}·{z}"),
                    format!("{x}'·{z} + {y}·{z}"),
                    format!("{y}·{z}"),
                ];
                QuestionDraft {
                    id_prefix: "simplify-consensus",
                    format,
                    prompt: format!(
                        "Simplify the Boolean expression: {x}·{y} + {x}'·{z} + {y}·{z}"
                    ),
                    options: shuffled_choices(format, rng, &answer, distractors),
                    hint: format!(
                        "The term {y}·{z} is the consensus of {x}·{y} and {x}'·{z}."
                    ),
                    solution: format!(
                        "{x}·{y} + {x}'·{z} + {y}·{z}\n\
                         = {x}·{y} + {x}'·{z} + {y}·{z}·({x} + {x}')\n\
                         = {x}·{y} + {x}'·{z} + {x}·{y}·{z} + {x}'·{y}·{z}\n\
                         = {x}·{y}·(1 + {z}) + {x}'·{z}·(1 + {y})\n\
                         = {x}·{y} + {x}'·{z}\n\n\
                         The consensus term is redundant and drops out."
                    ),
                    correct_answer: CorrectAnswer::Single(answer),
                }
            }
        };
        Ok(draft)
    }
}
