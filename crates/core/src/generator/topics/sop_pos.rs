use crate::generator::helpers::{distinct_vars, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const VARS: [&str; 2] = ["A", "B"];

#[derive(Debug, Clone, Copy)]
enum Shape {
    Simplify,
    Minterms,
}

const SHAPES: [Shape; 2] = [Shape::Simplify, Shape::Minterms];

/// Standard sum-of-products forms over two variables, `A` being the MSB.
pub struct SopPos;

impl QuestionGenerator for SopPos {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        let shape = *rng.pick(&SHAPES);
        let vars = distinct_vars(rng, &VARS, 2)?;
        let (x, y) = (vars[0], vars[1]);
        let function = format!("F(A,B) = {x}·{y} + {x}·{y}'");

        let draft = match shape {
            Shape::Simplify => QuestionDraft {
                id_prefix: "sop",
                format,
                prompt: format!("Simplify {function} to its minimal SOP form."),
                options: shuffled_choices(
                    format,
                    rng,
                    x,
                    [
                        format!("{x}·{y}"),
                        format!("{x} + {y}"),
                        format!("{x}·{y} + {x}·{y}'"),
                    ],
                ),
                correct_answer: CorrectAnswer::single(x),
                hint: "Factor out the common literal first.".into(),
                solution: format!(
                    "{function}\n\
                     = {x}·({y} + {y}')\n\
                     = {x}·1\n\
                     = {x}\n\n\
                     A sum of products (SOP) is an OR of AND terms."
                ),
            },
            Shape::Minterms => {
                let minterms = literal_minterms(x, false);
                let listed = sigma(&minterms);
                let prompt = format!(
                    "Which minterms make up {function}? (A is the most significant bit)"
                );
                let solution = format!(
                    "{function} = {x}\n\n\
                     {x} is 1 in rows {}, so F = {listed}.",
                    join(&minterms),
                );
                match format {
                    QuestionFormat::MultipleChoice => {
                        let distractors = [(y, false), (x, true), (y, true)]
                            .into_iter()
                            .map(|(var, negated)| sigma(&literal_minterms(var, negated)));
                        QuestionDraft {
                            id_prefix: "sop-minterms",
                            format,
                            options: shuffled_choices(format, rng, &listed, distractors),
                            prompt,
                            correct_answer: CorrectAnswer::Single(listed),
                            hint: "Simplify first, then list the rows where F is 1.".into(),
                            solution,
                        }
                    }
                    QuestionFormat::FillIn => QuestionDraft {
                        id_prefix: "sop-minterms",
                        format,
                        prompt: format!("{prompt} Enter the indices separated by commas."),
                        options: None,
                        correct_answer: CorrectAnswer::Set(
                            minterms.iter().map(u8::to_string).collect(),
                        ),
                        hint: "Simplify first, then list the rows where F is 1.".into(),
                        solution,
                    },
                }
            }
        };
        Ok(draft)
    }
}

/// Rows of the two-variable truth table where the literal is 1.
fn literal_minterms(var: &str, negated: bool) -> Vec<u8> {
    let bit = if var == "A" { 0b10 } else { 0b01 };
    (0u8..4)
        .filter(|row| (row & bit != 0) != negated)
        .collect()
}

fn join(minterms: &[u8]) -> String {
    minterms
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn sigma(minterms: &[u8]) -> String {
    format!("Σm({})", join(minterms))
}
