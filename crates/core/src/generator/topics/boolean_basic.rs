use crate::generator::helpers::{distinct_vars, shuffled_choices};
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

const VARS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Copy)]
enum Shape {
    OrIdentity,
    AndIdentity,
    OrComplement,
    AndComplement,
    Absorption,
    Distributive,
}

const SHAPES: [Shape; 6] = [
    Shape::OrIdentity,
    Shape::AndIdentity,
    Shape::OrComplement,
    Shape::AndComplement,
    Shape::Absorption,
    Shape::Distributive,
];

/// Identity, complement, absorption and distributive laws.
pub struct BooleanBasic;

impl QuestionGenerator for BooleanBasic {
    fn generate(
        &self,
        format: QuestionFormat,
        rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        match *rng.pick(&SHAPES) {
            Shape::OrIdentity => Ok(law(
                format,
                rng,
                "bool-or-id",
                "In Boolean algebra, A + 0 = ?",
                "A",
                "What does OR-ing any value with 0 give?",
                "0 is the identity element of OR, so A + 0 = A.\n\n\
                 OR-ing any Boolean variable with 0 leaves the variable unchanged.",
            )),
            Shape::AndIdentity => Ok(law(
                format,
                rng,
                "bool-and-id",
                "In Boolean algebra, A · 1 = ?",
                "A",
                "What does AND-ing any value with 1 give?",
                "1 is the identity element of AND, so A · 1 = A.\n\n\
                 AND-ing any Boolean variable with 1 leaves the variable unchanged.",
            )),
            Shape::OrComplement => Ok(law(
                format,
                rng,
                "bool-or-comp",
                "In Boolean algebra, A + A' = ?",
                "1",
                "What is a variable OR-ed with its own complement?",
                "Complement law:\n\nA + A' = 1\n\n\
                 Either A or A' is 1, so their OR is always 1.",
            )),
            Shape::AndComplement => Ok(law(
                format,
                rng,
                "bool-and-comp",
                "In Boolean algebra, A · A' = ?",
                "0",
                "What is a variable AND-ed with its own complement?",
                "Complement law:\n\nA · A' = 0\n\n\
                 A and A' are never both 1, so their AND is always 0.",
            )),
            Shape::Absorption => {
                let vars = distinct_vars(rng, &VARS, 2)?;
                let (x, y) = (vars[0], vars[1]);
                let options = shuffled_choices(
                    format,
                    rng,
                    x,
                    [y.to_owned(), format!("{x}·{y}"), format!("{x} + {y}")],
                );
                Ok(QuestionDraft {
                    id_prefix: "bool-abs",
                    format,
                    prompt: format!("Simplify the Boolean expression: {x} + {x}·{y}"),
                    options,
                    correct_answer: CorrectAnswer::single(x),
                    hint: format!(
                        "Absorption law: {x} + {x}·{y} = {x}·(1 + {y}) = {x}·1 = {x}"
                    ),
                    solution: format!(
                        "Absorption law:\n\n{x} + {x}·{y} = {x}·(1 + {y})\n\n\
                         Since 1 + {y} = 1 (anything OR 1 is 1):\n\n\
                         {x}·(1 + {y}) = {x}·1 = {x}\n\nSo the answer is {x}."
                    ),
                })
            }
            Shape::Distributive => {
                let vars = distinct_vars(rng, &VARS, 2)?;
                let (x, y) = (vars[0], vars[1]);
                let options = shuffled_choices(
                    format,
                    rng,
                    x,
                    [y.to_owned(), format!("{x}·{y}"), "1".to_owned()],
                );
                Ok(QuestionDraft {
                    id_prefix: "bool-dist",
                    format,
                    prompt: format!("Simplify the Boolean expression: {x}·{y} + {x}·{y}'"),
                    options,
                    correct_answer: CorrectAnswer::single(x),
                    hint: format!(
                        "Distributive law: {x}·{y} + {x}·{y}' = {x}·({y} + {y}') = {x}·1 = {x}"
                    ),
                    solution: format!(
                        "Distributive and complement laws:\n\n\
                         {x}·{y} + {x}·{y}' = {x}·({y} + {y}')\n\n\
                         Since {y} + {y}' = 1 (complement law):\n\n\
                         {x}·({y} + {y}') = {x}·1 = {x}\n\nSo the answer is {x}."
                    ),
                })
            }
        }
    }
}

/// Single-variable law over `A`; every option is one of `A`, `0`, `1`, `A'`.
fn law(
    format: QuestionFormat,
    rng: &mut PseudoRandomStream,
    id_prefix: &'static str,
    prompt: &str,
    answer: &str,
    hint: &str,
    solution: &str,
) -> QuestionDraft {
    let others = ["A", "0", "1", "A'"]
        .into_iter()
        .filter(|o| *o != answer)
        .map(str::to_owned);
    QuestionDraft {
        id_prefix,
        format,
        prompt: prompt.to_owned(),
        options: shuffled_choices(format, rng, answer, others),
        correct_answer: CorrectAnswer::single(answer),
        hint: hint.to_owned(),
        solution: solution.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_seeds_draw_the_and_identity_law() {
        let mut rng = PseudoRandomStream::new(0);
        let draft = BooleanBasic
            .generate(QuestionFormat::MultipleChoice, &mut rng)
            .unwrap();
        assert_eq!(draft.id_prefix, "bool-and-id");
        assert_eq!(draft.correct_answer, CorrectAnswer::single("A"));
        let mut options = draft.options.unwrap();
        options.sort();
        assert_eq!(options, vec!["0", "1", "A", "A'"]);
    }

    #[test]
    fn absorption_answer_is_first_variable() {
        for seed in 0..2_000 {
            let mut rng = PseudoRandomStream::new(seed);
            let Ok(draft) = BooleanBasic.generate(QuestionFormat::FillIn, &mut rng) else {
                continue;
            };
            if draft.id_prefix != "bool-abs" {
                continue;
            }
            let x = draft.correct_answer.as_single().unwrap().to_owned();
            let expected = format!("Simplify the Boolean expression: {x} + {x}·");
            assert!(draft.prompt.starts_with(&expected), "{}", draft.prompt);
            return;
        }
        panic!("no absorption draw in 2000 seeds");
    }
}
