//! Fixed-content topics: the stream is never consumed and options keep their
//! canonical order.

use crate::generator::helpers::fixed_choices;
use crate::generator::{Degenerate, QuestionDraft, QuestionGenerator};
use crate::model::{CorrectAnswer, QuestionFormat};
use crate::rng::PseudoRandomStream;

/// Answer stored on the Karnaugh-map placeholder; the widget is graded elsewhere.
pub const KMAP_PLACEHOLDER_ANSWER: &str = "interactive";

struct FixedQuestion {
    id_prefix: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
    answer: &'static str,
    hint: &'static str,
    solution: &'static str,
}

impl FixedQuestion {
    fn draft(&self, format: QuestionFormat) -> QuestionDraft {
        QuestionDraft {
            id_prefix: self.id_prefix,
            format,
            prompt: self.prompt.to_owned(),
            options: fixed_choices(format, self.options),
            correct_answer: CorrectAnswer::single(self.answer),
            hint: self.hint.to_owned(),
            solution: self.solution.to_owned(),
        }
    }
}

const GATE_CONVERSION: FixedQuestion = FixedQuestion {
    id_prefix: "gate",
    prompt: "Which logic gates can be built from NAND gates alone?",
    options: &[
        "All basic logic gates",
        "Only AND gates",
        "Only OR gates",
        "Only NOT gates",
    ],
    answer: "All basic logic gates",
    hint: "NAND is a universal gate.",
    solution: "NAND is a universal gate, so every basic gate can be built from it:\n\n\
               - NOT: A NAND A = A'\n\
               - AND: (A NAND B) NAND (A NAND B) = A·B\n\
               - OR: A' NAND B' = A + B\n\n\
               Any logic function can therefore be built from NAND gates.",
};

const ALGEBRA_ALGORITHM: FixedQuestion = FixedQuestion {
    id_prefix: "alg",
    prompt: "When simplifying algebraically, which law removes redundant terms?",
    options: &[
        "Absorption law",
        "Commutative law",
        "Associative law",
        "Distributive law",
    ],
    answer: "Absorption law",
    hint: "For example A + A·B = A.",
    solution: "The absorption law removes redundant terms:\n\n\
               - A + A·B = A\n\
               - A·(A + B) = A",
};

const COMBINATIONAL_SIMPLIFY: FixedQuestion = FixedQuestion {
    id_prefix: "comb",
    prompt: "What is the main goal of simplifying a combinational logic circuit?",
    options: &[
        "Fewer logic gates",
        "Higher circuit speed",
        "Lower cost",
        "All of the above",
    ],
    answer: "All of the above",
    hint: "Simplification serves several goals at once.",
    solution: "Simplifying a combinational circuit:\n\n\
               1. reduces the gate count, lowering cost\n\
               2. reduces logic levels, raising speed\n\
               3. lowers power consumption\n\
               4. improves reliability\n\n\
               So the answer is \"All of the above\".",
};

const KMAP: FixedQuestion = FixedQuestion {
    id_prefix: "kmap",
    prompt: "Simplify a Boolean function with a Karnaugh map (interactive).",
    options: &[],
    answer: KMAP_PLACEHOLDER_ANSWER,
    hint: "Group adjacent 1s into the largest possible blocks.",
    solution: "Karnaugh map simplification:\n\
               1. Fill the truth table into the map\n\
               2. Group adjacent 1s (groups may wrap around the edges)\n\
               3. Each group becomes one simplified product term\n\
               4. Choose the fewest groups that cover every 1",
};

/// NAND universality.
pub struct GateConversion;

impl QuestionGenerator for GateConversion {
    fn generate(
        &self,
        format: QuestionFormat,
        _rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        Ok(GATE_CONVERSION.draft(format))
    }
}

pub struct AlgebraAlgorithm;

impl QuestionGenerator for AlgebraAlgorithm {
    fn generate(
        &self,
        format: QuestionFormat,
        _rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        Ok(ALGEBRA_ALGORITHM.draft(format))
    }
}

pub struct CombinationalSimplify;

impl QuestionGenerator for CombinationalSimplify {
    fn generate(
        &self,
        format: QuestionFormat,
        _rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        Ok(COMBINATIONAL_SIMPLIFY.draft(format))
    }
}

/// Always fill-in, whatever format was requested.
pub struct KMapPlaceholder;

impl QuestionGenerator for KMapPlaceholder {
    fn generate(
        &self,
        _format: QuestionFormat,
        _rng: &mut PseudoRandomStream,
    ) -> Result<QuestionDraft, Degenerate> {
        Ok(KMAP.draft(QuestionFormat::FillIn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_topics_ignore_the_seed() {
        let a = GateConversion
            .generate(QuestionFormat::MultipleChoice, &mut PseudoRandomStream::new(1))
            .unwrap();
        let b = GateConversion
            .generate(QuestionFormat::MultipleChoice, &mut PseudoRandomStream::new(99_999))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.options.unwrap()[0], "All basic logic gates");
    }

    #[test]
    fn fixed_topics_leave_the_stream_untouched() {
        let mut rng = PseudoRandomStream::new(7);
        CombinationalSimplify
            .generate(QuestionFormat::MultipleChoice, &mut rng)
            .unwrap();
        assert_eq!(rng, PseudoRandomStream::new(7));
    }

    #[test]
    fn kmap_is_always_fill_in() {
        let draft = KMapPlaceholder
            .generate(QuestionFormat::MultipleChoice, &mut PseudoRandomStream::new(0))
            .unwrap();
        assert_eq!(draft.format, QuestionFormat::FillIn);
        assert!(draft.options.is_none());
        assert_eq!(draft.correct_answer, CorrectAnswer::single("interactive"));
    }

    #[test]
    fn fill_in_drops_the_options() {
        let draft = AlgebraAlgorithm
            .generate(QuestionFormat::FillIn, &mut PseudoRandomStream::new(0))
            .unwrap();
        assert!(draft.options.is_none());
        assert_eq!(draft.correct_answer, CorrectAnswer::single("Absorption law"));
    }
}
