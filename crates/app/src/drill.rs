//! Line-oriented practice loop over any reader/writer pair.

use std::io::{self, BufRead, Write};

use logicflow_core::model::{Answer, Question, SessionSummary};
use services::{AdvanceOutcome, SessionEngine};

const HELP: &str = "answer with an option number or text; \
                    [enter] next, p previous, h hint, s solution, q quit";

/// Run the loop until the user quits, input ends or the session ends.
///
/// # Errors
///
/// Returns any I/O error from `input` or `out`.
pub fn run<R: BufRead, W: Write>(
    engine: &mut SessionEngine,
    input: R,
    out: &mut W,
) -> io::Result<Option<SessionSummary>> {
    writeln!(out, "{HELP}")?;
    let mut lines = input.lines();
    let mut shown = None;

    loop {
        let Some(question) = engine.current_question() else {
            break;
        };
        if shown.as_ref() != Some(question.id()) {
            render(engine, question, out)?;
            shown = Some(question.id().clone());
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => match engine.advance() {
                AdvanceOutcome::Ended => {
                    writeln!(out, "No more questions for this topic.")?;
                    break;
                }
                AdvanceOutcome::Stalled => writeln!(out, "Could not generate another question.")?,
                AdvanceOutcome::Moved | AdvanceOutcome::Appended | AdvanceOutcome::Ignored => {}
            },
            "p" => {
                if !engine.retreat() {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            "h" => {
                engine.show_hint();
                writeln!(out, "Hint: {}", question_hint(engine))?;
            }
            "s" => {
                engine.show_solution();
                writeln!(out, "{}", question_solution(engine))?;
            }
            "q" => break,
            raw => {
                let Some(answer) = engine.current_question().map(|q| to_answer(q, raw)) else {
                    break;
                };
                if let Some(record) = engine.submit_answer(answer) {
                    if record.is_correct {
                        writeln!(out, "Correct!")?;
                    } else {
                        let expected = engine
                            .current_question()
                            .map(|q| q.correct_answer().to_string())
                            .unwrap_or_default();
                        writeln!(out, "Not quite. The answer is: {expected}")?;
                    }
                    if !record.first_answer {
                        writeln!(out, "(only the first answer counts toward your score)")?;
                    }
                }
            }
        }
    }

    let summary = engine.end();
    if let Some(summary) = &summary {
        writeln!(
            out,
            "\nSession over: {}/{} correct ({:.0}%), {}s",
            summary.correct, summary.total_questions, summary.accuracy, summary.time_spent_secs
        )?;
    }
    Ok(summary)
}

fn render<W: Write>(engine: &SessionEngine, question: &Question, out: &mut W) -> io::Result<()> {
    let progress = engine.progress();
    writeln!(
        out,
        "\n[{}/{}] accuracy {:.0}%",
        progress.position, progress.total, progress.accuracy
    )?;
    writeln!(out, "{}", question.prompt())?;
    if let Some(options) = question.options() {
        for (i, option) in options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }
    }
    Ok(())
}

/// Option numbers select an option; set answers split on commas.
fn to_answer(question: &Question, raw: &str) -> Answer {
    if let Some(options) = question.options() {
        if let Some(option) = raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
        {
            return Answer::text(option.clone());
        }
    }
    if question.correct_answer().is_set() {
        Answer::parse_set(raw)
    } else {
        Answer::text(raw)
    }
}

fn question_hint(engine: &SessionEngine) -> String {
    engine
        .current_question()
        .map(|q| q.hint().to_owned())
        .unwrap_or_default()
}

fn question_solution(engine: &SessionEngine) -> String {
    engine
        .current_question()
        .map(|q| q.solution().to_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicflow_core::QuestionFactory;
    use logicflow_core::model::Topic;
    use logicflow_core::time::fixed_clock;
    use services::{ProgressLedger, Seeding};
    use std::io::Cursor;
    use storage::repository::Storage;

    fn engine() -> SessionEngine {
        SessionEngine::new(
            QuestionFactory::standard(),
            ProgressLedger::new(Storage::in_memory().progress),
            fixed_clock(),
        )
        .with_seeding(Seeding::Fixed(0))
    }

    #[test]
    fn option_number_selects_the_option() {
        let mut engine = engine();
        engine.start(Topic::GateConversion);
        let mut out = Vec::new();
        let summary = run(&mut engine, Cursor::new("1\n\n2\nq\n"), &mut out)
            .unwrap()
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Correct!"));
        assert!(text.contains("Not quite. The answer is: All basic logic gates"));
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total_questions, 5);
    }

    #[test]
    fn input_end_finishes_the_session() {
        let mut engine = engine();
        engine.start(Topic::BooleanBasic);
        let mut out = Vec::new();
        run(&mut engine, Cursor::new("h\n"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hint: "));
        assert!(text.contains("Session over: 0/5 correct"));
    }
}
