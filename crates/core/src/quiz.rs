//! Multi-step skin quiz wizard.
//!
//! Answers live only in memory; nothing is sent until every question has an
//! answer and the caller asks for the submission payload.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::SkinType;

/// A question as the wizard needs it: an id plus the selectable option ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardQuestion {
    pub id: String,
    pub options: Vec<WizardOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOption {
    pub id: String,
    /// Skin type this option points towards, if the quiz author tagged one.
    pub skin_type: Option<SkinType>,
}

/// One recorded answer, in the shape the backend accepts on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: String,
    pub option_id: String,
}

/// Where the wizard currently stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WizardStep {
    /// Showing the question at this index.
    Question(usize),
    /// All questions passed; showing the summary before submission.
    Review,
}

#[derive(Debug, Clone)]
pub struct QuizWizard {
    questions: Vec<WizardQuestion>,
    answers: Vec<Option<usize>>,
    step: WizardStep,
}

impl QuizWizard {
    pub fn new(questions: Vec<WizardQuestion>) -> DomainResult<Self> {
        if questions.is_empty() {
            return Err(DomainError::validation("quiz has no questions"));
        }
        if let Some(q) = questions.iter().find(|q| q.options.is_empty()) {
            return Err(DomainError::validation(format!(
                "question '{}' has no options",
                q.id
            )));
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            answers,
            step: WizardStep::Question(0),
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current(&self) -> Option<&WizardQuestion> {
        match self.step {
            WizardStep::Question(i) => self.questions.get(i),
            WizardStep::Review => None,
        }
    }

    /// Option id selected for the current question, if any.
    pub fn current_answer(&self) -> Option<&str> {
        let WizardStep::Question(i) = self.step else {
            return None;
        };
        self.answers[i].map(|opt| self.questions[i].options[opt].id.as_str())
    }

    /// Record (or replace) the answer to the current question.
    pub fn answer(&mut self, option_id: &str) -> DomainResult<()> {
        let WizardStep::Question(i) = self.step else {
            return Err(DomainError::invariant("no question is being shown"));
        };

        let opt = self.questions[i]
            .options
            .iter()
            .position(|o| o.id == option_id)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "option '{option_id}' does not belong to question '{}'",
                    self.questions[i].id
                ))
            })?;

        self.answers[i] = Some(opt);
        Ok(())
    }

    /// Advance; the current question must be answered first.
    pub fn next(&mut self) -> DomainResult<WizardStep> {
        match self.step {
            WizardStep::Question(i) => {
                if self.answers[i].is_none() {
                    return Err(DomainError::validation("choose an answer to continue"));
                }
                self.step = if i + 1 < self.questions.len() {
                    WizardStep::Question(i + 1)
                } else {
                    WizardStep::Review
                };
                Ok(self.step)
            }
            WizardStep::Review => Ok(WizardStep::Review),
        }
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Question(0) => WizardStep::Question(0),
            WizardStep::Question(i) => WizardStep::Question(i - 1),
            WizardStep::Review => WizardStep::Question(self.questions.len() - 1),
        };
        self.step
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Answers in question order, ready for submission.
    pub fn submission(&self) -> DomainResult<Vec<QuizAnswer>> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(q, a)| {
                let opt = a.ok_or_else(|| {
                    DomainError::validation(format!("question '{}' is unanswered", q.id))
                })?;
                Ok(QuizAnswer {
                    question_id: q.id.clone(),
                    option_id: q.options[opt].id.clone(),
                })
            })
            .collect()
    }

    /// Most frequently indicated skin type among tagged answers.
    ///
    /// Ties resolve in `SkinType::ALL` order.
    pub fn dominant_skin_type(&self) -> Option<SkinType> {
        let mut counts = [0usize; SkinType::ALL.len()];
        for (q, a) in self.questions.iter().zip(&self.answers) {
            let Some(skin) = a.and_then(|opt| q.options[opt].skin_type) else {
                continue;
            };
            if let Some(idx) = SkinType::ALL.iter().position(|t| *t == skin) {
                counts[idx] += 1;
            }
        }

        let mut best: Option<(usize, usize)> = None;
        for (idx, count) in counts.iter().copied().enumerate() {
            if count == 0 {
                continue;
            }
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((idx, count));
            }
        }
        best.map(|(idx, _)| SkinType::ALL[idx])
    }

    pub fn reset(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.step = WizardStep::Question(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, options: &[(&str, Option<SkinType>)]) -> WizardQuestion {
        WizardQuestion {
            id: id.to_string(),
            options: options
                .iter()
                .map(|(o, s)| WizardOption {
                    id: o.to_string(),
                    skin_type: *s,
                })
                .collect(),
        }
    }

    fn two_question_quiz() -> QuizWizard {
        QuizWizard::new(vec![
            question("shine", &[("a", Some(SkinType::Oily)), ("b", Some(SkinType::Dry))]),
            question("tight", &[("c", Some(SkinType::Dry)), ("d", None)]),
        ])
        .unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert!(QuizWizard::new(vec![]).is_err());
        assert!(QuizWizard::new(vec![question("q", &[])]).is_err());
    }

    #[test]
    fn cannot_advance_without_answer() {
        let mut wizard = two_question_quiz();
        assert!(wizard.next().is_err());
        assert_eq!(wizard.step(), WizardStep::Question(0));
    }

    #[test]
    fn walks_to_review_and_builds_submission() {
        let mut wizard = two_question_quiz();
        wizard.answer("b").unwrap();
        assert_eq!(wizard.next().unwrap(), WizardStep::Question(1));
        assert!(wizard.submission().is_err());

        wizard.answer("c").unwrap();
        assert_eq!(wizard.next().unwrap(), WizardStep::Review);
        assert!(wizard.is_complete());

        let answers = wizard.submission().unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].option_id, "b");
        assert_eq!(answers[1].question_id, "tight");
        assert_eq!(wizard.dominant_skin_type(), Some(SkinType::Dry));
    }

    #[test]
    fn back_keeps_previous_answers() {
        let mut wizard = two_question_quiz();
        wizard.answer("a").unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.back(), WizardStep::Question(0));
        assert_eq!(wizard.current_answer(), Some("a"));
        assert_eq!(wizard.back(), WizardStep::Question(0));
    }

    #[test]
    fn foreign_option_is_rejected() {
        let mut wizard = two_question_quiz();
        assert!(wizard.answer("c").is_err());
        assert_eq!(wizard.answered(), 0);
    }

    #[test]
    fn reset_clears_answers() {
        let mut wizard = two_question_quiz();
        wizard.answer("a").unwrap();
        wizard.next().unwrap();
        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Question(0));
        assert_eq!(wizard.answered(), 0);
    }

    #[test]
    fn untagged_answers_do_not_vote() {
        let mut wizard = two_question_quiz();
        wizard.answer("a").unwrap();
        wizard.next().unwrap();
        wizard.answer("d").unwrap();
        assert_eq!(wizard.dominant_skin_type(), Some(SkinType::Oily));
    }

    #[test]
    fn tied_skin_types_resolve_in_declaration_order() {
        let mut wizard = two_question_quiz();
        wizard.answer("a").unwrap();
        wizard.next().unwrap();
        wizard.answer("c").unwrap();
        assert_eq!(wizard.dominant_skin_type(), Some(SkinType::Oily));
    }
}
