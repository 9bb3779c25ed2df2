use crate::profile::Answer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer-count gate applied before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionLimits {
    pub min_answers: usize,
    pub max_answers: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            min_answers: 10,
            max_answers: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("payload must be an object with an `answers` array")]
    MissingAnswers,
    #[error("expected between {min} and {max} answers, got {actual}")]
    AnswerCount {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("answer {index} is malformed: {reason}")]
    MalformedAnswer { index: usize, reason: &'static str },
}

/// Decode a raw request body, then parse it like [`parse_submission`].
pub fn parse_submission_body(
    body: &[u8],
    limits: &SubmissionLimits,
) -> Result<Vec<Answer>, SubmissionError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|err| SubmissionError::InvalidJson(err.to_string()))?;
    parse_submission(&payload, limits)
}

/// Parse an untyped `{"answers": [{"id", "score"}, ..]}` payload into answers.
///
/// `itemId` and `value` are accepted as aliases. Scale bounds are not checked
/// here; that is the scoring engine's job.
pub fn parse_submission(
    payload: &Value,
    limits: &SubmissionLimits,
) -> Result<Vec<Answer>, SubmissionError> {
    let entries = payload
        .get("answers")
        .and_then(Value::as_array)
        .ok_or(SubmissionError::MissingAnswers)?;

    if entries.len() < limits.min_answers || entries.len() > limits.max_answers {
        return Err(SubmissionError::AnswerCount {
            min: limits.min_answers,
            max: limits.max_answers,
            actual: entries.len(),
        });
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_answer(entry).map_err(|reason| SubmissionError::MalformedAnswer { index, reason })
        })
        .collect()
}

fn parse_answer(entry: &Value) -> Result<Answer, &'static str> {
    let object = entry.as_object().ok_or("expected an object")?;

    let item_id = object
        .get("id")
        .or_else(|| object.get("itemId"))
        .and_then(Value::as_str)
        .ok_or("`id` must be a string")?;

    let value = object
        .get("score")
        .or_else(|| object.get("value"))
        .and_then(Value::as_f64)
        .ok_or("`score` must be a number")?;

    if !value.is_finite() {
        return Err("`score` must be finite");
    }

    Ok(Answer::new(item_id, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lenient_limits() -> SubmissionLimits {
        SubmissionLimits {
            min_answers: 1,
            max_answers: 3,
        }
    }

    #[test]
    fn parses_ids_scores_and_aliases() {
        let payload = json!({
            "answers": [
                { "id": "q1", "score": 4 },
                { "itemId": "q2", "value": 2.5 }
            ]
        });

        let answers = parse_submission(&payload, &lenient_limits()).expect("parses");
        assert_eq!(answers, vec![Answer::new("q1", 4.0), Answer::new("q2", 2.5)]);
    }

    #[test]
    fn rejects_bodies_that_are_not_json() {
        let err = parse_submission_body(b"{not json", &lenient_limits()).expect_err("bad json");
        assert!(matches!(err, SubmissionError::InvalidJson(_)));

        let body = br#"{"answers":[{"id":"q1","score":3}]}"#;
        let answers = parse_submission_body(body, &lenient_limits()).expect("valid body parses");
        assert_eq!(answers, vec![Answer::new("q1", 3.0)]);
    }

    #[test]
    fn rejects_missing_answers_array() {
        let err = parse_submission(&json!({ "answers": "nope" }), &lenient_limits())
            .expect_err("not an array");
        assert_eq!(err, SubmissionError::MissingAnswers);

        let err = parse_submission(&json!([1, 2]), &lenient_limits()).expect_err("no object");
        assert_eq!(err, SubmissionError::MissingAnswers);
    }

    #[test]
    fn enforces_answer_count() {
        let payload = json!({ "answers": [] });
        let err = parse_submission(&payload, &lenient_limits()).expect_err("too few");
        assert_eq!(
            err,
            SubmissionError::AnswerCount {
                min: 1,
                max: 3,
                actual: 0
            }
        );

        let defaults = SubmissionLimits::default();
        let nine: Vec<Value> = (1..=9)
            .map(|i| json!({ "id": format!("q{i}"), "score": 3 }))
            .collect();
        assert!(matches!(
            parse_submission(&json!({ "answers": nine }), &defaults),
            Err(SubmissionError::AnswerCount { actual: 9, .. })
        ));
    }

    #[test]
    fn reports_index_of_malformed_answer() {
        let payload = json!({
            "answers": [
                { "id": "q1", "score": 3 },
                { "id": "q2", "score": "three" }
            ]
        });

        let err = parse_submission(&payload, &lenient_limits()).expect_err("malformed");
        assert_eq!(
            err,
            SubmissionError::MalformedAnswer {
                index: 1,
                reason: "`score` must be a number"
            }
        );
    }

    #[test]
    fn rejects_non_string_ids() {
        let payload = json!({ "answers": [{ "id": 7, "score": 3 }] });
        let err = parse_submission(&payload, &lenient_limits()).expect_err("numeric id");
        assert!(matches!(err, SubmissionError::MalformedAnswer { index: 0, .. }));
    }
}
