mod common;

use common::{pokemon, ScriptedModel};
use pokefinder::application::arbiter::{settle, Arbiter};
use pokefinder::domain::error::DomainError;
use pokefinder::domain::values::choice::ChoiceSource;
use pokefinder::domain::values::query::Query;

fn query() -> Query {
    Query::parse("fast electric type").unwrap()
}

#[tokio::test]
async fn test_valid_selection() {
    let arbiter = Arbiter::new(ScriptedModel::answering("Pikachu\nBecause it's fast and electric."));
    let choice = arbiter.choose(&query(), &pokemon()).await.unwrap();
    assert_eq!(choice.name, "Pikachu");
    assert_eq!(choice.explanation, "Because it's fast and electric.");
    assert_eq!(choice.source, ChoiceSource::Model);
}

#[tokio::test]
async fn test_selection_without_explanation_gets_generic_text() {
    let arbiter = Arbiter::new(ScriptedModel::answering("Raichu"));
    let choice = arbiter.choose(&query(), &pokemon()).await.unwrap();
    assert_eq!(choice.name, "Raichu");
    assert_eq!(choice.source, ChoiceSource::Model);
    assert_eq!(choice.explanation, ChoiceSource::Model.fallback_explanation("Raichu"));
}

#[tokio::test]
async fn test_invalid_selection() {
    let arbiter = Arbiter::new(ScriptedModel::answering("Bulbasaur\nIt likes the sun."));
    let choice = arbiter.choose(&query(), &pokemon()).await.unwrap();
    assert_eq!(choice.name, "Pikachu");
    assert_eq!(choice.source, ChoiceSource::InvalidSelection);
    assert_eq!(choice.explanation, "Pikachu had the closest description match to your request.");
}

#[tokio::test]
async fn test_model_error() {
    let arbiter = Arbiter::new(ScriptedModel::failing());
    let choice = arbiter.choose(&query(), &pokemon()).await.unwrap();
    assert_eq!(choice.name, "Pikachu");
    assert_eq!(choice.source, ChoiceSource::ModelError);
    assert_eq!(
        choice.explanation,
        "Based on similarity, Pikachu seems like a good starting point (LLM refinement failed)."
    );
}

#[tokio::test]
async fn test_empty_response() {
    let arbiter = Arbiter::new(ScriptedModel::silent());
    let choice = arbiter.choose(&query(), &pokemon()).await.unwrap();
    assert_eq!(choice.name, "Pikachu");
    assert_eq!(choice.source, ChoiceSource::EmptyResponse);
    assert_eq!(choice.explanation, "Based on similarity, Pikachu seems like a good starting point.");
}

#[tokio::test]
async fn test_no_candidates_is_rejected_without_model_call() {
    let model = ScriptedModel::answering("Pikachu\nx");
    let arbiter = Arbiter::new(model.clone());
    let result = arbiter.choose(&query(), &[]).await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_single_candidate_prompt() {
    let model = ScriptedModel::answering("Zapdos\nOnly option.");
    let arbiter = Arbiter::new(model.clone());
    let only = vec![pokemon().remove(2)];
    let choice = arbiter.choose(&query(), &only).await.unwrap();
    assert_eq!(choice.name, "Zapdos");
    let prompt = model.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("top 1 potential matches"));
    assert!(prompt.contains("(Zapdos)"));
}

#[test]
fn test_settle_is_deterministic() {
    let candidates = pokemon();
    let responses: Vec<Result<Option<String>, DomainError>> = vec![
        Ok(Some("Raichu\nStrong.".into())),
        Ok(Some("Mew\nRare.".into())),
        Ok(None),
    ];
    for response in responses {
        let again = match &response {
            Ok(v) => Ok(v.clone()),
            Err(_) => unreachable!(),
        };
        assert_eq!(settle(response, &candidates), settle(again, &candidates));
    }
    let first = settle(Err(DomainError::Completion("timeout".into())), &candidates);
    let second = settle(Err(DomainError::Completion("timeout".into())), &candidates);
    assert_eq!(first, second);
}
