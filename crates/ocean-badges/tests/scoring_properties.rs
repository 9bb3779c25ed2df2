use ocean_badges::profile::{
    interpret, score, Answer, Item, ItemCatalog, Level, ScoreOptions, ScoringError, Trait,
};

fn standard_catalog() -> ItemCatalog {
    ItemCatalog::standard().expect("bundled catalog parses")
}

/// Answers that push every trait to its maximum.
fn maximal_answers(catalog: &ItemCatalog, options: &ScoreOptions) -> Vec<Answer> {
    catalog
        .items()
        .iter()
        .map(|item| {
            let value = if item.reversed {
                options.scale_min
            } else {
                options.scale_max
            };
            Answer::new(item.id.clone(), value)
        })
        .collect()
}

#[test]
fn bundled_catalog_balances_traits() {
    let catalog = standard_catalog();

    assert_eq!(catalog.len(), 50);
    for trait_key in Trait::ordered() {
        assert_eq!(catalog.count_for(trait_key), 10, "{trait_key}");
    }
    assert!(catalog.items().iter().any(|item| item.reversed));
}

#[test]
fn percents_stay_in_range_for_every_constant_answer() {
    let catalog = standard_catalog();
    let options = ScoreOptions::default();

    for value in [1.0, 1.5, 2.0, 3.0, 4.25, 5.0] {
        let answers: Vec<Answer> = catalog
            .items()
            .iter()
            .map(|item| Answer::new(item.id.clone(), value))
            .collect();
        let profile = score(&answers, &catalog, &options).expect("scores");

        for trait_key in Trait::ordered() {
            let aggregate = profile.aggregate(trait_key);
            assert!(
                (0.0..=100.0).contains(&aggregate.percent),
                "{trait_key} at {value}: {}",
                aggregate.percent
            );
            assert!((1.0..=5.0).contains(&aggregate.raw_mean));
        }
    }
}

#[test]
fn maximal_answers_score_every_trait_high() {
    let catalog = standard_catalog();
    let options = ScoreOptions::default();

    let profile = score(&maximal_answers(&catalog, &options), &catalog, &options).expect("scores");

    for trait_key in Trait::ordered() {
        assert_eq!(profile.percent(trait_key), 100.0, "{trait_key}");
        assert_eq!(interpret(trait_key, 100.0).level, Level::High);
    }
    assert_eq!(profile.meta.total_answered, 50);
    assert_eq!(profile.meta.total_matched, 50);
}

#[test]
fn scoring_is_deterministic_and_order_independent() {
    let catalog = standard_catalog();
    let options = ScoreOptions::default();
    let answers: Vec<Answer> = catalog
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| Answer::new(item.id.clone(), (index % 5 + 1) as f64))
        .collect();
    let mut reversed_order = answers.clone();
    reversed_order.reverse();

    let first = score(&answers, &catalog, &options).expect("scores");
    let second = score(&answers, &catalog, &options).expect("scores");
    let shuffled = score(&reversed_order, &catalog, &options).expect("scores");

    assert_eq!(first, second);
    assert_eq!(first, shuffled);
}

#[test]
fn custom_scale_and_catalog() {
    let catalog = ItemCatalog::from_items(vec![
        Item::direct("o1", Trait::Openness),
        Item::reversed("o2", Trait::Openness),
    ])
    .expect("catalog builds");
    let options = ScoreOptions {
        scale_min: 0.0,
        scale_max: 10.0,
        ignore_invalid: false,
    };

    let profile = score(
        &[Answer::new("o1", 10.0), Answer::new("o2", 5.0)],
        &catalog,
        &options,
    )
    .expect("scores");

    assert_eq!(profile.aggregate(Trait::Openness).raw_mean, 7.5);
    assert_eq!(profile.percent(Trait::Openness), 75.0);
    assert_eq!(profile.aggregate(Trait::Neuroticism).answered_count, 0);
    assert_eq!(profile.percent(Trait::Neuroticism), 0.0);
}

#[test]
fn strict_mode_names_the_offending_item() {
    let catalog = standard_catalog();
    let err = score(
        &[Answer::new("q1", 3.0), Answer::new("q2", f64::NAN)],
        &catalog,
        &ScoreOptions::default(),
    )
    .expect_err("NaN is never a valid answer");

    match err {
        ScoringError::Validation(validation) => assert_eq!(validation.item_id, "q2"),
        other => panic!("unexpected error {other:?}"),
    }
}
