// Property and behaviour tests for the scoring engine's public API

use proptest::prelude::*;

use stressgauge::analyzer::{
    confidence_score, BatchReport, Sentiment, StressAnalyzer, StressCategory, TextItem, TOP_SAMPLE_LIMIT,
};

const VOCABULARY: &[&str] = &[
    "overwhelmed", "exhausted", "burnout", "panic", "can't cope", "busy", "deadline",
    "rough day", "relaxed", "grateful", "happy", "calm", "not", "why is everything wrong",
    "feeling awful", "hate", "lunch", "coffee", "the", "weekend", "retired", "STRESSED",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..12).prop_map(|words| words.join(" "))
}

fn batch() -> impl Strategy<Value = Vec<TextItem>> {
    prop::collection::vec(
        prop_oneof![phrase(), ".{0,80}"],
        0..40,
    )
    .prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextItem::new(Some(i.to_string()), text, None))
            .collect()
    })
}

proptest! {
    #[test]
    fn item_score_is_clamped(text in prop_oneof![phrase(), any::<String>()]) {
        let result = StressAnalyzer::new().score_item(text.as_str());
        prop_assert!((0.0..=1.0).contains(&result.stress_score));
        prop_assert!(result.text_excerpt.chars().count() <= 200);
        if result.stress_score > 0.3 || !result.indicators_found.is_empty() {
            prop_assert!(result.has_stress_indicators);
        } else {
            prop_assert!(!result.has_stress_indicators);
        }
    }

    #[test]
    fn batch_report_invariants(items in batch()) {
        let report = StressAnalyzer::new().score_batch(&items);
        let scorable = items.iter().filter(|item| !item.text.is_empty()).count();

        prop_assert_eq!(report.total_analyzed, scorable);
        prop_assert!((0.0..=1.0).contains(&report.stress_level));
        prop_assert!((0.0..=100.0).contains(&report.stress_percentage));
        prop_assert!((0.0..=1.0).contains(&report.average_sentiment));
        prop_assert!(report.items_with_indicators <= report.total_analyzed);
        prop_assert_eq!(report.sentiment_distribution.total(), report.total_analyzed);
        prop_assert_eq!(report.stress_category, StressCategory::from_level(report.stress_level));
        prop_assert_eq!(report.top_samples.len(), report.total_analyzed.min(TOP_SAMPLE_LIMIT));
        prop_assert!(report.top_samples.windows(2).all(|w| w[0].score >= w[1].score));

        if scorable == 0 {
            prop_assert_eq!(&report, &BatchReport::empty());
        } else {
            prop_assert!(report.confidence_score >= 0.5);
            prop_assert!(report.confidence_score <= 1.1);
        }
    }

    #[test]
    fn batch_scoring_is_idempotent(items in batch()) {
        let analyzer = StressAnalyzer::new();
        let first = analyzer.score_batch(&items);
        let second = analyzer.score_batch(&items);
        prop_assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn top_sample_ties_keep_input_order(copies in 2usize..12) {
        let items: Vec<TextItem> = (0..copies)
            .map(|i| TextItem::new(Some(format!("{:02}", i)), "deadline", None))
            .collect();
        let report = StressAnalyzer::new().score_batch(&items);
        let ids: Vec<String> = report.top_samples.iter().filter_map(|s| s.id.clone()).collect();
        let expected: Vec<String> = (0..copies.min(TOP_SAMPLE_LIMIT)).map(|i| format!("{:02}", i)).collect();
        prop_assert_eq!(ids, expected);
    }
}

#[test]
fn empty_inputs_give_neutral_zero_scores() {
    let analyzer = StressAnalyzer::new();
    for result in [analyzer.score_item(""), analyzer.score_item(None::<&str>)] {
        assert_eq!(result.stress_score, 0.0);
        assert!(!result.has_stress_indicators);
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }
}

#[test]
fn documented_examples() {
    let analyzer = StressAnalyzer::new();

    let result = analyzer.score_item("I am so overwhelmed and exhausted");
    assert_eq!(result.stress_score, 0.8);
    assert_eq!(result.sentiment, Sentiment::Negative);
    assert!(result.has_stress_indicators);

    let result = analyzer.score_item("I feel relaxed and grateful");
    assert_eq!(result.stress_score, 0.0);
    assert!(!result.has_stress_indicators);
    assert!(result.indicators_found.is_empty());
}

#[test]
fn zero_valued_report_for_empty_batch() {
    let report = StressAnalyzer::new().score_batch(&[]);
    assert_eq!(report.stress_level, 0.0);
    assert_eq!(report.stress_category, StressCategory::Low);
    assert_eq!(report.confidence_score, 0.0);
    assert_eq!(report.total_analyzed, 0);
    assert!(report.top_samples.is_empty());
}

#[test]
fn category_boundaries() {
    assert_eq!(StressCategory::from_level(0.7), StressCategory::VeryHigh);
    assert_eq!(StressCategory::from_level(0.69999), StressCategory::High);
    assert_eq!(StressCategory::from_level(0.5), StressCategory::High);
    assert_eq!(StressCategory::from_level(0.3), StressCategory::Moderate);
    assert_eq!(StressCategory::from_level(0.29999), StressCategory::Low);
}

#[test]
fn confidence_bonus_is_not_recapped() {
    // Sample part caps at 0.95; the indicator bonus is added on top
    assert_eq!(confidence_score(400, 400, 100.0), 1.1);
    assert_eq!(confidence_score(400, 0, 0.0), 0.95);
}
