use chrono::{TimeZone, Utc};
use feed_analyzer::scoring::{golden_ratio, is_prime};
use feed_analyzer::synthetic::{default_anchor, generate_performance_feed};
use feed_analyzer::{
    analyze_feed, AnalysisReport, AnalyzeError, Message, CANDIDATE_ENGAGEMENT_SCORE,
};

const TS: &str = "2025-09-10T10:00:00Z";

fn analyze_one(message: Message) -> AnalysisReport {
    analyze_feed(&[message], 30).unwrap()
}

#[test]
fn basic_positive_message() {
    let report = analyze_one(
        Message::new("msg_001", "Adorei o produto!", TS, "user_123")
            .with_hashtags(["#produto"])
            .with_counts(10, 2, 100),
    );

    assert_eq!(report.sentiment_distribution.positive, 100.0);
    assert_eq!(report.sentiment_distribution.negative, 0.0);
    assert_eq!(report.trending_topics, vec!["#produto"]);
    assert!((report.engagement_score - 0.12).abs() < 1e-9);
    assert!(!report.anomaly_detected);
    assert_eq!(report.processing_time_ms, 0.0);
    assert_eq!(report.influence_ranking.len(), 1);
    assert_eq!(report.influence_ranking[0].followers, 8959);
}

#[test]
fn meta_message_sets_flags_and_forces_engagement() {
    let report = analyze_one(
        Message::new("msg_003", "teste técnico mbras", TS, "user_mbras_1007")
            .with_hashtags(["#teste"])
            .with_counts(5, 2, 100),
    );

    assert!(report.flags.mbras_employee);
    assert!(report.flags.candidate_awareness);
    assert_eq!(report.engagement_score, CANDIDATE_ENGAGEMENT_SCORE);
    assert_eq!(report.engagement_score, 9.42);
    assert_eq!(report.sentiment_distribution.positive, 0.0);
    assert_eq!(report.sentiment_distribution.negative, 0.0);
    assert_eq!(report.sentiment_distribution.neutral, 0.0);
}

#[test]
fn trigger_anywhere_in_window_forces_engagement() {
    let messages = vec![
        Message::new("a", "Adorei", TS, "user_1").with_counts(100, 100, 10),
        Message::new("b", "vi o teste técnico mbras ontem", TS, "user_2").with_counts(0, 0, 0),
    ];
    let report = analyze_feed(&messages, 30).unwrap();

    assert!(report.flags.candidate_awareness);
    assert!(!report.flags.mbras_employee);
    assert_eq!(report.engagement_score, 9.42);
    assert_eq!(report.sentiment_distribution.positive, 50.0);
    assert_eq!(report.sentiment_distribution.neutral, 50.0);
}

#[test]
fn orphan_intensifier_is_neutral() {
    let report = analyze_one(Message::new("msg_004", "muito", TS, "user_abc").with_counts(0, 0, 1));
    assert_eq!(report.sentiment_distribution.neutral, 100.0);
}

#[test]
fn double_negation_is_positive() {
    let message = Message::new("msg_005", "não não gostei", TS, "user_abc").with_counts(0, 0, 1);
    let report = analyze_one(message);
    assert_eq!(report.sentiment_distribution.positive, 100.0);
}

#[test]
fn employee_flag_is_case_insensitive() {
    let message = Message::new("msg_006", "Adorei", TS, "user_MBRAS_007").with_counts(0, 0, 1);
    let report = analyze_one(message);
    assert!(report.flags.mbras_employee);
}

#[test]
fn special_pattern_without_employee() {
    let content = format!("{} mbras {}", "X".repeat(10), "Y".repeat(25));
    let report = analyze_one(
        Message::new("msg_007", content, TS, "user_especialista_999")
            .with_hashtags(["#review"])
            .with_counts(3, 1, 75),
    );

    assert!(report.flags.special_pattern);
    assert!(!report.flags.mbras_employee);
    assert_eq!(report.sentiment_distribution.neutral, 100.0);
    assert_eq!(report.influence_ranking[0].user_id, "user_especialista_999");
}

#[test]
fn influence_is_deterministic() {
    let message =
        Message::new("msg_det1", "teste", TS, "user_deterministic_test").with_counts(1, 0, 10);
    let first = analyze_one(message.clone());
    let second = analyze_one(message);

    assert_eq!(first, second);
    let entry = &first.influence_ranking[0];
    assert_eq!(entry.followers, 6644);
    assert!((entry.engagement_rate - 0.1).abs() < 1e-9);
    assert!((entry.influence_score - (6644.0 * 0.4 + 0.1 * 0.6)).abs() < 1e-9);
}

#[test]
fn unicode_author_gets_fixed_followers() {
    let report = analyze_one(
        Message::new("msg_unicode1", "adorei", TS, "user_café")
            .with_hashtags(["#teste"])
            .with_counts(5, 1, 50),
    );
    let entry = report
        .influence_ranking
        .iter()
        .find(|entry| entry.user_id == "user_café")
        .unwrap();
    assert_eq!(entry.followers, 4242);
}

#[test]
fn thirteen_character_author() {
    let message =
        Message::new("msg_fib", "bom produto", TS, "user_13_chars").with_counts(1, 0, 10);
    let report = analyze_one(message);
    assert_eq!(report.influence_ranking[0].followers, 233);
}

#[test]
fn prime_suffix_author() {
    let message =
        Message::new("msg_prime", "excelente", TS, "user_math_prime").with_counts(3, 1, 20);
    let report = analyze_one(message);
    let followers = report.influence_ranking[0].followers;
    assert!(is_prime(followers));
    assert_eq!(followers, 211);
}

#[test]
fn golden_ratio_engagement() {
    let report = analyze_one(
        Message::new("msg_golden", "ótimo serviço", TS, "user_golden_test")
            .with_hashtags(["#service"])
            .with_counts(4, 3, 35),
    );
    let expected = 0.2 * (1.0 + 1.0 / golden_ratio());
    assert!((report.engagement_score - expected).abs() < 1e-9);
    assert!((report.influence_ranking[0].engagement_rate - expected).abs() < 1e-9);
}

#[test]
fn positive_hashtags_outrank_neutral_ones() {
    let messages = vec![
        Message::new("msg_cross1", "adorei muito!", "2025-09-10T10:00:00Z", "user_cross1")
            .with_hashtags(["#positivo"])
            .with_counts(5, 2, 50),
        Message::new("msg_cross2", "terrível produto", "2025-09-10T10:01:00Z", "user_cross2")
            .with_hashtags(["#negativo"])
            .with_counts(1, 0, 25),
    ];
    let report = analyze_feed(&messages, 30).unwrap();

    assert_eq!(report.trending_topics, vec!["#positivo", "#negativo"]);
    assert_eq!(report.sentiment_distribution.positive, 50.0);
    assert_eq!(report.sentiment_distribution.neutral, 50.0);
    assert_eq!(report.influence_ranking[0].user_id, "user_cross1");
    assert_eq!(report.influence_ranking[0].followers, 8936);
    assert_eq!(report.influence_ranking[1].followers, 6359);
}

#[test]
fn long_hashtags_are_scaled() {
    let report = analyze_one(
        Message::new("msg_long1", "teste básico", TS, "user_long1")
            .with_hashtags(["#short", "#verylonghashtag"])
            .with_counts(1, 0, 10),
    );
    assert_eq!(report.trending_topics, vec!["#verylonghashtag", "#short"]);
}

#[test]
fn empty_input_returns_canonical_report() {
    let report = analyze_feed(&[], 30).unwrap();
    assert_eq!(report, AnalysisReport::empty());
    assert!(report.trending_topics.is_empty());
    assert!(report.influence_ranking.is_empty());
}

#[test]
fn empty_window_returns_canonical_report() {
    let messages = vec![
        Message::new("a", "adorei", TS, "user_1").with_hashtags(["#a"]).with_counts(1, 1, 2),
        Message::new("b", "ruim", "2025-09-10T09:00:00Z", "user_2").with_counts(1, 1, 2),
    ];
    let report = analyze_feed(&messages, -10).unwrap();
    assert_eq!(report, AnalysisReport::empty());
}

#[test]
fn old_messages_fall_outside_window() {
    let messages = vec![
        Message::new("old", "ruim", "2025-09-10T09:00:00Z", "user_old")
            .with_hashtags(["#old"])
            .with_counts(7, 0, 7),
        Message::new("new", "adorei", TS, "user_new")
            .with_hashtags(["#new"])
            .with_counts(1, 0, 10),
        Message::new("edge", "bom", "2025-09-10T09:30:00Z", "user_edge").with_counts(1, 0, 10),
    ];
    let report = analyze_feed(&messages, 30).unwrap();

    assert_eq!(report.sentiment_distribution.positive, 100.0);
    assert_eq!(report.trending_topics, vec!["#new"]);
    assert_eq!(report.influence_ranking.len(), 2);
    assert!(report.influence_ranking.iter().all(|entry| entry.user_id != "user_old"));
    assert!((report.engagement_score - 0.1).abs() < 1e-9);
}

#[test]
fn ranking_has_one_entry_per_author_in_descending_order() {
    let messages = vec![
        Message::new("1", "bom", TS, "user_123").with_counts(2, 0, 10),
        Message::new("2", "bom", TS, "user_abc").with_counts(2, 0, 10),
        Message::new("3", "bom", TS, "user_123").with_counts(1, 0, 10),
        Message::new("4", "bom", TS, "user_13_chars").with_counts(1, 0, 10),
    ];
    let report = analyze_feed(&messages, 30).unwrap();
    let ranking = &report.influence_ranking;

    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].user_id, "user_123");
    assert!((ranking[0].engagement_rate - 0.15).abs() < 1e-9);
    assert_eq!(ranking[1].user_id, "user_13_chars");
    assert_eq!(ranking[2].user_id, "user_abc");
    assert!(ranking
        .windows(2)
        .all(|pair| pair[0].influence_score >= pair[1].influence_score));
}

#[test]
fn resolved_instants_are_accepted() {
    let instant = Utc.with_ymd_and_hms(2025, 9, 10, 10, 0, 0).unwrap();
    let messages = vec![
        Message::new("a", "adorei", instant, "user_1").with_hashtags(["#mix"]),
        Message::new("b", "ruim", "2025-09-10T09:59:00Z", "user_2").with_hashtags(["#mix"]),
    ];
    let report = analyze_feed(&messages, 30).unwrap();

    assert_eq!(report.sentiment_distribution.positive, 50.0);
    assert_eq!(report.sentiment_distribution.negative, 50.0);
    assert_eq!(report.trending_topics, vec!["#mix"]);
}

#[test]
fn malformed_timestamp_is_reported() {
    let messages = vec![
        Message::new("ok", "adorei", TS, "user_1"),
        Message::new("bad", "adorei", "2025-09-10 10:00:00", "user_2"),
    ];
    let err = analyze_feed(&messages, 30).unwrap_err();

    match err {
        AnalyzeError::InvalidTimestamp { message_id, value, .. } => {
            assert_eq!(message_id, "bad");
            assert_eq!(value, "2025-09-10 10:00:00");
        }
    }
}

#[test]
fn missing_hashtags_default_to_empty() {
    let payload = r#"{
        "id": "msg_x",
        "content": "bom",
        "timestamp": "2025-09-10T10:00:00Z",
        "user_id": "user_x",
        "reactions": 1,
        "shares": 0,
        "views": 4
    }"#;
    let message: Message = serde_json::from_str(payload).unwrap();
    assert!(message.hashtags.is_empty());

    let report = analyze_one(message);
    assert!(report.trending_topics.is_empty());
}

#[test]
fn report_serializes_with_wire_keys() {
    let report = analyze_one(Message::new("m", "adorei", TS, "user_1").with_hashtags(["#a"]));
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["flags"]["mbras_employee"], false);
    assert_eq!(value["flags"]["candidate_awareness"], false);
    assert_eq!(value["flags"]["special_pattern"], false);
    assert_eq!(value["anomaly_detected"], false);
    assert_eq!(value["trending_topics"][0], "#a");
    assert!(value["influence_ranking"][0]["influence_score"].is_f64());
    assert!(value["sentiment_distribution"]["neutral"].is_f64());
}

#[test]
fn synthetic_feed_report_invariants() {
    let request = generate_performance_feed(1_000, default_anchor());
    assert_eq!(request.messages.len(), 1_000);
    assert_eq!(request.messages[0].id, "perf_0000");

    let started = std::time::Instant::now();
    let report = analyze_feed(&request.messages, request.time_window_minutes).unwrap();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    assert_eq!(report.sentiment_distribution.positive, 75.0);
    assert_eq!(report.sentiment_distribution.negative, 25.0);
    assert!((report.sentiment_distribution.total() - 100.0).abs() < 1e-9);
    assert_eq!(report.trending_topics, vec!["#produto", "#teste"]);
    assert_eq!(report.influence_ranking.len(), 200);
    assert!((report.engagement_score - 0.08558603597744051).abs() < 1e-9);

    if std::env::var("RUN_PERF").map(|value| value == "1").unwrap_or(false) {
        assert!(elapsed_ms < 200.0, "took {:.2} ms", elapsed_ms);
    }
}
