use pv_core::{Claim, ReferenceValue, Status};
use pv_match::{match_claims, MatchPolicy, Matcher, Ranking};

fn claim(value: f64, context: &[&str]) -> Claim {
    Claim::new(
        value.to_string(),
        value,
        1,
        context.iter().map(|token| token.to_string()).collect(),
        "paper.tex",
    )
}

fn reference(key: &str, value: f64, source: &str) -> ReferenceValue {
    ReferenceValue::new(key, value, source)
}

#[test]
fn identical_value_is_exact_match() {
    let verdicts = match_claims(
        &[claim(2.10, &[])],
        &[reference("chronos.mae", 2.10, "results.json")],
        &MatchPolicy::default(),
    )
    .expect("match");
    assert_eq!(verdicts[0].status, Status::Match);
    assert_eq!(verdicts[0].deviation_pct, Some(0.0));
    assert_eq!(verdicts[0].tied_candidates, 1);
}

#[test]
fn small_relative_drift_is_tolerable_within_tolerance() {
    let refs = [reference("value", 0.000135, "run.json")];
    let verdicts = match_claims(&[claim(0.00013, &[])], &refs, &MatchPolicy::with_tolerance(5.0))
        .expect("match");
    assert_eq!(verdicts[0].status, Status::Tolerable);
    let deviation = verdicts[0].deviation_pct.expect("deviation");
    assert!((deviation - 3.7037).abs() < 1e-3, "deviation {deviation}");
}

#[test]
fn drift_beyond_tolerance_is_mismatch() {
    let refs = [reference("value", 0.000135, "run.json")];
    let verdicts = match_claims(&[claim(0.00013, &[])], &refs, &MatchPolicy::with_tolerance(1.0))
        .expect("match");
    assert_eq!(verdicts[0].status, Status::Mismatch);
    assert!(verdicts[0].matched_reference.is_some());
}

#[test]
fn nothing_plausible_is_unmatched() {
    let refs = [reference("steps", 20.0, "run.json"), reference("tiny", 0.5, "run.json")];
    let verdicts = match_claims(&[claim(42.0, &[])], &refs, &MatchPolicy::default()).expect("match");
    assert_eq!(verdicts[0].status, Status::Unmatched);
    assert_eq!(verdicts[0].deviation_pct, None);
    assert_eq!(verdicts[0].matched_reference, None);
    assert_eq!(verdicts[0].tied_candidates, 0);
}

#[test]
fn exact_numeric_match_wins_over_label() {
    let refs = [reference("b.mae", 2.15, "r.json"), reference("a.mae", 2.10, "r.json")];
    let verdicts = match_claims(&[claim(2.10, &["a"])], &refs, &MatchPolicy::default())
        .expect("match");
    let chosen = verdicts[0].matched_reference.as_ref().expect("reference");
    assert_eq!(chosen.key, "a.mae");
    assert_eq!(verdicts[0].status, Status::Match);

    let misleading = match_claims(&[claim(2.10, &["b"])], &refs, &MatchPolicy::default())
        .expect("match");
    assert_eq!(
        misleading[0].matched_reference.as_ref().expect("reference").key,
        "a.mae"
    );
}

#[test]
fn empty_reference_pool_leaves_every_claim_unmatched() {
    let claims = [claim(2.10, &[]), claim(0.5, &["mae"]), claim(12.0, &[])];
    let verdicts = match_claims(&claims, &[], &MatchPolicy::default()).expect("match");
    assert_eq!(verdicts.len(), 3);
    assert!(verdicts.iter().all(|verdict| verdict.status == Status::Unmatched));
}

#[test]
fn label_breaks_ties_inside_the_window() {
    let refs = [
        reference("mae", 2.12, "xgboost.json"),
        reference("mae", 2.13, "chronos-small_etth1.json"),
    ];
    let policy = MatchPolicy::with_tolerance(2.0);
    let verdicts = match_claims(&[claim(2.10, &["chronos", "mae"])], &refs, &policy)
        .expect("match");
    let verdict = &verdicts[0];
    assert_eq!(
        verdict.matched_reference.as_ref().expect("reference").source_file,
        "chronos-small_etth1.json"
    );
    assert_eq!(verdict.label_score, Some(1.0));
    assert_eq!(verdict.tied_candidates, 2);
    assert_eq!(verdict.status, Status::Tolerable);
}

#[test]
fn source_stem_can_be_excluded_from_labels() {
    let refs = [
        reference("mae", 2.12, "xgboost.json"),
        reference("mae", 2.13, "chronos.json"),
    ];
    let policy = MatchPolicy {
        tolerance_pct: 2.0,
        label_includes_source: false,
        ..MatchPolicy::default()
    };
    let verdicts = match_claims(&[claim(2.10, &["chronos"])], &refs, &policy).expect("match");
    assert_eq!(
        verdicts[0].matched_reference.as_ref().expect("reference").source_file,
        "xgboost.json"
    );
}

#[test]
fn metric_hint_joins_the_label() {
    let refs = [reference("rmse", 3.01, "m.json"), reference("mae", 3.02, "m.json")];
    let hinted = claim(3.0, &["model"]).with_metric_hint("mae");
    let verdicts = match_claims(&[hinted], &refs, &MatchPolicy::with_tolerance(1.0))
        .expect("match");
    assert_eq!(
        verdicts[0].matched_reference.as_ref().expect("reference").key,
        "mae"
    );
}

#[test]
fn zero_reference_uses_epsilon_floor() {
    let refs = [reference("bias", 0.0, "m.json")];
    let verdicts = match_claims(&[claim(0.0, &[])], &refs, &MatchPolicy::default()).expect("match");
    assert_eq!(verdicts[0].status, Status::Match);

    let off = match_claims(&[claim(0.1, &[])], &refs, &MatchPolicy::default()).expect("match");
    assert_eq!(off[0].status, Status::Unmatched);
}

#[test]
fn sign_mismatch_produces_numeric_deviation() {
    let refs = [reference("delta", -0.5, "m.json")];
    let verdicts = match_claims(&[claim(0.5, &[])], &refs, &MatchPolicy::default()).expect("match");
    assert_eq!(verdicts[0].status, Status::Unmatched);
    let policy = MatchPolicy {
        plausible_pct: 250.0,
        ..MatchPolicy::default()
    };
    let verdicts = match_claims(&[claim(0.5, &[])], &refs, &policy).expect("match");
    assert_eq!(verdicts[0].status, Status::Mismatch);
    assert_eq!(verdicts[0].deviation_pct, Some(200.0));
}

#[test]
fn blended_ranking_trades_deviation_for_label() {
    let refs = [
        reference("lstm.mae", 2.11, "r.json"),
        reference("chronos.mae", 2.16, "r.json"),
    ];
    let claims = [claim(2.10, &["chronos"])];
    let numeric = match_claims(&claims, &refs, &MatchPolicy::with_tolerance(1.0)).expect("match");
    assert_eq!(
        numeric[0].matched_reference.as_ref().expect("reference").key,
        "lstm.mae"
    );

    let blended = MatchPolicy {
        tolerance_pct: 1.0,
        ranking: Ranking::Blended { label_weight: 5.0 },
        ..MatchPolicy::default()
    };
    let verdicts = match_claims(&claims, &refs, &blended).expect("match");
    assert_eq!(
        verdicts[0].matched_reference.as_ref().expect("reference").key,
        "chronos.mae"
    );
    assert_eq!(verdicts[0].status, Status::Mismatch);
}

#[test]
fn reference_pool_is_reused_across_claims() {
    let matcher = Matcher::new(
        vec![reference("mae", 2.10, "r.json")],
        MatchPolicy::default(),
    )
    .expect("matcher");
    let verdicts = matcher.match_all(&[claim(2.10, &[]), claim(2.10, &["again"])]);
    assert!(verdicts.iter().all(|verdict| verdict.status == Status::Match));
    assert_eq!(matcher.references().len(), 1);
}

#[test]
fn zero_tolerance_admits_only_match() {
    let refs = [reference("mae", 2.10, "r.json")];
    let policy = MatchPolicy::with_tolerance(0.0);
    let exact = match_claims(&[claim(2.10, &[])], &refs, &policy).expect("match");
    assert_eq!(exact[0].status, Status::Match);
    let near = match_claims(&[claim(2.11, &[])], &refs, &policy).expect("match");
    assert_eq!(near[0].status, Status::Mismatch);
}
