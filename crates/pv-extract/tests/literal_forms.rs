use pv_extract::{extract, ExtractOptions};

fn values(text: &str, path: &str) -> Vec<f64> {
    extract(text, path, &ExtractOptions::default())
        .unwrap()
        .into_iter()
        .map(|claim| claim.value)
        .collect()
}

fn raws(text: &str, path: &str) -> Vec<String> {
    extract(text, path, &ExtractOptions::default())
        .unwrap()
        .into_iter()
        .map(|claim| claim.raw_text)
        .collect()
}

#[test]
fn plain_decimal_with_identifier_guard() {
    let claims = extract(
        "Chronos-small achieves an MAE of 2.10 on ETTh1.",
        "paper.txt",
        &ExtractOptions::default(),
    )
    .unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].raw_text, "2.10");
    assert_eq!(claims[0].value, 2.10);
    assert_eq!(claims[0].line_number, 1);
    assert_eq!(claims[0].document_path, "paper.txt");
}

#[test]
fn latex_percent_and_scientific_notation() {
    let claims = extract(
        r"Our model reaches 85.3\% accuracy and $2.1\times10^{-4}$ loss.",
        "main.tex",
        &ExtractOptions::default(),
    )
    .unwrap();
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].raw_text, r"85.3\%");
    assert_eq!(claims[0].value, 85.3);
    assert!(claims[0].percent);
    assert!((claims[1].value - 2.1e-4).abs() < 1e-15);
    assert!(!claims[1].percent);
}

#[test]
fn thousands_separators_are_removed() {
    assert_eq!(
        values(
            r"We trained on 1,234 samples and 1{,}500 steps with 3\,000 tokens.",
            "main.tex"
        ),
        vec![1234.0, 1500.0, 3000.0]
    );
}

#[test]
fn exponent_notation() {
    assert_eq!(values("learning rate 1.3e-4 and 2E3", "notes.txt"), vec![1.3e-4, 2000.0]);
}

#[test]
fn magnitude_suffixes_apply_only_before_non_letters() {
    assert_eq!(
        raws("The model has 7B parameters and 12K steps, trained on 3 GPUs in 8Mb.", "a.txt"),
        vec!["7B".to_string(), "12K".to_string()]
    );
    assert_eq!(values("budget 7B and 12k", "a.txt"), vec![7e9, 12_000.0]);
    assert_eq!(values("size 1.5M", "a.txt"), vec![1.5e6]);
}

#[test]
fn signs_ranges_and_hyphens() {
    assert_eq!(
        values(
            "Gains of -0.5 and +1.25 over 2019-2020 baselines, chronos-2 excluded.",
            "a.txt"
        ),
        vec![-0.5, 1.25, 2019.0, 2020.0]
    );
    assert_eq!(values("drop of −3.5 points", "a.txt"), vec![-3.5]);
    assert_eq!(raws("delta -0.5", "a.txt"), vec!["-0.5".to_string()]);
}

#[test]
fn metric_prefix_overrides_identifier_guard() {
    assert_eq!(values("MAE2.10 vs v2 and x_3", "a.txt"), vec![2.10]);
}

#[test]
fn short_integers_are_filtered_unless_marked() {
    assert_eq!(values("epoch 5 and 50, with 5% dropout", "a.txt"), vec![50.0, 5.0]);

    let options = ExtractOptions {
        min_integer_digits: 1,
        ..ExtractOptions::default()
    };
    let claims = extract("epoch 5 and 50", "a.txt", &options).unwrap();
    let got: Vec<f64> = claims.iter().map(|claim| claim.value).collect();
    assert_eq!(got, vec![5.0, 50.0]);
}

#[test]
fn decimals_are_never_short_integers() {
    assert_eq!(values("ratio 0.5 and 3.0", "a.txt"), vec![0.5, 3.0]);
}

#[test]
fn max_magnitude_bounds_values() {
    let options = ExtractOptions {
        max_magnitude: Some(1000.0),
        ..ExtractOptions::default()
    };
    let claims = extract("budgets 500 and 5000", "a.txt", &options).unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].value, 500.0);
}

#[test]
fn non_finite_literals_are_discarded() {
    assert!(values("overflow 1e999 here", "a.txt").is_empty());
}

#[test]
fn claims_follow_document_order() {
    let claims = extract("b 20.5 a 10.5\nc 30.5", "a.txt", &ExtractOptions::default()).unwrap();
    let order: Vec<(usize, f64)> = claims
        .iter()
        .map(|claim| (claim.line_number, claim.value))
        .collect();
    assert_eq!(order, vec![(1, 20.5), (1, 10.5), (2, 30.5)]);
}

#[test]
fn leading_dot_decimals_keep_their_scale() {
    let claims = extract("accuracy of .85 overall", "p.txt", &ExtractOptions::default()).unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].raw_text, ".85");
    assert_eq!(claims[0].value, 0.85);
    assert_eq!(values("gain of .5% and loss -.25", "p.txt"), vec![0.5, -0.25]);
}

#[test]
fn scientific_notation_is_correctly_rounded() {
    assert_eq!(values(r"$1.3\times10^{-4}$ error", "main.tex"), vec![1.3e-4]);
    assert_eq!(values(r"$2.5 \times 10^{3}$ steps", "main.tex"), vec![2500.0]);
}

#[test]
fn ordinal_numbers_are_skipped() {
    assert_eq!(
        values("Ranked 12th of 40 entries, the 21st run used 64 GB.", "p.txt"),
        vec![40.0, 64.0]
    );
}
