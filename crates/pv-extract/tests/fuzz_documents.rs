use pv_extract::{DocumentFlavor, ExtractOptions, Extractor};
use proptest::prelude::*;

fn flavor_path(flavor: u8) -> &'static str {
    match flavor % 3 {
        0 => "paper.tex",
        1 => "paper.md",
        _ => "paper.txt",
    }
}

proptest! {
    #[test]
    fn extraction_never_panics_and_preserves_order(
        text in "[ -~\n−]{0,240}",
        flavor in any::<u8>(),
    ) {
        let extractor = Extractor::new(ExtractOptions::default()).unwrap();
        let claims = extractor.extract(&text, flavor_path(flavor));
        for pair in claims.windows(2) {
            prop_assert!(pair[0].line_number <= pair[1].line_number);
        }
        for claim in &claims {
            prop_assert!(claim.value.is_finite());
            prop_assert!(claim.context_tokens.len() <= 5);
            prop_assert!(claim.line_number >= 1);
        }
    }

    #[test]
    fn arbitrary_unicode_is_plain_text(text in any::<String>()) {
        let options = ExtractOptions {
            flavor: Some(DocumentFlavor::Latex),
            ..ExtractOptions::default()
        };
        let extractor = Extractor::new(options).unwrap();
        let first = extractor.extract(&text, "paper.tex");
        let second = extractor.extract(&text, "paper.tex");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_decimals_are_recovered(whole in 10u32..100000, frac in 0u32..1000) {
        let literal = format!("{whole}.{frac:03}");
        let text = format!("score {literal} overall");
        let extractor = Extractor::new(ExtractOptions::default()).unwrap();
        let claims = extractor.extract(&text, "paper.txt");
        prop_assert_eq!(claims.len(), 1);
        prop_assert_eq!(&claims[0].raw_text, &literal);
        let expected: f64 = literal.parse().unwrap();
        prop_assert_eq!(claims[0].value, expected);
    }
}
