use super::*;
use crate::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

fn filter_with(tokens: &[&str]) -> PreFilter {
    PreFilter::new(DenyList::from_tokens(tokens.iter().copied()))
}

// ---------------------------------------------------------------------------
// PreFilter rules
// ---------------------------------------------------------------------------

#[test]
fn robots_files_are_rejected_regardless_of_deny_list() {
    let names = [
        "crawl-data/CC-MAIN-2026-04/segments/1/robotstxt/robots.txt",
        "robots.txt",
        "some/en-GB/path/robots.txt",
    ];
    for tokens in [&[][..], &["en-GB"][..], &["xx-YY", "robots"][..]] {
        let filter = filter_with(tokens);
        for name in names {
            assert_eq!(
                filter.rejection(name),
                Some(SkipReason::RobotsFile),
                "{name} with {tokens:?}"
            );
        }
    }
}

#[test]
fn robots_rule_is_a_suffix_match() {
    let filter = filter_with(&[]);
    assert!(filter.is_eligible("crawl-data/robots.txt.warc.gz"));
    assert!(filter.is_eligible("crawl-data/robotstxt/CC-MAIN-1.warc.gz"));
}

#[test]
fn deny_listed_substring_rejects() {
    let filter = filter_with(&["en-GB", "fr-FR"]);
    assert_eq!(
        filter.rejection("crawl-data/site/en-GB/page.warc.gz"),
        Some(SkipReason::DeniedLanguage("en-GB".into()))
    );
    assert_eq!(
        filter.rejection("crawl-data/fr-FR.warc.gz"),
        Some(SkipReason::DeniedLanguage("fr-FR".into()))
    );
}

#[test]
fn filename_without_tokens_is_accepted() {
    let filter = filter_with(&["en-GB", "fr-FR"]);
    let name = "crawl-data/CC-MAIN-2026-04/segments/1768.12/warc/CC-MAIN-20260115-00001.warc.gz";
    assert!(filter.is_eligible(name));
    assert_eq!(filter.rejection(name), None);
}

#[test]
fn matching_is_case_sensitive() {
    let filter = filter_with(&["en-GB"]);
    assert!(filter.is_eligible("crawl-data/en-gb/page.warc.gz"));
}

#[test]
fn first_token_in_sorted_order_is_reported() {
    let filter = filter_with(&["pt-PT", "en-GB"]);
    assert_eq!(
        filter.rejection("x/pt-PT/en-GB/y"),
        Some(SkipReason::DeniedLanguage("en-GB".into()))
    );
}

#[test]
fn every_deny_list_token_rejects_and_nothing_else_does() {
    let deny_list = DenyList::from_registry(&LanguageRegistry::builtin(), "German", 5);
    let filter = PreFilter::new(deny_list.clone());

    for token in deny_list.iter() {
        let name = format!("crawl-data/segments/{}/index.warc.gz", token);
        assert!(!filter.is_eligible(&name), "{token} should reject {name}");
    }

    assert!(filter.is_eligible("crawl-data/segments/de-DE/index.warc.gz"));
    assert!(filter.is_eligible("crawl-data/segments/plain/index.warc.gz"));
}

// ---------------------------------------------------------------------------
// DenyList construction
// ---------------------------------------------------------------------------

#[test]
fn short_codes_are_excluded_even_for_other_languages() {
    let registry = LanguageRegistry::from_pairs([
        ("Arabic", "ar"),
        ("English", "en"),
        ("Filipino", "fil"),
        ("Chinese (Simplified)", "zh-Hans"),
        ("English (United Kingdom)", "en-GB"),
        ("Spanish (Latin America)", "es-419"),
    ]);
    let deny_list = DenyList::from_registry(&registry, "German", 5);

    assert!(!deny_list.contains("ar"));
    assert!(!deny_list.contains("en"));
    assert!(!deny_list.contains("fil"));
    assert!(deny_list.contains("zh-Hans"));
    assert!(deny_list.contains("en-GB"));
    assert!(deny_list.contains("es-419"));
    assert_eq!(deny_list.len(), 3);
}

#[test]
fn target_language_entries_are_excluded() {
    let registry = LanguageRegistry::from_pairs([
        ("German (Germany)", "de-DE"),
        ("German (Switzerland)", "de-CH"),
        ("Swiss German (Switzerland)", "gsw-CH"),
        ("Low German (Germany)", "nds-DE"),
        ("French (Switzerland)", "fr-CH"),
    ]);
    let deny_list = DenyList::from_registry(&registry, "German", 5);

    assert_eq!(deny_list.iter().collect::<Vec<_>>(), vec!["fr-CH"]);
}

#[test]
fn min_len_boundary_is_inclusive() {
    let registry = LanguageRegistry::from_pairs([("Four", "abcd"), ("Five", "abcde")]);
    let deny_list = DenyList::from_registry(&registry, "German", 5);
    assert!(!deny_list.contains("abcd"));
    assert!(deny_list.contains("abcde"));
}

#[test]
fn builtin_registry_yields_expected_deny_list() {
    let registry = LanguageRegistry::builtin();
    assert!(registry.len() > 100, "built-in table failed to parse");

    let deny_list = DenyList::from_registry(&registry, "German", 5);
    assert!(deny_list.contains("en-GB"));
    assert!(deny_list.contains("fr-FR"));
    assert!(!deny_list.contains("de-DE"));
    assert!(!deny_list.contains("de-AT"));
    assert!(!deny_list.contains("en"));
    assert!(deny_list.iter().all(|t| t.chars().count() >= 5));
}

#[test]
fn from_config_uses_registry_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# custom registry").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "Dutch (Netherlands)\tnl-NL").unwrap();
    writeln!(file, "German (Germany)\tde-DE").unwrap();

    let config = LanguageConfig {
        registry_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let deny_list = DenyList::from_config(&config).unwrap();
    assert_eq!(deny_list.iter().collect::<Vec<_>>(), vec!["nl-NL"]);
}

#[test]
fn from_config_defaults_to_builtin() {
    let deny_list = DenyList::from_config(&LanguageConfig::default()).unwrap();
    assert!(deny_list.contains("en-US"));
}

// ---------------------------------------------------------------------------
// Registry parsing
// ---------------------------------------------------------------------------

#[test]
fn registry_parse_skips_comments_and_handles_crlf() {
    let registry =
        LanguageRegistry::parse("# header\r\n\r\nEnglish (United States)\ten-US\r\n").unwrap();
    assert_eq!(
        registry.entries(),
        &[RegistryEntry {
            description: "English (United States)".into(),
            tag: "en-US".into(),
        }]
    );
}

#[test]
fn registry_parse_rejects_malformed_line() {
    let err = LanguageRegistry::parse("English en-US\n").unwrap_err();
    match err {
        Error::Config { message, key } => {
            assert_eq!(key.as_deref(), Some("language.registry_path"));
            assert!(message.contains("line 1"));
        }
        other => panic!("expected Config error, got {other:?}"),
    }

    assert!(LanguageRegistry::parse("English\t\n").is_err());
}

#[test]
fn registry_load_reports_missing_file() {
    let err = LanguageRegistry::load(std::path::Path::new("/nonexistent/registry.tsv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("/nonexistent/registry.tsv"));
}
