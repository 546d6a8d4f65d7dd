use std::cell::Cell;
use std::collections::HashMap;

use crate::factories::{case_citation, id_citation, nonopinion_citation, short_case_citation, supra_citation};
use crate::{
    resolve_citations_infallible, resolve_citations_with, resolve_full_citation,
    resolve_short_form_citation, Citation, ComparisonResource, FullCitation, ResolverConfig,
};

fn foo_v_bar() -> Citation {
    case_citation("1", "U.S.", "1")
        .with_plaintiff("Foo")
        .with_defendant("Bar")
        .into()
}

#[test]
fn comparison_identity_collapses_repeated_full_citations() {
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        case_citation("2", "F.3d", "9").with_defendant("Qux").into(),
        foo_v_bar(),
        short_case_citation("1", "U.S.", "4").into(),
        supra_citation().with_antecedent_guess("Foo").into(),
    ];
    let config = ResolverConfig::comparison();
    let resolutions = resolve_citations_infallible(&citations, &config);

    let clusters: Vec<Vec<usize>> = resolutions.iter().map(|c| c.positions.clone()).collect();
    assert_eq!(clusters, vec![vec![0, 2, 3, 4], vec![1]]);

    let first = ComparisonResource::new(citations[0].as_full().unwrap());
    assert!(std::ptr::eq(
        resolutions.iter().next().unwrap().resource.citation(),
        citations[0].as_full().unwrap()
    ));
    assert_eq!(resolutions.get(&first).map(<[_]>::len), Some(4));
}

#[test]
fn external_store_identity() {
    // authority ids keyed by corrected citation, as a database lookup would return
    let store: HashMap<String, u32> = vec![("1 U.S. 1".to_string(), 10), ("5 U.S. 5".to_string(), 10)]
        .into_iter()
        .collect();
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        case_citation("5", "U.S.", "5").with_defendant("Other").into(),
        id_citation().into(),
        supra_citation().with_antecedent_guess("Foo").into(),
    ];
    let config = ResolverConfig::new(|full: &FullCitation| {
        Ok(store.get(&full.corrected_citation()).copied().unwrap_or(0))
    });
    let resolutions = resolve_citations_infallible(&citations, &config);

    assert_eq!(resolutions.len(), 1);
    assert_eq!(resolutions.get(&10).map(<[_]>::len), Some(4));
}

#[test]
fn full_table_is_filled_under_custom_full_resolver() {
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        short_case_citation("1", "U.S.", "2").into(),
    ];
    let config = ResolverConfig::new(|_: &FullCitation| Ok("authority"));
    let resolutions = resolve_citations_infallible(&citations, &config);
    assert_eq!(resolutions.get(&"authority").map(<[_]>::len), Some(2));
}

#[test]
fn overriding_one_slot_keeps_other_defaults() {
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        id_citation().into(),
        short_case_citation("1", "U.S.", "2").into(),
        supra_citation().with_antecedent_guess("Bar").into(),
    ];
    let config = ResolverConfig::default().with_id_resolver(|_, _| Ok(None));
    let resolutions = resolve_citations_infallible(&citations, &config);
    let clusters: Vec<Vec<usize>> = resolutions.iter().map(|c| c.positions.clone()).collect();
    assert_eq!(clusters, vec![vec![0, 2, 3]]);
}

#[test]
fn custom_short_form_resolver_wraps_default() {
    let calls = Cell::new(0);
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        short_case_citation("1", "U.S.", "2").into(),
        short_case_citation("1", "U.S.", "3").into(),
    ];
    let config = ResolverConfig::default().with_short_form_resolver(|short, table| {
        calls.set(calls.get() + 1);
        Ok(resolve_short_form_citation(short, table))
    });
    let resolutions = resolve_citations_infallible(&citations, &config);
    assert_eq!(calls.get(), 2);
    assert_eq!(resolutions.resolved_count(), 3);
}

#[test]
fn supra_resolver_can_read_full_table() {
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        supra_citation().into(),
    ];
    // resolve guess-less supra citations to the most recent full citation
    let config = ResolverConfig::default()
        .with_supra_resolver(|_, table| Ok(table.iter().last().map(|(_, r)| *r)));
    let resolutions = resolve_citations_infallible(&citations, &config);
    assert_eq!(resolutions.resolved_count(), 2);
}

#[test]
fn resolver_errors_abort_the_pass() {
    let citations: Vec<Citation> = vec![
        foo_v_bar(),
        nonopinion_citation("§99").into(),
        case_citation("1", "Bad", "1").into(),
        id_citation().into(),
    ];
    let seen = Cell::new(0);
    let config: ResolverConfig<'_, u32, String> = ResolverConfig::new(|full: &FullCitation| {
        seen.set(seen.get() + 1);
        match full.corrected_reporter() {
            Some("Bad") => Err(format!("no authority for {}", full.matched_text())),
            _ => Ok(1),
        }
    })
    .with_id_resolver(|_, _| Err("id resolver reached".to_string()));

    let err = resolve_citations_with(&citations, &config).unwrap_err();
    assert_eq!(err, "no authority for 1 Bad 1");
    assert_eq!(seen.get(), 2);
}

#[test]
fn default_full_resolver_matches_config_default() {
    let citations: Vec<Citation> = vec![foo_v_bar()];
    let full = citations[0].as_full().unwrap();
    let resolutions = resolve_citations_infallible(&citations, &ResolverConfig::default());
    assert!(resolutions.contains(&resolve_full_citation(full)));
}
