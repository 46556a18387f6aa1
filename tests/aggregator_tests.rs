use ticketwatch::price_infra::aggregator::aggregate;
use ticketwatch::types::price::PriceStats;
use ticketwatch::types::source::SourceName;

fn name(s: &str) -> SourceName {
    SourceName::new(s).unwrap()
}

fn prices(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

#[test]
fn tie_keeps_first_declared_source() {
    let result = aggregate(vec![
        (name("A"), prices(&[10.0, 30.0])),
        (name("B"), prices(&[10.0, 12.0])),
    ]).unwrap();

    let best = result.best.unwrap();
    assert_eq!(best.source, name("A"));
    assert_eq!(best.stats, PriceStats::new(10.0, 20.0, 20.0));
}

#[test]
fn strictly_lower_min_replaces_best() {
    let result = aggregate(vec![
        (name("A"), prices(&[12.0, 40.0])),
        (name("B"), prices(&[9.0, 100.0])),
    ]).unwrap();

    let best = result.best.unwrap();
    assert_eq!(best.source, name("B"));
    assert_eq!(best.stats, PriceStats::new(9.0, 54.5, 54.5));
}

#[test]
fn absent_sources_are_kept_but_never_best() {
    let result = aggregate(vec![
        (name("A"), vec![]),
        (name("B"), prices(&[75.0])),
        (name("C"), vec![None]),
    ]).unwrap();

    assert_eq!(result.sources.len(), 3);
    assert_eq!(result.sources[0], (name("A"), None));
    assert_eq!(result.sources[2], (name("C"), None));
    assert_eq!(result.best.unwrap().source, name("B"));
}

#[test]
fn all_absent_means_absent_best() {
    let result = aggregate(vec![
        (name("A"), vec![]),
        (name("B"), vec![None, None]),
    ]).unwrap();

    assert!(result.sources.iter().all(|(_, stats)| stats.is_none()));
    assert!(result.best.is_none());
    assert_eq!(result.entries().count(), 3);
}

#[test]
fn no_sources_at_all() {
    let result = aggregate(vec![]).unwrap();
    assert!(result.sources.is_empty());
    assert!(result.best.is_none());
    let entries: Vec<_> = result.entries().collect();
    assert_eq!(entries, vec![(SourceName::best(), None)]);
}
