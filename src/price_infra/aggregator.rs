use std::collections::HashSet;
use serde::Serialize;
use crate::error::{Error, Result};
use crate::price_infra::stats::reduce;
use crate::types::price::PriceStats;
use crate::types::source::SourceName;

/// The source holding the lowest minimum price in a cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BestPrice {
    pub source: SourceName,
    pub stats: PriceStats,
}

/// Outcome of one poll cycle: every configured source (in declared order,
/// present or absent) plus the derived Best entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PollCycleResult {
    pub sources: Vec<(SourceName, Option<PriceStats>)>,
    pub best: Option<BestPrice>,
}

impl PollCycleResult {
    /// Source entries followed by the `"Best"` entry.
    pub fn entries(&self) -> impl Iterator<Item = (SourceName, Option<PriceStats>)> + '_ {
        self.sources.iter()
            .cloned()
            .chain(std::iter::once((
                SourceName::best(),
                self.best.as_ref().map(|b| b.stats),
            )))
    }

    pub fn sources_with_data(&self) -> usize {
        self.sources.iter().filter(|(_, stats)| stats.is_some()).count()
    }
}

/// Reduce each source's observations and pick the cheapest source.
///
/// Iteration follows the order of `raw_by_source`. A later source only takes
/// over Best when its minimum is strictly lower, so ties go to whichever
/// source was declared first.
pub fn aggregate(raw_by_source: Vec<(SourceName, Vec<Option<f64>>)>) -> Result<PollCycleResult> {
    let mut seen = HashSet::with_capacity(raw_by_source.len());
    let mut sources = Vec::with_capacity(raw_by_source.len());
    let mut best: Option<BestPrice> = None;

    for (source, observations) in raw_by_source {
        if source.is_best() {
            return Err(Error::ReservedSourceName(source.to_string()));
        }
        if !seen.insert(source.clone()) {
            return Err(Error::DuplicateSource(source.to_string()));
        }

        let stats = reduce(&observations);

        if let Some(stats) = stats {
            let replaces = match &best {
                None => true,
                Some(current) => stats.min < current.stats.min,
            };
            if replaces {
                best = Some(BestPrice { source: source.clone(), stats });
            }
        }

        sources.push((source, stats));
    }

    Ok(PollCycleResult { sources, best })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> SourceName {
        SourceName::new(s).unwrap()
    }

    #[test]
    fn reserved_input_is_rejected() {
        let raw = vec![(SourceName::best(), vec![Some(10.0)])];
        assert!(matches!(aggregate(raw), Err(Error::ReservedSourceName(_))));
    }

    #[test]
    fn duplicate_input_is_rejected() {
        let raw = vec![
            (name("A"), vec![Some(10.0)]),
            (name("A"), vec![Some(9.0)]),
        ];
        assert!(matches!(aggregate(raw), Err(Error::DuplicateSource(_))));
    }

    #[test]
    fn entries_end_with_best() {
        let result = aggregate(vec![
            (name("A"), vec![Some(10.0)]),
            (name("B"), vec![]),
        ]).unwrap();

        let keys: Vec<String> = result.entries().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["A", "B", "Best"]);
        assert_eq!(result.sources[1], (name("B"), None));
        assert_eq!(result.best.as_ref().unwrap().stats, PriceStats::new(10.0, 10.0, 10.0));
        assert_eq!(result.sources_with_data(), 1);
    }
}
