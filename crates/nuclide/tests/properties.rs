//! Integration tests for properties that hold over the whole dataset

use std::collections::HashSet;

use gtools_nuclide::{
    ChainGammaAggregator, DecayChainResolver, GammaLineSearch, NuclideDatabase, QueryOptions,
    ReferenceTables,
};
use rstest::{fixture, rstest};

#[fixture]
fn db() -> NuclideDatabase {
    NuclideDatabase::load(ReferenceTables::builtin()).unwrap()
}

fn roots(db: &NuclideDatabase) -> Vec<String> {
    db.nuclides().map(|n| n.id.to_string()).collect()
}

#[rstest]
#[case(50.0, 5.0, 0.0, 0.0)]
#[case(186.87, 1.0, 60.0, 1.0)]
#[case(609.3, 10.0, 0.0, 1.0)]
#[case(800.0, 5.0, 60.0, 0.0)]
#[case(1400.0, 100.0, 1e6, 5.0)]
fn search_hits_satisfy_every_filter(
    db: NuclideDatabase,
    #[case] center: f64,
    #[case] delta: f64,
    #[case] halflife: f64,
    #[case] intensity: f64,
) {
    let options = QueryOptions::default()
        .with_delta(delta)
        .with_halflife_threshold(halflife)
        .with_intensity_threshold(intensity);
    let hits = GammaLineSearch::new(&db)
        .search_by_energy(center, &options)
        .unwrap();

    for hit in &hits {
        assert!((hit.energy - center).abs() <= delta);
        assert!(hit.intensity >= intensity);
        assert!(hit.half_life >= halflife);
    }

    // sorted by distance
    for pair in hits.windows(2) {
        assert!((pair[0].energy - center).abs() <= (pair[1].energy - center).abs());
    }
}

#[rstest]
fn search_misses_nothing(db: NuclideDatabase) {
    let options = QueryOptions::default().with_delta(25.0);
    let search = GammaLineSearch::new(&db);

    let expected = db
        .transitions()
        .filter(|t| (t.energy - 600.0).abs() <= 25.0)
        .count();
    assert_eq!(search.search_by_energy(600.0, &options).unwrap().len(), expected);
}

#[rstest]
fn limit_intensity_postcondition(db: NuclideDatabase) {
    let options = QueryOptions::default().with_limit_intensity(true);
    let search = GammaLineSearch::new(&db);

    for nuclide in roots(&db) {
        let max = db
            .transitions_of(&nuclide)
            .unwrap()
            .iter()
            .map(|t| t.intensity)
            .fold(0.0, f64::max);
        let lines = search.lines_for_nuclide(&nuclide, &options).unwrap();

        assert!(lines.intensities.iter().all(|i| *i >= 0.1 * max), "{nuclide}");
        assert!(lines.intensities.windows(2).all(|w| w[0] >= w[1]), "{nuclide}");
    }
}

#[rstest]
fn resolution_is_monotonic(db: NuclideDatabase) {
    let resolver = DecayChainResolver::new(&db);
    let thresholds = [0.0, 1e-9, 1e-6, 1e-4, 0.001, 0.01, 0.1, 0.5, 0.9, 0.999, 1.0];

    for root in roots(&db) {
        let sets: Vec<HashSet<String>> = thresholds
            .iter()
            .map(|t| {
                let options = QueryOptions::default().with_branching_ratio_threshold(*t);
                let chain = resolver.resolve(&root, &options).unwrap();
                chain.ids().map(|id| id.to_string()).collect()
            })
            .collect();

        for pair in sets.windows(2) {
            assert!(pair[0].is_superset(&pair[1]), "{root}");
        }
    }
}

#[rstest]
fn members_are_distinct_and_above_threshold(db: NuclideDatabase) {
    let resolver = DecayChainResolver::new(&db);

    for threshold in [0.0, 0.001, 0.1] {
        let options = QueryOptions::default().with_branching_ratio_threshold(threshold);
        for root in roots(&db) {
            let chain = resolver.resolve(&root, &options).unwrap();
            let unique: HashSet<String> = chain.ids().map(|id| id.to_string()).collect();

            assert_eq!(unique.len(), chain.len(), "{root}");
            assert!(!unique.contains(&chain.root.to_string()), "{root}");
            assert!(chain.members.iter().all(|m| m.ratio >= threshold && m.ratio <= 1.0));
        }
    }
}

#[rstest]
fn repeated_queries_are_identical(db: NuclideDatabase) {
    let options = QueryOptions::default()
        .with_delta(50.0)
        .with_branching_ratio_threshold(0.0);

    let search = GammaLineSearch::new(&db);
    assert_eq!(
        search.search_by_energy(300.0, &options).unwrap(),
        search.search_by_energy(300.0, &options).unwrap()
    );

    let resolver = DecayChainResolver::new(&db);
    assert_eq!(
        resolver.resolve("U-238", &options).unwrap(),
        resolver.resolve("U-238", &options).unwrap()
    );

    let aggregator = ChainGammaAggregator::new(&db);
    assert_eq!(
        aggregator.decay_products_spectrum("U-238", &options).unwrap(),
        aggregator.decay_products_spectrum("U-238", &options).unwrap()
    );
}

#[rstest]
fn spectrum_is_the_concatenation_of_line_lists(db: NuclideDatabase) {
    let options = QueryOptions::default()
        .with_branching_ratio_threshold(0.001)
        .with_intensity_threshold(1.0);

    let chain = DecayChainResolver::new(&db)
        .resolve("Ra-226", &options)
        .unwrap();
    let spectrum = ChainGammaAggregator::new(&db)
        .decay_products_spectrum("Ra-226", &options)
        .unwrap();

    let search = GammaLineSearch::new(&db);
    let mut energies = Vec::new();
    for id in std::iter::once(&chain.root).chain(chain.ids()) {
        let lines = search.lines_for_nuclide(&id.to_string(), &options).unwrap();
        energies.extend(lines.energies);
    }
    assert_eq!(spectrum.energies, energies);
}

#[rstest]
fn queries_share_one_database_across_threads(db: NuclideDatabase) {
    let options = QueryOptions::default();
    let expected = DecayChainResolver::new(&db)
        .resolve("U-238", &options)
        .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    DecayChainResolver::new(&db)
                        .resolve("U-238", &options)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
