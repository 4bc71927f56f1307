//! Property tests for the ordering, partitioning, and serialization laws.

use gmatkit::mission::{ForLoop, Report};
use gmatkit::registry::{Category, Registry};
use gmatkit::resources::{CustomResource, ReportSink, Resource, Variable};
use gmatkit::script::{SEQUENCE_SENTINEL, Script};
use proptest::prelude::*;

/// Every kind the classifier recognizes, in no particular order.
const KINDS: [&str; 8] = [
    "Variable",
    "CoordinateSystem",
    "Spacecraft",
    "ImpulsiveBurn",
    "ForceModel",
    "Propagator",
    "DifferentialCorrector",
    "ReportFile",
];

/// Kind indices become resources named by insertion position (R0, R1, ...).
fn resources_from(kind_indices: &[prop::sample::Index]) -> Vec<Resource> {
    kind_indices
        .iter()
        .enumerate()
        .map(|(position, index)| {
            let kind = KINDS[index.index(KINDS.len())];
            let name = format!("R{position}");
            CustomResource::new(kind, &name, format!("Create {kind} {name};")).into()
        })
        .collect()
}

fn categories(registry: &Registry) -> Vec<Category> {
    registry
        .iter()
        .map(|r| r.category().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn test_registry_categories_never_decrease(
        kind_indices in prop::collection::vec(any::<prop::sample::Index>(), 0..32),
    ) {
        let mut registry = Registry::new();
        for resource in resources_from(&kind_indices) {
            registry.insert(resource).unwrap();
        }
        let cats = categories(&registry);
        prop_assert!(cats.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_registry_is_stable_within_category(
        kind_indices in prop::collection::vec(any::<prop::sample::Index>(), 0..32),
    ) {
        let total = kind_indices.len();
        let mut registry = Registry::new();
        for resource in resources_from(&kind_indices) {
            registry.insert(resource).unwrap();
        }
        prop_assert_eq!(registry.len(), total);
        // Names encode insertion order (R0, R1, ...); within each category
        // they must come back in that order.
        for kind in KINDS {
            let sequence: Vec<usize> = registry
                .iter()
                .filter(|r| r.kind() == kind)
                .map(|r| r.name()[1..].parse().unwrap())
                .collect();
            prop_assert!(sequence.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_partition_laws(jobs in prop::collection::vec(any::<u32>(), 0..64), groups in 1usize..8) {
        let partitioned = gmatkit::partition(jobs.clone(), groups).unwrap();
        prop_assert_eq!(partitioned.len(), groups);
        // Sizes differ by at most one, with earlier groups never smaller.
        let sizes: Vec<usize> = partitioned.iter().map(Vec::len).collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        // Concatenating the groups reproduces the input exactly.
        let flattened: Vec<u32> = partitioned.into_iter().flatten().collect();
        prop_assert_eq!(flattened, jobs);
    }

    #[test]
    fn test_serializer_is_pure_and_ascii(name in "\\PC{1,12}", end in 1i64..1000) {
        let variable = Variable::new(&name);
        let sink = ReportSink::new("Rpt", "/tmp/out.txt");
        let body = ForLoop::new(&variable, 1, 1, end)
            .with_body(vec![Report::new(&sink, vec![variable.name.clone()]).into()]);
        let script = Script::from_parts(
            vec![variable.into(), sink.into()],
            vec![body.into()],
        )
        .unwrap();

        let first = script.serialize();
        prop_assert_eq!(&first, &script.serialize());
        prop_assert!(first.is_ascii());
        prop_assert_eq!(first.matches(SEQUENCE_SENTINEL).count(), 1);
    }
}
