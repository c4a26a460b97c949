// Shared proptest configuration for integration tests.
//
// Env knobs:
// - PROPTEST_CASES: cases per property (default 32).
// - PROPTEST_MAX_SHRINK_MS: optional cap for shrinking time in milliseconds.
//
// Generators build valid inputs directly; avoid prop_assume!.

use proptest::prelude::ProptestConfig;

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|s| s.parse::<u32>().ok())
}

pub fn proptest_prelude_config() -> ProptestConfig {
    let base = ProptestConfig::default();
    let cases = env_u32("PROPTEST_CASES").unwrap_or(32).max(1);
    let max_shrink_time = env_u32("PROPTEST_MAX_SHRINK_MS").unwrap_or(base.max_shrink_time);

    ProptestConfig {
        // No regression files from integration tests
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
