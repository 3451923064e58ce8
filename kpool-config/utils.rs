use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Serializes `map` with keys in ascending order, so the saved file does not change between runs.
pub fn sorted_map<K, V, S>(map: &HashMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Ord + Serialize,
    V: Serialize,
    S: Serializer,
{
    serializer.collect_map(map.iter().collect::<BTreeMap<_, _>>())
}
