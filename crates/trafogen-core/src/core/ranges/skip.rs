use std::collections::HashSet;

/// Resolution at which numeric skip values are quantized for hashing.
///
/// 1e-3 is coarse enough to survive step-arithmetic round-off and fine enough
/// for catalog values quoted to three decimals.
const QUANTUM: f64 = 1000.0;

/// Identifies one dimension value inside a generated combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkipKey {
    dimension: String,
    value: SkipValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum SkipValue {
    Number(i64),
    Label(String),
}

impl SkipKey {
    pub fn numeric(dimension: impl Into<String>, value: f64) -> Self {
        Self {
            dimension: dimension.into(),
            value: SkipValue::Number((value * QUANTUM).round() as i64),
        }
    }

    pub fn label(dimension: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
            value: SkipValue::Label(label.into()),
        }
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }
}

/// An advisory filter suppressing specific value-pair combinations.
///
/// The table holds unordered (key, key) pairs. It is consulted before a
/// generated combination is accepted and has no effect on iteration
/// mechanics: suppressed tuples are still visited, they just emit nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkipTable {
    pairs: HashSet<(SkipKey, SkipKey)>,
}

impl SkipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a suppressed pair. Order of the two keys is irrelevant.
    pub fn insert(&mut self, a: SkipKey, b: SkipKey) {
        self.pairs.insert(Self::ordered(a, b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True when any pair of keys in the combination is registered.
    pub fn suppresses(&self, keys: &[SkipKey]) -> bool {
        if self.pairs.is_empty() {
            return false;
        }
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                if self
                    .pairs
                    .contains(&Self::ordered(a.clone(), b.clone()))
                {
                    return true;
                }
            }
        }
        false
    }

    fn ordered(a: SkipKey, b: SkipKey) -> (SkipKey, SkipKey) {
        if a <= b { (a, b) } else { (b, a) }
    }
}
