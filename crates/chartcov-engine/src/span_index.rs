use std::collections::BTreeMap;

/// Interval index over one integer axis.
///
/// Stores closed intervals `[low, high]` keyed by their low end. A query for
/// `[q_low, q_high]` walks every bucket with `low <= q_high` and keeps the
/// intervals whose `high >= q_low`. Used by the in-memory catalog to find
/// datasets whose latitude span overlaps a query envelope; longitude is then
/// checked per candidate.
#[derive(Debug, Clone)]
pub struct SpanIndex<T> {
    map: BTreeMap<i32, Vec<SpanNode<T>>>,
    size: usize,
}

#[derive(Debug, Clone)]
struct SpanNode<T> {
    high: i32,
    values: Vec<T>,
}

impl<T> Default for SpanIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpanIndex<T> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            size: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn insert(&mut self, low: i32, high: i32, value: T) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let nodes = self.map.entry(low).or_default();
        match nodes.iter_mut().find(|n| n.high == high) {
            Some(node) => node.values.push(value),
            None => nodes.push(SpanNode {
                high,
                values: vec![value],
            }),
        }
        self.size += 1;
    }

    /// Values whose interval overlaps `[q_low, q_high]`, in ascending order of
    /// interval low end. Produced lazily.
    pub fn query(&self, q_low: i32, q_high: i32) -> impl Iterator<Item = &T> + '_ {
        self.map
            .range(..=q_high)
            .flat_map(|(_, nodes)| nodes.iter())
            .filter(move |node| node.high >= q_low)
            .flat_map(|node| node.values.iter())
    }

    pub fn remove(&mut self, low: i32, high: i32, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(nodes) = self.map.get_mut(&low) else {
            return false;
        };
        let Some(node) = nodes.iter_mut().find(|n| n.high == high) else {
            return false;
        };
        let Some(pos) = node.values.iter().position(|v| v == value) else {
            return false;
        };
        node.values.remove(pos);
        nodes.retain(|n| !n.values.is_empty());
        if nodes.is_empty() {
            self.map.remove(&low);
        }
        self.size -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.size = 0;
    }
}
