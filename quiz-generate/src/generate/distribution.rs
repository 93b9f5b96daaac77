use rand::Rng;

use super::helper;

/// Picks `count` items spread evenly over the subtype buckets of `pool`.
///
/// Every bucket gets `count / buckets` items, the remainder goes to the first
/// buckets in order of first appearance. Buckets that run short are topped up
/// from the leftovers of the others, and the result is shuffled.
pub fn stratify<R, T>(rng: &mut R, pool: Vec<(&'static str, T)>, count: usize) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let mut buckets: Vec<(&'static str, Vec<T>)> = Vec::new();
    for (subtype, item) in pool {
        match buckets.iter_mut().find(|(tag, _)| *tag == subtype) {
            Some((_, items)) => items.push(item),
            None => buckets.push((subtype, vec![item])),
        }
    }
    if buckets.is_empty() || count == 0 {
        return Vec::new();
    }

    let per_bucket = count / buckets.len();
    let remainder = count % buckets.len();

    let mut selected = Vec::with_capacity(count);
    let mut leftovers = Vec::new();
    for (i, (subtype, mut items)) in buckets.into_iter().enumerate() {
        helper::shuffle(rng, &mut items);
        let quota = per_bucket + usize::from(i < remainder);
        if items.len() < quota {
            tracing::debug!(subtype, available = items.len(), quota, "subtype pool is short");
        }
        let rest = items.split_off(quota.min(items.len()));
        selected.extend(items);
        leftovers.extend(rest);
    }

    if selected.len() < count {
        helper::shuffle(rng, &mut leftovers);
        let missing = count - selected.len();
        selected.extend(leftovers.into_iter().take(missing));
    }

    helper::shuffle(rng, &mut selected);
    selected
}
