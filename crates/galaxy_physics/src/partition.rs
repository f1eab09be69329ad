use std::ops::Range;

/// Split `[0, len)` into `workers` contiguous, non-overlapping ranges.
///
/// The worker count is clamped to `[1, len]` and the last range absorbs the
/// remainder of the integer division, so every index lands in exactly one range.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, len);
    let base = len / workers;

    (0..workers)
        .map(|w| {
            let start = w * base;
            let end = if w + 1 == workers { len } else { start + base };
            start..end
        })
        .collect()
}

/// Fork one task per partition of `items` and join them all before returning.
///
/// Each task gets its index range and exclusive access to the matching
/// sub-slice, so a task can only write the items it owns.
pub fn for_each_partition<T, F>(items: &mut [T], workers: usize, task: F)
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync,
{
    let ranges = partition(items.len(), workers);
    if ranges.len() <= 1 {
        if let Some(range) = ranges.into_iter().next() {
            task(range, items);
        }
        return;
    }

    let mut chunks = Vec::with_capacity(ranges.len());
    let mut rest = items;
    for range in &ranges {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        chunks.push(head);
        rest = tail;
    }

    let task = &task;
    rayon::scope(|s| {
        for (range, chunk) in ranges.into_iter().zip(chunks) {
            s.spawn(move |_| task(range, chunk));
        }
    });
}
