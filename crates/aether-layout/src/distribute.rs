//! Distribution of a container's extent among its children.
//!
//! Works on resolved pixel amounts only; the engine resolves units against
//! the container's content box before calling in here.

/// One child as seen along the container's on-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisItem {
    /// Pixels the child needs at least
    pub minimum: i64,
    /// Pixels the child would like
    pub desired: i64,
    /// Hard cap, `None` if unbounded
    pub maximum: Option<i64>,
    /// Leading plus trailing margin
    pub margin: i64,
    /// Share of leftover space, 0 if the child does not fill
    pub fill_weight: u32,
}

impl AxisItem {
    /// Desired size clamped into `[minimum, maximum]`.
    fn target(&self) -> i64 {
        let desired = self.desired.max(self.minimum);
        match self.maximum {
            Some(maximum) => desired.min(maximum.max(self.minimum)),
            None => desired,
        }
    }

    /// Room left before the maximum, `None` if unbounded.
    fn headroom(&self, extent: i64) -> Option<i64> {
        self.maximum.map(|maximum| (maximum - extent).max(0))
    }
}

/// Result of distributing an on-axis extent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisDistribution {
    /// Extent given to each child, margins excluded
    pub extents: Vec<i64>,
    /// Pixels by which the minimums exceed the available extent
    pub deficit: i64,
    /// Pixels nobody claimed
    pub unused: i64,
}

/// Split `available` pixels among `items`.
///
/// Every item first receives its minimum. If that already exceeds the
/// available extent the shortfall is reported as `deficit`. Otherwise slack
/// goes to items below their desired size, smallest shortfall first, and
/// then to fill items in proportion to their weight. Rounding remainders go
/// one pixel at a time to the earliest eligible items.
pub fn distribute_on_axis(available: i64, items: &[AxisItem]) -> AxisDistribution {
    let mut extents: Vec<i64> = items.iter().map(|item| item.minimum).collect();
    let required: i64 = items.iter().map(|item| item.minimum + item.margin).sum();

    if required > available {
        return AxisDistribution {
            extents,
            deficit: required - available,
            unused: 0,
        };
    }

    let mut slack = available - required;
    slack = grow_to_desired(items, &mut extents, slack);
    slack = grow_fill(items, &mut extents, slack);

    AxisDistribution {
        extents,
        deficit: 0,
        unused: slack,
    }
}

fn grow_to_desired(items: &[AxisItem], extents: &mut [i64], mut slack: i64) -> i64 {
    loop {
        let pending: Vec<usize> = (0..items.len())
            .filter(|&i| extents[i] < items[i].target())
            .collect();
        if pending.is_empty() || slack <= 0 {
            return slack;
        }

        let count = pending.len() as i64;
        let step = pending
            .iter()
            .map(|&i| items[i].target() - extents[i])
            .min()
            .unwrap_or(0);

        if step * count <= slack {
            for &i in &pending {
                extents[i] += step;
            }
            slack -= step * count;
        } else {
            let share = slack / count;
            let mut remainder = slack % count;
            for &i in &pending {
                extents[i] += share;
                if remainder > 0 {
                    extents[i] += 1;
                    remainder -= 1;
                }
            }
            return 0;
        }
    }
}

fn grow_fill(items: &[AxisItem], extents: &mut [i64], mut slack: i64) -> i64 {
    loop {
        let active: Vec<usize> = (0..items.len())
            .filter(|&i| items[i].fill_weight > 0)
            .filter(|&i| items[i].headroom(extents[i]) != Some(0))
            .collect();
        if active.is_empty() || slack <= 0 {
            return slack;
        }

        let total_weight: i128 = active.iter().map(|&i| items[i].fill_weight as i128).sum();
        let grant = |i: usize, pool: i64| -> i64 {
            (pool as i128 * items[i].fill_weight as i128 / total_weight) as i64
        };

        // Items whose share would pass their maximum take what fits and drop out.
        let pool = slack;
        let mut capped = false;
        for &i in &active {
            if let Some(headroom) = items[i].headroom(extents[i]) {
                if grant(i, pool) >= headroom {
                    extents[i] += headroom;
                    slack -= headroom;
                    capped = true;
                }
            }
        }
        if capped {
            continue;
        }

        for &i in &active {
            let share = grant(i, pool);
            extents[i] += share;
            slack -= share;
        }
        for &i in &active {
            if slack == 0 {
                break;
            }
            extents[i] += 1;
            slack -= 1;
        }
        return slack;
    }
}

/// Extent of a child along the container's off-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffAxisFit {
    pub extent: i64,
    /// Pixels by which the child's minimum does not fit
    pub deficit: i64,
}

/// Stretch a child across the off-axis, capped by its maximum and never
/// below its minimum.
pub fn fit_off_axis(available: i64, minimum: i64, maximum: Option<i64>, margin: i64) -> OffAxisFit {
    let room = (available - margin).max(0);
    let stretched = match maximum {
        Some(maximum) => room.min(maximum),
        None => room,
    };
    if stretched < minimum {
        OffAxisFit {
            extent: minimum,
            deficit: minimum - room.min(minimum),
        }
    } else {
        OffAxisFit {
            extent: stretched,
            deficit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(minimum: i64, desired: i64) -> AxisItem {
        AxisItem {
            minimum,
            desired,
            ..Default::default()
        }
    }

    fn fill(minimum: i64, weight: u32) -> AxisItem {
        AxisItem {
            minimum,
            desired: minimum,
            fill_weight: weight,
            ..Default::default()
        }
    }

    #[test]
    fn test_minimums_fit_exactly() {
        let result = distribute_on_axis(300, &[item(100, 100), item(200, 200)]);
        assert_eq!(result.extents, vec![100, 200]);
        assert_eq!(result.deficit, 0);
        assert_eq!(result.unused, 0);
    }

    #[test]
    fn test_overflow_reports_deficit() {
        let items = [item(100, 100), item(150, 150), item(80, 80)];
        let result = distribute_on_axis(200, &items);
        assert_eq!(result.deficit, 330 - 200);
        assert_eq!(result.extents, vec![100, 150, 80]);
    }

    #[test]
    fn test_overflow_counts_margins() {
        let items = [AxisItem { minimum: 50, desired: 50, margin: 20, ..Default::default() }];
        assert_eq!(distribute_on_axis(60, &items).deficit, 10);
    }

    #[test]
    fn test_smallest_deficit_first() {
        // Deficits: 10 and 100. Both get 10, then the rest goes to the second.
        let items = [item(0, 10), item(0, 100)];
        let result = distribute_on_axis(50, &items);
        assert_eq!(result.extents, vec![10, 40]);
        assert_eq!(result.unused, 0);
    }

    #[test]
    fn test_partial_round_remainder_goes_to_earliest() {
        let items = [item(0, 100), item(0, 100), item(0, 100)];
        let result = distribute_on_axis(62, &items);
        assert_eq!(result.extents, vec![21, 21, 20]);
    }

    #[test]
    fn test_desired_reached_leaves_unused() {
        let items = [item(10, 20), item(10, 30)];
        let result = distribute_on_axis(100, &items);
        assert_eq!(result.extents, vec![20, 30]);
        assert_eq!(result.unused, 50);
    }

    #[test]
    fn test_fill_splits_evenly() {
        let result = distribute_on_axis(301, &[fill(50, 1), fill(50, 1)]);
        assert_eq!(result.extents, vec![151, 150]);
        assert_eq!(result.unused, 0);
    }

    #[test]
    fn test_fill_respects_weight_and_desired_first() {
        let items = [item(0, 40), fill(0, 1), fill(0, 3)];
        let result = distribute_on_axis(200, &items);
        assert_eq!(result.extents, vec![40, 40, 120]);
    }

    #[test]
    fn test_fill_respects_maximum() {
        let capped = AxisItem { maximum: Some(30), ..fill(0, 1) };
        let result = distribute_on_axis(200, &[capped, fill(0, 1)]);
        assert_eq!(result.extents, vec![30, 170]);
        assert_eq!(result.unused, 0);

        let both_capped = [AxisItem { maximum: Some(30), ..fill(0, 1) }; 2];
        let result = distribute_on_axis(200, &both_capped);
        assert_eq!(result.extents, vec![30, 30]);
        assert_eq!(result.unused, 140);
    }

    #[test]
    fn test_fit_off_axis() {
        assert_eq!(fit_off_axis(100, 0, None, 10), OffAxisFit { extent: 90, deficit: 0 });
        assert_eq!(fit_off_axis(100, 0, Some(40), 0), OffAxisFit { extent: 40, deficit: 0 });
        assert_eq!(fit_off_axis(100, 120, None, 0), OffAxisFit { extent: 120, deficit: 20 });
        assert_eq!(fit_off_axis(10, 5, None, 20), OffAxisFit { extent: 5, deficit: 5 });
    }
}
