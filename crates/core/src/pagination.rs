//! Availability pagination
//!
//! Slices an ordered availability set into fixed-size pages. The
//! selectable key of every entry is its date label, and pagination never
//! changes what a key means; a tap is resolved against whatever snapshot
//! was live when the page was rendered.

use bookslot_domain::AvailabilityEntry;

/// One rendered page of availability entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePage {
    pub entries: Vec<AvailabilityEntry>,
    pub page: usize,
    pub page_count: usize,
}

impl DatePage {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

/// Slice `entries` into the requested page.
///
/// `page_count` is `ceil(len / page_size)`. Out-of-range pages yield an
/// empty entry list rather than an error; the front end is expected not
/// to request them.
pub fn paginate(entries: &[AvailabilityEntry], page_size: usize, page: usize) -> DatePage {
    let page_size = page_size.max(1);
    let page_count = entries.len().div_ceil(page_size);
    let start = page.saturating_mul(page_size);
    let slice = if start < entries.len() {
        &entries[start..(start + page_size).min(entries.len())]
    } else {
        &[]
    };
    DatePage { entries: slice.to_vec(), page, page_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<AvailabilityEntry> {
        (0..n)
            .map(|i| AvailabilityEntry {
                date_label: format!("{:02}.06", i + 1),
                free_count: 1,
                row_index: i as u32 + 2,
            })
            .collect()
    }

    #[test]
    fn page_count_is_ceiling_division() {
        let all = entries(13);
        assert_eq!(paginate(&all, 6, 0).page_count, 3);
        assert_eq!(paginate(&entries(12), 6, 0).page_count, 2);
        assert_eq!(paginate(&entries(0), 6, 0).page_count, 0);
    }

    #[test]
    fn concatenating_pages_reproduces_the_original_order() {
        let all = entries(13);
        let mut rebuilt = Vec::new();
        for page in 0..3 {
            let p = paginate(&all, 6, page);
            assert!(p.entries.len() <= 6);
            rebuilt.extend(p.entries);
        }
        assert_eq!(rebuilt, all);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let all = entries(5);
        let p = paginate(&all, 6, 7);
        assert!(p.entries.is_empty());
        assert_eq!(p.page_count, 1);
    }

    #[test]
    fn navigation_flags() {
        let all = entries(13);
        let first = paginate(&all, 6, 0);
        assert!(!first.has_previous());
        assert!(first.has_next());
        let last = paginate(&all, 6, 2);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}
