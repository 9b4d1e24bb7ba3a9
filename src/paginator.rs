/// Slices a list into fixed-size pages. Pages are 1-based; page numbers out
/// of range are an error the caller maps to a sane default.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: u32) -> Self {
        // A zero page size would divide by zero below
        let page_size = page_size.max(1);
        let page_count = if items.is_empty() {
            0
        } else {
            (items.len() as u32 - 1) / page_size + 1
        };

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        Ok(&self.items[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let items = vec![1, 2, 3, 4, 5, 6, 7];
        let paginator = Paginator::new(&items, 3);
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.page(1).unwrap(), &[1, 2, 3]);
        assert_eq!(paginator.page(2).unwrap(), &[4, 5, 6]);
        assert_eq!(paginator.page(3).unwrap(), &[7]);

        assert!(paginator.page(0).is_err());
        assert!(paginator.page(4).is_err());
    }

    #[test]
    fn test_exact_multiple() {
        let items = vec![1, 2, 3, 4];
        let paginator = Paginator::new(&items, 2);
        assert_eq!(paginator.page_count(), 2);
        assert_eq!(paginator.page(2).unwrap(), &[3, 4]);
    }

    #[test]
    fn test_zero_page_size_paginates_one_by_one() {
        let items = vec![1, 2, 3];
        let paginator = Paginator::new(&items, 0);
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.page(2).unwrap(), &[2]);
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::new(&items, 3);
        assert_eq!(paginator.page_count(), 0);
        assert!(paginator.page(1).is_err());
    }
}
