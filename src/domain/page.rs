/// One non-empty page of a paginated resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    number: u32,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Returns `None` for an empty item list: an empty page is never a `Page`.
    pub fn new(number: u32, items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { number, items })
        }
    }

    /// A batch holding a single item, shaped like a catalog listing page.
    pub fn single(number: u32, item: T) -> Self {
        Self {
            number,
            items: vec![item],
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Outcome of fetching one page number.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResult<T> {
    Page(Page<T>),
    /// The resource has no items at this page number or beyond.
    Exhausted,
}

impl<T> PageResult<T> {
    pub fn from_items(number: u32, items: Vec<T>) -> Self {
        match Page::new(number, items) {
            Some(page) => PageResult::Page(page),
            None => PageResult::Exhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_are_exhausted() {
        assert_eq!(PageResult::<u8>::from_items(3, vec![]), PageResult::Exhausted);
        assert!(Page::<u8>::new(1, vec![]).is_none());
    }

    #[test]
    fn test_page_keeps_order_and_number() {
        let page = Page::new(2, vec!["a", "b", "c"]).unwrap();
        assert_eq!(page.number(), 2);
        assert_eq!(page.len(), 3);
        assert_eq!(page.into_items(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_batch() {
        let page = Page::single(5, "only");
        assert_eq!(page.items(), &["only"]);
        assert!(!page.is_empty());
    }
}
