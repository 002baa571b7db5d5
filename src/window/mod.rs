/// Rows per page. The directory is only ever asked for one of these counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Thirty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Thirty,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn parse(value: u32) -> Option<Self> {
        match value {
            10 => Some(Self::Ten),
            20 => Some(Self::Twenty),
            30 => Some(Self::Thirty),
            50 => Some(Self::Fifty),
            100 => Some(Self::Hundred),
            _ => None,
        }
    }

    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Thirty => 30,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

/// Visible range into the view, 1-indexed and inclusive on both ends.
///
/// An empty view is represented as `start == 1, end == 0`, so
/// [`DisplayWindow::len`] is zero and neither direction can move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: usize,
    pub end: usize,
}

impl DisplayWindow {
    /// First page of a view holding `total` records.
    pub fn first(page_size: PageSize, total: usize) -> Self {
        Self {
            start: 1,
            end: page_size.get().min(total),
        }
    }

    pub fn len(self) -> usize {
        if self.end >= self.start {
            self.end - self.start + 1
        } else {
            0
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Moves to the page after `end`. Unchanged on the last page.
    pub fn advance(self, page_size: PageSize, total: usize) -> Self {
        let start = self.end + 1;
        if start > total {
            return self;
        }
        Self {
            start,
            end: (start + page_size.get() - 1).min(total),
        }
    }

    /// Moves to the page before `start`. Unchanged on the first page.
    pub fn retreat(self, page_size: PageSize, total: usize) -> Self {
        let end = self.start.saturating_sub(1).min(total);
        if end < 1 {
            return self;
        }
        Self {
            start: end.saturating_sub(page_size.get() - 1).max(1),
            end,
        }
    }

    pub fn can_advance(self, total: usize) -> bool {
        self.end < total
    }

    pub fn can_retreat(self) -> bool {
        self.start > 1
    }

    /// 1-based page number containing `start`.
    pub fn page_number(self, page_size: PageSize) -> usize {
        let size = page_size.get();
        (self.start.max(1) + size - 1) / size
    }

    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let lo = self.start.saturating_sub(1).min(items.len());
        let hi = self.end.min(items.len());
        if lo >= hi {
            &[]
        } else {
            &items[lo..hi]
        }
    }
}
