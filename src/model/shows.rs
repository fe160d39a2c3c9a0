//! Shows browser state: tiles, filter facets, selection bookkeeping

/// One tile in the shows browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowTile {
    pub title: &'static str,
    pub channel: &'static str,
    pub keywords: &'static [&'static str],
}

/// A second-level facet under a filter.
#[derive(Clone, Debug)]
pub struct SubFilter {
    pub title: &'static str,
    pub keyword: &'static str,
    pub is_selected: bool,
}

/// A first-level facet; selecting it exposes its sub-filters.
#[derive(Clone, Debug)]
pub struct Filter {
    pub title: &'static str,
    pub sub_filters: Vec<SubFilter>,
    pub is_selected: bool,
}

/// The filter header of the shows browser: one row of filters, one row of
/// the selected filter's sub-filters.
#[derive(Clone, Debug)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    /// Make `index` the selected filter; selection is exclusive.
    pub fn select_filter(&mut self, index: usize) {
        if index >= self.filters.len() {
            return;
        }
        for (i, filter) in self.filters.iter_mut().enumerate() {
            filter.is_selected = i == index;
        }
    }

    /// Make `sub_index` the selected sub-filter of the selected filter;
    /// selection is exclusive within that filter.
    pub fn select_sub_filter(&mut self, sub_index: usize) {
        let Some(filter) = self.filters.iter_mut().find(|f| f.is_selected) else {
            return;
        };
        if sub_index >= filter.sub_filters.len() {
            return;
        }
        for (i, sub) in filter.sub_filters.iter_mut().enumerate() {
            sub.is_selected = i == sub_index;
        }
    }

    pub fn selected_filter(&self) -> Option<&Filter> {
        self.filters.iter().find(|f| f.is_selected)
    }

    pub fn selected_keyword(&self) -> Option<&'static str> {
        self.selected_filter()?
            .sub_filters
            .iter()
            .find(|s| s.is_selected)
            .map(|s| s.keyword)
    }
}

/// Which row of the shows browser holds the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShowsFocus {
    #[default]
    Filters,
    SubFilters,
    Tiles,
}

#[derive(Clone, Debug)]
pub struct ShowsState {
    pub group: FilterGroup,
    pub tiles: Vec<ShowTile>,
    pub focus: ShowsFocus,
    pub filter_cursor: usize,
    pub sub_cursor: usize,
    pub tile_cursor: usize,
}

const CATALOGUE: [ShowTile; 8] = [
    ShowTile { title: "Boxset", channel: "FOX8", keywords: &["season1", "bonus"] },
    ShowTile { title: "Colour Of Footy", channel: "FOX League", keywords: &["season1"] },
    ShowTile { title: "Fletch & Hindy", channel: "FOX League", keywords: &["season1", "season2"] },
    ShowTile { title: "Inside Football", channel: "FOX Footy", keywords: &["season2"] },
    ShowTile { title: "Netball Weekly", channel: "FOX Netball", keywords: &["season1", "deleted"] },
    ShowTile { title: "The First Qtr", channel: "FOX Footy", keywords: &["season2", "bonus"] },
    ShowTile { title: "Yokayi Footy", channel: "NITV", keywords: &["season1"] },
    ShowTile { title: "MVP", channel: "ESPN", keywords: &["season2", "deleted"] },
];

impl ShowsState {
    pub fn new() -> Self {
        let group = FilterGroup {
            filters: vec![
                Filter {
                    title: "Seasons",
                    sub_filters: vec![
                        SubFilter { title: "Season 1", keyword: "season1", is_selected: true },
                        SubFilter { title: "Season 2", keyword: "season2", is_selected: false },
                    ],
                    is_selected: true,
                },
                Filter {
                    title: "Extras",
                    sub_filters: vec![
                        SubFilter { title: "Bonus", keyword: "bonus", is_selected: true },
                        SubFilter { title: "Deleted Scenes", keyword: "deleted", is_selected: false },
                    ],
                    is_selected: false,
                },
            ],
        };
        Self {
            group,
            tiles: CATALOGUE.to_vec(),
            focus: ShowsFocus::Filters,
            filter_cursor: 0,
            sub_cursor: 0,
            tile_cursor: 0,
        }
    }

    /// Tiles matching the selected sub-filter keyword, or all of them when
    /// nothing is selected.
    pub fn visible_tiles(&self) -> Vec<ShowTile> {
        match self.group.selected_keyword() {
            Some(keyword) => self
                .tiles
                .iter()
                .filter(|t| t.keywords.contains(&keyword))
                .copied()
                .collect(),
            None => self.tiles.clone(),
        }
    }

    fn row_len(&self) -> usize {
        match self.focus {
            ShowsFocus::Filters => self.group.filters.len(),
            ShowsFocus::SubFilters => self
                .group
                .selected_filter()
                .map(|f| f.sub_filters.len())
                .unwrap_or(0),
            ShowsFocus::Tiles => self.visible_tiles().len(),
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.row_len();
        if len == 0 {
            return;
        }
        let cursor = match self.focus {
            ShowsFocus::Filters => &mut self.filter_cursor,
            ShowsFocus::SubFilters => &mut self.sub_cursor,
            ShowsFocus::Tiles => &mut self.tile_cursor,
        };
        let max = len as i32 - 1;
        *cursor = (*cursor as i32 + delta).clamp(0, max) as usize;
    }

    pub fn focus_next_row(&mut self) {
        self.focus = match self.focus {
            ShowsFocus::Filters => ShowsFocus::SubFilters,
            ShowsFocus::SubFilters => ShowsFocus::Tiles,
            ShowsFocus::Tiles => ShowsFocus::Tiles,
        };
        self.clamp_cursors();
    }

    pub fn focus_prev_row(&mut self) {
        self.focus = match self.focus {
            ShowsFocus::Filters => ShowsFocus::Filters,
            ShowsFocus::SubFilters => ShowsFocus::Filters,
            ShowsFocus::Tiles => ShowsFocus::SubFilters,
        };
        self.clamp_cursors();
    }

    /// Apply the item under the cursor: select a filter (exposing its
    /// sub-filter row) or a sub-filter (narrowing the tile row).
    pub fn select_under_cursor(&mut self) {
        match self.focus {
            ShowsFocus::Filters => {
                self.group.select_filter(self.filter_cursor);
                self.sub_cursor = 0;
            }
            ShowsFocus::SubFilters => {
                self.group.select_sub_filter(self.sub_cursor);
                self.tile_cursor = 0;
            }
            ShowsFocus::Tiles => {}
        }
        self.clamp_cursors();
    }

    /// Title of the tile under the cursor, if the tile row has focus.
    pub fn tile_under_cursor(&self) -> Option<ShowTile> {
        self.visible_tiles().get(self.tile_cursor).copied()
    }

    fn clamp_cursors(&mut self) {
        let subs = self
            .group
            .selected_filter()
            .map(|f| f.sub_filters.len())
            .unwrap_or(0);
        self.sub_cursor = self.sub_cursor.min(subs.saturating_sub(1));
        let tiles = self.visible_tiles().len();
        self.tile_cursor = self.tile_cursor.min(tiles.saturating_sub(1));
    }
}

impl Default for ShowsState {
    fn default() -> Self {
        Self::new()
    }
}
