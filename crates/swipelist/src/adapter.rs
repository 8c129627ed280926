//! The data boundary of the swipe engine.
//!
//! The engine never looks at items. It only needs to know how many rows
//! there are, which of them may be swiped, and how to remove rows once a
//! dismiss batch completes. [`SwipeAdapter`] captures exactly that; flat
//! lists and grouped lists implement it differently.

/// Per-item interaction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFlags {
    /// Item can be interacted with.
    pub enabled: bool,
    /// Item is a header or separator rather than a data row.
    pub header: bool,
}

impl RowFlags {
    /// Flags for an ordinary enabled row.
    pub fn new() -> Self {
        Self {
            enabled: true,
            header: false,
        }
    }

    /// Flags for a disabled row.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            header: false,
        }
    }

    /// Flags for a header row.
    pub fn header() -> Self {
        Self {
            enabled: true,
            header: true,
        }
    }

    /// Whether a row with these flags may be swiped.
    pub fn swipeable(self) -> bool {
        self.enabled && !self.header
    }
}

impl Default for RowFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability interface the engine needs from the backing collection.
pub trait SwipeAdapter {
    /// Number of flat list positions.
    fn item_count(&self) -> usize;

    /// Whether the row at `position` may be swiped.
    fn is_position_swipeable(&self, position: usize) -> bool;

    /// Remove rows from the collection.
    ///
    /// `descending` is sorted highest first and free of duplicates, so each
    /// removal leaves the remaining lower positions valid.
    fn remove_positions(&mut self, descending: &[usize]);
}

/// A flat list of items.
#[derive(Debug, Clone, Default)]
pub struct ListAdapter<T> {
    items: Vec<(T, RowFlags)>,
}

impl<T> ListAdapter<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an adapter with every item enabled.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item, RowFlags::new())).collect(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push((item, RowFlags::new()));
    }

    pub fn push_with_flags(&mut self, item: T, flags: RowFlags) {
        self.items.push((item, flags));
    }

    pub fn insert(&mut self, position: usize, item: T) {
        self.items.insert(position, (item, RowFlags::new()));
    }

    pub fn set_flags(&mut self, position: usize, flags: RowFlags) {
        if let Some(entry) = self.items.get_mut(position) {
            entry.1 = flags;
        }
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position).map(|(item, _)| item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(item, _)| item)
    }
}

impl<T> SwipeAdapter for ListAdapter<T> {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_position_swipeable(&self, position: usize) -> bool {
        self.items
            .get(position)
            .is_some_and(|(_, flags)| flags.swipeable())
    }

    fn remove_positions(&mut self, descending: &[usize]) {
        for &position in descending {
            if position < self.items.len() {
                self.items.remove(position);
            }
        }
    }
}

/// A group with its children, as shown by a grouped list.
#[derive(Debug, Clone)]
pub struct Group<G, C> {
    pub value: G,
    pub children: Vec<C>,
    pub expanded: bool,
}

impl<G, C> Group<G, C> {
    pub fn new(value: G, children: Vec<C>) -> Self {
        Self {
            value,
            children,
            expanded: true,
        }
    }
}

/// What a flat position of a grouped list refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupedPosition {
    Group(usize),
    Child(usize, usize),
}

/// A list of groups whose expanded children are flattened into rows.
///
/// The item count covers every group row plus the children of expanded
/// groups, so positions always refer to the visible layout. Collapsing or
/// expanding a group changes the count; call
/// `SwipeListView::notify_data_set_changed` afterwards.
#[derive(Debug, Clone, Default)]
pub struct GroupedAdapter<G, C> {
    groups: Vec<Group<G, C>>,
}

impl<G, C> GroupedAdapter<G, C> {
    pub fn new(groups: Vec<Group<G, C>>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group<G, C>] {
        &self.groups
    }

    pub fn set_expanded(&mut self, group: usize, expanded: bool) {
        if let Some(g) = self.groups.get_mut(group) {
            g.expanded = expanded;
        }
    }

    /// Map a flat position onto the visible group/child layout.
    pub fn resolve(&self, position: usize) -> Option<GroupedPosition> {
        let mut flat = 0;
        for (group_index, group) in self.groups.iter().enumerate() {
            if flat == position {
                return Some(GroupedPosition::Group(group_index));
            }
            flat += 1;
            if group.expanded {
                if position < flat + group.children.len() {
                    return Some(GroupedPosition::Child(group_index, position - flat));
                }
                flat += group.children.len();
            }
        }
        None
    }
}

impl<G, C> SwipeAdapter for GroupedAdapter<G, C> {
    fn item_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| if g.expanded { 1 + g.children.len() } else { 1 })
            .sum()
    }

    fn is_position_swipeable(&self, position: usize) -> bool {
        self.resolve(position).is_some()
    }

    fn remove_positions(&mut self, descending: &[usize]) {
        // Resolve everything against the current layout first.
        let targets: Vec<GroupedPosition> =
            descending.iter().filter_map(|&p| self.resolve(p)).collect();

        for target in targets {
            match target {
                GroupedPosition::Child(group, child) => {
                    if let Some(g) = self.groups.get_mut(group) {
                        if child < g.children.len() {
                            g.children.remove(child);
                        }
                    }
                }
                GroupedPosition::Group(group) => {
                    if group < self.groups.len() {
                        self.groups.remove(group);
                    }
                }
            }
        }
    }
}
