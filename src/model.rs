//! Viewer model: the selected images grouped by filename across folders,
//! plus the render configuration (view mode, grid layout, navigation cursor).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use yew::Reducible;

/// One selected image file. `url` is an object URL minted by the folder
/// picker glue; the model itself never touches the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub folder: String,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// One filename at a time with prev/next navigation.
    Single,
    /// Every matched filename stacked vertically.
    All,
}

impl ViewMode {
    pub fn as_key(self) -> &'static str {
        match self {
            ViewMode::Single => "single",
            ViewMode::All => "all",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "all" => ViewMode::All,
            _ => ViewMode::Single,
        }
    }
}

/// Columns of the per-filename comparison grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridLayout {
    Two,
    Three,
    Four,
}

impl GridLayout {
    pub fn columns(self) -> u32 {
        match self {
            GridLayout::Two => 2,
            GridLayout::Three => 3,
            GridLayout::Four => 4,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            GridLayout::Two => "2",
            GridLayout::Three => "3",
            GridLayout::Four => "4",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "2" => GridLayout::Two,
            "3" => GridLayout::Three,
            _ => GridLayout::Four,
        }
    }
}

/// UI preferences persisted to localStorage. Zoom state is deliberately not
/// part of this; it dies with the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerPrefs {
    pub view_mode: ViewMode,
    pub grid_layout: GridLayout,
    pub dark: bool,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Single,
            grid_layout: GridLayout::Four,
            dark: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    /// filename -> its entry in each folder that has one.
    pub groups: HashMap<String, Vec<ImageEntry>>,
    /// Sorted filenames that matched across the selection.
    pub filenames: Vec<String>,
    /// Sorted distinct folder names.
    pub folders: Vec<String>,
    /// Cursor into `filenames` for single view.
    pub current_index: usize,
    pub view_mode: ViewMode,
    pub grid_layout: GridLayout,
    /// Bumped on every selection change; used as an effect dependency.
    pub version: u64,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            filenames: Vec::new(),
            folders: Vec::new(),
            current_index: 0,
            view_mode: ViewMode::Single,
            grid_layout: GridLayout::Four,
            version: 0,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.filenames.is_empty()
    }

    pub fn current_filename(&self) -> Option<&str> {
        self.filenames.get(self.current_index).map(String::as_str)
    }

    pub fn entry_for(&self, filename: &str, folder: &str) -> Option<&ImageEntry> {
        self.groups
            .get(filename)
            .and_then(|entries| entries.iter().find(|e| e.folder == folder))
    }

    pub fn match_count(&self, filename: &str) -> usize {
        self.groups.get(filename).map_or(0, Vec::len)
    }

    pub fn stats_line(&self) -> String {
        format!(
            "{} matching filenames found across {} folders",
            self.filenames.len(),
            self.folders.len()
        )
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub enum ViewerAction {
    /// Replace the whole selection. Entries arrive pre-filtered to images.
    LoadEntries { entries: Vec<ImageEntry> },
    SetViewMode(ViewMode),
    SetGridLayout(GridLayout),
    NavigatePrev,
    NavigateNext,
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewerAction::*;
        let mut new = (*self).clone();
        match action {
            LoadEntries { entries } => {
                new.groups.clear();
                new.folders.clear();
                for entry in entries {
                    if !new.folders.contains(&entry.folder) {
                        new.folders.push(entry.folder.clone());
                    }
                    new.groups.entry(entry.name.clone()).or_default().push(entry);
                }
                new.filenames = new.groups.keys().cloned().collect();
                new.filenames.sort();
                new.folders.sort();
                new.current_index = 0;
                new.version = new.version.wrapping_add(1);
            }
            SetViewMode(mode) => {
                new.view_mode = mode;
            }
            SetGridLayout(layout) => {
                new.grid_layout = layout;
            }
            NavigatePrev => {
                if !new.filenames.is_empty() {
                    new.current_index =
                        (new.current_index + new.filenames.len() - 1) % new.filenames.len();
                }
            }
            NavigateNext => {
                if !new.filenames.is_empty() {
                    new.current_index = (new.current_index + 1) % new.filenames.len();
                }
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(folder: &str, name: &str) -> ImageEntry {
        ImageEntry {
            name: name.to_string(),
            folder: folder.to_string(),
            url: format!("blob:{folder}/{name}"),
        }
    }

    fn loaded() -> Rc<ViewerState> {
        Rc::new(ViewerState::new()).reduce(ViewerAction::LoadEntries {
            entries: vec![
                entry("set-b", "b.png"),
                entry("set-a", "a.png"),
                entry("set-b", "a.png"),
                entry("set-a", "c.png"),
            ],
        })
    }

    #[test]
    fn load_groups_by_filename_and_sorts() {
        let s = loaded();
        assert_eq!(s.filenames, vec!["a.png", "b.png", "c.png"]);
        assert_eq!(s.folders, vec!["set-a", "set-b"]);
        assert_eq!(s.match_count("a.png"), 2);
        assert_eq!(s.match_count("b.png"), 1);
        assert!(s.entry_for("a.png", "set-b").is_some());
        assert!(s.entry_for("b.png", "set-a").is_none());
        assert_eq!(s.current_index, 0);
        assert_eq!(s.version, 1);
    }

    #[test]
    fn stats_line_counts_names_and_folders() {
        let s = loaded();
        assert_eq!(s.stats_line(), "3 matching filenames found across 2 folders");
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let s = loaded();
        let s = s.reduce(ViewerAction::NavigatePrev);
        assert_eq!(s.current_index, 2);
        let s = s.reduce(ViewerAction::NavigateNext);
        assert_eq!(s.current_index, 0);
        let s = s.reduce(ViewerAction::NavigateNext);
        assert_eq!(s.current_index, 1);
        assert_eq!(s.current_filename(), Some("b.png"));
    }

    #[test]
    fn navigation_on_empty_selection_is_a_noop() {
        let s = Rc::new(ViewerState::new());
        let s = s.reduce(ViewerAction::NavigateNext);
        assert_eq!(s.current_index, 0);
        assert!(!s.has_results());
        assert_eq!(s.current_filename(), None);
    }

    #[test]
    fn reload_replaces_selection_and_resets_cursor() {
        let s = loaded();
        let s = s.reduce(ViewerAction::NavigateNext);
        let s = s.reduce(ViewerAction::LoadEntries {
            entries: vec![entry("other", "z.png")],
        });
        assert_eq!(s.filenames, vec!["z.png"]);
        assert_eq!(s.folders, vec!["other"]);
        assert_eq!(s.current_index, 0);
        assert_eq!(s.version, 2);
    }

    #[test]
    fn prefs_round_trip_through_json() {
        let prefs = ViewerPrefs {
            view_mode: ViewMode::All,
            grid_layout: GridLayout::Two,
            dark: false,
        };
        let raw = serde_json::to_string(&prefs).unwrap();
        assert_eq!(serde_json::from_str::<ViewerPrefs>(&raw).unwrap(), prefs);
    }

    #[test]
    fn keys_round_trip() {
        for mode in [ViewMode::Single, ViewMode::All] {
            assert_eq!(ViewMode::from_key(mode.as_key()), mode);
        }
        for layout in [GridLayout::Two, GridLayout::Three, GridLayout::Four] {
            assert_eq!(GridLayout::from_key(layout.as_key()), layout);
            assert!(layout.columns() >= 2);
        }
    }
}
