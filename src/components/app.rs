use web_sys::{HtmlInputElement, Url};
use yew::prelude::*;

use super::{
    compare_view::CompareView, empty_state::EmptyState, nav_controls::NavControls,
    toolbar::Toolbar,
};
use crate::model::{
    GridLayout, ImageEntry, ViewMode, ViewerAction, ViewerPrefs, ViewerState,
};
use crate::util::{clog, folder_of, FileExt};

const PREFS_KEY: &str = "ic_prefs";

fn load_prefs() -> ViewerPrefs {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(PREFS_KEY) {
                if let Ok(prefs) = serde_json::from_str(&raw) {
                    return prefs;
                }
            }
        }
    }
    ViewerPrefs::default()
}

fn save_prefs(prefs: &ViewerPrefs) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(raw) = serde_json::to_string(prefs) {
                let _ = store.set_item(PREFS_KEY, &raw);
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let viewer = use_reducer(ViewerState::new);
    let dark = use_state(|| true);
    let input_ref = use_node_ref();

    // Load persisted view preferences
    {
        let viewer = viewer.clone();
        let dark = dark.clone();
        use_effect_with((), move |_| {
            let prefs = load_prefs();
            viewer.dispatch(ViewerAction::SetViewMode(prefs.view_mode));
            viewer.dispatch(ViewerAction::SetGridLayout(prefs.grid_layout));
            dark.set(prefs.dark);
            || ()
        });
    }
    // Persist preference changes
    {
        let deps = (viewer.view_mode, viewer.grid_layout, *dark);
        use_effect_with(deps, move |(view_mode, grid_layout, dark)| {
            save_prefs(&ViewerPrefs {
                view_mode: *view_mode,
                grid_layout: *grid_layout,
                dark: *dark,
            });
            || ()
        });
    }

    let on_files = {
        let viewer = viewer.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let files = match input.files() {
                Some(files) => files,
                None => return,
            };
            let mut entries = Vec::new();
            for i in 0..files.length() {
                if let Some(file) = files.item(i) {
                    if !file.type_().starts_with("image/") {
                        continue;
                    }
                    let url = match Url::create_object_url_with_blob(&file) {
                        Ok(url) => url,
                        Err(_) => continue,
                    };
                    entries.push(ImageEntry {
                        name: file.name(),
                        folder: folder_of(&file.webkit_relative_path()),
                        url,
                    });
                }
            }
            clog(&format!("selected {} image files", entries.len()));
            viewer.dispatch(ViewerAction::LoadEntries { entries });
            // allow picking the same folders again later
            input.set_value("");
        })
    };

    let on_pick = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: ()| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_view_mode = {
        let viewer = viewer.clone();
        Callback::from(move |mode: ViewMode| viewer.dispatch(ViewerAction::SetViewMode(mode)))
    };
    let on_grid_layout = {
        let viewer = viewer.clone();
        Callback::from(move |layout: GridLayout| {
            viewer.dispatch(ViewerAction::SetGridLayout(layout))
        })
    };
    let on_toggle_theme = {
        let dark = dark.clone();
        Callback::from(move |_: ()| dark.set(!*dark))
    };
    let on_prev = {
        let viewer = viewer.clone();
        Callback::from(move |_: ()| viewer.dispatch(ViewerAction::NavigatePrev))
    };
    let on_next = {
        let viewer = viewer.clone();
        Callback::from(move |_: ()| viewer.dispatch(ViewerAction::NavigateNext))
    };

    let (bg, fg) = if *dark {
        ("#0d1117", "#e6edf3")
    } else {
        ("#f6f8fa", "#1f2328")
    };
    let stats = viewer.has_results().then(|| viewer.stats_line());
    let show_nav = viewer.has_results() && viewer.view_mode == ViewMode::Single;
    let nav_label = format!("{} / {}", viewer.current_index + 1, viewer.filenames.len());

    html! {
        <div style={format!("min-height:100vh; background:{bg}; color:{fg}; font-family:sans-serif;")}>
            <input
                ref={input_ref}
                type="file"
                webkitdirectory=true
                multiple=true
                style="display:none;"
                onchange={on_files}
            />
            <Toolbar
                {stats}
                view_mode={viewer.view_mode}
                grid_layout={viewer.grid_layout}
                dark={*dark}
                on_pick={on_pick.clone()}
                {on_view_mode}
                {on_grid_layout}
                {on_toggle_theme}
            />
            if show_nav {
                <NavControls label={nav_label} {on_prev} {on_next} />
            }
            if viewer.has_results() {
                <CompareView viewer={viewer.clone()} />
            } else {
                <EmptyState on_pick={on_pick.clone()} />
            }
        </div>
    }
}
