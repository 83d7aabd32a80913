use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::{GridLayout, ViewMode};

#[derive(Properties, PartialEq, Clone)]
pub struct ToolbarProps {
    pub stats: Option<String>,
    pub view_mode: ViewMode,
    pub grid_layout: GridLayout,
    pub dark: bool,
    pub on_pick: Callback<()>,
    pub on_view_mode: Callback<ViewMode>,
    pub on_grid_layout: Callback<GridLayout>,
    pub on_toggle_theme: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let pick = {
        let cb = props.on_pick.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let toggle_theme = {
        let cb = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let view_mode_change = {
        let cb = props.on_view_mode.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            cb.emit(ViewMode::from_key(&value));
        })
    };
    let grid_layout_change = {
        let cb = props.on_grid_layout.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            cb.emit(GridLayout::from_key(&value));
        })
    };

    let (bar_bg, border) = if props.dark {
        ("rgba(22,27,34,0.9)", "#30363d")
    } else {
        ("rgba(246,248,250,0.9)", "#d0d7de")
    };

    html! {
        <div id="top-bar" style={format!("display:flex; align-items:center; gap:12px; flex-wrap:wrap; padding:10px 16px; border-bottom:1px solid {border}; background:{bar_bg};")}>
            <span style="font-weight:700;">{"Image Compare"}</span>
            <button onclick={pick}>{"Select Folders"}</button>
            <label style="display:flex; align-items:center; gap:6px; font-size:13px;">
                {"View"}
                <select onchange={view_mode_change}>
                    <option value="single" selected={props.view_mode == ViewMode::Single}>{"Single file"}</option>
                    <option value="all" selected={props.view_mode == ViewMode::All}>{"All files"}</option>
                </select>
            </label>
            <label style="display:flex; align-items:center; gap:6px; font-size:13px;">
                {"Grid"}
                <select onchange={grid_layout_change}>
                    <option value="2" selected={props.grid_layout == GridLayout::Two}>{"2 columns"}</option>
                    <option value="3" selected={props.grid_layout == GridLayout::Three}>{"3 columns"}</option>
                    <option value="4" selected={props.grid_layout == GridLayout::Four}>{"4 columns"}</option>
                </select>
            </label>
            if let Some(stats) = &props.stats {
                <span style="font-size:13px; opacity:0.7;">{ stats.clone() }</span>
            }
            <span style="flex:1;"></span>
            <button onclick={toggle_theme}>{ if props.dark { "Light" } else { "Dark" } }</button>
        </div>
    }
}
